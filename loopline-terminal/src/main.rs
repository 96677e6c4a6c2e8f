/// Loopline Terminal Demo - office diorama
///
/// An office block, a train circling it, and a bird chasing the train.
/// Controls:
///   - Move the mouse sideways to speed the train up
///   - Q/ESC: Quit

use loopline_core::SceneBlueprint;
use loopline_terminal::TerminalApp;
use std::io;

fn main() -> io::Result<()> {
    println!("Loopline Terminal - Loading...");

    let blueprint = SceneBlueprint::office_diorama();

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    // Run the terminal app
    let mut app = TerminalApp::new(blueprint)?;
    app.run()?;

    println!("Thanks for visiting the diorama!");
    Ok(())
}
