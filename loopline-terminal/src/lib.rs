/// Terminal host for the diorama: frame loop, mouse input, ASCII output
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use loopline_core::{
    Camera, FramePoses, Mesh, MotionConfig, PursuitConfig, SceneBlueprint, SceneNode, Session,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Terminal cells are coarse; one column of mouse travel counts as this many
/// pixels of pointer displacement.
const CELL_WIDTH_PX: f32 = 8.0;

/// Main application struct for the terminal diorama
pub struct TerminalApp {
    blueprint: SceneBlueprint,
    static_meshes: Vec<(Mesh, SceneNode)>,
    train_mesh: Mesh,
    bird_mesh: Mesh,
    session: Session,
    camera: Camera,
    renderer: AsciiRenderer,
    epoch: Instant,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(blueprint: SceneBlueprint) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        let session = Session::new(
            MotionConfig::default(),
            PursuitConfig::default(),
            &blueprint.track,
            0.0,
        )
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

        let static_meshes = blueprint
            .statics
            .iter()
            .map(|node| (node.mesh(), node.clone()))
            .collect();
        let train_mesh = blueprint.train.mesh();
        let bird_mesh = blueprint.bird.mesh();

        Ok(Self {
            blueprint,
            static_meshes,
            train_mesh,
            bird_mesh,
            session,
            camera: Camera::new(width as u32, height as u32),
            renderer: AsciiRenderer::new(width as usize, height as usize),
            epoch: Instant::now(),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            terminal::LeaveAlternateScreen,
            DisableMouseCapture,
            cursor::Show
        )?;

        result
    }

    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Drain pending input; mouse movement arrives in bursts.
            while event::poll(Duration::from_millis(0))? {
                self.handle_event()?;
            }

            // Advance the animation
            let poses = self.session.tick(self.now_ms());

            // Render
            self.render(&poses)?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                _ => {}
            },
            Event::Mouse(mouse) => {
                if matches!(
                    mouse.kind,
                    MouseEventKind::Moved | MouseEventKind::Drag(_)
                ) {
                    let x = mouse.column as f32 * CELL_WIDTH_PX;
                    self.session.pointer_moved(x, self.now_ms());
                }
            }
            Event::Resize(width, height) => {
                self.camera.set_viewport(width as u32, height as u32);
                self.renderer.resize(width as usize, height as usize);
            }
            _ => {}
        }
        Ok(())
    }

    fn render(&mut self, poses: &FramePoses) -> io::Result<()> {
        self.renderer.clear();

        let light = self.blueprint.light_direction;
        for (mesh, node) in &self.static_meshes {
            self.renderer
                .render_mesh(mesh, &node.pose.model_matrix(), &self.camera, node.color, &light);
        }
        self.renderer.render_mesh(
            &self.train_mesh,
            &poses.train.model_matrix(),
            &self.camera,
            self.blueprint.train.color,
            &light,
        );
        self.renderer.render_mesh(
            &self.bird_mesh,
            &poses.bird.model_matrix(),
            &self.camera,
            self.blueprint.bird.color,
            &light,
        );

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Loopline | FPS: {:.1} | speed: {:.3} | Move the mouse sideways to speed up | Q=Quit",
                self.fps,
                self.session.speed()
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
