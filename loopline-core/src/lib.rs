/// Loopline Core Library - Motion model, geometry and projection
///
/// This library provides the host-agnostic core of the diorama: the
/// input-driven speed model, orbit and pursuit steering, scene blueprint,
/// and camera/projection math. Render hosts (terminal, web) drive it by
/// passing millisecond timestamps in; the core never reads a clock.

pub mod geometry;
pub mod motion;
pub mod projection;
pub mod scene;
pub mod session;
pub mod steering;
pub mod transform;

// Re-export commonly used types
pub use geometry::{Mesh, Triangle, Vertex};
pub use motion::{DecayPolicy, InputTracker, MotionConfig, MotionConfigError, SpeedControl};
pub use projection::Camera;
pub use scene::{Color, SceneBlueprint, SceneNode, TrackLayout};
pub use session::{FramePoses, Session};
pub use steering::{OrbitMotion, PursuitConfig, PursuitMotion, PursuitPhase};
pub use transform::{Pose, Transform};
