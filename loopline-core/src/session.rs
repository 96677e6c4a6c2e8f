/// Per-session motion state and the per-tick update pipeline
use crate::motion::{DecayPolicy, InputTracker, MotionConfig, MotionConfigError, SpeedControl};
use crate::scene::TrackLayout;
use crate::steering::{OrbitMotion, PursuitConfig, PursuitMotion, PursuitPhase};
use crate::transform::Pose;

/// Poses produced by one tick, ready for the host's renderer.
#[derive(Debug, Clone, Copy)]
pub struct FramePoses {
    pub train: Pose,
    pub bird: Pose,
    pub bird_phase: PursuitPhase,
}

/// Owns every piece of mutable animation state for one viewer.
///
/// Hosts drive it from a single logical thread: the pointer handler and the
/// frame callback both borrow the session mutably, never concurrently. The
/// session holds no clock; hosts pass timestamps in milliseconds.
pub struct Session {
    speed: SpeedControl,
    input: InputTracker,
    decay: DecayPolicy,
    orbit: OrbitMotion,
    pursuit: PursuitMotion,
    track_radius: f32,
}

impl Session {
    /// Build a session for the given track. Fails if the motion constants
    /// are unusable.
    pub fn new(
        motion: MotionConfig,
        pursuit: PursuitConfig,
        layout: &TrackLayout,
        now_ms: f64,
    ) -> Result<Self, MotionConfigError> {
        motion.validate()?;
        Ok(Self {
            speed: SpeedControl::new(&motion, now_ms),
            input: InputTracker::new(&motion, now_ms),
            decay: DecayPolicy::new(&motion),
            orbit: OrbitMotion::new(layout.center, layout.radius),
            pursuit: PursuitMotion::new(layout.bird_start, pursuit),
            track_radius: layout.radius,
        })
    }

    /// Feed one horizontal pointer sample (host pixel units).
    pub fn pointer_moved(&mut self, x: f32, now_ms: f64) {
        self.input.sample(x, now_ms, &mut self.speed);
    }

    pub fn speed(&self) -> f32 {
        self.speed.speed()
    }

    /// Advance one frame: decay, then the orbiter, then the follower chasing
    /// the orbiter's fresh position.
    pub fn tick(&mut self, now_ms: f64) -> FramePoses {
        self.decay.apply(now_ms, &mut self.speed);

        self.orbit.advance(self.speed.speed());
        let target = self.orbit.position();

        // The bird paces itself against the train's linear speed along the
        // track (angular speed times radius), clamped into its own band.
        self.pursuit.set_speed(self.speed.speed() * self.track_radius);
        let bird_phase = self.pursuit.advance(&target);

        FramePoses {
            train: self.orbit.pose(),
            bird: self.pursuit.pose(),
            bird_phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(
            MotionConfig::default(),
            PursuitConfig::default(),
            &TrackLayout::default(),
            0.0,
        )
        .expect("default configuration is valid")
    }

    #[test]
    fn test_invalid_config_is_rejected_at_construction() {
        let motion = MotionConfig {
            base_speed: 1.0,
            max_speed: 0.5,
            ..MotionConfig::default()
        };
        let result = Session::new(
            motion,
            PursuitConfig::default(),
            &TrackLayout::default(),
            0.0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_idle_session_cruises_at_base_speed() {
        let mut session = session();
        let mut now = 0.0;
        for _ in 0..100 {
            now += 33.0;
            session.tick(now);
        }
        assert_eq!(session.speed(), MotionConfig::default().base_speed);
    }

    #[test]
    fn test_pointer_burst_speeds_up_then_decays_back() {
        let mut session = session();

        session.pointer_moved(100.0, 0.0);
        session.pointer_moved(220.0, 20.0);
        assert!(session.speed() > MotionConfig::default().base_speed);

        // No further input: idle decay pulls the speed back down to base.
        let mut now = 20.0;
        for _ in 0..300 {
            now += 33.0;
            session.tick(now);
        }
        assert_eq!(session.speed(), MotionConfig::default().base_speed);
    }

    #[test]
    fn test_fresh_input_suppresses_decay_within_the_tick() {
        let mut session = session();
        session.pointer_moved(0.0, 0.0);
        session.pointer_moved(140.0, 20.0);
        let boosted = session.speed();

        // Tick 50 ms after the last sample: inside the idle threshold, so
        // the boosted speed must drive this frame untouched.
        session.tick(70.0);
        assert_eq!(session.speed(), boosted);
    }

    #[test]
    fn test_train_rides_the_track_and_bird_eventually_perches() {
        // A crawling train keeps the bird's clamped minimum speed well above
        // the train's linear speed, so the chase must end in a capture.
        let motion = MotionConfig {
            base_speed: 0.001,
            ..MotionConfig::default()
        };
        let layout = TrackLayout::default();
        let mut session = Session::new(motion, PursuitConfig::default(), &layout, 0.0)
            .expect("valid configuration");

        let mut now = 0.0;
        let mut perched = false;
        for _ in 0..2_000 {
            now += 33.0;
            let poses = session.tick(now);

            let dx = poses.train.position.x - layout.center.x;
            let dz = poses.train.position.z - layout.center.z;
            assert!(((dx * dx + dz * dz).sqrt() - layout.radius).abs() < 1e-3);

            if poses.bird_phase == PursuitPhase::Perched {
                // Perched: horizontally glued to the train, sitting above it.
                assert_eq!(poses.bird.position.x, poses.train.position.x);
                assert_eq!(poses.bird.position.z, poses.train.position.z);
                assert!(poses.bird.position.y > poses.train.position.y);
                perched = true;
                break;
            }
        }
        assert!(perched, "bird should catch a crawling train");
    }
}
