/// Orbit and pursuit steering for the animated objects
use nalgebra::{Point3, Vector2};

use crate::transform::Pose;

/// Movement along a fixed-radius circle, parameterized by a single angle.
///
/// The angle only ever decreases (the orbit runs clockwise seen from above),
/// so a given speed sequence always reproduces the same trajectory.
#[derive(Debug, Clone, Copy)]
pub struct OrbitMotion {
    angle: f32,
    radius: f32,
    center: Point3<f32>,
}

impl OrbitMotion {
    pub fn new(center: Point3<f32>, radius: f32) -> Self {
        Self {
            angle: 0.0,
            radius,
            center,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Advance one tick at the given angular speed (radians per tick).
    pub fn advance(&mut self, speed: f32) {
        self.angle -= speed;
    }

    pub fn position(&self) -> Point3<f32> {
        Point3::new(
            self.center.x + self.angle.cos() * self.radius,
            self.center.y,
            self.center.z + self.angle.sin() * self.radius,
        )
    }

    /// Yaw tangent to the track, facing the direction of travel.
    pub fn heading(&self) -> f32 {
        -self.angle + std::f32::consts::FRAC_PI_2
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position(), self.heading())
    }
}

/// Tunables for the pursuing follower.
#[derive(Debug, Clone, Copy)]
pub struct PursuitConfig {
    pub min_speed: f32,
    pub max_speed: f32,
    /// Horizontal distance below which the follower counts as having caught
    /// its target.
    pub capture_radius: f32,
    /// Cruise altitude while chasing.
    pub flight_altitude: f32,
    /// Height above the target while perched on it.
    pub perch_offset: f32,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            min_speed: 0.06,
            max_speed: 0.25,
            capture_radius: 2.0,
            flight_altitude: 8.0,
            perch_offset: 1.2,
        }
    }
}

/// Whether the follower is still closing in or riding its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PursuitPhase {
    Chasing,
    Perched,
}

/// Seek steering toward a moving target's horizontal projection.
#[derive(Debug, Clone, Copy)]
pub struct PursuitMotion {
    position: Point3<f32>,
    speed: f32,
    heading: f32,
    config: PursuitConfig,
}

impl PursuitMotion {
    pub fn new(start: Point3<f32>, config: PursuitConfig) -> Self {
        Self {
            position: start,
            speed: config.min_speed,
            heading: 0.0,
            config,
        }
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set the chase speed, clamped into the configured band.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(self.config.min_speed, self.config.max_speed);
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.heading)
    }

    /// Advance one tick toward the target's horizontal projection.
    ///
    /// Outside the capture radius the follower flies level at its cruise
    /// altitude; inside it, it snaps onto the target. The distance check runs
    /// before normalization, so a zero displacement never divides by zero.
    pub fn advance(&mut self, target: &Point3<f32>) -> PursuitPhase {
        let offset = Vector2::new(target.x - self.position.x, target.z - self.position.z);
        let distance = offset.norm();

        if distance > self.config.capture_radius {
            let step = offset * (self.speed / distance);
            self.position.x += step.x;
            self.position.z += step.y;
            self.position.y = self.config.flight_altitude;
            self.heading = offset.x.atan2(offset.y);
            PursuitPhase::Chasing
        } else {
            self.position.x = target.x;
            self.position.z = target.z;
            self.position.y = target.y + self.config.perch_offset;
            PursuitPhase::Perched
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_starts_on_the_positive_x_axis() {
        let orbit = OrbitMotion::new(Point3::new(0.0, 0.5, 0.0), 8.0);
        let pos = orbit.position();
        assert!((pos.x - 8.0).abs() < 1e-6);
        assert!((pos.y - 0.5).abs() < 1e-6);
        assert!(pos.z.abs() < 1e-6);
    }

    #[test]
    fn test_orbit_angle_is_monotonically_non_increasing() {
        let mut orbit = OrbitMotion::new(Point3::origin(), 8.0);
        let mut previous = orbit.angle();
        for speed in [0.01, 0.0, 0.07, 0.03] {
            orbit.advance(speed);
            assert!(orbit.angle() <= previous);
            previous = orbit.angle();
        }
    }

    #[test]
    fn test_orbit_trajectory_is_reproducible() {
        let speeds = [0.01, 0.02, 0.07, 0.01, 0.035, 0.0];

        let run = |speeds: &[f32]| {
            let mut orbit = OrbitMotion::new(Point3::new(0.0, 0.5, 0.0), 8.0);
            speeds
                .iter()
                .map(|&s| {
                    orbit.advance(s);
                    let p = orbit.position();
                    (p.x, p.z)
                })
                .collect::<Vec<_>>()
        };

        // Bit-for-bit equality, not epsilon equality.
        assert_eq!(run(&speeds), run(&speeds));
    }

    #[test]
    fn test_orbit_stays_on_the_circle() {
        let mut orbit = OrbitMotion::new(Point3::origin(), 8.0);
        for _ in 0..500 {
            orbit.advance(0.07);
            let p = orbit.position();
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((r - 8.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_pursuit_sample_scenario() {
        // Follower at (0, 8, 0), target at (0, 0.5, 8): horizontal distance 8,
        // well outside the capture radius.
        let mut pursuit = PursuitMotion::new(Point3::new(0.0, 8.0, 0.0), PursuitConfig::default());
        pursuit.set_speed(0.1);

        let phase = pursuit.advance(&Point3::new(0.0, 0.5, 8.0));

        assert_eq!(phase, PursuitPhase::Chasing);
        let pos = pursuit.position();
        assert!((pos.z - 0.1).abs() < 1e-6);
        assert!(pos.x.abs() < 1e-6);
        assert_eq!(pos.y, 8.0);
    }

    #[test]
    fn test_pursuit_converges_and_snaps_onto_a_stationary_target() {
        let target = Point3::new(5.0, 0.5, -3.0);
        let mut pursuit =
            PursuitMotion::new(Point3::new(-6.0, 8.0, 4.0), PursuitConfig::default());
        pursuit.set_speed(0.25);

        let mut distance = f32::INFINITY;
        let mut perched = false;
        for _ in 0..200 {
            let phase = pursuit.advance(&target);
            let pos = pursuit.position();
            let d = ((target.x - pos.x).powi(2) + (target.z - pos.z).powi(2)).sqrt();
            if phase == PursuitPhase::Perched {
                perched = true;
                break;
            }
            assert!(d < distance);
            distance = d;
        }

        assert!(perched);
        let pos = pursuit.position();
        assert_eq!(pos.x, target.x);
        assert_eq!(pos.z, target.z);
        assert!((pos.y - (target.y + 1.2)).abs() < 1e-6);
    }

    #[test]
    fn test_pursuit_handles_zero_displacement() {
        let target = Point3::new(1.0, 0.5, 1.0);
        let mut pursuit = PursuitMotion::new(Point3::new(1.0, 8.0, 1.0), PursuitConfig::default());

        let phase = pursuit.advance(&target);

        assert_eq!(phase, PursuitPhase::Perched);
        let pos = pursuit.position();
        assert!(pos.x.is_finite() && pos.y.is_finite() && pos.z.is_finite());
        assert_eq!(pos.x, 1.0);
        assert_eq!(pos.z, 1.0);
    }

    #[test]
    fn test_pursuit_speed_is_clamped_into_its_band() {
        let cfg = PursuitConfig::default();
        let mut pursuit = PursuitMotion::new(Point3::origin(), cfg);

        pursuit.set_speed(10.0);
        assert_eq!(pursuit.speed(), cfg.max_speed);

        pursuit.set_speed(0.0);
        assert_eq!(pursuit.speed(), cfg.min_speed);
    }
}
