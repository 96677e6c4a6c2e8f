/// Input-driven speed model: shared speed scalar, pointer sampling, idle decay
use thiserror::Error;

/// Tunable constants for the speed model.
#[derive(Debug, Clone, Copy)]
pub struct MotionConfig {
    /// Resting angular speed (radians per tick); the decay floor.
    pub base_speed: f32,
    /// Hard ceiling on angular speed.
    pub max_speed: f32,
    /// Speed removed per tick once input has gone idle.
    pub decay_step: f32,
    /// Speed gained per pixel of horizontal pointer travel.
    pub accel_per_px: f32,
    /// Samples farther apart than this are discarded as uncorrelated movement.
    pub sample_window_ms: f64,
    /// Idle time after which decay starts pulling speed back to base.
    pub idle_threshold_ms: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            base_speed: 0.01,
            max_speed: 0.07,
            decay_step: 0.0005,
            accel_per_px: 0.0005,
            sample_window_ms: 50.0,
            idle_threshold_ms: 100.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum MotionConfigError {
    #[error("base speed {base} must not exceed max speed {max}")]
    SpeedBoundsInverted { base: f32, max: f32 },
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidConstant { name: &'static str, value: f64 },
}

impl MotionConfig {
    /// Reject unusable configurations up front, before any state is built.
    pub fn validate(&self) -> Result<(), MotionConfigError> {
        let constants: [(&'static str, f64); 6] = [
            ("base_speed", self.base_speed as f64),
            ("max_speed", self.max_speed as f64),
            ("decay_step", self.decay_step as f64),
            ("accel_per_px", self.accel_per_px as f64),
            ("sample_window_ms", self.sample_window_ms),
            ("idle_threshold_ms", self.idle_threshold_ms),
        ];
        for (name, value) in constants {
            if !value.is_finite() || value < 0.0 {
                return Err(MotionConfigError::InvalidConstant { name, value });
            }
        }
        if self.base_speed > self.max_speed {
            return Err(MotionConfigError::SpeedBoundsInverted {
                base: self.base_speed,
                max: self.max_speed,
            });
        }
        Ok(())
    }
}

/// The shared speed scalar read by the frame loop, plus the idle clock.
///
/// Invariant: `base_speed <= speed <= max_speed` after every update.
#[derive(Debug, Clone, Copy)]
pub struct SpeedControl {
    speed: f32,
    base_speed: f32,
    max_speed: f32,
    last_input_ms: f64,
}

impl SpeedControl {
    pub fn new(config: &MotionConfig, now_ms: f64) -> Self {
        Self {
            speed: config.base_speed,
            base_speed: config.base_speed,
            max_speed: config.max_speed,
            last_input_ms: now_ms,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    pub fn last_input_ms(&self) -> f64 {
        self.last_input_ms
    }

    /// Add a (signed) speed delta, clamped into `[base, max]`.
    pub fn boost(&mut self, delta: f32) {
        self.speed = (self.speed + delta).clamp(self.base_speed, self.max_speed);
    }

    /// Remove speed, never dropping below the resting base.
    pub fn decay(&mut self, amount: f32) {
        self.speed = (self.speed - amount).max(self.base_speed);
    }

    /// Restart the idle clock.
    pub fn mark_input(&mut self, now_ms: f64) {
        self.last_input_ms = now_ms;
    }
}

/// Converts raw horizontal pointer samples into speed boosts.
#[derive(Debug, Clone, Copy)]
pub struct InputTracker {
    last_x: Option<f32>,
    last_sample_ms: f64,
    accel_per_px: f32,
    sample_window_ms: f64,
}

impl InputTracker {
    pub fn new(config: &MotionConfig, now_ms: f64) -> Self {
        Self {
            last_x: None,
            last_sample_ms: now_ms,
            accel_per_px: config.accel_per_px,
            sample_window_ms: config.sample_window_ms,
        }
    }

    /// Feed one `(x, timestamp)` pointer sample.
    ///
    /// Displacement only counts when the previous sample is recent enough to
    /// be part of the same gesture; the idle clock restarts on every sample,
    /// including discarded ones.
    pub fn sample(&mut self, x: f32, now_ms: f64, speed: &mut SpeedControl) {
        if let Some(last_x) = self.last_x {
            let delta_ms = now_ms - self.last_sample_ms;
            if delta_ms < self.sample_window_ms {
                speed.boost((x - last_x) * self.accel_per_px);
            }
        }
        self.last_x = Some(x);
        self.last_sample_ms = now_ms;
        speed.mark_input(now_ms);
    }
}

/// Friction pulling the speed back to base once input goes quiet.
#[derive(Debug, Clone, Copy)]
pub struct DecayPolicy {
    idle_threshold_ms: f64,
    decay_step: f32,
}

impl DecayPolicy {
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            idle_threshold_ms: config.idle_threshold_ms,
            decay_step: config.decay_step,
        }
    }

    /// Apply one tick of decay if the input has been idle past the threshold.
    pub fn apply(&self, now_ms: f64, speed: &mut SpeedControl) {
        let idle_ms = now_ms - speed.last_input_ms();
        if idle_ms > self.idle_threshold_ms && speed.speed() > speed.base_speed() {
            speed.decay(self.decay_step);
        }
    }
}
