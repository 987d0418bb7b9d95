//! Fixed-duration tweens for smooth transitions
//!
//! - No callbacks - progress is polled each frame
//! - Call `tick(dt)` at the start of the frame, then read `value()`

/// Cubic ease-in-out, `t` in `[0, 1]`
pub fn ease_cubic_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// Linear interpolation
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Progress of a transition that lasts a fixed time
#[derive(Debug, Clone)]
pub struct Tween {
    elapsed: f32,
    duration: f32,
}

impl Tween {
    /// Create a tween lasting `duration` seconds
    pub fn new(duration: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    /// Advance by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
    }

    /// Raw progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed / self.duration
        }
    }

    /// Eased progress in `[0, 1]`
    pub fn value(&self) -> f32 {
        ease_cubic_in_out(self.progress())
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}
