//! User scale multiplier, bounded by the configured slider range

use crate::config::UserScaleConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct UserScale {
    value: f32,
    bounds: UserScaleConfig,
}

impl UserScale {
    pub fn new(bounds: UserScaleConfig) -> Self {
        Self {
            value: bounds.default,
            bounds,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Clamp to `[min, max]`; NaN falls back to the default
    pub fn set(&mut self, value: f32) -> f32 {
        self.value = if value.is_nan() {
            self.bounds.default
        } else {
            value.clamp(self.bounds.min, self.bounds.max)
        };
        self.value
    }

    pub fn step_up(&mut self) -> f32 {
        self.set(self.value + self.bounds.step)
    }

    pub fn step_down(&mut self) -> f32 {
        self.set(self.value - self.bounds.step)
    }

    /// Rounded percentage for the slider label
    pub fn percentage(&self) -> u32 {
        (self.value * 100.0).round() as u32
    }

    /// Swap in new bounds, keeping the current value if it still fits
    pub fn rebound(&mut self, bounds: UserScaleConfig) {
        self.bounds = bounds;
        self.set(self.value);
    }
}

impl Default for UserScale {
    fn default() -> Self {
        Self::new(UserScaleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_default() {
        let scale = UserScale::default();
        assert_eq!(scale.value(), 1.0);
        assert_eq!(scale.percentage(), 100);
    }

    #[test]
    fn test_out_of_range_clamps_to_nearest_bound() {
        let mut scale = UserScale::default();
        assert_eq!(scale.set(5.0), 2.0);
        assert_eq!(scale.set(0.1), 0.5);
        assert_eq!(scale.set(-3.0), 0.5);
        assert_eq!(scale.set(f32::INFINITY), 2.0);
        assert_eq!(scale.set(1.3), 1.3);
    }

    #[test]
    fn test_nan_falls_back_to_default() {
        let mut scale = UserScale::default();
        scale.set(1.7);
        assert_eq!(scale.set(f32::NAN), 1.0);
    }

    #[test]
    fn test_steps_stop_at_bounds() {
        let mut scale = UserScale::default();
        for _ in 0..30 {
            scale.step_up();
        }
        assert_eq!(scale.value(), 2.0);
        for _ in 0..30 {
            scale.step_down();
        }
        assert_eq!(scale.value(), 0.5);
        assert_eq!(scale.percentage(), 50);
    }

    #[test]
    fn test_rebound_reclamps() {
        let mut scale = UserScale::default();
        scale.set(1.8);
        scale.rebound(UserScaleConfig { min: 0.25, max: 1.5, default: 1.0, step: 0.25 });
        assert_eq!(scale.value(), 1.5);
    }
}
