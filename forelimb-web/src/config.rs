//! Overlay configuration - tuned constants plus per-species model paths
//!
//! Every field has a default, so the host may send a partial JSON object.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::pose::StalePolicy;

/// Models are authored around a ~7cm hand area while landmarks are 0-1
/// normalized, hence the large multiplier.
pub const HAND_MODE_SCALE_MULTIPLIER: f32 = 40.0;

/// Free explore renders models at 1:1.
pub const FREE_EXPLORE_SCALE: f32 = 1.0;

/// Weight given to the previous frame's pose.
pub const SMOOTHING_FACTOR: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UserScaleConfig {
    pub min: f32,
    pub max: f32,
    pub default: f32,
    pub step: f32,
}

impl Default for UserScaleConfig {
    fn default() -> Self {
        Self {
            min: 0.5,
            max: 2.0,
            default: 1.0,
            step: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub initial_distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Fraction of pending rotation applied per tick
    pub damping: f32,
    /// Radians per pixel of drag
    pub rotate_speed: f32,
    /// Zoom factor per unit of wheel/pinch delta
    pub zoom_speed: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            initial_distance: 3.0,
            min_distance: 1.5,
            max_distance: 5.0,
            damping: 0.05,
            rotate_speed: 0.005,
            zoom_speed: 0.001,
        }
    }
}

/// A selectable species and where its skeleton model lives.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpeciesEntry {
    pub id: String,
    #[serde(default)]
    pub model_path: Option<String>,
}

impl SpeciesEntry {
    fn with_model(id: &str) -> Self {
        Self {
            id: id.to_string(),
            model_path: Some(format!("models/{id}.glb")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub smoothing_factor: f32,
    pub hand_mode_scale_multiplier: f32,
    pub free_explore_scale: f32,
    pub user_scale: UserScaleConfig,
    pub stale_policy: StalePolicy,
    pub orbit: OrbitConfig,
    pub species: Vec<SpeciesEntry>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            smoothing_factor: SMOOTHING_FACTOR,
            hand_mode_scale_multiplier: HAND_MODE_SCALE_MULTIPLIER,
            free_explore_scale: FREE_EXPLORE_SCALE,
            user_scale: UserScaleConfig::default(),
            stale_policy: StalePolicy::default(),
            orbit: OrbitConfig::default(),
            species: ["tiktaalik", "bat", "human", "tortoise"]
                .iter()
                .map(|id| SpeciesEntry::with_model(id))
                .collect(),
        }
    }
}

impl OverlayConfig {
    /// Parse and validate a JSON config from the host.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.smoothing_factor) {
            return Err(ConfigError::OutOfRange(format!(
                "smoothing_factor {} not in [0, 1)",
                self.smoothing_factor
            )));
        }
        if !(self.hand_mode_scale_multiplier > 0.0) {
            return Err(ConfigError::OutOfRange(
                "hand_mode_scale_multiplier must be positive".into(),
            ));
        }
        let s = &self.user_scale;
        if !(s.min > 0.0 && s.min <= s.max && (s.min..=s.max).contains(&s.default)) {
            return Err(ConfigError::OutOfRange(format!(
                "user_scale needs 0 < min <= default <= max, got {} / {} / {}",
                s.min, s.default, s.max
            )));
        }
        if !(s.step > 0.0) {
            return Err(ConfigError::OutOfRange("user_scale.step must be positive".into()));
        }
        let o = &self.orbit;
        if !(o.min_distance > 0.0 && o.min_distance <= o.max_distance) {
            return Err(ConfigError::OutOfRange(format!(
                "orbit distance range [{}, {}] is invalid",
                o.min_distance, o.max_distance
            )));
        }
        if !(o.damping > 0.0 && o.damping <= 1.0) {
            return Err(ConfigError::OutOfRange("orbit.damping must be in (0, 1]".into()));
        }
        Ok(())
    }

    pub fn species(&self, id: &str) -> Option<&SpeciesEntry> {
        self.species.iter().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(OverlayConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = OverlayConfig::from_json(r#"{"smoothing_factor": 0.8}"#).unwrap();
        assert_eq!(config.smoothing_factor, 0.8);
        assert_eq!(config.hand_mode_scale_multiplier, HAND_MODE_SCALE_MULTIPLIER);
        assert_eq!(config.species.len(), 4);
    }

    #[test]
    fn test_stale_policy_from_json() {
        let config = OverlayConfig::from_json(r#"{"stale_policy": {"reset_after": 3}}"#).unwrap();
        assert_eq!(config.stale_policy, StalePolicy::ResetAfter(3));
        let config = OverlayConfig::from_json(r#"{"stale_policy": "hold"}"#).unwrap();
        assert_eq!(config.stale_policy, StalePolicy::Hold);
    }

    #[test]
    fn test_rejects_smoothing_of_one() {
        let err = OverlayConfig::from_json(r#"{"smoothing_factor": 1.0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange(_)));
    }

    #[test]
    fn test_rejects_inverted_scale_bounds() {
        let err = OverlayConfig::from_json(r#"{"user_scale": {"min": 2.0, "max": 0.5}}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_species_without_model() {
        let config =
            OverlayConfig::from_json(r#"{"species": [{"id": "frog"}]}"#).unwrap();
        assert_eq!(config.species("frog").unwrap().model_path, None);
        assert!(config.species("bat").is_none());
    }
}
