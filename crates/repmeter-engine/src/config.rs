//! Engine configuration.

use repmeter_core::{EngineError, EngineResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`RepEngine`](crate::RepEngine) behaviour.
///
/// The defaults reproduce the reference biceps-curl tuning; the same state
/// machine applies to any single-joint flexion/extension movement classified
/// by two angle thresholds.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    /// Raw angle above which the limb counts as extended (default: 160.0)
    pub down_angle_deg: f64,
    /// Raw angle below which the limb counts as flexed (default: 50.0)
    pub up_angle_deg: f64,
    /// Torso deviation limit for the 3-frame average (default: 30.0)
    pub torso_angle_deg: f64,
    /// Dwell time a candidate state must persist before commit (default: 0.2)
    pub min_hold_secs: f64,
    /// Capacity of the angle smoothing window (default: 12)
    pub smoothing_window: usize,
    /// Capacity of the torso-angle violation window (default: 3)
    pub torso_window: usize,
    /// Landmark confidence below which a side's update is skipped
    /// (default: 0.0, i.e. trust upstream confidence gating)
    pub min_confidence: f32,
    /// Minimum raw-angle range a cycle must cover, in degrees.
    /// 0.0 disables the range-of-motion check (default: 0.0)
    pub min_rom_deg: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            down_angle_deg: 160.0,
            up_angle_deg: 50.0,
            torso_angle_deg: 30.0,
            min_hold_secs: 0.2,
            smoothing_window: 12,
            torso_window: 3,
            min_confidence: 0.0,
            min_rom_deg: 0.0,
        }
    }
}

impl EngineConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] if the thresholds are not
    /// ordered (`up < down`), a duration is negative, a window is empty, or
    /// the confidence gate is outside [0.0, 1.0].
    pub fn validate(&self) -> EngineResult<()> {
        if self.up_angle_deg >= self.down_angle_deg {
            return Err(EngineError::configuration(format!(
                "up threshold ({}) must be below down threshold ({})",
                self.up_angle_deg, self.down_angle_deg
            )));
        }
        if self.min_hold_secs < 0.0 {
            return Err(EngineError::configuration(format!(
                "min_hold_secs must be non-negative, got {}",
                self.min_hold_secs
            )));
        }
        if self.smoothing_window == 0 || self.torso_window == 0 {
            return Err(EngineError::configuration(
                "smoothing_window and torso_window must hold at least one sample",
            ));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(EngineError::configuration(format!(
                "min_confidence must be in [0.0, 1.0], got {}",
                self.min_confidence
            )));
        }
        if self.min_rom_deg < 0.0 {
            return Err(EngineError::configuration(format!(
                "min_rom_deg must be non-negative, got {}",
                self.min_rom_deg
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let config = EngineConfig {
            up_angle_deg: 170.0,
            ..EngineConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("up threshold"));
    }

    #[test]
    fn rejects_negative_hold_time() {
        let config = EngineConfig {
            min_hold_secs: -0.1,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_capacity_windows() {
        let config = EngineConfig {
            torso_window: 0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_confidence_gate() {
        let config = EngineConfig {
            min_confidence: 1.5,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
