//! Shared tuning for timeline scroll behaviour
//!
//! One struct carries every constant the controller, gesture filter and
//! spring share, so the host can override them from config in one place.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance for position corrections: excursions inside this band are left
/// alone to avoid churn from floating-point residue.
pub const CLAMP_EPSILON: f32 = 0.1;

#[derive(Error, Debug)]
pub enum TuningError {
    #[error("wheel threshold must be positive, got {0}")]
    NonPositiveThreshold(f32),
    #[error("max step per event must be at least 1, got {0}")]
    NonPositiveMaxStep(i32),
    #[error("spring stiffness and damping must be positive, got {0}/{1}")]
    NonPositiveSpring(f32, f32),
}

/// Scroll sensitivity and animation constants, uniform across all cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollTuning {
    /// Pixel threshold to accumulate before stepping to the next/previous year
    pub wheel_threshold_px: f32,
    /// Ignore wheel deltas smaller than this to reduce sensor noise
    pub deadzone_px: f32,
    /// Maximum year steps per single wheel event (prevents wild jumps)
    pub max_step_per_event: i32,
    /// Pixels per line for line-unit wheel deltas
    pub line_height_px: f32,
    /// Bottom padding added below the last group (breathing room)
    pub content_bottom_padding_px: f32,
    /// Spring stiffness for the animated position
    pub stiffness: f32,
    /// Spring damping for the animated position
    pub damping: f32,
    /// Re-anchor only when the recomputed target drifts further than this
    pub reanchor_tolerance_px: f32,
    /// How long after the last consumed wheel event re-anchoring stays suppressed
    pub wheel_active_ms: u64,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            wheel_threshold_px: 360.0,
            deadzone_px: 2.0,
            max_step_per_event: 3,
            line_height_px: 16.0,
            content_bottom_padding_px: 24.0,
            stiffness: 260.0,
            damping: 30.0,
            reanchor_tolerance_px: 2.0,
            wheel_active_ms: 180,
        }
    }
}

impl ScrollTuning {
    /// Reject configurations the accumulator or spring cannot work with.
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.wheel_threshold_px <= 0.0 {
            return Err(TuningError::NonPositiveThreshold(self.wheel_threshold_px));
        }
        if self.max_step_per_event < 1 {
            return Err(TuningError::NonPositiveMaxStep(self.max_step_per_event));
        }
        if self.stiffness <= 0.0 || self.damping <= 0.0 {
            return Err(TuningError::NonPositiveSpring(self.stiffness, self.damping));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(ScrollTuning::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let tuning = ScrollTuning {
            wheel_threshold_px: 0.0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_max_step() {
        let tuning = ScrollTuning {
            max_step_per_event: 0,
            ..Default::default()
        };
        assert!(tuning.validate().is_err());
    }
}
