//! Temporal smoother - exponential lerp/slerp toward the newest estimate
//!
//! The previous output is weighted by `factor` and the new candidate by
//! `1 − factor`: a larger factor means more inertia (smoother, more lag).
//! When the hand drops out the stored pose is handled by a `StalePolicy`.

use nalgebra::{UnitQuaternion, Vector3};
use serde::Deserialize;

use super::state::CandidatePose;

/// Upper bound for the smoothing factor; 1.0 would freeze the output
const MAX_FACTOR: f32 = 0.999;

/// Slerp falls back to the candidate when quaternions are this close to opposite
const SLERP_EPSILON: f32 = 1e-6;

/// What happens to the stored pose while no hand is detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Keep the last pose; the next detection smooths from it
    Hold,
    /// Forget immediately; the next detection is adopted as-is
    Reset,
    /// Forget once the hand has been missing for more than N detection cycles
    ResetAfter(u32),
}

impl Default for StalePolicy {
    fn default() -> Self {
        Self::ResetAfter(15)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedPose {
    pub position: Vector3<f32>,
    pub orientation: UnitQuaternion<f32>,
}

pub struct PoseSmoother {
    factor: f32,
    policy: StalePolicy,
    previous: Option<SmoothedPose>,
    missed_frames: u32,
}

impl PoseSmoother {
    pub fn new(factor: f32, policy: StalePolicy) -> Self {
        Self {
            factor: Self::sanitize(factor),
            policy,
            previous: None,
            missed_frames: 0,
        }
    }

    fn sanitize(factor: f32) -> f32 {
        if factor.is_finite() {
            factor.clamp(0.0, MAX_FACTOR)
        } else {
            0.0
        }
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn set_factor(&mut self, factor: f32) {
        self.factor = Self::sanitize(factor);
    }

    pub fn set_policy(&mut self, policy: StalePolicy) {
        self.policy = policy;
    }

    pub fn is_initialized(&self) -> bool {
        self.previous.is_some()
    }

    /// Blend a new candidate with the stored pose and store the result.
    ///
    /// The first candidate after creation or reset is returned unchanged.
    pub fn smooth(&mut self, candidate: &CandidatePose) -> SmoothedPose {
        self.missed_frames = 0;

        let next = match self.previous {
            None => SmoothedPose {
                position: candidate.position,
                orientation: candidate.orientation,
            },
            Some(prev) => SmoothedPose {
                position: candidate.position.lerp(&prev.position, self.factor),
                orientation: candidate
                    .orientation
                    .try_slerp(&prev.orientation, self.factor, SLERP_EPSILON)
                    .unwrap_or(candidate.orientation),
            },
        };

        self.previous = Some(next);
        next
    }

    /// Called once per detection cycle without a hand
    pub fn mark_lost(&mut self) {
        self.missed_frames = self.missed_frames.saturating_add(1);
        let expired = match self.policy {
            StalePolicy::Hold => false,
            StalePolicy::Reset => true,
            StalePolicy::ResetAfter(limit) => self.missed_frames > limit,
        };
        if expired && self.previous.is_some() {
            log::debug!("Smoothing state reset after {} missed frames", self.missed_frames);
            self.previous = None;
        }
    }

    pub fn reset(&mut self) {
        self.previous = None;
        self.missed_frames = 0;
    }
}
