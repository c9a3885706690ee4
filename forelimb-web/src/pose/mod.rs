//! Pose module - landmarks to a smoothed model transform
//!
//! Re-exports only. All logic in submodules.

mod state;
mod landmarks;
mod estimator;
mod smoother;

pub use state::{CandidatePose, PoseTransform};
pub use landmarks::{
    HandLandmark, LandmarkSet, HAND_SKELETON, LANDMARK_COUNT, FLOATS_PER_HAND,
    WRIST, INDEX_MCP, MIDDLE_MCP, MIDDLE_TIP, PINKY_MCP,
};
pub use estimator::{estimate_pose, hand_basis, to_scene_space, HandBasis, DEGENERATE_EPSILON};
pub use smoother::{PoseSmoother, SmoothedPose, StalePolicy};
