//! Hand landmark intake - one detection cycle per call
//!
//! The host runs the MediaPipe HandLandmarker on each video frame and calls
//! `apply_hand_landmarks` with a flat Float32Array of `num_hands × 21 × 3`
//! values (x, y, z per joint). Only the first hand drives the overlay.

use wasm_bindgen::prelude::*;

use super::state::with_state;
use crate::error::TrackingInitError;
use crate::overlay::WireframeGeometry;
use crate::pose::LandmarkSet;

// ============================================================================
// WASM API
// ============================================================================

#[wasm_bindgen]
pub fn apply_hand_landmarks(flat_data: &[f32], num_hands: usize) {
    let landmarks = if num_hands == 0 {
        None
    } else {
        match LandmarkSet::from_flat(flat_data, 0) {
            Ok(set) => Some(set),
            Err(err) => {
                // Malformed frame: leave the overlay as it was
                log::warn!("Dropping detection frame: {}", err);
                return;
            }
        }
    };

    with_state(|state| {
        state.overlay.update(landmarks.as_ref());
    });
}

/// Per-frame detector failure. Logged; the detection loop carries on.
#[wasm_bindgen]
pub fn report_detection_error(message: &str) {
    let count = with_state(|state| {
        state.detection_errors = state.detection_errors.saturating_add(1);
        state.detection_errors
    });
    log::warn!("Detection error #{}: {}", count, message);
}

/// Landmark source failed to start. Returns the message to show next to the
/// retry button; the overlay does not retry on its own.
#[wasm_bindgen]
pub fn report_tracking_init_error(message: &str) -> String {
    let err = TrackingInitError::classify(message);
    log::error!("Hand tracking initialization error: {} ({:?})", message, err);
    err.user_message().to_string()
}

/// `[px, py, pz, qx, qy, qz, qw, scale, visible, slot, handle]` for the host
/// to apply to the loaded model
#[wasm_bindgen]
pub fn model_transform() -> Vec<f32> {
    with_state(|state| state.overlay.last_output().to_array().to_vec())
}

// ============================================================================
// INTERNAL API
// ============================================================================

/// Wireframe to draw this frame, if the fallback is active and a hand is in view
pub fn current_wireframe() -> Option<WireframeGeometry> {
    with_state(|state| {
        let output = state.overlay.last_output();
        if output.visible {
            output.wireframe.clone()
        } else {
            None
        }
    })
}
