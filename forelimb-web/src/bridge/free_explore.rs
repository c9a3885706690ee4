//! Free explore entry points - orbit camera input from the host canvas

use wasm_bindgen::prelude::*;

use super::state::with_state;
use crate::free_explore::placeholder_sway;

#[wasm_bindgen]
pub fn orbit_drag(dx: f32, dy: f32) {
    with_state(|state| state.orbit.drag(dx, dy));
}

#[wasm_bindgen]
pub fn orbit_zoom(delta: f32) {
    with_state(|state| state.orbit.zoom(delta));
}

/// Advance damping one frame; returns `[eye x, eye y, eye z, qx, qy, qz, qw]`
#[wasm_bindgen]
pub fn orbit_tick() -> Vec<f32> {
    with_state(|state| {
        state.orbit.tick();
        state.orbit.to_array().to_vec()
    })
}

/// Y rotation for the placeholder skeleton shown when a species has no model
#[wasm_bindgen]
pub fn placeholder_rotation(elapsed_seconds: f32) -> f32 {
    placeholder_sway(elapsed_seconds)
}

#[wasm_bindgen]
pub fn free_explore_scale() -> f32 {
    with_state(|state| state.overlay.config().free_explore_scale)
}
