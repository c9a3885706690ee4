//! Forelimb Web - hand-tracked AR skeleton overlay
//!
//! Aligns a species' forelimb skeleton model with the user's tracked hand:
//! landmarks in, smoothed model transform out. Contains:
//! - Pose pipeline (landmarks, estimator, smoother)
//! - Overlay placement, scale and asset selection
//! - Session cleanup and free-explore orbit control
//! - WASM entry points and the WebGPU wireframe fallback (wasm32 only)

pub mod config;
pub mod error;
pub mod pose;
pub mod overlay;
pub mod session;
pub mod free_explore;

#[cfg(target_arch = "wasm32")]
mod bridge;
#[cfg(target_arch = "wasm32")]
mod renderer;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

// Re-export wasm_bindgen functions for JS access
#[cfg(target_arch = "wasm32")]
pub use bridge::{
    apply_hand_landmarks, report_detection_error, report_tracking_init_error, model_transform,
    configure, set_mirrored, set_user_scale, step_user_scale, user_scale_percent,
    select_species, asset_loaded, asset_failed,
    start_session, stop_session, dispose_overlay, resize_overlay,
    orbit_drag, orbit_zoom, orbit_tick, placeholder_rotation, free_explore_scale,
};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init_runtime() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
}

/// Initialize WebGPU on the overlay canvas - must be called before start_session
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn init(canvas_id: String) -> Result<(), JsValue> {
    renderer::initialize_gpu(&canvas_id).await?;
    log::info!("✅ Overlay initialized on #{}", canvas_id);
    Ok(())
}

/// Render one frame outside the session loop
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn render_frame() {
    renderer::render_frame();
}
