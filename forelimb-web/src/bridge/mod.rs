//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod state;
mod hand_landmarks;
mod controls;
mod session;
mod free_explore;

pub use hand_landmarks::{
    // WASM entry points
    apply_hand_landmarks,
    report_detection_error,
    report_tracking_init_error,
    model_transform,
    // Internal API
    current_wireframe,
};

pub use controls::{
    configure,
    set_mirrored,
    set_user_scale,
    step_user_scale,
    user_scale_percent,
    select_species,
    asset_loaded,
    asset_failed,
};

pub use session::{start_session, stop_session, dispose_overlay, resize_overlay};

pub use free_explore::{
    orbit_drag,
    orbit_zoom,
    orbit_tick,
    placeholder_rotation,
    free_explore_scale,
};
