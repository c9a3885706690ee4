//! User controls and asset loading callbacks
//!
//! Species selector, scale slider and mirrored toggle mutate overlay state
//! here. GLB loading happens in JavaScript: `select_species` hands back a
//! load ticket and the host reports the outcome with its generation.

use wasm_bindgen::prelude::*;

use super::state::with_state;
use crate::config::OverlayConfig;
use crate::error::OverlayError;
use crate::overlay::{AssetHandle, AssetRequest};

/// Replace tuning constants from a (possibly partial) JSON object
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    let config = OverlayConfig::from_json(json).map_err(OverlayError::from)?;
    with_state(|state| {
        state.orbit = crate::free_explore::OrbitController::new(config.orbit.clone());
        state.overlay.apply_config(config);
    });
    Ok(())
}

#[wasm_bindgen]
pub fn set_mirrored(mirrored: bool) {
    with_state(|state| state.overlay.set_mirrored(mirrored));
    log::info!("Mirrored mode {}", if mirrored { "on" } else { "off" });
}

/// Returns the value actually applied after clamping
#[wasm_bindgen]
pub fn set_user_scale(value: f32) -> f32 {
    with_state(|state| state.overlay.user_scale_mut().set(value))
}

/// One slider step up or down
#[wasm_bindgen]
pub fn step_user_scale(up: bool) -> f32 {
    with_state(|state| {
        let scale = state.overlay.user_scale_mut();
        if up {
            scale.step_up()
        } else {
            scale.step_down()
        }
    })
}

#[wasm_bindgen]
pub fn user_scale_percent() -> u32 {
    with_state(|state| state.overlay.user_scale().percentage())
}

/// Select a species. Returns a JSON load ticket
/// (`{"generation", "species", "path"}`) when the host must load a model,
/// `undefined` when nothing needs loading.
#[wasm_bindgen]
pub fn select_species(id: &str) -> Result<Option<String>, JsValue> {
    let request = with_state(|state| state.overlay.select_species(id))?;
    match request {
        AssetRequest::Load(ticket) => serde_json::to_string(&ticket)
            .map(Some)
            .map_err(|e| JsValue::from_str(&e.to_string())),
        AssetRequest::Cached(_) | AssetRequest::NoAsset => Ok(None),
    }
}

/// Host finished loading; `handle` names its cloned scene graph.
/// Returns false when the load was stale and discarded.
#[wasm_bindgen]
pub fn asset_loaded(generation: u32, handle: u32) -> bool {
    with_state(|state| {
        state
            .overlay
            .complete_load(u64::from(generation), Ok(AssetHandle(handle)))
    })
}

#[wasm_bindgen]
pub fn asset_failed(generation: u32, message: &str) -> bool {
    with_state(|state| {
        state
            .overlay
            .complete_load(u64::from(generation), Err(message.to_string()))
    })
}
