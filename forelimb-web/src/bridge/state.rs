//! Thread-local overlay state shared by the entry points

use std::cell::RefCell;

use crate::config::OverlayConfig;
use crate::free_explore::OrbitController;
use crate::overlay::SkeletonOverlay;

pub(super) struct BridgeState {
    pub overlay: SkeletonOverlay,
    pub orbit: OrbitController,
    /// Per-frame detector failures since startup
    pub detection_errors: u32,
}

impl Default for BridgeState {
    fn default() -> Self {
        let config = OverlayConfig::default();
        Self {
            orbit: OrbitController::new(config.orbit.clone()),
            overlay: SkeletonOverlay::new(config),
            detection_errors: 0,
        }
    }
}

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static STATE: RefCell<BridgeState> = RefCell::new(BridgeState::default());
}

pub(super) fn with_state<R>(f: impl FnOnce(&mut BridgeState) -> R) -> R {
    STATE.with(|cell| f(&mut cell.borrow_mut()))
}
