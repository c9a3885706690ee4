//! Session entry points - render loop, camera stream and detector lifetime
//!
//! `start_session` takes ownership of the host's MediaStream and
//! HandLandmarker and starts the requestAnimationFrame loop. All three are
//! held by one `SessionGuard`, so `stop_session` (or starting a new session)
//! releases them together. The GPU surface belongs to `init` and survives a
//! restart; `dispose_overlay` frees it when the overlay page goes away.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::renderer;
use crate::session::{ScopedResource, SessionGuard};

thread_local! {
    static SESSION: RefCell<Option<SessionGuard>> = RefCell::new(None);
}

// ============================================================================
// SCOPED RESOURCES
// ============================================================================

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Self-rescheduling requestAnimationFrame loop
struct RenderLoop {
    callback: FrameCallback,
    frame_id: Rc<Cell<Option<i32>>>,
}

fn request_frame(callback: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window found"))?;
    window.request_animation_frame(callback.as_ref().unchecked_ref())
}

impl RenderLoop {
    fn start() -> Result<Self, JsValue> {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let frame_id = Rc::new(Cell::new(None));

        let next = Rc::clone(&callback);
        let next_id = Rc::clone(&frame_id);
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            renderer::render_frame();
            if let Some(cb) = next.borrow().as_ref() {
                match request_frame(cb) {
                    Ok(id) => next_id.set(Some(id)),
                    Err(err) => log::error!("Render loop stopped: {:?}", err),
                }
            }
        }) as Box<dyn FnMut()>));

        let first = match callback.borrow().as_ref() {
            Some(cb) => request_frame(cb)?,
            None => return Err(JsValue::from_str("Render callback missing")),
        };
        frame_id.set(Some(first));

        Ok(Self { callback, frame_id })
    }
}

impl ScopedResource for RenderLoop {
    fn name(&self) -> &'static str {
        "render loop"
    }

    fn release(&mut self) {
        if let Some(id) = self.frame_id.take() {
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.cancel_animation_frame(id) {
                    log::warn!("cancelAnimationFrame failed: {:?}", err);
                }
            }
        }
        // Breaks the closure's reference to itself
        self.callback.borrow_mut().take();
    }
}

struct CameraStream(web_sys::MediaStream);

impl ScopedResource for CameraStream {
    fn name(&self) -> &'static str {
        "camera stream"
    }

    fn release(&mut self) {
        for track in self.0.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<web_sys::MediaStreamTrack>() {
                track.stop();
            }
        }
    }
}

/// Host-side landmark detector; released through its `close()` method
struct Detector(JsValue);

impl ScopedResource for Detector {
    fn name(&self) -> &'static str {
        "hand detector"
    }

    fn release(&mut self) {
        if self.0.is_undefined() || self.0.is_null() {
            return;
        }
        let close = js_sys::Reflect::get(&self.0, &JsValue::from_str("close"))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
        match close {
            Some(close) => {
                if let Err(err) = close.call0(&self.0) {
                    log::warn!("Detector close() failed: {:?}", err);
                }
            }
            None => log::warn!("Detector has no close() method"),
        }
    }
}

// ============================================================================
// WASM API
// ============================================================================

/// Take ownership of the camera stream and detector and start drawing.
/// Call after `init` has set up the GPU surface. Calling again replaces the
/// running session and keeps drawing to the same surface.
#[wasm_bindgen]
pub fn start_session(stream: web_sys::MediaStream, detector: JsValue) -> Result<(), JsValue> {
    stop_session();

    let mut guard = SessionGuard::new();
    guard.acquire(Box::new(CameraStream(stream)));
    guard.acquire(Box::new(Detector(detector)));
    // On error the guard drops here and frees what it already holds
    guard.acquire(Box::new(RenderLoop::start()?));

    SESSION.with(|session| *session.borrow_mut() = Some(guard));
    log::info!("Overlay session started");
    Ok(())
}

/// Stop the render loop, camera tracks and detector. Safe to call twice.
#[wasm_bindgen]
pub fn stop_session() {
    let guard = SESSION.with(|session| session.borrow_mut().take());
    if let Some(mut guard) = guard {
        guard.release();
    }
}

/// Stop the session and free the GPU surface. `init` must run again before
/// the next session draws anything.
#[wasm_bindgen]
pub fn dispose_overlay() {
    stop_session();
    renderer::release_gpu();
}

/// Viewport changed; sizes are in device pixels
#[wasm_bindgen]
pub fn resize_overlay(width: u32, height: u32) {
    renderer::resize_surface(width, height);
}
