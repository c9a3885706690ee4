//! Renderer module - WebGPU overlay surface and wireframe fallback
//!
//! Re-exports only. All logic in submodules.

mod state;
mod skeleton;
mod shapes;

pub use state::{initialize_gpu, resize_surface, release_gpu};
pub use skeleton::render_frame;
