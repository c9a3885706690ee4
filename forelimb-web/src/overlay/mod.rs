//! Overlay module - model placement, scale, asset selection and fallback
//!
//! Re-exports only. All logic in submodules.

mod model;
mod scale;
mod assets;
mod wireframe;
mod controller;

pub use model::{AssetHandle, ModelSlot};
pub use scale::UserScale;
pub use assets::{AssetRequest, AssetTracker, LoadTicket};
pub use wireframe::{build_wireframe, Joint, Outline, Segment, WireframeGeometry, BONE_WIDTH};
pub use controller::{FrameOutput, SkeletonOverlay, FRAME_ARRAY_LEN};
