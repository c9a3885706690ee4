//! Skeleton overlay - per-detection update of the model placement
//!
//! Owns the smoothing state, the user scale, the mirrored flag and the asset
//! selection. Each detection cycle produces a `FrameOutput`; the render loop
//! redraws the last output until the next detection arrives.

use super::assets::{AssetRequest, AssetTracker};
use super::model::{AssetHandle, ModelSlot};
use super::scale::UserScale;
use super::wireframe::{build_wireframe, WireframeGeometry};
use crate::config::OverlayConfig;
use crate::error::{OverlayError, PoseError, Result};
use crate::pose::{estimate_pose, LandmarkSet, PoseSmoother, PoseTransform};

/// Length of `FrameOutput::to_array`
pub const FRAME_ARRAY_LEN: usize = 11;

#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    /// Last known placement; kept while hidden so the model is not rebuilt
    pub transform: Option<PoseTransform>,
    pub visible: bool,
    pub slot: ModelSlot,
    /// Present only for `ModelSlot::Wireframe` with a hand in view
    pub wireframe: Option<WireframeGeometry>,
}

impl FrameOutput {
    fn empty() -> Self {
        Self {
            transform: None,
            visible: false,
            slot: ModelSlot::Wireframe,
            wireframe: None,
        }
    }

    /// `[px, py, pz, qx, qy, qz, qw, scale, visible, slot, handle]`,
    /// handle is -1 without a loaded asset
    pub fn to_array(&self) -> [f32; FRAME_ARRAY_LEN] {
        let t = self.transform.unwrap_or_default().to_array();
        let handle = self.slot.handle().map_or(-1.0, |h| h.0 as f32);
        [
            t[0], t[1], t[2], t[3], t[4], t[5], t[6], t[7],
            if self.visible { 1.0 } else { 0.0 },
            self.slot.code(),
            handle,
        ]
    }
}

pub struct SkeletonOverlay {
    config: OverlayConfig,
    smoother: PoseSmoother,
    user_scale: UserScale,
    mirrored: bool,
    assets: AssetTracker,
    last: FrameOutput,
    degenerate_frames: u32,
}

impl SkeletonOverlay {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            smoother: PoseSmoother::new(config.smoothing_factor, config.stale_policy),
            user_scale: UserScale::new(config.user_scale.clone()),
            mirrored: false,
            assets: AssetTracker::new(),
            last: FrameOutput::empty(),
            degenerate_frames: 0,
            config,
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Replace tuning constants. Smoothing state and selection survive.
    pub fn apply_config(&mut self, config: OverlayConfig) {
        self.smoother.set_factor(config.smoothing_factor);
        self.smoother.set_policy(config.stale_policy);
        self.user_scale.rebound(config.user_scale.clone());
        self.config = config;
        log::info!(
            "Overlay config applied (smoothing {}, scale multiplier {})",
            self.config.smoothing_factor,
            self.config.hand_mode_scale_multiplier
        );
    }

    pub fn set_mirrored(&mut self, mirrored: bool) {
        self.mirrored = mirrored;
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn user_scale(&self) -> &UserScale {
        &self.user_scale
    }

    pub fn user_scale_mut(&mut self) -> &mut UserScale {
        &mut self.user_scale
    }

    pub fn selected_species(&self) -> Option<&str> {
        self.assets.selected()
    }

    pub fn select_species(&mut self, id: &str) -> Result<AssetRequest> {
        let entry = self
            .config
            .species(id)
            .ok_or_else(|| OverlayError::UnknownSpecies(id.to_string()))?
            .clone();
        let request = self.assets.select(&entry);
        self.last.slot = self.assets.slot();
        Ok(request)
    }

    pub fn complete_load(&mut self, generation: u64, result: std::result::Result<AssetHandle, String>) -> bool {
        let applied = self.assets.complete(generation, result);
        if applied {
            self.last.slot = self.assets.slot();
        }
        applied
    }

    pub fn last_output(&self) -> &FrameOutput {
        &self.last
    }

    /// One detection cycle. `None` means no hand this frame.
    pub fn update(&mut self, landmarks: Option<&LandmarkSet>) -> &FrameOutput {
        let slot = self.assets.slot();
        self.last.slot = slot;

        let Some(landmarks) = landmarks else {
            self.smoother.mark_lost();
            self.last.visible = false;
            self.last.wireframe = None;
            return &self.last;
        };

        match estimate_pose(landmarks, self.mirrored) {
            Ok(candidate) => {
                self.degenerate_frames = 0;
                let smoothed = self.smoother.smooth(&candidate);
                let scale = candidate.hand_size
                    * self.config.hand_mode_scale_multiplier
                    * self.user_scale.value();
                self.last.transform = Some(PoseTransform {
                    position: smoothed.position,
                    orientation: smoothed.orientation,
                    scale,
                });
            }
            Err(PoseError::DegenerateBasis) => {
                // Skip the frame and keep the previous placement
                self.degenerate_frames += 1;
                if self.degenerate_frames == 1 {
                    log::warn!("Degenerate hand basis; holding previous pose");
                }
                if !self.smoother.is_initialized() {
                    self.last.transform = None;
                }
            }
            Err(err) => {
                log::warn!("Skipping frame: {err}");
            }
        }

        self.last.wireframe = match slot {
            ModelSlot::Wireframe => Some(build_wireframe(landmarks, self.mirrored)),
            _ => None,
        };
        self.last.visible = match slot {
            ModelSlot::NoModel => false,
            ModelSlot::Wireframe => true,
            ModelSlot::LoadedAsset(_) => self.last.transform.is_some(),
        };
        &self.last
    }
}

impl Default for SkeletonOverlay {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}
