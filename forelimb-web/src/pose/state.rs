//! Pose data shared between the estimator, the smoother and placement

use nalgebra::{UnitQuaternion, Vector3};

/// Raw per-frame estimate, before smoothing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidatePose {
    /// Scene space, [-1, 1] on X and Y, Y up
    pub position: Vector3<f32>,
    pub orientation: UnitQuaternion<f32>,
    /// Wrist to middle fingertip, normalized image units
    pub hand_size: f32,
}

/// Final transform applied to the model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseTransform {
    pub position: Vector3<f32>,
    pub orientation: UnitQuaternion<f32>,
    /// Uniform on all three axes
    pub scale: f32,
}

impl PoseTransform {
    /// `[px, py, pz, qx, qy, qz, qw, scale]`
    pub fn to_array(&self) -> [f32; 8] {
        let q = self.orientation.coords;
        [
            self.position.x,
            self.position.y,
            self.position.z,
            q.x,
            q.y,
            q.z,
            q.w,
            self.scale,
        ]
    }
}

impl Default for PoseTransform {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            orientation: UnitQuaternion::identity(),
            scale: 1.0,
        }
    }
}
