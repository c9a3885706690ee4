//! Free explore - orbit the model without a camera
//!
//! Drag rotates around the origin, pinch/wheel zooms within a fixed distance
//! range, panning is disabled. Rotation input is damped: each tick applies a
//! fraction of the pending rotation and decays the rest.

use std::f32::consts::PI;

use nalgebra::{Point3, UnitQuaternion, Vector3};

use crate::config::OrbitConfig;

/// Polar angle is kept this far away from the poles
const POLE_MARGIN: f32 = 1e-3;

/// Idle sway of the placeholder skeleton: amplitude (rad) and rate (rad/s)
const SWAY_AMPLITUDE: f32 = 0.2;
const SWAY_RATE: f32 = 0.3;

pub struct OrbitController {
    config: OrbitConfig,
    /// Azimuth around +Y, 0 = camera on +Z
    azimuth: f32,
    /// Angle from +Y, π/2 = level with the model
    polar: f32,
    distance: f32,
    pending_azimuth: f32,
    pending_polar: f32,
}

impl OrbitController {
    pub fn new(config: OrbitConfig) -> Self {
        let distance = config
            .initial_distance
            .clamp(config.min_distance, config.max_distance);
        Self {
            config,
            azimuth: 0.0,
            polar: PI / 2.0,
            distance,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
        }
    }

    /// Pointer drag in pixels
    pub fn drag(&mut self, dx: f32, dy: f32) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.pending_azimuth -= dx * self.config.rotate_speed;
        self.pending_polar -= dy * self.config.rotate_speed;
    }

    /// Wheel or pinch delta; positive zooms out
    pub fn zoom(&mut self, delta: f32) {
        if delta.is_nan() {
            return;
        }
        let factor = (delta * self.config.zoom_speed).exp();
        self.distance = (self.distance * factor)
            .clamp(self.config.min_distance, self.config.max_distance);
    }

    /// Advance damping by one animation frame
    pub fn tick(&mut self) {
        let damping = self.config.damping;
        self.azimuth += self.pending_azimuth * damping;
        self.polar = (self.polar + self.pending_polar * damping)
            .clamp(POLE_MARGIN, PI - POLE_MARGIN);
        self.pending_azimuth *= 1.0 - damping;
        self.pending_polar *= 1.0 - damping;
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn camera_position(&self) -> Point3<f32> {
        let s = self.polar.sin();
        Point3::new(
            self.distance * s * self.azimuth.sin(),
            self.distance * self.polar.cos(),
            self.distance * s * self.azimuth.cos(),
        )
    }

    /// Camera orientation looking at the origin with +Y up
    pub fn view_rotation(&self) -> UnitQuaternion<f32> {
        let eye = self.camera_position().coords;
        UnitQuaternion::face_towards(&eye, &Vector3::y())
    }

    /// `[eye x, eye y, eye z, qx, qy, qz, qw]` for the host camera
    pub fn to_array(&self) -> [f32; 7] {
        let eye = self.camera_position();
        let q = self.view_rotation().coords;
        [eye.x, eye.y, eye.z, q.x, q.y, q.z, q.w]
    }
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(OrbitConfig::default())
    }
}

/// Y rotation of the placeholder skeleton at `elapsed` seconds
pub fn placeholder_sway(elapsed: f32) -> f32 {
    (elapsed * SWAY_RATE).sin() * SWAY_AMPLITUDE
}
