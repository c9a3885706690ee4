//! Landmarks → candidate model pose
//!
//! Uses five landmarks: wrist (0), index MCP (5), middle MCP (9),
//! middle tip (12) and pinky MCP (17). Position and hand size come from the
//! wrist/middle pair; orientation comes from an orthonormal basis built on
//! the knuckle line and the wrist→index direction.
//!
//! Image space has Y growing down and detector Z growing away from the
//! camera, so both are negated on the way into scene space.

use nalgebra::{Matrix3, Rotation3, UnitQuaternion, Vector3};

use super::landmarks::{LandmarkSet, HandLandmark, WRIST, INDEX_MCP, MIDDLE_MCP, MIDDLE_TIP, PINKY_MCP};
use super::state::CandidatePose;
use crate::error::PoseError;

/// Axes shorter than this are treated as zero-length
pub const DEGENERATE_EPSILON: f32 = 1e-6;

/// Orthonormal hand frame in scene space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandBasis {
    /// Across the knuckles, index → pinky
    pub right: Vector3<f32>,
    /// Palm normal
    pub up: Vector3<f32>,
    /// Index knuckle → wrist
    pub forward: Vector3<f32>,
}

impl HandBasis {
    pub fn rotation(&self) -> UnitQuaternion<f32> {
        let m = Matrix3::from_columns(&[self.right, self.up, self.forward]);
        let q = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(m));
        UnitQuaternion::new_normalize(q.into_inner())
    }
}

/// Normalized [0,1] image point → symmetric [-1,1] scene point, Y up
pub fn to_scene_space(x: f32, y: f32, mirrored: bool) -> (f32, f32) {
    let sx = (x - 0.5) * 2.0;
    let sy = -(y - 0.5) * 2.0;
    (if mirrored { -sx } else { sx }, sy)
}

/// Image-space direction `to − from` flipped onto scene axes
fn scene_direction(from: HandLandmark, to: HandLandmark, mirrored: bool) -> Vector3<f32> {
    let dx = to.x - from.x;
    Vector3::new(
        if mirrored { -dx } else { dx },
        -(to.y - from.y),
        -(to.z - from.z),
    )
}

/// Build the hand frame. `landmarks` must already be X-reflected when
/// `mirrored` is set.
pub fn hand_basis(landmarks: &LandmarkSet, mirrored: bool) -> Result<HandBasis, PoseError> {
    let wrist = landmarks.get(WRIST);
    let index = landmarks.get(INDEX_MCP);
    let pinky = landmarks.get(PINKY_MCP);

    let forward = scene_direction(index, wrist, mirrored)
        .try_normalize(DEGENERATE_EPSILON)
        .ok_or(PoseError::DegenerateBasis)?;
    let right = scene_direction(index, pinky, mirrored)
        .try_normalize(DEGENERATE_EPSILON)
        .ok_or(PoseError::DegenerateBasis)?;

    // Parallel forward/right leaves no palm normal
    let up = forward
        .cross(&right)
        .try_normalize(DEGENERATE_EPSILON)
        .ok_or(PoseError::DegenerateBasis)?;

    // Re-derive right, then up, so the frame stays orthogonal even when the
    // palm normal above came from nearly parallel axes
    let right = up
        .cross(&forward)
        .try_normalize(DEGENERATE_EPSILON)
        .ok_or(PoseError::DegenerateBasis)?;
    let up = forward
        .cross(&right)
        .try_normalize(DEGENERATE_EPSILON)
        .ok_or(PoseError::DegenerateBasis)?;

    Ok(HandBasis { right, up, forward })
}

/// Estimate position, orientation and hand size for one frame
pub fn estimate_pose(landmarks: &LandmarkSet, mirrored: bool) -> Result<CandidatePose, PoseError> {
    let lm = landmarks.oriented(mirrored);
    let wrist = lm.get(WRIST);
    let middle = lm.get(MIDDLE_MCP);

    let center_x = (wrist.x + middle.x) / 2.0;
    let center_y = (wrist.y + middle.y) / 2.0;
    let (px, py) = to_scene_space(center_x, center_y, mirrored);

    let hand_size = wrist.planar_distance(&lm.get(MIDDLE_TIP));
    let basis = hand_basis(&lm, mirrored)?;

    Ok(CandidatePose {
        position: Vector3::new(px, py, 0.0),
        orientation: basis.rotation(),
        hand_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::landmarks::LANDMARK_COUNT;

    fn hand(points: &[(usize, (f32, f32, f32))]) -> LandmarkSet {
        let mut all = [HandLandmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        for &(i, (x, y, z)) in points {
            all[i] = HandLandmark::new(x, y, z);
        }
        LandmarkSet::new(all).unwrap()
    }

    fn reference_hand() -> LandmarkSet {
        hand(&[
            (WRIST, (0.5, 0.5, 0.0)),
            (INDEX_MCP, (0.5, 0.4, 0.0)),
            (PINKY_MCP, (0.6, 0.4, 0.0)),
            (MIDDLE_MCP, (0.55, 0.4, 0.0)),
            (MIDDLE_TIP, (0.55, 0.2, 0.0)),
        ])
    }

    fn tilted_hand() -> LandmarkSet {
        hand(&[
            (WRIST, (0.42, 0.71, 0.0)),
            (INDEX_MCP, (0.47, 0.52, -0.03)),
            (PINKY_MCP, (0.61, 0.58, 0.02)),
            (MIDDLE_MCP, (0.53, 0.50, -0.01)),
            (MIDDLE_TIP, (0.58, 0.31, -0.04)),
        ])
    }

    #[test]
    fn test_reference_scenario() {
        let pose = estimate_pose(&reference_hand(), false).unwrap();
        assert!((pose.position.x - 0.05).abs() < 1e-5);
        assert!((pose.position.y - 0.1).abs() < 1e-5);
        assert_eq!(pose.position.z, 0.0);
        assert!((pose.hand_size - 0.3041).abs() < 1e-4);
    }

    #[test]
    fn test_reference_basis_axes() {
        let basis = hand_basis(&reference_hand(), false).unwrap();
        assert!((basis.forward - Vector3::new(0.0, -1.0, 0.0)).norm() < 1e-5);
        assert!((basis.right - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-5);
        assert!((basis.up - Vector3::new(0.0, 0.0, 1.0)).norm() < 1e-5);
    }

    #[test]
    fn test_orientation_is_unit() {
        for set in [reference_hand(), tilted_hand()] {
            for mirrored in [false, true] {
                let pose = estimate_pose(&set, mirrored).unwrap();
                assert!((pose.orientation.quaternion().norm() - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let basis = hand_basis(&tilted_hand(), false).unwrap();
        assert!(basis.right.dot(&basis.up).abs() < 1e-5);
        assert!(basis.right.dot(&basis.forward).abs() < 1e-5);
        assert!(basis.up.dot(&basis.forward).abs() < 1e-5);
        assert!((basis.right.norm() - 1.0).abs() < 1e-5);
    }

    /// Seeded xorshift32 so the sweep is reproducible
    struct XorShift(u32);

    impl XorShift {
        fn next(&mut self) -> f32 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 17;
            self.0 ^= self.0 << 5;
            (self.0 >> 8) as f32 / (1u32 << 24) as f32
        }

        fn point(&mut self) -> (f32, f32, f32) {
            (self.next(), self.next(), (self.next() - 0.5) * 0.2)
        }
    }

    fn assert_valid_pose(set: &LandmarkSet, mirrored: bool) -> bool {
        let Ok(basis) = hand_basis(&set.oriented(mirrored), mirrored) else {
            return false;
        };
        assert!(basis.right.dot(&basis.up).abs() < 1e-4);
        assert!(basis.right.dot(&basis.forward).abs() < 1e-4);
        assert!(basis.up.dot(&basis.forward).abs() < 1e-4);
        for axis in [basis.right, basis.up, basis.forward] {
            assert!((axis.norm() - 1.0).abs() < 1e-4);
        }

        let pose = estimate_pose(set, mirrored).unwrap();
        let q = pose.orientation;
        assert!(q.coords.iter().all(|c| c.is_finite()));
        assert!((q.quaternion().norm() - 1.0).abs() < 1e-5);
        assert!((q * Vector3::x() - basis.right).norm() < 1e-3);
        assert!((q * Vector3::z() - basis.forward).norm() < 1e-3);
        true
    }

    #[test]
    fn test_random_hands_give_orthonormal_unit_pose() {
        let mut rng = XorShift(0x2545_f491);
        let mut valid = 0;
        for i in 0..5000 {
            let set = hand(&[
                (WRIST, rng.point()),
                (INDEX_MCP, rng.point()),
                (PINKY_MCP, rng.point()),
                (MIDDLE_MCP, rng.point()),
                (MIDDLE_TIP, rng.point()),
            ]);
            if assert_valid_pose(&set, i % 2 == 0) {
                valid += 1;
            }
        }
        assert!(valid > 4900);
    }

    #[test]
    fn test_nearly_collinear_knuckles_stay_orthonormal() {
        let mut rng = XorShift(0x9e37_79b9);
        for i in 0..2000 {
            // Pinky almost on the wrist → index line
            let t = 1.0 + rng.next();
            let jitter = (rng.next() - 0.5) * 1e-4;
            let set = hand(&[
                (WRIST, (0.3, 0.3, 0.0)),
                (INDEX_MCP, (0.5, 0.4, 0.0)),
                (PINKY_MCP, (0.3 + 0.2 * t + jitter, 0.3 + 0.1 * t - jitter, jitter)),
            ]);
            assert_valid_pose(&set, i % 2 == 1);
        }
    }

    #[test]
    fn test_rotation_maps_axes_onto_basis() {
        let basis = hand_basis(&tilted_hand(), false).unwrap();
        let q = basis.rotation();
        assert!((q * Vector3::x() - basis.right).norm() < 1e-4);
        assert!((q * Vector3::z() - basis.forward).norm() < 1e-4);
    }

    #[test]
    fn test_mirror_flag_cancels_out() {
        // Reflecting X and then flipping the X channel is a double negation
        let set = tilted_hand();
        let plain = estimate_pose(&set, false).unwrap();
        let mirrored = estimate_pose(&set, true).unwrap();
        assert!((plain.position - mirrored.position).norm() < 1e-5);
        assert!((plain.orientation.coords - mirrored.orientation.coords).norm() < 1e-4);
        assert!((plain.hand_size - mirrored.hand_size).abs() < 1e-6);
    }

    #[test]
    fn test_reflected_hand_is_mirror_image() {
        let set = tilted_hand();
        let a = estimate_pose(&set, false).unwrap();
        let b = estimate_pose(&set.mirrored(), false).unwrap();
        assert!((a.position.x + b.position.x).abs() < 1e-5);
        assert!((a.position.y - b.position.y).abs() < 1e-5);
        assert!((a.hand_size - b.hand_size).abs() < 1e-6);
    }

    #[test]
    fn test_coincident_wrist_and_index_is_degenerate() {
        let set = hand(&[
            (WRIST, (0.5, 0.4, 0.0)),
            (INDEX_MCP, (0.5, 0.4, 0.0)),
            (PINKY_MCP, (0.6, 0.4, 0.0)),
        ]);
        assert_eq!(estimate_pose(&set, false), Err(PoseError::DegenerateBasis));
    }

    #[test]
    fn test_parallel_axes_are_degenerate() {
        // Wrist, index and pinky on one line
        let set = hand(&[
            (WRIST, (0.4, 0.4, 0.0)),
            (INDEX_MCP, (0.5, 0.4, 0.0)),
            (PINKY_MCP, (0.6, 0.4, 0.0)),
        ]);
        assert_eq!(hand_basis(&set, false), Err(PoseError::DegenerateBasis));
    }

    #[test]
    fn test_scene_space_corners() {
        assert_eq!(to_scene_space(0.0, 0.0, false), (-1.0, 1.0));
        assert_eq!(to_scene_space(1.0, 1.0, false), (1.0, -1.0));
        assert_eq!(to_scene_space(1.0, 1.0, true), (-1.0, -1.0));
    }
}
