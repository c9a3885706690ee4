//! Wireframe fallback - hand bones, joints and a bounding outline
//!
//! Drawn when the selected species has no loaded model. Coordinates are in
//! scene space, which the orthographic overlay maps 1:1 onto clip space.

use crate::pose::{to_scene_space, LandmarkSet, HAND_SKELETON, MIDDLE_TIP, WRIST};

pub const BONE_WIDTH: f32 = 0.01;
pub const JOINT_RADIUS: f32 = 0.012;
pub const WRIST_JOINT_RADIUS: f32 = 0.02;

/// Outline is `OUTLINE_WIDTH × hand size` by `OUTLINE_HEIGHT × hand size`
const OUTLINE_WIDTH: f32 = 1.5;
const OUTLINE_HEIGHT: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: [f32; 2],
    pub to: [f32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    pub center: [f32; 2],
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub center: [f32; 2],
    pub width: f32,
    pub height: f32,
}

impl Outline {
    /// Corners, counter-clockwise from bottom-left
    pub fn corners(&self) -> [[f32; 2]; 4] {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        let [cx, cy] = self.center;
        [
            [cx - hw, cy - hh],
            [cx + hw, cy - hh],
            [cx + hw, cy + hh],
            [cx - hw, cy + hh],
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WireframeGeometry {
    pub bones: Vec<Segment>,
    pub joints: Vec<Joint>,
    pub outline: Outline,
}

pub fn build_wireframe(landmarks: &LandmarkSet, mirrored: bool) -> WireframeGeometry {
    let lm = landmarks.oriented(mirrored);
    let scene = |index: usize| {
        let p = lm.get(index);
        let (x, y) = to_scene_space(p.x, p.y, mirrored);
        [x, y]
    };

    let bones = HAND_SKELETON
        .iter()
        .map(|&(a, b)| Segment { from: scene(a), to: scene(b) })
        .collect();

    let joints = (0..lm.points().len())
        .map(|i| Joint {
            center: scene(i),
            radius: if i == WRIST { WRIST_JOINT_RADIUS } else { JOINT_RADIUS },
        })
        .collect();

    let wrist = lm.get(WRIST);
    let tip = lm.get(MIDDLE_TIP);
    let size = wrist.planar_distance(&tip);
    let (cx, cy) = to_scene_space((wrist.x + tip.x) / 2.0, (wrist.y + tip.y) / 2.0, mirrored);

    WireframeGeometry {
        bones,
        joints,
        outline: Outline {
            center: [cx, cy],
            width: size * OUTLINE_WIDTH,
            height: size * OUTLINE_HEIGHT,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::{HandLandmark, LANDMARK_COUNT};

    fn upright_hand() -> LandmarkSet {
        let mut points = [HandLandmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        points[WRIST] = HandLandmark::new(0.5, 0.8, 0.0);
        points[MIDDLE_TIP] = HandLandmark::new(0.5, 0.2, 0.0);
        LandmarkSet::new(points).unwrap()
    }

    #[test]
    fn test_counts() {
        let geometry = build_wireframe(&upright_hand(), false);
        assert_eq!(geometry.bones.len(), HAND_SKELETON.len());
        assert_eq!(geometry.joints.len(), LANDMARK_COUNT);
        assert_eq!(geometry.joints[WRIST].radius, WRIST_JOINT_RADIUS);
        assert_eq!(geometry.joints[MIDDLE_TIP].radius, JOINT_RADIUS);
    }

    #[test]
    fn test_outline_centred_between_wrist_and_tip() {
        let geometry = build_wireframe(&upright_hand(), false);
        let outline = geometry.outline;
        assert!(outline.center[0].abs() < 1e-6);
        assert!(outline.center[1].abs() < 1e-6);
        assert!((outline.width - 0.9).abs() < 1e-5);
        assert!((outline.height - 1.2).abs() < 1e-5);
        assert!((outline.corners()[2][1] - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_wrist_joint_in_scene_space() {
        let geometry = build_wireframe(&upright_hand(), true);
        let [x, y] = geometry.joints[WRIST].center;
        assert!(x.abs() < 1e-6);
        assert!((y + 0.6).abs() < 1e-5);
    }
}
