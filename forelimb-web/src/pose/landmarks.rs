//! Hand landmark set (MediaPipe Hands - 21 points)
//!
//! The detector reports one hand per frame as a flat buffer of 21 × (x, y, z)
//! in normalized image coordinates. A set is immutable once parsed and is
//! replaced wholesale on the next detection.

use crate::error::PoseError;

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

pub const LANDMARK_COUNT: usize = 21;
pub const FLOATS_PER_HAND: usize = LANDMARK_COUNT * 3;

/// Bone segments drawn by the wireframe fallback (palm, four fingers, thumb)
pub const HAND_SKELETON: [(usize, usize); 18] = [
    (WRIST, INDEX_MCP), (INDEX_MCP, MIDDLE_MCP),
    (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
];

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A single joint in normalized image coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HandLandmark {
    pub x: f32,  // 0-1, grows right
    pub y: f32,  // 0-1, grows down
    pub z: f32,  // relative depth, wrist-centred
}

impl HandLandmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Distance in the image plane, ignoring depth
    pub fn planar_distance(&self, other: &HandLandmark) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One hand's worth of landmarks for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkSet {
    points: [HandLandmark; LANDMARK_COUNT],
}

impl LandmarkSet {
    pub fn new(points: [HandLandmark; LANDMARK_COUNT]) -> Result<Self, PoseError> {
        if let Some(index) = points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()))
        {
            return Err(PoseError::NonFinite { index });
        }
        Ok(Self { points })
    }

    /// Parse hand `hand` out of a flat detector buffer holding
    /// `num_hands × 21 × 3` values.
    pub fn from_flat(data: &[f32], hand: usize) -> Result<Self, PoseError> {
        let start = hand * FLOATS_PER_HAND;
        let end = start + FLOATS_PER_HAND;
        if data.len() < end {
            return Err(PoseError::InvalidLength {
                expected: end,
                actual: data.len(),
            });
        }

        let mut points = [HandLandmark::default(); LANDMARK_COUNT];
        for (point, xyz) in points.iter_mut().zip(data[start..end].chunks_exact(3)) {
            *point = HandLandmark::new(xyz[0], xyz[1], xyz[2]);
        }
        Self::new(points)
    }

    pub fn get(&self, index: usize) -> HandLandmark {
        self.points[index]
    }

    pub fn points(&self) -> &[HandLandmark; LANDMARK_COUNT] {
        &self.points
    }

    /// Reflect every landmark horizontally (x → 1 − x)
    pub fn mirrored(&self) -> Self {
        let mut points = self.points;
        for p in points.iter_mut() {
            p.x = 1.0 - p.x;
        }
        Self { points }
    }

    /// Same set with X reflected only when `mirrored` is set
    pub fn oriented(&self, mirrored: bool) -> Self {
        if mirrored {
            self.mirrored()
        } else {
            *self
        }
    }
}
