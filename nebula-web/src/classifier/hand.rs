//! Hand landmark frame (MediaPipe Hands layout, 21 points)

use crate::constants::HAND_LANDMARK_COUNT;

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_TIP: usize = 20;

/// (tip, base) pairs for the four non-thumb fingers
pub const FINGERS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_MCP),
    (MIDDLE_TIP, MIDDLE_MCP),
    (RING_TIP, RING_MCP),
    (PINKY_TIP, PINKY_MCP),
];

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// One landmark, x/y normalized to the image (0-1), z relative depth
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandLandmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl HandLandmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &HandLandmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// A complete detection. Partial detections never become a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct HandFrame {
    pub landmarks: [HandLandmark; HAND_LANDMARK_COUNT],
}

impl HandFrame {
    /// Parse a flat `[x0, y0, z0, x1, ...]` array of exactly 63 floats
    pub fn from_flat(data: &[f32]) -> Option<Self> {
        if data.len() != HAND_LANDMARK_COUNT * 3 {
            return None;
        }
        let mut landmarks = [HandLandmark::default(); HAND_LANDMARK_COUNT];
        for (lm, xyz) in landmarks.iter_mut().zip(data.chunks_exact(3)) {
            *lm = HandLandmark::new(xyz[0], xyz[1], xyz[2]);
        }
        Some(Self { landmarks })
    }

    /// Build from point triples; fewer than 21 points is not a hand
    pub fn from_points(points: &[[f32; 3]]) -> Option<Self> {
        if points.len() < HAND_LANDMARK_COUNT {
            return None;
        }
        let mut landmarks = [HandLandmark::default(); HAND_LANDMARK_COUNT];
        for (lm, p) in landmarks.iter_mut().zip(points) {
            *lm = HandLandmark::new(p[0], p[1], p[2]);
        }
        Some(Self { landmarks })
    }

    pub fn landmark(&self, index: usize) -> &HandLandmark {
        &self.landmarks[index]
    }

    /// Thumb tip to index tip
    pub fn pinch_distance(&self) -> f32 {
        self.landmarks[THUMB_TIP].distance(&self.landmarks[INDEX_TIP])
    }

    /// Midpoint of wrist and middle-finger MCP
    pub fn palm_center(&self) -> [f32; 3] {
        let w = &self.landmarks[WRIST];
        let m = &self.landmarks[MIDDLE_MCP];
        [(w.x + m.x) / 2.0, (w.y + m.y) / 2.0, (w.z + m.z) / 2.0]
    }
}
