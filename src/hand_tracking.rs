//! Hand landmark data for one tracked hand in one frame.
//!
//! Models the 21 landmarks per hand produced by image-space hand trackers
//! (wrist plus four joints per finger), in normalized image coordinates.
//! Construction validates the landmark count; a malformed set is dropped
//! rather than propagated.

use tracing::warn;

/// Landmarks reported per hand.
pub const LANDMARK_COUNT: usize = 21;

/// Index of the wrist landmark, the origin for feature normalization.
pub const WRIST: usize = 0;

/// One hand's landmark positions for a single frame.
///
/// Owned transiently by each frame call; the recognizer keeps at most the
/// previous frame's set internally (for motion tracking).
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    /// 21 (x, y, z) points in tracker output order, wrist first.
    pub points: [[f32; 3]; LANDMARK_COUNT],
}

impl HandLandmarks {
    /// Build from a slice of (x, y, z) points.
    ///
    /// Returns None unless exactly 21 points are given; callers treat a
    /// wrong count as "no hand in this frame".
    pub fn from_points(points: &[[f32; 3]]) -> Option<Self> {
        if points.len() != LANDMARK_COUNT {
            warn!(
                "Hand landmarks: expected {} points, got {}",
                LANDMARK_COUNT,
                points.len(),
            );
            return None;
        }
        let mut owned = [[0.0f32; 3]; LANDMARK_COUNT];
        owned.copy_from_slice(points);
        Some(Self { points: owned })
    }
}

/// Euclidean distance between two (x, y, z) points.
pub fn point_distance(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let dz = b[2] - a[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

// ── Tests ──────────────────────────────────────────────────
