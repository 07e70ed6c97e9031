//! Classifier feature vectors from raw hand landmarks.
//!
//! Makes coordinates translation and scale invariant: wrist-relative,
//! divided by the largest absolute coordinate. Pure functions, no state.

use crate::hand_tracking::{HandLandmarks, LANDMARK_COUNT, WRIST};

/// Length of a shape (static letter) feature vector: 21 points x (x, y).
pub const SHAPE_FEATURE_LEN: usize = 2 * LANDMARK_COUNT;

/// Length of a gesture (dynamic word) feature vector: a two-hand layout of
/// 21 points x (x, y, z) per hand, zero-padded when one hand is tracked.
pub const GESTURE_FEATURE_LEN: usize = 2 * 3 * LANDMARK_COUNT;

/// Flatten one hand into a 42-length (x, y) vector.
pub fn shape_features(landmarks: &HandLandmarks) -> [f32; SHAPE_FEATURE_LEN] {
    let wrist = landmarks.points[WRIST];
    let mut out = [0.0f32; SHAPE_FEATURE_LEN];
    for (i, p) in landmarks.points.iter().enumerate() {
        out[2 * i] = p[0] - wrist[0];
        out[2 * i + 1] = p[1] - wrist[1];
    }
    scale_by_max_abs(&mut out);
    out
}

/// Flatten one hand into a 126-length (x, y, z) vector.
///
/// The single hand fills the first 63 slots; the rest stay zero. Scaling
/// runs before padding, so the pad never influences the scale factor.
pub fn gesture_features(landmarks: &HandLandmarks) -> [f32; GESTURE_FEATURE_LEN] {
    let wrist = landmarks.points[WRIST];
    let mut flat = [0.0f32; 3 * LANDMARK_COUNT];
    for (i, p) in landmarks.points.iter().enumerate() {
        flat[3 * i] = p[0] - wrist[0];
        flat[3 * i + 1] = p[1] - wrist[1];
        flat[3 * i + 2] = p[2] - wrist[2];
    }
    scale_by_max_abs(&mut flat);

    let mut out = [0.0f32; GESTURE_FEATURE_LEN];
    fill_padded(&flat, &mut out);
    out
}

/// Divide all values by the largest absolute value among them.
///
/// All-zero input is left untouched: a degenerate frame (every point on
/// the wrist) must not divide by zero.
fn scale_by_max_abs(values: &mut [f32]) {
    let max = values.iter().fold(0.0f32, |m, v| m.max(v.abs()));
    if max > 0.0 {
        for v in values.iter_mut() {
            *v /= max;
        }
    }
}

/// Copy `values` into `out`, zero-filling the tail when `values` is
/// shorter and ignoring the excess when it is longer.
fn fill_padded(values: &[f32], out: &mut [f32]) {
    let n = values.len().min(out.len());
    out[..n].copy_from_slice(&values[..n]);
    for v in &mut out[n..] {
        *v = 0.0;
    }
}

// ── Tests ──────────────────────────────────────────────────
