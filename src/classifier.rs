//! Swappable classifier capabilities.
//!
//! The recognizer treats both classifiers as opaque collaborators: either
//! may be absent at construction, and an invocation error means "no
//! prediction this frame", never a pipeline failure.

use anyhow::Result;

use crate::features::{GESTURE_FEATURE_LEN, SHAPE_FEATURE_LEN};

/// Output of a shape classification: the predicted letter plus the full
/// class probability distribution (confidence is its maximum).
#[derive(Debug, Clone)]
pub struct ShapePrediction {
    pub label: String,
    pub scores: Vec<f32>,
}

/// One labeled probability from a gesture classification.
#[derive(Debug, Clone)]
pub struct ClassScore {
    pub label: String,
    pub score: f32,
}

/// Classifies a single frame's hand shape into a letter label.
pub trait ShapeClassifier {
    fn classify(&mut self, features: &[f32; SHAPE_FEATURE_LEN]) -> Result<ShapePrediction>;
}

/// Classifies a full window of per-frame features into word probabilities.
pub trait GestureClassifier {
    /// `window` holds the complete window (oldest frame first) whenever
    /// this is invoked.
    fn classify(&mut self, window: &[[f32; GESTURE_FEATURE_LEN]]) -> Result<Vec<ClassScore>>;
}

/// First entry carrying the maximum score; ties keep the earlier entry.
pub fn arg_max(scores: &[ClassScore]) -> Option<&ClassScore> {
    scores
        .iter()
        .reduce(|best, entry| if entry.score > best.score { entry } else { best })
}

// ── Tests ──────────────────────────────────────────────────
