//! Template (nearest-centroid) classifiers.
//!
//! A lightweight model format: a JSON object mapping class labels to
//! feature centroids. Scores are a softmax over negative squared
//! distances, so features sitting on one centroid win with a score
//! approaching 1 and ambiguous features split the mass.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::classifier::{ClassScore, GestureClassifier, ShapeClassifier, ShapePrediction};
use crate::features::{GESTURE_FEATURE_LEN, SHAPE_FEATURE_LEN};

// ── Shape templates ────────────────────────────────────────

/// Nearest-centroid classifier over single-frame hand shapes.
pub struct TemplateShapeClassifier {
    /// Label and centroid pairs, sorted by label.
    templates: Vec<(String, Vec<f32>)>,
}

impl TemplateShapeClassifier {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading shape templates from {}", path.display()))?;
        let classifier = Self::from_json(&raw)
            .with_context(|| format!("parsing shape templates from {}", path.display()))?;
        info!(
            "Loaded {} shape templates from {}",
            classifier.templates.len(),
            path.display(),
        );
        Ok(classifier)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let map: BTreeMap<String, Vec<f32>> = serde_json::from_str(raw)?;
        let templates = validated_templates(map, SHAPE_FEATURE_LEN)?;
        Ok(Self { templates })
    }
}

impl ShapeClassifier for TemplateShapeClassifier {
    fn classify(&mut self, features: &[f32; SHAPE_FEATURE_LEN]) -> Result<ShapePrediction> {
        let scores = softmax_by_distance(
            features,
            self.templates.iter().map(|(_, centroid)| centroid.as_slice()),
        );
        let best = arg_max_index(&scores);
        Ok(ShapePrediction {
            label: self.templates[best].0.clone(),
            scores,
        })
    }
}

// ── Gesture templates ──────────────────────────────────────

/// Nearest-centroid classifier over whole gesture windows. Centroids are
/// flattened windows, `window_len * GESTURE_FEATURE_LEN` values each.
pub struct TemplateGestureClassifier {
    templates: Vec<(String, Vec<f32>)>,
    window_len: usize,
}

impl TemplateGestureClassifier {
    pub fn from_file(path: &Path, window_len: usize) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading gesture templates from {}", path.display()))?;
        let classifier = Self::from_json(&raw, window_len)
            .with_context(|| format!("parsing gesture templates from {}", path.display()))?;
        info!(
            "Loaded {} gesture templates from {}",
            classifier.templates.len(),
            path.display(),
        );
        Ok(classifier)
    }

    pub fn from_json(raw: &str, window_len: usize) -> Result<Self> {
        let map: BTreeMap<String, Vec<f32>> = serde_json::from_str(raw)?;
        let templates = validated_templates(map, window_len * GESTURE_FEATURE_LEN)?;
        Ok(Self {
            templates,
            window_len,
        })
    }
}

impl GestureClassifier for TemplateGestureClassifier {
    fn classify(&mut self, window: &[[f32; GESTURE_FEATURE_LEN]]) -> Result<Vec<ClassScore>> {
        if window.len() != self.window_len {
            bail!(
                "gesture window holds {} frames, templates expect {}",
                window.len(),
                self.window_len,
            );
        }
        let flat: Vec<f32> = window.iter().flat_map(|frame| frame.iter().copied()).collect();
        let scores = softmax_by_distance(
            &flat,
            self.templates.iter().map(|(_, centroid)| centroid.as_slice()),
        );
        Ok(self
            .templates
            .iter()
            .zip(scores)
            .map(|((label, _), score)| ClassScore {
                label: label.clone(),
                score,
            })
            .collect())
    }
}

// ── Shared ─────────────────────────────────────────────────

/// Check every centroid against the expected feature length and freeze
/// the map into label-sorted pairs.
fn validated_templates(
    map: BTreeMap<String, Vec<f32>>,
    expected_len: usize,
) -> Result<Vec<(String, Vec<f32>)>> {
    if map.is_empty() {
        bail!("template file holds no classes");
    }
    for (label, centroid) in &map {
        if centroid.len() != expected_len {
            bail!(
                "template {:?} has {} values, expected {}",
                label,
                centroid.len(),
                expected_len,
            );
        }
    }
    Ok(map.into_iter().collect())
}

/// Softmax over negative squared distances to each centroid. The running
/// maximum is subtracted before exponentiating to keep the sums finite.
fn softmax_by_distance<'a>(
    features: &[f32],
    centroids: impl Iterator<Item = &'a [f32]>,
) -> Vec<f32> {
    let negated: Vec<f32> = centroids
        .map(|centroid| -squared_distance(features, centroid))
        .collect();
    let max = negated.iter().fold(f32::NEG_INFINITY, |m, v| m.max(*v));
    let exps: Vec<f32> = negated.iter().map(|v| (v - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Index of the strictly greatest score; ties keep the first.
fn arg_max_index(scores: &[f32]) -> usize {
    let mut best = 0;
    for (i, score) in scores.iter().enumerate() {
        if *score > scores[best] {
            best = i;
        }
    }
    best
}

// ── Tests ──────────────────────────────────────────────────
