//! Hand motion energy tracking across frames.
//!
//! Keeps a bounded history of per-frame mean landmark displacement; the
//! history mean is the motion energy signal that drives static/dynamic
//! mode arbitration.

use tracing::debug;

use crate::hand_tracking::{point_distance, HandLandmarks, LANDMARK_COUNT};
use crate::ring::Ring;

// ── Config ─────────────────────────────────────────────────

/// Configuration for motion tracking.
#[derive(Debug, Clone)]
pub struct MotionConfig {
    /// Displacement samples retained in the history.
    pub history_len: usize,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self { history_len: 15 }
    }
}

// ── Tracker ────────────────────────────────────────────────

/// Rolling displacement tracker for one hand.
///
/// Never fails: a frame without a hand clears the history, and the first
/// detected frame only seeds the previous landmarks without producing a
/// sample.
#[derive(Debug)]
pub struct MotionTracker {
    /// Recent displacement samples, oldest first.
    history: Ring<f32>,
    /// Landmarks from the last detected frame.
    previous: Option<HandLandmarks>,
}

impl MotionTracker {
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            history: Ring::new(config.history_len),
            previous: None,
        }
    }

    /// Record one frame's landmarks (or their absence).
    pub fn update(&mut self, landmarks: Option<&HandLandmarks>) {
        match landmarks {
            Some(current) => {
                if let Some(previous) = &self.previous {
                    self.history.push(mean_displacement(previous, current));
                }
                self.previous = Some(current.clone());
            }
            None => {
                if !self.history.is_empty() {
                    debug!(
                        "Hand lost, clearing {} motion samples",
                        self.history.len()
                    );
                }
                self.history.clear();
            }
        }
    }

    /// Number of displacement samples currently held.
    pub fn sample_count(&self) -> usize {
        self.history.len()
    }

    /// Arithmetic mean of the held samples; None while the history is empty.
    pub fn mean_energy(&self) -> Option<f32> {
        if self.history.is_empty() {
            return None;
        }
        let sum: f32 = self.history.iter().sum();
        Some(sum / self.history.len() as f32)
    }
}

/// Mean distance between corresponding landmarks of two frames.
fn mean_displacement(a: &HandLandmarks, b: &HandLandmarks) -> f32 {
    let total: f32 = a
        .points
        .iter()
        .zip(b.points.iter())
        .map(|(pa, pb)| point_distance(pa, pb))
        .sum();
    total / LANDMARK_COUNT as f32
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Hand with every point at (x, 0.5, 0).
    fn hand_at(x: f32) -> HandLandmarks {
        let points = vec![[x, 0.5, 0.0]; LANDMARK_COUNT];
        HandLandmarks::from_points(&points).unwrap()
    }

    #[test]
    fn test_first_frame_produces_no_sample() {
        let mut tracker = MotionTracker::new(&MotionConfig::default());
        tracker.update(Some(&hand_at(0.1)));
        assert_eq!(tracker.sample_count(), 0);
        assert_eq!(tracker.mean_energy(), None);
    }

    #[test]
    fn test_displacement_is_mean_point_distance() {
        let mut tracker = MotionTracker::new(&MotionConfig::default());
        tracker.update(Some(&hand_at(0.0)));
        tracker.update(Some(&hand_at(0.08)));

        assert_eq!(tracker.sample_count(), 1);
        let energy = tracker.mean_energy().unwrap();
        assert!(
            (energy - 0.08).abs() < 1e-6,
            "All points moved 0.08, expected energy 0.08, got {}",
            energy
        );
    }

    #[test]
    fn test_constant_hand_has_zero_energy() {
        let mut tracker = MotionTracker::new(&MotionConfig::default());
        for _ in 0..10 {
            tracker.update(Some(&hand_at(0.3)));
        }
        assert_eq!(tracker.sample_count(), 9);
        assert!(tracker.mean_energy().unwrap().abs() < f32::EPSILON);
    }

    #[test]
    fn test_no_hand_clears_history() {
        let mut tracker = MotionTracker::new(&MotionConfig::default());
        for i in 0..6 {
            tracker.update(Some(&hand_at(i as f32 * 0.05)));
        }
        assert_eq!(tracker.sample_count(), 5);

        tracker.update(None);
        assert_eq!(tracker.sample_count(), 0);
        assert_eq!(tracker.mean_energy(), None);
    }

    #[test]
    fn test_previous_landmarks_survive_detection_gap() {
        // The history clears on a gap but the previous landmarks do not,
        // so the first frame back immediately yields a sample.
        let mut tracker = MotionTracker::new(&MotionConfig::default());
        tracker.update(Some(&hand_at(0.0)));
        tracker.update(None);
        tracker.update(Some(&hand_at(0.1)));

        assert_eq!(tracker.sample_count(), 1);
        assert!((tracker.mean_energy().unwrap() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut tracker = MotionTracker::new(&MotionConfig { history_len: 15 });
        for i in 0..40 {
            tracker.update(Some(&hand_at(i as f32 * 0.01)));
        }
        assert_eq!(
            tracker.sample_count(),
            15,
            "History must never exceed its capacity"
        );
    }
}
