//! Dynamic-mode word recognition.
//!
//! Accumulates per-frame motion features into a sliding window and, once
//! the window is full, classifies the whole gesture. Committed words are
//! rate-limited by a cooldown so one continuous motion cannot spell the
//! same word several times, and the window keeps sliding rather than
//! restarting from empty after each attempt.

use tracing::{debug, info, warn};

use crate::classifier::{arg_max, GestureClassifier};
use crate::features::{self, GESTURE_FEATURE_LEN};
use crate::hand_tracking::HandLandmarks;
use crate::ring::Ring;

// ── Config ─────────────────────────────────────────────────

/// Configuration for word recognition.
#[derive(Debug, Clone)]
pub struct WordConfig {
    /// Frames per gesture window; classification waits for a full window.
    pub window_len: usize,
    /// Minimum winning score for a word to commit.
    pub confidence_floor: f32,
    /// Seconds after a confident word during which no attempt is made.
    pub cooldown_s: f64,
}

impl Default for WordConfig {
    fn default() -> Self {
        Self {
            window_len: 30,
            confidence_floor: 0.80,
            cooldown_s: 1.5,
        }
    }
}

// ── Committer ──────────────────────────────────────────────

/// Sliding-window word committer for dynamic mode.
pub struct WordCommitter {
    config: WordConfig,
    /// Per-frame feature rows, oldest first.
    window: Ring<[f32; GESTURE_FEATURE_LEN]>,
    /// Most recent confident word, committed or suppressed.
    last_word: Option<String>,
    /// When the cooldown was last armed. `None` means no confident word
    /// has been seen yet and the gate is open.
    last_word_time_s: Option<f64>,
}

impl WordCommitter {
    pub fn new(config: &WordConfig) -> Self {
        Self {
            config: config.clone(),
            window: Ring::new(config.window_len),
            last_word: None,
            last_word_time_s: None,
        }
    }

    /// Run one dynamic-mode frame: extend the gesture window and, when it
    /// is full and the cooldown allows, classify it and commit the
    /// winning word to the transcript.
    ///
    /// Returns the winning score of this frame's attempt, or 0 when no
    /// classification ran.
    pub fn update(
        &mut self,
        classifier: &mut dyn GestureClassifier,
        landmarks: &HandLandmarks,
        transcript: &mut String,
        timestamp_s: f64,
    ) -> f32 {
        self.window.push(features::gesture_features(landmarks));

        if !self.window.is_full() {
            debug!(
                "Gesture window filling: {}/{} frames",
                self.window.len(),
                self.window.capacity(),
            );
            return 0.0;
        }

        if let Some(armed_s) = self.last_word_time_s {
            if timestamp_s - armed_s <= self.config.cooldown_s {
                debug!("Word cooldown active after {:?}", self.last_word);
                return 0.0;
            }
        }

        let frames: Vec<[f32; GESTURE_FEATURE_LEN]> = self.window.iter().copied().collect();
        let scores = match classifier.classify(&frames) {
            Ok(scores) => scores,
            Err(err) => {
                warn!("Gesture classifier failed: {}", err);
                return 0.0;
            }
        };
        let best = match arg_max(&scores) {
            Some(best) => best,
            None => {
                warn!("Gesture classifier returned no scores");
                return 0.0;
            }
        };

        if best.score >= self.config.confidence_floor {
            if transcript.ends_with(best.label.as_str()) {
                debug!("Duplicate word suppressed: {:?}", best.label);
            } else {
                if !transcript.is_empty() && !transcript.ends_with(' ') {
                    transcript.push(' ');
                }
                transcript.push_str(&best.label);
                info!(
                    "Word committed: {:?} at {:.2}",
                    best.label, best.score
                );
            }
            // Suppressed duplicates still re-arm the cooldown, so a
            // sustained repeat of the same sign stays quiet.
            self.last_word = Some(best.label.clone());
            self.last_word_time_s = Some(timestamp_s);
        } else {
            debug!("Gesture below floor: {:?} at {:.2}", best.label, best.score);
        }

        best.score
    }

    /// Discard the gesture window (mode switch). The cooldown anchor and
    /// last word survive.
    pub fn clear_window(&mut self) {
        self.window.clear();
    }

    /// Discard the window and the last word. The cooldown anchor is kept;
    /// only elapsed time releases it.
    pub fn reset(&mut self) {
        self.window.clear();
        self.last_word = None;
    }
}

// ── Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassScore;
    use crate::hand_tracking::LANDMARK_COUNT;
    use anyhow::{anyhow, Result};

    /// Classifier returning a fixed word at a fixed winning score.
    struct FixedGesture {
        label: &'static str,
        confidence: f32,
        calls: usize,
    }

    impl FixedGesture {
        fn new(label: &'static str, confidence: f32) -> Self {
            Self {
                label,
                confidence,
                calls: 0,
            }
        }
    }

    impl GestureClassifier for FixedGesture {
        fn classify(&mut self, _window: &[[f32; GESTURE_FEATURE_LEN]]) -> Result<Vec<ClassScore>> {
            self.calls += 1;
            Ok(vec![
                ClassScore {
                    label: self.label.to_string(),
                    score: self.confidence,
                },
                ClassScore {
                    label: "other".to_string(),
                    score: 1.0 - self.confidence,
                },
            ])
        }
    }

    /// Classifier whose every invocation fails.
    struct BrokenGesture;

    impl GestureClassifier for BrokenGesture {
        fn classify(&mut self, _window: &[[f32; GESTURE_FEATURE_LEN]]) -> Result<Vec<ClassScore>> {
            Err(anyhow!("model file corrupted"))
        }
    }

    fn hand() -> HandLandmarks {
        let points: Vec<[f32; 3]> = (0..LANDMARK_COUNT)
            .map(|i| [i as f32 * 0.01, 0.5, 0.0])
            .collect();
        HandLandmarks::from_points(&points).unwrap()
    }

    /// Feed `frames` frames at 0.25 s intervals starting at `start_s`;
    /// returns the timestamp after the last frame.
    fn feed(
        committer: &mut WordCommitter,
        classifier: &mut dyn GestureClassifier,
        transcript: &mut String,
        start_s: f64,
        frames: usize,
    ) -> f64 {
        let mut t = start_s;
        for _ in 0..frames {
            committer.update(classifier, &hand(), transcript, t);
            t += 0.25;
        }
        t
    }

    #[test]
    fn test_full_window_gates_classification() {
        let mut committer = WordCommitter::new(&WordConfig::default());
        let mut classifier = FixedGesture::new("HELLO", 0.9);
        let mut transcript = String::new();

        // 29 frames: the window is short one frame, nothing runs.
        feed(&mut committer, &mut classifier, &mut transcript, 0.0, 29);
        assert_eq!(classifier.calls, 0);
        assert_eq!(transcript, "");

        // 30th frame fills the window and commits immediately.
        let score = committer.update(&mut classifier, &hand(), &mut transcript, 7.25);
        assert_eq!(classifier.calls, 1);
        assert!(
            (score - 0.9).abs() < 1e-6,
            "Expected the winning score back, got {}",
            score
        );
        assert_eq!(transcript, "HELLO");
        assert!(
            committer.window.is_full(),
            "The window slides; a commit must not empty it"
        );
    }

    #[test]
    fn test_cooldown_blocks_then_releases() {
        let mut committer = WordCommitter::new(&WordConfig::default());
        let mut classifier = FixedGesture::new("HELLO", 0.9);
        let mut transcript = String::new();

        // First commit lands at t=7.25 and arms the cooldown.
        feed(&mut committer, &mut classifier, &mut transcript, 0.0, 30);
        assert_eq!(classifier.calls, 1);

        // Every frame through t=8.75 sits inside the 1.5 s cooldown;
        // the boundary itself (exactly 1.5 s elapsed) is still blocked.
        feed(&mut committer, &mut classifier, &mut transcript, 7.5, 6);
        assert_eq!(classifier.calls, 1, "No attempts inside the cooldown");

        // t=9.0 is strictly past the cooldown: the attempt runs, the word
        // duplicates the transcript tail, and the suppressed duplicate
        // re-arms the cooldown anyway.
        committer.update(&mut classifier, &hand(), &mut transcript, 9.0);
        assert_eq!(classifier.calls, 2);
        assert_eq!(transcript, "HELLO", "Duplicate words never append");

        feed(&mut committer, &mut classifier, &mut transcript, 9.25, 6);
        assert_eq!(
            classifier.calls, 2,
            "A suppressed duplicate still restarts the cooldown"
        );
    }

    #[test]
    fn test_space_separates_words() {
        let mut committer = WordCommitter::new(&WordConfig::default());
        let mut hello = FixedGesture::new("HI", 0.9);
        let mut there = FixedGesture::new("THERE", 0.9);
        let mut transcript = String::new();

        // First word into an empty transcript gets no leading space.
        let t = feed(&mut committer, &mut hello, &mut transcript, 0.0, 30);
        assert_eq!(transcript, "HI");

        // Second word, after the cooldown, is space-separated.
        feed(&mut committer, &mut there, &mut transcript, t, 8);
        assert_eq!(transcript, "HI THERE");
    }

    #[test]
    fn test_space_not_doubled_after_spelled_prefix() {
        let mut committer = WordCommitter::new(&WordConfig::default());
        let mut classifier = FixedGesture::new("HELLO", 0.9);

        // A transcript built by letter spelling ends without a space.
        let mut transcript = String::from("AB");
        feed(&mut committer, &mut classifier, &mut transcript, 0.0, 30);
        assert_eq!(transcript, "AB HELLO");
    }

    #[test]
    fn test_low_confidence_reattempts_every_frame() {
        let mut committer = WordCommitter::new(&WordConfig::default());
        let mut classifier = FixedGesture::new("HELLO", 0.5);
        let mut transcript = String::new();

        // 35 frames: 29 fill the window, then every full frame attempts
        // because a below-floor result never arms the cooldown.
        feed(&mut committer, &mut classifier, &mut transcript, 0.0, 35);
        assert_eq!(classifier.calls, 6);
        assert_eq!(transcript, "");
        assert_eq!(committer.last_word, None);
    }

    #[test]
    fn test_suffix_match_suppresses_commit() {
        let mut committer = WordCommitter::new(&WordConfig::default());
        let mut classifier = FixedGesture::new("O", 0.9);
        let mut transcript = String::from("HELLO");

        feed(&mut committer, &mut classifier, &mut transcript, 0.0, 30);
        assert_eq!(
            transcript, "HELLO",
            "A word matching the transcript tail is suppressed"
        );
        assert_eq!(committer.last_word, Some("O".to_string()));
    }

    #[test]
    fn test_classifier_failure_is_no_prediction() {
        let mut committer = WordCommitter::new(&WordConfig::default());
        let mut broken = BrokenGesture;
        let mut transcript = String::new();

        feed(&mut committer, &mut broken, &mut transcript, 0.0, 31);
        assert_eq!(transcript, "");
        assert_eq!(committer.last_word, None);
    }

    #[test]
    fn test_reset_keeps_cooldown_anchor() {
        let mut committer = WordCommitter::new(&WordConfig::default());
        let mut classifier = FixedGesture::new("HELLO", 0.9);
        let mut transcript = String::new();

        // The window only counts frames, so identical timestamps are fine
        // for filling it; the clock matters only to the cooldown.
        for _ in 0..30 {
            committer.update(&mut classifier, &hand(), &mut transcript, 0.0);
        }
        assert_eq!(classifier.calls, 1);

        committer.reset();
        assert_eq!(committer.last_word, None);
        assert_eq!(committer.window.len(), 0);

        // Refill after the reset: the anchor armed at t=0.0 still blocks
        // attempts at t=1.0 and at exactly t=1.5.
        for _ in 0..30 {
            committer.update(&mut classifier, &hand(), &mut transcript, 1.0);
        }
        committer.update(&mut classifier, &hand(), &mut transcript, 1.5);
        assert_eq!(classifier.calls, 1, "Reset must not release the cooldown");

        // Strictly past the cooldown the gate opens again.
        committer.update(&mut classifier, &hand(), &mut transcript, 2.0);
        assert_eq!(classifier.calls, 2);
    }
}
