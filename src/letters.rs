//! Static-mode letter spelling.
//!
//! Smooths jittery per-frame shape predictions with a sliding majority
//! vote, then gates the stable letter behind a hold time before it
//! reaches the transcript. A committed letter must be released (majority
//! change or reset) before the same letter can be appended again.

use tracing::{debug, info, warn};

use crate::classifier::ShapeClassifier;
use crate::features;
use crate::hand_tracking::HandLandmarks;
use crate::ring::Ring;

// ── Config ─────────────────────────────────────────────────

/// Configuration for letter spelling.
#[derive(Debug, Clone)]
pub struct LetterConfig {
    /// Vote window capacity.
    pub buffer_len: usize,
    /// Minimum classifier confidence for a frame to cast a vote.
    pub vote_floor: f32,
    /// Votes required before the majority is evaluated.
    pub vote_quorum: usize,
    /// Seconds the majority letter must persist before it commits.
    pub hold_time_s: f64,
}

impl Default for LetterConfig {
    fn default() -> Self {
        Self {
            buffer_len: 12,
            vote_floor: 0.50,
            vote_quorum: 8,
            hold_time_s: 0.50,
        }
    }
}

// ── Hold state ─────────────────────────────────────────────

/// Progress toward committing a letter.
#[derive(Debug, Clone, PartialEq)]
pub enum HoldState {
    /// No letter is currently held.
    Idle,
    /// `letter` has been the stable majority since `since_s`.
    Holding { letter: String, since_s: f64 },
}

// ── Committer ──────────────────────────────────────────────

/// Majority-vote letter committer for static mode.
pub struct LetterCommitter {
    config: LetterConfig,
    /// Sliding window of confident vote labels, oldest first.
    votes: Ring<String>,
    /// Current hold progress.
    pub hold: HoldState,
}

impl LetterCommitter {
    pub fn new(config: &LetterConfig) -> Self {
        Self {
            config: config.clone(),
            votes: Ring::new(config.buffer_len),
            hold: HoldState::Idle,
        }
    }

    /// Run one static-mode frame: classify the hand shape, cast a vote if
    /// confident enough, and advance the majority/hold pipeline.
    ///
    /// Returns the classifier confidence observed this frame (0 when the
    /// invocation failed). The majority step runs on every classified
    /// frame once a quorum exists, so hold timing keeps progressing even
    /// on frames whose confidence was below the vote floor.
    pub fn update(
        &mut self,
        classifier: &mut dyn ShapeClassifier,
        landmarks: &HandLandmarks,
        transcript: &mut String,
        timestamp_s: f64,
    ) -> f32 {
        let features = features::shape_features(landmarks);

        let prediction = match classifier.classify(&features) {
            Ok(prediction) => prediction,
            Err(err) => {
                warn!("Shape classifier failed: {}", err);
                return 0.0;
            }
        };
        let confidence = prediction.scores.iter().fold(0.0f32, |m, s| m.max(*s));

        if confidence >= self.config.vote_floor {
            self.votes.push(prediction.label);
        } else {
            debug!(
                "Vote below floor: {:?} at {:.2}",
                prediction.label, confidence
            );
        }

        if self.votes.len() >= self.config.vote_quorum {
            if let Some(letter) = majority_label(self.votes.iter()) {
                self.advance_hold(letter, transcript, timestamp_s);
            }
        }

        confidence
    }

    /// Advance the hold state for this frame's majority letter, appending
    /// to the transcript once the hold time has elapsed.
    fn advance_hold(&mut self, letter: String, transcript: &mut String, timestamp_s: f64) {
        let held_since = match &self.hold {
            HoldState::Holding { letter: held, since_s } if *held == letter => Some(*since_s),
            _ => None,
        };

        match held_since {
            Some(since_s) => {
                if timestamp_s - since_s >= self.config.hold_time_s
                    && !transcript.ends_with(letter.as_str())
                {
                    transcript.push_str(&letter);
                    // A fresh hold cycle is required before this letter
                    // can commit again.
                    self.hold = HoldState::Idle;
                    info!(
                        "Letter committed: {:?} (transcript now {} chars)",
                        letter,
                        transcript.len(),
                    );
                }
            }
            None => {
                debug!("Holding {:?} from {:.3}s", letter, timestamp_s);
                self.hold = HoldState::Holding {
                    letter,
                    since_s: timestamp_s,
                };
            }
        }
    }

    /// Discard the vote window (mode switch). The hold state survives;
    /// only a reset releases a held letter.
    pub fn clear_votes(&mut self) {
        self.votes.clear();
    }

    /// Discard votes and the held letter.
    pub fn reset(&mut self) {
        self.votes.clear();
        self.hold = HoldState::Idle;
    }
}

/// Most frequent label in the window; ties keep the label seen first.
fn majority_label<'a>(votes: impl Iterator<Item = &'a String>) -> Option<String> {
    let mut counts: Vec<(&'a String, usize)> = Vec::new();
    for label in votes {
        match counts.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label, 1)),
        }
    }

    let mut best: Option<(&String, usize)> = None;
    for (label, n) in counts {
        match best {
            Some((_, best_n)) if n <= best_n => {}
            _ => best = Some((label, n)),
        }
    }
    best.map(|(label, _)| label.clone())
}

// ── Tests ──────────────────────────────────────────────────
