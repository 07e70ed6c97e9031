//! Frame-by-frame recognition pipeline.
//!
//! Owns the motion tracker, the mode arbiter, and the two committers,
//! and routes each frame of hand landmarks to whichever mode is active.
//! The transcript accumulates across frames until a reset.

use anyhow::{bail, Result};
use serde::Serialize;
use tracing::info;

use crate::classifier::{GestureClassifier, ShapeClassifier};
use crate::hand_tracking::HandLandmarks;
use crate::letters::{LetterCommitter, LetterConfig};
use crate::mode::{Mode, ModeArbiter, ModeConfig};
use crate::motion::{MotionConfig, MotionTracker};
use crate::words::{WordCommitter, WordConfig};

// ── Config ─────────────────────────────────────────────────

/// Configuration for the whole pipeline.
#[derive(Debug, Clone, Default)]
pub struct RecognizerConfig {
    pub motion: MotionConfig,
    pub mode: ModeConfig,
    pub letters: LetterConfig,
    pub words: WordConfig,
}

// ── Output ─────────────────────────────────────────────────

/// Result of one processed frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameResult {
    /// Transcript so far.
    pub text: String,
    /// Mode the frame was processed in.
    pub mode: Mode,
    /// Winning classifier score for this frame as a percentage,
    /// rounded to two decimals. 0 when no classification ran.
    pub confidence: f32,
}

// ── Recognizer ─────────────────────────────────────────────

/// Sign-language recognizer translating landmark frames into text.
pub struct Recognizer {
    shape: Option<Box<dyn ShapeClassifier>>,
    gesture: Option<Box<dyn GestureClassifier>>,
    motion: MotionTracker,
    arbiter: ModeArbiter,
    letters: LetterCommitter,
    words: WordCommitter,
    transcript: String,
}

impl Recognizer {
    /// Build a recognizer from whichever classifiers are available.
    /// At least one of the two must be present.
    pub fn new(
        config: &RecognizerConfig,
        shape: Option<Box<dyn ShapeClassifier>>,
        gesture: Option<Box<dyn GestureClassifier>>,
    ) -> Result<Self> {
        if shape.is_none() && gesture.is_none() {
            bail!("no classifier available; provide a shape model, a gesture model, or both");
        }
        info!(
            "Recognizer ready (shapes: {}, gestures: {})",
            if shape.is_some() { "yes" } else { "no" },
            if gesture.is_some() { "yes" } else { "no" },
        );
        Ok(Self {
            shape,
            gesture,
            motion: MotionTracker::new(&config.motion),
            arbiter: ModeArbiter::new(&config.mode),
            letters: LetterCommitter::new(&config.letters),
            words: WordCommitter::new(&config.words),
            transcript: String::new(),
        })
    }

    /// Process one camera frame. `landmarks` is `None` when no hand was
    /// detected; `timestamp_s` must be monotonic across calls.
    pub fn process_frame(
        &mut self,
        landmarks: Option<&HandLandmarks>,
        timestamp_s: f64,
    ) -> FrameResult {
        self.motion.update(landmarks);

        if self
            .arbiter
            .update(&self.motion, self.gesture.is_some())
            .is_some()
        {
            // Evidence gathered in one mode must not leak into the
            // other; the hold and cooldown state stay put.
            self.letters.clear_votes();
            self.words.clear_window();
        }

        let mut confidence = 0.0f32;
        if let Some(hand) = landmarks {
            match self.arbiter.mode() {
                Mode::Dynamic => {
                    if let Some(gesture) = self.gesture.as_mut() {
                        confidence = self.words.update(
                            gesture.as_mut(),
                            hand,
                            &mut self.transcript,
                            timestamp_s,
                        );
                    }
                }
                Mode::Static => {
                    if let Some(shape) = self.shape.as_mut() {
                        confidence = self.letters.update(
                            shape.as_mut(),
                            hand,
                            &mut self.transcript,
                            timestamp_s,
                        );
                    }
                }
            }
        }

        FrameResult {
            text: self.transcript.clone(),
            mode: self.arbiter.mode(),
            confidence: as_percent(confidence),
        }
    }

    /// Clear the transcript and all committed-evidence state. Motion
    /// history, the active mode, and the word cooldown survive.
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.letters.reset();
        self.words.reset();
        info!("Recognizer reset; transcript cleared");
    }

    /// Transcript accumulated so far.
    pub fn transcript(&self) -> &str {
        &self.transcript
    }
}

/// Unit score to a percentage with two decimals.
fn as_percent(confidence: f32) -> f32 {
    (confidence * 10_000.0).round() / 100.0
}

// ── Tests ──────────────────────────────────────────────────
