//! Static/dynamic mode arbitration from motion energy.
//!
//! A still hand spells letters; a moving hand performs word gestures.
//! The arbiter compares the motion history mean against one threshold,
//! with no separate enter/exit bands, and only once enough samples exist.

use serde::Serialize;
use tracing::info;

use crate::motion::MotionTracker;

// ── Mode ───────────────────────────────────────────────────

/// Active recognition mode. Exactly one is active at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Motionless hand shapes committed as single letters.
    Static,
    /// Motion gestures over a fixed window committed as whole words.
    Dynamic,
}

impl Mode {
    /// String representation for logging and frame results.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
        }
    }
}

// ── Config ─────────────────────────────────────────────────

/// Configuration for mode arbitration.
#[derive(Debug, Clone)]
pub struct ModeConfig {
    /// Motion samples required before any decision is made.
    pub min_samples: usize,
    /// Mean displacement above which dynamic mode engages (strict).
    pub motion_threshold: f32,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            min_samples: 5,
            motion_threshold: 0.045,
        }
    }
}

// ── Arbiter ────────────────────────────────────────────────

/// Threshold arbiter between the two recognition modes.
///
/// Starts in static mode. Dynamic additionally requires the gesture
/// capability: without it, high motion keeps static mode active.
#[derive(Debug)]
pub struct ModeArbiter {
    config: ModeConfig,
    mode: Mode,
}

impl ModeArbiter {
    pub fn new(config: &ModeConfig) -> Self {
        Self {
            config: config.clone(),
            mode: Mode::Static,
        }
    }

    /// Currently active mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Re-evaluate the mode against the motion history.
    ///
    /// Holds the current mode (returning None) while the history has fewer
    /// than `min_samples` samples. Returns the entered mode when a switch
    /// happened; the caller must then discard both committers' buffers.
    pub fn update(&mut self, motion: &MotionTracker, gesture_available: bool) -> Option<Mode> {
        if motion.sample_count() < self.config.min_samples {
            return None;
        }
        let energy = motion.mean_energy()?;

        let target = if energy > self.config.motion_threshold && gesture_available {
            Mode::Dynamic
        } else {
            Mode::Static
        };
        if target == self.mode {
            return None;
        }

        info!(
            "Mode switch: {} -> {} (motion energy {:.4})",
            self.mode.as_str(),
            target.as_str(),
            energy,
        );
        self.mode = target;
        Some(target)
    }
}

// ── Tests ──────────────────────────────────────────────────
