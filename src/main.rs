//! signscribe - sign-language transcription from hand-landmark streams
//!
//! Replays a JSON-lines stream of landmark frames through the
//! recognizer. Still hands are spelled letter by letter, moving hands
//! are matched against whole-gesture words, and both feed one growing
//! transcript. By default the final transcript is printed at the end;
//! `--emit-frames` prints one JSON result per frame instead.

mod classifier;
mod features;
mod hand_tracking;
mod letters;
mod mode;
mod motion;
mod recognizer;
mod ring;
mod templates;
mod words;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use tracing::info;

use crate::classifier::{GestureClassifier, ShapeClassifier};
use crate::hand_tracking::HandLandmarks;
use crate::recognizer::{Recognizer, RecognizerConfig};
use crate::templates::{TemplateGestureClassifier, TemplateShapeClassifier};

#[derive(Parser, Debug)]
#[command(name = "signscribe", about = "Translate hand-landmark streams into text")]
struct Cli {
    /// JSON-lines landmark stream to replay
    #[arg(long)]
    frames: Option<PathBuf>,

    /// Shape template file for letter spelling (static mode)
    #[arg(long)]
    shapes: Option<PathBuf>,

    /// Gesture template file for word recognition (dynamic mode)
    #[arg(long)]
    gestures: Option<PathBuf>,

    /// Print one JSON frame result per line instead of the final text
    #[arg(long)]
    emit_frames: bool,

    /// Show version and exit
    #[arg(long)]
    version: bool,
}

/// One line of the replay stream.
#[derive(Debug, Deserialize)]
struct FrameRecord {
    /// Capture time in seconds.
    t: f64,
    /// 21 `[x, y, z]` landmarks, or null when no hand was detected.
    #[serde(default)]
    landmarks: Option<Vec<[f32; 3]>>,
    /// Clear the transcript before processing this frame.
    #[serde(default)]
    reset: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("signscribe {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "signscribe=info".into()),
        )
        .init();

    info!("signscribe v{} starting", env!("CARGO_PKG_VERSION"));

    let frames = cli.frames.context("--frames is required")?;
    info!("frame stream: {}", frames.display());

    let config = RecognizerConfig::default();

    let shapes = cli
        .shapes
        .as_deref()
        .map(TemplateShapeClassifier::from_file)
        .transpose()?
        .map(|c| Box::new(c) as Box<dyn ShapeClassifier>);
    let gestures = cli
        .gestures
        .as_deref()
        .map(|path| TemplateGestureClassifier::from_file(path, config.words.window_len))
        .transpose()?
        .map(|c| Box::new(c) as Box<dyn GestureClassifier>);

    let mut recognizer = Recognizer::new(&config, shapes, gestures)?;

    let file = File::open(&frames)
        .with_context(|| format!("opening frame stream {}", frames.display()))?;
    let reader = BufReader::new(file);

    let mut replayed = 0usize;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: FrameRecord = serde_json::from_str(&line)
            .with_context(|| format!("frame stream line {}", line_no + 1))?;

        if record.reset {
            recognizer.reset();
        }

        let landmarks = record
            .landmarks
            .as_deref()
            .and_then(HandLandmarks::from_points);
        let result = recognizer.process_frame(landmarks.as_ref(), record.t);
        replayed += 1;

        if cli.emit_frames {
            println!("{}", serde_json::to_string(&result)?);
        }
    }

    info!("Replayed {} frames", replayed);
    if !cli.emit_frames {
        println!("{}", recognizer.transcript());
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────
