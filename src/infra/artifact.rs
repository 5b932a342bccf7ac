// ============================================================
// Layer 6 — Artifact Namer
// ============================================================
// Derives the final artifact's filename from the run's
// hyperparameters and its achieved accuracy:
//
//   <mode>_<embedding>_<lstm>_<accuracy>_<timestamp><ext>
//
// e.g.  binary_105_5880_0.87_1700000000.mpk.gz
//
// The timestamp has one-second resolution. Two runs finishing
// within the same second with identical hyperparameters and
// accuracy collide — a known quirk of the scheme, accepted
// rather than papered over with extra entropy.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::window::ClassMode;

/// Extension the recorder appends to everything it writes.
pub const ARTIFACT_EXT: &str = ".mpk.gz";

/// Artifact name without the extension — this is the path stem
/// handed to the recorder, which appends ARTIFACT_EXT itself.
pub fn artifact_stem(
    embedding_size: usize,
    lstm_size:      usize,
    accuracy:       f64,
    mode:           ClassMode,
    timestamp:      u64,
) -> String {
    format!(
        "{}_{}_{}_{}_{}",
        mode.tag(), embedding_size, lstm_size, accuracy, timestamp
    )
}

/// Full artifact filename, extension included.
pub fn artifact_name(
    embedding_size: usize,
    lstm_size:      usize,
    accuracy:       f64,
    mode:           ClassMode,
    timestamp:      u64,
) -> String {
    format!(
        "{}{}",
        artifact_stem(embedding_size, lstm_size, accuracy, mode, timestamp),
        ARTIFACT_EXT
    )
}

/// Seconds since the Unix epoch, truncated to a whole number.
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
