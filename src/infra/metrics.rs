// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records training metrics to a CSV file under the graph
// directory after each epoch. The CSV is the run's metrics sink:
// easy to plot, appendable across runs, and a permanent record
// of how a given artifact came to be.
//
// Metrics recorded per epoch:
//   - epoch:        the epoch number (1, 2, 3, ...)
//   - train_loss:   average training loss over the epoch's steps
//   - val_loss:     average loss on the held-out set
//   - val_accuracy: fraction of held-out samples classified
//                   correctly
//
// Output file: graph/metrics.csv

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};
use serde::{Deserialize, Serialize};

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Average loss over all training batches of the epoch
    pub train_loss: f64,

    /// Average loss on the held-out set
    /// Should track train_loss — divergence indicates overfitting
    pub val_loss: f64,

    /// Fraction of held-out samples classified correctly
    /// Range: [0.0, 1.0]
    pub val_accuracy: f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, train_loss: f64, val_loss: f64, val_accuracy: f64) -> Self {
        Self { epoch, train_loss, val_loss, val_accuracy }
    }
}

/// Logs epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    /// Full path to the CSV file
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");

        // Header only for a new file — appending across runs
        // keeps one continuous record
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,train_loss,val_loss,val_accuracy")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row in the CSV.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        writeln!(
            f,
            "{},{:.6},{:.6},{:.6}",
            m.epoch,
            m.train_loss,
            m.val_loss,
            m.val_accuracy,
        )?;

        tracing::debug!(
            "Logged epoch {} metrics: train_loss={:.4}, val_loss={:.4}",
            m.epoch,
            m.train_loss,
            m.val_loss,
        );

        Ok(())
    }

    /// Return the path to the metrics CSV file
    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}
