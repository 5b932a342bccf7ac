// ============================================================
// Layer 5 — Epoch Hooks
// ============================================================
// Side effects of the training loop are modelled as an explicit
// list of observers rather than hard-wired calls: the trainer
// invokes every hook once after each epoch, in registration
// order. Two hooks ship with the system:
//
//   MetricsHook    → appends one CSV row under graph/
//   CheckpointHook → persists the model under models/,
//                    every epoch, whether or not the
//                    validation loss improved
//
// A hook failure is a run failure — there is no retry and no
// skipping, consistent with the loop's overall failure
// semantics.

use anyhow::Result;
use burn::tensor::backend::AutodiffBackend;

use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::WindowClassifier;

/// Observer invoked by the trainer after every epoch.
pub trait EpochHook<B: AutodiffBackend> {
    fn on_epoch_end(
        &mut self,
        epoch:   usize,
        model:   &WindowClassifier<B>,
        metrics: &EpochMetrics,
    ) -> Result<()>;
}

// ─── CheckpointHook ───────────────────────────────────────────────────────────
/// Persists the model after every epoch. Saving is unconditional:
/// a worse validation loss still produces a checkpoint, so every
/// epoch of a run can be recovered.
pub struct CheckpointHook {
    manager: CheckpointManager,
}

impl CheckpointHook {
    pub fn new(manager: CheckpointManager) -> Self {
        Self { manager }
    }
}

impl<B: AutodiffBackend> EpochHook<B> for CheckpointHook {
    fn on_epoch_end(
        &mut self,
        epoch:   usize,
        model:   &WindowClassifier<B>,
        metrics: &EpochMetrics,
    ) -> Result<()> {
        self.manager.save_epoch(model, epoch, metrics.val_loss)
    }
}

// ─── MetricsHook ──────────────────────────────────────────────────────────────
/// Appends the epoch's metrics to the CSV sink under graph/.
pub struct MetricsHook {
    logger: MetricsLogger,
}

impl MetricsHook {
    pub fn new(logger: MetricsLogger) -> Self {
        Self { logger }
    }
}

impl<B: AutodiffBackend> EpochHook<B> for MetricsHook {
    fn on_epoch_end(
        &mut self,
        _epoch:  usize,
        _model:  &WindowClassifier<B>,
        metrics: &EpochMetrics,
    ) -> Result<()> {
        self.logger.log(metrics)
    }
}
