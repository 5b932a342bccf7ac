// ============================================================
// Layer 5 — Evaluator
// ============================================================
// Scores a model over a held-out dataset: average per-batch loss
// plus overall accuracy. The trainer calls this per epoch (for
// the validation metrics) and once at the end; the `evaluate`
// CLI command calls it again after reloading the final artifact,
// which must reproduce the end-of-run accuracy exactly — the
// recorder round-trips parameters at full precision and dropout
// is inert outside autodiff backends.

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    prelude::*,
};

use crate::data::{batcher::WindowBatcher, dataset::WindowDataset};
use crate::domain::window::WindowSample;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{ModelConfig, WindowClassifier};

pub type EvalBackend = burn::backend::NdArray;

/// Final held-out score and accuracy.
#[derive(Debug, Clone, Copy)]
pub struct EvalReport {
    /// Average per-batch loss
    pub score: f64,

    /// Fraction of correctly classified samples
    pub accuracy: f64,
}

/// Run the model over every sample in the dataset exactly once.
pub fn evaluate<B: Backend>(
    model:      &WindowClassifier<B>,
    dataset:    WindowDataset,
    batch_size: usize,
    device:     &B::Device,
) -> Result<EvalReport> {
    let batcher = WindowBatcher::<B>::new(device.clone());
    let loader  = DataLoaderBuilder::new(batcher)
        .batch_size(batch_size)
        .num_workers(1)
        .build(dataset);

    let mut loss_sum = 0.0f64;
    let mut batches  = 0usize;
    let mut correct  = 0usize;
    let mut total    = 0usize;

    for batch in loader.iter() {
        let n     = batch.targets.dims()[0];
        let probs = model.forward(batch.windows);

        loss_sum += model
            .loss(probs.clone(), batch.targets.clone())
            .into_scalar()
            .elem::<f64>();
        batches += 1;

        correct += model.num_correct(probs, batch.targets);
        total   += n;
    }

    let score    = if batches > 0 { loss_sum / batches as f64 } else { f64::NAN };
    let accuracy = if total > 0 { correct as f64 / total as f64 } else { 0.0 };

    Ok(EvalReport { score, accuracy })
}

// ─── Evaluator ────────────────────────────────────────────────────────────────
/// Reloads a finished run's final artifact and re-scores it.
pub struct Evaluator {
    model:      WindowClassifier<EvalBackend>,
    batch_size: usize,
    device:     burn::backend::ndarray::NdArrayDevice,
}

impl Evaluator {
    /// Rebuild the architecture from the persisted run config,
    /// then load the final artifact's weights into it.
    pub fn from_final_artifact(ckpt: &CheckpointManager) -> Result<Self> {
        let device = burn::backend::ndarray::NdArrayDevice::default();
        let cfg    = ckpt.load_config()?;

        let model_cfg = ModelConfig::new(cfg.window_size, cfg.embedding_size, cfg.lstm_size);
        let model: WindowClassifier<EvalBackend> = model_cfg.init(cfg.mode, &device);
        let model = ckpt.load_final(model, &device)?;

        tracing::info!("Model loaded from final artifact");
        Ok(Self { model, batch_size: cfg.batch_size, device })
    }

    pub fn evaluate(&self, samples: Vec<WindowSample>) -> Result<EvalReport> {
        evaluate(
            &self.model,
            WindowDataset::new(samples),
            self.batch_size,
            &self.device,
        )
    }
}
