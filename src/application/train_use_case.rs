// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load .txt corpus files       (Layer 4 - data)
//   Step 2: Clean to 7-bit text          (Layer 4 - data)
//   Step 3: Annotate + window            (Layer 4 - data)
//   Step 4: Carve off the held-out set   (Layer 4 - data)
//   Step 5: Class-balancing precompute   (Layer 4 - data)
//   Step 6: Build the batch stream       (Layer 4 - data)
//   Step 7: Persist config + held-out    (Layer 6 - infra)
//   Step 8: Register epoch hooks         (Layer 5 - ml)
//   Step 9: Run training loop            (Layer 5 - ml)
//
// Reference: Burn Book §5 (Training)

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::{
    balance::precompute,
    generator::WindowBatchStream,
    loader::TextLoader,
    preprocessor::Preprocessor,
    splitter::split_held_out,
    windower::Windower,
};
use crate::domain::traits::DocumentSource;
use crate::domain::window::{ClassMode, WindowSample};
use crate::infra::{
    checkpoint::CheckpointManager,
    heldout_store::HeldOutStore,
    metrics::MetricsLogger,
};
use crate::ml::hooks::{CheckpointHook, EpochHook, MetricsHook};
use crate::ml::trainer::{run_training, TrainBackend, TrainOutcome};

// ─── Training Configuration ──────────────────────────────────────────────────
// All parameters for a training run, fixed before the model is
// built and never mutated afterwards. Serialisable so the run's
// exact architecture can be rebuilt for later evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub corpus_dir:        String,
    pub models_dir:        String,
    pub graph_dir:         String,
    pub mode:              ClassMode,
    /// Window length in characters
    pub window_size:       usize,
    /// Characters the window advances between samples
    pub window_step:       usize,
    pub batch_size:        usize,
    /// Recurrent width of the binary head — the multiclass head
    /// pins its own width (see ml::model)
    pub lstm_size:         usize,
    pub embedding_size:    usize,
    pub epochs:            usize,
    pub lr:                f64,
    /// Fraction of windows frozen for evaluation, split off
    /// before balancing
    pub held_out_fraction: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            corpus_dir:        "corpus".to_string(),
            models_dir:        "models".to_string(),
            graph_dir:         "graph".to_string(),
            mode:              ClassMode::Binary,
            window_size:       56,
            window_step:       4,
            batch_size:        100,
            lstm_size:         5880,
            embedding_size:    105,
            epochs:            20,
            lr:                1e-3,
            held_out_fraction: 0.1,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full training pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end.
    pub fn execute(&self) -> Result<TrainOutcome> {
        let cfg = &self.config;

        anyhow::ensure!(cfg.batch_size > 0, "batch_size must be positive");
        anyhow::ensure!(cfg.window_step > 0, "window_step must be positive");
        anyhow::ensure!(cfg.window_size > 0, "window_size must be positive");

        // ── Step 1: Load the corpus ───────────────────────────────────────────
        tracing::info!("Loading .txt files from '{}'", cfg.corpus_dir);
        let loader   = TextLoader::new(&cfg.corpus_dir);
        let raw_docs = loader.load_all()?;
        anyhow::ensure!(
            !raw_docs.is_empty(),
            "No .txt documents found in '{}'",
            cfg.corpus_dir
        );

        // ── Step 2 + 3: Clean, annotate, window ───────────────────────────────
        // The windower strips the punctuation the preprocessor
        // left in place and turns it into boundary labels.
        let prep     = Preprocessor::new();
        let windower = Windower::new(cfg.window_size, cfg.window_step, cfg.mode);

        let samples: Vec<WindowSample> = raw_docs
            .iter()
            .flat_map(|d| windower.samples(&prep.clean(&d.text)))
            .collect();
        tracing::info!("Generated {} windows", samples.len());

        // ── Step 4: Held-out split, BEFORE balancing ──────────────────────────
        // The held-out set keeps the natural class distribution.
        let (train_samples, held_out) = split_held_out(samples, cfg.held_out_fraction);
        tracing::info!(
            "Split: {} train, {} held out",
            train_samples.len(),
            held_out.len()
        );

        // ── Step 5: Balancing plan ────────────────────────────────────────────
        // Balance the binary stream only — the multiclass head
        // trains on the raw distribution.
        let balance = cfg.mode == ClassMode::Binary;
        let plan    = precompute(&train_samples, balance);

        // ── Step 6: Batch stream ──────────────────────────────────────────────
        let mut stream = WindowBatchStream::new(train_samples, &plan, cfg.batch_size);

        // ── Step 7: Persist run metadata ──────────────────────────────────────
        // Config and held-out set must be on disk before training
        // so a crash mid-run still leaves a usable models dir.
        let ckpt = CheckpointManager::new(&cfg.models_dir);
        ckpt.save_config(cfg)?;
        HeldOutStore::new(&cfg.models_dir).save(&held_out)?;

        // ── Step 8: Epoch hooks ───────────────────────────────────────────────
        let mut hooks: Vec<Box<dyn EpochHook<TrainBackend>>> = vec![
            Box::new(MetricsHook::new(MetricsLogger::new(&cfg.graph_dir)?)),
            Box::new(CheckpointHook::new(ckpt.clone())),
        ];

        // ── Step 9: Run training loop (Layer 5) ───────────────────────────────
        run_training(cfg, &mut stream, held_out, &mut hooks, &ckpt)
    }
}
