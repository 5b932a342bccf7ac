// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Runs `epochs` sequential passes over the batch stream, with
// exactly N / batch_size steps per epoch. The division truncates
// on purpose: a remainder smaller than one batch is dropped, so
// N=1005 with batch_size=100 gives 10 steps, not 10.05. The step
// count is computed once, before the first epoch, and N=0 simply
// means zero steps — never a division error.
//
// After every epoch the held-out set is scored and each
// registered EpochHook fires (metrics row, checkpoint). After
// ALL epochs the model is evaluated once more and the final
// artifact is written under its hyperparameter-derived name.
//
// Failure semantics: no retries. A shape error or NaN loss
// propagates out of the numeric framework and aborts the run;
// a crash mid-epoch loses only what the last per-epoch
// checkpoint did not capture.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::WindowBatcher, dataset::WindowDataset, generator::WindowBatchStream};
use crate::domain::window::{ClassMode, WindowSample};
use crate::infra::artifact::{artifact_name, artifact_stem, unix_timestamp};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::metrics::EpochMetrics;
use crate::ml::evaluator::evaluate;
use crate::ml::hooks::EpochHook;
use crate::ml::model::ModelConfig;

pub type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;
pub type ValidBackend = burn::backend::NdArray;

/// What a completed run hands back to the caller.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    /// Final held-out loss
    pub score: f64,

    /// Final held-out accuracy
    pub accuracy: f64,

    /// Filename of the final artifact under the models directory
    pub artifact: String,
}

/// Steps per epoch: N / batch_size, truncating.
///
/// The remainder is dropped deliberately — a partial batch is
/// never trained on. A zero batch size yields zero steps here;
/// the run itself rejects it up front as a configuration error.
pub fn steps_per_epoch(total: usize, batch_size: usize) -> usize {
    if batch_size == 0 {
        return 0;
    }
    total / batch_size
}

pub fn run_training(
    cfg:      &TrainConfig,
    stream:   &mut WindowBatchStream,
    held_out: Vec<WindowSample>,
    hooks:    &mut [Box<dyn EpochHook<TrainBackend>>],
    ckpt:     &CheckpointManager,
) -> Result<TrainOutcome> {
    anyhow::ensure!(cfg.batch_size > 0, "batch_size must be positive");

    let device = burn::backend::ndarray::NdArrayDevice::default();

    // ── Build model ───────────────────────────────────────────────────────────
    // The builder prints its architecture diagram as it runs.
    let model_cfg = ModelConfig::new(cfg.window_size, cfg.embedding_size, cfg.lstm_size);
    let mut model = model_cfg.init::<TrainBackend>(cfg.mode, &device);

    // ── Adam optimiser ────────────────────────────────────────────────────────
    // m = β1*m + (1-β1)*g        (mean)
    // v = β2*v + (1-β2)*g²       (variance)
    // θ = θ - lr * m / (√v + ε)  (update)
    let optim_cfg = AdamConfig::new().with_epsilon(1e-8);
    let mut optim = optim_cfg.init();

    // ── Step count, fixed for the whole run ───────────────────────────────────
    let steps = steps_per_epoch(stream.total(), cfg.batch_size);
    if steps == 0 {
        tracing::warn!(
            "Zero training steps per epoch (N={}, batch_size={}) — weights will not move",
            stream.total(),
            cfg.batch_size
        );
    }

    let train_batcher = WindowBatcher::<TrainBackend>::new(device.clone());

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=cfg.epochs {
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;

        for _step in 0..steps {
            let batch = train_batcher.batch(stream.next_batch());

            let probs = model.forward(batch.windows);
            let loss  = model.loss(probs, batch.targets);

            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();
            train_loss_sum += loss_val;
            train_batches  += 1;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(cfg.lr, model, grads);
        }

        let avg_train_loss = if train_batches > 0 {
            train_loss_sum / train_batches as f64
        } else { f64::NAN };

        // ── Validation pass ───────────────────────────────────────────────────
        // model.valid() → WindowClassifier<ValidBackend>
        // dropout disabled for deterministic evaluation
        let report = evaluate(
            &model.valid(),
            WindowDataset::new(held_out.clone()),
            cfg.batch_size,
            &device,
        )?;

        println!(
            "Epoch {:>3}/{} | train_loss={:.4} | val_loss={:.4} | val_acc={:.1}%",
            epoch, cfg.epochs, avg_train_loss, report.score, report.accuracy * 100.0,
        );

        // ── Hooks: metrics row + unconditional checkpoint ─────────────────────
        let metrics = EpochMetrics::new(epoch, avg_train_loss, report.score, report.accuracy);
        for hook in hooks.iter_mut() {
            hook.on_epoch_end(epoch, &model, &metrics)?;
        }
    }

    // ── Final evaluation, once, after all epochs ──────────────────────────────
    let report = evaluate(
        &model.valid(),
        WindowDataset::new(held_out),
        cfg.batch_size,
        &device,
    )?;

    // ── Final artifact ────────────────────────────────────────────────────────
    let timestamp = unix_timestamp();
    let stem = artifact_stem(cfg.embedding_size, cfg.lstm_size, report.accuracy, cfg.mode, timestamp);
    let name = artifact_name(cfg.embedding_size, cfg.lstm_size, report.accuracy, cfg.mode, timestamp);
    ckpt.save_final(&model, &stem)?;
    ckpt.save_final_pointer(&stem)?;

    println!("\n{} Results {}", "+".repeat(20), "+".repeat(20));
    println!("{}", model.describe());
    println!("Test score: {}", report.score);
    println!("Test accuracy: {}", report.accuracy);

    tracing::info!("Training complete, final artifact '{}'", name);

    Ok(TrainOutcome {
        score:    report.score,
        accuracy: report.accuracy,
        artifact: name,
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::balance::precompute;
    use crate::ml::hooks::EpochHook;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn temp_dir(name: &str) -> String {
        let dir = std::env::temp_dir()
            .join(format!("boundary-windows-trainer-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir.to_string_lossy().into_owned()
    }

    fn tiny_config(models_dir: String) -> TrainConfig {
        TrainConfig {
            corpus_dir:        "unused".to_string(),
            models_dir,
            graph_dir:         "unused".to_string(),
            mode:              ClassMode::Binary,
            window_size:       8,
            window_step:       4,
            batch_size:        2,
            lstm_size:         3,
            embedding_size:    4,
            epochs:            2,
            lr:                1e-3,
            held_out_fraction: 0.1,
        }
    }

    fn sample(boundary: bool) -> WindowSample {
        WindowSample::new(
            (0..8).map(|i| (97 + i) as u8).collect(),
            vec![if boundary { 1.0 } else { 0.0 }],
        )
    }

    struct CountingHook {
        calls: Rc<RefCell<usize>>,
    }

    impl EpochHook<TrainBackend> for CountingHook {
        fn on_epoch_end(
            &mut self,
            _epoch:   usize,
            _model:   &crate::ml::model::WindowClassifier<TrainBackend>,
            _metrics: &EpochMetrics,
        ) -> Result<()> {
            *self.calls.borrow_mut() += 1;
            Ok(())
        }
    }

    #[test]
    fn test_steps_per_epoch_truncates() {
        // 1005 / 100 → 10 steps, the 5-sample remainder is dropped
        assert_eq!(steps_per_epoch(1005, 100), 10);
        assert_eq!(steps_per_epoch(200,  100), 2);
        assert_eq!(steps_per_epoch(99,   100), 0);
        assert_eq!(steps_per_epoch(100,  100), 1);
    }

    #[test]
    fn test_steps_per_epoch_zero_n() {
        assert_eq!(steps_per_epoch(0, 100), 0);
    }

    #[test]
    fn test_steps_per_epoch_zero_batch_size() {
        assert_eq!(steps_per_epoch(10, 0), 0);
    }

    #[test]
    fn test_run_performs_exact_step_count() {
        let cfg  = tiny_config(temp_dir("steps"));
        let ckpt = CheckpointManager::new(&cfg.models_dir);

        // N=5, batch_size=2 → 2 steps per epoch, 2 epochs → 4 batches
        let samples: Vec<WindowSample> =
            (0..5).map(|i| sample(i % 2 == 0)).collect();
        let plan       = precompute(&samples, false);
        let mut stream = WindowBatchStream::new(samples, &plan, cfg.batch_size);

        let calls = Rc::new(RefCell::new(0usize));
        let mut hooks: Vec<Box<dyn EpochHook<TrainBackend>>> =
            vec![Box::new(CountingHook { calls: Rc::clone(&calls) })];

        let held_out = vec![sample(true), sample(false)];
        let outcome  = run_training(&cfg, &mut stream, held_out, &mut hooks, &ckpt).unwrap();

        assert_eq!(stream.batches_served(), 4);
        // One hook invocation per epoch
        assert_eq!(*calls.borrow(), 2);
        assert!(outcome.artifact.starts_with("binary_4_3_"));
    }

    #[test]
    fn test_zero_samples_runs_zero_steps() {
        let cfg  = tiny_config(temp_dir("zero-n"));
        let ckpt = CheckpointManager::new(&cfg.models_dir);

        let plan       = precompute(&[], false);
        let mut stream = WindowBatchStream::new(Vec::new(), &plan, cfg.batch_size);

        let calls = Rc::new(RefCell::new(0usize));
        let mut hooks: Vec<Box<dyn EpochHook<TrainBackend>>> =
            vec![Box::new(CountingHook { calls: Rc::clone(&calls) })];

        let held_out = vec![sample(true), sample(false)];
        let outcome  = run_training(&cfg, &mut stream, held_out, &mut hooks, &ckpt);

        assert!(outcome.is_ok());
        assert_eq!(stream.batches_served(), 0);
        assert_eq!(*calls.borrow(), 2);
    }

    #[test]
    fn test_zero_batch_size_is_a_config_error() {
        let mut cfg    = tiny_config(temp_dir("zero-batch"));
        cfg.batch_size = 0;
        let ckpt       = CheckpointManager::new(&cfg.models_dir);

        let plan       = precompute(&[], false);
        let mut stream = WindowBatchStream::new(Vec::new(), &plan, 1);
        let mut hooks: Vec<Box<dyn EpochHook<TrainBackend>>> = Vec::new();

        let outcome = run_training(&cfg, &mut stream, Vec::new(), &mut hooks, &ckpt);
        assert!(outcome.is_err());
    }
}
