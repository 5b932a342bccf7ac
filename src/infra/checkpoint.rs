// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores model weights using Burn's CompactRecorder.
//
// What gets written to the models directory:
//   weights.<epoch:02>-<val_loss:.2>.mpk.gz  ← one per epoch
//   <mode>_<emb>_<lstm>_<acc>_<ts>.mpk.gz    ← final artifact
//   final_artifact.json                      ← name of the above
//   train_config.json                        ← run hyperparameters
//
// The two weight templates are distinct by construction — an
// epoch checkpoint can never overwrite the final artifact.
//
// Why save the config separately?
//   When reloading for evaluation, the exact architecture
//   (window size, embedding size, recurrent width, mode) must be
//   rebuilt before the weights can be loaded into it.
//
// Burn's CompactRecorder:
//   - Serialises model parameters to MessagePack format
//   - Compresses with gzip
//   - Type-safe: loading fails if the architecture doesn't match
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
    tensor::backend::AutodiffBackend,
};

use crate::application::train_use_case::TrainConfig;
use crate::infra::artifact::ARTIFACT_EXT;
use crate::ml::model::WindowClassifier;

/// Manages saving and loading of model weights.
/// All files are stored in the configured directory.
#[derive(Clone)]
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager.
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl Into<String>) -> Self {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// Save an epoch checkpoint: `weights.<epoch:02>-<val_loss:.2>`.
    /// Called after EVERY epoch — there is no best-only filter.
    pub fn save_epoch<B: AutodiffBackend>(
        &self,
        model:    &WindowClassifier<B>,
        epoch:    usize,
        val_loss: f64,
    ) -> Result<()> {
        let path = self.dir.join(format!("weights.{epoch:02}-{val_loss:.2}"));

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| {
                format!("Failed to save checkpoint to '{}'", path.display())
            })?;

        tracing::debug!("Saved checkpoint: epoch {}", epoch);
        Ok(())
    }

    /// Save the final artifact under its namer-derived stem.
    pub fn save_final<B: AutodiffBackend>(
        &self,
        model: &WindowClassifier<B>,
        stem:  &str,
    ) -> Result<()> {
        let path = self.dir.join(stem);

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| {
                format!("Failed to save final artifact to '{}'", path.display())
            })?;

        tracing::info!("Saved final artifact '{}{}'", stem, ARTIFACT_EXT);
        Ok(())
    }

    /// Record which final artifact belongs to this run.
    pub fn save_final_pointer(&self, stem: &str) -> Result<()> {
        let path = self.dir.join("final_artifact.json");
        fs::write(&path, serde_json::to_string(&stem)?)
            .with_context(|| "Failed to write final_artifact.json")?;
        Ok(())
    }

    /// Load the final artifact's weights into a freshly built model.
    ///
    /// The model must have the architecture the artifact was saved
    /// with — rebuild it from the persisted config first.
    pub fn load_final<B: Backend>(
        &self,
        model:  WindowClassifier<B>,
        device: &B::Device,
    ) -> Result<WindowClassifier<B>> {
        let stem = self.final_stem()?;
        let path = self.dir.join(&stem);

        tracing::info!("Loading final artifact '{}'", stem);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!(
                    "Cannot load final artifact '{}'. Have you trained a model first?",
                    path.display()
                )
            })?;

        Ok(model.load_record(record))
    }

    /// Save the training configuration to JSON.
    /// Must be called before training starts so a later
    /// evaluation can reconstruct the exact architecture.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.dir.join("train_config.json");
        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    /// Load the training configuration from JSON.
    pub fn load_config(&self) -> Result<TrainConfig> {
        let path = self.dir.join("train_config.json");

        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read config from '{}'. \
                     Make sure you have run 'train' before 'evaluate'.",
                    path.display()
                )
            })?;

        Ok(serde_json::from_str(&json)?)
    }

    /// Read final_artifact.json and return the artifact stem.
    fn final_stem(&self) -> Result<String> {
        let path = self.dir.join("final_artifact.json");

        let s = fs::read_to_string(&path)
            .with_context(|| {
                "Cannot find 'final_artifact.json'. \
                 Have you run 'train' first?"
            })?;

        Ok(serde_json::from_str::<String>(&s)?)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::window::ClassMode;

    fn temp_dir(name: &str) -> String {
        let dir = std::env::temp_dir()
            .join(format!("boundary-windows-ckpt-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir.to_string_lossy().into_owned()
    }

    #[test]
    fn test_config_round_trip() {
        let dir  = temp_dir("config");
        let ckpt = CheckpointManager::new(&dir);

        let cfg = TrainConfig {
            mode: ClassMode::Multiclass,
            window_size: 32,
            ..TrainConfig::default()
        };
        ckpt.save_config(&cfg).unwrap();

        let loaded = ckpt.load_config().unwrap();
        assert_eq!(loaded.mode, ClassMode::Multiclass);
        assert_eq!(loaded.window_size, 32);
    }

    #[test]
    fn test_final_pointer_round_trip() {
        let dir  = temp_dir("pointer");
        let ckpt = CheckpointManager::new(&dir);

        ckpt.save_final_pointer("binary_105_5880_0.87_1700000000").unwrap();
        assert_eq!(
            ckpt.final_stem().unwrap(),
            "binary_105_5880_0.87_1700000000"
        );
    }

    #[test]
    fn test_load_config_before_train_fails() {
        let ckpt = CheckpointManager::new(temp_dir("missing"));
        assert!(ckpt.load_config().is_err());
    }
}
