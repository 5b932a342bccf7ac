// ============================================================
// Layer 6 — Held-Out Store
// ============================================================
// Persists the held-out evaluation set at training time. The
// held-out split is random, so without freezing it a later
// `evaluate` run would score the reloaded model against a
// DIFFERENT random subset and the round-trip accuracy check
// would be meaningless.
//
// Output file: models/heldout.json

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::window::WindowSample;

pub struct HeldOutStore {
    dir: PathBuf,
}

impl HeldOutStore {
    /// Create a new HeldOutStore.
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl Into<String>) -> Self {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// Freeze the held-out set for this run.
    pub fn save(&self, samples: &[WindowSample]) -> Result<()> {
        let path = self.dir.join("heldout.json");
        let json = serde_json::to_string(samples)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write held-out set to '{}'", path.display()))?;

        tracing::debug!("Froze {} held-out samples", samples.len());
        Ok(())
    }

    /// Load the frozen held-out set.
    pub fn load(&self) -> Result<Vec<WindowSample>> {
        let path = self.dir.join("heldout.json");

        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read held-out set from '{}'. \
                     Make sure you have run 'train' before 'evaluate'.",
                    path.display()
                )
            })?;

        Ok(serde_json::from_str(&json)?)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> String {
        let dir = std::env::temp_dir()
            .join(format!("boundary-windows-heldout-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir.to_string_lossy().into_owned()
    }

    #[test]
    fn test_round_trip() {
        let store = HeldOutStore::new(temp_dir("round-trip"));

        let samples = vec![
            WindowSample::new(vec![104, 105], vec![1.0]),
            WindowSample::new(vec![110, 111], vec![0.0]),
        ];
        store.save(&samples).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].chars, vec![104, 105]);
        assert_eq!(loaded[0].targets, vec![1.0]);
    }

    #[test]
    fn test_load_before_save_fails() {
        let store = HeldOutStore::new(temp_dir("missing"));
        assert!(store.load().is_err());
    }
}
