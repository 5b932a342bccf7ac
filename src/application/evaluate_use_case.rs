// ============================================================
// Layer 2 — Evaluate Use Case
// ============================================================
// Reloads a finished run and re-scores it:
//   1. Read train_config.json to rebuild the architecture
//   2. Load the final artifact's weights into it
//   3. Load the frozen held-out set
//   4. Evaluate — the accuracy must match what training reported
//
// This is the round-trip check on the artifact pipeline: if the
// numbers differ, either the weights or the held-out set did not
// survive persistence intact.

use anyhow::Result;

use crate::infra::{checkpoint::CheckpointManager, heldout_store::HeldOutStore};
use crate::ml::evaluator::{EvalReport, Evaluator};

pub struct EvaluateUseCase {
    models_dir: String,
}

impl EvaluateUseCase {
    pub fn new(models_dir: String) -> Self {
        Self { models_dir }
    }

    pub fn execute(&self) -> Result<EvalReport> {
        let ckpt      = CheckpointManager::new(&self.models_dir);
        let evaluator = Evaluator::from_final_artifact(&ckpt)?;

        let held_out = HeldOutStore::new(&self.models_dir).load()?;
        tracing::info!("Scoring {} held-out samples", held_out.len());

        evaluator.evaluate(held_out)
    }
}
