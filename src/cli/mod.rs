// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `train`    — trains the window classifier on a corpus
//   2. `evaluate` — reloads the final artifact and re-scores it
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, EvaluateArgs, TrainArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "boundary-windows",
    version = "0.1.0",
    about = "Train a sentence-boundary window classifier over unpunctuated text."
)]
pub struct Cli {
    /// The subcommand to run (train or evaluate)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)    => self.run_train(args),
            Commands::Evaluate(args) => self.run_evaluate(args),
        }
    }

    /// Handles the `train` subcommand.
    fn run_train(&self, args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training on corpus in: {}", args.corpus_dir);

        // Convert CLI args → application config (separates presentation from domain)
        let use_case = TrainUseCase::new(args.into());
        let outcome  = use_case.execute()?;

        println!(
            "Training complete. Final artifact: {} (accuracy {:.4})",
            outcome.artifact, outcome.accuracy
        );
        Ok(())
    }

    /// Handles the `evaluate` subcommand.
    fn run_evaluate(&self, args: EvaluateArgs) -> Result<()> {
        use crate::application::evaluate_use_case::EvaluateUseCase;

        let use_case = EvaluateUseCase::new(args.models_dir.clone());
        let report   = use_case.execute()?;

        println!("Test score: {}", report.score);
        println!("Test accuracy: {}", report.accuracy);
        Ok(())
    }
}
