// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `evaluate`
// and all their configurable flags. Every flag's default is the
// hyperparameter the classifier normally trains with — running
// plain `boundary-windows train` reproduces the reference run.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::train_use_case::TrainConfig;
use crate::domain::window::ClassMode;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the window classifier on a directory of .txt files
    Train(TrainArgs),

    /// Reload the final artifact and re-score the held-out set
    Evaluate(EvaluateArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Directory containing .txt corpus files to train on
    #[arg(long, default_value = "corpus")]
    pub corpus_dir: String,

    /// Directory for checkpoints and the final artifact
    #[arg(long, default_value = "models")]
    pub models_dir: String,

    /// Directory for the per-epoch metrics CSV
    #[arg(long, default_value = "graph")]
    pub graph_dir: String,

    /// Train the per-position multiclass head instead of the
    /// binary boundary-presence head
    #[arg(long)]
    pub multiclass: bool,

    /// Window length in characters
    #[arg(long, default_value_t = 56)]
    pub window_size: usize,

    /// Characters the window advances between samples
    #[arg(long, default_value_t = 4)]
    pub window_step: usize,

    /// Number of samples per training step
    #[arg(long, default_value_t = 100)]
    pub batch_size: usize,

    /// Recurrent width of the binary head
    #[arg(long, default_value_t = 5880)]
    pub lstm_size: usize,

    /// Dimensionality of the character embedding
    #[arg(long, default_value_t = 105)]
    pub embedding_size: usize,

    /// Number of full passes over the balanced sample pool
    #[arg(long, default_value_t = 20)]
    pub epochs: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Fraction of windows frozen for held-out evaluation
    #[arg(long, default_value_t = 0.1)]
    pub held_out_fraction: f64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            corpus_dir:        a.corpus_dir,
            models_dir:        a.models_dir,
            graph_dir:         a.graph_dir,
            mode:              if a.multiclass { ClassMode::Multiclass } else { ClassMode::Binary },
            window_size:       a.window_size,
            window_step:       a.window_step,
            batch_size:        a.batch_size,
            lstm_size:         a.lstm_size,
            embedding_size:    a.embedding_size,
            epochs:            a.epochs,
            lr:                a.lr,
            held_out_fraction: a.held_out_fraction,
        }
    }
}

/// All arguments for the `evaluate` command
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Directory where the run's artifacts were saved
    #[arg(long, default_value = "models")]
    pub models_dir: String,
}
