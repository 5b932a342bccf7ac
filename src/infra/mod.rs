// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns:
//
//   checkpoint.rs    — Saving and loading model weights with
//                      Burn's CompactRecorder, under two
//                      deliberately distinct path templates:
//                      per-epoch `weights.<epoch>-<val_loss>`
//                      snapshots and the hyperparameter-named
//                      final artifact. Also persists the run
//                      config as JSON so a later evaluation can
//                      rebuild the exact architecture.
//
//   artifact.rs      — The artifact namer: a pure function from
//                      hyperparameters + accuracy + a wall-clock
//                      second to the final artifact name.
//
//   heldout_store.rs — Held-out set persistence. The evaluation
//                      set is frozen at training time so that a
//                      reloaded model is scored on the identical
//                      samples.
//
//   metrics.rs       — Per-epoch metrics CSV under graph/.
//
// All writers create their target directory with create_dir_all;
// nothing here assumes pre-existing directories.
//
// Reference: Burn Book §5 (Records and Checkpointing)

/// Model checkpoint and run-config persistence
pub mod checkpoint;

/// Final-artifact naming
pub mod artifact;

/// Held-out evaluation set persistence
pub mod heldout_store;

/// Training metrics CSV logger
pub mod metrics;
