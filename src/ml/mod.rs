// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn framework specific code.
// No other layer imports from burn directly — except the data
// layer's Dataset/Batcher implementations.
//
// What's in this layer:
//
//   model.rs     — The window classifier architecture:
//                  • 128-row character embedding
//                  • LSTM over the window sequence
//                  • Dropout on the LSTM's input and output
//                  • Sigmoid head (1 output for binary,
//                    window_size outputs for multiclass)
//                  plus the loss and accuracy definitions
//                  for both class modes
//
//   trainer.rs   — The training loop
//                  Handles step counting (N / batch_size,
//                  truncating), forward/backward/Adam updates,
//                  per-epoch hook dispatch, and the final
//                  held-out evaluation and artifact save
//
//   hooks.rs     — Epoch observers invoked after every epoch:
//                  metrics CSV row and unconditional checkpoint
//
//   evaluator.rs — Held-out evaluation, plus reloading a final
//                  artifact for a later evaluation run
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Hochreiter & Schmidhuber (1997) LSTM

/// Window classifier architecture, loss, and accuracy
pub mod model;

/// Training loop with per-epoch hooks and final evaluation
pub mod trainer;

/// Epoch observer hooks (metrics, checkpointing)
pub mod hooks;

/// Held-out evaluation and final-artifact reloading
pub mod evaluator;
