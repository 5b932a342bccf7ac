// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (training a classifier, or re-scoring a
// finished one).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No UI or printing here (that's Layer 1)
//   - No direct file access (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern

// The training workflow
pub mod train_use_case;

// The evaluation workflow (reload final artifact, re-score)
pub mod evaluate_use_case;
