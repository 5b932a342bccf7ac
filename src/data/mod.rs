// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// This layer handles everything from raw .txt files all the
// way to tensor batches.
//
// The pipeline flows in this order:
//
//   .txt files
//       │
//       ▼
//   TextLoader        → reads files, yields raw text
//       │
//       ▼
//   Preprocessor      → forces text into the 7-bit character space
//       │
//       ▼
//   Windower          → strips terminal punctuation, records
//       │               boundary offsets, slides a character
//       │               window to produce labelled samples
//       ▼
//   split_held_out    → carves off the evaluation set
//       │
//       ▼
//   precompute        → class-balancing plan and total count N
//       │
//       ▼
//   WindowBatchStream → infinite, restartable stream of batches
//       │
//       ▼
//   WindowBatcher     → stacks samples into tensor batches
//
// The held-out path goes through WindowDataset + DataLoader
// instead of the stream, so evaluation sees every sample
// exactly once.
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Loads .txt files from a directory
pub mod loader;

/// Forces raw text into the 128-code character space
pub mod preprocessor;

/// Boundary annotation and sliding-window sample generation
pub mod windower;

/// Class-balancing metadata (larger class, items to drop, N)
pub mod balance;

/// Infinite restartable batch stream over balanced samples
pub mod generator;

/// Implements Burn's Dataset trait for window samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Shuffles samples and carves off the held-out set
pub mod splitter;
