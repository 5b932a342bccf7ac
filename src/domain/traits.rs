// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them:
//   - TextLoader implements DocumentSource
//   - A future WikiDumpLoader could also implement it
//   - The application layer only ever sees DocumentSource
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::document::Document;

// ─── DocumentSource ───────────────────────────────────────────────────────────
/// Any component that can load corpus documents from a source.
///
/// Implementations:
///   - TextLoader → loads from a directory of .txt files
pub trait DocumentSource {
    /// Load all available documents from this source.
    fn load_all(&self) -> Result<Vec<Document>>;
}
