// ============================================================
// Layer 3 — Document Domain Type
// ============================================================
// Represents a single corpus file loaded from disk.
// This is a plain data struct with no behaviour —
// just a source name and the raw text content.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// A raw corpus document loaded from disk.
/// By the time a Document is created, the bytes have been
/// decoded to a String but nothing has been cleaned yet —
/// punctuation is still present and is what the windower
/// later turns into boundary labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// The filename — kept for traceability so log lines
    /// can say which file a window came from
    pub source: String,

    /// The full text content of the document before any
    /// cleaning or boundary annotation
    pub text: String,
}

impl Document {
    /// Create a new Document with a source name and text content.
    /// Uses impl Into<String> so callers can pass &str or String.
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text:   text.into(),
        }
    }
}
