// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Loads plain-text files from a directory. A corpus here is
// nothing more than a directory of .txt files with ordinary
// punctuation — the punctuation is the supervision signal the
// windower later converts into boundary labels.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O)

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::domain::document::Document;
use crate::domain::traits::DocumentSource;

/// Loads all .txt files from a given directory.
/// Implements the DocumentSource trait from Layer 3.
pub struct TextLoader {
    /// Path to the directory containing .txt files
    dir: String,
}

impl TextLoader {
    /// Create a new TextLoader pointed at a directory
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DocumentSource for TextLoader {
    fn load_all(&self) -> Result<Vec<Document>> {
        let dir = Path::new(&self.dir);

        // A missing directory yields an empty corpus rather than
        // a crash — the caller decides whether that is fatal.
        if !dir.exists() {
            tracing::warn!(
                "Corpus directory '{}' does not exist — returning empty corpus",
                self.dir
            );
            return Ok(Vec::new());
        }

        let mut docs = Vec::new();

        for entry in fs::read_dir(dir)
            .with_context(|| format!("Cannot read directory '{}'", self.dir))?
        {
            let entry = entry?;
            let path  = entry.path();

            if path.extension().and_then(|e| e.to_str()) == Some("txt") {
                match fs::read_to_string(&path) {
                    Ok(text) => {
                        let source = path
                            .file_name()
                            .and_then(|n| n.to_str())
                            .unwrap_or("unknown")
                            .to_string();

                        tracing::debug!("Loaded: {} ({} chars)", source, text.len());
                        docs.push(Document::new(source, text));
                    }
                    // Log a warning but continue — don't fail on one bad file
                    Err(e) => {
                        tracing::warn!("Skipping '{}': {}", path.display(), e);
                    }
                }
            }
        }

        tracing::info!("Successfully loaded {} documents", docs.len());
        Ok(docs)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_directory_gives_empty_corpus() {
        let loader = TextLoader::new("definitely/not/a/real/path");
        let docs   = loader.load_all().unwrap();
        assert!(docs.is_empty());
    }
}
