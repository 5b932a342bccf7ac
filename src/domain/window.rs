// ============================================================
// Layer 3 — Window Domain Types
// ============================================================
// The unit of training data for stage 1 of the segmenter:
// a fixed-length span of character codes plus a target vector
// saying whether (binary) or where (multiclass) a sentence
// boundary falls inside the span.
//
// The classifier never sees words or tokens — only raw 7-bit
// character codes. That is the whole trick of the windowed
// approach: boundary detection becomes a tiny sequence
// classification problem over characters.
//
// Reference: Beeferman, Berger, Lafferty (1999)
//            Statistical Models for Text Segmentation

use serde::{Deserialize, Serialize};

/// Which classification head the model carries.
///
/// Chosen once at configuration time, before the model is built.
/// The two variants differ in target shape, loss, and the width
/// of the recurrent layer (see `ml::model`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassMode {
    /// One sigmoid output: "is there a boundary anywhere in this window?"
    Binary,

    /// One sigmoid output per window position: "is position i a boundary?"
    Multiclass,
}

impl ClassMode {
    /// The tag used in artifact filenames.
    pub fn tag(self) -> &'static str {
        match self {
            ClassMode::Binary     => "binary",
            ClassMode::Multiclass => "multiclass",
        }
    }

    /// Output dimensionality of the classification head.
    pub fn output_dim(self, window_size: usize) -> usize {
        match self {
            ClassMode::Binary     => 1,
            ClassMode::Multiclass => window_size,
        }
    }
}

/// One training/evaluation example.
///
/// `chars` always has length `window_size` and every element is
/// < 128 (the preprocessor guarantees 7-bit input). `targets` has
/// length 1 in binary mode and `window_size` in multiclass mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSample {
    /// Character codes of the window, in text order
    pub chars: Vec<u8>,

    /// Target vector — {0.0, 1.0} entries
    pub targets: Vec<f32>,
}

impl WindowSample {
    pub fn new(chars: Vec<u8>, targets: Vec<f32>) -> Self {
        Self { chars, targets }
    }

    /// True if any boundary falls inside this window.
    /// Works for both modes — binary targets are a single entry.
    pub fn is_boundary(&self) -> bool {
        self.targets.iter().any(|&t| t > 0.5)
    }
}
