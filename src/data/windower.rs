// ============================================================
// Layer 4 — Windower
// ============================================================
// Turns cleaned, punctuated text into labelled character
// windows. Two steps:
//
//   1. annotate() — strip terminal punctuation (. ! ?) and
//      record where each sentence ended in the stripped text.
//      The result is the unpunctuated stream the deployed
//      segmenter would actually see, plus ground truth.
//
//   2. windows() — slide a `window_size` character window by
//      `window_step` and label each window from the recorded
//      boundary offsets.
//
// Example with window_size=8, step=4:
//   Input:     "he left. she stayed."
//   Stripped:  "he left she stayed"
//               0123456789...
//   Boundary:  offset 6 (the 't' of "left")
//   Window 0:  "he left " → contains offset 6 → label 1
//   Window 4:  "eft she " → does not         → label 0
//
// A window that would run past the end of the text is not
// emitted — every sample has exactly `window_size` characters.
//
// Reference: Beeferman, Berger, Lafferty (1999)

use crate::domain::window::{ClassMode, WindowSample};

/// Unpunctuated text plus the boundary ground truth that was
/// erased from it.
#[derive(Debug, Clone)]
pub struct AnnotatedText {
    /// The text with sentence-terminal punctuation removed
    pub stripped: String,

    /// Offsets into `stripped`, ascending — each is the index of
    /// the LAST character of a sentence
    pub boundaries: Vec<usize>,
}

pub struct Windower {
    window_size: usize,
    window_step: usize,
    mode:        ClassMode,
}

impl Windower {
    /// Create a new Windower.
    ///
    /// # Panics
    /// Panics if `window_step` is zero, because the slide loop
    /// would never advance.
    pub fn new(window_size: usize, window_step: usize, mode: ClassMode) -> Self {
        assert!(window_step > 0, "window_step must be at least 1");
        assert!(window_size > 0, "window_size must be at least 1");
        Self { window_size, window_step, mode }
    }

    /// Strip terminal punctuation and record boundary offsets.
    ///
    /// Consecutive terminators ("..." or "?!") collapse into a
    /// single boundary. Whitespace following a terminator stays —
    /// the unpunctuated stream keeps its word spacing.
    pub fn annotate(&self, text: &str) -> AnnotatedText {
        let mut stripped   = String::with_capacity(text.len());
        let mut boundaries = Vec::new();

        for c in text.chars() {
            if matches!(c, '.' | '!' | '?') {
                // Boundary = last character emitted so far.
                // Nothing emitted yet (leading punctuation) or a
                // repeated terminator records nothing new.
                if !stripped.is_empty() {
                    let offset = stripped.len() - 1;
                    if boundaries.last() != Some(&offset) {
                        boundaries.push(offset);
                    }
                }
            } else {
                stripped.push(c);
            }
        }

        AnnotatedText { stripped, boundaries }
    }

    /// Slide the window over annotated text, emitting one labelled
    /// sample per position.
    pub fn windows(&self, annotated: &AnnotatedText) -> Vec<WindowSample> {
        let chars: &[u8] = annotated.stripped.as_bytes();

        if chars.len() < self.window_size {
            return Vec::new();
        }

        let mut samples = Vec::new();
        let mut start   = 0usize;

        while start + self.window_size <= chars.len() {
            let end = start + self.window_size;

            let in_window: Vec<usize> = annotated
                .boundaries
                .iter()
                .filter(|&&b| b >= start && b < end)
                .map(|&b| b - start)
                .collect();

            let targets = match self.mode {
                ClassMode::Binary => {
                    vec![if in_window.is_empty() { 0.0 } else { 1.0 }]
                }
                ClassMode::Multiclass => {
                    let mut t = vec![0.0f32; self.window_size];
                    for offset in &in_window {
                        t[*offset] = 1.0;
                    }
                    t
                }
            };

            samples.push(WindowSample::new(chars[start..end].to_vec(), targets));
            start += self.window_step;
        }

        samples
    }

    /// Convenience: annotate then window in one call.
    pub fn samples(&self, text: &str) -> Vec<WindowSample> {
        self.windows(&self.annotate(text))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotate_strips_and_records() {
        let w = Windower::new(8, 4, ClassMode::Binary);
        let a = w.annotate("he left. she stayed.");

        assert_eq!(a.stripped, "he left she stayed");
        // 't' of "left" is at offset 6, 'd' of "stayed" at 17
        assert_eq!(a.boundaries, vec![6, 17]);
    }

    #[test]
    fn test_annotate_collapses_repeated_terminators() {
        let w = Windower::new(8, 4, ClassMode::Binary);
        let a = w.annotate("wait... what?!");

        assert_eq!(a.stripped, "wait what");
        assert_eq!(a.boundaries, vec![3, 8]);
    }

    #[test]
    fn test_annotate_ignores_leading_punctuation() {
        let w = Windower::new(8, 4, ClassMode::Binary);
        let a = w.annotate("...start here");
        assert_eq!(a.stripped, "start here");
        assert!(a.boundaries.is_empty());
    }

    #[test]
    fn test_binary_labels() {
        let w = Windower::new(8, 4, ClassMode::Binary);
        let samples = w.samples("he left. she stayed.");

        // Window at 0 covers offsets 0..8, which contains boundary 6
        assert_eq!(samples[0].targets, vec![1.0]);
        // Window at 8 covers offsets 8..16 — no boundary there
        assert_eq!(samples[2].targets, vec![0.0]);
    }

    #[test]
    fn test_multiclass_labels_mark_positions() {
        let w = Windower::new(8, 4, ClassMode::Multiclass);
        let samples = w.samples("he left. she stayed.");

        // Boundary at absolute offset 6 → position 6 of window 0
        let expected: Vec<f32> = (0..8).map(|i| if i == 6 { 1.0 } else { 0.0 }).collect();
        assert_eq!(samples[0].targets, expected);

        // Same boundary → position 2 of the window starting at 4
        let expected: Vec<f32> = (0..8).map(|i| if i == 2 { 1.0 } else { 0.0 }).collect();
        assert_eq!(samples[1].targets, expected);
    }

    #[test]
    fn test_every_window_has_full_size() {
        let w = Windower::new(8, 4, ClassMode::Binary);
        for s in w.samples("a bc def. ghi jkl mno pqr") {
            assert_eq!(s.chars.len(), 8);
        }
    }

    #[test]
    fn test_short_text_gives_no_windows() {
        let w = Windower::new(56, 4, ClassMode::Binary);
        assert!(w.samples("too short.").is_empty());
    }

    #[test]
    #[should_panic]
    fn test_zero_step_panics() {
        let _ = Windower::new(8, 0, ClassMode::Binary);
    }
}
