// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Forces raw corpus text into the character space the model
// consumes. The embedding table has exactly 128 rows, so every
// character that reaches the windower must be a 7-bit code.
//
// Cleaning steps (applied in order):
//   1. Map tabs, carriage returns, and control characters to
//      plain whitespace
//   2. Replace every non-ASCII character with a space —
//      the model is ASCII-only by construction
//   3. Collapse runs of spaces within each line
//   4. Trim each line and drop empty lines
//
// Newlines are preserved as sentence-external whitespace;
// they count as ordinary characters (code 10) inside windows.
//
// Reference: Rust Book §8 (Strings in Rust)

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Clean a raw text string down to 7-bit characters.
    pub fn clean(&self, text: &str) -> String {
        // ── Step 1: Normalise individual characters ───────────────────────────
        let mapped: String = text
            .chars()
            .map(|c| match c {
                '\t' => ' ',
                // Windows carriage return → Unix newline
                '\r' => '\n',
                // Any other control character (except newline) → space
                c if c.is_control() && c != '\n' => ' ',
                // Outside the 128-code vocabulary → space
                c if !c.is_ascii() => ' ',
                c => c,
            })
            .collect();

        // ── Step 2: Collapse spaces and trim, line by line ────────────────────
        let lines: Vec<String> = mapped
            .lines()
            .map(|line| {
                let mut out        = String::with_capacity(line.len());
                let mut last_space = false;

                for c in line.chars() {
                    if c == ' ' {
                        if !last_space {
                            out.push(' ');
                        }
                        last_space = true;
                    } else {
                        out.push(c);
                        last_space = false;
                    }
                }

                out.trim().to_string()
            })
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_multiple_spaces() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("hello   world"), "hello world");
    }

    #[test]
    fn test_trims_edges() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("  hello world  "), "hello world");
    }

    #[test]
    fn test_replaces_non_ascii() {
        let p = Preprocessor::new();
        // 'é' is outside the 128-code vocabulary and must not survive
        let cleaned = p.clean("caf\u{00E9} open");
        assert!(cleaned.is_ascii());
        assert_eq!(cleaned, "caf open");
    }

    #[test]
    fn test_removes_control_chars() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("hello\x01world"), "hello world");
    }

    #[test]
    fn test_drops_empty_lines() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("line1\n\n\nline2"), "line1\nline2");
    }

    #[test]
    fn test_empty_string() {
        let p = Preprocessor::new();
        assert_eq!(p.clean(""), "");
    }

    #[test]
    fn test_output_is_always_ascii() {
        let p = Preprocessor::new();
        assert!(p.clean("日本語 mixed with ascii").is_ascii());
    }
}
