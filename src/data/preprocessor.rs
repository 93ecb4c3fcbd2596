// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Cleans and tokenises raw sentence text before embedding
// lookup. The pretrained vector files are lowercase word
// tables, so the tokeniser lowercases and strips punctuation
// from word edges; inner apostrophes ("don't") survive.
//
// Steps, in order:
//   1. Replace unicode whitespace variants with plain space
//   2. Drop control characters
//   3. Split on whitespace
//   4. Trim leading/trailing punctuation per word, lowercase
//   5. Drop words that were punctuation-only

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Normalise whitespace and remove control characters.
    pub fn clean(&self, text: &str) -> String {
        text.chars()
            .map(|c| {
                if c == '\u{00A0}' || c == '\u{200B}' || c == '\t' || c == '\r' || c == '\n' {
                    ' '
                } else {
                    c
                }
            })
            .filter(|c| !c.is_control())
            .collect()
    }

    /// Clean and split a sentence into lowercase word tokens.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.clean(text)
            .split_whitespace()
            .map(|w| {
                w.trim_matches(|c: char| c.is_ascii_punctuation())
                    .to_lowercase()
            })
            .filter(|w| !w.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_lowercases_and_strips_punctuation() {
        let p = Preprocessor::new();
        assert_eq!(
            p.tokenize("A man, inspecting the uniform."),
            vec!["a", "man", "inspecting", "the", "uniform"],
        );
    }

    #[test]
    fn tokenize_keeps_inner_apostrophes() {
        let p = Preprocessor::new();
        assert_eq!(p.tokenize("Don't stop!"), vec!["don't", "stop"]);
    }

    #[test]
    fn tokenize_handles_odd_whitespace() {
        let p = Preprocessor::new();
        assert_eq!(
            p.tokenize("two\u{00A0}dogs\t run"),
            vec!["two", "dogs", "run"],
        );
    }

    #[test]
    fn tokenize_empty_input() {
        let p = Preprocessor::new();
        assert!(p.tokenize("  ... !!").is_empty());
    }
}
