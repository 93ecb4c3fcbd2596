// ============================================================
// Layer 4 — SNLI Loader
// ============================================================
// Reads an SNLI-format JSONL file: one JSON object per line
// with at least these fields:
//
//   {"gold_label": "entailment",
//    "sentence1":  "the premise ...",
//    "sentence2":  "the hypothesis ..."}
//
// Two kinds of line are skipped rather than failing the run:
//   - gold_label "-" — annotators disagreed, no usable target
//   - malformed JSON — logged as a warning
//
// A missing file IS an error: unlike an optional document
// corpus, training without data is never meaningful.
//
// Reference: Bowman et al. (2015) SNLI corpus paper

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs::File,
    io::{BufRead, BufReader},
};

use crate::domain::label::EntailmentLabel;
use crate::domain::sentence_pair::SentencePair;
use crate::domain::traits::ExampleSource;

/// Loads labelled sentence pairs from one SNLI JSONL file.
pub struct SnliLoader {
    path: String,
}

impl SnliLoader {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// The subset of SNLI fields this system consumes. serde
/// ignores the rest (parse trees, annotator labels, ids).
#[derive(Debug, Deserialize)]
struct SnliRecord {
    gold_label: String,
    sentence1:  String,
    sentence2:  String,
}

impl ExampleSource for SnliLoader {
    fn load_all(&self) -> Result<Vec<SentencePair>> {
        let file = File::open(&self.path)
            .with_context(|| format!("cannot open SNLI file '{}'", self.path))?;

        let mut pairs   = Vec::new();
        let mut skipped = 0usize;

        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = line
                .with_context(|| format!("read error in '{}' at line {}", self.path, line_no + 1))?;
            if line.trim().is_empty() {
                continue;
            }

            let record: SnliRecord = match serde_json::from_str(&line) {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!("Skipping malformed line {} in '{}': {}", line_no + 1, self.path, e);
                    continue;
                }
            };

            match EntailmentLabel::parse(&record.gold_label) {
                Some(label) => pairs.push(SentencePair::new(
                    record.sentence1,
                    record.sentence2,
                    Some(label),
                )),
                // "-" and anything unrecognised: no consensus label
                None => skipped += 1,
            }
        }

        tracing::info!(
            "Loaded {} labelled pairs from '{}' ({} unlabelled skipped)",
            pairs.len(), self.path, skipped,
        );
        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_fixture(name: &str, content: &str) -> String {
        let dir = std::env::temp_dir().join("nse_entail_loader_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn loads_labelled_pairs_and_skips_unlabelled() {
        let path = write_fixture(
            "mixed.jsonl",
            concat!(
                r#"{"gold_label": "entailment", "sentence1": "A dog runs.", "sentence2": "An animal moves."}"#, "\n",
                r#"{"gold_label": "-", "sentence1": "A", "sentence2": "B"}"#, "\n",
                "not json at all\n",
                r#"{"gold_label": "contradiction", "sentence1": "A dog runs.", "sentence2": "The dog sleeps."}"#, "\n",
            ),
        );

        let pairs = SnliLoader::new(path).load_all().unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].label, Some(EntailmentLabel::Entailment));
        assert_eq!(pairs[0].premise, "A dog runs.");
        assert_eq!(pairs[1].label, Some(EntailmentLabel::Contradiction));
    }

    #[test]
    fn missing_file_is_an_error() {
        let loader = SnliLoader::new("/nonexistent/snli_train.jsonl");
        assert!(loader.load_all().is_err());
    }
}
