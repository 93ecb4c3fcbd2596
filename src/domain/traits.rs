// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams between layers. The application layer programs
// against these traits, never against concrete loaders or
// models, so implementations can be swapped without touching
// the orchestration code.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::label::EntailmentLabel;
use crate::domain::sentence_pair::SentencePair;

// ─── ExampleSource ────────────────────────────────────────────────────────────
/// Any component that can load labelled sentence pairs.
///
/// Implementations:
///   - SnliLoader → reads SNLI-format JSONL files
///   - (future) a TSV loader for MultiNLI-style data
pub trait ExampleSource {
    /// Load all usable examples from this source.
    /// Unlabelled pairs (gold label "-") are not returned.
    fn load_all(&self) -> Result<Vec<SentencePair>>;
}

// ─── PairClassifier ───────────────────────────────────────────────────────────
/// Any component that can classify a premise/hypothesis pair.
///
/// Implementations:
///   - ClassifyUseCase → runs the trained NSE model
pub trait PairClassifier {
    /// Predict the entailment class for one sentence pair.
    fn classify(&self, premise: &str, hypothesis: &str) -> Result<EntailmentLabel>;
}
