// ============================================================
// Layer 3 — SentencePair Domain Type
// ============================================================
// One premise/hypothesis example. This is the core concept of
// the entailment task: two sentences and (for training data)
// a gold label describing their relationship.
//
// Example:
//   Premise:    "A man inspects the uniform of a figure."
//   Hypothesis: "The man is sleeping."
//   Label:      contradiction

use serde::{Deserialize, Serialize};

use crate::domain::label::EntailmentLabel;

/// A raw sentence pair as loaded from an SNLI file.
/// Text is untokenised; the label is `None` for pairs used
/// only at inference time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentencePair {
    /// Sentence A — the premise
    pub premise: String,

    /// Sentence B — the hypothesis being judged against the premise
    pub hypothesis: String,

    /// Gold label; present only in training/validation data
    pub label: Option<EntailmentLabel>,
}

impl SentencePair {
    pub fn new(
        premise:    impl Into<String>,
        hypothesis: impl Into<String>,
        label:      Option<EntailmentLabel>,
    ) -> Self {
        Self {
            premise:    premise.into(),
            hypothesis: hypothesis.into(),
            label,
        }
    }
}
