// ============================================================
// Layer 3 — Entailment Label
// ============================================================
// The three-way classification target of the SNLI task:
// does the premise entail, contradict, or say nothing about
// the hypothesis?
//
// SNLI files use the strings "entailment", "neutral" and
// "contradiction" in the gold_label field. A "-" gold label
// means the annotators could not agree — those examples carry
// no usable target and are skipped by the loader.
//
// Reference: Bowman et al. (2015) SNLI corpus paper

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Number of output classes of the classifier head.
pub const NUM_CLASSES: usize = 3;

/// One of the three SNLI entailment classes.
/// The discriminant order fixes the class-index mapping used
/// for both the loss targets and the argmax predictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntailmentLabel {
    Entailment    = 0,
    Neutral       = 1,
    Contradiction = 2,
}

impl EntailmentLabel {
    /// Parse an SNLI gold_label string.
    /// Returns `None` for "-" (no annotator consensus) and for
    /// anything else unrecognised — the caller decides whether
    /// that is skippable or fatal.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "entailment"    => Some(Self::Entailment),
            "neutral"       => Some(Self::Neutral),
            "contradiction" => Some(Self::Contradiction),
            _               => None,
        }
    }

    /// The class index fed to the cross-entropy loss.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Map an argmax class index back to a label.
    /// Fails on indices outside 0..3 — an out-of-range index
    /// means the classifier head was built with the wrong width.
    pub fn from_index(index: usize) -> Result<Self> {
        match index {
            0 => Ok(Self::Entailment),
            1 => Ok(Self::Neutral),
            2 => Ok(Self::Contradiction),
            _ => bail!("class index {index} out of range (expected 0..{NUM_CLASSES})"),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entailment    => "entailment",
            Self::Neutral       => "neutral",
            Self::Contradiction => "contradiction",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_labels() {
        assert_eq!(EntailmentLabel::parse("entailment"), Some(EntailmentLabel::Entailment));
        assert_eq!(EntailmentLabel::parse("neutral"), Some(EntailmentLabel::Neutral));
        assert_eq!(EntailmentLabel::parse("contradiction"), Some(EntailmentLabel::Contradiction));
    }

    #[test]
    fn parse_rejects_unlabelled() {
        assert_eq!(EntailmentLabel::parse("-"), None);
        assert_eq!(EntailmentLabel::parse(""), None);
        assert_eq!(EntailmentLabel::parse("ENTAILMENT"), None);
    }

    #[test]
    fn index_round_trip() {
        for idx in 0..NUM_CLASSES {
            let label = EntailmentLabel::from_index(idx).unwrap();
            assert_eq!(label.index(), idx);
        }
        assert!(EntailmentLabel::from_index(NUM_CLASSES).is_err());
    }
}
