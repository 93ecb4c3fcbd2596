// ============================================================
// Layer 2 — Classify Use Case
// ============================================================
// Loads the trained model and word vectors once, then answers
// classification requests for premise/hypothesis pairs.

use anyhow::Result;

use crate::domain::label::EntailmentLabel;
use crate::domain::traits::PairClassifier;
use crate::infra::{checkpoint::CheckpointManager, embedding_store::EmbeddingStore};
use crate::ml::inferencer::Inferencer;

pub struct ClassifyUseCase {
    inferencer: Inferencer,
}

impl ClassifyUseCase {
    pub fn new(checkpoint_dir: String, embeddings_file: String) -> Result<Self> {
        let store      = EmbeddingStore::load(&embeddings_file)?;
        let ckpt       = CheckpointManager::new(&checkpoint_dir);
        let inferencer = Inferencer::from_checkpoint(&ckpt, store)?;
        Ok(Self { inferencer })
    }

    /// Classify one pair and return the label with its softmax
    /// probability.
    pub fn classify_with_confidence(
        &self,
        premise:    &str,
        hypothesis: &str,
    ) -> Result<(EntailmentLabel, f32)> {
        self.inferencer.classify(premise, hypothesis)
    }
}

impl PairClassifier for ClassifyUseCase {
    fn classify(&self, premise: &str, hypothesis: &str) -> Result<EntailmentLabel> {
        let (label, _confidence) = self.inferencer.classify(premise, hypothesis)?;
        Ok(label)
    }
}
