// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Loads a trained checkpoint and classifies one premise/
// hypothesis pair at a time. Runs on the plain (non-autodiff)
// backend with dropout 0, so inference is deterministic.

use anyhow::{anyhow, ensure, Result};
use burn::{
    prelude::*,
    tensor::activation::softmax,
};

use crate::data::preprocessor::Preprocessor;
use crate::domain::label::{EntailmentLabel, NUM_CLASSES};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::embedding_store::EmbeddingStore;
use crate::ml::model::{predictions, NseConfig, NseModel};

type InferBackend = burn::backend::Wgpu;

pub struct Inferencer {
    model:        NseModel<InferBackend>,
    embeddings:   EmbeddingStore,
    preprocessor: Preprocessor,
    max_seq_len:  usize,
    device:       burn::backend::wgpu::WgpuDevice,
}

impl Inferencer {
    /// Rebuild the model from the saved training config and load
    /// the latest checkpoint into it. The embedding store must be
    /// the same one used during training — its dimension is
    /// checked against the saved config.
    pub fn from_checkpoint(
        ckpt_manager: &CheckpointManager,
        embeddings:   EmbeddingStore,
    ) -> Result<Self> {
        let device = burn::backend::wgpu::WgpuDevice::default();
        let cfg    = ckpt_manager.load_config()?;

        ensure!(
            embeddings.dim() == cfg.d_units,
            "embedding store dimension {} does not match trained model dimension {}",
            embeddings.dim(), cfg.d_units,
        );

        let model_cfg = NseConfig::new(cfg.d_units, cfg.d_hidden, NUM_CLASSES, 0.0);
        let model: NseModel<InferBackend> = model_cfg.init(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!("Model loaded from checkpoint");

        Ok(Self {
            model,
            embeddings,
            preprocessor: Preprocessor::new(),
            max_seq_len:  cfg.max_seq_len,
            device,
        })
    }

    /// Classify one sentence pair. Returns the predicted label
    /// and its softmax probability.
    pub fn classify(&self, premise: &str, hypothesis: &str) -> Result<(EntailmentLabel, f32)> {
        let premise_tokens    = self.preprocessor.tokenize(premise);
        let hypothesis_tokens = self.preprocessor.tokenize(hypothesis);
        ensure!(!premise_tokens.is_empty(), "premise contains no tokens");
        ensure!(!hypothesis_tokens.is_empty(), "hypothesis contains no tokens");

        // Both sentences share one sequence length: the longer of
        // the two, capped at the trained maximum
        let seq_len = premise_tokens
            .len()
            .max(hypothesis_tokens.len())
            .min(self.max_seq_len);

        let dim = self.embeddings.dim();
        let mut flat = self.embeddings.embed_padded(&premise_tokens, seq_len);
        flat.extend(self.embeddings.embed_padded(&hypothesis_tokens, seq_len));

        // One pair packed as a batch of two: premise row 0,
        // hypothesis row 1
        let input = Tensor::<InferBackend, 1>::from_floats(flat.as_slice(), &self.device)
            .reshape([2, seq_len, dim]);

        let logits = self.model.forward(input)?;

        let probs: Vec<f32> = softmax(logits.clone(), 1)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow!("cannot read probabilities: {e:?}"))?;

        let pred  = predictions(logits)
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("model produced no prediction"))?;
        let label = EntailmentLabel::from_index(pred)?;
        let confidence = probs.get(pred).copied().unwrap_or(0.0);

        tracing::debug!(
            "Classified pair as '{}' (confidence {:.4})",
            label.as_str(), confidence,
        );

        Ok((label, confidence))
    }
}
