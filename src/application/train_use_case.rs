// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load SNLI pairs           (Layer 4 - data)
//   Step 2: Load word embeddings      (Layer 6 - infra)
//   Step 3: Build embedded samples    (Layer 4 - data)
//   Step 4: Split train/validation    (Layer 4 - data)
//   Step 5: Build datasets            (Layer 4 - data)
//   Step 6: Save config               (Layer 6 - infra)
//   Step 7: Run training loop         (Layer 5 - ml)
//
// Reference: Burn Book §5 (Training)

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::{PairDataset, PairSample},
    loader::SnliLoader,
    preprocessor::Preprocessor,
    splitter::split_train_val,
};
use crate::domain::sentence_pair::SentencePair;
use crate::domain::traits::ExampleSource;
use crate::infra::{checkpoint::CheckpointManager, embedding_store::EmbeddingStore};
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run. Serialisable so it can
// be saved beside the checkpoints and reloaded for inference.
// Defaults follow the original NSE training recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_file:       String,
    pub embeddings_file: String,
    pub checkpoint_dir:  String,
    pub max_seq_len:     usize,
    pub batch_pairs:     usize,
    pub epochs:          usize,
    pub lr:              f64,
    pub d_units:         usize,
    pub d_hidden:        usize,
    pub dropout:         f64,
    pub grad_clip:       f32,
    pub weight_decay:    f32,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_file:       "data/snli_train.jsonl".to_string(),
            embeddings_file: "data/glove.6B.300d.txt".to_string(),
            checkpoint_dir:  "checkpoints".to_string(),
            max_seq_len:     32,
            batch_pairs:     32,
            epochs:          10,
            lr:              3e-4,
            d_units:         300,
            d_hidden:        1024,
            dropout:         0.3,
            grad_clip:       15.0,
            weight_decay:    3e-5,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end.
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load labelled sentence pairs ─────────────────────────────
        tracing::info!("Loading SNLI pairs from '{}'", cfg.data_file);
        let loader = SnliLoader::new(&cfg.data_file);
        let pairs  = loader.load_all()?;
        ensure!(!pairs.is_empty(), "no labelled pairs in '{}'", cfg.data_file);

        // ── Step 2: Load pretrained word vectors ─────────────────────────────
        tracing::info!("Loading word vectors from '{}'", cfg.embeddings_file);
        let store = EmbeddingStore::load(&cfg.embeddings_file)?;
        tracing::info!(
            "Embedding store ready: {} vectors of dimension {}",
            store.len(), store.dim(),
        );
        ensure!(
            store.dim() == cfg.d_units,
            "embedding dimension {} does not match --d-units {}",
            store.dim(), cfg.d_units,
        );

        // ── Step 3: Tokenise, embed and pad every pair ───────────────────────
        let samples = build_samples(&pairs, &store, cfg);
        ensure!(
            !samples.is_empty(),
            "every pair was dropped during embedding — check the vector file",
        );
        tracing::info!("Built {} training samples", samples.len());

        // ── Step 4: Train / validation split (90/10) ─────────────────────────
        let (train_samples, val_samples) = split_train_val(samples, 0.9);
        tracing::info!(
            "Split: {} train, {} validation",
            train_samples.len(), val_samples.len(),
        );

        // ── Step 5: Build Burn datasets ──────────────────────────────────────
        let train_dataset = PairDataset::new(train_samples);
        let val_dataset   = PairDataset::new(val_samples);

        // ── Step 6: Save config so inference can rebuild the model ──────────
        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);
        ckpt_manager.save_config(cfg)?;

        // ── Step 7: Run training loop (Layer 5) ──────────────────────────────
        run_training(cfg, train_dataset, val_dataset, ckpt_manager)?;

        Ok(())
    }
}

// ─── Sample Building ─────────────────────────────────────────────────────────
// Both sentences of a pair are padded to ONE shared length so a
// batch of pairs forms a single (2N, L, D) tensor. Pairs whose
// sentences tokenise to nothing carry no signal and are dropped
// with a warning.
fn build_samples(
    pairs: &[SentencePair],
    store: &EmbeddingStore,
    cfg:   &TrainConfig,
) -> Vec<PairSample> {
    let preprocessor = Preprocessor::new();
    let mut samples  = Vec::with_capacity(pairs.len());
    let mut dropped  = 0usize;

    for pair in pairs {
        let label = match pair.label {
            Some(l) => l.index(),
            None    => continue,
        };

        let premise_tokens    = preprocessor.tokenize(&pair.premise);
        let hypothesis_tokens = preprocessor.tokenize(&pair.hypothesis);
        if premise_tokens.is_empty() || hypothesis_tokens.is_empty() {
            dropped += 1;
            continue;
        }

        samples.push(PairSample {
            premise:    store.embed_padded(&premise_tokens, cfg.max_seq_len),
            hypothesis: store.embed_padded(&hypothesis_tokens, cfg.max_seq_len),
            label,
            seq_len:    cfg.max_seq_len,
            dim:        store.dim(),
        });
    }

    if dropped > 0 {
        tracing::warn!("Dropped {} pairs with empty sentences", dropped);
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::label::EntailmentLabel;

    fn store() -> EmbeddingStore {
        EmbeddingStore::from_pairs(
            2,
            vec![
                ("a".to_string(),   vec![0.5, 0.5]),
                ("dog".to_string(), vec![1.0, 0.0]),
                ("runs".to_string(), vec![0.0, 1.0]),
            ],
        )
        .unwrap()
    }

    fn config() -> TrainConfig {
        TrainConfig {
            max_seq_len: 4,
            d_units:     2,
            ..TrainConfig::default()
        }
    }

    #[test]
    fn builds_padded_samples() {
        let pairs = vec![SentencePair::new(
            "A dog runs.",
            "A dog.",
            Some(EntailmentLabel::Entailment),
        )];

        let samples = build_samples(&pairs, &store(), &config());
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].premise.len(), 4 * 2);
        assert_eq!(samples[0].hypothesis.len(), 4 * 2);
        assert_eq!(samples[0].label, 0);
        // "a dog runs" → 3 tokens, slot 3 is zero padding
        assert_eq!(&samples[0].premise[6..8], &[0.0, 0.0]);
    }

    #[test]
    fn drops_empty_sentences() {
        let pairs = vec![SentencePair::new(
            "!!!",
            "A dog.",
            Some(EntailmentLabel::Neutral),
        )];

        let samples = build_samples(&pairs, &store(), &config());
        assert!(samples.is_empty());
    }
}
