// ============================================================
// Layer 4 — Pair Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<PairSample>
// into the half-packed batch the model expects:
//
//   embeddings: [2N, L, D] — rows 0..N are the N premises,
//               rows N..2N the matching hypotheses, in the
//               same order
//   labels:     [N]        — one class index per pair
//
// The feature aggregator splits the encoder output at row N,
// so this packing order is an invariant, not a convention.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::dataset::PairSample;

/// A batch of sentence pairs ready for the model forward pass.
#[derive(Debug, Clone)]
pub struct PairBatch<B: Backend> {
    /// Pre-embedded tokens — shape [2 * pairs, seq_len, dim],
    /// premises in the first half of the batch axis
    pub embeddings: Tensor<B, 3>,

    /// Gold class indices — shape [pairs]
    pub labels: Tensor<B, 1, Int>,
}

/// Holds the target device so tensors land on the right GPU/CPU.
#[derive(Clone, Debug)]
pub struct PairBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> PairBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<PairSample, PairBatch<B>> for PairBatcher<B> {
    fn batch(&self, items: Vec<PairSample>) -> PairBatch<B> {
        let pairs   = items.len();
        // Samples are pre-padded; every sample shares one shape
        let seq_len = items[0].seq_len;
        let dim     = items[0].dim;

        // Premises first, hypotheses second — the aggregator
        // relies on this order
        let mut flat: Vec<f32> = Vec::with_capacity(2 * pairs * seq_len * dim);
        for s in &items {
            flat.extend_from_slice(&s.premise);
        }
        for s in &items {
            flat.extend_from_slice(&s.hypothesis);
        }

        let labels_flat: Vec<i32> = items.iter().map(|s| s.label as i32).collect();

        let embeddings = Tensor::<B, 1>::from_floats(flat.as_slice(), &self.device)
            .reshape([2 * pairs, seq_len, dim]);

        let labels = Tensor::<B, 1, Int>::from_ints(labels_flat.as_slice(), &self.device);

        PairBatch { embeddings, labels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn sample(fill: f32, label: usize) -> PairSample {
        // seq_len 2, dim 3; hypothesis is the negated premise so
        // the two halves are distinguishable in the packed tensor
        PairSample {
            premise:    vec![fill; 6],
            hypothesis: vec![-fill; 6],
            label,
            seq_len: 2,
            dim:     3,
        }
    }

    #[test]
    fn packs_premises_then_hypotheses() {
        let batcher = PairBatcher::<TestBackend>::new(Default::default());
        let batch   = batcher.batch(vec![sample(1.0, 0), sample(2.0, 2)]);

        assert_eq!(batch.embeddings.dims(), [4, 2, 3]);
        assert_eq!(batch.labels.dims(), [2]);

        let flat: Vec<f32> = batch.embeddings.into_data().to_vec().unwrap();
        // row 0: premise of pair 0; row 2: hypothesis of pair 0
        assert_eq!(flat[0], 1.0);
        assert_eq!(flat[6], 2.0);
        assert_eq!(flat[12], -1.0);
        assert_eq!(flat[18], -2.0);
    }

    #[test]
    fn labels_follow_sample_order() {
        let batcher = PairBatcher::<TestBackend>::new(Default::default());
        let batch   = batcher.batch(vec![sample(1.0, 2), sample(1.0, 1), sample(1.0, 0)]);

        // NdArray stores Int tensors as i64, and to_vec is
        // dtype-strict — read the elements as i64
        let labels: Vec<i64> = batch.labels.into_data().to_vec().unwrap();
        assert_eq!(labels, vec![2i64, 1, 0]);
    }
}
