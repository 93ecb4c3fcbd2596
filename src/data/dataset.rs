// ============================================================
// Layer 4 — Pair Dataset
// ============================================================
// One fully embedded and padded training example. Both
// sentences are stored as flat row-major buffers of exactly
// seq_len * dim floats, so the batcher never needs to pad —
// every sample in a dataset shares one (seq_len, dim).

use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

/// One sentence pair, already embedded and padded to a uniform
/// sequence length. `premise` and `hypothesis` each hold
/// `seq_len * dim` floats in row-major token order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairSample {
    pub premise:    Vec<f32>,
    pub hypothesis: Vec<f32>,
    pub label:      usize,
    pub seq_len:    usize,
    pub dim:        usize,
}

pub struct PairDataset {
    samples: Vec<PairSample>,
}

impl PairDataset {
    pub fn new(samples: Vec<PairSample>) -> Self {
        Self { samples }
    }
}

impl Dataset<PairSample> for PairDataset {
    fn get(&self, index: usize) -> Option<PairSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
