// ============================================================
// Layer 5 — Neural Semantic Encoder
// ============================================================
// A recurrent memory-augmented sentence encoder. The encoder
// keeps an external memory of one D-dimensional slot per token,
// initialised from the input embeddings, and runs one
// read → compose → write cycle per time step:
//
//   read:    o_t = ReadLSTM(x_t)
//            z_t = softmax(M_t · o_t)        attention over slots
//            m_t = z_tᵀ · M_t                weighted read vector
//   compose: c_t = Linear_2D→2D(concat(o_t, m_t))
//   write:   h_t = WriteLSTM(c_t)
//            M_{t+1}[l] = (1 − z_t[l])·M_t[l] + z_t[l]·h_t
//
// The same z_t drives the weighted read and the erase/write
// gate — that coupling is the defining trait of the
// architecture and must not be decoupled.
//
// Classification packs a sentence pair into one batch (premises
// in the first half, hypotheses in the second), encodes both
// halves in a single pass, and feeds the standard comparison
// features concat(A,B) ++ (A−B) ++ (A⊙B) through a two-layer
// head with 3 output logits.
//
// Controller state is threaded explicitly through every step
// call (`None` = freshly reset); nothing in this module mutates
// state behind the caller's back.
//
// Reference: Munkhdalai & Yu (2017) Neural Semantic Encoders
//            Burn Book §3 (Building Blocks)

use anyhow::{anyhow, ensure, Result};
use burn::{
    nn::{
        loss::CrossEntropyLossConfig,
        Dropout, DropoutConfig,
        Linear, LinearConfig,
        Lstm, LstmConfig, LstmState,
    },
    prelude::*,
    tensor::{
        activation::{relu, softmax},
        backend::AutodiffBackend,
    },
};

#[derive(Config, Debug)]
pub struct NseConfig {
    /// Width D of token embeddings, memory slots, and both
    /// controller hidden states
    pub d_units: usize,

    /// Hidden width of the classifier head (1024 in the paper)
    pub d_hidden: usize,

    /// Number of output classes (3 for entailment)
    pub num_classes: usize,

    /// Dropout probability, applied before each controller and
    /// after the classifier ReLU
    pub dropout: f64,
}

impl NseConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> NseModel<B> {
        // The compose layer widens D to 2D and the write LSTM
        // consumes that 2D vector — the widths are part of the
        // architecture, not free parameters.
        NseModel {
            read_lstm:  LstmConfig::new(self.d_units, self.d_units, true).init(device),
            write_lstm: LstmConfig::new(2 * self.d_units, self.d_units, true).init(device),
            compose:    LinearConfig::new(2 * self.d_units, 2 * self.d_units).init(device),
            hidden:     LinearConfig::new(4 * self.d_units, self.d_hidden).init(device),
            output:     LinearConfig::new(self.d_hidden, self.num_classes).init(device),
            dropout:    DropoutConfig::new(self.dropout).init(),
            d_units:    self.d_units,
        }
    }
}

/// Hidden and cell state of the two controllers. `None` means
/// reset; the sequence driver starts every pass from reset so
/// no state can leak between sequences.
pub struct NseStates<B: Backend> {
    pub read:  Option<LstmState<B, 2>>,
    pub write: Option<LstmState<B, 2>>,
}

impl<B: Backend> NseStates<B> {
    pub fn new() -> Self {
        Self { read: None, write: None }
    }

    /// Clear both controllers. Idempotent — resetting cleared
    /// state leaves it cleared.
    pub fn reset(&mut self) {
        self.read  = None;
        self.write = None;
    }

    pub fn is_reset(&self) -> bool {
        self.read.is_none() && self.write.is_none()
    }
}

impl<B: Backend> Default for NseStates<B> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Module, Debug)]
pub struct NseModel<B: Backend> {
    pub read_lstm:  Lstm<B>,
    pub write_lstm: Lstm<B>,
    pub compose:    Linear<B>,
    pub hidden:     Linear<B>,
    pub output:     Linear<B>,
    pub dropout:    Dropout,
    pub d_units:    usize,
}

impl<B: Backend> NseModel<B> {
    /// The read operation.
    ///
    /// memory [B, L, D], x_t [B, D] → (o_t [B, D], m_t [B, D],
    /// z_t [B, L], next read state). z_t is row-stochastic: a
    /// probability distribution over the L memory slots per
    /// batch element.
    pub fn read(
        &self,
        memory: &Tensor<B, 3>,
        x_t:    Tensor<B, 2>,
        state:  Option<LstmState<B, 2>>,
    ) -> (Tensor<B, 2>, Tensor<B, 2>, Tensor<B, 2>, LstmState<B, 2>) {
        let [batch, seq_len, d] = memory.dims();

        // One-step LSTM call: [B, D] → [B, 1, D] → [B, D]
        let step = self.dropout.forward(x_t).unsqueeze_dim::<3>(1);
        let (out, state) = self.read_lstm.forward(step, state);
        let o_t = out.reshape([batch, d]);

        // Content-based attention: scores[b, l] = M[b, l, :] · o[b, :]
        let scores = memory
            .clone()
            .matmul(o_t.clone().unsqueeze_dim::<3>(2))
            .reshape([batch, seq_len]);
        let z_t = softmax(scores, 1);

        // Weighted read: m[b, :] = Σ_l z[b, l] · M[b, l, :]
        let m_t = z_t
            .clone()
            .unsqueeze_dim::<3>(1)
            .matmul(memory.clone())
            .reshape([batch, d]);

        (o_t, m_t, z_t, state)
    }

    /// The compose operation: a single affine map over the
    /// concatenated controller output and read vector,
    /// [B, D] ++ [B, D] → [B, 2D].
    pub fn compose(&self, o_t: Tensor<B, 2>, m_t: Tensor<B, 2>) -> Tensor<B, 2> {
        self.compose.forward(Tensor::cat(vec![o_t, m_t], 1))
    }

    /// The write operation.
    ///
    /// Every slot moves to a convex combination of its old
    /// content and the write vector h_t, gated per slot by the
    /// SAME attention distribution used for reading:
    ///
    ///   M'[b, l, :] = (1 − z[b, l])·M[b, l, :] + z[b, l]·h[b, :]
    ///
    /// Returns the updated memory, h_t (the caller keeps the
    /// final step's h_t as the sequence representation), and the
    /// next write-controller state.
    pub fn write(
        &self,
        memory: Tensor<B, 3>,
        c_t:    Tensor<B, 2>,
        z_t:    &Tensor<B, 2>,
        state:  Option<LstmState<B, 2>>,
    ) -> (Tensor<B, 3>, Tensor<B, 2>, LstmState<B, 2>) {
        let [batch, seq_len, d] = memory.dims();

        let step = self.dropout.forward(c_t).unsqueeze_dim::<3>(1);
        let (out, state) = self.write_lstm.forward(step, state);
        let h_t = out.reshape([batch, d]);

        // Broadcast z over the feature axis and h over the slot axis
        let gate = z_t
            .clone()
            .unsqueeze_dim::<3>(2)
            .expand([batch, seq_len, d]);
        let fill = h_t
            .clone()
            .unsqueeze_dim::<3>(1)
            .expand([batch, seq_len, d]);

        let memory = memory * (gate.ones_like() - gate.clone()) + fill * gate;
        (memory, h_t, state)
    }

    /// The sequence driver: initialise memory from the input
    /// embeddings, run read → compose → write once per token,
    /// and return the final write output per batch element.
    ///
    /// embeddings [B, L, D] → [B, D]. Fails fast on degenerate
    /// shapes before any computation.
    pub fn encode(&self, embeddings: Tensor<B, 3>) -> Result<Tensor<B, 2>> {
        let [batch, seq_len, d] = embeddings.dims();
        ensure!(batch > 0, "empty batch: the encoder needs at least one sequence");
        ensure!(seq_len > 0, "zero-length sequence: the memory needs at least one slot");
        ensure!(
            d == self.d_units,
            "embedding dimension {} does not match model dimension {}",
            d,
            self.d_units,
        );

        // Slot l starts as the embedding of token l
        let mut memory = embeddings.clone();
        let mut states = NseStates::new();
        let mut last_h: Option<Tensor<B, 2>> = None;

        for t in 0..seq_len {
            let x_t = embeddings
                .clone()
                .slice([0..batch, t..t + 1, 0..d])
                .reshape([batch, d]);

            let (o_t, m_t, z_t, read_state) = self.read(&memory, x_t, states.read.take());
            states.read = Some(read_state);

            let c_t = self.compose(o_t, m_t);

            let (next_memory, h_t, write_state) =
                self.write(memory, c_t, &z_t, states.write.take());
            memory       = next_memory;
            states.write = Some(write_state);
            last_h       = Some(h_t);
        }

        // seq_len >= 1 was checked above, so the loop ran
        last_h.ok_or_else(|| anyhow!("sequence driver produced no output"))
    }

    /// Build the sentence-pair comparison features from the
    /// half-packed encoder output: with A = first half and
    /// B = second half of the batch axis,
    ///
    ///   features = concat(A, B) ++ (A − B) ++ (A ⊙ B)
    ///
    /// encoded [B, D] → [B/2, 4D]. The batch must be even and
    /// packed premises-first.
    pub fn pair_features(&self, encoded: Tensor<B, 2>) -> Result<Tensor<B, 2>> {
        let [batch, d] = encoded.dims();
        ensure!(
            batch >= 2 && batch % 2 == 0,
            "pair batch must be even and non-empty, got {batch} sequences",
        );
        let half = batch / 2;

        let a = encoded.clone().slice([0..half, 0..d]);
        let b = encoded.slice([half..batch, 0..d]);

        Ok(Tensor::cat(
            vec![
                Tensor::cat(vec![a.clone(), b.clone()], 1),
                a.clone() - b.clone(),
                a * b,
            ],
            1,
        ))
    }

    /// Full forward pass: embeddings [2N, L, D] → logits [N, 3].
    pub fn forward(&self, embeddings: Tensor<B, 3>) -> Result<Tensor<B, 2>> {
        let [batch, _, _] = embeddings.dims();
        ensure!(
            batch % 2 == 0,
            "pair batch must pack premises and hypotheses, got odd size {batch}",
        );

        let encoded  = self.encode(embeddings)?;
        let features = self.pair_features(encoded)?;

        let hs = self.dropout.forward(relu(self.hidden.forward(features)));
        Ok(self.output.forward(hs))
    }

    /// Forward pass plus cross-entropy loss against the gold
    /// class indices. labels must have one entry per pair.
    pub fn forward_loss(
        &self,
        embeddings: Tensor<B, 3>,
        labels:     Tensor<B, 1, Int>,
    ) -> Result<(Tensor<B, 1>, Tensor<B, 2>)>
    where
        B: AutodiffBackend,
    {
        let [batch, _, _] = embeddings.dims();
        let [n_labels]    = labels.dims();
        ensure!(
            n_labels * 2 == batch,
            "expected {} labels for a batch of {} sequences, got {}",
            batch / 2, batch, n_labels,
        );

        let logits = self.forward(embeddings)?;
        let ce     = CrossEntropyLossConfig::new().init(&logits.device());
        let loss   = ce.forward(logits.clone(), labels);
        Ok((loss, logits))
    }
}

/// Argmax class index per pair. logits [N, C] → N indices.
pub fn predictions<B: Backend>(logits: Tensor<B, 2>) -> Vec<usize> {
    // argmax(1) returns [N, 1]; flatten to [N] before reading out
    logits
        .argmax(1)
        .flatten::<1>(0, 1)
        .into_data()
        .iter::<i64>()
        .map(|c| c as usize)
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{Autodiff, NdArray};

    type TestBackend  = NdArray;
    type TrainBackend = Autodiff<NdArray>;

    const D: usize = 4;

    fn model() -> NseModel<TestBackend> {
        NseConfig::new(D, 16, 3, 0.3).init(&Default::default())
    }

    /// Deterministic, non-degenerate embeddings.
    fn embeddings(batch: usize, seq_len: usize) -> Tensor<TestBackend, 3> {
        let data: Vec<f32> = (0..batch * seq_len * D)
            .map(|i| ((i % 7) as f32 - 3.0) * 0.25)
            .collect();
        Tensor::<TestBackend, 1>::from_floats(data.as_slice(), &Default::default())
            .reshape([batch, seq_len, D])
    }

    #[test]
    fn attention_is_row_stochastic() {
        let m      = model();
        let memory = embeddings(2, 5);
        let x_t    = embeddings(2, 1).reshape([2, D]);

        let (_o, _m, z, _state) = m.read(&memory, x_t, None);

        assert_eq!(z.dims(), [2, 5]);
        let values: Vec<f32> = z.clone().into_data().to_vec().unwrap();
        assert!(values.iter().all(|&v| v >= 0.0));

        let sums: Vec<f32> = z.sum_dim(1).into_data().to_vec().unwrap();
        for s in sums {
            assert!((s - 1.0).abs() < 1e-5, "attention row sums to {s}");
        }
    }

    #[test]
    fn write_is_a_convex_combination() {
        let m      = model();
        let memory = embeddings(2, 3);
        let x_t    = embeddings(2, 1).reshape([2, D]);

        let (o_t, m_t, z_t, _) = m.read(&memory, x_t, None);
        let c_t = m.compose(o_t, m_t);
        let (updated, h_t, _) = m.write(memory.clone(), c_t, &z_t, None);

        let old:  Vec<f32> = memory.into_data().to_vec().unwrap();
        let new:  Vec<f32> = updated.into_data().to_vec().unwrap();
        let h:    Vec<f32> = h_t.into_data().to_vec().unwrap();

        // Every updated slot entry lies between the old entry and
        // the write vector entry
        for b in 0..2 {
            for l in 0..3 {
                for i in 0..D {
                    let idx = (b * 3 + l) * D + i;
                    let (old_v, new_v, h_v) = (old[idx], new[idx], h[b * D + i]);
                    let lo = old_v.min(h_v) - 1e-5;
                    let hi = old_v.max(h_v) + 1e-5;
                    assert!(
                        new_v >= lo && new_v <= hi,
                        "slot entry {new_v} outside segment [{lo}, {hi}]",
                    );
                }
            }
        }
    }

    #[test]
    fn single_slot_attention_is_exactly_one() {
        let m      = model();
        let memory = embeddings(2, 1);
        let x_t    = embeddings(2, 1).reshape([2, D]);

        let (o_t, m_t, z_t, _) = m.read(&memory, x_t, None);

        // softmax over one slot is exactly 1.0
        let z: Vec<f32> = z_t.clone().into_data().to_vec().unwrap();
        assert_eq!(z, vec![1.0, 1.0]);

        // and the write fully overwrites that slot with h_t
        let c_t = m.compose(o_t, m_t);
        let (updated, h_t, _) = m.write(memory, c_t, &z_t, None);
        let new: Vec<f32> = updated.reshape([2, D]).into_data().to_vec().unwrap();
        let h:   Vec<f32> = h_t.into_data().to_vec().unwrap();
        for (n, hv) in new.iter().zip(h.iter()) {
            assert!((n - hv).abs() < 1e-6, "slot {n} != write vector {hv}");
        }
    }

    #[test]
    fn forward_is_deterministic_without_autodiff() {
        // Dropout is inactive on a non-autodiff backend, so two
        // passes over the same input must agree exactly
        let m     = model();
        let input = embeddings(4, 3);

        let first:  Vec<f32> = m.forward(input.clone()).unwrap().into_data().to_vec().unwrap();
        let second: Vec<f32> = m.forward(input).unwrap().into_data().to_vec().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn feature_width_is_4d_and_predictions_are_half_batch() {
        let m       = model();
        let encoded = m.encode(embeddings(6, 3)).unwrap();
        let features = m.pair_features(encoded).unwrap();
        assert_eq!(features.dims(), [3, 4 * D]);

        let logits = m.forward(embeddings(6, 3)).unwrap();
        assert_eq!(logits.dims(), [3, 3]);
        assert_eq!(predictions(logits).len(), 3);
    }

    #[test]
    fn identical_pair_has_zero_difference_block() {
        let m = model();

        // Hypothesis identical to premise, token for token
        let sentence = embeddings(1, 3);
        let input    = Tensor::cat(vec![sentence.clone(), sentence], 0);

        let encoded  = m.encode(input).unwrap();
        let features = m.pair_features(encoded).unwrap();

        // Feature layout: [A ++ B | A − B | A ⊙ B]
        let diff_block: Vec<f32> = features
            .slice([0..1, 2 * D..3 * D])
            .into_data()
            .to_vec()
            .unwrap();
        for v in diff_block {
            assert!(v.abs() < 1e-6, "difference block entry {v} is not zero");
        }
    }

    #[test]
    fn state_reset_is_idempotent() {
        let m     = model();
        let input = embeddings(2, 2);

        let mut states = NseStates::<TestBackend>::new();
        assert!(states.is_reset());

        let x_t = input.clone().slice([0..2, 0..1, 0..D]).reshape([2, D]);
        let memory = input;
        let (_, _, _, read_state) = m.read(&memory, x_t, states.read.take());
        states.read = Some(read_state);
        assert!(!states.is_reset());

        states.reset();
        assert!(states.is_reset());
        states.reset();
        assert!(states.is_reset());
    }

    #[test]
    fn zero_embeddings_give_finite_loss_and_valid_class() {
        let device = Default::default();
        let m: NseModel<TrainBackend> = NseConfig::new(D, 16, 3, 0.3).init(&device);

        // One pair, L=3, all-zero token embeddings, label 1
        let input  = Tensor::<TrainBackend, 3>::zeros([2, 3, D], &device);
        let labels = Tensor::<TrainBackend, 1, Int>::from_ints([1], &device);

        let (loss, logits) = m.forward_loss(input, labels).unwrap();
        let loss_val: f64 = loss.into_scalar().elem::<f64>();
        assert!(loss_val.is_finite());

        let preds = predictions(logits);
        assert_eq!(preds.len(), 1);
        assert!(preds[0] < 3);
    }

    #[test]
    fn degenerate_shapes_are_rejected() {
        let device = Default::default();
        let m = model();

        // B = 0
        let empty_batch = Tensor::<TestBackend, 3>::zeros([0, 3, D], &device);
        assert!(m.forward(empty_batch).is_err());

        // L = 0
        let empty_seq = Tensor::<TestBackend, 3>::zeros([2, 0, D], &device);
        assert!(m.encode(empty_seq).is_err());

        // odd batch cannot be split into pairs
        let odd = Tensor::<TestBackend, 3>::zeros([3, 2, D], &device);
        assert!(m.forward(odd).is_err());

        // wrong embedding width
        let wrong_dim = Tensor::<TestBackend, 3>::zeros([2, 2, D + 1], &device);
        assert!(m.encode(wrong_dim).is_err());
    }

    #[test]
    fn mismatched_label_count_is_rejected() {
        let device = Default::default();
        let m: NseModel<TrainBackend> = NseConfig::new(D, 16, 3, 0.3).init(&device);

        let input  = Tensor::<TrainBackend, 3>::zeros([4, 2, D], &device);
        let labels = Tensor::<TrainBackend, 1, Int>::from_ints([0], &device);
        assert!(m.forward_loss(input, labels).is_err());
    }
}
