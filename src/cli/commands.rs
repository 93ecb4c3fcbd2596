// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `train` and `classify`, and all
// their configurable flags. clap's derive macros generate the
// help text, error messages and type conversion.

use clap::{Args, Subcommand};
use crate::application::train_use_case::TrainConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the NSE entailment model on an SNLI JSONL file
    Train(TrainArgs),

    /// Classify a premise/hypothesis pair using a trained checkpoint
    Classify(ClassifyArgs),
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// SNLI-format JSONL file with labelled sentence pairs
    #[arg(long, default_value = "data/snli_train.jsonl")]
    pub data_file: String,

    /// GloVe-style word vector file (word v1 v2 ... per line)
    #[arg(long, default_value = "data/glove.6B.300d.txt")]
    pub embeddings_file: String,

    /// Directory to save model checkpoints and the config
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Maximum number of tokens per sentence; longer sentences
    /// are truncated, shorter ones zero-padded
    #[arg(long, default_value_t = 32)]
    pub max_seq_len: usize,

    /// Number of sentence PAIRS per batch (the model sees twice
    /// as many sequences)
    #[arg(long, default_value_t = 32)]
    pub batch_pairs: usize,

    /// Number of full passes through the training data
    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 3e-4)]
    pub lr: f64,

    /// Width D of embeddings, memory slots and controller states.
    /// Must match the dimension of the word vector file.
    #[arg(long, default_value_t = 300)]
    pub d_units: usize,

    /// Hidden width of the classifier head
    #[arg(long, default_value_t = 1024)]
    pub d_hidden: usize,

    /// Dropout probability on controller inputs and the
    /// classifier hidden layer
    #[arg(long, default_value_t = 0.3)]
    pub dropout: f64,

    /// Gradient-norm clipping threshold
    #[arg(long, default_value_t = 15.0)]
    pub grad_clip: f32,

    /// Weight decay coefficient
    #[arg(long, default_value_t = 3e-5)]
    pub weight_decay: f32,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 — the
/// application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_file:       a.data_file,
            embeddings_file: a.embeddings_file,
            checkpoint_dir:  a.checkpoint_dir,
            max_seq_len:     a.max_seq_len,
            batch_pairs:     a.batch_pairs,
            epochs:          a.epochs,
            lr:              a.lr,
            d_units:         a.d_units,
            d_hidden:        a.d_hidden,
            dropout:         a.dropout,
            grad_clip:       a.grad_clip,
            weight_decay:    a.weight_decay,
        }
    }
}

/// All arguments for the `classify` command
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// The premise sentence (sentence A)
    #[arg(long)]
    pub premise: String,

    /// The hypothesis sentence (sentence B)
    #[arg(long)]
    pub hypothesis: String,

    /// Word vector file (same as used during training)
    #[arg(long, default_value = "data/glove.6B.300d.txt")]
    pub embeddings_file: String,

    /// Directory where checkpoints were saved during training
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,
}
