// ============================================================
// Layer 6 — Embedding Store
// ============================================================
// Token embeddings are an external input to the NSE: the model
// reads pretrained word vectors and never updates them. This
// store loads a GloVe-style text file where each line is
//
//   word v1 v2 ... vD
//
// and serves lookups during sample building and inference.
// Out-of-vocabulary tokens map to the zero vector, which also
// doubles as the padding vector — a padded slot then starts as
// an all-zero memory slot.
//
// Reference: Pennington et al. (2014) GloVe

use anyhow::{bail, Context, Result};
use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// An in-memory table of pretrained word vectors, all of one
/// fixed dimension.
pub struct EmbeddingStore {
    dim:   usize,
    table: HashMap<String, Vec<f32>>,
}

impl EmbeddingStore {
    /// Load a whitespace-separated vector file.
    ///
    /// The dimension is taken from the first line; any later line
    /// with a different vector width is a corrupt file and fails
    /// the whole load rather than being silently dropped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("cannot open embedding file '{}'", path.display()))?;

        let mut dim   = 0usize;
        let mut table = HashMap::new();

        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = line
                .with_context(|| format!("read error in '{}' at line {}", path.display(), line_no + 1))?;
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split_whitespace();
            let word = match fields.next() {
                Some(w) => w.to_string(),
                None    => continue,
            };
            let vector: Vec<f32> = fields
                .map(|f| {
                    f.parse::<f32>().with_context(|| {
                        format!("bad float '{}' for word '{}' at line {}", f, word, line_no + 1)
                    })
                })
                .collect::<Result<_>>()?;

            if dim == 0 {
                dim = vector.len();
                if dim == 0 {
                    bail!("first line of '{}' has no vector components", path.display());
                }
            } else if vector.len() != dim {
                bail!(
                    "dimension mismatch in '{}' at line {}: expected {}, got {}",
                    path.display(), line_no + 1, dim, vector.len()
                );
            }

            table.insert(word, vector);
        }

        if table.is_empty() {
            bail!("embedding file '{}' contains no vectors", path.display());
        }

        tracing::info!("Loaded {} word vectors of dimension {}", table.len(), dim);
        Ok(Self { dim, table })
    }

    /// Build a store directly from (word, vector) pairs.
    /// Used by tests and small fixtures.
    pub fn from_pairs(dim: usize, pairs: Vec<(String, Vec<f32>)>) -> Result<Self> {
        let mut table = HashMap::new();
        for (word, vector) in pairs {
            if vector.len() != dim {
                bail!("vector for '{}' has dimension {}, expected {}", word, vector.len(), dim);
            }
            table.insert(word, vector);
        }
        Ok(Self { dim, table })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn lookup(&self, token: &str) -> Option<&[f32]> {
        self.table.get(token).map(|v| v.as_slice())
    }

    /// Embed a token sequence as a flat row-major buffer of
    /// exactly `seq_len * dim` floats: tokens beyond `seq_len`
    /// are truncated, missing positions and OOV tokens are zero.
    pub fn embed_padded(&self, tokens: &[String], seq_len: usize) -> Vec<f32> {
        let mut flat = vec![0.0f32; seq_len * self.dim];
        for (pos, token) in tokens.iter().take(seq_len).enumerate() {
            if let Some(vector) = self.lookup(token) {
                flat[pos * self.dim..(pos + 1) * self.dim].copy_from_slice(vector);
            }
        }
        flat
    }
}
