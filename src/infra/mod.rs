// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns shared by training and inference:
//
//   checkpoint.rs      — model weight persistence via Burn's
//                        CompactRecorder, plus the TrainConfig
//                        JSON needed to rebuild the model
//
//   embedding_store.rs — pretrained word vectors loaded from a
//                        GloVe-style text file; the model never
//                        learns its own token embeddings, so the
//                        same store must back both training and
//                        inference
//
//   metrics.rs         — per-epoch CSV metrics logger
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Pretrained word-embedding table
pub mod embedding_store;

/// Training metrics CSV logger
pub mod metrics;
