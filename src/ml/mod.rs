// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn framework specific code lives here; no other layer
// imports from burn directly except the thin Dataset/Batcher
// glue in the data layer.
//
// What's in this layer:
//
//   model.rs      — The Neural Semantic Encoder:
//                   • read:    LSTM controller + softmax
//                              attention over the memory slots
//                   • compose: 2D→2D linear over the controller
//                              output and the read vector
//                   • write:   LSTM controller + per-slot convex
//                              erase/write gated by the read
//                              attention
//                   • sequence driver, sentence-pair feature
//                     aggregation, classifier head, loss
//
//   trainer.rs    — The training loop: forward, loss, backward,
//                   Adam step, validation, metrics, checkpoints
//
//   inferencer.rs — Loads a checkpoint and classifies one
//                   premise/hypothesis pair
//
// Reference: Munkhdalai & Yu (2017) Neural Semantic Encoders
//            Burn Book §3 (Building Blocks), §5 (Training)

/// The memory-augmented encoder and classifier head
pub mod model;

/// Full training loop with validation and checkpointing
pub mod trainer;

/// Inference engine — loads checkpoint and classifies pairs
pub mod inferencer;
