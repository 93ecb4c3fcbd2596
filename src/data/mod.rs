// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between raw SNLI files and GPU-ready batches:
//
//   SNLI JSONL file
//       │
//       ▼
//   SnliLoader        → parses lines, drops unlabelled pairs
//       │
//       ▼
//   Preprocessor      → cleans and tokenises sentences
//       │
//       ▼
//   EmbeddingStore    → token → pretrained vector (Layer 6)
//       │
//       ▼
//   PairDataset       → implements Burn's Dataset trait
//       │
//       ▼
//   PairBatcher       → packs pairs into one half-split batch
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Loads SNLI-format JSONL files
pub mod loader;

/// Cleans and tokenises raw sentence text
pub mod preprocessor;

/// Implements Burn's Dataset trait for embedded sentence pairs
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Shuffles and splits data into train/validation sets
pub mod splitter;
