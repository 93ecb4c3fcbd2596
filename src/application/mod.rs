// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal each:
// training a model, or classifying a sentence pair. No ML math,
// no printing, no direct file parsing — only workflow
// coordination between the data, ml and infra layers.
//
// Reference: Clean Architecture pattern

// The training workflow
pub mod train_use_case;

// The pair-classification workflow
pub mod classify_use_case;
