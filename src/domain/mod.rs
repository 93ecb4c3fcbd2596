// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits that define the core
// concepts of the system. No Burn types, no file I/O, no ML
// code — everything here is testable without a GPU.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// The 3-way entailment label
pub mod label;

// A premise/hypothesis sentence pair
pub mod sentence_pair;

// Core abstractions (traits) that other layers implement
pub mod traits;
