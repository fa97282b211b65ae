// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust records and traits describing what the pipeline
// works on: conversations, id samples, reserved tokens, and the
// collaborators that feed the pipeline (conversation sources
// and tokenizers).
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits

// Conversations and lines as produced by a corpus reader
pub mod conversation;

// Word ids, reserved tokens, and the two sample shapes
pub mod sample;

// Core abstractions (traits) that other layers implement
pub mod traits;

// Typed failures of the corpus pipeline
pub mod error;
