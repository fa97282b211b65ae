// ============================================================
// dialogue-corpus
// ============================================================
// Turns raw dialogue transcripts into padded, time-major
// training batches for a sequence-to-sequence model.
//
// Layers (each only talks to the ones below it):
//
//   1. cli         — argument parsing and printing
//   2. application — configuration, staged pipeline, use cases
//   3. domain      — plain types and traits, no I/O
//   4. data        — vocabulary, extraction, filtering, batching
//   6. infra       — persistence, paths, tokenizer backend

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;
