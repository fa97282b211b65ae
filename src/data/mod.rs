// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from conversation text to time-major batches.
//
// The pipeline flows in this order:
//
//   corpus .txt file
//       │
//       ▼
//   LightweightLoader → splits the file into conversations
//       │
//       ▼
//   Extractor         → tokenizes turn pairs, grows the vocabulary
//       │
//       ▼
//   filter            → bounds lengths, prunes and remaps the vocabulary
//       │
//       ▼
//   scheduler         → shuffles and cuts one epoch into chunks
//       │
//       ▼
//   Seq2SeqBatcher    → reverse, pad, go/eos, weights, transpose
//       │
//       ▼
//   TensorBatcher     → Burn tensors for a training loop
//
// Each module is responsible for exactly one step.

/// Word ↔ id table with reserved tokens and counts
pub mod vocabulary;

/// Reads `===`-separated conversation files
pub mod loader;

/// Turns conversations into sentence-grouped samples
pub mod extractor;

/// Length bounding and vocabulary pruning
pub mod filter;

/// Builds padded, time-major batches (and Burn tensors)
pub mod batcher;

/// Shuffles samples and splits an epoch into batches
pub mod scheduler;

/// Implements Burn's Dataset trait for samples
pub mod dataset;

/// Id sequences back to readable text
pub mod decode;
