// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong in a business layer:
//
//   dataset_store.rs — Dataset persistence
//                      One JSON record per snapshot (vocabulary
//                      plus samples), written atomically.
//
//   paths.rs         — Where corpus files and cached datasets
//                      live, derived from the configuration.
//
//   tokenizer.rs     — Sentence and word splitting backed by
//                      the `tokenizers` pre-tokenizers.

/// Dataset save and load
pub mod dataset_store;

/// Dataset and corpus file locations
pub mod paths;

/// Default text tokenizer
pub mod tokenizer;
