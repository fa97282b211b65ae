// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers: configuration, the staged
// corpus pipeline, and the workflows built on top of it.
//
// Rules for this layer:
//   - No printing here (that's Layer 1)
//   - No direct file parsing (that's Layer 4 and 6)
//   - Only workflow coordination

// Options consumed by the pipeline
pub mod config;

// TextData and its Raw → Extracted → Filtered → Frozen stages
pub mod pipeline;

// Load-or-build of the training dataset
pub mod prepare_use_case;

// Sample playback, sentence encoding, batch dumps
pub mod inspect_use_case;
