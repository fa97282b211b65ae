//! Typed failures of the corpus pipeline.
//!
//! I/O problems travel as `anyhow::Error` with context; the variants here
//! describe a dataset or vocabulary that breaks the pipeline's invariants.

use thiserror::Error;

use crate::domain::sample::WordId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CorpusError {
    /// A reserved token is absent from a reloaded vocabulary
    #[error("reserved token '{0}' missing from vocabulary (dataset format mismatch?)")]
    MissingReservedToken(String),

    /// Training batches require the pad token at id 0
    #[error("pad token must have id 0, found {0}")]
    PadNotZero(WordId),

    /// A persisted dataset disagrees with itself
    #[error("corrupted dataset: {0}")]
    CorruptedDataset(String),

    /// The external tokenizer rejected its input
    #[error("tokenizer error: {0}")]
    Tokenizer(String),
}
