// ============================================================
// Layer 4 — Epoch Scheduler
// ============================================================
// Prepares the batches for one epoch:
//   1. shuffle every training sample (Fisher-Yates)
//   2. cut the shuffled list into contiguous chunks of
//      batch_size (the last chunk may be shorter)
//   3. build one Batch per chunk, in shuffled order
//
// The shuffle is applied to the caller's sample list in place,
// so consecutive epochs keep reshuffling the same collection.
// Batch construction itself only reads the samples.

use rand::{seq::SliceRandom, Rng};

use crate::data::batcher::{Batch, Seq2SeqBatcher};
use crate::domain::sample::Sample;

/// Shuffle `samples` and batch them.
///
/// # Panics
/// Panics if `batch_size` is 0.
pub fn epoch_batches<R: Rng + ?Sized>(
    samples:    &mut [Sample],
    batch_size: usize,
    batcher:    &Seq2SeqBatcher,
    rng:        &mut R,
) -> Vec<Batch> {
    assert!(batch_size > 0, "batch_size must be positive");

    samples.shuffle(rng);

    let batches: Vec<Batch> = samples
        .chunks(batch_size)
        .map(|chunk| batcher.make_batch(chunk, &mut *rng))
        .collect();

    tracing::debug!(
        "Epoch prepared: {} samples in {} batches of up to {}",
        samples.len(),
        batches.len(),
        batch_size
    );
    batches
}
