// ============================================================
// Layer 4 — Seq2Seq Batcher
// ============================================================
// Turns a list of variable-length samples into one rectangular,
// time-major batch.
//
// Per sample, in order:
//   1. training + watson mode  → swap input and target
//   2. training + auto-encode  → (side_k, side_k), k random
//   3. encoder = reversed input
//   4. decoder = [go] + target + [eos]
//   5. target  = decoder without the leading go
//   6. encoder is LEFT-padded to max_length_enco
//   7. decoder and target are RIGHT-padded to max_length_deco
//   8. weight  = 1.0 on real target positions, 0.0 on padding
//
// Example (max_length_enco=3, max_length_deco=4, pad=0, go=1, eos=2):
//   input  [5, 6]  → encoder [0, 6, 5]
//   target [7, 8]  → decoder [1, 7, 8, 2]
//                    target  [7, 8, 2, 0]
//                    weight  [1, 1, 1, 0]
//
// Finally every matrix is transposed from [batch][time] to
// [time][batch], so one time step can be read across the whole
// batch at once.
//
// Lengths are NOT truncated here: the filter already bounded
// them, so an over-long sequence is a broken contract and panics.
//
// TensorBatcher wraps the same logic behind Burn's Batcher
// trait and stacks the matrices into tensors.

use burn::{data::dataloader::batcher::Batcher, prelude::*};
use rand::Rng;
use std::sync::Mutex;

use crate::domain::sample::{Sample, SpecialTokens, WordId};

// ─── Batch ────────────────────────────────────────────────────────────────────
/// Four time-major matrices. Row `t` holds time step `t` of every sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// shape: [max_length_enco][batch_size]
    pub encoder_seqs: Vec<Vec<WordId>>,
    /// shape: [max_length_deco][batch_size]
    pub decoder_seqs: Vec<Vec<WordId>>,
    /// shape: [max_length_deco][batch_size]
    pub target_seqs:  Vec<Vec<WordId>>,
    /// shape: [max_length_deco][batch_size]
    pub weights:      Vec<Vec<f32>>,
}

impl Batch {
    pub fn batch_size(&self) -> usize {
        self.encoder_seqs.first().map_or(0, Vec::len)
    }

    /// Column `index` of a time-major matrix, i.e. one sample's sequence.
    pub fn column<T: Copy>(matrix: &[Vec<T>], index: usize) -> Vec<T> {
        matrix.iter().map(|row| row[index]).collect()
    }
}

/// Shape and augmentation options for one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    pub max_length_enco: usize,
    pub max_length_deco: usize,
    pub watson_mode:     bool,
    pub auto_encode:     bool,
    pub is_training:     bool,
}

impl BatchConfig {
    /// Encoder holds `max_length` words, decoder adds go and eos.
    pub fn for_max_length(max_length: usize, is_training: bool) -> Self {
        Self {
            max_length_enco: max_length,
            max_length_deco: max_length + 2,
            watson_mode:     false,
            auto_encode:     false,
            is_training,
        }
    }
}

// ─── Seq2SeqBatcher ───────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct Seq2SeqBatcher {
    specials: SpecialTokens,
    config:   BatchConfig,
}

impl Seq2SeqBatcher {
    pub fn new(specials: SpecialTokens, config: BatchConfig) -> Self {
        Self { specials, config }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Build one batch. The samples themselves are never modified.
    ///
    /// # Panics
    /// Panics if a reversed input is longer than `max_length_enco` or a
    /// wrapped target is longer than `max_length_deco`.
    pub fn make_batch<R: Rng + ?Sized>(&self, samples: &[Sample], rng: &mut R) -> Batch {
        let cfg = &self.config;
        let pad = self.specials.pad;

        let mut encoder = Vec::with_capacity(samples.len());
        let mut decoder = Vec::with_capacity(samples.len());
        let mut target  = Vec::with_capacity(samples.len());
        let mut weights = Vec::with_capacity(samples.len());

        for sample in samples {
            let (input, output) = self.augment(sample, rng);

            let mut enc: Vec<WordId> = input.iter().rev().copied().collect();
            let mut dec: Vec<WordId> = std::iter::once(self.specials.go)
                .chain(output.iter().copied())
                .chain(std::iter::once(self.specials.eos))
                .collect();

            // Long sentences should have been filtered during dataset creation
            assert!(
                enc.len() <= cfg.max_length_enco,
                "encoder sequence of length {} exceeds max_length_enco {}",
                enc.len(),
                cfg.max_length_enco
            );
            assert!(
                dec.len() <= cfg.max_length_deco,
                "decoder sequence of length {} exceeds max_length_deco {}",
                dec.len(),
                cfg.max_length_deco
            );

            let mut tgt: Vec<WordId> = dec[1..].to_vec();
            let real = tgt.len();

            // Left padding for the input, right padding for the outputs
            let mut left = vec![pad; cfg.max_length_enco - enc.len()];
            left.append(&mut enc);
            dec.resize(cfg.max_length_deco, pad);
            tgt.resize(cfg.max_length_deco, pad);

            let mut w = vec![1.0f32; real];
            w.resize(cfg.max_length_deco, 0.0);

            encoder.push(left);
            decoder.push(dec);
            target.push(tgt);
            weights.push(w);
        }

        Batch {
            encoder_seqs: transpose(&encoder, cfg.max_length_enco),
            decoder_seqs: transpose(&decoder, cfg.max_length_deco),
            target_seqs:  transpose(&target, cfg.max_length_deco),
            weights:      transpose(&weights, cfg.max_length_deco),
        }
    }

    /// Apply watson mode and auto-encoding to one sample (training only).
    fn augment<R: Rng + ?Sized>(&self, sample: &Sample, rng: &mut R) -> (Vec<WordId>, Vec<WordId>) {
        let cfg = &self.config;
        let sample = if cfg.is_training && cfg.watson_mode {
            sample.swapped()
        } else {
            sample.clone()
        };
        let mut pair = (sample.input, sample.target);
        if cfg.is_training && cfg.auto_encode {
            let side = if rng.gen_bool(0.5) { pair.0 } else { pair.1 };
            pair = (side.clone(), side);
        }
        pair
    }
}

/// [batch][time] → [time][batch]
fn transpose<T: Copy>(rows: &[Vec<T>], time_steps: usize) -> Vec<Vec<T>> {
    (0..time_steps)
        .map(|t| rows.iter().map(|row| row[t]).collect())
        .collect()
}

// ─── Seq2SeqTensorBatch ───────────────────────────────────────────────────────
/// The same batch stacked into Burn tensors, all of shape [seq_len, batch_size].
#[derive(Debug, Clone)]
pub struct Seq2SeqTensorBatch<B: Backend> {
    pub encoder_inputs:  Tensor<B, 2, Int>,
    pub decoder_inputs:  Tensor<B, 2, Int>,
    pub decoder_targets: Tensor<B, 2, Int>,
    pub weights:         Tensor<B, 2>,
}

// ─── TensorBatcher ────────────────────────────────────────────────────────────
/// Burn DataLoader adapter. Holds the target device so tensors are
/// created on the correct GPU/CPU.
pub struct TensorBatcher<B: Backend> {
    inner:  Seq2SeqBatcher,
    device: B::Device,
    rng:    Mutex<rand::rngs::StdRng>,
}

impl<B: Backend> TensorBatcher<B> {
    pub fn new(inner: Seq2SeqBatcher, device: B::Device, seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            inner,
            device,
            rng: Mutex::new(rand::rngs::StdRng::seed_from_u64(seed)),
        }
    }

    /// Stack an already-built time-major batch into tensors.
    pub fn to_tensors(&self, batch: &Batch) -> Seq2SeqTensorBatch<B> {
        Seq2SeqTensorBatch {
            encoder_inputs:  int_matrix(&batch.encoder_seqs, &self.device),
            decoder_inputs:  int_matrix(&batch.decoder_seqs, &self.device),
            decoder_targets: int_matrix(&batch.target_seqs, &self.device),
            weights:         float_matrix(&batch.weights, &self.device),
        }
    }
}

impl<B: Backend> Batcher<Sample, Seq2SeqTensorBatch<B>> for TensorBatcher<B> {
    fn batch(&self, items: Vec<Sample>) -> Seq2SeqTensorBatch<B> {
        // A poisoned lock only means another worker panicked mid-batch;
        // the rng state itself is still usable.
        let mut rng = match self.rng.lock() {
            Ok(guard)    => guard,
            Err(poison) => poison.into_inner(),
        };
        let batch = self.inner.make_batch(&items, &mut *rng);
        self.to_tensors(&batch)
    }
}

fn int_matrix<B: Backend>(rows: &[Vec<WordId>], device: &B::Device) -> Tensor<B, 2, Int> {
    let steps = rows.len();
    let width = rows.first().map_or(0, Vec::len);
    let flat: Vec<i32> = rows.iter().flatten().map(|&x| x as i32).collect();
    Tensor::<B, 1, Int>::from_ints(flat.as_slice(), device).reshape([steps, width])
}

fn float_matrix<B: Backend>(rows: &[Vec<f32>], device: &B::Device) -> Tensor<B, 2> {
    let steps = rows.len();
    let width = rows.first().map_or(0, Vec::len);
    let flat: Vec<f32> = rows.iter().flatten().copied().collect();
    Tensor::<B, 1>::from_floats(flat.as_slice(), device).reshape([steps, width])
}
