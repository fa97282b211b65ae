// ============================================================
// Layer 2 — Staged Corpus Pipeline
// ============================================================
// TextData owns one vocabulary and one sample collection and
// moves through four stages, each a distinct type:
//
//   Raw ──extract──▶ Extracted ──filter──▶ Filtered ──freeze──▶ Frozen
//   (reserved       (sentence-grouped     (flat, bounded,      (validated,
//    tokens only)    samples + counts)     pruned vocab)        read-only vocab)
//
// Each transition consumes the previous stage, so counts can't
// be read after filtering has zeroed them and the vocabulary
// can't grow once inference lookups begin. Only Frozen hands out
// batches.
//
// Extracted and Filtered snapshots can be saved and reloaded.

use anyhow::Result;
use rand::Rng;
use std::{marker::PhantomData, path::Path};

use crate::data::{
    batcher::{Batch, BatchConfig, Seq2SeqBatcher},
    dataset::Seq2SeqDataset,
    decode,
    extractor::Extractor,
    filter::{filter_samples, FilterOptions},
    scheduler::epoch_batches,
    vocabulary::Vocabulary,
};
use crate::domain::{
    conversation::Conversation,
    error::CorpusError,
    sample::{RawSample, Sample, SpecialTokens, WordId},
    traits::{Persistable, TextTokenizer},
};
use crate::infra::dataset_store::{load_record, save_record, DatasetRecord};

// ─── Stage tags ───────────────────────────────────────────────────────────────
pub trait Stage {
    type Sample;
}

/// Reserved tokens registered, nothing extracted yet
pub struct Raw;
/// Full corpus: sentence-grouped samples and word counts
pub struct Extracted;
/// Length-bounded samples over a pruned vocabulary
pub struct Filtered;
/// Validated and read-only; ready for batching and inference
pub struct Frozen;

impl Stage for Raw       { type Sample = RawSample; }
impl Stage for Extracted { type Sample = RawSample; }
impl Stage for Filtered  { type Sample = Sample; }
impl Stage for Frozen    { type Sample = Sample; }

// ─── TextData ─────────────────────────────────────────────────────────────────
pub struct TextData<S: Stage> {
    vocab:   Vocabulary,
    samples: Vec<S::Sample>,
    _stage:  PhantomData<S>,
}

impl<S: Stage> TextData<S> {
    fn from_parts(vocab: Vocabulary, samples: Vec<S::Sample>) -> Self {
        Self { vocab, samples, _stage: PhantomData }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn specials(&self) -> SpecialTokens {
        self.vocab.specials()
    }

    pub fn samples(&self) -> &[S::Sample] {
        &self.samples
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocab.len()
    }
}

impl TextData<Raw> {
    pub fn new() -> Self {
        Self::from_parts(Vocabulary::with_reserved_tokens(), Vec::new())
    }

    /// Build the full corpus from conversations.
    pub fn extract<T: TextTokenizer + ?Sized>(
        mut self,
        conversations: &[Conversation],
        tokenizer:     &T,
        skip_lines:    bool,
    ) -> Result<TextData<Extracted>> {
        let samples = Extractor::new(tokenizer, skip_lines).extract(conversations, &mut self.vocab)?;
        Ok(TextData::from_parts(self.vocab, samples))
    }
}

impl Default for TextData<Raw> {
    fn default() -> Self {
        Self::new()
    }
}

impl TextData<Extracted> {
    /// Bound lengths, prune the vocabulary, and remap every sample.
    pub fn filter(self, opts: &FilterOptions) -> TextData<Filtered> {
        tracing::info!(
            "Filtering words (vocabSize = {} and wordCount > {})",
            opts.vocabulary_size,
            opts.filter_vocab
        );
        let (samples, vocab) = filter_samples(&self.samples, self.vocab, opts);
        TextData::from_parts(vocab, samples)
    }
}

impl TextData<Filtered> {
    /// Check the dataset can be trained on: pad is id 0, every id is
    /// known, both sides fit `max_length`, and no target holds unknown.
    pub fn freeze(self, max_length: usize) -> Result<TextData<Frozen>, CorpusError> {
        let specials = self.vocab.specials();
        if specials.pad != 0 {
            return Err(CorpusError::PadNotZero(specials.pad));
        }

        let size = self.vocab.len() as WordId;
        for (i, s) in self.samples.iter().enumerate() {
            if let Some(&bad) = s.input.iter().chain(&s.target).find(|&&w| w >= size) {
                return Err(CorpusError::CorruptedDataset(format!(
                    "sample {i} uses id {bad} outside a vocabulary of {size}"
                )));
            }
            if s.input.len() > max_length || s.target.len() > max_length {
                return Err(CorpusError::CorruptedDataset(format!(
                    "sample {i} is longer than max_length {max_length}"
                )));
            }
            if s.target.contains(&specials.unknown) {
                return Err(CorpusError::CorruptedDataset(format!(
                    "sample {i} has an unknown word in its target"
                )));
            }
        }

        Ok(TextData::from_parts(self.vocab, self.samples))
    }
}

impl TextData<Frozen> {
    pub fn batcher(&self, config: BatchConfig) -> Seq2SeqBatcher {
        Seq2SeqBatcher::new(self.vocab.specials(), config)
    }

    /// Shuffle the samples and cut them into batches for one epoch.
    pub fn get_batches<R: Rng + ?Sized>(
        &mut self,
        batch_size: usize,
        config:     BatchConfig,
        rng:        &mut R,
    ) -> Vec<Batch> {
        let batcher = self.batcher(config);
        epoch_batches(&mut self.samples, batch_size, &batcher, rng)
    }

    /// Encode one user sentence as a single-sample inference batch.
    ///
    /// Unknown words map to the unknown id. Returns `None` for an empty
    /// sentence or one with more than `max_length` tokens.
    pub fn sentence_to_batch<T: TextTokenizer + ?Sized>(
        &self,
        sentence:   &str,
        tokenizer:  &T,
        max_length: usize,
    ) -> Result<Option<Batch>> {
        let tokens = tokenizer.word_split(sentence)?;
        if tokens.is_empty() || tokens.len() > max_length {
            return Ok(None);
        }

        let ids: Vec<WordId> = tokens.iter().map(|t| self.vocab.lookup(t)).collect();
        let batcher = self.batcher(BatchConfig::for_max_length(max_length, false));
        // Inference never draws from the rng
        let batch = batcher.make_batch(&[Sample::new(ids, Vec::new())], &mut rand::thread_rng());
        Ok(Some(batch))
    }

    pub fn sequence_to_str(&self, sequence: &[WordId], clean: bool, reverse: bool) -> String {
        decode::sequence_to_str(&self.vocab, sequence, clean, reverse)
    }

    /// `n` random (question, answer) pairs as readable text.
    pub fn play_dataset<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<(String, String)> {
        if self.samples.is_empty() {
            return Vec::new();
        }
        (0..n)
            .map(|_| {
                let s = &self.samples[rng.gen_range(0..self.samples.len())];
                (
                    self.sequence_to_str(&s.input, true, false),
                    self.sequence_to_str(&s.target, true, false),
                )
            })
            .collect()
    }

    pub fn describe_batch(&self, batch: &Batch) -> Vec<String> {
        decode::describe_batch(&self.vocab, batch)
    }

    /// Hand the samples to Burn's DataLoader.
    pub fn to_dataset(&self) -> Seq2SeqDataset {
        Seq2SeqDataset::new(self.samples.clone())
    }
}

// ─── Persistence ──────────────────────────────────────────────────────────────
impl Persistable for TextData<Extracted> {
    fn save(&self, path: &Path) -> Result<()> {
        save_record(&DatasetRecord::from_parts(&self.vocab, self.samples.iter().collect::<Vec<_>>()), path)
    }

    fn load(path: &Path) -> Result<Self> {
        let (vocab, samples) = load_record::<RawSample>(path)?.into_parts()?;
        if !vocab.has_counts() {
            return Err(CorpusError::CorruptedDataset(format!(
                "full dataset '{}' has no word counts",
                path.display()
            ))
            .into());
        }

        let size = vocab.len() as WordId;
        for (i, s) in samples.iter().enumerate() {
            if let Some(&bad) = s.input.iter().chain(&s.target).flatten().find(|&&w| w >= size) {
                return Err(CorpusError::CorruptedDataset(format!(
                    "full dataset '{}': sample {i} uses id {bad} outside a vocabulary of {size}",
                    path.display()
                ))
                .into());
            }
        }
        Ok(Self::from_parts(vocab, samples))
    }
}

impl Persistable for TextData<Filtered> {
    fn save(&self, path: &Path) -> Result<()> {
        save_record(&DatasetRecord::from_parts(&self.vocab, self.samples.iter().collect::<Vec<_>>()), path)
    }

    fn load(path: &Path) -> Result<Self> {
        let (vocab, samples) = load_record::<Sample>(path)?.into_parts()?;
        Ok(Self::from_parts(vocab, samples))
    }
}
