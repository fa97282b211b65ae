// ============================================================
// Layer 4 — Sample Filter
// ============================================================
// Turns the full, sentence-grouped corpus into the training
// corpus. Two passes over the full samples, in order:
//
// Pass 1 — length reduction
//   Input side:  walk sentences from the END backward, keeping
//                each one whose tokens still fit in max_length
//                (most recent context wins).
//   Target side: walk sentences from the START forward under
//                the same bound (earliest continuation wins).
//   A sentence that does not fit is dropped and each of its
//   tokens gives back one count; a shorter sentence further
//   along may still fit.
//
// Pass 2 — vocabulary pruning
//   Reserved ids always survive. Every other id is ranked by
//   descending count (ties: lower id first); the first
//   vocabulary_size (0 = all) are candidates, and a candidate is
//   kept when its count > filter_vocab. Kept ids are renumbered
//   densely in their original order, pruned ids map to unknown.
//
//   Afterwards a sample is kept only if its input has a known
//   word, its target has a known word, and its target has no
//   unknown word at all.
//
// The remap is computed from an immutable snapshot of the old
// vocabulary; a fresh Vocabulary is built from it.

use crate::data::vocabulary::Vocabulary;
use crate::domain::sample::{RawSample, Sample, WordId};

/// Knobs of the filtering step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOptions {
    /// Upper bound on tokens per side
    pub max_length:      usize,
    /// Number of non-reserved words to keep (0 = unlimited)
    pub vocabulary_size: usize,
    /// A kept word must occur strictly more often than this
    pub filter_vocab:    u64,
}

/// Run both passes. Consumes the full vocabulary; the returned one has
/// no counts.
pub fn filter_samples(
    samples:   &[RawSample],
    mut vocab: Vocabulary,
    opts:      &FilterOptions,
) -> (Vec<Sample>, Vocabulary) {
    // ── Pass 1: merge sentences under the length bound ───────────────────────
    let merged: Vec<Sample> = samples
        .iter()
        .map(|s| {
            Sample::new(
                merge_sentences(&s.input, true, opts.max_length, &mut vocab),
                merge_sentences(&s.target, false, opts.max_length, &mut vocab),
            )
        })
        .collect();

    // ── Pass 2: select words and remap ids ───────────────────────────────────
    let kept      = select_word_ids(&vocab, opts);
    let remap     = build_remap(&vocab, &kept);
    let new_vocab = vocab.compacted(&kept);
    let unknown   = new_vocab.specials().unknown;

    let before = merged.len();
    let filtered: Vec<Sample> = merged
        .into_iter()
        .map(|s| {
            Sample::new(
                s.input.iter().map(|&w| remap[w as usize]).collect(),
                s.target.iter().map(|&w| remap[w as usize]).collect(),
            )
        })
        .filter(|s| is_valid(s, unknown))
        .collect();

    tracing::info!(
        "Filtered corpus: {} → {} samples, {} → {} words",
        before,
        filtered.len(),
        vocab.len(),
        new_vocab.len()
    );
    if filtered.is_empty() && before > 0 {
        tracing::warn!("No sample survived filtering (max_length = {})", opts.max_length);
    }

    (filtered, new_vocab)
}

/// Flatten the sentences of one side, keeping as many as fit in
/// `max_length`. `from_end` walks backward and prepends.
pub fn merge_sentences(
    sentences:  &[Vec<WordId>],
    from_end:   bool,
    max_length: usize,
    vocab:      &mut Vocabulary,
) -> Vec<WordId> {
    let ordered: Box<dyn Iterator<Item = &Vec<WordId>>> = if from_end {
        Box::new(sentences.iter().rev())
    } else {
        Box::new(sentences.iter())
    };

    let mut kept: Vec<&[WordId]> = Vec::new();
    let mut len = 0usize;
    for sentence in ordered {
        if len + sentence.len() <= max_length {
            len += sentence.len();
            kept.push(sentence);
        } else {
            // The sentence is not used, neither are its words
            for &w in sentence {
                vocab.decrement(w);
            }
        }
    }
    if from_end {
        kept.reverse();
    }
    kept.concat()
}

/// Sorted ids that survive pruning, reserved ids included.
pub fn select_word_ids(vocab: &Vocabulary, opts: &FilterOptions) -> Vec<WordId> {
    let specials = vocab.specials();

    let mut ranked: Vec<(WordId, u64)> = (0..vocab.len() as WordId)
        .filter(|&id| !specials.contains(id))
        .map(|id| (id, vocab.count(id).unwrap_or(0)))
        .collect();
    // Stable sort keeps ascending ids among equal counts
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    if opts.vocabulary_size > 0 {
        ranked.truncate(opts.vocabulary_size);
    }

    let mut kept: Vec<WordId> = ranked
        .into_iter()
        .filter(|&(_, count)| count > opts.filter_vocab)
        .map(|(id, _)| id)
        .chain(specials.as_array())
        .collect();
    kept.sort_unstable();
    kept.dedup();
    kept
}

/// old id → new id, indexed by old id. Pruned ids map to the new unknown id.
fn build_remap(vocab: &Vocabulary, kept: &[WordId]) -> Vec<WordId> {
    let new_unknown = kept
        .binary_search(&vocab.specials().unknown)
        .map(|p| p as WordId)
        .unwrap_or(vocab.specials().unknown);

    let mut remap = vec![new_unknown; vocab.len()];
    for (new, &old) in kept.iter().enumerate() {
        remap[old as usize] = new as WordId;
    }
    remap
}

fn is_valid(sample: &Sample, unknown: WordId) -> bool {
    let has_known = |seq: &[WordId]| seq.iter().any(|&w| w != unknown);
    has_known(&sample.input)
        && has_known(&sample.target)
        && !sample.target.contains(&unknown)
}
