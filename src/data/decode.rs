//! Turning id sequences back into readable text.
//!
//! Used for inspecting samples and batches and for rendering decoder
//! output at inference time.

use crate::data::batcher::Batch;
use crate::data::vocabulary::Vocabulary;
use crate::domain::sample::{WordId, UNKNOWN_TOKEN};

/// Words of `sequence` joined by spaces.
///
/// With `clean`, decoding stops at eos, pad and go are dropped, and the
/// words are detokenized. `reverse` restores the natural order of an
/// encoder sequence (only meaningful with `clean`).
pub fn sequence_to_str(vocab: &Vocabulary, sequence: &[WordId], clean: bool, reverse: bool) -> String {
    let word = |id: WordId| vocab.word(id).unwrap_or(UNKNOWN_TOKEN);

    if !clean {
        return sequence.iter().map(|&id| word(id)).collect::<Vec<_>>().join(" ");
    }

    let specials = vocab.specials();
    let mut words: Vec<&str> = sequence
        .iter()
        .take_while(|&&id| id != specials.eos)
        .filter(|&&id| id != specials.pad && id != specials.go)
        .map(|&id| word(id))
        .collect();
    if reverse {
        words.reverse();
    }
    detokenize(&words)
}

/// Join tokens with spaces, gluing punctuation to the previous word and
/// the word after an apostrophe to the apostrophe, then capitalize the
/// first letter.
///
///   ["hello", ",", "it", "'", "s", "me", "."] → "Hello, it's me."
pub fn detokenize<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut out = String::new();
    let mut after_apostrophe = false;
    for t in tokens {
        let t = t.as_ref();
        let glue = after_apostrophe || t.starts_with('\'') || is_punctuation(t);
        if !glue {
            out.push(' ');
        }
        out.push_str(t);
        after_apostrophe = t == "'";
    }
    capitalize(out.trim())
}

/// Read sample `index` out of a time-major matrix and decode it.
pub fn batch_seq_to_str(
    vocab:   &Vocabulary,
    matrix:  &[Vec<WordId>],
    index:   usize,
    clean:   bool,
    reverse: bool,
) -> String {
    sequence_to_str(vocab, &Batch::column(matrix, index), clean, reverse)
}

/// Greedy decoding: the highest-scoring id at each decoder step.
pub fn deco_to_sentence(decoder_outputs: &[Vec<f32>]) -> Vec<WordId> {
    decoder_outputs
        .iter()
        .map(|scores| {
            scores
                .iter()
                .enumerate()
                .fold((0usize, f32::NEG_INFINITY), |best, (i, &s)| if s > best.1 { (i, s) } else { best })
                .0 as WordId
        })
        .collect()
}

/// Every sample of a batch as encoder / decoder / target / weight lines.
pub fn describe_batch(vocab: &Vocabulary, batch: &Batch) -> Vec<String> {
    let mut lines = Vec::new();
    for i in 0..batch.batch_size() {
        let weights: Vec<String> = Batch::column(&batch.weights, i)
            .iter()
            .map(|w| w.to_string())
            .collect();
        lines.push(format!("Encoder: {}", batch_seq_to_str(vocab, &batch.encoder_seqs, i, false, false)));
        lines.push(format!("Decoder: {}", batch_seq_to_str(vocab, &batch.decoder_seqs, i, false, false)));
        lines.push(format!("Targets: {}", batch_seq_to_str(vocab, &batch.target_seqs, i, false, false)));
        lines.push(format!("Weights: {}", weights.join(" ")));
    }
    lines
}

fn is_punctuation(t: &str) -> bool {
    !t.is_empty() && t.chars().all(|c| c.is_ascii_punctuation())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None        => String::new(),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::TextTokenizer;
    use crate::infra::tokenizer::WordTokenizer;

    fn vocab() -> Vocabulary {
        let mut v = Vocabulary::with_reserved_tokens();
        for w in ["hello", ",", "it", "'s", "me", "."] {
            v.assign(w);
        }
        v
    }

    #[test]
    fn test_detokenize_glues_punctuation() {
        assert_eq!(detokenize(&["hello", ",", "it", "'", "s", "me", "."]), "Hello, it's me.");
        assert_eq!(detokenize(&["it", "'s", "me"]), "It's me");
        assert_eq!(detokenize::<&str>(&[]), "");
    }

    #[test]
    fn test_tokenized_line_decodes_back() {
        let tok = WordTokenizer::new();
        let mut v = Vocabulary::with_reserved_tokens();
        let ids: Vec<WordId> = tok
            .word_split("Hello, it's me.")
            .unwrap()
            .iter()
            .map(|w| v.assign(w))
            .collect();
        assert_eq!(sequence_to_str(&v, &ids, true, false), "Hello, it's me.");
    }

    #[test]
    fn test_raw_sequence_keeps_specials() {
        let v = vocab();
        assert_eq!(sequence_to_str(&v, &[1, 4, 2, 0], false, false), "<go> hello <eos> <pad>");
    }

    #[test]
    fn test_clean_sequence_stops_at_eos() {
        let v = vocab();
        // go hello , it 's me . eos pad
        let seq = [1, 4, 5, 6, 7, 8, 9, 2, 0];
        assert_eq!(sequence_to_str(&v, &seq, true, false), "Hello, it's me.");
        assert_eq!(sequence_to_str(&v, &[], true, false), "");
    }

    #[test]
    fn test_clean_reverse_restores_encoder_order() {
        let v = vocab();
        // left-padded, reversed "hello me"
        assert_eq!(sequence_to_str(&v, &[0, 0, 8, 4], true, true), "Hello me");
    }

    #[test]
    fn test_deco_to_sentence_is_argmax() {
        let outputs = vec![vec![0.1, 0.7, 0.2], vec![0.9, 0.05, 0.05], vec![0.0, 0.0, 1.0]];
        assert_eq!(deco_to_sentence(&outputs), vec![1, 0, 2]);
    }

    #[test]
    fn test_batch_column_decoding() {
        let v = vocab();
        let matrix = vec![vec![0, 4], vec![4, 8]];
        assert_eq!(batch_seq_to_str(&v, &matrix, 1, false, false), "hello me");
    }
}
