// ============================================================
// Layer 6 — Word Tokenizer
// ============================================================
// Concrete TextTokenizer used by extraction and inference.
//
// Sentence split: a sentence ends after a run of terminal
// punctuation (. ! ?), optionally followed by closing quotes or
// brackets, when whitespace or the end of text comes next.
// "e.g." mid-sentence is treated as a boundary too; for short
// chat lines that trade-off is acceptable.
//
// Word split: HuggingFace's Whitespace pre-tokenizer, which
// matches \w+|[^\w\s]+ and therefore separates punctuation
// from words:
//   "How are you?" → ["How", "are", "you", "?"]
//
// Case is left untouched; the vocabulary folds case.

use anyhow::Result;
use tokenizers::pre_tokenizers::whitespace::Whitespace;
use tokenizers::{OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer};

use crate::domain::error::CorpusError;
use crate::domain::traits::TextTokenizer;

const TERMINATORS: [char; 3] = ['.', '!', '?'];
const CLOSERS: [char; 4] = ['"', '\'', ')', ']'];

#[derive(Debug, Clone, Default)]
pub struct WordTokenizer {
    words: Whitespace,
}

impl WordTokenizer {
    pub fn new() -> Self {
        Self { words: Whitespace::default() }
    }
}

impl TextTokenizer for WordTokenizer {
    fn sentence_split(&self, text: &str) -> Result<Vec<String>> {
        let mut sentences = Vec::new();
        let mut current   = String::new();
        let mut chars     = text.chars().peekable();

        while let Some(c) = chars.next() {
            current.push(c);
            if !TERMINATORS.contains(&c) {
                continue;
            }
            // Swallow the rest of the punctuation run ("?!", "...", ".\"")
            while let Some(&next) = chars.peek() {
                if TERMINATORS.contains(&next) || CLOSERS.contains(&next) {
                    current.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            if chars.peek().map_or(true, |n| n.is_whitespace()) {
                push_trimmed(&mut sentences, &current);
                current.clear();
            }
        }
        push_trimmed(&mut sentences, &current);

        Ok(sentences)
    }

    fn word_split(&self, sentence: &str) -> Result<Vec<String>> {
        let mut pretokenized = PreTokenizedString::from(sentence);
        self.words
            .pre_tokenize(&mut pretokenized)
            .map_err(|e| CorpusError::Tokenizer(e.to_string()))?;

        Ok(pretokenized
            .get_splits(OffsetReferential::Original, OffsetType::Byte)
            .into_iter()
            .filter(|(word, _, _)| !word.is_empty())
            .map(|(word, _, _)| word.to_string())
            .collect())
    }
}

fn push_trimmed(out: &mut Vec<String>, sentence: &str) {
    let s = sentence.trim();
    if !s.is_empty() {
        out.push(s.to_string());
    }
}
