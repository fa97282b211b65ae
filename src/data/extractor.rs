// ============================================================
// Layer 4 — Corpus Extractor
// ============================================================
// Walks conversations and turns each adjacent line pair into a
// sentence-grouped sample of word ids.
//
// For lines ["Hi", "Hello", "Bye"]:
//   step 1 → ("Hi" → "Hello"), ("Hello" → "Bye")
//   step 2 → ("Hi" → "Hello")             (skip_lines)
//
// The last line of a conversation never becomes an input: there
// is nothing answering it.
//
// A pair is discarded when either side tokenizes to no sentence
// at all (blank line). Emission order follows conversation and
// line order so re-extraction is reproducible.

use anyhow::Result;

use crate::data::vocabulary::Vocabulary;
use crate::domain::conversation::Conversation;
use crate::domain::sample::{RawSample, WordId};
use crate::domain::traits::TextTokenizer;

pub struct Extractor<'a, T: TextTokenizer + ?Sized> {
    tokenizer:  &'a T,
    skip_lines: bool,
}

impl<'a, T: TextTokenizer + ?Sized> Extractor<'a, T> {
    pub fn new(tokenizer: &'a T, skip_lines: bool) -> Self {
        Self { tokenizer, skip_lines }
    }

    fn step(&self) -> usize {
        if self.skip_lines { 2 } else { 1 }
    }

    /// Extract samples from every conversation, growing `vocab` as words
    /// are encountered.
    pub fn extract(
        &self,
        conversations: &[Conversation],
        vocab:         &mut Vocabulary,
    ) -> Result<Vec<RawSample>> {
        let mut samples = Vec::new();
        for conversation in conversations {
            self.extract_conversation(conversation, vocab, &mut samples)?;
        }
        tracing::info!(
            "Extracted {} samples from {} conversations ({} words)",
            samples.len(),
            conversations.len(),
            vocab.len()
        );
        Ok(samples)
    }

    fn extract_conversation(
        &self,
        conversation: &Conversation,
        vocab:        &mut Vocabulary,
        out:          &mut Vec<RawSample>,
    ) -> Result<()> {
        let lines = &conversation.lines;
        for i in (0..lines.len().saturating_sub(1)).step_by(self.step()) {
            let input  = self.extract_text(&lines[i].text, vocab)?;
            let target = self.extract_text(&lines[i + 1].text, vocab)?;

            if input.is_empty() || target.is_empty() {
                continue;
            }
            out.push(RawSample::new(input, target));
        }
        Ok(())
    }

    /// Sentence-grouped word ids of one line.
    fn extract_text(&self, text: &str, vocab: &mut Vocabulary) -> Result<Vec<Vec<WordId>>> {
        Ok(self
            .tokenizer
            .tokenize(text)?
            .iter()
            .map(|sentence| sentence.iter().map(|w| vocab.assign(w)).collect())
            .collect())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::tokenizer::WordTokenizer;

    fn run(texts: &[&str], skip_lines: bool) -> (Vec<RawSample>, Vocabulary) {
        let tok   = WordTokenizer::new();
        let mut v = Vocabulary::with_reserved_tokens();
        let convs = vec![Conversation::from_texts(texts.iter().copied())];
        let samples = Extractor::new(&tok, skip_lines).extract(&convs, &mut v).unwrap();
        (samples, v)
    }

    #[test]
    fn test_adjacent_pairs() {
        let (samples, v) = run(&["Hi", "Hello", "Bye"], false);
        let (hi, hello, bye) = (v.id("hi").unwrap(), v.id("hello").unwrap(), v.id("bye").unwrap());
        assert_eq!(
            samples,
            vec![
                RawSample::new(vec![vec![hi]], vec![vec![hello]]),
                RawSample::new(vec![vec![hello]], vec![vec![bye]]),
            ]
        );
    }

    #[test]
    fn test_skip_lines_steps_by_two() {
        let (samples, _) = run(&["a", "b", "c", "d", "e"], true);
        // pairs (0,1) and (2,3); line 4 has no answer
        assert_eq!(samples.len(), 2);
    }

    #[test]
    fn test_blank_lines_discard_both_pairs() {
        let (samples, _) = run(&["Hi", "", "Bye"], false);
        assert!(samples.is_empty());
    }

    #[test]
    fn test_counts_every_occurrence() {
        // "hello" appears as target of pair 0 and input of pair 1
        let (_, v) = run(&["Hi", "Hello", "Bye"], false);
        assert_eq!(v.count(v.id("hello").unwrap()), Some(2));
        assert_eq!(v.count(v.id("hi").unwrap()), Some(1));
    }

    #[test]
    fn test_sentences_stay_grouped() {
        let (samples, _) = run(&["Hi there. How are you?", "Fine."], false);
        assert_eq!(samples[0].input.len(), 2);
        assert_eq!(samples[0].input[1].len(), 4);
        assert_eq!(samples[0].target.len(), 1);
    }

    #[test]
    fn test_single_line_conversation_yields_nothing() {
        let (samples, _) = run(&["alone"], false);
        assert!(samples.is_empty());
    }
}
