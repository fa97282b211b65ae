// ============================================================
// Layer 3 — Conversation Domain Types
// ============================================================
// A conversation is an ordered list of lines exchanged between
// speakers. Each consecutive pair of lines becomes one
// (input, target) training sample during extraction.
//
// Blank lines are kept as empty-text entries: the extractor is
// the one that decides to discard them, so the line indices
// stay aligned with the source file.

use serde::{Deserialize, Serialize};

/// One utterance inside a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// The raw text of the utterance, already stripped of
    /// surrounding whitespace by the corpus reader
    pub text: String,
}

impl Line {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// An ordered sequence of lines. Line `i + 1` answers line `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub lines: Vec<Line>,
}

impl Conversation {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// Build a conversation straight from string slices.
    ///
    /// Example:
    ///   let conv = Conversation::from_texts(["Hi", "Hello", "Bye"]);
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: texts.into_iter().map(Line::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
