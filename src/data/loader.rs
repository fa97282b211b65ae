// ============================================================
// Layer 4 — Lightweight Corpus Loader
// ============================================================
// Reads the plain-text dialogue format:
//
//   from A to B
//   from B to A
//   ===
//   from C to D
//   from D to C
//
// Every line is one utterance, answered by the next line.
// A line reading exactly `===` (after trimming) closes the
// current conversation. Lines are trimmed; blank lines are kept
// as empty-text lines rather than skipped. A trailing
// conversation without a closing separator is still emitted.
//
// A missing or unreadable file fails the whole load, so no
// vocabulary is ever built from a partial corpus.

use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::domain::conversation::{Conversation, Line};
use crate::domain::traits::ConversationSource;

pub const CONVERSATION_SEPARATOR: &str = "===";

/// Loads `===`-separated conversations from one text file.
pub struct LightweightLoader {
    path: PathBuf,
}

impl LightweightLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConversationSource for LightweightLoader {
    fn conversations(&self) -> Result<Vec<Conversation>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Cannot open corpus '{}'", self.path.display()))?;

        let conversations = parse_lines(BufReader::new(file))
            .with_context(|| format!("Cannot read corpus '{}'", self.path.display()))?;

        tracing::info!(
            "Loaded {} conversations from '{}'",
            conversations.len(),
            self.path.display()
        );
        Ok(conversations)
    }
}

/// Split a reader of lightweight-formatted text into conversations.
pub fn parse_lines<R: BufRead>(reader: R) -> Result<Vec<Conversation>> {
    let mut conversations = Vec::new();
    let mut buffer        = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let text = line.trim();
        if text == CONVERSATION_SEPARATOR {
            conversations.push(Conversation::new(std::mem::take(&mut buffer)));
        } else {
            buffer.push(Line::new(text));
        }
    }
    // Flush the last conversation
    if !buffer.is_empty() {
        conversations.push(Conversation::new(buffer));
    }

    Ok(conversations)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> Vec<Conversation> {
        parse_lines(Cursor::new(text)).unwrap()
    }

    #[test]
    fn test_separator_splits_conversations() {
        let convs = parse("a\nb\n===\nc\nd\n");
        assert_eq!(convs.len(), 2);
        assert_eq!(convs[0], Conversation::from_texts(["a", "b"]));
        assert_eq!(convs[1], Conversation::from_texts(["c", "d"]));
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let convs = parse("a\n   \nb\n");
        assert_eq!(convs[0], Conversation::from_texts(["a", "", "b"]));
    }

    #[test]
    fn test_lines_are_trimmed() {
        let convs = parse("  hello  \n  === \nbye");
        assert_eq!(convs[0], Conversation::from_texts(["hello"]));
        assert_eq!(convs[1], Conversation::from_texts(["bye"]));
    }

    #[test]
    fn test_trailing_separator_adds_no_empty_tail() {
        assert_eq!(parse("a\nb\n===\n").len(), 1);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let loader = LightweightLoader::new("definitely/not/here.txt");
        assert!(loader.conversations().is_err());
    }

    #[test]
    fn test_reads_file_from_disk() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.txt");
        std::fs::write(&path, "Hi\nHello\n===\nYes\nNo\n").unwrap();
        let convs = LightweightLoader::new(&path).conversations().unwrap();
        assert_eq!(convs.len(), 2);
    }
}
