// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The pipeline depends on two external collaborators:
//
//   ConversationSource — any reader that turns an on-disk corpus
//                        into ordered conversations
//   TextTokenizer      — splits text into sentences, and each
//                        sentence into word tokens
//
// The application layer only sees these traits, so a new corpus
// format or tokenizer plugs in without touching the pipeline.

use anyhow::Result;
use std::path::Path;

use crate::domain::conversation::Conversation;

// ─── ConversationSource ───────────────────────────────────────────────────────
/// Any component that can load conversations from a corpus.
///
/// Implementations:
///   - LightweightLoader → plain text, `===` separated
pub trait ConversationSource {
    /// Load every conversation, in file order. A malformed or
    /// missing corpus fails the whole call.
    fn conversations(&self) -> Result<Vec<Conversation>>;
}

// ─── TextTokenizer ────────────────────────────────────────────────────────────
/// Splits raw text into sentences and words. Case is preserved;
/// case folding belongs to the vocabulary.
pub trait TextTokenizer {
    fn sentence_split(&self, text: &str) -> Result<Vec<String>>;

    fn word_split(&self, sentence: &str) -> Result<Vec<String>>;

    /// Sentence-grouped word tokens of `text`. Blank text yields no sentences.
    fn tokenize(&self, text: &str) -> Result<Vec<Vec<String>>> {
        self.sentence_split(text)?
            .iter()
            .map(|s| self.word_split(s))
            .collect()
    }
}

// ─── Persistable ──────────────────────────────────────────────────────────────
/// Any component whose state can be saved and restored from disk.
///
/// Implementations:
///   - TextData<Extracted> → full corpus snapshot
///   - TextData<Filtered>  → filtered corpus snapshot
pub trait Persistable: Sized {
    fn save(&self, path: &Path) -> Result<()>;

    fn load(path: &Path) -> Result<Self>;
}
