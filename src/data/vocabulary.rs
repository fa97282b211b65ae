// ============================================================
// Layer 4 — Vocabulary
// ============================================================
// Bidirectional word <-> id mapping plus a per-id occurrence
// count.
//
// Id assignment:
//   - ids are dense from 0, in order of first appearance
//   - the four reserved tokens are registered first, so
//     <pad>=0, <go>=1, <eos>=2, <unknown>=3
//   - words are case-folded before lookup or insertion
//
// Two lookup modes:
//   assign(word)  → extraction: inserts unseen words and bumps
//                   the count of seen ones
//   lookup(word)  → inference: read-only, unseen words resolve
//                   to the unknown token
//
// Counts only matter until filtering: the filter reads them to
// rank words, then builds a fresh, count-free vocabulary.

use std::collections::{BTreeMap, HashMap};

use crate::domain::error::CorpusError;
use crate::domain::sample::{SpecialTokens, WordId, RESERVED_TOKENS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    word_to_id: HashMap<String, WordId>,
    id_to_word: Vec<String>,
    /// Empty once the vocabulary has been through filtering
    id_count:   Vec<u64>,
    specials:   SpecialTokens,
}

impl Vocabulary {
    /// A vocabulary holding only the four reserved tokens.
    pub fn with_reserved_tokens() -> Self {
        let mut vocab = Self {
            word_to_id: HashMap::new(),
            id_to_word: Vec::new(),
            id_count:   Vec::new(),
            specials:   SpecialTokens::default(),
        };
        let ids: Vec<WordId> = RESERVED_TOKENS.iter().map(|t| vocab.assign(t)).collect();
        vocab.specials = SpecialTokens {
            pad:     ids[0],
            go:      ids[1],
            eos:     ids[2],
            unknown: ids[3],
        };
        vocab
    }

    /// Rebuild a vocabulary from its persisted parts, re-deriving the
    /// reserved ids by looking up their canonical strings.
    pub fn from_parts(
        word_to_id: HashMap<String, WordId>,
        id_to_word: Vec<String>,
        id_count:   Vec<u64>,
    ) -> Result<Self, CorpusError> {
        if word_to_id.len() != id_to_word.len() {
            return Err(CorpusError::CorruptedDataset(format!(
                "word_to_id has {} entries but id_to_word has {}",
                word_to_id.len(),
                id_to_word.len()
            )));
        }
        for (id, word) in id_to_word.iter().enumerate() {
            if word_to_id.get(word) != Some(&(id as WordId)) {
                return Err(CorpusError::CorruptedDataset(format!(
                    "id {id} ('{word}') is not mapped back to itself"
                )));
            }
        }
        if !id_count.is_empty() && id_count.len() != id_to_word.len() {
            return Err(CorpusError::CorruptedDataset(format!(
                "id_count has {} entries for {} words",
                id_count.len(),
                id_to_word.len()
            )));
        }

        let find = |token: &str| {
            word_to_id
                .get(token)
                .copied()
                .ok_or_else(|| CorpusError::MissingReservedToken(token.to_string()))
        };
        let specials = SpecialTokens {
            pad:     find(RESERVED_TOKENS[0])?,
            go:      find(RESERVED_TOKENS[1])?,
            eos:     find(RESERVED_TOKENS[2])?,
            unknown: find(RESERVED_TOKENS[3])?,
        };

        Ok(Self { word_to_id, id_to_word, id_count, specials })
    }

    /// Extraction-mode lookup: returns the id of `word`, creating it with
    /// count 1 if unseen, otherwise incrementing its count.
    pub fn assign(&mut self, word: &str) -> WordId {
        let word = word.to_lowercase();
        if let Some(&id) = self.word_to_id.get(&word) {
            if let Some(count) = self.id_count.get_mut(id as usize) {
                *count += 1;
            }
            return id;
        }
        let id = self.id_to_word.len() as WordId;
        self.word_to_id.insert(word.clone(), id);
        self.id_to_word.push(word);
        self.id_count.push(1);
        id
    }

    /// Inference-mode lookup: never mutates, unseen words map to unknown.
    pub fn lookup(&self, word: &str) -> WordId {
        self.word_to_id
            .get(&word.to_lowercase())
            .copied()
            .unwrap_or(self.specials.unknown)
    }

    /// `assign` when `create` is set, `lookup` otherwise.
    pub fn assign_or_lookup(&mut self, word: &str, create: bool) -> WordId {
        if create {
            self.assign(word)
        } else {
            self.lookup(word)
        }
    }

    pub fn word(&self, id: WordId) -> Option<&str> {
        self.id_to_word.get(id as usize).map(String::as_str)
    }

    pub fn id(&self, word: &str) -> Option<WordId> {
        self.word_to_id.get(word).copied()
    }

    pub fn count(&self, id: WordId) -> Option<u64> {
        self.id_count.get(id as usize).copied()
    }

    /// Forget one occurrence of `id` (a token dropped by length filtering).
    pub fn decrement(&mut self, id: WordId) {
        if let Some(count) = self.id_count.get_mut(id as usize) {
            *count = count.saturating_sub(1);
        }
    }

    pub fn specials(&self) -> SpecialTokens {
        self.specials
    }

    pub fn len(&self) -> usize {
        self.id_to_word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_word.is_empty()
    }

    pub fn has_counts(&self) -> bool {
        !self.id_count.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.id_to_word
    }

    pub fn counts(&self) -> &[u64] {
        &self.id_count
    }

    /// `word_to_id` in a stable order, for persistence.
    pub fn word_to_id_sorted(&self) -> BTreeMap<String, WordId> {
        self.word_to_id
            .iter()
            .map(|(w, &id)| (w.clone(), id))
            .collect()
    }

    /// New vocabulary holding only `kept` ids, renumbered densely in
    /// ascending old-id order. Counts are dropped. `kept` must be sorted
    /// ascending and contain every reserved id.
    pub fn compacted(&self, kept: &[WordId]) -> Self {
        let id_to_word: Vec<String> = kept
            .iter()
            .map(|&old| self.id_to_word[old as usize].clone())
            .collect();
        let word_to_id = id_to_word
            .iter()
            .enumerate()
            .map(|(new, w)| (w.clone(), new as WordId))
            .collect();
        let position = |old: WordId| {
            kept.binary_search(&old)
                .map(|p| p as WordId)
                .unwrap_or(self.specials.unknown)
        };
        let specials = SpecialTokens {
            pad:     position(self.specials.pad),
            go:      position(self.specials.go),
            eos:     position(self.specials.eos),
            unknown: position(self.specials.unknown),
        };
        Self { word_to_id, id_to_word, id_count: Vec::new(), specials }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::with_reserved_tokens()
    }
}
