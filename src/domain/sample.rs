// ============================================================
// Layer 3 — Samples and Reserved Tokens
// ============================================================
// Two sample shapes flow through the pipeline:
//
//   RawSample — produced by extraction. Each side keeps its
//               sentence grouping: Vec<sentence> where every
//               sentence is Vec<WordId>.
//
//   Sample    — produced by filtering. Each side is one flat
//               sequence of ids bounded by max_length.
//
// The four reserved tokens always occupy ids 0..=3 in the
// order pad, go, eos, unknown.

use serde::{Deserialize, Serialize};

/// Dense integer id of a vocabulary word.
pub type WordId = u32;

pub const PAD_TOKEN:     &str = "<pad>";
pub const GO_TOKEN:      &str = "<go>";
pub const EOS_TOKEN:     &str = "<eos>";
pub const UNKNOWN_TOKEN: &str = "<unknown>";

/// Canonical strings of the reserved tokens in registration order.
pub const RESERVED_TOKENS: [&str; 4] = [PAD_TOKEN, GO_TOKEN, EOS_TOKEN, UNKNOWN_TOKEN];

/// Ids of the four reserved tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialTokens {
    pub pad:     WordId,
    pub go:      WordId,
    pub eos:     WordId,
    pub unknown: WordId,
}

impl SpecialTokens {
    pub fn contains(&self, id: WordId) -> bool {
        id == self.pad || id == self.go || id == self.eos || id == self.unknown
    }

    pub fn as_array(&self) -> [WordId; 4] {
        [self.pad, self.go, self.eos, self.unknown]
    }
}

impl Default for SpecialTokens {
    fn default() -> Self {
        Self { pad: 0, go: 1, eos: 2, unknown: 3 }
    }
}

/// A sentence-grouped (input, target) pair straight out of extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSample {
    pub input:  Vec<Vec<WordId>>,
    pub target: Vec<Vec<WordId>>,
}

impl RawSample {
    pub fn new(input: Vec<Vec<WordId>>, target: Vec<Vec<WordId>>) -> Self {
        Self { input, target }
    }
}

/// A flattened, length-bounded (input, target) pair ready for batching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub input:  Vec<WordId>,
    pub target: Vec<WordId>,
}

impl Sample {
    pub fn new(input: Vec<WordId>, target: Vec<WordId>) -> Self {
        Self { input, target }
    }

    /// Same pair with input and target exchanged.
    pub fn swapped(&self) -> Self {
        Self {
            input:  self.target.clone(),
            target: self.input.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_special_ids_are_dense_from_zero() {
        assert_eq!(SpecialTokens::default().as_array(), [0, 1, 2, 3]);
    }

    #[test]
    fn test_contains_only_reserved() {
        let s = SpecialTokens::default();
        assert!(s.contains(0));
        assert!(s.contains(3));
        assert!(!s.contains(4));
    }

    #[test]
    fn test_swapped() {
        let s = Sample::new(vec![4, 5], vec![6]);
        assert_eq!(s.swapped(), Sample::new(vec![6], vec![4, 5]));
    }
}
