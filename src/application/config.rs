// ============================================================
// Layer 2 — Corpus Configuration
// ============================================================
// Every option the pipeline consumes. Serialisable so a run's
// settings can be written next to its dataset and reloaded.
// The CLI converts its flags into this struct; nothing below
// the CLI ever sees clap types.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::data::batcher::BatchConfig;
use crate::data::filter::FilterOptions;

// ─── CorpusKind ──────────────────────────────────────────────────────────────
/// Supported conversation sources. The first entry is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusKind {
    #[default]
    Lightweight,
}

impl CorpusKind {
    pub const ALL: [CorpusKind; 1] = [CorpusKind::Lightweight];

    pub fn name(&self) -> &'static str {
        match self {
            CorpusKind::Lightweight => "lightweight",
        }
    }
}

impl fmt::Display for CorpusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CorpusKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CorpusKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| {
                let choices: Vec<&str> = CorpusKind::ALL.iter().map(|k| k.name()).collect();
                format!("unknown corpus '{s}' (choices: {})", choices.join(", "))
            })
    }
}

// ─── CorpusConfig ────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Folder holding `data/` (corpus files and cached datasets)
    pub root_dir:        String,
    pub corpus:          CorpusKind,
    /// Selects the corpus file and disambiguates cached datasets
    pub dataset_tag:     Option<String>,
    /// Maximum words per side of a sample
    pub max_length:      usize,
    /// Non-reserved words to keep (0 = unlimited)
    pub vocabulary_size: usize,
    /// Words seen this many times or fewer become unknown
    pub filter_vocab:    u64,
    pub batch_size:      usize,
    /// Train the reverse direction (answer → question)
    pub watson_mode:     bool,
    /// Train to reproduce one side of each sample
    pub auto_encode:     bool,
    /// Pair line 0→1, 2→3, ... instead of every adjacent pair
    pub skip_lines:      bool,
    /// Inference run: disables training-only augmentation
    pub test:            bool,
    /// Seed for shuffling and augmentation; random when absent
    pub seed:            Option<u64>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            root_dir:        ".".to_string(),
            corpus:          CorpusKind::Lightweight,
            dataset_tag:     None,
            max_length:      10,
            vocabulary_size: 40000,
            filter_vocab:    1,
            batch_size:      256,
            watson_mode:     false,
            auto_encode:     false,
            skip_lines:      false,
            test:            false,
            seed:            None,
        }
    }
}

impl CorpusConfig {
    pub fn max_length_enco(&self) -> usize {
        self.max_length
    }

    /// Room for the go and eos tokens
    pub fn max_length_deco(&self) -> usize {
        self.max_length + 2
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions {
            max_length:      self.max_length,
            vocabulary_size: self.vocabulary_size,
            filter_vocab:    self.filter_vocab,
        }
    }

    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            max_length_enco: self.max_length_enco(),
            max_length_deco: self.max_length_deco(),
            watson_mode:     self.watson_mode,
            auto_encode:     self.auto_encode,
            is_training:     !self.test,
        }
    }
}
