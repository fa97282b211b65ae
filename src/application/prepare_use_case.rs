// ============================================================
// Layer 2 — PrepareUseCase
// ============================================================
// Produces a frozen, training-ready dataset, reusing whatever is
// already cached on disk:
//
//   filtered dataset exists?  → load it
//   else full dataset exists? → load it, filter, save filtered
//   else                      → read corpus, extract, save full,
//                               filter, save filtered
//
// then freeze (pad must be id 0, targets fully known).
//
// The full corpus is saved before filtering so changing
// max_length or the vocabulary options only re-runs the filter.

use anyhow::{Context, Result};

use crate::application::config::{CorpusConfig, CorpusKind};
use crate::application::pipeline::{Extracted, Filtered, Frozen, TextData};
use crate::data::loader::LightweightLoader;
use crate::domain::traits::{ConversationSource, Persistable, TextTokenizer};
use crate::infra::{paths::DatasetPaths, tokenizer::WordTokenizer};

pub struct PrepareUseCase<T: TextTokenizer = WordTokenizer> {
    config:    CorpusConfig,
    tokenizer: T,
}

impl PrepareUseCase<WordTokenizer> {
    pub fn new(config: CorpusConfig) -> Self {
        Self::with_tokenizer(config, WordTokenizer::new())
    }
}

impl<T: TextTokenizer> PrepareUseCase<T> {
    pub fn with_tokenizer(config: CorpusConfig, tokenizer: T) -> Self {
        Self { config, tokenizer }
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    pub fn tokenizer(&self) -> &T {
        &self.tokenizer
    }

    /// Load or build the dataset and return it frozen.
    pub fn execute(&self) -> Result<TextData<Frozen>> {
        let cfg   = &self.config;
        let paths = DatasetPaths::new(cfg);

        let filtered = if paths.filtered_samples().exists() {
            TextData::<Filtered>::load(paths.filtered_samples())?
        } else {
            tracing::info!("Training samples not found. Creating dataset...");
            let full = self.full_corpus(&paths)?;
            let filtered = full.filter(&cfg.filter_options());
            filtered.save(paths.filtered_samples())?;
            filtered
        };

        let data = filtered
            .freeze(cfg.max_length)
            .with_context(|| format!("Dataset '{}' is not usable", paths.filtered_samples().display()))?;

        tracing::info!(
            "Loaded {}: {} words, {} QA",
            cfg.corpus,
            data.vocabulary_size(),
            data.sample_count()
        );
        Ok(data)
    }

    /// Cached full corpus, or a freshly extracted (and saved) one.
    fn full_corpus(&self, paths: &DatasetPaths) -> Result<TextData<Extracted>> {
        if paths.full_samples().exists() {
            return TextData::<Extracted>::load(paths.full_samples());
        }

        tracing::info!("Constructing full dataset...");
        let conversations = self.source(paths).conversations()?;
        let full = TextData::new().extract(&conversations, &self.tokenizer, self.config.skip_lines)?;
        full.save(paths.full_samples())?;
        Ok(full)
    }

    fn source(&self, paths: &DatasetPaths) -> Box<dyn ConversationSource> {
        match self.config.corpus {
            CorpusKind::Lightweight => Box::new(LightweightLoader::new(paths.corpus_file())),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn setup(corpus: &str) -> (tempfile::TempDir, CorpusConfig) {
        let dir = tempfile::tempdir().unwrap();
        let cfg = CorpusConfig {
            root_dir:     dir.path().to_string_lossy().into_owned(),
            dataset_tag:  Some("chat".into()),
            filter_vocab: 0,
            ..CorpusConfig::default()
        };
        let paths = DatasetPaths::new(&cfg);
        fs::create_dir_all(paths.corpus_file().parent().unwrap()).unwrap();
        fs::write(paths.corpus_file(), corpus).unwrap();
        (dir, cfg)
    }

    #[test]
    fn test_builds_and_caches_both_datasets() {
        let (_dir, cfg) = setup("Hi\nHello\nBye\n===\nYes\nNo\n");
        let data  = PrepareUseCase::new(cfg.clone()).execute().unwrap();
        let paths = DatasetPaths::new(&cfg);

        assert_eq!(data.sample_count(), 3);
        assert!(paths.full_samples().exists());
        assert!(paths.filtered_samples().exists());
    }

    #[test]
    fn test_second_run_reuses_cache() {
        let (_dir, cfg) = setup("Hi\nHello\nBye\n");
        let first = PrepareUseCase::new(cfg.clone()).execute().unwrap();

        // Corpus gone: only the cache can satisfy the second run
        fs::remove_file(DatasetPaths::new(&cfg).corpus_file()).unwrap();
        let second = PrepareUseCase::new(cfg).execute().unwrap();

        assert_eq!(first.vocabulary(), second.vocabulary());
        assert_eq!(first.samples(), second.samples());
    }

    #[test]
    fn test_new_filter_options_reuse_full_corpus() {
        let (_dir, cfg) = setup("Hi there\nHello\nBye\n");
        PrepareUseCase::new(cfg.clone()).execute().unwrap();
        fs::remove_file(DatasetPaths::new(&cfg).corpus_file()).unwrap();

        let shorter = CorpusConfig { max_length: 1, ..cfg };
        let data = PrepareUseCase::new(shorter).execute().unwrap();
        // "Hi there" no longer fits as an input
        assert_eq!(data.sample_count(), 1);
    }

    #[test]
    fn test_missing_corpus_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = CorpusConfig {
            root_dir: dir.path().to_string_lossy().into_owned(),
            ..CorpusConfig::default()
        };
        assert!(PrepareUseCase::new(cfg.clone()).execute().is_err());
        assert!(!DatasetPaths::new(&cfg).full_samples().exists());
    }
}
