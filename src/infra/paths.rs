// ============================================================
// Layer 6 — Dataset Paths
// ============================================================
// Every option that changes dataset content is part of the file
// name, so a cached dataset is never reused under different
// settings:
//
//   {root}/data/samples/dataset-{corpus}[-{tag}]-step{1|2}.json
//   {root}/data/samples/dataset-{corpus}[-{tag}]-step{1|2}-length{L}-filter{F}-vocabSize{V}.json
//
// `step2` marks a corpus extracted with skip_lines (every other
// line is a turn). The raw corpus itself lives in
//
//   {root}/data/{corpus}/{tag}.txt

use std::path::{Path, PathBuf};

use crate::application::config::CorpusConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    base:     PathBuf,
    filtered: PathBuf,
    corpus:   PathBuf,
}

impl DatasetPaths {
    pub fn new(cfg: &CorpusConfig) -> Self {
        let root = Path::new(&cfg.root_dir);

        let mut name = format!("dataset-{}", cfg.corpus.name());
        if let Some(tag) = cfg.dataset_tag.as_deref().filter(|t| !t.is_empty()) {
            name.push('-');
            name.push_str(tag);
        }
        name.push_str(if cfg.skip_lines { "-step2" } else { "-step1" });

        let samples_dir = root.join("data").join("samples");
        let base        = samples_dir.join(format!("{name}.json"));
        let filtered    = samples_dir.join(format!(
            "{name}-length{}-filter{}-vocabSize{}.json",
            cfg.max_length, cfg.filter_vocab, cfg.vocabulary_size
        ));

        let corpus_file = cfg.dataset_tag.as_deref().unwrap_or(cfg.corpus.name());
        let corpus = root
            .join("data")
            .join(cfg.corpus.name())
            .join(format!("{corpus_file}.txt"));

        Self { base, filtered, corpus }
    }

    /// Unfiltered, sentence-grouped corpus.
    pub fn full_samples(&self) -> &Path {
        &self.base
    }

    /// Filtered corpus for the configured length and vocabulary.
    pub fn filtered_samples(&self) -> &Path {
        &self.filtered
    }

    /// Raw conversation file.
    pub fn corpus_file(&self) -> &Path {
        &self.corpus
    }
}
