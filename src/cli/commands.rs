// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands `build`, `play`, `encode`, `batch`
// and the corpus flags they all share.
//
// clap's derive macros generate --help, error messages for bad
// values, and string → number conversion.

use clap::{Args, Subcommand};

use crate::application::config::{CorpusConfig, CorpusKind};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build (or load from cache) the training dataset
    Build(CorpusArgs),

    /// Print random question/answer pairs from the dataset
    Play(PlayArgs),

    /// Show the inference batch for one sentence
    Encode(EncodeArgs),

    /// Show the first batch of one shuffled epoch
    Batch(CorpusArgs),
}

/// Flags shared by every subcommand.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug, Clone)]
pub struct CorpusArgs {
    /// Folder containing `data/`
    #[arg(long, default_value = ".")]
    pub root_dir: String,

    /// Conversation source to read
    #[arg(long, default_value_t = CorpusKind::Lightweight)]
    pub corpus: CorpusKind,

    /// Corpus file name (without .txt) and dataset name suffix
    #[arg(long)]
    pub dataset_tag: Option<String>,

    /// Maximum number of words per question or answer
    #[arg(long, default_value_t = 10)]
    pub max_length: usize,

    /// Words to keep besides the reserved ones (0 keeps all)
    #[arg(long, default_value_t = 40000)]
    pub vocabulary_size: usize,

    /// Words seen this many times or fewer become <unknown>
    #[arg(long, default_value_t = 1)]
    pub filter_vocab: u64,

    #[arg(long, default_value_t = 256)]
    pub batch_size: usize,

    /// Swap questions and answers
    #[arg(long)]
    pub watson_mode: bool,

    /// Train on one side of each sample as both input and target
    #[arg(long)]
    pub auto_encode: bool,

    /// Only pair lines 0→1, 2→3, ... of each conversation
    #[arg(long)]
    pub skip_lines: bool,

    /// Inference mode (no training-only augmentation)
    #[arg(long)]
    pub test: bool,

    /// Seed for shuffling and sampling
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args, Debug)]
pub struct PlayArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Number of pairs to print
    #[arg(long, default_value_t = 10)]
    pub count: usize,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// The sentence to encode
    #[arg(long)]
    pub sentence: String,
}

/// The application layer never sees clap types.
impl From<CorpusArgs> for CorpusConfig {
    fn from(a: CorpusArgs) -> Self {
        CorpusConfig {
            root_dir:        a.root_dir,
            corpus:          a.corpus,
            dataset_tag:     a.dataset_tag,
            max_length:      a.max_length,
            vocabulary_size: a.vocabulary_size,
            filter_vocab:    a.filter_vocab,
            batch_size:      a.batch_size,
            watson_mode:     a.watson_mode,
            auto_encode:     a.auto_encode,
            skip_lines:      a.skip_lines,
            test:            a.test,
            seed:            a.seed,
        }
    }
}
