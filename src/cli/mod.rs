// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap and prints results; all work is delegated to Layer 2.
//
//   build  — load or build the dataset
//   play   — print random samples as text
//   encode — show how a sentence is fed to the model
//   batch  — dump the first training batch of an epoch

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, CorpusArgs, EncodeArgs, PlayArgs};

use crate::application::{
    config::CorpusConfig,
    inspect_use_case::InspectUseCase,
    prepare_use_case::PrepareUseCase,
};

#[derive(Parser, Debug)]
#[command(
    name = "dialogue-corpus",
    version,
    about = "Build seq2seq training data from dialogue corpora."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching handler. Only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Build(args)  => run_build(args),
            Commands::Play(args)   => run_play(args),
            Commands::Encode(args) => run_encode(args),
            Commands::Batch(args)  => run_batch(args),
        }
    }
}

fn run_build(args: CorpusArgs) -> Result<()> {
    let data = PrepareUseCase::new(args.into()).execute()?;
    println!(
        "Dataset ready: {} words, {} samples.",
        data.vocabulary_size(),
        data.sample_count()
    );
    Ok(())
}

fn run_play(args: PlayArgs) -> Result<()> {
    let config: CorpusConfig = args.corpus.into();
    let prepare = PrepareUseCase::new(config.clone());
    let data    = prepare.execute()?;

    let inspect = InspectUseCase::new(&config, data, prepare.tokenizer());
    for (question, answer) in inspect.play(args.count) {
        println!("Q: {question}");
        println!("A: {answer}");
        println!();
    }
    Ok(())
}

fn run_encode(args: EncodeArgs) -> Result<()> {
    let config: CorpusConfig = args.corpus.into();
    let prepare = PrepareUseCase::new(config.clone());
    let data    = prepare.execute()?;

    let inspect = InspectUseCase::new(&config, data, prepare.tokenizer());
    match inspect.encode(&args.sentence)? {
        Some(lines) => lines.iter().for_each(|l| println!("{l}")),
        None        => println!("No result (empty or longer than {} words).", config.max_length),
    }
    Ok(())
}

fn run_batch(args: CorpusArgs) -> Result<()> {
    let config: CorpusConfig = args.into();
    let prepare = PrepareUseCase::new(config.clone());
    let data    = prepare.execute()?;

    let mut inspect = InspectUseCase::new(&config, data, prepare.tokenizer());
    for line in inspect.first_batch() {
        println!("{line}");
    }
    Ok(())
}
