//! Property-based tests for the corpus pipeline using proptest.
//!
//! Invariants that must hold for ANY corpus and options:
//! - Reserved tokens sit at ids 0..=3 and the vocabulary is a bijection
//! - Filtered samples fit max_length and targets never hold <unknown>
//! - Batches are time-major with the configured lengths
//! - Weights mark exactly the real target positions (answer + eos)
//! - Full and filtered snapshots survive save/load unchanged

use dialogue_corpus::application::pipeline::{Extracted, Filtered, Frozen, TextData};
use dialogue_corpus::data::batcher::{Batch, BatchConfig};
use dialogue_corpus::data::filter::FilterOptions;
use dialogue_corpus::domain::conversation::Conversation;
use dialogue_corpus::domain::sample::{SpecialTokens, RESERVED_TOKENS};
use dialogue_corpus::domain::traits::Persistable;
use dialogue_corpus::infra::tokenizer::WordTokenizer;
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

const WORDS: [&str; 10] = ["hi", "hello", "how", "are", "you", "fine", "thanks", "bye", "yes", "no"];

fn line() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS.to_vec()), 1..7).prop_map(|w| w.join(" "))
}

fn corpus() -> impl Strategy<Value = Vec<Conversation>> {
    prop::collection::vec(
        prop::collection::vec(line(), 2..5).prop_map(Conversation::from_texts),
        1..6,
    )
}

fn options() -> impl Strategy<Value = FilterOptions> {
    (1usize..8, 0usize..8, 0u64..3).prop_map(|(max_length, vocabulary_size, filter_vocab)| {
        FilterOptions { max_length, vocabulary_size, filter_vocab }
    })
}

fn filtered(conversations: &[Conversation], opts: &FilterOptions) -> TextData<Filtered> {
    TextData::new()
        .extract(conversations, &WordTokenizer::new(), false)
        .unwrap()
        .filter(opts)
}

fn frozen(conversations: &[Conversation], opts: &FilterOptions) -> TextData<Frozen> {
    filtered(conversations, opts).freeze(opts.max_length).unwrap()
}

proptest! {
    #[test]
    fn prop_vocabulary_is_a_bijection(convs in corpus(), opts in options()) {
        let data  = frozen(&convs, &opts);
        let vocab = data.vocabulary();

        prop_assert_eq!(data.specials(), SpecialTokens::default());
        for (id, token) in RESERVED_TOKENS.iter().enumerate() {
            prop_assert_eq!(vocab.word(id as u32), Some(*token));
        }
        for id in 0..vocab.len() as u32 {
            let word = vocab.word(id).unwrap();
            prop_assert_eq!(vocab.id(word), Some(id));
        }
    }

    #[test]
    fn prop_vocabulary_size_is_respected(convs in corpus(), opts in options()) {
        let data = frozen(&convs, &opts);
        if opts.vocabulary_size > 0 {
            prop_assert!(data.vocabulary_size() <= RESERVED_TOKENS.len() + opts.vocabulary_size);
        }
    }

    #[test]
    fn prop_samples_fit_and_targets_are_known(convs in corpus(), opts in options()) {
        let data     = frozen(&convs, &opts);
        let specials = data.specials();
        let size     = data.vocabulary_size() as u32;

        for s in data.samples() {
            prop_assert!(!s.input.is_empty() && s.input.len() <= opts.max_length);
            prop_assert!(!s.target.is_empty() && s.target.len() <= opts.max_length);
            prop_assert!(!s.target.contains(&specials.unknown));
            prop_assert!(s.input.iter().any(|&w| w != specials.unknown));
            prop_assert!(s.input.iter().chain(&s.target).all(|&w| w < size));
        }
    }

    #[test]
    fn prop_batches_are_time_major(convs in corpus(), opts in options(), batch_size in 1usize..5) {
        let mut data = frozen(&convs, &opts);
        let cfg      = BatchConfig::for_max_length(opts.max_length, true);
        let total    = data.sample_count();
        let batches  = data.get_batches(batch_size, cfg, &mut StdRng::seed_from_u64(9));

        prop_assert_eq!(batches.len(), total.div_ceil(batch_size));
        prop_assert_eq!(batches.iter().map(Batch::batch_size).sum::<usize>(), total);
        for b in &batches {
            let n = b.batch_size();
            prop_assert!(n >= 1 && n <= batch_size);
            prop_assert_eq!(b.encoder_seqs.len(), cfg.max_length_enco);
            prop_assert_eq!(b.decoder_seqs.len(), cfg.max_length_deco);
            prop_assert_eq!(b.target_seqs.len(), cfg.max_length_deco);
            prop_assert_eq!(b.weights.len(), cfg.max_length_deco);
            prop_assert!(b.encoder_seqs.iter().chain(&b.decoder_seqs).all(|row| row.len() == n));
        }
    }

    #[test]
    fn prop_batch_columns_encode_each_sample(convs in corpus(), opts in options()) {
        let data     = frozen(&convs, &opts);
        let specials = data.specials();
        let batcher  = data.batcher(BatchConfig::for_max_length(opts.max_length, false));
        let batch    = batcher.make_batch(data.samples(), &mut StdRng::seed_from_u64(0));

        for (i, s) in data.samples().iter().enumerate() {
            let enc = Batch::column(&batch.encoder_seqs, i);
            let pad = opts.max_length - s.input.len();
            prop_assert!(enc[..pad].iter().all(|&w| w == specials.pad));
            prop_assert!(enc[pad..].iter().eq(s.input.iter().rev()));

            let dec = Batch::column(&batch.decoder_seqs, i);
            prop_assert_eq!(dec[0], specials.go);
            prop_assert_eq!(dec[s.target.len() + 1], specials.eos);

            let tgt = Batch::column(&batch.target_seqs, i);
            prop_assert_eq!(&tgt[..s.target.len()], &s.target[..]);
            prop_assert_eq!(tgt[s.target.len()], specials.eos);

            let weight: f32 = Batch::column(&batch.weights, i).iter().sum();
            prop_assert_eq!(weight, (s.target.len() + 1) as f32);
        }
    }

    #[test]
    fn prop_filtered_snapshot_round_trips(convs in corpus(), opts in options()) {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.json");
        let data = filtered(&convs, &opts);

        data.save(&path).unwrap();
        let back = TextData::<Filtered>::load(&path).unwrap();
        prop_assert_eq!(back.vocabulary(), data.vocabulary());
        prop_assert_eq!(back.samples(), data.samples());
    }

    #[test]
    fn prop_full_snapshot_round_trips(convs in corpus(), skip_lines in any::<bool>()) {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("full.json");
        let data = TextData::new()
            .extract(&convs, &WordTokenizer::new(), skip_lines)
            .unwrap();

        data.save(&path).unwrap();
        let back = TextData::<Extracted>::load(&path).unwrap();
        // Vocabulary equality covers ids and counts
        prop_assert_eq!(back.vocabulary(), data.vocabulary());
        prop_assert_eq!(back.vocabulary().counts(), data.vocabulary().counts());
        prop_assert_eq!(back.samples(), data.samples());
    }
}
