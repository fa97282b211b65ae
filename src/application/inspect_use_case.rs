// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Read-only views over a prepared dataset:
//   - play:   random (question, answer) pairs as text
//   - encode: the inference batch for one user sentence
//   - epoch:  readable dump of the first batch of an epoch

use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};

use crate::application::config::CorpusConfig;
use crate::application::pipeline::{Frozen, TextData};
use crate::data::batcher::BatchConfig;
use crate::domain::traits::TextTokenizer;

pub struct InspectUseCase<'a, T: TextTokenizer> {
    config:    &'a CorpusConfig,
    data:      TextData<Frozen>,
    tokenizer: &'a T,
}

impl<'a, T: TextTokenizer> InspectUseCase<'a, T> {
    pub fn new(config: &'a CorpusConfig, data: TextData<Frozen>, tokenizer: &'a T) -> Self {
        Self { config, data, tokenizer }
    }

    fn rng(&self) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        }
    }

    pub fn play(&self, n: usize) -> Vec<(String, String)> {
        self.data.play_dataset(n, &mut self.rng())
    }

    /// Debug lines for the encoded sentence, or `None` when it is empty
    /// or longer than max_length.
    pub fn encode(&self, sentence: &str) -> Result<Option<Vec<String>>> {
        let batch = self
            .data
            .sentence_to_batch(sentence, self.tokenizer, self.config.max_length)?;
        Ok(batch.map(|b| self.data.describe_batch(&b)))
    }

    /// Debug lines for the first batch of one shuffled epoch.
    pub fn first_batch(&mut self) -> Vec<String> {
        let cfg: BatchConfig = self.config.batch_config();
        let mut rng = self.rng();
        let batches = self.data.get_batches(self.config.batch_size, cfg, &mut rng);
        match batches.first() {
            Some(b) => self.data.describe_batch(b),
            None    => Vec::new(),
        }
    }
}
