use burn::data::dataset::Dataset;

use crate::domain::sample::Sample;

/// Filtered training samples exposed to Burn's DataLoader.
pub struct Seq2SeqDataset {
    samples: Vec<Sample>,
}

impl Seq2SeqDataset {
    pub fn new(samples: Vec<Sample>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl Dataset<Sample> for Seq2SeqDataset {
    fn get(&self, index: usize) -> Option<Sample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_len() {
        let ds = Seq2SeqDataset::new(vec![Sample::new(vec![4], vec![5])]);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.get(0), Some(Sample::new(vec![4], vec![5])));
        assert_eq!(ds.get(1), None);
    }
}
