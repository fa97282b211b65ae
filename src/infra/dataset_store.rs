// ============================================================
// Layer 6 — Dataset Store
// ============================================================
// Saves and restores a dataset snapshot as ONE JSON record with
// exactly four fields:
//
//   {
//     "word_to_id":       { "<pad>": 0, "<go>": 1, ... },
//     "id_to_word":       ["<pad>", "<go>", ...],
//     "id_count":         [1, 1, ...],      // [] once filtered
//     "training_samples": [ ... ]
//   }
//
// training_samples holds sentence-grouped RawSamples for the
// full corpus and flat Samples for the filtered corpus; the
// record is generic over the sample type.
//
// Writes go to a sibling `.tmp` file that is renamed over the
// target, so a crash mid-write never leaves half a dataset.
//
// On load the four reserved ids are re-derived from their
// canonical strings; a missing one fails the load.

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::data::vocabulary::Vocabulary;
use crate::domain::sample::WordId;

/// The persisted unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord<T> {
    pub word_to_id:       BTreeMap<String, WordId>,
    pub id_to_word:       Vec<String>,
    pub id_count:         Vec<u64>,
    pub training_samples: Vec<T>,
}

impl<T> DatasetRecord<T> {
    pub fn from_parts(vocab: &Vocabulary, samples: Vec<T>) -> Self {
        Self {
            word_to_id:       vocab.word_to_id_sorted(),
            id_to_word:       vocab.words().to_vec(),
            id_count:         vocab.counts().to_vec(),
            training_samples: samples,
        }
    }

    /// Rebuild the vocabulary (checking reserved tokens) and hand back
    /// the samples.
    pub fn into_parts(self) -> Result<(Vocabulary, Vec<T>)> {
        let vocab = Vocabulary::from_parts(
            self.word_to_id.into_iter().collect(),
            self.id_to_word,
            self.id_count,
        )?;
        Ok((vocab, self.training_samples))
    }
}

/// Write `record` to `path` as JSON.
pub fn save_record<T: Serialize>(record: &DatasetRecord<T>, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
    }

    let tmp = path.with_extension("tmp");
    {
        let file = File::create(&tmp)
            .with_context(|| format!("Cannot create '{}'", tmp.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, record)
            .with_context(|| format!("Cannot serialise dataset to '{}'", tmp.display()))?;
        writer.flush()?;
    }
    fs::rename(&tmp, path)
        .with_context(|| format!("Cannot move dataset into '{}'", path.display()))?;

    tracing::info!(
        "Saved dataset to '{}' ({} words, {} samples)",
        path.display(),
        record.id_to_word.len(),
        record.training_samples.len()
    );
    Ok(())
}

/// Read a record previously written by [`save_record`].
pub fn load_record<T: DeserializeOwned>(path: &Path) -> Result<DatasetRecord<T>> {
    tracing::info!("Loading dataset from '{}'", path.display());

    let file = File::open(path)
        .with_context(|| format!("Cannot open dataset '{}'", path.display()))?;
    let record: DatasetRecord<T> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Cannot parse dataset '{}'", path.display()))?;
    Ok(record)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::CorpusError;
    use crate::domain::sample::Sample;

    #[test]
    fn test_round_trip_is_exact() {
        let mut vocab = Vocabulary::with_reserved_tokens();
        let a = vocab.assign("hello");
        let b = vocab.assign("world");
        let record = DatasetRecord::from_parts(&vocab, vec![Sample::new(vec![a], vec![b])]);

        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ds.json");
        save_record(&record, &path).unwrap();
        let back: DatasetRecord<Sample> = load_record(&path).unwrap();
        assert_eq!(back, record);

        let (v2, samples) = back.into_parts().unwrap();
        assert_eq!(v2, vocab);
        assert_eq!(samples, vec![Sample::new(vec![a], vec![b])]);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_missing_reserved_token_fails() {
        let vocab = Vocabulary::with_reserved_tokens();
        let mut record: DatasetRecord<Sample> = DatasetRecord::from_parts(&vocab, vec![]);
        record.word_to_id.insert("<unk>".to_string(), 3);
        record.word_to_id.remove("<unknown>");
        record.id_to_word[3] = "<unk>".to_string();

        let err = record.into_parts().unwrap_err();
        assert_eq!(
            err.downcast_ref::<CorpusError>(),
            Some(&CorpusError::MissingReservedToken("<unknown>".to_string()))
        );
    }

    #[test]
    fn test_garbage_file_fails() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "not json").unwrap();
        assert!(load_record::<Sample>(&path).is_err());
    }
}
