//! High score persistence.
//!
//! The best score is kept as a single JSON document, `{"high_score": N}`.

use std::{
    io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::util;

pub const DEFAULT_PATH: &str = "./data/high_score.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: usize,
}

#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored high score; a missing file counts as 0.
    pub fn load(&self) -> anyhow::Result<usize> {
        match util::read_json_file::<HighScoreRecord, _>("high score", &self.path) {
            Ok(record) => Ok(record.high_score),
            Err(err) if is_not_found(&err) => {
                log::debug!("no high score file at {}", self.path.display());
                Ok(0)
            }
            Err(err) => Err(err),
        }
    }

    pub fn save(&self, high_score: usize) -> anyhow::Result<()> {
        util::write_json_file("high score", &self.path, &HighScoreRecord { high_score })?;
        log::info!("high score {high_score} saved to {}", self.path.display());
        Ok(())
    }

    /// Saves `high_score` if it beats the stored one. Returns whether it was
    /// written.
    pub fn save_if_higher(&self, high_score: usize) -> anyhow::Result<bool> {
        if high_score <= self.load()? {
            return Ok(false);
        }
        self.save(high_score)?;
        Ok(true)
    }
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<io::Error>())
        .any(|io_err| io_err.kind() == io::ErrorKind::NotFound)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::util::tests::scratch_dir;

    #[test]
    fn test_missing_file_reads_as_zero() {
        let store = HighScoreStore::new(scratch_dir("hs-missing").join("high_score.json"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_save_and_load() {
        let path = scratch_dir("hs-save").join("data/high_score.json");
        let store = HighScoreStore::new(&path);
        store.save(1200).unwrap();
        assert_eq!(store.load().unwrap(), 1200);

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({ "high_score": 1200 }));
    }

    #[test]
    fn test_save_if_higher() {
        let store = HighScoreStore::new(scratch_dir("hs-higher").join("high_score.json"));
        assert!(store.save_if_higher(300).unwrap());
        assert!(!store.save_if_higher(300).unwrap());
        assert!(!store.save_if_higher(100).unwrap());
        assert_eq!(store.load().unwrap(), 300);
        assert!(store.save_if_higher(800).unwrap());
        assert_eq!(store.load().unwrap(), 800);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = scratch_dir("hs-corrupt").join("high_score.json");
        fs::write(&path, "[1, 2]").unwrap();
        let err = HighScoreStore::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("high score"));
    }
}
