//! Storage operations for word progress
//!
//! Records are held in memory and written as a single JSON object:
//! ```text
//! {data-dir}/
//! └── progress.json   # { "<word-id>": { ...record... }, ... }
//! ```
//! The file is only read at startup (`load_all`) and written at shutdown
//! (`persist_all`); every other operation works on the in-memory map.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;

use crate::scheduling::{IntervalTable, ProgressRecord, WordStatus};

#[derive(Error, Debug)]
pub enum ProgressStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProgressStorageError>;

/// Word id → progress record
#[derive(Debug, Default)]
pub struct ProgressStore {
    /// Backing file; `None` keeps the store purely in memory
    path: Option<PathBuf>,
    records: HashMap<String, ProgressRecord>,
}

impl ProgressStore {
    /// Create an empty store backed by `path` without reading it
    pub fn new(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            records: HashMap::new(),
        }
    }

    /// Create an empty store with no backing file
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Create a store backed by `path` and load whatever it already holds
    pub fn open(path: PathBuf, table: &IntervalTable) -> Result<Self> {
        let mut store = Self::new(path);
        store.load_all(table)?;
        Ok(store)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // ==================== Record Operations ====================

    /// Get the record for a word; `None` means the word is new
    pub fn get(&self, word_id: &str) -> Option<&ProgressRecord> {
        self.records.get(word_id)
    }

    /// Insert or replace the record for its word
    pub fn upsert(&mut self, record: ProgressRecord) {
        log::debug!(
            "Storing progress for '{}' (step {}, {})",
            record.word_id,
            record.interval_index,
            record.status
        );
        self.records.insert(record.word_id.clone(), record);
    }

    /// Remove a word's record so it becomes new again. Returns the removed record.
    pub fn reset(&mut self, word_id: &str) -> Option<ProgressRecord> {
        let removed = self.records.remove(word_id);
        if removed.is_some() {
            log::info!("Reset progress for '{}'", word_id);
        }
        removed
    }

    /// Remove every record
    pub fn reset_all(&mut self) {
        log::info!("Reset progress for {} words", self.records.len());
        self.records.clear();
    }

    pub fn status_of(&self, word_id: &str) -> WordStatus {
        self.get(word_id)
            .map(|r| r.status)
            .unwrap_or(WordStatus::New)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProgressRecord> {
        self.records.values()
    }

    /// All records sorted by word id
    pub fn records(&self) -> Vec<ProgressRecord> {
        let mut records: Vec<ProgressRecord> = self.records.values().cloned().collect();
        records.sort_by(|a, b| a.word_id.cmp(&b.word_id));
        records
    }

    // ==================== Bulk Operations ====================

    /// Replace the in-memory map with the contents of the backing file.
    ///
    /// A missing file loads as empty. Entries that cannot be decoded are
    /// dropped, and records that do not fit `table` are repaired or dropped. Returns the number of records loaded.
    pub fn load_all(&mut self, table: &IntervalTable) -> Result<usize> {
        let Some(path) = &self.path else {
            return Ok(self.records.len());
        };

        if !path.exists() {
            log::info!("No progress file at {:?}, starting fresh", path);
            self.records.clear();
            return Ok(0);
        }

        let content = fs::read_to_string(path)?;
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(&content)?;
        let loaded_at = Utc::now();

        let mut records = HashMap::with_capacity(raw.len());
        for (key, value) in raw {
            let mut record: ProgressRecord = match serde_json::from_value(value) {
                Ok(record) => record,
                Err(e) => {
                    log::warn!("Dropping unreadable progress entry '{}': {}", key, e);
                    continue;
                }
            };
            if record.word_id != key {
                log::warn!(
                    "Progress entry '{}' carried word id '{}', using the key",
                    key,
                    record.word_id
                );
                record.word_id = key.clone();
            }
            if let Some(record) = record.repaired(table, loaded_at) {
                records.insert(key, record);
            }
        }

        log::info!("Loaded progress for {} words from {:?}", records.len(), path);
        self.records = records;
        Ok(self.records.len())
    }

    /// Write every record to the backing file
    pub fn persist_all(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let ordered: BTreeMap<&String, &ProgressRecord> = self.records.iter().collect();
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, serde_json::to_string_pretty(&ordered)?)?;
        fs::rename(&tmp_path, path)?;

        log::info!("Saved progress for {} words to {:?}", self.records.len(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::{advise_review, create_record};
    use chrono::{DateTime, Duration, TimeZone};
    use tempfile::TempDir;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 12, 0, 0).unwrap()
    }

    fn create_test_store() -> (ProgressStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = ProgressStore::new(temp_dir.path().join("progress.json"));
        (store, temp_dir)
    }

    #[test]
    fn test_get_missing_is_new() {
        let store = ProgressStore::in_memory();
        assert!(store.get("abate").is_none());
        assert_eq!(store.status_of("abate"), WordStatus::New);
    }

    #[test]
    fn test_upsert_is_last_write_wins() {
        let table = IntervalTable::default();
        let mut store = ProgressStore::in_memory();

        let first = create_record(&table, "abate", t0()).unwrap();
        store.upsert(first.clone());
        let second = advise_review(&table, &first, true, t0() + Duration::days(1)).unwrap();
        store.upsert(second.clone());

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("abate"), Some(&second));
    }

    #[test]
    fn test_reset_reverts_to_new() {
        let table = IntervalTable::default();
        let mut store = ProgressStore::in_memory();
        store.upsert(create_record(&table, "abate", t0()).unwrap());

        assert!(store.reset("abate").is_some());
        assert!(store.get("abate").is_none());
        assert_eq!(store.status_of("abate"), WordStatus::New);

        // Resetting again is a no-op
        assert!(store.reset("abate").is_none());
    }

    #[test]
    fn test_persist_and_load_round_trip() {
        let table = IntervalTable::default();
        let (mut store, temp) = create_test_store();

        let r = create_record(&table, "abate", t0()).unwrap();
        store.upsert(r.clone());
        store.upsert(create_record(&table, "candid", t0()).unwrap());
        store.persist_all().unwrap();

        let reopened = ProgressStore::open(temp.path().join("progress.json"), &table).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.get("abate"), Some(&r));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let table = IntervalTable::default();
        let (mut store, _temp) = create_test_store();
        assert_eq!(store.load_all(&table).unwrap(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_repairs_and_drops() {
        let table = IntervalTable::new(vec![1, 3, 7]).unwrap();
        let (mut store, temp) = create_test_store();

        let content = r#"{
            "abate": {
                "wordId": "abate",
                "status": "reviewing",
                "lastReviewedAt": "2026-05-04T12:00:00Z",
                "nextReviewAt": "2026-05-05T12:00:00Z",
                "intervalIndex": 6,
                "streak": 6,
                "totalReviews": 6
            },
            "candid": {
                "wordId": "candid",
                "status": "new",
                "lastReviewedAt": null,
                "nextReviewAt": null,
                "intervalIndex": 0,
                "streak": 0,
                "totalReviews": 0
            }
        }"#;
        fs::write(temp.path().join("progress.json"), content).unwrap();

        assert_eq!(store.load_all(&table).unwrap(), 1);
        assert_eq!(store.get("abate").unwrap().interval_index, 2);
        assert!(store.get("candid").is_none());
    }

    #[test]
    fn test_load_skips_undecodable_entries() {
        let table = IntervalTable::default();
        let (mut store, temp) = create_test_store();

        let content = r#"{
            "abate": {
                "wordId": "abate",
                "status": "archived",
                "lastReviewedAt": null,
                "nextReviewAt": null,
                "intervalIndex": 0,
                "streak": 0,
                "totalReviews": 0
            },
            "candid": {
                "wordId": "candid",
                "intervalIndex": 1
            },
            "zeal": {
                "wordId": "zeal",
                "status": "learning",
                "lastReviewedAt": "2026-05-04T12:00:00Z",
                "nextReviewAt": "2026-05-05T12:00:00Z",
                "intervalIndex": 0,
                "streak": 0,
                "totalReviews": 1
            }
        }"#;
        fs::write(temp.path().join("progress.json"), content).unwrap();

        assert_eq!(store.load_all(&table).unwrap(), 1);
        assert!(store.get("abate").is_none());
        assert!(store.get("candid").is_none());
        assert_eq!(store.status_of("zeal"), WordStatus::Learning);
    }

    #[test]
    fn test_mastered_word_stays_mastered_after_ladder_grows() {
        let table = IntervalTable::default();
        let (mut store, temp) = create_test_store();

        let content = r#"{
            "abate": {
                "wordId": "abate",
                "status": "mastered",
                "lastReviewedAt": "2026-05-04T12:00:00Z",
                "nextReviewAt": null,
                "intervalIndex": 4,
                "streak": 5,
                "totalReviews": 5
            }
        }"#;
        fs::write(temp.path().join("progress.json"), content).unwrap();
        store.load_all(&table).unwrap();

        let loaded = store.get("abate").unwrap().clone();
        assert_eq!(loaded.interval_index, table.last_index());

        let reviewed = advise_review(&table, &loaded, true, t0()).unwrap();
        assert_eq!(reviewed.status, WordStatus::Mastered);
        assert_eq!(reviewed.next_review_at, None);
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let table = IntervalTable::default();
        let (mut store, temp) = create_test_store();
        fs::write(temp.path().join("progress.json"), "not json").unwrap();

        let result = store.load_all(&table);
        assert!(matches!(result, Err(ProgressStorageError::Json(_))));
    }

    #[test]
    fn test_records_sorted() {
        let table = IntervalTable::default();
        let mut store = ProgressStore::in_memory();
        for id in ["zeal", "abate", "mirth"] {
            store.upsert(create_record(&table, id, t0()).unwrap());
        }

        let ids: Vec<String> = store.records().into_iter().map(|r| r.word_id).collect();
        assert_eq!(ids, vec!["abate", "mirth", "zeal"]);
    }
}
