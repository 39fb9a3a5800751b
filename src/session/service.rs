//! Review service
//!
//! Owns the progress store behind a mutex. Each review event locks the
//! store, reads the current record, runs it through the scheduling engine
//! and writes the replacement back before releasing the lock, so two events
//! for the same word can never interleave.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use super::selectors::{self, DueWord, ProgressStats, SortOrder, WordOverview};
use crate::catalog::{Word, WordCatalog};
use crate::progress::{ProgressStorageError, ProgressStore};
use crate::provider::{DefinitionProvider, ExplanationJudge, Judgement, ProviderError};
use crate::scheduling::{
    advise_review, create_record, IntervalTable, ProgressRecord, ScheduleError, WordStatus,
};

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("No progress for '{0}' yet; learn the word before reviewing it")]
    MissingRecord(String),

    #[error("'{0}' is already being learned")]
    AlreadyTracked(String),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("Provider failure, review not recorded: {0}")]
    ProviderFailure(#[from] ProviderError),

    #[error("Storage error: {0}")]
    Storage(#[from] ProgressStorageError),

    #[error("Progress store lock poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, ReviewError>;

/// Result of judging a free-text explanation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationOutcome {
    pub judgement: Judgement,
    pub record: ProgressRecord,
}

/// Applies review events to stored progress
pub struct ReviewService {
    table: IntervalTable,
    catalog: WordCatalog,
    store: Mutex<ProgressStore>,
}

impl ReviewService {
    pub fn new(table: IntervalTable, catalog: WordCatalog, store: ProgressStore) -> Self {
        Self {
            table,
            catalog,
            store: Mutex::new(store),
        }
    }

    pub fn table(&self) -> &IntervalTable {
        &self.table
    }

    pub fn catalog(&self) -> &WordCatalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut WordCatalog {
        &mut self.catalog
    }

    fn store(&self) -> Result<MutexGuard<'_, ProgressStore>> {
        self.store.lock().map_err(|_| ReviewError::LockPoisoned)
    }

    fn warn_if_unknown(&self, word_id: &str) {
        if !self.catalog.contains(word_id) {
            log::warn!("'{}' is not in the word catalog; scheduling it anyway", word_id);
        }
    }

    // ==================== Review Events ====================

    /// Start learning a word that has no progress yet
    pub fn learn(&self, word_id: &str, now: DateTime<Utc>) -> Result<ProgressRecord> {
        self.warn_if_unknown(word_id);
        let mut store = self.store()?;

        if store.get(word_id).is_some() {
            return Err(ReviewError::AlreadyTracked(word_id.to_string()));
        }

        let record = create_record(&self.table, word_id, now)?;
        store.upsert(record.clone());
        log::info!("Started learning '{}'", word_id);
        Ok(record)
    }

    /// Record one review answer for a word that is already being learned
    pub fn review(&self, word_id: &str, remembered: bool, now: DateTime<Utc>) -> Result<ProgressRecord> {
        self.warn_if_unknown(word_id);
        let mut store = self.store()?;

        let current = store
            .get(word_id)
            .ok_or_else(|| ReviewError::MissingRecord(word_id.to_string()))?;
        let next = advise_review(&self.table, current, remembered, now)?;

        log::info!(
            "Reviewed '{}': {} -> step {} ({})",
            word_id,
            if remembered { "remembered" } else { "forgotten" },
            next.interval_index,
            next.status
        );
        store.upsert(next.clone());
        Ok(next)
    }

    /// Review a word, starting to learn it first if it is new
    pub fn practice(&self, word_id: &str, remembered: bool, now: DateTime<Utc>) -> Result<ProgressRecord> {
        self.warn_if_unknown(word_id);
        let mut store = self.store()?;

        let current = match store.get(word_id) {
            Some(record) => record.clone(),
            None => create_record(&self.table, word_id, now)?,
        };
        let next = advise_review(&self.table, &current, remembered, now)?;
        store.upsert(next.clone());
        Ok(next)
    }

    /// Judge a learner's explanation and record the verdict as a review.
    ///
    /// Provider and judge failures leave progress untouched.
    pub fn submit_explanation(
        &self,
        word_id: &str,
        user_text: &str,
        definitions: &dyn DefinitionProvider,
        judge: &dyn ExplanationJudge,
        now: DateTime<Utc>,
    ) -> Result<ExplanationOutcome> {
        if self.store()?.get(word_id).is_none() {
            return Err(ReviewError::MissingRecord(word_id.to_string()));
        }

        let text = self
            .catalog
            .get(word_id)
            .map(|w| w.text.clone())
            .unwrap_or_else(|| word_id.to_string());

        let outcome = definitions.details(word_id).and_then(|details| {
            judge.judge(&text, &details.definition, &details.example_sentence, user_text)
        });

        let judgement = match outcome {
            Ok(judgement) => judgement,
            Err(e) => {
                log::warn!("Could not judge explanation for '{}': {}", word_id, e);
                return Err(ReviewError::ProviderFailure(e));
            }
        };

        let record = self.review(word_id, judgement.is_correct, now)?;
        Ok(ExplanationOutcome { judgement, record })
    }

    /// Forget all progress on a word. Returns false if there was none.
    pub fn reset(&self, word_id: &str) -> Result<bool> {
        Ok(self.store()?.reset(word_id).is_some())
    }

    // ==================== Queries ====================

    pub fn record(&self, word_id: &str) -> Result<Option<ProgressRecord>> {
        Ok(self.store()?.get(word_id).cloned())
    }

    pub fn status_of(&self, word_id: &str) -> Result<WordStatus> {
        let store = self.store()?;
        Ok(selectors::status_of(&store, word_id))
    }

    pub fn words_due_now(&self, now: DateTime<Utc>) -> Result<Vec<DueWord>> {
        let store = self.store()?;
        Ok(selectors::words_due_now(&store, &self.catalog, now))
    }

    pub fn due_reviews(&self, now: DateTime<Utc>, limit: Option<usize>) -> Result<Vec<ProgressRecord>> {
        let store = self.store()?;
        Ok(selectors::due_reviews(&store, now, limit))
    }

    pub fn new_words(&self, limit: Option<usize>) -> Result<Vec<Word>> {
        let store = self.store()?;
        Ok(selectors::new_words(&store, &self.catalog, limit))
    }

    pub fn all_words(&self, query: &str, order: SortOrder) -> Result<Vec<WordOverview>> {
        let store = self.store()?;
        Ok(selectors::all_words(&store, &self.catalog, query, order))
    }

    pub fn stats(&self, now: DateTime<Utc>) -> Result<ProgressStats> {
        let store = self.store()?;
        Ok(selectors::stats(&store, &self.catalog, now))
    }

    /// Write all progress to the store's backing file
    pub fn persist(&self) -> Result<()> {
        self.store()?.persist_all()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{CatalogDefinitions, KeywordJudge};
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;
    use std::thread;
    use tempfile::TempDir;

    struct FailingJudge;

    impl ExplanationJudge for FailingJudge {
        fn judge(&self, _: &str, _: &str, _: &str, _: &str) -> std::result::Result<Judgement, ProviderError> {
            Err(ProviderError::Unavailable("rate limited".to_string()))
        }
    }

    struct FixedJudge(bool);

    impl ExplanationJudge for FixedJudge {
        fn judge(&self, _: &str, _: &str, _: &str, _: &str) -> std::result::Result<Judgement, ProviderError> {
            Ok(Judgement {
                is_correct: self.0,
                feedback: String::new(),
                confidence: None,
            })
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 20, 18, 0, 0).unwrap()
    }

    fn create_test_service() -> ReviewService {
        let mut catalog = WordCatalog::new();
        let mut word = Word::new("ephemeral".to_string(), "ephemeral".to_string());
        word.definition = Some("lasting for a very short time".to_string());
        word.example_sentence = Some("Fame in the internet age is ephemeral.".to_string());
        catalog.insert(word);
        catalog.import_lines("abate\ncandid");

        ReviewService::new(
            IntervalTable::new(vec![1, 3, 7, 14, 30]).unwrap(),
            catalog,
            ProgressStore::in_memory(),
        )
    }

    #[test]
    fn test_learn_then_review() {
        let service = create_test_service();

        let created = service.learn("abate", t0()).unwrap();
        assert_eq!(created.status, WordStatus::Learning);

        let reviewed = service.review("abate", true, t0() + Duration::days(1)).unwrap();
        assert_eq!(reviewed.interval_index, 1);
        assert_eq!(reviewed.status, WordStatus::Reviewing);
        assert_eq!(reviewed.streak, 1);
        assert_eq!(service.record("abate").unwrap(), Some(reviewed));
    }

    #[test]
    fn test_learn_twice_is_rejected() {
        let service = create_test_service();
        service.learn("abate", t0()).unwrap();
        assert!(matches!(
            service.learn("abate", t0()),
            Err(ReviewError::AlreadyTracked(_))
        ));
    }

    #[test]
    fn test_review_without_record_is_rejected() {
        let service = create_test_service();
        assert!(matches!(
            service.review("abate", true, t0()),
            Err(ReviewError::MissingRecord(_))
        ));
        assert_eq!(service.status_of("abate").unwrap(), WordStatus::New);
    }

    #[test]
    fn test_queries_see_current_progress() {
        let service = create_test_service();
        service.learn("abate", t0()).unwrap();
        let now = t0() + Duration::days(2);

        let due: Vec<String> = service
            .words_due_now(now)
            .unwrap()
            .into_iter()
            .map(|w| w.word_id)
            .collect();
        assert_eq!(due, vec!["abate", "candid", "ephemeral"]);

        assert_eq!(service.due_reviews(now, None).unwrap().len(), 1);
        assert_eq!(service.new_words(None).unwrap().len(), 2);
        assert_eq!(service.all_words("ab", SortOrder::Ascending).unwrap().len(), 1);
        assert_eq!(service.status_of("abate").unwrap(), WordStatus::Learning);

        let stats = service.stats(now).unwrap();
        assert_eq!(stats.total_words, 3);
        assert_eq!(stats.new_words, 2);
        assert_eq!(stats.learning_words, 1);
        assert_eq!(stats.due_now, 1);
    }

    #[test]
    fn test_unknown_word_is_still_scheduled() {
        let service = create_test_service();
        service.learn("not-in-catalog", t0()).unwrap();
        let r = service.review("not-in-catalog", false, t0()).unwrap();
        assert_eq!(r.total_reviews, 1);
    }

    #[test]
    fn test_practice_creates_when_missing() {
        let service = create_test_service();
        let r = service.practice("candid", true, t0()).unwrap();
        assert_eq!(r.interval_index, 1);
        assert_eq!(r.total_reviews, 1);
    }

    #[test]
    fn test_reset_reverts_to_new() {
        let service = create_test_service();
        service.learn("abate", t0()).unwrap();

        assert!(service.reset("abate").unwrap());
        assert_eq!(service.record("abate").unwrap(), None);
        assert_eq!(service.status_of("abate").unwrap(), WordStatus::New);
        assert!(!service.reset("abate").unwrap());
    }

    #[test]
    fn test_explanation_verdict_is_recorded() {
        let service = create_test_service();
        service.learn("ephemeral", t0()).unwrap();
        let definitions = CatalogDefinitions::new(service.catalog());

        let outcome = service
            .submit_explanation(
                "ephemeral",
                "The ephemeral fame of a viral video lasts a very short time",
                &definitions,
                &KeywordJudge::default(),
                t0(),
            )
            .unwrap();
        assert!(outcome.judgement.is_correct);
        assert_eq!(outcome.record.interval_index, 1);

        let outcome = service
            .submit_explanation("ephemeral", "whatever", &definitions, &FixedJudge(false), t0())
            .unwrap();
        assert!(!outcome.judgement.is_correct);
        assert_eq!(outcome.record.interval_index, 0);
        assert_eq!(outcome.record.total_reviews, 2);
    }

    #[test]
    fn test_provider_failure_leaves_progress_untouched() {
        let service = create_test_service();
        let before = service.learn("ephemeral", t0()).unwrap();
        let definitions = CatalogDefinitions::new(service.catalog());

        let result = service.submit_explanation(
            "ephemeral",
            "short-lived",
            &definitions,
            &FailingJudge,
            t0() + Duration::days(1),
        );
        assert!(matches!(result, Err(ReviewError::ProviderFailure(_))));
        assert_eq!(service.record("ephemeral").unwrap(), Some(before.clone()));

        // No cached details for "abate"
        service.learn("abate", t0()).unwrap();
        let result = service.submit_explanation("abate", "less", &definitions, &FixedJudge(true), t0());
        assert!(matches!(result, Err(ReviewError::ProviderFailure(ProviderError::NoDetails(_)))));
        assert_eq!(service.record("abate").unwrap().unwrap().total_reviews, 0);
    }

    #[test]
    fn test_concurrent_reviews_of_different_words() {
        let service = Arc::new(create_test_service());
        let words = ["abate", "candid", "ephemeral"];
        for w in words {
            service.learn(w, t0()).unwrap();
        }

        let handles: Vec<_> = words
            .iter()
            .map(|&w| {
                let service = Arc::clone(&service);
                thread::spawn(move || {
                    for i in 0..3 {
                        service.review(w, true, t0() + Duration::days(i)).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        for w in words {
            let r = service.record(w).unwrap().unwrap();
            assert_eq!(r.total_reviews, 3);
            assert_eq!(r.interval_index, 3);
        }
    }

    #[test]
    fn test_persist_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("progress.json");
        let table = IntervalTable::default();

        let service = ReviewService::new(
            table.clone(),
            WordCatalog::starter(),
            ProgressStore::new(path.clone()),
        );
        service.learn("abate", t0()).unwrap();
        service.persist().unwrap();

        let reopened = ProgressStore::open(path, &table).unwrap();
        assert_eq!(reopened.status_of("abate"), WordStatus::Learning);
    }
}
