//! Read-side queries over progress and catalog
//!
//! Every selector is a pure function of the store and catalog it is given;
//! calling one twice with no write in between returns the same result.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::{Word, WordCatalog};
use crate::progress::ProgressStore;
use crate::scheduling::{ProgressRecord, WordStatus};

/// A word that should be shown in the current session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueWord {
    pub word_id: String,
    pub status: WordStatus,
    /// `None` for words that have never been reviewed
    pub next_review_at: Option<DateTime<Utc>>,
}

/// A catalog word together with its progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordOverview {
    pub word: Word,
    pub status: WordStatus,
    pub record: Option<ProgressRecord>,
}

/// Counts per status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    pub total_words: usize,
    pub new_words: usize,
    pub learning_words: usize,
    pub reviewing_words: usize,
    pub mastered_words: usize,
    pub due_now: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

fn by_due_date(a: &ProgressRecord, b: &ProgressRecord) -> std::cmp::Ordering {
    a.next_review_at
        .cmp(&b.next_review_at)
        .then_with(|| a.word_id.cmp(&b.word_id))
}

/// Status of a word; words without a record are new
pub fn status_of(store: &ProgressStore, word_id: &str) -> WordStatus {
    store.status_of(word_id)
}

/// Scheduled words whose review time has come, longest overdue first
pub fn due_reviews(
    store: &ProgressStore,
    now: DateTime<Utc>,
    limit: Option<usize>,
) -> Vec<ProgressRecord> {
    let mut due: Vec<ProgressRecord> = store.iter().filter(|r| r.is_due(now)).cloned().collect();
    due.sort_by(by_due_date);
    if let Some(limit) = limit {
        due.truncate(limit);
    }
    due
}

/// Catalog words that have never been reviewed, in catalog order
pub fn new_words(store: &ProgressStore, catalog: &WordCatalog, limit: Option<usize>) -> Vec<Word> {
    catalog
        .iter()
        .filter(|w| store.get(&w.id).is_none())
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect()
}

/// Everything the learner could be shown now.
///
/// Due records come first, ordered by review time then id. Words that have
/// never been reviewed follow, ordered by id.
pub fn words_due_now(store: &ProgressStore, catalog: &WordCatalog, now: DateTime<Utc>) -> Vec<DueWord> {
    let mut due: Vec<DueWord> = due_reviews(store, now, None)
        .into_iter()
        .map(|r| DueWord {
            word_id: r.word_id,
            status: r.status,
            next_review_at: r.next_review_at,
        })
        .collect();

    let mut fresh: Vec<DueWord> = catalog
        .ids()
        .filter(|id| store.get(id).is_none())
        .map(|id| DueWord {
            word_id: id.to_string(),
            status: WordStatus::New,
            next_review_at: None,
        })
        .collect();
    fresh.sort_by(|a, b| a.word_id.cmp(&b.word_id));

    due.extend(fresh);
    due
}

/// All catalog words with their status, filtered by a case-insensitive
/// substring of the text and sorted by text
pub fn all_words(
    store: &ProgressStore,
    catalog: &WordCatalog,
    query: &str,
    order: SortOrder,
) -> Vec<WordOverview> {
    let needle = query.trim().to_lowercase();

    let mut words: Vec<WordOverview> = catalog
        .iter()
        .filter(|w| needle.is_empty() || w.text.to_lowercase().contains(&needle))
        .map(|w| {
            let record = store.get(&w.id).cloned();
            WordOverview {
                word: w.clone(),
                status: record.as_ref().map(|r| r.status).unwrap_or(WordStatus::New),
                record,
            }
        })
        .collect();

    words.sort_by(|a, b| {
        let ord = a
            .word
            .text
            .to_lowercase()
            .cmp(&b.word.text.to_lowercase())
            .then_with(|| a.word.id.cmp(&b.word.id));
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });

    words
}

/// Dashboard counts
pub fn stats(store: &ProgressStore, catalog: &WordCatalog, now: DateTime<Utc>) -> ProgressStats {
    let mut stats = ProgressStats::default();

    stats.new_words = catalog.ids().filter(|id| store.get(id).is_none()).count();

    for record in store.iter() {
        match record.status {
            WordStatus::Learning => stats.learning_words += 1,
            WordStatus::Reviewing => stats.reviewing_words += 1,
            WordStatus::Mastered => stats.mastered_words += 1,
            WordStatus::New => {}
        }
        if record.is_due(now) {
            stats.due_now += 1;
        }
    }

    stats.total_words = stats.new_words + store.len();
    stats
}
