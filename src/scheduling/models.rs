//! Data models for per-word review progress

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::intervals::IntervalTable;

/// Learning status of a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordStatus {
    /// No progress record exists yet
    New,
    /// Introduced, not yet answered correctly
    Learning,
    /// Climbing the interval ladder
    Reviewing,
    /// Passed the top of the ladder
    Mastered,
}

impl Default for WordStatus {
    fn default() -> Self {
        Self::New
    }
}

impl WordStatus {
    pub fn label(&self) -> &'static str {
        match self {
            WordStatus::New => "New",
            WordStatus::Learning => "Learning",
            WordStatus::Reviewing => "Reviewing",
            WordStatus::Mastered => "Mastered",
        }
    }
}

impl fmt::Display for WordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Progress of a single word through the interval ladder
///
/// Field aliases accept progress exported by the browser version of the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub word_id: String,
    pub status: WordStatus,
    #[serde(default, alias = "lastReviewedDate")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
    /// Absent exactly when the word is mastered
    #[serde(default, alias = "nextReviewDate")]
    pub next_review_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "currentIntervalIndex")]
    pub interval_index: usize,
    /// Consecutive correct answers
    #[serde(default, alias = "timesCorrectStraight")]
    pub streak: u32,
    #[serde(default, alias = "totalTimesReviewed")]
    pub total_reviews: u32,
}

impl ProgressRecord {
    pub fn is_mastered(&self) -> bool {
        self.status == WordStatus::Mastered
    }

    /// Check if the word is due for review at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.next_review_at {
            Some(due) => !self.is_mastered() && due <= now,
            None => false,
        }
    }

    /// Bring a record read from disk back in line with the active ladder.
    ///
    /// Returns `None` when the record cannot be salvaged and the word should
    /// fall back to virtual NEW.
    pub fn repaired(mut self, table: &IntervalTable, loaded_at: DateTime<Utc>) -> Option<Self> {
        if self.word_id.trim().is_empty() {
            log::warn!("Dropping progress record with an empty word id");
            return None;
        }

        if self.status == WordStatus::New {
            log::warn!(
                "Dropping progress record for '{}' stored with status new",
                self.word_id
            );
            return None;
        }

        if self.interval_index > table.last_index() {
            log::warn!(
                "Clamping interval index {} of '{}' to {}",
                self.interval_index,
                self.word_id,
                table.last_index()
            );
            self.interval_index = table.last_index();
        }

        if self.status == WordStatus::Mastered && self.interval_index < table.last_index() {
            log::warn!(
                "Moving mastered word '{}' from interval index {} to the top step {}",
                self.word_id,
                self.interval_index,
                table.last_index()
            );
            self.interval_index = table.last_index();
        }

        match (self.status, self.next_review_at) {
            (WordStatus::Mastered, Some(_)) => {
                log::warn!("Clearing next review date of mastered word '{}'", self.word_id);
                self.next_review_at = None;
            }
            (WordStatus::Learning | WordStatus::Reviewing, None) => {
                let base = self.last_reviewed_at.unwrap_or(loaded_at);
                let days = table.days(self.interval_index).unwrap_or(1);
                log::warn!(
                    "Rescheduling '{}' which had no next review date",
                    self.word_id
                );
                self.next_review_at = Some(base + Duration::days(i64::from(days)));
            }
            _ => {}
        }

        Some(self)
    }
}
