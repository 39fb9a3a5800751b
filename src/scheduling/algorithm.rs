//! Interval ladder scheduling
//!
//! A simplified forgetting-curve model over a fixed ladder of intervals:
//! - A correct answer climbs one step (or masters the word at the top step)
//! - A wrong answer drops two steps, floored at step 0, and revokes mastery
//!
//! Both transitions are pure: they take the current record by reference and
//! return its replacement.

use chrono::{DateTime, Duration, Utc};

use super::error::ScheduleError;
use super::intervals::IntervalTable;
use super::models::{ProgressRecord, WordStatus};

/// Steps dropped on a wrong answer
const DEMOTION_STEPS: usize = 2;

/// What each answer would do to a record
#[derive(Debug, Clone)]
pub struct ReviewPreview {
    pub remembered: ProgressRecord,
    pub forgotten: ProgressRecord,
}

fn due_after(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now + Duration::days(i64::from(days))
}

/// Create the record for a word's first review
pub fn create_record(
    table: &IntervalTable,
    word_id: &str,
    now: DateTime<Utc>,
) -> Result<ProgressRecord, ScheduleError> {
    if word_id.is_empty() {
        return Err(ScheduleError::EmptyWordId);
    }

    Ok(ProgressRecord {
        word_id: word_id.to_string(),
        status: WordStatus::Learning,
        last_reviewed_at: Some(now),
        next_review_at: Some(due_after(now, table.days(0)?)),
        interval_index: 0,
        streak: 0,
        total_reviews: 0,
    })
}

/// Compute the record that follows one review event
///
/// # Arguments
/// * `record` - Current record for the word
/// * `remembered` - Whether the learner recalled the word correctly
/// * `now` - Time of the review
pub fn advise_review(
    table: &IntervalTable,
    record: &ProgressRecord,
    remembered: bool,
    now: DateTime<Utc>,
) -> Result<ProgressRecord, ScheduleError> {
    let top = table.last_index();
    if record.interval_index > top {
        return Err(ScheduleError::InvalidIndex {
            index: record.interval_index,
            len: table.len(),
        });
    }

    let mut next = record.clone();
    next.last_reviewed_at = Some(now);
    next.total_reviews = record.total_reviews.saturating_add(1);

    if remembered {
        next.streak = record.streak.saturating_add(1);

        if record.interval_index == top {
            // Pinned at the top; mastery has no further review date
            next.status = WordStatus::Mastered;
            next.next_review_at = None;
            return Ok(next);
        }

        next.interval_index = record.interval_index + 1;
        next.status = WordStatus::Reviewing;
    } else {
        next.streak = 0;
        next.interval_index = record.interval_index.saturating_sub(DEMOTION_STEPS);
        next.status = match record.status {
            WordStatus::Mastered => WordStatus::Reviewing,
            WordStatus::New => WordStatus::Learning,
            other => other,
        };
    }

    next.next_review_at = Some(due_after(now, table.days(next.interval_index)?));
    Ok(next)
}

/// Preview the outcome of both answers, e.g. to label review buttons
pub fn preview_review(
    table: &IntervalTable,
    record: &ProgressRecord,
    now: DateTime<Utc>,
) -> Result<ReviewPreview, ScheduleError> {
    Ok(ReviewPreview {
        remembered: advise_review(table, record, true, now)?,
        forgotten: advise_review(table, record, false, now)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 10, 8, 30, 0).unwrap()
    }

    fn short_table() -> IntervalTable {
        IntervalTable::new(vec![1, 3, 7, 14, 30]).unwrap()
    }

    fn at(status: WordStatus, index: usize) -> ProgressRecord {
        ProgressRecord {
            word_id: "abate".to_string(),
            status,
            last_reviewed_at: Some(t0()),
            next_review_at: if status == WordStatus::Mastered {
                None
            } else {
                Some(t0())
            },
            interval_index: index,
            streak: 3,
            total_reviews: 10,
        }
    }

    #[test]
    fn test_create_record() {
        let table = IntervalTable::default();
        let r = create_record(&table, "abate", t0()).unwrap();

        assert_eq!(r.word_id, "abate");
        assert_eq!(r.status, WordStatus::Learning);
        assert_eq!(r.interval_index, 0);
        assert_eq!(r.streak, 0);
        assert_eq!(r.total_reviews, 0);
        assert_eq!(r.last_reviewed_at, Some(t0()));
        assert_eq!(r.next_review_at, Some(t0() + Duration::days(1)));
    }

    #[test]
    fn test_create_record_rejects_empty_id() {
        let table = IntervalTable::default();
        assert_eq!(
            create_record(&table, "", t0()),
            Err(ScheduleError::EmptyWordId)
        );
    }

    #[test]
    fn test_first_correct_answer_promotes() {
        let table = short_table();
        let fresh = create_record(&table, "abate", t0()).unwrap();
        let later = t0() + Duration::days(1);

        let r = advise_review(&table, &fresh, true, later).unwrap();

        assert_eq!(r.interval_index, 1);
        assert_eq!(r.status, WordStatus::Reviewing);
        assert_eq!(r.streak, 1);
        assert_eq!(r.total_reviews, 1);
        assert_eq!(r.last_reviewed_at, Some(later));
        assert_eq!(r.next_review_at, Some(later + Duration::days(3)));
    }

    #[test]
    fn test_correct_at_top_masters() {
        let table = short_table();
        let r = advise_review(&table, &at(WordStatus::Reviewing, 4), true, t0()).unwrap();

        assert_eq!(r.status, WordStatus::Mastered);
        assert_eq!(r.interval_index, 4);
        assert_eq!(r.next_review_at, None);
        assert_eq!(r.streak, 4);
    }

    #[test]
    fn test_mastered_failure_demotes_two_steps() {
        let table = short_table();
        let r = advise_review(&table, &at(WordStatus::Mastered, 4), false, t0()).unwrap();

        assert_eq!(r.interval_index, 2);
        assert_eq!(r.status, WordStatus::Reviewing);
        assert_eq!(r.streak, 0);
        assert_eq!(r.next_review_at, Some(t0() + Duration::days(7)));
    }

    #[test]
    fn test_demotion_floors_at_zero() {
        let table = short_table();
        for index in 0..2 {
            let r = advise_review(&table, &at(WordStatus::Learning, index), false, t0()).unwrap();
            assert_eq!(r.interval_index, 0);
            assert_eq!(r.status, WordStatus::Learning);
            assert_eq!(r.next_review_at, Some(t0() + Duration::days(1)));
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let table = short_table();
        let before = at(WordStatus::Reviewing, 2);
        let copy = before.clone();
        let _ = advise_review(&table, &before, false, t0()).unwrap();
        assert_eq!(before, copy);
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let table = short_table();
        let r = advise_review(&table, &at(WordStatus::Reviewing, 5), true, t0());
        assert_eq!(r, Err(ScheduleError::InvalidIndex { index: 5, len: 5 }));
    }

    #[test]
    fn test_invariants_hold_over_all_transitions() {
        let table = short_table();
        let statuses = [
            WordStatus::Learning,
            WordStatus::Reviewing,
            WordStatus::Mastered,
        ];

        for index in 0..table.len() {
            for status in statuses {
                if status == WordStatus::Mastered && index != table.last_index() {
                    continue;
                }
                let r = at(status, index);

                let up = advise_review(&table, &r, true, t0()).unwrap();
                let down = advise_review(&table, &r, false, t0()).unwrap();

                for next in [&up, &down] {
                    assert!(next.interval_index < table.len());
                    assert_eq!(next.is_mastered(), next.next_review_at.is_none());
                    assert_eq!(next.total_reviews, r.total_reviews + 1);
                }

                if index == table.last_index() {
                    assert_eq!(up.interval_index, index);
                } else {
                    assert_eq!(up.interval_index, index + 1);
                }
                assert_eq!(down.interval_index, index.saturating_sub(2));
                assert_ne!(down.status, WordStatus::Mastered);
            }
        }
    }

    #[test]
    fn test_walk_to_mastery_and_back() {
        let table = short_table();
        let mut r = create_record(&table, "abate", t0()).unwrap();
        let mut now = t0();

        for _ in 0..table.len() {
            now += Duration::days(1);
            r = advise_review(&table, &r, true, now).unwrap();
        }
        assert!(r.is_mastered());
        assert_eq!(r.streak, 5);
        assert_eq!(r.total_reviews, 5);

        r = advise_review(&table, &r, false, now).unwrap();
        assert_eq!(r.status, WordStatus::Reviewing);
        assert_eq!(r.interval_index, 2);
        assert_eq!(r.streak, 0);
        assert_eq!(r.total_reviews, 6);
    }

    #[test]
    fn test_preview() {
        let table = short_table();
        let p = preview_review(&table, &at(WordStatus::Reviewing, 3), t0()).unwrap();
        assert_eq!(p.remembered.interval_index, 4);
        assert_eq!(p.forgotten.interval_index, 1);
    }
}
