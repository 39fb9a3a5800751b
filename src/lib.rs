//! Lexiloop: a spaced-repetition scheduler for vocabulary words.
//!
//! The scheduling core lives in [`scheduling`] and is a pure transform from
//! `(record, remembered)` to the next record. [`progress`] owns the stored
//! records, [`session`] applies review events atomically and answers
//! "what should the learner see next", and [`provider`] holds the injected
//! definition and explanation-judging capabilities.

pub mod catalog;
pub mod config;
pub mod progress;
pub mod provider;
pub mod scheduling;
pub mod session;

pub use catalog::{Word, WordCatalog};
pub use config::AppConfig;
pub use progress::{ProgressStorageError, ProgressStore};
pub use scheduling::{IntervalTable, ProgressRecord, ScheduleError, WordStatus};
pub use session::{ReviewError, ReviewService};
