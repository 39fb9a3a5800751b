//! Review sessions
//!
//! This module provides:
//! - Read-side selectors over stored progress (due words, new words, stats)
//! - The review service that applies review events as atomic
//!   read-modify-write steps against the progress store

pub mod selectors;
mod service;

pub use selectors::{DueWord, ProgressStats, SortOrder, WordOverview};
pub use service::{ExplanationOutcome, ReviewError, ReviewService};
