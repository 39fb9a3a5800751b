//! Review scheduling for Lexiloop
//!
//! This module provides:
//! - The fixed interval ladder (days between reviews)
//! - The per-word progress record and its status
//! - The pure transition functions that create and advance records

pub mod algorithm;
mod error;
pub mod intervals;
pub mod models;

pub use algorithm::{advise_review, create_record, preview_review, ReviewPreview};
pub use error::{IntervalError, ScheduleError};
pub use intervals::{format_interval, IntervalTable, DEFAULT_INTERVAL_DAYS};
pub use models::{ProgressRecord, WordStatus};
