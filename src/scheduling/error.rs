use thiserror::Error;

/// Errors raised by the scheduling engine.
///
/// Both variants are precondition violations on the caller's side; the
/// engine itself never fails on valid input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Interval index {index} out of range for a ladder of {len} steps")]
    InvalidIndex { index: usize, len: usize },

    #[error("Word id must not be empty")]
    EmptyWordId,
}

/// Errors raised while building an interval ladder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntervalError {
    #[error("Interval ladder needs at least 2 steps, got {0}")]
    TooShort(usize),

    #[error("Interval at step {0} must be at least one day")]
    NonPositive(usize),

    #[error("Interval at step {index} ({days}d) is shorter than the step before it")]
    Decreasing { index: usize, days: u32 },
}
