//! The interval ladder
//!
//! An ordered, non-decreasing list of day counts. Step 0 is the first review
//! after a word is introduced, the last step is the mastery check.

use serde::{Deserialize, Serialize};

use super::error::{IntervalError, ScheduleError};

/// Default ladder in days
pub const DEFAULT_INTERVAL_DAYS: [u32; 7] = [1, 3, 7, 14, 30, 90, 180];

/// Fixed ladder of review intervals, in days
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct IntervalTable {
    days: Vec<u32>,
}

impl IntervalTable {
    pub fn new(days: Vec<u32>) -> Result<Self, IntervalError> {
        if days.len() < 2 {
            return Err(IntervalError::TooShort(days.len()));
        }

        for (index, &d) in days.iter().enumerate() {
            if d == 0 {
                return Err(IntervalError::NonPositive(index));
            }
            if index > 0 && d < days[index - 1] {
                return Err(IntervalError::Decreasing { index, days: d });
            }
        }

        Ok(Self { days })
    }

    /// Number of steps in the ladder
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Always false; a table has at least two steps
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Index of the top (mastery) step
    pub fn last_index(&self) -> usize {
        self.days.len() - 1
    }

    /// Day count at `index`
    pub fn days(&self, index: usize) -> Result<u32, ScheduleError> {
        self.days
            .get(index)
            .copied()
            .ok_or(ScheduleError::InvalidIndex {
                index,
                len: self.days.len(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.days.iter().copied()
    }
}

impl Default for IntervalTable {
    fn default() -> Self {
        Self {
            days: DEFAULT_INTERVAL_DAYS.to_vec(),
        }
    }
}

impl TryFrom<Vec<u32>> for IntervalTable {
    type Error = IntervalError;

    fn try_from(days: Vec<u32>) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<IntervalTable> for Vec<u32> {
    fn from(table: IntervalTable) -> Self {
        table.days
    }
}

/// Format an interval in days to a short label
pub fn format_interval(days: u32) -> String {
    if days == 0 {
        "now".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}
