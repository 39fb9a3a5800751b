use chrono::{DateTime, Local, Utc};

use lexiloop_lib::scheduling::{format_interval, IntervalTable, ProgressRecord, WordStatus};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const ITALIC: &str = "\x1b[3m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap text in a color when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

fn status_color(status: WordStatus) -> &'static str {
    match status {
        WordStatus::New => Color::GRAY,
        WordStatus::Learning => Color::BLUE,
        WordStatus::Reviewing => Color::YELLOW,
        WordStatus::Mastered => Color::GREEN,
    }
}

/// Fixed-width status label, e.g. `[Reviewing]`
pub fn status_badge(status: WordStatus, use_color: bool) -> String {
    let label = format!("[{}]", status.label());
    paint(&format!("{:<11}", label), status_color(status), use_color)
}

/// Human-readable next review time
pub fn next_review_label(record: Option<&ProgressRecord>, now: DateTime<Utc>) -> String {
    let Some(record) = record else {
        return "N/A".to_string();
    };
    if record.is_mastered() {
        return "Mastered".to_string();
    }
    match record.next_review_at {
        Some(due) if due <= now => "due now".to_string(),
        Some(due) => due.with_timezone(&Local).format("%Y-%m-%d").to_string(),
        None => "N/A".to_string(),
    }
}

/// e.g. `2w (step 4 of 7)`
pub fn interval_label(table: &IntervalTable, record: &ProgressRecord) -> String {
    let days = table.days(record.interval_index).unwrap_or(0);
    format!(
        "{} (step {} of {})",
        format_interval(days),
        record.interval_index + 1,
        table.len()
    )
}
