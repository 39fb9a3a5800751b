use anyhow::Result;
use chrono::Utc;

use lexiloop_lib::catalog::Word;
use lexiloop_lib::scheduling::ProgressRecord;

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

fn print_record(app: &App, word: &Word, record: &ProgressRecord, format: &OutputFormat, use_color: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(record)?);
        }
        OutputFormat::Plain => {
            println!(
                "{} {}",
                terminal::paint(&word.text, Color::BOLD, use_color),
                terminal::status_badge(record.status, use_color)
            );
            if record.is_mastered() {
                println!("  Mastered. No further reviews scheduled.");
            } else {
                println!(
                    "  Next review: {} ({})",
                    terminal::next_review_label(Some(record), Utc::now()),
                    terminal::interval_label(app.service.table(), record)
                );
            }
            println!("  Correct in a row: {}", record.streak);
        }
    }
    Ok(())
}

pub fn run_learn(app: &App, query: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let word = app.resolve_word(query);
    let record = app.service.learn(&word.id, Utc::now())?;
    print_record(app, &word, &record, format, use_color)
}

pub fn run_review(
    app: &App,
    query: &str,
    remembered: bool,
    start_if_new: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let word = app.resolve_word(query);
    let now = Utc::now();
    let record = if start_if_new {
        app.service.practice(&word.id, remembered, now)?
    } else {
        app.service.review(&word.id, remembered, now)?
    };
    print_record(app, &word, &record, format, use_color)
}

pub fn run_reset(app: &App, query: &str, format: &OutputFormat) -> Result<()> {
    let word = app.resolve_word(query);
    let removed = app.service.reset(&word.id)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "wordId": word.id,
                "reset": removed,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if removed {
                println!("Reset progress for \"{}\". It is a new word again.", word.text);
            } else {
                println!("\"{}\" had no progress to reset.", word.text);
            }
        }
    }

    Ok(())
}
