use anyhow::Result;
use chrono::{Local, Utc};

use lexiloop_lib::scheduling::{format_interval, preview_review};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, query: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let word = app.resolve_word(query);
    let record = app.service.record(&word.id)?;
    let status = app.service.status_of(&word.id)?;
    let table = app.service.table();
    let now = Utc::now();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "word": word,
                "status": status,
                "record": record,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!(
                "{} {}",
                terminal::paint(&word.text, Color::BOLD, use_color),
                terminal::status_badge(status, use_color)
            );

            if let Some(ref definition) = word.definition {
                println!("\nDefinition: {}", definition);
            }
            if let Some(ref example) = word.example_sentence {
                println!("Example: {}", terminal::paint(example, Color::ITALIC, use_color));
            }
            if !word.synonyms.is_empty() {
                println!("Synonyms: {}", word.synonyms.join(", "));
            }
            if !word.antonyms.is_empty() {
                println!("Antonyms: {}", word.antonyms.join(", "));
            }

            let Some(record) = record else {
                println!("\nNot studied yet.");
                return Ok(());
            };

            println!();
            if let Some(last) = record.last_reviewed_at {
                println!("Last reviewed:   {}", last.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
            }
            println!("Next review:     {}", terminal::next_review_label(Some(&record), now));
            println!("Interval:        {}", terminal::interval_label(table, &record));
            println!("Correct in a row: {}", record.streak);
            println!("Total reviews:   {}", record.total_reviews);

            if !record.is_mastered() {
                let preview = preview_review(table, &record, now)?;
                let label = |r: &lexiloop_lib::ProgressRecord| match r.next_review_at {
                    Some(_) => format_interval(table.days(r.interval_index).unwrap_or(0)),
                    None => "mastered".to_string(),
                };
                println!(
                    "\nRemembered -> {}   Forgot -> {}",
                    terminal::paint(&label(&preview.remembered), Color::GREEN, use_color),
                    terminal::paint(&label(&preview.forgotten), Color::RED, use_color)
                );
            }
        }
    }

    Ok(())
}
