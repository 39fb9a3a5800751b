use anyhow::Result;
use chrono::Utc;

use lexiloop_lib::scheduling::WordStatus;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let stats = app.service.stats(Utc::now())?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Plain => {
            println!("{} words", stats.total_words);
            let rows = [
                (WordStatus::New, stats.new_words),
                (WordStatus::Learning, stats.learning_words),
                (WordStatus::Reviewing, stats.reviewing_words),
                (WordStatus::Mastered, stats.mastered_words),
            ];
            for (status, count) in rows {
                println!("  {} {}", terminal::status_badge(status, use_color), count);
            }
            println!();
            println!(
                "{} due for review now",
                terminal::paint(&stats.due_now.to_string(), terminal::Color::BOLD, use_color)
            );
        }
    }

    Ok(())
}
