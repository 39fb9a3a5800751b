use anyhow::Result;
use chrono::Utc;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run_due(app: &App, limit: Option<usize>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let now = Utc::now();
    let limit = limit.unwrap_or(app.config.session.reviews_per_session);
    let mut due = app.service.words_due_now(now)?;
    due.truncate(limit);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&due)?);
        }
        OutputFormat::Plain => {
            if due.is_empty() {
                println!("Nothing to study right now.");
                return Ok(());
            }

            for item in &due {
                let text = app
                    .service
                    .catalog()
                    .get(&item.word_id)
                    .map(|w| w.text.as_str())
                    .unwrap_or(item.word_id.as_str());
                let when = match item.next_review_at {
                    Some(due_at) => {
                        let overdue = (now - due_at).num_days();
                        if overdue > 0 {
                            format!("overdue {}d", overdue)
                        } else {
                            "due today".to_string()
                        }
                    }
                    None => "new".to_string(),
                };
                println!(
                    "{} {:<20} {}",
                    terminal::status_badge(item.status, use_color),
                    text,
                    terminal::paint(&when, terminal::Color::DIM, use_color)
                );
            }
        }
    }

    Ok(())
}

pub fn run_new(app: &App, limit: Option<usize>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let limit = limit.unwrap_or(app.config.session.new_words_per_session);
    let words = app.service.new_words(Some(limit))?;

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = words
                .iter()
                .map(|w| {
                    serde_json::json!({
                        "id": w.id,
                        "text": w.text,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if words.is_empty() {
                println!("No new words left. Import more with `lexiloop-cli import`.");
                return Ok(());
            }

            for w in &words {
                println!("{}", terminal::paint(&w.text, terminal::Color::CYAN, use_color));
            }
            println!("\nStart one with `lexiloop-cli learn <word>`.");
        }
    }

    Ok(())
}
