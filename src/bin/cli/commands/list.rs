use anyhow::Result;
use chrono::Utc;

use lexiloop_lib::session::SortOrder;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(
    app: &App,
    search: Option<&str>,
    desc: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let order = if desc { SortOrder::Descending } else { SortOrder::Ascending };
    let words = app.service.all_words(search.unwrap_or(""), order)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&words)?);
        }
        OutputFormat::Plain => {
            if words.is_empty() {
                println!("No words match your search.");
                return Ok(());
            }

            let now = Utc::now();
            let max_len = words.iter().map(|w| w.word.text.len()).max().unwrap_or(4).max(4);

            for overview in &words {
                let next = terminal::next_review_label(overview.record.as_ref(), now);
                println!(
                    "{:<width$} {} {}",
                    overview.word.text,
                    terminal::status_badge(overview.status, use_color),
                    terminal::paint(&next, terminal::Color::DIM, use_color),
                    width = max_len
                );
            }

            println!("\n{} words", words.len());
        }
    }

    Ok(())
}
