use anyhow::Result;

use lexiloop_lib::catalog::word_id_for;
use lexiloop_lib::provider::parse_batch_details;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, content: &str, details: Option<&str>, format: &OutputFormat) -> Result<()> {
    let catalog = app.service.catalog_mut();
    let added = catalog.import_lines(content);

    let mut defined = 0;
    if let Some(raw) = details {
        let texts: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();
        for (text, word_details) in parse_batch_details(raw, &texts)? {
            if catalog.set_details(&word_id_for(&text), &word_details) {
                defined += 1;
            }
        }
    }
    let total = catalog.len();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "added": added,
                "defined": defined,
                "total": total,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Added {} words ({} in the word list)", added, total);
            if details.is_some() {
                println!("Saved details for {} words", defined);
            }
        }
    }

    Ok(())
}
