use anyhow::{bail, Result};

use lexiloop_lib::catalog::WordDetails;
use lexiloop_lib::provider::parse_word_details;

use crate::app::App;
use crate::OutputFormat;

/// Where the details for `define` come from
pub enum DetailsSource {
    /// Definition and example given on the command line
    Inline {
        definition: String,
        example: String,
    },
    /// A JSON reply from a definition service
    Json(String),
}

pub fn run(app: &mut App, query: &str, source: DetailsSource, format: &OutputFormat) -> Result<()> {
    let word = app.resolve_word(query);

    let details = match source {
        DetailsSource::Inline { definition, example } => {
            if definition.trim().is_empty() {
                bail!("Definition must not be empty");
            }
            WordDetails {
                text: word.text.clone(),
                definition,
                example_sentence: example,
                synonyms: word.synonyms.clone(),
                antonyms: word.antonyms.clone(),
            }
        }
        DetailsSource::Json(raw) => parse_word_details(&raw, &word.text)?,
    };

    let catalog = app.service.catalog_mut();
    if !catalog.contains(&word.id) {
        catalog.insert(word.clone());
    }
    catalog.set_details(&word.id, &details);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&details)?);
        }
        OutputFormat::Plain => {
            println!("Saved details for \"{}\"", word.text);
            println!("  Definition: {}", details.definition);
            println!("  Example: {}", details.example_sentence);
        }
    }

    Ok(())
}
