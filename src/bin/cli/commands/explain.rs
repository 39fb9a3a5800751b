use anyhow::{bail, Result};
use chrono::Utc;

use lexiloop_lib::provider::{CatalogDefinitions, KeywordJudge};

use crate::app::App;
use crate::render::terminal::{self, Color};
use crate::OutputFormat;

pub fn run(app: &App, query: &str, text: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let word = app.resolve_word(query);
    if word.details().is_none() {
        bail!(
            "No definition cached for \"{}\"; add one to the word list before explaining it",
            word.text
        );
    }

    let definitions = CatalogDefinitions::new(app.service.catalog());
    let judge = KeywordJudge::new(app.config.session.judge_min_overlap);
    let outcome = app
        .service
        .submit_explanation(&word.id, text, &definitions, &judge, Utc::now())?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        OutputFormat::Plain => {
            let verdict = if outcome.judgement.is_correct {
                terminal::paint("Correct", Color::GREEN, use_color)
            } else {
                terminal::paint("Not quite", Color::RED, use_color)
            };
            println!("{}: {}", verdict, outcome.judgement.feedback);
            println!(
                "Next review: {} {}",
                terminal::next_review_label(Some(&outcome.record), Utc::now()),
                terminal::status_badge(outcome.record.status, use_color)
            );
        }
    }

    Ok(())
}
