//! Normalization of raw JSON replies from a text-generation service
//!
//! Replies often arrive wrapped in a Markdown code fence and with optional
//! keys missing. Missing display text is replaced with a placeholder; a
//! missing verdict is an error, never a silent "incorrect".

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use super::traits::{Judgement, ProviderError};
use crate::catalog::WordDetails;

const NO_DEFINITION: &str = "No definition provided.";
const NO_EXAMPLE: &str = "No example sentence provided.";
const MISSING_DEFINITION: &str = "Details not found in the reply for this word.";
const MISSING_EXAMPLE: &str = "Example not found in the reply for this word.";

fn fence_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)^```(\w*)?\s*\n?(.*?)\n?\s*```$").unwrap())
}

/// Remove a surrounding ```` ``` ```` fence (with optional language tag)
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    match fence_regex().captures(trimmed).and_then(|c| c.get(2)) {
        Some(body) if !body.as_str().trim().is_empty() => body.as_str().trim(),
        _ => trimmed,
    }
}

#[derive(Deserialize)]
struct RawDetails {
    #[serde(default)]
    word: Option<String>,
    #[serde(default)]
    definition: Option<String>,
    #[serde(default)]
    example_sentence: Option<String>,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    antonyms: Vec<String>,
}

#[derive(Deserialize)]
struct RawJudgement {
    is_correct: Option<bool>,
    #[serde(default)]
    feedback: Option<String>,
    #[serde(default)]
    confidence: Option<f32>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Parse a `{ word, definition, example_sentence, synonyms, antonyms }` reply
pub fn parse_word_details(raw: &str, word: &str) -> Result<WordDetails, ProviderError> {
    let parsed: RawDetails = serde_json::from_str(strip_code_fence(raw))?;

    Ok(WordDetails {
        text: non_empty(parsed.word).unwrap_or_else(|| word.to_string()),
        definition: non_empty(parsed.definition).unwrap_or_else(|| NO_DEFINITION.to_string()),
        example_sentence: non_empty(parsed.example_sentence)
            .unwrap_or_else(|| NO_EXAMPLE.to_string()),
        synonyms: parsed.synonyms,
        antonyms: parsed.antonyms,
    })
}

/// Parse a batch reply keyed by word: `{ "<word>": { definition, example_sentence }, ... }`.
///
/// Every requested word gets an entry. Words the reply left out get a
/// "not found" placeholder, and keys nobody asked for are ignored.
pub fn parse_batch_details(
    raw: &str,
    words: &[&str],
) -> Result<HashMap<String, WordDetails>, ProviderError> {
    if words.is_empty() {
        return Ok(HashMap::new());
    }

    let mut parsed: HashMap<String, RawDetails> = serde_json::from_str(strip_code_fence(raw))?;

    let mut details = HashMap::with_capacity(words.len());
    for &word in words {
        let entry = match parsed.remove(word) {
            Some(item) => WordDetails {
                text: word.to_string(),
                definition: non_empty(item.definition)
                    .unwrap_or_else(|| NO_DEFINITION.to_string()),
                example_sentence: non_empty(item.example_sentence)
                    .unwrap_or_else(|| NO_EXAMPLE.to_string()),
                synonyms: item.synonyms,
                antonyms: item.antonyms,
            },
            None => {
                log::warn!("Batch reply had no entry for '{}'", word);
                WordDetails {
                    text: word.to_string(),
                    definition: MISSING_DEFINITION.to_string(),
                    example_sentence: MISSING_EXAMPLE.to_string(),
                    synonyms: Vec::new(),
                    antonyms: Vec::new(),
                }
            }
        };
        details.insert(word.to_string(), entry);
    }

    Ok(details)
}

/// Parse an `{ is_correct, feedback, confidence }` reply
pub fn parse_judgement(raw: &str) -> Result<Judgement, ProviderError> {
    let parsed: RawJudgement = serde_json::from_str(strip_code_fence(raw))?;

    let is_correct = parsed
        .is_correct
        .ok_or_else(|| ProviderError::Malformed("missing is_correct".to_string()))?;

    Ok(Judgement {
        is_correct,
        feedback: parsed.feedback.unwrap_or_default(),
        confidence: parsed.confidence.map(|c| c.clamp(0.0, 1.0)),
    })
}
