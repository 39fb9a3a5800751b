//! Offline explanation judge based on shared content words

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use super::traits::{ExplanationJudge, Judgement, ProviderError};

const STOP_WORDS: &[&str] = &[
    "about", "also", "been", "being", "does", "from", "have", "into", "just", "like", "more",
    "much", "some", "something", "such", "that", "than", "their", "them", "then", "there",
    "these", "they", "thing", "this", "very", "were", "what", "when", "which", "with", "would",
    "your",
];

/// Words shorter than this never count as overlap
const MIN_TERM_LEN: usize = 4;

fn term_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z][A-Za-z'-]*").unwrap())
}

fn content_terms(text: &str) -> HashSet<String> {
    term_regex()
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|t| t.len() >= MIN_TERM_LEN && !STOP_WORDS.contains(&t.as_str()))
        .collect()
}

/// Every word in `text`, lowercased, with hyphenated compounds split apart
fn raw_tokens(text: &str) -> Vec<String> {
    let spaced = text.replace('-', " ");
    term_regex()
        .find_iter(&spaced)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// Whether `tokens` contain the (possibly multi-word) `word` as a run
fn contains_word(tokens: &[String], word: &[String]) -> bool {
    !word.is_empty() && tokens.windows(word.len()).any(|w| w == word)
}

/// Judges an explanation by how many content words it shares with the
/// definition and example.
///
/// An explanation is accepted when it shares at least `min_overlap` terms,
/// or when it uses the word itself in a sentence of four or more words and
/// shares at least one term.
#[derive(Debug, Clone)]
pub struct KeywordJudge {
    min_overlap: usize,
}

impl KeywordJudge {
    pub fn new(min_overlap: usize) -> Self {
        Self {
            min_overlap: min_overlap.max(1),
        }
    }
}

impl Default for KeywordJudge {
    fn default() -> Self {
        Self::new(2)
    }
}

impl ExplanationJudge for KeywordJudge {
    fn judge(
        &self,
        word: &str,
        definition: &str,
        example: &str,
        user_text: &str,
    ) -> Result<Judgement, ProviderError> {
        if user_text.trim().is_empty() {
            return Err(ProviderError::EmptyInput);
        }

        let word_tokens = raw_tokens(word);
        let mut reference = content_terms(definition);
        reference.extend(content_terms(example));
        reference.remove(&word.to_lowercase());
        for token in &word_tokens {
            reference.remove(token);
        }

        let user_terms = content_terms(user_text);
        let mut shared: Vec<&String> = user_terms.intersection(&reference).collect();
        shared.sort();

        let user_tokens = raw_tokens(user_text);
        let uses_word = contains_word(&user_tokens, &word_tokens);
        let sentence_len = user_tokens.len();

        let is_correct = shared.len() >= self.min_overlap
            || (uses_word && sentence_len >= 4 && !shared.is_empty());

        let feedback = if is_correct {
            format!(
                "Looks right. Your explanation matches the meaning of '{}' ({}).",
                word,
                shared
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        } else if shared.is_empty() {
            format!(
                "Not quite. Your explanation does not touch on what '{}' means: {}",
                word, definition
            )
        } else {
            format!(
                "Partly there, but too thin to count. '{}' means: {}",
                word, definition
            )
        };

        let confidence = (shared.len() as f32 / (self.min_overlap as f32 * 2.0)).min(1.0);

        Ok(Judgement {
            is_correct,
            feedback,
            confidence: Some(if is_correct { confidence.max(0.5) } else { 1.0 - confidence }),
        })
    }
}
