use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{WordCatalog, WordDetails};

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed provider response: {0}")]
    Malformed(String),

    #[error("No details available for '{0}'")]
    NoDetails(String),

    #[error("Nothing to evaluate: the explanation is empty")]
    EmptyInput,
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::Malformed(e.to_string())
    }
}

/// Verdict on a learner's explanation of a word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Judgement {
    pub is_correct: bool,
    pub feedback: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// Supplies definition and example text for a word
pub trait DefinitionProvider {
    fn details(&self, word: &str) -> Result<WordDetails, ProviderError>;
}

/// Decides whether a learner's own explanation shows they know a word.
///
/// An `Err` means no verdict was reached. Callers must not turn it into a
/// failed review.
pub trait ExplanationJudge {
    fn judge(
        &self,
        word: &str,
        definition: &str,
        example: &str,
        user_text: &str,
    ) -> Result<Judgement, ProviderError>;
}

/// Serves details cached in the word catalog
pub struct CatalogDefinitions<'a> {
    catalog: &'a WordCatalog,
}

impl<'a> CatalogDefinitions<'a> {
    pub fn new(catalog: &'a WordCatalog) -> Self {
        Self { catalog }
    }
}

impl DefinitionProvider for CatalogDefinitions<'_> {
    fn details(&self, word: &str) -> Result<WordDetails, ProviderError> {
        self.catalog
            .resolve(word)
            .and_then(|w| w.details())
            .ok_or_else(|| ProviderError::NoDetails(word.to_string()))
    }
}
