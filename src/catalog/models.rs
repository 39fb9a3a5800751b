//! Data models for catalog words

use serde::{Deserialize, Serialize};

/// A vocabulary word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_sentence: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub antonyms: Vec<String>,
}

impl Word {
    pub fn new(id: String, text: String) -> Self {
        Self {
            id,
            text,
            definition: None,
            example_sentence: None,
            synonyms: Vec::new(),
            antonyms: Vec::new(),
        }
    }

    /// Cached details, if both definition and example are known
    pub fn details(&self) -> Option<WordDetails> {
        match (&self.definition, &self.example_sentence) {
            (Some(definition), Some(example)) => Some(WordDetails {
                text: self.text.clone(),
                definition: definition.clone(),
                example_sentence: example.clone(),
                synonyms: self.synonyms.clone(),
                antonyms: self.antonyms.clone(),
            }),
            _ => None,
        }
    }
}

/// Definition and usage for a word, as shown to the learner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDetails {
    pub text: String,
    pub definition: String,
    pub example_sentence: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}
