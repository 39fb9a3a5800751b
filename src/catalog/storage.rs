//! Catalog loading, import and lookup

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

use super::models::{Word, WordDetails};

const STARTER_WORDS: &str = include_str!("starter_words.txt");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Derive a word id from its text: lowercase, inner whitespace as `-`
pub fn word_id_for(text: &str) -> String {
    text.split_whitespace()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Ordered word list with id lookup
#[derive(Debug, Clone, Default)]
pub struct WordCatalog {
    words: Vec<Word>,
    index: HashMap<String, usize>,
}

impl WordCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, keeping the first word seen for each id
    pub fn from_words(words: Vec<Word>) -> Self {
        let mut catalog = Self::new();
        for word in words {
            let id = word.id.clone();
            if !catalog.insert(word) {
                log::warn!("Skipping duplicate catalog word '{}'", id);
            }
        }
        catalog
    }

    /// The bundled starter vocabulary
    pub fn starter() -> Self {
        let mut catalog = Self::new();
        catalog.import_lines(STARTER_WORDS);
        catalog
    }

    /// Load a catalog from a JSON array of words. A missing file loads as empty.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)?;
        let words: Vec<Word> = serde_json::from_str(&content)?;
        let catalog = Self::from_words(words);
        log::info!("Loaded {} catalog words from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(&self.words)?)?;
        Ok(())
    }

    /// Add a word. Returns false if its id is already present.
    pub fn insert(&mut self, word: Word) -> bool {
        if word.id.is_empty() || self.index.contains_key(&word.id) {
            return false;
        }
        self.index.insert(word.id.clone(), self.words.len());
        self.words.push(word);
        true
    }

    /// Add one word per non-empty line; `#` starts a comment line.
    /// Returns the number of words added.
    pub fn import_lines(&mut self, text: &str) -> usize {
        let mut added = 0;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let word = Word::new(word_id_for(line), line.to_string());
            if self.insert(word) {
                added += 1;
            }
        }
        added
    }

    pub fn get(&self, id: &str) -> Option<&Word> {
        self.index.get(id).map(|&i| &self.words[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Find a word by its text (case-insensitive)
    pub fn find_by_text(&self, text: &str) -> Option<&Word> {
        let needle = text.trim().to_lowercase();
        self.words.iter().find(|w| w.text.to_lowercase() == needle)
    }

    /// Look up by id first, then by text
    pub fn resolve(&self, query: &str) -> Option<&Word> {
        self.get(query)
            .or_else(|| self.get(&word_id_for(query)))
            .or_else(|| self.find_by_text(query))
    }

    /// Cache provider details on a word. Returns false for unknown ids.
    pub fn set_details(&mut self, id: &str, details: &WordDetails) -> bool {
        let Some(&i) = self.index.get(id) else {
            return false;
        };
        let word = &mut self.words[i];
        word.definition = Some(details.definition.clone());
        word.example_sentence = Some(details.example_sentence.clone());
        word.synonyms = details.synonyms.clone();
        word.antonyms = details.antonyms.clone();
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|w| w.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
