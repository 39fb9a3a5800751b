use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use lexiloop_lib::catalog::{Word, WordCatalog};
use lexiloop_lib::config::AppConfig;
use lexiloop_lib::progress::ProgressStore;
use lexiloop_lib::session::ReviewService;

/// Shared application state for CLI commands
pub struct App {
    pub config: AppConfig,
    pub service: ReviewService,
    catalog_path: PathBuf,
}

impl App {
    /// Load config, catalog and progress
    pub fn new(config_path: Option<&Path>, data_dir: Option<&Path>) -> Result<Self> {
        let mut config = AppConfig::load(config_path, data_dir)
            .context("Failed to load configuration")?;
        if let Some(dir) = data_dir {
            config.data_dir = Some(dir.to_path_buf());
        }

        let progress_path = config.progress_path()
            .context("Failed to get data directory")?;
        let catalog_path = config.catalog_path()
            .context("Failed to get data directory")?;

        let mut catalog = WordCatalog::load(&catalog_path)
            .with_context(|| format!("Failed to read word list {:?}", catalog_path))?;
        if catalog.is_empty() {
            log::info!("No word list found, using the starter vocabulary");
            catalog = WordCatalog::starter();
        }

        let store = ProgressStore::open(progress_path, &config.scheduling.intervals)
            .context("Failed to load progress")?;

        let service = ReviewService::new(config.scheduling.intervals.clone(), catalog, store);

        Ok(Self {
            config,
            service,
            catalog_path,
        })
    }

    /// Resolve a word by id or text. Unknown words are passed through by id
    /// so progress can still be recorded for them.
    pub fn resolve_word(&self, query: &str) -> Word {
        match self.service.catalog().resolve(query) {
            Some(word) => word.clone(),
            None => {
                let id = lexiloop_lib::catalog::word_id_for(query);
                Word::new(id, query.trim().to_string())
            }
        }
    }

    /// Write progress and the word list back to disk
    pub fn save(&self) -> Result<()> {
        self.service.persist().context("Failed to save progress")?;
        self.service
            .catalog()
            .save(&self.catalog_path)
            .context("Failed to save word list")?;
        Ok(())
    }
}
