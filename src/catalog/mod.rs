//! Word catalog
//!
//! The list of words a learner can study. Scheduling only ever keys on the
//! word id; the text and cached details are for display and for judging
//! free-text explanations.

mod models;
mod storage;

pub use models::*;
pub use storage::{word_id_for, CatalogError, WordCatalog};
