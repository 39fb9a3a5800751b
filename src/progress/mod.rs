//! Persistent word progress
//!
//! One record per word that has been reviewed at least once, keyed by word id.
//! A word with no record is in the virtual NEW state.

mod storage;

pub use storage::{ProgressStorageError, ProgressStore};
