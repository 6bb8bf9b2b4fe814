//! Level persistence
//!
//! Features:
//! - Versioned JSON records, one per level name
//! - tmp → rename writes, so a failed save keeps the previous file
//! - Blocking overwrite confirmation through [`Confirm`]

pub mod store;

pub use store::{DirStore, MemoryStore};

use crate::editor::LevelRecord;
use crate::error::StoreError;

/// Named storage for level records
pub trait LevelStore {
    /// The record saved under `name`, if there is a readable one
    fn load(&self, name: &str) -> Option<LevelRecord>;

    /// Store `record` under `name`, replacing any previous one
    fn save(&mut self, name: &str, record: &LevelRecord) -> Result<(), StoreError>;

    fn exists(&self, name: &str) -> bool;

    /// Saved level names, sorted
    fn list(&self) -> Vec<String>;
}

/// Yes/no question put to the user; blocks until answered
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}
