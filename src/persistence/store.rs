//! Level store implementations

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::LevelStore;
use crate::editor::LevelRecord;
use crate::error::StoreError;

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, LevelRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LevelStore for MemoryStore {
    fn load(&self, name: &str) -> Option<LevelRecord> {
        self.records.get(name).cloned()
    }

    fn save(&mut self, name: &str, record: &LevelRecord) -> Result<(), StoreError> {
        self.records.insert(name.to_string(), record.clone());
        Ok(())
    }

    fn exists(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    fn list(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }
}

/// One `<name>.json` file per level inside a directory
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    const EXTENSION: &'static str = "json";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, Self::EXTENSION))
    }
}

impl LevelStore for DirStore {
    fn load(&self, name: &str) -> Option<LevelRecord> {
        let path = self.path_for(name);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Cannot read level {}: {}", path.display(), e);
                return None;
            }
        };
        match LevelRecord::from_json(&json) {
            Ok(record) => {
                log::info!("Loaded level record {} ({} cells)", path.display(), record.cells.len());
                Some(record)
            }
            Err(e) => {
                log::warn!("Level {} is not a valid record: {}", path.display(), e);
                None
            }
        }
    }

    fn save(&mut self, name: &str, record: &LevelRecord) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(name);
        let tmp = path.with_extension("json.tmp");

        let json = record.to_json()?;
        fs::write(&tmp, json)?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        log::info!("Level record written to {}", path.display());
        Ok(())
    }

    fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }

    fn list(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == Self::EXTENSION))
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        names.sort();
        names
    }
}
