//! Level editing session
//!
//! Owns the grid being edited and talks to a [`LevelStore`]. Every action
//! returns a plain `bool` and, where a user would expect feedback, queues a
//! transient [`Notification`].

use super::grid::{BrickGrid, BrickKind};
use super::palette::BrickPalette;
use crate::consts::{GRID_CELL_SIZE, GRID_MAX_DIM, GRID_MIN_DIM, NOTIFICATION_EXPIRE_SECS};
use crate::error::ValidationError;
use crate::persistence::{Confirm, LevelStore};
use crate::settings::EditorTuning;

/// Outcome flag shown on a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Fail,
}

/// Short-lived message for the user
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    /// Seconds before it fades
    pub expire_secs: f32,
}

/// An editing session over one grid
#[derive(Debug)]
pub struct EditorSession<S: LevelStore> {
    grid: BrickGrid,
    palette: BrickPalette,
    current_kind: BrickKind,
    store: S,
    current_level: Option<String>,
    notifications: Vec<Notification>,
}

impl<S: LevelStore> EditorSession<S> {
    pub fn new(store: S, tuning: &EditorTuning) -> Self {
        let rows = tuning.rows.clamp(GRID_MIN_DIM, GRID_MAX_DIM);
        let cols = tuning.cols.clamp(GRID_MIN_DIM, GRID_MAX_DIM);
        let mut cell_size = tuning.cell_size;
        if !(cell_size.is_finite() && cell_size > 0.0) {
            log::warn!(
                "Cell size {} is not usable, using default {}",
                cell_size,
                GRID_CELL_SIZE
            );
            cell_size = GRID_CELL_SIZE;
        }
        Self {
            grid: BrickGrid::new(rows, cols, cell_size),
            palette: BrickPalette::default(),
            current_kind: BrickKind::Normal,
            store,
            current_level: None,
            notifications: Vec::new(),
        }
    }

    pub fn grid(&self) -> &BrickGrid {
        &self.grid
    }

    pub fn palette(&self) -> &BrickPalette {
        &self.palette
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Name of the last level saved or loaded
    pub fn current_level(&self) -> Option<&str> {
        self.current_level.as_deref()
    }

    pub fn current_kind(&self) -> BrickKind {
        self.current_kind
    }

    /// Kind placed by subsequent clicks
    pub fn set_brick_kind(&mut self, kind: BrickKind) {
        self.current_kind = kind;
    }

    /// A click on a cell: removes an occupied cell, otherwise places the
    /// current kind. Returns whether the grid changed.
    pub fn click_cell(&mut self, row: usize, col: usize) -> bool {
        match self.grid.kind_at(row, col) {
            Some(kind) if !kind.is_empty() => self.grid.remove_cell(row, col),
            Some(_) => self.grid.add_cell(row, col, self.current_kind),
            None => false,
        }
    }

    pub fn set_rows(&mut self, rows: usize) {
        self.resize(rows, self.grid.cols());
    }

    pub fn set_cols(&mut self, cols: usize) {
        self.resize(self.grid.rows(), cols);
    }

    /// Change grid size; each axis is kept within 1..=100
    pub fn resize(&mut self, rows: usize, cols: usize) {
        let clamped = (
            rows.clamp(GRID_MIN_DIM, GRID_MAX_DIM),
            cols.clamp(GRID_MIN_DIM, GRID_MAX_DIM),
        );
        if clamped != (rows, cols) {
            log::warn!(
                "Grid size {}x{} clamped to {}x{}",
                rows,
                cols,
                clamped.0,
                clamped.1
            );
        }
        self.grid.resize(clamped.0, clamped.1);
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        log::info!("Grid cleared.");
    }

    /// Save the grid under `name`. An existing level is only replaced if
    /// `confirm` agrees.
    pub fn save_level_as(&mut self, name: &str, confirm: &mut dyn Confirm) -> bool {
        if let Err(e) = self.check_name(name, confirm) {
            log::warn!("{}", e);
            self.notify(e.to_string(), Severity::Fail);
            return false;
        }

        match self.store.save(name, &self.grid.to_record()) {
            Ok(()) => {
                log::info!("Level saved successfully as {}!", name);
                self.current_level = Some(name.to_string());
                self.notify(format!("Level saved successfully: {}", name), Severity::Success);
                true
            }
            Err(e) => {
                log::error!("Level '{}' wasn't saved: {}", name, e);
                self.notify(format!("Level '{}' wasn't saved!", name), Severity::Fail);
                false
            }
        }
    }

    fn check_name(&self, name: &str, confirm: &mut dyn Confirm) -> Result<(), ValidationError> {
        validate_level_name(name)?;
        if self.store.exists(name) {
            let prompt = format!("Asset '{}' already exists. Do you want to overwrite it?", name);
            if !confirm.confirm(&prompt) {
                return Err(ValidationError::DuplicateName(name.to_string()));
            }
        }
        Ok(())
    }

    /// Replace the grid with the level saved under `name`
    pub fn load_level(&mut self, name: &str) -> bool {
        let Some(record) = self.store.load(name) else {
            log::warn!("Selected level '{}' is not a valid level record.", name);
            self.notify("Failed to load the level.".to_string(), Severity::Fail);
            return false;
        };

        match BrickGrid::from_record(&record) {
            Ok(loaded) => {
                self.grid = loaded.grid;
                self.current_level = Some(name.to_string());
                let message = if loaded.warnings.is_empty() {
                    format!("Level loaded successfully: {}", name)
                } else {
                    format!(
                        "Level loaded successfully: {} ({} corrupt entries skipped)",
                        name,
                        loaded.warnings.len()
                    )
                };
                self.notify(message, Severity::Success);
                true
            }
            Err(e) => {
                log::warn!("Level '{}' cannot be loaded: {}", name, e);
                self.notify("Failed to load the level.".to_string(), Severity::Fail);
                false
            }
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Take queued notifications
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn notify(&mut self, message: String, severity: Severity) {
        self.notifications.push(Notification {
            message,
            severity,
            expire_secs: NOTIFICATION_EXPIRE_SECS,
        });
    }
}

/// Names become file names, so no separators or relative components
pub fn validate_level_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let bad_char = |c: char| matches!(c, '/' | '\\' | ':') || c.is_control();
    if name.trim().is_empty() || name.starts_with('.') || name.chars().any(bad_char) {
        return Err(ValidationError::InvalidName(name.to_string()));
    }
    Ok(())
}
