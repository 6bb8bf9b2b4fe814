//! Level record: the persisted snapshot of a brick grid
//!
//! JSON shape:
//! `{"version": 1, "gridRows": 10, "gridCols": 10, "cellSize": 100.0,
//!   "cells": [{"row": 200.0, "col": 300.0, "state": "FIRE"}, ...]}`

use serde::{Deserialize, Serialize};

use super::grid::BrickCell;

/// Current record format version
pub const LEVEL_RECORD_VERSION: u32 = 1;

fn default_version() -> u32 {
    LEVEL_RECORD_VERSION
}

/// Immutable snapshot exchanged with a level store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelRecord {
    #[serde(default = "default_version")]
    pub version: u32,
    pub grid_rows: u32,
    pub grid_cols: u32,
    pub cell_size: f32,
    /// Row/col are world-space positions (`coordinate * cell_size`)
    pub cells: Vec<BrickCell>,
}

impl LevelRecord {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
