//! Game settings and tuning
//!
//! Every gameplay number lives here so a round can be re-tuned from a JSON file
//! without a rebuild. Defaults come from [`crate::consts`].

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::StoreError;

/// Ball launch and spawn tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallTuning {
    /// Speed given to the ball on launch
    pub launch_speed: f32,
    /// Where a reset ball waits for launch
    pub spawn_position: Vec2,
    /// Uniform scale applied on reset
    pub spawn_scale: f32,
    /// Radius at scale 1.0
    pub base_radius: f32,
    /// Clamp for the paddle velocity / ball velocity skew
    pub influence_limit: f32,
}

impl Default for BallTuning {
    fn default() -> Self {
        Self {
            launch_speed: BALL_LAUNCH_SPEED,
            spawn_position: Vec2::new(BALL_SPAWN_X, BALL_SPAWN_Y),
            spawn_scale: BALL_SPAWN_SCALE,
            base_radius: BALL_BASE_RADIUS,
            influence_limit: PADDLE_INFLUENCE_LIMIT,
        }
    }
}

/// Paddle movement tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddleTuning {
    pub movement_speed: f32,
    pub interp_rate: f32,
    pub start_y: f32,
    pub half_width: f32,
    pub half_height: f32,
    /// Subtracted from half the camera width to get the travel limit
    pub boundary_margin: f32,
}

impl Default for PaddleTuning {
    fn default() -> Self {
        Self {
            movement_speed: PADDLE_MOVEMENT_SPEED,
            interp_rate: PADDLE_INTERP_RATE,
            start_y: PADDLE_Y,
            half_width: PADDLE_HALF_WIDTH,
            half_height: PADDLE_HALF_HEIGHT,
            boundary_margin: PADDLE_BOUNDARY_MARGIN,
        }
    }
}

/// Camera and play-field extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaTuning {
    pub ortho_width: f32,
    pub top: f32,
    pub hazard_y: f32,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            ortho_width: CAMERA_ORTHO_WIDTH,
            top: ARENA_TOP,
            hazard_y: ARENA_HAZARD_Y,
        }
    }
}

/// Level editor defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorTuning {
    pub rows: usize,
    pub cols: usize,
    pub cell_size: f32,
    /// Directory holding saved level records
    pub levels_dir: PathBuf,
}

impl Default for EditorTuning {
    fn default() -> Self {
        Self {
            rows: GRID_DEFAULT_ROWS,
            cols: GRID_DEFAULT_COLS,
            cell_size: GRID_CELL_SIZE,
            levels_dir: PathBuf::from("levels"),
        }
    }
}

/// All tunables for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for the launch RNG
    pub seed: u64,
    pub ball: BallTuning,
    pub paddle: PaddleTuning,
    pub arena: ArenaTuning,
    pub editor: EditorTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x00B1_0C4B,
            ball: BallTuning::default(),
            paddle: PaddleTuning::default(),
            arena: ArenaTuning::default(),
            editor: EditorTuning::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring malformed settings {}: {}", path.display(), e),
            },
            Err(e) => log::debug!("No settings at {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
