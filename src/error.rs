//! Error taxonomy
//!
//! Nothing here crosses the sim/editor core as a panic. Each error is handled
//! where it happens and callers see a `bool`/`Option` plus a log line or a
//! user-facing notification.

use thiserror::Error;

/// A collaborator the game session needs was never provided
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigurationError {
    #[error("Camera is missing. Ensure a camera is spawned before the round starts.")]
    MissingCamera,
    #[error("Paddle is missing. Ensure the player controller possesses a paddle.")]
    MissingPaddle,
    #[error("Ball is missing. Ensure a ball is spawned before the round starts.")]
    MissingBall,
    #[error("Camera ortho width {0} leaves no room for the paddle to move")]
    NoPaddleTravel(f32),
}

/// A level name rejected on save
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Asset name cannot be empty.")]
    EmptyName,
    #[error("Asset name '{0}' contains characters that are not allowed.")]
    InvalidName(String),
    #[error("Asset '{0}' already exists and will not be overwritten.")]
    DuplicateName(String),
}

/// A record entry that does not fit the grid it describes; the entry is skipped
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("record entry #{entry} at ({row}, {col}) maps outside a {rows}x{cols} grid")]
pub struct CorruptRecordWarning {
    /// Position of the entry in the record's cell list
    pub entry: usize,
    /// Stored world-space row
    pub row: f32,
    /// Stored world-space column
    pub col: f32,
    pub rows: usize,
    pub cols: usize,
}

/// Arithmetic the bounce model refuses to perform
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DomainError {
    #[error("paddle influence needs a moving ball (ball velocity is {0})")]
    ZeroBallVelocity(f32),
}

/// A record whose header makes it impossible to rebuild a grid
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RecordError {
    #[error("cell size {0} must be positive and finite")]
    InvalidCellSize(f32),
    #[error("grid size {rows}x{cols} is outside the supported range")]
    InvalidDimensions { rows: u32, cols: u32 },
    #[error("record version {0} is not supported")]
    UnsupportedVersion(u32),
}

/// Failure inside a level store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("level store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("level record JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
