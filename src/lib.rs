//! Brick Breaker - ball bounce model and brick grid level editor
//!
//! Core modules:
//! - `sim`: Ball/paddle simulation (bounce model, state machine, fixed tick)
//! - `editor`: Brick grid data model and editing session
//! - `persistence`: Level record stores
//! - `settings`: Data-driven configuration

pub mod editor;
pub mod error;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use editor::{BrickGrid, BrickKind, EditorSession, LevelRecord};
pub use error::{
    ConfigurationError, CorruptRecordWarning, DomainError, RecordError, StoreError,
    ValidationError,
};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Ball defaults
    pub const BALL_LAUNCH_SPEED: f32 = 300.0;
    pub const BALL_SPAWN_X: f32 = 0.0;
    pub const BALL_SPAWN_Y: f32 = 370.0;
    pub const BALL_SPAWN_SCALE: f32 = 0.3;
    /// Ball radius at scale 1.0 (engine sphere is 100 units across)
    pub const BALL_BASE_RADIUS: f32 = 50.0;

    /// Largest horizontal skew a moving paddle can add to the ball direction
    pub const PADDLE_INFLUENCE_LIMIT: f32 = 0.75;

    /// Paddle defaults
    pub const PADDLE_MOVEMENT_SPEED: f32 = 600.0;
    /// Exponential interpolation rate toward the input target (1/s)
    pub const PADDLE_INTERP_RATE: f32 = 10.0;
    pub const PADDLE_Y: f32 = -400.0;
    pub const PADDLE_HALF_WIDTH: f32 = 48.0;
    pub const PADDLE_HALF_HEIGHT: f32 = 10.0;
    /// Distance kept between the paddle's travel limit and the screen edge
    pub const PADDLE_BOUNDARY_MARGIN: f32 = 48.0;

    /// Camera / arena defaults
    pub const CAMERA_ORTHO_WIDTH: f32 = 1536.0;
    pub const ARENA_TOP: f32 = 480.0;
    /// Below the paddle: hitting it loses the ball
    pub const ARENA_HAZARD_Y: f32 = -480.0;

    /// Level editor defaults
    pub const GRID_DEFAULT_ROWS: usize = 10;
    pub const GRID_DEFAULT_COLS: usize = 10;
    pub const GRID_MIN_DIM: usize = 1;
    pub const GRID_MAX_DIM: usize = 100;
    pub const GRID_CELL_SIZE: f32 = 100.0;

    /// Seconds a notification stays on screen
    pub const NOTIFICATION_EXPIRE_SECS: f32 = 3.0;
}

/// Exponential approach from `current` toward `target`.
///
/// Moves a `dt * rate` fraction of the remaining distance (clamped to the whole
/// distance). A non-positive rate snaps straight to the target.
#[inline]
pub fn interp_to(current: Vec2, target: Vec2, dt: f32, rate: f32) -> Vec2 {
    if rate <= 0.0 {
        return target;
    }
    let dist = target - current;
    if dist.length_squared() < 1.0e-8 {
        return target;
    }
    current + dist * (dt * rate).clamp(0.0, 1.0)
}
