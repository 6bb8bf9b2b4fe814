//! Level editor model
//!
//! The brick grid being laid out, its color palette, the persisted level
//! record and the editing session that ties them to a level store.

pub mod grid;
pub mod palette;
pub mod record;
pub mod session;

pub use grid::{BrickCell, BrickGrid, BrickKind, LoadedGrid};
pub use palette::{BrickPalette, LinearColor};
pub use record::{LEVEL_RECORD_VERSION, LevelRecord};
pub use session::{EditorSession, Notification, Severity, validate_level_name};
