//! Brick colors for the editor grid

use serde::{Deserialize, Serialize};

use super::grid::BrickKind;

/// Linear RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LinearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LinearColor {
    pub const GRAY: Self = Self::rgb(0.5, 0.5, 0.5);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const YELLOW: Self = Self::rgb(1.0, 1.0, 0.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// `#RRGGBB`, channels clamped to [0, 1]
    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", byte(self.r), byte(self.g), byte(self.b))
    }
}

/// Kind → color lookup.
///
/// Never empty. Kinds without an entry get the first entry's color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PaletteEntries")]
pub struct BrickPalette {
    entries: Vec<(BrickKind, LinearColor)>,
}

/// Wire shape of a palette before the non-empty check
#[derive(Deserialize)]
struct PaletteEntries {
    entries: Vec<(BrickKind, LinearColor)>,
}

impl TryFrom<PaletteEntries> for BrickPalette {
    type Error = &'static str;

    fn try_from(raw: PaletteEntries) -> Result<Self, Self::Error> {
        Self::from_entries(raw.entries).ok_or("brick palette needs at least one entry")
    }
}

impl Default for BrickPalette {
    fn default() -> Self {
        Self {
            entries: vec![
                (BrickKind::Empty, LinearColor::GRAY),
                (BrickKind::Normal, LinearColor::GREEN),
                (BrickKind::Chained, LinearColor::YELLOW),
                (BrickKind::Fire, LinearColor::RED),
                (BrickKind::MultipleBall, LinearColor::BLUE),
                (BrickKind::SizeIncrease, LinearColor::WHITE),
                (BrickKind::SizeDecrease, LinearColor::WHITE),
            ],
        }
    }
}

impl BrickPalette {
    /// Palette from explicit entries; `None` if there are none
    pub fn from_entries(entries: Vec<(BrickKind, LinearColor)>) -> Option<Self> {
        (!entries.is_empty()).then_some(Self { entries })
    }

    /// Set a kind's color, appending if it has none yet
    pub fn register(&mut self, kind: BrickKind, color: LinearColor) {
        match self.entries.iter_mut().find(|(k, _)| *k == kind) {
            Some(entry) => entry.1 = color,
            None => self.entries.push((kind, color)),
        }
    }

    pub fn color_for(&self, kind: BrickKind) -> LinearColor {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .or_else(|| self.entries.first())
            .map(|(_, color)| *color)
            .unwrap_or_default()
    }

    pub fn entries(&self) -> &[(BrickKind, LinearColor)] {
        &self.entries
    }
}
