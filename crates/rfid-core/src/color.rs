//! Identifier to color resolution.

use serde::Serialize;

/// Tag color decoded from an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Color {
    White,
    Green,
    Yellow,
    Red,
    Blue,
    Purple,
    Black,
    Invalid,
}

impl Color {
    pub fn label(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Purple => "Purple",
            Color::Black => "Black",
            Color::Invalid => "Invalid",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which identifier table to resolve against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorTableKind {
    /// 3087 resolves to Purple.
    #[default]
    Corrected,
    /// 3087 resolves to Black, as the legacy decoder reported it.
    Fallthrough,
}

const CORRECTED: &[(i64, Color)] = &[
    (3072, Color::White),
    (3076, Color::Green),
    (3083, Color::Yellow),
    (3085, Color::Red),
    (3086, Color::Blue),
    (3087, Color::Purple),
    (3123, Color::Black),
];

const FALLTHROUGH: &[(i64, Color)] = &[
    (3072, Color::White),
    (3076, Color::Green),
    (3083, Color::Yellow),
    (3085, Color::Red),
    (3086, Color::Blue),
    (3087, Color::Black),
    (3123, Color::Black),
];

/// Immutable exact-match table from identifier to color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTable {
    entries: &'static [(i64, Color)],
}

impl ColorTable {
    pub const fn new(kind: ColorTableKind) -> Self {
        let entries = match kind {
            ColorTableKind::Corrected => CORRECTED,
            ColorTableKind::Fallthrough => FALLTHROUGH,
        };
        Self { entries }
    }

    /// Anything not in the table, including an undefined identifier, is
    /// [`Color::Invalid`].
    pub fn resolve(&self, identifier: Option<i64>) -> Color {
        let Some(identifier) = identifier else {
            return Color::Invalid;
        };
        self.entries
            .iter()
            .find(|(id, _)| *id == identifier)
            .map(|(_, color)| *color)
            .unwrap_or(Color::Invalid)
    }

    pub fn entries(&self) -> &'static [(i64, Color)] {
        self.entries
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::new(ColorTableKind::default())
    }
}
