use serde::{Deserialize, Serialize};

/// Color tag carried by a piece and by every settled cell.
///
/// The palette is fixed. There is deliberately no "none" member: an uncolored
/// cell is always [`Cell::Empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    Red = 0,
    Green = 1,
    Yellow = 2,
    Blue = 3,
    Magenta = 4,
    Cyan = 5,
}

impl Color {
    /// Number of palette colors.
    pub const LEN: usize = 6;

    /// All palette colors, in index order.
    pub const PALETTE: [Color; Self::LEN] = [
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
    ];

    /// Returns the palette entry at `index`, wrapping around the palette length.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::PALETTE[index % Self::LEN]
    }

    /// Returns the single character used by board fixtures.
    ///
    /// ```
    /// use cascadris_engine::Color;
    ///
    /// assert_eq!(Color::Red.as_char(), 'R');
    /// assert_eq!(Color::from_char('C'), Some(Color::Cyan));
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Yellow => 'Y',
            Color::Blue => 'B',
            Color::Magenta => 'M',
            Color::Cyan => 'C',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            'Y' => Some(Color::Yellow),
            'B' => Some(Color::Blue),
            'M' => Some(Color::Magenta),
            'C' => Some(Color::Cyan),
            _ => None,
        }
    }
}

/// A single board cell.
///
/// A filled cell always carries a palette color, so "occupied without color"
/// cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[must_use]
    pub const fn is_filled(self) -> bool {
        !self.is_empty()
    }

    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_char_conversion() {
        for color in Color::PALETTE {
            assert_eq!(Color::from_char(color.as_char()), Some(color));
        }
        assert_eq!(Color::from_char('.'), None);
        assert_eq!(Color::from_char('r'), None);
    }

    #[test]
    fn test_color_from_index_wraps() {
        assert_eq!(Color::from_index(0), Color::Red);
        assert_eq!(Color::from_index(5), Color::Cyan);
        assert_eq!(Color::from_index(6), Color::Red);
    }

    #[test]
    fn test_cell_color_matches_emptiness() {
        assert!(Cell::Empty.is_empty());
        assert_eq!(Cell::Empty.color(), None);
        for color in Color::PALETTE {
            let cell = Cell::Filled(color);
            assert!(cell.is_filled());
            assert_eq!(cell.color(), Some(color));
        }
    }

    #[test]
    fn test_color_serialization() {
        let json = serde_json::to_string(&Color::Magenta).unwrap();
        assert_eq!(json, "\"magenta\"");
        let color: Color = serde_json::from_str("\"blue\"").unwrap();
        assert_eq!(color, Color::Blue);
    }
}
