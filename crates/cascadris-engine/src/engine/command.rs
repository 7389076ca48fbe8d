use serde::{Deserialize, Serialize};

/// A discrete player command.
///
/// Input sources deliver commands as single symbols; see
/// [`from_symbol`](Self::from_symbol).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    MoveLeft,
    MoveRight,
    /// One gravity step: moves down, or settles the piece if it cannot.
    SoftDrop,
    /// Rotate 90° clockwise.
    Rotate,
}

impl Command {
    pub const ALL: [Command; 4] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::Rotate,
    ];

    /// Parses an input symbol: `a` left, `d` right, `s` soft drop, `w` rotate.
    ///
    /// Any other symbol is not a command.
    ///
    /// ```
    /// use cascadris_engine::Command;
    ///
    /// assert_eq!(Command::from_symbol('w'), Some(Command::Rotate));
    /// assert_eq!(Command::from_symbol('x'), None);
    /// ```
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'a' => Some(Command::MoveLeft),
            'd' => Some(Command::MoveRight),
            's' => Some(Command::SoftDrop),
            'w' => Some(Command::Rotate),
            _ => None,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Command::MoveLeft => 'a',
            Command::MoveRight => 'd',
            Command::SoftDrop => 's',
            Command::Rotate => 'w',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_conversion() {
        for command in Command::ALL {
            assert_eq!(Command::from_symbol(command.symbol()), Some(command));
        }
    }

    #[test]
    fn test_unknown_symbols() {
        for symbol in ['A', 'q', ' ', '\n', '\u{1b}'] {
            assert_eq!(Command::from_symbol(symbol), None);
        }
    }
}
