use serde::{Deserialize, Serialize};

use crate::card::COLUMN_COUNT;

/// Zero-based index of a player within the game.
pub type PlayerId = usize;

/// Command a player can issue during their turn.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Take the top card of the draw pile into hand.
    Draw,
    /// Put the card in hand at the bottom of one of the player's own columns.
    Place { column: usize },
    /// Return the card in hand (if any) to the draw pile and shuffle it.
    Shuffle,
}

impl Command {
    /// Returns the column index if the command is a placement.
    pub fn column(&self) -> Option<usize> {
        match self {
            Command::Place { column } => Some(*column),
            _ => None,
        }
    }

    /// Validates whether the column index lies within range.
    pub fn column_in_range(&self) -> bool {
        self.column().map(|idx| idx < COLUMN_COUNT).unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_range_only_applies_to_placements() {
        assert!(Command::Draw.column_in_range());
        assert!(Command::Shuffle.column_in_range());
        assert!(Command::Place { column: 2 }.column_in_range());
        assert!(!Command::Place { column: 3 }.column_in_range());
    }
}
