use serde::{Deserialize, Serialize};

/// Player-visible state of a single board cell; exactly what the
/// presentation layer renders.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// Unrevealed and unflagged, renders blank.
    Hidden,
    /// Unrevealed with a player flag; blocks reveal until removed.
    Flagged,
    /// Revealed safe cell carrying its neighbor-mine count. Zero renders blank.
    Revealed(u8),
    /// Revealed mine. Only appears once the game is lost.
    Mine,
}

impl Cell {
    /// Whether the cell still hides its contents from the player.
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Hidden
    }
}
