//! Logic core of a browser Minesweeper: board generation, flood-fill
//! reveal, flag toggling, and win/loss tracking. Rendering and event
//! wiring live in the embedding UI, which calls into [`Game`] and
//! re-renders from the state it reads back.

use std::ops::{BitOr, Index};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod types;

/// Edge length of the standard board.
pub const BOARD_SIZE: Coord = 10;

/// Mines hidden in the standard board.
pub const MINE_COUNT: CellCount = 10;

/// Board dimensions and mine count. [`BoardConfig::default`] is the fixed
/// 10x10/10 layout the game ships with; other values exist for tests and
/// embedders, not as a difficulty menu.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: GridPos,
    pub mines: CellCount,
}

impl BoardConfig {
    /// Builds a config without checking that the mines fit the board.
    pub const fn new_unchecked(size: GridPos, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Builds a config, rejecting mine counts the board cannot hold.
    /// Keeping the count strictly below the cell total is what lets the
    /// rejection-sampling generator terminate.
    pub fn new(size: GridPos, mines: CellCount) -> Result<Self> {
        if mines >= area(size.0, size.1) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size.0, self.size.1)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new_unchecked((BOARD_SIZE, BOARD_SIZE), MINE_COUNT)
    }
}

/// Mine placement plus the per-cell neighbor-mine counts, both fixed at
/// construction. Counts are incremented as each mine lands, so every safe
/// cell's count equals the number of mines among its up-to-8 neighbors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Minefield {
    mines: Array2<bool>,
    counts: Array2<u8>,
    mine_count: CellCount,
}

impl Minefield {
    /// Builds a minefield from explicit mine positions. Duplicates collapse
    /// into a single mine; positions off the board are rejected.
    pub fn from_coords(size: GridPos, mine_coords: &[GridPos]) -> Result<Self> {
        let mut mines: Array2<bool> = Array2::default(size.grid_idx());
        let mut counts: Array2<u8> = Array2::default(size.grid_idx());
        let mut mine_count = 0;

        for &pos in mine_coords {
            if pos.0 >= size.0 || pos.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            if mines[pos.grid_idx()] {
                continue;
            }
            mines[pos.grid_idx()] = true;
            mine_count += 1;
            for neighbor in neighbors(pos, size) {
                counts[neighbor.grid_idx()] += 1;
            }
        }

        Ok(Self {
            mines,
            counts,
            mine_count,
        })
    }

    pub fn config(&self) -> BoardConfig {
        BoardConfig {
            size: self.size(),
            mines: self.mine_count,
        }
    }

    pub fn size(&self) -> GridPos {
        let (rows, cols) = self.mines.dim();
        (rows.try_into().unwrap(), cols.try_into().unwrap())
    }

    pub fn in_bounds(&self, pos: GridPos) -> bool {
        let (rows, cols) = self.size();
        pos.0 < rows && pos.1 < cols
    }

    pub fn total_cells(&self) -> CellCount {
        self.mines.len().try_into().unwrap()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Cells that must be revealed to win.
    pub fn safe_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    /// Precomputed neighbor-mine count at `pos`.
    pub fn adjacent_mines(&self, pos: GridPos) -> u8 {
        self.counts[pos.grid_idx()]
    }

    pub fn neighbors(&self, pos: GridPos) -> Neighbors {
        neighbors(pos, self.size())
    }
}

impl Index<GridPos> for Minefield {
    type Output = bool;

    fn index(&self, pos: GridPos) -> &bool {
        &self.mines[pos.grid_idx()]
    }
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Toggled,
}

impl FlagOutcome {
    /// Whether the board changed and the presentation should re-render.
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Toggled)
    }
}

/// Outcome of a reveal or chord.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Exploded,
    Won,
}

impl RevealOutcome {
    /// Whether the board changed and the presentation should re-render.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Merges per-cell outcomes when a chord opens several neighbors: an
/// explosion dominates, then a win, then a plain reveal.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> RevealOutcome {
        use RevealOutcome::*;
        match (self, rhs) {
            (Exploded, _) | (_, Exploded) => Exploded,
            (Won, _) | (_, Won) => Won,
            (Revealed, _) | (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}
