use std::collections::{HashSet, VecDeque};
use std::ops::BitOr;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Game lifecycle. Transitions run forward only: `Playing` moves to `Won`
/// or `Lost` at most once, and both end states hold until a reset.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    /// Terminal states refuse every further move.
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Playing
    }
}

/// The engine: owns the board, applies every state transition, and hands
/// out snapshots for the presentation layer to render.
///
/// All operations run to completion synchronously; callers observe either
/// the state before a call or the state after it, never anything partial.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    minefield: Minefield,
    grid: Array2<Cell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    status: GameStatus,
}

impl Game {
    /// Fresh game over an explicit minefield; every cell starts hidden.
    pub fn new(minefield: Minefield) -> Game {
        let size = minefield.size();
        Self {
            minefield,
            grid: Array2::default(size.grid_idx()),
            revealed_count: 0,
            flagged_count: 0,
            status: GameStatus::default(),
        }
    }

    /// Starts a game on a freshly generated random board.
    pub fn start(config: BoardConfig) -> Game {
        Self::new(RandomBoardGenerator::new(rand::random()).generate(config))
    }

    /// Throws the current board away and starts over on a new random board
    /// with the same dimensions and mine count. Available in any status.
    pub fn reset(&mut self) {
        log::debug!("resetting game");
        *self = Game::start(self.config());
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Board dimensions as `(rows, cols)`.
    pub fn size(&self) -> GridPos {
        self.minefield.size()
    }

    pub fn config(&self) -> BoardConfig {
        self.minefield.config()
    }

    pub fn total_mines(&self) -> CellCount {
        self.minefield.mine_count()
    }

    /// Mines minus placed flags, for the counter display. Goes negative
    /// when the player flags more cells than there are mines.
    pub fn mines_left(&self) -> isize {
        self.minefield.mine_count() as isize - self.flagged_count as isize
    }

    pub fn cell_at(&self, pos: GridPos) -> Cell {
        self.grid[pos.grid_idx()]
    }

    /// Reveals the cell at `pos` (primary activation).
    ///
    /// No-ops off the board, after the game has ended, and on flagged or
    /// already revealed cells. Hitting a mine uncovers every mine on the
    /// board and loses the game; a safe cell is opened with a flood-fill
    /// and may complete the win.
    pub fn reveal(&mut self, pos: GridPos) -> RevealOutcome {
        if !self.minefield.in_bounds(pos) {
            log::debug!("reveal at {:?} ignored, off the board", pos);
            return RevealOutcome::NoChange;
        }
        if self.status.is_over() {
            return RevealOutcome::NoChange;
        }
        match self.grid[pos.grid_idx()] {
            Cell::Hidden => self.reveal_cell(pos),
            _ => RevealOutcome::NoChange,
        }
    }

    /// Flags or unflags an unrevealed cell (secondary activation). Revealed
    /// cells cannot be flagged, and no flag budget is enforced.
    pub fn toggle_flag(&mut self, pos: GridPos) -> FlagOutcome {
        if !self.minefield.in_bounds(pos) {
            log::debug!("flag at {:?} ignored, off the board", pos);
            return FlagOutcome::NoChange;
        }
        if self.status.is_over() {
            return FlagOutcome::NoChange;
        }
        match self.grid[pos.grid_idx()] {
            Cell::Hidden => {
                self.grid[pos.grid_idx()] = Cell::Flagged;
                self.flagged_count += 1;
                FlagOutcome::Toggled
            }
            Cell::Flagged => {
                self.grid[pos.grid_idx()] = Cell::Hidden;
                self.flagged_count -= 1;
                FlagOutcome::Toggled
            }
            Cell::Revealed(_) | Cell::Mine => FlagOutcome::NoChange,
        }
    }

    /// Opens the hidden neighbors of a revealed numbered cell once exactly
    /// that many of them carry flags (chording). Flags may be wrong: a
    /// covered mine still explodes.
    pub fn chord(&mut self, pos: GridPos) -> RevealOutcome {
        if !self.is_chordable(pos) {
            return RevealOutcome::NoChange;
        }
        self.minefield
            .neighbors(pos)
            .map(|neighbor| self.reveal_cell(neighbor))
            .reduce(BitOr::bitor)
            .unwrap_or(RevealOutcome::NoChange)
    }

    /// Whether `pos` accepts a chord: a revealed cell whose flagged-neighbor
    /// count matches its number. The UI uses this for the pressed-neighbors
    /// affordance.
    pub fn is_chordable(&self, pos: GridPos) -> bool {
        if !self.minefield.in_bounds(pos) || self.status.is_over() {
            return false;
        }
        match self.grid[pos.grid_idx()] {
            Cell::Revealed(count) => count == self.flagged_neighbors(pos),
            _ => false,
        }
    }

    fn flagged_neighbors(&self, pos: GridPos) -> u8 {
        self.minefield
            .neighbors(pos)
            .filter(|&neighbor| self.grid[neighbor.grid_idx()] == Cell::Flagged)
            .count() as u8
    }

    /// Opens a single hidden cell: mines end the game, zero-count cells
    /// flood outward. Also the per-neighbor step of a chord, which is why
    /// it re-checks the status: an earlier neighbor may already have
    /// finished the game, and end states are never overturned.
    fn reveal_cell(&mut self, pos: GridPos) -> RevealOutcome {
        if self.status.is_over() {
            return RevealOutcome::NoChange;
        }
        match (self.grid[pos.grid_idx()], self.minefield[pos]) {
            (Cell::Hidden, true) => {
                log::debug!("mine hit at {:?}", pos);
                self.lose();
                RevealOutcome::Exploded
            }
            (Cell::Hidden, false) => {
                let count = self.minefield.adjacent_mines(pos);
                self.grid[pos.grid_idx()] = Cell::Revealed(count);
                self.revealed_count += 1;
                log::debug!("opened {:?}, {} adjacent mines", pos, count);

                if count == 0 {
                    self.flood_from(pos);
                }

                if self.revealed_count == self.minefield.safe_count() {
                    self.status = GameStatus::Won;
                    log::debug!("all safe cells revealed, game won");
                    RevealOutcome::Won
                } else {
                    RevealOutcome::Revealed
                }
            }
            _ => RevealOutcome::NoChange,
        }
    }

    /// Breadth-first reveal across the zero-count region around `start`,
    /// taking in the numbered cells on its rim. Flags and board edges stop
    /// the fill; the explicit queue keeps traversal off the call stack.
    fn flood_from(&mut self, start: GridPos) {
        let mut seen = HashSet::from([start]);
        let mut queue: VecDeque<GridPos> = self
            .minefield
            .neighbors(start)
            .filter(|&pos| self.grid[pos.grid_idx()] == Cell::Hidden)
            .collect();

        while let Some(pos) = queue.pop_front() {
            if !seen.insert(pos) {
                continue;
            }
            // Flagged cells stay covered, revealed ones are already done.
            if self.grid[pos.grid_idx()] != Cell::Hidden {
                continue;
            }

            let count = self.minefield.adjacent_mines(pos);
            self.grid[pos.grid_idx()] = Cell::Revealed(count);
            self.revealed_count += 1;
            log::trace!("flood opened {:?}, {} adjacent mines", pos, count);

            if count == 0 {
                let frontier = self
                    .minefield
                    .neighbors(pos)
                    .filter(|&next| self.grid[next.grid_idx()] == Cell::Hidden)
                    .filter(|next| !seen.contains(next));
                queue.extend(frontier);
            }
        }
    }

    /// Loss sweep: every mine turns face up, flags on mines included, so
    /// the player sees the full layout. Safe cells keep whatever state
    /// they had.
    fn lose(&mut self) {
        let (rows, cols) = self.minefield.size();
        for row in 0..rows {
            for col in 0..cols {
                let pos = (row, col);
                if !self.minefield[pos] {
                    continue;
                }
                if self.grid[pos.grid_idx()] == Cell::Flagged {
                    self.flagged_count -= 1;
                }
                self.grid[pos.grid_idx()] = Cell::Mine;
            }
        }
        self.status = GameStatus::Lost;
    }
}
