use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::BoardGenerator;
use crate::{neighbors, BoardConfig, CellCount, GridIndex, GridPos, Minefield};

/// Uniform mine placement by rejection sampling: draw random positions,
/// discard draws that already hold a mine, stop once the requested count is
/// placed. Deterministic for a given seed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: BoardConfig) -> Minefield {
        let (rows, cols) = config.size;
        let total = config.total_cells();

        // An unvalidated config can request a board without a single free
        // cell; sampling would never finish, so fill the grid outright.
        if config.mines >= total {
            if config.mines > total {
                log::warn!(
                    "requested {} mines but a {}x{} board only fits {}",
                    config.mines,
                    rows,
                    cols,
                    total
                );
            }
            return full_minefield(config.size);
        }

        let mut mines: Array2<bool> = Array2::default(config.size.grid_idx());
        let mut counts: Array2<u8> = Array2::default(config.size.grid_idx());
        let mut placed: CellCount = 0;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        while placed < config.mines {
            let pos: GridPos = (rng.gen_range(0..rows), rng.gen_range(0..cols));
            if mines[pos.grid_idx()] {
                continue;
            }
            mines[pos.grid_idx()] = true;
            placed += 1;
            for neighbor in neighbors(pos, config.size) {
                counts[neighbor.grid_idx()] += 1;
            }
        }
        log::debug!("placed {} mines on a {}x{} board", placed, rows, cols);

        Minefield {
            mines,
            counts,
            mine_count: placed,
        }
    }
}

/// Every cell mined; the counts still describe each cell's neighborhood.
fn full_minefield(size: GridPos) -> Minefield {
    let mut counts: Array2<u8> = Array2::default(size.grid_idx());
    for row in 0..size.0 {
        for col in 0..size.1 {
            counts[(row, col).grid_idx()] = neighbors((row, col), size).count() as u8;
        }
    }
    Minefield {
        mines: Array2::from_elem(size.grid_idx(), true),
        counts,
        mine_count: crate::area(size.0, size.1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BOARD_SIZE;

    fn generate(seed: u64, config: BoardConfig) -> Minefield {
        RandomBoardGenerator::new(seed).generate(config)
    }

    #[test]
    fn places_exactly_the_requested_number_of_mines() {
        for seed in 0..20 {
            let field = generate(seed, BoardConfig::default());
            assert_eq!(field.mine_count(), 10);

            let mut from_mask = 0;
            for row in 0..BOARD_SIZE {
                for col in 0..BOARD_SIZE {
                    if field[(row, col)] {
                        from_mask += 1;
                    }
                }
            }
            assert_eq!(from_mask, 10, "mask and count disagree for seed {}", seed);
        }
    }

    #[test]
    fn precomputed_counts_match_a_recount_of_the_mask() {
        for seed in [7, 42, 1234] {
            let field = generate(seed, BoardConfig::default());
            for row in 0..BOARD_SIZE {
                for col in 0..BOARD_SIZE {
                    let recount = field
                        .neighbors((row, col))
                        .filter(|&pos| field[pos])
                        .count() as u8;
                    assert_eq!(
                        field.adjacent_mines((row, col)),
                        recount,
                        "count mismatch at ({}, {}) for seed {}",
                        row,
                        col,
                        seed
                    );
                }
            }
        }
    }

    #[test]
    fn equal_seeds_generate_equal_boards() {
        let first = generate(99, BoardConfig::default());
        let second = generate(99, BoardConfig::default());
        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_generate_different_boards() {
        let first = generate(1, BoardConfig::default());
        let second = generate(2, BoardConfig::default());
        assert_ne!(first, second);
    }

    #[test]
    fn full_board_request_short_circuits() {
        let field = generate(0, BoardConfig::new_unchecked((3, 3), 9));
        assert_eq!(field.mine_count(), 9);
        assert_eq!(field.safe_count(), 0);
        assert_eq!(field.adjacent_mines((1, 1)), 8);
        assert_eq!(field.adjacent_mines((0, 0)), 3);
    }

    #[test]
    fn overfull_request_is_clamped_to_the_board() {
        let field = generate(0, BoardConfig::new_unchecked((2, 2), 40));
        assert_eq!(field.mine_count(), 4);
        assert!(field[(0, 0)] && field[(0, 1)] && field[(1, 0)] && field[(1, 1)]);
    }

    #[test]
    fn tight_board_still_terminates() {
        // One free cell left: rejection sampling at its worst case.
        let field = generate(5, BoardConfig::new((4, 4), 15).unwrap());
        assert_eq!(field.mine_count(), 15);
        assert_eq!(field.safe_count(), 1);
    }
}
