/// Single board axis, used for row/column coordinates and board edges.
pub type Coord = u8;

/// Area count, used for cell and mine totals.
pub type CellCount = u16;

/// Board position as `(row, col)`.
pub type GridPos = (Coord, Coord);

/// Conversion into the `[row, col]` index form `ndarray` expects.
pub trait GridIndex {
    fn grid_idx(self) -> [usize; 2];
}

impl GridIndex for GridPos {
    fn grid_idx(self) -> [usize; 2] {
        [self.0.into(), self.1.into()]
    }
}

pub const fn area(rows: Coord, cols: Coord) -> CellCount {
    (rows as CellCount).saturating_mul(cols as CellCount)
}

const NEIGHBOR_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Offsets `pos` by `delta`, keeping the result only while it stays on the board.
fn offset(pos: GridPos, delta: (i8, i8), bounds: GridPos) -> Option<GridPos> {
    let row = pos.0.checked_add_signed(delta.0)?;
    let col = pos.1.checked_add_signed(delta.1)?;
    (row < bounds.0 && col < bounds.1).then_some((row, col))
}

/// Iterator over the up-to-8 in-bounds neighbors of a position, diagonals
/// included. Owns its endpoints, so it never borrows the board it came from.
#[derive(Debug)]
pub struct Neighbors {
    center: GridPos,
    bounds: GridPos,
    next: usize,
}

impl Neighbors {
    pub(crate) fn new(center: GridPos, bounds: GridPos) -> Self {
        Self {
            center,
            bounds,
            next: 0,
        }
    }
}

impl Iterator for Neighbors {
    type Item = GridPos;

    fn next(&mut self) -> Option<GridPos> {
        while let Some(&delta) = NEIGHBOR_OFFSETS.get(self.next) {
            self.next += 1;
            if let Some(pos) = offset(self.center, delta, self.bounds) {
                return Some(pos);
            }
        }
        None
    }
}

/// Neighbors of `pos` on a board of size `bounds`.
pub fn neighbors(pos: GridPos, bounds: GridPos) -> Neighbors {
    Neighbors::new(pos, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_cell_has_eight_neighbors() {
        let found: Vec<_> = neighbors((4, 4), (9, 9)).collect();
        assert_eq!(found.len(), 8);
        for expected in [
            (3, 3),
            (3, 4),
            (3, 5),
            (4, 3),
            (4, 5),
            (5, 3),
            (5, 4),
            (5, 5),
        ] {
            assert!(found.contains(&expected), "missing neighbor {:?}", expected);
        }
    }

    #[test]
    fn corner_cells_have_three_neighbors() {
        let top_left: Vec<_> = neighbors((0, 0), (9, 9)).collect();
        assert_eq!(top_left, vec![(0, 1), (1, 0), (1, 1)]);

        let bottom_right: Vec<_> = neighbors((8, 8), (9, 9)).collect();
        assert_eq!(bottom_right, vec![(7, 7), (7, 8), (8, 7)]);
    }

    #[test]
    fn edge_cells_have_five_neighbors() {
        assert_eq!(neighbors((0, 4), (9, 9)).count(), 5);
        assert_eq!(neighbors((4, 0), (9, 9)).count(), 5);
        assert_eq!(neighbors((8, 4), (9, 9)).count(), 5);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(neighbors((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn area_covers_the_full_coordinate_range() {
        assert_eq!(area(10, 10), 100);
        assert_eq!(area(255, 255), 65025);
        assert_eq!(area(0, 10), 0);
    }
}
