// Board model: a 4x4 grid of tiles and the shared move-resolution rule
//
// Tiles are stored by value in a fixed array, so copying a Board is the
// whole clone. Search branches each work on their own copy.

use std::fmt;

use crate::error::BoardError;
use crate::types::{Cell, Direction};

/// Side length of the grid
pub const BOARD_SIZE: usize = 4;

/// Number of tiles in a flat board
pub const TILE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Square grid of tiles; 0 is an empty cell, anything else a power of two
///
/// Cells are addressed as `cells[y][x]` (row, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[u32; BOARD_SIZE]; BOARD_SIZE],
    merge_cap: u32,
}

impl Board {
    /// Creates an all-empty board
    ///
    /// # Arguments
    /// * `merge_cap` - Tiles at or above this value never merge further
    pub fn empty(merge_cap: u32) -> Self {
        Board {
            cells: [[0; BOARD_SIZE]; BOARD_SIZE],
            merge_cap,
        }
    }

    /// Fills a board row-major from a flat slice: index `i` lands on row
    /// `i / 4`, column `i % 4`
    ///
    /// Values are trusted as-is. Use [`Board::try_from_values`] for input
    /// that has not been checked yet.
    ///
    /// # Panics
    /// If `values` does not hold exactly [`TILE_COUNT`] entries.
    pub fn from_flat(values: &[u32], merge_cap: u32) -> Self {
        assert_eq!(
            values.len(),
            TILE_COUNT,
            "flat board must hold exactly {} tiles",
            TILE_COUNT
        );

        let mut board = Board::empty(merge_cap);
        for (i, &value) in values.iter().enumerate() {
            board.cells[i / BOARD_SIZE][i % BOARD_SIZE] = value;
        }
        board
    }

    /// Validating constructor for untrusted input
    ///
    /// Accepts exactly 16 values, each either 0 or a power of two between 2
    /// and twice the merge cap (the largest tile a capped game can produce).
    pub fn try_from_values(values: &[i64], merge_cap: u32) -> Result<Self, BoardError> {
        if values.len() != TILE_COUNT {
            return Err(BoardError::wrong_size(values.len()));
        }

        let ceiling = 2 * merge_cap as i64;
        let mut tiles = [0u32; TILE_COUNT];
        for (index, &value) in values.iter().enumerate() {
            let valid = value == 0 || (value >= 2 && value <= ceiling && (value & (value - 1)) == 0);
            if !valid {
                return Err(BoardError::InvalidTileValue { index, value });
            }
            tiles[index] = value as u32;
        }

        Ok(Board::from_flat(&tiles, merge_cap))
    }

    pub fn merge_cap(&self) -> u32 {
        self.merge_cap
    }

    /// Tile value at `cell`
    pub fn get(&self, cell: Cell) -> u32 {
        self.cells[cell.y][cell.x]
    }

    /// Row-major flat copy of the tiles
    pub fn to_flat(&self) -> [u32; TILE_COUNT] {
        let mut flat = [0u32; TILE_COUNT];
        for (i, slot) in flat.iter_mut().enumerate() {
            *slot = self.cells[i / BOARD_SIZE][i % BOARD_SIZE];
        }
        flat
    }

    /// Empty cells in row-major scan order
    pub fn empty_cells(&self) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(TILE_COUNT);
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                if self.cells[y][x] == 0 {
                    cells.push(Cell { x, y });
                }
            }
        }
        cells
    }

    /// Places a tile
    ///
    /// Precondition: `cell` is in bounds and currently empty.
    pub fn insert_tile(&mut self, cell: Cell, value: u32) {
        self.cells[cell.y][cell.x] = value;
    }

    /// Number of non-empty cells
    pub fn tile_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v != 0).count()
    }

    /// Sum of all tile values
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().flatten().map(|&v| v as u64).sum()
    }

    pub fn max_tile(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Slides and merges every tile toward `direction`
    ///
    /// Cells farthest along the direction of travel are processed first, so
    /// each tile slides into an already settled line. A destination merges at
    /// most once per move, and only tiles strictly below the merge cap merge.
    ///
    /// # Returns
    /// `true` iff at least one cell changed
    pub fn apply_move(&mut self, direction: Direction) -> bool {
        let (dx, dy) = direction.vector();
        let xs = Self::traversal(dx);
        let ys = Self::traversal(dy);

        let mut merged = [[false; BOARD_SIZE]; BOARD_SIZE];
        let mut moved = false;

        for &x in &xs {
            for &y in &ys {
                let value = self.cells[y][x];
                if value == 0 {
                    continue;
                }

                let source = Cell { x, y };
                let (farthest, next) = self.find_farthest(source, dx, dy);

                match next {
                    Some(target)
                        if self.get(target) == value
                            && !merged[target.y][target.x]
                            && value < self.merge_cap =>
                    {
                        self.cells[target.y][target.x] = value * 2;
                        self.cells[y][x] = 0;
                        merged[target.y][target.x] = true;
                        moved = true;
                    }
                    _ if farthest != source => {
                        self.cells[farthest.y][farthest.x] = value;
                        self.cells[y][x] = 0;
                        moved = true;
                    }
                    _ => {}
                }
            }
        }

        moved
    }

    /// True iff no direction would change the board
    ///
    /// A non-empty board can move exactly when it has an empty cell or two
    /// orthogonally adjacent equal tiles below the merge cap. An all-empty
    /// board has empty cells and so is never terminal.
    pub fn is_terminal(&self) -> bool {
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let value = self.cells[y][x];
                if value == 0 {
                    return false;
                }
                if value < self.merge_cap {
                    if x + 1 < BOARD_SIZE && self.cells[y][x + 1] == value {
                        return false;
                    }
                    if y + 1 < BOARD_SIZE && self.cells[y + 1][x] == value {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Axis order for one component of the move vector: descending when the
    /// component is +1, ascending otherwise
    fn traversal(component: i32) -> [usize; BOARD_SIZE] {
        if component == 1 {
            [3, 2, 1, 0]
        } else {
            [0, 1, 2, 3]
        }
    }

    /// Walks from `cell` through empty cells along (dx, dy)
    ///
    /// Returns the last empty cell reached (or `cell` itself) and the first
    /// occupied cell beyond it, `None` when the walk left the grid.
    fn find_farthest(&self, cell: Cell, dx: i32, dy: i32) -> (Cell, Option<Cell>) {
        let mut previous = cell;
        loop {
            match Self::step(previous, dx, dy) {
                Some(next) if self.get(next) == 0 => previous = next,
                next => return (previous, next),
            }
        }
    }

    fn step(cell: Cell, dx: i32, dy: i32) -> Option<Cell> {
        let x = cell.x as i32 + dx;
        let y = cell.y as i32 + dy;
        let bound = BOARD_SIZE as i32;
        if x < 0 || x >= bound || y < 0 || y >= bound {
            None
        } else {
            Some(Cell {
                x: x as usize,
                y: y as usize,
            })
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for value in row {
                if *value == 0 {
                    write!(f, "{:>6}", ".")?;
                } else {
                    write!(f, "{:>6}", value)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAP: u32 = 1024;

    fn board(values: [u32; TILE_COUNT]) -> Board {
        Board::from_flat(&values, CAP)
    }

    #[test]
    fn test_from_flat_is_row_major() {
        let b = board([0, 0, 0, 0, 0, 0, 8, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(b.get(Cell { x: 2, y: 1 }), 8);
        assert_eq!(b.to_flat()[6], 8);
    }

    #[test]
    #[should_panic]
    fn test_from_flat_rejects_short_input() {
        Board::from_flat(&[2, 2], CAP);
    }

    #[test]
    fn test_empty_cells_scan_row_major() {
        let b = board([2, 0, 2, 2, 2, 2, 2, 2, 0, 2, 2, 2, 2, 2, 2, 0]);
        assert_eq!(
            b.empty_cells(),
            vec![Cell { x: 1, y: 0 }, Cell { x: 0, y: 2 }, Cell { x: 3, y: 3 }]
        );
    }

    #[test]
    fn test_copy_is_independent() {
        let original = board([2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let mut copy = original;
        copy.insert_tile(Cell { x: 3, y: 3 }, 4);
        assert!(copy.apply_move(Direction::Right));
        assert_eq!(original.get(Cell { x: 0, y: 0 }), 2);
        assert_eq!(original.get(Cell { x: 3, y: 3 }), 0);
    }

    #[test]
    fn test_try_from_values_rejects_bad_tiles() {
        let mut values = [0i64; TILE_COUNT];
        values[5] = 3;
        assert_eq!(
            Board::try_from_values(&values, CAP),
            Err(BoardError::InvalidTileValue { index: 5, value: 3 })
        );

        values[5] = -2;
        assert!(Board::try_from_values(&values, CAP).is_err());

        values[5] = 1;
        assert!(Board::try_from_values(&values, CAP).is_err());

        values[5] = 4096;
        assert!(Board::try_from_values(&values, CAP).is_err());

        values[5] = 2048;
        assert!(Board::try_from_values(&values, CAP).is_ok());
    }

    #[test]
    fn test_try_from_values_rejects_wrong_length() {
        assert_eq!(
            Board::try_from_values(&[0; 15], CAP),
            Err(BoardError::InvalidBoardSize {
                expected: 16,
                actual: 15
            })
        );
    }

    #[test]
    fn test_slide_down_stacks_column() {
        let mut b = board([2, 0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0]);
        assert!(b.apply_move(Direction::Down));
        assert_eq!(b.to_flat(), [0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 0, 0, 4, 0, 0, 0]);
    }

    #[test]
    fn test_merge_up_then_slide() {
        let mut b = board([0, 0, 0, 0, 4, 0, 0, 0, 4, 0, 0, 0, 2, 0, 0, 0]);
        assert!(b.apply_move(Direction::Up));
        assert_eq!(b.to_flat(), [8, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_display_renders_four_rows() {
        let b = board([2, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1024]);
        let rendered = b.to_string();
        assert_eq!(rendered.lines().count(), 4);
        assert!(rendered.contains("1024"));
    }

    #[test]
    fn test_empty_board_is_not_terminal() {
        assert!(!Board::empty(CAP).is_terminal());
    }
}
