//! Game board representation and collision detection

use crate::piece::Piece;
use ratatui::style::Color;

/// Board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 22;
/// Hidden rows at the top of the board for spawning
pub const HIDDEN_ROWS: usize = 2;
pub const VISIBLE_HEIGHT: usize = BOARD_HEIGHT - HIDDEN_ROWS;

/// A cell on the board - either empty or filled with a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Grid stored as [y][x], row 0 is the top hidden row, y grows downward
    cells: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    /// Test-only bounds-checked read, None if out of bounds
    #[cfg(test)]
    pub(crate) fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= BOARD_WIDTH || y >= BOARD_HEIGHT {
            return None;
        }
        Some(self.cells[y][x])
    }

    /// Check whether `piece` fits with its pivot at (x, y).
    ///
    /// Blocks above the top edge (y < 0) are allowed and never collide. Blocks past either
    /// wall or below the floor make the position illegal.
    pub fn is_legal_position(&self, piece: &Piece, x: i32, y: i32) -> bool {
        piece.cells(x, y).iter().all(|&(cx, cy)| {
            if cx < 0 || cx >= BOARD_WIDTH as i32 || cy >= BOARD_HEIGHT as i32 {
                return false;
            }
            if cy < 0 {
                return true;
            }
            self.cells[cy as usize][cx as usize].is_empty()
        })
    }

    /// Stamp `piece` onto the board at pivot (x, y).
    ///
    /// Blocks above the top edge are dropped. Callers only lock positions that passed
    /// `is_legal_position`; anything outside the board is skipped.
    pub fn lock_piece(&mut self, piece: &Piece, x: i32, y: i32) {
        let color = piece.color();
        for (cx, cy) in piece.cells(x, y) {
            if cy < 0 || cx < 0 || cx >= BOARD_WIDTH as i32 || cy >= BOARD_HEIGHT as i32 {
                continue;
            }
            self.cells[cy as usize][cx as usize] = Cell::Filled(color);
        }
    }

    /// Remove full rows and return how many were cleared.
    ///
    /// Scans bottom to top. Each full row pulls everything above it down by one and the
    /// same index is checked again, since the row that slid into it may also be full.
    pub fn clear_full_lines(&mut self) -> u32 {
        let mut lines_cleared = 0;
        let mut y = BOARD_HEIGHT;

        while y > 0 {
            let row = y - 1;
            if self.is_line_full(row) {
                lines_cleared += 1;
                for j in (1..=row).rev() {
                    self.cells[j] = self.cells[j - 1];
                }
                self.cells[0] = [Cell::Empty; BOARD_WIDTH];
            } else {
                y -= 1;
            }
        }

        lines_cleared
    }

    /// Empty every cell
    pub fn reset(&mut self) {
        self.cells = [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT];
    }

    /// Check if a line is completely filled
    fn is_line_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| cell.is_filled())
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Rows below the hidden spawn area, top to bottom
    pub fn visible_rows(&self) -> impl Iterator<Item = &[Cell; BOARD_WIDTH]> {
        self.cells[HIDDEN_ROWS..].iter()
    }

    /// Test-only direct write; production code mutates through lock and clear only
    #[cfg(test)]
    pub(crate) fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[y][x] = cell;
    }

    /// Test-only: fill row `y` except the listed columns
    #[cfg(test)]
    pub(crate) fn fill_row_except(&mut self, y: usize, holes: &[usize], color: Color) {
        for x in 0..BOARD_WIDTH {
            if !holes.contains(&x) {
                self.cells[y][x] = Cell::Filled(color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::Shape;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert_eq!(board.visible_rows().count(), VISIBLE_HEIGHT);
    }

    #[test]
    fn test_out_of_bounds() {
        let board = Board::new();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(BOARD_WIDTH as i32, 0), None);
        assert_eq!(board.get(0, BOARD_HEIGHT as i32), None);
        assert_eq!(board.get(0, 0), Some(Cell::Empty));
    }

    #[test]
    fn test_walls_and_floor_are_illegal() {
        let board = Board::new();
        let line = Piece::new(Shape::Line);
        // Line spans x-1..=x+2
        assert!(board.is_legal_position(&line, 1, 5));
        assert!(!board.is_legal_position(&line, 0, 5));
        assert!(board.is_legal_position(&line, 7, 5));
        assert!(!board.is_legal_position(&line, 8, 5));
        assert!(board.is_legal_position(&line, 4, 21));
        assert!(!board.is_legal_position(&line, 4, 22));
    }

    #[test]
    fn test_above_ceiling_is_legal() {
        let board = Board::new();
        let vertical = Piece::new(Shape::Line).rotate_right();
        // cells at y-1..=y+2, so pivot -2 puts three blocks above the board
        assert!(board.is_legal_position(&vertical, 3, -2));
        assert!(board.is_legal_position(&vertical, 3, -10));
    }

    #[test]
    fn test_legal_position_stays_inside_board() {
        let board = Board::new();
        for shape in Shape::PLAYABLE {
            let mut piece = Piece::new(shape);
            for _ in 0..4 {
                for x in -4..14 {
                    for y in -4..26 {
                        if board.is_legal_position(&piece, x, y) {
                            for (cx, cy) in piece.cells(x, y) {
                                assert!((0..BOARD_WIDTH as i32).contains(&cx));
                                assert!(cy < BOARD_HEIGHT as i32);
                            }
                        }
                    }
                }
                piece = piece.rotate_right();
            }
        }
    }

    #[test]
    fn test_occupied_cell_collides() {
        let mut board = Board::new();
        board.set(5, 10, Cell::Filled(Color::Red));
        let square = Piece::new(Shape::Square);
        // Square covers (x,y) (x+1,y) (x,y-1) (x+1,y-1)
        assert!(!board.is_legal_position(&square, 5, 10));
        assert!(!board.is_legal_position(&square, 4, 11));
        assert!(board.is_legal_position(&square, 3, 10));
    }

    #[test]
    fn test_lock_piece_writes_color() {
        let mut board = Board::new();
        let t = Piece::new(Shape::T);
        board.lock_piece(&t, 4, 20);
        for (x, y) in t.cells(4, 20) {
            assert_eq!(board.get(x, y), Some(Cell::Filled(Shape::T.color())));
        }
        assert!(!board.is_legal_position(&t, 4, 20));
    }

    #[test]
    fn test_lock_drops_cells_above_ceiling() {
        let mut board = Board::new();
        let vertical = Piece::new(Shape::Line).rotate_right();
        // cells (3,-2) (3,-1) (3,0) (3,1)
        board.lock_piece(&vertical, 3, -1);
        assert!(board.get(3, 0).unwrap().is_filled());
        assert!(board.get(3, 1).unwrap().is_filled());
        let filled = (0..BOARD_HEIGHT as i32)
            .flat_map(|y| (0..BOARD_WIDTH as i32).map(move |x| (x, y)))
            .filter(|&(x, y)| board.get(x, y).unwrap().is_filled())
            .count();
        assert_eq!(filled, 2);

        let mut board = Board::new();
        board.lock_piece(&vertical, 3, -3);
        assert!(board.is_empty());
    }

    #[test]
    fn test_clear_on_empty_board() {
        let mut board = Board::new();
        assert_eq!(board.clear_full_lines(), 0);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_clear_bottom_line_shifts_rows_down() {
        let mut board = Board::new();
        board.fill_row_except(21, &[], Color::Cyan);
        board.set(0, 20, Cell::Filled(Color::Red));
        board.set(7, 20, Cell::Filled(Color::Blue));
        board.set(2, 0, Cell::Filled(Color::Green));

        let before_row_20: Vec<Cell> = (0..BOARD_WIDTH as i32)
            .map(|x| board.get(x, 20).unwrap())
            .collect();

        assert_eq!(board.clear_full_lines(), 1);
        let after_row_21: Vec<Cell> = (0..BOARD_WIDTH as i32)
            .map(|x| board.get(x, 21).unwrap())
            .collect();
        assert_eq!(after_row_21, before_row_20);
        assert_eq!(board.get(2, 1), Some(Cell::Filled(Color::Green)));
        assert!((0..BOARD_WIDTH as i32).all(|x| board.get(x, 0).unwrap().is_empty()));
    }

    #[test]
    fn test_clear_rechecks_row_after_shift() {
        let mut board = Board::new();
        board.fill_row_except(21, &[], Color::Cyan);
        board.fill_row_except(20, &[], Color::Cyan);
        board.fill_row_except(19, &[3], Color::Cyan);
        board.fill_row_except(18, &[], Color::Cyan);

        assert_eq!(board.clear_full_lines(), 3);
        // the partial row ends up on the floor
        assert!(board.get(3, 21).unwrap().is_empty());
        assert!(board.get(0, 21).unwrap().is_filled());
        for y in 0..21 {
            assert!((0..BOARD_WIDTH as i32).all(|x| board.get(x, y).unwrap().is_empty()));
        }
    }

    #[test]
    fn test_clear_non_contiguous_rows() {
        let mut board = Board::new();
        board.fill_row_except(21, &[], Color::Red);
        board.fill_row_except(20, &[0], Color::Red);
        board.fill_row_except(19, &[], Color::Red);
        board.set(9, 18, Cell::Filled(Color::Blue));

        assert_eq!(board.clear_full_lines(), 2);
        assert!(board.get(0, 21).unwrap().is_empty());
        assert!(board.get(1, 21).unwrap().is_filled());
        assert_eq!(board.get(9, 20), Some(Cell::Filled(Color::Blue)));
    }

    #[test]
    fn test_reset() {
        let mut board = Board::new();
        board.fill_row_except(10, &[1], Color::Red);
        board.reset();
        assert!(board.is_empty());
    }
}
