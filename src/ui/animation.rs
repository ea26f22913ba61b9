use crate::game::{Board, Cell, Landing};

/// A piece falling from the top row to where it landed, one row per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropAnimation {
    landing: Landing,
    cell: Cell,
    row: usize,
}

impl DropAnimation {
    pub fn new(landing: Landing, cell: Cell) -> Self {
        DropAnimation {
            landing,
            cell,
            row: 0,
        }
    }

    /// Move the piece down one row. Returns false once it has landed.
    pub fn advance(&mut self) -> bool {
        if self.row < self.landing.row {
            self.row += 1;
        }
        !self.is_done()
    }

    pub fn is_done(&self) -> bool {
        self.row >= self.landing.row
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// What to draw at `(col, row)` while the piece is in flight
    pub fn cell_at(&self, board: &Board, col: usize, row: usize) -> Cell {
        if col != self.landing.column || self.is_done() {
            return board.get(col, row);
        }
        if row == self.row {
            self.cell
        } else if row == self.landing.row {
            Cell::Empty
        } else {
            board.get(col, row)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landed_board() -> (Board, Landing) {
        let mut board = Board::new();
        let row = board.drop_piece(2, Cell::Yellow).unwrap();
        (board, Landing { column: 2, row })
    }

    #[test]
    fn test_piece_starts_at_top() {
        let (board, landing) = landed_board();
        let anim = DropAnimation::new(landing, Cell::Yellow);

        assert_eq!(anim.cell_at(&board, 2, 0), Cell::Yellow);
        assert_eq!(anim.cell_at(&board, 2, landing.row), Cell::Empty);
        assert_eq!(anim.cell_at(&board, 1, 0), Cell::Empty);
    }

    #[test]
    fn test_advances_until_landed() {
        let (board, landing) = landed_board();
        let mut anim = DropAnimation::new(landing, Cell::Yellow);

        let mut steps = 0;
        while anim.advance() {
            steps += 1;
        }
        assert_eq!(steps, landing.row - 1);
        assert!(anim.is_done());
        assert_eq!(anim.row(), landing.row);
        assert_eq!(anim.cell_at(&board, 2, landing.row), Cell::Yellow);
        assert!(!anim.advance());
    }

    #[test]
    fn test_top_row_landing_is_immediately_done() {
        let anim = DropAnimation::new(Landing { column: 0, row: 0 }, Cell::Red);
        assert!(anim.is_done());
    }
}
