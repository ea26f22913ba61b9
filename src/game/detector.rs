//! Four-in-a-row and full-board detection over a whole [`Board`].

use super::board::{Board, Cell};

/// Consecutive same-colour cells needed to win.
pub const RUN_LENGTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    NoWinner,
    Draw,
    Winner(Cell),
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::NoWinner
    }
}

/// Which terminal result wins when the move that fills the board also
/// completes a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminalPrecedence {
    /// A full board is reported as a draw without looking for runs.
    #[default]
    DrawFirst,
    /// Runs are checked first; a full board with no run is a draw.
    WinFirst,
}

/// Classify `board` using [`TerminalPrecedence::DrawFirst`].
pub fn detect(board: &Board) -> Outcome {
    detect_with(board, TerminalPrecedence::DrawFirst)
}

/// Classify `board`.
///
/// Runs are searched vertically, then horizontally, then diagonally; the
/// first run found decides the winner.
pub fn detect_with(board: &Board, precedence: TerminalPrecedence) -> Outcome {
    if board.width() == 0 || board.height() == 0 {
        return Outcome::NoWinner;
    }

    let full = board.is_full();
    if full && precedence == TerminalPrecedence::DrawFirst {
        return Outcome::Draw;
    }

    let winner = vertical_winner(board)
        .or_else(|| horizontal_winner(board))
        .or_else(|| diagonal_winner(board));

    match winner {
        Some(cell) => Outcome::Winner(cell),
        None if full => Outcome::Draw,
        None => Outcome::NoWinner,
    }
}

/// First run of `RUN_LENGTH` non-empty equal cells in `cells`
fn run_in(cells: impl Iterator<Item = Cell>) -> Option<Cell> {
    let mut last = Cell::Empty;
    let mut count = 0;
    for cell in cells {
        if !cell.is_empty() && cell == last {
            count += 1;
        } else {
            count = 1;
        }
        if !cell.is_empty() && count == RUN_LENGTH {
            return Some(cell);
        }
        last = cell;
    }
    None
}

fn vertical_winner(board: &Board) -> Option<Cell> {
    (0..board.width()).find_map(|col| run_in(board.column(col).iter().copied()))
}

fn horizontal_winner(board: &Board) -> Option<Cell> {
    (0..board.height()).find_map(|row| run_in((0..board.width()).map(|col| board.get(col, row))))
}

fn diagonal_winner(board: &Board) -> Option<Cell> {
    let (width, height) = (board.width(), board.height());
    let span = RUN_LENGTH - 1;

    for col in 0..width {
        for row in 0..height {
            let cell = board.get(col, row);
            if cell.is_empty() || row + span >= height {
                continue;
            }

            // Towards higher columns and lower rows on screen
            let down_right = col + span < width
                && (1..RUN_LENGTH).all(|i| board.get(col + i, row + i) == cell);
            // Towards lower columns, i.e. rising to the right from the far end
            let up_right =
                col >= span && (1..RUN_LENGTH).all(|i| board.get(col - i, row + i) == cell);

            if down_right || up_right {
                return Some(cell);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::{HEIGHT, WIDTH};

    fn place(coords: &[(usize, usize)], cell: Cell) -> Board {
        Board::from_cells(WIDTH, HEIGHT, coords, cell)
    }

    /// Full board with no run anywhere: columns alternate in pairs so no
    /// row, column or diagonal holds four equal cells.
    fn drawn_board() -> Board {
        let mut board = Board::new();
        for col in 0..WIDTH {
            for row in 0..HEIGHT {
                let cell = if (row + col / 2) % 2 == 0 {
                    Cell::Red
                } else {
                    Cell::Yellow
                };
                board.set(col, row, cell);
            }
        }
        board
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        assert_eq!(detect(&Board::new()), Outcome::NoWinner);
        assert_eq!(detect(&Board::with_dimensions(9, 4)), Outcome::NoWinner);
    }

    #[test]
    fn test_vertical_win() {
        let board = place(&[(0, 3), (0, 4), (0, 5), (0, 6)], Cell::Red);
        assert_eq!(detect(&board), Outcome::Winner(Cell::Red));

        let top = place(&[(0, 0), (0, 1), (0, 2), (0, 3)], Cell::Red);
        assert_eq!(detect(&top), Outcome::Winner(Cell::Red));
    }

    #[test]
    fn test_horizontal_win() {
        let board = place(&[(0, 0), (1, 0), (2, 0), (3, 0)], Cell::Yellow);
        assert_eq!(detect(&board), Outcome::Winner(Cell::Yellow));

        let right_edge = place(&[(2, 6), (3, 6), (4, 6), (5, 6)], Cell::Yellow);
        assert_eq!(detect(&right_edge), Outcome::Winner(Cell::Yellow));
    }

    #[test]
    fn test_down_right_diagonal_win() {
        let board = place(&[(0, 0), (1, 1), (2, 2), (3, 3)], Cell::Red);
        assert_eq!(detect(&board), Outcome::Winner(Cell::Red));

        let corner = place(&[(2, 3), (3, 4), (4, 5), (5, 6)], Cell::Red);
        assert_eq!(detect(&corner), Outcome::Winner(Cell::Red));
    }

    #[test]
    fn test_up_right_diagonal_win() {
        let board = place(&[(3, 0), (2, 1), (1, 2), (0, 3)], Cell::Yellow);
        assert_eq!(detect(&board), Outcome::Winner(Cell::Yellow));

        let corner = place(&[(5, 3), (4, 4), (3, 5), (2, 6)], Cell::Yellow);
        assert_eq!(detect(&corner), Outcome::Winner(Cell::Yellow));
    }

    #[test]
    fn test_three_is_not_a_run() {
        let board = place(&[(0, 4), (0, 5), (0, 6), (1, 6), (2, 6)], Cell::Red);
        assert_eq!(detect(&board), Outcome::NoWinner);
    }

    #[test]
    fn test_broken_run_resets_count() {
        let mut board = place(&[(0, 6), (1, 6), (3, 6), (4, 6)], Cell::Red);
        board.set(2, 6, Cell::Yellow);
        assert_eq!(detect(&board), Outcome::NoWinner);
    }

    #[test]
    fn test_in_progress_board() {
        let mut board = Board::new();
        board.set(0, 0, Cell::Red);
        board.set(1, 1, Cell::Yellow);
        assert_eq!(detect(&board), Outcome::NoWinner);
    }

    #[test]
    fn test_full_board_without_run_is_draw() {
        let board = drawn_board();
        assert!(board.is_full());
        assert_eq!(detect(&board), Outcome::Draw);
        assert_eq!(detect_with(&board, TerminalPrecedence::WinFirst), Outcome::Draw);
    }

    #[test]
    fn test_full_board_with_run_follows_precedence() {
        let mut board = drawn_board();
        for row in 3..HEIGHT {
            board.set(0, row, Cell::Yellow);
        }
        assert!(board.is_full());

        assert_eq!(detect_with(&board, TerminalPrecedence::DrawFirst), Outcome::Draw);
        assert_eq!(
            detect_with(&board, TerminalPrecedence::WinFirst),
            Outcome::Winner(Cell::Yellow)
        );
    }

    #[test]
    fn test_vertical_scanned_before_horizontal() {
        let mut board = place(&[(5, 3), (5, 4), (5, 5), (5, 6)], Cell::Yellow);
        for col in 0..4 {
            board.set(col, 0, Cell::Red);
        }
        assert_eq!(detect(&board), Outcome::Winner(Cell::Yellow));
    }

    #[test]
    fn test_horizontal_scanned_before_diagonal() {
        let mut board = place(&[(0, 0), (1, 1), (2, 2), (3, 3)], Cell::Red);
        for col in 2..6 {
            board.set(col, 6, Cell::Yellow);
        }
        assert_eq!(detect(&board), Outcome::Winner(Cell::Yellow));
    }
}
