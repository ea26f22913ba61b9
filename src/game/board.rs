/// Default number of columns.
pub const WIDTH: usize = 6;
/// Default number of rows.
pub const HEIGHT: usize = 7;
/// Smallest and largest board side the game accepts.
pub const MIN_SIDE: usize = 4;
pub const MAX_SIDE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Red,
    Yellow,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Grid of cells stored column-major, indexed `[column][row]`.
///
/// Row 0 is the top of a column and the last row is the bottom, so pieces
/// fill each column from its highest row index downwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    columns: Vec<Vec<Cell>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column is full")]
    ColumnFull,
    #[error("column is out of range")]
    InvalidColumn,
    #[error("game is over")]
    GameOver,
}

impl Board {
    /// Create a new empty board with the default dimensions
    pub fn new() -> Self {
        Self::with_dimensions(WIDTH, HEIGHT)
    }

    /// Create an empty board of `width` columns by `height` rows
    pub fn with_dimensions(width: usize, height: usize) -> Self {
        Board {
            columns: vec![vec![Cell::Empty; height]; width],
        }
    }

    /// Build a board with the given `(column, row)` coordinates set to `cell`.
    ///
    /// No gravity is applied; this places cells exactly where asked.
    #[cfg(test)]
    pub(crate) fn from_cells(
        width: usize,
        height: usize,
        coords: &[(usize, usize)],
        cell: Cell,
    ) -> Self {
        let mut board = Self::with_dimensions(width, height);
        for &(col, row) in coords {
            board.columns[col][row] = cell;
        }
        board
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Get the cell at a specific position.
    /// Row 0 is the top.
    pub fn get(&self, col: usize, row: usize) -> Cell {
        self.columns[col][row]
    }

    /// Set a cell directly, ignoring gravity
    pub fn set(&mut self, col: usize, row: usize, cell: Cell) {
        self.columns[col][row] = cell;
    }

    pub fn column(&self, col: usize) -> &[Cell] {
        &self.columns[col]
    }

    /// Check if a column is full. Columns outside the board count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        match self.columns.get(col) {
            Some(cells) => cells.first().map_or(true, |top| !top.is_empty()),
            None => true,
        }
    }

    /// Row a piece dropped into `col` would land on, if any
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        let cells = self.columns.get(col)?;
        cells.iter().rposition(|cell| cell.is_empty())
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, cell: Cell) -> Result<usize, MoveError> {
        if col >= self.width() {
            return Err(MoveError::InvalidColumn);
        }
        if self.is_column_full(col) {
            return Err(MoveError::ColumnFull);
        }

        let row = self.landing_row(col).ok_or(MoveError::ColumnFull)?;
        self.columns[col][row] = cell;
        Ok(row)
    }

    pub fn has_empty_cell(&self) -> bool {
        self.columns.iter().flatten().any(|cell| cell.is_empty())
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        !self.has_empty_cell()
    }

    /// Columns that can still take a piece
    #[cfg(test)]
    pub(crate) fn legal_columns(&self) -> Vec<usize> {
        (0..self.width())
            .filter(|&col| !self.is_column_full(col))
            .collect()
    }

    /// Empty every cell, keeping the dimensions
    pub fn clear(&mut self) {
        for cell in self.columns.iter_mut().flatten() {
            *cell = Cell::Empty;
        }
    }

    /// True when no column has a piece resting above an empty cell
    pub fn is_settled(&self) -> bool {
        self.columns.iter().all(|cells| {
            let first_filled = cells.iter().position(|c| !c.is_empty()).unwrap_or(cells.len());
            cells[first_filled..].iter().all(|c| !c.is_empty())
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
