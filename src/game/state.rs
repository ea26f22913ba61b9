use log::{debug, info};

use super::detector::{detect_with, Outcome, TerminalPrecedence};
use super::{Board, Cell, MoveError, Player};
use crate::stats::{StatsStore, WinStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingMove,
    Concluded(GameOutcome),
}

/// Where the last piece came to rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landing {
    pub column: usize,
    pub row: usize,
}

/// Result of the pure move step: either nothing happened or a new board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResult {
    Rejected(MoveError),
    Placed {
        board: Board,
        landing: Landing,
        outcome: Outcome,
    },
}

/// Drop `player`'s piece into `column` of a copy of `board` and classify
/// the result.
pub fn apply_move(
    board: &Board,
    column: usize,
    player: Player,
    precedence: TerminalPrecedence,
) -> MoveResult {
    apply_move_with(board, column, player, |b| detect_with(b, precedence))
}

/// Same as [`apply_move`] with the detector supplied by the caller.
/// `detect` is only called once a piece has been placed.
pub fn apply_move_with<F>(board: &Board, column: usize, player: Player, detect: F) -> MoveResult
where
    F: FnOnce(&Board) -> Outcome,
{
    if column >= board.width() {
        return MoveResult::Rejected(MoveError::InvalidColumn);
    }
    if board.is_column_full(column) {
        return MoveResult::Rejected(MoveError::ColumnFull);
    }

    let mut next = board.clone();
    let row = match next.drop_piece(column, player.to_cell()) {
        Ok(row) => row,
        Err(e) => return MoveResult::Rejected(e),
    };
    let outcome = detect(&next);

    MoveResult::Placed {
        board: next,
        landing: Landing { column, row },
        outcome,
    }
}

/// Turn and status shown to the players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    current_player: Player,
    phase: Phase,
    status_message: String,
    should_reset: bool,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            current_player: Player::FIRST,
            phase: Phase::AwaitingMove,
            status_message: turn_message(Player::FIRST),
            should_reset: false,
        }
    }

    /// Initial state with the reset flag raised; the board is cleared when
    /// the flag is settled.
    pub fn reset_requested() -> Self {
        GameState {
            should_reset: true,
            ..Self::initial()
        }
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn should_reset(&self) -> bool {
        self.should_reset
    }

    pub fn has_winner(&self) -> bool {
        matches!(self.phase, Phase::Concluded(GameOutcome::Winner(_)))
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self.phase {
            Phase::Concluded(outcome) => Some(outcome),
            Phase::AwaitingMove => None,
        }
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    fn next_turn(player: Player) -> Self {
        GameState {
            current_player: player,
            phase: Phase::AwaitingMove,
            status_message: turn_message(player),
            should_reset: false,
        }
    }

    fn concluded(player: Player, outcome: GameOutcome) -> Self {
        let status_message = match outcome {
            GameOutcome::Winner(winner) => format!("{} wins!", winner.label()),
            GameOutcome::Draw => "Draw!".to_string(),
        };
        GameState {
            current_player: player,
            phase: Phase::Concluded(outcome),
            status_message,
            should_reset: false,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

fn turn_message(player: Player) -> String {
    format!("{}'s turn", player.label())
}

/// What a click on a column did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveReport {
    Rejected(MoveError),
    Continued {
        landing: Landing,
        next: Player,
    },
    Concluded {
        landing: Landing,
        outcome: GameOutcome,
        stats: WinStats,
    },
}

impl MoveReport {
    pub fn landing(&self) -> Option<Landing> {
        match self {
            MoveReport::Rejected(_) => None,
            MoveReport::Continued { landing, .. } | MoveReport::Concluded { landing, .. } => {
                Some(*landing)
            }
        }
    }
}

/// Board, turn state and running statistics for one player session.
#[derive(Debug)]
pub struct GameSession<S: StatsStore> {
    board: Board,
    state: GameState,
    stats: WinStats,
    store: S,
    precedence: TerminalPrecedence,
    last_move: Option<Landing>,
    move_count: usize,
}

impl<S: StatsStore> GameSession<S> {
    /// Start a session on a default-sized board, loading stats from `store`
    pub fn new(store: S) -> Self {
        Self::with_board(Board::new(), TerminalPrecedence::default(), store)
    }

    pub fn with_board(board: Board, precedence: TerminalPrecedence, store: S) -> Self {
        let stats = store.load();
        info!(
            "session started on {}x{} board, stats {:?}",
            board.width(),
            board.height(),
            stats
        );
        let mut board = board;
        board.clear();
        GameSession {
            board,
            state: GameState::initial(),
            stats,
            store,
            precedence,
            last_move: None,
            move_count: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn stats(&self) -> WinStats {
        self.stats
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn last_move(&self) -> Option<Landing> {
        self.last_move
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn precedence(&self) -> TerminalPrecedence {
        self.precedence
    }

    /// Play the current player's piece into `column`.
    ///
    /// Rejected moves leave the session untouched. A concluding move bumps
    /// exactly one counter and saves the stats once.
    pub fn handle_move(&mut self, column: usize) -> MoveReport {
        self.settle_reset();

        if self.state.is_terminal() {
            debug!("move into column {column} ignored, game is over");
            return MoveReport::Rejected(MoveError::GameOver);
        }

        let player = self.state.current_player();
        let (board, landing, outcome) =
            match apply_move(&self.board, column, player, self.precedence) {
                MoveResult::Rejected(e) => {
                    debug!("{} move into column {column} rejected: {e}", player.name());
                    return MoveReport::Rejected(e);
                }
                MoveResult::Placed {
                    board,
                    landing,
                    outcome,
                } => (board, landing, outcome),
            };

        self.board = board;
        debug_assert!(self.board.is_settled());
        self.last_move = Some(landing);
        self.move_count += 1;

        let concluded = match outcome {
            Outcome::NoWinner => None,
            Outcome::Draw => Some(GameOutcome::Draw),
            Outcome::Winner(cell) => cell.player().map(GameOutcome::Winner),
        };

        match concluded {
            None => {
                let next = player.other();
                self.state = GameState::next_turn(next);
                MoveReport::Continued { landing, next }
            }
            Some(outcome) => {
                self.stats.record(outcome);
                self.store.save(&self.stats);
                self.state = GameState::concluded(player, outcome);
                info!(
                    "game over after {} moves: {}, stats {:?}",
                    self.move_count,
                    self.state.status_message(),
                    self.stats
                );
                MoveReport::Concluded {
                    landing,
                    outcome,
                    stats: self.stats,
                }
            }
        }
    }

    /// Restore default turn state and raise the reset flag. The board is
    /// cleared by [`settle_reset`](Self::settle_reset).
    pub fn request_reset(&mut self) {
        self.state = GameState::reset_requested();
    }

    /// Clear the board if a reset was requested. Returns whether it did.
    pub fn settle_reset(&mut self) -> bool {
        if !self.state.should_reset() {
            return false;
        }
        self.board.clear();
        self.last_move = None;
        self.move_count = 0;
        self.state = GameState::initial();
        debug!("board reset");
        true
    }

    /// Start a new game. Stats are kept.
    pub fn reset(&mut self) {
        self.request_reset();
        self.settle_reset();
    }

    /// Cell the current player would drop next
    pub fn preview_cell(&self) -> Cell {
        self.state.current_player().to_cell()
    }
}
