//! Core Connect Four game logic: board, players, win detection and the move
//! state machine.

mod board;
mod detector;
mod player;
mod state;

pub use board::{Board, Cell, MoveError, HEIGHT, MAX_SIDE, MIN_SIDE, WIDTH};
pub use detector::{detect, detect_with, Outcome, TerminalPrecedence, RUN_LENGTH};
pub use player::Player;
pub use state::{
    apply_move, apply_move_with, GameOutcome, GameSession, GameState, Landing, MoveReport,
    MoveResult, Phase,
};
