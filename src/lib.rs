//! # Connect Four TUI
//!
//! Two-player Connect Four in the terminal. Win statistics are kept across
//! sessions in a small JSON file.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, players, winner detection, move state machine
//! - [`stats`]: Win/draw counters and their persistence
//! - [`feedback`]: Sound cues for moves and finished games
//! - [`ui`]: Terminal UI: game view and drop animation
//! - [`config`]: TOML configuration loading and validation
//! - [`logging`]: File logger setup
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod feedback;
pub mod game;
pub mod logging;
pub mod stats;
pub mod ui;
