//! Sound cues for moves and finished games.

use std::io::Write;

use log::warn;

use crate::error::FeedbackError;
use crate::game::{GameOutcome, MoveReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Drop,
    Win,
    Draw,
}

impl Cue {
    /// Cue for a move report, if the move did anything
    pub fn for_report(report: &MoveReport) -> Option<Cue> {
        match report {
            MoveReport::Rejected(_) => None,
            MoveReport::Continued { .. } => Some(Cue::Drop),
            MoveReport::Concluded {
                outcome: GameOutcome::Winner(_),
                ..
            } => Some(Cue::Win),
            MoveReport::Concluded {
                outcome: GameOutcome::Draw,
                ..
            } => Some(Cue::Draw),
        }
    }
}

pub trait Feedback {
    fn play(&mut self, cue: Cue) -> Result<(), FeedbackError>;
}

/// Play `cue`, logging instead of propagating a failure.
pub fn play_quietly(feedback: &mut dyn Feedback, cue: Cue) {
    if let Err(e) = feedback.play(cue) {
        warn!("{cue:?} cue not played: {e}");
    }
}

/// Rings the terminal bell on finished games. Drops are silent since the
/// bell has only one tone.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        TerminalBell { out }
    }
}

impl<W: Write> Feedback for TerminalBell<W> {
    fn play(&mut self, cue: Cue) -> Result<(), FeedbackError> {
        match cue {
            Cue::Drop => Ok(()),
            Cue::Win | Cue::Draw => {
                self.out.write_all(b"\x07")?;
                self.out.flush()?;
                Ok(())
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct Silent;

impl Feedback for Silent {
    fn play(&mut self, _cue: Cue) -> Result<(), FeedbackError> {
        Ok(())
    }
}
