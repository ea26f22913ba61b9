use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::debug;
use ratatui::{backend::Backend, Terminal};

use super::animation::DropAnimation;
use crate::feedback::{play_quietly, Cue, Feedback};
use crate::game::{GameSession, MoveError, MoveReport};
use crate::stats::StatsStore;

const IDLE_POLL: Duration = Duration::from_millis(100);

pub struct App<S: StatsStore> {
    session: GameSession<S>,
    feedback: Box<dyn Feedback>,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    animation: Option<DropAnimation>,
    /// Time per animation row; `None` disables the drop animation
    animation_step: Option<Duration>,
    last_step: Instant,
}

impl<S: StatsStore> App<S> {
    pub fn new(
        session: GameSession<S>,
        feedback: Box<dyn Feedback>,
        animation_step: Option<Duration>,
    ) -> Self {
        let selected_column = session.board().width() / 2;
        App {
            session,
            feedback,
            selected_column,
            should_quit: false,
            message: None,
            animation: None,
            animation_step,
            last_step: Instant::now(),
        }
    }

    pub fn session(&self) -> &GameSession<S> {
        &self.session
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
            self.on_tick(Instant::now());
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        let timeout = match (self.animation, self.animation_step) {
            (Some(_), Some(step)) => step,
            _ => IDLE_POLL,
        };
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Advance time-driven state: pending resets and the drop animation
    fn on_tick(&mut self, now: Instant) {
        if self.session.settle_reset() {
            self.message = Some("New game started!".to_string());
        }

        let Some(step) = self.animation_step else {
            self.animation = None;
            return;
        };
        if let Some(mut anim) = self.animation {
            let mut landed = false;
            while !landed && now.duration_since(self.last_step) >= step {
                self.last_step += step;
                landed = !anim.advance();
            }
            self.animation = if landed { None } else { Some(anim) };
        }
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;
        let width = self.session.board().width();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < width {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char(c @ '1'..='9') => {
                let column = c as usize - '1' as usize;
                if column < width {
                    self.selected_column = column;
                    self.drop_piece();
                }
            }
            KeyCode::Char('r') => {
                self.animation = None;
                self.session.request_reset();
                self.selected_column = width / 2;
            }
            _ => {}
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        let cell = self.session.preview_cell();
        let report = self.session.handle_move(self.selected_column);
        debug!("column {} -> {:?}", self.selected_column, report);

        match report {
            MoveReport::Rejected(MoveError::ColumnFull) => {
                self.message = Some("Column is full!".to_string());
            }
            MoveReport::Rejected(MoveError::InvalidColumn) => {
                self.message = Some("Invalid column!".to_string());
            }
            MoveReport::Rejected(MoveError::GameOver) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
            MoveReport::Continued { .. } => {}
            MoveReport::Concluded { .. } => {
                self.message = Some("Press 'r' to play again.".to_string());
            }
        }

        if let Some(landing) = report.landing() {
            if self.animation_step.is_some() {
                self.animation = Some(DropAnimation::new(landing, cell));
                self.last_step = Instant::now();
            }
        }
        if let Some(cue) = Cue::for_report(&report) {
            play_quietly(self.feedback.as_mut(), cue);
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.session,
            self.selected_column,
            self.animation.as_ref(),
            &self.message,
        );
    }
}
