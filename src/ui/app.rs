use super::game_view::{self, outcome_text};
use super::session::{SessionCommand, SessionEvent, SessionHandle, SessionUpdate, Snapshot};
use crate::error::{DriverError, GameError};
use crate::game::GameEngine;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::warn;
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;

pub struct App {
    session: SessionHandle,
    snapshot: Snapshot,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    replay_prompt: bool,
}

impl App {
    /// Start a game session for `engine` on a worker thread
    pub fn new(engine: GameEngine) -> Self {
        let snapshot = Snapshot::of(&engine);
        Self::with_session(SessionHandle::spawn(engine), snapshot)
    }

    fn with_session(session: SessionHandle, snapshot: Snapshot) -> Self {
        let selected_column = snapshot.board.columns() / 2; // Start in middle
        App {
            session,
            snapshot,
            selected_column,
            should_quit: false,
            message: None,
            replay_prompt: false,
        }
    }

    /// Main application loop. Returns the engine once the player quits.
    pub fn run<B: Backend>(
        mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<GameEngine, DriverError> {
        loop {
            while let Some(update) = self.session.try_recv()? {
                self.apply_update(update);
            }

            terminal.draw(|f| {
                game_view::render(
                    f,
                    &self.snapshot,
                    self.selected_column,
                    self.message.as_deref(),
                    self.replay_prompt,
                )
            })?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }

        self.session.shutdown()
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> Result<(), DriverError> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key)?;
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) -> Result<(), DriverError> {
        if self.replay_prompt {
            return self.handle_prompt_key(key.code);
        }

        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.snapshot.board.columns() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.send(SessionCommand::Drop(self.selected_column))?;
            }
            KeyCode::Char(c @ '1'..='9') => {
                let column = c as usize - '1' as usize;
                if column < self.snapshot.board.columns() {
                    self.selected_column = column;
                }
                self.send(SessionCommand::Drop(column))?;
            }
            KeyCode::Char('r') => {
                self.send(SessionCommand::Restart)?;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_prompt_key(&mut self, code: KeyCode) -> Result<(), DriverError> {
        match code {
            KeyCode::Char('y') | KeyCode::Enter => self.answer_replay(true),
            KeyCode::Char('n') | KeyCode::Esc => self.answer_replay(false),
            KeyCode::Char('q') => {
                self.should_quit = true;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// The prompt stays up until the worker has accepted the answer
    fn answer_replay(&mut self, again: bool) -> Result<(), DriverError> {
        if self.send(SessionCommand::PlayAgain(again))? {
            self.replay_prompt = false;
        }
        Ok(())
    }

    /// Returns whether the worker accepted the command
    fn send(&mut self, command: SessionCommand) -> Result<bool, DriverError> {
        let accepted = self.session.submit(command)?;
        if !accepted {
            warn!("dropped {command:?}, previous move still in progress");
            self.message = Some("Still thinking, try again".to_string());
        }
        Ok(accepted)
    }

    /// Reflect a worker update in the UI state
    fn apply_update(&mut self, update: SessionUpdate) {
        self.snapshot = update.snapshot;
        match update.event {
            SessionEvent::Started | SessionEvent::Moved => {}
            SessionEvent::Rejected(err) => {
                self.message = Some(match err {
                    GameError::ColumnFull { .. } => "Column is full!".to_string(),
                    GameError::InvalidColumn { .. } => "Invalid column!".to_string(),
                    GameError::GameOver => "Game over! Press 'r' to restart.".to_string(),
                    GameError::Configuration { .. } => err.to_string(),
                });
            }
            SessionEvent::Finished => {
                if let Some(outcome) = self.snapshot.outcome {
                    self.message = Some(outcome_text(outcome));
                }
                self.replay_prompt = true;
            }
            SessionEvent::Reset => {
                self.selected_column = self.snapshot.board.columns() / 2;
                self.message = Some("New game started!".to_string());
            }
            SessionEvent::Frozen => {
                self.message = Some("Press 'r' to restart or 'q' to quit.".to_string());
            }
        }
    }
}
