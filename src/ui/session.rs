//! Game worker for the terminal UI.
//!
//! The engine lives on its own thread and consumes one [`SessionCommand`] at a
//! time from a single-slot channel. Every command is answered with a
//! [`SessionUpdate`] carrying a fresh snapshot, published before the next
//! command is taken, so moves never overlap.

use std::sync::mpsc::{self, Receiver, Sender, SyncSender, TryRecvError, TrySendError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info};

use crate::error::{DriverError, GameError};
use crate::game::{Board, GameEngine, GameOutcome, Player};

/// Requests sent from the UI to the game worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Drop a disc in a zero-based column
    Drop(usize),
    /// Clear the board at any time
    Restart,
    /// Answer to the replay prompt shown after a finished game
    PlayAgain(bool),
    Quit,
}

/// Read-only view of the engine for drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub turn: Option<Player>,
    pub outcome: Option<GameOutcome>,
}

impl Snapshot {
    pub fn of(engine: &GameEngine) -> Self {
        Snapshot {
            board: engine.board_state(),
            turn: engine.turn(),
            outcome: engine.outcome(),
        }
    }
}

/// What the last command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Started,
    Moved,
    Rejected(GameError),
    /// Game just ended; the UI should offer a replay
    Finished,
    Reset,
    /// Replay declined, board stays as it ended
    Frozen,
}

/// Updates sent from the game worker to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUpdate {
    pub event: SessionEvent,
    pub snapshot: Snapshot,
}

/// Worker side of the command channel: a blocking, single-slot wait for the
/// next command. Dropping every sender cancels the wait.
pub struct MoveInput {
    commands: Receiver<SessionCommand>,
}

impl MoveInput {
    /// Block until the UI sends a command, `None` once the UI is gone
    pub fn next_command(&self) -> Option<SessionCommand> {
        self.commands.recv().ok()
    }
}

/// Create a single-slot command channel.
pub fn command_channel() -> (SyncSender<SessionCommand>, MoveInput) {
    let (tx, rx) = mpsc::sync_channel(1);
    (tx, MoveInput { commands: rx })
}

/// Apply commands to `engine` until `Quit`, cancellation, or the UI stops
/// listening. Returns the engine in its final state.
pub fn run_session(
    mut engine: GameEngine,
    input: MoveInput,
    updates: Sender<SessionUpdate>,
) -> GameEngine {
    let publish = |engine: &GameEngine, event: SessionEvent| {
        updates
            .send(SessionUpdate {
                event,
                snapshot: Snapshot::of(engine),
            })
            .is_ok()
    };

    if !publish(&engine, SessionEvent::Started) {
        return engine;
    }

    while let Some(command) = input.next_command() {
        debug!("session command {command:?}");
        let event = match command {
            SessionCommand::Drop(column) => {
                let column = isize::try_from(column).unwrap_or(isize::MAX);
                match engine.apply_move(column) {
                    Ok(()) if engine.is_game_over() => SessionEvent::Finished,
                    Ok(()) => SessionEvent::Moved,
                    Err(err) => SessionEvent::Rejected(err),
                }
            }
            SessionCommand::Restart | SessionCommand::PlayAgain(true) => {
                engine.reset();
                SessionEvent::Reset
            }
            SessionCommand::PlayAgain(false) => SessionEvent::Frozen,
            SessionCommand::Quit => break,
        };

        if !publish(&engine, event) {
            break;
        }
    }

    info!("game session finished after {} moves", engine.move_count());
    engine
}

/// UI side of a running session.
pub struct SessionHandle {
    commands: SyncSender<SessionCommand>,
    updates: Receiver<SessionUpdate>,
    worker: JoinHandle<GameEngine>,
}

impl SessionHandle {
    /// Move `engine` onto a worker thread.
    pub fn spawn(engine: GameEngine) -> Self {
        let (commands, input) = command_channel();
        let (update_tx, updates) = mpsc::channel();
        let worker = thread::spawn(move || run_session(engine, input, update_tx));
        SessionHandle {
            commands,
            updates,
            worker,
        }
    }

    /// Handle whose worker never reads commands; the caller plays the
    /// worker side through the returned input and sender.
    #[cfg(test)]
    pub(crate) fn detached(
        engine: GameEngine,
    ) -> (Self, MoveInput, Sender<SessionUpdate>) {
        let (commands, input) = command_channel();
        let (update_tx, updates) = mpsc::channel();
        let worker = thread::spawn(move || engine);
        let handle = SessionHandle {
            commands,
            updates,
            worker,
        };
        (handle, input, update_tx)
    }

    /// Queue a command without blocking. `Ok(false)` means the worker is
    /// still busy with the previous one and the command was dropped.
    pub fn submit(&self, command: SessionCommand) -> Result<bool, DriverError> {
        match self.commands.try_send(command) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(_)) => Ok(false),
            Err(TrySendError::Disconnected(_)) => Err(DriverError::Disconnected),
        }
    }

    /// Next published update, if one is waiting
    pub fn try_recv(&self) -> Result<Option<SessionUpdate>, DriverError> {
        match self.updates.try_recv() {
            Ok(update) => Ok(Some(update)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(DriverError::Disconnected),
        }
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<SessionUpdate> {
        self.updates.recv_timeout(timeout).ok()
    }

    /// Stop the worker and take the engine back.
    pub fn shutdown(self) -> Result<GameEngine, DriverError> {
        // A worker that already exited has dropped its receiver
        let _ = self.commands.send(SessionCommand::Quit);
        drop(self.commands);
        self.worker.join().map_err(|_| DriverError::Disconnected)
    }
}
