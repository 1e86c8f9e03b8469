use std::io::{self, Write};

use crate::error::GameError;
use crate::game::Player;

/// Writes the console protocol's prompts and messages.
pub struct ConsoleView<W: Write> {
    out: W,
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        ConsoleView { out }
    }

    /// Board text followed by a blank line
    pub fn display_game_state(&mut self, board: &str) -> io::Result<()> {
        writeln!(self.out, "{board}")
    }

    pub fn display_player_turn(&mut self, player: Player) -> io::Result<()> {
        writeln!(self.out, "Player {}, make your move: ", player.name())
    }

    pub fn ask_for_move(&mut self) -> io::Result<()> {
        writeln!(self.out, "Enter a column number to make a move: ")?;
        self.out.flush()
    }

    /// Move rejected by the engine. `choice` is the 1-based column as typed.
    pub fn display_invalid_number(&mut self, choice: isize, err: &GameError) -> io::Result<()> {
        match err {
            GameError::InvalidColumn { columns, .. } => writeln!(
                self.out,
                "Not a valid number: Invalid column {choice} (expected 1..={columns})"
            ),
            GameError::ColumnFull { .. } => {
                writeln!(self.out, "Not a valid number: Column full: {choice}")
            }
            GameError::GameOver | GameError::Configuration { .. } => {
                writeln!(self.out, "Not a valid number: {err}")
            }
        }
    }

    /// Token that is not an integer
    pub fn display_invalid_input(&mut self) -> io::Result<()> {
        writeln!(self.out, "Invalid input. Please enter a valid number.")
    }

    pub fn display_game_quit(&mut self, board: &str) -> io::Result<()> {
        writeln!(self.out, "Game quit! Ending game state:\n{board}")
    }

    pub fn display_game_over(&mut self, winner: Option<Player>) -> io::Result<()> {
        match winner {
            Some(player) => writeln!(self.out, "Game over! {} is the winner!", player.name()),
            None => writeln!(self.out, "Game over! It's a tie!"),
        }
    }

    pub fn ask_play_again(&mut self) -> io::Result<()> {
        writeln!(self.out, "Do you want to play again? (yes/no)")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
