use std::fmt;

use log::{debug, info};

use super::{Board, Player};
use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// Owns the board plus turn and outcome state for a single game.
///
/// All mutation goes through [`GameEngine::apply_move`] and
/// [`GameEngine::reset`]. A rejected move leaves the engine untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    turn: Player,
    outcome: Option<GameOutcome>,
    moves: usize,
}

impl GameEngine {
    /// Create an engine with an empty `rows` x `columns` board, Red to move
    pub fn new(rows: usize, columns: usize) -> Result<Self, GameError> {
        let board = Board::new(rows, columns)?;
        debug!("new {rows}x{columns} game");
        Ok(GameEngine {
            board,
            turn: Player::Red, // Red starts
            outcome: None,
            moves: 0,
        })
    }

    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    pub fn columns(&self) -> usize {
        self.board.columns()
    }

    /// Drop a disc for the player to move into a zero-based column.
    ///
    /// Win is checked before fullness, so the move that fills the last cell
    /// can still win. The turn only flips when the game continues.
    pub fn apply_move(&mut self, column: isize) -> Result<(), GameError> {
        if self.outcome.is_some() {
            return Err(GameError::GameOver);
        }

        let col = usize::try_from(column)
            .ok()
            .filter(|&c| c < self.columns())
            .ok_or(GameError::InvalidColumn {
                column,
                columns: self.columns(),
            })?;

        let mover = self.turn;
        let row = self.board.drop_piece(col, mover)?;
        self.moves += 1;
        debug!("move {}: {mover} -> ({row}, {col})", self.moves);

        if self.board.find_winner() == Some(mover) {
            info!("{mover} wins after {} moves", self.moves);
            self.outcome = Some(GameOutcome::Winner(mover));
        } else if self.board.is_full() {
            info!("draw after {} moves", self.moves);
            self.outcome = Some(GameOutcome::Draw);
        } else {
            self.turn = mover.other();
        }

        Ok(())
    }

    /// Player to move, or `None` once the game is over
    pub fn turn(&self) -> Option<Player> {
        if self.is_game_over() {
            None
        } else {
            Some(self.turn)
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Winner of a finished game; `None` while playing and on a draw
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            Some(GameOutcome::Winner(player)) => Some(player),
            Some(GameOutcome::Draw) | None => None,
        }
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Number of discs placed since construction or the last reset
    pub fn move_count(&self) -> usize {
        self.moves
    }

    /// Columns that still accept a disc; empty once the game is over
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_game_over() {
            return Vec::new();
        }

        (0..self.columns())
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Clear the board and start over with Red to move
    pub fn reset(&mut self) {
        self.board.clear();
        self.turn = Player::Red;
        self.outcome = None;
        self.moves = 0;
        info!("board reset");
    }

    /// Independent copy of the board for rendering
    pub fn board_state(&self) -> Board {
        self.board.clone()
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Textual board, see [`Board`]'s `Display`
    pub fn render(&self) -> String {
        self.board.to_string()
    }
}

impl fmt::Display for GameEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.board, f)
    }
}
