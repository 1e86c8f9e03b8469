//! Core Connect Four game logic: board representation, player types, and the
//! game engine that validates and applies moves.

mod board;
mod engine;
mod player;

pub use board::{Board, Cell, MIN_DIMENSION, WIN_LENGTH};
pub use engine::{GameEngine, GameOutcome};
pub use player::Player;
