//! # Connect Four
//!
//! A two-player Connect Four game. The engine is front-end agnostic; a
//! line-oriented console driver and a Ratatui terminal UI sit on top of it.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, engine
//! - [`console`] — Text protocol driver (1-based columns, `0` quits)
//! - [`ui`] — Terminal UI with a worker-thread game session
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod console;
pub mod error;
pub mod game;
pub mod ui;
