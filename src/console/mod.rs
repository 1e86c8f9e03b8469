//! Line-oriented console front-end: prompts on a writer, reads 1-based
//! column numbers from a reader.

mod controller;
mod view;

pub use controller::{ConsoleController, SessionEnd};
pub use view::ConsoleView;
