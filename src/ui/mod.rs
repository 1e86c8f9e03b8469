//! Terminal UI: a board view driven by a game session running on a worker
//! thread.

mod app;
pub mod board_widget;
mod game_view;
pub mod session;

pub use app::App;
