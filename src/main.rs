use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use connect_four::config::{AppConfig, FrontendKind};
use connect_four::console::ConsoleController;
use connect_four::game::GameEngine;
use connect_four::ui::App;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

/// Play Connect Four on the console or in a terminal UI.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect-four.toml")]
    config: PathBuf,

    /// Override number of board rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override number of board columns
    #[arg(long)]
    columns: Option<usize>,

    /// Use the terminal UI instead of the line-based console
    #[arg(long)]
    tui: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(rows) = cli.rows {
        config.board.rows = rows;
    }
    if let Some(columns) = cli.columns {
        config.board.columns = columns;
    }
    if cli.tui {
        config.frontend.kind = FrontendKind::Tui;
    }
    config.validate().context("invalid configuration")?;

    let engine = GameEngine::new(config.board.rows, config.board.columns)
        .context("creating game")?;

    match config.frontend.kind {
        FrontendKind::Console => run_console(engine),
        FrontendKind::Tui => run_tui(engine),
    }
}

fn run_console(mut engine: GameEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut controller = ConsoleController::new(stdin.lock(), io::stdout());
    let end = controller
        .play_game(&mut engine)
        .context("running console game")?;
    log::info!("console session ended: {end:?}");
    Ok(())
}

fn run_tui(engine: GameEngine) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    let res = App::new(engine).run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    let engine = res.context("running terminal UI")?;
    log::info!("terminal session ended after {} moves", engine.move_count());
    Ok(())
}
