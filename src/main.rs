mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;

use panedit_app::App;
use panedit_config::Config;
use panedit_core::Command;
use panedit_logger as logger;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "panedit", version, about = "Terminal file editor with tabs and markdown preview")]
struct Args {
    /// Directory to browse, or a file to open (its directory is browsed).
    /// Defaults to the current directory.
    path: Option<PathBuf>,
    /// Configuration file (defaults to the XDG config location)
    #[arg(long = "config")]
    config: Option<PathBuf>,
}

/// Tree root and optional file to open, from the PATH argument.
fn resolve_start(path: Option<PathBuf>) -> Result<(PathBuf, Option<PathBuf>)> {
    let path = match path {
        Some(path) => path,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };
    let path = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if path.is_dir() {
        return Ok((path, None));
    }
    let root = path
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/"));
    Ok((root, Some(path)))
}

fn load_config(path: Option<&PathBuf>) -> Config {
    let loaded = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    loaded.unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config: {:#}. Using defaults.", e);
        Config::default()
    })
}

fn main() -> Result<()> {
    let args = Args::parse();
    let (root, file) = resolve_start(args.path)?;
    let config = load_config(args.config.as_ref());

    App::init_logging(&config);
    let mut app = App::new(config, &root);
    if let Some(file) = file {
        app.execute(Command::OpenFile(file));
    }

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal, ui::render);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        logger::error(format!("Fatal: {:#}", err));
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
