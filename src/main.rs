mod app;
mod console;
mod export;
mod form;
mod input;
mod lang;
mod rendering;
mod security;
mod seed;
mod store;
mod sync;
mod types;

use std::env;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::store::FileStore;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    let mut data_dir: Option<PathBuf> = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-V" | "--version" => {
                println!("nodepilot {}", types::VERSION);
                return Ok(());
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            "--data-dir" if i + 1 < args.len() => {
                data_dir = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            other => {
                eprintln!("nodepilot: unknown argument: {}", other);
                eprintln!("Run 'nodepilot --help' for usage information.");
                return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("unknown argument: {}", other)));
            }
        }
    }
    let data_dir = data_dir.unwrap_or_else(FileStore::default_dir);
    std::fs::create_dir_all(&data_dir)?;
    init_tracing(&data_dir);

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app::run(&mut terminal, data_dir);

    // Terminal cleanup: always runs, even on error. Reset SGR attributes
    // BEFORE leaving the alternate screen: SGR state is global and not
    // restored by the alternate-screen save/restore mechanism, so the last
    // frame's colors would otherwise bleed into the main screen.
    let _ = disable_raw_mode();
    let out = terminal.backend_mut();
    let _ = execute!(out, crossterm::style::Print("\x1b[0m"));
    let _ = execute!(out, LeaveAlternateScreen);
    let _ = terminal.show_cursor();
    result
}

fn print_usage() {
    println!("nodepilot {}", types::VERSION);
    println!("Terminal dashboard for tracking infrastructure nodes, wallets and airdrops.");
    println!();
    println!("USAGE:");
    println!("    nodepilot [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --data-dir <DIR>    Store data under DIR instead of ~/.nodepilot");
    println!("    -V, --version       Print version");
    println!("    -h, --help          Print this help");
}

/// Log to a file inside the data directory; the terminal belongs to the UI.
/// RUST_LOG overrides the default info level.
fn init_tracing(dir: &Path) {
    let Ok(log_file) = File::create(dir.join("nodepilot.log")) else { return };
    let env_filter = EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());
    let fmt_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .init();
}
