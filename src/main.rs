use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, panic, path::Path, process};
use todolist::{
    config::{Config, CONFIG_FILE},
    store::TaskStore,
    task_list::TaskList,
    ui::{run_app, App},
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    init_tracing();

    if let Err(err) = run() {
        eprintln!("{}", err);
        process::exit(1);
    }
}

// Logging is opt-in via RUST_LOG so it never draws over the UI.
fn init_tracing() {
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|raw| {
            let raw = raw.trim();
            if raw.is_empty() || raw.len() > 4096 {
                return None;
            }
            EnvFilter::try_new(raw).ok()
        })
        .unwrap_or_else(|| EnvFilter::new("off"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn run() -> todolist::Result<()> {
    let config = Config::load(Path::new(CONFIG_FILE));
    let list = TaskList::open(TaskStore::new(config.data_file.clone()))?;
    let mut app = App::new(list, config.default_priority);

    // Restore before the panic message is printed, not after unwinding.
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_hook(info);
    }));

    let _guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    run_app(&mut terminal, &mut app)
}

/// Raw mode and the alternate screen, undone on drop so early returns and
/// panics still hand back a usable terminal.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}
