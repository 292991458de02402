//! `TaskDesk`: terminal client for a task-management API.
//!
//! Configuration via CLI flags, environment variables, or config file
//! (`~/.config/taskdesk/config.toml`).
//!
//! ```bash
//! # Against the default API (http://localhost:4000/api)
//! cargo run --bin taskdesk
//!
//! # Against the in-memory mock
//! cargo run --bin taskdesk-mock-api -- --bind 127.0.0.1:4000
//! cargo run --bin taskdesk -- --api-url http://127.0.0.1:4000/api
//! ```

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing_appender::non_blocking::WorkerGuard;

use taskdesk::app::App;
use taskdesk::config::{CliArgs, ClientConfig};
use taskdesk::context::AppContext;
use taskdesk::dispatch::{self, Command};
use taskdesk::notify::Toast;
use taskdesk::storage::{FileStore, KeyValueStore, MemoryStore};
use taskdesk::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Before raw mode, so config and startup problems are still captured.
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!(api = %config.base_url, "taskdesk starting");

    let storage = open_storage(&config);
    let (ctx, toasts) = match AppContext::new(&config.api_settings(), storage) {
        Ok(parts) => parts,
        Err(e) => {
            eprintln!("Error creating HTTP client: {e}");
            std::process::exit(1);
        }
    };
    let ctx = Arc::new(ctx);

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, ctx, toasts, &config).await;

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskdesk exiting");
    result
}

/// Sends `tracing` output to `file_path` (default `$TMPDIR/taskdesk.log`).
///
/// The terminal belongs to ratatui, so nothing is logged to stdout. Keep the
/// returned guard alive until exit or buffered lines are lost.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskdesk.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Opens the configured storage file, falling back to memory.
fn open_storage(config: &ClientConfig) -> Arc<dyn KeyValueStore> {
    let Some(path) = &config.storage_path else {
        tracing::warn!("no data directory, credentials will not persist");
        return Arc::new(MemoryStore::new());
    };
    match FileStore::open(path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "storage unavailable, credentials will not persist");
            Arc::new(MemoryStore::new())
        }
    }
}

/// Main application loop.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ctx: Arc<AppContext>,
    mut toasts: mpsc::UnboundedReceiver<Toast>,
    config: &ClientConfig,
) -> io::Result<()> {
    let mut app = App::new().with_date_format(config.date_format.clone());
    let (cmd_tx, mut evt_rx) =
        dispatch::spawn_dispatcher(Arc::clone(&ctx), dispatch::DEFAULT_CHANNEL_CAPACITY);

    // Guards redirect the start screen; a restored session lands on Home.
    if let Some(cmd) = app.navigate(config.start_route, ctx.session.is_authenticated()) {
        send(&cmd_tx, cmd);
    }

    loop {
        // Draw
        terminal.draw(|frame| ui::draw(frame, &app, &ctx))?;
        app.tick();

        // Dispatcher results and toasts
        while let Ok(event) = evt_rx.try_recv() {
            if let Some(cmd) = app.apply_event(event, ctx.session.is_authenticated()) {
                send(&cmd_tx, cmd);
            }
        }
        while let Ok(toast) = toasts.try_recv() {
            app.push_toast(toast);
        }
        app.expire_toasts(Instant::now(), config.toast_ttl);

        // The session may have changed under the current screen.
        if let Some(cmd) = app.enforce_guard(ctx.session.is_authenticated()) {
            send(&cmd_tx, cmd);
        }

        // Input
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if let Some(cmd) = app.handle_key_event(key, ctx.session.is_authenticated()) {
                send(&cmd_tx, cmd);
            }
        }

        if app.should_quit {
            let _ = cmd_tx.try_send(Command::Shutdown);
            return Ok(());
        }
    }
}

fn send(tx: &mpsc::Sender<Command>, cmd: Command) {
    if let Err(e) = tx.try_send(cmd) {
        tracing::warn!(error = %e, "command dropped");
    }
}
