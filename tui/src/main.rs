//! Tutor TUI Entry Point
//!
//! Launches ARIA, the floating tutor widget, in the terminal.
//!
//! Usage:
//!   tutor-tui
//!
//! Timing is configured through `TUTOR_*` environment variables. Logs go to
//! `TUTOR_LOG_FILE` (default `tutor-tui.log`), filtered by `RUST_LOG`.

use std::fs::File;
use std::io;
use std::panic;
use std::sync::Mutex;

use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tutor_core::WidgetConfig;
use tutor_tui::App;

const DEFAULT_LOG_FILE: &str = "tutor-tui.log";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log to a file; stdout belongs to the alternate screen
    let log_path = std::env::var("TUTOR_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.into());
    let log_file =
        File::create(&log_path).with_context(|| format!("cannot create log file {log_path}"))?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: tutor-tui requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  • Running in a non-interactive environment (CI, container)");
        eprintln!("  • SSH without -t flag");
        eprintln!("  • Piped stdin/stdout");
        std::process::exit(1);
    }

    let config = WidgetConfig::from_env();
    config.validate().context("invalid TUTOR_* configuration")?;

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: WidgetConfig,
) -> anyhow::Result<()> {
    let mut app = App::new(config)?;
    app.run(terminal).await
}
