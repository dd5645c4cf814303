mod animation;
mod app;
mod audio;
mod color;
mod config;
mod error;
mod event;
mod input;
mod ui;

use std::io;
use std::path::Path;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use crate::animation::Display;
use crate::app::App;
use crate::config::CliArgs;
use crate::error::IntroError;
use crate::event::{Event, EventHandler};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CliArgs::parse();

    if cli.print_default_config {
        print!("{}", config::default_config_toml());
        return Ok(());
    }

    // Initialize color-eyre with custom panic hook that restores terminal
    install_panic_hook();

    let config::Loaded { config, created } = config::load(&cli)?;

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(cli.log.as_deref(), &config.general.log_level)?;

    info!("logo-intro starting");
    if let Some(path) = created {
        info!("Created default config at {}", path.display());
    }

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| IntroError::Terminal(format!("Failed to enable raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    terminal.hide_cursor()?;

    let size = terminal.size()?;
    let display = Display::from_terminal(size.width, size.height);

    let tick_rate = config.tick_rate();
    let audio = audio::sink(config.display.sound);
    let mut app = match App::new(config, display, audio) {
        Ok(app) => app,
        Err(e) => {
            restore_terminal(&mut terminal)?;
            return Err(e).wrap_err("Failed to initialize the intro");
        }
    };

    let mut event_handler = EventHandler::new(tick_rate);

    // ── Main event loop ───────────────────────────────────────────────
    // One logic step and one render per tick, strictly alternating.
    while let Some(event) = event_handler.next().await {
        let render = matches!(event, Event::Tick);
        app.handle_event(event);

        if app.should_quit {
            break;
        }
        if render {
            terminal.draw(|f| ui::draw(f, &mut app))?;
        }
    }
    event_handler.stop();

    restore_terminal(&mut terminal)?;

    info!("logo-intro exiting");
    Ok(())
}

/// Leave the alternate screen and give the cursor back
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call default handler
        default_hook(panic_info);
    }));
    color_eyre::install().ok();
}

/// Initialize tracing to a log file
fn init_logging(log_path: Option<&Path>, level: &str) -> Result<Option<WorkerGuard>> {
    use tracing_subscriber::EnvFilter;

    let Some(path) = log_path else {
        // No logging if no log path specified (can't log to stdout in a TUI)
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("off"))
            .with_writer(io::sink)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| IntroError::Config(format!("Invalid log path: {}", path.display())))?;
    std::fs::create_dir_all(dir)
        .wrap_err_with(|| format!("Failed to create log directory: {}", dir.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}
