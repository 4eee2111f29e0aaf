//! Boxmodel TUI - the launcher window in a terminal.
//!
//! Runs the launcher core over a tokio query engine with two handlers
//! (executables on `PATH`, web search fallback) and draws its view with
//! ratatui. The process lives as long as the window is shown.

use anyhow::Result;
use boxmodel_core::config::{Config, Directories};
use boxmodel_core::engine::{EngineMessage, Handler, QueryEngine};
use boxmodel_core::Launcher;
use clap::Parser;
use crossterm::{
    event::{
        DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
        EnableFocusChange, EnableMouseCapture, Event, EventStream, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use futures_util::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod app;
mod cli;
mod colors;
mod keys;
mod render;
mod sources;

use app::App;
use cli::Cli;
use sources::{PathHandler, WebSearchHandler};

const SYNOPSIS: &str = "Type to search programs or the web";

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

fn setup_logging(debug_flag: bool) {
    let level = if debug_flag || cfg!(debug_assertions) {
        "debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_filename = format!("boxmodel-tui-{timestamp}.log");
    let log_path = std::path::Path::new("/tmp").join(&log_filename);

    let symlink_path = std::path::Path::new("/tmp/boxmodel-tui.log");
    let _ = std::fs::remove_file(symlink_path);
    let _ = std::os::unix::fs::symlink(&log_path, symlink_path);

    let file_appender = tracing_appender::rolling::never("/tmp", &log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    std::mem::forget(guard);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    let config_file = match cli.config {
        Some(path) => path,
        None => Directories::new()?.config_file,
    };
    let mut config = Config::load(&config_file)?;
    info!("Loaded config from {}", config_file.display());
    if let Some(key) = cli.mod_fallback {
        config.window.mod_fallback = key;
    }
    if let Some(key) = cli.mod_actions {
        config.window.mod_actions = key;
    }
    config.window.validate()?;

    let path_handler = PathHandler::from_env();
    info!("Indexed {} programs", path_handler.count());
    let handlers: Vec<Arc<dyn Handler>> = vec![
        Arc::new(path_handler),
        Arc::new(WebSearchHandler::new(config.web.engine_base_url.clone())),
    ];
    let (engine, engine_rx) = QueryEngine::new(Handle::current(), handlers, SYNOPSIS);

    let mut launcher = Launcher::new(&config.window, engine);
    if let Some(text) = &cli.input {
        launcher.set_input(text);
    }

    if run_tui(launcher, engine_rx).await? {
        println!("Settings: {}", config_file.display());
    }

    Ok(())
}

/// Show the launcher until it hides. Returns whether settings were requested.
async fn run_tui(
    launcher: Launcher<QueryEngine>,
    engine_rx: UnboundedReceiver<EngineMessage>,
) -> Result<bool> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        EnableBracketedPaste
    )?;

    // Modifier presses and key releases only arrive with the kitty protocol
    let keyboard_enhanced = matches!(supports_keyboard_enhancement(), Ok(true))
        && execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
            )
        )
        .is_ok();
    if !keyboard_enhanced {
        warn!("Terminal does not report modifier keys, fallback and actions triggers disabled");
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(launcher);
    app.launcher.set_visible(true);

    let result = event_loop(&mut terminal, &mut app, engine_rx).await;

    if keyboard_enhanced {
        let _ = execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result?;
    Ok(app.launcher.take_settings_request())
}

async fn event_loop(
    terminal: &mut Tui,
    app: &mut App,
    mut engine_rx: UnboundedReceiver<EngineMessage>,
) -> Result<()> {
    let mut event_stream = EventStream::new();
    let mut needs_render = true;

    while app.launcher.is_visible() {
        if needs_render {
            terminal.draw(|f| render::render_ui(f, app, Instant::now()))?;
            needs_render = false;
        }

        let deadline = app.launcher.next_deadline(Instant::now());
        let sleep = tokio::time::sleep_until(
            deadline.map_or_else(tokio::time::Instant::now, tokio::time::Instant::from_std),
        );

        tokio::select! {
            Some(message) = engine_rx.recv() => {
                app.launcher.on_query_update(message.generation, message.update);
                needs_render = true;
            }

            Some(event_result) = event_stream.next() => {
                let event = match event_result {
                    Ok(e) => e,
                    Err(e) => {
                        tracing::error!("Event stream error: {}", e);
                        continue;
                    }
                };

                match event {
                    Event::Key(key) => app.handle_key(&key),
                    Event::Mouse(mouse) => app.handle_mouse(mouse),
                    Event::Paste(text) => app.paste(&text),
                    Event::FocusLost => app.launcher.focus_lost(),
                    Event::FocusGained | Event::Resize(..) => {}
                }
                needs_render = true;
            }

            () = sleep, if deadline.is_some() => {
                app.tick(Instant::now());
                needs_render = true;
            }

            else => break,
        }
    }

    Ok(())
}
