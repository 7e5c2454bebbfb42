// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Backgammon Shell TUI.
//!
//! A terminal-based backgammon match shell with a command-driven interface.
//!
//! Commands are typed on a `:`-activated command line and dispatched through
//! a layered namespace: the module that currently holds input focus (a modal
//! session such as history browsing) resolves command names first, and the
//! global namespace acts as a fallback.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Input and tick
//! events are delivered to the main thread over `std::sync::mpsc` channels
//! and processed one at a time.

mod commander;
mod config;
mod events;
mod model;
mod modules;
mod render;
mod router;
mod shell;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    fs::File,
    io::{self},
    sync::{
        Arc,
        mpsc::{self, Receiver, Sender},
    },
    thread,
    time::Duration,
};
use tracing_subscriber::EnvFilter;

use crate::{
    commander::Commander,
    config::AppConfig,
    events::{AppEvent, process_events},
    modules::builtin_modules,
    router::CommandRouter,
    shell::Shell,
    theme::Theme,
};

/// Application state.
struct App {
    pub theme: Theme,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub shell: Shell,
    pub router: CommandRouter,

    pub commander: Commander,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        let mut shell = Shell::new(config.settings.clone());
        let modules = builtin_modules(config::history_path(&config));
        let router = CommandRouter::new(modules, &mut shell);

        Self {
            theme: Theme::default(),
            event_tx,
            event_rx,
            shell,
            router,
            commander: Commander::new(),
        }
    }
}

/// The entry point of the application.
///
/// Loads the configuration, initializes the application state, manages the
/// terminal lifecycle, and returns an error if any part of the execution
/// fails.
fn main() -> Result<()> {
    init_logging().context("Failed to initialise logging")?;

    let config = config::load_config();

    let mut app = App::new(config);

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Initialises the tracing subscriber.
///
/// Log lines go to a file next to the configuration file rather than to the
/// terminal, which the TUI owns. The filter defaults to `info` and can be
/// overridden with the standard `RUST_LOG` environment variable.
fn init_logging() -> Result<()> {
    let file = File::create(config::log_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    util::term::set_background(&theme::Theme::to_hex(app.theme.background_colour));

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background color.
/// It also ensures the cursor is made visible again.
///
/// This function is designed to be "best-effort" and does not return a result,
/// as it is typically called during cleanup or panic handling.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_background();
    terminal.show_cursor().ok();
}

/// Starts the application's background threads and enters the main event
/// loop.
///
/// This function spawns two long-running background threads:
/// * An input thread to poll for system keyboard events.
/// * A tick thread to trigger periodic UI refreshes.
///
/// After spawning them, it hands control to [`process_events`] to manage the
/// UI and state updates.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                tx_keys.send(AppEvent::Key(key)).ok();
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let _ = tx_tick.send(AppEvent::Tick);
            thread::sleep(Duration::from_millis(250));
        }
    });

    app.shell
        .update_output("Type :help for a list of commands.", true);
    terminal.draw(|f| render::draw(f, app))?;

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
