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

//! Application event loop and input routing.
//!
//! One event is processed to completion before the next is accepted. Key
//! events are offered to the command line first, then to the feature modules
//! (so the active modal session can interpret them), and finally to the
//! global key bindings. Events that nobody claims are a no-op.

use std::io::Stdout;

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{Terminal, prelude::CrosstermBackend};
use tracing::debug;

use crate::{
    App,
    commander::CommanderAction,
    modules::ModuleEvent,
    render::draw,
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    Tick,

    ExitApplication,
}

/// Runs the main application loop, handling events and rendering the UI in
/// the terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        match event {
            AppEvent::Key(key) => process_key_event(app, key)?,
            AppEvent::Tick => {}
            AppEvent::ExitApplication => break,
        }

        // Commands may have queued module events (a recorded move, say);
        // deliver them before the next input is accepted.
        while let Some(module_event) = app.shell.take_pending_event() {
            app.router.broadcast_event(&mut app.shell, &module_event);
        }

        if app.shell.quit_requested {
            break;
        }

        terminal.draw(|f| draw(f, app))?;
    }
    Ok(())
}

/// Routes one key event through the input layers.
///
/// The command line has first claim on every key. After that the key is
/// broadcast to the modules, where only the active modal session reacts.
/// Keys that survive both layers fall through to the global bindings.
fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match app.commander.handle_event(Event::Key(key)) {
        CommanderAction::Submitted(line) => {
            if let Some(outcome) = app.router.handle(&mut app.shell, &line) {
                debug!(
                    command = %line,
                    text = %outcome.text,
                    show_board = outcome.show_board,
                    "command dispatched"
                );
            }
            return Ok(());
        }
        CommanderAction::Consumed => return Ok(()),
        CommanderAction::Ignored => {}
    }

    let module_event = ModuleEvent::Key(key);
    if app.router.broadcast_event(&mut app.shell, &module_event).is_some() {
        return Ok(());
    }

    process_global_key_event(app, key)
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => {
            app.event_tx.send(AppEvent::ExitApplication)?;
        }

        code => {
            app.router.handle_shortcut(&mut app.shell, code);
        }
    }

    Ok(())
}
