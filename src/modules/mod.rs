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

//! Feature modules and the contract they implement.
//!
//! A module is a self-contained feature unit: it exports its command names,
//! keyboard shortcuts and help entries once at startup via
//! [`Module::register`], and afterwards receives command invocations and raw
//! input events from the router. Modules that implement a modal session
//! additionally claim input focus through the shell (see [`crate::shell`]).
//!
//! Membership is resolved at compile time by [`builtin_modules`] rather than
//! by scanning for plugins; adding a feature means adding a constructor to
//! that list.

pub(crate) mod game;
pub(crate) mod help;
pub(crate) mod history;
pub(crate) mod tutor;

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};

use crate::shell::{Outcome, Shell};

/// Registration metadata exported by a module.
///
/// Pure data: commands name what [`Module::command`] will accept, shortcuts
/// bind a key directly to one of those commands, and help entries feed the
/// shell's help registry.
pub(crate) struct CommandSet {
    pub(crate) commands: Vec<&'static str>,
    pub(crate) shortcuts: Vec<(KeyCode, &'static str)>,
    pub(crate) help: Vec<(&'static str, &'static str)>,
}

/// An input event delivered to every module.
#[derive(Debug, Clone)]
pub(crate) enum ModuleEvent {
    /// The game layer recorded a state transition. The history module reacts
    /// to this regardless of which module is active.
    GameRecorded {
        match_ref: String,
        game_id: String,
        message: String,
    },
    /// A raw key press. Only the active modal session may interpret it.
    Key(KeyEvent),
}

pub(crate) trait Module {
    /// Category label partitioning this module's commands into their own
    /// namespace layer. Compared case-insensitively.
    fn category(&self) -> &'static str {
        "General"
    }

    /// Exports the module's command table, shortcut table and help entries.
    /// Must not perform I/O beyond constructing the tables.
    fn register(&self) -> CommandSet;

    /// Executes one registered command. `name` is always lower-cased and one
    /// of the names exported by [`Module::register`].
    fn command(&mut self, shell: &mut Shell, name: &str, args: &[&str]) -> Option<Outcome>;

    /// Handles a raw input event. Called for every event regardless of which
    /// module is active; implementations must check focus themselves.
    fn handle_event(&mut self, _shell: &mut Shell, _event: &ModuleEvent) -> Option<Outcome> {
        None
    }
}

/// The static module registry.
///
/// Modules are loaded in this order; the router's merge rules (first-wins
/// global fallback, last-wins per category) make the order observable, so it
/// is part of the application's behavior.
pub(crate) fn builtin_modules(history_path: PathBuf) -> Vec<Box<dyn Module>> {
    vec![
        Box::new(help::HelpModule::new()),
        Box::new(game::GameModule::new()),
        Box::new(history::HistoryManager::new(history_path)),
        Box::new(tutor::TutorManager::new()),
    ]
}

#[cfg(test)]
mod tests {
    //! End-to-end dispatch through the builtin registry: every command line
    //! goes through [`crate::router::CommandRouter::handle`] exactly as typed
    //! input would.

    use super::*;
    use crate::{model::Settings, router::CommandRouter, shell::Shell};
    use tempfile::TempDir;

    fn session() -> (CommandRouter, Shell, TempDir) {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut shell = Shell::new(Settings::default());
        let modules = builtin_modules(dir.path().join("match_history.json"));
        let router = CommandRouter::new(modules, &mut shell);
        (router, shell, dir)
    }

    fn drain_events(router: &mut CommandRouter, shell: &mut Shell) {
        while let Some(event) = shell.take_pending_event() {
            router.broadcast_event(shell, &event);
        }
    }

    #[test]
    fn help_menu_lists_every_builtin_category() {
        let (mut router, mut shell, _dir) = session();
        let outcome = router.handle(&mut shell, "help").expect("menu");
        for category in ["[general]", "[game]", "[history]", "[tutor]"] {
            assert!(outcome.text.contains(category), "missing {category}");
        }
    }

    #[test]
    fn exit_is_shadowed_by_the_active_session() {
        let (mut router, mut shell, _dir) = session();

        // Outside any session the global (first-registered) exit answers.
        let global = router.handle(&mut shell, "exit").expect("message");
        assert_eq!(global.text, "Exited to shell.");

        // Inside history mode the history module's exit answers instead.
        router.handle(&mut shell, "history");
        assert!(shell.is_active("history"));
        let shadowed = router.handle(&mut shell, "exit").expect("message");
        assert_eq!(shadowed.text, "");
        assert!(shell.active_module().is_none());
    }

    #[test]
    fn new_game_is_recorded_and_browsable() {
        let (mut router, mut shell, _dir) = session();

        router.handle(&mut shell, "new");
        drain_events(&mut router, &mut shell);
        assert!(shell.is_active("game"));

        let outcome = router.handle(&mut shell, "history").expect("view");
        assert!(outcome.text.contains("(Moves: 1)"));
        assert!(outcome.text.contains(">  1. Match started"));
        assert!(shell.is_active("history"));
    }

    #[test]
    fn play_from_history_returns_to_active_play() {
        let (mut router, mut shell, _dir) = session();

        router.handle(&mut shell, "NEW");
        drain_events(&mut router, &mut shell);
        router.handle(&mut shell, "history");

        let outcome = router.handle(&mut shell, "play").expect("message");
        assert_eq!(outcome.text, "Resumed play from history.");
        assert!(shell.is_active("game"));
        assert!(shell.game.is_some());
    }

    #[test]
    fn history_survives_a_restart() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("match_history.json");

        let mut shell = Shell::new(Settings::default());
        let mut router = CommandRouter::new(builtin_modules(path.clone()), &mut shell);
        router.handle(&mut shell, "new");
        drain_events(&mut router, &mut shell);

        // A second session over the same file sees the recorded match.
        let mut shell = Shell::new(Settings::default());
        let mut router = CommandRouter::new(builtin_modules(path), &mut shell);
        let outcome = router.handle(&mut shell, "history").expect("view");
        assert!(outcome.text.contains("(Moves: 1)"));
    }

    #[test]
    fn quit_requests_shutdown_without_output() {
        let (mut router, mut shell, _dir) = session();
        assert!(router.handle(&mut shell, "quit").is_none());
        assert!(shell.quit_requested);
    }
}
