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

//! Shared shell session state.
//!
//! The [`Shell`] is the single mutable state structure passed to every
//! command handler: the live game, the active settings, the player agents,
//! the help registry and the modal-session bookkeeping. Feature modules never
//! talk to each other directly; they communicate by mutating the shell and by
//! emitting [`ModuleEvent`]s through it.
//!
//! # Modal sessions
//!
//! A modal session is entered with [`Shell::begin_session`], which snapshots
//! the caller's game and claims input focus, and left with
//! [`Shell::end_session`], which restores the snapshot and releases focus.
//! At most one session may be active at a time; claiming focus while another
//! session holds it is a caller bug and trips an assertion.

pub(crate) mod help;

use std::collections::VecDeque;

use crate::{
    model::{Game, Settings, agents::Agent},
    modules::ModuleEvent,
    shell::help::HelpRegistry,
};

/// Module identifier used for active play (no modal session owns input).
pub(crate) const PLAY_MODULE: &str = "game";

/// A display instruction produced by a command or event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Outcome {
    pub(crate) text: String,
    pub(crate) show_board: bool,
}

/// Immutable snapshot of the caller state a modal session must restore.
///
/// Constructed once at session entry and consumed exactly once at exit.
#[derive(Debug)]
struct SessionSnapshot {
    game: Game,
}

pub(crate) struct Shell {
    pub(crate) settings: Settings,
    pub(crate) game: Option<Game>,
    pub(crate) player0_agent: Option<Agent>,
    pub(crate) player1_agent: Option<Agent>,
    pub(crate) help: HelpRegistry,

    pub(crate) output_text: String,
    pub(crate) show_board: bool,
    pub(crate) quit_requested: bool,

    active_module: Option<String>,
    snapshot: Option<SessionSnapshot>,
    pending_events: VecDeque<ModuleEvent>,
}

impl Shell {
    pub(crate) fn new(settings: Settings) -> Self {
        Self {
            settings,
            game: None,
            player0_agent: None,
            player1_agent: None,
            help: HelpRegistry::new(),
            output_text: String::new(),
            show_board: true,
            quit_requested: false,
            active_module: None,
            snapshot: None,
            pending_events: VecDeque::new(),
        }
    }

    pub(crate) fn active_module(&self) -> Option<&str> {
        self.active_module.as_deref()
    }

    /// Whether the module with the given identifier currently owns input.
    pub(crate) fn is_active(&self, module_id: &str) -> bool {
        self.active_module.as_deref() == Some(module_id)
    }

    /// Enters a modal session: snapshots the current game and claims input
    /// focus for `module_id`.
    ///
    /// Active play is not a modal session, so a session may be entered while
    /// [`PLAY_MODULE`] holds focus; the live game is snapshotted as usual.
    /// Re-entering the session that already holds focus is a no-op and keeps
    /// the original snapshot.
    ///
    /// # Panics
    ///
    /// Panics if a different modal session is already active.
    pub(crate) fn begin_session(&mut self, module_id: &str) {
        let active = self.active_module.as_deref();
        assert!(
            active.is_none_or(|active| active == module_id || active == PLAY_MODULE),
            "modal session '{module_id}' entered while '{}' is active",
            active.unwrap_or_default(),
        );

        if active != Some(module_id) {
            self.snapshot = self.game.clone().map(|game| SessionSnapshot { game });
            self.active_module = Some(module_id.to_string());
        }
    }

    /// Leaves the current modal session, restoring the game snapshot taken at
    /// entry (if the caller had a game then) and releasing input focus.
    pub(crate) fn end_session(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.game = Some(snapshot.game);
        }
        self.active_module = None;
    }

    /// Leaves the current modal session *without* restoring the snapshot and
    /// hands input focus to active play.
    ///
    /// Used by resume-from-history, where the browsed state deliberately
    /// replaces the caller's previous game.
    pub(crate) fn resume_play(&mut self) {
        self.snapshot = None;
        self.active_module = Some(PLAY_MODULE.to_string());
    }

    /// Stores and returns the display instruction for the last command.
    pub(crate) fn update_output(
        &mut self,
        text: impl Into<String>,
        show_board: bool,
    ) -> Outcome {
        self.output_text = text.into();
        self.show_board = show_board;
        Outcome {
            text: self.output_text.clone(),
            show_board,
        }
    }

    /// Queues a module event for broadcast after the current dispatch.
    pub(crate) fn emit(&mut self, event: ModuleEvent) {
        self.pending_events.push_back(event);
    }

    pub(crate) fn take_pending_event(&mut self) -> Option<ModuleEvent> {
        self.pending_events.pop_front()
    }
}
