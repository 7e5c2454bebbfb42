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

//! Active-play entry point.
//!
//! The rules engine itself lives elsewhere; this module only starts a fresh
//! game from the current settings and announces the opening state so that
//! history recording begins. It is deliberately the thinnest of the modules.

use chrono::Local;

use crate::{
    model::{Game, PlayerSlot, Variant, agents::create_agent},
    modules::{CommandSet, Module, ModuleEvent},
    shell::{Outcome, Shell},
};

pub(crate) struct GameModule;

impl GameModule {
    pub(crate) fn new() -> Self {
        Self
    }

    /// Starts a new game from the shell settings and records the opening
    /// position.
    fn cmd_new(&mut self, shell: &mut Shell) -> Option<Outcome> {
        if let Some(active) = shell.active_module()
            && active != crate::shell::PLAY_MODULE
        {
            return Some(shell.update_output(
                format!("Leave {active} mode before starting a new game."),
                false,
            ));
        }

        let settings = shell.settings.clone();
        let mut game = Game::new(Variant::from_name(&settings.variant));
        game.match_state.length = if settings.game_mode == "match" {
            settings.match_length
        } else {
            0
        };
        game.auto_doubles = settings.autodoubles;
        game.jacoby = settings.jacoby;

        let match_ref = format!("match-{}", Local::now().format("%Y%m%d%H%M%S%3f"));
        game.game_ref = Some(match_ref.clone());

        shell.player0_agent = Some(create_agent(&settings.player_agent, PlayerSlot::Zero, &game));
        shell.player1_agent = Some(create_agent(
            &settings.opponent_agent,
            PlayerSlot::One,
            &game,
        ));

        let game_id = game.state_code();
        shell.game = Some(game);
        shell.resume_play();
        shell.emit(ModuleEvent::GameRecorded {
            match_ref,
            game_id,
            message: "Match started".to_string(),
        });

        Some(shell.update_output("New game started.", true))
    }
}

impl Module for GameModule {
    fn category(&self) -> &'static str {
        "Game"
    }

    fn register(&self) -> CommandSet {
        CommandSet {
            commands: vec!["new"],
            shortcuts: vec![],
            help: vec![("new", "Start a new game with the current settings.")],
        }
    }

    fn command(&mut self, shell: &mut Shell, name: &str, _args: &[&str]) -> Option<Outcome> {
        match name {
            "new" => self.cmd_new(shell),
            _ => None,
        }
    }
}
