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

//! Move-hint tutoring.
//!
//! The tutor is the second concrete modal session: `hint` evaluates the
//! candidate plays for the position on roll and opens a browsable, ranked
//! list. Up/Down move the selection, Esc leaves the session and restores the
//! caller's game view. Evaluation itself is delegated to the agent layer.

use crossterm::event::KeyCode;

use crate::{
    model::{GameState, Play, agents::create_agent},
    modules::{CommandSet, Module, ModuleEvent},
    shell::{Outcome, Shell},
};

const MODULE_ID: &str = "tutor";

/// Upper bound on the number of ranked plays offered for browsing.
const MAX_HINTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TutorMode {
    Off,
    Tutor,
}

impl TutorMode {
    fn name(&self) -> &'static str {
        match self {
            TutorMode::Off => "off",
            TutorMode::Tutor => "tutor",
        }
    }
}

pub(crate) struct TutorManager {
    evaluated_plays: Vec<(f64, Play)>,
    current_hint_index: usize,
    tutor_mode: TutorMode,
}

impl TutorManager {
    pub(crate) fn new() -> Self {
        Self {
            evaluated_plays: Vec::new(),
            current_hint_index: 0,
            tutor_mode: TutorMode::Off,
        }
    }

    /// Enters hint mode for the position on roll.
    ///
    /// Guards, in order: a game must exist, it must be the human player's
    /// turn, and the dice must have been rolled. Each refusal is a plain
    /// message, never an error.
    fn cmd_hint(&mut self, shell: &mut Shell) -> Option<Outcome> {
        let Some(game) = shell.game.as_ref() else {
            return Some(shell.update_output("No game in progress.", true));
        };

        let on_turn_is_human = [&shell.player0_agent, &shell.player1_agent]
            .into_iter()
            .flatten()
            .find(|agent| agent.slot == game.match_state.player)
            .is_none_or(|agent| agent.is_human());
        if !on_turn_is_human {
            return Some(shell.update_output("Not your turn.", true));
        }

        match game.match_state.game_state {
            GameState::Rolled => {}
            GameState::Resigned => {
                return Some(shell.update_output("Your opponent has offered to resign.", true));
            }
            GameState::Doubled => {
                return Some(shell.update_output("Cube offered. Accept, reject or redouble.", true));
            }
            GameState::OnRoll => {
                return Some(shell.update_output("Roll, double or resign first.", true));
            }
            GameState::Take => {
                return Some(shell.update_output("Double accepted. Roll first.", true));
            }
        }

        let evaluator = create_agent("heuristic", game.match_state.player, game);
        let mut ranked = evaluator.rank_plays(game);
        ranked.truncate(MAX_HINTS);
        if ranked.is_empty() {
            return Some(shell.update_output("No plays available to evaluate.", true));
        }

        shell.begin_session(MODULE_ID);
        self.evaluated_plays = ranked;
        self.current_hint_index = 0;
        Some(self.render_hints(shell))
    }

    fn render_hints(&self, shell: &mut Shell) -> Outcome {
        let mut lines = vec![format!(
            "Hints ({} plays, best first):\n",
            self.evaluated_plays.len()
        )];
        for (i, (equity, play)) in self.evaluated_plays.iter().enumerate() {
            let marker = if i == self.current_hint_index {
                "> "
            } else {
                "  "
            };
            lines.push(format!("{marker}{:2}. {:+.3}  {}", i + 1, equity, play.notation()));
        }
        shell.update_output(lines.join("\n"), true)
    }

    fn next_hint(&mut self) -> bool {
        if self.current_hint_index + 1 < self.evaluated_plays.len() {
            self.current_hint_index += 1;
            true
        } else {
            false
        }
    }

    fn previous_hint(&mut self) -> bool {
        if self.current_hint_index > 0 {
            self.current_hint_index -= 1;
            true
        } else {
            false
        }
    }

    fn exit_hint_mode(&mut self, shell: &mut Shell) -> Option<Outcome> {
        self.evaluated_plays.clear();
        self.current_hint_index = 0;
        shell.end_session();
        Some(shell.update_output("", true))
    }

    fn cmd_tutor_mode(&mut self, shell: &mut Shell, args: &[&str]) -> Option<Outcome> {
        let mode = match args.first() {
            Some(&"off") => TutorMode::Off,
            Some(&"tutor") => TutorMode::Tutor,
            _ => {
                return Some(shell.update_output("Usage: tutor_mode <off|tutor>", false));
            }
        };
        self.tutor_mode = mode;
        Some(shell.update_output(format!("Tutor mode set to {}.", mode.name()), false))
    }
}

impl Module for TutorManager {
    fn category(&self) -> &'static str {
        "Tutor"
    }

    fn register(&self) -> CommandSet {
        CommandSet {
            commands: vec!["hint", "tutor_mode", "exit"],
            shortcuts: vec![],
            help: vec![
                ("hint", "Show ranked candidate plays for the position on roll"),
                ("tutor_mode", "Set the tutor mode. Usage: tutor_mode <off|tutor>"),
            ],
        }
    }

    fn command(&mut self, shell: &mut Shell, name: &str, args: &[&str]) -> Option<Outcome> {
        match name {
            "hint" => self.cmd_hint(shell),
            "tutor_mode" => self.cmd_tutor_mode(shell, args),
            "exit" => self.exit_hint_mode(shell),
            _ => None,
        }
    }

    fn handle_event(&mut self, shell: &mut Shell, event: &ModuleEvent) -> Option<Outcome> {
        let ModuleEvent::Key(key) = event else {
            return None;
        };
        if !shell.is_active(MODULE_ID) {
            return None;
        }

        match key.code {
            KeyCode::Down => self.next_hint().then(|| self.render_hints(shell)),
            KeyCode::Up => self.previous_hint().then(|| self.render_hints(shell)),
            KeyCode::Esc => self.exit_hint_mode(shell),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Game, PlayMove, PlayerSlot, Settings, Variant, agents::create_agent};
    use crossterm::event::KeyEvent;

    fn play(pairs: &[(u8, u8)]) -> Play {
        Play {
            moves: pairs
                .iter()
                .map(|&(source, destination)| PlayMove {
                    source,
                    destination,
                })
                .collect(),
        }
    }

    fn shell_with_game() -> Shell {
        let mut shell = Shell::new(Settings::default());
        shell.game = Some(Game::new(Variant::Backgammon));
        shell
    }

    #[test]
    fn hint_without_game_refuses() {
        let mut tutor = TutorManager::new();
        let mut shell = Shell::new(Settings::default());
        let outcome = tutor.cmd_hint(&mut shell).expect("message");
        assert!(outcome.text.to_lowercase().contains("no game"));
    }

    #[test]
    fn hint_on_opponent_turn_refuses() {
        let mut tutor = TutorManager::new();
        let mut shell = shell_with_game();
        {
            let game = shell.game.as_mut().unwrap();
            game.match_state.player = PlayerSlot::One;
            shell.player1_agent = Some(create_agent("heuristic", PlayerSlot::One, game));
        }
        let outcome = tutor.cmd_hint(&mut shell).expect("message");
        assert!(outcome.text.to_lowercase().contains("not your turn"));
    }

    #[test]
    fn hint_wrong_state_messages() {
        let cases = [
            (GameState::Resigned, "has offered to resign"),
            (GameState::Doubled, "Cube offered"),
            (GameState::OnRoll, "Roll, double or resign"),
            (GameState::Take, "Double accepted"),
        ];
        for (state, expected) in cases {
            let mut tutor = TutorManager::new();
            let mut shell = shell_with_game();
            shell.game.as_mut().unwrap().match_state.game_state = state;
            let outcome = tutor.cmd_hint(&mut shell).expect("message");
            assert!(
                outcome.text.contains(expected),
                "state {state:?}: got {:?}",
                outcome.text
            );
        }
    }

    #[test]
    fn hint_with_no_plays_refuses_without_entering_mode() {
        let mut tutor = TutorManager::new();
        let mut shell = shell_with_game();
        let outcome = tutor.cmd_hint(&mut shell).expect("message");
        assert!(outcome.text.contains("No plays available"));
        assert!(shell.active_module().is_none());
    }

    #[test]
    fn hint_navigation_clamps() {
        let mut tutor = TutorManager::new();
        tutor.evaluated_plays = vec![(0.5, play(&[(24, 18)])), (0.4, play(&[(13, 11)]))];
        tutor.current_hint_index = 0;

        assert!(tutor.next_hint());
        assert_eq!(tutor.current_hint_index, 1);
        assert!(!tutor.next_hint());
        assert_eq!(tutor.current_hint_index, 1);

        assert!(tutor.previous_hint());
        assert!(!tutor.previous_hint());
        assert_eq!(tutor.current_hint_index, 0);
    }

    #[test]
    fn arrow_keys_browse_only_in_tutor_mode() {
        let mut tutor = TutorManager::new();
        tutor.evaluated_plays = vec![(0.9, play(&[(24, 18)])), (0.8, play(&[(13, 11)]))];
        let mut shell = shell_with_game();

        let down = ModuleEvent::Key(KeyEvent::from(KeyCode::Down));
        assert!(tutor.handle_event(&mut shell, &down).is_none());
        assert_eq!(tutor.current_hint_index, 0);

        shell.begin_session("tutor");
        let outcome = tutor.handle_event(&mut shell, &down).expect("view");
        assert_eq!(tutor.current_hint_index, 1);
        assert!(outcome.text.contains(">  2."));

        let up = ModuleEvent::Key(KeyEvent::from(KeyCode::Up));
        tutor.handle_event(&mut shell, &up);
        assert_eq!(tutor.current_hint_index, 0);
    }

    #[test]
    fn escape_exits_hint_mode() {
        let mut tutor = TutorManager::new();
        tutor.evaluated_plays = vec![(0.9, play(&[(24, 18)]))];
        let mut shell = shell_with_game();
        shell.begin_session("tutor");

        let esc = ModuleEvent::Key(KeyEvent::from(KeyCode::Esc));
        tutor.handle_event(&mut shell, &esc);

        assert!(shell.active_module().is_none());
        assert!(tutor.evaluated_plays.is_empty());
    }

    #[test]
    fn tutor_mode_validation() {
        let mut tutor = TutorManager::new();
        let mut shell = Shell::new(Settings::default());

        let ok = tutor.cmd_tutor_mode(&mut shell, &["tutor"]).expect("message");
        assert!(ok.text.to_lowercase().contains("tutor mode set to"));
        assert_eq!(tutor.tutor_mode, TutorMode::Tutor);

        let bad = tutor.cmd_tutor_mode(&mut shell, &["invalid"]).expect("message");
        assert!(bad.text.to_lowercase().contains("usage: tutor_mode"));
        assert_eq!(tutor.tutor_mode, TutorMode::Tutor);
    }

    #[test]
    fn register_exports_expected_commands() {
        let tutor = TutorManager::new();
        let set = tutor.register();
        assert!(set.commands.contains(&"hint"));
        assert!(set.commands.contains(&"tutor_mode"));
        assert!(set.help.iter().any(|(command, _)| *command == "hint"));
    }
}
