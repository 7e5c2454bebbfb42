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

//! Help, exit and quit commands.

use crossterm::event::KeyCode;

use crate::{
    modules::{CommandSet, Module},
    shell::{Outcome, Shell},
};

pub(crate) struct HelpModule;

impl HelpModule {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl Module for HelpModule {
    fn register(&self) -> CommandSet {
        CommandSet {
            commands: vec!["help", "exit", "quit"],
            shortcuts: vec![(KeyCode::F(1), "help")],
            help: vec![
                ("help", "Show the help menu or help for a specific command."),
                ("exit", "Exits the current mode."),
                ("quit", "Quits the application cleanly."),
            ],
        }
    }

    fn command(&mut self, shell: &mut Shell, name: &str, args: &[&str]) -> Option<Outcome> {
        match name {
            "help" => {
                let text = shell.help.render(args.first().copied());
                Some(shell.update_output(text, false))
            }
            "exit" => {
                shell.end_session();
                Some(shell.update_output("Exited to shell.", false))
            }
            "quit" => {
                shell.quit_requested = true;
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Settings;

    #[test]
    fn help_renders_registered_entries() {
        let mut module = HelpModule::new();
        let mut shell = Shell::new(Settings::default());
        shell.help.register("help", "Show the help menu.", "general");

        let all = module.command(&mut shell, "help", &[]).expect("menu");
        assert!(all.text.contains("Show the help menu."));

        let one = module.command(&mut shell, "help", &["help"]).expect("entry");
        assert!(one.text.starts_with("help - "));
    }

    #[test]
    fn exit_clears_the_active_module() {
        let mut module = HelpModule::new();
        let mut shell = Shell::new(Settings::default());
        shell.begin_session("game");
        module.command(&mut shell, "exit", &[]);
        assert!(shell.active_module().is_none());
    }

    #[test]
    fn quit_requests_shutdown() {
        let mut module = HelpModule::new();
        let mut shell = Shell::new(Settings::default());
        module.command(&mut shell, "quit", &[]);
        assert!(shell.quit_requested);
    }

    #[test]
    fn register_exports_expected_commands() {
        let set = HelpModule::new().register();
        assert_eq!(set.commands, vec!["help", "exit", "quit"]);
        assert!(set.help.iter().any(|(command, _)| *command == "quit"));
    }
}
