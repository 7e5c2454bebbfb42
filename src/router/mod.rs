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

//! Command routing.
//!
//! The router owns the feature modules and the merged command namespace, and
//! resolves each input line to exactly one handler call.
//!
//! # Namespace layers
//!
//! Commands live in two layers. Every module's commands land in its
//! category's table, where the last-registered module wins on a name clash.
//! Each command name is also entered into a global fallback table, but there
//! the *first* registrant wins, so a later, more specialized module can
//! define a same-named command in its own category without disturbing the
//! global default.
//!
//! Resolution tries the active module's category table first, then the
//! global fallback. This lets a modal session silently shadow shared verbs
//! (`exit` means "leave history mode" while browsing history) without any
//! registration-order coupling between modules.

use std::collections::HashMap;

use crossterm::event::KeyCode;

use crate::{
    modules::{Module, ModuleEvent},
    shell::{Outcome, Shell},
};

pub(crate) struct CommandRouter {
    modules: Vec<Box<dyn Module>>,
    /// Global fallback table: command name -> module index, first wins.
    commands: HashMap<String, usize>,
    /// Per-category tables: category -> command name -> module index,
    /// last wins.
    module_commands: HashMap<String, HashMap<String, usize>>,
    /// Global shortcut table: key -> (module index, command name), last wins.
    shortcuts: HashMap<KeyCode, (usize, &'static str)>,
}

impl CommandRouter {
    /// Builds the merged namespace from the given modules and forwards their
    /// help entries to the shell's help registry.
    pub(crate) fn new(modules: Vec<Box<dyn Module>>, shell: &mut Shell) -> Self {
        let mut commands = HashMap::new();
        let mut module_commands: HashMap<String, HashMap<String, usize>> = HashMap::new();
        let mut shortcuts = HashMap::new();

        for (index, module) in modules.iter().enumerate() {
            let set = module.register();
            let category = module.category().to_lowercase();

            let table = module_commands.entry(category.clone()).or_default();
            for name in &set.commands {
                table.insert(name.to_string(), index);
                commands.entry(name.to_string()).or_insert(index);
            }

            for (key, command) in set.shortcuts {
                shortcuts.insert(key, (index, command));
            }

            for (command, description) in set.help {
                shell.help.register(command, description, &category);
            }
        }

        Self {
            modules,
            commands,
            module_commands,
            shortcuts,
        }
    }

    /// Resolves one input line to a handler and runs it.
    ///
    /// Never fails: empty input and unrecognized commands both produce plain
    /// display text.
    pub(crate) fn handle(&mut self, shell: &mut Shell, input: &str) -> Option<Outcome> {
        let args: Vec<&str> = input.split_whitespace().collect();
        let Some((first, rest)) = args.split_first() else {
            return Some(shell.update_output("Empty command.", false));
        };
        let command = first.to_lowercase();

        // Active module's category table shadows the global namespace.
        if let Some(active) = shell.active_module().map(str::to_lowercase)
            && let Some(table) = self.module_commands.get(&active)
            && let Some(&index) = table.get(&command)
        {
            return self.modules[index].command(shell, &command, rest);
        }

        if let Some(&index) = self.commands.get(&command) {
            return self.modules[index].command(shell, &command, rest);
        }

        Some(shell.update_output(format!("Unknown command: {command}"), false))
    }

    /// Runs the command bound to a keyboard shortcut, if any.
    pub(crate) fn handle_shortcut(&mut self, shell: &mut Shell, key: KeyCode) -> Option<Outcome> {
        let &(index, command) = self.shortcuts.get(&key)?;
        self.modules[index].command(shell, command, &[])
    }

    /// Delivers an event to every module. Modules decide themselves whether
    /// to react; the last produced outcome wins the display.
    pub(crate) fn broadcast_event(
        &mut self,
        shell: &mut Shell,
        event: &ModuleEvent,
    ) -> Option<Outcome> {
        let mut outcome = None;
        for module in &mut self.modules {
            if let Some(produced) = module.handle_event(shell, event) {
                outcome = Some(produced);
            }
        }
        outcome
    }
}
