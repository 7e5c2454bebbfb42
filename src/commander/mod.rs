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

//! Command-line input logic and state management.
//!
//! This module implements the logic for a command-line processing component,
//! handling a text input component and handing the finished line to the
//! command router when typing is finished and a command is submitted.

use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

/// What the commander did with an input event.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum CommanderAction {
    /// The event is not for the commander; let the rest of the app have it.
    Ignored,
    /// The event was absorbed by the command line.
    Consumed,
    /// The user submitted a finished command line.
    Submitted(String),
}

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    pub(crate) fn handle_event(&mut self, event: Event) -> CommanderAction {
        if self.active {
            match event {
                Event::Key(key_event) => {
                    match key_event.code {
                        KeyCode::Esc => {
                            self.active = false;
                            self.input.reset();
                            CommanderAction::Consumed
                        }

                        KeyCode::Enter => {
                            let buffer = self.input.value().trim().to_string();
                            self.input.reset();
                            if buffer.is_empty() {
                                CommanderAction::Consumed
                            } else {
                                // Stay in command mode for follow-up commands.
                                CommanderAction::Submitted(buffer)
                            }
                        }

                        _ => {
                            // Delegate all key events to the managed input component.
                            self.input.handle_event(&event);
                            CommanderAction::Consumed
                        }
                    }
                }

                _ => CommanderAction::Ignored,
            }
        } else {
            match event {
                Event::Key(key_event) => {
                    match key_event.code {
                        KeyCode::Char(':') => {
                            self.active = true;
                            CommanderAction::Consumed
                        }

                        _ => CommanderAction::Ignored,
                    }
                }

                _ => CommanderAction::Ignored,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    #[test]
    fn colon_activates_command_mode() {
        let mut commander = Commander::new();
        assert!(!commander.active());
        assert_eq!(
            commander.handle_event(key(KeyCode::Char(':'))),
            CommanderAction::Consumed
        );
        assert!(commander.active());
    }

    #[test]
    fn keys_pass_through_while_inactive() {
        let mut commander = Commander::new();
        assert_eq!(
            commander.handle_event(key(KeyCode::Char('h'))),
            CommanderAction::Ignored
        );
        assert_eq!(commander.handle_event(key(KeyCode::Up)), CommanderAction::Ignored);
    }

    #[test]
    fn enter_submits_the_typed_line() {
        let mut commander = Commander::new();
        commander.handle_event(key(KeyCode::Char(':')));
        for c in "history".chars() {
            commander.handle_event(key(KeyCode::Char(c)));
        }
        let action = commander.handle_event(key(KeyCode::Enter));
        assert_eq!(action, CommanderAction::Submitted("history".to_string()));
        assert!(commander.input.value().is_empty());
    }

    #[test]
    fn enter_on_empty_buffer_is_consumed() {
        let mut commander = Commander::new();
        commander.handle_event(key(KeyCode::Char(':')));
        assert_eq!(commander.handle_event(key(KeyCode::Enter)), CommanderAction::Consumed);
    }

    #[test]
    fn escape_leaves_command_mode() {
        let mut commander = Commander::new();
        commander.handle_event(key(KeyCode::Char(':')));
        commander.handle_event(key(KeyCode::Char('x')));
        commander.handle_event(key(KeyCode::Esc));
        assert!(!commander.active());
        assert!(commander.input.value().is_empty());
    }
}
