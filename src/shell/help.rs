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

//! Category-aware help registry.
//!
//! Every module's help entries are forwarded here at registration time,
//! tagged with the module's category. The registry renders either the full
//! menu grouped by category or the entry for a single command.

use std::collections::BTreeMap;

pub(crate) struct HelpRegistry {
    // category -> ordered (command, description) pairs
    entries: BTreeMap<String, Vec<(String, String)>>,
}

impl HelpRegistry {
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub(crate) fn register(&mut self, command: &str, description: &str, category: &str) {
        self.entries
            .entry(category.to_string())
            .or_default()
            .push((command.to_string(), description.to_string()));
    }

    /// Renders the help text for one command, or the whole grouped menu when
    /// no topic is given.
    pub(crate) fn render(&self, topic: Option<&str>) -> String {
        if let Some(topic) = topic {
            let topic = topic.to_lowercase();
            for pairs in self.entries.values() {
                if let Some((command, description)) =
                    pairs.iter().find(|(command, _)| *command == topic)
                {
                    return format!("{command} - {description}");
                }
            }
            return format!("No help available for '{topic}'.");
        }

        let mut lines = vec!["Available commands:".to_string()];
        for (category, pairs) in &self.entries {
            lines.push(format!("\n[{category}]"));
            for (command, description) in pairs {
                lines.push(format!("  {command:<12} {description}"));
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> HelpRegistry {
        let mut help = HelpRegistry::new();
        help.register("help", "Show the help menu.", "general");
        help.register("history", "Browse recorded matches.", "history");
        help.register("play", "Resume play from the viewed move.", "history");
        help
    }

    #[test]
    fn render_groups_commands_by_category() {
        let text = registry().render(None);
        assert!(text.contains("[general]"));
        assert!(text.contains("[history]"));
        let general = text.find("[general]").unwrap();
        let history = text.find("[history]").unwrap();
        assert!(general < history, "categories render in sorted order");
    }

    #[test]
    fn render_single_topic() {
        let text = registry().render(Some("play"));
        assert_eq!(text, "play - Resume play from the viewed move.");
    }

    #[test]
    fn render_unknown_topic() {
        let text = registry().render(Some("dance"));
        assert!(text.contains("No help available"));
    }
}
