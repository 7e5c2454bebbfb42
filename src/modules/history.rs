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

//! Match history recording and browsing.
//!
//! The history module keeps an append-only log of game-state snapshots
//! grouped into matches, persisted as one JSON document after every mutating
//! operation. It is also the most involved modal session: entering history
//! mode snapshots the live game, arrow keys walk moves and matches, and
//! `play` truncates the log at the viewed move and resumes play from there.
//!
//! History is cosmetic, recoverable state. A missing, empty or corrupt
//! history file is treated as "no history yet", never as an error.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::Result;
use chrono::Local;
use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::{
    model::{
        Game, MatchState, PlayerSlot, Position, Settings, Variant, agents::create_agent,
        split_state_code,
    },
    modules::{CommandSet, Module, ModuleEvent},
    shell::{Outcome, Shell},
};

const MODULE_ID: &str = "history";

#[derive(Debug, Error)]
pub(crate) enum HistoryError {
    #[error("failed to write match history: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode match history: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One recorded state transition within a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct MoveEntry {
    pub(crate) timestamp: String,
    /// Combined `"<position-code>:<match-code>"` state code.
    pub(crate) game_id: String,
    pub(crate) message: String,
}

/// One complete match: creation time, move log and the settings snapshot
/// captured when the first move was recorded. The snapshot is immutable for
/// the life of the match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct MatchRecord {
    pub(crate) created: String,
    #[serde(default)]
    pub(crate) moves: Vec<MoveEntry>,
    #[serde(default)]
    pub(crate) settings: Settings,
}

/// The persisted history document: matches keyed by reference, the browse
/// order, and both cursors.
///
/// Invariants: `current_match_index` is in range whenever `match_refs` is
/// non-empty, and `current_move_index` is in range for the current match
/// whenever that match has moves. Neither cursor may be dereferenced when its
/// sequence is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct HistoryStore {
    pub(crate) matches: HashMap<String, MatchRecord>,
    pub(crate) match_refs: Vec<String>,
    pub(crate) current_match_index: usize,
    pub(crate) current_move_index: usize,
}

impl HistoryStore {
    /// Loads the store from disk. A missing, empty or unparseable file yields
    /// an empty store; corruption is logged, not propagated.
    pub(crate) fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(error) => {
                if error.kind() != io::ErrorKind::NotFound {
                    warn!(%error, path = %path.display(), "could not read match history");
                }
                return Self::default();
            }
        };

        if raw.trim().is_empty() {
            return Self::default();
        }

        let mut store: Self = match serde_json::from_str(&raw) {
            Ok(store) => store,
            Err(error) => {
                warn!(
                    %error,
                    path = %path.display(),
                    "match history file is invalid JSON, starting with empty history"
                );
                return Self::default();
            }
        };
        store.clamp_cursors();
        store
    }

    pub(crate) fn save(&self, path: &Path) -> Result<(), HistoryError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }

    /// Appends a move, creating the match on first sight with a snapshot of
    /// the caller's settings. The move cursor always lands on the new last
    /// move; the match cursor is untouched.
    pub(crate) fn record_move(
        &mut self,
        match_ref: &str,
        game_id: &str,
        message: &str,
        settings: &Settings,
        timestamp: &str,
    ) {
        if !self.matches.contains_key(match_ref) {
            self.matches.insert(
                match_ref.to_string(),
                MatchRecord {
                    created: timestamp.to_string(),
                    moves: Vec::new(),
                    settings: settings.clone(),
                },
            );
            self.match_refs.push(match_ref.to_string());
        }

        let record = self
            .matches
            .get_mut(match_ref)
            .expect("match record exists after insertion");
        record.moves.push(MoveEntry {
            timestamp: timestamp.to_string(),
            game_id: game_id.to_string(),
            message: message.to_string(),
        });
        self.current_move_index = record.moves.len() - 1;
    }

    pub(crate) fn current_match_ref(&self) -> Option<&str> {
        self.match_refs.get(self.current_match_index).map(String::as_str)
    }

    pub(crate) fn current_match(&self) -> Option<&MatchRecord> {
        self.matches.get(self.current_match_ref()?)
    }

    /// Moves the move cursor forward by one, clamped to the last move.
    /// Returns whether the cursor moved.
    pub(crate) fn next_move(&mut self) -> bool {
        let count = self.current_match().map_or(0, |r| r.moves.len());
        if count > 0 && self.current_move_index < count - 1 {
            self.current_move_index += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn previous_move(&mut self) -> bool {
        if self.current_match().is_some() && self.current_move_index > 0 {
            self.current_move_index -= 1;
            true
        } else {
            false
        }
    }

    /// Moves the match cursor forward by one, clamped to the last match, and
    /// rewinds the move cursor. Returns whether the cursor moved.
    pub(crate) fn next_match(&mut self) -> bool {
        if !self.match_refs.is_empty() && self.current_match_index < self.match_refs.len() - 1 {
            self.current_match_index += 1;
            self.current_move_index = 0;
            true
        } else {
            false
        }
    }

    pub(crate) fn previous_match(&mut self) -> bool {
        if !self.match_refs.is_empty() && self.current_match_index > 0 {
            self.current_match_index -= 1;
            self.current_move_index = 0;
            true
        } else {
            false
        }
    }

    /// Removes the current match. The match cursor backs up by one but never
    /// goes negative; the move cursor rewinds to the first move.
    pub(crate) fn delete_current_match(&mut self) -> Option<String> {
        let match_ref = self.current_match_ref()?.to_string();
        self.matches.remove(&match_ref);
        self.match_refs.retain(|r| *r != match_ref);
        self.current_match_index = self.current_match_index.saturating_sub(1);
        self.current_move_index = 0;
        Some(match_ref)
    }

    pub(crate) fn clear(&mut self) {
        self.matches.clear();
        self.match_refs.clear();
        self.current_match_index = 0;
        self.current_move_index = 0;
    }

    /// Repairs a freshly loaded store: matches without moves cannot be viewed
    /// or resumed, so they are dropped along with dangling references, and
    /// both cursors are forced back into range.
    fn clamp_cursors(&mut self) {
        self.matches.retain(|_, record| !record.moves.is_empty());
        self.match_refs.retain(|r| self.matches.contains_key(r));

        if self.match_refs.is_empty() {
            self.current_match_index = 0;
            self.current_move_index = 0;
            return;
        }
        self.current_match_index = self.current_match_index.min(self.match_refs.len() - 1);
        let count = self.current_match().map_or(0, |r| r.moves.len());
        self.current_move_index = self.current_move_index.min(count.saturating_sub(1));
    }
}

pub(crate) struct HistoryManager {
    store: HistoryStore,
    path: PathBuf,
}

impl HistoryManager {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self {
            store: HistoryStore::load(&path),
            path,
        }
    }

    /// Write-through persistence after a mutating operation. Failures are
    /// logged; the triggering command still completes.
    fn persist(&self) {
        if let Err(error) = self.store.save(&self.path) {
            warn!(%error, path = %self.path.display(), "failed to persist match history");
        }
    }

    fn record(&mut self, shell: &Shell, match_ref: &str, game_id: &str, message: &str) {
        let now = Local::now().to_rfc3339();
        self.store
            .record_move(match_ref, game_id, message, &shell.settings, &now);
        self.persist();
    }

    /// Decodes the currently viewed move into the live game and renders the
    /// move log with a cursor marker on the viewed line.
    fn update_view(&mut self, shell: &mut Shell) -> Option<Outcome> {
        let match_ref = self.store.current_match_ref()?.to_string();
        let record = self.store.matches.get(&match_ref)?;

        let entry = &record.moves[self.store.current_move_index];
        let (position_code, match_code) = split_state_code(&entry.game_id);

        let game = shell
            .game
            .get_or_insert_with(|| Game::new(Variant::from_name(&record.settings.variant)));
        match Position::decode(position_code) {
            Ok(position) => game.position = position,
            Err(error) => warn!(%error, match_ref, "undecodable position code in history"),
        }
        match MatchState::decode(match_code) {
            Ok(match_state) => game.match_state = match_state,
            Err(error) => warn!(%error, match_ref, "undecodable match code in history"),
        }
        game.game_ref = Some(match_ref.clone());

        let mut lines = vec![format!(
            "LOG for Match {} (Moves: {}):\n Started: {}\n",
            short_ref(&match_ref),
            record.moves.len(),
            record.created,
        )];
        for (i, entry) in record.moves.iter().enumerate() {
            let marker = if i == self.store.current_move_index {
                "> "
            } else {
                "  "
            };
            lines.push(format!("{marker}{:2}. {}", i + 1, entry.message));
        }

        Some(shell.update_output(lines.join("\n"), true))
    }

    /// Enters history mode. If the live game belongs to a recorded match,
    /// browsing starts at that match's most recent move; otherwise it starts
    /// from the first stored match.
    fn cmd_history(&mut self, shell: &mut Shell) -> Option<Outcome> {
        shell.begin_session(MODULE_ID);

        if let Some(current_ref) = shell.game.as_ref().and_then(|g| g.game_ref.clone())
            && let Some(record) = self.store.matches.get(&current_ref)
        {
            let move_count = record.moves.len();
            if let Some(index) = self.store.match_refs.iter().position(|r| *r == current_ref) {
                self.store.current_match_index = index;
            }
            self.store.current_move_index = move_count.saturating_sub(1);
            return self.update_view(shell);
        }

        if self.store.match_refs.is_empty() {
            return Some(shell.update_output("No match history available.", true));
        }

        self.store.current_match_index = 0;
        self.store.current_move_index = 0;
        shell.game = None;
        self.update_view(shell)
    }

    fn exit_history_mode(&mut self, shell: &mut Shell) -> Option<Outcome> {
        shell.end_session();
        Some(shell.update_output("", true))
    }

    fn cmd_delete(&mut self, shell: &mut Shell) -> Option<Outcome> {
        if !shell.is_active(MODULE_ID) {
            return Some(shell.update_output(
                "The 'delete' command only works in history mode.",
                false,
            ));
        }

        let Some(match_ref) = self.store.delete_current_match() else {
            return Some(shell.update_output("No match selected to delete.", false));
        };
        self.persist();
        Some(shell.update_output(
            format!("Deleted current match {}.", short_ref(&match_ref)),
            true,
        ))
    }

    /// Resumes play from the currently viewed move, discarding every later
    /// move in the match. The truncation is persisted immediately and is
    /// irreversible.
    fn cmd_play(&mut self, shell: &mut Shell) -> Option<Outcome> {
        let Some(match_ref) = self.store.current_match_ref().map(str::to_string) else {
            return Some(shell.update_output("No match loaded.", true));
        };
        let current = self.store.current_move_index;
        let Some(record) = self.store.matches.get_mut(&match_ref) else {
            return Some(shell.update_output("No match loaded.", true));
        };

        let truncated = current + 1 < record.moves.len();
        if truncated {
            record.moves.truncate(current + 1);
        }
        let settings = record.settings.clone();
        let entry = record.moves[current].clone();
        if truncated {
            self.persist();
        }

        let mut game = Game::new(Variant::from_name(&settings.variant));
        let (position_code, match_code) = split_state_code(&entry.game_id);
        match Position::decode(position_code) {
            Ok(position) => game.position = position,
            Err(error) => {
                return Some(shell.update_output(format!("Cannot resume: {error}"), false));
            }
        }
        match MatchState::decode(match_code) {
            Ok(match_state) => game.match_state = match_state,
            Err(error) => {
                return Some(shell.update_output(format!("Cannot resume: {error}"), false));
            }
        }
        game.match_state.length = if settings.game_mode == "match" {
            settings.match_length
        } else {
            0
        };
        game.auto_doubles = settings.autodoubles;
        game.jacoby = settings.jacoby;
        game.game_ref = Some(match_ref);

        shell.player0_agent = Some(create_agent(&settings.player_agent, PlayerSlot::Zero, &game));
        shell.player1_agent = Some(create_agent(
            &settings.opponent_agent,
            PlayerSlot::One,
            &game,
        ));
        shell.game = Some(game);
        shell.resume_play();

        Some(shell.update_output("Resumed play from history.", true))
    }

    /// Jumps to a 1-based move number within the current match.
    fn cmd_goto(&mut self, shell: &mut Shell, args: &[&str]) -> Option<Outcome> {
        let Some(record) = self.store.current_match() else {
            return Some(shell.update_output("No match loaded.", true));
        };
        let count = record.moves.len();

        let Some(number) = args.first().and_then(|raw| raw.parse::<usize>().ok()) else {
            return Some(shell.update_output("Usage: goto <move-number>", false));
        };
        if number == 0 || number > count {
            return Some(shell.update_output(
                format!("Move {number} is out of range (1-{count})."),
                false,
            ));
        }

        self.store.current_move_index = number - 1;
        self.update_view(shell)
    }

    fn cmd_clear(&mut self, shell: &mut Shell, args: &[&str]) -> Option<Outcome> {
        if args.first() != Some(&"yes") {
            return Some(shell.update_output(
                "This will delete all history. Type `clear yes` to confirm.",
                false,
            ));
        }

        self.store.clear();
        self.persist();
        Some(shell.update_output("All history cleared.", false))
    }

    fn cmd_save(&mut self, shell: &mut Shell) -> Option<Outcome> {
        match self.store.save(&self.path) {
            Ok(()) => Some(shell.update_output("Match history saved.", false)),
            Err(error) => Some(shell.update_output(format!("Save failed: {error}"), false)),
        }
    }

    fn cmd_export(&mut self, shell: &mut Shell, args: &[&str]) -> Option<Outcome> {
        let Some(path) = args.first() else {
            return Some(shell.update_output("Usage: export <file.csv>", false));
        };
        match self.export_csv(Path::new(path)) {
            Ok(()) => Some(shell.update_output(format!("Exported history to {path}"), false)),
            Err(error) => Some(shell.update_output(format!("Export failed: {error}"), false)),
        }
    }

    fn export_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(["match_id", "timestamp", "game_id", "message"])?;
        for match_ref in &self.store.match_refs {
            let Some(record) = self.store.matches.get(match_ref) else {
                continue;
            };
            for entry in &record.moves {
                writer.write_record([
                    match_ref.as_str(),
                    &entry.timestamp,
                    &entry.game_id,
                    &entry.message,
                ])?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

impl Module for HistoryManager {
    fn category(&self) -> &'static str {
        "History"
    }

    fn register(&self) -> CommandSet {
        CommandSet {
            commands: vec![
                "history", "delete", "play", "clear", "export", "goto", "save", "exit",
            ],
            shortcuts: vec![],
            help: vec![
                ("history", "Show all recorded moves in the current match"),
                ("delete", "Delete the current match (only in history mode)"),
                (
                    "play",
                    "Starts a game at current match and position, (erases history from this point)",
                ),
                ("goto", "Jump to a move number in the current match"),
                ("clear", "Resets all the history. Type `clear yes` to confirm."),
                ("save", "Save the match history to disk"),
                ("export", "Exports the history to a CSV file"),
            ],
        }
    }

    fn command(&mut self, shell: &mut Shell, name: &str, args: &[&str]) -> Option<Outcome> {
        match name {
            "history" => self.cmd_history(shell),
            "delete" => self.cmd_delete(shell),
            "play" => self.cmd_play(shell),
            "goto" => self.cmd_goto(shell, args),
            "clear" => self.cmd_clear(shell, args),
            "save" => self.cmd_save(shell),
            "export" => self.cmd_export(shell, args),
            "exit" => self.exit_history_mode(shell),
            _ => None,
        }
    }

    fn handle_event(&mut self, shell: &mut Shell, event: &ModuleEvent) -> Option<Outcome> {
        match event {
            // Recorded regardless of which module is active, so that history
            // is never lost to the current mode.
            ModuleEvent::GameRecorded {
                match_ref,
                game_id,
                message,
            } => {
                self.record(shell, match_ref, game_id, message);
                None
            }

            ModuleEvent::Key(key) => {
                if !shell.is_active(MODULE_ID) {
                    return None;
                }
                match key.code {
                    KeyCode::Up => self.store.previous_move().then(|| self.update_view(shell))?,
                    KeyCode::Down => self.store.next_move().then(|| self.update_view(shell))?,
                    KeyCode::Left => {
                        if self.store.previous_match() {
                            shell.game = None;
                            self.update_view(shell)
                        } else {
                            None
                        }
                    }
                    KeyCode::Right => {
                        if self.store.next_match() {
                            shell.game = None;
                            self.update_view(shell)
                        } else {
                            None
                        }
                    }
                    KeyCode::Esc => self.exit_history_mode(shell),
                    _ => None,
                }
            }
        }
    }
}

fn short_ref(match_ref: &str) -> String {
    match_ref.chars().take(8).collect()
}
