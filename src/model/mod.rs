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

//! Game-side domain model.
//!
//! This module defines the narrow surface of the game engine that the shell,
//! the history navigator and the tutor consume: the live [`Game`] object with
//! its opaque position/match codecs, the [`Settings`] structure that is
//! snapshotted into match history, and candidate plays for hint evaluation.
//!
//! Move legality, dice mechanics and the encoding internals live in the rules
//! engine and are deliberately not modelled here; position and match codes
//! are carried as opaque strings.

pub(crate) mod agents;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Position ID of the standard backgammon starting position.
pub(crate) const STARTING_POSITION_ID: &str = "4HPwATDgc/ABMA";

/// Match ID of a fresh, undoubled money session.
pub(crate) const STARTING_MATCH_ID: &str = "cAgAAAAAAAAA";

#[derive(Debug, Error)]
pub(crate) enum CodecError {
    #[error("empty state code")]
    Empty,
}

/// Splits a combined `"<position-code>:<match-code>"` state code on the first
/// colon. A code without a colon yields an empty match half.
pub(crate) fn split_state_code(code: &str) -> (&str, &str) {
    match code.split_once(':') {
        Some((position, match_code)) => (position, match_code),
        None => (code, ""),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Variant {
    Backgammon,
    Nackgammon,
    AceyDeucey,
    Hypergammon,
}

impl Variant {
    /// Resolves a settings label to a variant, defaulting to backgammon for
    /// anything unrecognized.
    pub(crate) fn from_name(name: &str) -> Self {
        match name {
            "nackgammon" => Variant::Nackgammon,
            "acey-deucey" => Variant::AceyDeucey,
            "hypergammon" => Variant::Hypergammon,
            _ => Variant::Backgammon,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Variant::Backgammon => "backgammon",
            Variant::Nackgammon => "nackgammon",
            Variant::AceyDeucey => "acey-deucey",
            Variant::Hypergammon => "hypergammon",
        }
    }
}

/// Phase of the game as far as input handling is concerned.
///
/// The codecs here only ever produce the on-roll states; the remaining
/// phases are set by the rules engine as play progresses.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GameState {
    OnRoll,
    Rolled,
    Doubled,
    Take,
    Resigned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlayerSlot {
    Zero,
    One,
}

/// An opaque board position, addressed only through its encoded form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Position {
    code: String,
}

impl Position {
    pub(crate) fn decode(code: &str) -> Result<Self, CodecError> {
        if code.is_empty() {
            return Err(CodecError::Empty);
        }
        Ok(Self {
            code: code.to_string(),
        })
    }

    pub(crate) fn encode(&self) -> &str {
        &self.code
    }
}

/// Match context: score, cube and turn state, again behind an opaque code.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MatchState {
    code: String,
    pub(crate) length: u32,
    pub(crate) player: PlayerSlot,
    pub(crate) game_state: GameState,
}

impl MatchState {
    pub(crate) fn decode(code: &str) -> Result<Self, CodecError> {
        if code.is_empty() {
            return Err(CodecError::Empty);
        }
        Ok(Self {
            code: code.to_string(),
            length: 0,
            player: PlayerSlot::Zero,
            game_state: GameState::OnRoll,
        })
    }

    pub(crate) fn encode(&self) -> &str {
        &self.code
    }
}

/// The live game object shared between the shell and the feature modules.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Game {
    pub(crate) variant: Variant,
    pub(crate) position: Position,
    pub(crate) match_state: MatchState,
    /// Reference of the match this game belongs to, once recording started.
    pub(crate) game_ref: Option<String>,
    pub(crate) auto_doubles: bool,
    pub(crate) jacoby: bool,
}

impl Game {
    pub(crate) fn new(variant: Variant) -> Self {
        Self {
            variant,
            position: Position {
                code: STARTING_POSITION_ID.to_string(),
            },
            match_state: MatchState {
                code: STARTING_MATCH_ID.to_string(),
                length: 0,
                player: PlayerSlot::Zero,
                game_state: GameState::Rolled,
            },
            game_ref: None,
            auto_doubles: false,
            jacoby: false,
        }
    }

    /// The combined `"<position-code>:<match-code>"` state code for this game.
    pub(crate) fn state_code(&self) -> String {
        format!("{}:{}", self.position.encode(), self.match_state.encode())
    }

    /// Candidate plays for the position on roll, supplied by the rules engine.
    pub(crate) fn generate_plays(&self) -> Vec<Play> {
        Vec::new()
    }
}

/// A single checker movement within a play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlayMove {
    pub(crate) source: u8,
    pub(crate) destination: u8,
}

/// One complete candidate play (the moves for a whole roll).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Play {
    pub(crate) moves: Vec<PlayMove>,
}

impl Play {
    /// Formats the play in the conventional `from/to` notation.
    pub(crate) fn notation(&self) -> String {
        self.moves
            .iter()
            .map(|m| format!("{}/{}", m.source, m.destination))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Shell settings, snapshotted verbatim into each match record at first-move
/// time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) variant: String,
    pub(crate) match_length: u32,
    pub(crate) game_mode: String,
    pub(crate) autodoubles: bool,
    pub(crate) jacoby: bool,
    pub(crate) player_agent: String,
    pub(crate) opponent_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: "backgammon".to_string(),
            match_length: 1,
            game_mode: "match".to_string(),
            autodoubles: false,
            jacoby: false,
            player_agent: "human".to_string(),
            opponent_agent: "human".to_string(),
        }
    }
}
