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

//! Player agents.
//!
//! The agent factory is the boundary to the AI layer: the shell asks for an
//! agent by configuration label and player slot and gets back something that
//! can rank candidate plays. The evaluation internals (neural nets, rollouts)
//! are out of scope; the heuristic agent here ranks plays by pip gain only so
//! the tutor has a deterministic ordering to browse.

use crate::model::{Game, Play, PlayerSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AgentKind {
    Human,
    Heuristic,
}

#[derive(Debug, Clone)]
pub(crate) struct Agent {
    kind: AgentKind,
    pub(crate) slot: PlayerSlot,
}

impl Agent {
    pub(crate) fn is_human(&self) -> bool {
        self.kind == AgentKind::Human
    }

    /// Ranks candidate plays for the given game, best first.
    ///
    /// Human agents never rank; they return an empty list.
    pub(crate) fn rank_plays(&self, game: &Game) -> Vec<(f64, Play)> {
        if self.kind == AgentKind::Human {
            return Vec::new();
        }

        let mut ranked: Vec<(f64, Play)> = game
            .generate_plays()
            .into_iter()
            .map(|play| (pip_gain(&play), play))
            .collect();
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        ranked
    }
}

/// Creates an agent for one player slot from its configuration label.
///
/// Unrecognized labels fall back to a human agent, mirroring how unknown
/// variant names fall back to backgammon.
pub(crate) fn create_agent(kind: &str, slot: PlayerSlot, _game: &Game) -> Agent {
    let kind = match kind {
        "heuristic" | "gnubg" => AgentKind::Heuristic,
        _ => AgentKind::Human,
    };
    Agent { kind, slot }
}

fn pip_gain(play: &Play) -> f64 {
    play.moves
        .iter()
        .map(|m| f64::from(m.source) - f64::from(m.destination))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PlayMove, Variant};

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

    #[test]
    fn unknown_agent_label_falls_back_to_human() {
        let game = Game::new(Variant::Backgammon);
        let agent = create_agent("no-such-agent", PlayerSlot::Zero, &game);
        assert!(agent.is_human());
    }

    #[test]
    fn human_agent_ranks_nothing() {
        let game = Game::new(Variant::Backgammon);
        let agent = create_agent("human", PlayerSlot::Zero, &game);
        assert!(agent.rank_plays(&game).is_empty());
    }

    #[test]
    fn pip_gain_orders_plays_best_first() {
        let a = play(&[(24, 18)]);
        let b = play(&[(13, 11), (6, 5)]);
        assert!(pip_gain(&a) > pip_gain(&b));
    }
}
