//! Trait Formations
//!
//! A formation is a set of traits a player has placed on the board. It is
//! detected from `placed_by`, not current ownership, so a formation survives
//! its cards being flipped. Each formation is recorded once per player.

use serde::{Deserialize, Serialize};

use crate::game::board::{Board, PlayerIndex};
use crate::game::card::CardTrait;

/// A recognised trait formation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formation {
    /// Flame, aqua, earth, wind and thunder all placed.
    FiveElementsHarmony,
    /// Light and shadow both placed.
    Eclipse,
}

impl Formation {
    /// All formations in detection order.
    pub const ALL: [Formation; 2] = [Formation::FiveElementsHarmony, Formation::Eclipse];

    /// Traits that must all be present.
    pub fn required_traits(self) -> &'static [CardTrait] {
        match self {
            Formation::FiveElementsHarmony => &CardTrait::ELEMENTS,
            Formation::Eclipse => &[CardTrait::Light, CardTrait::Shadow],
        }
    }
}

/// One detected formation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormationRecord {
    /// Player who completed it.
    pub player: PlayerIndex,
    /// Which formation.
    pub formation: Formation,
    /// Turn on which it was first detected.
    pub turn: u8,
}

/// Formations detected so far in a match.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormationLog {
    records: Vec<FormationRecord>,
}

impl FormationLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Has `player` completed `formation`?
    pub fn has(&self, player: PlayerIndex, formation: Formation) -> bool {
        self.records
            .iter()
            .any(|r| r.player == player && r.formation == formation)
    }

    /// All records in detection order.
    pub fn records(&self) -> &[FormationRecord] {
        &self.records
    }

    /// Scan the cards `player` has placed and record newly completed
    /// formations. Returns only the ones new on this turn.
    pub fn detect(&mut self, board: &Board, player: PlayerIndex, turn: u8) -> Vec<Formation> {
        let mut placed = [false; CardTrait::COUNT];
        for (_, p) in board.placements().filter(|(_, p)| p.placed_by == player) {
            if let Some(t) = p.card.trait_ {
                placed[t.index()] = true;
            }
        }

        let mut fresh = Vec::new();
        for formation in Formation::ALL {
            if self.has(player, formation) {
                continue;
            }
            if formation.required_traits().iter().all(|t| placed[t.index()]) {
                self.records.push(FormationRecord { player, formation, turn });
                fresh.push(formation);
            }
        }
        fresh
    }
}
