//! Type Ascend / Descend Counters
//!
//! Each player has a placement counter per trait. Under `TypeAscend` a
//! card's edges gain the counter of its placer for its trait; under
//! `TypeDescend` they lose it. Counters only move after a placement's
//! propagation finishes, so the same matchup resolves differently depending
//! on placement history.

use crate::game::board::PlayerIndex;
use crate::game::card::CardTrait;
use crate::game::rules::TypeRuleMode;

/// Per-player, per-trait placement counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TypeCounters {
    counts: [[u8; CardTrait::COUNT]; 2],
}

impl TypeCounters {
    /// All counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current counter for a player and trait.
    #[inline]
    pub fn get(&self, player: PlayerIndex, trait_: CardTrait) -> u8 {
        self.counts[player.index()][trait_.index()]
    }

    /// Record one placement of a trait by a player.
    pub fn record(&mut self, player: PlayerIndex, trait_: CardTrait) {
        let slot = &mut self.counts[player.index()][trait_.index()];
        *slot = slot.saturating_add(1);
    }

    /// Signed edge modifier for a card placed by `player` with `trait_`.
    pub fn modifier(&self, mode: TypeRuleMode, player: PlayerIndex, trait_: Option<CardTrait>) -> i16 {
        let Some(trait_) = trait_ else {
            return 0;
        };
        let count = self.get(player, trait_) as i16;
        match mode {
            TypeRuleMode::None => 0,
            TypeRuleMode::TypeAscend => count,
            TypeRuleMode::TypeDescend => -count,
        }
    }
}
