//! Turn Summaries
//!
//! What happened on each turn, for replay UIs and verification tests.

use serde::{Deserialize, Serialize};

use crate::game::board::{Direction, PlayerIndex};
use crate::game::card::TokenId;
use crate::game::combat::FlipTrace;
use crate::game::formation::Formation;
use crate::game::tactics::ComboEffect;

/// Outcome of one placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnSummary {
    /// Turn number (0..=8).
    pub turn: u8,
    /// Acting player.
    pub player: PlayerIndex,
    /// Target cell.
    pub cell: u8,
    /// Deck index played.
    pub card_index: u8,
    /// Token actually placed (after any swap).
    pub token_id: TokenId,
    /// Number of cells flipped.
    pub flip_count: u8,
    /// Flips in resolution order.
    pub flips: Vec<FlipTrace>,
    /// Combo earned this turn.
    pub combo: ComboEffect,
    /// Pending bonus consumed by this placement.
    pub applied_bonus: u8,
    /// Placement landed on an opponent's warning mark.
    pub warning_mark_triggered: bool,
    /// Cell marked after placing.
    pub warning_mark_placed: Option<u8>,
    /// Edge boosted by an earth card.
    pub earth_boost: Option<Direction>,
    /// Formations completed this turn.
    pub formations: Vec<Formation>,
}

impl TurnSummary {
    /// Did this turn flip anything through a chain?
    pub fn has_chain(&self) -> bool {
        self.flips.iter().any(|f| f.chained)
    }
}
