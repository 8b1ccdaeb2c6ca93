//! Match State
//!
//! Working state of one simulation. Created fresh for every call and dropped
//! when it returns; nothing here outlives a match.

use crate::core::hash::StateHash;
use crate::game::board::{Board, BoardSnapshot, PlayerIndex};
use crate::game::card::Card;
use crate::game::formation::{Formation, FormationLog};
use crate::game::rules::RulesetConfig;
use crate::game::selection::{DerivationSeed, DECK_SIZE};
use crate::game::tactics::{initial_pending_bonus, WarningMarks};
use crate::game::typing::TypeCounters;

// =============================================================================
// PHASE
// =============================================================================

/// Match lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchPhase {
    /// Decks resolved, no card placed.
    #[default]
    Setup,
    /// Resolving turn `n`.
    Turn(u8),
    /// Board full, winner decided.
    Resolved,
}

// =============================================================================
// HAND
// =============================================================================

/// A player's five resolved cards and which have been played.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hand {
    /// Cards in deck order (post-swap).
    pub cards: [Card; DECK_SIZE],
    used: [bool; DECK_SIZE],
}

impl Hand {
    /// Fresh hand with nothing played.
    pub fn new(cards: [Card; DECK_SIZE]) -> Self {
        Self {
            cards,
            used: [false; DECK_SIZE],
        }
    }

    /// Has the card at `index` been played?
    pub fn is_used(&self, index: u8) -> bool {
        self.used.get(index as usize).copied().unwrap_or(true)
    }

    /// Played flags in deck order.
    pub fn used(&self) -> &[bool; DECK_SIZE] {
        &self.used
    }

    /// Take the card at `index`, marking it played.
    pub fn take(&mut self, index: u8) -> Option<Card> {
        let slot = self.used.get_mut(index as usize)?;
        if *slot {
            return None;
        }
        *slot = true;
        Some(self.cards[index as usize])
    }
}

// =============================================================================
// MATCH STATE
// =============================================================================

/// Complete state of a match in progress.
#[derive(Clone, Debug)]
pub struct MatchState {
    /// Current phase.
    pub phase: MatchPhase,
    /// Rules in force.
    pub ruleset: RulesetConfig,
    /// Seed for selection derivations.
    pub seed: DerivationSeed,
    /// Player moving on turn 0.
    pub first_player: PlayerIndex,
    /// The grid.
    pub board: Board,
    /// Hands by seat.
    pub hands: [Hand; 2],
    /// Bonus queued for each player's next placement.
    pub pending_bonus: [u8; 2],
    /// Type rule counters.
    pub counters: TypeCounters,
    /// Warning marks on the board.
    pub marks: WarningMarks,
    /// Formations completed so far.
    pub formations: FormationLog,
}

impl MatchState {
    /// Create a match state in `Setup`.
    pub fn new(
        ruleset: RulesetConfig,
        seed: DerivationSeed,
        first_player: PlayerIndex,
        decks: [[Card; DECK_SIZE]; 2],
    ) -> Self {
        Self {
            phase: MatchPhase::Setup,
            pending_bonus: initial_pending_bonus(&ruleset.tactics, first_player),
            ruleset,
            seed,
            first_player,
            board: Board::new(),
            hands: decks.map(Hand::new),
            counters: TypeCounters::new(),
            marks: WarningMarks::new(),
            formations: FormationLog::new(),
        }
    }

    /// Player acting on `turn`.
    pub fn acting_player(&self, turn: u8) -> PlayerIndex {
        PlayerIndex::acting(self.first_player, turn as usize)
    }

    /// Hand of a player.
    pub fn hand(&self, player: PlayerIndex) -> &Hand {
        &self.hands[player.index()]
    }

    /// Has the player completed a formation?
    pub fn has_formation(&self, player: PlayerIndex, formation: Formation) -> bool {
        self.ruleset.formations && self.formations.has(player, formation)
    }

    /// Is the match over?
    pub fn is_resolved(&self) -> bool {
        matches!(self.phase, MatchPhase::Resolved)
    }

    /// Owner/token snapshot of the board.
    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    /// Digest of the board snapshot.
    pub fn compute_hash(&self) -> StateHash {
        self.snapshot().state_hash()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::card::{Edges, JankenHand, TokenId};

    fn deck(base: u64) -> [Card; DECK_SIZE] {
        std::array::from_fn(|i| {
            Card::new(TokenId::from(base + i as u64), Edges::new(5, 5, 5, 5), JankenHand::Rock, 10)
        })
    }

    fn seed() -> DerivationSeed {
        DerivationSeed { salt: [0; 32], ruleset_id: [0; 32] }
    }

    #[test]
    fn test_hand_take_once() {
        let mut hand = Hand::new(deck(1));
        assert!(!hand.is_used(2));
        assert_eq!(hand.take(2).map(|c| c.token_id), Some(TokenId::from(3)));
        assert!(hand.is_used(2));
        assert!(hand.take(2).is_none());
        assert!(hand.take(5).is_none());
        assert!(hand.is_used(5));
    }

    #[test]
    fn test_new_state_applies_balance() {
        let plain = MatchState::new(RulesetConfig::default(), seed(), PlayerIndex::B, [deck(1), deck(6)]);
        assert_eq!(plain.phase, MatchPhase::Setup);
        assert_eq!(plain.pending_bonus, [0, 0]);
        assert_eq!(plain.acting_player(0), PlayerIndex::B);
        assert_eq!(plain.acting_player(1), PlayerIndex::A);

        let tactical = MatchState::new(RulesetConfig::tactical(), seed(), PlayerIndex::B, [deck(1), deck(6)]);
        assert_eq!(tactical.pending_bonus, [1, 0]);
    }

    #[test]
    fn test_state_hash_determinism() {
        let a = MatchState::new(RulesetConfig::default(), seed(), PlayerIndex::A, [deck(1), deck(6)]);
        let b = MatchState::new(RulesetConfig::default(), seed(), PlayerIndex::A, [deck(1), deck(6)]);
        assert_eq!(a.compute_hash(), b.compute_hash());
    }
}
