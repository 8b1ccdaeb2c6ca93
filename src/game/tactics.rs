//! Tactics Layer
//!
//! Optional per-turn mechanics on top of plain combat: warning marks, combo
//! bonuses, second-player balance and the earth boost. Every tactic is off
//! unless its `TacticsConfig` switch is on.

use serde::{Deserialize, Serialize};

use crate::game::board::{Board, Direction, PlayerIndex, BOARD_CELLS};
use crate::game::card::{Card, CardTrait};
use crate::game::error::RuleViolation;
use crate::game::rules::TacticsConfig;

/// Edge penalty for a card placed on an opponent's warning mark.
pub const WARNING_PENALTY: u8 = 1;

/// Pending bonus the second player starts with under balance.
pub const SECOND_PLAYER_BONUS: u8 = 1;

/// Extra combo bonus from the five-elements harmony formation.
pub const HARMONY_COMBO_BONUS: u8 = 1;

// =============================================================================
// COMBO
// =============================================================================

/// Combo earned by a turn's flip count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComboEffect {
    /// Below every threshold, or combos disabled.
    #[default]
    None,
    /// `momentum_threshold` flips.
    Momentum,
    /// `domination_threshold` flips.
    Domination,
    /// `fever_threshold` flips.
    Fever,
}

impl ComboEffect {
    /// Classify a turn's flip count. Highest threshold wins.
    pub fn from_flips(flips: usize, config: &TacticsConfig) -> Self {
        if !config.combo_bonus {
            return ComboEffect::None;
        }
        // A zero threshold switches its tier off.
        let reached = |threshold: u8| threshold > 0 && flips >= threshold as usize;
        if reached(config.fever_threshold) {
            ComboEffect::Fever
        } else if reached(config.domination_threshold) {
            ComboEffect::Domination
        } else if reached(config.momentum_threshold) {
            ComboEffect::Momentum
        } else {
            ComboEffect::None
        }
    }

    /// Edge bonus queued for the player's next placement.
    pub fn bonus(self) -> u8 {
        match self {
            ComboEffect::None => 0,
            ComboEffect::Momentum => 1,
            ComboEffect::Domination => 2,
            ComboEffect::Fever => 3,
        }
    }

    /// Bonus including the harmony formation's extra point.
    pub fn bonus_with_harmony(self, harmony: bool) -> u8 {
        match self {
            ComboEffect::None => 0,
            _ if harmony => self.bonus() + HARMONY_COMBO_BONUS,
            _ => self.bonus(),
        }
    }
}

/// Pending `triad_plus` per player at the start of a match.
pub fn initial_pending_bonus(config: &TacticsConfig, first: PlayerIndex) -> [u8; 2] {
    let mut pending = [0u8; 2];
    if config.second_player_balance {
        pending[first.opponent().index()] = SECOND_PLAYER_BONUS;
    }
    pending
}

// =============================================================================
// WARNING MARKS
// =============================================================================

/// Warning marks currently on the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WarningMarks {
    marks: [Option<PlayerIndex>; BOARD_CELLS],
    placed: [u8; 2],
}

impl WarningMarks {
    /// No marks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Player who marked `cell`, if marked.
    pub fn owner(&self, cell: u8) -> Option<PlayerIndex> {
        self.marks.get(cell as usize).copied().flatten()
    }

    /// Marks `player` has placed this match.
    pub fn placed_by(&self, player: PlayerIndex) -> u8 {
        self.placed[player.index()]
    }

    /// Place a mark on an empty, unmarked cell.
    pub fn place(
        &mut self,
        config: &TacticsConfig,
        board: &Board,
        cell: u8,
        player: PlayerIndex,
        turn: u8,
    ) -> Result<(), RuleViolation> {
        self.check(config, cell, board.is_occupied(cell), player, turn)?;
        self.mark(cell, player);
        Ok(())
    }

    /// Would a mark on `cell` be accepted? Nothing changes.
    ///
    /// `occupied` is whether `cell` holds a card once the current placement
    /// has landed.
    pub fn check(
        &self,
        config: &TacticsConfig,
        cell: u8,
        occupied: bool,
        player: PlayerIndex,
        turn: u8,
    ) -> Result<(), RuleViolation> {
        if !config.warning_mark {
            return Err(RuleViolation::WarningMarkDisabled { turn });
        }
        if occupied {
            return Err(RuleViolation::WarningMarkOnOccupiedCell { turn, cell });
        }
        if self.owner(cell).is_some() {
            return Err(RuleViolation::WarningMarkAlreadyPresent { turn, cell });
        }
        if self.placed[player.index()] >= config.warning_mark_limit {
            return Err(RuleViolation::WarningMarkLimitExceeded {
                turn,
                limit: config.warning_mark_limit,
            });
        }
        Ok(())
    }

    /// Record a mark that already passed [`check`](Self::check).
    pub(crate) fn mark(&mut self, cell: u8, player: PlayerIndex) {
        self.marks[cell as usize] = Some(player);
        self.placed[player.index()] += 1;
    }

    /// Consume the mark on `cell` as `player` places there.
    ///
    /// Returns `true` when the mark belonged to the opponent.
    pub fn trigger(&mut self, cell: u8, player: PlayerIndex) -> bool {
        match self.marks.get_mut(cell as usize).and_then(Option::take) {
            Some(owner) => owner != player,
            None => false,
        }
    }
}

/// Penalty for a card landing on an opponent's mark.
///
/// Light cards are exempt once their placer holds the eclipse formation.
pub fn warning_penalty(card: &Card, eclipse: bool) -> u8 {
    if eclipse && card.trait_ == Some(CardTrait::Light) {
        0
    } else {
        WARNING_PENALTY
    }
}

// =============================================================================
// EARTH BOOST
// =============================================================================

/// Resolve a declared earth boost edge.
pub fn earth_boost(
    config: &TacticsConfig,
    card: &Card,
    edge: Option<u8>,
    turn: u8,
) -> Result<Option<Direction>, RuleViolation> {
    let Some(edge) = edge else {
        return Ok(None);
    };
    if !config.earth_boost || card.trait_ != Some(CardTrait::Earth) {
        return Err(RuleViolation::EarthBoostNotAllowed { turn });
    }
    Direction::from_index(edge)
        .map(Some)
        .ok_or(RuleViolation::EarthBoostNotAllowed { turn })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::Placement;
    use crate::game::card::{Edges, JankenHand, TokenId};

    fn enabled() -> TacticsConfig {
        TacticsConfig {
            combo_bonus: true,
            warning_mark: true,
            second_player_balance: true,
            earth_boost: true,
            ..TacticsConfig::default()
        }
    }

    fn card(t: Option<CardTrait>) -> Card {
        let c = Card::new(TokenId::from(1), Edges::new(5, 5, 5, 5), JankenHand::Rock, 10);
        match t {
            Some(t) => c.with_trait(t),
            None => c,
        }
    }

    #[test]
    fn test_combo_thresholds() {
        let config = enabled();
        assert_eq!(ComboEffect::from_flips(2, &config), ComboEffect::None);
        assert_eq!(ComboEffect::from_flips(3, &config), ComboEffect::Momentum);
        assert_eq!(ComboEffect::from_flips(4, &config), ComboEffect::Domination);
        assert_eq!(ComboEffect::from_flips(5, &config), ComboEffect::Fever);
        assert_eq!(ComboEffect::from_flips(8, &config), ComboEffect::Fever);

        assert_eq!(ComboEffect::from_flips(8, &TacticsConfig::default()), ComboEffect::None);
    }

    #[test]
    fn test_zero_threshold_disables_tier() {
        let config = TacticsConfig {
            momentum_threshold: 0,
            ..enabled()
        };
        assert_eq!(ComboEffect::from_flips(0, &config), ComboEffect::None);
        assert_eq!(ComboEffect::from_flips(3, &config), ComboEffect::None);
        assert_eq!(ComboEffect::from_flips(4, &config), ComboEffect::Domination);

        let off = TacticsConfig {
            momentum_threshold: 0,
            domination_threshold: 0,
            fever_threshold: 0,
            ..enabled()
        };
        assert_eq!(ComboEffect::from_flips(0, &off), ComboEffect::None);
        assert_eq!(ComboEffect::from_flips(9, &off), ComboEffect::None);
    }

    #[test]
    fn test_harmony_only_boosts_earned_combos() {
        assert_eq!(ComboEffect::Domination.bonus_with_harmony(true), 3);
        assert_eq!(ComboEffect::Domination.bonus_with_harmony(false), 2);
        assert_eq!(ComboEffect::None.bonus_with_harmony(true), 0);
    }

    #[test]
    fn test_second_player_balance() {
        assert_eq!(initial_pending_bonus(&enabled(), PlayerIndex::A), [0, 1]);
        assert_eq!(initial_pending_bonus(&enabled(), PlayerIndex::B), [1, 0]);
        assert_eq!(initial_pending_bonus(&TacticsConfig::default(), PlayerIndex::A), [0, 0]);
    }

    #[test]
    fn test_warning_mark_errors() {
        let config = enabled();
        let mut board = Board::new();
        board.place(4, Placement::new(PlayerIndex::A, card(None), 0));
        let mut marks = WarningMarks::new();

        assert_eq!(
            marks.place(&TacticsConfig::default(), &board, 0, PlayerIndex::A, 0),
            Err(RuleViolation::WarningMarkDisabled { turn: 0 })
        );
        assert_eq!(
            marks.place(&config, &board, 4, PlayerIndex::A, 0),
            Err(RuleViolation::WarningMarkOnOccupiedCell { turn: 0, cell: 4 })
        );

        marks.place(&config, &board, 0, PlayerIndex::A, 0).unwrap();
        assert_eq!(
            marks.place(&config, &board, 0, PlayerIndex::B, 1),
            Err(RuleViolation::WarningMarkAlreadyPresent { turn: 1, cell: 0 })
        );

        let limited = TacticsConfig { warning_mark_limit: 1, ..config };
        assert_eq!(
            marks.place(&limited, &board, 1, PlayerIndex::A, 2),
            Err(RuleViolation::WarningMarkLimitExceeded { turn: 2, limit: 1 })
        );
        assert_eq!(marks.placed_by(PlayerIndex::A), 1);
    }

    #[test]
    fn test_mark_consumed_on_placement() {
        let config = enabled();
        let board = Board::new();
        let mut marks = WarningMarks::new();
        marks.place(&config, &board, 2, PlayerIndex::A, 0).unwrap();
        marks.place(&config, &board, 3, PlayerIndex::A, 2).unwrap();

        // Own mark: consumed, no penalty.
        assert!(!marks.trigger(2, PlayerIndex::A));
        assert_eq!(marks.owner(2), None);

        // Opponent's mark: triggers once.
        assert!(marks.trigger(3, PlayerIndex::B));
        assert!(!marks.trigger(3, PlayerIndex::B));
    }

    #[test]
    fn test_eclipse_exempts_light() {
        assert_eq!(warning_penalty(&card(Some(CardTrait::Light)), true), 0);
        assert_eq!(warning_penalty(&card(Some(CardTrait::Light)), false), WARNING_PENALTY);
        assert_eq!(warning_penalty(&card(Some(CardTrait::Shadow)), true), WARNING_PENALTY);
    }

    #[test]
    fn test_earth_boost_rules() {
        let config = enabled();
        let earth = card(Some(CardTrait::Earth));
        assert_eq!(earth_boost(&config, &earth, None, 0), Ok(None));
        assert_eq!(earth_boost(&config, &earth, Some(2), 0), Ok(Some(Direction::Down)));
        assert_eq!(
            earth_boost(&config, &card(Some(CardTrait::Wind)), Some(2), 3),
            Err(RuleViolation::EarthBoostNotAllowed { turn: 3 })
        );
        assert_eq!(
            earth_boost(&TacticsConfig::default(), &earth, Some(0), 1),
            Err(RuleViolation::EarthBoostNotAllowed { turn: 1 })
        );
    }
}
