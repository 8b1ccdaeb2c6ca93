//! Simulation Errors
//!
//! A transcript either replays to completion or fails with exactly one of
//! these. There are no partial results.

use thiserror::Error;

use crate::game::card::TokenId;
use crate::proof::validate::TranscriptError;

/// A transcript move that the rules forbid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    /// The card selection rule forced a different card.
    #[error("turn {turn}: card selection requires index {expected}, got {got}")]
    CardSelectionMismatch {
        /// Offending turn.
        turn: u8,
        /// Index the rule forced.
        expected: u8,
        /// Index the transcript declared.
        got: u8,
    },

    /// The acting player already played this card.
    #[error("turn {turn}: card index {card_index} already used")]
    CardIndexReused {
        /// Offending turn.
        turn: u8,
        /// Reused index.
        card_index: u8,
    },

    /// The target cell already holds a card.
    #[error("turn {turn}: cell {cell} is occupied")]
    CellOccupied {
        /// Offending turn.
        turn: u8,
        /// Target cell.
        cell: u8,
    },

    /// A warning mark was declared while the rule is off.
    #[error("turn {turn}: warning marks are disabled")]
    WarningMarkDisabled {
        /// Offending turn.
        turn: u8,
    },

    /// A warning mark targeted an occupied cell.
    #[error("turn {turn}: cannot mark occupied cell {cell}")]
    WarningMarkOnOccupiedCell {
        /// Offending turn.
        turn: u8,
        /// Target cell.
        cell: u8,
    },

    /// A warning mark targeted an already marked cell.
    #[error("turn {turn}: cell {cell} is already marked")]
    WarningMarkAlreadyPresent {
        /// Offending turn.
        turn: u8,
        /// Target cell.
        cell: u8,
    },

    /// The acting player has used up their warning marks.
    #[error("turn {turn}: warning mark limit of {limit} reached")]
    WarningMarkLimitExceeded {
        /// Offending turn.
        turn: u8,
        /// Configured limit.
        limit: u8,
    },

    /// An earth boost was declared while disabled or for a non-earth card.
    #[error("turn {turn}: earth boost not allowed")]
    EarthBoostNotAllowed {
        /// Offending turn.
        turn: u8,
    },
}

impl RuleViolation {
    /// Turn on which the violation occurred.
    pub fn turn(&self) -> u8 {
        match self {
            RuleViolation::CardSelectionMismatch { turn, .. }
            | RuleViolation::CardIndexReused { turn, .. }
            | RuleViolation::CellOccupied { turn, .. }
            | RuleViolation::WarningMarkDisabled { turn }
            | RuleViolation::WarningMarkOnOccupiedCell { turn, .. }
            | RuleViolation::WarningMarkAlreadyPresent { turn, .. }
            | RuleViolation::WarningMarkLimitExceeded { turn, .. }
            | RuleViolation::EarthBoostNotAllowed { turn } => *turn,
        }
    }
}

/// Inconsistent inputs outside the transcript's moves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// A deck token has no card data.
    #[error("no card data for token {0:?}")]
    MissingCard(TokenId),

    /// A card's printed edges exceed the maximum.
    #[error("card {0:?} has an edge outside 0..=10")]
    InvalidCard(TokenId),

    /// The ruleset uses an encoding scheme this engine does not know.
    #[error("unsupported ruleset scheme {0}")]
    UnsupportedRulesetScheme(u8),

    /// The header commits to a different ruleset.
    #[error("ruleset id mismatch: header {header}, config {computed}")]
    RulesetIdMismatch {
        /// Id from the transcript header (hex).
        header: String,
        /// Id of the supplied config (hex).
        computed: String,
    },

    /// Enabled combo thresholds are not strictly increasing.
    #[error("combo thresholds out of order: momentum {momentum}, domination {domination}, fever {fever}")]
    UnorderedComboThresholds {
        #[allow(missing_docs)]
        momentum: u8,
        #[allow(missing_docs)]
        domination: u8,
        #[allow(missing_docs)]
        fever: u8,
    },
}

/// Any failure while simulating a match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// Structural transcript error.
    #[error("invalid transcript: {0}")]
    Transcript(#[from] TranscriptError),

    /// Illegal move.
    #[error("rule violation: {0}")]
    Rule(#[from] RuleViolation),

    /// Bad card or ruleset data.
    #[error("data error: {0}")]
    Data(#[from] DataError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_reports_turn() {
        let v = RuleViolation::CellOccupied { turn: 6, cell: 4 };
        assert_eq!(v.turn(), 6);
        assert_eq!(v.to_string(), "turn 6: cell 4 is occupied");
    }

    #[test]
    fn test_simulation_error_wraps_sources() {
        let err: SimulationError = RuleViolation::EarthBoostNotAllowed { turn: 2 }.into();
        assert!(matches!(err, SimulationError::Rule(_)));
        assert_eq!(err.to_string(), "rule violation: turn 2: earth boost not allowed");

        let err: SimulationError = DataError::UnsupportedRulesetScheme(7).into();
        assert_eq!(err.to_string(), "data error: unsupported ruleset scheme 7");
    }
}
