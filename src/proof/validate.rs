//! Structural Transcript Validation
//!
//! Shape checks that need neither card data nor board state. Runs before
//! simulation and stops at the first failure.

use thiserror::Error;

use crate::game::board::{CellSet, BOARD_CELLS};
use crate::game::selection::DECK_SIZE;
use crate::proof::transcript::{Transcript, TRANSCRIPT_VERSION, TURN_COUNT};

/// Highest edge index an earth boost may name.
const MAX_EDGE_INDEX: u8 = 3;

/// Structural transcript errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscriptError {
    /// Unknown format version.
    #[error("unsupported transcript version {0}")]
    UnsupportedVersion(u16),

    /// First player is neither 0 nor 1.
    #[error("invalid first player {0}")]
    InvalidFirstPlayer(u8),

    /// Not exactly nine turns.
    #[error("expected 9 turns, got {0}")]
    WrongTurnCount(usize),

    /// Cell index above 8.
    #[error("turn {turn}: cell {cell} out of range")]
    CellOutOfRange {
        /// Offending turn.
        turn: u8,
        /// Declared cell.
        cell: u8,
    },

    /// Two turns target the same cell.
    #[error("turn {turn}: cell {cell} already targeted")]
    DuplicateCell {
        /// Offending turn.
        turn: u8,
        /// Declared cell.
        cell: u8,
    },

    /// Card index above 4.
    #[error("turn {turn}: card index {card_index} out of range")]
    CardIndexOutOfRange {
        /// Offending turn.
        turn: u8,
        /// Declared index.
        card_index: u8,
    },

    /// Warning mark cell above 8.
    #[error("turn {turn}: warning mark cell {cell} out of range")]
    WarningMarkOutOfRange {
        /// Offending turn.
        turn: u8,
        /// Declared cell.
        cell: u8,
    },

    /// Earth boost edge above 3.
    #[error("turn {turn}: earth boost edge {edge} out of range")]
    EarthBoostOutOfRange {
        /// Offending turn.
        turn: u8,
        /// Declared edge.
        edge: u8,
    },
}

/// Check the transcript's shape.
pub fn validate_transcript(transcript: &Transcript) -> Result<(), TranscriptError> {
    let header = &transcript.header;
    if header.version != TRANSCRIPT_VERSION {
        return Err(TranscriptError::UnsupportedVersion(header.version));
    }
    if header.first_player().is_none() {
        return Err(TranscriptError::InvalidFirstPlayer(header.first_player));
    }
    if transcript.turns.len() != TURN_COUNT {
        return Err(TranscriptError::WrongTurnCount(transcript.turns.len()));
    }

    let mut seen = CellSet::new();
    for (i, t) in transcript.turns.iter().enumerate() {
        let turn = i as u8;
        if t.cell as usize >= BOARD_CELLS {
            return Err(TranscriptError::CellOutOfRange { turn, cell: t.cell });
        }
        if !seen.insert(t.cell) {
            return Err(TranscriptError::DuplicateCell { turn, cell: t.cell });
        }
        if t.card_index as usize >= DECK_SIZE {
            return Err(TranscriptError::CardIndexOutOfRange {
                turn,
                card_index: t.card_index,
            });
        }
        if let Some(cell) = t.warning_mark_cell {
            if cell as usize >= BOARD_CELLS {
                return Err(TranscriptError::WarningMarkOutOfRange { turn, cell });
            }
        }
        if let Some(edge) = t.earth_boost_edge {
            if edge > MAX_EDGE_INDEX {
                return Err(TranscriptError::EarthBoostOutOfRange { turn, edge });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::card::TokenId;
    use crate::proof::transcript::{Address, TranscriptHeader, Turn};

    fn valid() -> Transcript {
        let header = TranscriptHeader {
            version: TRANSCRIPT_VERSION,
            ruleset_id: [0; 32],
            season_id: 1,
            player_a: Address([1; 20]),
            player_b: Address([2; 20]),
            deck_a: [1u64, 2, 3, 4, 5].map(TokenId::from),
            deck_b: [6u64, 7, 8, 9, 10].map(TokenId::from),
            first_player: 0,
            deadline: 0,
            salt: [0; 32],
        };
        let turns = (0..9u8).map(|i| Turn::new(i, i / 2)).collect();
        Transcript::new(header, turns)
    }

    #[test]
    fn test_valid_transcript_passes() {
        assert_eq!(validate_transcript(&valid()), Ok(()));
    }

    #[test]
    fn test_header_errors() {
        let mut t = valid();
        t.header.version = 2;
        assert_eq!(validate_transcript(&t), Err(TranscriptError::UnsupportedVersion(2)));

        let mut t = valid();
        t.header.first_player = 2;
        assert_eq!(validate_transcript(&t), Err(TranscriptError::InvalidFirstPlayer(2)));

        let mut t = valid();
        t.turns.pop();
        assert_eq!(validate_transcript(&t), Err(TranscriptError::WrongTurnCount(8)));
    }

    #[test]
    fn test_turn_errors_carry_turn_index() {
        let mut t = valid();
        t.turns[3].cell = 9;
        assert_eq!(
            validate_transcript(&t),
            Err(TranscriptError::CellOutOfRange { turn: 3, cell: 9 })
        );

        let mut t = valid();
        t.turns[5].cell = 1;
        assert_eq!(
            validate_transcript(&t),
            Err(TranscriptError::DuplicateCell { turn: 5, cell: 1 })
        );

        let mut t = valid();
        t.turns[0].card_index = 5;
        assert_eq!(
            validate_transcript(&t),
            Err(TranscriptError::CardIndexOutOfRange { turn: 0, card_index: 5 })
        );

        let mut t = valid();
        t.turns[7] = t.turns[7].with_warning_mark(9);
        assert_eq!(
            validate_transcript(&t),
            Err(TranscriptError::WarningMarkOutOfRange { turn: 7, cell: 9 })
        );

        let mut t = valid();
        t.turns[8] = t.turns[8].with_earth_boost(4);
        assert_eq!(
            validate_transcript(&t),
            Err(TranscriptError::EarthBoostOutOfRange { turn: 8, edge: 4 })
        );
    }

    #[test]
    fn test_first_failure_wins() {
        let mut t = valid();
        t.header.version = 9;
        t.turns.clear();
        assert_eq!(validate_transcript(&t), Err(TranscriptError::UnsupportedVersion(9)));
    }
}
