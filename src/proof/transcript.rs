//! Match Transcript
//!
//! Everything needed to replay a match: a header committing to players,
//! decks, ruleset and salt, followed by exactly nine turns. The transcript
//! is the only input besides card data and the ruleset config; its canonical
//! encoding (`proof::encode`) defines the match id.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::hash::{hex_bytes, to_hex, Hash32};
use crate::game::board::PlayerIndex;
use crate::game::card::TokenId;
use crate::game::selection::{DerivationSeed, DECK_SIZE};

/// Current transcript version.
pub const TRANSCRIPT_VERSION: u16 = 1;

/// Turns in a complete match (one per cell).
pub const TURN_COUNT: usize = 9;

/// 20-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Address(#[serde(with = "hex_bytes")] pub [u8; 20]);

impl Address {
    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", to_hex(&self.0))
    }
}

/// One placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    /// Target cell (0..=8).
    pub cell: u8,
    /// Index into the acting player's deck (0..=4).
    pub card_index: u8,
    /// Cell to put a warning mark on after placing.
    #[serde(default)]
    pub warning_mark_cell: Option<u8>,
    /// Edge (0..=3) an earth card boosts.
    #[serde(default)]
    pub earth_boost_edge: Option<u8>,
}

impl Turn {
    /// A plain placement.
    pub const fn new(cell: u8, card_index: u8) -> Self {
        Self {
            cell,
            card_index,
            warning_mark_cell: None,
            earth_boost_edge: None,
        }
    }

    /// Add a warning mark.
    #[must_use]
    pub fn with_warning_mark(mut self, cell: u8) -> Self {
        self.warning_mark_cell = Some(cell);
        self
    }

    /// Add an earth boost.
    #[must_use]
    pub fn with_earth_boost(mut self, edge: u8) -> Self {
        self.earth_boost_edge = Some(edge);
        self
    }
}

/// Match commitments fixed before the first turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptHeader {
    /// Format version.
    pub version: u16,
    /// Id of the ruleset the match was played under.
    #[serde(with = "hex_bytes")]
    pub ruleset_id: Hash32,
    /// League season.
    pub season_id: u32,
    /// Seat A account.
    pub player_a: Address,
    /// Seat B account.
    pub player_b: Address,
    /// Seat A deck.
    pub deck_a: [TokenId; DECK_SIZE],
    /// Seat B deck.
    pub deck_b: [TokenId; DECK_SIZE],
    /// Seat that moves on turn 0.
    pub first_player: u8,
    /// Settlement deadline, unix seconds. Not used by the rules.
    pub deadline: u64,
    /// Anti-replay salt.
    #[serde(with = "hex_bytes")]
    pub salt: Hash32,
}

impl TranscriptHeader {
    /// Both decks, seat A first.
    pub fn decks(&self) -> [[TokenId; DECK_SIZE]; 2] {
        [self.deck_a, self.deck_b]
    }

    /// Parsed first player, if valid.
    pub fn first_player(&self) -> Option<PlayerIndex> {
        PlayerIndex::from_u8(self.first_player)
    }

    /// Seed for selection, swap and reveal derivations.
    pub fn seed(&self) -> DerivationSeed {
        DerivationSeed {
            salt: self.salt,
            ruleset_id: self.ruleset_id,
        }
    }
}

/// A complete match transcript.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// Commitments.
    pub header: TranscriptHeader,
    /// Placements in play order.
    pub turns: Vec<Turn>,
}

impl Transcript {
    /// Create from a header and turns.
    pub fn new(header: TranscriptHeader, turns: Vec<Turn>) -> Self {
        Self { header, turns }
    }

    /// Serialize to a compact bincode archive.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ArchiveError> {
        Ok(bincode::serialize(self)?)
    }

    /// Deserialize from a bincode archive.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ArchiveError> {
        Ok(bincode::deserialize(data)?)
    }

    /// Load from JSON.
    pub fn from_json(json: &str) -> Result<Self, ArchiveError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Pretty JSON.
    pub fn to_json(&self) -> Result<String, ArchiveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Errors loading or storing transcripts.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Binary archive could not be read or written.
    #[error("archive codec failed: {0}")]
    Bincode(#[from] bincode::Error),

    /// JSON could not be parsed or written.
    #[error("json codec failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_transcript() -> Transcript {
        let header = TranscriptHeader {
            version: TRANSCRIPT_VERSION,
            ruleset_id: [0x11; 32],
            season_id: 3,
            player_a: Address([0xaa; 20]),
            player_b: Address([0xbb; 20]),
            deck_a: [1u64, 2, 3, 4, 5].map(TokenId::from),
            deck_b: [6u64, 7, 8, 9, 10].map(TokenId::from),
            first_player: 1,
            deadline: 1_700_000_000,
            salt: [0x5a; 32],
        };
        let turns = (0..TURN_COUNT as u8)
            .map(|i| Turn::new(i, i / 2))
            .collect();
        Transcript::new(header, turns)
    }

    #[test]
    fn test_header_helpers() {
        let t = create_test_transcript();
        assert_eq!(t.header.first_player(), Some(PlayerIndex::B));
        assert_eq!(t.header.decks()[1][0], TokenId::from(6));
        assert_eq!(t.header.seed().salt, [0x5a; 32]);
    }

    #[test]
    fn test_bincode_archive_roundtrip() {
        let mut t = create_test_transcript();
        t.turns[2] = t.turns[2].with_warning_mark(8);
        t.turns[5] = t.turns[5].with_earth_boost(3);

        let bytes = t.to_bytes().unwrap();
        assert_eq!(Transcript::from_bytes(&bytes).unwrap(), t);
    }

    #[test]
    fn test_corrupt_archive_is_an_error() {
        let bytes = create_test_transcript().to_bytes().unwrap();
        assert!(matches!(
            Transcript::from_bytes(&bytes[..bytes.len() / 2]),
            Err(ArchiveError::Bincode(_))
        ));
    }

    #[test]
    fn test_json_format() {
        let t = create_test_transcript();
        let json = t.to_json().unwrap();
        assert!(json.contains("\"rulesetId\": \"0x1111"));
        assert!(json.contains("\"playerA\": \"0xaaaa"));
        assert!(json.contains("\"cardIndex\""));
        assert_eq!(Transcript::from_json(&json).unwrap(), t);
    }

    #[test]
    fn test_json_rejects_short_deck() {
        let json = create_test_transcript().to_json().unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["header"]["deckA"].as_array_mut().unwrap().pop();
        assert!(Transcript::from_json(&value.to_string()).is_err());
    }

    #[test]
    fn test_optional_turn_fields_default_to_none() {
        let turn: Turn = serde_json::from_str(r#"{ "cell": 4, "cardIndex": 2 }"#).unwrap();
        assert_eq!(turn, Turn::new(4, 2));
    }
}
