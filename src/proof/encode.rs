//! Canonical Encoding (TRANSCRIPT_ENCODING_V1)
//!
//! Frozen byte layout shared with the settlement contract. The transcript is
//! `abi.encode` of a static tuple of 63 words:
//!
//! ```text
//! uint16    version
//! bytes32   rulesetId
//! uint32    seasonId
//! address   playerA, playerB
//! uint256[5] deckA, deckB
//! uint8     firstPlayer
//! uint64    deadline
//! bytes32   salt
//! uint8[9]  cell, cardIndex, warningMarkCell, earthBoostEdge, reserved
//! ```
//!
//! Absent optional turn fields encode as `255`; `reserved` is all zeros.
//! Changing anything here changes every match id.

use crate::core::abi::{AbiWriter, WORD};
use crate::core::hash::{keccak256, Hash32};
use crate::game::rules::RulesetConfig;
use crate::proof::transcript::{Transcript, Turn, TURN_COUNT};

/// Encoded transcript length in words.
pub const ENCODED_WORDS: usize = 63;

/// Encoded transcript length in bytes.
pub const ENCODED_LEN: usize = ENCODED_WORDS * WORD;

/// Encoded ruleset length in words.
pub const RULESET_WORDS: usize = 18;

/// Sentinel for an absent optional turn field.
pub const NONE_SENTINEL: u8 = 255;

/// Encode a transcript.
///
/// Expects a structurally valid transcript. Turn arrays are always nine
/// words: missing turns pad with the sentinel and extra turns are ignored,
/// so the output length never varies.
pub fn encode_transcript(transcript: &Transcript) -> Vec<u8> {
    let h = &transcript.header;
    let mut w = AbiWriter::with_words(ENCODED_WORDS);

    w.uint(h.version as u64)
        .bytes32(&h.ruleset_id)
        .uint(h.season_id as u64)
        .address(h.player_a.as_bytes())
        .address(h.player_b.as_bytes());
    for token in h.deck_a.iter().chain(h.deck_b.iter()) {
        w.uint256(token.as_bytes());
    }
    w.uint(h.first_player as u64).uint(h.deadline).bytes32(&h.salt);

    let turns = &transcript.turns;
    let columns = [
        turn_column(turns, |t| Some(t.cell)),
        turn_column(turns, |t| Some(t.card_index)),
        turn_column(turns, |t| t.warning_mark_cell),
        turn_column(turns, |t| t.earth_boost_edge),
        [0u8; TURN_COUNT],
    ];
    for values in columns {
        for v in values {
            w.uint(v as u64);
        }
    }

    w.into_bytes()
}

/// One `uint8[9]` column of the turn table.
fn turn_column(turns: &[Turn], field: impl Fn(&Turn) -> Option<u8>) -> [u8; TURN_COUNT] {
    std::array::from_fn(|i| turns.get(i).and_then(&field).unwrap_or(NONE_SENTINEL))
}

/// `matchId = keccak256(encode_transcript(transcript))`.
pub fn match_id(transcript: &Transcript) -> Hash32 {
    keccak256(&encode_transcript(transcript))
}

/// Encode a ruleset config, fields in declaration order.
pub fn encode_ruleset(config: &RulesetConfig) -> Vec<u8> {
    let t = &config.tactics;
    let mut w = AbiWriter::with_words(RULESET_WORDS);
    w.uint(config.scheme as u64)
        .uint(config.card_selection as u64)
        .uint(config.open_rule as u64)
        .uint(config.type_rule as u64)
        .boolean(config.swap)
        .boolean(config.reverse)
        .boolean(config.ace_killer)
        .boolean(config.plus)
        .boolean(config.same)
        .boolean(config.formations)
        .boolean(t.combo_bonus)
        .uint(t.momentum_threshold as u64)
        .uint(t.domination_threshold as u64)
        .uint(t.fever_threshold as u64)
        .boolean(t.warning_mark)
        .uint(t.warning_mark_limit as u64)
        .boolean(t.second_player_balance)
        .boolean(t.earth_boost);
    w.into_bytes()
}

/// `rulesetId = keccak256(encode_ruleset(config))`.
pub fn ruleset_id(config: &RulesetConfig) -> Hash32 {
    keccak256(&encode_ruleset(config))
}
