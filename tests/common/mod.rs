//! Shared fixtures for integration tests.

#![allow(dead_code)]

use triad_league::game::card::{Edges, JankenHand};
use triad_league::proof::transcript::{Address, TRANSCRIPT_VERSION};
use triad_league::{ruleset_id, Card, CardCatalog, RulesetConfig, TokenId, Transcript, TranscriptHeader, Turn};

pub const DECK_A: [u64; 5] = [101, 102, 103, 104, 105];
pub const DECK_B: [u64; 5] = [201, 202, 203, 204, 205];

/// Ten cards with mixed edges and hands; every rule path gets exercised.
pub fn catalog() -> CardCatalog {
    use JankenHand::{Paper, Rock, Scissors};
    [
        (101, [7, 3, 5, 2], Rock, 120),
        (102, [2, 8, 4, 6], Paper, 140),
        (103, [6, 6, 1, 9], Scissors, 130),
        (104, [3, 4, 9, 5], Rock, 110),
        (105, [8, 1, 7, 4], Paper, 150),
        (201, [5, 5, 5, 5], Scissors, 125),
        (202, [9, 2, 3, 7], Rock, 135),
        (203, [1, 7, 8, 3], Paper, 115),
        (204, [4, 9, 2, 6], Scissors, 145),
        (205, [6, 3, 6, 3], Rock, 105),
    ]
    .into_iter()
    .map(|(id, [u, r, d, l], hand, stat)| Card::new(TokenId::from(id), Edges::new(u, r, d, l), hand, stat))
    .collect()
}

/// A opens at the centre; B's turn-5 placement sets off a two-step chain.
pub fn golden_turns() -> Vec<Turn> {
    [(4, 0), (0, 1), (1, 2), (2, 0), (3, 3), (5, 2), (8, 4), (6, 4), (7, 1)]
        .into_iter()
        .map(|(cell, index)| Turn::new(cell, index))
        .collect()
}

pub fn header(ruleset: &RulesetConfig) -> TranscriptHeader {
    TranscriptHeader {
        version: TRANSCRIPT_VERSION,
        ruleset_id: ruleset_id(ruleset),
        season_id: 1,
        player_a: Address([0x11; 20]),
        player_b: Address([0x22; 20]),
        deck_a: DECK_A.map(TokenId::from),
        deck_b: DECK_B.map(TokenId::from),
        first_player: 0,
        deadline: 1_700_000_000,
        salt: [0x5a; 32],
    }
}

pub fn transcript(ruleset: &RulesetConfig, turns: Vec<Turn>) -> Transcript {
    Transcript::new(header(ruleset), turns)
}

pub fn golden_transcript() -> Transcript {
    transcript(&RulesetConfig::default(), golden_turns())
}
