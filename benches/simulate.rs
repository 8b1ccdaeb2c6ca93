//! Replay throughput: the verifier runs one simulation per claimed match.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use triad_league::game::card::{Edges, JankenHand};
use triad_league::proof::transcript::{Address, TRANSCRIPT_VERSION};
use triad_league::{
    match_id, ruleset_id, simulate_match, simulate_match_with_history, Card, CardCatalog, RulesetConfig, TokenId,
    Transcript, TranscriptHeader, Turn,
};

fn fixture(ruleset: &RulesetConfig) -> (Transcript, CardCatalog) {
    let hands = [JankenHand::Rock, JankenHand::Paper, JankenHand::Scissors];
    let cards: CardCatalog = (1u64..=10)
        .map(|id| {
            let e = (id % 9 + 1) as u8;
            Card::new(
                TokenId::from(id),
                Edges::new(e, 10 - e, (e * 3) % 11, (e * 7) % 11),
                hands[id as usize % 3],
                100 + id as u32,
            )
        })
        .collect();

    let header = TranscriptHeader {
        version: TRANSCRIPT_VERSION,
        ruleset_id: ruleset_id(ruleset),
        season_id: 1,
        player_a: Address([0x11; 20]),
        player_b: Address([0x22; 20]),
        deck_a: [1u64, 2, 3, 4, 5].map(TokenId::from),
        deck_b: [6u64, 7, 8, 9, 10].map(TokenId::from),
        first_player: 0,
        deadline: 0,
        salt: [0x5a; 32],
    };
    let turns = [4u8, 0, 2, 6, 8, 1, 3, 5, 7]
        .iter()
        .enumerate()
        .map(|(i, cell)| Turn::new(*cell, (i / 2) as u8))
        .collect();
    (Transcript::new(header, turns), cards)
}

fn bench_simulate(c: &mut Criterion) {
    let plain = RulesetConfig::default();
    let (t, cards) = fixture(&plain);
    c.bench_function("simulate_plain", |b| {
        b.iter(|| simulate_match(black_box(&t), &cards, &plain))
    });

    let combat = plain.with_same(true).with_plus(true).with_reverse(true);
    let (t, cards) = fixture(&combat);
    c.bench_function("simulate_same_plus_reverse", |b| {
        b.iter(|| simulate_match(black_box(&t), &cards, &combat))
    });

    let (t, cards) = fixture(&plain);
    c.bench_function("simulate_with_history", |b| {
        b.iter(|| simulate_match_with_history(black_box(&t), &cards, &plain))
    });
}

fn bench_match_id(c: &mut Criterion) {
    let (t, _) = fixture(&RulesetConfig::default());
    c.bench_function("match_id", |b| b.iter(|| match_id(black_box(&t))));
}

criterion_group!(benches, bench_simulate, bench_match_id);
criterion_main!(benches);
