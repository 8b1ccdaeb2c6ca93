//! Authoritative Match Simulation
//!
//! Replays a transcript turn by turn. This is the function a verifier runs,
//! so it must be a pure function of (transcript, card data, ruleset):
//! - no randomness other than keccak derivations from the header
//! - no wall clock (the deadline is never read)
//! - no state surviving between calls

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::hash::{hex_bytes, to_hex, Hash32};
use crate::game::board::{Board, BoardSnapshot, PlayerIndex, Placement, TacticalState, TileCount};
use crate::game::card::{Card, CardLookup, TokenId};
use crate::game::chain::propagate;
use crate::game::combat::CombatContext;
use crate::game::error::{DataError, RuleViolation, SimulationError};
use crate::game::events::TurnSummary;
use crate::game::formation::{Formation, FormationLog};
use crate::game::rules::{RulesetConfig, RULESET_SCHEME_V1};
use crate::game::selection::{apply_swap, forced_card_index, open_hands, swap_slots, DECK_SIZE};
use crate::game::state::{MatchPhase, MatchState};
use crate::game::tactics::{earth_boost, warning_penalty, ComboEffect};
use crate::proof::encode::{match_id, ruleset_id};
use crate::proof::transcript::{Transcript, Turn, TURN_COUNT};
use crate::proof::validate::{validate_transcript, TranscriptError};

/// Which rung of the tie-break ladder decided the winner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TieBreak {
    /// More tiles.
    TileCount,
    /// Equal tiles, higher controlled `combat_stat_sum`.
    CombatStatSum,
    /// Everything equal; the first player wins.
    FirstPlayer,
}

/// Final outcome of a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Winning seat. The ladder never yields a draw.
    pub winner: PlayerIndex,
    /// Final tile counts.
    pub tiles: TileCount,
    /// Rung that decided the winner.
    pub tie_break: TieBreak,
    /// Final board.
    pub board: Board,
    /// `keccak256` of the canonical transcript encoding.
    #[serde(with = "hex_bytes")]
    pub match_id: Hash32,
    /// Per-turn summaries.
    pub turns: Vec<TurnSummary>,
    /// Formations completed during the match.
    pub formations: FormationLog,
    /// Deck slots revealed under the open rule, by seat.
    pub open_hands: [[bool; DECK_SIZE]; 2],
}

/// Match result plus a board snapshot before turn 0 and after every turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResultWithHistory {
    /// Final outcome.
    pub result: MatchResult,
    /// Ten snapshots: initial, then one per turn.
    pub board_history: Vec<BoardSnapshot>,
}

/// Replay a transcript to its result.
pub fn simulate_match<C: CardLookup + ?Sized>(
    transcript: &Transcript,
    cards: &C,
    ruleset: &RulesetConfig,
) -> Result<MatchResult, SimulationError> {
    run(transcript, cards, ruleset, None)
}

/// Replay a transcript, recording a board snapshot after every turn.
pub fn simulate_match_with_history<C: CardLookup + ?Sized>(
    transcript: &Transcript,
    cards: &C,
    ruleset: &RulesetConfig,
) -> Result<MatchResultWithHistory, SimulationError> {
    let mut board_history = Vec::with_capacity(TURN_COUNT + 1);
    let result = run(transcript, cards, ruleset, Some(&mut board_history))?;
    Ok(MatchResultWithHistory { result, board_history })
}

fn run<C: CardLookup + ?Sized>(
    transcript: &Transcript,
    cards: &C,
    ruleset: &RulesetConfig,
    mut history: Option<&mut Vec<BoardSnapshot>>,
) -> Result<MatchResult, SimulationError> {
    let mut state = setup(transcript, cards, ruleset)?;
    if let Some(h) = history.as_deref_mut() {
        h.push(state.snapshot());
    }

    let mut turns = Vec::with_capacity(TURN_COUNT);
    for (i, turn) in transcript.turns.iter().enumerate() {
        turns.push(apply_turn(&mut state, i as u8, turn)?);
        if let Some(h) = history.as_deref_mut() {
            h.push(state.snapshot());
        }
    }

    state.phase = MatchPhase::Resolved;
    let (winner, tie_break) = decide_winner(&state.board, state.first_player);
    let tiles = state.board.tiles();
    let match_id = match_id(transcript);

    debug!(
        match_id = %to_hex(&match_id),
        winner = ?winner,
        tiles_a = tiles.a,
        tiles_b = tiles.b,
        tie_break = ?tie_break,
        "match resolved"
    );

    Ok(MatchResult {
        winner,
        tiles,
        tie_break,
        board: state.board,
        match_id,
        turns,
        formations: state.formations,
        open_hands: open_hands(ruleset.open_rule, &transcript.header.salt),
    })
}

// =============================================================================
// SETUP
// =============================================================================

/// Validate inputs and build the initial match state.
///
/// Runs the structural checks, confirms the header commits to `ruleset`,
/// resolves both decks and applies the swap rule.
pub fn setup<C: CardLookup + ?Sized>(
    transcript: &Transcript,
    cards: &C,
    ruleset: &RulesetConfig,
) -> Result<MatchState, SimulationError> {
    validate_transcript(transcript)?;
    let header = &transcript.header;

    if ruleset.scheme != RULESET_SCHEME_V1 {
        return Err(DataError::UnsupportedRulesetScheme(ruleset.scheme).into());
    }
    let computed = ruleset_id(ruleset);
    if header.ruleset_id != computed {
        return Err(DataError::RulesetIdMismatch {
            header: to_hex(&header.ruleset_id),
            computed: to_hex(&computed),
        }
        .into());
    }

    let tactics = &ruleset.tactics;
    if tactics.combo_bonus && !tactics.combo_thresholds_ordered() {
        return Err(DataError::UnorderedComboThresholds {
            momentum: tactics.momentum_threshold,
            domination: tactics.domination_threshold,
            fever: tactics.fever_threshold,
        }
        .into());
    }

    let first_player = header
        .first_player()
        .ok_or(TranscriptError::InvalidFirstPlayer(header.first_player))?;

    let mut decks = [resolve_deck(&header.deck_a, cards)?, resolve_deck(&header.deck_b, cards)?];
    let seed = header.seed();
    if ruleset.swap {
        let slots = swap_slots(&seed);
        apply_swap(&mut decks, slots);
        debug!(slot_a = slots.a, slot_b = slots.b, "swap applied");
    }

    Ok(MatchState::new(*ruleset, seed, first_player, decks))
}

fn resolve_deck<C: CardLookup + ?Sized>(
    tokens: &[TokenId; DECK_SIZE],
    cards: &C,
) -> Result<[Card; DECK_SIZE], DataError> {
    let [a, b, c, d, e] = tokens;
    Ok([
        lookup_card(a, cards)?,
        lookup_card(b, cards)?,
        lookup_card(c, cards)?,
        lookup_card(d, cards)?,
        lookup_card(e, cards)?,
    ])
}

fn lookup_card<C: CardLookup + ?Sized>(token: &TokenId, cards: &C) -> Result<Card, DataError> {
    let card = cards.card(token).ok_or(DataError::MissingCard(*token))?;
    if !card.edges.in_range() {
        return Err(DataError::InvalidCard(*token));
    }
    Ok(Card {
        token_id: *token,
        ..*card
    })
}

// =============================================================================
// TURN
// =============================================================================

/// Resolve one turn against the state.
///
/// Every check runs before anything is written, so a rejected turn leaves
/// `state` exactly as it was and the turn can be retried.
pub fn apply_turn(state: &mut MatchState, turn_index: u8, turn: &Turn) -> Result<TurnSummary, RuleViolation> {
    let player = state.acting_player(turn_index);
    let tactics = state.ruleset.tactics;

    // 1. Card selection
    if let Some(expected) = forced_card_index(
        state.ruleset.card_selection,
        &state.seed,
        turn_index as usize,
        player,
        state.hand(player).used(),
    ) {
        if expected != turn.card_index {
            return Err(RuleViolation::CardSelectionMismatch {
                turn: turn_index,
                expected,
                got: turn.card_index,
            });
        }
    }

    // 2. Card and cell availability
    let hand = state.hand(player);
    if hand.is_used(turn.card_index) {
        return Err(RuleViolation::CardIndexReused {
            turn: turn_index,
            card_index: turn.card_index,
        });
    }
    let card = hand.cards[turn.card_index as usize];
    if state.board.is_occupied(turn.cell) {
        return Err(RuleViolation::CellOccupied {
            turn: turn_index,
            cell: turn.cell,
        });
    }

    // 3. Declared tactics
    let earth = earth_boost(&tactics, &card, turn.earth_boost_edge, turn_index)?;
    if let Some(mark) = turn.warning_mark_cell {
        let occupied = mark == turn.cell || state.board.is_occupied(mark);
        state.marks.check(&tactics, mark, occupied, player, turn_index)?;
    }

    // 4. Commit the placement
    state.phase = MatchPhase::Turn(turn_index);
    let card = state.hands[player.index()]
        .take(turn.card_index)
        .ok_or(RuleViolation::CardIndexReused {
            turn: turn_index,
            card_index: turn.card_index,
        })?;
    let warning_mark_triggered = state.marks.trigger(turn.cell, player);
    let penalty = if warning_mark_triggered {
        warning_penalty(&card, state.has_formation(player, Formation::Eclipse))
    } else {
        0
    };
    let applied_bonus = std::mem::take(&mut state.pending_bonus[player.index()]);

    let mut placement = Placement::new(player, card, turn.card_index);
    placement.tactical = TacticalState {
        triad_plus: applied_bonus,
        warning_penalty: penalty,
        earth_boost: earth,
    };
    state.board.place(turn.cell, placement);

    // 5. Combat and chain
    let ctx = CombatContext::new(state.ruleset.combat_rules(), &state.counters);
    let outcome = propagate(&mut state.board, turn.cell, &ctx);

    // 6. Post-placement bookkeeping
    if let Some(t) = card.trait_ {
        state.counters.record(player, t);
    }
    let formations = if state.ruleset.formations {
        state.formations.detect(&state.board, player, turn_index)
    } else {
        Vec::new()
    };
    if let Some(mark) = turn.warning_mark_cell {
        state.marks.mark(mark, player);
    }
    let combo = ComboEffect::from_flips(outcome.flip_count(), &tactics);
    state.pending_bonus[player.index()] =
        combo.bonus_with_harmony(state.has_formation(player, Formation::FiveElementsHarmony));

    debug!(
        turn = turn_index,
        player = ?player,
        cell = turn.cell,
        card_index = turn.card_index,
        flips = outcome.flip_count(),
        combo = ?combo,
        "turn resolved"
    );

    Ok(TurnSummary {
        turn: turn_index,
        player,
        cell: turn.cell,
        card_index: turn.card_index,
        token_id: card.token_id,
        flip_count: outcome.flip_count() as u8,
        flips: outcome.flips,
        combo,
        applied_bonus,
        warning_mark_triggered,
        warning_mark_placed: turn.warning_mark_cell,
        earth_boost: earth,
        formations,
    })
}

// =============================================================================
// RESOLUTION
// =============================================================================

/// Decide the winner: tiles, then controlled stat sum, then first player.
pub fn decide_winner(board: &Board, first_player: PlayerIndex) -> (PlayerIndex, TieBreak) {
    let tiles = board.tiles();
    match tiles.a.cmp(&tiles.b) {
        Ordering::Greater => return (PlayerIndex::A, TieBreak::TileCount),
        Ordering::Less => return (PlayerIndex::B, TieBreak::TileCount),
        Ordering::Equal => {}
    }

    let a = board.controlled_stat_sum(PlayerIndex::A);
    let b = board.controlled_stat_sum(PlayerIndex::B);
    match a.cmp(&b) {
        Ordering::Greater => (PlayerIndex::A, TieBreak::CombatStatSum),
        Ordering::Less => (PlayerIndex::B, TieBreak::CombatStatSum),
        Ordering::Equal => (first_player, TieBreak::FirstPlayer),
    }
}
