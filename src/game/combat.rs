//! Combat Resolution
//!
//! Decides whether an attacker flips an adjacent defender. Precedence:
//!
//! 1. Direct edge compare on effective edges (`reverse`, `aceKiller`).
//! 2. Janken tie-break when the effective edges are equal.
//! 3. `same` / `plus` special captures, evaluated for the placed card only.

use serde::{Deserialize, Serialize};

use crate::game::board::{neighbor, Board, Direction, Placement};
use crate::game::card::{JankenHand, MAX_EDGE};
use crate::game::rules::CombatRules;
use crate::game::typing::TypeCounters;

/// Edge bonus granted by an earth placement choice.
pub const EARTH_BOOST: i16 = 1;

/// Why a defender flipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WinReason {
    /// Higher edge won.
    Gt,
    /// Lower edge won under `reverse`.
    Lt,
    /// An edge of 1 beat an edge of 10.
    AceKiller,
    /// Equal edges, attacker hand won.
    Janken,
    /// `same` special capture.
    Same,
    /// `plus` special capture.
    Plus,
}

/// One resolved flip, kept for replay highlighting and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlipTrace {
    /// Attacking cell.
    pub from: u8,
    /// Flipped cell.
    pub to: u8,
    /// Direction from attacker to defender.
    pub direction: Direction,
    /// Attacker's effective edge.
    pub attacker_value: u8,
    /// Defender's effective facing edge.
    pub defender_value: u8,
    /// Winning rule.
    pub reason: WinReason,
    /// Caused by a flipped card rather than the placed one.
    pub chained: bool,
}

/// Everything an edge comparison reads besides the two placements.
#[derive(Clone, Copy, Debug)]
pub struct CombatContext<'a> {
    /// Rules resolved from the ruleset.
    pub rules: CombatRules,
    /// Type rule counters.
    pub counters: &'a TypeCounters,
}

impl<'a> CombatContext<'a> {
    /// Create a context.
    pub fn new(rules: CombatRules, counters: &'a TypeCounters) -> Self {
        Self { rules, counters }
    }

    /// Effective edge of a placement facing `dir`, clamped to `0..=10`.
    pub fn effective_edge(&self, placement: &Placement, dir: Direction) -> u8 {
        let tactical = &placement.tactical;
        let mut value = placement.card.edge(dir) as i16;
        value += tactical.triad_plus as i16;
        if tactical.earth_boost == Some(dir) {
            value += EARTH_BOOST;
        }
        value -= tactical.warning_penalty as i16;
        value += self
            .counters
            .modifier(self.rules.type_rule, placement.placed_by, placement.card.trait_);
        value.clamp(0, MAX_EDGE as i16) as u8
    }
}

/// Direct compare of two effective edge values.
///
/// Returns the winning rule when the attacker flips the defender.
pub fn resolve_edge(
    rules: &CombatRules,
    attacker: u8,
    attacker_hand: JankenHand,
    defender: u8,
    defender_hand: JankenHand,
) -> Option<WinReason> {
    if rules.ace_killer {
        if attacker == 1 && defender == MAX_EDGE {
            return Some(WinReason::AceKiller);
        }
        if attacker == MAX_EDGE && defender == 1 {
            return None;
        }
    }

    if attacker == defender {
        return attacker_hand.beats(defender_hand).then_some(WinReason::Janken);
    }

    match (rules.reverse, attacker > defender) {
        (false, true) => Some(WinReason::Gt),
        (true, false) => Some(WinReason::Lt),
        _ => None,
    }
}

/// A defender captured by a comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capture {
    /// Defender cell.
    pub cell: u8,
    /// Direction from attacker to defender.
    pub direction: Direction,
    /// Attacker's effective edge.
    pub attacker_value: u8,
    /// Defender's effective facing edge.
    pub defender_value: u8,
    /// Winning rule.
    pub reason: WinReason,
}

/// Resolve the attacker at `cell` against the opposing neighbour in `dir`.
///
/// Returns `None` for empty cells, friendly cards, and lost comparisons.
pub fn resolve_against(board: &Board, cell: u8, dir: Direction, ctx: &CombatContext<'_>) -> Option<Capture> {
    let attacker = board.get(cell)?;
    let target = neighbor(cell, dir)?;
    let defender = board.get(target)?;
    if defender.owner == attacker.owner {
        return None;
    }

    let attacker_value = ctx.effective_edge(attacker, dir);
    let defender_value = ctx.effective_edge(defender, dir.opposite());
    let reason = resolve_edge(
        &ctx.rules,
        attacker_value,
        attacker.card.hand,
        defender_value,
        defender.card.hand,
    )?;

    Some(Capture {
        cell: target,
        direction: dir,
        attacker_value,
        defender_value,
        reason,
    })
}

/// `same` and `plus` captures for the card just placed at `cell`.
///
/// `same` captures each opponent whose facing edge equals the placed card's.
/// `plus` needs a sum shared by two or more neighbours; friendly neighbours
/// count toward that but are never captured. A neighbour matching both rules
/// is reported once, as `Same`.
pub fn special_captures(board: &Board, cell: u8, ctx: &CombatContext<'_>) -> Vec<Capture> {
    let mut captures = Vec::new();
    if !ctx.rules.same && !ctx.rules.plus {
        return captures;
    }
    let Some(attacker) = board.get(cell) else {
        return captures;
    };

    // (neighbour cell, direction, attacker edge, defender edge, is opponent)
    let mut sides: Vec<(u8, Direction, u8, u8, bool)> = Vec::with_capacity(4);
    for dir in Direction::ALL {
        let Some(target) = neighbor(cell, dir) else {
            continue;
        };
        let Some(defender) = board.get(target) else {
            continue;
        };
        sides.push((
            target,
            dir,
            ctx.effective_edge(attacker, dir),
            ctx.effective_edge(defender, dir.opposite()),
            defender.owner != attacker.owner,
        ));
    }

    if ctx.rules.same {
        for &(target, dir, a, d, opponent) in &sides {
            if a == d && opponent {
                captures.push(Capture {
                    cell: target,
                    direction: dir,
                    attacker_value: a,
                    defender_value: d,
                    reason: WinReason::Same,
                });
            }
        }
    }

    if ctx.rules.plus {
        for &(target, dir, a, d, opponent) in &sides {
            if !opponent || captures.iter().any(|c| c.cell == target) {
                continue;
            }
            let sum = a as u16 + d as u16;
            let shared = sides
                .iter()
                .filter(|(_, _, a2, d2, _)| *a2 as u16 + *d2 as u16 == sum)
                .count();
            if shared >= 2 {
                captures.push(Capture {
                    cell: target,
                    direction: dir,
                    attacker_value: a,
                    defender_value: d,
                    reason: WinReason::Plus,
                });
            }
        }
    }

    captures
}
