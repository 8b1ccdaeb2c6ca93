//! Chain-Flip Propagation
//!
//! Breadth-first flood fill. The placed card attacks first; every card it
//! flips joins the queue and attacks its own neighbours with direct compare.
//! A nine-bit set guards against queueing a cell twice.

use std::collections::VecDeque;

use crate::game::board::{Board, CellSet, Direction};
use crate::game::combat::{resolve_against, special_captures, Capture, CombatContext, FlipTrace};

/// Flips produced by one placement, in resolution order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainOutcome {
    /// Flip traces in the order they were applied.
    pub flips: Vec<FlipTrace>,
}

impl ChainOutcome {
    /// Number of cells flipped.
    pub fn flip_count(&self) -> usize {
        self.flips.len()
    }
}

/// Resolve all flips caused by the card just placed at `placed`.
///
/// Mutates owners on `board`; returns the ordered flip traces.
pub fn propagate(board: &mut Board, placed: u8, ctx: &CombatContext<'_>) -> ChainOutcome {
    let mut outcome = ChainOutcome::default();
    let Some(acting) = board.get(placed).map(|p| p.owner) else {
        return outcome;
    };

    let mut queued = CellSet::new();
    queued.insert(placed);
    let mut queue = VecDeque::with_capacity(9);
    queue.push_back(placed);

    while let Some(attacker) = queue.pop_front() {
        let chained = attacker != placed;

        let mut captures: Vec<Capture> = Direction::ALL
            .iter()
            .filter_map(|dir| resolve_against(board, attacker, *dir, ctx))
            .collect();

        if !chained {
            for special in special_captures(board, attacker, ctx) {
                if !captures.iter().any(|c| c.cell == special.cell) {
                    captures.push(special);
                }
            }
        }

        for capture in captures {
            board.set_owner(capture.cell, acting);
            outcome.flips.push(FlipTrace {
                from: attacker,
                to: capture.cell,
                direction: capture.direction,
                attacker_value: capture.attacker_value,
                defender_value: capture.defender_value,
                reason: capture.reason,
                chained,
            });

            #[cfg(feature = "debug-tracing")]
            tracing::trace!(
                from = attacker,
                to = capture.cell,
                reason = ?capture.reason,
                chained,
                "flip"
            );

            if queued.insert(capture.cell) {
                queue.push_back(capture.cell);
            }
        }
    }

    outcome
}
