//! Game Logic Module
//!
//! All match simulation code. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `card`: Card values and the card lookup seam
//! - `board`: 3x3 grid, placements, snapshots
//! - `rules`: Ruleset configuration
//! - `combat`: Edge comparison and special captures
//! - `chain`: Breadth-first chain flips
//! - `selection`: Order/chaos picks, swap, open hands
//! - `typing`: Type ascend/descend counters
//! - `formation`: Trait formations
//! - `tactics`: Warning marks, combos, balance, earth boost
//! - `state`: Match state
//! - `simulate`: Authoritative turn loop and tie-break
//! - `events`: Per-turn summaries
//! - `error`: Simulation errors

pub mod board;
pub mod card;
pub mod chain;
pub mod combat;
pub mod error;
pub mod events;
pub mod formation;
pub mod rules;
pub mod selection;
pub mod simulate;
pub mod state;
pub mod tactics;
pub mod typing;

// Re-export key types
pub use board::{Board, BoardSnapshot, Direction, PlayerIndex, TileCount};
pub use card::{Card, CardCatalog, CardLookup, CardTrait, Edges, JankenHand, TokenId};
pub use combat::{FlipTrace, WinReason};
pub use error::{DataError, RuleViolation, SimulationError};
pub use events::TurnSummary;
pub use formation::{Formation, FormationLog};
pub use rules::{CardSelectionMode, OpenRuleMode, RulesetConfig, TacticsConfig, TypeRuleMode};
pub use simulate::{simulate_match, simulate_match_with_history, MatchResult, MatchResultWithHistory, TieBreak};
pub use state::{MatchPhase, MatchState};
pub use tactics::ComboEffect;
