//! # Triad League Match Engine
//!
//! Deterministic simulation of 3x3 chain-flip card matches, with a canonical
//! transcript encoding whose keccak256 hash is the match id settled on-chain.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    TRIAD LEAGUE ENGINE                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── hash.rs     - keccak256, board snapshot hashing         │
//! │  └── abi.rs      - Solidity abi.encode word writer           │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── card.rs     - Cards and card lookup                     │
//! │  ├── board.rs    - 3x3 grid and placements                   │
//! │  ├── rules.rs    - Ruleset configuration                     │
//! │  ├── combat.rs   - Edge compare, same/plus                   │
//! │  ├── chain.rs    - Chain-flip propagation                    │
//! │  ├── selection.rs- Order/chaos, swap, open hands             │
//! │  ├── typing.rs   - Type ascend/descend                       │
//! │  ├── formation.rs- Trait formations                          │
//! │  ├── tactics.rs  - Marks, combos, balance, earth boost       │
//! │  └── simulate.rs - Authoritative turn loop                   │
//! │                                                              │
//! │  proof/          - Transcripts and verification              │
//! │  ├── transcript.rs - Header + nine turns                     │
//! │  ├── validate.rs - Structural checks                         │
//! │  ├── encode.rs   - Canonical encoding, matchId               │
//! │  └── verify.rs   - Verification by replay                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! Simulation is a pure function of (transcript, card data, ruleset):
//! - No floating-point arithmetic
//! - No HashMap (fixed arrays and BTreeMap only)
//! - No system time dependencies
//! - All "randomness" is keccak256 over header fields
//!
//! Given identical inputs, every platform produces the same winner, board
//! and match id.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod proof;

// Re-export commonly used types
pub use crate::core::hash::{keccak256, Hash32};
pub use game::card::{Card, CardCatalog, CardLookup, TokenId};
pub use game::rules::RulesetConfig;
pub use game::simulate::{simulate_match, simulate_match_with_history, MatchResult, MatchResultWithHistory};
pub use proof::encode::{match_id, ruleset_id};
pub use proof::transcript::{Transcript, TranscriptHeader, Turn};
pub use proof::verify::{verify_replay, ReplayVerification};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Cells on the board, and turns in a match.
pub const BOARD_CELLS: usize = game::board::BOARD_CELLS;

/// Cards per deck.
pub const DECK_SIZE: usize = game::selection::DECK_SIZE;
