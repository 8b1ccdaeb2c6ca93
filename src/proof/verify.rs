//! Verification API
//!
//! Verify a claimed match id by deterministic replay. A replay that runs but
//! hashes differently is a failed verification, not an error; an error means
//! the transcript could not be replayed at all.

use tracing::{debug, warn};

use crate::core::hash::{to_hex, Hash32};
use crate::game::board::{PlayerIndex, TileCount};
use crate::game::card::CardLookup;
use crate::game::error::SimulationError;
use crate::game::rules::RulesetConfig;
use crate::game::simulate::simulate_match;
use crate::proof::transcript::Transcript;

/// Verification result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayVerification {
    /// Did the replayed match id equal the claimed one?
    pub ok: bool,
    /// Match id from the replayed transcript.
    pub computed_match_id: Hash32,
    /// Match id the caller claimed.
    pub expected_match_id: Hash32,
    /// Winner of the replay.
    pub winner: PlayerIndex,
    /// Final tile counts of the replay.
    pub tiles: TileCount,
}

/// Replay `transcript` and compare its match id with `claimed_match_id`.
pub fn verify_replay<C: CardLookup + ?Sized>(
    transcript: &Transcript,
    cards: &C,
    claimed_match_id: &Hash32,
    ruleset: &RulesetConfig,
) -> Result<ReplayVerification, SimulationError> {
    let result = simulate_match(transcript, cards, ruleset)?;
    let ok = result.match_id == *claimed_match_id;

    if ok {
        debug!(match_id = %to_hex(&result.match_id), "replay verified");
    } else {
        warn!(
            computed = %to_hex(&result.match_id),
            expected = %to_hex(claimed_match_id),
            "replay match id mismatch"
        );
    }

    Ok(ReplayVerification {
        ok,
        computed_match_id: result.match_id,
        expected_match_id: *claimed_match_id,
        winner: result.winner,
        tiles: result.tiles,
    })
}
