//! Card Selection, Swap and Open Hands
//!
//! All derivations here are keccak256 over a static `abi.encode` tuple, so
//! a Solidity contract can reproduce them from the same header fields:
//!
//! - chaos pick: `keccak256(abi.encode(salt, rulesetId, uint8 turn, uint8 player))`
//! - swap slots: `keccak256(abi.encode(bytes32("SWAP"), salt, rulesetId))`
//! - open slots: `keccak256(abi.encode(bytes32("OPEN"), salt, uint8 player))`

use crate::core::abi::AbiWriter;
use crate::core::hash::Hash32;
use crate::game::board::PlayerIndex;
use crate::game::rules::{CardSelectionMode, OpenRuleMode};

/// Cards per deck.
pub const DECK_SIZE: usize = 5;

/// Cards revealed per player under `ThreeOpen`.
pub const THREE_OPEN_COUNT: usize = 3;

/// Header fields every derivation is seeded from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DerivationSeed {
    /// Anti-replay salt from the transcript header.
    pub salt: Hash32,
    /// Ruleset identity from the transcript header.
    pub ruleset_id: Hash32,
}

/// Card index the selection rule forces for this turn.
///
/// `None` when the rule leaves the choice to the transcript (or, defensively,
/// when the player has no card left).
pub fn forced_card_index(
    mode: CardSelectionMode,
    seed: &DerivationSeed,
    turn: usize,
    player: PlayerIndex,
    used: &[bool; DECK_SIZE],
) -> Option<u8> {
    let unused: Vec<u8> = (0..DECK_SIZE as u8).filter(|i| !used[*i as usize]).collect();
    if unused.is_empty() {
        return None;
    }

    match mode {
        CardSelectionMode::None => None,
        CardSelectionMode::Order => Some(unused[0]),
        CardSelectionMode::Chaos => {
            let mut w = AbiWriter::with_words(4);
            w.bytes32(&seed.salt)
                .bytes32(&seed.ruleset_id)
                .uint(turn as u64)
                .uint(player as u64);
            let pick = word_tail_u64(&w.keccak()) % unused.len() as u64;
            Some(unused[pick as usize])
        }
    }
}

/// Deck slots exchanged by the swap rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapSlots {
    /// Slot taken from player A's deck.
    pub a: u8,
    /// Slot taken from player B's deck.
    pub b: u8,
}

/// Derive the swapped slot pair.
pub fn swap_slots(seed: &DerivationSeed) -> SwapSlots {
    let mut w = AbiWriter::with_words(3);
    w.tag("SWAP").bytes32(&seed.salt).bytes32(&seed.ruleset_id);
    let h = w.keccak();
    SwapSlots {
        a: h[0] % DECK_SIZE as u8,
        b: h[1] % DECK_SIZE as u8,
    }
}

/// Exchange the swapped slots between two decks in place.
pub fn apply_swap<T: Copy>(decks: &mut [[T; DECK_SIZE]; 2], slots: SwapSlots) {
    let (a, b) = (slots.a as usize, slots.b as usize);
    let taken = decks[0][a];
    decks[0][a] = decks[1][b];
    decks[1][b] = taken;
}

/// Which deck slots each player reveals under the open rule.
pub fn open_hands(mode: OpenRuleMode, salt: &Hash32) -> [[bool; DECK_SIZE]; 2] {
    match mode {
        OpenRuleMode::None => [[false; DECK_SIZE]; 2],
        OpenRuleMode::AllOpen => [[true; DECK_SIZE]; 2],
        OpenRuleMode::ThreeOpen => {
            let mut mask = [[false; DECK_SIZE]; 2];
            for player in PlayerIndex::BOTH {
                let mut w = AbiWriter::with_words(3);
                w.tag("OPEN").bytes32(salt).uint(player as u64);
                let h = w.keccak();

                let mut slots: Vec<usize> = (0..DECK_SIZE).collect();
                slots.sort_by_key(|slot| (h[*slot], *slot));
                for slot in slots.into_iter().take(THREE_OPEN_COUNT) {
                    mask[player.index()][slot] = true;
                }
            }
            mask
        }
    }
}

/// Low 64 bits of a 256-bit big-endian word.
fn word_tail_u64(h: &Hash32) -> u64 {
    let mut tail = [0u8; 8];
    tail.copy_from_slice(&h[24..]);
    u64::from_be_bytes(tail)
}
