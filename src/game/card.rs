//! Card Definitions
//!
//! Cards are immutable values sourced outside the engine (on-chain reads or
//! a cached index). The engine only needs a total `TokenId -> Card` mapping
//! for the tokens a transcript references.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::hash::{hex_bytes, to_hex};
use crate::game::board::Direction;

// =============================================================================
// TOKEN ID
// =============================================================================

/// 256-bit token identity, stored big-endian.
///
/// Serialized as a `0x`-prefixed 64-digit hex string.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct TokenId(#[serde(with = "hex_bytes")] pub [u8; 32]);

impl TokenId {
    /// Create from raw big-endian bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<u64> for TokenId {
    fn from(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Small ids are far more common in logs than full-width hashes.
        if self.0[..24].iter().all(|b| *b == 0) {
            let mut low = [0u8; 8];
            low.copy_from_slice(&self.0[24..]);
            write!(f, "TokenId({})", u64::from_be_bytes(low))
        } else {
            write!(f, "TokenId({})", to_hex(&self.0))
        }
    }
}

// =============================================================================
// JANKEN HAND
// =============================================================================

/// Rock-paper-scissors hand used to break equal-edge ties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum JankenHand {
    /// Beats scissors.
    Rock = 0,
    /// Beats rock.
    Paper = 1,
    /// Beats paper.
    Scissors = 2,
}

impl JankenHand {
    /// Does this hand beat `other`? A hand never beats itself.
    #[inline]
    pub fn beats(self, other: JankenHand) -> bool {
        matches!(
            (self, other),
            (JankenHand::Rock, JankenHand::Scissors)
                | (JankenHand::Paper, JankenHand::Rock)
                | (JankenHand::Scissors, JankenHand::Paper)
        )
    }
}

// =============================================================================
// TRAITS
// =============================================================================

/// Elemental/class tag used by type rules and formations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum CardTrait {
    #[allow(missing_docs)]
    Cosmic = 0,
    #[allow(missing_docs)]
    Light = 1,
    #[allow(missing_docs)]
    Shadow = 2,
    #[allow(missing_docs)]
    Forest = 3,
    #[allow(missing_docs)]
    Metal = 4,
    #[allow(missing_docs)]
    Flame = 5,
    #[allow(missing_docs)]
    Aqua = 6,
    #[allow(missing_docs)]
    Thunder = 7,
    #[allow(missing_docs)]
    Wind = 8,
    #[allow(missing_docs)]
    Earth = 9,
}

impl CardTrait {
    /// Number of distinct traits.
    pub const COUNT: usize = 10;

    /// The five elemental traits checked by the harmony formation.
    pub const ELEMENTS: [CardTrait; 5] = [
        CardTrait::Flame,
        CardTrait::Aqua,
        CardTrait::Earth,
        CardTrait::Wind,
        CardTrait::Thunder,
    ];

    /// Dense index for per-trait tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

// =============================================================================
// CARD
// =============================================================================

/// Maximum printed edge strength.
pub const MAX_EDGE: u8 = 10;

/// The four printed edge strengths, indexed by `Direction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edges {
    #[allow(missing_docs)]
    pub up: u8,
    #[allow(missing_docs)]
    pub right: u8,
    #[allow(missing_docs)]
    pub down: u8,
    #[allow(missing_docs)]
    pub left: u8,
}

impl Edges {
    /// Create from up, right, down, left.
    pub const fn new(up: u8, right: u8, down: u8, left: u8) -> Self {
        Self { up, right, down, left }
    }

    /// Edges as an array in direction order (up, right, down, left).
    #[inline]
    pub fn to_array(self) -> [u8; 4] {
        [self.up, self.right, self.down, self.left]
    }

    /// Are all four edges within `0..=MAX_EDGE`?
    pub fn in_range(self) -> bool {
        self.to_array().iter().all(|e| *e <= MAX_EDGE)
    }
}

/// A battle card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Token identity.
    pub token_id: TokenId,
    /// Printed edge strengths.
    pub edges: Edges,
    /// Janken hand for equal-edge ties.
    pub hand: JankenHand,
    /// Aggregate power; only used by the end-of-match tie-break.
    pub combat_stat_sum: u32,
    /// Optional elemental/class tag.
    #[serde(default, rename = "trait")]
    pub trait_: Option<CardTrait>,
}

impl Card {
    /// Create a trait-less card.
    pub fn new(token_id: TokenId, edges: Edges, hand: JankenHand, combat_stat_sum: u32) -> Self {
        Self {
            token_id,
            edges,
            hand,
            combat_stat_sum,
            trait_: None,
        }
    }

    /// Set the card's trait.
    #[must_use]
    pub fn with_trait(mut self, trait_: CardTrait) -> Self {
        self.trait_ = Some(trait_);
        self
    }

    /// Printed edge facing a direction.
    #[inline]
    pub fn edge(&self, dir: Direction) -> u8 {
        self.edges.to_array()[dir.index()]
    }
}

// =============================================================================
// LOOKUP
// =============================================================================

/// Card-data collaborator: resolves token ids to cards.
pub trait CardLookup {
    /// Return the card for a token, if known.
    fn card(&self, id: &TokenId) -> Option<&Card>;
}

/// In-memory card table with sorted iteration.
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: BTreeMap<TokenId, Card>,
}

impl CardCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a card, replacing any previous entry for its token.
    pub fn insert(&mut self, card: Card) {
        self.cards.insert(card.token_id, card);
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Is the catalog empty?
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Load from a JSON array of cards.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let cards: Vec<Card> = serde_json::from_str(json)?;
        Ok(cards.into_iter().collect())
    }
}

impl FromIterator<Card> for CardCatalog {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for card in iter {
            catalog.insert(card);
        }
        catalog
    }
}

impl CardLookup for CardCatalog {
    fn card(&self, id: &TokenId) -> Option<&Card> {
        self.cards.get(id)
    }
}

impl CardLookup for BTreeMap<TokenId, Card> {
    fn card(&self, id: &TokenId) -> Option<&Card> {
        self.get(id)
    }
}
