//! Board Geometry and Cell State
//!
//! The board is a fixed 3x3 array-of-structs in row-major order. Neighbours
//! are found with row/column arithmetic; cells hold a small mutable record
//! (owner + tactical flags) next to an immutable card value.

use serde::{Deserialize, Serialize};

use crate::core::hash::{StateHash, StateHasher};
use crate::game::card::{Card, TokenId};

/// Number of cells on the board.
pub const BOARD_CELLS: usize = 9;

/// Side length of the board.
pub const BOARD_SIDE: u8 = 3;

// =============================================================================
// PLAYER INDEX
// =============================================================================

/// One of the two seats in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerIndex {
    /// Player A (seat 0).
    A = 0,
    /// Player B (seat 1).
    B = 1,
}

impl PlayerIndex {
    /// Both seats in order.
    pub const BOTH: [PlayerIndex; 2] = [PlayerIndex::A, PlayerIndex::B];

    /// Create from a seat number (0 or 1).
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(PlayerIndex::A),
            1 => Some(PlayerIndex::B),
            _ => None,
        }
    }

    /// Seat number as an array index.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The other seat.
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            PlayerIndex::A => PlayerIndex::B,
            PlayerIndex::B => PlayerIndex::A,
        }
    }

    /// Player acting on `turn` when `first` opens the match.
    #[inline]
    pub fn acting(first: PlayerIndex, turn: usize) -> Self {
        if turn % 2 == 0 {
            first
        } else {
            first.opponent()
        }
    }
}

// =============================================================================
// DIRECTION
// =============================================================================

/// Cardinal direction, doubling as the edge index of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum Direction {
    /// Towards row 0.
    Up = 0,
    /// Towards column 2.
    Right = 1,
    /// Towards row 2.
    Down = 2,
    /// Towards column 0.
    Left = 3,
}

impl Direction {
    /// All directions in resolution order.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// Create from an edge index (0..=3).
    pub fn from_index(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Edge index.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The facing direction on the neighbouring card.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

/// Neighbouring cell of `cell` in `dir`, or `None` at the board edge.
pub fn neighbor(cell: u8, dir: Direction) -> Option<u8> {
    let row = cell / BOARD_SIDE;
    let col = cell % BOARD_SIDE;
    match dir {
        Direction::Up if row > 0 => Some(cell - BOARD_SIDE),
        Direction::Right if col + 1 < BOARD_SIDE => Some(cell + 1),
        Direction::Down if row + 1 < BOARD_SIDE => Some(cell + BOARD_SIDE),
        Direction::Left if col > 0 => Some(cell - 1),
        _ => None,
    }
}

// =============================================================================
// CELL SET
// =============================================================================

/// Nine-bit set of board cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellSet(u16);

impl CellSet {
    /// Empty set.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Insert a cell; returns `false` if it was already present.
    #[inline]
    pub fn insert(&mut self, cell: u8) -> bool {
        let bit = 1u16 << cell;
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }

    /// Is the cell present?
    #[inline]
    pub fn contains(self, cell: u8) -> bool {
        self.0 & (1u16 << cell) != 0
    }

    /// Number of cells present.
    #[inline]
    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Is the set empty?
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// PLACEMENTS
// =============================================================================

/// Per-cell tactical flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TacticalState {
    /// Combo/balance bonus added to every edge.
    pub triad_plus: u8,
    /// Warning-mark penalty subtracted from every edge.
    pub warning_penalty: u8,
    /// Edge boosted by an earth card's placement choice.
    pub earth_boost: Option<Direction>,
}

/// A card occupying a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Current controller; changes on flips.
    pub owner: PlayerIndex,
    /// Player who placed the card; never changes.
    pub placed_by: PlayerIndex,
    /// The card (immutable).
    pub card: Card,
    /// Deck slot the card was played from.
    pub deck_slot: u8,
    /// Tactical flags.
    pub tactical: TacticalState,
}

impl Placement {
    /// Create a placement with no tactical modifiers.
    pub fn new(player: PlayerIndex, card: Card, deck_slot: u8) -> Self {
        Self {
            owner: player,
            placed_by: player,
            card,
            deck_slot,
            tactical: TacticalState::default(),
        }
    }
}

/// Tile totals per player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileCount {
    /// Tiles controlled by player A.
    pub a: u8,
    /// Tiles controlled by player B.
    pub b: u8,
}

impl TileCount {
    /// Tiles controlled by `player`.
    pub fn get(&self, player: PlayerIndex) -> u8 {
        match player {
            PlayerIndex::A => self.a,
            PlayerIndex::B => self.b,
        }
    }
}

// =============================================================================
// BOARD
// =============================================================================

/// The 3x3 battle grid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Placement>; BOARD_CELLS],
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Placement at a cell.
    #[inline]
    pub fn get(&self, cell: u8) -> Option<&Placement> {
        self.cells.get(cell as usize).and_then(Option::as_ref)
    }

    /// Mutable placement at a cell.
    #[inline]
    pub fn get_mut(&mut self, cell: u8) -> Option<&mut Placement> {
        self.cells.get_mut(cell as usize).and_then(Option::as_mut)
    }

    /// Is the cell occupied?
    #[inline]
    pub fn is_occupied(&self, cell: u8) -> bool {
        self.get(cell).is_some()
    }

    /// Put a placement on an empty cell.
    ///
    /// Returns `false` (and leaves the board untouched) if the cell is
    /// occupied or out of range. Cells are never vacated.
    pub fn place(&mut self, cell: u8, placement: Placement) -> bool {
        match self.cells.get_mut(cell as usize) {
            Some(slot) if slot.is_none() => {
                *slot = Some(placement);
                true
            }
            _ => false,
        }
    }

    /// Change the owner of an occupied cell.
    pub fn set_owner(&mut self, cell: u8, owner: PlayerIndex) {
        if let Some(placement) = self.get_mut(cell) {
            placement.owner = owner;
        }
    }

    /// Iterate `(cell, placement)` over occupied cells in cell order.
    pub fn placements(&self) -> impl Iterator<Item = (u8, &Placement)> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.as_ref().map(|p| (i as u8, p)))
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Are all cells occupied?
    pub fn is_full(&self) -> bool {
        self.occupied_count() == BOARD_CELLS
    }

    /// Tiles controlled by each player.
    pub fn tiles(&self) -> TileCount {
        let mut count = TileCount::default();
        for (_, p) in self.placements() {
            match p.owner {
                PlayerIndex::A => count.a += 1,
                PlayerIndex::B => count.b += 1,
            }
        }
        count
    }

    /// Sum of `combat_stat_sum` over the tiles `player` controls.
    pub fn controlled_stat_sum(&self, player: PlayerIndex) -> u64 {
        self.placements()
            .filter(|(_, p)| p.owner == player)
            .map(|(_, p)| p.card.combat_stat_sum as u64)
            .sum()
    }

    /// Capture an owner/token snapshot.
    pub fn snapshot(&self) -> BoardSnapshot {
        let mut cells = [None; BOARD_CELLS];
        for (cell, p) in self.placements() {
            cells[cell as usize] = Some(CellSnapshot {
                owner: p.owner,
                token_id: p.card.token_id,
            });
        }
        BoardSnapshot { cells }
    }
}

// =============================================================================
// SNAPSHOTS
// =============================================================================

/// Owner and token of an occupied cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellSnapshot {
    #[allow(missing_docs)]
    pub owner: PlayerIndex,
    #[allow(missing_docs)]
    pub token_id: TokenId,
}

/// Board state as seen by a replay UI.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Cells in row-major order.
    pub cells: [Option<CellSnapshot>; BOARD_CELLS],
}

impl BoardSnapshot {
    /// Domain-separated SHA-256 digest of this snapshot.
    pub fn state_hash(&self) -> StateHash {
        let mut hasher = StateHasher::for_board_snapshot();
        for cell in &self.cells {
            match cell {
                Some(c) => {
                    hasher.update_bool(true);
                    hasher.update_u8(c.owner as u8);
                    hasher.update_bytes(c.token_id.as_bytes());
                }
                None => hasher.update_bool(false),
            }
        }
        hasher.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::card::{Edges, JankenHand};

    fn card(id: u64) -> Card {
        Card::new(TokenId::from(id), Edges::new(5, 5, 5, 5), JankenHand::Rock, 10 * id as u32)
    }

    #[test]
    fn test_neighbors_at_corners_and_center() {
        assert_eq!(neighbor(0, Direction::Up), None);
        assert_eq!(neighbor(0, Direction::Left), None);
        assert_eq!(neighbor(0, Direction::Right), Some(1));
        assert_eq!(neighbor(0, Direction::Down), Some(3));

        assert_eq!(neighbor(4, Direction::Up), Some(1));
        assert_eq!(neighbor(4, Direction::Right), Some(5));
        assert_eq!(neighbor(4, Direction::Down), Some(7));
        assert_eq!(neighbor(4, Direction::Left), Some(3));

        assert_eq!(neighbor(8, Direction::Right), None);
        assert_eq!(neighbor(8, Direction::Down), None);
        // Row wrap must not happen.
        assert_eq!(neighbor(2, Direction::Right), None);
        assert_eq!(neighbor(3, Direction::Left), None);
    }

    #[test]
    fn test_opposite_directions() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }

    #[test]
    fn test_acting_player_alternates() {
        assert_eq!(PlayerIndex::acting(PlayerIndex::B, 0), PlayerIndex::B);
        assert_eq!(PlayerIndex::acting(PlayerIndex::B, 1), PlayerIndex::A);
        assert_eq!(PlayerIndex::acting(PlayerIndex::B, 8), PlayerIndex::B);
    }

    #[test]
    fn test_cell_set() {
        let mut set = CellSet::new();
        assert!(set.is_empty());
        assert!(set.insert(4));
        assert!(!set.insert(4));
        assert!(set.insert(8));
        assert!(set.contains(4));
        assert!(!set.contains(0));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_place_never_overwrites() {
        let mut board = Board::new();
        assert!(board.place(4, Placement::new(PlayerIndex::A, card(1), 0)));
        assert!(!board.place(4, Placement::new(PlayerIndex::B, card(2), 0)));
        assert!(!board.place(9, Placement::new(PlayerIndex::B, card(2), 0)));
        assert_eq!(board.get(4).unwrap().card.token_id, TokenId::from(1));
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_tiles_and_stat_sums_follow_owner() {
        let mut board = Board::new();
        board.place(0, Placement::new(PlayerIndex::A, card(1), 0));
        board.place(1, Placement::new(PlayerIndex::B, card(2), 0));
        board.place(2, Placement::new(PlayerIndex::B, card(3), 1));

        assert_eq!(board.tiles(), TileCount { a: 1, b: 2 });
        assert_eq!(board.controlled_stat_sum(PlayerIndex::B), 50);

        board.set_owner(2, PlayerIndex::A);
        assert_eq!(board.tiles(), TileCount { a: 2, b: 1 });
        assert_eq!(board.controlled_stat_sum(PlayerIndex::A), 40);
        assert_eq!(board.get(2).unwrap().placed_by, PlayerIndex::B);
    }

    #[test]
    fn test_snapshot_hash_tracks_owner() {
        let mut board = Board::new();
        board.place(0, Placement::new(PlayerIndex::A, card(1), 0));
        let before = board.snapshot();
        board.set_owner(0, PlayerIndex::B);
        let after = board.snapshot();

        assert_ne!(before.state_hash(), after.state_hash());
        assert_eq!(after.state_hash(), board.snapshot().state_hash());
    }
}
