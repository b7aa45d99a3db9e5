//! Cell states for the occupancy grid.

use serde::{Deserialize, Serialize};

/// State of a single occupancy grid cell.
///
/// - `Free` - Traversable
/// - `Blocked` - Inside an inflated obstacle or the edge margin
/// - `Visited` - Free cell closed by the most recent search (overlay only)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum CellState {
    /// Traversable cell
    #[default]
    Free = 0,

    /// Cell inside the configuration-space obstacles
    Blocked = 1,

    /// Free cell expanded by the last A* search
    Visited = 2,
}

impl CellState {
    /// Is this cell part of the configuration-space obstacles?
    #[inline]
    pub fn is_blocked(self) -> bool {
        self == CellState::Blocked
    }

    /// Can a search enter this cell?
    #[inline]
    pub fn is_passable(self) -> bool {
        !self.is_blocked()
    }

    /// Convert from u8 (for raw storage)
    #[inline]
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => CellState::Blocked,
            2 => CellState::Visited,
            _ => CellState::Free,
        }
    }

    /// Single character representation for debugging
    pub fn as_char(self) -> char {
        match self {
            CellState::Free => '.',
            CellState::Blocked => '#',
            CellState::Visited => 'o',
        }
    }
}
