//! Map cell types

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Cell classification
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum CellType {
    #[default]
    Empty = 0,
    Room = 1,
    Corridor = 2,
}

impl CellType {
    /// Check if this cell is a graph node
    pub const fn is_room(&self) -> bool {
        matches!(self, CellType::Room)
    }

    /// Check if this is passable (can walk through)
    pub const fn is_passable(&self) -> bool {
        matches!(self, CellType::Room | CellType::Corridor)
    }

    /// Get the display character for this cell type
    pub const fn symbol(&self) -> char {
        match self {
            CellType::Empty => ' ',
            CellType::Room => '.',
            CellType::Corridor => '#',
        }
    }
}
