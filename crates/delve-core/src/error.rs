//! Error types for generation, graph construction and routing

use thiserror::Error;

use crate::dungeon::Position;

/// Errors surfaced by the dungeon core
#[derive(Debug, Error)]
pub enum DungeonError {
    #[error("Invalid room count {requested}: must be between 1 and {capacity}")]
    InvalidRoomCount { requested: usize, capacity: usize },

    #[error("Invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Invalid extra edge probability {0}: must be within [0, 1]")]
    InvalidProbability(f64),

    #[error("Invalid edge weight {0}: must be positive")]
    InvalidWeight(u32),

    #[error("Node {0} is not in the graph")]
    InvalidNode(Position),

    #[error("Node {0} is already in the graph")]
    DuplicateNode(Position),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error parsing a position written as `x,y`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePositionError {
    #[error("expected `x,y`, got {0:?}")]
    Format(String),

    #[error("invalid coordinate {0:?}")]
    Coordinate(String),
}
