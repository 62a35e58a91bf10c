//! Dungeon system
//!
//! Contains the cell grid, room growth, and corridor connection.

mod cell;
mod connectivity;
mod corridor;
mod generation;
mod grid;

pub use cell::CellType;
pub use connectivity::ConnectivityTracker;
pub use corridor::{
    Connection, ConnectionKind, add_extra_connections, carve_corridor, connect_rooms,
};
pub use generation::{
    generate, generate_with, grow_rooms, seed_cell, try_generate, try_generate_with,
};
pub use grid::{Grid, Position};

use serde::{Deserialize, Serialize};

use crate::consts::{S_END, S_PATH, S_START};
use crate::graph::{Graph, build_graph};
use crate::rng::DungeonRng;

/// One generated dungeon: the cell grid plus the corridors between rooms
///
/// Regeneration produces a new value; nothing here is patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dungeon {
    pub grid: Grid,
    pub connections: Vec<Connection>,
}

impl Dungeon {
    /// The result of a rejected generation request
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Room positions, row-major
    pub fn rooms(&self) -> Vec<Position> {
        self.grid.rooms()
    }

    /// Adjacency graph over the rooms
    pub fn graph(&self) -> Graph {
        build_graph(&self.grid, &self.connections)
    }

    /// Check that the connections join every room
    pub fn is_fully_connected(&self) -> bool {
        let rooms = self.rooms();
        let mut tracker = ConnectivityTracker::new(&rooms);
        for conn in &self.connections {
            tracker.merge(conn.a, conn.b);
        }
        tracker.all_connected()
    }

    /// Two distinct rooms picked at random, for a start and an end
    pub fn random_endpoints(&self, rng: &mut DungeonRng) -> Option<(Position, Position)> {
        let mut rooms = self.rooms();
        if rooms.len() < 2 {
            return None;
        }
        let start = rooms.swap_remove(rng.index(rooms.len()));
        let end = rooms[rng.index(rooms.len())];
        Some((start, end))
    }

    /// ASCII map with `path` overlaid
    ///
    /// Path rooms show as `*`, the first as `S` and the last as `E`.
    pub fn render(&self, path: &[Position]) -> String {
        let mut rows: Vec<Vec<char>> = self
            .grid
            .rows()
            .into_iter()
            .map(|row| row.chars().collect())
            .collect();

        let mut mark = |pos: Position, symbol: char| {
            if let Some(cell) = rows.get_mut(pos.y).and_then(|row| row.get_mut(pos.x)) {
                *cell = symbol;
            }
        };
        for &pos in path {
            mark(pos, S_PATH);
        }
        if let (Some(&start), Some(&end)) = (path.first(), path.last()) {
            mark(start, S_START);
            mark(end, S_END);
        }

        rows.into_iter()
            .map(|row| row.into_iter().collect::<String>() + "\n")
            .collect()
    }
}
