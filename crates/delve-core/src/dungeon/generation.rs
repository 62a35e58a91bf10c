//! Dungeon generation
//!
//! Grows rooms outward from the center cell, joins them with a spanning tree
//! of corridors, then sprinkles extra corridors between adjacent rooms.

use tracing::{debug, warn};

use crate::config::{GenerationConfig, WeightPolicy, check_room_count};
use crate::error::DungeonError;
use crate::rng::DungeonRng;

use super::corridor::{add_extra_connections, connect_rooms};
use super::grid::cell_count;
use super::{CellType, Dungeon, Grid, Position};

/// Cell that seeds room growth: the grid center
pub fn seed_cell(width: usize, height: usize) -> Position {
    Position::new(width / 2, height / 2)
}

/// Grow rooms one at a time from `start` until `room_count` exist
///
/// Each step picks uniformly among rooms that still have an empty
/// orthogonal neighbor, then uniformly among that room's empty neighbors.
/// Growth stops early when no room can expand. Returns rooms in growth
/// order, `start` first.
pub fn grow_rooms(
    grid: &mut Grid,
    start: Position,
    room_count: usize,
    rng: &mut DungeonRng,
) -> Vec<Position> {
    if !grid.contains(start) || room_count == 0 {
        return Vec::new();
    }

    grid.set(start, CellType::Room);
    let mut rooms = vec![start];

    while rooms.len() < room_count {
        let expandable: Vec<Position> = rooms
            .iter()
            .copied()
            .filter(|&room| empty_neighbors(grid, room).next().is_some())
            .collect();

        let Some(&parent) = rng.choose(&expandable) else {
            debug!(
                grown = rooms.len(),
                requested = room_count,
                "room growth stalled"
            );
            break;
        };

        let open: Vec<Position> = empty_neighbors(grid, parent).collect();
        if let Some(&room) = rng.choose(&open) {
            grid.set(room, CellType::Room);
            rooms.push(room);
        }
    }

    rooms
}

fn empty_neighbors(grid: &Grid, pos: Position) -> impl Iterator<Item = Position> + '_ {
    grid.neighbors(pos)
        .filter(move |p| grid.get(*p) == Some(CellType::Empty))
}

/// Generate a dungeon with uniform corridor weights
///
/// An out-of-range `room_count` yields `Dungeon::empty()`.
pub fn generate(
    width: usize,
    height: usize,
    room_count: usize,
    extra_edge_probability: f64,
    rng: &mut DungeonRng,
) -> Dungeon {
    try_generate(width, height, room_count, extra_edge_probability, rng).unwrap_or_else(|err| {
        warn!(%err, "dungeon generation rejected");
        Dungeon::empty()
    })
}

/// Like [`generate`], reporting a bad room count as an error
pub fn try_generate(
    width: usize,
    height: usize,
    room_count: usize,
    extra_edge_probability: f64,
    rng: &mut DungeonRng,
) -> Result<Dungeon, DungeonError> {
    let capacity =
        cell_count(width, height).ok_or(DungeonError::InvalidDimensions { width, height })?;
    check_room_count(room_count, capacity)?;
    build(
        width,
        height,
        room_count,
        extra_edge_probability,
        WeightPolicy::Uniform,
        rng,
    )
}

/// Generate a dungeon from a config
///
/// An invalid config yields `Dungeon::empty()`.
pub fn generate_with(config: &GenerationConfig, rng: &mut DungeonRng) -> Dungeon {
    try_generate_with(config, rng).unwrap_or_else(|err| {
        warn!(%err, "dungeon generation rejected");
        Dungeon::empty()
    })
}

/// Like [`generate_with`], reporting an invalid config as an error
pub fn try_generate_with(
    config: &GenerationConfig,
    rng: &mut DungeonRng,
) -> Result<Dungeon, DungeonError> {
    config.validate()?;
    build(
        config.width,
        config.height,
        config.room_count,
        config.extra_edge_probability,
        config.weights,
        rng,
    )
}

fn build(
    width: usize,
    height: usize,
    room_count: usize,
    extra_edge_probability: f64,
    weights: WeightPolicy,
    rng: &mut DungeonRng,
) -> Result<Dungeon, DungeonError> {
    let mut grid = Grid::try_new(width, height)?;

    let rooms = grow_rooms(&mut grid, seed_cell(width, height), room_count, rng);
    let mut connections = connect_rooms(&mut grid, &rooms, weights, rng);
    add_extra_connections(&rooms, &mut connections, extra_edge_probability, weights, rng);

    debug!(
        width,
        height,
        cells = grid.capacity(),
        rooms = rooms.len(),
        corridors = grid.count(CellType::Corridor),
        connections = connections.len(),
        seed = rng.seed(),
        "dungeon generated"
    );

    Ok(Dungeon { grid, connections })
}
