//! Corridor generation
//!
//! Rooms are joined in two phases:
//! 1. Spanning: repeatedly link the closest unconnected room to the connected
//!    set (Manhattan distance) and carve an L-shaped corridor between them
//! 2. Extra: each orthogonally adjacent room pair not yet linked gets a
//!    corridor with a fixed probability, closing cycles

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::WeightPolicy;
use crate::rng::DungeonRng;

use super::{CellType, Grid, Position};

/// Which phase produced a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionKind {
    /// Part of the spanning tree that guarantees reachability
    Spanning,
    /// Optional shortcut between adjacent rooms
    Extra,
}

/// A corridor linking two rooms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub a: Position,
    pub b: Position,
    /// Travel cost, always at least 1
    pub weight: u32,
    pub kind: ConnectionKind,
}

impl Connection {
    pub fn new(a: Position, b: Position, weight: u32, kind: ConnectionKind) -> Self {
        Self { a, b, weight, kind }
    }

    /// Compare endpoints as an unordered pair
    pub fn links(&self, p: Position, q: Position) -> bool {
        (self.a == p && self.b == q) || (self.a == q && self.b == p)
    }

    /// Endpoints with the smaller position first
    pub fn key(&self) -> (Position, Position) {
        if self.a <= self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }
}

/// Carve an L-shaped corridor from `from` to `to`
///
/// Runs horizontally along `from`'s row to `to`'s column, then vertically
/// along that column. Only `Empty` cells change; rooms and existing
/// corridors are left alone.
pub fn carve_corridor(grid: &mut Grid, from: Position, to: Position) {
    let row = from.y;
    let (x_lo, x_hi) = (from.x.min(to.x), from.x.max(to.x));
    for x in x_lo..=x_hi {
        dig(grid, Position::new(x, row));
    }

    let col = to.x;
    let (y_lo, y_hi) = (from.y.min(to.y), from.y.max(to.y));
    for y in y_lo..=y_hi {
        dig(grid, Position::new(col, y));
    }
}

fn dig(grid: &mut Grid, pos: Position) {
    if grid.get(pos) == Some(CellType::Empty) {
        grid.set(pos, CellType::Corridor);
    }
}

/// Closest (connected, unconnected) pair by Manhattan distance
///
/// Scans connected rooms in ascending order, and for each the unconnected
/// rooms in ascending order; the first pair reaching the minimum wins.
fn closest_pair(
    connected: &BTreeSet<Position>,
    unconnected: &BTreeSet<Position>,
) -> Option<(Position, Position)> {
    let mut best: Option<(usize, Position, Position)> = None;
    for &c in connected {
        for &u in unconnected {
            let dist = c.manhattan(u);
            if best.is_none_or(|(d, _, _)| dist < d) {
                best = Some((dist, c, u));
                if dist == 1 {
                    // Nothing can beat an adjacent pair
                    return Some((c, u));
                }
            }
        }
    }
    best.map(|(_, c, u)| (c, u))
}

/// Join every room into one spanning tree
///
/// `rooms[0]` seeds the connected set. Returns one `Spanning` connection
/// per remaining room.
pub fn connect_rooms(
    grid: &mut Grid,
    rooms: &[Position],
    weights: WeightPolicy,
    rng: &mut DungeonRng,
) -> Vec<Connection> {
    let Some((&first, rest)) = rooms.split_first() else {
        return Vec::new();
    };

    let mut connected = BTreeSet::from([first]);
    let mut unconnected: BTreeSet<Position> = rest.iter().copied().collect();
    unconnected.remove(&first);

    let mut connections = Vec::with_capacity(unconnected.len());

    while let Some((from, to)) = closest_pair(&connected, &unconnected) {
        carve_corridor(grid, from, to);
        let weight = weights.draw(rng);
        trace!(%from, %to, weight, "spanning corridor");
        connections.push(Connection::new(from, to, weight, ConnectionKind::Spanning));
        unconnected.remove(&to);
        connected.insert(to);
    }

    debug!(count = connections.len(), "spanning tree complete");
    connections
}

/// Add extra corridors between adjacent rooms
///
/// Visits room pairs `(i, j)`, `i < j`, in the order given. Each adjacent
/// pair not already linked is linked with `probability`.
pub fn add_extra_connections(
    rooms: &[Position],
    connections: &mut Vec<Connection>,
    probability: f64,
    weights: WeightPolicy,
    rng: &mut DungeonRng,
) -> usize {
    let before = connections.len();

    for (i, &a) in rooms.iter().enumerate() {
        for &b in &rooms[i + 1..] {
            if !a.is_adjacent(b) || connections.iter().any(|c| c.links(a, b)) {
                continue;
            }
            if rng.chance(probability) {
                let weight = weights.draw(rng);
                trace!(from = %a, to = %b, weight, "extra corridor");
                connections.push(Connection::new(a, b, weight, ConnectionKind::Extra));
            }
        }
    }

    let added = connections.len() - before;
    debug!(added, probability, "extra corridors added");
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::ConnectivityTracker;

    fn grid_with_rooms(width: usize, height: usize, rooms: &[Position]) -> Grid {
        let mut grid = Grid::new(width, height);
        for &room in rooms {
            grid.set(room, CellType::Room);
        }
        grid
    }

    #[test]
    fn test_links_is_unordered() {
        let a = Position::new(0, 0);
        let b = Position::new(0, 1);
        let conn = Connection::new(a, b, 1, ConnectionKind::Spanning);
        assert!(conn.links(a, b));
        assert!(conn.links(b, a));
        assert!(!conn.links(a, Position::new(1, 0)));
        assert_eq!(Connection::new(b, a, 1, ConnectionKind::Extra).key(), conn.key());
    }

    #[test]
    fn test_carve_corridor_l_shape() {
        let from = Position::new(1, 1);
        let to = Position::new(4, 3);
        let mut grid = grid_with_rooms(6, 5, &[from, to]);

        carve_corridor(&mut grid, from, to);

        // Horizontal leg along row 1, vertical leg along column 4
        for x in 2..=4 {
            assert_eq!(grid.get(Position::new(x, 1)), Some(CellType::Corridor));
        }
        assert_eq!(grid.get(Position::new(4, 2)), Some(CellType::Corridor));
        // Endpoints stay rooms
        assert_eq!(grid.get(from), Some(CellType::Room));
        assert_eq!(grid.get(to), Some(CellType::Room));
        assert_eq!(grid.count(CellType::Corridor), 4);
    }

    #[test]
    fn test_carve_corridor_leaves_rooms() {
        let from = Position::new(4, 0);
        let to = Position::new(0, 0);
        let middle = Position::new(2, 0);
        let mut grid = grid_with_rooms(5, 1, &[from, to, middle]);

        carve_corridor(&mut grid, from, to);

        assert_eq!(grid.get(middle), Some(CellType::Room));
        assert_eq!(grid.count(CellType::Corridor), 2);
    }

    #[test]
    fn test_closest_pair_first_minimum_wins() {
        let connected = BTreeSet::from([Position::new(2, 2)]);
        // (1, 2) and (3, 2) are both at distance 1; (1, 2) sorts first
        let unconnected = BTreeSet::from([
            Position::new(3, 2),
            Position::new(1, 2),
            Position::new(5, 5),
        ]);
        assert_eq!(
            closest_pair(&connected, &unconnected),
            Some((Position::new(2, 2), Position::new(1, 2)))
        );
        assert_eq!(closest_pair(&connected, &BTreeSet::new()), None);
    }

    #[test]
    fn test_connect_rooms_spans_all() {
        let rooms = vec![
            Position::new(0, 0),
            Position::new(5, 0),
            Position::new(0, 4),
            Position::new(6, 6),
        ];
        let mut grid = grid_with_rooms(8, 8, &rooms);
        let mut rng = DungeonRng::new(42);

        let connections = connect_rooms(&mut grid, &rooms, WeightPolicy::Uniform, &mut rng);

        assert_eq!(connections.len(), rooms.len() - 1);
        assert!(connections.iter().all(|c| c.kind == ConnectionKind::Spanning));
        assert!(connections.iter().all(|c| c.weight == 1));

        let mut tracker = ConnectivityTracker::new(&rooms);
        for conn in &connections {
            tracker.merge(conn.a, conn.b);
        }
        assert!(tracker.all_connected());
        assert!(grid.count(CellType::Corridor) > 0);
    }

    #[test]
    fn test_connect_single_room() {
        let rooms = vec![Position::new(1, 1)];
        let mut grid = grid_with_rooms(3, 3, &rooms);
        let mut rng = DungeonRng::new(1);
        assert!(connect_rooms(&mut grid, &rooms, WeightPolicy::Uniform, &mut rng).is_empty());
        assert!(connect_rooms(&mut grid, &[], WeightPolicy::Uniform, &mut rng).is_empty());
    }

    #[test]
    fn test_extra_connections_certain() {
        // 2x2 block: 4 adjacent pairs, spanning tree uses 3
        let rooms = vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(0, 1),
            Position::new(1, 1),
        ];
        let mut grid = grid_with_rooms(2, 2, &rooms);
        let mut rng = DungeonRng::new(5);
        let mut connections = connect_rooms(&mut grid, &rooms, WeightPolicy::Uniform, &mut rng);
        assert_eq!(connections.len(), 3);

        let added =
            add_extra_connections(&rooms, &mut connections, 1.0, WeightPolicy::Uniform, &mut rng);
        assert_eq!(added, 1);
        assert_eq!(connections.len(), 4);
        assert_eq!(connections[3].kind, ConnectionKind::Extra);

        // No duplicates, even when called again
        let again =
            add_extra_connections(&rooms, &mut connections, 1.0, WeightPolicy::Uniform, &mut rng);
        assert_eq!(again, 0);
    }

    #[test]
    fn test_extra_connections_skip_reversed_pair() {
        let (a, b) = (Position::new(0, 0), Position::new(1, 0));
        let rooms = vec![a, b];
        let mut connections = vec![Connection::new(b, a, 1, ConnectionKind::Spanning)];
        let mut rng = DungeonRng::new(5);
        let added =
            add_extra_connections(&rooms, &mut connections, 1.0, WeightPolicy::Uniform, &mut rng);
        assert_eq!(added, 0);
        assert_eq!(connections.len(), 1);
    }

    #[test]
    fn test_extra_connections_never() {
        let rooms = vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)];
        let mut connections = Vec::new();
        let mut rng = DungeonRng::new(5);
        let added =
            add_extra_connections(&rooms, &mut connections, 0.0, WeightPolicy::Uniform, &mut rng);
        assert_eq!(added, 0);
        assert!(connections.is_empty());
    }

    #[test]
    fn test_random_weights_in_range() {
        let rooms: Vec<Position> = (0..6).map(|x| Position::new(x * 2, 0)).collect();
        let mut grid = grid_with_rooms(12, 1, &rooms);
        let mut rng = DungeonRng::new(11);
        let connections =
            connect_rooms(&mut grid, &rooms, WeightPolicy::Random { max: 3 }, &mut rng);
        assert!(connections.iter().all(|c| (1..=3).contains(&c.weight)));
    }
}
