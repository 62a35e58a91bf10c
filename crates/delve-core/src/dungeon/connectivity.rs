//! Room connectivity via equivalence classes

use hashbrown::HashMap;

use super::Position;

/// Tracks which rooms are joined by corridors
///
/// Each room carries an equivalence class; rooms in the same class are
/// reachable from one another through recorded connections.
#[derive(Debug, Clone)]
pub struct ConnectivityTracker {
    class: HashMap<Position, usize>,
}

impl ConnectivityTracker {
    /// Create a tracker where every room is its own class
    pub fn new(rooms: &[Position]) -> Self {
        Self {
            class: rooms.iter().enumerate().map(|(i, p)| (*p, i)).collect(),
        }
    }

    /// Check if two rooms are in the same class. Unknown rooms are never connected.
    pub fn are_connected(&self, a: Position, b: Position) -> bool {
        match (self.class.get(&a), self.class.get(&b)) {
            (Some(ca), Some(cb)) => ca == cb,
            _ => false,
        }
    }

    /// Merge the classes of two rooms
    pub fn merge(&mut self, a: Position, b: Position) {
        let (Some(&new_class), Some(&old_class)) = (self.class.get(&a), self.class.get(&b)) else {
            return;
        };
        if new_class == old_class {
            return;
        }
        for eq in self.class.values_mut() {
            if *eq == old_class {
                *eq = new_class;
            }
        }
    }

    /// Check if all rooms are connected
    pub fn all_connected(&self) -> bool {
        let mut rooms = self.class.keys();
        let Some(&first) = rooms.next() else {
            return true;
        };
        rooms.all(|&room| self.are_connected(first, room))
    }
}
