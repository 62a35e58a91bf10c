//! Route finding between rooms
//!
//! Single-source Dijkstra over a room graph, with predecessor recovery and
//! path reconstruction.

mod dijkstra;

pub use dijkstra::{
    Cost, DistanceTable, PredecessorMap, ShortestPath, dijkstra, predecessors, reconstruct,
    shortest_path,
};
