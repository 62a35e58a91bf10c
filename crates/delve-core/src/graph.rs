//! Room adjacency graph
//!
//! Built from a grid and its connections; read-only once built.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::dungeon::{Connection, Grid, Position};
use crate::error::DungeonError;

/// Corridor travel cost
pub type Weight = u32;

type Adjacency = BTreeMap<Position, BTreeMap<Position, Weight>>;

/// Undirected weighted graph over room positions
///
/// Every edge is stored in both directions with the same weight.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Graph {
    adjacency: Adjacency,
}

impl Graph {
    pub fn contains(&self, node: Position) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Neighbors of `node` with edge weights, in position order
    pub fn neighbors(&self, node: Position) -> impl Iterator<Item = (Position, Weight)> + '_ {
        self.adjacency
            .get(&node)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(p, w)| (*p, *w)))
    }

    /// Weight of the edge `a -> b`, if present
    pub fn weight(&self, a: Position, b: Position) -> Option<Weight> {
        self.adjacency.get(&a)?.get(&b).copied()
    }

    /// All nodes, in position order
    pub fn nodes(&self) -> impl Iterator<Item = Position> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        let directed: usize = self.adjacency.values().map(BTreeMap::len).sum();
        directed / 2
    }

    /// Check that every edge has a matching reverse edge of equal weight
    pub fn is_symmetric(&self) -> bool {
        self.adjacency.iter().all(|(&a, edges)| {
            edges
                .iter()
                .all(|(&b, &w)| self.weight(b, a) == Some(w))
        })
    }

    fn insert_edge(&mut self, a: Position, b: Position, weight: Weight) {
        self.adjacency.entry(a).or_default().insert(b, weight);
        self.adjacency.entry(b).or_default().insert(a, weight);
    }

    /// Adjacency as pretty-printed JSON, keyed by `"x,y"`
    ///
    /// Debugging aid only; nothing reads this format back.
    pub fn to_json(&self) -> Result<String, DungeonError> {
        let key = |p: &Position| format!("{},{}", p.x, p.y);
        let mut root = Map::new();
        for (node, edges) in &self.adjacency {
            let neighbors: Map<String, Value> =
                edges.iter().map(|(p, w)| (key(p), Value::from(*w))).collect();
            root.insert(key(node), Value::Object(neighbors));
        }
        Ok(serde_json::to_string_pretty(&Value::Object(root))?)
    }
}

/// Build the room graph for a grid and its connections
///
/// Every `Room` cell becomes a node, even with no corridors, and nothing
/// else does. Each connection adds its weight in both directions; one with
/// an endpoint that is not a room is skipped. Pure: same inputs, same graph.
pub fn build_graph(grid: &Grid, connections: &[Connection]) -> Graph {
    let mut graph = Graph {
        adjacency: grid
            .rooms()
            .into_iter()
            .map(|room| (room, BTreeMap::new()))
            .collect(),
    };

    for conn in connections {
        if !(graph.contains(conn.a) && graph.contains(conn.b)) {
            warn!(a = %conn.a, b = %conn.b, "connection endpoint is not a room");
            continue;
        }
        graph.insert_edge(conn.a, conn.b, conn.weight);
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph built"
    );
    graph
}

/// Hand-assembles a `Graph`, checking each node and edge as it is added
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an isolated node
    pub fn node(mut self, node: impl Into<Position>) -> Result<Self, DungeonError> {
        let node = node.into();
        if self.graph.contains(node) {
            return Err(DungeonError::DuplicateNode(node));
        }
        self.graph.adjacency.insert(node, BTreeMap::new());
        Ok(self)
    }

    /// Add an undirected edge between two existing nodes
    pub fn edge(
        mut self,
        a: impl Into<Position>,
        b: impl Into<Position>,
        weight: Weight,
    ) -> Result<Self, DungeonError> {
        let (a, b) = (a.into(), b.into());
        for node in [a, b] {
            if !self.graph.contains(node) {
                return Err(DungeonError::InvalidNode(node));
            }
        }
        if weight == 0 {
            return Err(DungeonError::InvalidWeight(weight));
        }
        self.graph.insert_edge(a, b, weight);
        Ok(self)
    }

    pub fn build(self) -> Graph {
        self.graph
    }
}
