//! Dijkstra shortest paths
//!
//! Distances are settled first with a lazy-deletion priority queue; the
//! predecessor map is derived afterwards from the final distances.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use hashbrown::HashSet;
use tracing::{debug, trace};

use crate::dungeon::Position;
use crate::error::DungeonError;
use crate::graph::Graph;

/// Cumulative route cost; `f64::INFINITY` marks an unreachable node
pub type Cost = f64;

/// Minimum cost from the start to each node
pub type DistanceTable = BTreeMap<Position, Cost>;

/// A node's predecessor on some shortest path; `None` for the start and
/// for unreachable nodes
pub type PredecessorMap = BTreeMap<Position, Option<Position>>;

/// Frontier entry, ordered so `BinaryHeap` pops the cheapest first
///
/// Equal costs pop in insertion order.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    cost: Cost,
    seq: u64,
    node: Position,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: smaller cost, then earlier insertion, is "greater"
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Minimum cost from `start` to every node of `graph`
///
/// Unreached nodes hold `f64::INFINITY`.
pub fn dijkstra(graph: &Graph, start: Position) -> Result<DistanceTable, DungeonError> {
    if !graph.contains(start) {
        return Err(DungeonError::InvalidNode(start));
    }

    let mut distances: DistanceTable = graph.nodes().map(|n| (n, Cost::INFINITY)).collect();
    distances.insert(start, 0.0);

    let mut frontier = BinaryHeap::new();
    let mut seq = 0u64;
    frontier.push(FrontierEntry {
        cost: 0.0,
        seq,
        node: start,
    });

    let mut finalized: HashSet<Position> = HashSet::with_capacity(graph.node_count());

    while let Some(FrontierEntry { cost, node, .. }) = frontier.pop() {
        // Stale entry for a node already settled
        if !finalized.insert(node) {
            continue;
        }
        trace!(%node, cost, "settled");

        for (neighbor, weight) in graph.neighbors(node) {
            let tentative = cost + Cost::from(weight);
            let best = distances.entry(neighbor).or_insert(Cost::INFINITY);
            if tentative < *best {
                *best = tentative;
                seq += 1;
                frontier.push(FrontierEntry {
                    cost: tentative,
                    seq,
                    node: neighbor,
                });
            }
        }
    }

    debug!(%start, settled = finalized.len(), nodes = graph.node_count(), "distances final");
    Ok(distances)
}

/// Derive predecessors from final distances
///
/// For every edge `u -> v` with `dist[v] == dist[u] + w`, `u` becomes the
/// predecessor of `v`. When several edges qualify, the last one visited (in
/// node order) wins; any of them lies on a shortest path. Unreached nodes
/// never act as predecessors.
pub fn predecessors(graph: &Graph, distances: &DistanceTable) -> PredecessorMap {
    let mut preds: PredecessorMap = graph.nodes().map(|n| (n, None)).collect();

    for (&u, &du) in distances {
        if !du.is_finite() {
            continue;
        }
        for (v, weight) in graph.neighbors(u) {
            if distances.get(&v) == Some(&(du + Cost::from(weight))) {
                preds.insert(v, Some(u));
            }
        }
    }

    preds
}

/// Walk predecessors back from `end` and return the path in forward order
///
/// When `end` has no predecessor the path is just `[end]`.
pub fn reconstruct(preds: &PredecessorMap, end: Position) -> Vec<Position> {
    let mut path = vec![end];
    let mut current = end;

    while let Some(&Some(prev)) = preds.get(&current) {
        // A zero-weight cycle could loop forever
        if path.len() > preds.len() {
            break;
        }
        path.push(prev);
        current = prev;
    }

    path.reverse();
    path
}

/// Cost and path of one route query
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// Total weight, `f64::INFINITY` when `end` is unreachable
    pub cost: Cost,
    /// Start to end inclusive. Only `[end]` when unreachable, so check
    /// [`ShortestPath::is_reachable`] first.
    pub path: Vec<Position>,
}

impl ShortestPath {
    pub fn is_reachable(&self) -> bool {
        self.cost.is_finite()
    }

    /// Number of corridors walked
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Shortest route from `start` to `end`
///
/// Both must be nodes of `graph`, otherwise `InvalidNode`. An unreachable
/// `end` is not an error: the cost is infinite and the path degenerate.
pub fn shortest_path(
    graph: &Graph,
    start: Position,
    end: Position,
) -> Result<ShortestPath, DungeonError> {
    if !graph.contains(end) {
        return Err(DungeonError::InvalidNode(end));
    }
    let distances = dijkstra(graph, start)?;
    let preds = predecessors(graph, &distances);

    let cost = distances.get(&end).copied().unwrap_or(Cost::INFINITY);
    let path = reconstruct(&preds, end);

    debug!(%start, %end, cost, hops = path.len().saturating_sub(1), "route solved");
    Ok(ShortestPath { cost, path })
}
