use std::collections::{BTreeMap, BTreeSet, VecDeque};

use delve_core::dungeon::{CellType, Connection, Dungeon, Grid, Position, generate};
use delve_core::graph::build_graph;
use delve_core::path::dijkstra;
use delve_core::{DungeonRng, GenerationConfig, WeightPolicy};
use proptest::prelude::*;

/// Rooms reachable from `start` walking recorded connections only
fn reachable_via_connections(start: Position, connections: &[Connection]) -> BTreeSet<Position> {
    let mut adjacency: BTreeMap<Position, Vec<Position>> = BTreeMap::new();
    for conn in connections {
        adjacency.entry(conn.a).or_default().push(conn.b);
        adjacency.entry(conn.b).or_default().push(conn.a);
    }

    let mut seen = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(pos) = queue.pop_front() {
        for next in adjacency.get(&pos).into_iter().flatten() {
            if seen.insert(*next) {
                queue.push_back(*next);
            }
        }
    }
    seen
}

/// True if `to` can be reached from `from` stepping over passable cells
fn passable_path_exists(grid: &Grid, from: Position, to: Position) -> bool {
    let mut seen = BTreeSet::from([from]);
    let mut queue = VecDeque::from([from]);
    while let Some(pos) = queue.pop_front() {
        if pos == to {
            return true;
        }
        for next in grid.neighbors(pos) {
            let passable = grid.get(next).is_some_and(|c| c.is_passable());
            if passable && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    false
}

fn arb_dungeon() -> impl Strategy<Value = Dungeon> {
    (any::<u64>(), 1usize..14, 1usize..14, 0.0f64..=1.0, 0.0f64..=1.0).prop_map(
        |(seed, width, height, fill, extra)| {
            let capacity = width * height;
            let room_count = ((capacity as f64 * fill) as usize).clamp(1, capacity);
            generate(width, height, room_count, extra, &mut DungeonRng::new(seed))
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_every_room_reachable(dungeon in arb_dungeon()) {
        let rooms = dungeon.rooms();
        prop_assert!(!rooms.is_empty());
        let reached = reachable_via_connections(rooms[0], &dungeon.connections);
        for room in &rooms {
            prop_assert!(reached.contains(room), "room {} unreachable", room);
        }
        prop_assert!(dungeon.is_fully_connected());
    }

    #[test]
    fn prop_connections_join_rooms_through_passable_cells(dungeon in arb_dungeon()) {
        for conn in &dungeon.connections {
            prop_assert_eq!(dungeon.grid.get(conn.a), Some(CellType::Room));
            prop_assert_eq!(dungeon.grid.get(conn.b), Some(CellType::Room));
            prop_assert!(conn.weight >= 1);
            prop_assert!(passable_path_exists(&dungeon.grid, conn.a, conn.b));
        }
    }

    #[test]
    fn prop_no_duplicate_connections(dungeon in arb_dungeon()) {
        let keys: BTreeSet<_> = dungeon.connections.iter().map(Connection::key).collect();
        prop_assert_eq!(keys.len(), dungeon.connections.len());
    }

    #[test]
    fn prop_graph_is_symmetric(dungeon in arb_dungeon()) {
        let graph = dungeon.graph();
        prop_assert!(graph.is_symmetric());
        for a in graph.nodes() {
            for (b, w) in graph.neighbors(a) {
                prop_assert_eq!(graph.weight(b, a), Some(w));
            }
        }
    }

    #[test]
    fn prop_graph_nodes_are_rooms(dungeon in arb_dungeon()) {
        let graph = dungeon.graph();
        let nodes: Vec<Position> = graph.nodes().collect();
        let mut rooms = dungeon.rooms();
        rooms.sort();
        prop_assert_eq!(nodes, rooms);
    }

    #[test]
    fn prop_build_graph_is_idempotent(dungeon in arb_dungeon()) {
        let first = build_graph(&dungeon.grid, &dungeon.connections);
        let second = build_graph(&dungeon.grid, &dungeon.connections);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_same_seed_same_dungeon(seed in any::<u64>(), extra in 0.0f64..=1.0) {
        let a = generate(9, 7, 30, extra, &mut DungeonRng::new(seed));
        let b = generate(9, 7, 30, extra, &mut DungeonRng::new(seed));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_single_room(seed in any::<u64>(), width in 1usize..20, height in 1usize..20) {
        let dungeon = generate(width, height, 1, 1.0, &mut DungeonRng::new(seed));
        prop_assert!(dungeon.connections.is_empty());
        prop_assert_eq!(dungeon.grid.count(CellType::Room), 1);
        prop_assert_eq!(dungeon.grid.count(CellType::Corridor), 0);
    }

    #[test]
    fn prop_out_of_range_room_count_is_empty(
        seed in any::<u64>(),
        width in 1usize..10,
        height in 1usize..10,
    ) {
        let mut rng = DungeonRng::new(seed);
        prop_assert!(generate(width, height, 0, 0.5, &mut rng).is_empty());
        prop_assert!(generate(width, height, width * height + 1, 0.5, &mut rng).is_empty());
    }

    #[test]
    fn prop_triangle_inequality(seed in any::<u64>()) {
        let config = GenerationConfig {
            width: 6,
            height: 6,
            room_count: 14,
            extra_edge_probability: 0.5,
            weights: WeightPolicy::Random { max: 9 },
            seed: Some(seed),
        };
        let dungeon = delve_core::dungeon::generate_with(&config, &mut config.rng());
        let graph = dungeon.graph();

        let tables: BTreeMap<Position, _> = graph
            .nodes()
            .map(|n| (n, dijkstra(&graph, n).unwrap()))
            .collect();

        for (a, from_a) in &tables {
            for (b, from_b) in &tables {
                for c in graph.nodes() {
                    let direct = from_a[&c];
                    let via = from_a[b] + from_b[&c];
                    prop_assert!(direct <= via, "d({},{}) > d({},{}) + d({},{})", a, c, a, b, b, c);
                }
            }
        }
    }
}
