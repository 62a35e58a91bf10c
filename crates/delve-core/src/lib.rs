//! delve-core: dungeon generation and routing
//!
//! Generates a connected room-and-corridor map on a grid, turns it into a
//! weighted room graph, and finds shortest routes between rooms.
//!
//! The three stages are pure functions over owned values:
//!
//! ```
//! use delve_core::{DungeonRng, dungeon, path};
//!
//! let mut rng = DungeonRng::new(7);
//! let dungeon = dungeon::generate(10, 10, 20, 0.2, &mut rng);
//! let graph = dungeon.graph();
//! let (start, end) = dungeon.random_endpoints(&mut rng).unwrap();
//! let route = path::shortest_path(&graph, start, end).unwrap();
//! assert!(route.is_reachable());
//! ```
//!
//! There is no I/O here beyond reading an optional config file.

pub mod dungeon;
pub mod graph;
pub mod path;

mod config;
mod consts;
mod error;
mod rng;

pub use config::{GenerationConfig, WeightPolicy};
pub use consts::*;
pub use error::{DungeonError, ParsePositionError};
pub use rng::DungeonRng;
