//! delve: dungeon generator and route finder
//!
//! Generates a dungeon, prints it, and optionally solves a route between two
//! rooms.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use delve_core::dungeon::{Dungeon, Position, try_generate_with};
use delve_core::path::shortest_path;
use delve_core::{DEFAULT_MAX_WEIGHT, GenerationConfig, WeightPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Weights {
    /// Every corridor costs 1
    Uniform,
    /// Each corridor costs 1..=max-weight
    Random,
}

/// Generate a room-and-corridor dungeon and find routes through it
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(author, version, about = "Delve - generate a dungeon and route through it", long_about = None)]
struct Args {
    /// JSON file with generation parameters; flags override it
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(short = 'W', long = "width")]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(short = 'H', long = "height")]
    height: Option<usize>,

    /// Number of rooms to grow
    #[arg(short = 'n', long = "rooms")]
    rooms: Option<usize>,

    /// Chance of an extra corridor between adjacent rooms (0..=1)
    #[arg(short = 'e', long = "extra")]
    extra: Option<f64>,

    /// RNG seed for a reproducible dungeon
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Corridor weighting
    #[arg(short = 'w', long = "weights", value_enum)]
    weights: Option<Weights>,

    /// Upper bound for random weights
    #[arg(long = "max-weight", default_value_t = DEFAULT_MAX_WEIGHT)]
    max_weight: u32,

    /// Route start room, as x,y
    #[arg(long = "from", requires = "to")]
    from: Option<Position>,

    /// Route end room, as x,y
    #[arg(long = "to", requires = "from")]
    to: Option<Position>,

    /// Route between two random rooms
    #[arg(short = 'r', long = "random-route", conflicts_with_all = ["from", "to"])]
    random_route: bool,

    /// Print the room graph as JSON instead of the map
    #[arg(long = "json")]
    json: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    /// Defaults, then the config file, then flags
    fn generation_config(&self) -> Result<GenerationConfig> {
        let mut config = match &self.config {
            Some(path) => GenerationConfig::from_path(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => GenerationConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(rooms) = self.rooms {
            config.room_count = rooms;
        }
        if let Some(extra) = self.extra {
            config.extra_edge_probability = extra;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        match self.weights {
            Some(Weights::Uniform) => config.weights = WeightPolicy::Uniform,
            Some(Weights::Random) => {
                config.weights = WeightPolicy::Random {
                    max: self.max_weight,
                }
            }
            None => {}
        }

        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.generation_config()?;
    let mut rng = config.rng();
    info!(seed = rng.seed(), "generating dungeon");

    let dungeon = try_generate_with(&config, &mut rng).context("generating dungeon")?;

    if args.json {
        println!("{}", dungeon.graph().to_json()?);
        return Ok(());
    }

    println!("seed: {}", rng.seed());

    let endpoints = match (args.from, args.to) {
        (Some(from), Some(to)) => Some((from, to)),
        _ if args.random_route => dungeon.random_endpoints(&mut rng),
        _ => None,
    };

    match endpoints {
        Some((from, to)) => print_route(&dungeon, from, to)?,
        None => print!("{}", dungeon.render(&[])),
    }

    Ok(())
}

fn print_route(dungeon: &Dungeon, from: Position, to: Position) -> Result<()> {
    let graph = dungeon.graph();
    for end in [from, to] {
        if !graph.contains(end) {
            bail!("{end} is not a room in this dungeon");
        }
    }

    let route = shortest_path(&graph, from, to)?;
    if !route.is_reachable() {
        print!("{}", dungeon.render(&[]));
        println!("route {from} -> {to}: unreachable");
        return Ok(());
    }

    print!("{}", dungeon.render(&route.path));
    println!(
        "route {from} -> {to}: cost {} over {} corridors",
        route.cost,
        route.hops()
    );
    let steps: Vec<String> = route.path.iter().map(Position::to_string).collect();
    println!("{}", steps.join(" -> "));
    Ok(())
}
