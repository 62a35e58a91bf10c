//! Default generation parameters

/// Default grid dimensions
pub const DEFAULT_WIDTH: usize = 12;
pub const DEFAULT_HEIGHT: usize = 12;

/// Default number of rooms to grow
pub const DEFAULT_ROOM_COUNT: usize = 40;

/// Default chance that an adjacent room pair gets an extra corridor
pub const DEFAULT_EXTRA_EDGE_PROBABILITY: f64 = 0.25;

/// Upper bound on a corridor's travel cost under random weighting
pub const DEFAULT_MAX_WEIGHT: u32 = 10;

/// Travel cost of every corridor under uniform weighting
pub const UNIFORM_WEIGHT: u32 = 1;

/// Map symbols used when rendering a route
pub const S_PATH: char = '*';
pub const S_START: char = 'S';
pub const S_END: char = 'E';
