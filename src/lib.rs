//! # Warren
//!
//! Procedural dungeon floor generation and grid-based monster navigation.
//!
//! ## Architecture Overview
//!
//! Warren is the simulation core of a classic turn-based roguelike. It owns
//! the tile grid, the floor generator, and the navigation subsystem that
//! lets monsters hunt the hero across that grid:
//!
//! - **Floor model**: tile grid, rooms, reveal bookkeeping
//! - **Generation**: randomized room placement, tunnel routing with
//!   connectivity guarantees, depth-dependent door classification
//! - **Visibility**: line-of-sight queries and hero/monster mutual detection
//! - **Navigation**: wavefront distance field and per-agent move selection
//!
//! Everything runs synchronously inside one game turn. Rendering, input,
//! inventory, combat resolution, and the turn loop itself are external
//! collaborators; this crate exposes only data and queries to them.

pub mod floor;
pub mod generation;
pub mod navigation;
pub mod visibility;

pub use floor::{CardinalDirection, Direction, FloorGrid, Position, Room, Tile};
pub use generation::{Floor, FloorGenerator, GenerationConfig};
pub use navigation::{
    advance_agents, agent_at, navigate_agent, Agent, AgentId, AgentKind, DistanceField,
    NavOutcome, UNMAPPED,
};
pub use visibility::{in_line_of_sight, mutual_detection, visible_radius, SightEffects};

/// Core error type for the Warren generation and navigation engine.
#[derive(thiserror::Error, Debug)]
pub enum WarrenError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Floor or grid state is invalid
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Generation exhausted its retry budgets
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Warren codebase.
pub type WarrenResult<T> = Result<T, WarrenError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generation and navigation constants.
pub mod config {
    /// Floor width in tiles at depth 1.
    pub const FLOOR_WIDTH_START: i32 = 80;

    /// Floor height in tiles at depth 1.
    pub const FLOOR_HEIGHT_START: i32 = 80;

    /// Cap on floor width; reached at depth 108.
    pub const FLOOR_WIDTH_MAX: i32 = 400;

    /// Cap on floor height.
    pub const FLOOR_HEIGHT_MAX: i32 = 400;

    /// Smallest open floor span of a room, walls excluded.
    pub const MIN_ROOM_FLOOR_DIMENSION: i32 = 5;

    /// Largest open floor span of a room, walls excluded.
    pub const MAX_ROOM_FLOOR_DIMENSION: i32 = 16;

    /// Required void tiles between the wall rings of two rooms. One tile is
    /// enough for a tunnel to pass between them.
    pub const MIN_MARGIN_BETWEEN_ROOMS: i32 = 1;

    /// Random placements tried for a single room before giving up on it.
    pub const ROOM_PLACEMENT_ATTEMPT_LIMIT: u32 = 2000;

    /// Full placement-pass restarts allowed when fewer than 2 rooms fit.
    pub const ROOM_PASS_ATTEMPT_LIMIT: u32 = 100;

    /// Tunnel walks (including collapsed ones) allowed before the network
    /// attempt is abandoned.
    pub const TUNNEL_WALK_ATTEMPT_LIMIT: u32 = 100;

    /// Whole-network rebuilds allowed before floor generation is fatal.
    pub const TUNNEL_NETWORK_ATTEMPT_LIMIT: u32 = 100;

    /// Chance per room tile of spawning a monster during generation.
    pub const SPAWN_MONSTER_CHANCE: f64 = 0.006;

    /// Percent chance per turn of noticing an adjacent hidden door.
    pub const CHANCE_TO_FIND: i32 = 20;

    /// Percentile where the hidden-door band starts.
    pub const HIDDEN_DOOR_BAND_LOW: i32 = 50;

    /// Percentile where the locked-door band starts.
    pub const LOCKED_DOOR_BAND_LOW: i32 = 75;

    /// Cap on the width of the hidden/locked door bands (reached at depth 31).
    pub const DOOR_BAND_WIDTH_CAP: i32 = 24;

    /// Depth at or below which rooms are always lit and doors always open.
    pub const SAFE_DEPTH: u32 = 5;

    /// Depth after which stairs going up may appear.
    pub const STAIRS_UP_MIN_DEPTH: u32 = 30;

    /// Random directions tried by a roaming agent before it stays put.
    pub const ROAM_ATTEMPT_LIMIT: u32 = 64;
}
