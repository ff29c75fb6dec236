//! # Generation Module
//!
//! Builds one playable dungeon floor: non-overlapping rooms, a tunnel
//! network guaranteeing every room is reachable, depth-dependent door
//! states, and the initial hero, stairs, and monster placements.
//!
//! Generation is synchronous and runs to completion inside one call. Local
//! failures (a room that will not fit, a tunnel walk that boxes itself in)
//! are retried under explicit counters; only exhausting the outermost
//! budget surfaces as a fatal [`WarrenError::GenerationFailed`].

pub mod doors;
pub mod rooms;
pub mod tunnels;

use crate::config;
use crate::floor::{FloorGrid, Position};
use crate::navigation::{Agent, AgentKind};
use crate::{WarrenError, WarrenResult};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for floor generation.
///
/// The same seed and depth always reproduce the same floor.
///
/// # Examples
///
/// ```
/// use warren::GenerationConfig;
///
/// let config = GenerationConfig::new(42, 1);
/// assert_eq!(config.depth, 1);
/// assert!(config.room_count_override.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation.
    pub seed: u64,
    /// Dungeon depth of the floor being generated, starting at 1.
    pub depth: u32,
    /// Smallest room floor span.
    pub min_room_dimension: i32,
    /// Largest room floor span.
    pub max_room_dimension: i32,
    /// Void tiles required between the wall rings of two rooms.
    pub room_margin: i32,
    /// Chance per room tile of spawning a monster.
    pub monster_spawn_chance: f64,
    /// Debug override pinning the room count to an exact value.
    pub room_count_override: Option<u32>,
}

impl GenerationConfig {
    /// Creates a configuration with the standard dimensions for `depth`.
    pub fn new(seed: u64, depth: u32) -> Self {
        Self {
            seed,
            depth,
            min_room_dimension: config::MIN_ROOM_FLOOR_DIMENSION,
            max_room_dimension: config::MAX_ROOM_FLOOR_DIMENSION,
            room_margin: config::MIN_MARGIN_BETWEEN_ROOMS,
            monster_spawn_chance: config::SPAWN_MONSTER_CHANCE,
            room_count_override: None,
        }
    }

    /// A configuration with the room count pinned, for tests and debugging.
    pub fn with_room_count(seed: u64, depth: u32, rooms: u32) -> Self {
        Self {
            room_count_override: Some(rooms),
            ..Self::new(seed, depth)
        }
    }

    /// Floor dimensions for this configuration's depth. Floors grow three
    /// tiles per depth from 80x80, capping at 400x400.
    pub fn floor_dimensions(&self) -> (i32, i32) {
        let growth = self.depth as i32 * 3 - 3;
        (
            (config::FLOOR_WIDTH_START + growth).min(config::FLOOR_WIDTH_MAX),
            (config::FLOOR_HEIGHT_START + growth).min(config::FLOOR_HEIGHT_MAX),
        )
    }
}

/// One generated dungeon floor, ready to hand to the turn loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Floor {
    /// The tile grid and room list.
    pub grid: FloorGrid,
    /// Depth this floor was generated for.
    pub depth: u32,
    /// Where the hero enters the floor.
    pub hero_spawn: Position,
    /// The stairs leading down to the next floor.
    pub stairs_down: Position,
    /// Occasional stairs leading back up, on deep floors only.
    pub stairs_up: Option<Position>,
    /// Monsters placed during generation.
    pub agents: Vec<Agent>,
}

impl Floor {
    /// Serializes the floor to JSON for save files.
    pub fn to_json(&self) -> WarrenResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restores a floor from its JSON form.
    pub fn from_json(data: &str) -> WarrenResult<Self> {
        Ok(serde_json::from_str(data)?)
    }
}

/// Builds complete floors from a [`GenerationConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FloorGenerator;

impl FloorGenerator {
    /// Generates a floor from the configuration's seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::{FloorGenerator, GenerationConfig};
    ///
    /// let config = GenerationConfig::new(12345, 1);
    /// let floor = FloorGenerator::generate(&config).unwrap();
    /// assert!(floor.grid.rooms().len() >= 2);
    /// ```
    pub fn generate(config: &GenerationConfig) -> WarrenResult<Floor> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        Self::generate_with_rng(config, &mut rng)
    }

    /// Generates a floor drawing randomness from the caller's generator.
    pub fn generate_with_rng(config: &GenerationConfig, rng: &mut StdRng) -> WarrenResult<Floor> {
        let (width, height) = config.floor_dimensions();
        let mut grid = FloorGrid::new(width, height)?;

        let (min_rooms, max_rooms) = room_count_bounds(config, width, height);
        debug!(
            "begin creating floor {}x{} at depth {} with {}..={} rooms",
            width, height, config.depth, min_rooms, max_rooms
        );

        rooms::place_rooms(&mut grid, config, min_rooms, max_rooms, rng)?;

        let mut network_attempts = 0u32;
        while let tunnels::TunnelNetwork::Collapsed = tunnels::connect_rooms(&mut grid, rng)? {
            tunnels::clear_tunnel_network(&mut grid)?;
            network_attempts += 1;
            warn!(
                "tunnel network collapsed, clearing and retrying (attempt {network_attempts})"
            );
            if network_attempts > config::TUNNEL_NETWORK_ATTEMPT_LIMIT {
                return Err(WarrenError::GenerationFailed(
                    "all attempts to create tunnels have failed".to_string(),
                ));
            }
        }

        doors::classify_doors(&mut grid, config.depth, rng)?;

        let hero_spawn = random_room_point(&grid, rng);
        let stairs_down = place_stairs_down(&mut grid, hero_spawn, rng)?;
        let stairs_up = place_stairs_up(&mut grid, config.depth, hero_spawn, stairs_down, rng)?;
        let agents = spawn_agents(&grid, config, hero_spawn, rng);

        debug!(
            "finished creating floor: {} rooms, {} agents",
            grid.rooms().len(),
            agents.len()
        );

        Ok(Floor {
            grid,
            depth: config.depth,
            hero_spawn,
            stairs_down,
            stairs_up,
            agents,
        })
    }
}

/// Room count bounds scale with floor area unless pinned by the override.
fn room_count_bounds(config: &GenerationConfig, width: i32, height: i32) -> (u32, u32) {
    if let Some(count) = config.room_count_override {
        return (count, count);
    }
    let area = width * height;
    let min = 1 + (area + 799) / 800;
    let max = area / 400;
    (min as u32, max as u32)
}

fn random_room_point(grid: &FloorGrid, rng: &mut StdRng) -> Position {
    let rooms = grid.rooms();
    let room = rooms[rng.gen_range(0..rooms.len())];
    room.random_interior_point(rng)
}

/// Drops the stairs down on a random room tile the hero is not standing on.
fn place_stairs_down(
    grid: &mut FloorGrid,
    hero: Position,
    rng: &mut StdRng,
) -> WarrenResult<Position> {
    let stairs = loop {
        let candidate = random_room_point(grid, rng);
        if candidate != hero {
            break candidate;
        }
    };
    grid.set_tile(stairs, crate::Tile::StairsDown)?;
    Ok(stairs)
}

/// Deep floors occasionally offer stairs back up, letting the hero retreat
/// to easier monsters. Odds are 0.05% per depth past the threshold.
fn place_stairs_up(
    grid: &mut FloorGrid,
    depth: u32,
    hero: Position,
    stairs_down: Position,
    rng: &mut StdRng,
) -> WarrenResult<Option<Position>> {
    if depth <= config::STAIRS_UP_MIN_DEPTH {
        return Ok(None);
    }
    if rng.gen::<f64>() >= depth as f64 * 0.0005 {
        return Ok(None);
    }
    let stairs = loop {
        let candidate = random_room_point(grid, rng);
        if candidate != hero && candidate != stairs_down {
            break candidate;
        }
    };
    grid.set_tile(stairs, crate::Tile::StairsUp)?;
    Ok(Some(stairs))
}

/// Rolls every room tile for a monster spawn, skipping the hero's tile.
fn spawn_agents(
    grid: &FloorGrid,
    config: &GenerationConfig,
    hero: Position,
    rng: &mut StdRng,
) -> Vec<Agent> {
    let mut agents = Vec::new();
    for room in grid.rooms() {
        for x in room.left()..room.right() {
            for y in room.top()..room.bottom() {
                let pos = Position::new(x, y);
                if pos == hero {
                    continue;
                }
                if rng.gen::<f64>() < config.monster_spawn_chance {
                    agents.push(Agent::new(AgentKind::Rat, pos));
                }
            }
        }
    }
    agents
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_dimensions_grow_with_depth_and_cap() {
        assert_eq!(GenerationConfig::new(0, 1).floor_dimensions(), (80, 80));
        assert_eq!(GenerationConfig::new(0, 2).floor_dimensions(), (83, 83));
        assert_eq!(GenerationConfig::new(0, 107).floor_dimensions(), (398, 398));
        assert_eq!(GenerationConfig::new(0, 108).floor_dimensions(), (400, 400));
        assert_eq!(GenerationConfig::new(0, 200).floor_dimensions(), (400, 400));
    }

    #[test]
    fn room_count_bounds_scale_with_area() {
        let config = GenerationConfig::new(0, 1);
        let (min, max) = room_count_bounds(&config, 80, 80);
        assert_eq!(min, 9); // 1 + ceil(6400 / 800)
        assert_eq!(max, 16); // 6400 / 400
    }

    #[test]
    fn room_count_override_pins_bounds() {
        let config = GenerationConfig::with_room_count(0, 1, 5);
        assert_eq!(room_count_bounds(&config, 80, 80), (5, 5));
    }

    #[test]
    fn stairs_down_lands_in_a_room_off_the_hero() {
        let config = GenerationConfig::new(99, 1);
        let floor = FloorGenerator::generate(&config).unwrap();
        assert_ne!(floor.stairs_down, floor.hero_spawn);
        assert!(floor.grid.room_containing(floor.stairs_down).is_some());
        assert_eq!(floor.grid.tile(floor.stairs_down), crate::Tile::StairsDown);
    }

    #[test]
    fn saved_floor_restores_identically() {
        let config = GenerationConfig::new(77, 2);
        let floor = FloorGenerator::generate(&config).unwrap();
        let json = floor.to_json().unwrap();
        let restored = Floor::from_json(&json).unwrap();
        assert_eq!(restored.grid, floor.grid);
        assert_eq!(restored.depth, floor.depth);
        assert_eq!(restored.agents.len(), floor.agents.len());
    }

    #[test]
    fn shallow_floors_never_have_stairs_up() {
        for seed in 0..10 {
            let config = GenerationConfig::new(seed, 3);
            let floor = FloorGenerator::generate(&config).unwrap();
            assert!(floor.stairs_up.is_none());
        }
    }
}
