//! # Navigation Module
//!
//! Monster state and per-turn movement. Each monster is an [`Agent`] that
//! roams at random until it notices the hero, then chases by walking
//! downhill on the shared [`DistanceField`]. An adjacent chaser stops
//! moving; the combat layer decides what happens next.

pub mod distance;

pub use distance::{DistanceField, UNMAPPED};

use crate::floor::{Direction, FloorGrid, Position};
use crate::visibility::in_line_of_sight;
use log::trace;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one agent, stable across serialization.
pub type AgentId = Uuid;

/// The species of a monster, fixing its reaction to seeing the hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentKind {
    Rat,
}

impl AgentKind {
    /// Applies this kind's reaction to catching sight of the hero.
    fn on_sight_of_hero(self, agent: &mut Agent) {
        match self {
            // Rats drop whatever they were doing and give chase.
            AgentKind::Rat => {
                if agent.awake {
                    agent.chasing = true;
                    agent.roaming = false;
                }
            }
        }
    }
}

/// One monster on the floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Stable identity for this agent.
    pub id: AgentId,
    /// Species of the agent.
    pub kind: AgentKind,
    /// Current tile position.
    pub position: Position,
    /// Sleeping agents neither roam nor chase.
    pub awake: bool,
    /// Wandering at random, not yet aware of the hero.
    pub roaming: bool,
    /// Actively pursuing the hero via the distance field.
    pub chasing: bool,
    /// Whether the hero currently knows where this agent is.
    pub discovered: bool,
}

impl Agent {
    /// Spawns an awake, roaming agent at `position`.
    pub fn new(kind: AgentKind, position: Position) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            position,
            awake: true,
            roaming: true,
            chasing: false,
            discovered: false,
        }
    }

    /// Lets the agent react to spotting the hero.
    pub fn see_hero(&mut self) {
        self.kind.on_sight_of_hero(self);
    }

    /// Whether `pos` is within one tile of this agent in any direction.
    pub fn next_to(&self, pos: Position) -> bool {
        self.position.chebyshev_distance(pos) <= 1
    }
}

/// What one agent did with its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Moved,
    Unmoved,
}

/// Index of the agent standing on `pos`, if any.
pub fn agent_at(agents: &[Agent], pos: Position) -> Option<usize> {
    agents.iter().position(|agent| agent.position == pos)
}

/// Runs one monster turn for every agent: recompute the distance field
/// from the hero, then let each agent roam or chase.
pub fn advance_agents(
    grid: &FloorGrid,
    field: &mut DistanceField,
    agents: &mut [Agent],
    hero: Position,
    hero_radius: i32,
    rng: &mut StdRng,
) {
    field.compute(grid, hero, agents);
    for index in 0..agents.len() {
        navigate_agent(grid, field, agents, index, hero, hero_radius, rng);
    }
}

/// Moves the agent at `index` for one turn.
///
/// Sleeping agents hold still. Roamers pick random directions until one is
/// passable. Chasers step to the lowest-valued open neighbor on the
/// distance field, but stand their ground once adjacent to the hero. A
/// chaser the field could not reach roams instead of freezing.
pub fn navigate_agent(
    grid: &FloorGrid,
    field: &DistanceField,
    agents: &mut [Agent],
    index: usize,
    hero: Position,
    hero_radius: i32,
    rng: &mut StdRng,
) -> NavOutcome {
    if !agents[index].awake {
        return NavOutcome::Unmoved;
    }

    let outcome = if agents[index].roaming {
        roam(grid, &mut agents[index], rng)
    } else if !agents[index].next_to(hero) {
        if field.value(agents[index].position) == UNMAPPED {
            // The field never reached this agent; wander until a route
            // opens up.
            roam(grid, &mut agents[index], rng)
        } else {
            chase_step(grid, field, agents, index, rng)
        }
    } else {
        NavOutcome::Unmoved
    };

    // A hero slipping out a door leaves the agent with a stale sighting.
    let agent = &mut agents[index];
    if !in_line_of_sight(grid, agent.position, hero, hero_radius) {
        agent.discovered = false;
    }
    outcome
}

/// Wanders one step in a random passable direction.
fn roam(grid: &FloorGrid, agent: &mut Agent, rng: &mut StdRng) -> NavOutcome {
    for _ in 0..crate::config::ROAM_ATTEMPT_LIMIT {
        let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        let step = agent.position.step(direction);
        if grid.tile(step).is_passable() {
            agent.position = step;
            return NavOutcome::Moved;
        }
    }
    NavOutcome::Unmoved
}

/// Walks downhill on the distance field toward the hero.
///
/// Collects every open neighbor tied for the lowest positive value and
/// picks among them at random, so parallel routes get used evenly. An
/// agent with no mapped neighbor stays put.
fn chase_step(
    grid: &FloorGrid,
    field: &DistanceField,
    agents: &mut [Agent],
    index: usize,
    rng: &mut StdRng,
) -> NavOutcome {
    let position = agents[index].position;
    let mut lowest = i32::MAX;
    let mut candidates: Vec<Position> = Vec::new();

    for x in position.x - 1..position.x + 2 {
        for y in position.y - 1..position.y + 2 {
            let step = Position::new(x, y);
            let value = field.value(step);
            if value > 0
                && value <= lowest
                && value < UNMAPPED
                && grid.tile(step).is_passable()
                && agent_at(agents, step).is_none()
            {
                if value == lowest {
                    candidates.push(step);
                } else {
                    lowest = value;
                    candidates.clear();
                    candidates.push(step);
                }
            }
        }
    }

    if candidates.is_empty() {
        trace!("agent at {position} has no downhill step");
        return NavOutcome::Unmoved;
    }
    agents[index].position = candidates[rng.gen_range(0..candidates.len())];
    NavOutcome::Moved
}
