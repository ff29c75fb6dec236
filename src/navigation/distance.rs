//! Distance field from the hero outward.
//!
//! Every passable tile eventually holds its step count back to the hero,
//! so a chasing monster only needs to look at its eight neighbors and walk
//! downhill. The field sweeps concentric square rings outward, re-walking
//! inner rings each pass so values can flow around obstacles.
//!
//! The sweep is an approximation: a path that bends back toward the hero
//! may stay unmapped. That is kept on purpose. A monster sitting in such a
//! pocket senses the hero in the opposite direction from its way out and
//! reasonably stays confused.

use crate::floor::{FloorGrid, Position};
use crate::navigation::Agent;

/// Sentinel for a reachable tile whose distance has not been assigned yet.
pub const UNMAPPED: i32 = 999_999_999;

/// Per-tile step counts back to a source position.
///
/// Blocked tiles hold -1 permanently; passable tiles hold [`UNMAPPED`]
/// until a sweep assigns them a positive distance. The source tile itself
/// is 1, its neighbors 2, and so on.
#[derive(Debug, Clone)]
pub struct DistanceField {
    width: i32,
    height: i32,
    values: Vec<i32>,
}

impl DistanceField {
    /// Builds a field for the grid, marking impassable tiles blocked.
    ///
    /// Rebuild the field when the layout changes, such as a hidden door
    /// being found or a locked door bashed open.
    pub fn new(grid: &FloorGrid) -> Self {
        let width = grid.width();
        let height = grid.height();
        let mut values = vec![UNMAPPED; (width * height) as usize];
        for x in 0..width {
            for y in 0..height {
                if !grid.tile(Position::new(x, y)).is_passable() {
                    values[(y * width + x) as usize] = -1;
                }
            }
        }
        Self {
            width,
            height,
            values,
        }
    }

    /// The stored value at `pos`. Out-of-bounds reads as blocked.
    pub fn value(&self, pos: Position) -> i32 {
        if pos.x < 0 || pos.y < 0 || pos.x >= self.width || pos.y >= self.height {
            return -1;
        }
        self.values[(pos.y * self.width + pos.x) as usize]
    }

    fn set(&mut self, pos: Position, value: i32) {
        self.values[(pos.y * self.width + pos.x) as usize] = value;
    }

    /// Recomputes distances from `source`, expanding rings until every
    /// chasing agent is mapped or a ring outgrows the floor.
    pub fn compute(&mut self, grid: &FloorGrid, source: Position, agents: &[Agent]) {
        self.reset_positive_values();

        if grid.movement_blocked(source) {
            return;
        }
        self.set(source, 1);

        let mut outer = 1;
        loop {
            outer += 1;
            for layer in 1..outer {
                for pos in source.ring(layer) {
                    if pos.x < 0 || pos.y < 0 || pos.x >= self.width || pos.y >= self.height {
                        continue;
                    }
                    if self.value(pos) != UNMAPPED {
                        continue;
                    }
                    let lowest = self.lowest_positive_neighbor(pos);
                    if lowest > 0 && lowest < UNMAPPED {
                        self.set(pos, lowest + 1);
                    }
                }
            }
            if self.mapped(outer, agents) {
                break;
            }
        }
    }

    /// Clears mapped distances back to [`UNMAPPED`], keeping blocked tiles.
    fn reset_positive_values(&mut self) {
        for value in &mut self.values {
            if *value > 0 {
                *value = UNMAPPED;
            }
        }
    }

    /// The smallest positive value among the eight neighbors of `pos`.
    fn lowest_positive_neighbor(&self, pos: Position) -> i32 {
        let mut lowest = i32::MAX;
        for neighbor in pos.neighbors() {
            let value = self.value(neighbor);
            if value > 0 && value < lowest {
                lowest = value;
            }
        }
        lowest
    }

    /// Whether the sweep can stop: every chasing agent has a mapped tile,
    /// or the ring has outgrown both floor dimensions.
    fn mapped(&self, outer: i32, agents: &[Agent]) -> bool {
        if outer > self.width && outer > self.height {
            return true;
        }
        agents
            .iter()
            .all(|agent| !agent.chasing || self.value(agent.position) != UNMAPPED)
    }
}
