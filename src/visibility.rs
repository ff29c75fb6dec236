//! Line of sight and mutual hero/monster detection.
//!
//! Sight is deliberately short range: outside a lit room the hero sees one
//! tile, or three under a night-sight effect. Line of sight traces a polar
//! ray and treats open doors as light barriers, so standing in a doorway
//! reveals only what is adjacent.

use crate::floor::{FloorGrid, Position, Tile};
use crate::navigation::Agent;

/// Status effects that change how far the hero can see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SightEffects {
    /// Blindness reduces sight to nothing.
    pub blinded: bool,
    /// Night sight extends unlit vision to three tiles.
    pub night_sight: bool,
}

/// How many tiles the hero can see in unlit surroundings.
///
/// # Examples
///
/// ```
/// use warren::{visible_radius, SightEffects};
///
/// assert_eq!(visible_radius(SightEffects::default()), 1);
/// assert_eq!(visible_radius(SightEffects { night_sight: true, ..Default::default() }), 3);
/// assert_eq!(visible_radius(SightEffects { blinded: true, night_sight: true }), 0);
/// ```
pub fn visible_radius(effects: SightEffects) -> i32 {
    if effects.blinded {
        0
    } else if effects.night_sight {
        3
    } else {
        1
    }
}

/// Whether `to` is visible from `from` within `max_distance` tiles.
///
/// Walks one-tile steps along the straight ray between the points. Any
/// step landing off the grid, on an impassable tile, or on an open door
/// blocks sight. Adjacent targets are always visible once the first step
/// is in bounds.
pub fn in_line_of_sight(
    grid: &FloorGrid,
    from: Position,
    to: Position,
    max_distance: i32,
) -> bool {
    let target_distance = from.euclidean_distance(to).floor();
    if target_distance > max_distance as f64 {
        return false;
    }

    let test_distance = (target_distance as i32).min(max_distance);
    let theta = ((to.y - from.y) as f64).atan2((to.x - from.x) as f64);
    for d in 1..=test_distance {
        let x = d as f64 * theta.cos();
        let y = d as f64 * theta.sin();
        let check = Position::new((from.x as f64 + x) as i32, (from.y as f64 + y) as i32);

        if check.x < 0 || check.y < 0 || check.x > grid.width() - 1 || check.y > grid.height() - 1 {
            return false;
        }

        // Standing right next to the target, nothing can block.
        if target_distance <= 1.0 {
            return true;
        }

        let tile = grid.tile(check);
        if !tile.is_passable() || tile == Tile::OpenDoor {
            return false;
        }
    }
    true
}

/// Checks whether the hero can see `agent`, waking the agent into a chase
/// when the sighting is mutual.
///
/// In a lit room everyone sees everyone: if the agent shares the hero's
/// lit room it starts chasing and is visible. Elsewhere the hero tests
/// sight at the shorter of radius and distance while the agent tests at
/// the longer, so monsters usually notice the hero before the hero
/// notices them.
///
/// A sighted agent is marked `discovered` so the renderer knows to draw
/// it, unless the hero's radius is zero (blind); blindness still lets the
/// agent spot the hero.
pub fn mutual_detection(
    grid: &FloorGrid,
    hero: Position,
    agent: &mut Agent,
    hero_radius: i32,
) -> bool {
    let hero_tile = grid.tile(hero);

    if hero_tile == Tile::LitRoom {
        if let Some(room) = grid.room_containing(hero) {
            if room.contains(agent.position) {
                agent.see_hero();
                if hero_radius > 0 {
                    agent.discovered = true;
                }
                return true;
            }
        }
    }

    let agent_distance = hero.euclidean_distance(agent.position) as i32;
    let hero_test = hero_radius.min(agent_distance);
    let agent_test = hero_radius.max(agent_distance);

    if matches!(hero_tile, Tile::DarkRoom | Tile::Tunnel | Tile::OpenDoor) {
        let hero_sees = in_line_of_sight(grid, hero, agent.position, hero_test);
        if in_line_of_sight(grid, hero, agent.position, agent_test) {
            agent.see_hero();
        }
        if hero_sees {
            agent.discovered = true;
            return true;
        }
    }

    false
}
