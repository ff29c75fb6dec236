//! Depth-based door classification.
//!
//! Every door starts open when tunnels are dug. After the network is in
//! place, each door gets one roll to become hidden or locked. The odds
//! scale with depth: floors 1 through 5 never alter a door, depth 6 gives
//! each state a 1% chance, and the chance grows one point per depth until
//! both cap at 25% on depth 31.

use crate::config;
use crate::floor::{FloorGrid, Position, Tile};
use crate::WarrenResult;
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

/// Rerolls every open door on the floor as open, hidden, or locked.
pub(crate) fn classify_doors(grid: &mut FloorGrid, depth: u32, rng: &mut StdRng) -> WarrenResult<()> {
    let band_width = if depth < 31 {
        depth as i32 - 6
    } else {
        config::DOOR_BAND_WIDTH_CAP
    };
    let hidden_high = config::HIDDEN_DOOR_BAND_LOW + band_width;
    let locked_high = config::LOCKED_DOOR_BAND_LOW + band_width;

    let doors = collect_doors(grid);
    debug!("classifying {} doors at depth {depth}", doors.len());

    for door in doors {
        let roll = rng.gen_range(0..100);
        if roll >= config::HIDDEN_DOOR_BAND_LOW && roll <= hidden_high {
            grid.set_tile(door, Tile::HiddenDoor)?;
        }
        if roll >= config::LOCKED_DOOR_BAND_LOW && roll <= locked_high {
            grid.set_tile(door, Tile::LockedDoor)?;
        }
    }
    Ok(())
}

/// Every open door sitting on some room's wall perimeter.
fn collect_doors(grid: &FloorGrid) -> Vec<Position> {
    let mut doors = Vec::new();
    for room in grid.rooms() {
        let walls = room.walls();
        for x in walls.left()..walls.right() {
            for pos in [
                Position::new(x, walls.top()),
                Position::new(x, walls.bottom() - 1),
            ] {
                if grid.tile(pos) == Tile::OpenDoor {
                    doors.push(pos);
                }
            }
        }
        for y in walls.top() + 1..walls.bottom() - 1 {
            for pos in [
                Position::new(walls.left(), y),
                Position::new(walls.right() - 1, y),
            ] {
                if grid.tile(pos) == Tile::OpenDoor {
                    doors.push(pos);
                }
            }
        }
    }
    doors
}
