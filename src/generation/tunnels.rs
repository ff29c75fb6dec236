//! Tunnel digging between rooms.
//!
//! Rooms are joined into one network by repeatedly picking a disconnected
//! room and digging a biased random walk toward a target room. The walk
//! strongly prefers the direction of the target but wanders, so tunnels
//! come out crooked rather than L-shaped. Reaching any eligible room wall,
//! an existing tunnel, or an earlier door completes the dig; both endpoint
//! rooms join the connected set.
//!
//! A walk that boxes itself in is reverted and retried. Too many
//! consecutive failed walks collapse the whole network, which the caller
//! clears and rebuilds from scratch.

use crate::config;
use crate::floor::{CardinalDirection, FloorGrid, Position, Room, Tile};
use crate::WarrenResult;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::Rng;

/// Outcome of one attempt to tunnel a floor's rooms together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TunnelNetwork {
    /// Every room is reachable from every other.
    Connected,
    /// Too many walks failed in a row; the layout should be cleared and
    /// the whole network re-dug.
    Collapsed,
}

/// Digs tunnels until every room on the grid belongs to one network.
pub(crate) fn connect_rooms(grid: &mut FloorGrid, rng: &mut StdRng) -> WarrenResult<TunnelNetwork> {
    let rooms = grid.rooms().to_vec();
    debug!("begin tunneling with {} rooms", rooms.len());

    let mut connected: Vec<usize> = Vec::new();
    let mut disconnected: Vec<usize> = (0..rooms.len()).collect();
    let mut walk_attempts = 0u32;
    let mut collapsed = false;

    while !disconnected.is_empty() || collapsed {
        walk_attempts += 1;
        if walk_attempts > config::TUNNEL_WALK_ATTEMPT_LIMIT {
            debug!("walk attempt counter exceeded {}", config::TUNNEL_WALK_ATTEMPT_LIMIT);
            return Ok(TunnelNetwork::Collapsed);
        }
        collapsed = false;

        let source_idx = disconnected[rng.gen_range(0..disconnected.len())];
        // Aim for a connected room when one exists so the network stays in
        // one piece; the very first walk settles for another disconnected
        // room.
        let mut target_idx = if connected.is_empty() {
            loop {
                let pick = disconnected[rng.gen_range(0..disconnected.len())];
                if pick != source_idx {
                    break pick;
                }
            }
        } else {
            connected[rng.gen_range(0..connected.len())]
        };

        let wall_side = affinity_direction(rooms[source_idx].center(), rooms[target_idx].center());
        let door = place_starting_door(grid, &rooms[source_idx], wall_side, rng)?;
        trace!("starting door at {door} heading {wall_side:?}");

        // The margin guarantees the tile just outside the door is void.
        let mut current = door.step_cardinal(wall_side);
        grid.set_tile(current, Tile::Tunnel)?;

        let mut path: Vec<Position> = Vec::new();
        let mut complete = false;
        let draw_limit = (grid.width() + grid.height()) * 4;

        while !complete {
            path.push(current);

            let mut draws = 0i32;
            let direction = loop {
                let direction = pick_direction(current, rooms[target_idx].center(), rng);
                draws += 1;
                if draws > draw_limit {
                    collapsed = true;
                    break direction;
                }
                let (blocked, found) =
                    walk_blocked(grid, current, direction, &path, source_idx, &connected);
                if !blocked {
                    // Stumbling onto another eligible room's wall re-aims
                    // the rest of the walk at that room.
                    if let Some(found_idx) = found {
                        target_idx = found_idx;
                    }
                    break direction;
                }
            };

            if collapsed {
                debug!("walk collapsed after {draws} draws, reverting {} tiles", path.len());
                for space in &path {
                    grid.set_tile(*space, Tile::Void)?;
                }
                grid.set_tile(door, Tile::Wall)?;
                break;
            }

            current = current.step_cardinal(direction);
            let surface = grid.tile(current);

            if surface == Tile::Wall
                || surface == Tile::Tunnel
                || surface == Tile::OpenDoor
                || joins_other_tunnel(grid, current, &path)
            {
                complete = true;
                for idx in [source_idx, target_idx] {
                    if let Some(pos) = disconnected.iter().position(|&r| r == idx) {
                        disconnected.swap_remove(pos);
                        connected.push(idx);
                    }
                }
            } else {
                grid.set_tile(current, Tile::Tunnel)?;
            }
        }

        if collapsed {
            continue;
        }

        // The walk may have ended on an eligible wall or on void next to a
        // foreign tunnel; open the wall or bridge the gap.
        match grid.tile(current) {
            Tile::Wall => grid.set_tile(current, Tile::OpenDoor)?,
            Tile::Void => grid.set_tile(current, Tile::Tunnel)?,
            _ => {}
        }

        walk_attempts = 0;
    }

    Ok(TunnelNetwork::Connected)
}

/// Resets every tunnel tile to void and every door back to wall, leaving
/// rooms in place for a fresh dig.
pub(crate) fn clear_tunnel_network(grid: &mut FloorGrid) -> WarrenResult<()> {
    for x in 1..grid.width() - 1 {
        for y in 1..grid.height() - 1 {
            let pos = Position::new(x, y);
            match grid.tile(pos) {
                Tile::Tunnel => grid.set_tile(pos, Tile::Void)?,
                Tile::OpenDoor | Tile::HiddenDoor | Tile::LockedDoor => {
                    grid.set_tile(pos, Tile::Wall)?
                }
                _ => {}
            }
        }
    }
    Ok(())
}

/// The cardinal direction covering the greatest distance from `source`
/// toward `target`. Ties go to the first of up, right, down, left.
fn affinity_direction(source: Position, target: Position) -> CardinalDirection {
    let distances = [
        (CardinalDirection::Up, source.y - target.y),
        (CardinalDirection::Right, target.x - source.x),
        (CardinalDirection::Down, target.y - source.y),
        (CardinalDirection::Left, source.x - target.x),
    ];
    let mut best = distances[0];
    for candidate in &distances[1..] {
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }
    best.0
}

/// Draws the next dig direction: 80% toward the target, 10% to either
/// side, never directly away. The affinity is recomputed from the current
/// position, so the bias tracks the target as the walk progresses.
fn pick_direction(source: Position, target: Position, rng: &mut StdRng) -> CardinalDirection {
    let affinity = affinity_direction(source, target);
    let roll = rng.gen_range(0..100);
    if roll < 80 {
        affinity
    } else if roll < 90 {
        affinity.rotated_counter_clockwise()
    } else {
        affinity.rotated_clockwise()
    }
}

/// Decides whether a step from `from` toward `direction` is blocked, and
/// reports the room whose wall would be entered when it is an eligible
/// join point.
///
/// Void is always diggable; the border and the walk's own path never are.
/// A wall or door belongs to some room: turning back into the source room
/// is refused, as are wall corners. While the connected set is empty any
/// room's wall completes the walk; afterwards only connected rooms do.
fn walk_blocked(
    grid: &FloorGrid,
    from: Position,
    direction: CardinalDirection,
    path: &[Position],
    source_idx: usize,
    connected: &[usize],
) -> (bool, Option<usize>) {
    let next = from.step_cardinal(direction);
    let surface = grid.tile(next);

    if surface == Tile::Void {
        return (false, None);
    }
    if surface == Tile::Border {
        return (true, None);
    }
    if path.contains(&next) {
        return (true, None);
    }

    if surface == Tile::Wall || surface.is_door() {
        let Some(owner_idx) = grid.room_wall_containing(next) else {
            return (true, None);
        };
        if owner_idx == source_idx {
            return (true, None);
        }
        if grid.rooms()[owner_idx].is_corner(next) {
            return (true, None);
        }
        if connected.is_empty() || connected.contains(&owner_idx) {
            return (false, Some(owner_idx));
        }
        return (true, None);
    }

    (false, None)
}

/// Whether a tunnel not belonging to the current walk lies in one of the
/// four cardinal neighbors.
fn joins_other_tunnel(grid: &FloorGrid, pos: Position, path: &[Position]) -> bool {
    pos.cardinal_neighbors().iter().any(|&neighbor| {
        neighbor.x >= 0
            && neighbor.x < grid.width()
            && neighbor.y >= 0
            && neighbor.y < grid.height()
            && grid.tile(neighbor) == Tile::Tunnel
            && !path.contains(&neighbor)
    })
}

/// Opens a door at a random spot along the chosen wall of `room`.
fn place_starting_door(
    grid: &mut FloorGrid,
    room: &Room,
    wall_side: CardinalDirection,
    rng: &mut StdRng,
) -> WarrenResult<Position> {
    let door = match wall_side {
        CardinalDirection::Up => {
            Position::new(rng.gen_range(room.left()..room.right()), room.top() - 1)
        }
        CardinalDirection::Down => {
            Position::new(rng.gen_range(room.left()..room.right()), room.bottom())
        }
        CardinalDirection::Left => {
            Position::new(room.left() - 1, rng.gen_range(room.top()..room.bottom()))
        }
        CardinalDirection::Right => {
            Position::new(room.right(), rng.gen_range(room.top()..room.bottom()))
        }
    };
    grid.set_tile(door, Tile::OpenDoor)?;
    Ok(door)
}
