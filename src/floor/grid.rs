//! The shared tile grid for one floor.

use crate::config;
use crate::floor::{Position, Room, Tile};
use crate::{WarrenError, WarrenResult};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The tile array and room list for one dungeon floor.
///
/// Created once per floor, fully rewritten on regeneration, and replaced on
/// the next floor transition. The outer ring of tiles is `Border` from
/// construction onward and can never be overwritten, which keeps every
/// generation and navigation walk inside the map.
///
/// # Examples
///
/// ```
/// use warren::{FloorGrid, Position, Tile};
///
/// let grid = FloorGrid::new(20, 10).unwrap();
/// assert_eq!(grid.tile(Position::new(0, 0)), Tile::Border);
/// assert_eq!(grid.tile(Position::new(5, 5)), Tile::Void);
/// // Out-of-range reads answer Border rather than panicking.
/// assert_eq!(grid.tile(Position::new(-3, 99)), Tile::Border);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorGrid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    revealed: Vec<bool>,
    rooms: Vec<Room>,
}

impl FloorGrid {
    /// Creates an all-void grid with a `Border` outer ring.
    pub fn new(width: i32, height: i32) -> WarrenResult<Self> {
        if width < 3 || height < 3 {
            return Err(WarrenError::InvalidState(format!(
                "floor dimensions {width}x{height} leave no interior"
            )));
        }
        let mut tiles = vec![Tile::Void; (width * height) as usize];
        for x in 0..width {
            tiles[x as usize] = Tile::Border;
            tiles[((height - 1) * width + x) as usize] = Tile::Border;
        }
        for y in 1..height - 1 {
            tiles[(y * width) as usize] = Tile::Border;
            tiles[(y * width + width - 1) as usize] = Tile::Border;
        }
        Ok(Self {
            width,
            height,
            tiles,
            revealed: vec![false; (width * height) as usize],
            rooms: Vec::new(),
        })
    }

    /// Width of the floor in tiles.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the floor in tiles.
    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Whether the position lies on the grid at all, border included.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// The tile at `pos`. Out-of-range positions read as `Border`, which
    /// lets callers probe neighbors without their own bounds checks.
    pub fn tile(&self, pos: Position) -> Tile {
        if !self.in_bounds(pos) {
            return Tile::Border;
        }
        self.tiles[self.index(pos.x, pos.y)]
    }

    /// Writes a tile, refusing to touch the border ring or leave the map.
    pub fn set_tile(&mut self, pos: Position, tile: Tile) -> WarrenResult<()> {
        if !self.in_bounds(pos) {
            return Err(WarrenError::InvalidState(format!(
                "tile write at {pos} is outside the {}x{} floor",
                self.width, self.height
            )));
        }
        let idx = self.index(pos.x, pos.y);
        if self.tiles[idx] == Tile::Border {
            return Err(WarrenError::InvalidState(format!(
                "tile write at {pos} would overwrite the border"
            )));
        }
        self.tiles[idx] = tile;
        Ok(())
    }

    /// Whether movement onto `pos` is blocked, either by the map edge or by
    /// an impassable surface.
    pub fn movement_blocked(&self, pos: Position) -> bool {
        if pos.x <= 0 || pos.y <= 0 || pos.x >= self.width - 1 || pos.y >= self.height - 1 {
            return true;
        }
        !self.tile(pos).is_passable()
    }

    /// The rooms placed on this floor.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Registers a room on this floor. The caller is responsible for
    /// stamping the matching floor and wall tiles.
    pub fn add_room(&mut self, room: Room) {
        self.rooms.push(room);
    }

    pub(crate) fn clear_rooms(&mut self) {
        self.rooms.clear();
    }

    /// The room whose floor contains `pos`, if any.
    pub fn room_containing(&self, pos: Position) -> Option<Room> {
        self.rooms.iter().copied().find(|room| room.contains(pos))
    }

    /// Index of the room whose floor-plus-walls rectangle contains `pos`.
    pub(crate) fn room_wall_containing(&self, pos: Position) -> Option<usize> {
        self.rooms
            .iter()
            .position(|room| room.walls().contains(pos))
    }

    /// Whether the hero has revealed this tile.
    pub fn revealed(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.revealed[self.index(pos.x, pos.y)]
    }

    fn reveal(&mut self, pos: Position) {
        if self.in_bounds(pos) {
            let idx = self.index(pos.x, pos.y);
            self.revealed[idx] = true;
        }
    }

    /// Reveals the tiles the hero can currently make out, for the renderer.
    ///
    /// Standing in a lit room reveals the whole room and its walls;
    /// anywhere else reveals the square of the given radius around the
    /// hero. A blinded hero (radius 0 still reveals the hero's own tile)
    /// only learns non-room surfaces by touch.
    pub fn reveal_visible_spaces(&mut self, hero: Position, radius: i32, blinded: bool) {
        let visible = if self.tile(hero) == Tile::LitRoom && radius > 0 {
            match self.room_containing(hero) {
                Some(room) => room.walls(),
                None => Room::new(hero.x - radius, hero.y - radius, radius * 2 + 1, radius * 2 + 1),
            }
        } else {
            Room::new(hero.x - radius, hero.y - radius, radius * 2 + 1, radius * 2 + 1)
        };

        for x in visible.left().max(0)..visible.right().min(self.width) {
            for y in visible.top().max(0)..visible.bottom().min(self.height) {
                let pos = Position::new(x, y);
                let tile = self.tile(pos);
                if blinded && (tile == Tile::LitRoom || tile == Tile::DarkRoom) {
                    continue;
                }
                self.reveal(pos);
            }
        }
    }

    /// Lights up the dark room containing `pos`, revealing it and its
    /// walls. Does nothing outside a room.
    pub fn light_room(&mut self, pos: Position) {
        let Some(room) = self.room_containing(pos) else {
            return;
        };
        let walls = room.walls();
        for x in walls.left().max(0)..walls.right().min(self.width) {
            for y in walls.top().max(0)..walls.bottom().min(self.height) {
                let pos = Position::new(x, y);
                self.reveal(pos);
                if self.tile(pos) == Tile::DarkRoom {
                    let idx = self.index(x, y);
                    self.tiles[idx] = Tile::LitRoom;
                }
            }
        }
    }

    /// Attempts to bash a locked door open. Success odds scale with the
    /// hero's effective strength. Returns true when the door gives way;
    /// the caller must then rebuild the distance field, since a new route
    /// just opened.
    pub fn bash_door(
        &mut self,
        door: Position,
        effective_strength: i32,
        rng: &mut StdRng,
    ) -> bool {
        if self.tile(door) != Tile::LockedDoor {
            return false;
        }
        let bash_modifier = effective_strength as f64 / 100.0;
        if rng.gen::<f64>() < 0.05 + bash_modifier {
            let idx = self.index(door.x, door.y);
            self.tiles[idx] = Tile::OpenDoor;
            return true;
        }
        false
    }

    /// Rolls to notice a hidden door in the 8 tiles around the hero.
    ///
    /// Each adjacent hidden door gets a `CHANCE_TO_FIND` percent chance,
    /// multiplied while searching deliberately. The first find is converted
    /// to an open door and returned; the caller must rebuild the distance
    /// field on a find.
    pub fn notice_hidden(
        &mut self,
        hero: Position,
        chance_multiplier: i32,
        rng: &mut StdRng,
    ) -> Option<Position> {
        for x in hero.x - 1..=hero.x + 1 {
            for y in hero.y - 1..=hero.y + 1 {
                let pos = Position::new(x, y);
                if x > 0
                    && y > 0
                    && x < self.width
                    && y < self.height
                    && self.tile(pos) == Tile::HiddenDoor
                    && rng.gen_range(0..100) < config::CHANCE_TO_FIND * chance_multiplier
                {
                    let idx = self.index(x, y);
                    self.tiles[idx] = Tile::OpenDoor;
                    return Some(pos);
                }
            }
        }
        None
    }

    /// Whether `pos` sits at a tunnel intersection: more than two of its
    /// cardinal neighbors continue the tunnel. Used by the external run
    /// command to stop auto-movement at junctions.
    pub fn near_tunnel_intersection(&self, pos: Position) -> bool {
        let continuations = pos
            .cardinal_neighbors()
            .iter()
            .filter(|&&p| self.tile(p) == Tile::Tunnel)
            .count();
        continuations > 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn border_ring_set_on_construction() {
        let grid = FloorGrid::new(10, 8).unwrap();
        for x in 0..10 {
            assert_eq!(grid.tile(Position::new(x, 0)), Tile::Border);
            assert_eq!(grid.tile(Position::new(x, 7)), Tile::Border);
        }
        for y in 0..8 {
            assert_eq!(grid.tile(Position::new(0, y)), Tile::Border);
            assert_eq!(grid.tile(Position::new(9, y)), Tile::Border);
        }
        assert_eq!(grid.tile(Position::new(4, 4)), Tile::Void);
    }

    #[test]
    fn border_writes_are_rejected() {
        let mut grid = FloorGrid::new(10, 8).unwrap();
        assert!(grid.set_tile(Position::new(0, 3), Tile::Tunnel).is_err());
        assert!(grid.set_tile(Position::new(42, 3), Tile::Tunnel).is_err());
        assert!(grid.set_tile(Position::new(3, 3), Tile::Tunnel).is_ok());
    }

    #[test]
    fn too_small_grids_are_rejected() {
        assert!(FloorGrid::new(2, 10).is_err());
        assert!(FloorGrid::new(3, 3).is_ok());
    }

    #[test]
    fn movement_blocked_at_edges_and_walls() {
        let mut grid = FloorGrid::new(10, 10).unwrap();
        grid.set_tile(Position::new(4, 4), Tile::Tunnel).unwrap();
        grid.set_tile(Position::new(5, 4), Tile::Wall).unwrap();
        assert!(!grid.movement_blocked(Position::new(4, 4)));
        assert!(grid.movement_blocked(Position::new(5, 4)));
        assert!(grid.movement_blocked(Position::new(4, 3))); // void
        assert!(grid.movement_blocked(Position::new(0, 4))); // border column
    }

    #[test]
    fn light_room_converts_dark_tiles_and_reveals_walls() {
        let mut grid = FloorGrid::new(20, 20).unwrap();
        let room = Room::new(5, 5, 4, 3);
        for x in room.left()..room.right() {
            for y in room.top()..room.bottom() {
                grid.set_tile(Position::new(x, y), Tile::DarkRoom).unwrap();
            }
        }
        grid.add_room(room);

        grid.light_room(Position::new(6, 6));
        assert_eq!(grid.tile(Position::new(5, 5)), Tile::LitRoom);
        assert_eq!(grid.tile(Position::new(8, 7)), Tile::LitRoom);
        assert!(grid.revealed(Position::new(4, 4))); // wall corner
        assert!(!grid.revealed(Position::new(15, 15)));
    }

    #[test]
    fn bash_door_only_affects_locked_doors() {
        let mut grid = FloorGrid::new(10, 10).unwrap();
        grid.set_tile(Position::new(4, 4), Tile::LockedDoor).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        // Strength 100 makes the roll a certainty.
        assert!(grid.bash_door(Position::new(4, 4), 100, &mut rng));
        assert_eq!(grid.tile(Position::new(4, 4)), Tile::OpenDoor);
        // Already open: nothing to bash.
        assert!(!grid.bash_door(Position::new(4, 4), 100, &mut rng));
    }

    #[test]
    fn notice_hidden_converts_found_door() {
        let mut grid = FloorGrid::new(10, 10).unwrap();
        grid.set_tile(Position::new(5, 4), Tile::HiddenDoor).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        // Multiplier 5 gives every roll a 100% find chance.
        let found = grid.notice_hidden(Position::new(5, 5), 5, &mut rng);
        assert_eq!(found, Some(Position::new(5, 4)));
        assert_eq!(grid.tile(Position::new(5, 4)), Tile::OpenDoor);
    }

    #[test]
    fn tunnel_intersection_needs_three_continuations() {
        let mut grid = FloorGrid::new(10, 10).unwrap();
        let center = Position::new(5, 5);
        grid.set_tile(center, Tile::Tunnel).unwrap();
        grid.set_tile(Position::new(5, 4), Tile::Tunnel).unwrap();
        grid.set_tile(Position::new(5, 6), Tile::Tunnel).unwrap();
        assert!(!grid.near_tunnel_intersection(center)); // straight through
        grid.set_tile(Position::new(6, 5), Tile::Tunnel).unwrap();
        assert!(grid.near_tunnel_intersection(center)); // T junction
    }
}
