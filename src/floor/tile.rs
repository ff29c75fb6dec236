//! Tile surface types and passability rules.

use serde::{Deserialize, Serialize};

/// The surface occupying one grid cell.
///
/// `Border` tiles form the outer ring of every floor and are never
/// overwritten; `Void` is the unexcavated rock everything else is carved
/// out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Void,
    LitRoom,
    DarkRoom,
    Wall,
    Tunnel,
    OpenDoor,
    LockedDoor,
    HiddenDoor,
    StairsDown,
    StairsUp,
    Border,
}

impl Tile {
    /// Whether the hero or a monster can stand on this tile.
    ///
    /// Locked doors block until bashed; hidden doors present as walls until
    /// found, so neither is passable.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::Tile;
    ///
    /// assert!(Tile::Tunnel.is_passable());
    /// assert!(Tile::OpenDoor.is_passable());
    /// assert!(!Tile::LockedDoor.is_passable());
    /// assert!(!Tile::Wall.is_passable());
    /// ```
    pub fn is_passable(self) -> bool {
        matches!(
            self,
            Tile::DarkRoom
                | Tile::LitRoom
                | Tile::OpenDoor
                | Tile::StairsDown
                | Tile::StairsUp
                | Tile::Tunnel
        )
    }

    /// Whether this tile is any kind of door.
    pub fn is_door(self) -> bool {
        matches!(self, Tile::OpenDoor | Tile::LockedDoor | Tile::HiddenDoor)
    }
}
