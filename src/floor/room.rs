//! Room rectangles.

use crate::floor::Position;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle of open floor space in tile coordinates.
///
/// The rectangle covers only the walkable interior; the one-tile wall ring
/// sits just outside it. `right` and `bottom` are exclusive, so a room at
/// (5, 5) with width 4 occupies columns 5 through 8.
///
/// Rooms own no tiles themselves: the tiles they imply are stamped into the
/// shared [`FloorGrid`](crate::FloorGrid) during generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    /// Creates a room from its top-left floor tile and floor dimensions.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Leftmost floor column.
    pub fn left(&self) -> i32 {
        self.x
    }

    /// One past the rightmost floor column.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Topmost floor row.
    pub fn top(&self) -> i32 {
        self.y
    }

    /// One past the bottommost floor row.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// The center tile of the room.
    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Whether the position lies on this room's floor.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::{Position, Room};
    ///
    /// let room = Room::new(5, 5, 4, 3);
    /// assert!(room.contains(Position::new(5, 5)));
    /// assert!(room.contains(Position::new(8, 7)));
    /// assert!(!room.contains(Position::new(9, 5)));
    /// ```
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.left() && pos.x < self.right() && pos.y >= self.top() && pos.y < self.bottom()
    }

    /// Whether two rectangles overlap.
    pub fn intersects(&self, other: &Room) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// The rectangle grown by `amount` tiles on every side.
    pub fn expanded(&self, amount: i32) -> Room {
        Room::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2,
            self.height + amount * 2,
        )
    }

    /// The rectangle covering this room's floor plus its wall ring.
    pub fn walls(&self) -> Room {
        self.expanded(1)
    }

    /// Whether the position is one of the four wall corners of this room.
    /// Tunnels may not terminate on a corner.
    pub fn is_corner(&self, pos: Position) -> bool {
        (pos.x == self.left() - 1 || pos.x == self.right())
            && (pos.y == self.top() - 1 || pos.y == self.bottom())
    }

    /// A uniformly random floor tile inside the room.
    pub fn random_interior_point(&self, rng: &mut StdRng) -> Position {
        Position::new(
            rng.gen_range(self.left()..self.right()),
            rng.gen_range(self.top()..self.bottom()),
        )
    }
}
