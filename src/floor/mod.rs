//! # Floor Module
//!
//! The data model for one dungeon floor: positions and directions on the
//! tile grid, tile surface types, room rectangles, and the grid itself.
//!
//! Nothing in this module rolls dice or makes decisions; generation and
//! navigation live in their own modules and write through these types.

pub mod grid;
pub mod room;
pub mod tile;

pub use grid::FloorGrid;
pub use room::Room;
pub use tile::Tile;

use serde::{Deserialize, Serialize};

/// Represents a 2D tile coordinate on a floor.
///
/// # Examples
///
/// ```
/// use warren::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// assert_eq!(pos.neighbors().len(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev (chessboard) distance: the number of 8-directional steps
    /// needed to reach `other` on an open grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::Position;
    ///
    /// assert_eq!(Position::new(0, 0).chebyshev_distance(Position::new(3, 1)), 3);
    /// ```
    pub fn chebyshev_distance(self, other: Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Straight-line distance to another position.
    pub fn euclidean_distance(self, other: Position) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// The position one tile away in the given direction.
    pub fn step(self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx, self.y + dy)
    }

    /// The position one tile away in the given cardinal direction.
    pub fn step_cardinal(self, direction: CardinalDirection) -> Position {
        self.step(direction.to_direction())
    }

    /// All 8 surrounding positions, diagonals included.
    pub fn neighbors(self) -> [Position; 8] {
        [
            Position::new(self.x - 1, self.y - 1),
            Position::new(self.x, self.y - 1),
            Position::new(self.x + 1, self.y - 1),
            Position::new(self.x - 1, self.y),
            Position::new(self.x + 1, self.y),
            Position::new(self.x - 1, self.y + 1),
            Position::new(self.x, self.y + 1),
            Position::new(self.x + 1, self.y + 1),
        ]
    }

    /// The 4 cardinal neighbors.
    pub fn cardinal_neighbors(self) -> [Position; 4] {
        [
            Position::new(self.x, self.y - 1),
            Position::new(self.x + 1, self.y),
            Position::new(self.x, self.y + 1),
            Position::new(self.x - 1, self.y),
        ]
    }

    /// All positions on the Chebyshev ring at `radius` around this
    /// position. A ring at radius `r` holds exactly `8 * r` tiles.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::Position;
    ///
    /// assert_eq!(Position::new(5, 5).ring(1).len(), 8);
    /// assert_eq!(Position::new(5, 5).ring(3).len(), 24);
    /// ```
    pub fn ring(self, radius: i32) -> Vec<Position> {
        let mut points = Vec::with_capacity((radius * 8).max(0) as usize);
        for x in (self.x - radius)..=(self.x + radius) {
            points.push(Position::new(x, self.y - radius));
            points.push(Position::new(x, self.y + radius));
        }
        for y in (self.y - radius + 1)..(self.y + radius) {
            points.push(Position::new(self.x - radius, y));
            points.push(Position::new(self.x + radius, y));
        }
        points
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// The 8 movement directions agents can step in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Direction {
    /// All 8 directions, in clockwise order starting from up.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::Left,
        Direction::UpLeft,
    ];

    /// The (dx, dy) offset of one step in this direction. Y grows downward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::UpRight => (1, -1),
            Direction::Right => (1, 0),
            Direction::DownRight => (1, 1),
            Direction::Down => (0, 1),
            Direction::DownLeft => (-1, 1),
            Direction::Left => (-1, 0),
            Direction::UpLeft => (-1, -1),
        }
    }
}

/// The 4 cardinal directions tunnels are dug in.
///
/// The declaration order doubles as the tie-break priority when two
/// directions are equally good: up beats right beats down beats left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardinalDirection {
    Up,
    Right,
    Down,
    Left,
}

impl CardinalDirection {
    /// All 4 cardinal directions in priority order.
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::Up,
        CardinalDirection::Right,
        CardinalDirection::Down,
        CardinalDirection::Left,
    ];

    /// Widens to the 8-way direction type.
    pub fn to_direction(self) -> Direction {
        match self {
            CardinalDirection::Up => Direction::Up,
            CardinalDirection::Right => Direction::Right,
            CardinalDirection::Down => Direction::Down,
            CardinalDirection::Left => Direction::Left,
        }
    }

    /// Rotated a quarter turn clockwise.
    pub fn rotated_clockwise(self) -> CardinalDirection {
        match self {
            CardinalDirection::Up => CardinalDirection::Right,
            CardinalDirection::Right => CardinalDirection::Down,
            CardinalDirection::Down => CardinalDirection::Left,
            CardinalDirection::Left => CardinalDirection::Up,
        }
    }

    /// Rotated a quarter turn counter-clockwise.
    pub fn rotated_counter_clockwise(self) -> CardinalDirection {
        match self {
            CardinalDirection::Up => CardinalDirection::Left,
            CardinalDirection::Left => CardinalDirection::Down,
            CardinalDirection::Down => CardinalDirection::Right,
            CardinalDirection::Right => CardinalDirection::Up,
        }
    }

    /// The opposite direction.
    pub fn opposite(self) -> CardinalDirection {
        self.rotated_clockwise().rotated_clockwise()
    }
}
