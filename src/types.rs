// Shared engine types and the JSON shapes of the HTTP entry point

use serde::{Deserialize, Serialize};

/// The four sliding directions, in enumeration (and tie-break) order
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Returns all directions in enumeration order
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Right, Direction::Down, Direction::Left]
    }

    /// Wire code: 0=Up, 1=Right, 2=Down, 3=Left
    pub fn code(&self) -> i32 {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    /// Inverse of [`Direction::code`]
    pub fn from_code(code: i32) -> Option<Direction> {
        match code {
            0 => Some(Direction::Up),
            1 => Some(Direction::Right),
            2 => Some(Direction::Down),
            3 => Some(Direction::Left),
            _ => None,
        }
    }

    /// Converts direction to string representation for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }

    /// Unit vector as (dx, dy), x = column, y = row
    pub fn vector(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

/// A grid coordinate: x is the column, y is the row
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

/// Which layer of the expectimax tree a node belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// Maximizing layer: choose the best of up to four moves
    Player,
    /// Expectation layer over every tile spawn
    Chance,
}

/// Body of `POST /move`: a row-major flat board of 16 tiles
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct MoveRequest {
    pub board: Vec<i64>,
}

/// Response of `POST /move`: a direction code, or -1 when no move is legal
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MoveResponse {
    #[serde(rename = "move")]
    pub direction: i32,
}
