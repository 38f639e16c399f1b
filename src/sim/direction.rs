//! Movement directions and the pending/current direction buffer

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// One of the four grid directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step on the grid (y grows downward)
    pub fn vector(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True if both directions move along the same axis
    pub fn same_axis(self, other: Direction) -> bool {
        self.is_horizontal() == other.is_horizontal()
    }
}

/// Two-phase direction state.
///
/// Input writes `pending`; the tick commits it to `current`. Requests are
/// validated against `current`, so several presses between two ticks can
/// never sneak a reversal past the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionBuffer {
    current: Direction,
    pending: Direction,
}

impl DirectionBuffer {
    pub fn new(initial: Direction) -> Self {
        Self {
            current: initial,
            pending: initial,
        }
    }

    /// Last direction applied by a tick
    pub fn current(&self) -> Direction {
        self.current
    }

    /// Direction the next tick will apply
    pub fn pending(&self) -> Direction {
        self.pending
    }

    /// Buffer a turn. Only turns off the current axis are accepted, so a
    /// reversal (or repeating the current heading) returns false.
    pub fn request(&mut self, dir: Direction) -> bool {
        if dir.same_axis(self.current) {
            return false;
        }
        self.pending = dir;
        true
    }

    /// Apply the pending direction and return it
    pub fn commit(&mut self) -> Direction {
        self.current = self.pending;
        self.current
    }

    pub fn reset(&mut self, dir: Direction) {
        *self = Self::new(dir);
    }
}
