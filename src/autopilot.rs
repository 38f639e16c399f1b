//! Demo mode: a greedy bot that steers toward the food
//!
//! Only looks one move ahead, with a small flood fill to avoid walking into
//! pockets. Good enough to make the headless demo last a while.

use std::collections::{HashSet, VecDeque};

use glam::IVec2;

use crate::sim::{Cell, Direction, Snapshot};

/// Cells explored when sizing up the room behind a move
const FLOOD_LIMIT: usize = 64;

/// Pick the next heading, or None when every move is fatal
pub fn choose_direction(snap: &Snapshot) -> Option<Direction> {
    let head = *snap.snake.first()?;
    let blocked: HashSet<Cell> = snap.snake.iter().copied().collect();

    Direction::ALL
        .into_iter()
        .filter(|&d| d != snap.direction.opposite())
        .filter_map(|d| {
            let next = head + d.vector();
            if !in_bounds(next, snap.grid_count) || blocked.contains(&next) {
                return None;
            }
            let room = open_area(next, &blocked, snap.grid_count);
            let distance = snap
                .food
                .map(|f| manhattan(next, f))
                .unwrap_or(0);
            Some((d, room, distance))
        })
        // Prefer moves that keep room to manoeuvre, then the shortest path
        .max_by_key(|&(d, room, distance)| {
            (
                room.min(snap.snake.len()),
                std::cmp::Reverse(distance),
                d == snap.direction,
            )
        })
        .map(|(d, _, _)| d)
}

fn in_bounds(cell: Cell, grid: i32) -> bool {
    (0..grid).contains(&cell.x) && (0..grid).contains(&cell.y)
}

fn manhattan(a: Cell, b: Cell) -> i32 {
    let d = (a - b).abs();
    d.x + d.y
}

/// Free cells reachable from `start`, capped at `FLOOD_LIMIT`
fn open_area(start: Cell, blocked: &HashSet<Cell>, grid: i32) -> usize {
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(cell) = queue.pop_front() {
        if seen.len() >= FLOOD_LIMIT {
            break;
        }
        for d in Direction::ALL {
            let next: IVec2 = cell + d.vector();
            if in_bounds(next, grid) && !blocked.contains(&next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen.len()
}
