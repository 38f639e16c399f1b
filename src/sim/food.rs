//! Food placement

use glam::IVec2;
use rand::Rng;

use super::state::{Cell, GameState};
use crate::consts::FOOD_PLACEMENT_ATTEMPTS;

/// Pick a free cell for the next food.
///
/// Draws random cells while the board is mostly empty, then falls back to
/// choosing among the enumerated free cells. Returns None only when the snake
/// covers every cell.
pub fn place_food(state: &mut GameState) -> Option<Cell> {
    let total = state.cell_count();
    if state.snake.len() * 2 < total {
        for _ in 0..FOOD_PLACEMENT_ATTEMPTS {
            let cell = IVec2::new(
                state.rng.random_range(0..state.grid_count),
                state.rng.random_range(0..state.grid_count),
            );
            if !state.occupies(cell) {
                return Some(cell);
            }
        }
    }

    let free: Vec<Cell> = (0..state.grid_count)
        .flat_map(|y| (0..state.grid_count).map(move |x| IVec2::new(x, y)))
        .filter(|cell| !state.occupies(*cell))
        .collect();
    if free.is_empty() {
        return None;
    }
    let index = state.rng.random_range(0..free.len());
    Some(free[index])
}
