//! Fixed-step simulation tick
//!
//! Advances the snake by exactly one cell. Order is fixed: direction commit,
//! wall check, self check, movement, then food and speed.

use super::food::place_food;
use super::state::{Cell, GameOverReason, GamePhase, GameState};
use crate::consts::FOOD_SCORE;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running, nothing happened
    Skipped,
    /// Snake moved one cell
    Moved,
    /// Snake moved onto the food and grew
    Ate { at: Cell, score: u32 },
    /// Run ended
    Collided(GameOverReason),
}

/// Advance the game state by one step
pub fn tick(state: &mut GameState) -> TickOutcome {
    if state.phase != GamePhase::Running {
        return TickOutcome::Skipped;
    }
    let Some(head) = state.head() else {
        return TickOutcome::Skipped;
    };

    let dir = state.direction.commit();
    let new_head = head + dir.vector();

    if !state.in_bounds(new_head) {
        return end_run(state, GameOverReason::Wall);
    }
    // The tail still counts: it has not moved out of the way yet
    if state.occupies(new_head) {
        return end_run(state, GameOverReason::SelfCollision);
    }

    state.snake.push_front(new_head);
    state.time_ticks += 1;

    if state.food == Some(new_head) {
        state.score += FOOD_SCORE;
        state.food = place_food(state);
        debug_assert!(
            state.food.is_none_or(|f| !state.occupies(f)),
            "food placed on snake"
        );
        state.speed_ms = state.difficulty.profile().speed_for_score(state.score);
        TickOutcome::Ate {
            at: new_head,
            score: state.score,
        }
    } else {
        state.snake.pop_back();
        TickOutcome::Moved
    }
}

fn end_run(state: &mut GameState, reason: GameOverReason) -> TickOutcome {
    state.phase = GamePhase::Over;
    state.over_reason = Some(reason);
    TickOutcome::Collided(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Difficulty, Direction};
    use glam::IVec2;

    fn running(snake: &[(i32, i32)], dir: Direction) -> GameState {
        let mut state = GameState::new(12345, 30, Difficulty::Normal);
        state.snake = snake.iter().map(|&(x, y)| IVec2::new(x, y)).collect();
        state.direction.reset(dir);
        state.phase = GamePhase::Running;
        state.food = Some(IVec2::new(0, 0));
        state
    }

    #[test]
    fn test_wall_collision() {
        let mut state = running(&[(29, 4), (28, 4), (27, 4)], Direction::Right);
        assert_eq!(tick(&mut state), TickOutcome::Collided(GameOverReason::Wall));
        assert_eq!(state.phase, GamePhase::Over);
        assert_eq!(state.over_reason, Some(GameOverReason::Wall));
        // Snake is left as it was
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.head(), Some(IVec2::new(29, 4)));
    }

    #[test]
    fn test_self_collision() {
        // Head at (5,5) moving down into its own body at (5,6)
        let mut state = running(
            &[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)],
            Direction::Left,
        );
        assert!(state.direction.request(Direction::Down));
        assert_eq!(
            tick(&mut state),
            TickOutcome::Collided(GameOverReason::SelfCollision)
        );
        assert_eq!(state.phase, GamePhase::Over);
    }

    #[test]
    fn test_moving_into_tail_cell_collides() {
        let mut state = running(&[(5, 5), (6, 5), (6, 6), (5, 6)], Direction::Left);
        assert!(state.direction.request(Direction::Down));
        assert_eq!(
            tick(&mut state),
            TickOutcome::Collided(GameOverReason::SelfCollision)
        );
    }

    #[test]
    fn test_plain_move_keeps_length() {
        let mut state = running(&[(10, 10), (9, 10), (8, 10)], Direction::Right);
        assert_eq!(tick(&mut state), TickOutcome::Moved);
        let cells: Vec<_> = state.snake.iter().copied().collect();
        assert_eq!(
            cells,
            vec![IVec2::new(11, 10), IVec2::new(10, 10), IVec2::new(9, 10)]
        );
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut state = running(&[(10, 10), (9, 10), (8, 10)], Direction::Right);
        state.food = Some(IVec2::new(11, 10));
        assert_eq!(
            tick(&mut state),
            TickOutcome::Ate {
                at: IVec2::new(11, 10),
                score: 10
            }
        );
        assert_eq!(state.score, 10);
        assert_eq!(state.snake.len(), 4);
        let food = state.food.unwrap();
        assert!(!state.occupies(food));
        assert_eq!(state.speed_ms, 150);
    }

    #[test]
    fn test_fifth_food_speeds_up() {
        let mut state = running(&[(10, 10), (9, 10), (8, 10)], Direction::Right);
        state.score = 40;
        state.food = Some(IVec2::new(11, 10));
        tick(&mut state);
        assert_eq!(state.score, 50);
        assert_eq!(state.speed_ms, 140);
    }

    #[test]
    fn test_reversal_request_is_ignored() {
        let mut state = running(&[(10, 10), (9, 10), (8, 10)], Direction::Right);
        assert!(!state.direction.request(Direction::Left));
        assert_eq!(tick(&mut state), TickOutcome::Moved);
        assert_eq!(state.direction.current(), Direction::Right);
        assert_eq!(state.head(), Some(IVec2::new(11, 10)));
    }

    #[test]
    fn test_tick_skipped_unless_running() {
        let mut state = running(&[(10, 10), (9, 10), (8, 10)], Direction::Right);
        state.phase = GamePhase::Paused;
        assert_eq!(tick(&mut state), TickOutcome::Skipped);
        assert_eq!(state.head(), Some(IVec2::new(10, 10)));
    }

    #[test]
    fn test_determinism() {
        let mut a = running(&[(10, 10), (9, 10), (8, 10)], Direction::Right);
        let mut b = a.clone();
        for step in 0..20 {
            for state in [&mut a, &mut b] {
                // Steer onto whatever food was last placed
                state.food = state.head().map(|h| h + IVec2::new(1, 0));
                if step % 5 == 4 {
                    state.direction.request(Direction::Down);
                }
                tick(state);
            }
        }
        assert_eq!(a.snake, b.snake);
        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
    }
}
