use std::fmt;

use crate::grid::TILE_COUNT;
use crate::snake::Snake;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collision::Wall => write!(f, "hit a wall"),
            Collision::Body => write!(f, "ran into itself"),
        }
    }
}

/// Inspects the snake right after `advance`. An idle snake never collides:
/// before the first input its head sits on its own last recorded segment.
pub fn check(snake: &Snake) -> Option<Collision> {
    if snake.velocity().is_idle() {
        return None;
    }

    let head = snake.head();
    // Unit steps cannot skip past the far edge, so equality is enough there.
    if head.x < 0 || head.x == TILE_COUNT || head.y < 0 || head.y == TILE_COUNT {
        return Some(Collision::Wall);
    }

    if snake.body_contains(head) {
        return Some(Collision::Body);
    }

    None
}

pub fn is_game_over(snake: &Snake) -> bool {
    check(snake).is_some()
}
