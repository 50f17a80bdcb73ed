use std::collections::VecDeque;

use log::debug;

use crate::grid::Position;
use Direction::*;

pub const INITIAL_HEAD: Position = Position::new(10, 10);
pub const INITIAL_TAIL_LENGTH: usize = 2;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    pub fn velocity(self) -> Velocity {
        match self {
            Up => Velocity { dx: 0, dy: -1 },
            Down => Velocity { dx: 0, dy: 1 },
            Left => Velocity { dx: -1, dy: 0 },
            Right => Velocity { dx: 1, dy: 0 },
        }
    }
}

/// An axis-aligned unit step, or `IDLE` before the first input.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Velocity {
    dx: i32,
    dy: i32,
}

impl Velocity {
    pub const IDLE: Velocity = Velocity { dx: 0, dy: 0 };

    /// Returns `None` for anything but the idle vector and the four unit steps.
    pub fn new(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, 0) | (1, 0) | (-1, 0) | (0, 1) | (0, -1) => Some(Velocity { dx, dy }),
            _ => None,
        }
    }

    pub fn dx(&self) -> i32 {
        self.dx
    }

    pub fn dy(&self) -> i32 {
        self.dy
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }

    pub fn direction(&self) -> Option<Direction> {
        Direction::ALL.into_iter().find(|dir| dir.velocity() == *self)
    }

    /// Keeps `previous` on any axis where `self` would flip its sign.
    pub fn guarded_against(self, previous: Velocity) -> Velocity {
        let axis = |prev: i32, cand: i32| if prev != 0 && cand == -prev { prev } else { cand };
        Velocity {
            dx: axis(previous.dx, self.dx),
            dy: axis(previous.dy, self.dy),
        }
    }
}

impl From<Direction> for Velocity {
    fn from(direction: Direction) -> Self {
        direction.velocity()
    }
}

/// What a single `advance` did to the snake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub old_head: Position,
    pub new_head: Position,
    pub velocity: Velocity,
    pub reversal_blocked: bool,
    pub dropped_tail: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    head: Position,
    /// Previous head positions, oldest first.
    body: VecDeque<Position>,
    /// Velocity applied on the last tick; the reversal guard compares against it.
    velocity: Velocity,
    desired: Velocity,
    tail_length: usize,
}

impl Snake {
    pub fn new(head: Position) -> Self {
        Snake {
            head,
            body: VecDeque::with_capacity(INITIAL_TAIL_LENGTH + 1),
            velocity: Velocity::IDLE,
            desired: Velocity::IDLE,
            tail_length: INITIAL_TAIL_LENGTH,
        }
    }

    pub fn head(&self) -> Position {
        self.head
    }

    pub fn body(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    pub fn body_contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    pub fn desired_velocity(&self) -> Velocity {
        self.desired
    }

    pub fn tail_length(&self) -> usize {
        self.tail_length
    }

    /// Buffers the next velocity. Later calls before the next tick overwrite it.
    pub fn set_desired_velocity(&mut self, velocity: Velocity) {
        self.desired = velocity;
    }

    pub fn steer(&mut self, direction: Direction) {
        self.set_desired_velocity(direction.velocity());
    }

    /// Moves the head one step. The position it leaves is recorded as the
    /// newest body segment, so the body never contains the current head
    /// unless the snake is idle or has run into itself.
    pub fn advance(&mut self) -> Step {
        let candidate = self.desired;
        let velocity = candidate.guarded_against(self.velocity);
        let reversal_blocked = velocity != candidate;
        if reversal_blocked {
            debug!("Reversal from {:?} to {:?} blocked", self.velocity, candidate);
        }
        self.velocity = velocity;

        let old_head = self.head;
        self.body.push_back(old_head);
        let mut dropped_tail = None;
        while self.body.len() > self.tail_length {
            dropped_tail = self.body.pop_front();
        }

        self.head = Position::new(old_head.x + velocity.dx, old_head.y + velocity.dy);

        Step { old_head, new_head: self.head, velocity, reversal_blocked, dropped_tail }
    }

    pub fn grow(&mut self) {
        self.tail_length += 1;
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new(INITIAL_HEAD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moving(direction: Direction) -> Snake {
        let mut snake = Snake::default();
        snake.steer(direction);
        snake.advance();
        snake
    }

    #[test]
    fn test_velocity_validation() {
        assert_eq!(Velocity::new(0, 0), Some(Velocity::IDLE));
        assert_eq!(Velocity::new(1, 0), Some(Right.velocity()));
        assert_eq!(Velocity::new(0, -1), Some(Up.velocity()));
        assert_eq!(Velocity::new(1, 1), None);
        assert_eq!(Velocity::new(2, 0), None);
    }

    #[test]
    fn test_direction_round_trip() {
        for dir in Direction::ALL {
            assert_eq!(dir.velocity().direction(), Some(dir));
        }
        assert_eq!(Velocity::IDLE.direction(), None);
    }

    #[test]
    fn test_guard_blocks_each_reversal() {
        for (prev, cand) in [(Right, Left), (Left, Right), (Up, Down), (Down, Up)] {
            let guarded = cand.velocity().guarded_against(prev.velocity());
            assert_eq!(guarded, prev.velocity(), "{:?} -> {:?}", prev, cand);
        }
    }

    #[test]
    fn test_guard_allows_turns() {
        assert_eq!(Up.velocity().guarded_against(Right.velocity()), Up.velocity());
        assert_eq!(Left.velocity().guarded_against(Down.velocity()), Left.velocity());
        assert_eq!(Left.velocity().guarded_against(Velocity::IDLE), Left.velocity());
    }

    #[test]
    fn test_initial_state() {
        let snake = Snake::default();
        assert_eq!(snake.head(), Position::new(10, 10));
        assert_eq!(snake.velocity(), Velocity::IDLE);
        assert_eq!(snake.tail_length(), 2);
        assert_eq!(snake.body_len(), 0);
    }

    #[test]
    fn test_idle_advance_stays_put() {
        let mut snake = Snake::default();
        let step = snake.advance();
        assert_eq!(step.new_head, Position::new(10, 10));
        assert!(snake.body_contains(Position::new(10, 10)));
    }

    #[test]
    fn test_desired_velocity_is_buffered() {
        let mut snake = Snake::default();
        snake.steer(Right);
        assert_eq!(snake.velocity(), Velocity::IDLE);
        assert_eq!(snake.head(), Position::new(10, 10));
        snake.advance();
        assert_eq!(snake.velocity(), Right.velocity());
        assert_eq!(snake.head(), Position::new(11, 10));
    }

    #[test]
    fn test_last_desired_velocity_wins() {
        let mut snake = moving(Right);
        snake.steer(Up);
        snake.steer(Down);
        snake.advance();
        assert_eq!(snake.head(), Position::new(11, 11));
    }

    #[test]
    fn test_reversal_keeps_moving_forward() {
        let mut snake = moving(Right);
        snake.steer(Left);
        let step = snake.advance();
        assert!(step.reversal_blocked);
        assert_eq!(step.velocity, Right.velocity());
        assert_eq!(snake.head(), Position::new(12, 10));
    }

    #[test]
    fn test_body_capped_at_tail_length() {
        let mut snake = moving(Right);
        for _ in 0..5 {
            snake.advance();
            assert!(snake.body_len() <= snake.tail_length());
        }
        assert_eq!(snake.body().collect::<Vec<_>>(), vec![Position::new(14, 10), Position::new(15, 10)]);
    }

    #[test]
    fn test_grow_keeps_one_more_segment() {
        let mut snake = moving(Down);
        snake.advance();
        snake.grow();
        let step = snake.advance();
        assert_eq!(step.dropped_tail, None);
        assert_eq!(snake.body_len(), 3);
        let step = snake.advance();
        assert_eq!(step.dropped_tail, Some(Position::new(10, 10)));
        assert_eq!(snake.body_len(), 3);
    }

    #[test]
    fn test_head_may_leave_grid() {
        let mut snake = Snake::new(Position::new(0, 10));
        snake.steer(Left);
        snake.advance();
        assert_eq!(snake.head(), Position::new(-1, 10));
    }
}
