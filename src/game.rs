use std::time::Duration;

use log::{debug, info};

use crate::collision::{self, Collision};
use crate::food::{Food, RandomSource};
use crate::grid::Position;
use crate::render::{self, DrawSurface};
use crate::snake::{Direction, Snake, Step, Velocity};
use crate::sound::SoundEffect;

pub const BASE_SPEED: u32 = 7;
pub const MEDIUM_SPEED: u32 = 9;
pub const TOP_SPEED: u32 = 11;
pub const MEDIUM_SPEED_ABOVE: u32 = 5;
pub const TOP_SPEED_ABOVE: u32 = 10;

/// Ticks per second for a given score.
pub fn speed_for_score(score: u32) -> u32 {
    if score > TOP_SPEED_ABOVE {
        TOP_SPEED
    } else if score > MEDIUM_SPEED_ABOVE {
        MEDIUM_SPEED
    } else {
        BASE_SPEED
    }
}

pub fn tick_interval(speed: u32) -> Duration {
    Duration::from_micros(1_000_000 / u64::from(speed.max(1)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Terminal: no further ticks move the snake and input is ignored.
    GameOver,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// `None` when the tick arrived after the game had already ended.
    pub step: Option<Step>,
    pub ate_food: bool,
    pub collision: Option<Collision>,
    pub phase: Phase,
    pub speed: u32,
    /// When to run the next tick; `None` once the game is over.
    pub next_tick: Option<Duration>,
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub head: Position,
    /// Oldest first.
    pub body: Vec<Position>,
    pub food: Position,
    pub score: u32,
    pub tail_length: usize,
    pub speed: u32,
    pub ticks: u64,
    pub phase: Phase,
}

pub struct Game<R: RandomSource> {
    snake: Snake,
    food: Food,
    score: u32,
    speed: u32,
    phase: Phase,
    ticks: u64,
    random: R,
}

impl<R: RandomSource> Game<R> {
    pub fn new(random: R) -> Self {
        Self::from_parts(Snake::default(), Food::default(), random)
    }

    pub fn from_parts(snake: Snake, food: Food, random: R) -> Self {
        Game { snake, food, score: 0, speed: BASE_SPEED, phase: Phase::Running, ticks: 0, random }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Food {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn tick_interval(&self) -> Duration {
        tick_interval(self.speed)
    }

    /// Returns `false` if the game is over and the input was dropped.
    pub fn steer(&mut self, direction: Direction) -> bool {
        self.set_desired_velocity(direction.velocity())
    }

    pub fn set_desired_velocity(&mut self, velocity: Velocity) -> bool {
        if self.is_over() {
            return false;
        }
        self.snake.set_desired_velocity(velocity);
        true
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            head: self.snake.head(),
            body: self.snake.body().collect(),
            food: self.food.position(),
            score: self.score,
            tail_length: self.snake.tail_length(),
            speed: self.speed,
            ticks: self.ticks,
            phase: self.phase,
        }
    }

    pub fn tick(&mut self, surface: &mut dyn DrawSurface, sound: &mut dyn SoundEffect) -> TickOutcome {
        if self.is_over() {
            return TickOutcome {
                step: None,
                ate_food: false,
                collision: None,
                phase: self.phase,
                speed: self.speed,
                next_tick: None,
            };
        }

        self.ticks += 1;
        let step = self.snake.advance();
        debug!("Tick {}: head {:?} velocity {:?}", self.ticks, step.new_head, step.velocity);

        if let Some(collision) = collision::check(&self.snake) {
            self.phase = Phase::GameOver;
            info!(
                "Game over after {} ticks: {} at {:?}, score {}",
                self.ticks, collision, step.new_head, self.score
            );
            render::draw_game_over(surface);
            return TickOutcome {
                step: Some(step),
                ate_food: false,
                collision: Some(collision),
                phase: self.phase,
                speed: self.speed,
                next_tick: None,
            };
        }

        let ate_food = self.food.is_consumed_by(step.new_head);
        if ate_food {
            let next = self.food.respawn(&mut self.random);
            self.snake.grow();
            self.score += 1;
            sound.play();
            info!("Food eaten at {:?}, score {}, next food at {:?}", step.new_head, self.score, next);
        }

        render::draw_frame(surface, &self.snapshot());

        let speed = speed_for_score(self.score);
        if speed != self.speed {
            info!("Speed raised from {} to {} ticks/s", self.speed, speed);
            self.speed = speed;
        }

        TickOutcome {
            step: Some(step),
            ate_food,
            collision: None,
            phase: self.phase,
            speed: self.speed,
            next_tick: Some(self.tick_interval()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{Call, Recorder};
    use crate::render::{Color, GAME_OVER_TEXT};
    use crate::snake::Direction::*;
    use crate::sound::Mute;

    struct Scripted(Vec<f64>);

    impl RandomSource for Scripted {
        fn next_unit(&mut self) -> f64 {
            if self.0.is_empty() {
                0.0
            } else {
                self.0.remove(0)
            }
        }
    }

    #[derive(Default)]
    struct Counter(u32);

    impl SoundEffect for Counter {
        fn play(&mut self) {
            self.0 += 1;
        }
    }

    fn game() -> Game<Scripted> {
        Game::new(Scripted(vec![]))
    }

    fn run(game: &mut Game<Scripted>, dir: Direction, ticks: usize) -> TickOutcome {
        let mut outcome = None;
        for _ in 0..ticks {
            game.steer(dir);
            outcome = Some(game.tick(&mut Recorder::default(), &mut Mute));
        }
        outcome.unwrap()
    }

    #[test]
    fn test_speed_tiers() {
        assert_eq!(speed_for_score(0), 7);
        assert_eq!(speed_for_score(5), 7);
        assert_eq!(speed_for_score(6), 9);
        assert_eq!(speed_for_score(10), 9);
        assert_eq!(speed_for_score(11), 11);
        assert_eq!(speed_for_score(40), 11);
    }

    #[test]
    fn test_tick_interval() {
        assert_eq!(tick_interval(7), Duration::from_micros(142_857));
        assert_eq!(tick_interval(10), Duration::from_millis(100));
    }

    #[test]
    fn test_idle_ticks_never_end_the_game() {
        let mut game = game();
        for _ in 0..10 {
            let outcome = game.tick(&mut Recorder::default(), &mut Mute);
            assert_eq!(outcome.phase, Phase::Running);
        }
        assert_eq!(game.snake().head(), Position::new(10, 10));
    }

    #[test]
    fn test_first_move_right() {
        let mut game = game();
        let outcome = run(&mut game, Right, 1);
        assert_eq!(game.snake().head(), Position::new(11, 10));
        assert_eq!(outcome.collision, None);
        assert_eq!(outcome.next_tick, Some(tick_interval(7)));
    }

    #[test]
    fn test_reversal_in_same_window() {
        let mut game = game();
        run(&mut game, Right, 1);
        game.steer(Left);
        game.tick(&mut Recorder::default(), &mut Mute);
        assert_eq!(game.snake().velocity(), Right.velocity());
        assert_eq!(game.snake().head(), Position::new(12, 10));
    }

    #[test]
    fn test_eating_food() {
        let mut game = Game::new(Scripted(vec![0.65, 0.9]));
        let mut sound = Counter::default();
        run(&mut game, Left, 5);
        assert_eq!(game.snake().head(), Position::new(5, 10));
        for _ in 0..4 {
            game.steer(Up);
            game.tick(&mut Recorder::default(), &mut sound);
        }
        assert_eq!(game.score(), 0);

        game.steer(Up);
        let outcome = game.tick(&mut Recorder::default(), &mut sound);
        assert!(outcome.ate_food);
        assert_eq!(game.snake().head(), Position::new(5, 5));
        assert_eq!(game.score(), 1);
        assert_eq!(game.snake().tail_length(), 3);
        assert_eq!(game.food().position(), Position::new(13, 18));
        assert_eq!(sound.0, 1);
    }

    #[test]
    fn test_food_may_land_on_body() {
        // Both samples map back onto the cell the head just left.
        let mut game = Game::from_parts(
            Snake::default(),
            Food::at(Position::new(11, 10)),
            Scripted(vec![0.5, 0.5]),
        );
        let outcome = run(&mut game, Right, 1);
        assert!(outcome.ate_food);
        assert_eq!(game.food().position(), Position::new(10, 10));
        assert!(game.snake().body_contains(game.food().position()));
    }

    #[test]
    fn test_wall_ends_game_and_detaches_input() {
        let mut game = game();
        let mut surface = Recorder::default();
        run(&mut game, Left, 10);
        assert_eq!(game.snake().head(), Position::new(0, 10));

        game.steer(Left);
        let outcome = game.tick(&mut surface, &mut Mute);
        assert_eq!(outcome.collision, Some(Collision::Wall));
        assert_eq!(outcome.phase, Phase::GameOver);
        assert_eq!(outcome.next_tick, None);
        assert!(matches!(
            surface.calls.as_slice(),
            [Call::Text(text, _, _, Color::DodgerBlue)] if text == GAME_OVER_TEXT
        ));

        assert!(!game.steer(Up));
        let head = game.snake().head();
        let outcome = game.tick(&mut surface, &mut Mute);
        assert_eq!(outcome.step, None);
        assert_eq!(game.snake().head(), head);
        assert_eq!(game.ticks(), 11);
    }

    #[test]
    fn test_speed_ramps_with_score() {
        let mut game = game();
        for expected_score in 1..=11u32 {
            game.snake = Snake::default();
            game.food = Food::at(Position::new(11, 10));
            game.steer(Right);
            let outcome = game.tick(&mut Recorder::default(), &mut Mute);
            assert!(outcome.ate_food);
            assert_eq!(game.score(), expected_score);
            assert_eq!(outcome.speed, speed_for_score(expected_score));
            assert_eq!(outcome.next_tick, Some(tick_interval(outcome.speed)));
        }
        assert_eq!(game.speed(), 11);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut game = game();
        run(&mut game, Down, 3);
        let snapshot = game.snapshot();
        assert_eq!(snapshot.head, Position::new(10, 13));
        assert_eq!(snapshot.body, vec![Position::new(10, 11), Position::new(10, 12)]);
        assert_eq!(snapshot.food, Position::new(5, 5));
        assert_eq!(snapshot.ticks, 3);
        assert_eq!(snapshot.phase, Phase::Running);
    }
}
