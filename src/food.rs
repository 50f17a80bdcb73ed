use rand::Rng;

use crate::grid::{Position, TILE_COUNT};

pub const INITIAL_FOOD: Position = Position::new(5, 5);

/// Uniform samples over `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// Adapts any `rand` generator into a `RandomSource`.
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

fn sample_coord(random: &mut dyn RandomSource) -> i32 {
    let unit = random.next_unit();
    debug_assert!((0.0..1.0).contains(&unit), "random source out of range: {}", unit);
    (unit * TILE_COUNT as f64).floor() as i32
}

/// The single piece of food on the board. It is placed without looking at
/// the snake, so it can land on a body segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Position,
}

impl Food {
    pub fn at(position: Position) -> Self {
        Food { position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn respawn(&mut self, random: &mut dyn RandomSource) -> Position {
        let x = sample_coord(random);
        let y = sample_coord(random);
        self.position = Position::new(x, y);
        self.position
    }

    pub fn is_consumed_by(&self, head: Position) -> bool {
        self.position == head
    }
}

impl Default for Food {
    fn default() -> Self {
        Food::at(INITIAL_FOOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    struct Fixed(Vec<f64>);

    impl RandomSource for Fixed {
        fn next_unit(&mut self) -> f64 {
            self.0.remove(0)
        }
    }

    #[test]
    fn test_initial_food() {
        assert_eq!(Food::default().position(), Position::new(5, 5));
    }

    #[test]
    fn test_respawn_floors_samples() {
        let mut food = Food::default();
        let mut random = Fixed(vec![0.0, 0.999_999]);
        assert_eq!(food.respawn(&mut random), Position::new(0, 19));

        let mut random = Fixed(vec![0.5, 0.26]);
        assert_eq!(food.respawn(&mut random), Position::new(10, 5));
    }

    #[test]
    fn test_consumed_only_on_exact_cell() {
        let food = Food::at(Position::new(5, 5));
        assert!(food.is_consumed_by(Position::new(5, 5)));
        assert!(!food.is_consumed_by(Position::new(5, 6)));
        assert!(!food.is_consumed_by(Position::new(6, 5)));
    }

    #[test]
    fn test_seeded_respawn_stays_on_grid() {
        let mut food = Food::default();
        let mut random = RngSource(StdRng::seed_from_u64(7));
        for _ in 0..1_000 {
            assert!(food.respawn(&mut random).in_bounds());
        }
    }
}
