use log::warn;
use rand::Rng;
use serde::Serialize;

use crate::config::FOOD_PLACEMENT_MAX_ATTEMPTS;
use crate::geometry::{Bounds, Position};
use crate::snake::Snake;

/// Food item currently on the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Food {
    #[serde(flatten)]
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Returns true when `head` is within `radius` of the food on both axes.
    #[must_use]
    pub fn is_eaten_by(self, head: Position, radius: f64) -> bool {
        (head.x - self.position.x).abs() < radius && (head.y - self.position.y).abs() < radius
    }
}

/// Returns true when `candidate` is inside `bounds` and shares neither an x
/// nor a y coordinate with any snake segment.
#[must_use]
pub fn valid_food_position(candidate: Position, snake: &Snake, bounds: Bounds) -> bool {
    bounds.contains(candidate)
        && snake
            .positions()
            .all(|segment| segment.x != candidate.x && segment.y != candidate.y)
}

/// Places food by rejection sampling over
/// `[0, width - hitbox) x [0, height - hitbox)`, floored to whole units.
///
/// After [`FOOD_PLACEMENT_MAX_ATTEMPTS`] rejected samples the row/column rule
/// is dropped and the next in-range sample is used, so a crowded field can
/// never stall a tick.
#[must_use]
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    snake: &Snake,
    bounds: Bounds,
    hitbox_size: f64,
) -> Food {
    for _ in 0..FOOD_PLACEMENT_MAX_ATTEMPTS {
        let candidate = sample_position(rng, bounds, hitbox_size);
        if valid_food_position(candidate, snake, bounds) {
            return Food::new(candidate);
        }
    }

    warn!(
        "no free row/column for food after {FOOD_PLACEMENT_MAX_ATTEMPTS} attempts \
         (snake length {}), placing without overlap check",
        snake.len()
    );
    Food::new(sample_position(rng, bounds, hitbox_size))
}

fn sample_position<R: Rng + ?Sized>(rng: &mut R, bounds: Bounds, hitbox_size: f64) -> Position {
    Position {
        x: rng.gen_range(0.0..bounds.width - hitbox_size).floor(),
        y: rng.gen_range(0.0..bounds.height - hitbox_size).floor(),
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::geometry::{Bounds, Position};
    use crate::snake::Snake;

    use super::{Food, place_food, valid_food_position};

    #[test]
    fn placed_food_avoids_snake_rows_and_columns() {
        let mut rng = StdRng::seed_from_u64(7);
        let bounds = Bounds::new(400.0, 300.0);

        for _ in 0..200 {
            let length = rng.gen_range(1..12);
            let positions = (0..length)
                .map(|_| {
                    Position::new(
                        rng.gen_range(0.0..375.0_f64).floor(),
                        rng.gen_range(0.0..275.0_f64).floor(),
                    )
                })
                .collect();
            let snake = Snake::from_positions(positions);

            let food = place_food(&mut rng, &snake, bounds, 25.0);

            assert!(food.position.x >= 0.0 && food.position.x < 375.0);
            assert!(food.position.y >= 0.0 && food.position.y < 275.0);
            for segment in snake.positions() {
                assert_ne!(segment.x, food.position.x);
                assert_ne!(segment.y, food.position.y);
            }
        }
    }

    #[test]
    fn sharing_a_row_is_invalid_even_far_away() {
        let snake = Snake::new(Position::new(10.0, 40.0));
        let bounds = Bounds::new(300.0, 300.0);

        assert!(!valid_food_position(Position::new(250.0, 40.0), &snake, bounds));
        assert!(!valid_food_position(Position::new(10.0, 250.0), &snake, bounds));
        assert!(valid_food_position(Position::new(11.0, 41.0), &snake, bounds));
    }

    #[test]
    fn saturated_field_falls_back_instead_of_hanging() {
        let mut rng = StdRng::seed_from_u64(3);
        let bounds = Bounds::new(30.0, 30.0);
        // Covers every whole-unit column 0..5 the sampler can produce.
        let snake = Snake::from_positions(
            (0..5)
                .map(|column| Position::new(f64::from(column), 0.0))
                .collect(),
        );

        let food = place_food(&mut rng, &snake, bounds, 25.0);

        assert!(food.position.x >= 0.0 && food.position.x < 5.0);
        assert!(food.position.y >= 0.0 && food.position.y < 5.0);
    }

    #[test]
    fn eating_uses_axis_distance() {
        let food = Food::new(Position::new(100.0, 100.0));

        assert!(food.is_eaten_by(Position::new(114.9, 85.1), 15.0));
        assert!(!food.is_eaten_by(Position::new(115.0, 100.0), 15.0));
        assert!(!food.is_eaten_by(Position::new(100.0, 80.0), 15.0));
    }
}
