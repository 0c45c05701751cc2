use crate::geometry::{Bounds, Position};
use crate::snake::Snake;

/// Which rule ended the session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CollisionKind {
    Boundary,
    SelfBody,
}

/// Checks a candidate head against the field edges and the current body.
///
/// The head's box must fit inside `bounds`. Body hits use exact coordinate
/// equality, and the tail never counts because it is vacated this tick.
#[must_use]
pub fn detect_collision(
    snake: &Snake,
    candidate: Position,
    bounds: Bounds,
    hitbox_size: f64,
) -> Option<CollisionKind> {
    if !candidate.box_fits(bounds, hitbox_size) {
        return Some(CollisionKind::Boundary);
    }

    // First match only: a duplicate of the tail position further up the
    // body is shadowed by whichever segment comes first.
    let hit = snake
        .positions()
        .position(|segment| segment.same_spot(candidate));
    match hit {
        Some(index) if index != snake.len() - 1 => Some(CollisionKind::SelfBody),
        _ => None,
    }
}

/// Boolean form of [`detect_collision`].
#[must_use]
pub fn is_collision(snake: &Snake, candidate: Position, bounds: Bounds, hitbox_size: f64) -> bool {
    detect_collision(snake, candidate, bounds, hitbox_size).is_some()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::geometry::{Bounds, Position};
    use crate::snake::Snake;

    use super::{CollisionKind, detect_collision, is_collision};

    const BOUNDS: Bounds = Bounds {
        width: 300.0,
        height: 300.0,
    };
    const HITBOX: f64 = 25.0;

    #[test]
    fn free_candidates_inside_field_never_collide() {
        let mut rng = StdRng::seed_from_u64(5);
        let snake = Snake::from_positions(vec![
            Position::new(40.0, 40.0),
            Position::new(37.0, 40.0),
            Position::new(34.0, 40.0),
        ]);

        for _ in 0..500 {
            let candidate = Position::new(
                rng.gen_range(0.0..=BOUNDS.width - HITBOX),
                rng.gen_range(0.0..=BOUNDS.height - HITBOX),
            );
            if snake.positions().any(|segment| segment.same_spot(candidate)) {
                continue;
            }
            assert!(!is_collision(&snake, candidate, BOUNDS, HITBOX));
        }
    }

    #[test]
    fn candidates_outside_field_always_collide() {
        let snake = Snake::new(Position::new(100.0, 100.0));
        let outside = [
            Position::new(-0.5, 100.0),
            Position::new(100.0, -3.125),
            Position::new(BOUNDS.width - HITBOX + 0.001, 10.0),
            Position::new(10.0, BOUNDS.height),
            Position::new(1000.0, 1000.0),
        ];

        for candidate in outside {
            assert_eq!(
                detect_collision(&snake, candidate, BOUNDS, HITBOX),
                Some(CollisionKind::Boundary),
                "{candidate:?} should hit the boundary"
            );
        }
    }

    #[test]
    fn exact_body_match_collides() {
        let snake = Snake::from_positions(vec![
            Position::new(50.0, 50.0),
            Position::new(50.0, 53.125),
            Position::new(50.0, 56.25),
        ]);

        assert_eq!(
            detect_collision(&snake, Position::new(50.0, 53.125), BOUNDS, HITBOX),
            Some(CollisionKind::SelfBody)
        );
    }

    #[test]
    fn vacating_tail_is_passable() {
        let snake = Snake::from_positions(vec![
            Position::new(50.0, 50.0),
            Position::new(50.0, 53.125),
            Position::new(50.0, 56.25),
        ]);

        assert!(!is_collision(
            &snake,
            Position::new(50.0, 56.25),
            BOUNDS,
            HITBOX
        ));
    }

    #[test]
    fn near_miss_does_not_collide() {
        let snake = Snake::from_positions(vec![
            Position::new(50.0, 50.0),
            Position::new(53.125, 50.0),
        ]);

        assert!(!is_collision(
            &snake,
            Position::new(50.000_1, 50.0),
            BOUNDS,
            HITBOX
        ));
    }
}
