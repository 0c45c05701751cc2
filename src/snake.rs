use rand::Rng;
use serde::Serialize;

use crate::config::{SPAWN_RUNWAY, SUB_STEP_FRACTION};
use crate::error::ConfigError;
use crate::geometry::{Bounds, Position};
use crate::input::Direction;

/// One body segment; `pos` is its rank from the head (head is `0`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    #[serde(flatten)]
    pub position: Position,
    pub pos: usize,
}

/// Ordered sub-step offsets applied from the current head during one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct StepProfile {
    magnitudes: Vec<f64>,
}

impl StepProfile {
    /// Builds a profile from explicit magnitudes, in candidate order.
    pub fn new(magnitudes: Vec<f64>) -> Result<Self, ConfigError> {
        if magnitudes.is_empty() {
            return Err(ConfigError::EmptyStepProfile);
        }
        if let Some(bad) = magnitudes.iter().copied().find(|m| !m.is_finite()) {
            return Err(ConfigError::NonFiniteStep(bad));
        }
        Ok(Self { magnitudes })
    }

    /// Smooth interpolation profile: candidate `i` of `n` moves
    /// `hitbox * 0.125 * (n - i)`, so the last candidate is the shortest step.
    pub fn interpolated(sub_steps: usize, hitbox_size: f64) -> Result<Self, ConfigError> {
        let magnitudes = (0..sub_steps)
            .map(|index| hitbox_size * SUB_STEP_FRACTION * (sub_steps - index) as f64)
            .collect();
        Self::new(magnitudes)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    /// Always false; construction rejects empty profiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    #[must_use]
    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }
}

/// Candidate heads produced for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Advance {
    candidates: Vec<Position>,
}

impl Advance {
    /// The authoritative new head used for collision and eating checks.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .candidates
            .last()
            .expect("step profiles always yield at least one candidate")
    }

    /// All candidates in profile order; these lead the body after eating.
    #[must_use]
    pub fn candidates(&self) -> &[Position] {
        &self.candidates
    }
}

/// Computes this tick's candidate heads by offsetting copies of the current
/// head along `direction`.
#[must_use]
pub fn advance(snake: &Snake, direction: Direction, profile: &StepProfile) -> Advance {
    let head = snake.head();
    let (ux, uy) = direction.unit();
    let candidates = profile
        .magnitudes()
        .iter()
        .map(|step| Position {
            x: head.x + ux * step,
            y: head.y + uy * step,
        })
        .collect();

    Advance { candidates }
}

/// Immutable snake body; every movement produces a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    segments: Vec<Segment>,
}

impl Snake {
    /// Creates a one-segment snake at `head`.
    #[must_use]
    pub fn new(head: Position) -> Self {
        Self::from_positions(vec![head])
    }

    /// Creates a snake from explicit positions (first is head).
    ///
    /// # Panics
    ///
    /// Panics if `positions` is empty.
    #[must_use]
    pub fn from_positions(positions: Vec<Position>) -> Self {
        assert!(!positions.is_empty(), "snake needs at least one segment");

        let segments = positions
            .into_iter()
            .enumerate()
            .map(|(pos, position)| Segment { position, pos })
            .collect();
        Self { segments }
    }

    /// Spawns a one-segment snake at a random spot, pushed back against
    /// `direction` so it has room to travel before reaching a wall.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: Bounds,
        hitbox_size: f64,
        direction: Direction,
    ) -> Self {
        let max_x = bounds.width - hitbox_size;
        let max_y = bounds.height - hitbox_size;
        let (ux, uy) = direction.unit();

        let x = rng.gen_range(0.0..max_x).floor() - ux * SPAWN_RUNWAY;
        let y = rng.gen_range(0.0..max_y).floor() - uy * SPAWN_RUNWAY;

        Self::new(Position {
            x: x.clamp(0.0, max_x),
            y: y.clamp(0.0, max_y),
        })
    }

    /// Locomotion: `new_head` replaces the head and the tail is dropped.
    #[must_use]
    pub fn shifted(&self, new_head: Position) -> Self {
        let positions = std::iter::once(new_head)
            .chain(self.positions().take(self.len() - 1))
            .collect();
        Self::from_positions(positions)
    }

    /// Growth: `leading` is prepended and the whole old body is kept.
    #[must_use]
    pub fn grown(&self, leading: &[Position]) -> Self {
        let positions = leading.iter().copied().chain(self.positions()).collect();
        Self::from_positions(positions)
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.segments
            .first()
            .expect("snake body must always contain at least one segment")
            .position
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments from head to tail.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().map(|segment| segment.position)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::geometry::{Bounds, Position};
    use crate::input::Direction;

    use super::{Snake, StepProfile, advance};

    #[test]
    fn interpolated_profile_shrinks_toward_last_candidate() {
        let profile = StepProfile::interpolated(3, 25.0).expect("profile should build");

        assert_eq!(profile.magnitudes(), &[9.375, 6.25, 3.125]);
    }

    #[test]
    fn empty_profile_is_rejected() {
        assert!(StepProfile::new(Vec::new()).is_err());
        assert!(StepProfile::interpolated(0, 25.0).is_err());
        assert!(StepProfile::new(vec![1.0, f64::NAN]).is_err());
    }

    #[test]
    fn advance_offsets_along_each_axis() {
        let snake = Snake::new(Position::new(100.0, 100.0));
        let profile = StepProfile::new(vec![4.0, 2.0]).expect("profile should build");

        let right = advance(&snake, Direction::Right, &profile);
        assert_eq!(
            right.candidates(),
            &[Position::new(104.0, 100.0), Position::new(102.0, 100.0)]
        );
        assert_eq!(right.head(), Position::new(102.0, 100.0));

        assert_eq!(
            advance(&snake, Direction::Up, &profile).head(),
            Position::new(100.0, 98.0)
        );
        assert_eq!(
            advance(&snake, Direction::Down, &profile).head(),
            Position::new(100.0, 102.0)
        );
        assert_eq!(
            advance(&snake, Direction::Left, &profile).head(),
            Position::new(98.0, 100.0)
        );
    }

    #[test]
    fn shift_keeps_length_and_drops_tail() {
        let snake = Snake::from_positions(vec![
            Position::new(10.0, 0.0),
            Position::new(5.0, 0.0),
            Position::new(0.0, 0.0),
        ]);

        let moved = snake.shifted(Position::new(15.0, 0.0));

        assert_eq!(moved.len(), 3);
        assert_eq!(moved.head(), Position::new(15.0, 0.0));
        assert_eq!(moved.positions().last(), Some(Position::new(5.0, 0.0)));
        assert_eq!(snake.head(), Position::new(10.0, 0.0));
    }

    #[test]
    fn growth_prepends_every_candidate() {
        let snake = Snake::new(Position::new(50.0, 50.0));
        let profile = StepProfile::interpolated(3, 25.0).expect("profile should build");
        let step = advance(&snake, Direction::Down, &profile);

        let grown = snake.grown(step.candidates());

        assert_eq!(grown.len(), 4);
        assert_eq!(grown.head(), Position::new(50.0, 59.375));
        assert_eq!(grown.positions().last(), Some(Position::new(50.0, 50.0)));
    }

    #[test]
    fn segment_ranks_follow_body_order() {
        let grown = Snake::new(Position::new(0.0, 0.0))
            .grown(&[Position::new(2.0, 0.0), Position::new(1.0, 0.0)]);

        let ranks: Vec<usize> = grown.segments().iter().map(|segment| segment.pos).collect();
        assert_eq!(ranks, vec![0, 1, 2]);
    }

    #[test]
    #[should_panic(expected = "snake needs at least one segment")]
    fn empty_body_is_rejected() {
        let _ = Snake::from_positions(Vec::new());
    }

    #[test]
    fn spawn_stays_inside_field() {
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = Bounds::new(300.0, 200.0);

        for direction in Direction::ALL.iter().copied().cycle().take(200) {
            let snake = Snake::spawn(&mut rng, bounds, 25.0, direction);
            assert_eq!(snake.len(), 1);
            assert!(snake.head().box_fits(bounds, 25.0));
        }
    }
}
