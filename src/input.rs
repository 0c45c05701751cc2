use serde::Serialize;

/// Canonical movement directions for the snake.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Axis a direction travels along.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    #[must_use]
    pub fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    /// Unit offset in screen orientation (y grows downward).
    #[must_use]
    pub fn unit(self) -> (f64, f64) {
        match self {
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
        }
    }
}

/// Raw drag/swipe translation reported by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureDelta {
    pub dx: f64,
    pub dy: f64,
}

impl GestureDelta {
    #[must_use]
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Reduces the gesture to the direction of its dominant axis.
    ///
    /// Returns `None` for non-finite or zero-length gestures.
    #[must_use]
    pub fn dominant_direction(self) -> Option<Direction> {
        if !self.dx.is_finite() || !self.dy.is_finite() {
            return None;
        }
        if self.dx == 0.0 && self.dy == 0.0 {
            return None;
        }

        let direction = if self.dx.abs() > self.dy.abs() {
            if self.dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if self.dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        };
        Some(direction)
    }
}

impl From<Direction> for GestureDelta {
    fn from(direction: Direction) -> Self {
        let (dx, dy) = direction.unit();
        Self { dx, dy }
    }
}

/// High-level input events consumed by the front-end loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameInput {
    Gesture(GestureDelta),
    Confirm,
    Quit,
}

/// Returns whether a turn is allowed: only perpendicular turns are.
///
/// Same-axis requests are refused, which rules out 180° reversals as well as
/// no-op re-sets of the current direction.
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    current.axis() != next.axis()
}

/// Resolves a gesture against the current direction.
///
/// Returns the accepted new direction, or `None` when the gesture is
/// malformed or does not describe a perpendicular turn.
#[must_use]
pub fn resolve_gesture(current: Direction, gesture: GestureDelta) -> Option<Direction> {
    gesture
        .dominant_direction()
        .filter(|next| direction_change_is_valid(current, *next))
}
