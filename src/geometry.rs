use serde::Serialize;

/// Point in continuous play-field units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true when a square box of side `size` anchored at this
    /// position lies entirely inside `bounds`.
    #[must_use]
    pub fn box_fits(self, bounds: Bounds, size: f64) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.x + size <= bounds.width
            && self.y + size <= bounds.height
    }

    /// Returns true when both coordinates are exactly equal.
    ///
    /// Positions produced by the same step arithmetic compare equal bit for
    /// bit, which is what body collision relies on.
    #[must_use]
    pub fn same_spot(self, other: Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// Play-field dimensions, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns true when the point itself lies in `[0, width] x [0, height]`.
    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        position.x >= 0.0
            && position.y >= 0.0
            && position.x <= self.width
            && position.y <= self.height
    }
}
