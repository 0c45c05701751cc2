use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::collision::{CollisionKind, detect_collision};
use crate::config::{POINTS_PER_FOOD, SessionConfig};
use crate::food::{Food, place_food};
use crate::geometry::Bounds;
use crate::input::{Direction, GestureDelta, resolve_gesture};
use crate::snake::{Segment, Snake, advance};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Over,
}

/// Result of one [`GameSession::tick`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The session is over; nothing moved.
    Idle,
    Moved,
    Ate,
    Collided(CollisionKind),
}

/// Read-only copy of the post-tick state handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub segments: Vec<Segment>,
    pub food: Food,
    pub direction: Direction,
    pub score: u32,
    pub over: bool,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub snake: Snake,
    pub food: Food,
    pub direction: Direction,
    pub score: u32,
    pub status: GameStatus,
    pub death_reason: Option<CollisionKind>,
    pub tick_count: u64,
    config: SessionConfig,
    rng: StdRng,
}

impl GameSession {
    /// Creates a session seeded from OS entropy.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self::from_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic session for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(config: SessionConfig, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: SessionConfig, mut rng: StdRng) -> Self {
        let (snake, direction, food) = spawn(&mut rng, &config);

        Self {
            snake,
            food,
            direction,
            score: 0,
            status: GameStatus::Running,
            death_reason: None,
            tick_count: 0,
            config,
            rng,
        }
    }

    /// Advances the simulation by one tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status == GameStatus::Over {
            return TickOutcome::Idle;
        }

        self.tick_count += 1;
        let step = advance(&self.snake, self.direction, self.config.step_profile());
        let head = step.head();

        if let Some(kind) = detect_collision(
            &self.snake,
            head,
            self.config.bounds(),
            self.config.hitbox_size(),
        ) {
            self.status = GameStatus::Over;
            self.death_reason = Some(kind);
            info!(
                "game over after {} ticks: {kind:?} at ({}, {}), score {}",
                self.tick_count, head.x, head.y, self.score
            );
            return TickOutcome::Collided(kind);
        }

        if self.food.is_eaten_by(head, self.config.eat_radius()) {
            self.snake = self.snake.grown(step.candidates());
            self.score = self.score.saturating_add(POINTS_PER_FOOD);
            self.food = place_food(
                &mut self.rng,
                &self.snake,
                self.config.bounds(),
                self.config.hitbox_size(),
            );
            debug!(
                "food eaten, length {} score {}, next food at ({}, {})",
                self.snake.len(),
                self.score,
                self.food.position.x,
                self.food.position.y
            );
            return TickOutcome::Ate;
        }

        self.snake = self.snake.shifted(head);
        TickOutcome::Moved
    }

    /// Feeds one gesture; returns whether the direction changed.
    ///
    /// The accepted direction is used from the next tick on; later gestures
    /// overwrite earlier ones.
    pub fn set_direction(&mut self, gesture: GestureDelta) -> bool {
        if self.status == GameStatus::Over {
            return false;
        }

        match resolve_gesture(self.direction, gesture) {
            Some(direction) => {
                trace!("direction {:?} -> {direction:?}", self.direction);
                self.direction = direction;
                true
            }
            None => {
                trace!("ignored gesture {gesture:?} while heading {:?}", self.direction);
                false
            }
        }
    }

    /// Re-initialises every field for a fresh running session.
    pub fn restart(&mut self) {
        let (snake, direction, food) = spawn(&mut self.rng, &self.config);
        self.snake = snake;
        self.direction = direction;
        self.food = food;
        self.score = 0;
        self.status = GameStatus::Running;
        self.death_reason = None;
        self.tick_count = 0;
        info!("session restarted heading {direction:?}");
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            segments: self.snake.segments().to_vec(),
            food: self.food,
            direction: self.direction,
            score: self.score,
            over: self.is_over(),
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.config.bounds()
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

fn spawn(rng: &mut StdRng, config: &SessionConfig) -> (Snake, Direction, Food) {
    let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
    let snake = Snake::spawn(rng, config.bounds(), config.hitbox_size(), direction);
    let food = place_food(rng, &snake, config.bounds(), config.hitbox_size());
    (snake, direction, food)
}
