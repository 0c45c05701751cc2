use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::Bounds;
use crate::snake::StepProfile;

/// Side of the square box used for segments and food.
pub const DEFAULT_HITBOX_SIZE: f64 = 25.0;

/// Sub-steps generated per tick.
pub const DEFAULT_SUB_STEPS: usize = 3;

/// Fraction of the hitbox covered by the shortest sub-step.
pub const SUB_STEP_FRACTION: f64 = 0.125;

/// Target simulation rate.
pub const DEFAULT_TICK_RATE_HZ: f64 = 60.0;

/// Early-fire window for the tick pacer, in milliseconds.
pub const DEFAULT_TICK_TOLERANCE_MS: f64 = 0.1;

/// Score awarded per food eaten.
pub const POINTS_PER_FOOD: u32 = 10;

/// The eat radius is the hitbox size minus this inset.
pub const EAT_RADIUS_INSET: f64 = 10.0;

/// Distance a fresh snake is pushed back against its travel direction.
pub const SPAWN_RUNWAY: f64 = 100.0;

/// Rejected food samples before the row/column rule is dropped.
pub const FOOD_PLACEMENT_MAX_ATTEMPTS: usize = 10_000;

/// Field used when no size is configured and none can be measured.
pub const DEFAULT_FIELD_WIDTH: f64 = 750.0;
pub const DEFAULT_FIELD_HEIGHT: f64 = 500.0;

/// Terminal columns per hitbox; one row spans a whole hitbox.
pub const COLUMNS_PER_HITBOX: u16 = 2;

/// Display refresh interval for the terminal front-end.
pub const DISPLAY_FRAME_INTERVAL: Duration = Duration::from_millis(8);

const CONFIG_APP_DIR: &str = "glide-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// User-facing settings, as read from a JSON file and CLI flags.
///
/// Missing fields take their defaults; `width`/`height` left unset mean
/// "fit the field to the terminal".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub hitbox_size: f64,
    pub sub_steps: usize,
    pub tick_rate_hz: f64,
    pub tick_tolerance_ms: f64,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            hitbox_size: DEFAULT_HITBOX_SIZE,
            sub_steps: DEFAULT_SUB_STEPS,
            tick_rate_hz: DEFAULT_TICK_RATE_HZ,
            tick_tolerance_ms: DEFAULT_TICK_TOLERANCE_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Loads `path` when given, else the default config file if it exists,
    /// else built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_path(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_path(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Parses a JSON config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Validated tick period derived from `tick_rate_hz`.
    pub fn tick_period(&self) -> Result<Duration, ConfigError> {
        if !self.tick_rate_hz.is_finite() || self.tick_rate_hz <= 0.0 {
            return Err(ConfigError::InvalidTickRate(self.tick_rate_hz));
        }
        Ok(Duration::from_nanos((1e9 / self.tick_rate_hz).round() as u64))
    }

    pub fn tick_tolerance(&self) -> Result<Duration, ConfigError> {
        if !self.tick_tolerance_ms.is_finite() || self.tick_tolerance_ms < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.tick_tolerance_ms));
        }
        Ok(Duration::from_nanos((self.tick_tolerance_ms * 1e6).round() as u64))
    }

    /// Resolves the field size, using `fallback` for any unset axis, and
    /// validates everything a session needs.
    pub fn session_config(&self, fallback: Bounds) -> Result<SessionConfig, ConfigError> {
        let bounds = Bounds {
            width: self.width.unwrap_or(fallback.width),
            height: self.height.unwrap_or(fallback.height),
        };
        let profile = StepProfile::interpolated(self.sub_steps, self.hitbox_size)?;
        SessionConfig::new(bounds, self.hitbox_size, profile)
    }
}

/// Returns `<config_dir>/glide-snake/config.json` where the platform has one.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_APP_DIR).join(CONFIG_FILE_NAME))
}

/// Validated, immutable parameters of one session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    bounds: Bounds,
    hitbox_size: f64,
    step_profile: StepProfile,
}

impl SessionConfig {
    pub fn new(
        bounds: Bounds,
        hitbox_size: f64,
        step_profile: StepProfile,
    ) -> Result<Self, ConfigError> {
        if !hitbox_size.is_finite() || hitbox_size <= 0.0 {
            return Err(ConfigError::InvalidHitbox(hitbox_size));
        }
        // Spawning and food sampling draw from [0, side - hitbox).
        let fits = |side: f64| side.is_finite() && side > hitbox_size;
        if !fits(bounds.width) || !fits(bounds.height) {
            return Err(ConfigError::FieldTooSmall {
                width: bounds.width,
                height: bounds.height,
                hitbox: hitbox_size,
            });
        }

        Ok(Self {
            bounds,
            hitbox_size,
            step_profile,
        })
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[must_use]
    pub fn hitbox_size(&self) -> f64 {
        self.hitbox_size
    }

    #[must_use]
    pub fn step_profile(&self) -> &StepProfile {
        &self.step_profile
    }

    /// Axis distance under which the head eats the food.
    #[must_use]
    pub fn eat_radius(&self) -> f64 {
        self.hitbox_size - EAT_RADIUS_INSET
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use crate::error::ConfigError;
    use crate::geometry::Bounds;
    use crate::snake::StepProfile;

    use super::{GameConfig, SessionConfig};

    #[test]
    fn defaults_build_a_session_config() {
        let config = GameConfig::default()
            .session_config(Bounds::new(300.0, 300.0))
            .expect("defaults should validate");

        assert_eq!(config.bounds(), Bounds::new(300.0, 300.0));
        assert_eq!(config.step_profile().len(), 3);
        assert_eq!(config.eat_radius(), 15.0);
    }

    #[test]
    fn explicit_dimensions_override_fallback() {
        let config = GameConfig {
            width: Some(500.0),
            ..GameConfig::default()
        };

        let session = config
            .session_config(Bounds::new(300.0, 200.0))
            .expect("config should validate");

        assert_eq!(session.bounds(), Bounds::new(500.0, 200.0));
    }

    #[test]
    fn field_must_exceed_hitbox() {
        let profile = StepProfile::interpolated(3, 25.0).expect("profile should build");
        let result = SessionConfig::new(Bounds::new(25.0, 300.0), 25.0, profile);

        assert!(matches!(result, Err(ConfigError::FieldTooSmall { .. })));
    }

    #[test]
    fn zero_sub_steps_are_rejected() {
        let config = GameConfig {
            sub_steps: 0,
            ..GameConfig::default()
        };

        assert!(matches!(
            config.session_config(Bounds::new(300.0, 300.0)),
            Err(ConfigError::EmptyStepProfile)
        ));
    }

    #[test]
    fn tick_period_matches_rate() {
        let config = GameConfig {
            tick_rate_hz: 50.0,
            ..GameConfig::default()
        };

        assert_eq!(
            config.tick_period().expect("rate is valid"),
            Duration::from_millis(20)
        );
        assert!(
            GameConfig {
                tick_rate_hz: 0.0,
                ..GameConfig::default()
            }
            .tick_period()
            .is_err()
        );
    }

    #[test]
    fn config_file_fills_missing_fields_with_defaults() {
        let path = unique_test_path("partial");
        write_test_file(&path, r#"{ "hitbox_size": 20.0, "seed": 9 }"#);

        let config = GameConfig::from_path(&path).expect("partial config should parse");

        assert_eq!(config.hitbox_size, 20.0);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.sub_steps, 3);
        cleanup_test_path(&path);
    }

    #[test]
    fn malformed_config_file_returns_error() {
        let path = unique_test_path("malformed");
        write_test_file(&path, r#"{ "hitbox": 20.0 }"#);

        assert!(matches!(
            GameConfig::from_path(&path),
            Err(ConfigError::Parse { .. })
        ));
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_explicit_config_file_returns_error() {
        let path = unique_test_path("missing");

        assert!(matches!(
            GameConfig::load(Some(&path)),
            Err(ConfigError::Read { .. })
        ));
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("glide-snake-config-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn write_test_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
