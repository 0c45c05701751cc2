use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Rejected configuration values or unreadable configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("hitbox size must be a positive finite number, got {0}")]
    InvalidHitbox(f64),

    #[error("play field {width}x{height} must be larger than the hitbox ({hitbox}) on both axes")]
    FieldTooSmall { width: f64, height: f64, hitbox: f64 },

    #[error("step profile needs at least one sub-step")]
    EmptyStepProfile,

    #[error("step magnitude must be finite, got {0}")]
    NonFiniteStep(f64),

    #[error("tick rate must be a positive finite number of Hz, got {0}")]
    InvalidTickRate(f64),

    #[error("tick tolerance must be a non-negative number of milliseconds, got {0}")]
    InvalidTolerance(f64),

    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level failure of the terminal binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to initialise logging: {0}")]
    Logging(#[from] log::SetLoggerError),
}
