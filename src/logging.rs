use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Env, Target};

use crate::error::AppError;

/// Routes `log` records to `log_file`, filtered by `RUST_LOG` (default
/// `info`).
///
/// The terminal is owned by the renderer, so without a file nothing is
/// installed and every log macro is a no-op.
pub fn init(log_file: Option<&Path>) -> Result<(), AppError> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()?;

    Ok(())
}
