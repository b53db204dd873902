use std::{fs::OpenOptions, path::Path};

use anyhow::Context;
use env_logger::{Env, Target};

/// Installs the global logger, appending to `log_file`.
///
/// The terminal belongs to the renderer while playing, so without a log file
/// no logger is installed and every record is dropped. The filter comes from
/// `RUST_LOG` and defaults to `info`.
pub fn init(log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to install logger")?;
    log::info!("logging to {}", path.display());
    Ok(())
}
