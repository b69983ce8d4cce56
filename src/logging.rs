//! Logging setup for the command-line tool.
//!
//! The library only emits records through the `log` facade; the binary
//! installs `env_logger` once at startup. Output defaults to `info` and can
//! be changed with `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=brewclean=debug brewclean run
//! ```

use anyhow::{Context as _, Result};
use env_logger::{Builder, Env};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Installs the global logger. Records go to stderr so the report on stdout
/// stays clean.
///
/// # Errors
///
/// Returns an error if a logger has already been installed.
pub fn init() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER))
        .format_timestamp_secs()
        .format_target(false)
        .try_init()
        .context("Failed to initialize logger")?;

    log::debug!("Logging initialized with default filter '{DEFAULT_FILTER}'");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        // Either this call or one made by another test installs the logger.
        let _first = init();
        assert!(init().is_err());
    }
}
