//! Tracing subscriber setup.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "DECK_LOG";

/// Install the global subscriber.
///
/// Without a debug log, events go to stderr filtered by `DECK_LOG`
/// (default `warn`). With one, they go to that file at `debug` level so
/// nothing is painted over the TUI.
///
/// # Errors
/// Fails when the log file cannot be created.
pub fn init(debug_log: Option<&Path>) -> Result<()> {
    let default_level = if debug_log.is_some() { "debug" } else { "warn" };
    let filter = filter(std::env::var(LOG_ENV).ok().as_deref(), default_level);

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    let result = if let Some(path) = debug_log {
        let file = File::create(path)
            .with_context(|| format!("creating debug log {}", path.display()))?;
        builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
    } else {
        builder.with_writer(std::io::stderr).try_init()
    };
    // A subscriber may already be installed (tests, embedding); keep it.
    if let Err(err) = result {
        tracing::debug!(%err, "subscriber already installed");
    }
    Ok(())
}

fn filter(directives: Option<&str>, default_level: &str) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_falls_back_to_default() {
        assert_eq!(filter(None, "warn").to_string(), "warn");
        assert_eq!(filter(Some("deck=debug"), "warn").to_string(), "deck=debug");
    }

    #[test]
    fn test_init_with_log_file_creates_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.log");
        init(Some(&path)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_init_with_bad_path_fails() {
        let err = init(Some(Path::new("/no/such/dir/debug.log"))).unwrap_err();
        assert!(err.to_string().contains("creating debug log"));
    }
}
