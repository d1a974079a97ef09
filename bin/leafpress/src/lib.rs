//! Leafpress CLI Library
//!
//! Command implementations for the `leafpress` binary, exposed as a library
//! so they can be driven from tests and other tooling.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, check, show, new)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use leafpress::cmd;
//!
//! cmd::build::run(Path::new("config.toml"), Some(Path::new("public")), false).unwrap();
//! ```

use std::path::{Path, PathBuf};

pub mod cmd;

pub use leafpress_core::{Config, ContentRecord};
pub use leafpress_site::{BuildStats, Builder, ContentCollector, ContentRegistry};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

/// Resolve a configured directory against the config file's location.
pub fn site_path(config_path: &Path, dir: &str) -> PathBuf {
    let dir = Path::new(dir);
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(dir),
        _ => dir.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_path() {
        assert_eq!(
            site_path(Path::new("config.toml"), "content"),
            PathBuf::from("content")
        );
        assert_eq!(
            site_path(Path::new("sites/blog/config.toml"), "content"),
            PathBuf::from("sites/blog/content")
        );
        assert_eq!(
            site_path(Path::new("sites/blog/config.toml"), "/srv/content"),
            PathBuf::from("/srv/content")
        );
    }
}
