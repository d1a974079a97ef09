//! Site configuration management.

use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Prefix of environment variables that override file settings.
const ENV_PREFIX: &str = "LEAFPRESS";

/// Whether removing `output` would also remove `content`.
///
/// Paths are compared component-wise after dropping `.` segments, so an
/// empty or `.` output directory contains everything.
pub fn output_contains(output: &Path, content: &Path) -> bool {
    fn lexical(path: &Path) -> PathBuf {
        path.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    }
    lexical(content).starts_with(lexical(output))
}

fn not_found(path: &Path) -> CoreError {
    CoreError::config(format!("Configuration file not found: {}", path.display()))
}

/// Main configuration structure for leafpress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Base URL for the site (e.g., "https://example.com").
    pub base_url: String,

    /// Site description used on listing pages.
    #[serde(default)]
    pub description: Option<String>,

    /// Default author when an article names none.
    #[serde(default)]
    pub author: Option<String>,

    /// Language code written to the `lang` attribute.
    #[serde(default = "default_language")]
    pub language: String,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Directory holding the content record files.
    #[serde(default = "default_content_dir")]
    pub content_dir: String,

    /// Output directory for generated site.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Whether drafts are published.
    #[serde(default)]
    pub drafts: bool,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_content_dir() -> String {
    "content".to_string()
}

fn default_output_dir() -> String {
    "public".to_string()
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            output_dir: default_output_dir(),
            drafts: false,
        }
    }
}

impl Config {
    /// Build a configuration in memory, mostly useful for tests and tooling.
    pub fn new(title: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            site: SiteConfig {
                title: title.into(),
                base_url: base_url.into(),
                description: None,
                author: None,
                language: default_language(),
            },
            build: BuildConfig::default(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => not_found(path),
            _ => CoreError::Io(e),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Invalid configuration in {}", path.display()),
                e,
            )
        })?;
        config.validated()
    }

    /// Load configuration with `LEAFPRESS__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(not_found(path));
        }
        config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize::<Self>()?
            .validated()
    }

    fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Reject missing site identity and a build layout that would wipe content.
    fn validate(&self) -> Result<()> {
        let required = [
            ("site.title", &self.site.title),
            ("site.base_url", &self.site.base_url),
        ];
        if let Some((key, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(CoreError::config(format!("{key} cannot be empty")));
        }

        let BuildConfig {
            content_dir,
            output_dir,
            ..
        } = &self.build;
        if output_contains(Path::new(output_dir), Path::new(content_dir)) {
            return Err(CoreError::config(format!(
                "build.output_dir `{output_dir}` is cleaned on every build and must not \
                 contain build.content_dir `{content_dir}`"
            )));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!(base_url = %self.site.base_url, "site.base_url has a trailing slash");
        }

        Ok(())
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}
