//! Check command - validate configuration and content

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use leafpress_core::{
    Config, ContentRecord, RecordFormat,
    validate::{lint, validate_corpus},
};

use crate::site_path;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates configuration and every content record. Unlike a build,
/// all problems are reported instead of stopping at the first one.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and content");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match Config::load_with_env(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            Some(c)
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            None
        }
    };

    let content_dir = match &config {
        Some(c) => site_path(config_path, &c.build.content_dir),
        None => site_path(config_path, "content"),
    };

    if content_dir.is_dir() {
        println!("\nChecking content files...");
        check_content(&content_dir, &mut result);
    } else {
        result.add_error(format!("Content directory missing: {}", content_dir.display()));
    }

    if let Some(ref cfg) = config {
        println!("\nChecking configuration values...");
        check_config_values(cfg, &site_path(config_path, &cfg.build.output_dir), &mut result);
    }

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Parse, validate and lint every record under `dir`.
pub fn check_content(dir: &Path, result: &mut ValidationResult) {
    let mut records = Vec::new();
    let mut checked = 0;
    let mut unreadable = 0;

    for entry in walkdir::WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if RecordFormat::from_path(path).is_none() {
            continue;
        }

        checked += 1;
        match ContentRecord::load(path) {
            Ok(record) => records.push(record),
            Err(e) => {
                result.add_error(format!("{}: {e}", path.display()));
                unreadable += 1;
            }
        }
    }

    let invalid = validate_corpus(&records);
    let failed = unreadable + invalid.len();
    for err in invalid {
        result.add_error(err.to_string());
    }

    for record in &records {
        for warning in lint(record) {
            result.add_warning(warning.to_string());
        }
    }

    if failed == 0 {
        println!("  ✓ All {checked} content files valid");
    } else {
        println!("  ✗ {failed}/{checked} content files have errors");
    }
}

/// Check configuration values for common issues.
fn check_config_values(config: &Config, output: &Path, result: &mut ValidationResult) {
    if !config.site.base_url.starts_with("http") {
        result.add_warning("site.base_url should start with http:// or https://");
    }

    if config.site.description.is_none() {
        result.add_warning("site.description is empty");
    }

    if output.exists() && !output.is_dir() {
        result.add_error(format!(
            "Output path exists but is not a directory: {}",
            output.display()
        ));
    }

    println!("  ✓ Configuration values checked");
}
