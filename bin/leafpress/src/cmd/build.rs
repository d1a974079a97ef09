//! Build command - generates the static site

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use leafpress_core::Config;
use leafpress_site::Builder;

use crate::site_path;

/// Run the build command.
///
/// Builds the static site from the configured content directory. Any
/// invalid record fails the build before the output directory is touched.
pub fn run(config_path: &Path, output: Option<&Path>, drafts: bool) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, ?output, drafts, "Starting build");

    let mut config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;

    if drafts {
        config.build.drafts = true;
    }

    let content_dir = site_path(config_path, &config.build.content_dir);
    let output_dir = match output {
        Some(dir) => dir.to_path_buf(),
        None => site_path(config_path, &config.build.output_dir),
    };

    tracing::debug!(?config, "Loaded configuration");

    let stats = Builder::new(config, &content_dir, &output_dir)
        .build()
        .wrap_err("Build failed")?;

    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Articles:   {}", stats.articles);
    println!("  Drafts:     {} skipped", stats.drafts_skipped);
    println!("  Taxonomies: {}", stats.taxonomy_pages);
    println!();
    println!("  Duration:   {:.2}s", duration.as_secs_f64());
    println!("  Output:     {}", output_dir.display());
    println!();

    tracing::info!(?stats, ?duration, "Build completed successfully");

    Ok(())
}
