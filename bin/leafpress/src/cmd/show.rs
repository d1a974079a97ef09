//! Show command - render one article by slug

use std::path::Path;

use clap::ValueEnum;
use color_eyre::eyre::{Result, WrapErr};
use leafpress_core::Config;
use leafpress_render::{RenderedBlock, html::blocks_to_html, render_record, text::blocks_to_text};
use leafpress_site::{ContentCollector, ContentRegistry};

use crate::site_path;

/// Output format for a rendered article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text for the terminal
    Text,
    /// Article body HTML
    Html,
    /// Rendered block descriptors as JSON
    Json,
}

/// Run the show command.
pub fn run(config_path: &Path, slug: &str, format: OutputFormat, drafts: bool) -> Result<()> {
    tracing::info!(?config_path, slug, ?format, "Showing article");

    let config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;
    let content_dir = site_path(config_path, &config.build.content_dir);

    let registry = ContentCollector::new(&content_dir)
        .load_registry(drafts || config.build.drafts)
        .wrap_err("Failed to load content")?;

    println!("{}", show(&registry, slug, format)?);
    Ok(())
}

/// Resolve and render an article in the requested format.
pub fn show(registry: &ContentRegistry, slug: &str, format: OutputFormat) -> Result<String> {
    let record = registry.resolve(slug)?;
    let blocks = render_record(record)?;

    let output = match format {
        OutputFormat::Text => format!("# {}\n\n{}", record.meta.title, blocks_to_text(&blocks)),
        OutputFormat::Html => blocks_to_html(&blocks),
        OutputFormat::Json => to_json(&blocks)?,
    };
    Ok(output)
}

fn to_json(blocks: &[RenderedBlock]) -> Result<String> {
    serde_json::to_string_pretty(blocks).wrap_err("Failed to serialize rendered blocks")
}
