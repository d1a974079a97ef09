//! New command - create a draft article record

use std::{fs, path::Path};

use chrono::Utc;
use color_eyre::eyre::{Result, WrapErr, bail};
use leafpress_core::{Config, validate::is_url_safe_slug};

use crate::site_path;

/// Run the new command.
///
/// Writes `<content_dir>/<slug>.yaml` with draft metadata and one empty
/// section. Existing files are never overwritten.
pub fn run(config_path: &Path, slug: &str, title: Option<&str>) -> Result<()> {
    tracing::info!(?config_path, slug, "Creating new article");

    if !is_url_safe_slug(slug) {
        bail!("Invalid slug `{slug}`: use lowercase letters, digits and single hyphens");
    }

    let content_dir = match Config::load_with_env(config_path) {
        Ok(config) => site_path(config_path, &config.build.content_dir),
        Err(e) => {
            tracing::debug!(error = %e, "No usable configuration, using default content directory");
            site_path(config_path, "content")
        }
    };

    let file_path = content_dir.join(format!("{slug}.yaml"));
    if file_path.exists() {
        bail!("Refusing to overwrite existing file: {}", file_path.display());
    }

    fs::create_dir_all(&content_dir).wrap_err("Failed to create content directory")?;

    let title = title.map_or_else(|| title_from_slug(slug), str::to_string);
    fs::write(&file_path, generate_record(slug, &title)).wrap_err("Failed to write file")?;

    tracing::info!(?file_path, "Created new article");
    println!("Created: {}", file_path.display());

    Ok(())
}

fn title_from_slug(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn generate_record(slug: &str, title: &str) -> String {
    let date = Utc::now().format("%Y-%m-%d").to_string();
    let title = title.replace('\\', "\\\\").replace('"', "\\\"");

    format!(
        r#"meta:
  title: "{title}"
  slug: {slug}
  metaDescription: ""
  date: {date}
  draft: true
  tags: []
sections:
  - id: introduction
    title: Introduction
    summary: "Write your summary here."
"#
    )
}
