//! Build orchestration.
//!
//! Collects content, validates it through the registry, renders every
//! published article and writes the static site.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use leafpress_core::{Config, ValidationError, config::output_contains};
use leafpress_render::render_record;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    collector::{CollectorError, ContentCollector},
    html::{HtmlError, HtmlGenerator},
    registry::{ContentRegistry, TaxonomyTerm},
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("collector error: {0}")]
    Collector(#[from] CollectorError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("HTML error: {0}")]
    Html(#[from] HtmlError),

    #[error("refusing to clean {output}: it contains the content directory {content}")]
    OutputContainsContent { output: PathBuf, content: PathBuf },
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// Article pages written.
    pub articles: usize,

    /// Drafts left out of the build.
    pub drafts_skipped: usize,

    /// Tag and category pages written.
    pub taxonomy_pages: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    content_dir: PathBuf,
    output_dir: PathBuf,
}

impl Builder {
    #[must_use]
    pub fn new(
        config: Config,
        content_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            content_dir: content_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Execute the full build.
    ///
    /// Nothing is written unless every record is valid.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        info!(
            content = %self.content_dir.display(),
            output = %self.output_dir.display(),
            "starting build"
        );

        let registry =
            ContentCollector::new(&self.content_dir).load_registry(self.config.build.drafts)?;
        let mut stats = self.build_registry(&registry)?;

        stats.duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(
            articles = stats.articles,
            drafts_skipped = stats.drafts_skipped,
            taxonomy_pages = stats.taxonomy_pages,
            duration_ms = stats.duration_ms,
            "build complete"
        );
        Ok(stats)
    }

    /// Write the site for an already loaded registry.
    pub fn build_registry(&self, registry: &ContentRegistry) -> Result<BuildStats> {
        let generator = HtmlGenerator::new(self.config.clone());
        let published = registry.published();

        // Render everything before touching the output directory.
        let pages = published
            .par_iter()
            .map(|record| {
                let blocks = render_record(record)?;
                let html = generator.generate_article(record, &blocks)?;
                Ok((format!("/{}", record.slug()), html))
            })
            .collect::<Result<Vec<_>>>()?;

        self.clean_output()?;

        pages.par_iter().try_for_each(|(url, html)| {
            write_page(&generator.output_path(url, &self.output_dir), html)
        })?;

        let index = generator.generate_list(
            &self.config.site.title,
            self.config.site.description.as_deref(),
            "/",
            &published,
        )?;
        write_page(&generator.output_path("/", &self.output_dir), &index)?;

        let mut taxonomy_pages = 0;
        for (key, term) in &registry.taxonomies().tags {
            self.write_term_page(&generator, registry, "tags", key, term)?;
            taxonomy_pages += 1;
        }
        for (key, term) in &registry.taxonomies().categories {
            self.write_term_page(&generator, registry, "categories", key, term)?;
            taxonomy_pages += 1;
        }

        Ok(BuildStats {
            articles: pages.len(),
            drafts_skipped: registry.len() - published.len(),
            taxonomy_pages,
            duration_ms: 0,
        })
    }

    fn write_term_page(
        &self,
        generator: &HtmlGenerator,
        registry: &ContentRegistry,
        taxonomy: &str,
        key: &str,
        term: &TaxonomyTerm,
    ) -> Result<()> {
        let records = match taxonomy {
            "tags" => registry.by_tag(&term.name),
            _ => registry.by_category(&term.name),
        };
        let url = format!("/{taxonomy}/{key}");
        let html = generator.generate_list(&term.name, None, &url, &records)?;
        write_page(&generator.output_path(&url, &self.output_dir), &html)
    }

    /// Clean the output directory, unless that would delete the content.
    fn clean_output(&self) -> Result<()> {
        let resolve = |path: &Path| fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if output_contains(&resolve(&self.output_dir), &resolve(&self.content_dir)) {
            return Err(BuildError::OutputContainsContent {
                output: self.output_dir.clone(),
                content: self.content_dir.clone(),
            });
        }

        if self.output_dir.exists() {
            debug!(dir = %self.output_dir.display(), "cleaning output directory");
            fs::remove_dir_all(&self.output_dir)?;
        }
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }
}

fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)?;
    debug!(path = %path.display(), "wrote page");
    Ok(())
}
