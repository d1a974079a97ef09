//! HTML page generation.
//!
//! Wraps rendered article bodies and listings in the page templates.

use std::path::{Path, PathBuf};

use chrono::{Datelike, Utc};
use leafpress_core::{Config, ContentRecord};
use leafpress_render::{
    RenderedBlock,
    html::{blocks_to_html, escape_html, toc_to_html},
};
use thiserror::Error;
use tracing::debug;

use crate::{
    registry::term_slug,
    template::{TemplateContext, TemplateError, TemplateRegistry},
};

/// HTML generation errors.
#[derive(Debug, Error)]
pub enum HtmlError {
    #[error("template error: {0}")]
    Template(#[from] TemplateError),
}

/// Result type for HTML generation.
pub type Result<T> = std::result::Result<T, HtmlError>;

/// HTML page generator.
#[derive(Debug)]
pub struct HtmlGenerator {
    templates: TemplateRegistry,
    config: Config,
}

impl HtmlGenerator {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            templates: TemplateRegistry::new(),
            config,
        }
    }

    /// Create a generator with custom templates.
    #[must_use]
    pub fn with_templates(config: Config, templates: TemplateRegistry) -> Self {
        Self { templates, config }
    }

    /// Generate the full page for an article from its rendered blocks.
    pub fn generate_article(
        &self,
        record: &ContentRecord,
        blocks: &[RenderedBlock],
    ) -> Result<String> {
        debug!(slug = %record.slug(), "generating article page");
        let meta = &record.meta;

        let mut ctx = TemplateContext::new()
            .with_var("title", escape_html(&meta.title))
            .with_var("reading_time", record.reading_time().to_string())
            .with_var("toc", toc_to_html(&record.toc()))
            .with_var("body", blocks_to_html(blocks));

        if let Some(category) = &meta.category {
            let label = match &meta.sub_category {
                Some(sub) => format!("{category} / {sub}"),
                None => category.clone(),
            };
            ctx.insert("category", escape_html(&label));
        }

        if let Some(author) = meta.author.as_ref().or(self.config.site.author.as_ref()) {
            ctx.insert("byline", format!("By {} · ", escape_html(author)));
        }

        if let Some(date) = meta.date {
            let mut dates = format!(
                r#"<time datetime="{}">{}</time>"#,
                date.format("%Y-%m-%d"),
                date.format("%B %-d, %Y")
            );
            if let Some(updated) = meta.updated.filter(|u| *u > date) {
                dates.push_str(&format!(
                    r#" (updated <time datetime="{}">{}</time>)"#,
                    updated.format("%Y-%m-%d"),
                    updated.format("%B %-d, %Y")
                ));
            }
            ctx.insert("dates", dates);
        }

        if let Some(cover) = &meta.cover {
            ctx.insert(
                "cover",
                format!(
                    r#"<img class="cover" src="{}" alt="{}">"#,
                    escape_html(cover),
                    escape_html(meta.cover_alt.as_deref().unwrap_or_default())
                ),
            );
        }

        // Tags without a usable slug have no page to link to.
        let links = meta
            .tags
            .iter()
            .filter_map(|tag| {
                let slug = term_slug(tag);
                (!slug.is_empty()).then(|| {
                    format!(r#"<a href="/tags/{slug}" rel="tag">{}</a>"#, escape_html(tag))
                })
            })
            .collect::<Vec<_>>();
        if !links.is_empty() {
            let links = links.join(" ");
            ctx.insert("tags", format!(r#"<div class="tags">{links}</div>"#));
        }

        let inner = self.templates.render("article", &ctx)?;
        self.wrap(
            meta.head_title(),
            meta.meta_description.as_deref(),
            &format!("/{}", record.slug()),
            &inner,
        )
    }

    /// Generate a listing page.
    pub fn generate_list(
        &self,
        title: &str,
        description: Option<&str>,
        url_path: &str,
        records: &[&ContentRecord],
    ) -> Result<String> {
        let items = records
            .iter()
            .map(|r| list_item_html(r))
            .collect::<Vec<_>>()
            .join("\n");

        let mut ctx = TemplateContext::new()
            .with_var("title", escape_html(title))
            .with_var("items", items);
        if let Some(desc) = description {
            ctx.insert("description", format!("<p>{}</p>", escape_html(desc)));
        }

        let inner = self.templates.render("list", &ctx)?;
        self.wrap(title, description, url_path, &inner)
    }

    fn wrap(
        &self,
        title: &str,
        description: Option<&str>,
        url_path: &str,
        inner: &str,
    ) -> Result<String> {
        let mut ctx = TemplateContext::new()
            .with_var("lang", escape_html(&self.config.site.language))
            .with_var("title", escape_html(title))
            .with_var("site_title", escape_html(&self.config.site.title))
            .with_var("canonical_url", escape_html(&self.config.url_for(url_path)))
            .with_var("year", Utc::now().year().to_string())
            .with_var("content", inner);

        if let Some(desc) = description.or(self.config.site.description.as_deref()) {
            ctx.insert("description", escape_html(desc));
        }

        Ok(self.templates.render("base", &ctx)?)
    }

    /// Output file for a URL path.
    #[must_use]
    pub fn output_path(&self, url_path: &str, output_dir: &Path) -> PathBuf {
        let relative = url_path.trim_matches('/');
        if relative.is_empty() {
            output_dir.join("index.html")
        } else {
            output_dir.join(relative).join("index.html")
        }
    }
}

/// List entry for an article.
pub fn list_item_html(record: &ContentRecord) -> String {
    let meta = &record.meta;
    let date_html = meta
        .date
        .map(|d| format!(r#"<time datetime="{0}">{0}</time>"#, d.format("%Y-%m-%d")))
        .unwrap_or_default();
    let description_html = meta
        .meta_description
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| format!(r#"<p class="post-description">{}</p>"#, escape_html(d)))
        .unwrap_or_default();

    format!(
        r#"<li class="post-item"><a href="/{}" class="post-title">{}</a> {}{}</li>"#,
        record.slug(),
        escape_html(&meta.title),
        date_html,
        description_html
    )
}
