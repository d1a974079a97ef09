//! Article metadata.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Metadata block of a content record.
///
/// Keys are authored in camelCase (`seoTitle`, `metaDescription`); the
/// snake_case spelling is accepted as well.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMeta {
    /// Display title.
    #[serde(default)]
    pub title: String,

    /// Title used in the document head, falls back to `title`.
    #[serde(default, alias = "seo_title")]
    pub seo_title: Option<String>,

    /// Meta description for listings and search snippets.
    #[serde(default, alias = "meta_description")]
    pub meta_description: Option<String>,

    /// Permanent URL key of the article.
    #[serde(default)]
    pub slug: String,

    /// Publication date.
    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Last edit date.
    #[serde(default)]
    pub updated: Option<NaiveDate>,

    /// Top-level taxonomy.
    #[serde(default)]
    pub category: Option<String>,

    /// Second-level taxonomy.
    #[serde(default, alias = "sub_category")]
    pub sub_category: Option<String>,

    /// Tags, duplicates removed in authoring order.
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,

    /// Drafts are kept but not published.
    #[serde(default)]
    pub draft: bool,

    /// Cover image reference.
    #[serde(default)]
    pub cover: Option<String>,

    /// Alt text for the cover image.
    #[serde(default, alias = "cover_alt")]
    pub cover_alt: Option<String>,

    /// Authored reading time in minutes.
    #[serde(default, alias = "reading_time")]
    pub reading_time: Option<u32>,

    /// Author name.
    #[serde(default)]
    pub author: Option<String>,
}

impl ArticleMeta {
    /// Create metadata with just a title and slug.
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            ..Default::default()
        }
    }

    /// Title for the document head.
    pub fn head_title(&self) -> &str {
        self.seo_title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.title)
    }

    /// Most recent of `updated` and `date`.
    pub fn last_modified(&self) -> Option<NaiveDate> {
        match (self.date, self.updated) {
            (Some(date), Some(updated)) => Some(date.max(updated)),
            (date, updated) => updated.or(date),
        }
    }

    /// Whether the article carries a tag, compared case-insensitively.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw {
        let tag = tag.trim().to_string();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    Ok(tags)
}
