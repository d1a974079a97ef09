//! Content records: one article's metadata and sections.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    meta::ArticleMeta,
    section::{Section, SectionSource},
    validate::{self, ValidationError},
};

/// Words per minute used for the derived reading time.
const WORDS_PER_MINUTE: usize = 200;

/// Serialization format of a record file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    Yaml,
    Toml,
    Json,
}

impl RecordFormat {
    /// Determine the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Determine the format from a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Preferred file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }
}

/// Table of contents entry, one per section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Section anchor.
    pub id: String,

    /// Section title.
    pub title: String,
}

#[derive(Deserialize)]
struct RecordSource {
    meta: ArticleMeta,
    #[serde(default)]
    sections: Vec<SectionSource>,
}

/// A single article: metadata plus ordered sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentRecord {
    pub meta: ArticleMeta,

    pub sections: Vec<Section>,

    /// File the record was loaded from.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl ContentRecord {
    /// Create a record from already built parts.
    pub fn new(meta: ArticleMeta, sections: Vec<Section>) -> Self {
        Self {
            meta,
            sections,
            source: None,
        }
    }

    /// Parse a record from text in the given format.
    ///
    /// Only the layout of each section is checked here; call
    /// [`ContentRecord::validate`] for the full schema rules.
    pub fn parse(content: &str, format: RecordFormat, path: &Path) -> Result<Self> {
        let invalid = |e: &dyn std::fmt::Display| CoreError::parse(path, e.to_string());
        let source: RecordSource = match format {
            RecordFormat::Yaml => serde_yaml::from_str(content).map_err(|e| invalid(&e))?,
            RecordFormat::Toml => toml::from_str(content).map_err(|e| invalid(&e))?,
            RecordFormat::Json => serde_json::from_str(content).map_err(|e| invalid(&e))?,
        };

        let RecordSource { meta, sections } = source;
        let sections = sections
            .into_iter()
            .map(|s| {
                let id = s.id.clone();
                s.into_section()
                    .map_err(|v| ValidationError::new(v).in_article(&meta.slug).in_section(id))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            meta,
            sections,
            source: Some(path.to_path_buf()),
        })
    }

    /// Read and parse a record file, picking the format from its extension.
    pub fn load(path: &Path) -> Result<Self> {
        let format = RecordFormat::from_path(path)
            .ok_or_else(|| CoreError::parse(path, "unsupported record file extension"))?;
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, format, path)
    }

    /// The article slug.
    pub fn slug(&self) -> &str {
        &self.meta.slug
    }

    /// Check the record against the content schema.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate::validate_record(self)
    }

    /// Words across all sections.
    pub fn word_count(&self) -> usize {
        self.sections.iter().map(Section::word_count).sum()
    }

    /// Authored reading time, or one minute per 200 words (at least one).
    pub fn reading_time(&self) -> u32 {
        self.meta.reading_time.unwrap_or_else(|| {
            let minutes = (self.word_count() / WORDS_PER_MINUTE).max(1);
            u32::try_from(minutes).unwrap_or(u32::MAX)
        })
    }

    /// Table of contents in section order.
    pub fn toc(&self) -> Vec<TocEntry> {
        self.sections
            .iter()
            .map(|s| TocEntry {
                id: s.id.clone(),
                title: s.title.clone(),
            })
            .collect()
    }
}
