//! Schema validation for content records.
//!
//! Validation fails fast: the first violation in a record is reported as a
//! [`ValidationError`] naming the article slug and the section id.
//! [`validate_corpus`] checks every record and collects all failures.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::{
    record::ContentRecord,
    section::{Block, Section},
};

/// A single broken schema rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("slug is empty")]
    EmptySlug,

    #[error("slug `{0}` is not URL-safe (use lowercase letters, digits and single hyphens)")]
    InvalidSlug(String),

    #[error("slug is already used by another article")]
    DuplicateSlug,

    #[error("title is empty")]
    EmptyTitle,

    #[error("section id is empty")]
    EmptySectionId,

    #[error("section id is used more than once")]
    DuplicateSectionId,

    #[error("comparison table has no headers")]
    EmptyHeaders,

    #[error("comparison table row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("checklist has no items")]
    EmptyChecklist,

    #[error("{style} entry {index} needs both a title and a body")]
    IncompletePair { style: &'static str, index: usize },

    #[error("reference {index} needs both a label and an href")]
    IncompleteReference { index: usize },

    #[error("section mixes payload fields with a `blocks` list")]
    MixedLayout,
}

/// A content record that breaks the schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid content{}{}: {violation}", article_suffix(.slug), section_suffix(.section))]
pub struct ValidationError {
    /// Slug of the offending article, when known.
    pub slug: Option<String>,

    /// Id of the offending section, or `#<position>` when the id is empty.
    pub section: Option<String>,

    pub violation: Violation,
}

fn article_suffix(slug: &Option<String>) -> String {
    slug.as_ref()
        .map(|s| format!(" in article `{s}`"))
        .unwrap_or_default()
}

fn section_suffix(section: &Option<String>) -> String {
    section
        .as_ref()
        .map(|s| format!(" (section `{s}`)"))
        .unwrap_or_default()
}

impl ValidationError {
    pub fn new(violation: Violation) -> Self {
        Self {
            slug: None,
            section: None,
            violation,
        }
    }

    /// Attach the article slug.
    #[must_use]
    pub fn in_article(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Attach the section id.
    #[must_use]
    pub fn in_section(mut self, id: impl Into<String>) -> Self {
        self.section = Some(id.into());
        self
    }
}

/// Whether a slug is lowercase ASCII words joined by single hyphens.
pub fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .split('-')
            .all(|part| {
                !part.is_empty()
                    && part
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            })
}

/// Validate the blocks of one section.
pub fn validate_section(section: &Section) -> Result<(), Violation> {
    if section.id.trim().is_empty() {
        return Err(Violation::EmptySectionId);
    }

    for block in &section.blocks {
        validate_block(block)?;
    }
    Ok(())
}

fn validate_block(block: &Block) -> Result<(), Violation> {
    match block {
        Block::Summary { .. } | Block::Paragraphs { .. } => Ok(()),
        Block::Checklist(list) => {
            if list.items.is_empty() {
                Err(Violation::EmptyChecklist)
            } else {
                Ok(())
            }
        }
        Block::ComparisonTable(table) => {
            if table.headers.is_empty() {
                return Err(Violation::EmptyHeaders);
            }
            let expected = table.headers.len();
            match table
                .rows
                .iter()
                .enumerate()
                .find(|(_, row)| row.len() != expected)
            {
                Some((row, cells)) => Err(Violation::RowLength {
                    row,
                    expected,
                    found: cells.len(),
                }),
                None => Ok(()),
            }
        }
        Block::Qa { style, pairs } => {
            match pairs
                .iter()
                .position(|p| p.title.trim().is_empty() || p.body.trim().is_empty())
            {
                Some(index) => Err(Violation::IncompletePair {
                    style: style.as_str(),
                    index,
                }),
                None => Ok(()),
            }
        }
        Block::References { references } => {
            match references
                .iter()
                .position(|r| r.label.trim().is_empty() || r.href.trim().is_empty())
            {
                Some(index) => Err(Violation::IncompleteReference { index }),
                None => Ok(()),
            }
        }
    }
}

/// Validate an ordered list of sections: every section and id uniqueness.
///
/// The returned error carries the section id but no slug.
pub fn validate_sections(sections: &[Section]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(sections.len());

    for (position, section) in sections.iter().enumerate() {
        let label = if section.id.trim().is_empty() {
            format!("#{position}")
        } else {
            section.id.clone()
        };

        validate_section(section).map_err(|v| ValidationError::new(v).in_section(&label))?;

        if !seen.insert(section.id.as_str()) {
            return Err(ValidationError::new(Violation::DuplicateSectionId).in_section(label));
        }
    }
    Ok(())
}

/// Validate a single record in isolation.
pub fn validate_record(record: &ContentRecord) -> Result<(), ValidationError> {
    let slug = record.meta.slug.as_str();

    if slug.trim().is_empty() {
        let mut err = ValidationError::new(Violation::EmptySlug);
        if let Some(path) = &record.source {
            err = err.in_article(path.display().to_string());
        }
        return Err(err);
    }
    if !is_url_safe_slug(slug) {
        return Err(ValidationError::new(Violation::InvalidSlug(slug.to_string())).in_article(slug));
    }
    if record.meta.title.trim().is_empty() {
        return Err(ValidationError::new(Violation::EmptyTitle).in_article(slug));
    }

    validate_sections(&record.sections).map_err(|e| e.in_article(slug))
}

/// Validate every record and slug uniqueness across the corpus.
///
/// Returns all failures; each record contributes at most one per-record
/// error. A second record reusing a slug is reported as
/// [`Violation::DuplicateSlug`].
pub fn validate_corpus(records: &[ContentRecord]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut owners: HashMap<&str, usize> = HashMap::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        if let Err(e) = validate_record(record) {
            errors.push(e);
            continue;
        }
        if owners.insert(record.meta.slug.as_str(), index).is_some() {
            errors.push(
                ValidationError::new(Violation::DuplicateSlug).in_article(&record.meta.slug),
            );
        }
    }

    errors
}

/// A non-fatal content quality issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub slug: String,
    pub message: String,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.slug, self.message)
    }
}

/// Collect quality warnings for a record.
pub fn lint(record: &ContentRecord) -> Vec<Warning> {
    let meta = &record.meta;
    let mut warnings = Vec::new();
    let mut warn = |message: &str| {
        warnings.push(Warning {
            slug: meta.slug.clone(),
            message: message.to_string(),
        });
    };

    if meta.cover.is_some() && meta.cover_alt.as_deref().is_none_or(|a| a.trim().is_empty()) {
        warn("cover image has no coverAlt text");
    }
    if let (Some(date), Some(updated)) = (meta.date, meta.updated)
        && updated < date
    {
        warn("updated date is earlier than the publication date");
    }
    if meta
        .meta_description
        .as_deref()
        .is_none_or(|d| d.trim().is_empty())
    {
        warn("metaDescription is empty");
    }

    warnings
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{
        meta::ArticleMeta,
        section::{Checklist, ComparisonTable, QaPair, Reference},
    };

    fn table(headers: &[&str], rows: &[&[&str]]) -> Block {
        Block::ComparisonTable(ComparisonTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        })
    }

    fn record(slug: &str, sections: Vec<Section>) -> ContentRecord {
        ContentRecord::new(ArticleMeta::new("Title", slug), sections)
    }

    #[test]
    fn test_url_safe_slugs() {
        assert!(is_url_safe_slug("how-to-file-vat-2024"));
        assert!(is_url_safe_slug("guide"));
        assert!(!is_url_safe_slug(""));
        assert!(!is_url_safe_slug("Upper-Case"));
        assert!(!is_url_safe_slug("double--hyphen"));
        assert!(!is_url_safe_slug("-leading"));
        assert!(!is_url_safe_slug("trailing-"));
        assert!(!is_url_safe_slug("has space"));
        assert!(!is_url_safe_slug("path/segment"));
    }

    #[test]
    fn test_table_row_length_mismatch() {
        let section = Section::new("compare", "Compare")
            .with_block(table(&["A", "B"], &[&["1", "2"], &["1"]]));
        assert_eq!(
            validate_section(&section),
            Err(Violation::RowLength {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_table_row_lengths_over_generated_rows() {
        for headers in 1..=4usize {
            for cells in 0..=5usize {
                let header_names: Vec<String> = (0..headers).map(|i| format!("h{i}")).collect();
                let row: Vec<String> = (0..cells).map(|i| i.to_string()).collect();
                let table = ComparisonTable {
                    headers: header_names,
                    rows: vec![row],
                };
                let section = Section::new("t", "T").with_block(Block::ComparisonTable(table));

                let result = validate_section(&section);
                if cells == headers {
                    assert!(result.is_ok(), "{headers} headers, {cells} cells");
                } else {
                    assert_eq!(
                        result,
                        Err(Violation::RowLength {
                            row: 0,
                            expected: headers,
                            found: cells
                        })
                    );
                }
            }
        }
    }

    #[test]
    fn test_table_without_headers() {
        let section = Section::new("t", "T").with_block(table(&[], &[]));
        assert_eq!(validate_section(&section), Err(Violation::EmptyHeaders));
    }

    #[test]
    fn test_empty_checklist() {
        let section =
            Section::new("steps", "Steps").with_block(Block::Checklist(Checklist::default()));
        assert_eq!(validate_section(&section), Err(Violation::EmptyChecklist));
    }

    #[test]
    fn test_incomplete_pairs_and_references() {
        let faq = Section::new("faq", "FAQ").with_block(Block::faq(vec![
            QaPair::new("Q1?", "A1"),
            QaPair::new("Q2?", " "),
        ]));
        assert_eq!(
            validate_section(&faq),
            Err(Violation::IncompletePair {
                style: "faq",
                index: 1
            })
        );

        let refs = Section::new("refs", "Sources").with_block(Block::References {
            references: vec![Reference::new("", "https://example.com")],
        });
        assert_eq!(
            validate_section(&refs),
            Err(Violation::IncompleteReference { index: 0 })
        );
    }

    #[test]
    fn test_duplicate_section_ids() {
        let err = validate_sections(&[
            Section::new("intro", "Intro"),
            Section::new("intro", "Again"),
        ])
        .expect_err("duplicate ids");
        assert_eq!(err.violation, Violation::DuplicateSectionId);
        assert_eq!(err.section.as_deref(), Some("intro"));
        assert!(err.slug.is_none());
    }

    #[test]
    fn test_empty_section_id_reports_position() {
        let err = validate_sections(&[Section::new("a", "A"), Section::new("", "Untitled")])
            .expect_err("empty id");
        assert_eq!(err.violation, Violation::EmptySectionId);
        assert_eq!(err.section.as_deref(), Some("#1"));
    }

    #[test]
    fn test_record_error_names_slug_and_section() {
        let rec = record(
            "pricing-guide",
            vec![
                Section::new("plans", "Plans")
                    .with_block(table(&["Plan", "Price"], &[&["Basic"]])),
            ],
        );
        let err = validate_record(&rec).expect_err("row mismatch");
        assert_eq!(err.slug.as_deref(), Some("pricing-guide"));
        assert_eq!(err.section.as_deref(), Some("plans"));
        let msg = err.to_string();
        assert!(msg.contains("pricing-guide"));
        assert!(msg.contains("plans"));
        assert!(msg.contains("row 0 has 1 cells, expected 2"));
    }

    #[test]
    fn test_record_meta_rules() {
        assert_eq!(
            validate_record(&record("", vec![])).unwrap_err().violation,
            Violation::EmptySlug
        );
        assert_eq!(
            validate_record(&record("Bad Slug", vec![])).unwrap_err().violation,
            Violation::InvalidSlug("Bad Slug".to_string())
        );
        let untitled = ContentRecord::new(ArticleMeta::new("", "untitled"), vec![]);
        assert_eq!(
            validate_record(&untitled).unwrap_err().violation,
            Violation::EmptyTitle
        );
        assert!(validate_record(&record("fine", vec![Section::new("only", "Only")])).is_ok());
    }

    #[test]
    fn test_corpus_slug_uniqueness() {
        let records = vec![
            record("alpha", vec![]),
            record("beta", vec![]),
            record("alpha", vec![]),
            record("", vec![]),
        ];
        let errors = validate_corpus(&records);

        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].violation, Violation::DuplicateSlug);
        assert_eq!(errors[0].slug.as_deref(), Some("alpha"));
        assert_eq!(errors[1].violation, Violation::EmptySlug);
    }

    #[test]
    fn test_lint_warnings() {
        let mut meta = ArticleMeta::new("Title", "linted");
        meta.cover = Some("/img/cover.png".to_string());
        meta.date = NaiveDate::from_ymd_opt(2024, 5, 1);
        meta.updated = NaiveDate::from_ymd_opt(2024, 4, 1);
        let warnings = lint(&ContentRecord::new(meta, vec![]));

        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].message.contains("coverAlt"));
        assert!(warnings[1].message.contains("earlier"));
        assert!(warnings[2].to_string().starts_with("linted: "));
    }

    #[test]
    fn test_lint_clean_record() {
        let mut meta = ArticleMeta::new("Title", "clean");
        meta.meta_description = Some("Described.".to_string());
        assert!(lint(&ContentRecord::new(meta, vec![])).is_empty());
    }
}
