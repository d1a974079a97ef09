//! Article sections and their typed blocks.
//!
//! A [`Section`] owns an ordered list of [`Block`]s. Content files may
//! describe a section either with one optional key per payload type (the
//! field shape) or with an explicit `blocks` list (the block shape); both
//! are read through [`SectionSource`].

use serde::{Deserialize, Serialize};

use crate::validate::Violation;

/// A checklist rendered as a tick-list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    /// Optional heading above the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// List entries in display order.
    #[serde(default)]
    pub items: Vec<String>,
}

/// A comparison table with one header per column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonTable {
    /// Column names.
    #[serde(default)]
    pub headers: Vec<String>,

    /// Table rows, each as long as `headers`.
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

/// A titled entry of a perspectives or FAQ block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    /// Question or perspective heading.
    #[serde(default)]
    pub title: String,

    /// Answer or perspective text.
    #[serde(default)]
    pub body: String,
}

impl QaPair {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// An external or internal reference link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub href: String,
}

impl Reference {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

/// How a list of [`QaPair`]s is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QaStyle {
    /// Viewpoints on a topic.
    Perspectives,
    /// Frequently asked questions.
    Faq,
}

impl QaStyle {
    /// Lowercase name, used for CSS classes and messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Perspectives => "perspectives",
            Self::Faq => "faq",
        }
    }
}

/// One typed payload of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    /// Single descriptive paragraph.
    Summary { text: String },

    /// Rich-text paragraphs with inline Markdown markup.
    Paragraphs { paragraphs: Vec<String> },

    /// Tick-list.
    Checklist(Checklist),

    /// Comparison table.
    #[serde(rename = "table")]
    ComparisonTable(ComparisonTable),

    /// Titled entries, styled as perspectives or FAQ.
    Qa { style: QaStyle, pairs: Vec<QaPair> },

    /// Reference links.
    References { references: Vec<Reference> },
}

impl Block {
    /// Build a perspectives block.
    pub fn perspectives(pairs: Vec<QaPair>) -> Self {
        Self::Qa {
            style: QaStyle::Perspectives,
            pairs,
        }
    }

    /// Build an FAQ block.
    pub fn faq(pairs: Vec<QaPair>) -> Self {
        Self::Qa {
            style: QaStyle::Faq,
            pairs,
        }
    }

    fn words(&self) -> usize {
        fn count(s: &str) -> usize {
            s.split_whitespace().count()
        }

        match self {
            Self::Summary { text } => count(text),
            Self::Paragraphs { paragraphs } => paragraphs.iter().map(|p| count(p)).sum(),
            Self::Checklist(list) => {
                list.title.as_deref().map_or(0, count)
                    + list.items.iter().map(|i| count(i)).sum::<usize>()
            }
            Self::ComparisonTable(table) => {
                table.headers.iter().map(|h| count(h)).sum::<usize>()
                    + table.rows.iter().flatten().map(|c| count(c)).sum::<usize>()
            }
            Self::Qa { pairs, .. } => pairs.iter().map(|p| count(&p.title) + count(&p.body)).sum(),
            Self::References { references } => references.iter().map(|r| count(&r.label)).sum(),
        }
    }
}

/// Classification of a section by its blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// No blocks, only a title.
    Heading,
    Summary,
    Paragraphs,
    Checklist,
    Table,
    Qa,
    References,
    /// More than one block.
    Composite,
}

/// One titled part of an article body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Anchor key, unique within the article.
    pub id: String,

    /// Section heading.
    pub title: String,

    /// Payloads in render order.
    pub blocks: Vec<Block>,
}

impl Section {
    /// Create a section without blocks.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    /// Append a block.
    #[must_use]
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Classify the section.
    pub fn kind(&self) -> SectionKind {
        match self.blocks.as_slice() {
            [] => SectionKind::Heading,
            [Block::Summary { .. }] => SectionKind::Summary,
            [Block::Paragraphs { .. }] => SectionKind::Paragraphs,
            [Block::Checklist(_)] => SectionKind::Checklist,
            [Block::ComparisonTable(_)] => SectionKind::Table,
            [Block::Qa { .. }] => SectionKind::Qa,
            [Block::References { .. }] => SectionKind::References,
            _ => SectionKind::Composite,
        }
    }

    /// Words across the title and every block.
    pub fn word_count(&self) -> usize {
        self.title.split_whitespace().count() + self.blocks.iter().map(Block::words).sum::<usize>()
    }
}

/// Checklist as authored: either a bare list or `{ title, items }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ChecklistSource {
    Items(Vec<String>),
    Titled(Checklist),
}

impl From<ChecklistSource> for Checklist {
    fn from(source: ChecklistSource) -> Self {
        match source {
            ChecklistSource::Items(items) => Checklist { title: None, items },
            ChecklistSource::Titled(list) => list,
        }
    }
}

/// A section as written in a content file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSource {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub paragraphs: Option<Vec<String>>,

    #[serde(default)]
    pub checklist: Option<ChecklistSource>,

    #[serde(default, alias = "comparison_table")]
    pub comparison_table: Option<ComparisonTable>,

    #[serde(default)]
    pub perspectives: Option<Vec<QaPair>>,

    #[serde(default)]
    pub faqs: Option<Vec<QaPair>>,

    #[serde(default)]
    pub references: Option<Vec<Reference>>,

    /// Author-ordered blocks.
    #[serde(default)]
    pub blocks: Option<Vec<Block>>,
}

impl SectionSource {
    fn has_payload_fields(&self) -> bool {
        self.summary.is_some()
            || self.paragraphs.is_some()
            || self.checklist.is_some()
            || self.comparison_table.is_some()
            || self.perspectives.is_some()
            || self.faqs.is_some()
            || self.references.is_some()
    }

    /// Convert into a [`Section`].
    ///
    /// Payload fields become blocks in the fixed order summary, paragraphs,
    /// checklist, comparison table, perspectives, faqs, references. A
    /// `blocks` list is taken as is.
    pub fn into_section(self) -> Result<Section, Violation> {
        let mixed = self.has_payload_fields();
        if let Some(blocks) = self.blocks {
            if mixed {
                return Err(Violation::MixedLayout);
            }
            return Ok(Section {
                id: self.id,
                title: self.title,
                blocks,
            });
        }

        let mut blocks = Vec::new();
        if let Some(text) = self.summary {
            blocks.push(Block::Summary { text });
        }
        if let Some(paragraphs) = self.paragraphs {
            blocks.push(Block::Paragraphs { paragraphs });
        }
        if let Some(list) = self.checklist {
            blocks.push(Block::Checklist(list.into()));
        }
        if let Some(table) = self.comparison_table {
            blocks.push(Block::ComparisonTable(table));
        }
        if let Some(pairs) = self.perspectives {
            blocks.push(Block::perspectives(pairs));
        }
        if let Some(pairs) = self.faqs {
            blocks.push(Block::faq(pairs));
        }
        if let Some(references) = self.references {
            blocks.push(Block::References { references });
        }

        Ok(Section {
            id: self.id,
            title: self.title,
            blocks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(yaml: &str) -> SectionSource {
        serde_yaml::from_str(yaml).expect("parse section")
    }

    #[test]
    fn test_field_shape_uses_fixed_order() {
        let section = source(
            r#"
id: overview
title: Overview
references:
  - { label: "HMRC", href: "https://www.gov.uk/hmrc" }
checklist: ["Register", "File"]
summary: "Short version."
"#,
        )
        .into_section()
        .expect("convert");

        assert_eq!(section.kind(), SectionKind::Composite);
        assert!(matches!(section.blocks[0], Block::Summary { .. }));
        assert!(matches!(section.blocks[1], Block::Checklist(_)));
        assert!(matches!(section.blocks[2], Block::References { .. }));
    }

    #[test]
    fn test_block_shape_keeps_author_order() {
        let section = source(
            r#"
id: compare
title: Compare
blocks:
  - type: table
    headers: [A, B]
    rows: [["1", "2"]]
  - type: summary
    text: "After the table."
  - type: qa
    style: faq
    pairs:
      - { title: "Q?", body: "A." }
"#,
        )
        .into_section()
        .expect("convert");

        assert!(matches!(section.blocks[0], Block::ComparisonTable(_)));
        assert!(matches!(section.blocks[1], Block::Summary { .. }));
        assert!(matches!(
            section.blocks[2],
            Block::Qa {
                style: QaStyle::Faq,
                ..
            }
        ));
    }

    #[test]
    fn test_mixed_layout_is_rejected() {
        let result = source(
            r#"
id: mixed
title: Mixed
summary: "field"
blocks:
  - type: summary
    text: "block"
"#,
        )
        .into_section();

        assert_eq!(result, Err(Violation::MixedLayout));
    }

    #[test]
    fn test_empty_blocks_list_still_conflicts_with_fields() {
        let result = source(
            r#"
id: mixed
title: Mixed
references:
  - { label: "HMRC", href: "https://www.gov.uk/hmrc" }
blocks: []
"#,
        )
        .into_section();

        assert_eq!(result, Err(Violation::MixedLayout));
    }

    #[test]
    fn test_titled_checklist_and_faqs() {
        let section = source(
            r#"
id: faq
title: FAQ
checklist:
  title: "Before you start"
  items: ["Account", "Receipts"]
faqs:
  - { title: "Q1?", body: "A1" }
"#,
        )
        .into_section()
        .expect("convert");

        match &section.blocks[0] {
            Block::Checklist(list) => {
                assert_eq!(list.title.as_deref(), Some("Before you start"));
                assert_eq!(list.items.len(), 2);
            }
            other => panic!("expected checklist, got {other:?}"),
        }
        assert!(matches!(
            section.blocks[1],
            Block::Qa {
                style: QaStyle::Faq,
                ..
            }
        ));
    }

    #[test]
    fn test_kind_of_single_block_sections() {
        assert_eq!(Section::new("a", "A").kind(), SectionKind::Heading);
        let qa = Section::new("b", "B").with_block(Block::perspectives(vec![]));
        assert_eq!(qa.kind(), SectionKind::Qa);
        let refs = Section::new("c", "C").with_block(Block::References { references: vec![] });
        assert_eq!(refs.kind(), SectionKind::References);
    }

    #[test]
    fn test_word_count() {
        let section = Section::new("s", "Two words")
            .with_block(Block::Summary {
                text: "three more words".to_string(),
            })
            .with_block(Block::faq(vec![QaPair::new("Why?", "Because it is.")]));
        assert_eq!(section.word_count(), 2 + 3 + 4);
    }
}
