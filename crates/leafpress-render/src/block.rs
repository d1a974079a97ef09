//! Rendered block descriptors.
//!
//! These types are the output contract of the renderer. They carry no
//! presentation decisions; [`crate::html`] and [`crate::text`] turn them
//! into markup, and they serialize to JSON for any other UI layer.

use leafpress_core::{QaPair, QaStyle, Reference, SectionKind};
use serde::Serialize;

use crate::inline::RichText;

/// Rendered form of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedBlock {
    /// Anchor id, taken from the section id.
    pub anchor: String,

    /// Section title.
    pub title: String,

    /// Section classification.
    pub kind: SectionKind,

    /// Sub-blocks in render order.
    pub parts: Vec<Part>,
}

impl RenderedBlock {
    /// Whether only the title is rendered.
    pub fn is_title_only(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Rendered form of one section block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Part {
    Summary {
        text: String,
    },
    Paragraphs {
        paragraphs: Vec<RichText>,
    },
    Checklist {
        #[serde(skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        items: Vec<String>,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Qa {
        style: QaStyle,
        pairs: Vec<QaPair>,
    },
    References {
        links: Vec<Reference>,
    },
}

impl Part {
    /// Short name of the part type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Summary { .. } => "summary",
            Self::Paragraphs { .. } => "paragraphs",
            Self::Checklist { .. } => "checklist",
            Self::Table { .. } => "table",
            Self::Qa { style, .. } => style.as_str(),
            Self::References { .. } => "references",
        }
    }
}
