//! Section rendering.
//!
//! Rendering is pure: it validates its input, then maps every section to a
//! [`RenderedBlock`] in input order. Invalid input produces an error and no
//! output.

use leafpress_core::{
    Block, ContentRecord, Section, ValidationError,
    validate::{validate_section, validate_sections},
};
use tracing::trace;

use crate::{
    block::{Part, RenderedBlock},
    inline::RichText,
};

/// Render an ordered list of sections.
///
/// Output block `i` corresponds to section `i`. Section ids must be unique
/// within the slice.
pub fn render(sections: &[Section]) -> Result<Vec<RenderedBlock>, ValidationError> {
    validate_sections(sections)?;
    trace!(sections = sections.len(), "rendering sections");
    Ok(sections.iter().map(render_unchecked).collect())
}

/// Render a single section.
pub fn render_section(section: &Section) -> Result<RenderedBlock, ValidationError> {
    validate_section(section).map_err(|v| ValidationError::new(v).in_section(&section.id))?;
    Ok(render_unchecked(section))
}

/// Render all sections of a record; errors name the record's slug.
pub fn render_record(record: &ContentRecord) -> Result<Vec<RenderedBlock>, ValidationError> {
    record.validate()?;
    trace!(slug = %record.slug(), sections = record.sections.len(), "rendering record");
    Ok(record.sections.iter().map(render_unchecked).collect())
}

fn render_unchecked(section: &Section) -> RenderedBlock {
    RenderedBlock {
        anchor: section.id.clone(),
        title: section.title.clone(),
        kind: section.kind(),
        parts: section.blocks.iter().map(render_block).collect(),
    }
}

fn render_block(block: &Block) -> Part {
    match block {
        Block::Summary { text } => Part::Summary { text: text.clone() },
        Block::Paragraphs { paragraphs } => Part::Paragraphs {
            paragraphs: paragraphs.iter().map(|p| RichText::parse(p)).collect(),
        },
        Block::Checklist(list) => Part::Checklist {
            title: list.title.clone(),
            items: list.items.clone(),
        },
        Block::ComparisonTable(table) => Part::Table {
            headers: table.headers.clone(),
            rows: table.rows.clone(),
        },
        Block::Qa { style, pairs } => Part::Qa {
            style: *style,
            pairs: pairs.clone(),
        },
        Block::References { references } => Part::References {
            links: references.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use leafpress_core::{
        ArticleMeta, Checklist, ComparisonTable, QaPair, QaStyle, SectionKind, SectionSource,
        Violation,
    };

    use super::*;

    fn yaml_section(yaml: &str) -> Section {
        serde_yaml::from_str::<SectionSource>(yaml)
            .expect("parse section")
            .into_section()
            .expect("convert section")
    }

    fn table(headers: &[&str], rows: &[&[&str]]) -> Block {
        Block::ComparisonTable(ComparisonTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        })
    }

    #[test]
    fn test_preserves_section_order() {
        let sections: Vec<Section> = (0..12)
            .map(|i| Section::new(format!("s{i}"), format!("Section {i}")))
            .collect();
        let blocks = render(&sections).expect("render");

        assert_eq!(blocks.len(), sections.len());
        for (block, section) in blocks.iter().zip(&sections) {
            assert_eq!(block.anchor, section.id);
            assert_eq!(block.title, section.title);
        }
    }

    #[test]
    fn test_title_only_section() {
        let blocks = render(&[Section::new("intro", "Introduction")]).expect("render");
        assert!(blocks[0].is_title_only());
        assert_eq!(blocks[0].kind, SectionKind::Heading);
    }

    #[test]
    fn test_render_is_deterministic() {
        let sections = vec![
            yaml_section(
                r#"
id: mix
title: Mix
summary: "s"
paragraphs: ["See [docs](/docs)."]
checklist: ["a", "b"]
"#,
            ),
            Section::new("empty", "Empty"),
        ];
        assert_eq!(render(&sections).expect("first"), render(&sections).expect("second"));
    }

    #[test]
    fn test_faq_scenario() {
        let section = yaml_section(
            r#"
id: faq
title: FAQ
perspectives:
  - { title: "Q1?", body: "A1" }
  - { title: "Q2?", body: "A2" }
"#,
        );
        let block = render_section(&section).expect("render");

        assert_eq!(block.title, "FAQ");
        assert_eq!(block.parts.len(), 1);
        match &block.parts[0] {
            Part::Qa { style, pairs } => {
                assert_eq!(*style, QaStyle::Perspectives);
                assert_eq!(pairs, &vec![QaPair::new("Q1?", "A1"), QaPair::new("Q2?", "A2")]);
            }
            other => panic!("expected Q/A part, got {other:?}"),
        }
    }

    #[test]
    fn test_table_scenario() {
        let section = Section::new("cmp", "Compare")
            .with_block(table(&["A", "B"], &[&["1", "2"], &["3", "4"]]));
        let block = render_section(&section).expect("render");

        assert_eq!(
            block.parts,
            vec![Part::Table {
                headers: vec!["A".into(), "B".into()],
                rows: vec![vec!["1".into(), "2".into()], vec!["3".into(), "4".into()]],
            }]
        );
    }

    #[test]
    fn test_table_mismatch_refuses_to_render() {
        let sections = vec![
            Section::new("ok", "Fine"),
            Section::new("cmp", "Compare").with_block(table(&["A", "B"], &[&["1"]])),
        ];
        let err = render(&sections).expect_err("mismatch");

        assert_eq!(err.section.as_deref(), Some("cmp"));
        assert!(matches!(err.violation, Violation::RowLength { .. }));
    }

    #[test]
    fn test_checklist_keeps_every_item_in_order() {
        for n in 1..=8 {
            let items: Vec<String> = (0..n).map(|i| format!("item {i}")).collect();
            let section = Section::new("list", "List").with_block(Block::Checklist(Checklist {
                title: None,
                items: items.clone(),
            }));
            match &render_section(&section).expect("render").parts[0] {
                Part::Checklist { items: rendered, .. } => assert_eq!(rendered, &items),
                other => panic!("expected checklist, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_field_shape_sub_order() {
        let section = yaml_section(
            r#"
id: all
title: All
references: [{ label: "R", href: "https://r.example" }]
faqs: [{ title: "F?", body: "F." }]
perspectives: [{ title: "P", body: "P." }]
comparisonTable: { headers: [H], rows: [[c]] }
checklist: ["x"]
paragraphs: ["p"]
summary: "s"
"#,
        );
        let names: Vec<_> = render_section(&section)
            .expect("render")
            .parts
            .iter()
            .map(Part::name)
            .collect();

        assert_eq!(
            names,
            vec![
                "summary",
                "paragraphs",
                "checklist",
                "table",
                "perspectives",
                "faq",
                "references"
            ]
        );
    }

    #[test]
    fn test_render_record_names_slug() {
        let record = ContentRecord::new(
            ArticleMeta::new("Broken", "broken-article"),
            vec![Section::new("steps", "Steps").with_block(Block::Checklist(Checklist::default()))],
        );
        let err = render_record(&record).expect_err("empty checklist");

        assert_eq!(err.slug.as_deref(), Some("broken-article"));
        assert_eq!(err.section.as_deref(), Some("steps"));
        assert_eq!(err.violation, Violation::EmptyChecklist);
    }

    #[test]
    fn test_paragraph_links_are_parsed() {
        let section = Section::new("p", "P").with_block(Block::Paragraphs {
            paragraphs: vec!["See [pricing](/pricing).".to_string()],
        });
        match &render_section(&section).expect("render").parts[0] {
            Part::Paragraphs { paragraphs } => assert_eq!(paragraphs[0].links(), vec!["/pricing"]),
            other => panic!("expected paragraphs, got {other:?}"),
        }
    }
}
