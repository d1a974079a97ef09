//! Plain-text output for terminals.

use crate::{
    block::{Part, RenderedBlock},
    inline::Inline,
};

fn inlines_to_text(nodes: &[Inline], out: &mut String) {
    for node in nodes {
        match node {
            Inline::Text(t) => out.push_str(t),
            Inline::Code(c) => {
                out.push('`');
                out.push_str(c);
                out.push('`');
            }
            Inline::Emphasis(c) | Inline::Strong(c) | Inline::Strikethrough(c) => {
                inlines_to_text(c, out);
            }
            Inline::Link { href, label } => {
                inlines_to_text(label, out);
                out.push_str(&format!(" ({href})"));
            }
            Inline::LineBreak => out.push('\n'),
        }
    }
}

fn table_to_text(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| {
        let padded = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c}{}", " ".repeat(w - c.chars().count())))
            .collect::<Vec<_>>()
            .join(" | ");
        format!("| {padded} |")
    };
    let rule = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-|-");

    let mut lines = vec![line(headers), format!("|-{rule}-|")];
    lines.extend(rows.iter().map(|r| line(r)));
    lines.join("\n")
}

/// Render one part as text paragraphs.
pub fn part_to_text(part: &Part) -> String {
    match part {
        Part::Summary { text } => text.clone(),
        Part::Paragraphs { paragraphs } => paragraphs
            .iter()
            .map(|p| {
                let mut out = String::new();
                inlines_to_text(p.inlines(), &mut out);
                out
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
        Part::Checklist { title, items } => {
            let mut lines = Vec::with_capacity(items.len() + 1);
            if let Some(title) = title {
                lines.push(format!("{title}:"));
            }
            lines.extend(items.iter().map(|i| format!("  [x] {i}")));
            lines.join("\n")
        }
        Part::Table { headers, rows } => table_to_text(headers, rows),
        Part::Qa { pairs, .. } => pairs
            .iter()
            .map(|p| format!("Q: {}\nA: {}", p.title, p.body))
            .collect::<Vec<_>>()
            .join("\n\n"),
        Part::References { links } => links
            .iter()
            .enumerate()
            .map(|(i, r)| format!("  {}. {} <{}>", i + 1, r.label, r.href))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Render blocks as plain text, one `## Title` heading per block.
pub fn blocks_to_text(blocks: &[RenderedBlock]) -> String {
    blocks
        .iter()
        .map(|block| {
            let mut chunks = vec![format!("## {}", block.title)];
            chunks.extend(block.parts.iter().map(part_to_text));
            chunks.join("\n\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use leafpress_core::{QaPair, QaStyle, Reference, SectionKind};

    use super::*;
    use crate::inline::RichText;

    #[test]
    fn test_table_alignment() {
        let text = part_to_text(&Part::Table {
            headers: vec!["Plan".into(), "Price".into()],
            rows: vec![vec!["Professional".into(), "£20".into()]],
        });
        assert_eq!(
            text,
            "| Plan         | Price |\n|--------------|-------|\n| Professional | £20   |"
        );
    }

    #[test]
    fn test_block_text() {
        let block = RenderedBlock {
            anchor: "faq".into(),
            title: "FAQ".into(),
            kind: SectionKind::Composite,
            parts: vec![
                Part::Paragraphs {
                    paragraphs: vec![RichText::parse("See [docs](/docs).")],
                },
                Part::Qa {
                    style: QaStyle::Faq,
                    pairs: vec![QaPair::new("Q1?", "A1")],
                },
                Part::References {
                    links: vec![Reference::new("Docs", "/docs")],
                },
            ],
        };
        assert_eq!(
            blocks_to_text(&[block]),
            "## FAQ\n\nSee docs (/docs).\n\nQ: Q1?\nA: A1\n\n  1. Docs </docs>"
        );
    }

    #[test]
    fn test_checklist_text() {
        let text = part_to_text(&Part::Checklist {
            title: None,
            items: vec!["a".into(), "b".into()],
        });
        assert_eq!(text, "  [x] a\n  [x] b");
    }
}
