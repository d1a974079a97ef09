//! HTML output for rendered blocks.
//!
//! Every piece of authored text is escaped. Link targets using a script
//! scheme are replaced with `#`.

use leafpress_core::{QaPair, Reference, TocEntry};

use crate::{
    block::{Part, RenderedBlock},
    inline::{Inline, RichText},
};

/// Escape text for element content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Schemes that run code instead of navigating.
const SCRIPT_SCHEMES: &[&str] = &["javascript", "vbscript", "data"];

fn safe_href(href: &str) -> String {
    // Browsers drop tabs and newlines anywhere in a URL, then trim controls and spaces.
    let href: String = href
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect();
    let href = href.trim_matches(|c: char| c <= ' ');
    let scheme = href
        .split_once(':')
        .map(|(scheme, _)| scheme.to_ascii_lowercase());
    if scheme.is_some_and(|s| SCRIPT_SCHEMES.contains(&s.as_str())) {
        "#".to_string()
    } else {
        escape_html(href)
    }
}

fn is_external(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://")
}

fn link_html(href: &str, label_html: &str) -> String {
    let rel = if is_external(href) {
        r#" rel="noopener noreferrer""#
    } else {
        ""
    };
    format!(r#"<a href="{}"{rel}>{label_html}</a>"#, safe_href(href))
}

/// Render inline nodes.
pub fn inlines_to_html(nodes: &[Inline]) -> String {
    let mut html = String::new();
    for node in nodes {
        match node {
            Inline::Text(t) => html.push_str(&escape_html(t)),
            Inline::Emphasis(c) => html.push_str(&format!("<em>{}</em>", inlines_to_html(c))),
            Inline::Strong(c) => {
                html.push_str(&format!("<strong>{}</strong>", inlines_to_html(c)));
            }
            Inline::Strikethrough(c) => {
                html.push_str(&format!("<del>{}</del>", inlines_to_html(c)));
            }
            Inline::Code(code) => html.push_str(&format!("<code>{}</code>", escape_html(code))),
            Inline::Link { href, label } => {
                html.push_str(&link_html(href, &inlines_to_html(label)));
            }
            Inline::LineBreak => html.push_str("<br />"),
        }
    }
    html
}

fn rich_text_html(text: &RichText) -> String {
    inlines_to_html(text.inlines())
}

fn checklist_html(title: Option<&str>, items: &[String]) -> String {
    let title_html = title
        .map(|t| format!("<h3>{}</h3>", escape_html(t)))
        .unwrap_or_default();
    let items_html = items
        .iter()
        .map(|item| {
            format!(
                r#"<li><span class="tick" aria-hidden="true">✓</span> {}</li>"#,
                escape_html(item)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"<div class="checklist">{title_html}<ul class="checklist-items">{items_html}</ul></div>"#
    )
}

fn table_html(headers: &[String], rows: &[Vec<String>]) -> String {
    let head = headers
        .iter()
        .map(|h| format!(r#"<th scope="col">{}</th>"#, escape_html(h)))
        .collect::<String>();
    let body = rows
        .iter()
        .map(|row| {
            let cells = row
                .iter()
                .map(|c| format!("<td>{}</td>", escape_html(c)))
                .collect::<String>();
            format!("<tr>{cells}</tr>")
        })
        .collect::<Vec<_>>()
        .join("\n");
    let table = format!("<table><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table>");
    format!(r#"<div class="comparison-table">{table}</div>"#)
}

fn qa_html(class: &str, pairs: &[QaPair]) -> String {
    let items = pairs
        .iter()
        .map(|p| {
            format!(
                r#"<div class="qa-item"><h3>{}</h3><p>{}</p></div>"#,
                escape_html(&p.title),
                escape_html(&p.body)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(r#"<div class="qa {class}">{items}</div>"#)
}

fn references_html(links: &[Reference]) -> String {
    let items = links
        .iter()
        .map(|r| format!("<li>{}</li>", link_html(&r.href, &escape_html(&r.label))))
        .collect::<Vec<_>>()
        .join("\n");
    format!(r#"<div class="references"><ol>{items}</ol></div>"#)
}

/// Render one part.
pub fn part_to_html(part: &Part) -> String {
    match part {
        Part::Summary { text } => {
            format!(r#"<p class="section-summary">{}</p>"#, escape_html(text))
        }
        Part::Paragraphs { paragraphs } => paragraphs
            .iter()
            .map(|p| format!("<p>{}</p>", rich_text_html(p)))
            .collect::<Vec<_>>()
            .join("\n"),
        Part::Checklist { title, items } => checklist_html(title.as_deref(), items),
        Part::Table { headers, rows } => table_html(headers, rows),
        Part::Qa { style, pairs } => qa_html(style.as_str(), pairs),
        Part::References { links } => references_html(links),
    }
}

/// Render one block as a `<section>` element.
pub fn block_to_html(block: &RenderedBlock) -> String {
    let mut html = format!(
        r#"<section id="{}" class="article-section"><h2>{}</h2>"#,
        escape_html(&block.anchor),
        escape_html(&block.title)
    );
    for part in &block.parts {
        html.push('\n');
        html.push_str(&part_to_html(part));
    }
    html.push_str("</section>");
    html
}

/// Render an article body.
pub fn blocks_to_html(blocks: &[RenderedBlock]) -> String {
    blocks
        .iter()
        .map(block_to_html)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a table of contents, or nothing for an empty list.
pub fn toc_to_html(toc: &[TocEntry]) -> String {
    if toc.is_empty() {
        return String::new();
    }
    let items = toc
        .iter()
        .map(|e| {
            format!(
                r##"<li><a href="#{}">{}</a></li>"##,
                escape_html(&e.id),
                escape_html(&e.title)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(r#"<nav class="toc" aria-label="Contents"><ol>{items}</ol></nav>"#)
}
