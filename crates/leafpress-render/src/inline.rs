//! Inline rich text parsed from paragraph strings.
//!
//! Paragraphs are authored with Markdown inline syntax. Only inline
//! constructs are structured: block-level markers such as list bullets,
//! heading hashes and quote signs are kept as literal text, and raw HTML is
//! kept as literal text so it gets escaped on output.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;

/// One inline node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Inline {
    Text(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Code(String),
    Link { href: String, label: Vec<Inline> },
    LineBreak,
}

/// A parsed paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RichText(pub Vec<Inline>);

impl RichText {
    /// Parse a paragraph string.
    pub fn parse(source: &str) -> Self {
        Self(parse_inlines(source))
    }

    pub fn inlines(&self) -> &[Inline] {
        &self.0
    }

    /// Text content with markup removed.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.0, &mut out);
        out
    }

    /// Hrefs of every link, in order.
    pub fn links(&self) -> Vec<&str> {
        fn walk<'a>(nodes: &'a [Inline], out: &mut Vec<&'a str>) {
            for node in nodes {
                match node {
                    Inline::Link { href, label } => {
                        out.push(href);
                        walk(label, out);
                    }
                    Inline::Emphasis(c) | Inline::Strong(c) | Inline::Strikethrough(c) => {
                        walk(c, out);
                    }
                    Inline::Text(_) | Inline::Code(_) | Inline::LineBreak => {}
                }
            }
        }

        let mut out = Vec::new();
        walk(&self.0, &mut out);
        out
    }
}

fn collect_text(nodes: &[Inline], out: &mut String) {
    for node in nodes {
        match node {
            Inline::Text(t) | Inline::Code(t) => out.push_str(t),
            Inline::Emphasis(c) | Inline::Strong(c) | Inline::Strikethrough(c) => {
                collect_text(c, out);
            }
            Inline::Link { label, .. } => collect_text(label, out),
            Inline::LineBreak => out.push('\n'),
        }
    }
}

enum Frame {
    Root,
    Emphasis,
    Strong,
    Strikethrough,
    Link(String),
}

fn push_text(nodes: &mut Vec<Inline>, text: &str) {
    if let Some(Inline::Text(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Inline::Text(text.to_string()));
    }
}

/// Block constructs whose source markers are kept as literal text.
fn is_marker_block(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Heading { .. } | Tag::List(_) | Tag::Item | Tag::BlockQuote(_)
    )
}

fn source_slice(source: &str, from: usize, to: usize) -> &str {
    source.get(from..to).unwrap_or_default()
}

/// Append source text the block parser consumed as structure, on its own line.
fn push_marker(stack: &mut [(Frame, Vec<Inline>)], marker: &str) {
    if marker.trim().is_empty() {
        return;
    }
    if let Some((_, nodes)) = stack.last_mut() {
        if !nodes.is_empty() && !matches!(nodes.last(), Some(Inline::LineBreak)) {
            nodes.push(Inline::LineBreak);
        }
        push_text(nodes, marker);
    }
}

fn parse_inlines(source: &str) -> Vec<Inline> {
    let mut stack: Vec<(Frame, Vec<Inline>)> = vec![(Frame::Root, Vec::new())];
    let mut paragraphs = 0usize;
    let mut depth = 0usize;
    // End of the last top-level construct.
    let mut top_end = 0usize;
    // Start of a list, heading or quote marker not yet carried into the output.
    let mut marker_from: Option<usize> = None;
    // End of the last source text carried into the output.
    let mut cursor = 0usize;

    let parser = Parser::new_ext(source, Options::ENABLE_STRIKETHROUGH);
    for (event, range) in parser.into_offset_iter() {
        // Link reference definitions produce no events at all.
        if depth == 0 && !matches!(event, Event::End(_)) {
            push_marker(&mut stack, source_slice(source, top_end, range.start).trim());
        }

        let block_start = matches!(
            &event,
            Event::Start(tag) if matches!(tag, Tag::Paragraph) || is_marker_block(tag)
        );
        if let Event::Start(tag) = &event
            && is_marker_block(tag)
        {
            marker_from.get_or_insert(range.start);
        } else if !block_start && let Some(from) = marker_from.take() {
            let to = if matches!(event, Event::End(_)) {
                range.end
            } else {
                range.start
            };
            push_marker(&mut stack, source_slice(source, from, to));
            cursor = cursor.max(to);
        }

        match &event {
            Event::Start(_) => depth += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }

        match event {
            Event::Start(Tag::Paragraph) => {
                paragraphs += 1;
                if paragraphs > 1
                    && let Some((_, nodes)) = stack.last_mut()
                    && !matches!(nodes.last(), None | Some(Inline::LineBreak))
                {
                    nodes.push(Inline::LineBreak);
                }
            }
            Event::Start(Tag::Emphasis) => stack.push((Frame::Emphasis, Vec::new())),
            Event::Start(Tag::Strong) => stack.push((Frame::Strong, Vec::new())),
            Event::Start(Tag::Strikethrough) => {
                stack.push((Frame::Strikethrough, Vec::new()));
            }
            Event::Start(Tag::Link { dest_url, .. }) => {
                stack.push((Frame::Link(dest_url.into_string()), Vec::new()));
            }
            Event::End(
                TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link,
            ) => {
                if stack.len() > 1
                    && let Some((frame, children)) = stack.pop()
                {
                    let node = match frame {
                        Frame::Emphasis => Inline::Emphasis(children),
                        Frame::Strong => Inline::Strong(children),
                        Frame::Strikethrough => Inline::Strikethrough(children),
                        Frame::Link(href) => Inline::Link {
                            href,
                            label: children,
                        },
                        Frame::Root => continue,
                    };
                    if let Some((_, parent)) = stack.last_mut() {
                        parent.push(node);
                    }
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                // Setext underlines and closing hashes.
                let tail = source_slice(source, cursor, range.end).trim();
                if !tail.is_empty()
                    && let Some((_, nodes)) = stack.last_mut()
                {
                    push_text(nodes, &format!(" {tail}"));
                }
            }
            Event::Rule => {
                push_marker(&mut stack, source_slice(source, range.start, range.end).trim());
            }
            Event::Text(text) | Event::Html(text) | Event::InlineHtml(text) => {
                if let Some((_, nodes)) = stack.last_mut() {
                    push_text(nodes, &text);
                }
            }
            Event::Code(code) => {
                if let Some((_, nodes)) = stack.last_mut() {
                    nodes.push(Inline::Code(code.into_string()));
                }
            }
            Event::SoftBreak => {
                if let Some((_, nodes)) = stack.last_mut() {
                    push_text(nodes, " ");
                }
            }
            Event::HardBreak => {
                if let Some((_, nodes)) = stack.last_mut() {
                    nodes.push(Inline::LineBreak);
                }
            }
            _ => {}
        }

        if !block_start {
            cursor = cursor.max(range.end);
        }
        if depth == 0 {
            top_end = top_end.max(range.end);
        }
    }

    push_marker(&mut stack, source_slice(source, top_end, source.len()).trim());

    // Unclosed frames cannot happen with pulldown-cmark, but fold them anyway.
    while stack.len() > 1 {
        if let Some((_, children)) = stack.pop()
            && let Some((_, parent)) = stack.last_mut()
        {
            parent.extend(children);
        }
    }

    stack.pop().map(|(_, nodes)| nodes).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn test_plain_string() {
        let rich = RichText::parse("Just words.");
        assert_eq!(rich.inlines(), &[text("Just words.")]);
    }

    #[test]
    fn test_embedded_link() {
        let rich = RichText::parse("Read the [VAT guide](/vat-guide) first.");
        assert_eq!(
            rich.inlines(),
            &[
                text("Read the "),
                Inline::Link {
                    href: "/vat-guide".to_string(),
                    label: vec![text("VAT guide")],
                },
                text(" first."),
            ]
        );
        assert_eq!(rich.links(), vec!["/vat-guide"]);
        assert_eq!(rich.plain_text(), "Read the VAT guide first.");
    }

    #[test]
    fn test_nested_emphasis() {
        let rich = RichText::parse("**Bold and *italic***, `code` and ~~gone~~");
        match &rich.inlines()[0] {
            Inline::Strong(children) => {
                assert_eq!(children[0], text("Bold and "));
                assert_eq!(children[1], Inline::Emphasis(vec![text("italic")]));
            }
            other => panic!("expected strong, got {other:?}"),
        }
        assert!(rich.inlines().contains(&Inline::Code("code".to_string())));
        assert!(
            rich.inlines()
                .contains(&Inline::Strikethrough(vec![text("gone")]))
        );
    }

    #[test]
    fn test_soft_break_becomes_space() {
        let rich = RichText::parse("line one\nline two");
        assert_eq!(rich.inlines(), &[text("line one line two")]);
    }

    #[test]
    fn test_raw_html_is_text() {
        let rich = RichText::parse("a <b>tag</b>");
        assert_eq!(rich.plain_text(), "a <b>tag</b>");
    }

    #[test]
    fn test_empty_string() {
        assert!(RichText::parse("").inlines().is_empty());
    }

    #[test]
    fn test_leading_year_is_not_a_list() {
        let rich = RichText::parse("2024. The year VAT rules changed.");
        assert_eq!(rich.plain_text(), "2024. The year VAT rules changed.");
    }

    #[test]
    fn test_block_markers_are_kept() {
        assert_eq!(RichText::parse("- Check turnover").plain_text(), "- Check turnover");
        assert_eq!(RichText::parse("# Not a heading").plain_text(), "# Not a heading");
        assert_eq!(RichText::parse("> As quoted").plain_text(), "> As quoted");
        assert_eq!(RichText::parse("---").plain_text(), "---");
    }

    #[test]
    fn test_marker_after_text_starts_new_line() {
        let rich = RichText::parse("Intro\n- a\n- b");
        assert_eq!(rich.plain_text(), "Intro\n- a\n- b");
    }

    #[test]
    fn test_setext_underline_is_kept() {
        let rich = RichText::parse("Totals\n===");
        assert_eq!(rich.plain_text(), "Totals ===");
    }

    #[test]
    fn test_reference_definition_is_kept() {
        let rich = RichText::parse("[hmrc]: https://www.gov.uk");
        assert_eq!(rich.plain_text(), "[hmrc]: https://www.gov.uk");
    }
}
