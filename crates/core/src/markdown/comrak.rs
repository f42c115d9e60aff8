use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, Options, format_html, parse_document};
use regex::Regex;

use crate::card::MarkerNames;
use crate::document::{Element, Node};
use crate::markdown::types::MarkdownError;

/// Parse markdown into a document tree.
///
/// Markers (raw `<steam-game …>` elements and `::steamgame{…}` leaf
/// directives) become marker elements. A raw HTML block is split around the
/// markers it contains; a paragraph is lowered only when it holds nothing but
/// markers. Every other block is rendered by comrak and kept as raw HTML.
pub fn lower(input: &str, names: &MarkerNames) -> Result<Node, MarkdownError> {
    let arena = Arena::new();
    let options = default_options();
    let root = parse_document(&arena, input, &options);
    let patterns = MarkerPatterns::new(names)?;

    let mut children: Vec<Node> = Vec::new();

    for block in root.children() {
        if let Some(segments) = markers_from_block(block, &patterns) {
            for segment in segments {
                match segment {
                    Segment::Marker(el) => children.push(el.into()),
                    Segment::Raw(html) => push_raw(&mut children, &html),
                }
            }
            continue;
        }

        let mut html = Vec::new();
        format_html(block, &options, &mut html).map_err(MarkdownError::Render)?;
        let html = String::from_utf8(html).map_err(|e| MarkdownError::Encoding(e.to_string()))?;
        push_raw(&mut children, &html);
    }

    Ok(Node::root(children))
}

/// Adjacent raw blocks are merged to keep the tree small.
fn push_raw(children: &mut Vec<Node>, html: &str) {
    match children.last_mut() {
        Some(Node::Raw { value }) => value.push_str(html),
        _ => children.push(Node::raw(html)),
    }
}

/// A piece of block source: a marker or the markup between markers.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Segment {
    Marker(Element),
    Raw(String),
}

/// Compiled matchers for one set of marker names.
pub(crate) struct MarkerPatterns {
    names: MarkerNames,
    open: Regex,
    close: Regex,
    directive: Regex,
    attribute: Regex,
}

impl MarkerPatterns {
    pub(crate) fn new(names: &MarkerNames) -> Result<Self, MarkdownError> {
        let tag = regex::escape(&names.tag);
        let open = Regex::new(&format!(r"(?i)<{tag}((?:\s[^<>]*?)?)\s*(/?)>"))?;
        let close = Regex::new(&format!(r"(?i)</{tag}\s*>"))?;

        let directive = regex::escape(&names.directive);
        let directive = Regex::new(&format!(
            r"(?m)^[ \t]*::{directive}(?:\[([^\]\n]*)\])?(?:\{{([^}}\n]*)\}})?[ \t]*$"
        ))?;

        let attribute = Regex::new(
            r#"([^\s"'=<>/{}]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`{}]+)))?"#,
        )?;

        Ok(Self { names: names.clone(), open, close, directive, attribute })
    }

    /// Cut `source` into markers and the raw text around them.
    ///
    /// An opening tag owns the text up to its closing tag only when no other
    /// marker opens first; otherwise it is treated as an empty marker and the
    /// rest stays raw.
    pub(crate) fn split(&self, source: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut pos = 0;

        while pos < source.len() {
            let rest = &source[pos..];
            let tag = self.open.captures(rest);
            let directive = self.directive.captures(rest);

            let tag_start = tag.as_ref().and_then(|c| c.get(0)).map(|m| m.start());
            let directive_start = directive.as_ref().and_then(|c| c.get(0)).map(|m| m.start());

            let (start, end, marker) = match (tag_start, directive_start) {
                (None, None) => break,
                (Some(t), d) if d.is_none_or(|d| t <= d) => {
                    let Some(caps) = tag else { break };
                    let (end, el) = self.tag_marker(rest, &caps);
                    (t, end, el)
                }
                (_, Some(d)) => {
                    let Some(caps) = directive else { break };
                    let label = caps.get(1).map_or("", |m| m.as_str());
                    let attrs = caps.get(2).map_or("", |m| m.as_str());
                    let end = caps.get(0).map_or(d, |m| m.end());
                    (d, end, self.element(&self.names.directive, attrs, label))
                }
                (Some(_), None) => break,
            };

            if start > 0 {
                segments.push(Segment::Raw(rest[..start].to_string()));
            }
            segments.push(Segment::Marker(marker));
            pos += end.max(start + 1);
        }

        if pos < source.len() {
            segments.push(Segment::Raw(source[pos..].to_string()));
        }
        segments
    }

    /// End offset (within `rest`) and element for an opening tag match.
    fn tag_marker(&self, rest: &str, caps: &regex::Captures<'_>) -> (usize, Element) {
        let attrs = caps.get(1).map_or("", |m| m.as_str());
        let self_closing = caps.get(2).is_some_and(|m| !m.as_str().is_empty());
        let open_end = caps.get(0).map_or(0, |m| m.end());

        if self_closing {
            return (open_end, self.element(&self.names.tag, attrs, ""));
        }

        let after = &rest[open_end..];
        let next_open = self.open.find(after).map(|m| m.start());
        match self.close.find(after) {
            Some(close) if next_open.is_none_or(|o| close.start() < o) => {
                let content = &after[..close.start()];
                (open_end + close.end(), self.element(&self.names.tag, attrs, content))
            }
            _ => (open_end, self.element(&self.names.tag, attrs, "")),
        }
    }

    fn element(&self, tag: &str, attrs: &str, content: &str) -> Element {
        let mut el = Element::new(tag);

        for caps in self.attribute.captures_iter(attrs) {
            let name = caps[1].to_string();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map_or(String::new(), |m| m.as_str().to_string());
            el.properties.insert(name, value);
        }

        if !content.trim().is_empty() {
            el.children.push(Node::text(content.trim()));
        }

        el
    }
}

fn markers_from_block<'a>(
    block: &'a AstNode<'a>,
    patterns: &MarkerPatterns,
) -> Option<Vec<Segment>> {
    let (source, keep_raw) = match block.data.borrow().value {
        NodeValue::HtmlBlock(ref html) => (html.literal.clone(), true),
        NodeValue::Paragraph => (inline_source(block)?, false),
        _ => return None,
    };

    let segments = patterns.split(&source);
    if !segments.iter().any(|s| matches!(s, Segment::Marker(_))) {
        return None;
    }

    let raw_is_blank = |s: &Segment| matches!(s, Segment::Raw(r) if r.trim().is_empty());
    if keep_raw {
        // Raw HTML passes through verbatim, so markup around markers survives.
        return Some(segments.into_iter().filter(|s| !raw_is_blank(s)).collect());
    }

    // Paragraph text would need escaping and a wrapper; only all-marker
    // paragraphs are lowered.
    let only_markers = segments
        .iter()
        .all(|s| matches!(s, Segment::Marker(_)) || raw_is_blank(s));
    only_markers.then(|| segments.into_iter().filter(|s| !raw_is_blank(s)).collect())
}

/// Source text of a paragraph made only of text and inline HTML.
fn inline_source<'a>(paragraph: &'a AstNode<'a>) -> Option<String> {
    let mut source = String::new();

    for child in paragraph.children() {
        match child.data.borrow().value {
            NodeValue::Text(ref t) => source.push_str(t),
            NodeValue::HtmlInline(ref html) => source.push_str(html),
            NodeValue::SoftBreak => source.push('\n'),
            _ => return None,
        }
    }

    Some(source)
}

// --- Internal helpers ---

fn default_options() -> Options<'static> {
    let mut options = Options::default();
    // Enable GFM extensions for compatibility
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.description_lists = true;
    options.extension.front_matter_delimiter = Some("---".to_string());

    // Parse options
    options.parse.smart = false; // Don't convert quotes/dashes

    options.render.hardbreaks = false;
    options.render.github_pre_lang = true;
    options.render.unsafe_ = true; // Allow raw HTML passthrough

    options
}
