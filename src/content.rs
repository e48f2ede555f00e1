//! Guide loading: source text to a validated registry and a laid-out document.
//!
//! Headings and code blocks are located with the format's tree-sitter queries. Everything else
//! is laid out line by line: blank lines stay blank, `>` quotes become callouts, and paragraph
//! and list text wraps at the configured width.

use crate::document::{CalloutKind, DocLine, Document, LineKind, Segment};
use crate::error::ContentError;
use crate::formats::markdown::{slugify, MarkdownFormat};
use crate::formats::{CodeBlock, Format, Heading};
use crate::highlight::CodeHighlighter;
use crate::registry::Registry;
use crate::section::SectionEntry;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::rc::Rc;
use ratatui::text::Span;
use streaming_iterator::StreamingIterator;
use tracing::{debug, info};
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// The guide compiled into the binary.
pub const BUNDLED_GUIDE: &str = include_str!("../content/ssrf-guide.md");

/// A loaded guide: its navigable structure and its laid-out text.
pub struct Guide {
    /// Section registry shared with the tracker.
    pub registry: Rc<Registry>,
    /// Laid-out document rendered by the reader pane.
    pub document: Document,
}

/// Reads and parses a markdown guide from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its headings do not form a valid registry.
pub fn load_guide(
    path: &Path,
    highlighter: &CodeHighlighter,
    wrap_width: usize,
) -> Result<Guide, ContentError> {
    let source = fs::read_to_string(path)?;
    let guide = parse_guide(&source, &MarkdownFormat, highlighter, wrap_width)?;
    info!(
        path = %path.display(),
        sections = guide.registry.len(),
        rows = guide.document.height(),
        "guide loaded"
    );
    Ok(guide)
}

/// Parses guide source into a registry and a document.
///
/// # Errors
///
/// Returns an error if the grammar or queries fail to load, the parse yields no tree, or two
/// headings carry the same explicit id.
pub fn parse_guide(
    source: &str,
    format: &impl Format,
    highlighter: &CodeHighlighter,
    wrap_width: usize,
) -> Result<Guide, ContentError> {
    let language = format.language();
    let mut parser = Parser::new();
    parser.set_language(&language)?;
    let tree = parser.parse(source, None).ok_or(ContentError::Parse)?;
    let root = tree.root_node();

    let mut headings: Vec<Heading> = capture_nodes(&language, format.section_query(), root, source)?
        .into_iter()
        .filter_map(|node| format.heading(node, source))
        .collect();
    headings.sort_by_key(|heading| heading.row);

    let mut blocks: Vec<CodeBlock> =
        capture_nodes(&language, format.code_block_query(), root, source)?
            .into_iter()
            .filter_map(|node| format.code_block(node, source))
            .collect();
    blocks.sort_by_key(|block| block.rows.start);

    let navigable = assign_ids(&headings);
    let registry = Rc::new(build_registry(&headings, &navigable)?);
    let document = layout(
        source,
        &headings,
        &navigable,
        &blocks,
        &registry,
        highlighter,
        wrap_width,
    );
    debug!(
        headings = headings.len(),
        code_blocks = blocks.len(),
        "guide parsed"
    );
    Ok(Guide { registry, document })
}

fn capture_nodes<'tree>(
    language: &tree_sitter::Language,
    query_source: &str,
    root: Node<'tree>,
    source: &str,
) -> Result<Vec<Node<'tree>>, ContentError> {
    let query = Query::new(language, query_source)?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, root, source.as_bytes());
    let mut nodes = Vec::new();
    while let Some(found) = matches.next() {
        nodes.extend(found.captures.iter().map(|capture| capture.node));
    }
    Ok(nodes)
}

/// Ids for navigable headings (levels 2 and 3), keyed by source row.
///
/// Explicit ids are kept verbatim so collisions surface as registry errors. Generated slugs that
/// collide with anything seen so far get a numeric suffix.
fn assign_ids(headings: &[Heading]) -> HashMap<usize, String> {
    let mut used: HashSet<String> = headings
        .iter()
        .filter(|h| is_navigable(h))
        .filter_map(|h| h.explicit_id.clone())
        .collect();
    let mut ids = HashMap::new();
    for heading in headings.iter().filter(|h| is_navigable(h)) {
        let id = if let Some(explicit) = &heading.explicit_id {
            explicit.clone()
        } else {
            let base = slugify(&heading.title);
            let mut candidate = base.clone();
            let mut n = 2;
            while used.contains(&candidate) {
                candidate = format!("{base}-{n}");
                n += 1;
            }
            used.insert(candidate.clone());
            candidate
        };
        ids.insert(heading.row, id);
    }
    ids
}

fn is_navigable(heading: &Heading) -> bool {
    matches!(heading.level, 2 | 3) && !heading.title.is_empty()
}

fn build_registry(
    headings: &[Heading],
    ids: &HashMap<usize, String>,
) -> Result<Registry, ContentError> {
    let mut sections: Vec<SectionEntry> = Vec::new();
    for heading in headings {
        let Some(id) = ids.get(&heading.row) else {
            continue;
        };
        let entry = SectionEntry::new(id.clone(), heading.title.clone());
        match (heading.level, sections.last_mut()) {
            (3, Some(parent)) => parent.subsections.push(entry),
            _ => sections.push(entry),
        }
    }
    Ok(Registry::new(sections)?)
}

fn layout(
    source: &str,
    headings: &[Heading],
    ids: &HashMap<usize, String>,
    blocks: &[CodeBlock],
    registry: &Registry,
    highlighter: &CodeHighlighter,
    wrap_width: usize,
) -> Document {
    let source_lines: Vec<&str> = source.lines().collect();
    let heading_at: HashMap<usize, &Heading> = headings.iter().map(|h| (h.row, h)).collect();
    let block_at: HashMap<usize, &CodeBlock> =
        blocks.iter().map(|b| (b.rows.start, b)).collect();

    let mut title = None;
    let mut lines = Vec::new();
    let mut starts = Vec::new();
    let mut callout: Option<CalloutKind> = None;
    let mut row = 0;

    while row < source_lines.len() {
        let text = source_lines[row];

        if let Some(block) = block_at.get(&row) {
            callout = None;
            let end = block.rows.end.min(source_lines.len());
            let body = code_body(&source_lines[block.rows.start..end]);
            lines.push(code_header(block));
            let highlighted = highlighter.highlight(block.language.as_deref(), &body);
            for (index, segments) in highlighted.into_iter().enumerate() {
                lines.push(DocLine {
                    kind: LineKind::Code { number: index + 1 },
                    segments,
                });
            }
            row = end.max(row + 1);
            continue;
        }

        if let Some(heading) = heading_at.get(&row) {
            callout = None;
            if heading.level == 1 {
                if title.is_none() {
                    title = Some(heading.title.clone());
                }
                lines.push(DocLine::plain(LineKind::Title, heading.title.clone()));
            } else if let Some(id) = ids.get(&row) {
                let depth = registry.depth(id).unwrap_or(0);
                let number = registry
                    .entries()
                    .find(|entry| entry.id == id.as_str())
                    .and_then(|entry| entry.number);
                starts.push((id.clone(), lines.len(), depth));
                let label = match number {
                    Some(n) => format!("{n}. {}", heading.title),
                    None => heading.title.clone(),
                };
                lines.push(DocLine::plain(LineKind::Heading { depth, number }, label));
            } else {
                lines.push(DocLine::plain(
                    LineKind::Heading {
                        depth: 2,
                        number: None,
                    },
                    heading.title.clone(),
                ));
            }
            row += 1;
            continue;
        }

        if text.trim().is_empty() {
            callout = None;
            lines.push(DocLine::blank());
        } else if let Some(quoted) = text.trim_start().strip_prefix('>') {
            let quoted = quoted.trim();
            if let Some((kind, title)) = CalloutKind::parse_opener(quoted) {
                callout = Some(kind);
                let mut label = DocLine::plain(LineKind::CalloutLabel(kind), kind.label());
                if let Some(title) = title {
                    label.segments.push(Segment::plain(format!(": {title}")));
                }
                lines.push(label);
            } else {
                let kind = *callout.get_or_insert(CalloutKind::Note);
                for wrapped in wrap(&strip_emphasis(quoted), wrap_width.saturating_sub(2), 0) {
                    lines.push(DocLine::plain(LineKind::Callout(kind), wrapped));
                }
            }
        } else {
            callout = None;
            let indent = list_indent(text);
            for wrapped in wrap(&strip_emphasis(text), wrap_width, indent) {
                lines.push(DocLine::plain(LineKind::Body, wrapped));
            }
        }
        row += 1;
    }

    Document::new(title, lines, starts)
}

/// Header row above a code block: the upper-cased language, then the file name if any.
fn code_header(block: &CodeBlock) -> DocLine {
    let language = block.language.as_deref().unwrap_or("text").to_uppercase();
    let mut header = DocLine::plain(LineKind::CodeHeader, language);
    if let Some(filename) = &block.filename {
        header.segments.push(Segment::plain(format!("  {filename}")));
    }
    header
}

/// Code lines between the fences. An unterminated block runs to the end of its rows.
fn code_body<'a>(rows: &[&'a str]) -> Vec<&'a str> {
    let is_fence = |line: &str| {
        let trimmed = line.trim_start();
        trimmed.starts_with("```") || trimmed.starts_with("~~~")
    };
    let mut body = rows;
    if body.first().is_some_and(|line| is_fence(line)) {
        body = &body[1..];
    }
    if body.last().is_some_and(|line| is_fence(line)) {
        body = &body[..body.len() - 1];
    }
    body.to_vec()
}

fn strip_emphasis(text: &str) -> String {
    text.replace("**", "").replace("__", "")
}

/// Continuation indent for list items, so wrapped lines align under the item text.
fn list_indent(text: &str) -> usize {
    let leading = text.len() - text.trim_start().len();
    let rest = text.trim_start();
    if rest.starts_with("- ") || rest.starts_with("* ") || rest.starts_with("+ ") {
        return leading + 2;
    }
    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 && rest[digits..].starts_with(". ") {
        return leading + digits + 2;
    }
    leading
}

/// Terminal columns taken by `text`; wide characters count double.
fn display_width(text: &str) -> usize {
    Span::raw(text).width()
}

/// Greedy word wrap on display width. Continuation lines are indented by `indent` spaces; words
/// longer than the width get a line of their own.
fn wrap(text: &str, width: usize, indent: usize) -> Vec<String> {
    let width = width.max(indent + 8);
    let leading = &text[..text.len() - text.trim_start().len()];
    let mut lines = Vec::new();
    let mut current = leading.to_string();
    let mut used = display_width(leading);
    let mut has_word = false;

    for word in text.split_whitespace() {
        let word_width = display_width(word);
        if has_word && used + 1 + word_width > width {
            lines.push(std::mem::take(&mut current));
            current = " ".repeat(indent);
            used = indent;
            has_word = false;
        }
        if has_word {
            current.push(' ');
            used += 1;
        }
        current.push_str(word);
        used += word_width;
        has_word = true;
    }
    if has_word || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
#[path = "tests/content.rs"]
mod tests;
