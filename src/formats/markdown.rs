//! Markdown format implementation using tree-sitter-md.
//!
//! Headings are ATX-style (`#` syntax). A heading may end in a `{#custom-id}` attribute, which
//! becomes its explicit id and is removed from the title.

use crate::formats::{CodeBlock, Format, Heading};
use tree_sitter::Node;

/// Tree-sitter queries for ATX headings and fenced code blocks.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn section_query(&self) -> &'static str {
        "(atx_heading) @heading"
    }

    fn code_block_query(&self) -> &'static str {
        "(fenced_code_block) @block"
    }

    fn heading(&self, node: Node<'_>, source: &str) -> Option<Heading> {
        let mut level = None;
        let mut raw_title = String::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "atx_h1_marker" => level = Some(1),
                "atx_h2_marker" => level = Some(2),
                "atx_h3_marker" => level = Some(3),
                "atx_h4_marker" => level = Some(4),
                "atx_h5_marker" => level = Some(5),
                "atx_h6_marker" => level = Some(6),
                "inline" => {
                    raw_title = child.utf8_text(source.as_bytes()).ok()?.to_string();
                }
                _ => {}
            }
        }
        let (title, explicit_id) = split_explicit_id(&raw_title);
        Some(Heading {
            level: level?,
            title,
            explicit_id,
            row: node.start_position().row,
        })
    }

    fn code_block(&self, node: Node<'_>, source: &str) -> Option<CodeBlock> {
        let mut info = (None, None);
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "info_string" {
                info = parse_info_string(child.utf8_text(source.as_bytes()).ok()?);
            }
        }
        let (language, filename) = info;
        let start = node.start_position().row;
        let end = node.end_position();
        let end_row = if end.column == 0 { end.row } else { end.row + 1 };
        Some(CodeBlock {
            language,
            filename,
            rows: start..end_row.max(start + 1),
        })
    }
}

/// Reads the language and file name from a fence info string.
///
/// The first word is the language. The file name comes from a `title=` or `filename=` attribute,
/// quoted or not, or else from a second bare word: `python title="app.py"` and `python app.py`
/// both name `app.py`.
fn parse_info_string(info: &str) -> (Option<String>, Option<String>) {
    let mut words = info.split_whitespace();
    let language = words.next().map(str::to_string);
    let mut filename = None;
    for word in words {
        let attribute = word
            .strip_prefix("title=")
            .or_else(|| word.strip_prefix("filename="));
        match attribute {
            Some(value) => {
                filename = Some(value.trim_matches(['"', '\'']).to_string());
            }
            None if filename.is_none() && !word.contains('=') => {
                filename = Some(word.to_string());
            }
            None => {}
        }
    }
    (language, filename.filter(|name| !name.is_empty()))
}

/// Splits a trailing `{#id}` attribute off a heading. A closing `#` run is dropped too, but only
/// when whitespace separates it from the title, so `C#` keeps its hash.
fn split_explicit_id(raw: &str) -> (String, Option<String>) {
    let text = strip_closing_sequence(raw.trim());
    if let Some(body) = text.strip_suffix('}') {
        if let Some(open) = body.rfind("{#") {
            let id = body[open + 2..].trim();
            if !id.is_empty() && !id.contains(char::is_whitespace) {
                return (body[..open].trim().to_string(), Some(id.to_string()));
            }
        }
    }
    (text.to_string(), None)
}

fn strip_closing_sequence(text: &str) -> &str {
    let body = text.trim_end_matches('#');
    if body.len() == text.len() {
        text
    } else if body.is_empty() {
        body
    } else if body.ends_with([' ', '\t']) {
        body.trim_end()
    } else {
        text
    }
}

#[must_use]
/// Lowercase ASCII slug of a title: alphanumerics kept, every other run becomes one `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("section");
    }
    slug
}

#[cfg(test)]
#[path = "../tests/markdown.rs"]
mod tests;
