//! Format trait and implementations for guide source formats.
//!
//! A format supplies the tree-sitter grammar and queries for locating headings and code blocks,
//! and knows how to read a heading or code block out of a matched node. Everything downstream
//! (registry building, layout) is format-agnostic.

pub mod markdown;

use std::ops::Range;
use tree_sitter::Node;

#[derive(Clone, Debug, PartialEq, Eq)]
/// A heading found in the source.
pub struct Heading {
    /// Heading level, 1 for the document title.
    pub level: usize,
    /// Display text with markup removed.
    pub title: String,
    /// Explicit id attached to the heading, if any.
    pub explicit_id: Option<String>,
    /// Source row of the heading line.
    pub row: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A fenced code block found in the source.
pub struct CodeBlock {
    /// Language token from the info string.
    pub language: Option<String>,
    /// File name shown above the block, from the info string.
    pub filename: Option<String>,
    /// Source rows covered by the block, fences included.
    pub rows: Range<usize>,
}

/// Source format understood by the guide loader.
pub trait Format {
    /// Grammar used to parse the source.
    fn language(&self) -> tree_sitter::Language;

    /// Query capturing heading nodes.
    fn section_query(&self) -> &str;

    /// Query capturing fenced code block nodes.
    fn code_block_query(&self) -> &str;

    /// Reads a heading out of a node captured by [`Format::section_query`].
    fn heading(&self, node: Node<'_>, source: &str) -> Option<Heading>;

    /// Reads a code block out of a node captured by [`Format::code_block_query`].
    fn code_block(&self, node: Node<'_>, source: &str) -> Option<CodeBlock>;
}
