//! guidepost: a terminal reader for long-form guides with a scroll-spy table of contents.
//!
//! Headings are pulled out of markdown with tree-sitter and become a registry of sections. As
//! the reader scrolls, an active-section tracker watches which headed regions cross a band in the
//! middle of the viewport and keeps exactly one table-of-contents entry highlighted.
#![allow(clippy::multiple_crate_versions)]

/// Session state for the reading view.
pub mod app_state;
/// Reader preferences from `guidepost.toml`.
pub mod config;
/// Turning guide markdown into a registry and a laid-out document.
pub mod content;
/// Laid-out guide text and section anchors.
pub mod document;
/// Error types.
pub mod error;
/// Source formats that sections can be extracted from.
pub mod formats;
/// Syntax highlighting for code blocks.
pub mod highlight;
/// Band-based visibility reporting.
pub mod observer;
/// The scrollable reader pane.
pub mod reader;
/// The validated table of contents.
pub mod registry;
/// Table-of-contents entries.
pub mod section;
/// The active-section tracker.
pub mod tracker;
/// Rendering.
pub mod ui;
/// The seam between the tracker and whatever is being scrolled.
pub mod viewport;

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
