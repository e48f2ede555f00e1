//! The reader pane: a scrollable window onto the laid-out guide.
//!
//! This is the terminal implementation of [`Surface`]. Elements are anchor row ranges, bounds
//! are those ranges shifted by the scroll offset, and smooth scrolling closes a quarter of the
//! remaining distance on every tick.

use crate::document::{DocLine, Document};
use crate::viewport::{Alignment, Rect, ScrollBehavior, ScrollOptions, Surface};
use std::ops::Range;

/// Scroll state over a [`Document`].
pub struct ReaderSurface {
    document: Document,
    offset: usize,
    viewport_height: u16,
    target: Option<usize>,
}

impl ReaderSurface {
    #[must_use]
    /// Creates a reader at the top of the document with no viewport yet.
    pub fn new(document: Document) -> Self {
        Self {
            document,
            offset: 0,
            viewport_height: 0,
            target: None,
        }
    }

    #[must_use]
    /// The document being read.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Swaps in a freshly loaded document, keeping the offset where possible.
    pub fn replace_document(&mut self, document: Document) {
        self.document = document;
        self.target = None;
        self.offset = self.offset.min(self.max_offset());
    }

    #[must_use]
    /// First visible row.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Records the viewport height from the latest draw.
    pub fn set_viewport_height(&mut self, height: u16) {
        self.viewport_height = height;
        self.offset = self.offset.min(self.max_offset());
        if let Some(target) = self.target {
            self.target = Some(target.min(self.max_offset()));
        }
    }

    #[must_use]
    /// Largest offset that still fills the viewport.
    pub fn max_offset(&self) -> usize {
        self.document
            .height()
            .saturating_sub(usize::from(self.viewport_height))
    }

    #[must_use]
    /// Whether a smooth scroll is in flight.
    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// Advances a smooth scroll by one step. Returns whether the offset moved.
    pub fn tick(&mut self) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        let distance = target.abs_diff(self.offset);
        let step = (distance / 4).max(1).min(distance);
        if target > self.offset {
            self.offset += step;
        } else {
            self.offset -= step;
        }
        if self.offset == target {
            self.target = None;
        }
        step > 0
    }

    /// Scrolls by a signed number of rows, cancelling any animation.
    pub fn scroll_by(&mut self, rows: isize) {
        self.target = None;
        self.offset = self
            .offset
            .saturating_add_signed(rows)
            .min(self.max_offset());
    }

    /// Scrolls one viewport down.
    pub fn page_down(&mut self) {
        self.scroll_by(self.page_rows());
    }

    /// Scrolls one viewport up.
    pub fn page_up(&mut self) {
        self.scroll_by(-self.page_rows());
    }

    /// Jumps to the first row.
    pub fn to_top(&mut self) {
        self.target = None;
        self.offset = 0;
    }

    /// Jumps to the last full page.
    pub fn to_bottom(&mut self) {
        self.target = None;
        self.offset = self.max_offset();
    }

    #[must_use]
    /// Reading progress in percent. A document that fits on screen is fully read.
    pub fn progress(&self) -> u16 {
        let max = self.max_offset();
        if max == 0 {
            return 100;
        }
        u16::try_from(self.offset.min(max) * 100 / max).unwrap_or(100)
    }

    #[must_use]
    /// Rows currently in the viewport.
    pub fn visible_lines(&self) -> &[DocLine] {
        let lines = &self.document.lines;
        let start = self.offset.min(lines.len());
        let end = (start + usize::from(self.viewport_height)).min(lines.len());
        &lines[start..end]
    }

    fn page_rows(&self) -> isize {
        isize::try_from(self.viewport_height.saturating_sub(1).max(1)).unwrap_or(1)
    }

    fn target_for(&self, rows: &Range<usize>, block: Alignment) -> usize {
        let height = usize::from(self.viewport_height);
        let row = match block {
            Alignment::Start => rows.start,
            Alignment::Center => {
                let len = rows.end.saturating_sub(rows.start);
                rows.start.saturating_sub(height.saturating_sub(len) / 2)
            }
            Alignment::End => rows.end.saturating_sub(height),
        };
        row.min(self.max_offset())
    }
}

fn signed(row: usize) -> i64 {
    i64::try_from(row).unwrap_or(i64::MAX)
}

impl Surface for ReaderSurface {
    type Element = Range<usize>;

    fn resolve(&self, id: &str) -> Option<Range<usize>> {
        self.document.anchor(id).map(|anchor| anchor.rows.clone())
    }

    fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    fn bounds(&self, element: &Range<usize>) -> Rect {
        let offset = signed(self.offset);
        Rect {
            top: signed(element.start) - offset,
            bottom: signed(element.end) - offset,
        }
    }

    fn scroll_into_view(&mut self, element: &Range<usize>, options: ScrollOptions) {
        let target = self.target_for(element, options.block);
        match options.behavior {
            ScrollBehavior::Auto => {
                self.offset = target;
                self.target = None;
            }
            ScrollBehavior::Smooth => {
                self.target = (target != self.offset).then_some(target);
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/reader.rs"]
mod tests;
