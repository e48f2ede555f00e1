//! The application state bridging the guide, the reader pane and the scroll-spy tracker.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the user reads
//! and navigates. The tracker owns the reader surface, so every scroll, whether from a key press
//! or an animation tick, is followed by a poll that lets the highlight catch up.

use crate::config::Config;
use crate::content::{self, Guide};
use crate::error::ContentError;
use crate::highlight::CodeHighlighter;
use crate::reader::ReaderSurface;
use crate::registry::Registry;
use crate::tracker::ActiveSectionTracker;
use crate::viewport::{ScrollBehavior, ScrollOptions};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which pane receives movement keys.
pub enum Focus {
    /// Movement keys scroll the guide.
    Content,
    /// Movement keys move the table-of-contents cursor.
    Toc,
}

/// Where the guide text came from, so it can be reloaded.
pub enum Source {
    /// The guide compiled into the binary.
    Bundled,
    /// A markdown file on disk.
    File(PathBuf),
}

/// Session state for one reading view.
pub struct AppState {
    /// Scroll-spy tracker, owning the reader surface.
    pub tracker: ActiveSectionTracker<ReaderSurface>,
    /// Pane receiving movement keys.
    pub focus: Focus,
    /// Selected row in the table of contents.
    pub toc_cursor: usize,
    /// Whether the table-of-contents overlay is shown on narrow terminals.
    pub toc_open: bool,
    /// Whether the last draw used the narrow layout.
    pub narrow: bool,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    source: Source,
    highlighter: CodeHighlighter,
    wrap_width: usize,
    scroll: ScrollOptions,
    tick: Duration,
}

impl AppState {
    #[must_use]
    /// Builds the view for a loaded guide. Observation starts once the first frame mounts it.
    pub fn new(guide: Guide, source: Source, highlighter: CodeHighlighter, cfg: &Config) -> Self {
        let surface = ReaderSurface::new(guide.document);
        let tracker = ActiveSectionTracker::new(guide.registry, surface, cfg.band());
        let behavior = if cfg.smooth_scroll {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Auto
        };
        Self {
            tracker,
            focus: Focus::Content,
            toc_cursor: 0,
            toc_open: false,
            narrow: false,
            message: None,
            source,
            highlighter,
            wrap_width: cfg.wrap_width,
            scroll: ScrollOptions {
                behavior,
                block: cfg.alignment(),
            },
            tick: Duration::from_millis(cfg.tick_millis),
        }
    }

    #[must_use]
    /// The registry currently shown.
    pub fn registry(&self) -> &Rc<Registry> {
        self.tracker.registry()
    }

    #[must_use]
    /// The reader surface.
    pub fn reader(&self) -> &ReaderSurface {
        self.tracker.surface()
    }

    /// Records the content viewport height after a draw and mounts the tracker on first use.
    pub fn viewport_resized(&mut self, height: u16) {
        self.tracker.surface_mut().set_viewport_height(height);
        self.tracker.mount();
        self.tracker.poll();
    }

    /// Advances any running scroll animation and refreshes the highlight.
    pub fn tick(&mut self) {
        self.tracker.surface_mut().tick();
        self.tracker.poll();
    }

    #[must_use]
    /// Whether the event loop should keep ticking without waiting for input.
    pub fn is_animating(&self) -> bool {
        self.reader().is_animating()
    }

    #[must_use]
    /// How long the event loop may wait for input before the next animation tick.
    ///
    /// `None` while nothing is animating, so the loop blocks until an event arrives.
    pub fn tick_timeout(&self) -> Option<Duration> {
        self.is_animating().then_some(self.tick)
    }

    /// Scrolls the guide by a signed number of rows.
    pub fn scroll_by(&mut self, rows: isize) {
        self.tracker.surface_mut().scroll_by(rows);
        self.tracker.poll();
    }

    /// Scrolls the guide by one page.
    pub fn page(&mut self, down: bool) {
        let surface = self.tracker.surface_mut();
        if down {
            surface.page_down();
        } else {
            surface.page_up();
        }
        self.tracker.poll();
    }

    /// Jumps to the start or the end of the guide.
    pub fn jump(&mut self, to_end: bool) {
        let surface = self.tracker.surface_mut();
        if to_end {
            surface.to_bottom();
        } else {
            surface.to_top();
        }
        self.tracker.poll();
    }

    /// Moves the table-of-contents cursor, clamped to the entry list.
    pub fn move_cursor(&mut self, delta: isize) {
        let last = self.registry().len().saturating_sub(1);
        self.toc_cursor = self.toc_cursor.saturating_add_signed(delta).min(last);
    }

    /// Moves the cursor to the first or last entry.
    pub fn cursor_to_edge(&mut self, to_end: bool) {
        self.toc_cursor = if to_end {
            self.registry().len().saturating_sub(1)
        } else {
            0
        };
    }

    /// Navigates to the entry under the cursor.
    pub fn open_cursor_entry(&mut self) -> bool {
        let id = self
            .registry()
            .entries()
            .nth(self.toc_cursor)
            .map(|entry| entry.id.to_string());
        id.is_some_and(|id| self.navigate_to(&id))
    }

    /// Navigates to the entry after (or before) the active one in table-of-contents order.
    ///
    /// With nothing active yet, forward navigation starts at the first entry.
    pub fn navigate_relative(&mut self, forward: bool) -> bool {
        let registry = Rc::clone(self.registry());
        let ids = registry.flatten();
        let current = self
            .tracker
            .active_id()
            .and_then(|active| registry.position(active));
        let next = match (current, forward) {
            (Some(i), true) => ids.get(i + 1),
            (Some(i), false) => i.checked_sub(1).and_then(|i| ids.get(i)),
            (None, true) => ids.first(),
            (None, false) => None,
        };
        match next {
            Some(id) => self.navigate_to(id),
            None => false,
        }
    }

    /// Scrolls to a section and closes the overlay once navigation happens.
    pub fn navigate_to(&mut self, id: &str) -> bool {
        let mut navigated_to = None;
        let mut close_overlay = |target: &str| navigated_to = Some(target.to_string());
        let issued = self
            .tracker
            .navigate_to(id, self.scroll, Some(&mut close_overlay));
        if let Some(target) = navigated_to {
            self.toc_open = false;
            if let Some(position) = self.registry().position(&target) {
                self.toc_cursor = position;
            }
        }
        self.tracker.poll();
        issued
    }

    /// Shows or hides the table-of-contents overlay.
    pub fn toggle_toc(&mut self) {
        self.toc_open = !self.toc_open;
        if self.toc_open {
            self.focus = Focus::Toc;
        }
    }

    /// Switches the pane receiving movement keys.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Content => Focus::Toc,
            Focus::Toc => Focus::Content,
        };
    }

    /// Reloads the guide from its source and re-arms the tracker on the new registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can no longer be read or parsed; the current guide stays.
    pub fn reload(&mut self) -> Result<(), ContentError> {
        let guide = match &self.source {
            Source::Bundled => content::parse_guide(
                content::BUNDLED_GUIDE,
                &crate::formats::markdown::MarkdownFormat,
                &self.highlighter,
                self.wrap_width,
            )?,
            Source::File(path) => content::load_guide(path, &self.highlighter, self.wrap_width)?,
        };
        self.tracker.surface_mut().replace_document(guide.document);
        self.tracker.set_registry(guide.registry);
        self.toc_cursor = self
            .toc_cursor
            .min(self.registry().len().saturating_sub(1));
        self.tracker.poll();
        info!(sections = self.registry().len(), "guide reloaded");
        Ok(())
    }

    /// Reloads and reports the outcome in the status bar.
    pub fn reload_with_message(&mut self) {
        self.message = Some(match self.reload() {
            Ok(()) => "Reloaded".to_string(),
            Err(e) => {
                warn!(error = %e, "reload failed");
                format!("Reload failed: {e}")
            }
        });
    }

    /// Tears down observation before the view goes away.
    pub fn shutdown(&mut self) {
        self.tracker.dispose();
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
