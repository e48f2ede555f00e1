//! The rendering-surface seam the tracker talks to.
//!
//! The tracker never touches the terminal directly. It resolves ids to elements, asks for their
//! bounds relative to the top of the viewport, and issues scroll commands, all through
//! [`Surface`]. The reader pane implements it for real; tests implement it with a table of rects.

/// Vertical extent of an element in rows, relative to the top of the viewport.
///
/// `top` is inclusive and `bottom` exclusive. Either may be negative or exceed the viewport
/// height when the element is partly or wholly off screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    /// First row occupied by the element.
    pub top: i64,
    /// Row just past the element.
    pub bottom: i64,
}

impl Rect {
    #[must_use]
    /// Builds a rect from its top row and height.
    pub fn new(top: i64, height: i64) -> Self {
        Self {
            top,
            bottom: top + height,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// How a scroll command moves the viewport.
pub enum ScrollBehavior {
    /// Animate toward the target over several ticks.
    #[default]
    Smooth,
    /// Jump straight to the target.
    Auto,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Which viewport edge the element is aligned to.
pub enum Alignment {
    /// Element top meets viewport top.
    #[default]
    Start,
    /// Element is centred in the viewport.
    Center,
    /// Element bottom meets viewport bottom.
    End,
}

impl Alignment {
    #[must_use]
    /// Parses `start`, `center` (or `centre`) and `end`, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "start" => Some(Self::Start),
            "center" | "centre" => Some(Self::Center),
            "end" => Some(Self::End),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Options for [`Surface::scroll_into_view`].
pub struct ScrollOptions {
    /// Animation mode.
    pub behavior: ScrollBehavior,
    /// Alignment mode.
    pub block: Alignment,
}

/// Rendering surface capable of locating, measuring and scrolling to elements.
pub trait Surface {
    /// Handle to a rendered element.
    type Element: Clone;

    /// Finds the rendered element for an id, if one is mounted.
    fn resolve(&self, id: &str) -> Option<Self::Element>;

    /// Current viewport height in rows.
    fn viewport_height(&self) -> u16;

    /// Bounds of an element relative to the top of the viewport.
    fn bounds(&self, element: &Self::Element) -> Rect;

    /// Starts scrolling so that the element lands at the requested alignment.
    fn scroll_into_view(&mut self, element: &Self::Element, options: ScrollOptions);
}
