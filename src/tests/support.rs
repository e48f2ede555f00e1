//! Scriptable surface for exercising the tracker without a terminal.

use crate::viewport::{Rect, ScrollOptions, Surface};
use std::collections::HashMap;

/// Surface backed by a table of element rects, recording every scroll command.
pub struct FakeSurface {
    pub height: u16,
    pub rects: HashMap<String, Rect>,
    pub scrolls: Vec<(String, ScrollOptions)>,
}

impl FakeSurface {
    pub fn new(height: u16) -> Self {
        Self {
            height,
            rects: HashMap::new(),
            scrolls: Vec::new(),
        }
    }

    pub fn with(mut self, id: &str, top: i64, height: i64) -> Self {
        self.place(id, top, height);
        self
    }

    pub fn place(&mut self, id: &str, top: i64, height: i64) {
        self.rects.insert(id.to_string(), Rect::new(top, height));
    }
}

impl Surface for FakeSurface {
    type Element = String;

    fn resolve(&self, id: &str) -> Option<String> {
        self.rects.contains_key(id).then(|| id.to_string())
    }

    fn viewport_height(&self) -> u16 {
        self.height
    }

    fn bounds(&self, element: &String) -> Rect {
        self.rects
            .get(element)
            .copied()
            .unwrap_or(Rect { top: -1, bottom: -1 })
    }

    fn scroll_into_view(&mut self, element: &String, options: ScrollOptions) {
        self.scrolls.push((element.clone(), options));
    }
}
