//! Band-restricted visibility observation.
//!
//! Elements are observed by id. On every [`BandObserver::take_records`] call the observer measures
//! each observed element against the middle band of the viewport and reports the ones whose
//! intersection state changed since the last call, in the order they were observed. A freshly
//! observed element always reports once, whatever its state.

use crate::viewport::{Rect, Surface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// The middle region of the viewport in which an element counts as intersecting.
///
/// The excluded margins are percentages of the viewport height.
pub struct VisibilityBand {
    /// Excluded share of the viewport at the top, in percent.
    pub top_percent: u16,
    /// Excluded share of the viewport at the bottom, in percent.
    pub bottom_percent: u16,
}

impl Default for VisibilityBand {
    fn default() -> Self {
        Self {
            top_percent: 20,
            bottom_percent: 35,
        }
    }
}

impl VisibilityBand {
    #[must_use]
    /// Row range `[start, end)` of the band for a viewport of the given height.
    pub fn rows(&self, viewport_height: u16) -> (i64, i64) {
        let height = i64::from(viewport_height);
        let top = height * i64::from(self.top_percent.min(100)) / 100;
        let bottom = height - height * i64::from(self.bottom_percent.min(100)) / 100;
        (top, bottom.max(top))
    }

    #[must_use]
    /// Whether an element shares at least one row with the band.
    pub fn intersects(&self, rect: Rect, viewport_height: u16) -> bool {
        let (start, end) = self.rows(viewport_height);
        start < end && rect.top < end && rect.bottom > start
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One change notification in a visibility batch.
pub struct VisibilityEntry {
    /// Id of the observed element.
    pub id: String,
    /// Whether the element now overlaps the band.
    pub is_intersecting: bool,
}

impl VisibilityEntry {
    #[must_use]
    /// Builds an entry.
    pub fn new(id: impl Into<String>, is_intersecting: bool) -> Self {
        Self {
            id: id.into(),
            is_intersecting,
        }
    }
}

struct Target<E> {
    id: String,
    element: E,
    last: Option<bool>,
}

/// Observes elements against a [`VisibilityBand`] and batches state changes.
pub struct BandObserver<E> {
    band: VisibilityBand,
    targets: Vec<Target<E>>,
}

impl<E: Clone> BandObserver<E> {
    #[must_use]
    /// Creates an observer with nothing observed.
    pub fn new(band: VisibilityBand) -> Self {
        Self {
            band,
            targets: Vec::new(),
        }
    }

    /// Starts observing an element. Observing an id twice replaces the earlier element.
    pub fn observe(&mut self, id: &str, element: E) {
        self.unobserve(id);
        self.targets.push(Target {
            id: id.to_string(),
            element,
            last: None,
        });
    }

    /// Stops observing an id. Unknown ids are ignored.
    pub fn unobserve(&mut self, id: &str) {
        self.targets.retain(|target| target.id != id);
    }

    /// Stops observing everything.
    pub fn disconnect(&mut self) {
        self.targets.clear();
    }

    #[must_use]
    /// Ids currently observed, in observation order.
    pub fn observed_ids(&self) -> Vec<&str> {
        self.targets.iter().map(|target| target.id.as_str()).collect()
    }

    #[must_use]
    /// Number of observed elements.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    /// True when nothing is observed.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Measures every observed element and returns the ones whose state changed.
    pub fn take_records<S>(&mut self, surface: &S) -> Vec<VisibilityEntry>
    where
        S: Surface<Element = E>,
    {
        let height = surface.viewport_height();
        let band = self.band;
        self.targets
            .iter_mut()
            .filter_map(|target| {
                let now = band.intersects(surface.bounds(&target.element), height);
                if target.last == Some(now) {
                    return None;
                }
                target.last = Some(now);
                Some(VisibilityEntry::new(target.id.clone(), now))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/observer.rs"]
mod tests;
