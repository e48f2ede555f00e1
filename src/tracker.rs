//! Active-section tracking: which registered section the reader is looking at.
//!
//! The tracker owns the surface it observes and the registry snapshot it observes for. Its
//! lifecycle is a small state machine:
//!
//! ```text
//! Uninitialized --mount--> Observing --dispose--> Disposed
//!                            |    ^
//!                            +----+
//!                    set_registry (re-arm)
//! ```
//!
//! Visibility batches only update the active id while observing. Within one batch the last
//! intersecting entry wins; there is no tie-break by position or registry order.
//!
//! Navigation and highlighting are decoupled: [`ActiveSectionTracker::navigate_to`] only scrolls,
//! and the highlight follows once the scroll moves the target into the visibility band.

use crate::observer::{BandObserver, VisibilityBand, VisibilityEntry};
use crate::registry::Registry;
use crate::section::SectionEntry;
use crate::viewport::{ScrollOptions, Surface};
use std::rc::Rc;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Lifecycle phase of a tracker.
pub enum Phase {
    /// Constructed, nothing observed yet.
    Uninitialized,
    /// Observing every resolvable id of the current registry.
    Observing,
    /// Torn down; terminal.
    Disposed,
}

/// Maintains the active section id for a registry rendered on a surface.
pub struct ActiveSectionTracker<S: Surface> {
    registry: Rc<Registry>,
    surface: S,
    observer: BandObserver<S::Element>,
    phase: Phase,
    active_id: Option<String>,
}

impl<S: Surface> ActiveSectionTracker<S> {
    #[must_use]
    /// Creates an uninitialised tracker over a registry snapshot and a surface.
    pub fn new(registry: Rc<Registry>, surface: S, band: VisibilityBand) -> Self {
        Self {
            registry,
            surface,
            observer: BandObserver::new(band),
            phase: Phase::Uninitialized,
            active_id: None,
        }
    }

    #[must_use]
    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    /// The highlighted id, if any observation has fired.
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    #[must_use]
    /// The highlighted entry, or `None` when nothing is active or the id went stale.
    pub fn active_entry(&self) -> Option<&SectionEntry> {
        self.active_id
            .as_deref()
            .and_then(|id| self.registry.find(id))
    }

    #[must_use]
    /// The registry snapshot currently observed.
    pub fn registry(&self) -> &Rc<Registry> {
        &self.registry
    }

    #[must_use]
    /// The observed surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the observed surface, for user scrolling and layout updates.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    /// Ids with a live observation, in observation order.
    pub fn observed_ids(&self) -> Vec<&str> {
        self.observer.observed_ids()
    }

    /// Signals that the surface has mounted every element; starts observing.
    ///
    /// Ids whose element cannot be resolved are skipped. Calling this outside the
    /// `Uninitialized` phase does nothing.
    pub fn mount(&mut self) {
        if self.phase != Phase::Uninitialized {
            return;
        }
        self.subscribe_all();
        self.phase = Phase::Observing;
        info!(
            observed = self.observer.len(),
            registered = self.registry.len(),
            "tracker observing"
        );
    }

    /// Supplies a registry snapshot, re-arming observations if it is a different one.
    ///
    /// The same `Rc` is ignored. While observing, every prior observation is dropped before the
    /// new ids are observed. Before mount the snapshot is swapped and nothing else happens.
    pub fn set_registry(&mut self, registry: Rc<Registry>) {
        if Rc::ptr_eq(&self.registry, &registry) || self.phase == Phase::Disposed {
            return;
        }
        self.registry = registry;
        if self.phase == Phase::Observing {
            self.observer.disconnect();
            self.subscribe_all();
            info!(observed = self.observer.len(), "tracker re-armed");
        }
    }

    /// Stops observing for good. Safe to call repeatedly and before mount.
    pub fn dispose(&mut self) {
        self.observer.disconnect();
        if self.phase != Phase::Disposed {
            debug!(from = ?self.phase, "tracker disposed");
            self.phase = Phase::Disposed;
        }
    }

    /// Applies a visibility batch. Returns whether the active id changed.
    ///
    /// Every intersecting entry for a known id overwrites the active id, so the last one in the
    /// batch wins. Entries for ids outside the current registry are ignored.
    pub fn handle_batch(&mut self, entries: &[VisibilityEntry]) -> bool {
        if self.phase != Phase::Observing {
            return false;
        }
        let before = self.active_id.clone();
        for entry in entries {
            if entry.is_intersecting && self.registry.contains(&entry.id) {
                self.active_id = Some(entry.id.clone());
            }
        }
        let changed = before != self.active_id;
        if changed {
            debug!(active = ?self.active_id, "active section changed");
        }
        changed
    }

    /// Measures the surface and applies whatever batch results. Returns whether the active id
    /// changed.
    pub fn poll(&mut self) -> bool {
        if self.phase != Phase::Observing {
            return false;
        }
        let records = self.observer.take_records(&self.surface);
        if records.is_empty() {
            return false;
        }
        self.handle_batch(&records)
    }

    /// Scrolls to the element for `id` and then runs `on_navigate`.
    ///
    /// Unknown or unmounted ids do nothing and return `false`. The active id is left alone; the
    /// scroll is expected to produce a visibility batch that updates it.
    pub fn navigate_to(
        &mut self,
        id: &str,
        options: ScrollOptions,
        on_navigate: Option<&mut dyn FnMut(&str)>,
    ) -> bool {
        if self.phase == Phase::Disposed {
            return false;
        }
        let Some(element) = self.surface.resolve(id) else {
            debug!(id, "navigation target not mounted");
            return false;
        };
        self.surface.scroll_into_view(&element, options);
        info!(id, "navigating");
        if let Some(callback) = on_navigate {
            callback(id);
        }
        true
    }

    fn subscribe_all(&mut self) {
        for id in self.registry.flatten() {
            match self.surface.resolve(id) {
                Some(element) => self.observer.observe(id, element),
                None => debug!(id, "no element for registered id"),
            }
        }
    }
}

impl<S: Surface> Drop for ActiveSectionTracker<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
#[path = "tests/tracker.rs"]
mod tests;
