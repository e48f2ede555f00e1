//! The section registry: a validated, read-only snapshot of a guide's navigable structure.
//!
//! A registry is built once per content load and never patched. Content reloads build a new one
//! and hand it to the tracker, which uses the change of `Rc` identity to decide when to re-arm.

use crate::error::RegistryError;
use crate::section::SectionEntry;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
/// Ordered top-level sections with their subsections.
pub struct Registry {
    sections: Vec<SectionEntry>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// One row of the flattened table of contents.
pub struct NavEntry<'a> {
    /// Section id.
    pub id: &'a str,
    /// Display label.
    pub title: &'a str,
    /// 0 for top-level sections, 1 for subsections.
    pub depth: usize,
    /// 1-based display number for top-level sections.
    pub number: Option<usize>,
}

impl Registry {
    /// Validates and wraps the given sections.
    ///
    /// # Errors
    ///
    /// Returns an error if any id repeats, any id or title is empty, or a subsection has
    /// subsections of its own.
    pub fn new(sections: Vec<SectionEntry>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for section in &sections {
            Self::check_entry(section, &mut seen)?;
            for sub in &section.subsections {
                Self::check_entry(sub, &mut seen)?;
                if !sub.subsections.is_empty() {
                    return Err(RegistryError::TooDeep { id: sub.id.clone() });
                }
            }
        }
        Ok(Self { sections })
    }

    fn check_entry<'a>(
        entry: &'a SectionEntry,
        seen: &mut HashSet<&'a str>,
    ) -> Result<(), RegistryError> {
        if entry.id.is_empty() {
            return Err(RegistryError::EmptyId {
                title: entry.title.clone(),
            });
        }
        if entry.title.trim().is_empty() {
            return Err(RegistryError::EmptyTitle {
                id: entry.id.clone(),
            });
        }
        if !seen.insert(entry.id.as_str()) {
            return Err(RegistryError::DuplicateId {
                id: entry.id.clone(),
            });
        }
        Ok(())
    }

    #[must_use]
    /// Top-level sections in display order.
    pub fn sections(&self) -> &[SectionEntry] {
        &self.sections
    }

    #[must_use]
    /// True when the registry holds no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    #[must_use]
    /// Every id in navigation order: each top-level id followed by its subsections' ids.
    pub fn flatten(&self) -> Vec<&str> {
        self.entries().map(|entry| entry.id).collect()
    }

    /// Flattened rows for rendering, in the same order as [`Registry::flatten`].
    pub fn entries(&self) -> impl Iterator<Item = NavEntry<'_>> {
        self.sections
            .iter()
            .enumerate()
            .flat_map(|(index, section)| {
                std::iter::once(NavEntry {
                    id: &section.id,
                    title: &section.title,
                    depth: 0,
                    number: Some(index + 1),
                })
                .chain(section.subsections.iter().map(|sub| NavEntry {
                    id: &sub.id,
                    title: &sub.title,
                    depth: 1,
                    number: None,
                }))
            })
    }

    #[must_use]
    /// Looks up an entry by id. Stale ids simply yield `None`.
    pub fn find(&self, id: &str) -> Option<&SectionEntry> {
        self.sections.iter().find_map(|section| {
            if section.id == id {
                Some(section)
            } else {
                section.subsections.iter().find(|sub| sub.id == id)
            }
        })
    }

    #[must_use]
    /// Nesting depth of an id: 0 for top-level, 1 for subsections.
    pub fn depth(&self, id: &str) -> Option<usize> {
        self.entries()
            .find(|entry| entry.id == id)
            .map(|entry| entry.depth)
    }

    #[must_use]
    /// Whether the id belongs to this registry.
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    #[must_use]
    /// Position of an id in [`Registry::flatten`] order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries().position(|entry| entry.id == id)
    }

    #[must_use]
    /// Number of navigable entries across both levels.
    pub fn len(&self) -> usize {
        self.entries().count()
    }
}

#[cfg(test)]
#[path = "tests/registry.rs"]
mod tests;
