//! Section entries describing the navigable structure of a guide.
//!
//! An entry is a heading the reader can jump to. Entries nest exactly one level: top-level
//! sections may hold subsections, subsections hold nothing. The id is the join key between the
//! registry, the laid-out document and the visibility observer, so it must be unique across the
//! whole registry.

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Navigable heading with a stable id and its ordered subsections.
pub struct SectionEntry {
    /// Stable identifier, unique across the registry.
    pub id: String,
    /// Display label shown in the table of contents.
    pub title: String,
    /// Ordered subsections (empty for leaves and for subsections themselves).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<SectionEntry>,
}

impl SectionEntry {
    #[must_use]
    /// Creates an entry without subsections.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subsections: Vec::new(),
        }
    }

    #[must_use]
    /// Creates an entry holding the given subsections.
    pub fn with_subsections(
        id: impl Into<String>,
        title: impl Into<String>,
        subsections: Vec<SectionEntry>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subsections,
        }
    }
}
