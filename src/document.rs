//! The laid-out guide: display lines plus one anchor per navigable heading.
//!
//! Anchors are the elements the tracker resolves and measures. A top-level anchor covers its
//! heading through the end of its last subsection, a subsection anchor covers its heading up to
//! the next navigable heading. This mirrors a page where each section element wraps its
//! subsections.

use ratatui::style::Color;
use std::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Flavour of a callout block.
pub enum CalloutKind {
    /// Neutral information.
    Note,
    /// Helpful advice.
    Tip,
    /// Key information.
    Important,
    /// Risky behaviour.
    Warning,
    /// Dangerous behaviour.
    Caution,
    /// Good practice or a positive outcome.
    Success,
}

impl CalloutKind {
    #[must_use]
    /// Parses the opening line of a GitHub-style alert, such as `[!WARNING] Critical Impact`.
    ///
    /// Text after the marker becomes the callout's title.
    pub fn parse_opener(line: &str) -> Option<(Self, Option<String>)> {
        let (name, rest) = line.trim().strip_prefix("[!")?.split_once(']')?;
        let kind = match name.to_ascii_uppercase().as_str() {
            "NOTE" | "INFO" => Self::Note,
            "TIP" => Self::Tip,
            "IMPORTANT" => Self::Important,
            "WARNING" => Self::Warning,
            "CAUTION" | "DANGER" => Self::Caution,
            "SUCCESS" | "CHECK" => Self::Success,
            _ => return None,
        };
        let title = rest.trim();
        Some((kind, (!title.is_empty()).then(|| title.to_string())))
    }

    #[must_use]
    /// Label shown on the first line of the callout.
    pub fn label(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::Tip => "Tip",
            Self::Important => "Important",
            Self::Warning => "Warning",
            Self::Caution => "Caution",
            Self::Success => "Success",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What a display line renders.
pub enum LineKind {
    /// Document title.
    Title,
    /// Section heading; depth 0 and 1 are navigable.
    Heading {
        /// 0 for sections, 1 for subsections, 2 for deeper headings.
        depth: usize,
        /// Display number of top-level sections.
        number: Option<usize>,
    },
    /// Paragraph or list text.
    Body,
    /// Label line opening a callout, with its title if one was given.
    CalloutLabel(CalloutKind),
    /// Text inside a callout.
    Callout(CalloutKind),
    /// Language badge and file name above a code block.
    CodeHeader,
    /// A line of a fenced code block.
    Code {
        /// 1-based line number within the block.
        number: usize,
    },
    /// Empty line.
    Blank,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A run of text with an optional foreground colour.
pub struct Segment {
    /// The text.
    pub text: String,
    /// Foreground colour, if highlighting assigned one.
    pub color: Option<Color>,
}

impl Segment {
    #[must_use]
    /// Uncoloured text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    #[must_use]
    /// Coloured text.
    pub fn colored(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One row of the laid-out guide.
pub struct DocLine {
    /// How the row renders.
    pub kind: LineKind,
    /// Text runs making up the row.
    pub segments: Vec<Segment>,
}

impl DocLine {
    #[must_use]
    /// A row made of a single uncoloured run.
    pub fn plain(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            segments: vec![Segment::plain(text)],
        }
    }

    #[must_use]
    /// An empty row.
    pub fn blank() -> Self {
        Self {
            kind: LineKind::Blank,
            segments: Vec::new(),
        }
    }

    #[must_use]
    /// Concatenated text of every segment.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Row span of a navigable heading's section.
pub struct Anchor {
    /// Section id.
    pub id: String,
    /// Rows covered, heading first.
    pub rows: Range<usize>,
    /// 0 for sections, 1 for subsections.
    pub depth: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// A guide laid out into display rows.
pub struct Document {
    /// Text of the first level-one heading.
    pub title: Option<String>,
    /// Display rows in order.
    pub lines: Vec<DocLine>,
    anchors: Vec<Anchor>,
}

impl Document {
    /// Builds a document, closing each anchor at the row where its section ends.
    ///
    /// `starts` holds `(id, heading row, depth)` for each navigable heading in row order.
    #[must_use]
    pub fn new(title: Option<String>, lines: Vec<DocLine>, starts: Vec<(String, usize, usize)>) -> Self {
        let total = lines.len();
        let anchors = starts
            .iter()
            .enumerate()
            .map(|(i, (id, start, depth))| {
                let end = starts[i + 1..]
                    .iter()
                    .find(|(_, _, next_depth)| *depth > 0 || *next_depth == 0)
                    .map_or(total, |(_, next_start, _)| *next_start);
                Anchor {
                    id: id.clone(),
                    rows: *start..end.max(start + 1),
                    depth: *depth,
                }
            })
            .collect();
        Self {
            title,
            lines,
            anchors,
        }
    }

    #[must_use]
    /// Anchor for an id, if the heading was laid out.
    pub fn anchor(&self, id: &str) -> Option<&Anchor> {
        self.anchors.iter().find(|anchor| anchor.id == id)
    }

    #[must_use]
    /// Number of display rows.
    pub fn height(&self) -> usize {
        self.lines.len()
    }
}
