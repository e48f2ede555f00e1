//! Error types for guide loading and configuration.
//!
//! The tracker itself never fails: missing elements and stale ids degrade to "no highlight".
//! Everything that can fail happens before the tracker is built, while turning text into a
//! registry and a laid-out document.

use std::io;

/// Violations of the registry invariants detected at construction time.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two entries, top-level or nested, share an id.
    #[error("duplicate section id '{id}'")]
    DuplicateId {
        /// The id seen twice.
        id: String,
    },

    /// An entry has an empty id.
    #[error("section titled '{title}' has an empty id")]
    EmptyId {
        /// Title of the offending entry.
        title: String,
    },

    /// An entry has an empty title.
    #[error("section '{id}' has an empty title")]
    EmptyTitle {
        /// Id of the offending entry.
        id: String,
    },

    /// A subsection carries subsections of its own.
    #[error("subsection '{id}' is nested more than one level deep")]
    TooDeep {
        /// Id of the subsection holding the extra level.
        id: String,
    },
}

/// Failures while reading or parsing guide content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The guide file could not be read.
    #[error("failed to read guide: {0}")]
    Io(#[from] io::Error),

    /// The markdown grammar could not be loaded into the parser.
    #[error("markdown grammar rejected: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// A format query failed to compile.
    #[error("invalid query: {0}")]
    Query(#[from] tree_sitter::QueryError),

    /// The parser produced no tree.
    #[error("markdown parse produced no tree")]
    Parse,

    /// The headings do not form a valid registry.
    #[error("invalid section structure: {0}")]
    Registry(#[from] RegistryError),
}

/// Failures while loading `guidepost.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    /// The config file is not valid TOML for [`crate::config::Config`].
    #[error("failed to parse config: {reason}")]
    Parse {
        /// Parser message.
        reason: String,
    },
}

/// Top-level error for the binary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Guide content could not be loaded.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// A config file named on the command line could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Terminal or file I/O failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Table of contents could not be serialised.
    #[error("failed to serialise table of contents: {0}")]
    Json(#[from] serde_json::Error),

    /// Logging could not be initialised.
    #[error("failed to initialise logging: {reason}")]
    Logging {
        /// Subscriber or filter message.
        reason: String,
    },
}
