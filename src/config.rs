//! Configuration to acknowledge reader preferences as well as set defaults.
//!
//! We look for a guidepost.toml in the working directory and load settings from it if present.
//! Every field has a default, so a partial file only overrides what it names.

use crate::error::ConfigError;
use crate::observer::VisibilityBand;
use crate::viewport::Alignment;
use facet::Facet;
use std::fs;
use std::io;
use std::path::Path;
use tracing::warn;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = "guidepost.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// Reader preferences loaded from guidepost.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 88)]
    /// Maximum width of wrapped body text.
    pub wrap_width: usize,
    #[facet(default = 36)]
    /// Width of the table of contents sidebar.
    pub toc_width: u16,
    #[facet(default = 100)]
    /// Terminals narrower than this show the table of contents as an overlay.
    pub narrow_width: u16,
    #[facet(default = 20)]
    /// Share of the viewport, from the top, that never activates a section.
    pub band_top_percent: u16,
    #[facet(default = 35)]
    /// Share of the viewport, from the bottom, that never activates a section.
    pub band_bottom_percent: u16,
    #[facet(default = true)]
    /// Animate navigation instead of jumping.
    pub smooth_scroll: bool,
    #[facet(default = "start".to_string())]
    /// Where navigation lands a section: `start`, `center` or `end` of the viewport.
    pub scroll_align: String,
    #[facet(default = true)]
    /// Show a line-number gutter beside code blocks.
    pub line_numbers: bool,
    #[facet(default = 16)]
    /// Event-loop tick while animating, in milliseconds.
    pub tick_millis: u64,
    #[facet(default = "info".to_string())]
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wrap_width: 88,
            toc_width: 36,
            narrow_width: 100,
            band_top_percent: 20,
            band_bottom_percent: 35,
            smooth_scroll: true,
            scroll_align: "start".to_string(),
            line_numbers: true,
            tick_millis: 16,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match Self::load_required(path) {
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            result => result,
        }
    }

    /// Load configuration from a file that must exist, such as one named on the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or not valid TOML for this struct.
    pub fn load_required(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this struct.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        facet_toml::from_str::<Self>(contents).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })
    }

    #[must_use]
    /// The visibility band described by the two margin settings.
    pub fn band(&self) -> VisibilityBand {
        VisibilityBand {
            top_percent: self.band_top_percent,
            bottom_percent: self.band_bottom_percent,
        }
    }

    #[must_use]
    /// Navigation alignment named by `scroll_align`. Unknown names fall back to the start edge.
    pub fn alignment(&self) -> Alignment {
        Alignment::from_name(&self.scroll_align).unwrap_or_else(|| {
            warn!(value = %self.scroll_align, "unknown scroll_align, using start");
            Alignment::Start
        })
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
