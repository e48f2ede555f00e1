//! Syntax highlighting for fenced code blocks.
//!
//! Highlighting runs once per load, so the reader pane only copies coloured segments at draw time.

use crate::document::Segment;
use ratatui::style::Color;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use tracing::warn;

const THEME: &str = "base16-ocean.dark";

/// Highlights code lines with syntect's bundled syntaxes and theme.
pub struct CodeHighlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl Default for CodeHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeHighlighter {
    #[must_use]
    /// Loads the default syntax set and theme.
    pub fn new() -> Self {
        let mut themes = ThemeSet::load_defaults();
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme: themes.themes.remove(THEME).unwrap_or_default(),
        }
    }

    #[must_use]
    /// Highlights one block. Unknown languages fall back to plain text.
    pub fn highlight(&self, language: Option<&str>, lines: &[&str]) -> Vec<Vec<Segment>> {
        let syntax = language
            .and_then(|token| self.syntaxes.find_syntax_by_token(token))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        lines
            .iter()
            .map(|line| {
                let with_newline = format!("{line}\n");
                match highlighter.highlight_line(&with_newline, &self.syntaxes) {
                    Ok(ranges) => ranges
                        .into_iter()
                        .map(|(style, text)| {
                            let fg = style.foreground;
                            Segment::colored(
                                text.trim_end_matches('\n'),
                                Color::Rgb(fg.r, fg.g, fg.b),
                            )
                        })
                        .filter(|segment| !segment.text.is_empty())
                        .collect(),
                    Err(e) => {
                        warn!(error = %e, "highlighting failed");
                        vec![Segment::plain(*line)]
                    }
                }
            })
            .collect()
    }
}
