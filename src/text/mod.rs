//! Text normalization pipeline
//!
//! Turns fetched HTML (and HTML-ish snippets) into plain text that is worth
//! keeping: markup is rendered away, long runs of text outside the target
//! script are dropped and short navigation-style lines are filtered out.

mod filters;
mod html;

pub use filters::{remove_foreign_runs, remove_short_lines, ScriptClass};
pub use html::{defuse_markup, html_to_text, looks_like_markup, strip_tags, PlainTextDecorator};

use crate::config::NormalizerSettings;
use once_cell::sync::Lazy;

/// Normalizer built from the default settings
static DEFAULT: Lazy<Normalizer> = Lazy::new(Normalizer::default);

/// Normalize raw HTML with the default configuration
pub fn normalize(raw_html: &str) -> String {
    DEFAULT.normalize(raw_html)
}

/// Configured text normalization pipeline
#[derive(Debug, Clone)]
pub struct Normalizer {
    script: ScriptClass,
    min_foreign_run: usize,
    min_line_len: usize,
    render_width: usize,
}

impl Normalizer {
    /// Build a normalizer from settings
    pub fn new(settings: &NormalizerSettings) -> Result<Self, regex::Error> {
        let script = ScriptClass::new(&settings.script_ranges, settings.min_foreign_run)?;

        Ok(Self {
            script,
            min_foreign_run: settings.min_foreign_run,
            min_line_len: settings.min_line_len,
            render_width: settings.render_width.max(20),
        })
    }

    /// Run the full pipeline: HTML to text, foreign runs, short lines
    ///
    /// Input without tags or character references is already plain text and
    /// skips the renderer, so line breaks in it are kept. The filters are
    /// repeated until nothing changes. Dropping a short line can join two
    /// foreign runs, and the output must be a fixed point of `normalize`.
    pub fn normalize(&self, raw_html: &str) -> String {
        let mut text = if looks_like_markup(raw_html) {
            html_to_text(raw_html, self.render_width)
        } else {
            raw_html.to_string()
        };

        loop {
            let filtered = defuse_markup(&text);
            let filtered = self.script.remove_long_runs(&filtered);
            let filtered = remove_short_lines(&filtered, self.min_line_len);
            if filtered == text {
                return filtered;
            }
            text = filtered;
        }
    }

    /// Longest run of foreign-script characters that is kept
    pub fn min_foreign_run(&self) -> usize {
        self.min_foreign_run
    }

    /// Minimum trimmed line length that is kept
    pub fn min_line_len(&self) -> usize {
        self.min_line_len
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(&NormalizerSettings::default()).expect("Default script class must compile")
    }
}
