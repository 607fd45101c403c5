// File: crates/termcandle-core/src/theme.rs
// Summary: Colorizer hook applied to classified cells, with ANSI theme presets.

use crate::bar::Direction;
use crate::error::{ChartError, Result};
use crate::glyph::GlyphCategory;

const CSI: &str = "\x1b[";
const RESET: &str = "\x1b[0m";

/// Turns a classified cell into display text. Implementations must only wrap
/// the glyph's symbol; the grid relies on one glyph per cell.
pub trait Colorize {
    fn paint(&self, glyph: GlyphCategory, direction: Direction) -> String;
}

/// Bare glyphs, no styling.
#[derive(Clone, Copy, Debug, Default)]
pub struct Plain;

impl Colorize for Plain {
    fn paint(&self, glyph: GlyphCategory, _direction: Direction) -> String {
        glyph.symbol().to_string()
    }
}

/// SGR parameter lists (the part between `ESC[` and `m`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub bullish: Option<&'static str>,
    pub bearish: Option<&'static str>,
    /// Extra attributes for body glyphs.
    pub body: Option<&'static str>,
    /// Background for too-granular leftovers and short bottom wicks.
    pub highlight: Option<&'static str>,
}

impl Theme {
    pub const fn standard() -> Self {
        Self { name: "default", bullish: Some("32"), bearish: Some("31"), body: None, highlight: None }
    }

    pub const fn bold() -> Self {
        Self { name: "bold", bullish: Some("32"), bearish: Some("31"), body: Some("1"), highlight: None }
    }

    /// Makes leftover cells stand out while tuning the classifier.
    pub const fn debug() -> Self {
        Self { name: "debug", bullish: Some("32"), bearish: Some("31"), body: None, highlight: Some("44") }
    }

    pub const fn monochrome() -> Self {
        Self { name: "monochrome", bullish: None, bearish: None, body: None, highlight: None }
    }

    fn highlighted(glyph: GlyphCategory) -> bool {
        matches!(glyph, GlyphCategory::Unclassified(_) | GlyphCategory::ShortBottomWick)
    }
}

impl Default for Theme {
    fn default() -> Self { Theme::standard() }
}

impl Colorize for Theme {
    fn paint(&self, glyph: GlyphCategory, direction: Direction) -> String {
        if glyph.is_empty() {
            return glyph.symbol().to_string();
        }
        let color = match direction {
            Direction::Bullish => self.bullish,
            Direction::Bearish => self.bearish,
        };
        let body = if glyph.is_body() { self.body } else { None };
        let highlight = if Self::highlighted(glyph) { self.highlight } else { None };
        let params: Vec<&str> = [body, color, highlight].into_iter().flatten().collect();
        if params.is_empty() {
            return glyph.symbol().to_string();
        }
        format!("{CSI}{}m{}{RESET}", params.join(";"), glyph.symbol())
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::standard(), Theme::bold(), Theme::debug(), Theme::monochrome()]
}

/// Find a theme by its `name`.
pub fn find(name: &str) -> Result<Theme> {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
        .ok_or_else(|| ChartError::UnknownTheme(name.to_string()))
}
