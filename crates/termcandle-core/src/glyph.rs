// File: crates/termcandle-core/src/glyph.rs
// Summary: Glyph categories produced by the cube classifier and their box-drawing symbols.

pub const FULL_WICK: char = '│';
pub const HALF_WICK_TOP: char = '╷';
pub const HALF_WICK_BOTTOM: char = '╵';
pub const BODY_TO_WICK_TOP: char = '╽';
pub const BODY_TO_WICK_BOTTOM: char = '╿';
pub const HALF_BODY_TOP: char = '╻';
pub const HALF_BODY_BOTTOM: char = '╹';
pub const FULL_BODY: char = '┃';
pub const STAR_DOJI: char = '┿';
pub const GRAVESTONE_DOJI: char = '┷';
pub const DRAGONFLY_DOJI: char = '┯';
pub const NO_MOVEMENT: char = '⚠';
pub const TOO_GRANULAR_TOP: char = '╵';
pub const TOO_GRANULAR_BOTTOM: char = '╷';
pub const EMPTY: char = ' ';
pub const ROW_SEPARATOR: char = '├';

/// Which half of a cell a leftover mark is drawn in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Half {
    Upper,
    Lower,
}

/// Shape of one bar within one row's price cube.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlyphCategory {
    StarDoji,
    GravestoneDoji,
    DragonflyDoji,
    NoMovement,
    ShortTopWick,
    TopWick,
    ShortBottomWick,
    BottomWick,
    FullWick,
    ShortBodyTop,
    ShortBodyBottom,
    FullBody,
    /// Bar data sits in the cube but no shape matched; drawn as a too-granular mark.
    Unclassified(Half),
    Empty,
}

impl GlyphCategory {
    pub const fn symbol(self) -> char {
        match self {
            GlyphCategory::StarDoji => STAR_DOJI,
            GlyphCategory::GravestoneDoji => GRAVESTONE_DOJI,
            GlyphCategory::DragonflyDoji => DRAGONFLY_DOJI,
            GlyphCategory::NoMovement => NO_MOVEMENT,
            GlyphCategory::ShortTopWick => HALF_WICK_TOP,
            GlyphCategory::TopWick => BODY_TO_WICK_TOP,
            GlyphCategory::ShortBottomWick => HALF_WICK_BOTTOM,
            GlyphCategory::BottomWick => BODY_TO_WICK_BOTTOM,
            GlyphCategory::FullWick => FULL_WICK,
            GlyphCategory::ShortBodyTop => HALF_BODY_TOP,
            GlyphCategory::ShortBodyBottom => HALF_BODY_BOTTOM,
            GlyphCategory::FullBody => FULL_BODY,
            GlyphCategory::Unclassified(Half::Upper) => TOO_GRANULAR_TOP,
            GlyphCategory::Unclassified(Half::Lower) => TOO_GRANULAR_BOTTOM,
            GlyphCategory::Empty => EMPTY,
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, GlyphCategory::Empty)
    }

    pub const fn is_doji(self) -> bool {
        matches!(
            self,
            GlyphCategory::StarDoji | GlyphCategory::GravestoneDoji | GlyphCategory::DragonflyDoji
        )
    }

    /// Body glyphs are drawn thick; themes may brighten them.
    pub const fn is_body(self) -> bool {
        matches!(
            self,
            GlyphCategory::FullBody
                | GlyphCategory::ShortBodyTop
                | GlyphCategory::ShortBodyBottom
                | GlyphCategory::TopWick
                | GlyphCategory::BottomWick
        )
    }
}

impl Default for GlyphCategory {
    fn default() -> Self { GlyphCategory::Empty }
}

impl std::fmt::Display for GlyphCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
