// File: crates/termcandle-core/src/bar.rs
// Summary: OHLC bar model with derived body/wick bounds and a per-row glyph buffer.

use chrono::{DateTime, Utc};

use crate::error::{ChartError, Result};
use crate::glyph::GlyphCategory;

/// Candle direction; bearish iff `open > close`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Bullish,
    Bearish,
}

/// A complete OHLC sample. Only produced for bars that satisfy
/// `low <= min(open, close) <= max(open, close) <= high` with finite values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ohlc {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Ohlc {
    pub const fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self { open, high, low, close }
    }

    /// Check finiteness and the OHLC ordering invariant.
    pub fn check(&self) -> std::result::Result<(), &'static str> {
        let Self { open, high, low, close } = *self;
        if !(open.is_finite() && high.is_finite() && low.is_finite() && close.is_finite()) {
            return Err("non-finite price");
        }
        if low > open.min(close) { return Err("low above min(open,close)"); }
        if high < open.max(close) { return Err("high below max(open,close)"); }
        Ok(())
    }

    #[inline] pub fn body_top(&self) -> f64 { self.open.max(self.close) }
    #[inline] pub fn body_bottom(&self) -> f64 { self.open.min(self.close) }
    #[inline] pub fn wick_top(&self) -> f64 { self.high }
    #[inline] pub fn wick_bottom(&self) -> f64 { self.low }
    #[inline] pub fn body_height(&self) -> f64 { self.body_top() - self.body_bottom() }
    #[inline] pub fn top_wick_len(&self) -> f64 { self.high - self.body_top() }
    #[inline] pub fn bottom_wick_len(&self) -> f64 { self.body_bottom() - self.low }
    #[inline] pub fn midpoint(&self) -> f64 { (self.high + self.low) * 0.5 }

    pub fn is_bearish(&self) -> bool { self.open > self.close }

    pub fn direction(&self) -> Direction {
        if self.is_bearish() { Direction::Bearish } else { Direction::Bullish }
    }
}

/// One candlestick plus the glyphs it occupies in the current grid, top row first.
///
/// Fields are optional so that incomplete samples from a feed can still be
/// placed on the time axis; such bars are invalid and render empty.
#[derive(Clone, Debug)]
pub struct Bar {
    /// Epoch milliseconds.
    pub timestamp: i64,
    open: Option<f64>,
    high: Option<f64>,
    low: Option<f64>,
    close: Option<f64>,
    glyphs: Vec<GlyphCategory>,
    allocations: usize,
}

impl Bar {
    /// Build a bar without checking the OHLC invariant; see [`Bar::is_valid`].
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self::from_partial(timestamp, Some(open), Some(high), Some(low), Some(close))
    }

    /// Build a bar, rejecting samples that violate the OHLC invariant.
    pub fn try_new(timestamp: i64, open: f64, high: f64, low: f64, close: f64) -> Result<Self> {
        Ohlc::new(open, high, low, close)
            .check()
            .map_err(|reason| ChartError::InvalidBar { timestamp, reason })?;
        Ok(Self::new(timestamp, open, high, low, close))
    }

    /// Build a bar from a sample that may be missing fields.
    pub fn from_partial(
        timestamp: i64,
        open: Option<f64>,
        high: Option<f64>,
        low: Option<f64>,
        close: Option<f64>,
    ) -> Self {
        Self { timestamp, open, high, low, close, glyphs: Vec::new(), allocations: 0 }
    }

    pub fn open(&self) -> Option<f64> { self.open }
    pub fn high(&self) -> Option<f64> { self.high }
    pub fn low(&self) -> Option<f64> { self.low }
    pub fn close(&self) -> Option<f64> { self.close }

    /// The complete sample, or `None` when a field is missing or the invariant is broken.
    pub fn ohlc(&self) -> Option<Ohlc> {
        let ohlc = Ohlc::new(self.open?, self.high?, self.low?, self.close?);
        ohlc.check().ok().map(|_| ohlc)
    }

    pub fn is_valid(&self) -> bool { self.ohlc().is_some() }

    pub fn body_top(&self) -> Option<f64> { self.ohlc().map(|o| o.body_top()) }
    pub fn body_bottom(&self) -> Option<f64> { self.ohlc().map(|o| o.body_bottom()) }
    pub fn wick_top(&self) -> Option<f64> { self.ohlc().map(|o| o.wick_top()) }
    pub fn wick_bottom(&self) -> Option<f64> { self.ohlc().map(|o| o.wick_bottom()) }

    /// `open > close`; false when either is missing.
    pub fn is_bearish(&self) -> bool {
        matches!((self.open, self.close), (Some(o), Some(c)) if o > c)
    }

    pub fn is_bullish(&self) -> bool { !self.is_bearish() }

    pub fn direction(&self) -> Direction {
        if self.is_bearish() { Direction::Bearish } else { Direction::Bullish }
    }

    /// Timestamp as a UTC date, if it is in chrono's representable range.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp)
    }

    // ---- glyph buffer --------------------------------------------------------

    /// Reallocate the buffer to `rows` cells, all empty.
    pub fn resize_glyph_buffer(&mut self, rows: usize) {
        self.glyphs = vec![GlyphCategory::Empty; rows];
        self.allocations += 1;
    }

    /// Reset every cell to empty without reallocating.
    pub fn clear_glyph_buffer(&mut self) {
        self.glyphs.fill(GlyphCategory::Empty);
    }

    /// Write one cell; out-of-range rows are ignored.
    pub fn set_glyph(&mut self, row: usize, glyph: GlyphCategory) {
        if let Some(slot) = self.glyphs.get_mut(row) {
            *slot = glyph;
        }
    }

    pub fn glyph(&self, row: usize) -> GlyphCategory {
        self.glyphs.get(row).copied().unwrap_or(GlyphCategory::Empty)
    }

    pub fn glyphs(&self) -> &[GlyphCategory] { &self.glyphs }

    /// How many times the buffer has been reallocated.
    pub fn buffer_allocations(&self) -> usize { self.allocations }
}

impl From<Ohlc> for Bar {
    fn from(o: Ohlc) -> Self {
        Bar::new(0, o.open, o.high, o.low, o.close)
    }
}
