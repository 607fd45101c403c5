// File: crates/termcandle-core/src/geometry.rs
// Summary: Row/price mapping and the symmetric price band ("cube") around a row price.

use std::str::FromStr;

use crate::bar::Ohlc;

/// How far a row's cube reaches above and below the row price.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CubeExtent {
    /// `±increment`: each cube spans two rows and overlaps its neighbours by one increment.
    #[default]
    Overlapping,
    /// `±0.5×increment`: cubes tile the price axis exactly.
    Tiling,
}

impl CubeExtent {
    pub const fn half_span_factor(self) -> f64 {
        match self {
            CubeExtent::Overlapping => 1.0,
            CubeExtent::Tiling => 0.5,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            CubeExtent::Overlapping => "overlapping",
            CubeExtent::Tiling => "tiling",
        }
    }
}

impl FromStr for CubeExtent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overlapping" | "overlap" => Ok(CubeExtent::Overlapping),
            "tiling" | "tile" => Ok(CubeExtent::Tiling),
            other => Err(format!("expected `overlapping` or `tiling`, got `{other}`")),
        }
    }
}

/// Cube helpers for a fixed price increment.
///
/// `unit()` is the half-height of a cube; the classifier expresses all of its
/// thresholds in this unit, so with [`CubeExtent::Overlapping`] they read as
/// multiples of the price increment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeGeometry {
    increment: f64,
    half_span: f64,
}

impl CubeGeometry {
    pub fn new(increment: f64, extent: CubeExtent) -> Self {
        Self { increment, half_span: increment * extent.half_span_factor() }
    }

    #[inline] pub fn increment(&self) -> f64 { self.increment }
    #[inline] pub fn unit(&self) -> f64 { self.half_span }
    #[inline] pub fn cube_top(&self, ppq: f64) -> f64 { ppq + self.half_span }
    #[inline] pub fn cube_bottom(&self, ppq: f64) -> f64 { ppq - self.half_span }

    /// Inclusive on both edges.
    #[inline]
    pub fn is_within_cube(&self, ppq: f64, value: f64) -> bool {
        self.cube_bottom(ppq) <= value && value <= self.cube_top(ppq)
    }

    pub fn has_any_ohlc_within_cube(&self, ppq: f64, o: &Ohlc) -> bool {
        [o.open, o.high, o.low, o.close].iter().any(|&v| self.is_within_cube(ppq, v))
    }

    /// Both `high` and `low` lie inside the cube.
    pub fn is_fully_contained_within_cube(&self, ppq: f64, o: &Ohlc) -> bool {
        self.is_within_cube(ppq, o.high) && self.is_within_cube(ppq, o.low)
    }
}

/// Vertical scale of the grid: row 0 is the top (highest price).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowScale {
    pub rows: usize,
    pub increment: f64,
    pub lowest: f64,
}

impl RowScale {
    /// Derive the increment from the visible range, padded by one price unit on each side.
    ///
    /// Returns `None` when the layout cannot produce finite prices (no rows, or a
    /// non-finite range such as the one left by an empty window).
    pub fn fit(lowest: f64, highest: f64, rows: usize) -> Option<Self> {
        if rows == 0 || !lowest.is_finite() || !highest.is_finite() || highest < lowest {
            return None;
        }
        let increment = ((highest + 1.0) - (lowest - 1.0)) / rows as f64;
        if !increment.is_finite() || increment <= 0.0 {
            return None;
        }
        Some(Self { rows, increment, lowest })
    }

    /// `price(row) = (rows - row) * increment + lowest`.
    #[inline]
    pub fn price(&self, row: usize) -> f64 {
        (self.rows as f64 - row as f64) * self.increment + self.lowest
    }

    /// Number of grid lines; the bottom line sits exactly at `lowest`.
    #[inline]
    pub fn lines(&self) -> usize { self.rows + 1 }
}
