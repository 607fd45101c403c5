// File: crates/termcandle-core/src/types.rs
// Summary: Shared types and constants (terminal sizes, layout paddings).

/// Rows reserved around the grid for the status line and the shell prompt.
pub const DEFAULT_VERTICAL_PADDING: usize = 5;
/// Columns reserved on the left for the price labels and the axis glyph.
pub const DEFAULT_LEFT_AXIS_WIDTH: usize = 10;
/// Decimal places printed on each price label.
pub const DEFAULT_LABEL_PRECISION: usize = 2;

/// Fallback used when a terminal reports a zero-sized window.
pub const FALLBACK_ROWS: usize = 24;
/// Fallback used when a terminal reports a zero-sized window.
pub const FALLBACK_COLS: usize = 80;

/// A `{rows, cols}` pair in character cells.
///
/// Used both for the live terminal size handed in by a size provider and for
/// the layout the chart last computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TermSize {
    pub rows: usize,
    pub cols: usize,
}

impl TermSize {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Replace zero dimensions by the 80x24 fallback.
    pub fn or_fallback(self) -> Self {
        Self {
            rows: if self.rows == 0 { FALLBACK_ROWS } else { self.rows },
            cols: if self.cols == 0 { FALLBACK_COLS } else { self.cols },
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

/// Space taken away from the terminal before the grid is laid out.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Padding {
    pub vertical: usize,
    pub left_axis: usize,
}

impl Padding {
    pub const fn new(vertical: usize, left_axis: usize) -> Self {
        Self { vertical, left_axis }
    }

    /// Grid rows left once the vertical padding is removed.
    pub const fn grid_rows(&self, size: TermSize) -> usize {
        size.rows.saturating_sub(self.vertical)
    }

    /// Bar columns left once the price axis is removed.
    pub const fn grid_cols(&self, size: TermSize) -> usize {
        size.cols.saturating_sub(self.left_axis)
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::new(DEFAULT_VERTICAL_PADDING, DEFAULT_LEFT_AXIS_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_saturates() {
        let p = Padding::default();
        assert_eq!(p.grid_rows(TermSize::new(3, 4)), 0);
        assert_eq!(p.grid_cols(TermSize::new(3, 4)), 0);
        assert_eq!(p.grid_rows(TermSize::new(30, 100)), 25);
        assert_eq!(p.grid_cols(TermSize::new(30, 100)), 90);
    }

    #[test]
    fn zero_size_falls_back() {
        assert_eq!(TermSize::new(0, 0).or_fallback(), TermSize::new(24, 80));
        assert_eq!(TermSize::new(10, 0).or_fallback(), TermSize::new(10, 80));
    }
}
