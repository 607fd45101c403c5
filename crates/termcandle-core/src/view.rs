// File: crates/termcandle-core/src/view.rs
// Summary: Visible window selection and price range over the visible bars.

use std::ops::Range;

use crate::bar::Bar;

/// Index range of the newest `available_cols` bars (a suffix of the sequence).
pub fn visible_range(len: usize, available_cols: usize) -> Range<usize> {
    len.saturating_sub(available_cols)..len
}

/// `(lowest low, highest high)` over the valid bars, or `None` if there are none.
pub fn price_range(bars: &[Bar]) -> Option<(f64, f64)> {
    let mut lowest = f64::INFINITY;
    let mut highest = f64::NEG_INFINITY;
    let mut any = false;
    for o in bars.iter().filter_map(Bar::ohlc) {
        lowest = lowest.min(o.low);
        highest = highest.max(o.high);
        any = true;
    }
    if any { Some((lowest, highest)) } else { None }
}
