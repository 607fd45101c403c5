// File: crates/termcandle-core/src/axis.rs
// Summary: Left price axis; fixed-width labels followed by the row separator glyph.

use crate::geometry::RowScale;
use crate::glyph::ROW_SEPARATOR;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceAxis {
    pub width: usize,
    pub precision: usize,
}

impl PriceAxis {
    /// Labels are right-aligned to the width of `highest` in its shortest form.
    /// Formatted labels may be wider; see [`PriceAxis::for_scale`].
    pub fn for_highest(highest: f64, precision: usize) -> Self {
        Self { width: highest.to_string().len(), precision }
    }

    /// Width wide enough for every row label of `scale`, so the separator
    /// lands in the same column on every line.
    pub fn for_scale(highest: f64, precision: usize, scale: &RowScale) -> Self {
        let mut axis = Self::for_highest(highest, precision);
        axis.width = (0..scale.lines())
            .map(|row| axis.unpadded_len(scale.price(row)))
            .fold(axis.width, usize::max);
        axis
    }

    fn unpadded_len(&self, price: f64) -> usize {
        format!("{:.prec$}", price, prec = self.precision).len()
    }

    pub fn label(&self, price: f64) -> String {
        format!("{:>width$.prec$}", price, width = self.width, prec = self.precision)
    }

    /// Label plus separator, appended to `out`.
    pub fn write_prefix(&self, out: &mut String, price: f64) {
        out.push_str(&self.label(price));
        out.push(ROW_SEPARATOR);
    }
}
