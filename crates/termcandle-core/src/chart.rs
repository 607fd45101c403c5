// File: crates/termcandle-core/src/chart.rs
// Summary: Chart struct and the text grid pipeline: window, range, classify, serialize.

use std::ops::Range;

use log::{debug, trace, warn};

use crate::axis::PriceAxis;
use crate::bar::Bar;
use crate::classify::Classifier;
use crate::config::ChartConfig;
use crate::geometry::{CubeGeometry, RowScale};
use crate::resize::{BeforeRenderCallback, ResizeCallback, SubscriberId, Subscribers};
use crate::theme::{Colorize, Plain};
use crate::types::TermSize;
use crate::view::{price_range, visible_range};

/// Geometry of the last recomputation.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Layout {
    size: TermSize,
    scale: RowScale,
    highest: f64,
}

/// Owns a bar sequence and lays it out as a grid of glyphs for a terminal size.
///
/// The layout is recomputed on [`Chart::render`] with `force`, after a bar
/// was pushed, or on resize when `recalc_on_resize` is set. Recomputation
/// takes `&mut self`; hosts sharing a chart across threads wrap it in a `Mutex`.
pub struct Chart {
    bars: Vec<Bar>,
    config: ChartConfig,
    term: TermSize,
    window: Range<usize>,
    layout: Option<Layout>,
    dirty: bool,
    on_resize: Subscribers<ResizeCallback>,
    before_render: Subscribers<BeforeRenderCallback>,
}

impl Chart {
    pub fn new(bars: Vec<Bar>, term: TermSize) -> Self {
        Self::with_config(bars, term, ChartConfig::default())
    }

    pub fn with_config(bars: Vec<Bar>, term: TermSize, config: ChartConfig) -> Self {
        Self {
            bars,
            config,
            term,
            window: 0..0,
            layout: None,
            dirty: true,
            on_resize: Subscribers::new(),
            before_render: Subscribers::new(),
        }
    }

    // ---- accessors -----------------------------------------------------------

    pub fn bars(&self) -> &[Bar] { &self.bars }
    pub fn config(&self) -> &ChartConfig { &self.config }

    /// Terminal size most recently handed to the chart.
    pub fn term_size(&self) -> TermSize { self.term }

    /// Grid `{rows, cols}` of the last recomputation; zero before the first one.
    pub fn size(&self) -> TermSize {
        self.layout.map(|l| l.size).unwrap_or_default()
    }

    /// Bars laid out on screen, left to right.
    pub fn visible_bars(&self) -> &[Bar] {
        self.bars.get(self.window.clone()).unwrap_or(&[])
    }

    pub fn price_increment(&self) -> Option<f64> {
        self.layout.map(|l| l.scale.increment)
    }

    /// `(lowest, highest)` over the visible window.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        self.layout.map(|l| (l.scale.lowest, l.highest))
    }

    /// Classifier for the current increment, if a layout exists.
    pub fn classifier(&self) -> Option<Classifier> {
        self.layout.map(|l| self.make_classifier(l.scale.increment))
    }

    // ---- mutation ------------------------------------------------------------

    /// Append the newest bar; the next render recomputes.
    pub fn push_bar(&mut self, bar: Bar) {
        self.bars.push(bar);
        self.dirty = true;
    }

    pub fn set_bars(&mut self, bars: Vec<Bar>) {
        self.bars = bars;
        self.window = 0..0;
        self.dirty = true;
    }

    pub fn set_config(&mut self, config: ChartConfig) {
        self.config = config;
        self.dirty = true;
    }

    // ---- subscriptions -------------------------------------------------------

    pub fn on_resize<F>(&mut self, callback: F) -> SubscriberId
    where
        F: FnMut(TermSize) + Send + 'static,
    {
        self.on_resize.subscribe(Box::new(callback))
    }

    pub fn unsubscribe_resize(&mut self, id: SubscriberId) -> bool {
        self.on_resize.unsubscribe(id)
    }

    /// Runs right before every recomputation and may edit the bar sequence.
    pub fn on_before_render<F>(&mut self, callback: F) -> SubscriberId
    where
        F: FnMut(&mut Vec<Bar>) + Send + 'static,
    {
        self.before_render.subscribe(Box::new(callback))
    }

    pub fn unsubscribe_before_render(&mut self, id: SubscriberId) -> bool {
        self.before_render.unsubscribe(id)
    }

    /// Entry point for the external resize notification.
    pub fn handle_resize(&mut self, term: TermSize) {
        self.term = term;
        if self.config.recalc_on_resize {
            self.recalc();
        }
        for cb in self.on_resize.iter_mut() {
            cb(term);
        }
    }

    // ---- layout --------------------------------------------------------------

    /// Recompute window, price scale and every visible bar's glyph column.
    pub fn recalc(&mut self) {
        for cb in self.before_render.iter_mut() {
            cb(&mut self.bars);
        }
        self.dirty = false;

        let padding = self.config.padding();
        self.window = visible_range(self.bars.len(), padding.grid_cols(self.term));
        let rows = padding.grid_rows(self.term);
        let visible = &self.bars[self.window.clone()];

        let invalid = visible.iter().filter(|b| !b.is_valid()).count();
        if invalid > 0 {
            warn!("recalc: {invalid} of {} visible bars are invalid and render empty", visible.len());
        }

        let Some((lowest, highest)) = price_range(visible) else {
            warn!("recalc: no valid bars in a window of {}, grid left empty", visible.len());
            self.layout = None;
            return;
        };
        let Some(scale) = RowScale::fit(lowest, highest, rows) else {
            warn!("recalc: terminal {}x{} leaves {rows} rows, grid left empty", self.term.cols, self.term.rows);
            self.layout = None;
            return;
        };

        let size = TermSize::new(rows, self.window.len());
        debug!(
            "recalc: {} bars visible of {}, rows={rows}, increment={}, range=[{lowest}, {highest}]",
            size.cols,
            self.bars.len(),
            scale.increment
        );

        let classifier = self.make_classifier(scale.increment);
        let lines = scale.lines();
        let window = self.window.clone();
        let (mut reallocated, mut cleared) = (0usize, 0usize);
        for bar in &mut self.bars[window] {
            if bar.glyphs().len() == lines {
                bar.clear_glyph_buffer();
                cleared += 1;
            } else {
                bar.resize_glyph_buffer(lines);
                reallocated += 1;
            }
            for row in 0..lines {
                let glyph = classifier.classify(scale.price(row), bar);
                bar.set_glyph(row, glyph);
            }
        }
        trace!("recalc: {reallocated} buffers reallocated, {cleared} cleared in place");

        self.layout = Some(Layout { size, scale, highest });
    }

    fn make_classifier(&self, increment: f64) -> Classifier {
        Classifier::new(CubeGeometry::new(increment, self.config.cube_extent), self.config.detect_doji)
    }

    // ---- output --------------------------------------------------------------

    /// Plain-text grid; recomputes first when `force` is set or the bars changed.
    pub fn render(&mut self, force: bool) -> String {
        self.render_with(&Plain, force)
    }

    /// Grid with every cell passed through `colorizer`.
    pub fn render_with(&mut self, colorizer: &dyn Colorize, force: bool) -> String {
        if force || self.dirty {
            self.recalc();
        }
        self.serialize(colorizer)
    }

    fn serialize(&self, colorizer: &dyn Colorize) -> String {
        let Some(layout) = self.layout else {
            return String::new();
        };
        let axis = PriceAxis::for_scale(layout.highest, self.config.label_precision, &layout.scale);
        let visible = self.visible_bars();
        let mut lines = Vec::with_capacity(layout.scale.lines());
        for row in 0..layout.scale.lines() {
            let mut line = String::new();
            axis.write_prefix(&mut line, layout.scale.price(row));
            for bar in visible {
                line.push_str(&colorizer.paint(bar.glyph(row), bar.direction()));
            }
            lines.push(line);
        }
        lines.join("\n")
    }

    /// One-line description of the current scale and the visible time span.
    pub fn summary(&self) -> String {
        let Some(layout) = self.layout else {
            return "no data".to_string();
        };
        let mut s = format!(
            "price incr({}) - top({}) - bottom({})",
            layout.scale.increment, layout.highest, layout.scale.lowest
        );
        let visible = self.visible_bars();
        let first = visible.first().and_then(Bar::datetime);
        let last = visible.last().and_then(Bar::datetime);
        if let (Some(first), Some(last)) = (first, last) {
            if visible.iter().any(|b| b.timestamp != 0) {
                s.push_str(&format!(
                    " - {} .. {}",
                    first.format("%Y-%m-%d %H:%M"),
                    last.format("%Y-%m-%d %H:%M")
                ));
            }
        }
        s
    }
}

impl std::fmt::Debug for Chart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chart")
            .field("bars", &self.bars.len())
            .field("term", &self.term)
            .field("window", &self.window)
            .field("layout", &self.layout)
            .field("on_resize", &self.on_resize)
            .field("before_render", &self.before_render)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars(n: usize) -> Vec<Bar> {
        (0..n)
            .map(|i| {
                let base = 100.0 + i as f64;
                Bar::new(i as i64, base, base + 3.0, base - 2.0, base + 1.0)
            })
            .collect()
    }

    #[test]
    fn layout_follows_terminal_size() {
        let mut chart = Chart::new(bars(50), TermSize::new(25, 30));
        chart.render(true);
        assert_eq!(chart.size(), TermSize::new(20, 20));
        assert_eq!(chart.visible_bars().len(), 20);
        assert_eq!(chart.visible_bars()[0].timestamp, 30);
        assert_eq!(chart.price_range(), Some((128.0, 152.0)));
        let inc = chart.price_increment().unwrap();
        assert!((inc - 26.0 / 20.0).abs() < 1e-12);
    }

    #[test]
    fn output_has_one_line_per_row_price() {
        let mut chart = Chart::new(bars(5), TermSize::new(15, 40));
        let text = chart.render(false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        let sep = lines[0].chars().position(|c| c == '├');
        for line in &lines {
            assert_eq!(line.chars().position(|c| c == '├'), sep, "{line:?}");
            let (_, glyphs) = line.split_once('├').unwrap();
            assert_eq!(glyphs.chars().count(), 5);
        }
        assert!(lines[10].starts_with(" 98.00├"));
    }

    #[test]
    fn empty_sequence_renders_nothing() {
        let mut chart = Chart::new(Vec::new(), TermSize::new(20, 40));
        assert_eq!(chart.render(true), "");
        assert_eq!(chart.size(), TermSize::default());
        assert!(chart.visible_bars().is_empty());
        assert_eq!(chart.summary(), "no data");
    }

    #[test]
    fn tiny_terminal_renders_nothing() {
        let mut chart = Chart::new(bars(5), TermSize::new(5, 40));
        assert_eq!(chart.render(true), "");
        assert_eq!(chart.price_increment(), None);
    }

    #[test]
    fn all_invalid_window_renders_nothing() {
        let broken = vec![Bar::from_partial(0, None, None, None, None); 4];
        let mut chart = Chart::new(broken, TermSize::new(20, 40));
        assert_eq!(chart.render(true), "");
    }

    #[test]
    fn resize_without_recalc_keeps_layout() {
        let cfg = ChartConfig { recalc_on_resize: false, ..ChartConfig::default() };
        let mut chart = Chart::with_config(bars(50), TermSize::new(25, 30), cfg);
        chart.render(true);
        chart.handle_resize(TermSize::new(40, 60));
        assert_eq!(chart.size(), TermSize::new(20, 20));
        assert_eq!(chart.term_size(), TermSize::new(40, 60));
        chart.render(true);
        assert_eq!(chart.size(), TermSize::new(35, 50));
    }
}
