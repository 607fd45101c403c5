// File: crates/termcandle-core/src/classify.rs
// Summary: Cube classifier; an ordered chain of geometric predicates picking one glyph per (row, bar).
// Notes:
// - Evaluation order is part of the contract: several predicates overlap and the
//   first match wins. Reordering `DOJI_CHAIN` or `SHAPE_CHAIN` changes output.
// - All thresholds are multiples of `CubeGeometry::unit()`.

use crate::bar::{Bar, Ohlc};
use crate::geometry::CubeGeometry;
use crate::glyph::{GlyphCategory, Half};

type Predicate = fn(&Classifier, f64, &Ohlc) -> bool;

/// Doji shapes, checked ahead of the wick/body chain when enabled.
const DOJI_CHAIN: [(GlyphCategory, Predicate); 3] = [
    (GlyphCategory::StarDoji, Classifier::is_star_doji),
    (GlyphCategory::GravestoneDoji, Classifier::is_gravestone_doji),
    (GlyphCategory::DragonflyDoji, Classifier::is_dragonfly_doji),
];

const SHAPE_CHAIN: [(GlyphCategory, Predicate); 9] = [
    (GlyphCategory::NoMovement, Classifier::is_no_movement),
    (GlyphCategory::ShortTopWick, Classifier::is_short_top_wick),
    (GlyphCategory::TopWick, Classifier::is_top_wick),
    (GlyphCategory::ShortBottomWick, Classifier::is_short_bottom_wick),
    (GlyphCategory::BottomWick, Classifier::is_bottom_wick),
    (GlyphCategory::FullWick, Classifier::is_full_wick),
    (GlyphCategory::ShortBodyTop, Classifier::is_short_body_top),
    (GlyphCategory::ShortBodyBottom, Classifier::is_short_body_bottom),
    (GlyphCategory::FullBody, Classifier::is_full_body),
];

/// Short wicks must stay within this many units of the cube edge they start from.
const SHORT_WICK: f64 = 0.5;
/// Minimum body left inside the cube below a top wick.
const TOP_WICK_MIN_BODY: f64 = 0.2;
/// Maximum distance from cube top to the body bottom for a bottom wick.
const BOTTOM_WICK_MAX_BODY: f64 = 0.8;
/// Wicks at most this long are not drawn next to a short body.
const NEGLIGIBLE_WICK: f64 = 0.1;
const SHORT_BODY_MIN: f64 = 0.2;
const SHORT_BODY_MAX: f64 = 0.9;
/// Star doji body must sit within this distance of the row price.
const STAR_CENTER: f64 = 0.3;
const STAR_MIN_BODY: f64 = 0.2;
/// Gravestone body must be this close to the low.
const GRAVESTONE_BASE: f64 = 1.0 / 3.0;
/// Dragonfly body top must be this close to the cube top.
const DRAGONFLY_BASE: f64 = 0.2;

/// Pure classifier for one price increment.
#[derive(Clone, Copy, Debug)]
pub struct Classifier {
    geom: CubeGeometry,
    detect_doji: bool,
}

impl Classifier {
    pub fn new(geom: CubeGeometry, detect_doji: bool) -> Self {
        Self { geom, detect_doji }
    }

    pub fn geometry(&self) -> &CubeGeometry { &self.geom }

    /// Glyph for `bar` in the cube around `ppq`. Invalid bars are always empty.
    pub fn classify(&self, ppq: f64, bar: &Bar) -> GlyphCategory {
        match bar.ohlc() {
            Some(ohlc) => self.classify_ohlc(ppq, &ohlc),
            None => GlyphCategory::Empty,
        }
    }

    pub fn classify_ohlc(&self, ppq: f64, o: &Ohlc) -> GlyphCategory {
        self.chain()
            .find(|(_, pred)| pred(self, ppq, o))
            .map(|(cat, _)| cat)
            .or_else(|| self.leftover(ppq, o))
            .unwrap_or(GlyphCategory::Empty)
    }

    /// Every category whose predicate fires, in evaluation order.
    /// `classify_ohlc` returns the first entry, or `Empty` when the list is empty.
    pub fn matching(&self, ppq: f64, o: &Ohlc) -> Vec<GlyphCategory> {
        self.chain()
            .filter(|(_, pred)| pred(self, ppq, o))
            .map(|(cat, _)| cat)
            .chain(self.leftover(ppq, o))
            .collect()
    }

    fn chain(&self) -> impl Iterator<Item = (GlyphCategory, Predicate)> + '_ {
        let doji: &[(GlyphCategory, Predicate)] = if self.detect_doji { &DOJI_CHAIN } else { &[] };
        doji.iter().chain(SHAPE_CHAIN.iter()).copied()
    }

    /// Bar lies in the cube but nothing matched: mark the half holding its midpoint.
    fn leftover(&self, ppq: f64, o: &Ohlc) -> Option<GlyphCategory> {
        if !self.geom.is_fully_contained_within_cube(ppq, o) {
            return None;
        }
        let half = if o.midpoint() >= ppq { Half::Upper } else { Half::Lower };
        Some(GlyphCategory::Unclassified(half))
    }

    #[inline]
    fn u(&self, k: f64) -> f64 { self.geom.unit() * k }

    // ---- doji ---------------------------------------------------------------

    pub fn is_star_doji(&self, ppq: f64, o: &Ohlc) -> bool {
        let (bt, bb) = (o.body_top(), o.body_bottom());
        let centered = bb > ppq - self.u(STAR_CENTER) && bt < ppq + self.u(STAR_CENTER);
        let visible_body = o.body_height() >= self.u(STAR_MIN_BODY);
        centered && visible_body
    }

    pub fn is_gravestone_doji(&self, ppq: f64, o: &Ohlc) -> bool {
        let at_price = o.body_bottom() <= ppq && ppq <= o.body_top();
        let thin_body = (o.open - o.close).abs() < self.geom.unit();
        let on_low = o.bottom_wick_len() < self.u(GRAVESTONE_BASE);
        at_price && thin_body && on_low && o.top_wick_len() > o.bottom_wick_len()
    }

    pub fn is_dragonfly_doji(&self, ppq: f64, o: &Ohlc) -> bool {
        let g = &self.geom;
        let (bt, bb) = (o.body_top(), o.body_bottom());
        let (top, bottom) = (g.cube_top(ppq), g.cube_bottom(ppq));
        let at_price = bb <= ppq && ppq <= bt;
        let body_in_cube = bb > bottom && bt < top;
        let high_in_cube = o.high > bottom && o.high < top;
        let on_cube_top = top - bt <= self.u(DRAGONFLY_BASE);
        at_price && body_in_cube && high_in_cube && on_cube_top
            && o.bottom_wick_len() > o.top_wick_len()
    }

    // ---- wick / body chain --------------------------------------------------

    pub fn is_no_movement(&self, ppq: f64, o: &Ohlc) -> bool {
        self.geom.is_fully_contained_within_cube(ppq, o) && o.open == o.close && o.high == o.low
    }

    pub fn is_short_top_wick(&self, ppq: f64, o: &Ohlc) -> bool {
        let g = &self.geom;
        if o.high <= o.body_top() {
            return false;
        }
        let above_bottom = o.high - g.cube_bottom(ppq);
        let below_top = g.cube_top(ppq) - o.high;
        g.is_within_cube(ppq, o.high) && above_bottom <= self.u(SHORT_WICK) && below_top > above_bottom
    }

    pub fn is_top_wick(&self, ppq: f64, o: &Ohlc) -> bool {
        let g = &self.geom;
        let bt = o.body_top();
        let in_wick = ppq > bt && ppq <= o.high;
        let body_top_in_cube = bt > g.cube_bottom(ppq) && bt <= g.cube_top(ppq);
        let enough_body = g.cube_top(ppq) - bt >= self.u(TOP_WICK_MIN_BODY);
        let body_bottom_elsewhere = o.body_bottom() <= ppq;
        in_wick && body_top_in_cube && enough_body && body_bottom_elsewhere
    }

    pub fn is_short_bottom_wick(&self, ppq: f64, o: &Ohlc) -> bool {
        let g = &self.geom;
        if o.low >= o.body_bottom() {
            return false;
        }
        let below_top = g.cube_top(ppq) - o.low;
        let above_bottom = o.low - g.cube_bottom(ppq);
        g.is_within_cube(ppq, o.low) && below_top <= self.u(SHORT_WICK) && above_bottom > below_top
    }

    pub fn is_bottom_wick(&self, ppq: f64, o: &Ohlc) -> bool {
        let g = &self.geom;
        let bb = o.body_bottom();
        let in_wick = ppq < bb && ppq >= o.low;
        let body_bottom_in_cube = bb >= g.cube_bottom(ppq) && bb < g.cube_top(ppq);
        let enough_body = g.cube_top(ppq) - bb <= self.u(BOTTOM_WICK_MAX_BODY);
        let body_top_elsewhere = o.body_top() > ppq;
        in_wick && body_bottom_in_cube && enough_body && body_top_elsewhere
    }

    pub fn is_full_wick(&self, ppq: f64, o: &Ohlc) -> bool {
        (ppq > o.body_top() && ppq <= o.high) || (ppq < o.body_bottom() && ppq >= o.low)
    }

    pub fn is_short_body_top(&self, ppq: f64, o: &Ohlc) -> bool {
        let g = &self.geom;
        let bt = o.body_top();
        let gap = g.cube_top(ppq) - bt;
        let at_price = g.is_within_cube(ppq, o.high) && bt < g.cube_top(ppq);
        let negligible_wick = o.top_wick_len() <= self.u(NEGLIGIBLE_WICK);
        let partial = gap >= self.u(SHORT_BODY_MIN) && gap <= self.u(SHORT_BODY_MAX);
        at_price && negligible_wick && partial && o.body_bottom() <= ppq
    }

    pub fn is_short_body_bottom(&self, ppq: f64, o: &Ohlc) -> bool {
        let g = &self.geom;
        let bb = o.body_bottom();
        let gap = bb - g.cube_bottom(ppq);
        let at_price = o.low > g.cube_bottom(ppq) && o.low < g.cube_top(ppq) && bb < g.cube_top(ppq);
        let negligible_wick = o.bottom_wick_len() <= self.u(NEGLIGIBLE_WICK);
        let partial = gap > self.u(SHORT_BODY_MIN) && gap <= self.u(SHORT_BODY_MAX);
        at_price && negligible_wick && partial && o.body_top() >= ppq
    }

    pub fn is_full_body(&self, ppq: f64, o: &Ohlc) -> bool {
        o.body_bottom() <= ppq && ppq <= o.body_top()
    }
}
