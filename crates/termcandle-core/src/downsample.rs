// File: crates/termcandle-core/src/downsample.rs
// Summary: Bar aggregation so long histories fit narrow terminals.

use crate::bar::Bar;

/// Merge consecutive bars into buckets of `bucket` bars.
/// For each bucket: open=first.open, close=last.close, high=max high, low=min low,
/// timestamp=first.timestamp. Invalid bars are skipped; a bucket without any
/// valid bar yields an invalid (empty) bar so the time axis keeps its spacing.
pub fn aggregate_bars(data: &[Bar], bucket: usize) -> Vec<Bar> {
    if bucket <= 1 {
        return data.to_vec();
    }
    data.chunks(bucket)
        .map(|chunk| {
            let timestamp = chunk[0].timestamp;
            let mut valid = chunk.iter().filter_map(Bar::ohlc);
            let Some(first) = valid.next() else {
                return Bar::from_partial(timestamp, None, None, None, None);
            };
            let merged = valid.fold(first, |mut acc, o| {
                acc.high = acc.high.max(o.high);
                acc.low = acc.low.min(o.low);
                acc.close = o.close;
                acc
            });
            Bar::new(timestamp, merged.open, merged.high, merged.low, merged.close)
        })
        .collect()
}
