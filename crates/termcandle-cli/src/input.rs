// File: crates/termcandle-cli/src/input.rs
// Summary: Loads OHLC bars from CSV files with loosely named headers.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{debug, warn};
use termcandle_core::Bar;

/// Resolve path, trying a .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt).
pub fn resolve_path(raw: &str) -> Result<(PathBuf, bool)> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    match p.extension()?.to_string_lossy().to_lowercase().as_str() {
        "cvs" => alt.set_extension("csv"),
        "csv" => alt.set_extension("cvs"),
        _ => return None,
    };
    Some(alt)
}

/// Load exchange-style OHLC CSV into bars, oldest first.
///
/// Rows with unparsable price fields are kept as partial bars so the time
/// axis keeps its spacing; they render as blank columns. Rows without a
/// readable time get timestamp 0, which the chart treats as unset.
pub fn load_bars(path: &Path) -> Result<Vec<Bar>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .headers()
        .with_context(|| format!("reading headers of {}", path.display()))?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect::<Vec<_>>();
    debug!("headers: {headers:?}");

    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    let i_time = idx(&["time", "timestamp", "open_time", "date", "datetime"]);
    let i_open = idx(&["open", "o"]);
    let i_high = idx(&["high", "h"]);
    let i_low = idx(&["low", "l"]);
    let i_close = idx(&["close", "c", "adj_close", "close_price"]);

    if i_open.is_none() || i_high.is_none() || i_low.is_none() || i_close.is_none() {
        warn!("could not find one of open/high/low/close columns in {headers:?}");
    }

    let mut out = Vec::new();
    let mut partial = 0usize;
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec.with_context(|| format!("decoding record {} of {}", row + 1, path.display()))?;
        let field = |i: Option<usize>| i.and_then(|ix| rec.get(ix));
        let price = |i: Option<usize>| field(i).and_then(|s| s.trim().parse::<f64>().ok());

        let timestamp = field(i_time).and_then(parse_timestamp_ms).unwrap_or(0);
        let bar = Bar::from_partial(timestamp, price(i_open), price(i_high), price(i_low), price(i_close));
        if !bar.is_valid() {
            partial += 1;
        }
        out.push(bar);
    }
    if partial > 0 {
        warn!("{partial} of {} rows in {} have missing or inconsistent prices", out.len(), path.display());
    }
    Ok(out)
}

/// Epoch seconds or milliseconds, RFC 3339, `YYYY-MM-DD HH:MM[:SS]` or a bare date.
fn parse_timestamp_ms(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        // Below 10^12 the value is read as epoch seconds.
        return Some(if n > 10_i64.pow(12) { n } else { n.saturating_mul(1000) });
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcandle_core::{Chart, TermSize};

    #[test]
    fn timestamps_in_common_shapes() {
        assert_eq!(parse_timestamp_ms("1700000000"), Some(1_700_000_000_000));
        assert_eq!(parse_timestamp_ms("1700000000123"), Some(1_700_000_000_123));
        assert_eq!(parse_timestamp_ms("1970-01-01T00:00:01Z"), Some(1000));
        assert_eq!(parse_timestamp_ms("1970-01-02 00:00"), Some(86_400_000));
        assert_eq!(parse_timestamp_ms("1970-01-02"), Some(86_400_000));
        assert_eq!(parse_timestamp_ms("yesterday"), None);
        assert_eq!(parse_timestamp_ms(" "), None);
    }

    #[test]
    fn csv_rows_become_bars() {
        let dir = std::env::temp_dir().join(format!("termcandle-input-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bars.csv");
        std::fs::write(
            &path,
            "Date,Open,High,Low,Close,Volume\n\
             2024-01-02,10,12,9,11,100\n\
             2024-01-03,11,,10,10.5,90\n\
             2024-01-04,10.5,11,10,10.2,80\n",
        )
        .unwrap();

        let bars = load_bars(&path).unwrap();
        assert_eq!(bars.len(), 3);
        assert!(bars[0].is_valid());
        assert!(!bars[1].is_valid());
        assert_eq!(bars[2].ohlc().map(|o| o.close), Some(10.2));
        assert!(bars[0].timestamp < bars[1].timestamp);

        let (resolved, alt) = resolve_path(path.with_extension("cvs").to_str().unwrap()).unwrap();
        assert!(alt);
        assert_eq!(resolved, path);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_time_column_leaves_timestamps_unset() {
        let dir = std::env::temp_dir().join(format!("termcandle-notime-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bars.csv");
        std::fs::write(&path, "open,high,low,close\n10,12,9,11\n11,13,10,12\n11,12,10,10.5\n").unwrap();

        let bars = load_bars(&path).unwrap();
        assert_eq!(bars.len(), 3);
        assert!(bars.iter().all(|b| b.timestamp == 0));

        let mut chart = Chart::new(bars, TermSize::new(20, 40));
        chart.render(false);
        let summary = chart.summary();
        assert!(summary.starts_with("price incr("));
        assert!(!summary.contains("1970"), "{summary}");
        std::fs::remove_dir_all(&dir).ok();
    }
}
