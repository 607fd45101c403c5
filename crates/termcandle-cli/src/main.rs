// File: crates/termcandle-cli/src/main.rs
// Summary: Loads OHLC CSV and prints the candlestick glyph chart sized to the terminal.

mod input;
mod term;

use std::fs;
use std::io::{self, Write};
use std::str::FromStr;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{App, Arg, ArgMatches};
use log::{debug, info};
use termcandle_core::{aggregate_bars, theme, Chart, ChartConfig, CubeExtent, ResizeWatcher, TermSize, Theme};

fn main() -> Result<()> {
    let matches = App::new("termcandle")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Draws OHLC candlesticks in the terminal with box-drawing glyphs")
        .arg(Arg::with_name("input")
            .value_name("CSV")
            .help("OHLC file with time/open/high/low/close columns")
            .required(true)
            .index(1))
        .arg(Arg::with_name("theme")
            .short("t")
            .long("theme")
            .value_name("THEME")
            .help("Color theme: default, bold, debug or monochrome (default: default)")
            .takes_value(true))
        .arg(Arg::with_name("bucket")
            .short("b")
            .long("bucket")
            .value_name("N")
            .help("Merge every N consecutive bars into one")
            .takes_value(true))
        .arg(Arg::with_name("rows")
            .long("rows")
            .value_name("ROWS")
            .help("Override the terminal height")
            .takes_value(true))
        .arg(Arg::with_name("cols")
            .long("cols")
            .value_name("COLS")
            .help("Override the terminal width")
            .takes_value(true))
        .arg(Arg::with_name("extent")
            .short("e")
            .long("extent")
            .value_name("EXTENT")
            .help("Cube extent per row: overlapping or tiling")
            .takes_value(true))
        .arg(Arg::with_name("no_doji")
            .long("no-doji")
            .help("Skip star, gravestone and dragonfly detection"))
        .arg(Arg::with_name("padding")
            .short("p")
            .long("padding")
            .value_name("ROWS")
            .help("Rows kept free around the grid (default 5)")
            .takes_value(true))
        .arg(Arg::with_name("axis_width")
            .long("axis-width")
            .value_name("COLS")
            .help("Columns reserved for price labels (default 10)")
            .takes_value(true))
        .arg(Arg::with_name("precision")
            .long("precision")
            .value_name("DIGITS")
            .help("Decimal places of price labels (default 2)")
            .takes_value(true))
        .arg(Arg::with_name("summary")
            .short("s")
            .long("summary")
            .help("Print the price scale and time span above the chart"))
        .arg(Arg::with_name("output")
            .short("o")
            .long("output")
            .value_name("FILE")
            .help("Also write the uncolored chart to FILE")
            .takes_value(true))
        .arg(Arg::with_name("watch")
            .short("w")
            .long("watch")
            .help("Keep running and redraw when the terminal is resized"))
        .arg(Arg::with_name("interval")
            .long("interval")
            .value_name("MS")
            .help("Resize polling interval in watch mode (default 250)")
            .takes_value(true))
        .arg(Arg::with_name("v")
            .short("v")
            .multiple(true)
            .help("Sets the level of verbosity"))
        .get_matches();

    let level = match matches.occurrences_of("v") {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = build_config(&matches)?;
    let theme = match matches.value_of("theme") {
        Some(name) => theme::find(name)?,
        None => Theme::standard(),
    };

    let raw = matches.value_of("input").context("missing input path")?;
    let (path, used_alt) = input::resolve_path(raw)?;
    if used_alt {
        info!("extension swapped between .csv/.cvs: {}", path.display());
    }
    let mut bars = input::load_bars(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
    if bars.is_empty() {
        anyhow::bail!("no bars loaded from {}; check headers/delimiter", path.display());
    }
    if let Some(bucket) = parse_opt::<usize>(&matches, "bucket")? {
        let before = bars.len();
        bars = aggregate_bars(&bars, bucket);
        info!("aggregated {before} bars into {} (bucket {bucket})", bars.len());
    }

    let fixed = fixed_size(&matches)?;
    let provider = move || -> io::Result<TermSize> {
        match fixed {
            Some(size) => Ok(size),
            None => term::stdout_size().or_else(|e| {
                debug!("terminal size unavailable ({e}), using fallback");
                Ok(TermSize::default().or_fallback())
            }),
        }
    };

    let mut watcher = ResizeWatcher::new(provider);
    let mut chart = Chart::with_config(bars, TermSize::default(), config);
    chart.on_resize(|size| info!("terminal resized to {}x{}", size.cols, size.rows));

    let opts = DrawOptions {
        theme,
        summary: matches.is_present("summary"),
        force: !config.recalc_on_resize,
        clear: false,
    };

    watcher.poll_into(&mut chart).context("querying terminal size")?;
    draw(&mut chart, &opts)?;
    if let Some(out) = matches.value_of("output") {
        fs::write(out, chart.render(false)).with_context(|| format!("writing chart to {out}"))?;
        info!("wrote {out}");
    }

    if !matches.is_present("watch") {
        return Ok(());
    }
    let interval = Duration::from_millis(parse_opt::<u64>(&matches, "interval")?.unwrap_or(250));
    let opts = DrawOptions { clear: true, ..opts };
    loop {
        thread::sleep(interval);
        if watcher.poll_into(&mut chart).context("querying terminal size")? {
            draw(&mut chart, &opts)?;
        }
    }
}

struct DrawOptions {
    theme: Theme,
    summary: bool,
    force: bool,
    clear: bool,
}

fn draw(chart: &mut Chart, opts: &DrawOptions) -> Result<()> {
    let text = chart.render_with(&opts.theme, opts.force);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if opts.clear {
        write!(out, "{}", term::CLEAR_SCREEN).context("writing to stdout")?;
    }
    if opts.summary {
        writeln!(out, "{}", chart.summary()).context("writing to stdout")?;
    }
    writeln!(out, "{text}").context("writing to stdout")?;
    out.flush().context("flushing stdout")
}

/// Environment overrides first, then command-line flags on top.
fn build_config(matches: &ArgMatches) -> Result<ChartConfig> {
    let mut config = ChartConfig::from_env().context("reading TERMCANDLE_* settings")?;
    if let Some(extent) = parse_opt::<CubeExtent>(matches, "extent")? {
        config = config.with_cube_extent(extent);
    }
    if matches.is_present("no_doji") {
        config = config.with_doji(false);
    }
    if let Some(v) = parse_opt(matches, "padding")? {
        config.vertical_padding = v;
    }
    if let Some(v) = parse_opt(matches, "axis_width")? {
        config.left_axis_width = v;
    }
    if let Some(v) = parse_opt(matches, "precision")? {
        config.label_precision = v;
    }
    config.validate()?;
    Ok(config)
}

/// `--rows`/`--cols` pin the size; a missing half comes from the terminal.
fn fixed_size(matches: &ArgMatches) -> Result<Option<TermSize>> {
    let rows = parse_opt::<usize>(matches, "rows")?;
    let cols = parse_opt::<usize>(matches, "cols")?;
    if rows.is_none() && cols.is_none() {
        return Ok(None);
    }
    let live = term::stdout_size().unwrap_or_else(|_| TermSize::default().or_fallback());
    Ok(Some(TermSize::new(rows.unwrap_or(live.rows), cols.unwrap_or(live.cols))))
}

fn parse_opt<T>(matches: &ArgMatches, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match matches.value_of(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("invalid --{} value '{raw}': {e}", name.replace('_', "-"))),
        None => Ok(None),
    }
}
