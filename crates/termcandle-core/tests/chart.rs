// File: crates/termcandle-core/tests/chart.rs
// Purpose: Grid compositor behavior: windowing, idempotent renders, buffer reuse, hooks.

use std::sync::{Arc, Mutex};

use termcandle_core::{Bar, Chart, ChartConfig, GlyphCategory, TermSize, Theme};

fn zigzag(n: usize) -> Vec<Bar> {
    (0..n)
        .map(|i| {
            let base = 100.0 + ((i % 7) as f64 - 3.0) * 2.0;
            let close = if i % 2 == 0 { base + 1.5 } else { base - 1.5 };
            Bar::new(1_700_000_000_000 + i as i64 * 60_000, base, base.max(close) + 1.0, base.min(close) - 1.0, close)
        })
        .collect()
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::new();
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[test_log::test]
fn visible_bars_are_the_newest_suffix() {
    let bars = zigzag(100);
    let mut chart = Chart::new(bars.clone(), TermSize::new(30, 10 + 37));
    chart.render(false);
    let visible = chart.visible_bars();
    assert_eq!(visible.len(), 37);
    let want: Vec<i64> = bars[63..].iter().map(|b| b.timestamp).collect();
    let got: Vec<i64> = visible.iter().map(|b| b.timestamp).collect();
    assert_eq!(got, want);
    assert_eq!(chart.size(), TermSize::new(25, 37));
}

#[test]
fn narrow_sequence_uses_every_bar() {
    let mut chart = Chart::new(zigzag(4), TermSize::new(30, 80));
    chart.render(false);
    assert_eq!(chart.visible_bars().len(), 4);
    assert_eq!(chart.size().cols, 4);
}

#[test]
fn render_without_changes_is_byte_identical() {
    let mut chart = Chart::new(zigzag(60), TermSize::new(24, 70));
    let first = chart.render(false);
    let second = chart.render(false);
    assert_eq!(first, second);
    assert_eq!(chart.render(true), first);
}

#[test]
fn buffers_are_reused_while_rows_are_unchanged() {
    let mut chart = Chart::new(zigzag(20), TermSize::new(24, 70));
    chart.render(true);
    let ptrs: Vec<*const GlyphCategory> = chart.visible_bars().iter().map(|b| b.glyphs().as_ptr()).collect();
    chart.render(true);
    chart.handle_resize(TermSize::new(24, 90));
    for (bar, ptr) in chart.visible_bars().iter().zip(&ptrs) {
        assert_eq!(bar.buffer_allocations(), 1);
        assert_eq!(bar.glyphs().as_ptr(), *ptr);
        assert_eq!(bar.glyphs().len(), 20);
    }

    chart.handle_resize(TermSize::new(40, 90));
    for bar in chart.visible_bars() {
        assert_eq!(bar.buffer_allocations(), 2);
        assert_eq!(bar.glyphs().len(), 36);
    }
}

#[test]
fn grid_lines_have_label_separator_and_one_glyph_per_bar() {
    let mut chart = Chart::new(zigzag(12), TermSize::new(20, 60));
    let text = chart.render(false);
    let lines: Vec<&str> = text.split('\n').collect();
    assert_eq!(lines.len(), 16);
    let (_, highest) = chart.price_range().unwrap();
    let sep = lines[0].chars().position(|c| c == '├');
    assert!(sep.unwrap() >= highest.to_string().len());
    for line in &lines {
        assert_eq!(line.chars().position(|c| c == '├'), sep, "{line:?}");
        let (label, glyphs) = line.split_once('├').unwrap();
        assert!(label.trim().parse::<f64>().is_ok(), "label {label:?}");
        assert_eq!(glyphs.chars().count(), 12);
    }
    assert!(!text.ends_with('\n'));
    assert!(lines.iter().any(|l| l.split_once('├').unwrap().1.chars().any(|c| c != ' ')));
}

#[test]
fn invalid_bar_column_is_blank() {
    let mut bars = zigzag(6);
    bars[2] = Bar::from_partial(bars[2].timestamp, Some(100.0), None, Some(99.0), Some(100.5));
    let mut chart = Chart::new(bars, TermSize::new(20, 60));
    let text = chart.render(false);
    for line in text.lines() {
        let glyphs: Vec<char> = line.split_once('├').unwrap().1.chars().collect();
        assert_eq!(glyphs[2], ' ');
    }
    assert!(chart.visible_bars()[2].glyphs().iter().all(|g| g.is_empty()));
}

#[test]
fn resize_subscribers_see_each_resize_in_order() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut chart = Chart::new(zigzag(30), TermSize::new(24, 80));
    for tag in ["first", "second"] {
        let seen = Arc::clone(&seen);
        chart.on_resize(move |size| seen.lock().unwrap().push((tag, size)));
    }
    chart.handle_resize(TermSize::new(30, 50));
    assert_eq!(chart.size(), TermSize::new(25, 30));
    assert_eq!(
        *seen.lock().unwrap(),
        vec![("first", TermSize::new(30, 50)), ("second", TermSize::new(30, 50))]
    );
}

#[test]
fn unsubscribed_resize_callback_is_not_called() {
    let calls = Arc::new(Mutex::new(0));
    let mut chart = Chart::new(zigzag(3), TermSize::new(24, 80));
    let id = {
        let calls = Arc::clone(&calls);
        chart.on_resize(move |_| *calls.lock().unwrap() += 1)
    };
    chart.handle_resize(TermSize::new(25, 80));
    assert!(chart.unsubscribe_resize(id));
    chart.handle_resize(TermSize::new(26, 80));
    assert_eq!(*calls.lock().unwrap(), 1);
}

#[test]
fn before_render_hook_can_append_a_bar() {
    let mut chart = Chart::new(zigzag(10), TermSize::new(24, 80));
    let mut appended = false;
    chart.on_before_render(move |bars| {
        if !appended {
            bars.push(Bar::new(42, 200.0, 205.0, 199.0, 204.0));
            appended = true;
        }
    });
    chart.render(false);
    assert_eq!(chart.visible_bars().len(), 11);
    assert_eq!(chart.visible_bars().last().map(|b| b.timestamp), Some(42));
    assert_eq!(chart.price_range().map(|r| r.1), Some(205.0));
}

#[test]
fn pushed_bar_shows_on_next_render() {
    let mut chart = Chart::new(zigzag(10), TermSize::new(24, 15));
    chart.render(false);
    assert_eq!(chart.visible_bars().len(), 5);
    chart.push_bar(Bar::new(7, 100.0, 101.0, 99.0, 100.5));
    chart.render(false);
    assert_eq!(chart.visible_bars().len(), 5);
    assert_eq!(chart.visible_bars().last().map(|b| b.timestamp), Some(7));
}

#[test]
fn themed_render_only_adds_styling() {
    let mut chart = Chart::new(zigzag(15), TermSize::new(24, 80));
    let plain = chart.render(false);
    let styled = chart.render_with(&Theme::standard(), false);
    assert_ne!(plain, styled);
    assert!(styled.contains("\x1b[32m") && styled.contains("\x1b[31m"));
    assert_eq!(strip_ansi(&styled), plain);
}

#[test]
fn tiling_cubes_keep_the_grid_shape() {
    let cfg = ChartConfig::default().with_cube_extent(termcandle_core::CubeExtent::Tiling);
    let mut tiled = Chart::with_config(zigzag(15), TermSize::new(24, 80), cfg);
    let mut overlapping = Chart::new(zigzag(15), TermSize::new(24, 80));
    let a = tiled.render(false);
    let b = overlapping.render(false);
    assert_eq!(a.lines().count(), b.lines().count());
    assert_eq!(tiled.price_range(), overlapping.price_range());
    let drawn = tiled.visible_bars().iter().flat_map(|b| b.glyphs()).filter(|g| !g.is_empty()).count();
    assert!(drawn > 0);
}

#[test]
fn summary_mentions_scale_and_span() {
    let mut chart = Chart::new(zigzag(15), TermSize::new(24, 80));
    chart.render(false);
    let s = chart.summary();
    assert!(s.starts_with("price incr("));
    assert!(s.contains("2023-11-14"));
}

#[test]
fn chart_can_be_shared_across_threads() {
    fn assert_send<T: Send>() {}
    assert_send::<Chart>();

    let chart = Arc::new(Mutex::new(Chart::new(zigzag(10), TermSize::new(24, 80))));
    let worker = {
        let chart = Arc::clone(&chart);
        std::thread::spawn(move || chart.lock().unwrap().handle_resize(TermSize::new(30, 40)))
    };
    worker.join().unwrap();
    assert_eq!(chart.lock().unwrap().size(), TermSize::new(25, 10));
}

#[test]
fn single_bar_scales_from_its_own_range() {
    let mut chart = Chart::new(vec![Bar::new(0, 10.0, 12.0, 9.0, 11.0)], TermSize::new(15, 40));
    let text = chart.render(false);
    let rows = chart.size().rows;
    assert_eq!(rows, 10);
    assert_eq!(chart.price_range(), Some((9.0, 12.0)));
    assert_eq!(chart.price_increment(), Some(((12.0 + 1.0) - (9.0 - 1.0)) / rows as f64));

    let lines: Vec<&str> = text.split('\n').collect();
    assert_eq!(lines.len(), rows + 1);
    assert_eq!(lines[0], "14.00├ ");
    assert_eq!(lines[10], " 9.00├│");
    assert!(chart.visible_bars()[0].glyphs().iter().any(|g| !g.is_empty()));
}

#[test]
fn replacing_bars_resets_the_window() {
    let mut chart = Chart::new(zigzag(100), TermSize::new(24, 40));
    chart.render(false);
    assert_eq!(chart.visible_bars().len(), 30);

    chart.set_bars(zigzag(3));
    assert!(chart.visible_bars().is_empty());
    chart.render(false);
    assert_eq!(chart.visible_bars().len(), 3);
    assert_eq!(chart.bars().len(), 3);
}

#[test]
fn new_config_applies_on_next_render() {
    let mut chart = Chart::new(zigzag(20), TermSize::new(24, 80));
    chart.render(false);
    assert_eq!(chart.size().rows, 19);

    chart.set_config(ChartConfig::default().with_padding(10, 10));
    assert_eq!(chart.config().vertical_padding, 10);
    chart.render(false);
    assert_eq!(chart.size().rows, 14);
    assert_eq!(chart.render(false).lines().count(), 15);
}

#[test]
fn removed_before_render_hook_stops_running() {
    let calls = Arc::new(Mutex::new(0));
    let mut chart = Chart::new(zigzag(5), TermSize::new(24, 80));
    let id = {
        let calls = Arc::clone(&calls);
        chart.on_before_render(move |_| *calls.lock().unwrap() += 1)
    };
    chart.render(true);
    assert!(chart.unsubscribe_before_render(id));
    assert!(!chart.unsubscribe_before_render(id));
    chart.render(true);
    assert_eq!(*calls.lock().unwrap(), 1);
}
