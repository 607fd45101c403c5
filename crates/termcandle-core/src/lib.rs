// File: crates/termcandle-core/src/lib.rs
// Summary: Core library entry point; exports the bar model, cube classifier and text chart.

pub mod axis;
pub mod bar;
pub mod chart;
pub mod classify;
pub mod config;
pub mod downsample;
pub mod error;
pub mod geometry;
pub mod glyph;
pub mod resize;
pub mod theme;
pub mod types;
pub mod view;

pub use bar::{Bar, Direction, Ohlc};
pub use chart::Chart;
pub use classify::Classifier;
pub use config::ChartConfig;
pub use downsample::aggregate_bars;
pub use error::{ChartError, Result};
pub use geometry::{CubeExtent, CubeGeometry, RowScale};
pub use glyph::{GlyphCategory, Half};
pub use resize::{ResizeWatcher, SizeProvider, SubscriberId, Subscribers};
pub use theme::{Colorize, Plain, Theme};
pub use types::TermSize;
