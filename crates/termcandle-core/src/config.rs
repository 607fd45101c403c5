// File: crates/termcandle-core/src/config.rs
// Summary: Chart configuration with defaults and `TERMCANDLE_*` environment overrides.

use std::env;
use std::str::FromStr;

use crate::error::{ChartError, Result};
use crate::geometry::CubeExtent;
use crate::types::{Padding, DEFAULT_LABEL_PRECISION, DEFAULT_LEFT_AXIS_WIDTH, DEFAULT_VERTICAL_PADDING};

pub const ENV_VERTICAL_PADDING: &str = "TERMCANDLE_VERTICAL_PADDING";
pub const ENV_LEFT_AXIS_WIDTH: &str = "TERMCANDLE_LEFT_AXIS_WIDTH";
pub const ENV_LABEL_PRECISION: &str = "TERMCANDLE_LABEL_PRECISION";
pub const ENV_CUBE_EXTENT: &str = "TERMCANDLE_CUBE_EXTENT";
pub const ENV_DETECT_DOJI: &str = "TERMCANDLE_DETECT_DOJI";
pub const ENV_RECALC_ON_RESIZE: &str = "TERMCANDLE_RECALC_ON_RESIZE";

/// Labels wider than this are certainly a typo.
const MAX_LABEL_PRECISION: usize = 12;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartConfig {
    pub vertical_padding: usize,
    pub left_axis_width: usize,
    pub label_precision: usize,
    pub cube_extent: CubeExtent,
    pub detect_doji: bool,
    pub recalc_on_resize: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            vertical_padding: DEFAULT_VERTICAL_PADDING,
            left_axis_width: DEFAULT_LEFT_AXIS_WIDTH,
            label_precision: DEFAULT_LABEL_PRECISION,
            cube_extent: CubeExtent::Overlapping,
            detect_doji: true,
            recalc_on_resize: true,
        }
    }
}

impl ChartConfig {
    /// Defaults overlaid with whatever `TERMCANDLE_*` variables are set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ChartConfig::from_env`] with an explicit key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Self::default();
        let cfg = Self {
            vertical_padding: key_or_default(&lookup, ENV_VERTICAL_PADDING, d.vertical_padding)?,
            left_axis_width: key_or_default(&lookup, ENV_LEFT_AXIS_WIDTH, d.left_axis_width)?,
            label_precision: key_or_default(&lookup, ENV_LABEL_PRECISION, d.label_precision)?,
            cube_extent: key_or_default(&lookup, ENV_CUBE_EXTENT, d.cube_extent)?,
            detect_doji: flag_or_default(&lookup, ENV_DETECT_DOJI, d.detect_doji)?,
            recalc_on_resize: flag_or_default(&lookup, ENV_RECALC_ON_RESIZE, d.recalc_on_resize)?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.label_precision > MAX_LABEL_PRECISION {
            return Err(ChartError::Config {
                key: ENV_LABEL_PRECISION,
                value: self.label_precision.to_string(),
                reason: format!("at most {MAX_LABEL_PRECISION} decimal places"),
            });
        }
        Ok(())
    }

    pub fn padding(&self) -> Padding {
        Padding::new(self.vertical_padding, self.left_axis_width)
    }

    pub fn with_cube_extent(mut self, extent: CubeExtent) -> Self {
        self.cube_extent = extent;
        self
    }

    pub fn with_doji(mut self, detect: bool) -> Self {
        self.detect_doji = detect;
        self
    }

    pub fn with_padding(mut self, vertical: usize, left_axis: usize) -> Self {
        self.vertical_padding = vertical;
        self.left_axis_width = left_axis;
        self
    }
}

fn key_or_default<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ChartError::Config {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn flag_or_default<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ChartError::Config { key, value: raw, reason: "expected a boolean".into() }),
        },
        None => Ok(default),
    }
}
