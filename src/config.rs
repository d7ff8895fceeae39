// src/config.rs

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::debug;

use crate::dataset::fields;

/// Which numeric columns drive which visual channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Channels {
    pub x: String,
    pub y: String,
    pub size: String,
    pub color: String,
}

impl Default for Channels {
    fn default() -> Self {
        Self {
            x: fields::LOG_GDP_PER_CAPITA.into(),
            y: fields::LIFE_EXPECTANCY.into(),
            size: fields::TOTAL_POPULATION.into(),
            color: fields::AGGREGATE_SCORE.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 10.0,
            right: 10.0,
            bottom: 30.0,
            left: 20.0,
        }
    }
}

/// Pixel bounds of the plotting area inside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotArea {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    /// Smallest and largest bubble radius in pixels.
    pub radius_range: [f64; 2],
    /// Year shown when no year is requested explicitly.
    pub initial_year: i32,
    pub channels: Channels,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub fill_opacity: f64,
    /// Fill opacity a bubble is left at once the pointer moves off it.
    pub rest_opacity: f64,
    pub transition_ms: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            margin: Margin::default(),
            radius_range: [2.0, 30.0],
            initial_year: 2021,
            channels: Channels::default(),
            title: "Global Health Data Analysis".into(),
            x_label: "GDP per Capita (log, USD)".into(),
            y_label: "Life Expectancy(Years)".into(),
            fill_opacity: 0.9,
            rest_opacity: 0.85,
            transition_ms: 400,
        }
    }
}

impl ChartConfig {
    /// Load a YAML file; missing keys keep their defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg = Self::from_yaml_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        debug!(path = %path.display(), "loaded chart config");
        Ok(cfg)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn plot_area(&self) -> PlotArea {
        let m = self.margin;
        PlotArea {
            top: m.top,
            right: self.width - m.right,
            bottom: self.height - m.bottom,
            left: m.left,
            width: self.width - m.left - m.right,
            height: self.height - m.top - m.bottom,
        }
    }

    /// Reject layouts with no room to draw and channels the loader never coerces.
    pub fn validate(&self, numeric_fields: &[&str]) -> Result<()> {
        let area = self.plot_area();
        if !(area.width > 0.0 && area.height > 0.0) {
            bail!(
                "plot area is empty ({}x{} canvas with margins {:?})",
                self.width,
                self.height,
                self.margin
            );
        }
        let [r0, r1] = self.radius_range;
        if !(r0 >= 0.0 && r1 >= r0) {
            bail!("radius_range must satisfy 0 <= min <= max, got {:?}", self.radius_range);
        }
        for (name, v) in [("fill_opacity", self.fill_opacity), ("rest_opacity", self.rest_opacity)] {
            if !(0.0..=1.0).contains(&v) {
                bail!("{} must be within [0, 1], got {}", name, v);
            }
        }
        let ch = &self.channels;
        for (name, field) in [("x", &ch.x), ("y", &ch.y), ("size", &ch.size), ("color", &ch.color)] {
            if !numeric_fields.contains(&field.as_str()) {
                bail!("{} channel uses {:?}, which is not a numeric field", name, field);
            }
        }
        Ok(())
    }
}
