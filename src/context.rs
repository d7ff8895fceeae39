// src/context.rs

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    config::ChartConfig,
    dataset::{Dataset, NUMERIC_FIELDS},
    encode::{build_encoding, join, Frame, Transition},
};

/// Everything a redraw needs: the loaded data, the layout, and the frame on screen.
/// Year changes go through [`ChartContext::select_year`], never through shared globals.
#[derive(Debug, Clone)]
pub struct ChartContext {
    dataset: Arc<Dataset>,
    config: ChartConfig,
    years: Vec<i32>,
    frame: Frame,
}

impl ChartContext {
    /// Validate the config and build the initial frame.
    pub fn new(dataset: Arc<Dataset>, config: ChartConfig, year: Option<i32>) -> Result<Self> {
        config.validate(NUMERIC_FIELDS)?;
        let year = year.unwrap_or(config.initial_year);
        let years = dataset.years();
        let frame = build_encoding(&dataset, year, &config).frame();
        info!(year, points = frame.points.len(), "initial frame");
        Ok(Self {
            dataset,
            config,
            years,
            frame,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn year(&self) -> i32 {
        self.frame.year
    }

    /// Years with at least one row, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Slider bounds, or `None` for a dataset with no valid years.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        Some((*self.years.first()?, *self.years.last()?))
    }

    /// The keyed transition that draws the initial frame from nothing.
    pub fn initial_transition(&self) -> Transition {
        join(None, &self.frame)
    }

    /// Recompute the view for `year` and report which bubbles enter, move, or leave.
    pub fn select_year(&mut self, year: i32) -> Transition {
        let next = build_encoding(&self.dataset, year, &self.config).frame();
        let transition = join(Some(&self.frame), &next);
        debug!(
            year,
            enter = transition.enter.len(),
            update = transition.update.len(),
            exit = transition.exit.len(),
            "year selected"
        );
        self.frame = next;
        transition
    }

    /// One frame per year, ascending, each with its own domains.
    pub fn all_frames(&self) -> Vec<Frame> {
        self.years
            .iter()
            .map(|&y| build_encoding(&self.dataset, y, &self.config).frame())
            .collect()
    }
}
