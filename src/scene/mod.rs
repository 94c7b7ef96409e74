//! The immutable snapshot of one time-lapse run.
//!
//! A [`Scene`] bundles the scalar series, the line entities, an optional
//! landmark and the [`Config`]. Every query borrows it read-only, so frames
//! can be computed in any order and on any thread.
//!
//! ```rust
//! use chronomap::{ConstructionInterval, LineEntity, Polyline, Scene, TimeSeries};
//!
//! let scene = Scene::builder()
//!     .series(TimeSeries::from_pairs([(1850, 100.0), (1900, 100_000.0)])?)
//!     .line(LineEntity::new(
//!         "national-road",
//!         Polyline::from_xy([(0.0, 0.0), (10.0, 0.0)])?,
//!         ConstructionInterval::new(1860, 1880)?,
//!     ))
//!     .build()?;
//!
//! assert_eq!(scene.value_at(1875)?, 50_050.0);
//!
//! let geometry = scene.frame_geometry(1870);
//! assert_eq!(geometry.lines[0].fraction, 0.5);
//! # Ok::<(), chronomap::ChronoError>(())
//! ```

pub mod frame;
pub mod report;

use crate::builder::SceneBuilder;
use crate::compute::interpolate::{dense_series, interpolate};
use crate::compute::progressive::{interval_fraction, partial_geometry};
use crate::config::Config;
use crate::error::Result;
use chronomap_types::Year;
use chronomap_types::landmark::Landmark;
use chronomap_types::line::LineEntity;
use chronomap_types::series::{Sample, TimeSeries, YearRange};
use log::{debug, warn};

use frame::{EntityFailure, Frame, FrameGeometry, FrameLine, Marker, marker_label};
use report::{Rejected, RunSummary};

#[derive(Debug)]
pub struct Scene {
    pub(crate) series: TimeSeries,
    pub(crate) lines: Vec<LineEntity>,
    pub(crate) landmark: Option<Landmark>,
    pub(crate) config: Config,
    pub(crate) rejected: Vec<Rejected>,
}

impl Scene {
    pub fn builder() -> SceneBuilder {
        SceneBuilder::new()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    pub fn lines(&self) -> &[LineEntity] {
        &self.lines
    }

    pub fn landmark(&self) -> Option<&Landmark> {
        self.landmark.as_ref()
    }

    /// Inputs skipped while loading or building the scene.
    pub fn rejected(&self) -> &[Rejected] {
        &self.rejected
    }

    pub fn year_range(&self) -> YearRange {
        self.config.year_range
    }

    /// Interpolated series value at `year`.
    pub fn value_at(&self, year: Year) -> Result<f64> {
        interpolate(&self.series, year, self.config.out_of_domain)
    }

    /// One value per year of the configured range.
    pub fn dense_series(&self) -> Result<Vec<Sample>> {
        self.dense_series_in(self.config.year_range)
    }

    pub fn dense_series_in(&self, range: YearRange) -> Result<Vec<Sample>> {
        dense_series(&self.series, range, self.config.out_of_domain)
    }

    /// Partial geometry of every line entity at `year`.
    ///
    /// An entity that cannot be drawn is logged and reported in
    /// [`FrameGeometry::failures`]; the remaining entities are still drawn.
    pub fn frame_geometry(&self, year: Year) -> FrameGeometry {
        let mut lines = Vec::with_capacity(self.lines.len());
        let mut failures = Vec::new();

        for entity in &self.lines {
            let fraction = interval_fraction(year, &entity.interval);
            match partial_geometry(
                &entity.geometry,
                fraction,
                self.config.partial_line,
                self.config.multi_part,
            ) {
                Ok(geometry) => lines.push(FrameLine {
                    id: entity.id.clone(),
                    fraction,
                    geometry,
                }),
                Err(error) => {
                    warn!("Skipping line '{}' in {}: {}", entity.id, year, error);
                    failures.push(EntityFailure {
                        id: entity.id.clone(),
                        error,
                    });
                }
            }
        }

        FrameGeometry {
            year,
            lines,
            failures,
        }
    }

    /// Marker and line geometry for `year`.
    pub fn frame(&self, year: Year) -> Result<Frame> {
        let value = self.value_at(year)?;
        let geometry = self.frame_geometry(year);

        debug!(
            "Frame {}: value {:.1}, {} of {} lines visible",
            year,
            value,
            geometry.visible_count(),
            self.lines.len()
        );

        let name = self
            .landmark
            .as_ref()
            .map(|l| l.name.as_str())
            .filter(|n| !n.is_empty());
        Ok(Frame {
            year,
            marker: Marker {
                landmark: self.landmark.clone(),
                value,
                size: self.config.marker.size(value),
                label: marker_label(name, year, value),
            },
            geometry,
        })
    }

    /// Frames for every year of the configured range, in ascending order.
    pub fn frames(&self) -> Result<Vec<Frame>> {
        self.frames_in(self.config.year_range)
    }

    #[cfg(feature = "parallel")]
    pub fn frames_in(&self, range: YearRange) -> Result<Vec<Frame>> {
        use rayon::prelude::*;

        range.iter().into_par_iter().map(|year| self.frame(year)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    pub fn frames_in(&self, range: YearRange) -> Result<Vec<Frame>> {
        range.iter().map(|year| self.frame(year)).collect()
    }

    pub fn summarize(&self, frames: &[Frame]) -> RunSummary {
        RunSummary::from_frames(frames, self.rejected.len())
    }
}
