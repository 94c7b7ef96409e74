//! Scene builder for assembling a run
//!
//! Collects the series, line entities and configuration, validates them and
//! freezes them into a [`Scene`].

use crate::compute::validation::{validate_entity, validate_series_coverage};
use crate::config::Config;
use crate::error::{ChronoError, Result};
use crate::scene::Scene;
use crate::scene::report::{LoadReport, Rejected};
use chronomap_types::landmark::Landmark;
use chronomap_types::line::LineEntity;
use chronomap_types::series::{TimeSeries, YearRange};
use log::{info, warn};
use std::collections::HashSet;

/// Builder for a [`Scene`].
///
/// Invalid line entities are rejected one by one and recorded on the scene;
/// an invalid series or configuration fails the whole build.
#[derive(Debug, Default)]
pub struct SceneBuilder {
    series: Option<TimeSeries>,
    lines: Vec<LineEntity>,
    landmark: Option<Landmark>,
    config: Config,
    rejected: Vec<Rejected>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn series(mut self, series: TimeSeries) -> Self {
        self.series = Some(series);
        self
    }

    pub fn line(mut self, line: LineEntity) -> Self {
        self.lines.push(line);
        self
    }

    pub fn lines<I: IntoIterator<Item = LineEntity>>(mut self, lines: I) -> Self {
        self.lines.extend(lines);
        self
    }

    /// Add the accepted entities of a loader report and keep its rejections.
    pub fn load_report(mut self, report: LoadReport<LineEntity>) -> Self {
        self.lines.extend(report.accepted);
        self.rejected.extend(report.rejected);
        self
    }

    pub fn landmark(mut self, landmark: Landmark) -> Self {
        self.landmark = Some(landmark);
        self
    }

    /// Set the run configuration (policies, year range, marker scale).
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn year_range(mut self, range: YearRange) -> Self {
        self.config = self.config.with_year_range(range);
        self
    }

    /// Build the scene. Fails only for run-level problems.
    pub fn build(self) -> Result<Scene> {
        let series = self
            .series
            .ok_or_else(|| ChronoError::Domain("no time series supplied".to_string()))?;

        self.config.validate()?;
        validate_series_coverage(&series, self.config.year_range, self.config.out_of_domain)?;

        let mut rejected = self.rejected;
        let mut lines = Vec::with_capacity(self.lines.len());
        let mut seen = HashSet::new();

        for (index, entity) in self.lines.into_iter().enumerate() {
            let verdict = validate_entity(&entity).and_then(|()| {
                if seen.contains(&entity.id) {
                    Err(ChronoError::InvalidInput(format!(
                        "duplicate id '{}'",
                        entity.id
                    )))
                } else {
                    Ok(())
                }
            });

            match verdict {
                Ok(()) => {
                    seen.insert(entity.id.clone());
                    lines.push(entity);
                }
                Err(error) => {
                    warn!("Rejecting line entity {}: {}", index, error);
                    rejected.push(Rejected {
                        index,
                        id: Some(entity.id),
                        error,
                    });
                }
            }
        }

        info!(
            "Scene ready: {} samples, {} lines ({} rejected), years {}..={}",
            series.len(),
            lines.len(),
            rejected.len(),
            self.config.year_range.min(),
            self.config.year_range.max()
        );

        Ok(Scene {
            series,
            lines,
            landmark: self.landmark,
            config: self.config,
            rejected,
        })
    }
}
