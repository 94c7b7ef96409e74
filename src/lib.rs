//! Temporal interpolation and progressive line construction for time-lapse maps.
//!
//! ## Features
//! - **Interpolation**: dense yearly values from sparse, irregular samples with an
//!   explicit out-of-domain policy (clamp or fail)
//! - **Progressive lines**: arc-length truncation of polylines by construction progress,
//!   as a two-point chord or a vertex-preserving trace
//! - **Multi-part geometries**: an explicit, configurable truncation policy
//! - **Fail-soft frames**: a broken line entity is reported and skipped, never fatal
//! - **Parallel frames**: years are computed on the rayon pool (`parallel` feature)
//!
//! ```rust
//! use chronomap::{ConstructionInterval, LineEntity, Polyline, Scene, TimeSeries, YearRange};
//!
//! let scene = Scene::builder()
//!     .series(TimeSeries::from_pairs([(1850, 100.0), (1900, 100_000.0)])?)
//!     .line(LineEntity::new(
//!         "segment",
//!         Polyline::from_xy([(0.0, 0.0), (10.0, 0.0)])?,
//!         ConstructionInterval::new(1860, 1880)?,
//!     ))
//!     .year_range(YearRange::new(1850, 1900)?)
//!     .build()?;
//!
//! let table = scene.dense_series()?;
//! assert_eq!(table.len(), 51);
//!
//! let frame = scene.frame(1870)?;
//! assert_eq!(frame.geometry.lines[0].fraction, 0.5);
//! # Ok::<(), chronomap::ChronoError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod io;
pub mod scene;

pub use builder::SceneBuilder;
pub use error::{ChronoError, Result};
pub use scene::Scene;

pub use chronomap_types::Year;
pub use chronomap_types::landmark::Landmark;
pub use chronomap_types::line::{
    ConstructionInterval, LineEntity, PartialGeometry, PartialPolyline, Polyline, RoadGeometry,
};
pub use chronomap_types::series::{Sample, TimeSeries, YearRange};

pub use config::{Config, MarkerScale, MultiPartPolicy, OutOfDomainPolicy, PartialLineMode};

pub use scene::frame::{EntityFailure, Frame, FrameGeometry, FrameLine, Marker};
pub use scene::report::{LoadReport, Rejected, RunSummary};

pub use compute::interpolate::{dense_series, interpolate};
pub use compute::progressive::{build_fraction, partial_geometry, partial_line, total_length};

// Re-export validation and GeoJSON utilities
pub use compute::geojson;
pub use compute::validation;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{ChronoError, Result, Scene, SceneBuilder};

    pub use crate::{ConstructionInterval, LineEntity, Polyline, RoadGeometry};
    pub use crate::{Sample, TimeSeries, Year, YearRange};

    pub use crate::{Config, MultiPartPolicy, OutOfDomainPolicy, PartialLineMode};

    pub use crate::{build_fraction, interpolate, partial_line};

    pub use crate::{geojson, validation};
}
