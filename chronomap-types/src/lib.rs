//! # chronomap-types
//!
//! Core temporal and geometric data types for chronomap.
//!
//! This crate provides the immutable inputs of a time-lapse computation:
//!
//! - **Series types**: `Sample`, `TimeSeries`, `YearRange`
//! - **Line types**: `Polyline`, `RoadGeometry`, `ConstructionInterval`, `LineEntity`
//! - **Derived types**: `PartialPolyline`, `PartialGeometry`
//! - **Landmark**: the labelled point whose marker encodes the series
//!
//! All types are serializable with Serde and built on top of the `geo` crate's
//! geometric primitives. Constructors validate their invariants, so a value of
//! any of these types is always well-formed.
//!
//! ## Examples
//!
//! ```rust
//! use chronomap_types::series::{Sample, TimeSeries};
//! use chronomap_types::line::{ConstructionInterval, Polyline};
//!
//! let series = TimeSeries::new(vec![Sample::new(1850, 100.0), Sample::new(1900, 100_000.0)])?;
//! assert_eq!(series.len(), 2);
//!
//! let road = Polyline::new(vec![(0.0, 0.0).into(), (10.0, 0.0).into()])?;
//! let interval = ConstructionInterval::new(1860, 1880)?;
//! assert_eq!(road.vertex_count(), 2);
//! assert_eq!(interval.duration(), 20);
//! # Ok::<(), chronomap_types::TypesError>(())
//! ```

pub mod error;
pub mod landmark;
pub mod line;
pub mod series;

pub use error::TypesError;

/// Calendar year used as the time axis throughout chronomap.
pub type Year = i32;
