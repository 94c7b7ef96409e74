//! Progressive construction of line geometries.
//!
//! A line entity is drawn in proportion to how far the queried year is through
//! its construction interval. Truncation is by arc length measured from the
//! first vertex.
//!
//! A fraction of exactly zero draws nothing, so a line whose construction
//! starts in the queried year stays invisible for that year.

use crate::config::{MultiPartPolicy, PartialLineMode};
use crate::error::{ChronoError, Result};
use chronomap_types::Year;
use chronomap_types::line::{
    ConstructionInterval, PartialGeometry, PartialPolyline, Polyline, RoadGeometry,
};
use geo::{Coord, Distance, Euclidean, Point};

/// Share of the interval `[start, end]` elapsed at `year`, in `[0, 1]`.
///
/// # Examples
///
/// ```
/// use chronomap::compute::progressive::build_fraction;
///
/// assert_eq!(build_fraction(1859, 1860, 1880), 0.0);
/// assert_eq!(build_fraction(1870, 1860, 1880), 0.5);
/// assert_eq!(build_fraction(1881, 1860, 1880), 1.0);
///
/// // Built within a single year.
/// assert_eq!(build_fraction(1860, 1860, 1860), 1.0);
/// ```
pub fn build_fraction(year: Year, start: Year, end: Year) -> f64 {
    if year < start {
        return 0.0;
    }
    // Zero-length interval: complete from its first year on.
    if start == end {
        return 1.0;
    }
    if year > end {
        return 1.0;
    }

    let elapsed = i64::from(year) - i64::from(start);
    let duration = i64::from(end) - i64::from(start);
    elapsed as f64 / duration as f64
}

pub fn interval_fraction(year: Year, interval: &ConstructionInterval) -> f64 {
    build_fraction(year, interval.start(), interval.end())
}

/// Sum of the Euclidean lengths of all segments.
pub fn total_length(polyline: &Polyline) -> f64 {
    polyline
        .coords()
        .windows(2)
        .map(|w| segment_length(w[0], w[1]))
        .sum()
}

fn segment_length(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Euclidean.distance(Point::from(a), Point::from(b))
}

/// Where a target arc length falls on a polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cut {
    /// Index of the vertex starting the segment that holds the cut.
    segment: usize,
    point: Coord<f64>,
}

fn locate(coords: &[Coord<f64>], target: f64) -> Cut {
    let mut walked = 0.0;

    for (segment, w) in coords.windows(2).enumerate() {
        let length = segment_length(w[0], w[1]);
        if length == 0.0 {
            continue;
        }
        if walked + length >= target {
            let t = ((target - walked) / length).clamp(0.0, 1.0);
            return Cut {
                segment,
                point: w[0] + (w[1] - w[0]) * t,
            };
        }
        walked += length;
    }

    Cut {
        segment: coords.len() - 2,
        point: coords[coords.len() - 1],
    }
}

/// Point at arc length `distance` from the first vertex, clamped to the line.
///
/// # Examples
///
/// ```
/// use chronomap::compute::progressive::point_at_length;
/// use chronomap::Polyline;
///
/// let road = Polyline::from_xy([(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)])?;
/// assert_eq!(point_at_length(&road, 7.5), (5.0, 2.5).into());
/// assert_eq!(point_at_length(&road, 99.0), (5.0, 5.0).into());
/// # Ok::<(), chronomap::ChronoError>(())
/// ```
pub fn point_at_length(polyline: &Polyline, distance: f64) -> Coord<f64> {
    if !(distance > 0.0) {
        return polyline.first();
    }
    locate(polyline.coords(), distance).point
}

/// Drawn portion of `polyline` at `fraction`.
///
/// - `fraction <= 0` (or NaN): empty
/// - `fraction >= 1`: the full vertex sequence
/// - otherwise truncated at `fraction * total_length`, shaped by `mode`
///
/// # Examples
///
/// ```
/// use chronomap::compute::progressive::partial_line;
/// use chronomap::{PartialLineMode, Polyline};
///
/// let road = Polyline::from_xy([(0.0, 0.0), (10.0, 0.0)])?;
/// let half = partial_line(&road, 0.5, PartialLineMode::Chord);
/// assert_eq!(half.coords, vec![(0.0, 0.0).into(), (5.0, 0.0).into()]);
///
/// assert!(partial_line(&road, 0.0, PartialLineMode::Chord).is_empty());
/// # Ok::<(), chronomap::ChronoError>(())
/// ```
pub fn partial_line(polyline: &Polyline, fraction: f64, mode: PartialLineMode) -> PartialPolyline {
    if !(fraction > 0.0) {
        return PartialPolyline::empty();
    }
    if fraction >= 1.0 {
        return PartialPolyline::from(polyline);
    }

    let coords = polyline.coords();
    let cut = locate(coords, fraction * total_length(polyline));

    let coords = match mode {
        PartialLineMode::Chord => vec![polyline.first(), cut.point],
        PartialLineMode::Trace => {
            let mut traced = coords[..=cut.segment].to_vec();
            traced.push(cut.point);
            traced
        }
    };

    PartialPolyline { coords }
}

/// Drawn portion of a geometry at `fraction`, dispatched on its variant.
///
/// Fails only for partially built multi-part geometries under
/// [`MultiPartPolicy::Reject`].
pub fn partial_geometry(
    geometry: &RoadGeometry,
    fraction: f64,
    mode: PartialLineMode,
    policy: MultiPartPolicy,
) -> Result<PartialGeometry> {
    let parts = match geometry {
        RoadGeometry::SimpleLine(line) => {
            return Ok(PartialGeometry::Line(partial_line(line, fraction, mode)));
        }
        RoadGeometry::MultiPart(parts) => parts,
    };

    if !(fraction > 0.0) {
        return Ok(PartialGeometry::MultiPart(vec![
            PartialPolyline::empty();
            parts.len()
        ]));
    }
    if fraction >= 1.0 {
        return Ok(PartialGeometry::MultiPart(
            parts.iter().map(PartialPolyline::from).collect(),
        ));
    }

    match policy {
        MultiPartPolicy::Whole => Ok(PartialGeometry::MultiPart(
            parts.iter().map(PartialPolyline::from).collect(),
        )),
        MultiPartPolicy::Reject => Err(ChronoError::UnsupportedGeometry(format!(
            "multi-part geometry with {} parts cannot be partially built",
            parts.len()
        ))),
        MultiPartPolicy::Sequential => Ok(PartialGeometry::MultiPart(sequential_parts(
            parts, fraction, mode,
        ))),
    }
}

fn sequential_parts(parts: &[Polyline], fraction: f64, mode: PartialLineMode) -> Vec<PartialPolyline> {
    let lengths: Vec<f64> = parts.iter().map(total_length).collect();
    let target = fraction * lengths.iter().sum::<f64>();
    let mut walked = 0.0;

    parts
        .iter()
        .zip(lengths)
        .map(|(part, length)| {
            let drawn = if walked + length <= target {
                PartialPolyline::from(part)
            } else if walked < target {
                partial_line(part, (target - walked) / length, mode)
            } else {
                PartialPolyline::empty()
            };
            walked += length;
            drawn
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn line(points: &[(f64, f64)]) -> Polyline {
        Polyline::from_xy(points.iter().copied()).unwrap()
    }

    fn partial_length(partial: &PartialPolyline) -> f64 {
        partial
            .coords
            .windows(2)
            .map(|w| segment_length(w[0], w[1]))
            .sum()
    }

    #[test]
    fn test_build_fraction_bounds() {
        assert_eq!(build_fraction(1859, 1860, 1880), 0.0);
        assert_eq!(build_fraction(1860, 1860, 1880), 0.0);
        assert_eq!(build_fraction(1865, 1860, 1880), 0.25);
        assert_eq!(build_fraction(1880, 1860, 1880), 1.0);
        assert_eq!(build_fraction(1900, 1860, 1880), 1.0);
    }

    #[test]
    fn test_build_fraction_instant_interval() {
        assert_eq!(build_fraction(1869, 1870, 1870), 0.0);
        assert_eq!(build_fraction(1870, 1870, 1870), 1.0);
        assert_eq!(build_fraction(1871, 1870, 1870), 1.0);
    }

    #[test]
    fn test_build_fraction_inverted_interval() {
        assert_eq!(build_fraction(1850, 1880, 1860), 0.0);
        assert_eq!(build_fraction(1870, 1880, 1860), 0.0);
        assert_eq!(build_fraction(1880, 1880, 1860), 1.0);
        assert_eq!(build_fraction(1890, 1880, 1860), 1.0);
    }

    #[test]
    fn test_build_fraction_extreme_years() {
        assert!((build_fraction(0, i32::MIN, i32::MAX) - 0.5).abs() < EPS);
        assert_eq!(build_fraction(i32::MAX, i32::MIN, i32::MAX), 1.0);
    }

    #[test]
    fn test_total_length() {
        assert_eq!(total_length(&line(&[(0.0, 0.0), (3.0, 4.0)])), 5.0);
        assert_eq!(total_length(&line(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)])), 10.0);
        assert_eq!(total_length(&line(&[(1.0, 1.0), (1.0, 1.0)])), 0.0);
    }

    #[test]
    fn test_partial_line_simple_half() {
        let road = line(&[(0.0, 0.0), (10.0, 0.0)]);
        let partial = partial_line(&road, 0.5, PartialLineMode::Chord);
        assert_eq!(partial.coords, vec![(0.0, 0.0).into(), (5.0, 0.0).into()]);
    }

    #[test]
    fn test_partial_line_cut_at_shared_vertex() {
        let road = line(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)]);

        let chord = partial_line(&road, 0.5, PartialLineMode::Chord);
        assert_eq!(chord.coords, vec![(0.0, 0.0).into(), (5.0, 0.0).into()]);

        let trace = partial_line(&road, 0.5, PartialLineMode::Trace);
        assert_eq!(trace.coords, vec![(0.0, 0.0).into(), (5.0, 0.0).into()]);
    }

    #[test]
    fn test_chord_drops_intermediate_vertices() {
        let road = line(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)]);
        let chord = partial_line(&road, 0.75, PartialLineMode::Chord);
        assert_eq!(chord.coords, vec![(0.0, 0.0).into(), (5.0, 2.5).into()]);
    }

    #[test]
    fn test_trace_keeps_intermediate_vertices() {
        let road = line(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)]);
        let trace = partial_line(&road, 0.75, PartialLineMode::Trace);
        assert_eq!(
            trace.coords,
            vec![(0.0, 0.0).into(), (5.0, 0.0).into(), (5.0, 2.5).into()]
        );
        assert!((partial_length(&trace) - 7.5).abs() < EPS);
    }

    #[test]
    fn test_partial_line_ends() {
        let road = line(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)]);

        assert!(partial_line(&road, 0.0, PartialLineMode::Chord).is_empty());
        assert!(partial_line(&road, -0.5, PartialLineMode::Trace).is_empty());
        assert!(partial_line(&road, f64::NAN, PartialLineMode::Chord).is_empty());

        let full = partial_line(&road, 1.0, PartialLineMode::Chord);
        assert_eq!(full.coords, road.coords());
        let beyond = partial_line(&road, 3.0, PartialLineMode::Trace);
        assert_eq!(beyond.coords, road.coords());
    }

    #[test]
    fn test_zero_length_segments_are_skipped() {
        let road = line(&[(0.0, 0.0), (0.0, 0.0), (4.0, 0.0), (4.0, 0.0), (4.0, 4.0)]);
        let trace = partial_line(&road, 0.25, PartialLineMode::Trace);
        assert_eq!(
            trace.coords,
            vec![(0.0, 0.0).into(), (0.0, 0.0).into(), (2.0, 0.0).into()]
        );
        assert_eq!(point_at_length(&road, 6.0), (4.0, 2.0).into());
    }

    #[test]
    fn test_degenerate_length_polyline() {
        let road = line(&[(2.0, 2.0), (2.0, 2.0)]);
        let partial = partial_line(&road, 0.5, PartialLineMode::Chord);
        assert_eq!(partial.coords, vec![(2.0, 2.0).into(), (2.0, 2.0).into()]);
    }

    #[test]
    fn test_point_at_length_clamps() {
        let road = line(&[(0.0, 0.0), (10.0, 0.0)]);
        assert_eq!(point_at_length(&road, -1.0), (0.0, 0.0).into());
        assert_eq!(point_at_length(&road, 2.5), (2.5, 0.0).into());
        assert_eq!(point_at_length(&road, 11.0), (10.0, 0.0).into());
    }

    fn two_parts() -> RoadGeometry {
        RoadGeometry::multi_part(vec![
            line(&[(0.0, 0.0), (4.0, 0.0)]),
            line(&[(10.0, 0.0), (10.0, 4.0)]),
        ])
        .unwrap()
    }

    #[test]
    fn test_multi_part_sequential() {
        let geometry = two_parts();
        let partial = partial_geometry(
            &geometry,
            0.75,
            PartialLineMode::Chord,
            MultiPartPolicy::Sequential,
        )
        .unwrap();

        let PartialGeometry::MultiPart(parts) = partial else {
            panic!("expected multi-part result");
        };
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].coords, vec![(0.0, 0.0).into(), (4.0, 0.0).into()]);
        assert_eq!(parts[1].coords, vec![(10.0, 0.0).into(), (10.0, 2.0).into()]);
    }

    #[test]
    fn test_multi_part_sequential_first_part_only() {
        let partial = partial_geometry(
            &two_parts(),
            0.25,
            PartialLineMode::Chord,
            MultiPartPolicy::Sequential,
        )
        .unwrap();

        let PartialGeometry::MultiPart(parts) = partial else {
            panic!("expected multi-part result");
        };
        assert_eq!(parts[0].coords, vec![(0.0, 0.0).into(), (2.0, 0.0).into()]);
        assert!(parts[1].is_empty());
    }

    #[test]
    fn test_multi_part_whole_and_reject() {
        let geometry = two_parts();

        let whole = partial_geometry(
            &geometry,
            0.1,
            PartialLineMode::Chord,
            MultiPartPolicy::Whole,
        )
        .unwrap();
        assert_eq!(
            whole,
            PartialGeometry::MultiPart(geometry.parts().iter().map(PartialPolyline::from).collect())
        );

        let rejected = partial_geometry(
            &geometry,
            0.1,
            PartialLineMode::Chord,
            MultiPartPolicy::Reject,
        );
        assert!(matches!(rejected, Err(ChronoError::UnsupportedGeometry(_))));

        // Not started and fully built are well-defined under every policy.
        let empty = partial_geometry(&geometry, 0.0, PartialLineMode::Chord, MultiPartPolicy::Reject)
            .unwrap();
        assert!(empty.is_empty());
        let full = partial_geometry(&geometry, 1.0, PartialLineMode::Chord, MultiPartPolicy::Reject)
            .unwrap();
        assert_eq!(full, whole);
    }

    #[test]
    fn test_simple_line_dispatch() {
        let geometry = RoadGeometry::from(line(&[(0.0, 0.0), (10.0, 0.0)]));
        let partial =
            partial_geometry(&geometry, 0.5, PartialLineMode::Chord, MultiPartPolicy::Reject)
                .unwrap();
        assert_eq!(
            partial,
            PartialGeometry::Line(PartialPolyline {
                coords: vec![(0.0, 0.0).into(), (5.0, 0.0).into()]
            })
        );
    }
}
