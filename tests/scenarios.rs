use chronomap::prelude::*;
use chronomap::{PartialGeometry, PartialPolyline, Sample};
use geo::Coord;

fn coords(points: &[(f64, f64)]) -> Vec<Coord<f64>> {
    points.iter().map(|&p| Coord::from(p)).collect()
}

fn drawn(scene: &Scene, year: Year) -> PartialPolyline {
    let geometry = scene.frame_geometry(year);
    match &geometry.lines[0].geometry {
        PartialGeometry::Line(line) => line.clone(),
        other => panic!("expected a simple line, got {:?}", other),
    }
}

fn scene_with(points: &[(f64, f64)], start: Year, end: Year) -> Scene {
    Scene::builder()
        .series(TimeSeries::from_pairs([(1850, 100.0), (1900, 100_000.0)]).unwrap())
        .line(LineEntity::new(
            "road",
            Polyline::from_xy(points.iter().copied()).unwrap(),
            ConstructionInterval::new(start, end).unwrap(),
        ))
        .build()
        .expect("Failed to build scene")
}

#[test]
fn test_midpoint_population() {
    let series = TimeSeries::from_pairs([(1850, 100.0), (1900, 100_000.0)]).unwrap();
    let value = interpolate(&series, 1875, OutOfDomainPolicy::Clamp).unwrap();
    assert_eq!(value, 50_050.0);
}

#[test]
fn test_half_built_road() {
    let scene = scene_with(&[(0.0, 0.0), (10.0, 0.0)], 1860, 1880);

    assert_eq!(build_fraction(1870, 1860, 1880), 0.5);
    assert_eq!(drawn(&scene, 1870).coords, coords(&[(0.0, 0.0), (5.0, 0.0)]));
}

#[test]
fn test_road_invisible_before_construction() {
    let scene = scene_with(&[(0.0, 0.0), (10.0, 0.0)], 1860, 1880);

    assert_eq!(build_fraction(1859, 1860, 1880), 0.0);
    assert!(drawn(&scene, 1859).is_empty());
    // Construction starting this year is still invisible.
    assert!(drawn(&scene, 1860).is_empty());
}

#[test]
fn test_cut_at_shared_vertex() {
    let scene = scene_with(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)], 1900, 1910);

    assert_eq!(build_fraction(1905, 1900, 1910), 0.5);
    assert_eq!(drawn(&scene, 1905).coords, coords(&[(0.0, 0.0), (5.0, 0.0)]));
}

#[test]
fn test_fully_built_road_is_unchanged() {
    let points = [(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)];
    let scene = scene_with(&points, 1900, 1910);

    assert_eq!(drawn(&scene, 1910).coords, coords(&points));
    assert_eq!(drawn(&scene, 1950).coords, coords(&points));
}

#[test]
fn test_trace_mode_follows_the_road() {
    let scene = Scene::builder()
        .series(TimeSeries::from_pairs([(1900, 1.0)]).unwrap())
        .line(LineEntity::new(
            "road",
            Polyline::from_xy([(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)]).unwrap(),
            ConstructionInterval::new(1900, 1910).unwrap(),
        ))
        .config(Config::default().with_partial_line(PartialLineMode::Trace))
        .build()
        .unwrap();

    assert_eq!(
        drawn(&scene, 1908).coords,
        coords(&[(0.0, 0.0), (5.0, 0.0), (5.0, 3.0)])
    );
}

#[test]
fn test_dense_table_over_default_range() {
    let scene = Scene::builder()
        .series(
            TimeSeries::from_pairs([
                (1850, 29_963.0),
                (1860, 112_172.0),
                (1870, 298_977.0),
                (1880, 503_185.0),
                (1890, 1_099_850.0),
                (1900, 1_698_575.0),
                (1910, 2_185_283.0),
                (1920, 2_701_705.0),
                (1930, 3_376_438.0),
                (1940, 3_396_808.0),
                (1950, 3_620_962.0),
            ])
            .unwrap(),
        )
        .build()
        .unwrap();

    let table = scene.dense_series().unwrap();
    assert_eq!(table.len(), 101);
    assert_eq!(table[0], Sample::new(1850, 29_963.0));
    assert_eq!(table[100], Sample::new(1950, 3_620_962.0));
    assert_eq!(table[5].value, (29_963.0 + 112_172.0) / 2.0);
}
