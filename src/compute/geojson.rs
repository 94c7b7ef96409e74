//! GeoJSON ingestion of line entities and export of frames.
//!
//! Input is a `FeatureCollection` whose features carry `LineString` or
//! `MultiLineString` geometries and integer `start_year` / `end_year`
//! properties. Each feature is loaded on its own: a bad feature is rejected
//! with its index and the rest of the collection still loads.

use crate::error::{ChronoError, Result};
use crate::scene::frame::Frame;
use crate::scene::report::{LoadReport, Rejected};
use chronomap_types::Year;
use chronomap_types::line::{ConstructionInterval, LineEntity, Polyline, RoadGeometry};
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue, Value};
use log::warn;

pub const START_YEAR_PROPERTY: &str = "start_year";
pub const END_YEAR_PROPERTY: &str = "end_year";

/// Parses a GeoJSON document into line entities.
///
/// Fails only when the document itself is unreadable; individual features
/// that cannot be used end up in [`LoadReport::rejected`].
///
/// # Examples
///
/// ```
/// use chronomap::geojson::lines_from_geojson;
///
/// let doc = r#"{
///   "type": "FeatureCollection",
///   "features": [
///     { "type": "Feature",
///       "properties": { "name": "cumberland", "start_year": 1811, "end_year": 1818 },
///       "geometry": { "type": "LineString", "coordinates": [[-78.76, 39.65], [-80.72, 40.06]] } },
///     { "type": "Feature",
///       "properties": { "start_year": 1830 },
///       "geometry": { "type": "LineString", "coordinates": [[-80.72, 40.06], [-82.99, 39.96]] } }
///   ]
/// }"#;
///
/// let report = lines_from_geojson(doc)?;
/// assert_eq!(report.accepted.len(), 1);
/// assert_eq!(report.accepted[0].id, "cumberland");
/// assert_eq!(report.rejected[0].index, 1);
/// # Ok::<(), chronomap::ChronoError>(())
/// ```
pub fn lines_from_geojson(geojson: &str) -> Result<LoadReport<LineEntity>> {
    let parsed: GeoJson = geojson
        .parse()
        .map_err(|e| ChronoError::InvalidInput(format!("Failed to parse GeoJSON: {}", e)))?;

    let features = match parsed {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => {
            return Err(ChronoError::InvalidInput(
                "GeoJSON must be a Feature or FeatureCollection".to_string(),
            ));
        }
    };

    let mut report = LoadReport::new();
    for (index, feature) in features.iter().enumerate() {
        match line_from_feature(feature, index) {
            Ok(entity) => report.accepted.push(entity),
            Err(error) => {
                let id = feature_id(feature);
                warn!(
                    "Rejecting feature {} ({}): {}",
                    index,
                    id.as_deref().unwrap_or("unnamed"),
                    error
                );
                report.rejected.push(Rejected { index, id, error });
            }
        }
    }

    Ok(report)
}

/// Converts one feature into a line entity.
pub fn line_from_feature(feature: &Feature, index: usize) -> Result<LineEntity> {
    let geometry = feature
        .geometry
        .as_ref()
        .ok_or_else(|| ChronoError::InvalidInput("Feature has no geometry".to_string()))?;

    let start = year_property(feature, START_YEAR_PROPERTY)?;
    let end = year_property(feature, END_YEAR_PROPERTY)?;
    let interval = ConstructionInterval::new(start, end)?;

    let id = feature_id(feature).unwrap_or_else(|| format!("feature-{}", index));
    Ok(LineEntity::new(id, road_geometry(geometry)?, interval))
}

fn road_geometry(geometry: &Geometry) -> Result<RoadGeometry> {
    match &geometry.value {
        Value::LineString(positions) => Ok(RoadGeometry::SimpleLine(polyline(positions)?)),
        Value::MultiLineString(lines) => {
            let parts = lines
                .iter()
                .map(|positions| polyline(positions))
                .collect::<Result<Vec<_>>>()?;
            Ok(RoadGeometry::multi_part(parts)?)
        }
        other => Err(ChronoError::UnsupportedGeometry(format!(
            "expected LineString or MultiLineString, got {}",
            geometry_kind(other)
        ))),
    }
}

fn geometry_kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        _ => "GeometryCollection",
    }
}

fn polyline(positions: &[Vec<f64>]) -> Result<Polyline> {
    let coords = positions
        .iter()
        .map(|position| {
            if position.len() < 2 {
                return Err(ChronoError::InvalidInput(
                    "Coordinate must have at least 2 values".to_string(),
                ));
            }
            Ok(geo::Coord {
                x: position[0],
                y: position[1],
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Polyline::new(coords)?)
}

fn year_property(feature: &Feature, name: &str) -> Result<Year> {
    let value = feature
        .property(name)
        .ok_or_else(|| ChronoError::InvalidInput(format!("Missing property '{}'", name)))?;

    let whole = match value {
        JsonValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        JsonValue::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    whole
        .and_then(|year| Year::try_from(year).ok())
        .ok_or_else(|| {
            ChronoError::InvalidInput(format!("Property '{}' is not a year: {}", name, value))
        })
}

fn feature_id(feature: &Feature) -> Option<String> {
    match &feature.id {
        Some(Id::String(id)) => return Some(id.clone()),
        Some(Id::Number(n)) => return Some(n.to_string()),
        None => {}
    }
    ["id", "name"]
        .iter()
        .find_map(|key| match feature.property(key) {
            Some(JsonValue::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            Some(JsonValue::Number(n)) => Some(n.to_string()),
            _ => None,
        })
}

/// Frame as a GeoJSON `FeatureCollection`.
///
/// Contains one feature per visible line (`kind: "line"`) and, when the scene
/// has a landmark, a point feature for the marker (`kind: "marker"`).
pub fn frame_to_feature_collection(frame: &Frame) -> FeatureCollection {
    let mut features: Vec<Feature> = frame
        .geometry
        .visible()
        .filter_map(|line| {
            let value = line.geometry.to_geojson_value()?;
            let mut properties = JsonObject::new();
            properties.insert("kind".to_string(), "line".into());
            properties.insert("year".to_string(), frame.year.into());
            properties.insert("fraction".to_string(), line.fraction.into());
            Some(Feature {
                bbox: None,
                geometry: Some(Geometry::new(value)),
                id: Some(Id::String(line.id.clone())),
                properties: Some(properties),
                foreign_members: None,
            })
        })
        .collect();

    if let Some(landmark) = &frame.marker.landmark {
        let mut properties = JsonObject::new();
        properties.insert("kind".to_string(), "marker".into());
        properties.insert("year".to_string(), frame.year.into());
        properties.insert("name".to_string(), landmark.name.clone().into());
        properties.insert("value".to_string(), frame.marker.value.into());
        properties.insert("marker_size".to_string(), frame.marker.size.into());
        properties.insert("label".to_string(), frame.marker.label.clone().into());
        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![
                landmark.location.x(),
                landmark.location.y(),
            ]))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Serializes a frame with [`frame_to_feature_collection`].
pub fn frame_to_geojson(frame: &Frame) -> Result<String> {
    serde_json::to_string(&frame_to_feature_collection(frame)).map_err(|e| {
        ChronoError::Serialization(format!("Failed to serialize frame {}: {}", frame.year, e))
    })
}
