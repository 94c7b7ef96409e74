use crate::Year;
use crate::error::TypesError;
use geo::{Coord, LineString};
use serde::{Deserialize, Serialize};

/// An ordered run of at least two finite planar vertices.
///
/// # Examples
///
/// ```
/// use chronomap_types::line::Polyline;
///
/// let road = Polyline::new(vec![(0.0, 0.0).into(), (5.0, 0.0).into(), (5.0, 5.0).into()])?;
/// assert_eq!(road.vertex_count(), 3);
/// assert_eq!(road.first(), (0.0, 0.0).into());
///
/// assert!(Polyline::new(vec![(0.0, 0.0).into()]).is_err());
/// # Ok::<(), chronomap_types::TypesError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LineString<f64>", into = "LineString<f64>")]
pub struct Polyline(LineString<f64>);

impl Polyline {
    pub fn new(coords: Vec<Coord<f64>>) -> Result<Self, TypesError> {
        Self::try_from(LineString::new(coords))
    }

    pub fn from_xy<I>(points: I) -> Result<Self, TypesError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self::new(points.into_iter().map(Coord::from).collect())
    }

    pub fn first(&self) -> Coord<f64> {
        self.0.0[0]
    }

    pub fn last(&self) -> Coord<f64> {
        self.0.0[self.0.0.len() - 1]
    }

    pub fn vertex_count(&self) -> usize {
        self.0.0.len()
    }

    pub fn coords(&self) -> &[Coord<f64>] {
        &self.0.0
    }

    pub fn as_line_string(&self) -> &LineString<f64> {
        &self.0
    }

    /// Geometry as a GeoJSON `LineString`.
    #[cfg(feature = "geojson")]
    pub fn to_geojson_value(&self) -> geojson::Value {
        geojson::Value::LineString(positions(self.coords()))
    }
}

impl TryFrom<LineString<f64>> for Polyline {
    type Error = TypesError;

    fn try_from(line: LineString<f64>) -> Result<Self, Self::Error> {
        if line.0.len() < 2 {
            return Err(TypesError::TooFewVertices(line.0.len()));
        }
        if let Some((index, c)) = line
            .0
            .iter()
            .enumerate()
            .find(|(_, c)| !c.x.is_finite() || !c.y.is_finite())
        {
            return Err(TypesError::NonFiniteCoordinate {
                index,
                x: c.x,
                y: c.y,
            });
        }
        Ok(Self(line))
    }
}

impl From<Polyline> for LineString<f64> {
    fn from(polyline: Polyline) -> Self {
        polyline.0
    }
}

/// Years over which a line entity is under construction.
///
/// The checked constructor rejects `start > end`. Fraction computations stay
/// well-defined for any pair of years regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct ConstructionInterval {
    start: Year,
    end: Year,
}

#[derive(Deserialize)]
struct RawInterval {
    start: Year,
    end: Year,
}

impl ConstructionInterval {
    pub fn new(start: Year, end: Year) -> Result<Self, TypesError> {
        if start > end {
            return Err(TypesError::InvertedInterval { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Year {
        self.start
    }

    pub fn end(&self) -> Year {
        self.end
    }

    pub fn duration(&self) -> Year {
        self.end - self.start
    }

    /// Built within a single year.
    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }
}

impl TryFrom<RawInterval> for ConstructionInterval {
    type Error = TypesError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

/// Shape of a line entity.
///
/// Truncation is defined separately for each variant, so multi-part roads
/// never fall back to whole-geometry drawing by accident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "parts", rename_all = "snake_case")]
pub enum RoadGeometry {
    SimpleLine(Polyline),
    MultiPart(Vec<Polyline>),
}

impl RoadGeometry {
    pub fn multi_part(parts: Vec<Polyline>) -> Result<Self, TypesError> {
        if parts.is_empty() {
            return Err(TypesError::EmptyMultiPart);
        }
        Ok(Self::MultiPart(parts))
    }

    pub fn parts(&self) -> &[Polyline] {
        match self {
            Self::SimpleLine(line) => std::slice::from_ref(line),
            Self::MultiPart(parts) => parts,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.parts().iter().map(Polyline::vertex_count).sum()
    }

    #[cfg(feature = "geojson")]
    pub fn to_geojson_value(&self) -> geojson::Value {
        match self {
            Self::SimpleLine(line) => line.to_geojson_value(),
            Self::MultiPart(parts) => geojson::Value::MultiLineString(
                parts.iter().map(|p| positions(p.coords())).collect(),
            ),
        }
    }
}

impl From<Polyline> for RoadGeometry {
    fn from(line: Polyline) -> Self {
        Self::SimpleLine(line)
    }
}

/// A road (or any progressively built line) with its construction interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineEntity {
    pub id: String,
    pub geometry: RoadGeometry,
    pub interval: ConstructionInterval,
}

impl LineEntity {
    pub fn new(
        id: impl Into<String>,
        geometry: impl Into<RoadGeometry>,
        interval: ConstructionInterval,
    ) -> Self {
        Self {
            id: id.into(),
            geometry: geometry.into(),
            interval,
        }
    }
}

/// The drawn portion of a polyline at some build fraction.
///
/// Empty when nothing is built yet, the full vertex sequence once complete,
/// and a truncated sequence in between.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialPolyline {
    pub coords: Vec<Coord<f64>>,
}

impl PartialPolyline {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[cfg(feature = "geojson")]
    pub fn to_geojson_value(&self) -> Option<geojson::Value> {
        (!self.is_empty()).then(|| geojson::Value::LineString(positions(&self.coords)))
    }
}

impl From<&Polyline> for PartialPolyline {
    fn from(line: &Polyline) -> Self {
        Self {
            coords: line.coords().to_vec(),
        }
    }
}

/// Drawn portion of a [`RoadGeometry`], mirroring its variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "parts", rename_all = "snake_case")]
pub enum PartialGeometry {
    Line(PartialPolyline),
    MultiPart(Vec<PartialPolyline>),
}

impl PartialGeometry {
    /// True when no part has anything to draw.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Line(line) => line.is_empty(),
            Self::MultiPart(parts) => parts.iter().all(PartialPolyline::is_empty),
        }
    }

    /// `None` when there is nothing to draw.
    #[cfg(feature = "geojson")]
    pub fn to_geojson_value(&self) -> Option<geojson::Value> {
        match self {
            Self::Line(line) => line.to_geojson_value(),
            Self::MultiPart(parts) => {
                let drawn: Vec<_> = parts
                    .iter()
                    .filter(|p| !p.is_empty())
                    .map(|p| positions(&p.coords))
                    .collect();
                (!drawn.is_empty()).then_some(geojson::Value::MultiLineString(drawn))
            }
        }
    }
}

#[cfg(feature = "geojson")]
fn positions(coords: &[Coord<f64>]) -> Vec<Vec<f64>> {
    coords.iter().map(|c| vec![c.x, c.y]).collect()
}
