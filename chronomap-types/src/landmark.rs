use geo::Point;
use serde::{Deserialize, Serialize};

/// The labelled location whose marker encodes the scalar series.
///
/// # Examples
///
/// ```
/// use chronomap_types::landmark::Landmark;
/// use geo::Point;
///
/// let chicago = Landmark::new("Chicago", Point::new(-87.6298, 41.8781));
/// assert_eq!(chicago.location.x(), -87.6298);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub name: String,
    pub location: Point<f64>,
}

impl Landmark {
    pub fn new(name: impl Into<String>, location: Point<f64>) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}
