//! Per-year output handed to a renderer.

use crate::error::ChronoError;
use chronomap_types::Year;
use chronomap_types::landmark::Landmark;
use chronomap_types::line::PartialGeometry;

/// One line entity as drawn in a given year.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLine {
    pub id: String,
    pub fraction: f64,
    pub geometry: PartialGeometry,
}

impl FrameLine {
    pub fn is_visible(&self) -> bool {
        !self.geometry.is_empty()
    }
}

/// An entity that could not be drawn this year.
#[derive(Debug)]
pub struct EntityFailure {
    pub id: String,
    pub error: ChronoError,
}

/// Line geometry of one frame: one entry per entity that could be computed,
/// plus the entities that failed.
#[derive(Debug)]
pub struct FrameGeometry {
    pub year: Year,
    pub lines: Vec<FrameLine>,
    pub failures: Vec<EntityFailure>,
}

impl FrameGeometry {
    pub fn visible(&self) -> impl Iterator<Item = &FrameLine> {
        self.lines.iter().filter(|line| line.is_visible())
    }

    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }
}

/// The point marker encoding the interpolated series value.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub landmark: Option<Landmark>,
    pub value: f64,
    pub size: f64,
    pub label: String,
}

/// Everything a renderer needs for one year.
#[derive(Debug)]
pub struct Frame {
    pub year: Year,
    pub marker: Marker,
    pub geometry: FrameGeometry,
}

/// Marker caption, e.g. `"Chicago 1875\nPop: 50,050"`.
pub fn marker_label(name: Option<&str>, year: Year, value: f64) -> String {
    let count = group_thousands(value.trunc() as i64);
    match name {
        Some(name) => format!("{} {}\nPop: {}", name, year, count),
        None => format!("{}\nPop: {}", year, count),
    }
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_698_575), "1,698,575");
        assert_eq!(group_thousands(-12_345), "-12,345");
    }

    #[test]
    fn test_marker_label() {
        assert_eq!(
            marker_label(Some("Chicago"), 1875, 50_050.9),
            "Chicago 1875\nPop: 50,050"
        );
        assert_eq!(marker_label(None, 1900, 12.0), "1900\nPop: 12");
    }
}
