//! Reading run inputs from disk and writing series tables.
//!
//! Series come from CSV (a header row naming the columns) or JSON (an array
//! of `{ "year", "value" }` objects). Lines come from GeoJSON, see
//! [`crate::compute::geojson`].

use crate::compute::geojson::lines_from_geojson;
use crate::error::{ChronoError, Result};
use crate::scene::report::LoadReport;
use chronomap_types::Year;
use chronomap_types::landmark::Landmark;
use chronomap_types::line::LineEntity;
use chronomap_types::series::{Sample, TimeSeries};
use geo::Point;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Column names used when reading a series from CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesColumns {
    pub year: String,
    pub value: String,
    /// Optional column naming the landmark.
    pub name: String,
    pub lon: String,
    pub lat: String,
}

impl Default for SeriesColumns {
    fn default() -> Self {
        Self {
            year: "year".to_string(),
            value: "population".to_string(),
            name: "city".to_string(),
            lon: "lon".to_string(),
            lat: "lat".to_string(),
        }
    }
}

/// A loaded series and, when the source has coordinates, its landmark.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesInput {
    pub series: TimeSeries,
    pub landmark: Option<Landmark>,
}

/// Reads a series from CSV text.
///
/// Rows with an empty value cell are skipped as missing samples. Any other
/// malformed row fails the whole series. The landmark location is taken from
/// the first row when `lon` and `lat` columns are present.
///
/// # Examples
///
/// ```
/// use chronomap::io::{SeriesColumns, series_from_csv};
///
/// let csv = "year,population,lat,lon,city\n1850,29963,41.88,-87.63,Chicago\n1900,1698575,41.88,-87.63,Chicago\n";
/// let input = series_from_csv(csv.as_bytes(), &SeriesColumns::default())?;
///
/// assert_eq!(input.series.len(), 2);
/// assert_eq!(input.landmark.unwrap().name, "Chicago");
/// # Ok::<(), chronomap::ChronoError>(())
/// ```
pub fn series_from_csv<R: BufRead>(reader: R, columns: &SeriesColumns) -> Result<SeriesInput> {
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => split_row(line?.trim_start_matches('\u{feff}')),
        None => return Err(ChronoError::Domain("CSV series is empty".to_string())),
    };
    let position = |name: &str| header.iter().position(|h| h == name);

    let year_col = position(&columns.year).ok_or_else(|| {
        ChronoError::InvalidInput(format!("CSV has no '{}' column", columns.year))
    })?;
    let value_col = position(&columns.value).ok_or_else(|| {
        ChronoError::InvalidInput(format!("CSV has no '{}' column", columns.value))
    })?;
    let name_col = position(&columns.name);
    let location_cols = position(&columns.lon).zip(position(&columns.lat));

    let mut samples = Vec::new();
    let mut landmark = None;

    for (offset, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row_number = offset + 2;
        let row = split_row(&line);
        let cell = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");

        let year: Year = cell(year_col).parse().map_err(|_| {
            ChronoError::Domain(format!(
                "Row {}: '{}' is not a year",
                row_number,
                cell(year_col)
            ))
        })?;

        let raw_value = cell(value_col);
        if raw_value.is_empty() {
            debug!("Row {}: no value for {}, skipping", row_number, year);
            continue;
        }
        let value: f64 = raw_value.parse().map_err(|_| {
            ChronoError::Domain(format!(
                "Row {}: '{}' is not a number",
                row_number, raw_value
            ))
        })?;
        samples.push(Sample::new(year, value));

        if landmark.is_none()
            && let Some((lon_col, lat_col)) = location_cols
        {
            landmark = Some(parse_landmark(
                cell(lon_col),
                cell(lat_col),
                name_col.map(cell).filter(|n| !n.is_empty()),
                row_number,
            )?);
        }
    }

    Ok(SeriesInput {
        series: TimeSeries::new(samples)?,
        landmark,
    })
}

fn parse_landmark(
    lon: &str,
    lat: &str,
    name: Option<&str>,
    row_number: usize,
) -> Result<Landmark> {
    let parse = |raw: &str, axis: &str| {
        raw.parse::<f64>().map_err(|_| {
            ChronoError::InvalidInput(format!(
                "Row {}: '{}' is not a valid {}",
                row_number, raw, axis
            ))
        })
    };
    let location = Point::new(parse(lon, "longitude")?, parse(lat, "latitude")?);
    Ok(Landmark::new(name.unwrap_or_default(), location))
}

fn split_row(line: &str) -> Vec<String> {
    line.split(',')
        .map(|cell| cell.trim().trim_matches('"').to_string())
        .collect()
}

/// Reads a series from a JSON array of samples.
pub fn series_from_json(json: &str) -> Result<TimeSeries> {
    serde_json::from_str(json)
        .map_err(|e| ChronoError::Domain(format!("Failed to parse series JSON: {}", e)))
}

/// Serializes a dense series table as a JSON array.
pub fn series_to_json(samples: &[Sample]) -> Result<String> {
    Ok(serde_json::to_string_pretty(samples)?)
}

/// Reads a series file, choosing the format by extension (`.json` or CSV).
pub fn read_series<P: AsRef<Path>>(path: P, columns: &SeriesColumns) -> Result<SeriesInput> {
    let path = path.as_ref();
    if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
        let series = series_from_json(&std::fs::read_to_string(path)?)?;
        return Ok(SeriesInput {
            series,
            landmark: None,
        });
    }
    series_from_csv(BufReader::new(File::open(path)?), columns)
}

/// Reads a GeoJSON file of line entities.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<LoadReport<LineEntity>> {
    lines_from_geojson(&std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_csv_with_gaps_and_landmark() {
        let csv = "\
year,population,lat,lon
1850,29963,41.8781,-87.6298
1860,,41.8781,-87.6298
1870,298977,41.8781,-87.6298

1900,1698575,41.8781,-87.6298
";
        let input = series_from_csv(csv.as_bytes(), &SeriesColumns::default()).unwrap();

        let years: Vec<Year> = input.series.iter().map(|s| s.year).collect();
        assert_eq!(years, vec![1850, 1870, 1900]);

        let landmark = input.landmark.unwrap();
        assert!(landmark.name.is_empty());
        assert_eq!(landmark.location, Point::new(-87.6298, 41.8781));
    }

    #[test]
    fn test_csv_header_with_byte_order_mark() {
        let csv = "\u{feff}year,population,city,lat,lon\n1850,29963,Chicago,41.8781,-87.6298\n";
        let input = series_from_csv(csv.as_bytes(), &SeriesColumns::default()).unwrap();

        assert_eq!(input.series.get(1850), Some(29_963.0));
        assert_eq!(input.landmark.unwrap().name, "Chicago");
    }

    #[test]
    fn test_csv_custom_columns_without_location() {
        let csv = "\"yr\",\"count\"\n1900,5\n1910,7\n";
        let columns = SeriesColumns {
            year: "yr".to_string(),
            value: "count".to_string(),
            ..SeriesColumns::default()
        };
        let input = series_from_csv(csv.as_bytes(), &columns).unwrap();
        assert_eq!(input.series.get(1910), Some(7.0));
        assert!(input.landmark.is_none());
    }

    #[test]
    fn test_csv_errors() {
        let columns = SeriesColumns::default();

        assert!(matches!(
            series_from_csv("".as_bytes(), &columns),
            Err(ChronoError::Domain(_))
        ));
        assert!(matches!(
            series_from_csv("year,value\n1850,1\n".as_bytes(), &columns),
            Err(ChronoError::InvalidInput(_))
        ));
        assert!(matches!(
            series_from_csv("year,population\nabc,1\n".as_bytes(), &columns),
            Err(ChronoError::Domain(_))
        ));
        // Header only: no samples at all.
        assert!(matches!(
            series_from_csv("year,population\n".as_bytes(), &columns),
            Err(ChronoError::Domain(_))
        ));
        assert!(matches!(
            series_from_csv("year,population\n1850,1\n1850,2\n".as_bytes(), &columns),
            Err(ChronoError::Domain(_))
        ));
    }

    #[test]
    fn test_json_series() {
        let series =
            series_from_json(r#"[{"year":1900,"value":2.0},{"year":1850,"value":1.0}]"#).unwrap();
        assert_eq!(series.first(), Sample::new(1850, 1.0));

        assert!(matches!(series_from_json("[]"), Err(ChronoError::Domain(_))));

        let json = series_to_json(&[Sample::new(1850, 1.0)]).unwrap();
        assert_eq!(series_from_json(&json).unwrap().len(), 1);
    }

    #[test]
    fn test_read_series_from_files() {
        let dir = tempfile::tempdir().unwrap();

        let csv_path = dir.path().join("city_pop.csv");
        let mut file = File::create(&csv_path).unwrap();
        writeln!(file, "year,population,city,lat,lon").unwrap();
        writeln!(file, "1850,29963,Chicago,41.88,-87.63").unwrap();
        drop(file);

        let input = read_series(&csv_path, &SeriesColumns::default()).unwrap();
        assert_eq!(input.landmark.unwrap().name, "Chicago");

        let json_path = dir.path().join("series.json");
        std::fs::write(&json_path, r#"[{"year":1850,"value":3.0}]"#).unwrap();
        let input = read_series(&json_path, &SeriesColumns::default()).unwrap();
        assert_eq!(input.series.get(1850), Some(3.0));

        assert!(matches!(
            read_series(dir.path().join("missing.csv"), &SeriesColumns::default()),
            Err(ChronoError::Io(_))
        ));
    }
}
