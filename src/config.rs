//! Run configuration for chronomap
//!
//! All settings are serializable so a run can be described in JSON or TOML
//! and reproduced exactly.
use crate::error::{ChronoError, Result};
use chronomap_types::series::YearRange;
use serde::{Deserialize, Serialize};

/// What to do when a year lies outside the known samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutOfDomainPolicy {
    /// Use the value of the nearest known sample (no gaps in the table)
    #[default]
    Clamp,
    /// Reject the query with `ChronoError::OutOfDomain`
    Fail,
}

/// Shape of a partially built line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PartialLineMode {
    /// Straight segment from the first vertex to the cut point
    #[default]
    Chord,
    /// Every vertex before the cut point, then the cut point
    Trace,
}

/// How multi-part geometries are truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MultiPartPolicy {
    /// Build parts one after another along their combined length
    #[default]
    Sequential,
    /// Draw every part whole as soon as construction has started
    Whole,
    /// Report partially built multi-part geometries as unsupported
    Reject,
}

/// Mapping from series value to marker size: `value^exponent / divisor * multiplier`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerScale {
    #[serde(default = "MarkerScale::default_exponent")]
    pub exponent: f64,
    #[serde(default = "MarkerScale::default_divisor")]
    pub divisor: f64,
    #[serde(default = "MarkerScale::default_multiplier")]
    pub multiplier: f64,
}

impl MarkerScale {
    const fn default_exponent() -> f64 {
        0.5
    }

    const fn default_divisor() -> f64 {
        100.0
    }

    const fn default_multiplier() -> f64 {
        50.0
    }

    /// Marker size for `value`. Negative values draw as size zero.
    pub fn size(&self, value: f64) -> f64 {
        value.max(0.0).powf(self.exponent) / self.divisor * self.multiplier
    }
}

impl Default for MarkerScale {
    fn default() -> Self {
        Self {
            exponent: Self::default_exponent(),
            divisor: Self::default_divisor(),
            multiplier: Self::default_multiplier(),
        }
    }
}

/// Configuration for one time-lapse run
///
/// # Example
///
/// ```rust
/// use chronomap::{Config, OutOfDomainPolicy, PartialLineMode};
///
/// let config = Config::default();
/// assert_eq!(config.year_range.min(), 1850);
///
/// let json = r#"{
///     "year_range": { "min": 1800, "max": 1900 },
///     "out_of_domain": "fail",
///     "partial_line": "trace"
/// }"#;
/// let config = Config::from_json_str(json)?;
/// assert_eq!(config.out_of_domain, OutOfDomainPolicy::Fail);
/// assert_eq!(config.partial_line, PartialLineMode::Trace);
/// # Ok::<(), chronomap::ChronoError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub out_of_domain: OutOfDomainPolicy,

    #[serde(default)]
    pub partial_line: PartialLineMode,

    #[serde(default)]
    pub multi_part: MultiPartPolicy,

    /// Years to produce frames for, both ends included
    #[serde(default)]
    pub year_range: YearRange,

    #[serde(default)]
    pub marker: MarkerScale,
}

impl Config {
    pub fn with_year_range(mut self, range: YearRange) -> Self {
        self.year_range = range;
        self
    }

    pub fn with_out_of_domain(mut self, policy: OutOfDomainPolicy) -> Self {
        self.out_of_domain = policy;
        self
    }

    pub fn with_partial_line(mut self, mode: PartialLineMode) -> Self {
        self.partial_line = mode;
        self
    }

    pub fn with_multi_part(mut self, policy: MultiPartPolicy) -> Self {
        self.multi_part = policy;
        self
    }

    pub fn with_marker(mut self, marker: MarkerScale) -> Self {
        self.marker = marker;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let MarkerScale {
            exponent,
            divisor,
            multiplier,
        } = self.marker;

        if !exponent.is_finite() || !multiplier.is_finite() {
            return Err(ChronoError::InvalidConfig(
                "Marker exponent and multiplier must be finite".to_string(),
            ));
        }
        if !divisor.is_finite() || divisor == 0.0 {
            return Err(ChronoError::InvalidConfig(format!(
                "Marker divisor must be finite and non-zero, got: {}",
                divisor
            )));
        }

        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)
            .map_err(|e| ChronoError::InvalidConfig(format!("Failed to parse JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)
            .map_err(|e| ChronoError::InvalidConfig(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ChronoError::Serialization(e.to_string()))
    }

    /// Load from a file, choosing the format by extension (`.toml` needs the `toml` feature).
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            #[cfg(feature = "toml")]
            Some("toml") => Self::from_toml_str(&contents),
            #[cfg(not(feature = "toml"))]
            Some("toml") => Err(ChronoError::InvalidConfig(
                "TOML configuration requires the `toml` feature".to_string(),
            )),
            _ => Self::from_json_str(&contents),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.year_range, YearRange::new(1850, 1950).unwrap());
        assert_eq!(config.out_of_domain, OutOfDomainPolicy::Clamp);
        assert_eq!(config.partial_line, PartialLineMode::Chord);
        assert_eq!(config.multi_part, MultiPartPolicy::Sequential);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = Config::from_json_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = Config::default()
            .with_out_of_domain(OutOfDomainPolicy::Fail)
            .with_multi_part(MultiPartPolicy::Whole)
            .with_year_range(YearRange::new(1900, 1910).unwrap());

        let json = config.to_json().unwrap();
        assert_eq!(Config::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let json = r#"{ "year_range": { "min": 1950, "max": 1850 } }"#;
        assert!(matches!(
            Config::from_json_str(json),
            Err(ChronoError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let config = Config::default().with_marker(MarkerScale {
            divisor: 0.0,
            ..MarkerScale::default()
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_marker_size() {
        let marker = MarkerScale::default();
        // sqrt(10_000) / 100 * 50
        assert!((marker.size(10_000.0) - 50.0).abs() < 1e-12);
        assert_eq!(marker.size(-5.0), 0.0);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_roundtrip() {
        let config = Config::default().with_partial_line(PartialLineMode::Trace);
        let toml_str = config.to_toml().unwrap();
        assert_eq!(Config::from_toml_str(&toml_str).unwrap(), config);
    }
}
