pub mod geojson;
pub mod interpolate;
pub mod progressive;
pub mod validation;
