pub mod geojson;

pub use geojson::{GeoJson, parse_geojson, parse_geojson_with, to_geojson_string};
