pub mod core;
mod geometry;
mod linestring;
mod points;
mod polygons;
pub mod serialization;

pub use self::core::*;
pub use self::geometry::*;
pub use self::linestring::*;
pub use self::points::*;
pub use self::polygons::*;
pub use self::serialization::{GeoJson, parse_geojson, to_geojson_string};
