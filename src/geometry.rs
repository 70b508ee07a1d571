use super::core::{
    CoordinateJson, GeomResult, GeometricObject, GeometryError, MAX_NESTING_DEPTH,
    display_for_geom, json_array, kind_of, wkt_list,
};
use super::{LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// The closed set of GeoJSON geometry type names
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum GeometryType {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    /// Name used for the `"type"` member
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::MultiPoint => "MultiPoint",
            Self::LineString => "LineString",
            Self::MultiLineString => "MultiLineString",
            Self::Polygon => "Polygon",
            Self::MultiPolygon => "MultiPolygon",
            Self::GeometryCollection => "GeometryCollection",
        }
    }

    /// Name of the member holding the payload for this type
    pub fn payload_key(&self) -> &'static str {
        match self {
            Self::GeometryCollection => "geometries",
            _ => "coordinates",
        }
    }
}

impl FromStr for GeometryType {
    type Err = GeometryError;

    /// Match a type name exactly (names are case sensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Point" => Ok(Self::Point),
            "MultiPoint" => Ok(Self::MultiPoint),
            "LineString" => Ok(Self::LineString),
            "MultiLineString" => Ok(Self::MultiLineString),
            "Polygon" => Ok(Self::Polygon),
            "MultiPolygon" => Ok(Self::MultiPolygon),
            "GeometryCollection" => Ok(Self::GeometryCollection),
            _ => Err(GeometryError::UnsupportedType(String::from(s))),
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any GeoJSON geometry
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Point),
    MultiPoint(MultiPoint),
    LineString(LineString),
    MultiLineString(MultiLineString),
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

/// A heterogeneous collection of geometries
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryCollection {
    geometries: Vec<Geometry>,
}

/// Builds geometries from GeoJSON geometry objects
///
/// The parser only carries configuration, so a single instance can be shared
/// between threads.
///
/// Examples
/// ```rust
/// use geojsonlib::{ErrorCode, Geometry, GeometryParser};
/// use serde_json::json;
///
/// let parser = GeometryParser::new();
/// let geom = parser.parse(&json!({"type": "Point", "coordinates": [1.0, 2.0]})).unwrap();
/// assert!(matches!(geom, Geometry::Point(_)));
///
/// let err = parser.parse(&json!({"type": "Blob", "coordinates": []})).unwrap_err();
/// assert_eq!(err.code(), ErrorCode::UnsupportedGeometryType);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GeometryParser {
    max_depth: usize,
}

impl Default for GeometryParser {
    fn default() -> Self {
        Self {
            max_depth: MAX_NESTING_DEPTH,
        }
    }
}

impl GeometryParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many levels of GeometryCollection may wrap a geometry
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parse a GeoJSON geometry object
    pub fn parse(&self, value: &Value) -> GeomResult<Geometry> {
        self.parse_nested(value, 0)
    }

    fn parse_nested(&self, value: &Value, depth: usize) -> GeomResult<Geometry> {
        let object = value.as_object().ok_or_else(|| {
            GeometryError::invalid(format!(
                "geometry must be an object, got {}",
                kind_of(value)
            ))
        })?;
        let geometry_type = read_type(object)?;
        let payload = object.get(geometry_type.payload_key()).ok_or_else(|| {
            GeometryError::invalid(format!(
                "{geometry_type} is missing '{}'",
                geometry_type.payload_key()
            ))
        })?;
        log::trace!("parsing {geometry_type} at depth {depth}");

        let geometry = match geometry_type {
            GeometryType::GeometryCollection => {
                if depth >= self.max_depth {
                    return Err(GeometryError::NestingTooDeep(self.max_depth));
                }
                let items = json_array(payload, "geometries")?;
                let mut geometries = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let child = self
                        .parse_nested(item, depth + 1)
                        .map_err(|e| e.within(format_args!("geometries[{i}]")))?;
                    geometries.push(child);
                }
                Geometry::GeometryCollection(GeometryCollection::new(geometries))
            }
            simple => parse_simple(simple, payload).map_err(|e| e.within("coordinates"))?,
        };
        Ok(geometry)
    }
}

// Build a geometry that carries a "coordinates" member
fn parse_simple(geometry_type: GeometryType, coords: &Value) -> GeomResult<Geometry> {
    let geometry: Geometry = match geometry_type {
        GeometryType::Point => Point::from_coordinates(coords)?.into(),
        GeometryType::MultiPoint => MultiPoint::from_coordinates(coords)?.into(),
        GeometryType::LineString => LineString::from_coordinates(coords)?.into(),
        GeometryType::MultiLineString => MultiLineString::from_coordinates(coords)?.into(),
        GeometryType::Polygon => Polygon::from_coordinates(coords)?.into(),
        GeometryType::MultiPolygon => MultiPolygon::from_coordinates(coords)?.into(),
        GeometryType::GeometryCollection => {
            return Err(GeometryError::invalid(
                "a GeometryCollection has no coordinates",
            ));
        }
    };
    Ok(geometry)
}

// Read the "type" discriminator of a geometry object
fn read_type(object: &Map<String, Value>) -> GeomResult<GeometryType> {
    match object.get("type") {
        Some(Value::String(name)) => name.parse(),
        Some(other) => Err(GeometryError::invalid(format!(
            "geometry 'type' must be a string, got {}",
            kind_of(other)
        ))),
        None => Err(GeometryError::invalid("geometry is missing 'type'")),
    }
}

impl Geometry {
    /// Parse a GeoJSON geometry object with the default parser settings
    pub fn from_json(value: &Value) -> GeomResult<Self> {
        GeometryParser::default().parse(value)
    }

    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Self::Point(_) => GeometryType::Point,
            Self::MultiPoint(_) => GeometryType::MultiPoint,
            Self::LineString(_) => GeometryType::LineString,
            Self::MultiLineString(_) => GeometryType::MultiLineString,
            Self::Polygon(_) => GeometryType::Polygon,
            Self::MultiPolygon(_) => GeometryType::MultiPolygon,
            Self::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// Encode the geometry as a GeoJSON geometry object
    ///
    /// ```rust
    /// use geojsonlib::Geometry;
    /// use serde_json::json;
    ///
    /// let src = json!({"type": "LineString", "coordinates": [[0.0, 0.0], [1.5, 2.0]]});
    /// assert_eq!(Geometry::from_json(&src).unwrap().to_json(), src);
    /// ```
    pub fn to_json(&self) -> Value {
        let payload = match self {
            Self::Point(g) => g.to_coordinates(),
            Self::MultiPoint(g) => g.to_coordinates(),
            Self::LineString(g) => g.to_coordinates(),
            Self::MultiLineString(g) => g.to_coordinates(),
            Self::Polygon(g) => g.to_coordinates(),
            Self::MultiPolygon(g) => g.to_coordinates(),
            Self::GeometryCollection(g) => {
                Value::Array(g.geometries.iter().map(Geometry::to_json).collect())
            }
        };
        let geometry_type = self.geometry_type();
        let mut object = Map::new();
        object.insert(
            String::from("type"),
            Value::from(geometry_type.as_str()),
        );
        object.insert(String::from(geometry_type.payload_key()), payload);
        Value::Object(object)
    }
}

impl GeometricObject for Geometry {
    fn wkt(&self) -> String {
        match self {
            Self::Point(g) => g.wkt(),
            Self::MultiPoint(g) => g.wkt(),
            Self::LineString(g) => g.wkt(),
            Self::MultiLineString(g) => g.wkt(),
            Self::Polygon(g) => g.wkt(),
            Self::MultiPolygon(g) => g.wkt(),
            Self::GeometryCollection(g) => g.wkt(),
        }
    }
}

display_for_geom!(Geometry);

impl GeometryCollection {
    pub fn new(geometries: Vec<Geometry>) -> Self {
        Self { geometries }
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }
}

impl GeometricObject for GeometryCollection {
    fn wkt(&self) -> String {
        format!(
            "GEOMETRYCOLLECTION {}",
            wkt_list(self.geometries.iter().map(Geometry::wkt))
        )
    }
}

display_for_geom!(GeometryCollection);

macro_rules! from_variant {
    ($($variant:ident),*) => {$(
        impl From<$variant> for Geometry {
            fn from(value: $variant) -> Self {
                Geometry::$variant(value)
            }
        }
    )*};
}

from_variant!(
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection
);
