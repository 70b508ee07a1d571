use super::core::{
    CoordinateJson, GeomResult, GeometricObject, GeometryError, display_for_geom, parse_each,
    wkt_list,
};
use super::linestring::LineString;
use super::points::wkt_tag;
use serde_json::Value;

/// Represents a polygon bounded by linear rings
///
/// The first ring is the exterior boundary, any further rings are holes. A polygon
/// without rings is valid (empty).
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    rings: Vec<LineString>,
}

/// A collection of polygons
#[derive(Clone, Debug, PartialEq)]
pub struct MultiPolygon {
    polygons: Vec<Polygon>,
}

impl Polygon {
    /// Instantiate a polygon from its rings.
    ///
    /// Fails on the first ring that is not a linear ring.
    pub fn new(rings: Vec<LineString>) -> GeomResult<Self> {
        for (i, ring) in rings.iter().enumerate() {
            check_ring(ring).map_err(|e| e.within(format_args!("rings[{i}]")))?;
        }
        Ok(Self { rings })
    }

    /// A polygon with no rings
    pub fn empty() -> Self {
        Self { rings: Vec::new() }
    }

    pub fn rings(&self) -> &[LineString] {
        &self.rings
    }

    /// Exterior boundary, if the polygon is not empty
    pub fn exterior(&self) -> Option<&LineString> {
        self.rings.first()
    }

    /// Interior rings (holes)
    pub fn holes(&self) -> &[LineString] {
        self.rings.get(1..).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    fn wkt_body(&self) -> String {
        wkt_list(self.rings.iter().map(LineString::wkt_body))
    }
}

// Polygon rings must be closed and have at least 4 positions
fn check_ring(ring: &LineString) -> GeomResult<()> {
    if ring.is_linear_ring() {
        Ok(())
    } else {
        Err(GeometryError::invalid(format!(
            "ring must be closed and have at least 4 positions, got {} positions",
            ring.len()
        )))
    }
}

impl CoordinateJson for Polygon {
    /// Parse polygon rings.
    ///
    /// ```rust
    /// use geojsonlib::{CoordinateJson, Polygon};
    /// use serde_json::json;
    ///
    /// let square = json!([[[0, 0], [0, 1], [1, 1], [1, 0], [0, 0]]]);
    /// assert_eq!(Polygon::from_coordinates(&square).unwrap().rings().len(), 1);
    /// assert!(Polygon::from_coordinates(&json!([])).unwrap().is_empty());
    /// assert!(Polygon::from_coordinates(&json!([[[0, 0], [0, 1], [1, 1]]])).is_err());
    /// ```
    fn from_coordinates(value: &Value) -> GeomResult<Self> {
        let rings = parse_each(value, "rings", |item| {
            let ring = LineString::from_coordinates(item)?;
            check_ring(&ring)?;
            Ok(ring)
        })?;
        Ok(Self { rings })
    }

    fn to_coordinates(&self) -> Value {
        Value::Array(self.rings.iter().map(LineString::to_coordinates).collect())
    }
}

impl GeometricObject for Polygon {
    /// WKT representation of the polygon
    fn wkt(&self) -> String {
        let tag = wkt_tag(
            "POLYGON",
            self.rings.iter().flat_map(|r| r.positions()),
        );
        format!("{tag} {}", self.wkt_body())
    }
}

display_for_geom!(Polygon);

impl MultiPolygon {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }
}

impl CoordinateJson for MultiPolygon {
    fn from_coordinates(value: &Value) -> GeomResult<Self> {
        parse_each(value, "polygons", Polygon::from_coordinates).map(Self::new)
    }

    fn to_coordinates(&self) -> Value {
        Value::Array(self.polygons.iter().map(Polygon::to_coordinates).collect())
    }
}

impl GeometricObject for MultiPolygon {
    fn wkt(&self) -> String {
        let tag = wkt_tag(
            "MULTIPOLYGON",
            self.polygons
                .iter()
                .flat_map(|p| p.rings())
                .flat_map(|r| r.positions()),
        );
        format!(
            "{tag} {}",
            wkt_list(self.polygons.iter().map(Polygon::wkt_body))
        )
    }
}

display_for_geom!(MultiPolygon);
