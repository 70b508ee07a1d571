use super::Position;
use super::core::{
    CoordinateJson, GeomResult, GeometricObject, GeometryError, display_for_geom, parse_each,
    wkt_list,
};
use super::points::wkt_tag;
use serde_json::Value;
use std::iter::Zip;
use std::slice::Iter;

/// Represents a sequence of line segments
#[derive(Clone, Debug, PartialEq)]
pub struct LineString {
    positions: Vec<Position>,
}

/// A collection of line strings
#[derive(Clone, Debug, PartialEq)]
pub struct MultiLineString {
    line_strings: Vec<LineString>,
}

impl LineString {
    /// Instantiate a new LineString from a vector of positions
    pub fn new(positions: Vec<Position>) -> GeomResult<Self> {
        if positions.len() < 2 {
            Err(GeometryError::invalid(format!(
                "a line string must have at least 2 positions, got {}",
                positions.len()
            )))
        } else {
            Ok(Self { positions })
        }
    }

    /// Returns true if the line string is closed and long enough to bound an area.
    ///
    /// The end points are compared exactly, without any tolerance.
    ///
    /// ```rust
    /// use geojsonlib::{CoordinateJson, LineString};
    /// use serde_json::json;
    ///
    /// let ring = LineString::from_coordinates(&json!([[0, 0], [0, 1], [1, 1], [0, 0]])).unwrap();
    /// assert!(ring.is_linear_ring());
    ///
    /// let open = LineString::from_coordinates(&json!([[0, 0], [0, 1], [1, 1], [1, 0]])).unwrap();
    /// assert!(!open.is_linear_ring());
    /// ```
    pub fn is_linear_ring(&self) -> bool {
        self.positions.len() >= 4 && self.positions.first() == self.positions.last()
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Returns an iterator over the segments of the linestring
    pub fn edges<'a>(&'a self) -> Zip<Iter<'a, Position>, Iter<'a, Position>> {
        self.positions.iter().zip(&self.positions[1..])
    }

    /// Number of positions in the linestring, always at least 2
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Get the total number of vertices in the linestring.
    pub fn total_vertices(&self) -> usize {
        self.positions.len()
    }

    // Parenthesised coordinate list shared by the LINESTRING and POLYGON renderings
    pub(crate) fn wkt_body(&self) -> String {
        wkt_list(self.positions.iter().map(Position::wkt_coords))
    }
}

impl CoordinateJson for LineString {
    fn from_coordinates(value: &Value) -> GeomResult<Self> {
        Self::new(parse_each(value, "positions", Position::from_json)?)
    }

    fn to_coordinates(&self) -> Value {
        Value::Array(self.positions.iter().map(Position::to_json).collect())
    }
}

impl GeometricObject for LineString {
    /// WKT representation of the LineString
    fn wkt(&self) -> String {
        format!(
            "{} {}",
            wkt_tag("LINESTRING", &self.positions),
            self.wkt_body()
        )
    }
}

display_for_geom!(LineString);

impl MultiLineString {
    pub fn new(line_strings: Vec<LineString>) -> Self {
        Self { line_strings }
    }

    pub fn line_strings(&self) -> &[LineString] {
        &self.line_strings
    }
}

impl CoordinateJson for MultiLineString {
    fn from_coordinates(value: &Value) -> GeomResult<Self> {
        parse_each(value, "line_strings", LineString::from_coordinates).map(Self::new)
    }

    fn to_coordinates(&self) -> Value {
        Value::Array(
            self.line_strings
                .iter()
                .map(LineString::to_coordinates)
                .collect(),
        )
    }
}

impl GeometricObject for MultiLineString {
    fn wkt(&self) -> String {
        let tag = wkt_tag(
            "MULTILINESTRING",
            self.line_strings.iter().flat_map(|ls| &ls.positions),
        );
        format!(
            "{tag} {}",
            wkt_list(self.line_strings.iter().map(LineString::wkt_body))
        )
    }
}

display_for_geom!(MultiLineString);

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, rng};
    use serde_json::json;

    #[test]
    fn test_instantiation_valid() {
        let pts = vec![
            Position::new(0.3, 0.3).unwrap(),
            Position::new(0.34, 0.98).unwrap(),
            Position::new(0.56, -123.6).unwrap(),
        ];
        LineString::new(pts).unwrap();
    }

    #[test]
    #[should_panic]
    fn test_instantiation_invalid() {
        let pts = vec![Position::new(0.3, 0.3).unwrap()];
        LineString::new(pts).unwrap();
    }

    #[test]
    fn test_parse_too_short() {
        for case in [json!([]), json!([[0.0, 0.0]])] {
            match LineString::from_coordinates(&case) {
                Err(GeometryError::InvalidObject(_)) => (),
                other => panic!("Parsed line string with fewer than 2 positions: {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_bad_position() {
        if let Ok(_) = LineString::from_coordinates(&json!([[0.0, 0.0], [1.0], [2.0, 2.0]])) {
            panic!("Parsed line string with a 1-dimension position");
        }
        if let Ok(_) = LineString::from_coordinates(&json!({"coordinates": [[0, 0], [1, 1]]})) {
            panic!("Parsed line string from an object");
        }
    }

    #[test]
    fn test_linear_ring() {
        let ring = LineString::from_coordinates(&json!([[0, 0], [0, 1], [1, 1], [0, 0]])).unwrap();
        assert!(ring.is_linear_ring());

        let short = LineString::from_coordinates(&json!([[0, 0], [0, 1], [1, 1]])).unwrap();
        assert!(!short.is_linear_ring());

        let open = LineString::from_coordinates(&json!([[0, 0], [0, 1], [1, 1], [1, 0]])).unwrap();
        assert!(!open.is_linear_ring());

        let closed_pair = LineString::from_coordinates(&json!([[0, 0], [0, 0]])).unwrap();
        assert!(!closed_pair.is_linear_ring());

        // Closure is exact: no tolerance is applied to the end points
        let almost = LineString::new(vec![
            Position::new(0.0, 0.0).unwrap(),
            Position::new(0.0, 1.0).unwrap(),
            Position::new(1.0, 1.0).unwrap(),
            Position::new(1e-15, 0.0).unwrap(),
        ])
        .unwrap();
        assert!(!almost.is_linear_ring());

        let mixed_dims = LineString::new(vec![
            Position::new(0.0, 0.0).unwrap(),
            Position::new(0.0, 1.0).unwrap(),
            Position::new(1.0, 1.0).unwrap(),
            Position::with_altitude(0.0, 0.0, 0.0).unwrap(),
        ])
        .unwrap();
        assert!(!mixed_dims.is_linear_ring());
    }

    #[test]
    fn test_total_edges() {
        let pts = vec![
            Position::new(0.3, 0.3).unwrap(),
            Position::new(0.34, 0.98).unwrap(),
            Position::new(0.56, -123.6).unwrap(),
        ];
        let ls = LineString::new(pts).unwrap();
        let edges: Vec<(&Position, &Position)> = ls.edges().collect();
        assert_eq!(edges.len(), 2);
        assert_eq!(ls.total_vertices(), 3);
        assert_eq!(ls.len(), 3);
        assert_eq!(ls.len(), ls.positions().len());
    }

    #[test]
    fn test_coordinates_roundtrip_random() {
        let mut random = rng();
        let positions: Vec<Position> = (0..120)
            .map(|_| Position::new(random.random(), random.random()).unwrap())
            .collect();
        let ls = LineString::new(positions).unwrap();
        let parsed = LineString::from_coordinates(&ls.to_coordinates()).unwrap();
        assert_eq!(parsed, ls);
    }

    #[test]
    fn test_multi_line_string() {
        let coords = json!([[[0.0, 0.0], [1.0, 1.0]], [[2.0, 2.0], [3.0, 3.0], [4.0, 4.0]]]);
        let mls = MultiLineString::from_coordinates(&coords).unwrap();
        assert_eq!(mls.line_strings().len(), 2);
        assert_eq!(mls.line_strings()[1].total_vertices(), 3);
        assert_eq!(mls.to_coordinates(), coords);

        if let Ok(_) = MultiLineString::from_coordinates(&json!([[[0.0, 0.0], [1.0, 1.0]], [[2.0, 2.0]]])) {
            panic!("Parsed multi line string with a degenerate child");
        }
    }

    #[test]
    fn test_wkt() {
        let ls = LineString::new(vec![Position::new(0.0, 0.0).unwrap(), Position::new(1.5, 1.0).unwrap()]).unwrap();
        assert_eq!(ls.wkt(), "LINESTRING (0 0, 1.5 1)");

        let mls = MultiLineString::new(vec![ls.clone(), ls]);
        assert_eq!(mls.wkt(), "MULTILINESTRING ((0 0, 1.5 1), (0 0, 1.5 1))");
        assert_eq!(MultiLineString::new(Vec::new()).wkt(), "MULTILINESTRING EMPTY");
    }
}
