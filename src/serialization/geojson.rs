use crate::core::{GeomResult, GeometryError};
use crate::{
    Geometry, GeometryCollection, GeometryParser, GeometryType, LineString, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};
use serde_json::Value;

/// A decoded GeoJSON geometry document.
///
/// Building a document never fails: a malformed input is recorded as the document
/// error and the geometry is left empty. Exactly one of `geometry()` and `error()`
/// returns a value.
///
/// Examples
/// ```rust
/// use geojsonlib::{ErrorCode, GeoJson, GeometryType};
///
/// let doc = GeoJson::from_str(
///     r#"{ "type": "MultiPoint", "coordinates": [ [1.0, 2.0], [3.0, 4.0] ] }"#,
/// );
/// assert_eq!(doc.geometry_type(), Some(GeometryType::MultiPoint));
/// assert_eq!(doc.multi_point().unwrap().points().len(), 2);
///
/// let doc = GeoJson::from_str(r#"{ "type": "MultiPoint" }"#);
/// let err = doc.error().unwrap();
/// assert_eq!(err.domain(), "GeoJSONErrorDomain");
/// assert_eq!(err.code(), ErrorCode::InvalidGeoJSONObject);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GeoJson {
    object: Result<Geometry, GeometryError>,
}

macro_rules! variant_accessor {
    ($($name:ident => $variant:ident),*) => {$(
        #[doc = concat!("The geometry, if it is a ", stringify!($variant))]
        pub fn $name(&self) -> Option<&$variant> {
            match &self.object {
                Ok(Geometry::$variant(g)) => Some(g),
                _ => None,
            }
        }
    )*};
}

impl GeoJson {
    /// Decode a document from a JSON tree with the default parser
    pub fn from_value(value: &Value) -> Self {
        Self::with_parser(value, &GeometryParser::default())
    }

    /// Decode a document from a JSON tree with the given parser settings
    pub fn with_parser(value: &Value, parser: &GeometryParser) -> Self {
        Self::record(parser.parse(value))
    }

    /// Decode a document from JSON text.
    ///
    /// Text that is not valid JSON is reported as an invalid GeoJSON object.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Self {
        Self::record(parse_geojson(text))
    }

    fn record(object: GeomResult<Geometry>) -> Self {
        if let Err(err) = &object {
            log::debug!(
                "GeoJSON document rejected ({}, code {}): {err}",
                err.domain(),
                err.code() as i32
            );
        }
        Self { object }
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.object.as_ref().ok()
    }

    pub fn error(&self) -> Option<&GeometryError> {
        self.object.as_ref().err()
    }

    pub fn is_valid(&self) -> bool {
        self.object.is_ok()
    }

    /// Type of the decoded geometry, `None` when the document is invalid
    pub fn geometry_type(&self) -> Option<GeometryType> {
        self.geometry().map(Geometry::geometry_type)
    }

    variant_accessor!(
        point => Point,
        multi_point => MultiPoint,
        line_string => LineString,
        multi_line_string => MultiLineString,
        polygon => Polygon,
        multi_polygon => MultiPolygon,
        geometry_collection => GeometryCollection
    );

    /// Encode the geometry back to a JSON tree, `None` when the document is invalid
    pub fn to_json(&self) -> Option<Value> {
        self.geometry().map(Geometry::to_json)
    }

    /// Take the outcome out of the document
    pub fn into_result(self) -> GeomResult<Geometry> {
        self.object
    }
}

impl From<Geometry> for GeoJson {
    fn from(geometry: Geometry) -> Self {
        Self {
            object: Ok(geometry),
        }
    }
}

/// Parse a GeoJSON geometry from JSON text
///
/// ```rust
/// use geojsonlib::serialization::parse_geojson;
/// use geojsonlib::{ErrorCode, GeometryType};
///
/// let geom = parse_geojson(r#"{"type": "Polygon", "coordinates": []}"#).unwrap();
/// assert_eq!(geom.geometry_type(), GeometryType::Polygon);
///
/// let err = parse_geojson("{ not json").unwrap_err();
/// assert_eq!(err.code(), ErrorCode::InvalidGeoJSONObject);
/// ```
pub fn parse_geojson(text: &str) -> GeomResult<Geometry> {
    parse_geojson_with(text, &GeometryParser::default())
}

/// Parse a GeoJSON geometry from JSON text with the given parser settings
pub fn parse_geojson_with(text: &str, parser: &GeometryParser) -> GeomResult<Geometry> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| GeometryError::invalid(format!("malformed JSON: {e}")))?;
    parser.parse(&value)
}

/// Serialize a geometry as GeoJSON text
pub fn to_geojson_string(geometry: &Geometry, pretty: bool) -> String {
    let value = geometry.to_json();
    if pretty {
        format!("{value:#}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorCode;
    use crate::{CoordinateJson, Position};
    use rand::{Rng, rng};

    #[test]
    fn test_basic_multipoint_document() {
        let doc = GeoJson::from_str(r#"{ "type": "MultiPoint", "coordinates": [] }"#);
        assert_eq!(doc.geometry_type(), Some(GeometryType::MultiPoint));
        assert!(doc.error().is_none());
        match doc.multi_point() {
            Some(mp) => assert_eq!(mp.points().len(), 0),
            None => panic!("MultiPoint not parsed properly"),
        }
        assert!(doc.point().is_none());
        assert!(doc.polygon().is_none());
    }

    #[test]
    fn test_document_errors() {
        let cases = [
            (r#"{ "type": "MultiPoint" }"#, ErrorCode::InvalidGeoJSONObject),
            (
                r#"{ "type": "MultiPoint", "coordinates": [ [0.0, 1.0], [2.0] ] }"#,
                ErrorCode::InvalidGeoJSONObject,
            ),
            (
                r#"{ "type": "MultiPoint", "coordinates": [ [0.0, 1.0], {"invalid" : 2.0} ] }"#,
                ErrorCode::InvalidGeoJSONObject,
            ),
            (r#"{"type":"Blob","coordinates":[]}"#, ErrorCode::UnsupportedGeometryType),
            (r#"{"type": "Point", "coordinates": [1.0, 2.0]"#, ErrorCode::InvalidGeoJSONObject),
            ("", ErrorCode::InvalidGeoJSONObject),
        ];
        for (text, code) in cases {
            let doc = GeoJson::from_str(text);
            match doc.error() {
                Some(err) => {
                    assert_eq!(err.domain(), "GeoJSONErrorDomain");
                    assert_eq!(err.code(), code, "unexpected code for {text}");
                }
                None => panic!("Invalid document should record an error: {text}"),
            }
            assert!(doc.geometry().is_none());
            assert!(doc.to_json().is_none());
            assert!(!doc.is_valid());
        }
    }

    #[test]
    fn test_parser_settings() {
        let value: Value = serde_json::from_str(
            r#"{"type": "GeometryCollection", "geometries": [
                {"type": "GeometryCollection", "geometries": []}
            ]}"#,
        )
        .unwrap();
        assert!(GeoJson::from_value(&value).is_valid());

        let doc = GeoJson::with_parser(&value, &GeometryParser::new().with_max_depth(1));
        assert_eq!(doc.error().map(GeometryError::code), Some(ErrorCode::NestingTooDeep));

        let err = parse_geojson_with(&value.to_string(), &GeometryParser::new().with_max_depth(1))
            .unwrap_err();
        assert_eq!(err, GeometryError::NestingTooDeep(1));
    }

    #[test]
    fn test_text_roundtrip() {
        let text = r#"{"type":"Polygon","coordinates":[[[0.0,0.0],[0.0,1.0],[1.0,1.0],[0.0,0.0]]]}"#;
        let geom = parse_geojson(text).unwrap();
        let encoded = to_geojson_string(&geom, false);
        assert_eq!(encoded, r#"{"coordinates":[[[0.0,0.0],[0.0,1.0],[1.0,1.0],[0.0,0.0]]],"type":"Polygon"}"#);
        assert_eq!(parse_geojson(&encoded).unwrap(), geom);
        assert_eq!(parse_geojson(&to_geojson_string(&geom, true)).unwrap(), geom);
    }

    #[test]
    fn test_text_roundtrip_random() {
        let mut random = rng();
        for _ in 0..100 {
            let mut ring: Vec<Position> = (0..6)
                .map(|_| {
                    Position::with_altitude(
                        (random.random::<f64>() - 0.5) * 360.0,
                        (random.random::<f64>() - 0.5) * 180.0,
                        random.random::<f64>() * 1000.0,
                    )
                    .unwrap()
                })
                .collect();
            ring.push(ring[0]);
            let ring = LineString::new(ring).unwrap();
            let geom = Geometry::from(Polygon::new(vec![ring]).unwrap());

            let reparsed = parse_geojson(&to_geojson_string(&geom, false)).unwrap();
            assert_eq!(reparsed, geom);
        }
    }

    #[test]
    fn test_document_from_geometry() {
        let point = Point::from_coordinates(&serde_json::json!([4.0, 5.0])).unwrap();
        let doc = GeoJson::from(Geometry::from(point.clone()));
        assert_eq!(doc.point(), Some(&point));
        assert_eq!(doc.to_json(), Some(serde_json::json!({"type": "Point", "coordinates": [4.0, 5.0]})));
        assert_eq!(doc.into_result().unwrap(), Geometry::Point(point));
    }
}
