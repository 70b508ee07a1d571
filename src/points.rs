use super::core::{
    self, CoordinateJson, GeomResult, GeometricObject, GeometryError, display_for_geom, kind_of,
    parse_each, wkt_list,
};
use serde_json::Value;

/// A single GeoJSON position: longitude, latitude and an optional altitude.
///
/// Every component is finite. Equality is exact and component-wise.
///
/// Examples
/// ```rust
/// use geojsonlib::Position;
/// let pos = Position::new(0.2, -7.9).unwrap();
/// let (lon, lat) = pos.coords();
/// assert_eq!(pos.alt(), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    lon: f64,
    lat: f64,
    alt: Option<f64>,
}

/// A single Point geometry
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    position: Position,
}

/// A simple collection of points
#[derive(Clone, Debug, PartialEq)]
pub struct MultiPoint {
    points: Vec<Point>,
}

impl Position {
    /// Instantiate a 2D position, rejecting NaN and infinite components
    pub fn new(lon: f64, lat: f64) -> GeomResult<Self> {
        Self::try_new(lon, lat, None)
    }

    /// Instantiate a position with an altitude, rejecting NaN and infinite components
    pub fn with_altitude(lon: f64, lat: f64, alt: f64) -> GeomResult<Self> {
        Self::try_new(lon, lat, Some(alt))
    }

    /// Instantiate a position, rejecting NaN and infinite components
    pub fn try_new(lon: f64, lat: f64, alt: Option<f64>) -> GeomResult<Self> {
        let all_finite = lon.is_finite() && lat.is_finite() && alt.is_none_or(f64::is_finite);
        if !all_finite {
            return Err(GeometryError::invalid(
                "position components must be finite numbers",
            ));
        }
        Ok(Self { lon, lat, alt })
    }

    /// Parse a position from a JSON array of 2 or 3 numbers.
    ///
    /// ```rust
    /// use geojsonlib::Position;
    /// use serde_json::json;
    ///
    /// let pos = Position::from_json(&json!([1.5, 2.5, 10.0])).unwrap();
    /// assert_eq!(pos.alt(), Some(10.0));
    /// assert!(Position::from_json(&json!([1.5])).is_err());
    /// ```
    pub fn from_json(value: &Value) -> GeomResult<Self> {
        let items = core::json_array(value, "position")?;
        if !(2..=3).contains(&items.len()) {
            return Err(GeometryError::invalid(format!(
                "position must have 2 or 3 numbers, got {}",
                items.len()
            )));
        }
        let mut nums = [0.0; 3];
        for (slot, item) in nums.iter_mut().zip(items) {
            *slot = item.as_f64().ok_or_else(|| {
                GeometryError::invalid(format!(
                    "position entries must be numbers, got {}",
                    kind_of(item)
                ))
            })?;
        }
        let alt = if items.len() == 3 { Some(nums[2]) } else { None };
        Self::try_new(nums[0], nums[1], alt)
    }

    /// Encode the position as a JSON array
    pub fn to_json(&self) -> Value {
        let mut out = vec![Value::from(self.lon), Value::from(self.lat)];
        if let Some(alt) = self.alt {
            out.push(Value::from(alt));
        }
        Value::Array(out)
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn alt(&self) -> Option<f64> {
        self.alt
    }

    /// Get the horizontal coordinates as a tuple
    pub fn coords(&self) -> (f64, f64) {
        (self.lon, self.lat)
    }

    /// Return true if the position is approximately equal to other.
    ///
    /// Positions with and without an altitude are never close.
    pub fn is_close(&self, other: &Position) -> bool {
        let alt_close = match (self.alt, other.alt) {
            (None, None) => true,
            (Some(a), Some(b)) => core::approx(a, b),
            _ => false,
        };
        core::approx(self.lon, other.lon) && core::approx(self.lat, other.lat) && alt_close
    }

    /// Coordinates in WKT notation, e.g. `1 2` or `1 2 3`
    pub(crate) fn wkt_coords(&self) -> String {
        match self.alt {
            Some(alt) => format!("{} {} {}", self.lon, self.lat, alt),
            None => format!("{} {}", self.lon, self.lat),
        }
    }
}

/// Build a WKT tag, adding the ` Z` suffix when every position carries an altitude.
pub(crate) fn wkt_tag<'a, I>(name: &str, positions: I) -> String
where
    I: IntoIterator<Item = &'a Position>,
{
    let mut has_any = false;
    let mut all_3d = true;
    for pos in positions {
        has_any = true;
        all_3d &= pos.alt.is_some();
    }
    if has_any && all_3d {
        format!("{name} Z")
    } else {
        String::from(name)
    }
}

impl Point {
    /// Instantiate a point at the given position
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }
}

impl From<Position> for Point {
    fn from(position: Position) -> Self {
        Self::new(position)
    }
}

impl CoordinateJson for Point {
    fn from_coordinates(value: &Value) -> GeomResult<Self> {
        Position::from_json(value).map(Self::new)
    }

    fn to_coordinates(&self) -> Value {
        self.position.to_json()
    }
}

impl GeometricObject for Point {
    /// WKT representation of the point
    fn wkt(&self) -> String {
        format!(
            "{} ({})",
            wkt_tag("POINT", [&self.position]),
            self.position.wkt_coords()
        )
    }
}

display_for_geom!(Point);

impl MultiPoint {
    /// Instantiate a multipoint collection
    ///
    /// Example
    /// ```rust
    /// use geojsonlib::{MultiPoint, Point, Position};
    /// let my_points = MultiPoint::new(vec![
    ///     Point::new(Position::new(0.0, 0.0).unwrap()),
    ///     Point::new(Position::new(0.0, 1.0).unwrap()),
    /// ]);
    /// assert_eq!(my_points.points().len(), 2);
    /// ```
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Iterate over the positions of every point
    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.points.iter().map(Point::position)
    }
}

impl CoordinateJson for MultiPoint {
    fn from_coordinates(value: &Value) -> GeomResult<Self> {
        parse_each(value, "points", Point::from_coordinates).map(Self::new)
    }

    fn to_coordinates(&self) -> Value {
        Value::Array(self.points.iter().map(Point::to_coordinates).collect())
    }
}

impl GeometricObject for MultiPoint {
    /// WKT representation of the multipoint collection
    fn wkt(&self) -> String {
        format!(
            "{} {}",
            wkt_tag("MULTIPOINT", self.positions()),
            wkt_list(self.positions().map(|p| format!("({})", p.wkt_coords())))
        )
    }
}

display_for_geom!(MultiPoint);
