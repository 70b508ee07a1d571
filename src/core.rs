use serde_json::Value;
use std::fmt::Display;
use thiserror::Error;

const ATOL: f64 = 1e-12;
const RTOL: f64 = 1e-9;

/// Domain tag shared by every error the parsers report.
pub const GEOJSON_ERROR_DOMAIN: &str = "GeoJSONErrorDomain";

/// Default limit for nested GeometryCollections.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Numeric error codes exposed alongside the error domain.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    /// Structural problem: wrong arity, non-numeric coordinate, open ring, missing member...
    InvalidGeoJSONObject = 1,
    /// The `"type"` discriminator names no known geometry.
    UnsupportedGeometryType = 2,
    /// GeometryCollections are nested deeper than the parser allows.
    NestingTooDeep = 3,
}

/// Errors raised while building or parsing geometries
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("invalid GeoJSON object: {0}")]
    InvalidObject(String),
    #[error("unsupported geometry type '{0}'")]
    UnsupportedType(String),
    #[error("geometry collections nested deeper than {0} levels")]
    NestingTooDeep(usize),
}

pub type GeomResult<T> = Result<T, GeometryError>;

impl GeometryError {
    /// Shorthand for a structural error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidObject(msg.into())
    }

    /// Error domain tag, always [`GEOJSON_ERROR_DOMAIN`]
    pub fn domain(&self) -> &'static str {
        GEOJSON_ERROR_DOMAIN
    }

    /// Numeric code of the error
    ///
    /// ```rust
    /// use geojsonlib::{ErrorCode, GeometryError};
    /// let err = GeometryError::UnsupportedType(String::from("Blob"));
    /// assert_eq!(err.code(), ErrorCode::UnsupportedGeometryType);
    /// assert_eq!(err.code() as i32, 2);
    /// ```
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidObject(_) => ErrorCode::InvalidGeoJSONObject,
            Self::UnsupportedType(_) => ErrorCode::UnsupportedGeometryType,
            Self::NestingTooDeep(_) => ErrorCode::NestingTooDeep,
        }
    }

    /// Prefix a structural error with the location it was found at.
    ///
    /// Only the message changes, the code is kept as is.
    pub(crate) fn within(self, location: impl Display) -> Self {
        match self {
            Self::InvalidObject(msg) => Self::InvalidObject(format!("{location}: {msg}")),
            other => other,
        }
    }
}

/// Trait with common functionality for all geometric objects
pub trait GeometricObject {
    fn wkt(&self) -> String;
}

/// Conversion between a geometry and its GeoJSON `"coordinates"` member
pub trait CoordinateJson: Sized {
    /// Build the value from a `"coordinates"` JSON subtree
    fn from_coordinates(value: &Value) -> GeomResult<Self>;

    /// Encode the value as a `"coordinates"` JSON subtree
    fn to_coordinates(&self) -> Value;
}

/// Macro to implement the Display trait for Geometric Object types
macro_rules! display_for_geom {
    ($type:ty) => {
        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(f, "{}", self.wkt())
            }
        }
    };
}

pub(crate) use display_for_geom;

/// Borrow the elements of a JSON array, failing for any other kind of value
pub(crate) fn json_array<'a>(value: &'a Value, what: &str) -> GeomResult<&'a Vec<Value>> {
    value.as_array().ok_or_else(|| {
        GeometryError::invalid(format!(
            "{what} must be an array, got {}",
            kind_of(value)
        ))
    })
}

/// Parse every element of a JSON array, stopping at the first failure
pub(crate) fn parse_each<T, F>(value: &Value, what: &str, mut parse: F) -> GeomResult<Vec<T>>
where
    F: FnMut(&Value) -> GeomResult<T>,
{
    let items = json_array(value, what)?;
    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        out.push(parse(item).map_err(|e| e.within(format_args!("{what}[{i}]")))?);
    }
    Ok(out)
}

/// Short name of a JSON value kind, for error messages
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Join WKT fragments into a parenthesised list, or `EMPTY` when there are none
pub(crate) fn wkt_list<I>(parts: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let parts: Vec<String> = parts.into_iter().collect();
    if parts.is_empty() {
        String::from("EMPTY")
    } else {
        format!("({})", parts.join(", "))
    }
}

/// Return whether two numbers are approximately equal.
///
/// Determines if the given numbers are close with the given absolute and relative tolerances.
///
/// Examples:
/// ```rust
/// use geojsonlib;
///
/// assert!(geojsonlib::is_close(1.0, 1.0 + 1e-8, 1e-6, 0.0));
/// assert!(!geojsonlib::is_close(1.0, 1.1, 1e-6, 1e-6));
/// ```
pub fn is_close(a: f64, b: f64, rtol: f64, atol: f64) -> bool {
    assert!(rtol >= 0.0 && atol >= 0.0);
    let scale = a.abs().max(b.abs());
    (a - b).abs() <= (atol + rtol * scale)
}

/// Determine if two values are approximately equal to one another.
///
/// Equivalent to calling `is_close` with relative tolerance of `1e-9` and absolute
/// tolerance of `1e-12`.
///
/// Example:
/// ```rust
/// use geojsonlib;
/// let x1 = 0.123;
/// let x2 = 0.123 + 1e-14;
///
/// assert!(geojsonlib::approx(x1, x2));
/// ```
pub fn approx(a: f64, b: f64) -> bool {
    is_close(a, b, RTOL, ATOL)
}
