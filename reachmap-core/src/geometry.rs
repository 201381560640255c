//! Parse the coordinate encoding used by reach records.
//!
//! Reach geometry arrives as a comma-separated list of point tokens, each of
//! the form `"<lon> <lat>"` with a single space between the two values. POI
//! and endpoint locations use the same token format on its own.
//!
//! # Examples
//! ```
//! use geo::Coord;
//! use reachmap_core::parse_geometry;
//!
//! let line = parse_geometry("1 2,3 4")?;
//! assert_eq!(line, vec![Coord { x: 1.0, y: 2.0 }, Coord { x: 3.0, y: 4.0 }]);
//! # Ok::<(), reachmap_core::GeometryError>(())
//! ```

use geo::Coord;
use thiserror::Error;

/// Errors raised while parsing coordinate strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// A point token did not split into exactly two values.
    #[error("point token {token:?} is not of the form \"<lon> <lat>\"")]
    MalformedToken {
        /// Offending token.
        token: String,
    },
    /// A coordinate value was not a number.
    #[error("coordinate {value:?} in point token {token:?} is not a number")]
    InvalidNumber {
        /// Token containing the value.
        token: String,
        /// Raw value that failed to parse.
        value: String,
    },
}

/// Parse a comma-separated geometry string into an ordered coordinate list.
///
/// # Errors
///
/// Returns the first [`GeometryError`] encountered; any bad token rejects the
/// whole geometry.
pub fn parse_geometry(raw: &str) -> Result<Vec<Coord>, GeometryError> {
    raw.split(',').map(parse_location).collect()
}

/// Parse a single `"<lon> <lat>"` token.
///
/// # Errors
///
/// Returns [`GeometryError::MalformedToken`] unless the token holds exactly
/// two space-separated values, and [`GeometryError::InvalidNumber`] when
/// either value is not a float.
pub fn parse_location(token: &str) -> Result<Coord, GeometryError> {
    let mut parts = token.split(' ');
    let (Some(lon), Some(lat), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(GeometryError::MalformedToken {
            token: token.to_owned(),
        });
    };
    Ok(Coord {
        x: parse_value(token, lon)?,
        y: parse_value(token, lat)?,
    })
}

fn parse_value(token: &str, value: &str) -> Result<f64, GeometryError> {
    value
        .trim()
        .parse()
        .map_err(|_| GeometryError::InvalidNumber {
            token: token.to_owned(),
            value: value.to_owned(),
        })
}
