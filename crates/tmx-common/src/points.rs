//! Integer points and the `"x,y x,y ..."` point list encoding used by
//! polygon and polyline objects.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// A point with integer pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut coords = s.split(',');
        match (coords.next(), coords.next(), coords.next()) {
            (Some(x), Some(y), None) => {
                let x = x.parse().map_err(|_| Error::InvalidPoint(s.to_string()))?;
                let y = y.parse().map_err(|_| Error::InvalidPoint(s.to_string()))?;
                Ok(Self { x, y })
            }
            _ => Err(Error::InvalidPoint(s.to_string())),
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Decode a space separated list of `x,y` tokens.
///
/// An empty string is an empty list. Every other token must be exactly two
/// comma separated integers.
pub fn decode_points(s: &str) -> Result<Vec<Point>> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(' ').map(str::parse).collect()
}

/// Encode points as space separated `x,y` tokens.
pub fn encode_points(points: &[Point]) -> String {
    points
        .iter()
        .map(Point::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const POLYGON: &str = "0,0 146,-13 164,165 58,193 -80,152 117,80 1,2";

    fn polygon() -> Vec<Point> {
        vec![
            Point::new(0, 0),
            Point::new(146, -13),
            Point::new(164, 165),
            Point::new(58, 193),
            Point::new(-80, 152),
            Point::new(117, 80),
            Point::new(1, 2),
        ]
    }

    #[test]
    fn test_decode_points() {
        assert_eq!(decode_points(POLYGON).unwrap(), polygon());
    }

    #[test]
    fn test_encode_points() {
        assert_eq!(encode_points(&polygon()), POLYGON);
    }

    #[test]
    fn test_canonical_round_trip() {
        let s = "0,0 146,-13 1,2";
        assert_eq!(encode_points(&decode_points(s).unwrap()), s);
    }

    #[test]
    fn test_empty() {
        assert!(decode_points("").unwrap().is_empty());
        assert_eq!(encode_points(&[]), "");
    }

    #[test]
    fn test_malformed_tokens() {
        for bad in ["1", "1,2,3", "1,2 3", "a,1", "1,", "1,2  3,4"] {
            assert!(
                matches!(decode_points(bad), Err(Error::InvalidPoint(_))),
                "expected failure for {bad:?}"
            );
        }
    }

    #[test]
    fn test_error_cites_token() {
        let err = decode_points("0,0 7;8").unwrap_err();
        assert!(err.to_string().contains("7;8"));
    }

    proptest! {
        #[test]
        fn test_points_round_trip(raw in proptest::collection::vec((any::<i32>(), any::<i32>()), 1..16)) {
            let points: Vec<Point> = raw.into_iter().map(Point::from).collect();
            let encoded = encode_points(&points);
            prop_assert_eq!(decode_points(&encoded).unwrap(), points);
        }
    }
}
