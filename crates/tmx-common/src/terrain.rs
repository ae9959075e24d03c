//! Terrain corner encoding.
//!
//! A tile's `terrain` attribute holds four comma separated terrain indices in
//! the order top-left, top-right, bottom-left, bottom-right. Any slot may be
//! empty. Examples: `",,,2"`, `"1,2,,2"`, `"0,1,2,3"`, and `""` for a tile
//! with no terrain at all.

/// Four optional terrain indices: top-left, top-right, bottom-left, bottom-right.
pub type TerrainCorners = [Option<u32>; 4];

/// Corner slots.
pub const TOP_LEFT: usize = 0;
pub const TOP_RIGHT: usize = 1;
pub const BOTTOM_LEFT: usize = 2;
pub const BOTTOM_RIGHT: usize = 3;

/// No terrain on any corner.
pub const NO_TERRAIN: TerrainCorners = [None; 4];

/// Decode a terrain corner string.
///
/// Decoding is tolerant and never fails. A missing segment, an empty segment
/// or a negative value (`-1` is the usual "absent" sentinel) leaves that
/// corner absent. A segment that is not a number stops decoding: that corner
/// and every corner after it stay absent. Segments past the fourth are folded
/// into the fourth, which then fails to parse.
pub fn decode_terrain(s: &str) -> TerrainCorners {
    let mut corners = NO_TERRAIN;
    if s.is_empty() {
        return corners;
    }

    for (slot, segment) in corners.iter_mut().zip(s.splitn(4, ',')) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        match segment.parse::<i64>() {
            Ok(index) => *slot = u32::try_from(index).ok(),
            Err(_) => break,
        }
    }
    corners
}

/// Encode terrain corners.
///
/// All-absent encodes to the empty string rather than `",,,"`.
pub fn encode_terrain(corners: &TerrainCorners) -> String {
    if corners.iter().all(Option::is_none) {
        return String::new();
    }

    corners
        .iter()
        .map(|corner| corner.map(|index| index.to_string()).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_terrain() {
        let cases = [
            ("", NO_TERRAIN),
            (",,,", NO_TERRAIN),
            ("-1,-1,-1,-1", NO_TERRAIN),
            ("0,1,2,3", [Some(0), Some(1), Some(2), Some(3)]),
            ("3,,,2", [Some(3), None, None, Some(2)]),
            ("1,2,,2", [Some(1), Some(2), None, Some(2)]),
            ("2,-1,,0", [Some(2), None, None, Some(0)]),
        ];

        for (input, expected) in cases {
            assert_eq!(decode_terrain(input), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_encode_terrain() {
        assert_eq!(encode_terrain(&NO_TERRAIN), "");
        assert_eq!(encode_terrain(&[Some(0), Some(1), Some(2), Some(3)]), "0,1,2,3");
        assert_eq!(encode_terrain(&[Some(3), None, None, Some(2)]), "3,,,2");
    }

    #[test]
    fn test_round_trip() {
        let corners = [Some(3), None, None, Some(2)];
        assert_eq!(decode_terrain(&encode_terrain(&corners)), corners);
        assert_eq!(decode_terrain(&encode_terrain(&NO_TERRAIN)), NO_TERRAIN);
    }

    #[test]
    fn test_tolerant_decode() {
        assert_eq!(decode_terrain("x,1,,2"), NO_TERRAIN);
        assert_eq!(decode_terrain("1,x,2,3"), [Some(1), None, None, None]);
        assert_eq!(decode_terrain("1,2"), [Some(1), Some(2), None, None]);
        assert_eq!(decode_terrain("1,2,3,4,5"), [Some(1), Some(2), Some(3), None]);
    }
}
