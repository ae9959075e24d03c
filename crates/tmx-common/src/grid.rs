//! Tile grid encodings for layer `<data>` blocks.
//!
//! A grid is a list of rows of global tile ids; id `0` means the cell is
//! empty. The CSV form writes one comma separated row per line, with a
//! trailing comma on every row except the last:
//!
//! ```text
//! 0,0,
//! 140,0
//! ```
//!
//! The base64 form is the CSV text, base64 encoded.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::{Error, Result};

/// Escaped newline that may appear in place of a literal newline when the
/// character data was written without unescaping.
pub const NEWLINE_ESCAPE: &str = "&#xA;";

/// Global tile id of an empty cell.
pub const EMPTY_CELL: u32 = 0;

/// Rows of global tile ids.
pub type TileGrid = Vec<Vec<u32>>;

/// Decode CSV tile data.
///
/// Rows are separated by newlines or [`NEWLINE_ESCAPE`]. Blank rows and empty
/// fields (from trailing commas) are skipped.
pub fn decode_csv(text: &str) -> Result<TileGrid> {
    let normalized = text.replace(NEWLINE_ESCAPE, "\n");

    let mut grid = Vec::new();
    for row in normalized.split('\n') {
        let row = row.trim();
        if row.is_empty() {
            continue;
        }

        let ids = row
            .split(',')
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .map(|cell| {
                cell.parse::<u32>()
                    .map_err(|_| Error::InvalidTileId(cell.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        grid.push(ids);
    }
    Ok(grid)
}

/// Encode a grid as CSV tile data.
pub fn encode_csv(grid: &[Vec<u32>]) -> String {
    let last = grid.len().saturating_sub(1);
    grid.iter()
        .enumerate()
        .map(|(index, row)| {
            let mut line = row
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(",");
            if index != last {
                line.push(',');
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Decode base64 tile data: base64 decode, then decode the result as CSV.
///
/// Whitespace around and inside the base64 block is ignored.
pub fn decode_base64(text: &str) -> Result<TileGrid> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact)?;
    let csv = String::from_utf8(bytes)?;
    decode_csv(&csv)
}

/// Encode a grid as base64 wrapped CSV.
pub fn encode_base64(grid: &[Vec<u32>]) -> String {
    STANDARD.encode(encode_csv(grid))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> TileGrid {
        let mut grid = vec![vec![0u32; 8]; 6];
        for row in grid.iter_mut().take(4).skip(2) {
            for cell in row.iter_mut().take(6).skip(2) {
                *cell = 140;
            }
        }
        grid
    }

    /// Same grid as [`sample_grid`], written with escaped newlines and a
    /// leading and trailing separator the way some editors emit it.
    const ESCAPED_CSV: &str = "&#xA;0,0,0,0,0,0,0,0,&#xA;0,0,0,0,0,0,0,0,&#xA;0,0,140,140,140,140,0,0,&#xA;0,0,140,140,140,140,0,0,&#xA;0,0,0,0,0,0,0,0,&#xA;0,0,0,0,0,0,0,0&#xA;";

    #[test]
    fn test_encode_csv() {
        assert_eq!(encode_csv(&[vec![0, 0], vec![140, 0]]), "0,0,\n140,0");
        assert_eq!(encode_csv(&[vec![7]]), "7");
        assert_eq!(encode_csv(&[]), "");
    }

    #[test]
    fn test_decode_csv() {
        assert_eq!(
            decode_csv("0,0,\n140,0").unwrap(),
            vec![vec![0, 0], vec![140, 0]]
        );
    }

    #[test]
    fn test_decode_escaped_newlines() {
        assert_eq!(decode_csv(ESCAPED_CSV).unwrap(), sample_grid());
    }

    #[test]
    fn test_decode_mixed_separators() {
        let text = "\n1,2,&#xA;3,4,\r\n5,6\n";
        assert_eq!(
            decode_csv(text).unwrap(),
            vec![vec![1, 2], vec![3, 4], vec![5, 6]]
        );
    }

    #[test]
    fn test_csv_round_trip() {
        let grid = sample_grid();
        assert_eq!(decode_csv(&encode_csv(&grid)).unwrap(), grid);
    }

    #[test]
    fn test_non_numeric_cell() {
        let err = decode_csv("1,2,\n3,x").unwrap_err();
        assert!(matches!(err, Error::InvalidTileId(ref cell) if cell == "x"));

        assert!(decode_csv("1,-2").is_err());
    }

    #[test]
    fn test_decode_base64() {
        let encoded = STANDARD.encode(ESCAPED_CSV);
        assert_eq!(decode_base64(&encoded).unwrap(), sample_grid());
    }

    #[test]
    fn test_base64_round_trip() {
        let grid = sample_grid();
        let encoded = encode_base64(&grid);
        assert_eq!(decode_base64(&format!("\n   {encoded}\n  ")).unwrap(), grid);
    }

    #[test]
    fn test_invalid_base64() {
        assert!(matches!(decode_base64("not base64!"), Err(Error::Base64(_))));
    }
}
