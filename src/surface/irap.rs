//! Irap classic ASCII grid reader
//!
//! Layout (whitespace separated, values with the column index varying fastest):
//!
//! ```text
//! -996  NROW  XINC  YINC
//! XMIN  XMAX  YMIN  YMAX
//! NCOL  ROTATION  XORI  YORI
//! 0  0  0  0  0  0  0
//! v(0,0) v(1,0) ... v(NCOL-1,NROW-1)
//! ```
//!
//! The binary variant of the format is decoded upstream; only the ASCII
//! form is read here. Files that are not ASCII Irap are rejected with
//! [`SurfaceError::UnsupportedFormat`].

use std::path::Path;

use super::{GridGeometry, RegularSurface, SurfaceError};

/// Magic first token of an Irap classic ASCII file.
pub const IRAP_ASCII_ID: &str = "-996";

/// Node value used by Irap files for undefined nodes.
pub const IRAP_UNDEFINED: f64 = 9_999_900.0;

/// Number of header tokens before the node values start.
const HEADER_TOKENS: usize = 19;

/// Largest column or row count accepted from a header.
const MAX_GRID_DIMENSION: f64 = 1_000_000.0;

/// Read an Irap ASCII grid from disk, naming the surface after the file stem.
pub fn read_irap_ascii(path: &Path) -> Result<RegularSurface, SurfaceError> {
    let bytes = std::fs::read(path).map_err(|source| SurfaceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let text = String::from_utf8(bytes).map_err(|_| SurfaceError::UnsupportedFormat {
        path: path.to_path_buf(),
        reason: "not an ASCII grid (binary grids must be converted upstream)".to_string(),
    })?;

    if text.split_whitespace().next() != Some(IRAP_ASCII_ID) {
        return Err(SurfaceError::UnsupportedFormat {
            path: path.to_path_buf(),
            reason: format!("missing Irap ASCII identifier {IRAP_ASCII_ID}"),
        });
    }

    let name = path
        .file_stem()
        .map_or_else(String::new, |s| s.to_string_lossy().into_owned());
    parse_irap_ascii(&name, &text)
}

fn parse_number(token: &str, field: &str) -> Result<f64, SurfaceError> {
    token
        .parse::<f64>()
        .map_err(|e| SurfaceError::Parse(format!("{field}: '{token}': {e}")))
}

fn parse_count(token: &str, field: &str) -> Result<usize, SurfaceError> {
    let value = parse_number(token, field)?;
    if value < 0.0 || value.fract() != 0.0 {
        return Err(SurfaceError::Parse(format!(
            "{field}: '{token}' is not a non-negative integer"
        )));
    }
    if value > MAX_GRID_DIMENSION {
        return Err(SurfaceError::InvalidGrid(format!(
            "{field}: {token} exceeds {MAX_GRID_DIMENSION}"
        )));
    }
    Ok(value as usize)
}

/// Parse the text of an Irap classic ASCII grid.
pub fn parse_irap_ascii(name: &str, text: &str) -> Result<RegularSurface, SurfaceError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() < HEADER_TOKENS {
        return Err(SurfaceError::Parse(format!(
            "header truncated: expected {HEADER_TOKENS} tokens, found {}",
            tokens.len()
        )));
    }
    if tokens[0] != IRAP_ASCII_ID {
        return Err(SurfaceError::Parse(format!(
            "expected identifier {IRAP_ASCII_ID}, found '{}'",
            tokens[0]
        )));
    }

    let nrow = parse_count(tokens[1], "nrow")?;
    let xinc = parse_number(tokens[2], "xinc")?;
    let yinc = parse_number(tokens[3], "yinc")?;
    let ncol = parse_count(tokens[8], "ncol")?;
    let rotation = parse_number(tokens[9], "rotation")?;
    let xori = parse_number(tokens[10], "xori")?;
    let yori = parse_number(tokens[11], "yori")?;

    let geometry = GridGeometry {
        xori,
        yori,
        xinc,
        yinc,
        ncol,
        nrow,
        rotation,
    };

    let values = tokens[HEADER_TOKENS..]
        .iter()
        .map(|t| {
            let v = parse_number(t, "node value")?;
            Ok((v < IRAP_UNDEFINED && v.is_finite()).then_some(v))
        })
        .collect::<Result<Vec<_>, SurfaceError>>()?;

    RegularSurface::new(name, geometry, values)
}
