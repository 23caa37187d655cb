//! Regular depth grids
//!
//! A [`RegularSurface`] is a rotated regular grid of depth values. The only
//! operation the cross-section needs from it is point sampling, done with
//! bilinear interpolation between the four surrounding nodes.
//!
//! Node `(col, row)` is stored at `values[row * ncol + col]` and sits at
//! `origin + R(rotation) * (col * xinc, row * yinc)`.

mod irap;

pub use irap::{parse_irap_ascii, read_irap_ascii, IRAP_ASCII_ID, IRAP_UNDEFINED};

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::types::Point2;

/// Grid-index tolerance for positions that sit on the outer grid edge.
const EDGE_TOLERANCE: f64 = 1e-9;

/// Largest node count a surface may hold.
pub const MAX_GRID_NODES: usize = 100_000_000;

/// Errors raised while reading or constructing a surface
#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported surface format in {path}: {reason}")]
    UnsupportedFormat { path: PathBuf, reason: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),
}

/// Grid geometry shared by a base surface and its error surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridGeometry {
    pub xori: f64,
    pub yori: f64,
    pub xinc: f64,
    pub yinc: f64,
    pub ncol: usize,
    pub nrow: usize,
    /// Counter-clockwise rotation of the grid's column axis, in degrees
    pub rotation: f64,
}

impl GridGeometry {
    /// Check the geometry and return its node count.
    fn validate(&self) -> Result<usize, SurfaceError> {
        if self.ncol == 0 || self.nrow == 0 {
            return Err(SurfaceError::InvalidGrid(format!(
                "grid must have at least one node, got {}x{}",
                self.ncol, self.nrow
            )));
        }
        if !(self.xinc > 0.0 && self.yinc > 0.0) {
            return Err(SurfaceError::InvalidGrid(format!(
                "increments must be positive, got xinc={} yinc={}",
                self.xinc, self.yinc
            )));
        }
        if !(self.xori.is_finite() && self.yori.is_finite() && self.rotation.is_finite()) {
            return Err(SurfaceError::InvalidGrid(
                "origin and rotation must be finite".to_string(),
            ));
        }
        self.ncol
            .checked_mul(self.nrow)
            .filter(|n| *n <= MAX_GRID_NODES)
            .ok_or_else(|| {
                SurfaceError::InvalidGrid(format!(
                    "{}x{} grid exceeds {MAX_GRID_NODES} nodes",
                    self.ncol, self.nrow
                ))
            })
    }

    /// Fractional (col, row) index of a horizontal position, or `None` if
    /// the position falls outside the grid extent.
    fn fractional_index(&self, p: Point2) -> Option<(f64, f64)> {
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let dx = p.x - self.xori;
        let dy = p.y - self.yori;
        let local_x = dx * cos + dy * sin;
        let local_y = -dx * sin + dy * cos;

        let col = clamp_to_edge(local_x / self.xinc, self.ncol)?;
        let row = clamp_to_edge(local_y / self.yinc, self.nrow)?;
        Some((col, row))
    }
}

fn clamp_to_edge(index: f64, count: usize) -> Option<f64> {
    let max = (count - 1) as f64;
    if index < -EDGE_TOLERANCE || index > max + EDGE_TOLERANCE || !index.is_finite() {
        return None;
    }
    Some(index.clamp(0.0, max))
}

/// `a + (b - a) * t`, with endpoints returned untouched so that an undefined
/// neighbour carrying zero weight does not poison the result.
fn lerp(a: Option<f64>, b: Option<f64>, t: f64) -> Option<f64> {
    if t == 0.0 {
        return a;
    }
    if t == 1.0 {
        return b;
    }
    let (a, b) = (a?, b?);
    Some((b - a).mul_add(t, a))
}

/// A named regular depth grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegularSurface {
    pub name: String,
    pub geometry: GridGeometry,
    values: Vec<Option<f64>>,
}

impl RegularSurface {
    pub fn new(
        name: impl Into<String>,
        geometry: GridGeometry,
        values: Vec<Option<f64>>,
    ) -> Result<Self, SurfaceError> {
        let expected = geometry.validate()?;
        if values.len() != expected {
            return Err(SurfaceError::InvalidGrid(format!(
                "expected {expected} values for a {}x{} grid, got {}",
                geometry.ncol,
                geometry.nrow,
                values.len()
            )));
        }
        Ok(Self {
            name: name.into(),
            geometry,
            values,
        })
    }

    /// Constant-depth surface, mostly useful for tests and synthetic models.
    pub fn flat(
        name: impl Into<String>,
        geometry: GridGeometry,
        depth: f64,
    ) -> Result<Self, SurfaceError> {
        let n = geometry.validate()?;
        Self::new(name, geometry, vec![Some(depth); n])
    }

    pub fn node(&self, col: usize, row: usize) -> Option<f64> {
        if col >= self.geometry.ncol || row >= self.geometry.nrow {
            return None;
        }
        self.values[row * self.geometry.ncol + col]
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Bilinear depth at a horizontal position. `None` outside the grid
    /// extent or where a contributing node is undefined.
    pub fn sample_at(&self, p: Point2) -> Option<f64> {
        let (fc, fr) = self.geometry.fractional_index(p)?;

        let c0 = fc.floor() as usize;
        let r0 = fr.floor() as usize;
        let c1 = (c0 + 1).min(self.geometry.ncol - 1);
        let r1 = (r0 + 1).min(self.geometry.nrow - 1);
        let t = fc - c0 as f64;
        let u = fr - r0 as f64;

        let lower = lerp(self.node(c0, r0), self.node(c1, r0), t);
        let upper = lerp(self.node(c0, r1), self.node(c1, r1), t);
        lerp(lower, upper, u)
    }

    /// Whether another surface is defined on the same grid domain.
    pub fn same_domain(&self, other: &Self) -> bool {
        self.geometry == other.geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(rotation: f64) -> GridGeometry {
        GridGeometry {
            xori: 1000.0,
            yori: 2000.0,
            xinc: 25.0,
            yinc: 25.0,
            ncol: 5,
            nrow: 4,
            rotation,
        }
    }

    /// depth = x_index * 10 + y_index, a plane in grid space
    fn ramp() -> RegularSurface {
        let g = geometry(0.0);
        let values = (0..g.nrow)
            .flat_map(|r| (0..g.ncol).map(move |c| Some(c as f64 * 10.0 + r as f64)))
            .collect();
        RegularSurface::new("ramp", g, values).unwrap()
    }

    #[test]
    fn test_sample_on_node() {
        let s = ramp();
        assert_eq!(s.sample_at(Point2::new(1000.0, 2000.0)), Some(0.0));
        assert_eq!(s.sample_at(Point2::new(1050.0, 2025.0)), Some(21.0));
    }

    #[test]
    fn test_sample_bilinear_between_nodes() {
        let s = ramp();
        let v = s.sample_at(Point2::new(1012.5, 2012.5)).unwrap();
        assert!((v - 5.5).abs() < 1e-9, "got {v}");
    }

    #[test]
    fn test_sample_outside_extent_is_undefined() {
        let s = ramp();
        assert_eq!(s.sample_at(Point2::new(999.0, 2010.0)), None);
        assert_eq!(s.sample_at(Point2::new(1101.0, 2010.0)), None);
        assert_eq!(s.sample_at(Point2::new(1010.0, 2076.0)), None);
    }

    #[test]
    fn test_sample_on_far_edge_is_defined() {
        let s = ramp();
        assert_eq!(s.sample_at(Point2::new(1100.0, 2075.0)), Some(43.0));
    }

    #[test]
    fn test_undefined_node_poisons_only_its_cell() {
        let g = geometry(0.0);
        let mut values = vec![Some(100.0); g.ncol * g.nrow];
        values[0] = None;
        let s = RegularSurface::new("holey", g, values).unwrap();
        assert_eq!(s.sample_at(Point2::new(1010.0, 2010.0)), None);
        assert_eq!(s.sample_at(Point2::new(1025.0, 2010.0)), Some(100.0));
        assert_eq!(s.sample_at(Point2::new(1060.0, 2060.0)), Some(100.0));
    }

    #[test]
    fn test_rotated_grid() {
        let g = geometry(90.0);
        let s = RegularSurface::flat("rot", g, 1500.0).unwrap();
        // Rotated 90 degrees CCW: columns run north, rows run west.
        assert_eq!(s.sample_at(Point2::new(1000.0, 2050.0)), Some(1500.0));
        assert_eq!(s.sample_at(Point2::new(970.0, 2050.0)), Some(1500.0));
        assert_eq!(s.sample_at(Point2::new(1030.0, 2050.0)), None);
    }

    #[test]
    fn test_value_count_must_match_grid() {
        let g = geometry(0.0);
        let err = RegularSurface::new("bad", g, vec![Some(1.0); 3]).unwrap_err();
        assert!(matches!(err, SurfaceError::InvalidGrid(_)));
    }

    #[test]
    fn test_non_positive_increment_rejected() {
        let mut g = geometry(0.0);
        g.xinc = 0.0;
        assert!(RegularSurface::flat("bad", g, 1.0).is_err());
    }

    #[test]
    fn test_node_count_overflow_is_invalid_grid() {
        let mut g = geometry(0.0);
        g.ncol = usize::MAX;
        g.nrow = 2;
        let err = RegularSurface::flat("huge", g, 1.0).unwrap_err();
        assert!(matches!(err, SurfaceError::InvalidGrid(_)));
        let err = RegularSurface::new("huge", g, Vec::new()).unwrap_err();
        assert!(matches!(err, SurfaceError::InvalidGrid(_)));
    }
}
