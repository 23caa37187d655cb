//! Fence and cross-section value types

use serde::Serialize;

use super::Point2;

// ============================================================================
// Fence
// ============================================================================

/// One sample of a fence: a horizontal position and its cumulative
/// along-line distance from the first sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FenceSample {
    pub position: Point2,
    pub distance: f64,
}

/// Ordered horizontal sample path used as the common x-axis of a cross-section.
///
/// Only built by `section::fence`; distances start at 0 and are strictly
/// increasing between consecutive samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fence {
    pub(crate) samples: Vec<FenceSample>,
}

impl Fence {
    pub fn samples(&self) -> &[FenceSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Along-line distance of the last sample.
    pub fn total_length(&self) -> f64 {
        self.samples.last().map_or(0.0, |s| s.distance)
    }

    pub fn distances(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.distance)
    }
}

// ============================================================================
// Cross-section lines
// ============================================================================

/// Depth at one fence sample. `depth` is `None` where the surface is
/// undefined (outside its grid extent or an undefined node).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinePoint {
    pub distance: f64,
    pub depth: Option<f64>,
}

/// A surface resampled along a fence: one point per fence sample, in fence order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossSectionLine {
    pub name: String,
    pub points: Vec<LinePoint>,
}

impl CrossSectionLine {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Only the defined (distance, depth) pairs, skipping gaps.
    pub fn defined(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points
            .iter()
            .filter_map(|p| p.depth.map(|d| (p.distance, d)))
    }

    /// Shallowest and deepest defined depth, or `None` if the line is all gap.
    pub fn depth_range(&self) -> Option<(f64, f64)> {
        self.defined().fold(None, |acc, (_, d)| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        })
    }
}

/// Upper (base + error) and lower (base - error) uncertainty bounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub upper: CrossSectionLine,
    pub lower: CrossSectionLine,
}

// ============================================================================
// Zonation
// ============================================================================

/// A fully defined point on the section plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectionPoint {
    pub distance: f64,
    pub depth: f64,
}

/// A maximal run of consecutive well samples sharing one zonelog code.
///
/// Adjacent segments share their boundary sample: the last point of one
/// segment is the first point of the next.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneSegment {
    pub code: i32,
    pub points: Vec<SectionPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(depths: &[Option<f64>]) -> CrossSectionLine {
        CrossSectionLine {
            name: "top".to_string(),
            points: depths
                .iter()
                .enumerate()
                .map(|(i, d)| LinePoint {
                    distance: i as f64 * 10.0,
                    depth: *d,
                })
                .collect(),
        }
    }

    #[test]
    fn test_defined_skips_gaps() {
        let l = line(&[Some(1.0), None, Some(3.0)]);
        let defined: Vec<_> = l.defined().collect();
        assert_eq!(defined, vec![(0.0, 1.0), (20.0, 3.0)]);
    }

    #[test]
    fn test_depth_range() {
        let l = line(&[Some(1510.0), None, Some(1490.0), Some(1502.0)]);
        assert_eq!(l.depth_range(), Some((1490.0, 1510.0)));
        assert_eq!(line(&[None, None]).depth_range(), None);
    }
}
