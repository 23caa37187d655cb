//! Fence builder
//!
//! A fence is the horizontal axis of a cross-section. It is built either
//! from a drawn polyline (vertices used as-is) or from a well trajectory
//! (extended at both ends, then resampled at a uniform 3-D arc length and
//! projected to the horizontal plane).

use crate::types::{Fence, FenceSample, Point2, WellTrajectory};

use super::SectionError;

/// Direction used to extend a trajectory with no horizontal extent.
const VERTICAL_WELL_DIRECTION: Point2 = Point2::new(1.0, 0.0);

// ============================================================================
// Polyline fences
// ============================================================================

/// Build a fence directly from polyline vertices.
///
/// Every vertex becomes a fence sample; distance is the cumulative planar
/// length. Fails if fewer than two points are given, a point is not finite,
/// or two consecutive points coincide.
pub fn build_fence_from_polyline(points: &[Point2]) -> Result<Fence, SectionError> {
    if points.len() < 2 {
        return Err(SectionError::InvalidGeometry(format!(
            "polyline needs at least 2 points, got {}",
            points.len()
        )));
    }
    if let Some(i) = points.iter().position(|p| !p.is_finite()) {
        return Err(SectionError::InvalidGeometry(format!(
            "polyline point {i} is not finite"
        )));
    }
    if let Some(i) = points.windows(2).position(|w| w[0].is_coincident(w[1])) {
        return Err(SectionError::InvalidGeometry(format!(
            "polyline points {i} and {} are coincident",
            i + 1
        )));
    }
    Ok(accumulate(points.iter().copied()))
}

// ============================================================================
// Well fences
// ============================================================================

type Point3 = [f64; 3];

fn distance3(a: Point3, b: Point3) -> f64 {
    (b[0] - a[0]).hypot(b[1] - a[1]).hypot(b[2] - a[2])
}

fn lerp3(a: Point3, b: Point3, t: f64) -> Point3 {
    [
        (b[0] - a[0]).mul_add(t, a[0]),
        (b[1] - a[1]).mul_add(t, a[1]),
        (b[2] - a[2]).mul_add(t, a[2]),
    ]
}

fn horizontal(p: Point3) -> Point2 {
    Point2::new(p[0], p[1])
}

fn unit(from: Point2, to: Point2) -> Point2 {
    let len = from.distance_to(to);
    Point2::new((to.x - from.x) / len, (to.y - from.y) / len)
}

/// Outward horizontal directions at the start and end of a path.
fn end_directions(path: &[Point3]) -> (Point2, Point2) {
    let first = horizontal(path[0]);
    let last = horizontal(path[path.len() - 1]);

    let start = path
        .iter()
        .map(|p| horizontal(*p))
        .find(|p| !p.is_coincident(first))
        .map_or(
            Point2::new(-VERTICAL_WELL_DIRECTION.x, -VERTICAL_WELL_DIRECTION.y),
            |p| unit(p, first),
        );
    let end = path
        .iter()
        .rev()
        .map(|p| horizontal(*p))
        .find(|p| !p.is_coincident(last))
        .map_or(VERTICAL_WELL_DIRECTION, |p| unit(p, last));

    (start, end)
}

/// Points every `step` of arc length along a 3-D path, plus its endpoint.
fn resample_arc_length(path: &[Point3], step: f64) -> Vec<Point3> {
    let mut out = vec![path[0]];
    let mut travelled = 0.0;
    let mut next_at = step;

    for w in path.windows(2) {
        let seg_len = distance3(w[0], w[1]);
        if seg_len <= 0.0 {
            continue;
        }
        while next_at <= travelled + seg_len {
            out.push(lerp3(w[0], w[1], (next_at - travelled) / seg_len));
            next_at += step;
        }
        travelled += seg_len;
    }

    if travelled - (next_at - step) > 1e-9 {
        out.push(path[path.len() - 1]);
    }
    out
}

/// Build a fence along a well path.
///
/// The trajectory is extended horizontally by `extension` at both ends,
/// following the direction of its first and last horizontal movement
/// (east-west for a vertical well), then resampled every
/// `sampling_interval` of 3-D arc length. Samples that project onto the
/// previous horizontal position are dropped so the fence distance stays
/// strictly increasing.
pub fn build_fence_from_well(
    well: &WellTrajectory,
    extension: f64,
    sampling_interval: f64,
) -> Result<Fence, SectionError> {
    if well.records.len() < 2 {
        return Err(SectionError::InvalidGeometry(format!(
            "well {} has {} trajectory records, need at least 2",
            well.name,
            well.records.len()
        )));
    }
    if !(sampling_interval.is_finite() && sampling_interval > 0.0) {
        return Err(SectionError::InvalidGeometry(format!(
            "sampling interval must be positive, got {sampling_interval}"
        )));
    }
    if !(extension.is_finite() && extension >= 0.0) {
        return Err(SectionError::InvalidGeometry(format!(
            "extension must be non-negative, got {extension}"
        )));
    }

    let mut path: Vec<Point3> = well.records.iter().map(|r| [r.x, r.y, r.tvd]).collect();
    if path.iter().flatten().any(|v| !v.is_finite()) {
        return Err(SectionError::InvalidGeometry(format!(
            "well {} has non-finite trajectory coordinates",
            well.name
        )));
    }

    if extension > 0.0 {
        let (start_dir, end_dir) = end_directions(&path);
        let first = path[0];
        let last = path[path.len() - 1];
        path.insert(
            0,
            [
                start_dir.x.mul_add(extension, first[0]),
                start_dir.y.mul_add(extension, first[1]),
                first[2],
            ],
        );
        path.push([
            end_dir.x.mul_add(extension, last[0]),
            end_dir.y.mul_add(extension, last[1]),
            last[2],
        ]);
    }

    let mut positions: Vec<Point2> = Vec::new();
    for p in resample_arc_length(&path, sampling_interval) {
        let q = horizontal(p);
        if positions.last().map_or(true, |prev| !prev.is_coincident(q)) {
            positions.push(q);
        }
    }

    if positions.len() < 2 {
        return Err(SectionError::InvalidGeometry(format!(
            "well {} has no horizontal extent to build a fence along",
            well.name
        )));
    }
    Ok(accumulate(positions))
}

// ============================================================================
// Shared
// ============================================================================

fn accumulate(positions: impl IntoIterator<Item = Point2>) -> Fence {
    let mut samples: Vec<FenceSample> = Vec::new();
    for position in positions {
        let distance = samples
            .last()
            .map_or(0.0, |prev| prev.distance + prev.position.distance_to(position));
        samples.push(FenceSample { position, distance });
    }
    Fence { samples }
}

impl Fence {
    /// Along-line distance of the fence point nearest to `p`.
    pub fn project(&self, p: Point2) -> f64 {
        let Some(first) = self.samples.first() else {
            return 0.0;
        };

        let mut best = (first.position.distance_to(p), first.distance);
        for w in self.samples.windows(2) {
            let (a, b) = (w[0].position, w[1].position);
            let (dx, dy) = (b.x - a.x, b.y - a.y);
            let len2 = dx.mul_add(dx, dy * dy);
            let t = if len2 > 0.0 {
                ((p.x - a.x).mul_add(dx, (p.y - a.y) * dy) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let foot = Point2::new(dx.mul_add(t, a.x), dy.mul_add(t, a.y));
            let off = foot.distance_to(p);
            if off < best.0 {
                best = (off, (w[1].distance - w[0].distance).mul_add(t, w[0].distance));
            }
        }
        best.1
    }
}
