//! Axis ranges
//!
//! The view is framed around where the well enters the shallowest surface:
//! depth runs from the deepest surface point up to a margin above that
//! entry point, and distance is centred on the stretch of well below it.

use serde::Serialize;

use crate::section::CrossSection;

/// Fraction of the visible depth span left as margin above the well entry.
const TOP_MARGIN: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRanges {
    /// Along-fence distance range
    pub x: [f64; 2],
    /// Depth range, deepest first so depth increases downwards
    pub y: [f64; 2],
    pub min_depth: f64,
    pub max_depth: f64,
}

/// Shallowest and deepest defined depth over every surface line.
pub fn depth_extent(section: &CrossSection) -> Option<(f64, f64)> {
    section
        .surfaces
        .iter()
        .filter_map(|s| s.line.depth_range())
        .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
}

/// Axis ranges for a cross-section, or `None` if no surface has a defined point.
///
/// `x_well`/`y_well` is the first well sample at or below the shallowest
/// surface depth and `xmax` the largest well distance. Then
/// `y = [max_depth, y_well - 0.15 * |max_depth - y_well|]` and
/// `x = [x_well - w, xmax + w]` with `w = |xmax - x_well|`. Without a well
/// crossing (or when it spans no distance) the whole fence is shown.
pub fn axis_ranges(section: &CrossSection) -> Option<AxisRanges> {
    let (min_depth, max_depth) = depth_extent(section)?;

    let crossing = section.well.as_ref().and_then(|w| {
        let entry = w.path.iter().find(|p| p.depth >= min_depth)?;
        let xmax = w
            .path
            .iter()
            .map(|p| p.distance)
            .fold(f64::NEG_INFINITY, f64::max);
        Some((entry.distance, entry.depth, xmax))
    });

    let (x, y_top) = match crossing {
        Some((x_well, y_well, xmax)) if (xmax - x_well).abs() > 0.0 => {
            let w = (xmax - x_well).abs();
            ([x_well - w, xmax + w], y_well)
        }
        Some((_, y_well, _)) => ([0.0, section.fence.total_length()], y_well),
        None => ([0.0, section.fence.total_length()], min_depth),
    };
    let y = [
        max_depth,
        TOP_MARGIN.mul_add(-(max_depth - y_top).abs(), y_top),
    ];

    Some(AxisRanges {
        x,
        y,
        min_depth,
        max_depth,
    })
}
