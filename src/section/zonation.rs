//! Zonelog alignment
//!
//! Splits a well's zonelog into runs of one code, placed on the fence's
//! distance axis. At every code change the last sample of the outgoing
//! zone is repeated as the first sample of the incoming zone, so the
//! colored segments meet without a visual gap.

use tracing::{debug, warn};

use crate::types::{Fence, SectionPoint, WellTrajectory, ZoneSegment};

use super::assembler::project_well;

/// Convert raw zonelog values to integer codes, raising anything below
/// `min_zone_code` (including undefined values) up to `min_zone_code`.
pub fn clamp_zone_codes(values: &[Option<f64>], min_zone_code: i32) -> Vec<i32> {
    values
        .iter()
        .map(|v| match v {
            Some(v) if v.is_finite() => (v.round() as i32).max(min_zone_code),
            _ => min_zone_code,
        })
        .collect()
}

/// Group consecutive samples with equal codes into segments.
///
/// Each segment after the first starts with the sample that ended the
/// previous one. `points` and `codes` are parallel slices.
pub fn segment_zones(points: &[SectionPoint], codes: &[i32]) -> Vec<ZoneSegment> {
    debug_assert_eq!(points.len(), codes.len());

    let mut segments: Vec<ZoneSegment> = Vec::new();
    for (i, (point, &code)) in points.iter().zip(codes).enumerate() {
        match segments.last_mut() {
            Some(current) if current.code == code => current.points.push(*point),
            _ => {
                let mut seg_points = Vec::with_capacity(2);
                if i > 0 {
                    seg_points.push(points[i - 1]);
                }
                seg_points.push(*point);
                segments.push(ZoneSegment {
                    code,
                    points: seg_points,
                });
            }
        }
    }
    segments
}

/// Zone segments of `zonelog_name` projected onto `fence`.
///
/// Returns an empty list if the well has no log by that name, or if the
/// log does not have one value per trajectory record.
pub fn align_zonelog(
    well: &WellTrajectory,
    fence: &Fence,
    zonelog_name: &str,
    min_zone_code: i32,
) -> Vec<ZoneSegment> {
    let Some(log) = well.log(zonelog_name) else {
        debug!(well = %well.name, zonelog = zonelog_name, "Well has no zonelog");
        return Vec::new();
    };
    if log.values.len() != well.records.len() {
        warn!(
            well = %well.name,
            zonelog = zonelog_name,
            values = log.values.len(),
            records = well.records.len(),
            "Zonelog length does not match trajectory, skipping zones"
        );
        return Vec::new();
    }

    let points = project_well(well, fence);
    let codes = clamp_zone_codes(&log.values, min_zone_code);
    segment_zones(&points, &codes)
}
