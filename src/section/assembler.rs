//! Cross-section assembler
//!
//! Resamples surfaces onto a fence, derives uncertainty envelopes, and
//! bundles the result with the projected well path and its zonation.

use serde::Serialize;
use tracing::{debug, warn};

use crate::surface::RegularSurface;
use crate::types::{
    CrossSectionLine, Envelope, Fence, LinePoint, SectionPoint, WellTrajectory, ZoneSegment,
};

use super::zonation::align_zonelog;
use super::SectionError;

// ============================================================================
// Line operations
// ============================================================================

/// Sample a surface at every fence position.
///
/// The result has exactly one point per fence sample. Positions outside the
/// surface extent carry `depth: None` so the plotted line shows a gap.
pub fn resample_surface_on_fence(surface: &RegularSurface, fence: &Fence) -> CrossSectionLine {
    let points = fence
        .samples()
        .iter()
        .map(|s| LinePoint {
            distance: s.distance,
            depth: surface.sample_at(s.position),
        })
        .collect();
    CrossSectionLine {
        name: surface.name.clone(),
        points,
    }
}

/// Upper and lower uncertainty bounds: `base + error` and `base - error`.
///
/// Both lines must come from the same fence (same sample count and the same
/// distances in the same order). A value is undefined wherever either input
/// is undefined.
pub fn compute_envelope(
    base: &CrossSectionLine,
    error: &CrossSectionLine,
) -> Result<Envelope, SectionError> {
    if base.len() != error.len() {
        return Err(SectionError::MismatchedFence(format!(
            "{} has {} samples but error line {} has {}",
            base.name,
            base.len(),
            error.name,
            error.len()
        )));
    }
    if let Some(i) = base
        .points
        .iter()
        .zip(&error.points)
        .position(|(b, e)| b.distance.to_bits() != e.distance.to_bits())
    {
        return Err(SectionError::MismatchedFence(format!(
            "{} and {} diverge at sample {i}",
            base.name, error.name
        )));
    }

    let combine = |op: fn(f64, f64) -> f64| -> Vec<LinePoint> {
        base.points
            .iter()
            .zip(&error.points)
            .map(|(b, e)| LinePoint {
                distance: b.distance,
                depth: b.depth.zip(e.depth).map(|(bd, ed)| op(bd, ed)),
            })
            .collect()
    };

    Ok(Envelope {
        upper: CrossSectionLine {
            name: format!("{}_error_add", base.name),
            points: combine(|b, e| b + e),
        },
        lower: CrossSectionLine {
            name: format!("{}_error_sub", base.name),
            points: combine(|b, e| b - e),
        },
    })
}

/// Project every well record onto the fence as (distance, tvd).
pub fn project_well(well: &WellTrajectory, fence: &Fence) -> Vec<SectionPoint> {
    well.records
        .iter()
        .map(|r| SectionPoint {
            distance: fence.project(r.position()),
            depth: r.tvd,
        })
        .collect()
}

// ============================================================================
// Full cross-section
// ============================================================================

/// A loaded surface to place on the section, optionally with its error surface.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceLayer<'a> {
    pub name: &'a str,
    pub color: &'a str,
    pub surface: &'a RegularSurface,
    pub error: Option<&'a RegularSurface>,
}

/// One surface on the section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceSection {
    pub name: String,
    pub color: String,
    pub line: CrossSectionLine,
    pub envelope: Option<Envelope>,
}

/// The selected well as seen on the section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellSection {
    pub name: String,
    pub path: Vec<SectionPoint>,
    pub zones: Vec<ZoneSegment>,
    /// Display names for zone codes, when the zonelog defines them
    pub zone_names: Vec<(i32, String)>,
}

/// Everything needed to draw one cross-section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossSection {
    pub fence: Fence,
    pub surfaces: Vec<SurfaceSection>,
    pub well: Option<WellSection>,
}

/// Assemble a cross-section for the given layers and (optionally) a well.
pub fn assemble(
    fence: &Fence,
    layers: &[SurfaceLayer<'_>],
    well: Option<&WellTrajectory>,
    zonelog_name: Option<&str>,
    min_zone_code: i32,
) -> Result<CrossSection, SectionError> {
    let mut surfaces = Vec::with_capacity(layers.len());
    for layer in layers {
        let mut line = resample_surface_on_fence(layer.surface, fence);
        line.name = layer.name.to_string();

        let envelope = match layer.error {
            Some(error_surface) => {
                if !layer.surface.same_domain(error_surface) {
                    warn!(
                        surface = layer.name,
                        error = %error_surface.name,
                        "Error surface grid differs from base surface grid"
                    );
                }
                let error_line = resample_surface_on_fence(error_surface, fence);
                Some(compute_envelope(&line, &error_line)?)
            }
            None => None,
        };

        surfaces.push(SurfaceSection {
            name: layer.name.to_string(),
            color: layer.color.to_string(),
            line,
            envelope,
        });
    }

    let well = well.map(|w| {
        let zones = zonelog_name
            .map(|z| align_zonelog(w, fence, z, min_zone_code))
            .unwrap_or_default();
        let zone_names = zonelog_name
            .and_then(|z| w.log(z))
            .map(|log| {
                zones
                    .iter()
                    .filter_map(|seg| log.code_name(seg.code).map(|n| (seg.code, n.to_string())))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        WellSection {
            name: w.name.clone(),
            path: project_well(w, fence),
            zones,
            zone_names: dedup_pairs(zone_names),
        }
    });

    debug!(
        fence_samples = fence.len(),
        surfaces = surfaces.len(),
        well = well.as_ref().map_or("-", |w| w.name.as_str()),
        "Assembled cross-section"
    );

    Ok(CrossSection {
        fence: fence.clone(),
        surfaces,
        well,
    })
}

fn dedup_pairs(mut pairs: Vec<(i32, String)>) -> Vec<(i32, String)> {
    pairs.sort_by_key(|(code, _)| *code);
    pairs.dedup_by_key(|(code, _)| *code);
    pairs
}
