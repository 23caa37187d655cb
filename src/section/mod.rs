//! Cross-section construction
//!
//! Everything here is a pure function of already-loaded data:
//!
//! - [`fence`]: turns a well trajectory or a drawn polyline into a [`Fence`]
//! - [`assembler`]: resamples surfaces onto a fence and derives uncertainty
//!   envelopes; assembles a complete [`CrossSection`]
//! - [`zonation`]: projects a well's zonelog onto a fence as [`ZoneSegment`]s
//!
//! [`Fence`]: crate::types::Fence
//! [`ZoneSegment`]: crate::types::ZoneSegment

pub mod assembler;
pub mod fence;
pub mod zonation;

pub use assembler::{
    assemble, compute_envelope, project_well, resample_surface_on_fence, CrossSection,
    SurfaceLayer, SurfaceSection, WellSection,
};
pub use fence::{build_fence_from_polyline, build_fence_from_well};
pub use zonation::{align_zonelog, clamp_zone_codes, segment_zones};

use thiserror::Error;

/// Errors in cross-section construction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SectionError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Mismatched fence: {0}")]
    MismatchedFence(String),
}
