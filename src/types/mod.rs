//! Shared data structures for cross-section construction
//!
//! This module defines the value types that flow between the subsystems:
//! - Horizontal geometry: Point2
//! - Fence: ordered horizontal sample path with cumulative distance
//! - CrossSectionLine / Envelope: surface depths along a fence
//! - ZoneSegment: zonelog runs projected onto a fence
//! - WellTrajectory: well path records plus their logs

mod geometry;
mod section;
mod well;

pub use geometry::*;
pub use section::*;
pub use well::*;
