//! Built-in default values.
//!
//! Grouped by config section. Every `#[serde(default = ...)]` in
//! `viewer_config.rs` resolves to one of these.

// ============================================================================
// Fence
// ============================================================================

/// Horizontal distance a well fence is extended past each end of the
/// trajectory (m). 100 samples at the default 5 m interval.
pub const FENCE_EXTENSION_M: f64 = 500.0;

/// Arc length between well fence samples (m).
pub const FENCE_SAMPLING_INTERVAL_M: f64 = 5.0;

/// Extensions beyond this are accepted but flagged as suspicious (m).
pub const FENCE_EXTENSION_WARN_M: f64 = 10_000.0;

/// Sampling intervals beyond this give visibly coarse sections (m).
pub const FENCE_SAMPLING_WARN_M: f64 = 100.0;

// ============================================================================
// Zonation
// ============================================================================

/// Zone codes below this (and undefined codes) are raised to it.
pub const MIN_ZONE_CODE: i32 = 0;

// ============================================================================
// Display
// ============================================================================

pub const ZUNIT: &str = crate::viewer::DEFAULT_ZUNIT;

/// Surface colors, assigned in surface order.
pub const SURFACE_COLORS: [&str; 8] = [
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
];

// ============================================================================
// Server
// ============================================================================

pub const SERVER_ADDR: &str = "127.0.0.1:8050";

/// Maximum accepted request body (bytes). Events are small JSON documents.
pub const MAX_REQUEST_BODY_BYTES: usize = 256 * 1024;

/// Per-request timeout (seconds). Covers loading every selected surface.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;
