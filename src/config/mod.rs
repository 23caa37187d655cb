//! Viewer Configuration Module
//!
//! Fence, zonation, display, and server settings loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `HORIZON_CONFIG` environment variable (path to TOML file)
//! 2. `horizon_viewer.toml` in the current working directory
//! 3. Built-in defaults
//!
//! The loaded [`ViewerConfig`] is passed explicitly to whatever needs it;
//! there is no process-wide instance.

pub mod defaults;
pub mod validation;
mod viewer_config;

pub use viewer_config::*;
