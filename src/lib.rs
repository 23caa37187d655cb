//! Horizon uncertainty: depth cross-sections with surface uncertainty
//!
//! Builds a vertical section along a well path or a drawn polyline, showing
//! the depth surfaces of a depth-conversion model, their optional ± error
//! envelopes, and the well trajectory coloured by zonelog.
//!
//! ## Architecture
//!
//! - **surface / well**: Readers for Irap ASCII grids and RMS well files
//! - **section**: Fence construction, surface resampling, zonelog alignment
//! - **plot**: Plotly-style figure and axis ranges for a cross-section
//! - **model**: `model_file.xml` parsing and the model directory layout
//! - **viewer**: Selection state machine and the interactive session
//! - **api**: HTTP surface over one viewer session

pub mod api;
pub mod config;
pub mod model;
pub mod plot;
pub mod section;
pub mod surface;
pub mod types;
pub mod viewer;
pub mod well;

// Re-export configuration
pub use config::ViewerConfig;

// Re-export commonly used types
pub use types::{
    CrossSectionLine, Envelope, Fence, Point2, WellLog, WellRecord, WellTrajectory, ZoneSegment,
};

// Re-export cross-section construction
pub use section::{
    assemble, build_fence_from_polyline, build_fence_from_well, CrossSection, SectionError,
};

// Re-export readers
pub use surface::{read_irap_ascii, RegularSurface, SurfaceError};
pub use well::{read_rms_well, WellError};

// Re-export viewer components
pub use model::{ModelLayout, ModelSummary};
pub use plot::{make_figure, Figure};
pub use viewer::{Session, ViewerError, ViewerEvent, ViewerSetup};
