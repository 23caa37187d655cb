//! Interactive viewer state
//!
//! - [`setup`]: the fixed list of surfaces and wells a viewer offers
//! - [`source`]: how surfaces and wells are loaded
//! - [`events`]: user interactions and the pure event-to-transition function
//! - [`session`]: per-viewer state, one recomputation per interaction

pub mod events;
pub mod session;
pub mod setup;
pub mod source;

pub use events::{transition, Effect, FenceSource, Selection, Transition, ViewerEvent};
pub use session::{Session, SessionSettings, SessionStats};
pub use setup::{SetupError, SetupOptions, SurfaceSpec, ViewerSetup, WellSpec, DEFAULT_ZUNIT};
pub use source::{DataSource, FileSource, MemorySource};

use thiserror::Error;

use crate::model::ModelError;
use crate::section::SectionError;
use crate::surface::SurfaceError;
use crate::well::WellError;

/// Errors surfaced by viewer interactions
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Section(#[from] SectionError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Well(#[from] WellError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Unknown well: {0}")]
    UnknownWell(String),

    #[error("Unknown surface: {0}")]
    UnknownSurface(String),

    #[error("Surface {0} has no error surface")]
    NoErrorSurface(String),

    #[error("No wells configured")]
    NoWells,

    #[error("No fence yet: select a well or draw a polyline first")]
    NoFence,
}
