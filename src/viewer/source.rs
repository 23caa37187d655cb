//! Data loading seam
//!
//! The session never reads files itself. It asks a [`DataSource`] for each
//! surface and well on every interaction, so nothing is cached between
//! interactions and alternative decoders (binary grids, databases) can be
//! plugged in without touching the cross-section code.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::surface::{read_irap_ascii, RegularSurface, SurfaceError};
use crate::types::WellTrajectory;
use crate::well::{read_rms_well, WellError};

pub trait DataSource: Send + Sync {
    fn load_surface(&self, path: &Path) -> Result<RegularSurface, SurfaceError>;
    fn load_well(&self, path: &Path) -> Result<WellTrajectory, WellError>;
}

/// Reads Irap classic ASCII surfaces and RMS ASCII wells from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl DataSource for FileSource {
    fn load_surface(&self, path: &Path) -> Result<RegularSurface, SurfaceError> {
        read_irap_ascii(path)
    }

    fn load_well(&self, path: &Path) -> Result<WellTrajectory, WellError> {
        read_rms_well(path)
    }
}

/// Pre-loaded surfaces and wells keyed by path, for synthetic models.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    surfaces: HashMap<PathBuf, RegularSurface>,
    wells: HashMap<PathBuf, WellTrajectory>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_surface(mut self, path: impl Into<PathBuf>, surface: RegularSurface) -> Self {
        self.surfaces.insert(path.into(), surface);
        self
    }

    #[must_use]
    pub fn with_well(mut self, path: impl Into<PathBuf>, well: WellTrajectory) -> Self {
        self.wells.insert(path.into(), well);
        self
    }
}

impl DataSource for MemorySource {
    fn load_surface(&self, path: &Path) -> Result<RegularSurface, SurfaceError> {
        self.surfaces
            .get(path)
            .cloned()
            .ok_or_else(|| SurfaceError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
    }

    fn load_well(&self, path: &Path) -> Result<WellTrajectory, WellError> {
        self.wells.get(path).cloned().ok_or_else(|| WellError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })
    }
}
