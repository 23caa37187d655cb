//! Model directory access
//!
//! A model directory holds `model_file.xml` (surface and zonelog names), the
//! depth surfaces with their uncertainty products, the input wells, and the
//! log files written by the depth conversion run.

pub mod layout;
pub mod model_file;

pub use layout::{ModelLayout, SurfaceVariant};
pub use model_file::{ModelFile, ModelSurface};

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Errors reading a model directory
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed model file: {0}")]
    Xml(String),

    #[error("Model file has no <{0}> element")]
    ElementNotFound(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
}

/// What a model directory offers, for `GET /api/v1/model` and `model` on the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub basedir: PathBuf,
    pub surfaces: Vec<String>,
    pub top_of_zone: Vec<String>,
    pub zone_log_name: Option<String>,
    /// Variants for which every surface has a file
    pub variants: Vec<SurfaceVariant>,
    pub wells: Vec<String>,
    pub log_files: Vec<PathBuf>,
}

impl ModelSummary {
    /// Inspect a model directory.
    ///
    /// The model file and the well directory must be readable. Missing
    /// optional parts (top-of-zone names, zonelog name, surface variants,
    /// log files) are left out of the summary.
    pub fn collect(layout: &ModelLayout) -> Result<Self, ModelError> {
        let model = ModelFile::load(&layout.model_file())?;
        let surfaces = model.surface_names()?;

        let variants = SurfaceVariant::ALL
            .into_iter()
            .filter(|v| layout.variant_files(&surfaces, *v).is_some())
            .collect();

        let wells = layout
            .well_files()?
            .iter()
            .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();

        let log_files = [
            layout.target_points(),
            layout.well_points(),
            layout.zonation_status(),
        ]
        .into_iter()
        .filter(|p| p.is_file())
        .collect();

        let summary = Self {
            basedir: layout.basedir().to_path_buf(),
            top_of_zone: model.top_of_zone_names().unwrap_or_default(),
            zone_log_name: model.zone_log_name().ok().map(str::to_string),
            surfaces,
            variants,
            wells,
            log_files,
        };

        info!(
            basedir = %summary.basedir.display(),
            surfaces = summary.surfaces.len(),
            wells = summary.wells.len(),
            "Model directory inspected"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_of_partial_model() {
        let dir = tempfile::tempdir().expect("tempdir");
        let layout = ModelLayout::new(dir.path());
        std::fs::write(
            layout.model_file(),
            "<m><surface><name>Top</name></surface></m>",
        )
        .unwrap();
        std::fs::create_dir_all(layout.surface_dir()).unwrap();
        std::fs::create_dir_all(layout.well_dir()).unwrap();
        for v in [SurfaceVariant::Depth, SurfaceVariant::DepthError] {
            std::fs::write(layout.surface_path(v, "Top"), b"").unwrap();
        }
        std::fs::write(layout.well_dir().join("OP_1.txt"), b"").unwrap();

        let s = ModelSummary::collect(&layout).unwrap();
        assert_eq!(s.surfaces, vec!["Top"]);
        assert!(s.top_of_zone.is_empty());
        assert_eq!(s.zone_log_name, None);
        assert_eq!(
            s.variants,
            vec![SurfaceVariant::Depth, SurfaceVariant::DepthError]
        );
        assert_eq!(s.wells, vec!["OP_1"]);
        assert!(s.log_files.is_empty());
    }

    #[test]
    fn test_missing_model_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = ModelSummary::collect(&ModelLayout::new(dir.path())).unwrap_err();
        assert!(matches!(err, ModelError::Io { .. }));
    }
}
