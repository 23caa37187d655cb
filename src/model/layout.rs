//! Model directory layout
//!
//! ```text
//! <basedir>/
//!   model_file.xml
//!   input/welldata/*.txt
//!   output/surfaces/{d,de,dr,dre,dt,dte}_<surface>.rxb
//!   output/log_files/{targetpoints,wellpoints,zonation_status}.csv
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::ModelError;

pub const MODEL_FILE: &str = "model_file.xml";
pub const SURFACE_SUFFIX: &str = "rxb";
pub const WELL_SUFFIX: &str = "txt";

/// The six surface products written per model surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceVariant {
    /// `d_`: depth surface (always required)
    Depth,
    /// `de_`: depth uncertainty
    DepthError,
    /// `dr_`: depth residual
    DepthResidual,
    /// `dre_`: depth residual uncertainty
    DepthResidualError,
    /// `dt_`: depth trend
    DepthTrend,
    /// `dte_`: depth trend uncertainty
    DepthTrendError,
}

impl SurfaceVariant {
    pub const ALL: [Self; 6] = [
        Self::Depth,
        Self::DepthError,
        Self::DepthResidual,
        Self::DepthResidualError,
        Self::DepthTrend,
        Self::DepthTrendError,
    ];

    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Depth => "d_",
            Self::DepthError => "de_",
            Self::DepthResidual => "dr_",
            Self::DepthResidualError => "dre_",
            Self::DepthTrend => "dt_",
            Self::DepthTrendError => "dte_",
        }
    }
}

/// Resolves every path the viewer reads from a model directory.
#[derive(Debug, Clone)]
pub struct ModelLayout {
    basedir: PathBuf,
}

impl ModelLayout {
    pub fn new(basedir: impl Into<PathBuf>) -> Self {
        Self {
            basedir: basedir.into(),
        }
    }

    pub fn basedir(&self) -> &Path {
        &self.basedir
    }

    pub fn model_file(&self) -> PathBuf {
        self.basedir.join(MODEL_FILE)
    }

    pub fn surface_dir(&self) -> PathBuf {
        self.basedir.join("output").join("surfaces")
    }

    pub fn well_dir(&self) -> PathBuf {
        self.basedir.join("input").join("welldata")
    }

    fn log_dir(&self) -> PathBuf {
        self.basedir.join("output").join("log_files")
    }

    /// Path of one surface product.
    pub fn surface_path(&self, variant: SurfaceVariant, surface_name: &str) -> PathBuf {
        self.surface_dir().join(format!(
            "{}{surface_name}.{SURFACE_SUFFIX}",
            variant.prefix()
        ))
    }

    /// Depth surface files for every name. All must exist.
    pub fn surface_files(&self, names: &[String]) -> Result<Vec<PathBuf>, ModelError> {
        names
            .iter()
            .map(|name| {
                let path = self.surface_path(SurfaceVariant::Depth, name);
                if path.is_file() {
                    Ok(path)
                } else {
                    Err(ModelError::FileNotFound(path))
                }
            })
            .collect()
    }

    /// Files of one variant for every name, or `None` unless all of them exist.
    ///
    /// A partial set is never returned: the section needs one file per surface.
    pub fn variant_files(&self, names: &[String], variant: SurfaceVariant) -> Option<Vec<PathBuf>> {
        let paths: Vec<PathBuf> = names
            .iter()
            .map(|name| self.surface_path(variant, name))
            .collect();
        if let Some(missing) = paths.iter().find(|p| !p.is_file()) {
            info!(
                variant = variant.prefix(),
                missing = %missing.display(),
                "Surface variant set unavailable"
            );
            return None;
        }
        Some(paths)
    }

    /// Every `.txt` file in the well directory, sorted by file name.
    pub fn well_files(&self) -> Result<Vec<PathBuf>, ModelError> {
        let dir = self.well_dir();
        let entries = std::fs::read_dir(&dir).map_err(|source| ModelError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == WELL_SUFFIX))
            .collect();
        files.sort();
        debug!(dir = %dir.display(), wells = files.len(), "Listed well files");
        Ok(files)
    }

    pub fn target_points(&self) -> PathBuf {
        self.log_dir().join("targetpoints.csv")
    }

    pub fn well_points(&self) -> PathBuf {
        self.log_dir().join("wellpoints.csv")
    }

    pub fn zonation_status(&self) -> PathBuf {
        self.log_dir().join("zonation_status.csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"").unwrap();
    }

    fn names() -> Vec<String> {
        vec!["TopVolantis".to_string(), "TopTherys".to_string()]
    }

    #[test]
    fn test_surface_path_naming() {
        let layout = ModelLayout::new("/models/drogon");
        assert_eq!(
            layout.surface_path(SurfaceVariant::DepthTrendError, "TopVolantis"),
            PathBuf::from("/models/drogon/output/surfaces/dte_TopVolantis.rxb")
        );
        assert_eq!(
            layout.zonation_status(),
            PathBuf::from("/models/drogon/output/log_files/zonation_status.csv")
        );
    }

    #[test]
    fn test_missing_depth_surface_is_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let layout = ModelLayout::new(dir.path());
        touch(&layout.surface_path(SurfaceVariant::Depth, "TopVolantis"));

        match layout.surface_files(&names()) {
            Err(ModelError::FileNotFound(p)) => assert!(p.ends_with("d_TopTherys.rxb")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_variant_set_is_all_or_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let layout = ModelLayout::new(dir.path());
        touch(&layout.surface_path(SurfaceVariant::DepthError, "TopVolantis"));
        assert!(layout
            .variant_files(&names(), SurfaceVariant::DepthError)
            .is_none());

        touch(&layout.surface_path(SurfaceVariant::DepthError, "TopTherys"));
        let files = layout
            .variant_files(&names(), SurfaceVariant::DepthError)
            .unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("de_TopVolantis.rxb"));
    }

    #[test]
    fn test_well_files_sorted_and_filtered() {
        let dir = tempfile::tempdir().expect("tempdir");
        let layout = ModelLayout::new(dir.path());
        let wells = layout.well_dir();
        touch(&wells.join("OP_5.txt"));
        touch(&wells.join("OP_1.txt"));
        touch(&wells.join("notes.md"));

        let files = layout.well_files().unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["OP_1.txt", "OP_5.txt"]);
    }

    #[test]
    fn test_missing_well_dir_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let layout = ModelLayout::new(dir.path());
        assert!(matches!(layout.well_files(), Err(ModelError::Io { .. })));
    }
}
