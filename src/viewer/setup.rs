//! Viewer construction
//!
//! Turns file lists (given directly or discovered from a model directory)
//! into the fixed per-surface and per-well records a session works with.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::model::{ModelError, ModelFile, ModelLayout, SurfaceVariant};

/// Axis label used when none is configured.
pub const DEFAULT_ZUNIT: &str = "depth (m)";

/// Errors raised while constructing a viewer
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("{what} has {actual} entries, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Color palette is empty")]
    EmptyPalette,

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// One surface: display name, color, and where its data lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurfaceSpec {
    pub name: String,
    pub color: String,
    pub base_path: PathBuf,
    pub error_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WellSpec {
    pub name: String,
    pub path: PathBuf,
}

/// Inputs to [`ViewerSetup::new`].
#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    pub surface_files: Vec<PathBuf>,
    /// Error surfaces, parallel to `surface_files` when given
    pub error_files: Option<Vec<PathBuf>>,
    pub well_files: Vec<PathBuf>,
    pub surface_names: Option<Vec<String>>,
    pub well_names: Option<Vec<String>>,
    pub zunit: Option<String>,
}

/// Immutable description of what a viewer shows.
#[derive(Debug, Clone, Serialize)]
pub struct ViewerSetup {
    surfaces: Vec<SurfaceSpec>,
    wells: Vec<WellSpec>,
    zunit: String,
    zonelog_name: Option<String>,
}

impl ViewerSetup {
    /// Build a setup from explicit file lists.
    ///
    /// Names default to file stems. Colors are assigned from `palette` in
    /// surface order, wrapping around when there are more surfaces than colors.
    pub fn new(options: SetupOptions, palette: &[String]) -> Result<Self, SetupError> {
        if palette.is_empty() {
            return Err(SetupError::EmptyPalette);
        }

        let n_surfaces = options.surface_files.len();
        check_len("surfacefiles_de", n_surfaces, options.error_files.as_ref())?;
        check_len("surfacenames", n_surfaces, options.surface_names.as_ref())?;
        check_len(
            "wellnames",
            options.well_files.len(),
            options.well_names.as_ref(),
        )?;

        let surface_names = options
            .surface_names
            .unwrap_or_else(|| options.surface_files.iter().map(|p| stem(p)).collect());
        let mut error_files = options.error_files.map(Vec::into_iter);

        let surfaces = options
            .surface_files
            .into_iter()
            .zip(surface_names)
            .enumerate()
            .map(|(i, (base_path, name))| SurfaceSpec {
                name,
                color: palette[i % palette.len()].clone(),
                base_path,
                error_path: error_files.as_mut().and_then(Iterator::next),
            })
            .collect();

        let well_names = options
            .well_names
            .unwrap_or_else(|| options.well_files.iter().map(|p| stem(p)).collect());
        let wells = options
            .well_files
            .into_iter()
            .zip(well_names)
            .map(|(path, name)| WellSpec { name, path })
            .collect();

        Ok(Self {
            surfaces,
            wells,
            zunit: options.zunit.unwrap_or_else(|| DEFAULT_ZUNIT.to_string()),
            zonelog_name: None,
        })
    }

    /// Build a setup from a model directory.
    ///
    /// Surface names and the zonelog name come from `model_file.xml`. Depth
    /// surfaces are mandatory; error surfaces are used only if every surface
    /// has one.
    pub fn from_model(
        layout: &ModelLayout,
        palette: &[String],
        zunit: Option<String>,
    ) -> Result<Self, SetupError> {
        let model = ModelFile::load(&layout.model_file())?;
        let names = model.surface_names()?;
        let surface_files = layout.surface_files(&names)?;
        let error_files = layout.variant_files(&names, SurfaceVariant::DepthError);
        let well_files = layout.well_files()?;

        if well_files.is_empty() {
            warn!(dir = %layout.well_dir().display(), "Model has no well files");
        }

        let zonelog_name = match model.zone_log_name() {
            Ok(name) => Some(name.to_string()),
            Err(e) => {
                warn!(error = %e, "Zonation disabled");
                None
            }
        };

        let setup = Self::new(
            SetupOptions {
                surface_files,
                error_files,
                well_files,
                surface_names: Some(names),
                well_names: None,
                zunit,
            },
            palette,
        )?
        .with_zonelog(zonelog_name);

        info!(
            basedir = %layout.basedir().display(),
            surfaces = setup.surfaces.len(),
            wells = setup.wells.len(),
            zonelog = setup.zonelog_name.as_deref().unwrap_or("-"),
            "Viewer setup loaded from model"
        );
        Ok(setup)
    }

    #[must_use]
    pub fn with_zonelog(mut self, zonelog_name: Option<String>) -> Self {
        self.zonelog_name = zonelog_name;
        self
    }

    pub fn surfaces(&self) -> &[SurfaceSpec] {
        &self.surfaces
    }

    pub fn wells(&self) -> &[WellSpec] {
        &self.wells
    }

    pub fn zunit(&self) -> &str {
        &self.zunit
    }

    pub fn zonelog_name(&self) -> Option<&str> {
        self.zonelog_name.as_deref()
    }

    pub fn surface(&self, name: &str) -> Option<&SurfaceSpec> {
        self.surfaces.iter().find(|s| s.name == name)
    }

    pub fn well(&self, name: &str) -> Option<&WellSpec> {
        self.wells.iter().find(|w| w.name == name)
    }
}

fn check_len<T>(
    what: &'static str,
    expected: usize,
    list: Option<&Vec<T>>,
) -> Result<(), SetupError> {
    match list {
        Some(l) if l.len() != expected => Err(SetupError::LengthMismatch {
            what,
            expected,
            actual: l.len(),
        }),
        _ => Ok(()),
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Vec<String> {
        vec!["#1f77b4".to_string(), "#ff7f0e".to_string()]
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_names_default_to_file_stems() {
        let setup = ViewerSetup::new(
            SetupOptions {
                surface_files: paths(&[
                    "s/d_TopVolantis.rxb",
                    "s/d_TopTherys.rxb",
                    "s/d_BaseVolantis.rxb",
                ]),
                well_files: paths(&["w/OP_1.txt"]),
                ..SetupOptions::default()
            },
            &palette(),
        )
        .unwrap();

        let names: Vec<_> = setup.surfaces().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["d_TopVolantis", "d_TopTherys", "d_BaseVolantis"]);
        assert_eq!(setup.wells()[0].name, "OP_1");
        assert_eq!(setup.zunit(), DEFAULT_ZUNIT);
        // palette wraps
        assert_eq!(setup.surfaces()[2].color, "#1f77b4");
        assert!(setup.surfaces().iter().all(|s| s.error_path.is_none()));
    }

    #[test]
    fn test_error_list_length_must_match() {
        let err = ViewerSetup::new(
            SetupOptions {
                surface_files: paths(&["a.rxb", "b.rxb", "c.rxb"]),
                error_files: Some(paths(&["de_a.rxb", "de_b.rxb"])),
                ..SetupOptions::default()
            },
            &palette(),
        )
        .unwrap_err();
        match err {
            SetupError::LengthMismatch {
                what,
                expected,
                actual,
            } => {
                assert_eq!(what, "surfacefiles_de");
                assert_eq!((expected, actual), (3, 2));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_name_lists_must_match() {
        let surface_names = ViewerSetup::new(
            SetupOptions {
                surface_files: paths(&["a.rxb"]),
                surface_names: Some(vec!["A".to_string(), "B".to_string()]),
                ..SetupOptions::default()
            },
            &palette(),
        );
        assert!(matches!(
            surface_names,
            Err(SetupError::LengthMismatch { what: "surfacenames", .. })
        ));

        let well_names = ViewerSetup::new(
            SetupOptions {
                well_files: paths(&["w1.txt", "w2.txt"]),
                well_names: Some(vec!["W1".to_string()]),
                ..SetupOptions::default()
            },
            &palette(),
        );
        assert!(matches!(
            well_names,
            Err(SetupError::LengthMismatch { what: "wellnames", .. })
        ));
    }

    #[test]
    fn test_error_paths_pair_with_surfaces() {
        let setup = ViewerSetup::new(
            SetupOptions {
                surface_files: paths(&["d_a.rxb", "d_b.rxb"]),
                error_files: Some(paths(&["de_a.rxb", "de_b.rxb"])),
                surface_names: Some(vec!["A".to_string(), "B".to_string()]),
                zunit: Some("TVD (ft)".to_string()),
                ..SetupOptions::default()
            },
            &palette(),
        )
        .unwrap();
        assert_eq!(
            setup.surface("B").unwrap().error_path,
            Some(PathBuf::from("de_b.rxb"))
        );
        assert_eq!(setup.zunit(), "TVD (ft)");
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert!(matches!(
            ViewerSetup::new(SetupOptions::default(), &[]),
            Err(SetupError::EmptyPalette)
        ));
    }
}
