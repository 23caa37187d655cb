//! Viewer session
//!
//! A [`Session`] owns the state of one viewer: what is selected, the current
//! fence, and the cross-section computed on it. Every event is handled
//! completely (files loaded, fence rebuilt if needed, section recomputed)
//! before any state changes, so a failed interaction leaves the previous
//! cross-section in place.

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::config::ViewerConfig;
use crate::section::{
    assemble, build_fence_from_polyline, build_fence_from_well, CrossSection, SurfaceLayer,
};
use crate::surface::RegularSurface;
use crate::types::{Fence, WellTrajectory};

use super::events::{transition, Effect, FenceSource, Selection, ViewerEvent};
use super::{DataSource, ViewerError, ViewerSetup};

/// Numeric parameters of fence construction and zonation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionSettings {
    pub extension: f64,
    pub sampling_interval: f64,
    pub min_zone_code: i32,
}

impl SessionSettings {
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            extension: config.fence.extension,
            sampling_interval: config.fence.sampling_interval,
            min_zone_code: config.zonation.min_zone_code,
        }
    }
}

/// Interaction counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub events: u64,
    pub fence_builds: u64,
    pub recomputations: u64,
    pub failures: u64,
}

pub struct Session {
    setup: ViewerSetup,
    settings: SessionSettings,
    source: Arc<dyn DataSource>,
    selection: Selection,
    fence: Option<Fence>,
    section: Option<CrossSection>,
    stats: SessionStats,
}

impl Session {
    pub fn new(setup: ViewerSetup, settings: SessionSettings, source: Arc<dyn DataSource>) -> Self {
        let selection = Selection::all_visible(&setup);
        Self {
            setup,
            settings,
            source,
            selection,
            fence: None,
            section: None,
            stats: SessionStats::default(),
        }
    }

    /// Select the first well, with every surface and error surface shown.
    pub fn initialize(&mut self) -> Result<&CrossSection, ViewerError> {
        let well = self
            .setup
            .wells()
            .first()
            .map(|w| w.name.clone())
            .ok_or(ViewerError::NoWells)?;
        self.handle(ViewerEvent::WellSelected { well })
    }

    /// Apply one event. On error the session state is unchanged.
    pub fn handle(&mut self, event: ViewerEvent) -> Result<&CrossSection, ViewerError> {
        self.stats.events += 1;
        match self.apply(event) {
            Ok((selection, fence, section)) => {
                if let Some(fence) = fence {
                    self.fence = Some(fence);
                    self.stats.fence_builds += 1;
                }
                self.selection = selection;
                self.stats.recomputations += 1;
                Ok(&*self.section.insert(section))
            }
            Err(e) => {
                self.stats.failures += 1;
                Err(e)
            }
        }
    }

    fn apply(
        &self,
        event: ViewerEvent,
    ) -> Result<(Selection, Option<Fence>, CrossSection), ViewerError> {
        let next = transition(&self.setup, &self.selection, event)?;

        let well = next
            .selection
            .well
            .as_deref()
            .map(|name| self.load_well(name))
            .transpose()?;

        let new_fence = match next.effect {
            Effect::RebuildFence(FenceSource::Well(_)) => {
                let well = well.as_ref().ok_or(ViewerError::NoFence)?;
                let fence = build_fence_from_well(
                    well,
                    self.settings.extension,
                    self.settings.sampling_interval,
                )?;
                debug!(well = %well.name, samples = fence.len(), "Fence rebuilt along well");
                Some(fence)
            }
            Effect::RebuildFence(FenceSource::Polyline(points)) => {
                let fence = build_fence_from_polyline(&points)?;
                debug!(samples = fence.len(), "Fence rebuilt from polyline");
                Some(fence)
            }
            Effect::Recompute => None,
        };

        let fence = new_fence
            .as_ref()
            .or(self.fence.as_ref())
            .ok_or(ViewerError::NoFence)?;
        let section = self.compute(fence, &next.selection, well.as_ref())?;
        Ok((next.selection, new_fence, section))
    }

    fn compute(
        &self,
        fence: &Fence,
        selection: &Selection,
        well: Option<&WellTrajectory>,
    ) -> Result<CrossSection, ViewerError> {
        let mut loaded: Vec<(&str, &str, RegularSurface, Option<RegularSurface>)> = Vec::new();
        for spec in self.setup.surfaces() {
            if !selection.surfaces.contains(&spec.name) {
                continue;
            }
            let base = self.source.load_surface(&spec.base_path)?;
            let error = match &spec.error_path {
                Some(path) if selection.errors.contains(&spec.name) => {
                    Some(self.source.load_surface(path)?)
                }
                _ => None,
            };
            loaded.push((spec.name.as_str(), spec.color.as_str(), base, error));
        }

        let layers: Vec<SurfaceLayer<'_>> = loaded
            .iter()
            .map(|(name, color, base, error)| SurfaceLayer {
                name: *name,
                color: *color,
                surface: base,
                error: error.as_ref(),
            })
            .collect();

        let section = assemble(
            fence,
            &layers,
            well,
            self.setup.zonelog_name(),
            self.settings.min_zone_code,
        )?;
        debug!(
            surfaces = section.surfaces.len(),
            envelopes = section.surfaces.iter().filter(|s| s.envelope.is_some()).count(),
            "Cross-section recomputed"
        );
        Ok(section)
    }

    fn load_well(&self, name: &str) -> Result<WellTrajectory, ViewerError> {
        let spec = self
            .setup
            .well(name)
            .ok_or_else(|| ViewerError::UnknownWell(name.to_string()))?;
        let mut well = self.source.load_well(&spec.path)?;
        well.name.clone_from(&spec.name);
        Ok(well)
    }

    pub fn setup(&self) -> &ViewerSetup {
        &self.setup
    }

    pub const fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    pub const fn fence(&self) -> Option<&Fence> {
        self.fence.as_ref()
    }

    pub const fn cross_section(&self) -> Option<&CrossSection> {
        self.section.as_ref()
    }

    pub const fn stats(&self) -> SessionStats {
        self.stats
    }
}
