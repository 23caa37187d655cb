//! User interactions and their effect on the viewer state
//!
//! [`transition`] is a pure function: it validates an event against the
//! setup, returns the next [`Selection`], and says what has to be recomputed.
//! The session performs the work and commits the new selection only if the
//! work succeeds.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::types::Point2;

use super::{ViewerError, ViewerSetup};

/// One user interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewerEvent {
    WellSelected { well: String },
    PolylineDrawn { points: Vec<Point2> },
    SurfaceToggled { surface: String, visible: bool },
    ErrorToggled { surface: String, visible: bool },
    AllSurfacesToggled { visible: bool },
}

/// What is currently selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Selection {
    pub well: Option<String>,
    /// Drawn polyline; `None` means the fence follows the selected well
    pub polyline: Option<Vec<Point2>>,
    pub surfaces: BTreeSet<String>,
    pub errors: BTreeSet<String>,
}

impl Selection {
    /// Every surface and every available error surface visible, no well.
    pub fn all_visible(setup: &ViewerSetup) -> Self {
        Self {
            well: None,
            polyline: None,
            surfaces: setup.surfaces().iter().map(|s| s.name.clone()).collect(),
            errors: setup
                .surfaces()
                .iter()
                .filter(|s| s.error_path.is_some())
                .map(|s| s.name.clone())
                .collect(),
        }
    }
}

/// Where a new fence comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum FenceSource {
    Well(String),
    Polyline(Vec<Point2>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Build a new fence, then recompute the cross-section on it.
    RebuildFence(FenceSource),
    /// Recompute the cross-section on the current fence.
    Recompute,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub selection: Selection,
    pub effect: Effect,
}

pub fn transition(
    setup: &ViewerSetup,
    current: &Selection,
    event: ViewerEvent,
) -> Result<Transition, ViewerError> {
    let mut next = current.clone();

    let effect = match event {
        ViewerEvent::WellSelected { well } => {
            if setup.well(&well).is_none() {
                return Err(ViewerError::UnknownWell(well));
            }
            next.well = Some(well.clone());
            next.polyline = None;
            Effect::RebuildFence(FenceSource::Well(well))
        }
        ViewerEvent::PolylineDrawn { points } => {
            next.polyline = Some(points.clone());
            Effect::RebuildFence(FenceSource::Polyline(points))
        }
        ViewerEvent::SurfaceToggled { surface, visible } => {
            if setup.surface(&surface).is_none() {
                return Err(ViewerError::UnknownSurface(surface));
            }
            set_membership(&mut next.surfaces, surface, visible);
            Effect::Recompute
        }
        ViewerEvent::ErrorToggled { surface, visible } => {
            match setup.surface(&surface) {
                None => return Err(ViewerError::UnknownSurface(surface)),
                Some(s) if s.error_path.is_none() => {
                    return Err(ViewerError::NoErrorSurface(surface))
                }
                Some(_) => {}
            }
            set_membership(&mut next.errors, surface, visible);
            Effect::Recompute
        }
        ViewerEvent::AllSurfacesToggled { visible } => {
            next.surfaces = if visible {
                setup.surfaces().iter().map(|s| s.name.clone()).collect()
            } else {
                BTreeSet::new()
            };
            Effect::Recompute
        }
    };

    Ok(Transition {
        selection: next,
        effect,
    })
}

fn set_membership(set: &mut BTreeSet<String>, name: String, present: bool) {
    if present {
        set.insert(name);
    } else {
        set.remove(&name);
    }
}
