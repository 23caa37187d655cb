//! Plot-data formatter
//!
//! Turns a [`CrossSection`] into a plotly-compatible figure: named series
//! with x/y arrays, fill style, and color. Undefined depths are emitted as
//! `null` so the plotted lines break instead of dropping to zero.

mod ranges;

pub use ranges::{axis_ranges, depth_extent, AxisRanges};

use serde::Serialize;
use std::collections::BTreeSet;

use crate::section::CrossSection;
use crate::types::{CrossSectionLine, SectionPoint};

pub const X_AXIS_TITLE: &str = "Distance from polyline";
pub const PLOT_BGCOLOR: &str = "rgb(233,233,233)";
pub const ERROR_ADD_COLOR: &str = "black";
pub const ERROR_SUB_COLOR: &str = "gray";

/// Depth below the deepest surface at which the closing base trace is drawn.
const BASE_OFFSET: f64 = 50.0;

/// Zone colors, indexed by zone code.
const ZONE_COLORS: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

// ============================================================================
// Figure model
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

/// One plotted series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: Vec<f64>,
    pub y: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legendgroup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
}

impl Trace {
    fn lines(name: impl Into<String>) -> Self {
        Self {
            kind: "scatter",
            mode: "lines",
            name: Some(name.into()),
            x: Vec::new(),
            y: Vec::new(),
            fill: None,
            line: None,
            legendgroup: None,
            showlegend: None,
        }
    }

    fn from_line(line: &CrossSectionLine) -> Self {
        let mut trace = Self::lines(line.name.clone());
        trace.x = line.points.iter().map(|p| p.distance).collect();
        trace.y = line.points.iter().map(|p| p.depth).collect();
        trace
    }

    fn from_points(name: impl Into<String>, points: &[SectionPoint]) -> Self {
        let mut trace = Self::lines(name);
        trace.x = points.iter().map(|p| p.distance).collect();
        trace.y = points.iter().map(|p| Some(p.depth)).collect();
        trace
    }

    fn color(mut self, color: impl Into<String>) -> Self {
        self.line = Some(LineStyle {
            color: color.into(),
            width: self.line.and_then(|l| l.width),
        });
        self
    }

    fn width(mut self, width: f64) -> Self {
        if let Some(line) = self.line.as_mut() {
            line.width = Some(width);
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    pub autorange: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub plot_bgcolor: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

// ============================================================================
// Formatting
// ============================================================================

pub fn zone_color(code: i32) -> &'static str {
    // rem_euclid keeps negative codes in range
    ZONE_COLORS[code.rem_euclid(ZONE_COLORS.len() as i32) as usize]
}

/// Build the figure for a cross-section.
///
/// Trace order: one `tonexty`-filled trace per surface (top to bottom), a
/// closing base trace below the deepest surface, the well path, its zone
/// segments, then the upper and lower uncertainty envelopes.
pub fn make_figure(section: &CrossSection, zunit: &str) -> Figure {
    let ranges = axis_ranges(section);
    let mut data = Vec::new();

    for surface in &section.surfaces {
        let mut trace = Trace::from_line(&surface.line).color(surface.color.clone());
        trace.name = Some(surface.name.clone());
        trace.fill = Some("tonexty");
        data.push(trace);
    }

    if let (Some(first), Some(r)) = (section.surfaces.first(), ranges) {
        if let (Some(start), Some(end)) = (first.line.points.first(), first.line.points.last()) {
            let base_depth = r.max_depth + BASE_OFFSET;
            let mut base = Trace::lines("base").color("black");
            base.x = vec![start.distance, end.distance];
            base.y = vec![Some(base_depth), Some(base_depth)];
            base.fill = Some("tonexty");
            base.showlegend = Some(false);
            data.push(base);
        }
    }

    if let Some(well) = &section.well {
        data.push(Trace::from_points(well.name.clone(), &well.path).color("black"));

        let mut seen = BTreeSet::new();
        for zone in &well.zones {
            let label = well
                .zone_names
                .iter()
                .find(|(code, _)| *code == zone.code)
                .map_or_else(|| format!("zone {}", zone.code), |(_, n)| n.clone());
            let mut trace = Trace::from_points(label, &zone.points)
                .color(zone_color(zone.code))
                .width(4.0);
            trace.legendgroup = Some(zone.code.to_string());
            trace.showlegend = Some(seen.insert(zone.code));
            data.push(trace);
        }
    }

    let envelopes: Vec<_> = section
        .surfaces
        .iter()
        .filter_map(|s| s.envelope.as_ref())
        .collect();
    data.extend(
        envelopes
            .iter()
            .map(|e| Trace::from_line(&e.upper).color(ERROR_ADD_COLOR)),
    );
    data.extend(
        envelopes
            .iter()
            .map(|e| Trace::from_line(&e.lower).color(ERROR_SUB_COLOR)),
    );

    Figure {
        data,
        layout: Layout {
            xaxis: Axis {
                title: X_AXIS_TITLE.to_string(),
                range: ranges.map(|r| r.x),
                autorange: ranges.is_none(),
            },
            yaxis: Axis {
                title: zunit.to_string(),
                range: ranges.map(|r| r.y),
                autorange: ranges.is_none(),
            },
            plot_bgcolor: PLOT_BGCOLOR,
        },
    }
}
