//! Viewer Session Tests
//!
//! Drive a session built from a model directory on disk through the same
//! event sequence a user produces: initial well, well change, polyline,
//! surface and error toggles. Files are read with `FileSource`.

mod common;

use std::sync::Arc;

use horizon_uncertainty::config::ViewerConfig;
use horizon_uncertainty::model::ModelSummary;
use horizon_uncertainty::plot::make_figure;
use horizon_uncertainty::surface::SurfaceError;
use horizon_uncertainty::types::Point2;
use horizon_uncertainty::viewer::{
    FileSource, Session, SessionSettings, ViewerError, ViewerEvent, ViewerSetup,
};

use common::{model_dir, write, ERROR_DEPTH, TOP_A_DEPTH, TOP_B_DEPTH};

fn session_for(layout: &horizon_uncertainty::model::ModelLayout) -> Session {
    let config = ViewerConfig::default();
    let setup = ViewerSetup::from_model(layout, &config.display.colors, None).unwrap();
    Session::new(
        setup,
        SessionSettings::from_config(&config),
        Arc::new(FileSource),
    )
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

// ============================================================================
// Setup from model directory
// ============================================================================

#[test]
fn setup_reads_surfaces_errors_and_wells() {
    let (_dir, layout) = model_dir();
    let config = ViewerConfig::default();
    let setup = ViewerSetup::from_model(&layout, &config.display.colors, None).unwrap();

    let names: Vec<&str> = setup.surfaces().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["TopA", "TopB"]);
    assert!(setup.surfaces().iter().all(|s| s.error_path.is_some()));

    let wells: Vec<&str> = setup.wells().iter().map(|w| w.name.as_str()).collect();
    assert_eq!(wells, vec!["OP_1", "OP_2"]);

    assert_eq!(setup.zonelog_name(), Some("Zonelog"));
    assert_eq!(setup.surfaces()[0].color, config.display.colors[0]);
    assert_eq!(setup.surfaces()[1].color, config.display.colors[1]);
}

#[test]
fn setup_without_error_surfaces_has_no_envelopes() {
    let (dir, layout) = model_dir();
    std::fs::remove_file(dir.path().join("output/surfaces/de_TopB.rxb")).unwrap();

    let mut session = session_for(&layout);
    assert!(session.setup().surfaces().iter().all(|s| s.error_path.is_none()));

    let section = session.initialize().unwrap();
    assert!(section.surfaces.iter().all(|s| s.envelope.is_none()));
}

#[test]
fn model_summary_lists_variants_and_wells() {
    let (dir, layout) = model_dir();
    write(&dir.path().join("output/log_files/wellpoints.csv"), "x,y\n");

    let summary = ModelSummary::collect(&layout).unwrap();
    assert_eq!(summary.surfaces, vec!["TopA", "TopB"]);
    assert_eq!(summary.top_of_zone, vec!["Valysar", "Therys"]);
    assert_eq!(summary.zone_log_name.as_deref(), Some("Zonelog"));
    assert_eq!(summary.wells, vec!["OP_1", "OP_2"]);
    assert_eq!(summary.variants.len(), 2, "depth and depth error only");
    assert_eq!(summary.log_files, vec![layout.well_points()]);
}

// ============================================================================
// Event handling
// ============================================================================

#[test]
fn initial_section_follows_first_well() {
    let (_dir, layout) = model_dir();
    let mut session = session_for(&layout);

    let section = session.initialize().unwrap();
    assert_eq!(section.surfaces.len(), 2);

    let top_a = &section.surfaces[0];
    assert_eq!(top_a.line.len(), section.fence.len());
    for (_, depth) in top_a.line.defined() {
        assert_close(depth, TOP_A_DEPTH);
    }

    let envelope = top_a.envelope.as_ref().unwrap();
    for (_, depth) in envelope.upper.defined() {
        assert_close(depth, TOP_A_DEPTH + ERROR_DEPTH);
    }
    for (_, depth) in envelope.lower.defined() {
        assert_close(depth, TOP_A_DEPTH - ERROR_DEPTH);
    }

    let well = section.well.as_ref().unwrap();
    assert_eq!(well.name, "OP_1");
    assert_eq!(well.path.len(), 5);

    // Undefined first sample is raised to the minimum zone code
    let codes: Vec<i32> = well.zones.iter().map(|z| z.code).collect();
    assert_eq!(codes, vec![0, 1, 2]);
    assert_eq!(
        well.zone_names,
        vec![(1, "Valysar".to_string()), (2, "Therys".to_string())]
    );

    assert_eq!(session.selection().well.as_deref(), Some("OP_1"));
    assert_eq!(session.stats().fence_builds, 1);
}

#[test]
fn fence_along_well_is_extended_both_ends() {
    let (_dir, layout) = model_dir();
    let mut session = session_for(&layout);
    session.initialize().unwrap();

    // 200 m of horizontal well plus 500 m at each end
    let fence = session.fence().unwrap();
    assert!(
        (fence.total_length() - 1200.0).abs() < 5.0,
        "fence length {}",
        fence.total_length()
    );
    let distances: Vec<f64> = fence.distances().collect();
    assert!(distances.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn polyline_keeps_selected_well_on_new_fence() {
    let (_dir, layout) = model_dir();
    let mut session = session_for(&layout);
    session.initialize().unwrap();

    let section = session
        .handle(ViewerEvent::PolylineDrawn {
            points: vec![Point2::new(1000.0, 200.0), Point2::new(1000.0, 1800.0)],
        })
        .unwrap();

    assert!((section.fence.total_length() - 1600.0).abs() < 1e-6);
    assert_eq!(section.well.as_ref().unwrap().name, "OP_1");
    for (_, depth) in section.surfaces[1].line.defined() {
        assert_close(depth, TOP_B_DEPTH);
    }
    assert!(session.selection().polyline.is_some());
    assert_eq!(session.stats().fence_builds, 2);
}

#[test]
fn selecting_another_well_rebuilds_fence() {
    let (_dir, layout) = model_dir();
    let mut session = session_for(&layout);
    session.initialize().unwrap();
    let first_len = session.fence().unwrap().total_length();

    let section = session
        .handle(ViewerEvent::WellSelected {
            well: "OP_2".to_string(),
        })
        .unwrap();
    assert_eq!(section.well.as_ref().unwrap().name, "OP_2");
    assert!((section.fence.total_length() - first_len).abs() > 1.0);
    assert_eq!(session.selection().well.as_deref(), Some("OP_2"));
}

#[test]
fn toggles_recompute_without_new_fence() {
    let (_dir, layout) = model_dir();
    let mut session = session_for(&layout);
    session.initialize().unwrap();

    let section = session
        .handle(ViewerEvent::SurfaceToggled {
            surface: "TopA".to_string(),
            visible: false,
        })
        .unwrap();
    let names: Vec<&str> = section.surfaces.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["TopB"]);

    let section = session
        .handle(ViewerEvent::ErrorToggled {
            surface: "TopB".to_string(),
            visible: false,
        })
        .unwrap();
    assert!(section.surfaces[0].envelope.is_none());

    let section = session
        .handle(ViewerEvent::AllSurfacesToggled { visible: false })
        .unwrap();
    assert!(section.surfaces.is_empty());
    assert!(section.well.is_some());

    let stats = session.stats();
    assert_eq!(stats.fence_builds, 1);
    assert_eq!(stats.recomputations, 4);
}

#[test]
fn unknown_well_leaves_state_unchanged() {
    let (_dir, layout) = model_dir();
    let mut session = session_for(&layout);
    let before = session.initialize().unwrap().clone();

    let err = session
        .handle(ViewerEvent::WellSelected {
            well: "NO_SUCH".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ViewerError::UnknownWell(ref w) if w == "NO_SUCH"));

    assert_eq!(session.cross_section(), Some(&before));
    assert_eq!(session.selection().well.as_deref(), Some("OP_1"));
    assert_eq!(session.stats().failures, 1);
}

#[test]
fn unreadable_error_surface_is_reported() {
    let (dir, layout) = model_dir();
    let mut session = session_for(&layout);
    session.initialize().unwrap();

    session
        .handle(ViewerEvent::ErrorToggled {
            surface: "TopA".to_string(),
            visible: false,
        })
        .unwrap();

    // Binary grid content is not readable as Irap ASCII
    write(
        &dir.path().join("output/surfaces/de_TopA.rxb"),
        [0xff_u8, 0xfe, 0x00, 0x01],
    );
    let err = session
        .handle(ViewerEvent::ErrorToggled {
            surface: "TopA".to_string(),
            visible: true,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        ViewerError::Surface(SurfaceError::UnsupportedFormat { .. })
    ));
    assert!(!session.selection().errors.contains("TopA"));
}

// ============================================================================
// Figure
// ============================================================================

#[test]
fn figure_trace_order() {
    let (_dir, layout) = model_dir();
    let mut session = session_for(&layout);
    let section = session.initialize().unwrap();
    let figure = make_figure(section, "depth (m)");

    let names: Vec<Option<&str>> = figure.data.iter().map(|t| t.name.as_deref()).collect();
    assert_eq!(
        names,
        vec![
            Some("TopA"),
            Some("TopB"),
            Some("base"),
            Some("OP_1"),
            Some("zone 0"),
            Some("Valysar"),
            Some("Therys"),
            Some("TopA_error_add"),
            Some("TopB_error_add"),
            Some("TopA_error_sub"),
            Some("TopB_error_sub"),
        ]
    );
    assert_eq!(figure.layout.yaxis.title, "depth (m)");

    let y = figure.layout.yaxis.range.unwrap();
    assert!(y[0] > y[1], "depth axis is reversed");
    assert_close(y[0], TOP_B_DEPTH);
}
