//! End-to-end scenarios over the bundled fixture dataset.
//!
//! These drive the ViewController the way the UI does, without a window.

use std::path::Path;

use bi_network_dashboard::{
    ChartSlot, DashboardError, DataSource, DatasetStore, ProjectionError, ViewController,
};
use bi_network_graph::{GraphSettings, LayoutParams};
use bi_network_types::{RegionRecord, ViewMode};
use egui::Vec2;

const FIXTURE: &str = include_str!("fixtures/governorate_networks.json");

fn loaded_controller(export_dir: &Path) -> ViewController {
    let mut controller = ViewController::new(GraphSettings::default(), export_dir);
    controller.on_dataset_loaded(DatasetStore::from_json(FIXTURE));
    controller
}

#[test]
fn load_selects_first_region_alphabetically() {
    let controller = loaded_controller(Path::new("."));
    let state = controller.state();

    assert_eq!(state.selected_region.as_deref(), Some("Alexandria"));
    assert_eq!(state.view_mode, ViewMode::Post);
    assert_eq!(
        controller.dataset().unwrap().list_regions(),
        vec!["Alexandria", "Cairo", "Giza"]
    );
    assert_eq!(
        controller.dataset().unwrap().region_label("Cairo"),
        "Cairo (50 شركة)"
    );
}

#[test]
fn cairo_post_view() {
    let mut controller = loaded_controller(Path::new("."));
    controller.select_region("Cairo").unwrap();
    let state = controller.state();

    // Cards
    assert_eq!(state.metrics.len(), 9);
    let agility = &state.metrics[2];
    assert_eq!(agility.value, "7.5");
    assert_eq!(agility.delta.as_deref(), Some("+2.5"));
    for card in &state.metrics[5..7] {
        assert!(
            card.value.ends_with('%'),
            "{} should be a percentage",
            card.title
        );
    }

    // Charts: one live instance per slot
    assert_eq!(state.charts.live_count(), 4);
    for slot in ChartSlot::all() {
        assert!(state.charts.get(slot).is_some(), "{slot:?} missing");
    }

    // Graph: post network, dangling link omitted
    let scene = state.graph.scene().expect("scene built");
    assert_eq!(scene.nodes().len(), 5);
    assert_eq!(scene.links().len(), 4);
    assert_eq!(scene.dropped_links(), 1);
    assert!(state.graph.transform().is_identity());
}

#[test]
fn label_threshold_applies_to_companies() {
    let mut controller = loaded_controller(Path::new("."));
    controller.select_region("Cairo").unwrap();
    let scene = controller.state().graph.scene().unwrap();

    let index_of = |id: &str| scene.nodes().iter().position(|n| n.id == id).unwrap();
    assert!(scene.is_labeled(index_of("Cairo_hub")));
    assert!(
        scene.is_labeled(index_of("company_1")),
        "size 16 is labeled"
    );
    assert!(
        !scene.is_labeled(index_of("company_2")),
        "size 15 is not labeled"
    );
}

#[test]
fn switching_mode_rebuilds_with_pre_network() {
    let mut controller = loaded_controller(Path::new("."));
    controller.select_region("Cairo").unwrap();
    controller.set_view_mode(ViewMode::Pre);

    let state = controller.state();
    assert_eq!(state.view_mode, ViewMode::Pre);
    assert_eq!(state.graph.scene().unwrap().nodes().len(), 3);
    assert_eq!(state.charts.live_count(), 4);
}

#[test]
fn layout_params_follow_mode() {
    assert_eq!(LayoutParams::PRE.repulsion, -200.0);
    assert_eq!(LayoutParams::PRE.base_link_distance, 80.0);
    assert_eq!(LayoutParams::POST.repulsion, -300.0);
    assert_eq!(LayoutParams::POST.base_link_distance, 50.0);
}

#[test]
fn rapid_switching_never_leaks_charts() {
    let mut controller = loaded_controller(Path::new("."));
    for _ in 0..10 {
        controller.select_region("Cairo").unwrap();
        controller.set_view_mode(ViewMode::Pre);
        controller.select_region("Alexandria").unwrap();
        controller.set_view_mode(ViewMode::Post);
    }
    controller.select_region("Cairo").unwrap();
    controller.select_region("Cairo").unwrap();
    assert_eq!(controller.state().charts.live_count(), 4);
    assert_eq!(controller.state().charts.len(), 4);
}

#[test]
fn region_without_industries_renders() {
    let mut controller = loaded_controller(Path::new("."));
    controller.select_region("Alexandria").unwrap();
    let state = controller.state();

    assert!(state.projection_error.is_none());
    assert!(state.charts.get(ChartSlot::Industry).is_some());
    assert_eq!(state.metrics[0].value, "0");
    assert_eq!(state.graph.scene().unwrap().nodes().len(), 1);
}

#[test]
fn missing_metric_shows_placeholder_but_keeps_graph() {
    let mut controller = loaded_controller(Path::new("."));
    controller.select_region("Giza").unwrap();
    let state = controller.state();

    assert_eq!(
        state.projection_error,
        Some(ProjectionError::MissingField("avg_agility_improvement"))
    );
    assert!(state.metrics.is_empty());
    assert_eq!(state.charts.live_count(), 0);
    assert!(state.graph.has_scene());
}

#[test]
fn unknown_region_is_rejected_without_state_change() {
    let mut controller = loaded_controller(Path::new("."));
    controller.select_region("Cairo").unwrap();

    let err = controller.select_region("Luxor").unwrap_err();
    assert!(matches!(err, DashboardError::UnknownRegion(ref name) if name == "Luxor"));
    assert_eq!(controller.state().selected_region.as_deref(), Some("Cairo"));
}

#[test]
fn export_round_trips_selected_record() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = loaded_controller(dir.path());
    controller.select_region("Cairo").unwrap();

    let path = controller.export_current_region().unwrap();
    assert_eq!(path, dir.path().join("Cairo_network_data.json"));

    let text = std::fs::read_to_string(&path).unwrap();
    let exported: RegionRecord = serde_json::from_str(&text).unwrap();
    assert_eq!(
        &exported,
        controller.dataset().unwrap().get("Cairo").unwrap()
    );
    assert!(
        text.contains("\"group\""),
        "unknown node fields survive export"
    );
}

#[test]
fn export_without_selection_fails() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = ViewController::new(GraphSettings::default(), dir.path());
    controller.on_dataset_loaded(DatasetStore::from_json("{}"));

    let err = controller.export_current_region().unwrap_err();
    assert!(matches!(err, DashboardError::NoSelection));
    assert_eq!(err.user_message(), "يرجى اختيار محافظة أولاً");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn load_failure_replaces_graph_with_message() {
    let mut controller = ViewController::new(GraphSettings::default(), ".");
    let failure = DashboardError::load("governorate_networks.json", "not found");
    controller.on_dataset_loaded(Err(failure));

    assert!(controller.state().selected_region.is_none());
    assert!(!controller.state().graph.has_scene());
    assert!(controller
        .state()
        .graph
        .placeholder()
        .contains("governorate_networks.json"));
}

#[test]
fn resize_rebuilds_scene_around_new_center() {
    let mut controller = loaded_controller(Path::new("."));
    controller.select_region("Alexandria").unwrap();

    controller.on_viewport_resize(Vec2::new(1000.0, 400.0));
    let graph = &controller.state().graph;
    assert_eq!(graph.viewport(), Vec2::new(1000.0, 400.0));
    let hub = graph.scene().unwrap().bodies()[0].position;
    // a lone node is seeded on the first spiral turn around the center
    assert!((hub - egui::pos2(500.0, 200.0)).length() < 10.0, "{hub:?}");
}

#[test]
fn reset_zoom_and_layout_without_selection_are_noops() {
    let mut controller = ViewController::new(GraphSettings::default(), ".");
    controller.reset_layout();
    controller.reset_zoom();
    assert!(controller.state().graph.transform().is_identity());
}

#[tokio::test]
async fn load_from_file_source() {
    let source = DataSource::File(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/governorate_networks.json"),
    );
    let store = DatasetStore::load(&source).await.unwrap();
    assert_eq!(store.len(), 3);
}
