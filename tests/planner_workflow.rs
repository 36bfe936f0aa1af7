//! Planner workflow integration tests
//!
//! Drives the public facade the same way the CLI commands do: create a
//! layout under the configured directories, edit it, reopen it and export
//! both drawings.

use yardplan::{shell, Config, PlacedObject, PlannerState, PointMarker, RectObject, Yard};

#[test]
fn test_create_edit_export_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.directories.layouts_dir = dir.path().join("layouts");
    config.directories.prints_dir = dir.path().join("prints");
    config.ensure_directories().unwrap();

    // Create a layout the way the new-layout command does
    let yard = Yard::new(200.0, 300.0).unwrap();
    let mut state = PlannerState::new("Back Forty", yard);
    let layout_path = config.layout_path("back_forty");
    state.save_as(&layout_path).unwrap();

    // Place and adjust objects; autosave keeps the file current
    state
        .add_object(PlacedObject::Rect(
            RectObject::new("Garden Shed", 85.0, 145.0, 30.0, 10.0).unwrap(),
        ))
        .unwrap();
    state
        .add_object(PlacedObject::Point(
            PointMarker::new("Well", 12.0, 250.0, 2.0).unwrap(),
        ))
        .unwrap();
    state.rotate_object("Garden Shed", 90).unwrap();

    // Reopen from disk, as the show command does
    let reopened = shell::open_planner(&config, &layout_path).unwrap();
    assert_eq!(reopened.layout.len(), 2);
    let distances = reopened.distances("Garden Shed").unwrap();
    assert_eq!(distances.left, 95.0);
    assert_eq!(distances.front, 135.0);

    // Export both drawings where the menu puts them
    shell::export_drawings(&reopened, &config).unwrap();
    assert!(config.export_path_for_layout(&layout_path, "png").exists());
    assert!(config.export_path_for_layout(&layout_path, "svg").exists());
}

#[test]
fn test_open_planner_applies_render_settings() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.render.label_precision = 2;
    config.render.unit_suffix = "feet".to_string();
    config.render.canvas_width = 400;
    config.render.canvas_height = 300;
    config.editor.autosave = false;

    let yard = Yard::new(200.0, 300.0).unwrap();
    let mut state = PlannerState::new("Back Forty", yard);
    state
        .add_object(PlacedObject::Rect(
            RectObject::new("Garden Shed", 85.0, 145.0, 30.0, 10.0).unwrap(),
        ))
        .unwrap();
    let path = dir.path().join("forty.json");
    state.save_as(&path).unwrap();

    let state = shell::open_planner(&config, &path).unwrap();
    assert!(!state.autosave);
    assert_eq!(state.canvas_size_px, (400, 300));
    let annotations = state.annotations().unwrap();
    assert_eq!(annotations[0].lines[0].label_text, "Left: 85.00 feet");
}

#[test]
fn test_recent_files_persist_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.add_recent_file(dir.path().join("a.json"));
    config.save_to_file(&config_path).unwrap();

    let reloaded = Config::load_from_file(&config_path).unwrap();
    assert_eq!(reloaded.recent_files, vec![dir.path().join("a.json")]);
}
