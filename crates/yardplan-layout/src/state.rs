//! Planner state for shell integration.
//! Owns the working layout, its file identity and the modified flag, and
//! funnels every mutation through the store so each successful edit can be
//! autosaved to the current file.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use yardplan_core::{constants, Error, Result};

use crate::annotate::{annotate_layout, LabelFormat, ObjectAnnotation};
use crate::model::{EdgeDistances, PlacedObject, Yard};
use crate::renderer;
use crate::serialization::{LayoutFile, LayoutMetadata};
use crate::store::Layout;
use crate::svg_renderer;

/// Planner state for shell integration
#[derive(Debug, Clone)]
pub struct PlannerState {
    pub layout: Layout,
    /// Layout name and timestamps, carried across saves so `created`
    /// survives.
    pub metadata: LayoutMetadata,
    pub current_file_path: Option<PathBuf>,
    pub is_modified: bool,
    /// When set, every successful mutation is written straight back to
    /// the current file.
    pub autosave: bool,
    pub label_format: LabelFormat,
    /// Pixel size of exported canvas views.
    pub canvas_size_px: (u32, u32),
}

impl PlannerState {
    /// Creates a fresh planner state with an empty layout.
    pub fn new(name: impl Into<String>, yard: Yard) -> Self {
        Self {
            layout: Layout::new(yard),
            metadata: LayoutMetadata {
                name: name.into(),
                ..Default::default()
            },
            current_file_path: None,
            is_modified: false,
            autosave: true,
            label_format: LabelFormat::default(),
            canvas_size_px: (constants::CANVAS_WIDTH_PX, constants::CANVAS_HEIGHT_PX),
        }
    }

    /// Load a layout from file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = LayoutFile::load_from_file(path)?;
        let layout = file.to_layout()?;

        info!(
            "Loaded layout '{}' with {} objects from {}",
            file.metadata.name,
            layout.len(),
            path.display()
        );

        Ok(Self {
            layout,
            metadata: file.metadata,
            current_file_path: Some(path.to_path_buf()),
            is_modified: false,
            autosave: true,
            label_format: LabelFormat::default(),
            canvas_size_px: (constants::CANVAS_WIDTH_PX, constants::CANVAS_HEIGHT_PX),
        })
    }

    /// Save the layout to a new destination and make it current.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut file = LayoutFile::from_layout(&self.layout, self.metadata.clone());
        file.save_to_file(path)?;

        self.metadata = file.metadata;
        self.current_file_path = Some(path.to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    /// Save to the current file.
    pub fn save(&mut self) -> Result<()> {
        let path = self
            .current_file_path
            .clone()
            .ok_or_else(|| Error::other("Layout has no file yet; save it with a path first"))?;
        self.save_as(path)
    }

    /// Adds an object to the layout.
    pub fn add_object(&mut self, obj: PlacedObject) -> Result<()> {
        self.layout.add_object(obj)?;
        self.after_mutation()
    }

    /// Removes an object by name, returning it.
    pub fn remove_object(&mut self, name: &str) -> Result<PlacedObject> {
        let removed = self.layout.remove_object(name)?;
        self.after_mutation()?;
        Ok(removed)
    }

    /// Moves an object to a new anchor position.
    pub fn move_object(&mut self, name: &str, x: f64, y: f64) -> Result<()> {
        self.layout.move_object(name, x, y)?;
        self.after_mutation()
    }

    /// Rotates a rectangle by a multiple of 90 degrees.
    pub fn rotate_object(&mut self, name: &str, delta_degrees: i32) -> Result<()> {
        self.layout.rotate_object(name, delta_degrees)?;
        self.after_mutation()
    }

    /// Changes a rectangle's footprint.
    pub fn resize_object(&mut self, name: &str, width: f64, height: f64) -> Result<()> {
        self.layout.resize_object(name, width, height)?;
        self.after_mutation()
    }

    /// Changes a point marker's drawing radius.
    pub fn resize_marker(&mut self, name: &str, radius: f64) -> Result<()> {
        self.layout.resize_marker(name, radius)?;
        self.after_mutation()
    }

    /// Changes the yard dimensions, keeping every object inside.
    pub fn resize_yard(&mut self, front_width: f64, left_depth: f64) -> Result<()> {
        self.layout.resize_yard(front_width, left_depth)?;
        self.after_mutation()
    }

    /// Edge distances for one object.
    pub fn distances(&self, name: &str) -> Result<EdgeDistances> {
        self.layout.distances(name)
    }

    /// Measurement annotations for every object, in z-order.
    pub fn annotations(&self) -> Result<Vec<ObjectAnnotation>> {
        annotate_layout(&self.layout, &self.label_format)
    }

    /// Export the layout as a canvas PNG.
    pub fn export_png(&self, path: impl AsRef<Path>) -> Result<()> {
        renderer::export_png(&self.layout, &self.label_format, self.canvas_size_px, path.as_ref())
    }

    /// Export the layout as a print SVG.
    pub fn export_svg(&self, path: impl AsRef<Path>) -> Result<()> {
        svg_renderer::export_svg(&self.layout, &self.metadata.name, &self.label_format, path.as_ref())
    }

    /// Get display name for the layout.
    pub fn display_name(&self) -> String {
        let name = if let Some(path) = &self.current_file_path {
            path.file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(&self.metadata.name)
        } else {
            &self.metadata.name
        };

        if self.is_modified {
            format!("{}*", name)
        } else {
            name.to_string()
        }
    }

    fn after_mutation(&mut self) -> Result<()> {
        self.is_modified = true;
        if self.autosave && self.current_file_path.is_some() {
            self.save()?;
            debug!("Autosaved layout '{}'", self.metadata.name);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PointMarker, RectObject};

    fn sample_state() -> PlannerState {
        let yard = Yard::new(200.0, 300.0).unwrap();
        let mut state = PlannerState::new("Back Forty", yard);
        state
            .add_object(PlacedObject::Rect(
                RectObject::new("shed", 85.0, 145.0, 30.0, 10.0).unwrap(),
            ))
            .unwrap();
        state
    }

    #[test]
    fn test_display_name_tracks_modified_flag() {
        let mut state = sample_state();
        assert_eq!(state.display_name(), "Back Forty*");

        let dir = tempfile::tempdir().unwrap();
        state.save_as(dir.path().join("forty.json")).unwrap();
        assert_eq!(state.display_name(), "forty.json");

        // Autosave kicks in now that a path exists, so the star never
        // comes back after a successful edit.
        state.move_object("shed", 10.0, 10.0).unwrap();
        assert_eq!(state.display_name(), "forty.json");
    }

    #[test]
    fn test_autosave_writes_each_mutation() {
        let mut state = sample_state();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forty.json");
        state.save_as(&path).unwrap();

        state.move_object("shed", 50.0, 60.0).unwrap();

        let reloaded = PlannerState::open(&path).unwrap();
        let obj = reloaded.layout.get("shed").unwrap();
        assert_eq!(obj.position(), crate::model::Point::new(50.0, 60.0));
    }

    #[test]
    fn test_save_preserves_created_timestamp() {
        let mut state = sample_state();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forty.json");

        state.save_as(&path).unwrap();
        let created = state.metadata.created;
        state.move_object("shed", 20.0, 20.0).unwrap();
        state.save().unwrap();

        assert_eq!(state.metadata.created, created);
        assert!(state.metadata.modified >= created);
    }

    #[test]
    fn test_save_without_path_is_an_error() {
        let mut state = sample_state();
        assert!(state.save().is_err());
    }

    #[test]
    fn test_rejected_mutation_leaves_state_unsaved_and_unchanged() {
        let mut state = sample_state();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forty.json");
        state.save_as(&path).unwrap();

        let before = state.layout.clone();
        let err = state.move_object("shed", 190.0, 145.0).unwrap_err();
        assert!(err.is_out_of_bounds());
        assert_eq!(state.layout, before);

        let reloaded = PlannerState::open(&path).unwrap();
        assert_eq!(reloaded.layout, before);
    }

    #[test]
    fn test_exports_write_files() {
        let mut state = sample_state();
        state
            .add_object(PlacedObject::Point(
                PointMarker::new("well", 12.0, 250.0, 2.0).unwrap(),
            ))
            .unwrap();
        let dir = tempfile::tempdir().unwrap();

        let png = dir.path().join("forty.png");
        let svg = dir.path().join("forty.svg");
        state.export_png(&png).unwrap();
        state.export_svg(&svg).unwrap();

        assert!(png.metadata().unwrap().len() > 0);
        assert!(svg.metadata().unwrap().len() > 0);
    }
}
