//! Serialization and deserialization for layout files.
//!
//! Implements save/load functionality for yard layout files using JSON
//! format with complete layout state preservation. Files are validated as
//! a whole on load: the yard, every object record, name uniqueness and
//! placement bounds all have to pass before a `Layout` is handed back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use yardplan_core::constants::DEFAULT_MARKER_RADIUS_FT;
use yardplan_core::{PersistenceError, Result};

use crate::model::{PlacedObject, PointMarker, RectObject, Rotation, Yard};
use crate::store::Layout;

/// Layout file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Complete layout file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutFile {
    pub version: String,
    #[serde(default)]
    pub metadata: LayoutMetadata,
    pub yard: YardRecord,
    pub objects: Vec<ObjectRecord>,
}

/// Layout metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutMetadata {
    #[serde(default = "default_layout_name")]
    pub name: String,
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub modified: DateTime<Utc>,
}

fn default_layout_name() -> String {
    "Untitled".to_string()
}

impl Default for LayoutMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            name: default_layout_name(),
            created: now,
            modified: now,
        }
    }
}

/// Yard dimensions as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YardRecord {
    pub front_width: f64,
    pub left_depth: f64,
}

/// Serialized object data
///
/// One flat record covers both object kinds; `width`, `height` and
/// `rotation` apply to rectangles, `radius` to point markers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub kind: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub rotation: Option<i32>,
    #[serde(default)]
    pub radius: Option<f64>,
}

impl LayoutFile {
    /// Create a new layout file with no objects
    pub fn new(name: impl Into<String>, yard: &Yard) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: LayoutMetadata {
                name: name.into(),
                created: now,
                modified: now,
            },
            yard: YardRecord {
                front_width: yard.front_width,
                left_depth: yard.left_depth,
            },
            objects: Vec::new(),
        }
    }

    /// Snapshot a layout for saving, keeping the given metadata
    pub fn from_layout(layout: &Layout, metadata: LayoutMetadata) -> Self {
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata,
            yard: YardRecord {
                front_width: layout.yard().front_width,
                left_depth: layout.yard().left_depth,
            },
            objects: layout.objects().iter().map(ObjectRecord::from_object).collect(),
        }
    }

    /// Rebuild the in-memory layout, validating the whole file
    pub fn to_layout(&self) -> Result<Layout> {
        let yard = Yard::new(self.yard.front_width, self.yard.left_depth)?;
        let mut layout = Layout::new(yard);
        for record in &self.objects {
            layout.add_object(record.to_object()?)?;
        }
        Ok(layout)
    }

    /// Save layout to file
    ///
    /// Refreshes the modified timestamp, then writes pretty-printed JSON
    /// through a temporary file so an interrupted save cannot truncate an
    /// existing layout.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.metadata.modified = Utc::now();

        let json = serde_json::to_string_pretty(self).map_err(|e| PersistenceError::Malformed {
            reason: e.to_string(),
        })?;

        let write_failed = |e: String| PersistenceError::WriteFailed {
            path: path.display().to_string(),
            reason: e,
        };
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| write_failed(e.to_string()))?;
        std::fs::write(tmp.path(), json).map_err(|e| write_failed(e.to_string()))?;
        tmp.persist(path).map_err(|e| write_failed(e.error.to_string()))?;

        Ok(())
    }

    /// Load layout from file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| PersistenceError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let file: LayoutFile =
            serde_json::from_str(&content).map_err(|e| PersistenceError::Malformed {
                reason: e.to_string(),
            })?;

        if file.version != FILE_FORMAT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                version: file.version,
            }
            .into());
        }

        Ok(file)
    }
}

impl ObjectRecord {
    /// Convert a placed object to record form
    pub fn from_object(obj: &PlacedObject) -> ObjectRecord {
        match obj {
            PlacedObject::Rect(rect) => ObjectRecord {
                kind: obj.kind_name().to_string(),
                name: rect.name.clone(),
                x: rect.x,
                y: rect.y,
                width: Some(rect.width),
                height: Some(rect.height),
                rotation: Some(rect.rotation.degrees()),
                radius: None,
            },
            PlacedObject::Point(marker) => ObjectRecord {
                kind: obj.kind_name().to_string(),
                name: marker.name.clone(),
                x: marker.x,
                y: marker.y,
                width: None,
                height: None,
                rotation: None,
                radius: Some(marker.radius),
            },
        }
    }

    /// Convert a record back to a placed object
    pub fn to_object(&self) -> Result<PlacedObject> {
        match self.kind.as_str() {
            "rectangle" => {
                let width = self.require("width", self.width)?;
                let height = self.require("height", self.height)?;
                let mut rect = RectObject::new(&self.name, self.x, self.y, width, height)?;
                rect.rotation = Rotation::from_degrees(self.rotation.unwrap_or(0))?;
                Ok(PlacedObject::Rect(rect))
            }
            "point" => {
                let radius = self.radius.unwrap_or(DEFAULT_MARKER_RADIUS_FT);
                let marker = PointMarker::new(&self.name, self.x, self.y, radius)?;
                Ok(PlacedObject::Point(marker))
            }
            other => Err(PersistenceError::UnknownObjectKind {
                kind: other.to_string(),
            }
            .into()),
        }
    }

    fn require(&self, field: &str, value: Option<f64>) -> Result<f64> {
        value.ok_or_else(|| {
            PersistenceError::MissingField {
                kind: self.kind.clone(),
                field: field.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use yardplan_core::Error;

    fn sample_layout() -> Layout {
        let yard = Yard::new(200.0, 300.0).unwrap();
        let mut layout = Layout::new(yard);
        let mut shed = RectObject::new("shed", 85.0, 145.0, 30.0, 10.0).unwrap();
        shed.rotation = Rotation::Deg90;
        layout.add_object(PlacedObject::Rect(shed)).unwrap();
        layout
            .add_object(PlacedObject::Point(
                PointMarker::new("well", 12.0, 250.0, 2.0).unwrap(),
            ))
            .unwrap();
        layout
    }

    #[test]
    fn test_round_trip_preserves_layout() {
        let layout = sample_layout();
        let metadata = LayoutMetadata {
            name: "Back Forty".to_string(),
            ..Default::default()
        };
        let mut file = LayoutFile::from_layout(&layout, metadata);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("back_forty.json");
        file.save_to_file(&path).unwrap();

        let loaded = LayoutFile::load_from_file(&path).unwrap();
        assert_eq!(loaded.metadata.name, "Back Forty");
        assert_eq!(loaded.to_layout().unwrap(), layout);
    }

    #[test]
    fn test_save_refreshes_modified_timestamp() {
        let layout = sample_layout();
        let mut file = LayoutFile::from_layout(&layout, LayoutMetadata::default());
        let before = file.metadata.modified;

        let dir = tempfile::tempdir().unwrap();
        file.save_to_file(dir.path().join("plan.json")).unwrap();

        assert!(file.metadata.modified >= before);
    }

    #[test]
    fn test_rejects_unsupported_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("future.json");
        let contents = json!({
            "version": "2.0",
            "yard": {"front_width": 100.0, "left_depth": 100.0},
            "objects": []
        });
        std::fs::write(&path, contents.to_string()).unwrap();

        let err = LayoutFile::load_from_file(&path).unwrap_err();
        assert!(matches!(
            err,
            Error::Persistence(PersistenceError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn test_metadata_defaults_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bare.json");
        let contents = json!({
            "version": "1.0",
            "yard": {"front_width": 100.0, "left_depth": 100.0},
            "objects": []
        });
        std::fs::write(&path, contents.to_string()).unwrap();

        let file = LayoutFile::load_from_file(&path).unwrap();
        assert_eq!(file.metadata.name, "Untitled");
        assert!(file.to_layout().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let record = ObjectRecord {
            kind: "triangle".to_string(),
            name: "gazebo".to_string(),
            x: 0.0,
            y: 0.0,
            width: None,
            height: None,
            rotation: None,
            radius: None,
        };
        let err = record.to_object().unwrap_err();
        assert!(matches!(
            err,
            Error::Persistence(PersistenceError::UnknownObjectKind { .. })
        ));
    }

    #[test]
    fn test_missing_rectangle_width_rejected() {
        let record = ObjectRecord {
            kind: "rectangle".to_string(),
            name: "shed".to_string(),
            x: 10.0,
            y: 10.0,
            width: None,
            height: Some(10.0),
            rotation: Some(0),
            radius: None,
        };
        let err = record.to_object().unwrap_err();
        assert!(matches!(
            err,
            Error::Persistence(PersistenceError::MissingField { .. })
        ));
    }

    #[test]
    fn test_missing_rotation_defaults_to_zero() {
        let record = ObjectRecord {
            kind: "rectangle".to_string(),
            name: "shed".to_string(),
            x: 10.0,
            y: 10.0,
            width: Some(30.0),
            height: Some(10.0),
            rotation: None,
            radius: None,
        };
        let obj = record.to_object().unwrap();
        match obj {
            PlacedObject::Rect(rect) => assert_eq!(rect.rotation, Rotation::Deg0),
            PlacedObject::Point(_) => panic!("expected a rectangle"),
        }
    }

    #[test]
    fn test_missing_radius_gets_default() {
        let record = ObjectRecord {
            kind: "point".to_string(),
            name: "well".to_string(),
            x: 10.0,
            y: 10.0,
            width: None,
            height: None,
            rotation: None,
            radius: None,
        };
        let obj = record.to_object().unwrap();
        match obj {
            PlacedObject::Point(marker) => assert_eq!(marker.radius, DEFAULT_MARKER_RADIUS_FT),
            PlacedObject::Rect(_) => panic!("expected a point marker"),
        }
    }

    #[test]
    fn test_out_of_set_rotation_rejected_on_load() {
        let record = ObjectRecord {
            kind: "rectangle".to_string(),
            name: "shed".to_string(),
            x: 10.0,
            y: 10.0,
            width: Some(30.0),
            height: Some(10.0),
            rotation: Some(45),
            radius: None,
        };
        assert!(record.to_object().is_err());
    }

    #[test]
    fn test_duplicate_names_rejected_by_to_layout() {
        let yard = Yard::new(100.0, 100.0).unwrap();
        let mut file = LayoutFile::new("dupes", &yard);
        let record = ObjectRecord {
            kind: "point".to_string(),
            name: "well".to_string(),
            x: 10.0,
            y: 10.0,
            width: None,
            height: None,
            rotation: None,
            radius: Some(2.0),
        };
        file.objects.push(record.clone());
        file.objects.push(record);

        let err = file.to_layout().unwrap_err();
        assert!(err.is_duplicate_name());
    }
}
