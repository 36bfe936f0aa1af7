//! Configuration and settings management for YardPlan
//!
//! Provides configuration file handling, settings management, and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Render settings (canvas size, measurement labels)
//! - Editor behavior (autosave, new-layout defaults)
//! - Directory layout (where layouts and prints live)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use yardplan_core::{Error, Result};

/// Canvas rendering preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Canvas width in pixels, also the exported PNG width
    pub canvas_width: u32,
    /// Canvas height in pixels, also the exported PNG height
    pub canvas_height: u32,
    /// Decimal places in measurement labels
    pub label_precision: usize,
    /// Unit suffix appended to measurement labels
    pub unit_suffix: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            canvas_width: yardplan_core::constants::CANVAS_WIDTH_PX,
            canvas_height: yardplan_core::constants::CANVAS_HEIGHT_PX,
            label_precision: yardplan_core::constants::DEFAULT_LABEL_PRECISION,
            unit_suffix: yardplan_core::constants::DEFAULT_UNIT_SUFFIX.to_string(),
        }
    }
}

/// Editor behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Write every successful edit back to the current file
    pub autosave: bool,
    /// Front width offered when creating a new layout, in feet
    pub default_front_width_ft: f64,
    /// Left depth offered when creating a new layout, in feet
    pub default_left_depth_ft: f64,
    /// Number of recent files to track
    pub recent_files_count: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            autosave: true,
            default_front_width_ft: 100.0,
            default_left_depth_ft: 100.0,
            recent_files_count: 10,
        }
    }
}

/// Directory settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectorySettings {
    /// Where layout files are kept
    pub layouts_dir: PathBuf,
    /// Where exported prints and images land
    pub prints_dir: PathBuf,
}

impl Default for DirectorySettings {
    fn default() -> Self {
        let documents = dirs::document_dir().unwrap_or_else(|| PathBuf::from("."));
        let base = documents.join("YardPlan");
        Self {
            layouts_dir: base.join("layouts"),
            prints_dir: base.join("prints"),
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Render settings
    #[serde(default)]
    pub render: RenderSettings,
    /// Editor behavior
    #[serde(default)]
    pub editor: EditorSettings,
    /// Directory layout
    #[serde(default)]
    pub directories: DirectorySettings,
    /// Recent layout files
    #[serde(default)]
    pub recent_files: Vec<PathBuf>,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config file location, `<config_dir>/yardplan/config.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("yardplan")
            .join("config.toml")
    }

    /// Load the config from the default path, falling back to defaults
    /// when no file exists yet
    pub fn load_or_default() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::other(format!("Failed to read config file: {}", e)))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid JSON config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)
                .map_err(|e| Error::other(format!("Invalid TOML config: {}", e)))?
        } else {
            return Err(Error::other(
                "Config file must be .json or .toml".to_string(),
            ));
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize config: {}", e)))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize config: {}", e)))?
        } else {
            return Err(Error::other(
                "Config file must be .json or .toml".to_string(),
            ));
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::other(format!("Failed to create config directory: {}", e)))?;
        }
        std::fs::write(path, content)
            .map_err(|e| Error::other(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.render.canvas_width == 0 || self.render.canvas_height == 0 {
            return Err(Error::other("Canvas dimensions must be > 0".to_string()));
        }

        if self.editor.default_front_width_ft <= 0.0 || self.editor.default_left_depth_ft <= 0.0 {
            return Err(Error::other(
                "Default yard dimensions must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Create the layouts and prints directories if missing
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.directories.layouts_dir)
            .map_err(|e| Error::other(format!("Failed to create layouts directory: {}", e)))?;
        std::fs::create_dir_all(&self.directories.prints_dir)
            .map_err(|e| Error::other(format!("Failed to create prints directory: {}", e)))?;
        Ok(())
    }

    /// Destination for a layout saved by name
    pub fn layout_path(&self, name: &str) -> PathBuf {
        self.directories.layouts_dir.join(format!("{}.json", name))
    }

    /// Export destination derived from a layout file, with the given
    /// extension ("svg" or "png")
    pub fn export_path_for_layout(&self, layout_path: &Path, extension: &str) -> PathBuf {
        let stem = layout_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("layout");
        self.directories
            .prints_dir
            .join(format!("{}.{}", stem, extension))
    }

    /// Add file to recent files list
    pub fn add_recent_file(&mut self, path: PathBuf) {
        // Remove if already in list
        self.recent_files.retain(|f| f != &path);

        // Add to front
        self.recent_files.insert(0, path);

        // Trim to max size
        self.recent_files.truncate(self.editor.recent_files_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::new();
        config.render.label_precision = 2;
        config.editor.autosave = false;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.render.label_precision, 2);
        assert!(!loaded.editor.autosave);
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config::new();
        config.save_to_file(&path).unwrap();
        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.render.canvas_width, config.render.canvas_width);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let config = Config::new();
        assert!(config.save_to_file(Path::new("config.yaml")).is_err());
    }

    #[test]
    fn test_validation_catches_bad_dimensions() {
        let mut config = Config::new();
        config.render.canvas_width = 0;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.editor.default_left_depth_ft = -10.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_recent_files_deduplicate_and_truncate() {
        let mut config = Config::new();
        config.editor.recent_files_count = 2;

        config.add_recent_file(PathBuf::from("a.json"));
        config.add_recent_file(PathBuf::from("b.json"));
        config.add_recent_file(PathBuf::from("a.json"));
        assert_eq!(
            config.recent_files,
            vec![PathBuf::from("a.json"), PathBuf::from("b.json")]
        );

        config.add_recent_file(PathBuf::from("c.json"));
        assert_eq!(config.recent_files.len(), 2);
        assert_eq!(config.recent_files[0], PathBuf::from("c.json"));
    }

    #[test]
    fn test_export_path_swaps_extension() {
        let config = Config::new();
        let out = config.export_path_for_layout(Path::new("/tmp/back_forty.json"), "svg");
        assert_eq!(out.file_name().unwrap(), "back_forty.svg");
        assert!(out.starts_with(&config.directories.prints_dir));
    }
}
