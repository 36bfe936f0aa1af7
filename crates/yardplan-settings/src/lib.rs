//! YardPlan Settings Crate
//!
//! Handles application configuration and settings persistence.

pub mod config;

pub use config::{Config, DirectorySettings, EditorSettings, RenderSettings};
