//! # YardPlan
//!
//! A Rust-based to-scale property layout planner with support for:
//! - Rectangular structures (house, shed, garage) and point utilities (well, septic tank)
//! - Exact setback distances from every object to all four property lines
//! - Interactive canvas PNG rendering and printable US-Letter SVG drawings
//! - JSON layout files with autosave and an interactive planner shell
//!
//! ## Architecture
//!
//! YardPlan is organized as a workspace with multiple crates:
//!
//! 1. **yardplan-core** - Error types, unit helpers, shared drawing constants
//! 2. **yardplan-layout** - Yard model, placement store, annotations, renderers
//! 3. **yardplan-settings** - Configuration loading, validation, directories
//! 4. **yardplan** - Main binary with the CLI and interactive shell
//!
//! ## Features
//!
//! - **Validated Placement**: every edit is checked against the property boundary and rejected edits leave the layout unchanged
//! - **Center-Preserving Rotation**: quarter turns pivot a footprint around its center
//! - **Distance Guides**: per-object setback guides on both canvas and print output
//! - **Autosave**: successful edits are written straight back to the layout file
//! - **Cross-Platform**: Linux, Windows, macOS support

pub mod args;
pub mod shell;

pub use args::{Args, Command};

pub use yardplan_core::{Error, Result};

pub use yardplan_layout::{
    annotate_layout, annotate_object, edge_distances, export_png, export_svg, render_canvas,
    render_print, BoundingBox, CanvasTransform, DimensionLine, EdgeDistances, EdgeSide,
    LabelFormat, Layout, LayoutFile, LayoutMetadata, ObjectAnnotation, PageTransform, PlacedObject,
    PlannerState, Point, PointMarker, RectObject, Rotation, SurfaceTransform, Yard,
};

pub use yardplan_settings::{Config, DirectorySettings, EditorSettings, RenderSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the given verbosity
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging(level: tracing_subscriber::filter::LevelFilter) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    // The menu owns stdout; diagnostics go to stderr
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
