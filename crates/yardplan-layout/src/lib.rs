//! # YardPlan Layout
//!
//! This crate provides the to-scale property layout engine: the object
//! model and placement store, setback measurement, and the canvas and
//! print rendering adapters.
//!
//! ## Core Components
//!
//! ### Layout Elements
//! - **Objects**: Rectangles (buildings) and point markers (wells, posts)
//! - **Store**: Validated placement with yard bounds and unique names
//! - **Annotation**: Setback distances and dimension guide geometry
//! - **Viewport**: Canvas and print-page coordinate transforms
//!
//! ### Output Integration
//! - **Renderer**: Raster canvas views with PNG export
//! - **SVG Renderer**: Landscape-letter print documents
//! - **Serialization**: Versioned JSON layout files
//! - **Planner State**: Working-copy tracking with autosave
//!
//! ## Architecture
//!
//! The engine operates in layers:
//!
//! ```text
//! Layout (validated object store)
//!   ├── Model (yard, rectangles, point markers)
//!   └── Annotate (edge distances, dimension lines)
//!
//! Viewport (feet to surface transforms)
//!   ├── Renderer (canvas PNG)
//!   └── SVG Renderer (print document)
//!
//! PlannerState (file identity, autosave)
//!   └── Serialization (layout files)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use yardplan_layout::{Layout, PlacedObject, RectObject, Yard};
//!
//! // Lay out a 200 x 300 ft parcel
//! let mut layout = Layout::new(Yard::new(200.0, 300.0)?);
//!
//! // Place a shed 85 ft in from the left property line
//! layout.add_object(PlacedObject::Rect(RectObject::new(
//!     "shed", 85.0, 145.0, 30.0, 10.0,
//! )?))?;
//!
//! // Measure its setbacks
//! let distances = layout.distances("shed")?;
//! ```

pub mod annotate;
pub mod font_manager;
pub mod model;
pub mod palette;
pub mod renderer;
pub mod serialization;
pub mod state;
pub mod store;
pub mod svg_renderer;
pub mod viewport;

// Re-export all public types from submodules
pub use annotate::{
    annotate_layout, annotate_object, dimension_lines, DimensionLine, EdgeSide, LabelFormat,
    ObjectAnnotation,
};
pub use model::{
    edge_distances, BoundingBox, EdgeDistances, PlacedObject, Point, PointMarker, RectObject,
    Rotation, Yard,
};
pub use serialization::{LayoutFile, LayoutMetadata, ObjectRecord, YardRecord};
pub use store::Layout;
pub use viewport::{CanvasTransform, PageTransform, SurfaceTransform};

// State and rendering
pub use renderer::{export_png, render_canvas};
pub use state::PlannerState;
pub use svg_renderer::{export_svg, render_print};
