//! Shared constants for canvas and page geometry
//!
//! Defaults used by the render adapters and the settings layer. All canvas
//! values are pixels, all page values are PostScript points (1/72 in), and
//! grid spacing is in yard feet.

/// Default interactive canvas width in pixels
pub const CANVAS_WIDTH_PX: u32 = 850;

/// Default interactive canvas height in pixels
pub const CANVAS_HEIGHT_PX: u32 = 650;

/// Blank margin kept around the yard on the canvas, in pixels
pub const CANVAS_MARGIN_PX: f64 = 20.0;

/// Grid line spacing in feet
pub const GRID_SPACING_FT: f64 = 10.0;

/// Print page width in points (US Letter landscape)
pub const PAGE_WIDTH_PT: f64 = 792.0;

/// Print page height in points (US Letter landscape)
pub const PAGE_HEIGHT_PT: f64 = 612.0;

/// Print page margin in points (0.5 in)
pub const PAGE_MARGIN_PT: f64 = 36.0;

/// Height of the legend strip at the bottom of the print page, in points
pub const LEGEND_HEIGHT_PT: f64 = 60.0;

/// Default drawing radius for point markers, in feet
pub const DEFAULT_MARKER_RADIUS_FT: f64 = 2.0;

/// Default number of decimal places in distance labels
pub const DEFAULT_LABEL_PRECISION: usize = 1;

/// Default unit suffix appended to distance labels
pub const DEFAULT_UNIT_SUFFIX: &str = "ft";
