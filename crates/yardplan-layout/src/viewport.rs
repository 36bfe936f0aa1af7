//! Surface transforms between yard-space feet and rendering surfaces.
//!
//! The canvas measures in pixels with y growing downward; the print page
//! measures in PostScript points with y growing upward. Both implement
//! [`SurfaceTransform`], and the vertical-direction difference lives
//! entirely inside `to_surface` so the annotation data being projected is
//! identical for both.

use std::fmt;

use yardplan_core::constants;

use crate::model::{Point, Yard};

/// Projection from yard-space feet onto a rendering surface.
pub trait SurfaceTransform {
    /// Maps a yard-space point (feet) to surface coordinates.
    fn to_surface(&self, x_ft: f64, y_ft: f64) -> (f64, f64);

    fn point_to_surface(&self, p: &Point) -> (f64, f64) {
        self.to_surface(p.x, p.y)
    }
}

/// Transform for the interactive raster canvas (pixels, y down).
#[derive(Debug, Clone)]
pub struct CanvasTransform {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl CanvasTransform {
    /// Creates a transform with 1 px/ft zoom and the standard margin.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: constants::CANVAS_MARGIN_PX,
            pan_y: constants::CANVAS_MARGIN_PX,
            canvas_width,
            canvas_height,
        }
    }

    /// Creates a transform already fitted to the given yard.
    pub fn fitted(canvas_width: f64, canvas_height: f64, yard: &Yard) -> Self {
        let mut transform = Self::new(canvas_width, canvas_height);
        transform.fit_to_yard(yard);
        transform
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions (typically called when the window resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Current zoom in pixels per foot.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, constrained between 0.1 and 50.0.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom > 0.1 && zoom < 50.0 {
            self.zoom = zoom;
        }
    }

    /// Zooms in by multiplying current zoom by 1.2.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * 1.2);
    }

    /// Zooms out by dividing current zoom by 1.2.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / 1.2);
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Scales and centers the whole yard inside the canvas, keeping the
    /// standard margin free for axis labels.
    pub fn fit_to_yard(&mut self, yard: &Yard) {
        let usable_w = self.canvas_width - 2.0 * constants::CANVAS_MARGIN_PX;
        let usable_h = self.canvas_height - 2.0 * constants::CANVAS_MARGIN_PX;
        if usable_w <= 0.0 || usable_h <= 0.0 {
            return;
        }

        let zoom_x = usable_w / yard.front_width;
        let zoom_y = usable_h / yard.left_depth;
        let new_zoom = zoom_x.min(zoom_y).clamp(0.1, 50.0);

        let content_w = yard.front_width * new_zoom;
        let content_h = yard.left_depth * new_zoom;

        self.zoom = new_zoom;
        self.pan_x = (self.canvas_width - content_w) / 2.0;
        self.pan_y = (self.canvas_height - content_h) / 2.0;
    }

    /// Converts yard-space feet to pixel coordinates.
    ///
    /// Yard y grows toward the back of the property; pixel y grows down
    /// the screen, so the front edge (y = 0) lands near the canvas bottom.
    ///
    /// Formula:
    /// ```text
    /// pixel_x = x_ft * zoom + pan_x
    /// pixel_y = canvas_height - (y_ft * zoom + pan_y)  // Flip Y-axis
    /// ```
    pub fn to_pixel(&self, x_ft: f64, y_ft: f64) -> (f64, f64) {
        let pixel_x = x_ft * self.zoom + self.pan_x;
        let pixel_y = self.canvas_height - (y_ft * self.zoom + self.pan_y);
        (pixel_x, pixel_y)
    }

    /// Converts pixel coordinates back to yard-space feet.
    pub fn pixel_to_yard(&self, pixel_x: f64, pixel_y: f64) -> Point {
        let x_ft = (pixel_x - self.pan_x) / self.zoom;
        let y_ft = (self.canvas_height - pixel_y - self.pan_y) / self.zoom;
        Point::new(x_ft, y_ft)
    }
}

impl SurfaceTransform for CanvasTransform {
    fn to_surface(&self, x_ft: f64, y_ft: f64) -> (f64, f64) {
        self.to_pixel(x_ft, y_ft)
    }
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self::new(
            constants::CANVAS_WIDTH_PX as f64,
            constants::CANVAS_HEIGHT_PX as f64,
        )
    }
}

impl fmt::Display for CanvasTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2} px/ft | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

/// Transform for the print page (PostScript points, y up).
///
/// The drawing is anchored at the top margin with the yard's back edge
/// against it; the legend strip occupies the page bottom below the
/// drawing, so the front edge faces the legend just as it faces the
/// canvas bottom on screen.
#[derive(Debug, Clone)]
pub struct PageTransform {
    scale: f64,
    origin_x: f64,
    origin_y: f64,
    page_width: f64,
    page_height: f64,
}

impl PageTransform {
    /// Fits the yard into the drawing area of a landscape US Letter page.
    pub fn fitted(yard: &Yard) -> Self {
        let page_width = constants::PAGE_WIDTH_PT;
        let page_height = constants::PAGE_HEIGHT_PT;
        let margin = constants::PAGE_MARGIN_PT;

        let scale_x = (page_width - 2.0 * margin) / yard.front_width;
        let scale_y =
            (page_height - 2.0 * margin - constants::LEGEND_HEIGHT_PT) / yard.left_depth;
        let scale = scale_x.min(scale_y);

        Self {
            scale,
            origin_x: margin,
            origin_y: page_height - margin - yard.left_depth * scale,
            page_width,
            page_height,
        }
    }

    /// Points per foot.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn page_width(&self) -> f64 {
        self.page_width
    }

    pub fn page_height(&self) -> f64 {
        self.page_height
    }

    /// Converts yard-space feet to page points (y up, origin bottom-left).
    pub fn to_page(&self, x_ft: f64, y_ft: f64) -> (f64, f64) {
        (
            self.origin_x + x_ft * self.scale,
            self.origin_y + y_ft * self.scale,
        )
    }
}

impl SurfaceTransform for PageTransform {
    fn to_surface(&self, x_ft: f64, y_ft: f64) -> (f64, f64) {
        self.to_page(x_ft, y_ft)
    }
}
