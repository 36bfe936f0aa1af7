//! Canvas renderer for yard layouts
//! Renders a layout to an image buffer using tiny-skia for high-quality 2D
//! rendering, with rusttype for label text.
//!
//! Drawing order: grid and axis labels, yard boundary, dimension guide
//! lines, objects with their names, then guide labels on top. Guide lines
//! sit under the objects just as they do in the interactive view.

use std::path::Path;

use image::{Rgb, RgbImage};
use rusttype::{point as rt_point, Font, Scale};
use tiny_skia::{
    Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, StrokeDash, Transform,
};
use tracing::debug;

use yardplan_core::{constants, Error, Result};

use crate::annotate::{annotate_layout, LabelFormat, ObjectAnnotation};
use crate::font_manager;
use crate::model::PlacedObject;
use crate::palette;
use crate::store::Layout;
use crate::viewport::{CanvasTransform, SurfaceTransform};

const AXIS_FONT_PX: f32 = 11.0;
const NAME_FONT_PX: f32 = 13.0;
const GUIDE_FONT_PX: f32 = 11.0;

#[derive(Clone, Copy)]
enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Render a layout to an image buffer
pub fn render_canvas(
    layout: &Layout,
    transform: &CanvasTransform,
    format: &LabelFormat,
) -> Result<RgbImage> {
    let width = transform.canvas_width() as u32;
    let height = transform.canvas_height() as u32;
    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return Ok(RgbImage::new(width, height));
    };
    pixmap.fill(palette::background_color());

    debug!(
        "Rendering layout: {} objects, {}",
        layout.len(),
        transform
    );

    let annotations = annotate_layout(layout, format)?;

    draw_grid(&mut pixmap, layout, transform);
    draw_boundary(&mut pixmap, layout, transform);
    for annotation in &annotations {
        draw_guide_lines(&mut pixmap, annotation, transform);
    }
    for obj in layout.objects() {
        draw_object(&mut pixmap, obj, transform);
    }
    for annotation in &annotations {
        draw_guide_labels(&mut pixmap, annotation, transform);
    }

    // Convert Pixmap to RgbImage
    let data = pixmap.data();
    Ok(RgbImage::from_fn(width, height, |x, y| {
        let idx = ((y * width + x) * 4) as usize;
        let r = data[idx];
        let g = data[idx + 1];
        let b = data[idx + 2];
        // Ignore alpha, assume opaque
        Rgb([r, g, b])
    }))
}

/// Renders with a fit-to-yard transform at the given pixel size and writes
/// a PNG.
///
/// The image is written to a temporary file beside the destination and
/// renamed into place, so a failed export never leaves a partial file and
/// never damages a previous one.
pub fn export_png(
    layout: &Layout,
    format: &LabelFormat,
    canvas_size_px: (u32, u32),
    path: &Path,
) -> Result<()> {
    let (width_px, height_px) = canvas_size_px;
    let transform = CanvasTransform::fitted(width_px as f64, height_px as f64, layout.yard());
    let image = render_canvas(layout, &transform, format)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    image
        .write_to(tmp.as_file_mut(), image::ImageFormat::Png)
        .map_err(|e| Error::other(format!("Failed to encode PNG: {}", e)))?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    debug!("Exported canvas PNG to {}", path.display());
    Ok(())
}

fn draw_grid(pixmap: &mut Pixmap, layout: &Layout, transform: &CanvasTransform) {
    let yard = layout.yard();
    let spacing = constants::GRID_SPACING_FT;

    let mut ft = 0.0;
    while ft <= yard.front_width + 1e-9 {
        let (x, y_back) = transform.to_pixel(ft, yard.left_depth);
        let (_, y_front) = transform.to_pixel(ft, 0.0);
        stroke_line(
            pixmap,
            x,
            y_back,
            x,
            y_front,
            palette::grid_color(),
            1.0,
            None,
            false,
        );
        draw_text(
            pixmap,
            &format!("{}", ft as i64),
            x as f32,
            (y_back - 14.0) as f32,
            AXIS_FONT_PX,
            palette::axis_label_color(),
            TextAnchor::Middle,
        );
        ft += spacing;
    }

    let mut ft = 0.0;
    while ft <= yard.left_depth + 1e-9 {
        let (x_left, y) = transform.to_pixel(0.0, ft);
        let (x_right, _) = transform.to_pixel(yard.front_width, ft);
        stroke_line(
            pixmap,
            x_left,
            y,
            x_right,
            y,
            palette::grid_color(),
            1.0,
            None,
            false,
        );
        draw_text(
            pixmap,
            &format!("{}", ft as i64),
            (x_left - 4.0) as f32,
            (y - AXIS_FONT_PX as f64 / 2.0) as f32,
            AXIS_FONT_PX,
            palette::axis_label_color(),
            TextAnchor::End,
        );
        ft += spacing;
    }
}

fn draw_boundary(pixmap: &mut Pixmap, layout: &Layout, transform: &CanvasTransform) {
    let yard = layout.yard();
    let (left, bottom) = transform.to_pixel(0.0, 0.0);
    let (right, top) = transform.to_pixel(yard.front_width, yard.left_depth);

    let mut pb = PathBuilder::new();
    pb.move_to(left as f32, top as f32);
    pb.line_to(right as f32, top as f32);
    pb.line_to(right as f32, bottom as f32);
    pb.line_to(left as f32, bottom as f32);
    pb.close();

    if let Some(path) = pb.finish() {
        let mut paint = Paint::default();
        paint.set_color(palette::boundary_color());
        paint.anti_alias = false;
        let stroke = Stroke {
            width: 2.0,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

fn draw_object(pixmap: &mut Pixmap, obj: &PlacedObject, transform: &CanvasTransform) {
    let mut paint = Paint::default();
    paint.set_color(palette::color_for_object(obj.name()));
    paint.anti_alias = true;

    match obj {
        PlacedObject::Rect(_) => {
            let bbox = obj.bounding_box();
            let (x1, y1) = transform.to_pixel(bbox.x, bbox.max_y());
            let (x2, y2) = transform.to_pixel(bbox.max_x(), bbox.y);
            let rect = Rect::from_ltrb(
                x1.min(x2) as f32,
                y1.min(y2) as f32,
                x1.max(x2) as f32,
                y1.max(y2) as f32,
            );
            if let Some(r) = rect {
                let path = PathBuilder::from_rect(r);
                pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            }

            let center = bbox.center();
            let (cx, cy) = transform.to_pixel(center.x, center.y);
            draw_text(
                pixmap,
                obj.name(),
                cx as f32,
                (cy - NAME_FONT_PX as f64 / 2.0) as f32,
                NAME_FONT_PX,
                palette::object_label_color(),
                TextAnchor::Middle,
            );
        }
        PlacedObject::Point(marker) => {
            let (cx, cy) = transform.to_pixel(marker.x, marker.y);
            let radius_px = (marker.radius * transform.zoom()) as f32;
            if let Some(path) = PathBuilder::from_circle(cx as f32, cy as f32, radius_px) {
                pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
            }
            draw_text(
                pixmap,
                obj.name(),
                cx as f32,
                cy as f32 - radius_px - 4.0 - NAME_FONT_PX,
                NAME_FONT_PX,
                palette::boundary_color(),
                TextAnchor::Middle,
            );
        }
    }
}

fn draw_guide_lines(
    pixmap: &mut Pixmap,
    annotation: &ObjectAnnotation,
    transform: &CanvasTransform,
) {
    for line in &annotation.lines {
        let (x1, y1) = transform.point_to_surface(&line.start);
        let (x2, y2) = transform.point_to_surface(&line.end);
        stroke_line(
            pixmap,
            x1,
            y1,
            x2,
            y2,
            palette::guide_color(),
            1.0,
            StrokeDash::new(vec![4.0, 3.0], 0.0),
            true,
        );
    }
}

fn draw_guide_labels(
    pixmap: &mut Pixmap,
    annotation: &ObjectAnnotation,
    transform: &CanvasTransform,
) {
    for line in &annotation.lines {
        // Zero-length guides keep their line but get no label.
        if annotation.distance_along(line.edge) <= 0.0 {
            continue;
        }

        let (ax, ay) = transform.point_to_surface(&line.label_anchor);
        if line.edge.is_horizontal() {
            draw_text(
                pixmap,
                &line.label_text,
                ax as f32,
                (ay - 8.0) as f32 - GUIDE_FONT_PX,
                GUIDE_FONT_PX,
                palette::guide_label_color(),
                TextAnchor::Middle,
            );
        } else {
            draw_text(
                pixmap,
                &line.label_text,
                (ax + 8.0) as f32,
                (ay - GUIDE_FONT_PX as f64 / 2.0) as f32,
                GUIDE_FONT_PX,
                palette::guide_label_color(),
                TextAnchor::Start,
            );
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn stroke_line(
    pixmap: &mut Pixmap,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    color: Color,
    width: f32,
    dash: Option<StrokeDash>,
    anti_alias: bool,
) {
    let mut pb = PathBuilder::new();
    pb.move_to(x1 as f32, y1 as f32);
    pb.line_to(x2 as f32, y2 as f32);
    if let Some(path) = pb.finish() {
        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = anti_alias;
        let stroke = Stroke {
            width,
            dash,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

fn text_width(font: &Font, text: &str, scale: Scale) -> f32 {
    font.layout(text, scale, rt_point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Rasterizes text into the pixmap. `y_top` is the top of the text box;
/// the canvas is opaque, so straight alpha blending over the existing
/// pixel is exact.
fn draw_text(
    pixmap: &mut Pixmap,
    text: &str,
    x: f32,
    y_top: f32,
    size_px: f32,
    color: Color,
    anchor: TextAnchor,
) {
    let Some(font) = font_manager::get_font() else {
        return;
    };
    let scale = Scale::uniform(size_px);
    let v_metrics = font.v_metrics(scale);

    let x = match anchor {
        TextAnchor::Start => x,
        TextAnchor::Middle => x - text_width(font, text, scale) / 2.0,
        TextAnchor::End => x - text_width(font, text, scale),
    };
    let start = rt_point(x, y_top + v_metrics.ascent);

    let width = pixmap.width();
    let height = pixmap.height();
    let rgba = color.to_color_u8();
    let (cr, cg, cb) = (rgba.red(), rgba.green(), rgba.blue());
    let data = pixmap.data_mut();

    for glyph in font.layout(text, scale, start) {
        if let Some(bounding_box) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = gx as i32 + bounding_box.min.x;
                let py = gy as i32 + bounding_box.min.y;

                if px >= 0 && px < width as i32 && py >= 0 && py < height as i32 && v > 0.0 {
                    let idx = ((py as u32 * width + px as u32) * 4) as usize;
                    let pixel = &mut data[idx..idx + 4];
                    pixel[0] = (cr as f32 * v + pixel[0] as f32 * (1.0 - v)) as u8;
                    pixel[1] = (cg as f32 * v + pixel[1] as f32 * (1.0 - v)) as u8;
                    pixel[2] = (cb as f32 * v + pixel[2] as f32 * (1.0 - v)) as u8;
                    pixel[3] = 255;
                }
            });
        }
    }
}
