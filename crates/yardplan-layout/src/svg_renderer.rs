//! Print document renderer
//! Produces a landscape-letter SVG of the layout: title, grid with axis
//! labels, yard boundary, objects, dimension guides and a legend strip.
//!
//! The page transform works in printer's points with y growing upward, so
//! every coordinate is flipped to SVG's y-down space at emit time.

use std::io::Write;
use std::path::Path;

use svg::node::element::{Circle, Line, Rectangle, Text};
use svg::Document;
use tracing::debug;

use yardplan_core::{constants, format_feet, Error, Result};

use crate::annotate::{annotate_layout, LabelFormat, ObjectAnnotation};
use crate::model::PlacedObject;
use crate::palette;
use crate::store::Layout;
use crate::viewport::{PageTransform, SurfaceTransform};

const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";
const AXIS_FONT_PT: f64 = 6.0;
const GUIDE_FONT_PT: f64 = 6.0;
const NAME_FONT_PT: f64 = 8.0;
const LEGEND_FONT_PT: f64 = 9.0;
const TITLE_FONT_PT: f64 = 11.0;
const GRID_LINE_WIDTH_PT: f64 = 0.5;
const BOUNDARY_LINE_WIDTH_PT: f64 = 1.0;
const LEGEND_COLUMN_WIDTH_PT: f64 = 150.0;
const LEGEND_SWATCH_PT: f64 = 8.0;

/// Build the print document for a layout.
///
/// `title` is printed across the top of the page, normally the layout name.
pub fn render_print(layout: &Layout, title: &str, format: &LabelFormat) -> Result<Document> {
    let transform = PageTransform::fitted(layout.yard());
    let annotations = annotate_layout(layout, format)?;

    let mut doc = Document::new()
        .set(
            "viewBox",
            format!(
                "0 0 {} {}",
                transform.page_width(),
                transform.page_height()
            ),
        )
        .set("width", transform.page_width())
        .set("height", transform.page_height());

    doc = doc.add(
        Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", transform.page_width())
            .set("height", transform.page_height())
            .set("fill", "white"),
    );

    doc = doc.add(
        text(title, transform.page_width() / 2.0, 20.0, TITLE_FONT_PT, "black")
            .set("text-anchor", "middle")
            .set("font-weight", "bold"),
    );

    doc = add_grid(doc, layout, &transform);
    doc = add_boundary(doc, layout, &transform);
    for annotation in &annotations {
        doc = add_guide_lines(doc, annotation, &transform);
    }
    for obj in layout.objects() {
        doc = add_object(doc, obj, &transform);
    }
    for annotation in &annotations {
        doc = add_guide_labels(doc, annotation, &transform);
    }
    doc = add_legend(doc, layout, &transform);

    Ok(doc)
}

/// Renders the print document and writes it as an SVG file.
///
/// Written to a temporary file first and renamed into place, matching the
/// PNG exporter.
pub fn export_svg(layout: &Layout, title: &str, format: &LabelFormat, path: &Path) -> Result<()> {
    let doc = render_print(layout, title, format)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(doc.to_string().as_bytes())?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    debug!("Exported print SVG to {}", path.display());
    Ok(())
}

fn add_grid(mut doc: Document, layout: &Layout, transform: &PageTransform) -> Document {
    let yard = layout.yard();
    let spacing = constants::GRID_SPACING_FT;
    let page_height = transform.page_height();

    let mut ft = 0.0;
    while ft <= yard.front_width + 1e-9 {
        let (x, y_back) = transform.to_page(ft, yard.left_depth);
        let (_, y_front) = transform.to_page(ft, 0.0);
        doc = doc.add(line(
            x,
            page_height - y_back,
            x,
            page_height - y_front,
            palette::GRID_HEX,
            GRID_LINE_WIDTH_PT,
        ));
        doc = doc.add(
            text(
                &format!("{}", ft as i64),
                x,
                page_height - (y_back + 5.0),
                AXIS_FONT_PT,
                "black",
            )
            .set("text-anchor", "middle"),
        );
        ft += spacing;
    }

    let mut ft = 0.0;
    while ft <= yard.left_depth + 1e-9 {
        let (x_left, y) = transform.to_page(0.0, ft);
        let (x_right, _) = transform.to_page(yard.front_width, ft);
        doc = doc.add(line(
            x_left,
            page_height - y,
            x_right,
            page_height - y,
            palette::GRID_HEX,
            GRID_LINE_WIDTH_PT,
        ));
        doc = doc.add(
            text(
                &format!("{}", ft as i64),
                x_left - 4.0,
                page_height - (y - 3.0),
                AXIS_FONT_PT,
                "black",
            )
            .set("text-anchor", "end"),
        );
        ft += spacing;
    }

    doc
}

fn add_boundary(doc: Document, layout: &Layout, transform: &PageTransform) -> Document {
    let yard = layout.yard();
    let page_height = transform.page_height();
    let (left, _) = transform.to_page(0.0, 0.0);
    let (right, top) = transform.to_page(yard.front_width, yard.left_depth);

    doc.add(
        Rectangle::new()
            .set("x", left)
            .set("y", page_height - top)
            .set("width", right - left)
            .set("height", yard.left_depth * transform.scale())
            .set("fill", "none")
            .set("stroke", palette::BOUNDARY_HEX)
            .set("stroke-width", BOUNDARY_LINE_WIDTH_PT),
    )
}

fn add_object(doc: Document, obj: &PlacedObject, transform: &PageTransform) -> Document {
    let page_height = transform.page_height();
    let fill = palette::hex_for_object(obj.name());

    match obj {
        PlacedObject::Rect(_) => {
            let bbox = obj.bounding_box();
            let (x, top) = transform.to_page(bbox.x, bbox.max_y());
            let center = bbox.center();
            let (cx, cy) = transform.to_page(center.x, center.y);

            doc.add(
                Rectangle::new()
                    .set("x", x)
                    .set("y", page_height - top)
                    .set("width", bbox.width * transform.scale())
                    .set("height", bbox.height * transform.scale())
                    .set("fill", fill),
            )
            .add(
                text(
                    obj.name(),
                    cx,
                    page_height - cy + NAME_FONT_PT * 0.35,
                    NAME_FONT_PT,
                    "white",
                )
                .set("text-anchor", "middle")
                .set("font-weight", "bold"),
            )
        }
        PlacedObject::Point(marker) => {
            let (cx, cy) = transform.to_page(marker.x, marker.y);
            doc.add(
                Circle::new()
                    .set("cx", cx)
                    .set("cy", page_height - cy)
                    .set("r", marker.radius * transform.scale())
                    .set("fill", fill),
            )
            .add(text(
                obj.name(),
                cx + 6.0,
                page_height - cy + 4.0,
                NAME_FONT_PT,
                "black",
            ))
        }
    }
}

fn add_guide_lines(
    mut doc: Document,
    annotation: &ObjectAnnotation,
    transform: &PageTransform,
) -> Document {
    let page_height = transform.page_height();
    for guide in &annotation.lines {
        let (x1, y1) = transform.point_to_surface(&guide.start);
        let (x2, y2) = transform.point_to_surface(&guide.end);
        doc = doc.add(
            line(
                x1,
                page_height - y1,
                x2,
                page_height - y2,
                palette::GUIDE_HEX,
                GRID_LINE_WIDTH_PT,
            )
            .set("stroke-dasharray", "4,3"),
        );
    }
    doc
}

fn add_guide_labels(
    mut doc: Document,
    annotation: &ObjectAnnotation,
    transform: &PageTransform,
) -> Document {
    let page_height = transform.page_height();
    for guide in &annotation.lines {
        let distance = annotation.distance_along(guide.edge);
        // Zero-length guides keep their line but get no label.
        if distance <= 0.0 {
            continue;
        }

        let (ax, ay) = transform.point_to_surface(&guide.label_anchor);
        let label = if guide.edge.is_horizontal() {
            text(
                &guide.label_text,
                ax,
                page_height - ay - 3.0,
                GUIDE_FONT_PT,
                palette::GUIDE_LABEL_HEX,
            )
            .set("text-anchor", "middle")
        } else {
            text(
                &guide.label_text,
                ax + 4.0,
                page_height - ay + GUIDE_FONT_PT * 0.35,
                GUIDE_FONT_PT,
                palette::GUIDE_LABEL_HEX,
            )
        };
        doc = doc.add(label);
    }
    doc
}

/// Two-row legend strip across the bottom margin, one swatch and name per
/// object (with footprint size for rectangles), filling downward then
/// across.
fn add_legend(mut doc: Document, layout: &Layout, transform: &PageTransform) -> Document {
    let page_height = transform.page_height();
    let margin = constants::PAGE_MARGIN_PT;
    let legend_y = margin + 10.0;

    doc = doc.add(
        text(
            "Legend:",
            margin,
            page_height - (legend_y + 28.0),
            LEGEND_FONT_PT,
            "black",
        )
        .set("font-weight", "bold"),
    );

    for (i, obj) in layout.objects().iter().enumerate() {
        let col_x = margin + (i / 2) as f64 * LEGEND_COLUMN_WIDTH_PT;
        let row_y = if i % 2 == 0 { legend_y + 14.0 } else { legend_y };
        let entry = match obj {
            PlacedObject::Rect(rect) => format!(
                "{} ({} x {} ft)",
                rect.name,
                format_feet(rect.width, 1),
                format_feet(rect.height, 1)
            ),
            PlacedObject::Point(_) => obj.name().to_string(),
        };

        doc = doc
            .add(
                Rectangle::new()
                    .set("x", col_x)
                    .set("y", page_height - (row_y + LEGEND_SWATCH_PT))
                    .set("width", LEGEND_SWATCH_PT)
                    .set("height", LEGEND_SWATCH_PT)
                    .set("fill", palette::hex_for_object(obj.name())),
            )
            .add(text(
                &entry,
                col_x + LEGEND_SWATCH_PT + 4.0,
                page_height - (row_y + 1.0),
                LEGEND_FONT_PT,
                "black",
            ));
    }

    doc
}

fn line(x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str, width: f64) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
        .set("stroke", stroke)
        .set("stroke-width", width)
}

fn text(content: &str, x: f64, y: f64, size: f64, fill: &str) -> Text {
    Text::new(content)
        .set("x", x)
        .set("y", y)
        .set("font-family", FONT_FAMILY)
        .set("font-size", size)
        .set("fill", fill)
}
