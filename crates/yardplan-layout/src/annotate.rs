//! Distance and dimension-line annotation.
//!
//! Turns a layout into renderer-agnostic measurement data: per object, the
//! four nearest-edge distances and four dimension-line descriptors with
//! their label text. Everything here is expressed in yard-space feet; the
//! render adapters project these through their own surface transforms, so
//! the canvas and the print document always measure identically.

use yardplan_core::format_feet;
use yardplan_core::{constants, Result};

use crate::model::{edge_distances, BoundingBox, EdgeDistances, PlacedObject, Point, Yard};
use crate::store::Layout;

/// Which yard edge a distance or dimension line refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeSide {
    Left,
    Right,
    Front,
    Back,
}

impl EdgeSide {
    /// Display name used in dimension labels.
    pub fn label(self) -> &'static str {
        match self {
            EdgeSide::Left => "Left",
            EdgeSide::Right => "Right",
            EdgeSide::Front => "Front",
            EdgeSide::Back => "Back",
        }
    }

    /// Left and right guides run horizontally, front and back vertically.
    pub fn is_horizontal(self) -> bool {
        matches!(self, EdgeSide::Left | EdgeSide::Right)
    }
}

/// Formatting options for dimension labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelFormat {
    /// Decimal places shown for each distance.
    pub precision: usize,
    /// Unit suffix appended after the number.
    pub unit_suffix: String,
}

impl Default for LabelFormat {
    fn default() -> Self {
        Self {
            precision: constants::DEFAULT_LABEL_PRECISION,
            unit_suffix: constants::DEFAULT_UNIT_SUFFIX.to_string(),
        }
    }
}

impl LabelFormat {
    /// Formats one distance label, e.g. `Left: 85.0 ft`.
    pub fn format(&self, edge: EdgeSide, distance_ft: f64) -> String {
        format!(
            "{}: {} {}",
            edge.label(),
            format_feet(distance_ft, self.precision),
            self.unit_suffix
        )
    }
}

/// One dimension line in yard-space feet.
///
/// `start` sits on the object, `end` on the yard boundary; the label is
/// anchored at the line's midpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionLine {
    pub edge: EdgeSide,
    pub start: Point,
    pub end: Point,
    pub label_text: String,
    pub label_anchor: Point,
}

/// Full measurement annotation for one placed object.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectAnnotation {
    pub name: String,
    pub distances: EdgeDistances,
    /// The four dimension lines, in Left, Right, Front, Back order.
    pub lines: Vec<DimensionLine>,
}

impl ObjectAnnotation {
    /// Clearance distance for one edge of this annotation.
    pub fn distance_along(&self, edge: EdgeSide) -> f64 {
        match edge {
            EdgeSide::Left => self.distances.left,
            EdgeSide::Right => self.distances.right,
            EdgeSide::Front => self.distances.front,
            EdgeSide::Back => self.distances.back,
        }
    }
}

fn line(edge: EdgeSide, start: Point, end: Point, format: &LabelFormat, distance: f64) -> DimensionLine {
    let label_anchor = Point::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0);
    DimensionLine {
        edge,
        start,
        end,
        label_text: format.format(edge, distance),
        label_anchor,
    }
}

/// Builds the four dimension lines for a bounding box.
///
/// Endpoint policy: the horizontal (Left/Right) lines sit at the box's top
/// edge (larger y, nearer the back) and run from the box out to the yard
/// side. The vertical (Front/Back) lines sit at the box's left edge; the
/// front line drops from the box's bottom edge to y = 0, the back line runs
/// from y = left_depth down to the box's top edge.
pub fn dimension_lines(
    yard: &Yard,
    bbox: &BoundingBox,
    format: &LabelFormat,
) -> Result<Vec<DimensionLine>> {
    let d = edge_distances(yard, bbox)?;
    let top_y = bbox.max_y();

    Ok(vec![
        line(
            EdgeSide::Left,
            Point::new(bbox.x, top_y),
            Point::new(0.0, top_y),
            format,
            d.left,
        ),
        line(
            EdgeSide::Right,
            Point::new(bbox.max_x(), top_y),
            Point::new(yard.front_width, top_y),
            format,
            d.right,
        ),
        line(
            EdgeSide::Front,
            Point::new(bbox.x, bbox.y),
            Point::new(bbox.x, 0.0),
            format,
            d.front,
        ),
        line(
            EdgeSide::Back,
            Point::new(bbox.x, yard.left_depth),
            Point::new(bbox.x, top_y),
            format,
            d.back,
        ),
    ])
}

/// Annotates a single object.
pub fn annotate_object(
    yard: &Yard,
    obj: &PlacedObject,
    format: &LabelFormat,
) -> Result<ObjectAnnotation> {
    let bbox = obj.bounding_box();
    Ok(ObjectAnnotation {
        name: obj.name().to_string(),
        distances: edge_distances(yard, &bbox)?,
        lines: dimension_lines(yard, &bbox, format)?,
    })
}

/// Annotates every object in a layout, in z-order.
pub fn annotate_layout(layout: &Layout, format: &LabelFormat) -> Result<Vec<ObjectAnnotation>> {
    layout
        .objects()
        .iter()
        .map(|obj| annotate_object(layout.yard(), obj, format))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RectObject;

    fn shed_annotation() -> ObjectAnnotation {
        let yard = Yard::new(200.0, 300.0).unwrap();
        let shed = PlacedObject::Rect(RectObject::new("shed", 85.0, 145.0, 30.0, 10.0).unwrap());
        annotate_object(&yard, &shed, &LabelFormat::default()).unwrap()
    }

    #[test]
    fn test_label_text_default_format() {
        let a = shed_annotation();
        assert_eq!(a.lines[0].label_text, "Left: 85.0 ft");
        assert_eq!(a.lines[1].label_text, "Right: 85.0 ft");
        assert_eq!(a.lines[2].label_text, "Front: 145.0 ft");
        assert_eq!(a.lines[3].label_text, "Back: 145.0 ft");
    }

    #[test]
    fn test_label_format_options() {
        let format = LabelFormat {
            precision: 0,
            unit_suffix: "feet".to_string(),
        };
        assert_eq!(format.format(EdgeSide::Left, 85.0), "Left: 85 feet");
    }

    #[test]
    fn test_horizontal_lines_at_top_edge() {
        let a = shed_annotation();
        // Box top edge is y = 155; both horizontal lines sit on it.
        let left = &a.lines[0];
        assert_eq!(left.start, Point::new(85.0, 155.0));
        assert_eq!(left.end, Point::new(0.0, 155.0));

        let right = &a.lines[1];
        assert_eq!(right.start, Point::new(115.0, 155.0));
        assert_eq!(right.end, Point::new(200.0, 155.0));
    }

    #[test]
    fn test_vertical_lines_at_left_edge() {
        let a = shed_annotation();
        let front = &a.lines[2];
        assert_eq!(front.start, Point::new(85.0, 145.0));
        assert_eq!(front.end, Point::new(85.0, 0.0));

        let back = &a.lines[3];
        assert_eq!(back.start, Point::new(85.0, 300.0));
        assert_eq!(back.end, Point::new(85.0, 155.0));
    }

    #[test]
    fn test_label_anchored_at_midpoint() {
        let a = shed_annotation();
        assert_eq!(a.lines[0].label_anchor, Point::new(42.5, 155.0));
        assert_eq!(a.lines[2].label_anchor, Point::new(85.0, 72.5));
    }

    #[test]
    fn test_annotation_follows_rotation() {
        let yard = Yard::new(200.0, 300.0).unwrap();
        let mut shed = RectObject::new("shed", 85.0, 145.0, 30.0, 10.0).unwrap();
        shed.rotation = crate::model::Rotation::Deg90;
        let a = annotate_object(&yard, &PlacedObject::Rect(shed), &LabelFormat::default()).unwrap();

        // Rotated box: x in [95, 105], y in [135, 165].
        assert_eq!(a.distances.left, 95.0);
        assert_eq!(a.distances.right, 95.0);
        assert_eq!(a.distances.front, 135.0);
        assert_eq!(a.distances.back, 135.0);
        assert_eq!(a.lines[0].start, Point::new(95.0, 165.0));
    }
}
