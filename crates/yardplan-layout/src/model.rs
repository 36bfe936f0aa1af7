//! Geometry model for yard layouts.
//!
//! All coordinates are yard-space feet: the yard occupies the rectangle
//! `[0, front_width] x [0, left_depth]` with the origin at the front-left
//! corner and y increasing toward the back of the property. Everything here
//! is pure computation; rendering and persistence live elsewhere.

use std::fmt;

use yardplan_core::{round_position, GeometryError, Result};

/// A point in yard-space feet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The property boundary rectangle.
///
/// `front_width` runs along the front (street-facing) edge, `left_depth`
/// along the left side. Both must be positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Yard {
    pub front_width: f64,
    pub left_depth: f64,
}

impl Yard {
    /// Creates a yard, rejecting non-positive or non-finite dimensions.
    pub fn new(front_width: f64, left_depth: f64) -> Result<Self> {
        if !front_width.is_finite() {
            return Err(GeometryError::NonFiniteCoordinate {
                what: "yard front_width".to_string(),
                value: front_width,
            }
            .into());
        }
        if !left_depth.is_finite() {
            return Err(GeometryError::NonFiniteCoordinate {
                what: "yard left_depth".to_string(),
                value: left_depth,
            }
            .into());
        }
        if front_width <= 0.0 || left_depth <= 0.0 {
            return Err(GeometryError::NonPositiveYard {
                front_width,
                left_depth,
            }
            .into());
        }
        Ok(Self {
            front_width,
            left_depth,
        })
    }
}

/// Quarter-turn rotation applied to a rectangle object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// The rotation as whole degrees (0, 90, 180, or 270).
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Parses exact degree values; anything but 0/90/180/270 is rejected.
    pub fn from_degrees(degrees: i32) -> Result<Self> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            _ => Err(GeometryError::InvalidRotation { degrees }.into()),
        }
    }

    /// One quarter turn clockwise.
    pub fn turned_cw(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    /// Applies a delta given in degrees. The delta must be a multiple of
    /// 90; it may be negative or wrap past a full turn.
    pub fn turned_by(self, delta_degrees: i32) -> Result<Self> {
        if delta_degrees % 90 != 0 {
            return Err(GeometryError::InvalidRotation {
                degrees: delta_degrees,
            }
            .into());
        }
        let turns = (delta_degrees / 90).rem_euclid(4);
        let mut rotation = self;
        for _ in 0..turns {
            rotation = rotation.turned_cw();
        }
        Ok(rotation)
    }

    /// True when the rotation swaps the width and height axes (90 or 270).
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Axis-aligned bounding box in yard-space feet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate.
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Back edge y coordinate.
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// A rectangular structure placed on the yard (house, shed, septic tank).
///
/// `x`, `y` anchor the unrotated front-left corner; `width` and `height`
/// are the unrotated dimensions. Rotation swaps the drawn axes about the
/// rectangle's center without moving that center, so the stored fields
/// always describe the 0° footprint.
#[derive(Debug, Clone, PartialEq)]
pub struct RectObject {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: Rotation,
}

impl RectObject {
    /// Creates an unrotated rectangle object, validating its numbers.
    pub fn new(name: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        let obj = Self {
            name: name.into(),
            x,
            y,
            width,
            height,
            rotation: Rotation::Deg0,
        };
        obj.validate_fields()?;
        Ok(obj)
    }

    fn validate_fields(&self) -> Result<()> {
        for (what, value) in [("x", self.x), ("y", self.y)] {
            if !value.is_finite() {
                return Err(GeometryError::NonFiniteCoordinate {
                    what: format!("'{}' {}", self.name, what),
                    value,
                }
                .into());
            }
        }
        for (what, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() {
                return Err(GeometryError::NonFiniteCoordinate {
                    what: format!("'{}' {}", self.name, what),
                    value,
                }
                .into());
            }
            if value <= 0.0 {
                return Err(GeometryError::NonPositiveSize {
                    what: format!("'{}' {}", self.name, what),
                    value,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Post-rotation axis-aligned bounding box.
    ///
    /// At 90°/270° the width and height swap about the rectangle's center:
    /// the apparent center never moves under rotation.
    pub fn bounding_box(&self) -> BoundingBox {
        if self.rotation.swaps_axes() {
            let cx = self.x + self.width / 2.0;
            let cy = self.y + self.height / 2.0;
            BoundingBox::new(
                cx - self.height / 2.0,
                cy - self.width / 2.0,
                self.height,
                self.width,
            )
        } else {
            BoundingBox::new(self.x, self.y, self.width, self.height)
        }
    }
}

/// A point-like feature with no footprint (well head, stake).
///
/// `radius` is a drawing radius only; the bounding box used for distance
/// computation is the zero-size box at (`x`, `y`).
#[derive(Debug, Clone, PartialEq)]
pub struct PointMarker {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl PointMarker {
    /// Creates a point marker, validating its numbers.
    pub fn new(name: impl Into<String>, x: f64, y: f64, radius: f64) -> Result<Self> {
        let marker = Self {
            name: name.into(),
            x,
            y,
            radius,
        };
        marker.validate_fields()?;
        Ok(marker)
    }

    fn validate_fields(&self) -> Result<()> {
        for (what, value) in [("x", self.x), ("y", self.y)] {
            if !value.is_finite() {
                return Err(GeometryError::NonFiniteCoordinate {
                    what: format!("'{}' {}", self.name, what),
                    value,
                }
                .into());
            }
        }
        if !self.radius.is_finite() {
            return Err(GeometryError::NonFiniteCoordinate {
                what: format!("'{}' radius", self.name),
                value: self.radius,
            }
            .into());
        }
        if self.radius <= 0.0 {
            return Err(GeometryError::NonPositiveSize {
                what: format!("'{}' radius", self.name),
                value: self.radius,
            }
            .into());
        }
        Ok(())
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, 0.0, 0.0)
    }
}

/// Anything that can be placed on a layout.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacedObject {
    Rect(RectObject),
    Point(PointMarker),
}

impl PlacedObject {
    pub fn name(&self) -> &str {
        match self {
            PlacedObject::Rect(o) => &o.name,
            PlacedObject::Point(o) => &o.name,
        }
    }

    /// The stored anchor position in yard-space feet.
    pub fn position(&self) -> Point {
        match self {
            PlacedObject::Rect(o) => Point::new(o.x, o.y),
            PlacedObject::Point(o) => Point::new(o.x, o.y),
        }
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        match self {
            PlacedObject::Rect(o) => {
                o.x = x;
                o.y = y;
            }
            PlacedObject::Point(o) => {
                o.x = x;
                o.y = y;
            }
        }
    }

    /// Post-rotation axis-aligned bounding box.
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            PlacedObject::Rect(o) => o.bounding_box(),
            PlacedObject::Point(o) => o.bounding_box(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            PlacedObject::Rect(_) => "rectangle",
            PlacedObject::Point(_) => "point",
        }
    }

    /// Rounds every stored length to the two-decimal grid kept on disk.
    pub fn rounded(mut self) -> Self {
        match &mut self {
            PlacedObject::Rect(o) => {
                o.x = round_position(o.x);
                o.y = round_position(o.y);
                o.width = round_position(o.width);
                o.height = round_position(o.height);
            }
            PlacedObject::Point(o) => {
                o.x = round_position(o.x);
                o.y = round_position(o.y);
                o.radius = round_position(o.radius);
            }
        }
        self
    }

    pub(crate) fn validate_fields(&self) -> Result<()> {
        match self {
            PlacedObject::Rect(o) => o.validate_fields(),
            PlacedObject::Point(o) => o.validate_fields(),
        }
    }
}

impl fmt::Display for PlacedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacedObject::Rect(o) => write!(
                f,
                "{}: {:.1} x {:.1} ft at ({:.1}, {:.1}), {}",
                o.name, o.width, o.height, o.x, o.y, o.rotation
            ),
            PlacedObject::Point(o) => {
                write!(f, "{}: point at ({:.1}, {:.1})", o.name, o.x, o.y)
            }
        }
    }
}

/// Distances from an object's bounding box to the four yard edges, in feet.
///
/// Derived values; never stored. All four are non-negative exactly when the
/// object lies inside the yard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDistances {
    pub left: f64,
    pub right: f64,
    pub front: f64,
    pub back: f64,
}

impl EdgeDistances {
    /// True when the measured object sits entirely inside the yard.
    pub fn all_inside(&self) -> bool {
        self.left >= 0.0 && self.right >= 0.0 && self.front >= 0.0 && self.back >= 0.0
    }
}

/// Computes the four nearest-edge distances for a bounding box.
///
/// A negative component means the box crosses that yard edge; callers
/// treat that as a placement violation, never clamp it.
pub fn edge_distances(yard: &Yard, bbox: &BoundingBox) -> Result<EdgeDistances> {
    if yard.front_width <= 0.0 || yard.left_depth <= 0.0 {
        return Err(GeometryError::NonPositiveYard {
            front_width: yard.front_width,
            left_depth: yard.left_depth,
        }
        .into());
    }
    if !bbox.is_finite() {
        return Err(GeometryError::NonFiniteCoordinate {
            what: "bounding box".to_string(),
            value: f64::NAN,
        }
        .into());
    }

    Ok(EdgeDistances {
        left: bbox.x,
        right: yard.front_width - bbox.max_x(),
        front: bbox.y,
        back: yard.left_depth - bbox.max_y(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yard_rejects_bad_dimensions() {
        assert!(Yard::new(200.0, 300.0).is_ok());
        assert!(Yard::new(0.0, 300.0).is_err());
        assert!(Yard::new(200.0, -1.0).is_err());
        assert!(Yard::new(f64::NAN, 300.0).is_err());
    }

    #[test]
    fn test_rotation_degrees() {
        assert_eq!(Rotation::from_degrees(90).unwrap(), Rotation::Deg90);
        assert_eq!(Rotation::from_degrees(270).unwrap(), Rotation::Deg270);
        assert!(Rotation::from_degrees(45).is_err());
        assert!(Rotation::from_degrees(360).is_err());
    }

    #[test]
    fn test_rotation_turned_by() {
        assert_eq!(Rotation::Deg0.turned_by(90).unwrap(), Rotation::Deg90);
        assert_eq!(Rotation::Deg0.turned_by(-90).unwrap(), Rotation::Deg270);
        assert_eq!(Rotation::Deg180.turned_by(450).unwrap(), Rotation::Deg270);
        assert_eq!(
            Rotation::Deg0.turned_by(90).unwrap().turned_by(90).unwrap(),
            Rotation::Deg0.turned_by(180).unwrap()
        );
        assert!(Rotation::Deg0.turned_by(30).is_err());
    }

    #[test]
    fn test_unrotated_bounding_box() {
        let shed = RectObject::new("shed", 85.0, 145.0, 30.0, 10.0).unwrap();
        let bbox = shed.bounding_box();
        assert_eq!(bbox.x, 85.0);
        assert_eq!(bbox.y, 145.0);
        assert_eq!(bbox.width, 30.0);
        assert_eq!(bbox.height, 10.0);
    }

    #[test]
    fn test_rotated_bounding_box_preserves_center() {
        let mut shed = RectObject::new("shed", 85.0, 145.0, 30.0, 10.0).unwrap();
        let center_before = shed.bounding_box().center();

        shed.rotation = Rotation::Deg90;
        let bbox = shed.bounding_box();
        assert_eq!(bbox.width, 10.0);
        assert_eq!(bbox.height, 30.0);

        let center_after = bbox.center();
        assert_eq!(center_before, center_after);
    }

    #[test]
    fn test_half_turn_bounding_box_unchanged() {
        let mut shed = RectObject::new("shed", 85.0, 145.0, 30.0, 10.0).unwrap();
        let before = shed.bounding_box();
        shed.rotation = Rotation::Deg180;
        assert_eq!(shed.bounding_box(), before);
    }

    #[test]
    fn test_point_marker_zero_size_box() {
        let well = PointMarker::new("well", 12.0, 250.0, 2.0).unwrap();
        let bbox = well.bounding_box();
        assert_eq!(bbox.width, 0.0);
        assert_eq!(bbox.height, 0.0);
        assert_eq!(bbox.x, 12.0);
        assert_eq!(bbox.y, 250.0);
    }

    #[test]
    fn test_edge_distances_reference_positions() {
        let yard = Yard::new(200.0, 300.0).unwrap();

        let shed = RectObject::new("shed", 85.0, 145.0, 30.0, 10.0).unwrap();
        let d = edge_distances(&yard, &shed.bounding_box()).unwrap();
        assert_eq!(d.left, 85.0);
        assert_eq!(d.right, 85.0);
        assert_eq!(d.front, 145.0);
        assert_eq!(d.back, 145.0);

        let shed = RectObject::new("shed", 0.0, 210.0, 30.0, 10.0).unwrap();
        let d = edge_distances(&yard, &shed.bounding_box()).unwrap();
        assert_eq!(d.left, 0.0);
        assert_eq!(d.right, 170.0);
        assert_eq!(d.front, 210.0);
        assert_eq!(d.back, 80.0);

        let shed = RectObject::new("shed", 170.0, 0.0, 30.0, 10.0).unwrap();
        let d = edge_distances(&yard, &shed.bounding_box()).unwrap();
        assert_eq!(d.left, 170.0);
        assert_eq!(d.right, 0.0);
        assert_eq!(d.front, 0.0);
        assert_eq!(d.back, 290.0);
    }

    #[test]
    fn test_edge_distances_sum_to_yard_dimensions() {
        let yard = Yard::new(200.0, 300.0).unwrap();
        let shed = RectObject::new("shed", 42.5, 17.25, 30.0, 10.0).unwrap();
        let bbox = shed.bounding_box();
        let d = edge_distances(&yard, &bbox).unwrap();

        assert!((d.left + d.right + bbox.width - yard.front_width).abs() < 1e-9);
        assert!((d.front + d.back + bbox.height - yard.left_depth).abs() < 1e-9);
    }

    #[test]
    fn test_edge_distances_negative_outside() {
        let yard = Yard::new(200.0, 300.0).unwrap();
        let shed = RectObject::new("shed", 180.0, 10.0, 30.0, 10.0).unwrap();
        let d = edge_distances(&yard, &shed.bounding_box()).unwrap();
        assert_eq!(d.right, -10.0);
        assert!(!d.all_inside());
    }

    #[test]
    fn test_rect_object_validation() {
        assert!(RectObject::new("shed", 0.0, 0.0, 30.0, 10.0).is_ok());
        assert!(RectObject::new("shed", 0.0, 0.0, 0.0, 10.0).is_err());
        assert!(RectObject::new("shed", f64::NAN, 0.0, 30.0, 10.0).is_err());
        assert!(PointMarker::new("well", 5.0, 5.0, -1.0).is_err());
    }

    #[test]
    fn test_display_formats() {
        let mut shed = RectObject::new("shed", 85.0, 145.0, 30.0, 10.0).unwrap();
        shed.rotation = Rotation::Deg90;
        let obj = PlacedObject::Rect(shed);
        assert_eq!(
            obj.to_string(),
            "shed: 30.0 x 10.0 ft at (85.0, 145.0), 90°"
        );

        let well = PlacedObject::Point(PointMarker::new("well", 12.0, 250.0, 2.0).unwrap());
        assert_eq!(well.to_string(), "well: point at (12.0, 250.0)");
    }
}
