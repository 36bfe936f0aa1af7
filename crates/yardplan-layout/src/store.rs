//! In-memory layout store.
//!
//! A [`Layout`] owns the yard and an ordered list of placed objects; the
//! order is insertion order and doubles as the drawing z-order. Every
//! mutation validates a candidate first and commits only on success, so a
//! rejected operation leaves the layout exactly as it was.

use std::cmp::Ordering;

use yardplan_core::{round_position, Error, PlacementError, Result};

use crate::model::{edge_distances, EdgeDistances, PlacedObject, Rotation, Yard};

/// A yard plus the objects placed on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    yard: Yard,
    objects: Vec<PlacedObject>,
}

impl Layout {
    /// Creates an empty layout for the given yard.
    pub fn new(yard: Yard) -> Self {
        Self {
            yard,
            objects: Vec::new(),
        }
    }

    /// Builds a layout from a yard and a pre-ordered object list,
    /// enforcing the same rules as incremental insertion. Used when
    /// loading a saved layout.
    pub fn with_objects(yard: Yard, objects: Vec<PlacedObject>) -> Result<Self> {
        let mut layout = Self::new(yard);
        for obj in objects {
            layout.add_object(obj)?;
        }
        Ok(layout)
    }

    pub fn yard(&self) -> &Yard {
        &self.yard
    }

    /// Objects in z-order (insertion order).
    pub fn objects(&self) -> &[PlacedObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Looks up an object by its unique name.
    pub fn get(&self, name: &str) -> Option<&PlacedObject> {
        self.objects.iter().find(|o| o.name() == name)
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.objects.iter().position(|o| o.name() == name)
    }

    /// Adds an object at the end of the z-order.
    ///
    /// Rejects duplicate names and placements whose post-rotation bounding
    /// box crosses a yard edge.
    pub fn add_object(&mut self, obj: PlacedObject) -> Result<()> {
        let obj = obj.rounded();
        obj.validate_fields()?;
        if self.get(obj.name()).is_some() {
            return Err(PlacementError::DuplicateName {
                name: obj.name().to_string(),
            }
            .into());
        }
        check_bounds(&self.yard, &obj)?;
        self.objects.push(obj);
        Ok(())
    }

    /// Removes an object by name, returning it.
    pub fn remove_object(&mut self, name: &str) -> Result<PlacedObject> {
        match self.index_of(name) {
            Some(idx) => Ok(self.objects.remove(idx)),
            None => Err(PlacementError::NotFound {
                name: name.to_string(),
            }
            .into()),
        }
    }

    /// Moves an object's anchor to (`x`, `y`) feet.
    pub fn move_object(&mut self, name: &str, x: f64, y: f64) -> Result<()> {
        let idx = self.index_of(name).ok_or_else(|| PlacementError::NotFound {
            name: name.to_string(),
        })?;
        let mut candidate = self.objects[idx].clone();
        candidate.set_position(round_position(x), round_position(y));
        candidate.validate_fields()?;
        check_bounds(&self.yard, &candidate)?;
        self.objects[idx] = candidate;
        Ok(())
    }

    /// Rotates a rectangle object by a multiple of 90 degrees.
    ///
    /// Point markers are rotation-invariant; the delta is still validated
    /// so a bad increment is reported either way.
    pub fn rotate_object(&mut self, name: &str, delta_degrees: i32) -> Result<()> {
        let idx = self.index_of(name).ok_or_else(|| PlacementError::NotFound {
            name: name.to_string(),
        })?;
        let mut candidate = self.objects[idx].clone();
        match &mut candidate {
            PlacedObject::Rect(o) => {
                o.rotation = o.rotation.turned_by(delta_degrees)?;
            }
            PlacedObject::Point(_) => {
                Rotation::Deg0.turned_by(delta_degrees)?;
                return Ok(());
            }
        }
        check_bounds(&self.yard, &candidate)?;
        self.objects[idx] = candidate;
        Ok(())
    }

    /// Changes a rectangle object's unrotated dimensions.
    pub fn resize_object(&mut self, name: &str, width: f64, height: f64) -> Result<()> {
        let idx = self.index_of(name).ok_or_else(|| PlacementError::NotFound {
            name: name.to_string(),
        })?;
        let mut candidate = self.objects[idx].clone();
        match &mut candidate {
            PlacedObject::Rect(o) => {
                o.width = round_position(width);
                o.height = round_position(height);
            }
            PlacedObject::Point(o) => {
                return Err(Error::other(format!(
                    "'{}' is a point marker; use resize_marker to change its radius",
                    o.name
                )));
            }
        }
        candidate.validate_fields()?;
        check_bounds(&self.yard, &candidate)?;
        self.objects[idx] = candidate;
        Ok(())
    }

    /// Changes a point marker's drawing radius.
    pub fn resize_marker(&mut self, name: &str, radius: f64) -> Result<()> {
        let idx = self.index_of(name).ok_or_else(|| PlacementError::NotFound {
            name: name.to_string(),
        })?;
        let mut candidate = self.objects[idx].clone();
        match &mut candidate {
            PlacedObject::Point(o) => {
                o.radius = round_position(radius);
            }
            PlacedObject::Rect(o) => {
                return Err(Error::other(format!(
                    "'{}' is a rectangle; use resize_object to change its dimensions",
                    o.name
                )));
            }
        }
        candidate.validate_fields()?;
        self.objects[idx] = candidate;
        Ok(())
    }

    /// Changes the yard dimensions.
    ///
    /// Every placed object is re-validated against the new boundary; if any
    /// would fall outside, the resize is rejected and nothing changes.
    pub fn resize_yard(&mut self, front_width: f64, left_depth: f64) -> Result<()> {
        let new_yard = Yard::new(front_width, left_depth)?;
        for obj in &self.objects {
            check_bounds(&new_yard, obj)?;
        }
        self.yard = new_yard;
        Ok(())
    }

    /// Nearest-edge distances for one object.
    pub fn distances(&self, name: &str) -> Result<EdgeDistances> {
        let obj = self.get(name).ok_or_else(|| PlacementError::NotFound {
            name: name.to_string(),
        })?;
        edge_distances(&self.yard, &obj.bounding_box())
    }
}

/// Rejects an object whose bounding box crosses a yard edge, naming the
/// most-crossed edge in the error.
fn check_bounds(yard: &Yard, obj: &PlacedObject) -> Result<()> {
    let d = edge_distances(yard, &obj.bounding_box())?;
    let worst = [
        ("left", d.left),
        ("right", d.right),
        ("front", d.front),
        ("back", d.back),
    ]
    .into_iter()
    .filter(|(_, v)| *v < 0.0)
    .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    if let Some((edge, v)) = worst {
        return Err(PlacementError::OutOfBounds {
            name: obj.name().to_string(),
            edge: edge.to_string(),
            by_ft: -v,
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PointMarker, RectObject};

    fn sample_layout() -> Layout {
        let yard = Yard::new(200.0, 300.0).unwrap();
        let mut layout = Layout::new(yard);
        layout
            .add_object(PlacedObject::Rect(
                RectObject::new("shed", 85.0, 145.0, 30.0, 10.0).unwrap(),
            ))
            .unwrap();
        layout
            .add_object(PlacedObject::Point(
                PointMarker::new("well", 12.0, 250.0, 2.0).unwrap(),
            ))
            .unwrap();
        layout
    }

    #[test]
    fn test_add_and_lookup() {
        let layout = sample_layout();
        assert_eq!(layout.len(), 2);
        assert!(layout.get("shed").is_some());
        assert!(layout.get("barn").is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut layout = sample_layout();
        let before = layout.clone();
        let err = layout
            .add_object(PlacedObject::Rect(
                RectObject::new("shed", 10.0, 10.0, 5.0, 5.0).unwrap(),
            ))
            .unwrap_err();
        assert!(err.is_duplicate_name());
        assert_eq!(layout, before);
    }

    #[test]
    fn test_out_of_bounds_add_rejected() {
        let mut layout = sample_layout();
        let before = layout.clone();
        let err = layout
            .add_object(PlacedObject::Rect(
                RectObject::new("barn", 180.0, 10.0, 30.0, 10.0).unwrap(),
            ))
            .unwrap_err();
        assert!(err.is_out_of_bounds());
        assert!(err.is_recoverable());
        assert_eq!(layout, before);
    }

    #[test]
    fn test_move_validates_bounds() {
        let mut layout = sample_layout();
        layout.move_object("shed", 0.0, 210.0).unwrap();
        let d = layout.distances("shed").unwrap();
        assert_eq!(d.left, 0.0);
        assert_eq!(d.back, 80.0);

        let before = layout.clone();
        let err = layout.move_object("shed", 190.0, 0.0).unwrap_err();
        assert!(err.is_out_of_bounds());
        assert_eq!(layout, before);
    }

    #[test]
    fn test_move_rounds_to_two_decimals() {
        let mut layout = sample_layout();
        layout.move_object("shed", 85.12345, 145.6789).unwrap();
        let pos = layout.get("shed").unwrap().position();
        assert_eq!(pos.x, 85.12);
        assert_eq!(pos.y, 145.68);
    }

    #[test]
    fn test_rotate_near_edge_rejected() {
        let yard = Yard::new(200.0, 300.0).unwrap();
        let mut layout = Layout::new(yard);
        // Tall rectangle hugging the back edge: rotating swaps the axes
        // about its center and pushes the box past the boundary.
        layout
            .add_object(PlacedObject::Rect(
                RectObject::new("shed", 100.0, 295.0, 30.0, 4.0).unwrap(),
            ))
            .unwrap();
        let before = layout.clone();
        let err = layout.rotate_object("shed", 90).unwrap_err();
        assert!(err.is_out_of_bounds());
        assert_eq!(layout, before);
    }

    #[test]
    fn test_rotate_full_cycle_restores_box() {
        let mut layout = sample_layout();
        let before = layout.get("shed").unwrap().bounding_box();
        for _ in 0..4 {
            layout.rotate_object("shed", 90).unwrap();
        }
        assert_eq!(layout.get("shed").unwrap().bounding_box(), before);
    }

    #[test]
    fn test_rotate_point_is_noop() {
        let mut layout = sample_layout();
        let before = layout.clone();
        layout.rotate_object("well", 90).unwrap();
        assert_eq!(layout, before);

        let err = layout.rotate_object("well", 45).unwrap_err();
        assert!(err.is_geometry_error());
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_remove_object() {
        let mut layout = sample_layout();
        let removed = layout.remove_object("well").unwrap();
        assert_eq!(removed.name(), "well");
        assert_eq!(layout.len(), 1);

        let err = layout.remove_object("well").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_resize_object_validates() {
        let mut layout = sample_layout();
        layout.resize_object("shed", 40.0, 12.0).unwrap();
        let d = layout.distances("shed").unwrap();
        assert_eq!(d.right, 200.0 - (85.0 + 40.0));

        let before = layout.clone();
        assert!(layout.resize_object("shed", 500.0, 12.0).is_err());
        assert_eq!(layout, before);
    }

    #[test]
    fn test_resize_yard_rejects_stranded_objects() {
        let mut layout = sample_layout();
        // Shed occupies x in [85, 115], y in [145, 155].
        let before = layout.clone();
        let err = layout.resize_yard(100.0, 300.0).unwrap_err();
        assert!(err.is_out_of_bounds());
        assert_eq!(layout, before);

        layout.resize_yard(150.0, 300.0).unwrap();
        assert_eq!(layout.yard().front_width, 150.0);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let layout = sample_layout();
        let names: Vec<&str> = layout.objects().iter().map(|o| o.name()).collect();
        assert_eq!(names, vec!["shed", "well"]);
    }
}
