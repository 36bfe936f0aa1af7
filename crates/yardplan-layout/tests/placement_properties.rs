//! Placement invariant property tests

use proptest::prelude::*;

use yardplan_layout::{edge_distances, Layout, PlacedObject, RectObject, Yard};

proptest! {
    /// Invariant: opposing distances plus the footprint span the yard
    /// exactly, wherever the box sits.
    #[test]
    fn distances_sum_to_yard_dimensions(
        x in 0.0f64..170.0,
        y in 0.0f64..290.0,
    ) {
        let yard = Yard::new(200.0, 300.0).unwrap();
        let rect = RectObject::new("shed", x, y, 30.0, 10.0).unwrap();
        let d = edge_distances(&yard, &rect.bounding_box()).unwrap();

        prop_assert!((d.left + d.right + 30.0 - yard.front_width).abs() < 1e-9);
        prop_assert!((d.front + d.back + 10.0 - yard.left_depth).abs() < 1e-9);
    }

    /// Invariant: the sum property also holds for the swapped footprint of
    /// a rotated box.
    #[test]
    fn rotated_distances_sum_to_yard_dimensions(
        x in 50.0f64..120.0,
        y in 50.0f64..220.0,
        w in 1.0f64..40.0,
        h in 1.0f64..40.0,
    ) {
        let yard = Yard::new(200.0, 300.0).unwrap();
        let mut rect = RectObject::new("shed", x, y, w, h).unwrap();
        rect.rotation = yardplan_layout::Rotation::Deg90;
        let bbox = rect.bounding_box();
        let d = edge_distances(&yard, &bbox).unwrap();

        prop_assert!((d.left + d.right + bbox.width - yard.front_width).abs() < 1e-9);
        prop_assert!((d.front + d.back + bbox.height - yard.left_depth).abs() < 1e-9);
    }

    /// Invariant: four quarter turns land exactly back on the start, and
    /// every intermediate state is accepted for a comfortably interior box.
    #[test]
    fn four_quarter_turns_are_identity(
        x in 50.0f64..100.0,
        y in 50.0f64..100.0,
        w in 1.0f64..40.0,
        h in 1.0f64..40.0,
    ) {
        let mut layout = Layout::new(Yard::new(200.0, 300.0).unwrap());
        layout
            .add_object(PlacedObject::Rect(RectObject::new("shed", x, y, w, h).unwrap()))
            .unwrap();
        let before = layout.clone();

        for _ in 0..4 {
            layout.rotate_object("shed", 90).unwrap();
        }
        prop_assert_eq!(layout, before);
    }

    /// Invariant: the store accepts a placement exactly when its rounded
    /// footprint measures inside on all four edges.
    #[test]
    fn acceptance_matches_measurement(
        x in -50.0f64..250.0,
        y in -50.0f64..350.0,
    ) {
        let yard = Yard::new(200.0, 300.0).unwrap();
        let obj = PlacedObject::Rect(RectObject::new("shed", x, y, 30.0, 10.0).unwrap());
        let d = edge_distances(&yard, &obj.clone().rounded().bounding_box()).unwrap();

        let mut layout = Layout::new(yard);
        let accepted = layout.add_object(obj).is_ok();
        prop_assert_eq!(accepted, d.all_inside());
    }

    /// Invariant: a rejected mutation never dirties the store.
    #[test]
    fn rejected_moves_leave_store_unchanged(
        x in 150.0f64..400.0,
        y in 250.0f64..500.0,
    ) {
        let mut layout = Layout::new(Yard::new(200.0, 300.0).unwrap());
        layout
            .add_object(PlacedObject::Rect(RectObject::new("shed", 10.0, 10.0, 60.0, 60.0).unwrap()))
            .unwrap();
        let before = layout.clone();

        if layout.move_object("shed", x, y).is_err() {
            prop_assert_eq!(layout, before);
        }
    }
}
