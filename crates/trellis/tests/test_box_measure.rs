//! Measurement scenarios for the box container.

#[cfg(test)]
mod tests {
    use trellis::{
        BaselinePosition, Orientation, PackBox, Tree,
        geom::Rect,
        tutils::{SizedLeaf, WrappingLeaf},
    };

    #[test]
    fn along_axis_sums_children_padding_and_spacing() {
        let mut tree = Tree::new();
        let bx = tree.insert(PackBox::horizontal().with_spacing(5));
        let a = tree.insert(SizedLeaf::fixed(30, 10));
        let b = tree.insert(SizedLeaf::new(20, 40, 10, 10));
        PackBox::pack_start(&mut tree, bx, a, false, true, 3).unwrap();
        PackBox::pack_start(&mut tree, bx, b, false, true, 0).unwrap();

        let m = tree.measure(bx, Orientation::Horizontal, None);
        assert_eq!(m.minimum, 36 + 20 + 5);
        assert_eq!(m.natural, 36 + 40 + 5);
    }

    #[test]
    fn homogeneous_along_axis_multiplies_the_largest() {
        let mut tree = Tree::new();
        let bx = tree.insert(PackBox::horizontal().with_homogeneous(true).with_spacing(5));
        let a = tree.insert(SizedLeaf::fixed(10, 10));
        let b = tree.insert(SizedLeaf::fixed(30, 10));
        PackBox::pack_start(&mut tree, bx, a, false, true, 0).unwrap();
        PackBox::pack_start(&mut tree, bx, b, false, true, 0).unwrap();

        let m = tree.measure(bx, Orientation::Horizontal, None);
        assert_eq!(m.minimum, 30 * 2 + 5);
        assert_eq!(m.natural, 30 * 2 + 5);
    }

    #[test]
    fn across_axis_takes_the_tallest_child() {
        let mut tree = Tree::new();
        let bx = tree.insert(PackBox::horizontal());
        let a = tree.insert(SizedLeaf::fixed(10, 10));
        let b = tree.insert(SizedLeaf::new(10, 10, 15, 25));
        PackBox::pack_start(&mut tree, bx, a, false, true, 0).unwrap();
        PackBox::pack_start(&mut tree, bx, b, false, true, 0).unwrap();

        let m = tree.measure(bx, Orientation::Vertical, None);
        assert_eq!(m.minimum, 15);
        assert_eq!(m.natural, 25);
    }

    #[test]
    fn height_for_width_tracks_the_distributed_widths() {
        let mut tree = Tree::new();
        let bx = tree.insert(PackBox::horizontal());
        let wrap = tree.insert(WrappingLeaf::new(120, 10));
        PackBox::pack_start(&mut tree, bx, wrap, false, true, 0).unwrap();

        assert_eq!(tree.measure(bx, Orientation::Vertical, Some(120)).natural, 1);
        assert_eq!(tree.measure(bx, Orientation::Vertical, Some(60)).natural, 2);
        assert_eq!(tree.measure(bx, Orientation::Vertical, Some(40)).natural, 3);
    }

    #[test]
    fn dry_run_matches_allocation() {
        let mut tree = Tree::new();
        let bx = tree.insert(PackBox::horizontal().with_spacing(4));
        let label = tree.insert(SizedLeaf::fixed(20, 10));
        let wrap = tree.insert(WrappingLeaf::new(200, 10));
        PackBox::pack_start(&mut tree, bx, label, false, true, 0).unwrap();
        PackBox::pack_start(&mut tree, bx, wrap, true, true, 0).unwrap();

        // Budget 76 after spacing; the wrapping child grows toward natural
        // and ends at width 56, so the label's height dominates the request.
        let width = 80;
        let predicted = tree.measure(bx, Orientation::Vertical, Some(width));
        assert_eq!(predicted.natural, 10);
        tree.allocate(bx, Rect::new(0, 0, width, predicted.natural), None);
        assert_eq!(tree.allocation(label), Rect::new(0, 0, 20, 10));
        assert_eq!(tree.allocation(wrap), Rect::new(24, 0, 56, 10));
        // The wrapping child fits the predicted height at the width the dry
        // run chose for it.
        let wrap_w = tree.allocation(wrap).w;
        let d = 200i32 / wrap_w;
        let r = 200i32 % wrap_w;
        let div_ceil_200 = if (r > 0 && wrap_w > 0) || (r < 0 && wrap_w < 0) {
            d + 1
        } else {
            d
        };
        assert!(div_ceil_200 <= predicted.natural);
    }

    #[test]
    fn baseline_children_request_ascent_plus_descent() {
        let mut tree = Tree::new();
        let bx = tree.insert(PackBox::horizontal());
        let a = tree.insert(SizedLeaf::fixed(10, 10).with_baseline(8, 8));
        let b = tree.insert(SizedLeaf::new(10, 10, 12, 12).with_baseline(9, 9));
        PackBox::pack_start(&mut tree, bx, a, false, true, 0).unwrap();
        PackBox::pack_start(&mut tree, bx, b, false, true, 0).unwrap();
        tree.set_baseline_aligned(a, true);
        tree.set_baseline_aligned(b, true);

        // Tallest ascent 9 plus tallest descent 3.
        let m = tree.measure(bx, Orientation::Vertical, None);
        assert_eq!(m.minimum, 12);
        assert_eq!(m.minimum_baseline, Some(9));
    }

    #[test]
    fn baseline_position_places_the_row_in_extra_space() {
        for (position, expected) in [
            (BaselinePosition::Top, 9),
            (BaselinePosition::Center, 18),
            (BaselinePosition::Bottom, 27),
        ] {
            let mut tree = Tree::new();
            let bx = tree.insert(PackBox::horizontal().with_baseline_position(position));
            let text = tree.insert(SizedLeaf::new(10, 10, 12, 12).with_baseline(9, 9));
            let tall = tree.insert(SizedLeaf::fixed(10, 30));
            PackBox::pack_start(&mut tree, bx, text, false, true, 0).unwrap();
            PackBox::pack_start(&mut tree, bx, tall, false, true, 0).unwrap();
            tree.set_baseline_aligned(text, true);

            let m = tree.measure(bx, Orientation::Vertical, None);
            assert_eq!(m.minimum, 30);
            assert_eq!(m.minimum_baseline, Some(expected));
        }
    }

    #[test]
    fn allocation_computes_and_shares_the_baseline() {
        let mut tree = Tree::new();
        let bx = tree.insert(PackBox::horizontal());
        let a = tree.insert(SizedLeaf::fixed(10, 10).with_baseline(8, 8));
        let b = tree.insert(SizedLeaf::new(10, 10, 12, 12).with_baseline(9, 9));
        PackBox::pack_start(&mut tree, bx, a, false, true, 0).unwrap();
        PackBox::pack_start(&mut tree, bx, b, false, true, 0).unwrap();
        tree.set_baseline_aligned(a, true);
        tree.set_baseline_aligned(b, true);

        // Row needs 12; extra 18 splits evenly around it by default.
        tree.allocate(bx, Rect::new(0, 0, 40, 30), None);
        assert_eq!(tree.baseline(a), Some(18));
        assert_eq!(tree.baseline(b), Some(18));
    }

    #[test]
    fn parent_supplied_baseline_wins() {
        let mut tree = Tree::new();
        let bx = tree.insert(PackBox::horizontal());
        let a = tree.insert(SizedLeaf::fixed(10, 10).with_baseline(8, 8));
        PackBox::pack_start(&mut tree, bx, a, false, true, 0).unwrap();
        tree.set_baseline_aligned(a, true);

        tree.allocate(bx, Rect::new(0, 0, 40, 30), Some(5));
        assert_eq!(tree.baseline(a), Some(5));
    }

    #[test]
    fn vertical_boxes_carry_no_baseline() {
        let mut tree = Tree::new();
        let bx = tree.insert(PackBox::vertical());
        let a = tree.insert(SizedLeaf::fixed(10, 10).with_baseline(8, 8));
        PackBox::pack_start(&mut tree, bx, a, false, true, 0).unwrap();
        tree.set_baseline_aligned(a, true);

        tree.allocate(bx, Rect::new(0, 0, 20, 40), Some(5));
        assert_eq!(tree.baseline(a), None);
    }
}
