//! Allocation scenarios for the box container.

#[cfg(test)]
mod tests {
    use trellis::{
        Orientation, PackBox, TextDirection, Tree,
        geom::Rect,
        tutils::SizedLeaf,
    };

    /// Build a horizontal box with the given children already packed.
    fn hbox(tree: &mut Tree) -> trellis::WidgetId {
        tree.insert(PackBox::horizontal())
    }

    #[test]
    fn expansion_splits_leftover() {
        let mut tree = Tree::new();
        let bx = hbox(&mut tree);
        let a = tree.insert(SizedLeaf::fixed(20, 10));
        let b = tree.insert(SizedLeaf::fixed(20, 10));
        PackBox::pack_start(&mut tree, bx, a, false, true, 0).unwrap();
        PackBox::pack_start(&mut tree, bx, b, true, true, 0).unwrap();

        tree.allocate(bx, Rect::new(0, 0, 100, 10), None);
        assert_eq!(tree.allocation(a), Rect::new(0, 0, 20, 10));
        assert_eq!(tree.allocation(b), Rect::new(20, 0, 80, 10));
    }

    #[test]
    fn expansion_remainder_goes_to_earliest() {
        let mut tree = Tree::new();
        let bx = hbox(&mut tree);
        let kids: Vec<_> = (0..3)
            .map(|_| tree.insert(SizedLeaf::fixed(10, 10)))
            .collect();
        for child in &kids {
            PackBox::pack_start(&mut tree, bx, *child, true, true, 0).unwrap();
        }

        // 70 leftover over 3 expanders: 24, 23, 23.
        tree.allocate(bx, Rect::new(0, 0, 100, 10), None);
        assert_eq!(tree.allocation(kids[0]).w, 34);
        assert_eq!(tree.allocation(kids[1]).w, 33);
        assert_eq!(tree.allocation(kids[2]).w, 33);
        assert_eq!(tree.allocation(kids[1]).tl.x, 34);
        assert_eq!(tree.allocation(kids[2]).tl.x, 67);
    }

    #[test]
    fn homogeneous_shares_with_pixel_remainder() {
        let mut tree = Tree::new();
        let bx = tree.insert(PackBox::horizontal().with_homogeneous(true));
        let kids: Vec<_> = (0..3)
            .map(|_| tree.insert(SizedLeaf::fixed(10, 10)))
            .collect();
        for child in &kids {
            PackBox::pack_start(&mut tree, bx, *child, false, true, 0).unwrap();
        }

        tree.allocate(bx, Rect::new(0, 0, 100, 10), None);
        let widths: Vec<i32> = kids.iter().map(|c| tree.allocation(*c).w).collect();
        assert_eq!(widths, vec![34, 33, 33]);
        for child in &kids {
            assert!(tree.allocation(*child).w >= 10);
        }
    }

    #[test]
    fn spacing_sits_between_children_only() {
        let mut tree = Tree::new();
        let bx = tree.insert(PackBox::horizontal().with_spacing(5));
        let a = tree.insert(SizedLeaf::fixed(20, 10));
        let b = tree.insert(SizedLeaf::fixed(20, 10));
        PackBox::pack_start(&mut tree, bx, a, false, true, 0).unwrap();
        PackBox::pack_start(&mut tree, bx, b, false, true, 0).unwrap();

        tree.allocate(bx, Rect::new(0, 0, 45, 10), None);
        assert_eq!(tree.allocation(a), Rect::new(0, 0, 20, 10));
        assert_eq!(tree.allocation(b), Rect::new(25, 0, 20, 10));
    }

    #[test]
    fn padding_insets_the_slot() {
        let mut tree = Tree::new();
        let bx = hbox(&mut tree);
        let a = tree.insert(SizedLeaf::fixed(20, 10));
        PackBox::pack_start(&mut tree, bx, a, false, true, 3).unwrap();

        tree.allocate(bx, Rect::new(0, 0, 26, 10), None);
        assert_eq!(tree.allocation(a), Rect::new(3, 0, 20, 10));
    }

    #[test]
    fn unfilled_child_centers_in_its_slot() {
        let mut tree = Tree::new();
        let bx = hbox(&mut tree);
        let a = tree.insert(SizedLeaf::fixed(20, 10));
        PackBox::pack_start(&mut tree, bx, a, true, false, 0).unwrap();

        tree.allocate(bx, Rect::new(0, 0, 100, 10), None);
        // The slot is the whole box; the child keeps its size, centered.
        assert_eq!(tree.allocation(a), Rect::new(40, 0, 20, 10));
    }

    #[test]
    fn end_packed_children_stack_from_the_trailing_edge() {
        let mut tree = Tree::new();
        let bx = hbox(&mut tree);
        let a = tree.insert(SizedLeaf::fixed(10, 10));
        let b = tree.insert(SizedLeaf::fixed(10, 10));
        PackBox::pack_end(&mut tree, bx, a, false, true, 0).unwrap();
        PackBox::pack_end(&mut tree, bx, b, false, true, 0).unwrap();

        tree.allocate(bx, Rect::new(0, 0, 100, 10), None);
        // First end-packed child sits at the trailing edge, the second
        // immediately inward of it.
        assert_eq!(tree.allocation(a), Rect::new(90, 0, 10, 10));
        assert_eq!(tree.allocation(b), Rect::new(80, 0, 10, 10));
    }

    #[test]
    fn rtl_mirrors_about_the_center() {
        let mut tree = Tree::new();
        let bx = hbox(&mut tree);
        let a = tree.insert(SizedLeaf::fixed(30, 10));
        let b = tree.insert(SizedLeaf::fixed(30, 10));
        PackBox::pack_start(&mut tree, bx, a, false, true, 0).unwrap();
        PackBox::pack_start(&mut tree, bx, b, false, true, 0).unwrap();

        let rect = Rect::new(0, 0, 100, 10);
        tree.allocate(bx, rect, None);
        let ltr_a = tree.allocation(a);
        let ltr_b = tree.allocation(b);
        assert_eq!(ltr_a, Rect::new(0, 0, 30, 10));
        assert_eq!(ltr_b, Rect::new(30, 0, 30, 10));

        tree.set_text_direction(TextDirection::Rtl);
        tree.allocate(bx, rect, None);
        assert_eq!(tree.allocation(a), ltr_a.mirror_x_within(rect));
        assert_eq!(tree.allocation(b), ltr_b.mirror_x_within(rect));
        assert_eq!(tree.allocation(a), Rect::new(70, 0, 30, 10));
        assert_eq!(tree.allocation(b), Rect::new(40, 0, 30, 10));
    }

    #[test]
    fn allocation_is_idempotent() {
        let mut tree = Tree::new();
        let bx = tree.insert(PackBox::horizontal().with_spacing(2));
        let kids: Vec<_> = (0..4)
            .map(|i| tree.insert(SizedLeaf::new(5 + i, 9 + i, 8, 12)))
            .collect();
        for (i, child) in kids.iter().enumerate() {
            PackBox::pack_start(&mut tree, bx, *child, i % 2 == 0, true, 1).unwrap();
        }

        let rect = Rect::new(3, 7, 91, 17);
        tree.allocate(bx, rect, None);
        let first: Vec<Rect> = kids.iter().map(|c| tree.allocation(*c)).collect();
        tree.allocate(bx, rect, None);
        let second: Vec<Rect> = kids.iter().map(|c| tree.allocation(*c)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn overconstrained_budget_floors_at_minimums() {
        let mut tree = Tree::new();
        let bx = hbox(&mut tree);
        let a = tree.insert(SizedLeaf::fixed(20, 10));
        let b = tree.insert(SizedLeaf::fixed(20, 10));
        PackBox::pack_start(&mut tree, bx, a, false, true, 0).unwrap();
        PackBox::pack_start(&mut tree, bx, b, false, true, 0).unwrap();

        // 30 pixels for 40 pixels of minimums: no error, the box overflows.
        tree.allocate(bx, Rect::new(0, 0, 30, 10), None);
        assert_eq!(tree.allocation(a), Rect::new(0, 0, 20, 10));
        assert_eq!(tree.allocation(b), Rect::new(20, 0, 20, 10));
    }

    #[test]
    fn zero_visible_children_is_a_no_op() {
        let mut tree = Tree::new();
        let bx = hbox(&mut tree);
        let a = tree.insert(SizedLeaf::fixed(20, 10));
        PackBox::pack_start(&mut tree, bx, a, false, true, 0).unwrap();
        tree.set_visible(a, false);

        tree.allocate(bx, Rect::new(0, 0, 100, 10), None);
        assert_eq!(tree.allocation(a), Rect::default());
    }

    #[test]
    fn hidden_children_take_no_space_or_spacing() {
        let mut tree = Tree::new();
        let bx = tree.insert(PackBox::horizontal().with_spacing(5));
        let a = tree.insert(SizedLeaf::fixed(20, 10));
        let hidden = tree.insert(SizedLeaf::fixed(50, 10));
        let b = tree.insert(SizedLeaf::fixed(20, 10));
        for child in [a, hidden, b] {
            PackBox::pack_start(&mut tree, bx, child, false, true, 0).unwrap();
        }
        tree.set_visible(hidden, false);

        tree.allocate(bx, Rect::new(0, 0, 45, 10), None);
        assert_eq!(tree.allocation(a), Rect::new(0, 0, 20, 10));
        assert_eq!(tree.allocation(b), Rect::new(25, 0, 20, 10));
    }

    #[test]
    fn vertical_box_stacks_downward() {
        let mut tree = Tree::new();
        let bx = tree.insert(PackBox::new(Orientation::Vertical));
        let a = tree.insert(SizedLeaf::fixed(10, 20));
        let b = tree.insert(SizedLeaf::fixed(10, 20));
        PackBox::pack_start(&mut tree, bx, a, false, true, 0).unwrap();
        PackBox::pack_end(&mut tree, bx, b, false, true, 0).unwrap();

        tree.allocate(bx, Rect::new(0, 0, 10, 100), None);
        assert_eq!(tree.allocation(a), Rect::new(0, 0, 10, 20));
        assert_eq!(tree.allocation(b), Rect::new(0, 80, 10, 20));
    }

    #[test]
    fn node_level_expand_flag_counts() {
        let mut tree = Tree::new();
        let bx = hbox(&mut tree);
        let a = tree.insert(SizedLeaf::fixed(20, 10));
        let b = tree.insert(SizedLeaf::fixed(20, 10));
        PackBox::pack_start(&mut tree, bx, a, false, true, 0).unwrap();
        PackBox::pack_start(&mut tree, bx, b, false, true, 0).unwrap();
        // The expand request lives on the widget, not the packing record.
        tree.set_hexpand(b, true);

        tree.allocate(bx, Rect::new(0, 0, 100, 10), None);
        assert_eq!(tree.allocation(a).w, 20);
        assert_eq!(tree.allocation(b).w, 80);
    }
}
