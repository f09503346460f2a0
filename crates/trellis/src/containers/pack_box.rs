//! The box container: two packed child lists (leading and trailing edge) and
//! an optional centered child, laid out along one axis.

use geom::Rect;

use crate::{
    distribute::{SizeRequest, distribute_natural_allocation},
    error::Result,
    id::WidgetId,
    measure::{Measurement, Orientation},
    node::Node,
    property::{ChildPropertySpec, Value, ValueKind},
    tree::{TextDirection, Tree},
    widget::Widget,
};

/// Which edge of the box a child is anchored to. Start/End order is
/// independent of final visual (RTL-aware) position.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum Pack {
    /// Anchored to the leading edge.
    #[default]
    Start,
    /// Anchored to the trailing edge.
    End,
}

/// Where the shared text baseline sits within extra cross-axis space.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum BaselinePosition {
    /// Baseline pinned to the top of the row.
    Top,
    /// Extra space split evenly above and below.
    #[default]
    Center,
    /// Baseline pinned to the bottom of the row.
    Bottom,
}

/// Per-child packing record, created when a child is attached and destroyed
/// when it is detached.
#[derive(Debug, Clone, Copy)]
struct BoxChild {
    /// The packed child.
    widget: WidgetId,
    /// Pixels added on both sides of the child along the pack axis, on top
    /// of the shared spacing.
    padding: i32,
    /// Participates in distributing leftover space.
    expand: bool,
    /// Whether expansion space becomes the child's size or stays as slack
    /// around it.
    fill: bool,
    /// Which edge the child is anchored to.
    pack: Pack,
}

/// A container that packs children along one axis.
///
/// Children are anchored to the leading or trailing edge; one child may be
/// designated as the center child, which is allocated last, centered within
/// the box irrespective of the two groups, and clamped so it never overlaps
/// them.
pub struct PackBox {
    /// The pack axis.
    orientation: Orientation,
    /// Pixels between adjacent visible children, not at the box edges.
    spacing: i32,
    /// Force all non-center children to an equal share.
    homogeneous: bool,
    /// Baseline placement within extra cross-axis space.
    baseline_position: BaselinePosition,
    /// Packing records in insertion order.
    children: Vec<BoxChild>,
    /// The designated center child, if any.
    center: Option<WidgetId>,
}

/// One resolved slot along the pack axis.
#[derive(Debug, Clone, Copy)]
struct AlongSlot {
    /// The child occupying the slot.
    widget: WidgetId,
    /// Edge anchor.
    pack: Pack,
    /// Padding inside the slot.
    padding: i32,
    /// Whether the child stretches into the slot.
    fill: bool,
    /// Slot extent, padding included.
    slot: i32,
    /// The child's extent inside the slot.
    child: i32,
}

/// The resolved along-axis layout: side slots in Start-then-End processing
/// order, plus the center slot.
#[derive(Debug, Default)]
struct AlongLayout {
    /// Side slots, Start children first, then End children, in append order.
    slots: Vec<AlongSlot>,
    /// The center slot, if a visible center child exists.
    center: Option<AlongSlot>,
}

/// Accumulates cross-axis maxima, keeping baseline-aligned children's ascent
/// and descent separate from plain extents.
#[derive(Debug, Default)]
struct CrossAccum {
    /// Plain minimum extent.
    min_max: i32,
    /// Plain natural extent.
    nat_max: i32,
    /// Largest ascent at minimum size.
    ascent_min: i32,
    /// Largest descent at minimum size.
    descent_min: i32,
    /// Largest ascent at natural size.
    ascent_nat: i32,
    /// Largest descent at natural size.
    descent_nat: i32,
    /// Whether any child contributed a baseline.
    any_baseline: bool,
}

impl CrossAccum {
    /// Fold one child's cross measurement into the running maxima.
    fn add(&mut self, m: Measurement, baseline_aligned: bool) {
        if baseline_aligned
            && let (Some(bmin), Some(bnat)) = (m.minimum_baseline, m.natural_baseline)
        {
            self.any_baseline = true;
            self.ascent_min = self.ascent_min.max(bmin);
            self.descent_min = self.descent_min.max(m.minimum - bmin);
            self.ascent_nat = self.ascent_nat.max(bnat);
            self.descent_nat = self.descent_nat.max(m.natural - bnat);
        } else {
            self.min_max = self.min_max.max(m.minimum);
            self.nat_max = self.nat_max.max(m.natural);
        }
    }

    /// Produce the box's cross measurement, with baselines when any child
    /// participates and the box is horizontal.
    fn finish(&self, position: BaselinePosition, horizontal: bool) -> Measurement {
        let minimum = self.min_max.max(self.ascent_min + self.descent_min);
        let natural = self.nat_max.max(self.ascent_nat + self.descent_nat);
        if horizontal && self.any_baseline {
            Measurement::with_baselines(
                minimum,
                natural,
                place_baseline(position, self.ascent_min, self.descent_min, minimum),
                place_baseline(position, self.ascent_nat, self.descent_nat, natural),
            )
        } else {
            Measurement::new(minimum, natural)
        }
    }
}

/// Position a baseline of the given ascent/descent within `extent`.
fn place_baseline(position: BaselinePosition, ascent: i32, descent: i32, extent: i32) -> i32 {
    match position {
        BaselinePosition::Top => ascent,
        BaselinePosition::Center => ascent + (extent - (ascent + descent)) / 2,
        BaselinePosition::Bottom => extent - descent,
    }
}

/// Child properties registered for every box.
const CHILD_PROPERTIES: &[ChildPropertySpec] = &[
    ChildPropertySpec {
        name: "expand",
        kind: ValueKind::Bool,
    },
    ChildPropertySpec {
        name: "fill",
        kind: ValueKind::Bool,
    },
    ChildPropertySpec {
        name: "padding",
        kind: ValueKind::Uint,
    },
    ChildPropertySpec {
        name: "pack-type",
        kind: ValueKind::Pack,
    },
    ChildPropertySpec {
        name: "position",
        kind: ValueKind::Int,
    },
];

impl PackBox {
    /// Construct an empty box along an axis.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            spacing: 0,
            homogeneous: false,
            baseline_position: BaselinePosition::default(),
            children: Vec::new(),
            center: None,
        }
    }

    /// A left-to-right box.
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    /// A top-to-bottom box.
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    /// Set the inter-child spacing at construction.
    pub fn with_spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing.max(0);
        self
    }

    /// Set homogeneous mode at construction.
    pub fn with_homogeneous(mut self, homogeneous: bool) -> Self {
        self.homogeneous = homogeneous;
        self
    }

    /// Set the baseline placement at construction.
    pub fn with_baseline_position(mut self, position: BaselinePosition) -> Self {
        self.baseline_position = position;
        self
    }

    /// The pack axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The inter-child spacing.
    pub fn spacing(&self) -> i32 {
        self.spacing
    }

    /// Whether all non-center children are forced to an equal share.
    pub fn is_homogeneous(&self) -> bool {
        self.homogeneous
    }

    /// The baseline placement.
    pub fn baseline_position(&self) -> BaselinePosition {
        self.baseline_position
    }

    /// The designated center child.
    pub fn center_widget(&self) -> Option<WidgetId> {
        self.center
    }

    /// Attach a child anchored to the leading edge.
    pub fn pack_start(
        tree: &mut Tree,
        id: WidgetId,
        child: WidgetId,
        expand: bool,
        fill: bool,
        padding: i32,
    ) -> Result<()> {
        Self::pack(tree, id, child, expand, fill, padding, Pack::Start)
    }

    /// Attach a child anchored to the trailing edge.
    pub fn pack_end(
        tree: &mut Tree,
        id: WidgetId,
        child: WidgetId,
        expand: bool,
        fill: bool,
        padding: i32,
    ) -> Result<()> {
        Self::pack(tree, id, child, expand, fill, padding, Pack::End)
    }

    /// Shared packing path: attach, then configure the fresh record.
    fn pack(
        tree: &mut Tree,
        id: WidgetId,
        child: WidgetId,
        expand: bool,
        fill: bool,
        padding: i32,
        pack: Pack,
    ) -> Result<()> {
        tree.attach(id, child)?;
        tree.with_widget_mut::<Self, _, _>(id, |bx, _tree| {
            if let Some(rec) = bx.children.iter_mut().find(|r| r.widget == child) {
                rec.expand = expand;
                rec.fill = fill;
                rec.padding = padding.max(0);
                rec.pack = pack;
            }
        })?;
        // The attach queued a resize with the default record; the customized
        // record must reach an immediate-mode root too.
        if tree.is_visible(child) {
            tree.queue_resize(id);
        }
        Ok(())
    }

    /// Designate a child as the centered one, attaching it first if needed.
    pub fn set_center(tree: &mut Tree, id: WidgetId, child: WidgetId) -> Result<()> {
        if tree.node(child).and_then(Node::parent) != Some(id) {
            tree.attach(id, child)?;
        }
        tree.with_widget_mut::<Self, _, _>(id, |bx, _tree| bx.center = Some(child))?;
        tree.queue_resize(id);
        Ok(())
    }

    /// Clear the center designation. The child stays packed.
    pub fn unset_center(tree: &mut Tree, id: WidgetId) {
        let cleared = tree
            .with_widget_mut::<Self, _, _>(id, |bx, _tree| bx.center.take().is_some())
            .unwrap_or(false);
        if cleared {
            tree.queue_resize(id);
        }
    }

    /// Set the inter-child spacing.
    pub fn set_spacing(tree: &mut Tree, id: WidgetId, spacing: i32) {
        let changed = tree
            .with_widget_mut::<Self, _, _>(id, |bx, _tree| {
                let spacing = spacing.max(0);
                if bx.spacing != spacing {
                    bx.spacing = spacing;
                    true
                } else {
                    false
                }
            })
            .unwrap_or(false);
        if changed {
            tree.queue_resize(id);
            tree.notify_property(id, "spacing");
        }
    }

    /// Set homogeneous mode.
    pub fn set_homogeneous(tree: &mut Tree, id: WidgetId, homogeneous: bool) {
        let changed = tree
            .with_widget_mut::<Self, _, _>(id, |bx, _tree| {
                if bx.homogeneous != homogeneous {
                    bx.homogeneous = homogeneous;
                    true
                } else {
                    false
                }
            })
            .unwrap_or(false);
        if changed {
            tree.queue_resize(id);
            tree.notify_property(id, "homogeneous");
        }
    }

    /// Set the baseline placement.
    pub fn set_baseline_position(tree: &mut Tree, id: WidgetId, position: BaselinePosition) {
        let changed = tree
            .with_widget_mut::<Self, _, _>(id, |bx, _tree| {
                if bx.baseline_position != position {
                    bx.baseline_position = position;
                    true
                } else {
                    false
                }
            })
            .unwrap_or(false);
        if changed {
            tree.queue_resize(id);
            tree.notify_property(id, "baseline-position");
        }
    }

    /// Reconfigure a packed child. A change on an invisible child does not
    /// relayout immediately, but the notifications always fire.
    pub fn set_child_packing(
        tree: &mut Tree,
        id: WidgetId,
        child: WidgetId,
        expand: bool,
        fill: bool,
        padding: i32,
        pack: Pack,
    ) {
        let updated = tree
            .with_widget_mut::<Self, _, _>(id, |bx, _tree| {
                if let Some(rec) = bx.children.iter_mut().find(|r| r.widget == child) {
                    rec.expand = expand;
                    rec.fill = fill;
                    rec.padding = padding.max(0);
                    rec.pack = pack;
                    true
                } else {
                    false
                }
            })
            .unwrap_or(false);
        if !updated {
            tracing::warn!("set_child_packing: {child:?} is not packed in {id:?}");
            return;
        }
        if tree.is_visible(child) {
            tree.queue_resize(id);
        }
        for name in ["expand", "fill", "padding", "pack-type"] {
            tree.notify_child_property(id, child, name);
        }
    }

    /// Read back a packed child's configuration.
    pub fn child_packing(
        tree: &Tree,
        id: WidgetId,
        child: WidgetId,
    ) -> Option<(bool, bool, i32, Pack)> {
        let bx = tree.widget_ref::<Self>(id)?;
        bx.children
            .iter()
            .find(|r| r.widget == child)
            .map(|r| (r.expand, r.fill, r.padding, r.pack))
    }

    /// The packing record for a child.
    fn record(&self, child: WidgetId) -> Option<&BoxChild> {
        self.children.iter().find(|r| r.widget == child)
    }

    /// Visible side records in Start-then-End processing order.
    fn processing_order(&self, tree: &Tree) -> Vec<BoxChild> {
        let mut out: Vec<BoxChild> = self
            .children
            .iter()
            .filter(|r| {
                r.pack == Pack::Start && self.center != Some(r.widget) && tree.is_visible(r.widget)
            })
            .copied()
            .collect();
        out.extend(
            self.children
                .iter()
                .filter(|r| {
                    r.pack == Pack::End
                        && self.center != Some(r.widget)
                        && tree.is_visible(r.widget)
                })
                .copied(),
        );
        out
    }

    /// The center record, when designated and visible.
    fn center_record(&self, tree: &Tree) -> Option<BoxChild> {
        let center = self.center?;
        if !tree.is_visible(center) {
            return None;
        }
        self.record(center).copied()
    }

    /// Whether a record takes a share of leftover space on the pack axis.
    fn slot_expands(&self, tree: &Tree, rec: &BoxChild) -> bool {
        rec.expand || tree.expands(rec.widget, self.orientation)
    }

    /// Measure along the pack axis.
    fn measure_along(&self, tree: &Tree, for_size: Option<i32>) -> Measurement {
        let mut nvis = 0;
        let (mut min_sum, mut nat_sum) = (0, 0);
        let (mut largest_min, mut largest_nat) = (0, 0);
        for rec in self.processing_order(tree) {
            let m = tree.measure(rec.widget, self.orientation, for_size);
            let pad = 2 * rec.padding;
            min_sum += m.minimum + pad;
            nat_sum += m.natural + pad;
            largest_min = largest_min.max(m.minimum + pad);
            largest_nat = largest_nat.max(m.natural + pad);
            nvis += 1;
        }
        let (mut minimum, mut natural) = if self.homogeneous {
            (largest_min * nvis, largest_nat * nvis)
        } else {
            (min_sum, nat_sum)
        };
        let mut slots = nvis;
        if let Some(rec) = self.center_record(tree) {
            // The center slot is exempt from the homogeneous share; its own
            // request is added uncontended.
            let m = tree.measure(rec.widget, self.orientation, for_size);
            minimum += m.minimum + 2 * rec.padding;
            natural += m.natural + 2 * rec.padding;
            slots += 1;
        }
        if slots > 1 {
            minimum += (slots - 1) * self.spacing;
            natural += (slots - 1) * self.spacing;
        }
        Measurement::new(minimum, natural)
    }

    /// Measure across the pack axis, optionally for a fixed along-size.
    fn measure_across(&self, tree: &Tree, for_size: Option<i32>) -> Measurement {
        let horizontal = self.orientation == Orientation::Horizontal;
        let cross_axis = self.orientation.perpendicular();
        let mut acc = CrossAccum::default();
        match for_size {
            Some(avail) => {
                // Predict every child's along-size with the same logic as a
                // real allocation, then ask each child for its cross-size at
                // that hypothetical extent.
                let layout = self.along_layout(tree, avail, None);
                for slot in layout.slots.iter().chain(layout.center.iter()) {
                    let m = tree.measure(slot.widget, cross_axis, Some(slot.child));
                    acc.add(m, horizontal && tree.is_baseline_aligned(slot.widget));
                }
            }
            None => {
                for rec in self
                    .processing_order(tree)
                    .into_iter()
                    .chain(self.center_record(tree))
                {
                    let m = tree.measure(rec.widget, cross_axis, None);
                    acc.add(m, horizontal && tree.is_baseline_aligned(rec.widget));
                }
            }
        }
        acc.finish(self.baseline_position, horizontal)
    }

    /// Resolve the along-axis slot sizes for an available extent.
    ///
    /// `cross` fixes the perpendicular size children are measured at; `None`
    /// runs the same computation unconstrained (the dry mode used by
    /// cross-axis measurement).
    fn along_layout(&self, tree: &Tree, avail: i32, cross: Option<i32>) -> AlongLayout {
        let order = self.processing_order(tree);
        let center_rec = self.center_record(tree);
        let n = order.len() as i32;
        let slots_total = n + i32::from(center_rec.is_some());
        if slots_total == 0 {
            return AlongLayout::default();
        }
        let budget = avail - (slots_total - 1) * self.spacing;

        let mut requests: Vec<SizeRequest> = order
            .iter()
            .map(|rec| {
                let m = tree.measure(rec.widget, self.orientation, cross);
                SizeRequest::new(m.minimum, m.natural)
            })
            .collect();

        let (mut start_min, mut start_nat, mut end_min, mut end_nat) = (0, 0, 0, 0);
        for (rec, req) in order.iter().zip(requests.iter()) {
            let pad = 2 * rec.padding;
            match rec.pack {
                Pack::Start => {
                    start_min += req.minimum + pad;
                    start_nat += req.natural + pad;
                }
                Pack::End => {
                    end_min += req.minimum + pad;
                    end_nat += req.natural + pad;
                }
            }
        }

        // The center child never competes with the groups: it takes what the
        // group minimums leave over, or squeezes the groups to their natural
        // sizes when it expands.
        let center = center_rec.map(|rec| {
            let m = tree.measure(rec.widget, self.orientation, cross);
            let pad = 2 * rec.padding;
            let size = if self.slot_expands(tree, &rec) {
                (budget - 2 * start_nat.max(end_nat) - pad).max(m.minimum)
            } else {
                (budget - start_min - end_min - pad)
                    .min(m.natural)
                    .max(m.minimum)
            };
            AlongSlot {
                widget: rec.widget,
                pack: rec.pack,
                padding: rec.padding,
                fill: rec.fill,
                slot: size + pad,
                child: size,
            }
        });
        let center_total = center.map(|slot| slot.slot).unwrap_or(0);

        let mut slots = Vec::with_capacity(order.len());
        if self.homogeneous {
            if n > 0 {
                let side_budget = budget - center_total;
                let share = side_budget / n;
                let mut leftover = side_budget % n;
                for (rec, req) in order.iter().zip(requests.iter()) {
                    let mut slot = share;
                    if leftover > 0 {
                        slot += 1;
                        leftover -= 1;
                    }
                    let child = if rec.fill {
                        (slot - 2 * rec.padding).max(0)
                    } else {
                        req.minimum
                    };
                    slots.push(AlongSlot {
                        widget: rec.widget,
                        pack: rec.pack,
                        padding: rec.padding,
                        fill: rec.fill,
                        slot,
                        child,
                    });
                }
            }
        } else {
            let mut remaining = budget - center_total;
            for (rec, req) in order.iter().zip(requests.iter()) {
                remaining -= req.minimum + 2 * rec.padding;
            }
            remaining = distribute_natural_allocation(remaining, &mut requests);

            let n_expand = order
                .iter()
                .filter(|rec| self.slot_expands(tree, rec))
                .count() as i32;
            let (per_expand, mut leftover) = if n_expand > 0 {
                (remaining / n_expand, remaining % n_expand)
            } else {
                (0, 0)
            };
            for (rec, req) in order.iter().zip(requests.iter()) {
                let base = req.minimum;
                let mut slot = base + 2 * rec.padding;
                if self.slot_expands(tree, rec) {
                    slot += per_expand;
                    if leftover > 0 {
                        slot += 1;
                        leftover -= 1;
                    }
                }
                let child = if rec.fill { (slot - 2 * rec.padding).max(0) } else { base };
                slots.push(AlongSlot {
                    widget: rec.widget,
                    pack: rec.pack,
                    padding: rec.padding,
                    fill: rec.fill,
                    slot,
                    child,
                });
            }
        }

        AlongLayout { slots, center }
    }

    /// Convert one resolved slot at an along-axis origin into a child rect.
    fn place(&self, slot: &AlongSlot, origin: i32, content: Rect, cross: i32) -> Rect {
        let child_origin = if slot.fill {
            origin + slot.padding
        } else {
            origin + (slot.slot - slot.child) / 2
        };
        match self.orientation {
            Orientation::Horizontal => {
                Rect::new(child_origin, content.top(), slot.child, cross)
            }
            Orientation::Vertical => Rect::new(content.left(), child_origin, cross, slot.child),
        }
    }
}

impl Widget for PackBox {
    fn measure(
        &self,
        tree: &Tree,
        _id: WidgetId,
        orientation: Orientation,
        for_size: Option<i32>,
    ) -> Measurement {
        if orientation == self.orientation {
            self.measure_along(tree, for_size)
        } else {
            self.measure_across(tree, for_size)
        }
    }

    fn allocate(&mut self, tree: &mut Tree, _id: WidgetId, content: Rect, baseline: Option<i32>) {
        let horizontal = self.orientation == Orientation::Horizontal;
        let along = self.orientation.pick(content.w, content.h);
        let cross = self.orientation.perpendicular().pick(content.w, content.h);
        let layout = self.along_layout(tree, along, Some(cross));
        if layout.slots.is_empty() && layout.center.is_none() {
            return;
        }

        // The shared baseline comes down from the parent when it has one;
        // otherwise it derives from the children that align to it.
        let mut shared_baseline = if horizontal { baseline } else { None };
        if horizontal && shared_baseline.is_none() {
            let mut ascent: Option<i32> = None;
            let mut descent: Option<i32> = None;
            for slot in layout.slots.iter().chain(layout.center.iter()) {
                if !tree.is_baseline_aligned(slot.widget) {
                    continue;
                }
                let m = tree.measure(slot.widget, Orientation::Vertical, Some(slot.child));
                if let Some(bmin) = m.minimum_baseline {
                    ascent = Some(ascent.unwrap_or(0).max(bmin));
                    descent = Some(descent.unwrap_or(0).max(m.minimum - bmin));
                }
            }
            if let (Some(ascent), Some(descent)) = (ascent, descent) {
                shared_baseline = Some(place_baseline(
                    self.baseline_position,
                    ascent,
                    descent,
                    cross,
                ));
            }
        }

        let leading = self.orientation.pick(content.left(), content.top());
        let mut cursor_start = leading;
        let mut cursor_end = leading + along;
        let mut rects: Vec<(WidgetId, Rect)> = Vec::with_capacity(layout.slots.len() + 1);
        for slot in &layout.slots {
            let origin = match slot.pack {
                Pack::Start => {
                    let origin = cursor_start;
                    cursor_start += slot.slot + self.spacing;
                    origin
                }
                Pack::End => {
                    cursor_end -= slot.slot;
                    let origin = cursor_end;
                    cursor_end -= self.spacing;
                    origin
                }
            };
            rects.push((slot.widget, self.place(slot, origin, content, cross)));
        }

        if let Some(slot) = &layout.center {
            // Centered on the box midpoint, sliding off whichever group
            // crowds it rather than overlapping either.
            let midpoint = leading + (along - slot.slot) / 2;
            let lo = cursor_start;
            let hi = (cursor_end - slot.slot).max(lo);
            let origin = midpoint.max(lo).min(hi);
            rects.push((slot.widget, self.place(slot, origin, content, cross)));
        }

        let mirror = horizontal && tree.text_direction() == TextDirection::Rtl;
        for (widget, rect) in rects {
            let rect = if mirror { rect.mirror_x_within(content) } else { rect };
            tree.allocate(widget, rect, shared_baseline);
        }
    }

    fn folds_border(&self) -> bool {
        true
    }

    fn child_properties(&self) -> &'static [ChildPropertySpec] {
        CHILD_PROPERTIES
    }

    fn set_child_property(&mut self, child: WidgetId, name: &str, value: &Value) -> bool {
        let Some(idx) = self.children.iter().position(|r| r.widget == child) else {
            return false;
        };
        match name {
            "expand" => match value.as_bool() {
                Some(v) => {
                    self.children[idx].expand = v;
                    true
                }
                None => false,
            },
            "fill" => match value.as_bool() {
                Some(v) => {
                    self.children[idx].fill = v;
                    true
                }
                None => false,
            },
            "padding" => match value.as_uint() {
                Some(v) => {
                    self.children[idx].padding = i32::try_from(v).unwrap_or(i32::MAX);
                    true
                }
                None => false,
            },
            "pack-type" => match value.as_pack() {
                Some(v) => {
                    self.children[idx].pack = v;
                    true
                }
                None => false,
            },
            "position" => match value.as_int() {
                Some(v) => {
                    let rec = self.children.remove(idx);
                    let to = if v < 0 {
                        self.children.len()
                    } else {
                        (v as usize).min(self.children.len())
                    };
                    self.children.insert(to, rec);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    fn child_property(&self, child: WidgetId, name: &str) -> Option<Value> {
        let idx = self.children.iter().position(|r| r.widget == child)?;
        let rec = &self.children[idx];
        match name {
            "expand" => Some(Value::Bool(rec.expand)),
            "fill" => Some(Value::Bool(rec.fill)),
            "padding" => Some(Value::Uint(rec.padding.max(0) as u32)),
            "pack-type" => Some(Value::Pack(rec.pack)),
            "position" => Some(Value::Int(idx as i32)),
            _ => None,
        }
    }

    fn child_attached(&mut self, _tree: &mut Tree, _id: WidgetId, child: WidgetId) {
        self.children.push(BoxChild {
            widget: child,
            padding: 0,
            expand: false,
            fill: true,
            pack: Pack::Start,
        });
    }

    fn child_detached(&mut self, _tree: &mut Tree, _id: WidgetId, child: WidgetId) {
        self.children.retain(|r| r.widget != child);
        if self.center == Some(child) {
            self.center = None;
        }
    }

    fn child_from_markup(
        &mut self,
        _tree: &mut Tree,
        _id: WidgetId,
        child: WidgetId,
        kind: Option<&str>,
    ) {
        match kind {
            None => {}
            Some("center") => self.center = Some(child),
            Some(other) => {
                tracing::warn!("unknown packing kind {other:?} for box child; packed normally");
            }
        }
    }

    fn enumerate_children(&self, _include_internal: bool) -> Option<Vec<WidgetId>> {
        let mut out: Vec<WidgetId> = self
            .children
            .iter()
            .filter(|r| r.pack == Pack::Start)
            .map(|r| r.widget)
            .collect();
        out.extend(
            self.children
                .iter()
                .filter(|r| r.pack == Pack::End)
                .map(|r| r.widget),
        );
        Some(out)
    }
}
