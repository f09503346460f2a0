//! Test utilities: configurable leaf widgets and a recording notification
//! sink, used by unit, integration, and property tests.

use std::{cell::RefCell, rc::Rc};

use crate::{
    id::WidgetId,
    measure::{Measurement, Orientation},
    property::NotificationSink,
    tree::Tree,
    widget::Widget,
};

/// A leaf widget with fixed per-axis size requests.
///
/// Requests are reported verbatim, including nonsensical ones, so tests can
/// drive the contract-violation path.
pub struct SizedLeaf {
    /// (minimum, natural) width.
    width: (i32, i32),
    /// (minimum, natural) height.
    height: (i32, i32),
    /// (minimum, natural) baseline for vertical measurement.
    baseline: Option<(i32, i32)>,
    /// Whether the leaf accepts focus.
    focusable: bool,
}

impl SizedLeaf {
    /// A leaf with distinct minimum and natural sizes per axis.
    pub fn new(min_w: i32, nat_w: i32, min_h: i32, nat_h: i32) -> Self {
        Self {
            width: (min_w, nat_w),
            height: (min_h, nat_h),
            baseline: None,
            focusable: false,
        }
    }

    /// A leaf whose minimum and natural sizes coincide.
    pub fn fixed(width: i32, height: i32) -> Self {
        Self::new(width, width, height, height)
    }

    /// Report baselines with vertical measurements.
    pub fn with_baseline(mut self, minimum: i32, natural: i32) -> Self {
        self.baseline = Some((minimum, natural));
        self
    }

    /// Accept focus.
    pub fn focusable(mut self) -> Self {
        self.focusable = true;
        self
    }
}

impl Widget for SizedLeaf {
    fn measure(
        &self,
        _tree: &Tree,
        _id: WidgetId,
        orientation: Orientation,
        _for_size: Option<i32>,
    ) -> Measurement {
        match orientation {
            Orientation::Horizontal => Measurement::new(self.width.0, self.width.1),
            Orientation::Vertical => match self.baseline {
                Some((bmin, bnat)) => {
                    Measurement::with_baselines(self.height.0, self.height.1, bmin, bnat)
                }
                None => Measurement::new(self.height.0, self.height.1),
            },
        }
    }

    fn accepts_focus(&self) -> bool {
        self.focusable
    }
}

/// A leaf that trades width for height, like wrapped text: it covers `area`
/// pixels and reflows to the width it is given.
pub struct WrappingLeaf {
    /// Total pixels of content.
    area: i32,
    /// Narrowest usable width.
    min_width: i32,
}

impl WrappingLeaf {
    /// A wrapping leaf with a content area and a minimum width.
    pub fn new(area: i32, min_width: i32) -> Self {
        Self { area, min_width }
    }
}

impl Widget for WrappingLeaf {
    fn measure(
        &self,
        _tree: &Tree,
        _id: WidgetId,
        orientation: Orientation,
        for_size: Option<i32>,
    ) -> Measurement {
        match orientation {
            Orientation::Horizontal => Measurement::new(self.min_width, self.area),
            Orientation::Vertical => {
                let width = for_size.unwrap_or(self.area).max(self.min_width).max(1);
                let d = self.area / width;
                let r = self.area % width;
                let height = if (r > 0 && width > 0) || (r < 0 && width < 0) {
                    d + 1
                } else {
                    d
                };
                Measurement::new(height, height)
            }
        }
    }
}

/// A notification sink that records every event it sees.
#[derive(Default, Clone)]
pub struct RecordingSink {
    /// Recorded events, shared with the test body.
    pub events: Rc<RefCell<Vec<String>>>,
}

impl NotificationSink for RecordingSink {
    fn child_property_changed(&self, _container: WidgetId, _child: WidgetId, name: &str) {
        self.events.borrow_mut().push(format!("child:{name}"));
    }

    fn property_changed(&self, _widget: WidgetId, name: &str) {
        self.events.borrow_mut().push(format!("own:{name}"));
    }
}
