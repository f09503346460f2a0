//! The size negotiation protocol: widgets report a minimum and a natural
//! size per axis, optionally as a function of the size already fixed on the
//! other axis (height-for-width and width-for-height measurement).

/// Layout axis.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Orientation {
    /// Left-to-right axis.
    Horizontal,
    /// Top-to-bottom axis.
    Vertical,
}

impl Orientation {
    /// The other axis.
    pub fn perpendicular(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Pick the component of a (width, height) pair along this axis.
    pub fn pick(self, width: i32, height: i32) -> i32 {
        match self {
            Self::Horizontal => width,
            Self::Vertical => height,
        }
    }
}

/// The result of measuring a widget along one axis.
///
/// `minimum` is the smallest size the widget can render at without violating
/// its own content constraints; `natural` is the size it would choose given
/// unconstrained space. Baselines are reported only for vertical
/// measurements of baseline-aware widgets, as offsets from the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Measurement {
    /// Smallest acceptable size.
    pub minimum: i32,
    /// Preferred size.
    pub natural: i32,
    /// Baseline offset at the minimum size, if any.
    pub minimum_baseline: Option<i32>,
    /// Baseline offset at the natural size, if any.
    pub natural_baseline: Option<i32>,
}

impl Measurement {
    /// A measurement with no baselines.
    pub fn new(minimum: i32, natural: i32) -> Self {
        Self {
            minimum,
            natural,
            minimum_baseline: None,
            natural_baseline: None,
        }
    }

    /// A measurement carrying baseline offsets.
    pub fn with_baselines(
        minimum: i32,
        natural: i32,
        minimum_baseline: i32,
        natural_baseline: i32,
    ) -> Self {
        Self {
            minimum,
            natural,
            minimum_baseline: Some(minimum_baseline),
            natural_baseline: Some(natural_baseline),
        }
    }
}

/// Number of distinct `for_size` queries remembered per axis.
const CACHED_SIZES: usize = 3;

/// One remembered measurement.
#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    /// The perpendicular size the query was made for.
    for_size: Option<i32>,
    /// The measurement returned, border folding already applied.
    measurement: Measurement,
}

/// A small per-node cache of recent size queries, cleared whenever a resize
/// is queued through the node.
#[derive(Debug, Default)]
pub(crate) struct RequestCache {
    /// Remembered horizontal queries.
    horizontal: [Option<CacheEntry>; CACHED_SIZES],
    /// Remembered vertical queries.
    vertical: [Option<CacheEntry>; CACHED_SIZES],
    /// Replacement cursor for the horizontal slots.
    next_horizontal: usize,
    /// Replacement cursor for the vertical slots.
    next_vertical: usize,
}

impl RequestCache {
    /// Look up a remembered measurement for an axis and perpendicular size.
    pub(crate) fn lookup(&self, orientation: Orientation, for_size: Option<i32>) -> Option<Measurement> {
        let slots = match orientation {
            Orientation::Horizontal => &self.horizontal,
            Orientation::Vertical => &self.vertical,
        };
        slots
            .iter()
            .flatten()
            .find(|entry| entry.for_size == for_size)
            .map(|entry| entry.measurement)
    }

    /// Remember a measurement, evicting the oldest slot when full.
    pub(crate) fn store(
        &mut self,
        orientation: Orientation,
        for_size: Option<i32>,
        measurement: Measurement,
    ) {
        let (slots, cursor) = match orientation {
            Orientation::Horizontal => (&mut self.horizontal, &mut self.next_horizontal),
            Orientation::Vertical => (&mut self.vertical, &mut self.next_vertical),
        };
        if let Some(entry) = slots.iter_mut().flatten().find(|e| e.for_size == for_size) {
            entry.measurement = measurement;
            return;
        }
        if let Some(slot) = slots.iter_mut().find(|s| s.is_none()) {
            *slot = Some(CacheEntry {
                for_size,
                measurement,
            });
            return;
        }
        slots[*cursor] = Some(CacheEntry {
            for_size,
            measurement,
        });
        *cursor = (*cursor + 1) % CACHED_SIZES;
    }

    /// Forget every remembered measurement.
    pub(crate) fn clear(&mut self) {
        self.horizontal = [None; CACHED_SIZES];
        self.vertical = [None; CACHED_SIZES];
        self.next_horizontal = 0;
        self.next_vertical = 0;
    }
}
