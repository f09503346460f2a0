//! Trellis: the constraint-based layout core of a retained-mode widget
//! toolkit.
//!
//! Widgets live in an arena [`Tree`] and negotiate size with their parents
//! through a two-pass protocol: a measurement sweep asks every widget for a
//! minimum and natural size per axis (optionally as a function of the other
//! axis), then an allocation sweep assigns final pixel rectangles top-down.
//! [`PackBox`] is the workhorse container; [`Fixed`] and [`Grid`] exercise
//! the same contract at the simple end.
//!
//! Rendering, event dispatch, styling, and the property/signal fabric are
//! external collaborators: the engine only calls out through the
//! [`NotificationSink`] observer and is driven by the host's layout tick.

/// Container widgets.
mod containers;
/// Distribution of extra space across size requests.
mod distribute;
/// Error types for tree operations.
mod error;
/// Focus tracking and navigation.
mod focus;
/// Arena identifiers.
mod id;
/// The size negotiation protocol.
mod measure;
/// Diagnostic type tags.
mod name;
/// Arena node bookkeeping.
mod node;
/// Child properties and change notification.
mod property;
/// The widget tree.
mod tree;
/// The widget behavior trait.
mod widget;

pub mod tutils;

pub use containers::{BaselinePosition, Fixed, Grid, Pack, PackBox};
pub use distribute::{SizeRequest, distribute_natural_allocation};
pub use error::{Error, Result};
pub use focus::{FocusDirection, FocusNavigator};
pub use geom;
pub use id::WidgetId;
pub use measure::{Measurement, Orientation};
pub use name::NodeName;
pub use node::{Node, ResizeMode};
pub use property::{ChildPropertySpec, NotificationSink, Value, ValueKind};
pub use tree::{TextDirection, Tree};
pub use widget::Widget;
