use thiserror::Error;

use crate::id::WidgetId;

/// Result alias for tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by structural tree operations.
///
/// The measurement and allocation contract itself has no error channel;
/// problems there are either clamped locally, logged as warnings, or fatal
/// contract violations.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// The widget id does not refer to a live node.
    #[error("no such widget: {0:?}")]
    NodeNotFound(WidgetId),

    /// The widget already has a parent and cannot be attached again.
    #[error("widget {0:?} already has a parent")]
    AlreadyParented(WidgetId),

    /// Attaching would make a node its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// The prospective parent.
        parent: WidgetId,
        /// The prospective child.
        child: WidgetId,
    },

    /// The widget slot is empty because a dispatch is already in flight.
    #[error("reentrant access to widget {0:?}")]
    ReentrantWidget(WidgetId),

    /// The node's widget is not of the requested concrete type.
    #[error("widget {0:?} has a different concrete type")]
    WidgetType(WidgetId),
}
