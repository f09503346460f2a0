//! Container widgets built on the tree's measure/allocate machinery.

/// Absolute-position container.
mod fixed;
/// Near-square grid container.
mod grid;
/// The packed box container.
mod pack_box;

pub use fixed::Fixed;
pub use grid::Grid;
pub use pack_box::{BaselinePosition, Pack, PackBox};
