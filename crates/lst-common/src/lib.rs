//! Common types shared across the lst-tools workspace.

pub mod bbox;
pub mod grid;

pub use bbox::BoundingBox;
pub use grid::RasterField;
