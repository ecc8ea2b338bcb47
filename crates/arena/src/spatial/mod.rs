//! Spatial indexing utilities.
//!
//! Uniform bucket grid rebuilt from scratch every tick.

mod grid;

pub use grid::SpatialGrid;
