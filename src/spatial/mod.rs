//! Spatial indexing for area queries

pub mod grid;

pub use grid::SparseHashGrid;
