//! Spatial data structures
//!
//! This module contains spatial-related functionality including:
//! - The labelled tile grid and its text format
//! - Eight-way neighborhood addressing on row-major grids

/// Tile label grid and text format
pub mod grid;
/// Direction enumeration and neighbor index computation
pub mod neighbors;

pub use grid::TileGrid;
pub use neighbors::Direction;
