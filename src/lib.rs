//! Wave function collapse generation of tile maps from small sample grids
//!
//! A [`SampleModel`] learns the tile catalog, tile frequencies and eight-way
//! neighbor likelihoods of a sample once. Each generation then collapses a
//! fresh wave grid cell by cell, lowest entropy first, propagating learned
//! likelihoods to the neighbors of every collapsed cell.

#![deny(unsafe_code)]

/// Collapse engine: wave grid, entropy queue, propagation and materialization
pub mod algorithm;
/// Sample statistics: catalog, frequencies and adjacency likelihoods
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Entropy and sampling utilities
pub mod math;
/// Tile grid and neighborhood addressing
pub mod spatial;

pub use analysis::model::SampleModel;
pub use io::configuration::GenerationConfig;
pub use io::error::{GenerationError, Result};
pub use spatial::TileGrid;
