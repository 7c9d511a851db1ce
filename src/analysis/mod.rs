//! Statistical analysis of sample grids

/// Directional adjacency likelihoods
pub mod adjacency;
/// Ordered catalog of distinct tile labels
pub mod catalog;
/// Combined immutable sample model
pub mod model;
/// Sample-wide frequency table
pub mod statistics;
