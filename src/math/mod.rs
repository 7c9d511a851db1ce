//! Mathematical utilities for the algorithm

/// Entropy, normalization and inverse-CDF sampling over discrete distributions
pub mod probability;
