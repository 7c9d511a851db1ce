/// Contradiction records and counters
pub mod contradiction;
/// Step-wise collapse engine
pub mod executor;
/// Wave grid to tile grid conversion
pub mod materialize;
/// Neighbor updates after a collapse
pub mod propagation;
/// Indexed entropy priority queue
pub mod queue;
/// Seeded random picks and inverse-CDF sampling
pub mod selection;
/// Per-cell probability distributions
pub mod wave;
