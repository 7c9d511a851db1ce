use crate::{
    algorithm::contradiction::{Contradiction, ContradictionLog},
    algorithm::queue::EntropyQueue,
    algorithm::wave::WaveGrid,
    analysis::adjacency::{AdjacencyModel, UnobservedPolicy},
    io::error::{Result, invariant_violation},
    math::probability::{elementwise_product, normalize, shannon_entropy},
    spatial::neighbors::neighbors,
};

/// Result of combining learned evidence with a neighbor's distribution
#[derive(Debug, Clone, PartialEq)]
pub enum Combined {
    /// Normalized product of evidence and prior hypotheses
    Distribution(Vec<f64>),
    /// No hypothesis survived; the caller resets the cell
    Contradiction,
}

/// Merge an expected neighbor distribution into a cell's current one
///
/// # Errors
///
/// Returns an invariant violation if the lengths differ or normalization
/// produces a not-a-number probability
pub fn combine(expected: &[f64], current: &[f64], unobserved: UnobservedPolicy) -> Result<Combined> {
    if expected.len() != current.len() {
        return Err(invariant_violation(
            "combine",
            &format!(
                "expected distribution has {} entries, cell has {}",
                expected.len(),
                current.len()
            ),
        ));
    }

    let unconstrained =
        unobserved == UnobservedPolicy::Ignore && expected.iter().all(|&p| p <= 0.0);
    let mut product = if unconstrained {
        current.to_vec()
    } else {
        elementwise_product(expected, current)
    };

    let sum = normalize(&mut product);
    if sum.is_nan() || product.iter().any(|p| p.is_nan()) {
        return Err(invariant_violation(
            "combine",
            &format!("{expected:?} * {current:?} produced a NaN probability"),
        ));
    }
    if sum <= 0.0 {
        return Ok(Combined::Contradiction);
    }
    Ok(Combined::Distribution(product))
}

/// Learned constraints applied to neighbors after each collapse
#[derive(Debug, Clone, Copy)]
pub struct PropagationRules<'a> {
    /// Directional likelihoods learned from the sample
    pub adjacency: &'a AdjacencyModel,
    /// Treatment of never-observed neighbor relationships
    pub unobserved: UnobservedPolicy,
}

impl<'a> PropagationRules<'a> {
    /// Bundle an adjacency model with a policy
    pub const fn new(adjacency: &'a AdjacencyModel, unobserved: UnobservedPolicy) -> Self {
        Self {
            adjacency,
            unobserved,
        }
    }

    /// Update every valid, uncollapsed neighbor of a freshly collapsed cell
    ///
    /// Neighbors are visited in direction order. Each one gets the element-wise
    /// product of the learned distribution and its current distribution,
    /// renormalized, and its queue entry is re-keyed by the new entropy.
    /// Contradictions reset the neighbor to uniform and are recorded in `log`.
    ///
    /// Returns the number of neighbors updated.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the collapsed type is outside the
    /// model, an uncollapsed neighbor is missing from the queue, or a
    /// probability becomes not-a-number
    pub fn propagate(
        &self,
        wave: &mut WaveGrid,
        queue: &mut EntropyQueue,
        log: &mut ContradictionLog,
        cell: usize,
        type_index: usize,
    ) -> Result<usize> {
        let (width, height) = (wave.width(), wave.height());
        let mut updated = 0;

        for (direction, neighbor) in neighbors(cell, width, height) {
            if wave.is_collapsed(neighbor) {
                continue;
            }

            let expected = self
                .adjacency
                .distribution(type_index, direction)
                .ok_or_else(|| {
                    invariant_violation(
                        "propagate",
                        &format!("type index {type_index} outside adjacency model"),
                    )
                })?
                .to_vec();
            let current = wave.cell_vec(neighbor).ok_or_else(|| {
                invariant_violation("propagate", &format!("neighbor {neighbor} outside wave grid"))
            })?;

            match combine(&expected, &current, self.unobserved)? {
                Combined::Distribution(distribution) => {
                    wave.set_distribution(neighbor, &distribution)?;
                }
                Combined::Contradiction => {
                    wave.reset_uniform(neighbor)?;
                    log.record(Contradiction {
                        cell: neighbor,
                        source: cell,
                        direction,
                    });
                }
            }

            let entropy = wave
                .cell_vec(neighbor)
                .map(|distribution| shannon_entropy(&distribution))
                .unwrap_or_default();
            if !queue.update(neighbor, entropy) {
                return Err(invariant_violation(
                    "propagate",
                    &format!("uncollapsed cell {neighbor} is missing from the entropy queue"),
                ));
            }
            updated += 1;
        }

        Ok(updated)
    }
}
