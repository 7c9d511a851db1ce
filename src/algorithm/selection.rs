use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::io::error::{Result, invariant_violation};
use crate::math::probability::inverse_cdf;

/// Seeded random selector for reproducible stochastic choices
///
/// Every random decision of a generation goes through one selector, so the
/// same seed yields the same sequence of picks.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform draw in `[0, 1)`
    pub fn draw(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform slot in `0..len`, or `None` when `len` is zero
    pub fn pick_slot(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }

    /// Sample a type index from a distribution by inverse-CDF lookup
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the distribution carries no mass
    pub fn sample_type(&mut self, probabilities: &[f64]) -> Result<usize> {
        let draw = self.draw();
        inverse_cdf(probabilities, draw).ok_or_else(|| {
            invariant_violation(
                "sample_type",
                &format!("distribution {probabilities:?} has no probability mass"),
            )
        })
    }
}
