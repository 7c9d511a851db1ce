//! Discrete probability helpers shared by learning, propagation and sampling

/// Shannon entropy in bits
///
/// Zero-probability entries contribute exactly zero; `log2(0)` is never evaluated.
pub fn shannon_entropy(probabilities: &[f64]) -> f64 {
    let sum: f64 = probabilities
        .iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| p * p.log2())
        .sum();
    if sum < 0.0 { -sum } else { 0.0 }
}

/// Uniform distribution over `len` outcomes
pub fn uniform(len: usize) -> Vec<f64> {
    if len == 0 {
        return Vec::new();
    }
    vec![1.0 / len as f64; len]
}

/// Scale `values` in place so they sum to one
///
/// Returns the pre-normalization sum. Nothing is changed when the sum is not
/// positive, leaving the caller to decide how to recover.
pub fn normalize(values: &mut [f64]) -> f64 {
    let sum: f64 = values.iter().sum();
    if sum > 0.0 {
        for value in values.iter_mut() {
            *value /= sum;
        }
    }
    sum
}

/// Element-wise product of two equally sized distributions
pub fn elementwise_product(lhs: &[f64], rhs: &[f64]) -> Vec<f64> {
    lhs.iter().zip(rhs).map(|(a, b)| a * b).collect()
}

/// Inverse-CDF lookup of a uniform draw in `[0, 1)`
///
/// Walks the distribution accumulating mass and returns the first index whose
/// cumulative mass exceeds `draw`. When rounding leaves the total just below
/// the draw, the last index carrying mass is returned. `None` means the
/// distribution has no mass at all.
pub fn inverse_cdf(probabilities: &[f64], draw: f64) -> Option<usize> {
    let mut cumulative = 0.0;
    let mut last_with_mass = None;
    for (index, &p) in probabilities.iter().enumerate() {
        cumulative += p;
        if p > 0.0 {
            last_with_mass = Some(index);
        }
        if draw < cumulative {
            return Some(index);
        }
    }
    last_with_mass
}

/// Index of the strictly largest entry, keeping the first maximum on ties
pub fn first_argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in values.iter().enumerate() {
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index)
}
