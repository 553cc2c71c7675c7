use crate::math::random::XorShiftStar;

/// Running weight totals for a candidate set
///
/// Keeps `Σw` and `Σ w·ln(w)` so entropy can be derived without a second pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WeightSums {
    /// Sum of candidate weights
    pub total: f64,
    /// Sum of `w·ln(w)` over candidates, with `0·ln(0)` taken as zero
    pub total_log: f64,
}

impl WeightSums {
    /// Accumulate sums over a sequence of weights
    pub fn from_weights<I>(weights: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        weights.into_iter().fold(Self::default(), |mut sums, weight| {
            sums.add(weight);
            sums
        })
    }

    /// Include one more weight
    pub fn add(&mut self, weight: f64) {
        self.total += weight;
        if weight > 0.0 {
            self.total_log += weight * weight.ln();
        }
    }

    /// Weighted Shannon entropy `ln(Σw) − Σ w·ln(w) / Σw`
    ///
    /// Empty and zero-weight sets report zero.
    pub fn entropy(&self) -> f64 {
        if self.total <= 0.0 {
            return 0.0;
        }
        self.total.ln() - self.total_log / self.total
    }
}

/// Weighted Shannon entropy of a set of candidate weights
pub fn weighted_entropy(weights: &[f64]) -> f64 {
    WeightSums::from_weights(weights.iter().copied()).entropy()
}

/// Draw an index with probability proportional to its weight
///
/// Draws `r` uniformly in `[0, Σw)` and returns the first index whose running
/// total exceeds it. Falls back to a uniform index when every weight is zero.
/// Returns `None` only for an empty slice.
pub fn weighted_index(weights: &[f64], rng: &mut XorShiftStar) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return rng.next_index(weights.len());
    }

    let threshold = rng.next_f64() * total;
    let mut cumulative = 0.0;
    for (index, &weight) in weights.iter().enumerate() {
        cumulative += weight;
        if cumulative > threshold {
            return Some(index);
        }
    }

    // Rounding can leave the running total a hair short of the threshold
    weights.iter().rposition(|&weight| weight > 0.0)
}
