/// Summary statistics reducing a distribution to fixed-length features.
///
/// All three measures use the population (biased) estimators: variance
/// divides by `n`, and skewness is the third standardized moment
/// `m3 / m2^(3/2)`.
///
/// # Degenerate distributions
///
/// The convention, applied uniformly across every statistic in the
/// workspace:
///
/// - an empty distribution has no summary: [`DistributionSummary::new`]
///   returns `None` and the caller decides how to flag it;
/// - a single value, or any distribution with zero variance, yields
///   `std_dev = 0` and `skew = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionSummary {
    /// Arithmetic mean.
    pub mean: f32,
    /// Population standard deviation.
    pub std_dev: f32,
    /// Third standardized moment; 0 for zero-variance input.
    pub skew: f32,
}

impl DistributionSummary {
    /// Computes the summary, or `None` for an empty distribution.
    ///
    /// Order-independent: mean, standard deviation, and skew do not depend
    /// on the input ordering.
    ///
    /// # Examples
    ///
    /// ```
    /// use spategt_stats::summary::DistributionSummary;
    ///
    /// let summary = DistributionSummary::new(&[3.0, 3.0, 3.0]).unwrap();
    /// assert_eq!(summary.mean, 3.0);
    /// assert_eq!(summary.std_dev, 0.0);
    /// assert_eq!(summary.skew, 0.0);
    ///
    /// assert!(DistributionSummary::new(&[]).is_none());
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(values: &[f32]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f32;
        let mean = values.iter().sum::<f32>() / n;

        let mut m2 = 0.0f32;
        let mut m3 = 0.0f32;
        for v in values {
            let d = v - mean;
            m2 += d * d;
            m3 += d * d * d;
        }
        m2 /= n;
        m3 /= n;

        let std_dev = m2.sqrt();
        let skew = if std_dev > 0.0 {
            m3 / (std_dev * std_dev * std_dev)
        } else {
            0.0
        };

        Some(Self {
            mean,
            std_dev,
            skew,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_none() {
        assert!(DistributionSummary::new(&[]).is_none());
    }

    #[test]
    fn test_single_value() {
        let s = DistributionSummary::new(&[7.5]).unwrap();
        assert_eq!(s.mean, 7.5);
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.skew, 0.0);
    }

    #[test]
    fn test_identical_values() {
        let s = DistributionSummary::new(&[2.0; 100]).unwrap();
        assert_eq!(s.mean, 2.0);
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.skew, 0.0);
    }

    #[test]
    fn test_population_std_dev() {
        // Population variance of [1, 2, 3, 4] is 1.25.
        let s = DistributionSummary::new(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((s.mean - 2.5).abs() < 1e-6);
        assert!((s.std_dev - 1.25f32.sqrt()).abs() < 1e-6);
        // Symmetric distribution has zero skew.
        assert!(s.skew.abs() < 1e-6);
    }

    #[test]
    fn test_right_skewed_is_positive() {
        let s = DistributionSummary::new(&[1.0, 1.0, 1.0, 1.0, 10.0]).unwrap();
        assert!(s.skew > 0.0);
    }

    #[test]
    fn test_left_skewed_is_negative() {
        let s = DistributionSummary::new(&[10.0, 10.0, 10.0, 10.0, 1.0]).unwrap();
        assert!(s.skew < 0.0);
    }

    #[test]
    fn test_order_invariance() {
        let a = DistributionSummary::new(&[0.1, 0.9, 0.4, 0.4, 0.7]).unwrap();
        let b = DistributionSummary::new(&[0.7, 0.4, 0.9, 0.4, 0.1]).unwrap();
        assert_eq!(a, b);
    }
}
