use std::ops::Range;

/// A fixed-range histogram of a distribution.
///
/// Unlike adaptive or percentile-based binning, the bin edges here are fully
/// determined by `(start, stop, step)` so that the same statistic binned for
/// different samples lands on identical bins and the resulting frequency
/// vectors are directly comparable.
#[derive(Debug, Clone)]
pub struct Histogram {
    /// Bins in ascending order; every bin spans `[range.start, range.end)`.
    pub bins: Vec<HistogramBin>,
}

/// One bin of a [`Histogram`].
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub range: Range<f32>,
    pub count: u64,
}

impl Histogram {
    /// Bins `values` into `[start + k·step, start + (k+1)·step)` for
    /// `k = 0 .. ceil((stop − start)/step)`.
    ///
    /// Values outside `[start, stop)` are ignored; for distributions with a
    /// known support (fractions in `[0, 1]`, bounded radii) the range is
    /// chosen to cover it, so nothing is dropped in practice.
    ///
    /// # Panics
    ///
    /// Panics if `step` is not strictly positive or `stop <= start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use spategt_stats::histogram::Histogram;
    ///
    /// let h = Histogram::new(&[0.0, 0.05, 0.5, 0.99], 0.0, 1.0, 0.5);
    /// assert_eq!(h.bins.len(), 2);
    /// assert_eq!(h.bins[0].count, 2);
    /// assert_eq!(h.bins[1].count, 2);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn new(values: &[f32], start: f32, stop: f32, step: f32) -> Self {
        assert!(step > 0.0, "bin step must be positive");
        assert!(stop > start, "bin range must be non-empty");

        let num_bins = ((stop - start) / step).ceil() as usize;
        let mut bins = Vec::with_capacity(num_bins);
        for k in 0..num_bins {
            bins.push(HistogramBin {
                range: (start + k as f32 * step)..(start + (k + 1) as f32 * step),
                count: 0,
            });
        }

        for &v in values {
            if v < start || v >= stop {
                continue;
            }
            let idx = (((v - start) / step) as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Total number of binned values.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Per-bin frequencies normalized by the binned total.
    ///
    /// An all-empty histogram yields all-zero frequencies.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn frequencies(&self) -> Vec<f32> {
        let total = self.total();
        if total == 0 {
            return vec![0.0; self.bins.len()];
        }
        self.bins
            .iter()
            .map(|b| b.count as f32 / total as f32)
            .collect()
    }
}
