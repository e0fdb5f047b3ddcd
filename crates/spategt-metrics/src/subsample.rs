use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use spategt_core::{CellType, PointSample};

use crate::statistic::{BoxedSpatialStatistic, SpatialStatistic, StatisticError, StatisticValue};

/// Denominator convention for [`SubsampleFraction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum SubsampleMode {
    /// Fraction of the observed points: `s / (s + r)`. Windows containing
    /// no sensitive or resistant point are dropped, so the output may be
    /// shorter than `num_windows`.
    #[display("observed_total")]
    ObservedTotal,
    /// Fraction of the window's full carrying capacity:
    /// `s / window_len^2`. Empty windows contribute 0 and the output length
    /// is always `num_windows`. Only meaningful for lattice data where one
    /// grid cell holds at most one point.
    #[display("full_capacity")]
    FullCapacity,
}

/// Fraction-sensitive distribution over random square subsample windows.
///
/// Places `num_windows` axis-aligned squares of side `window_len` uniformly
/// at random inside the sample extent and measures the sensitive fraction
/// inside each, per `mode`. A point is inside a window when
/// `origin <= coordinate < origin + window_len` on both axes.
///
/// Window placement draws from a Pcg32 stream derived from `seed` and the
/// sample identity, so results are reproducible for a fixed seed and do not
/// depend on the order samples are processed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubsampleFraction {
    pub window_len: f32,
    pub num_windows: usize,
    pub mode: SubsampleMode,
    pub seed: u64,
}

impl SubsampleFraction {
    /// Per-sample RNG stream: FNV-1a over the sample identity, mixed with
    /// the run seed.
    fn stream_seed(&self, sample: &PointSample) -> u64 {
        let mut h = 0xcbf2_9ce4_8422_2325_u64;
        let bytes = sample
            .source_id()
            .bytes()
            .chain([0])
            .chain(sample.sample_id().bytes());
        for b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(0x0000_0100_0000_01b3);
        }
        h ^ self.seed
    }
}

impl SpatialStatistic for SubsampleFraction {
    fn clone_boxed(&self) -> BoxedSpatialStatistic {
        Box::new(*self)
    }

    #[expect(clippy::cast_precision_loss)]
    fn compute(&self, sample: &PointSample) -> Result<StatisticValue, StatisticError> {
        let (extent_x, extent_y) = sample.extent();
        let max_x = (extent_x - self.window_len).max(0.0);
        let max_y = (extent_y - self.window_len).max(0.0);
        let mut rng = Pcg32::seed_from_u64(self.stream_seed(sample));

        let mut fractions = Vec::with_capacity(self.num_windows);
        for _ in 0..self.num_windows {
            let ox = rng.random_range(0.0..=max_x);
            let oy = rng.random_range(0.0..=max_y);
            let mut sensitive = 0usize;
            let mut resistant = 0usize;
            for p in sample.points() {
                let inside = p.x >= ox
                    && p.x < ox + self.window_len
                    && p.y >= oy
                    && p.y < oy + self.window_len;
                if !inside {
                    continue;
                }
                match p.cell_type {
                    CellType::Sensitive => sensitive += 1,
                    CellType::Resistant => resistant += 1,
                    CellType::Unknown => {}
                }
            }
            match self.mode {
                SubsampleMode::ObservedTotal => {
                    let total = sensitive + resistant;
                    if total > 0 {
                        fractions.push(sensitive as f32 / total as f32);
                    }
                }
                SubsampleMode::FullCapacity => {
                    let capacity = self.window_len * self.window_len;
                    fractions.push(sensitive as f32 / capacity);
                }
            }
        }
        Ok(StatisticValue::Distribution(fractions))
    }
}
