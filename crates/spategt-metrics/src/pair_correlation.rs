use std::f32::consts::PI;

use spategt_core::{CellType, PointSample, SpatialIndex};

use crate::statistic::{BoxedSpatialStatistic, SpatialStatistic, StatisticError, StatisticValue};

/// Cross pair-correlation function g(r) between two subpopulations.
///
/// For each radius bin `r = k * annulus_step`, counts the ordered pairs
/// (one `from`-point, one `to`-point) whose distance falls inside the annulus
/// `[r - w/2, r + w/2)` with `w = annulus_width` and the inner bound clamped
/// at 0, then normalizes by the count expected under complete spatial
/// randomness:
///
/// ```text
/// g(r) = pairs(r) / (count(from) * density(to) * annulus_area(r))
/// ```
///
/// where `density(to)` uses the sample's own bounding-box area. Under random
/// mixing g(r) is near 1; attraction between the populations pushes it above
/// 1 at short range, segregation below.
///
/// The profile has `ceil(max_radius / annulus_step)` bins. Annuli overlap
/// when `annulus_width > annulus_step`, so one pair can contribute to
/// several bins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossPairCorrelation {
    pub from: CellType,
    pub to: CellType,
    pub max_radius: f32,
    pub annulus_step: f32,
    pub annulus_width: f32,
}

impl CrossPairCorrelation {
    fn bin_bounds(&self, k: usize) -> (f32, f32) {
        #[expect(clippy::cast_precision_loss)]
        let r = k as f32 * self.annulus_step;
        let half = self.annulus_width / 2.0;
        ((r - half).max(0.0), r + half)
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn num_bins(&self) -> usize {
        (self.max_radius / self.annulus_step).ceil() as usize
    }
}

impl SpatialStatistic for CrossPairCorrelation {
    fn clone_boxed(&self) -> BoxedSpatialStatistic {
        Box::new(*self)
    }

    #[expect(clippy::cast_precision_loss)]
    fn compute(&self, sample: &PointSample) -> Result<StatisticValue, StatisticError> {
        let from = sample.coords_of(self.from);
        if from.is_empty() {
            return Err(StatisticError::MissingPopulation {
                cell_type: self.from,
            });
        }
        let to = sample.coords_of(self.to);
        if to.is_empty() {
            return Err(StatisticError::MissingPopulation { cell_type: self.to });
        }

        let num_bins = self.num_bins();
        let (_, max_query) = self.bin_bounds(num_bins - 1);
        let index = SpatialIndex::build(&to);

        let mut pair_counts = vec![0u64; num_bins];
        for &p in &from {
            for neighbor in index.within_radius(p, max_query) {
                let q = to[neighbor];
                let d = (p[0] - q[0]).hypot(p[1] - q[1]);
                for (k, count) in pair_counts.iter_mut().enumerate() {
                    let (lo, hi) = self.bin_bounds(k);
                    if d >= lo && d < hi {
                        *count += 1;
                    }
                }
            }
        }

        let area = sample.area();
        let density = to.len() as f32 / area;
        let profile = pair_counts
            .iter()
            .enumerate()
            .map(|(k, &pairs)| {
                let (lo, hi) = self.bin_bounds(k);
                let annulus_area = PI * (hi * hi - lo * lo);
                let expected = from.len() as f32 * density * annulus_area;
                if expected > 0.0 {
                    (pairs as f32 / expected).max(0.0)
                } else {
                    0.0
                }
            })
            .collect();
        Ok(StatisticValue::Profile(profile))
    }
}

#[cfg(test)]
mod tests {
    use spategt_core::{CellPoint, DataType};

    use super::*;

    fn sample(points: Vec<CellPoint>) -> PointSample {
        PointSample::new("src".into(), "0".into(), DataType::InSilico, points).unwrap()
    }

    fn point(x: f32, y: f32, cell_type: CellType) -> CellPoint {
        CellPoint { x, y, cell_type }
    }

    const CPCF: CrossPairCorrelation = CrossPairCorrelation {
        from: CellType::Sensitive,
        to: CellType::Resistant,
        max_radius: 5.0,
        annulus_step: 1.0,
        annulus_width: 3.0,
    };

    #[test]
    fn test_profile_length() {
        let s = sample(vec![
            point(0.0, 0.0, CellType::Sensitive),
            point(1.0, 0.0, CellType::Resistant),
        ]);
        let value = CPCF.compute(&s).unwrap();
        assert_eq!(value.values().unwrap().len(), 5);
    }

    #[test]
    fn test_single_pair_hits_only_containing_annuli() {
        // One S-R pair at distance 3. With step 1 and width 3 the annuli are
        // [0, 1.5), [0, 2.5), [0.5, 3.5), [1.5, 4.5), [2.5, 5.5); distance 3
        // falls in bins 2, 3, and 4 only.
        let s = sample(vec![
            point(0.0, 0.0, CellType::Sensitive),
            point(3.0, 0.0, CellType::Resistant),
            // Far-away points stretch the bounding box without pairing.
            point(100.0, 100.0, CellType::Sensitive),
            point(100.0, 0.0, CellType::Resistant),
        ]);
        let value = CPCF.compute(&s).unwrap();
        let profile = value.values().unwrap();
        assert_eq!(profile[0], 0.0);
        assert_eq!(profile[1], 0.0);
        assert!(profile[2] > 0.0);
        assert!(profile[3] > 0.0);
        assert!(profile[4] > 0.0);
    }

    #[test]
    fn test_values_are_non_negative() {
        let mut points = Vec::new();
        for i in 0..10 {
            #[expect(clippy::cast_precision_loss)]
            let x = i as f32;
            points.push(point(x, 0.0, CellType::Sensitive));
            points.push(point(x, 5.0, CellType::Resistant));
        }
        let value = CPCF.compute(&sample(points)).unwrap();
        assert!(value.values().unwrap().iter().all(|&g| g >= 0.0));
    }

    #[test]
    fn test_missing_population() {
        let s = sample(vec![point(0.0, 0.0, CellType::Resistant)]);
        let err = CPCF.compute(&s).unwrap_err();
        assert_eq!(
            err,
            StatisticError::MissingPopulation {
                cell_type: CellType::Sensitive
            }
        );
    }
}
