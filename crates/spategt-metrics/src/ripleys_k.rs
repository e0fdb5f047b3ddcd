use spategt_core::{CellType, PointSample, SpatialIndex};

use crate::statistic::{BoxedSpatialStatistic, SpatialStatistic, StatisticError, StatisticValue};

/// Cross Ripley's K function between two subpopulations.
///
/// For each radius `r = step, 2*step, ..., max_radius`:
///
/// ```text
/// K(r) = area / (count(from) * count(to)) * sum over from-points a of
///        |{ to-points b : d(a, b) <= r }|
/// ```
///
/// with `area` the sample's bounding-box area. K is cumulative, so the
/// profile is non-decreasing in r.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossRipleysK {
    pub from: CellType,
    pub to: CellType,
    pub max_radius: f32,
    pub step: f32,
}

impl SpatialStatistic for CrossRipleysK {
    fn clone_boxed(&self) -> BoxedSpatialStatistic {
        Box::new(*self)
    }

    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
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

        let num_bins = (self.max_radius / self.step).round() as usize;
        let index = SpatialIndex::build(&to);

        // Each pair is counted once at its smallest covering radius, then
        // accumulated so bin k holds all pairs with distance <= (k+1)*step.
        let mut counts = vec![0u64; num_bins];
        for &p in &from {
            for neighbor in index.within_radius(p, self.max_radius) {
                let q = to[neighbor];
                let d = (p[0] - q[0]).hypot(p[1] - q[1]);
                let bin = ((d / self.step).ceil() as usize).max(1) - 1;
                counts[bin.min(num_bins - 1)] += 1;
            }
        }
        for k in 1..num_bins {
            counts[k] += counts[k - 1];
        }

        let norm = sample.area() / (from.len() as f32 * to.len() as f32);
        let profile = counts.iter().map(|&c| c as f32 * norm).collect();
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

    const CROSS_K: CrossRipleysK = CrossRipleysK {
        from: CellType::Sensitive,
        to: CellType::Resistant,
        max_radius: 6.0,
        step: 1.0,
    };

    #[test]
    fn test_profile_length_and_monotonicity() {
        let mut points = Vec::new();
        for i in 0..8 {
            #[expect(clippy::cast_precision_loss)]
            let x = i as f32;
            points.push(point(x, 0.0, CellType::Sensitive));
            points.push(point(x, 3.0, CellType::Resistant));
        }
        let value = CROSS_K.compute(&sample(points)).unwrap();
        let profile = value.values().unwrap();
        assert_eq!(profile.len(), 6);
        for pair in profile.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn test_single_pair_counts_from_its_distance() {
        // One S-R pair at distance 4; the far points fix a 10 x 10 box.
        let s = sample(vec![
            point(0.0, 0.0, CellType::Sensitive),
            point(4.0, 0.0, CellType::Resistant),
            point(10.0, 10.0, CellType::Unknown),
        ]);
        let value = CROSS_K.compute(&s).unwrap();
        let profile = value.values().unwrap();
        // area / (1 * 1) * 1 pair = 100 from r = 4 onwards, 0 before.
        assert_eq!(profile[..3], [0.0, 0.0, 0.0]);
        assert_eq!(profile[3..], [100.0, 100.0, 100.0]);
    }

    #[test]
    fn test_missing_population() {
        let s = sample(vec![point(0.0, 0.0, CellType::Sensitive)]);
        assert!(CROSS_K.compute(&s).is_err());
    }
}
