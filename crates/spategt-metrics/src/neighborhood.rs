use spategt_core::{CellType, PointSample, SpatialIndex};

use crate::statistic::{BoxedSpatialStatistic, SpatialStatistic, StatisticError, StatisticValue};

/// Local neighborhood composition around one subpopulation.
///
/// For each point of type `center`, the fraction of its neighbors within
/// `radius` (any type, self excluded) that belong to the opposite
/// subpopulation. Points with no neighbors at all are excluded from the
/// distribution; a neighborhood made up entirely of same-type or unknown
/// cells contributes 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborhoodComposition {
    pub center: CellType,
    pub radius: f32,
}

impl SpatialStatistic for NeighborhoodComposition {
    fn clone_boxed(&self) -> BoxedSpatialStatistic {
        Box::new(*self)
    }

    #[expect(clippy::cast_precision_loss)]
    fn compute(&self, sample: &PointSample) -> Result<StatisticValue, StatisticError> {
        if sample.count_of(self.center) == 0 {
            return Err(StatisticError::MissingPopulation {
                cell_type: self.center,
            });
        }

        let points = sample.points();
        let index = SpatialIndex::build(&sample.all_coords());
        let opposite = self.center.opposite();

        let mut fractions = Vec::new();
        for (i, p) in points.iter().enumerate() {
            if p.cell_type != self.center {
                continue;
            }
            let neighbors = index.within_radius_excluding([p.x, p.y], self.radius, i);
            if neighbors.is_empty() {
                continue;
            }
            let opposite_count = neighbors
                .iter()
                .filter(|&&n| points[n].cell_type == opposite)
                .count();
            fractions.push(opposite_count as f32 / neighbors.len() as f32);
        }
        Ok(StatisticValue::Distribution(fractions))
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

    const AROUND_SENSITIVE: NeighborhoodComposition = NeighborhoodComposition {
        center: CellType::Sensitive,
        radius: 3.0,
    };

    #[test]
    fn test_isolated_pair() {
        // The lone S-R pair within radius: each sees only the other.
        let s = sample(vec![
            point(0.0, 0.0, CellType::Sensitive),
            point(1.0, 0.0, CellType::Resistant),
        ]);
        let value = AROUND_SENSITIVE.compute(&s).unwrap();
        assert_eq!(value.values().unwrap(), &[1.0]);
    }

    #[test]
    fn test_mixed_neighborhood_fraction() {
        // Center S at origin with two R and two S neighbors inside radius 3.
        let s = sample(vec![
            point(5.0, 5.0, CellType::Sensitive),
            point(6.0, 5.0, CellType::Resistant),
            point(4.0, 5.0, CellType::Resistant),
            point(5.0, 6.0, CellType::Sensitive),
            point(5.0, 4.0, CellType::Sensitive),
        ]);
        let value = AROUND_SENSITIVE.compute(&s).unwrap();
        let fractions = value.values().unwrap();
        // All three S points have neighbors; the center one sees 2 R of 4.
        assert_eq!(fractions.len(), 3);
        assert!(fractions.contains(&0.5));
    }

    #[test]
    fn test_zero_neighbor_points_are_excluded() {
        let s = sample(vec![
            point(0.0, 0.0, CellType::Sensitive),
            point(100.0, 100.0, CellType::Sensitive),
            point(1.0, 0.0, CellType::Resistant),
        ]);
        let value = AROUND_SENSITIVE.compute(&s).unwrap();
        // The far S point has no neighbors within radius 3 and drops out.
        assert_eq!(value.values().unwrap(), &[1.0]);
    }

    #[test]
    fn test_unknown_neighbors_dilute_the_fraction() {
        let s = sample(vec![
            point(0.0, 0.0, CellType::Sensitive),
            point(1.0, 0.0, CellType::Resistant),
            point(0.0, 1.0, CellType::Unknown),
        ]);
        let value = AROUND_SENSITIVE.compute(&s).unwrap();
        assert_eq!(value.values().unwrap(), &[0.5]);
    }

    #[test]
    fn test_missing_center_population() {
        let s = sample(vec![point(0.0, 0.0, CellType::Resistant)]);
        assert!(AROUND_SENSITIVE.compute(&s).is_err());
    }
}
