use spategt_core::{CellType, PointSample, SpatialIndex};

use crate::statistic::{BoxedSpatialStatistic, SpatialStatistic, StatisticError, StatisticValue};

/// Nearest-neighbor distance distribution between two subpopulations.
///
/// Produces one value per `from`-point: the Euclidean distance to the
/// closest `to`-point. The output length is exactly `count(from)` and every
/// value is non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NearestNeighborDistance {
    pub from: CellType,
    pub to: CellType,
}

impl SpatialStatistic for NearestNeighborDistance {
    fn clone_boxed(&self) -> BoxedSpatialStatistic {
        Box::new(*self)
    }

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

        let index = SpatialIndex::build(&to);
        let distances = from
            .iter()
            .filter_map(|&p| index.nearest_distance(p))
            .collect();
        Ok(StatisticValue::Distribution(distances))
    }
}
