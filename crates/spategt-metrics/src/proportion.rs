use spategt_core::{CellType, PointSample};

use crate::statistic::{BoxedSpatialStatistic, SpatialStatistic, StatisticError, StatisticValue};

/// Overall sensitive fraction `count(S) / (count(S) + count(R))`.
///
/// Points of unknown type are not part of either count. Purely
/// compositional, no spatial structure involved; kept alongside the spatial
/// statistics because the downstream feature table treats it as one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProportionSensitive;

impl SpatialStatistic for ProportionSensitive {
    fn clone_boxed(&self) -> BoxedSpatialStatistic {
        Box::new(*self)
    }

    #[expect(clippy::cast_precision_loss)]
    fn compute(&self, sample: &PointSample) -> Result<StatisticValue, StatisticError> {
        let sensitive = sample.count_of(CellType::Sensitive);
        let resistant = sample.count_of(CellType::Resistant);
        if sensitive + resistant == 0 {
            return Err(StatisticError::MissingPopulation {
                cell_type: CellType::Sensitive,
            });
        }
        let fraction = sensitive as f32 / (sensitive + resistant) as f32;
        Ok(StatisticValue::Scalar(fraction))
    }
}
