use std::fmt;

use spategt_core::{CellType, PointSample};

/// The output shape of a statistic computer.
///
/// The shape is fixed per computer, not per sample: a computer that returns
/// a `Profile` of 5 bins for one sample returns 5 bins for every sample, so
/// downstream feature columns line up across a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum StatisticValue {
    /// A single number per sample.
    Scalar(f32),
    /// One value per fixed radius bin.
    Profile(Vec<f32>),
    /// One value per point, pair, or subsample window; summarized downstream.
    Distribution(Vec<f32>),
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StatisticError {
    /// A cell type the computer requires has no points in the sample.
    #[display("sample has no {cell_type} cells")]
    MissingPopulation { cell_type: CellType },
}

/// A spatial statistic computed from one sample.
///
/// Implementations are cheap, immutable parameter records; all per-sample
/// state lives inside [`SpatialStatistic::compute`]. `Send + Sync` lets the
/// batch driver share one configured computer across its worker pool.
pub trait SpatialStatistic: fmt::Debug + Send + Sync {
    fn clone_boxed(&self) -> BoxedSpatialStatistic;

    /// Computes the statistic over the sample.
    ///
    /// # Errors
    ///
    /// [`StatisticError::MissingPopulation`] if a required cell type has no
    /// points. Callers treat this as a per-sample skip, not a failure of the
    /// batch.
    fn compute(&self, sample: &PointSample) -> Result<StatisticValue, StatisticError>;
}

pub type BoxedSpatialStatistic = Box<dyn SpatialStatistic>;

impl Clone for BoxedSpatialStatistic {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

impl SpatialStatistic for BoxedSpatialStatistic {
    fn clone_boxed(&self) -> BoxedSpatialStatistic {
        self.as_ref().clone_boxed()
    }

    fn compute(&self, sample: &PointSample) -> Result<StatisticValue, StatisticError> {
        self.as_ref().compute(sample)
    }
}

impl StatisticValue {
    /// The scalar payload, if this is a `Scalar`.
    #[must_use]
    pub fn as_scalar(&self) -> Option<f32> {
        match self {
            StatisticValue::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    /// The value sequence of a `Profile` or `Distribution`.
    #[must_use]
    pub fn values(&self) -> Option<&[f32]> {
        match self {
            StatisticValue::Scalar(_) => None,
            StatisticValue::Profile(v) | StatisticValue::Distribution(v) => Some(v),
        }
    }
}
