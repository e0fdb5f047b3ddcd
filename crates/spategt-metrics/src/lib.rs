//! Spatial statistic computers for labeled cell-point samples.
//!
//! Each computer measures one aspect of how the sensitive and resistant
//! subpopulations are arranged in space and implements the
//! [`SpatialStatistic`] trait, so the extraction layer can drive any mix of
//! them through one seam. Outputs come in three shapes ([`StatisticValue`]):
//! scalars, fixed-length radius profiles, and variable-length distributions
//! that get summarized downstream.
//!
//! # Computers
//!
//! - [`NearestNeighborDistance`]: distance from each point of one type to
//!   the closest point of the other
//! - [`CrossPairCorrelation`]: cross pair-correlation function g(r) over
//!   annulus bins
//! - [`CrossRipleysK`]: cumulative cross Ripley's K profile
//! - [`NeighborhoodComposition`]: per-point opposite-type fraction inside a
//!   fixed radius
//! - [`SubsampleFraction`]: sensitive fraction across random subsample
//!   windows, with a seeded, reproducible window stream
//! - [`ProportionSensitive`]: whole-sample sensitive fraction
//!
//! # Examples
//!
//! ```
//! use spategt_core::{CellPoint, CellType, DataType, PointSample};
//! use spategt_metrics::{NearestNeighborDistance, SpatialStatistic as _, StatisticValue};
//!
//! let sample = PointSample::new(
//!     "demo".into(),
//!     "0".into(),
//!     DataType::InSilico,
//!     vec![
//!         CellPoint { x: 0.0, y: 0.0, cell_type: CellType::Sensitive },
//!         CellPoint { x: 3.0, y: 4.0, cell_type: CellType::Resistant },
//!     ],
//! )?;
//! let nn = NearestNeighborDistance {
//!     from: CellType::Sensitive,
//!     to: CellType::Resistant,
//! };
//! assert_eq!(nn.compute(&sample)?, StatisticValue::Distribution(vec![5.0]));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    nearest_neighbor::NearestNeighborDistance,
    neighborhood::NeighborhoodComposition,
    pair_correlation::CrossPairCorrelation,
    proportion::ProportionSensitive,
    ripleys_k::CrossRipleysK,
    statistic::{BoxedSpatialStatistic, SpatialStatistic, StatisticError, StatisticValue},
    subsample::{SubsampleFraction, SubsampleMode},
};

mod nearest_neighbor;
mod neighborhood;
mod pair_correlation;
mod proportion;
mod ripleys_k;
mod statistic;
mod subsample;
