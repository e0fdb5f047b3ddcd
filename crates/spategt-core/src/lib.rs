//! Core data model for spatial evolutionary-game analysis.
//!
//! This crate defines the types every other crate in the workspace consumes:
//!
//! - [`sample`]: labeled 2D point sets ([`PointSample`]) with provenance
//!   (data source, sample id, physical-scale regime)
//! - [`index`]: a read-only spatial index ([`SpatialIndex`]) supporting
//!   radius and nearest-neighbor queries
//! - [`payoff`]: 2×2 payoff matrices ([`PayoffMatrix`]) and their
//!   deterministic classification into game regimes ([`GameLabel`])

pub use self::{
    index::SpatialIndex,
    payoff::{GameLabel, PayoffMatrix},
    sample::{CellPoint, CellType, DataType, PointSample, SampleError},
};

pub mod index;
pub mod payoff;
pub mod sample;
