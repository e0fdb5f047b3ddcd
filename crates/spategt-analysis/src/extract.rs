//! Per-sample feature extraction.
//!
//! Turns one sample plus its payoff matrix into a flat feature row, or a
//! typed skip reason. Skips are per-sample outcomes the batch driver counts
//! and reports; they never abort a batch.

use std::collections::BTreeMap;

use serde::Serialize;
use spategt_core::{CellType, DataType, GameLabel, PayoffMatrix, PointSample};
use spategt_metrics::{BoxedSpatialStatistic, StatisticError, StatisticValue};
use spategt_stats::summary::DistributionSummary;

use crate::params::{ConfigError, StatisticCatalog};

/// Minimum viable size for each subpopulation; samples where either one has
/// fallen below this are treated as post-extinction and excluded.
pub const DEFAULT_MIN_COUNT: usize = 100;

/// One output row of the feature table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    pub source_id: String,
    pub sample_id: String,
    pub game: GameLabel,
    /// Sorted by feature name, so every row presents the same column order.
    pub features: BTreeMap<String, f32>,
}

/// Why a sample was excluded from the feature table.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SampleSkip {
    /// A subpopulation is below the minimum viable count.
    #[display("{cell_type} population {count} is below the minimum {min_count}")]
    Extinct {
        cell_type: CellType,
        count: usize,
        min_count: usize,
    },
    /// The payoff matrix does not map to one of the four games.
    #[display("payoff matrix maps to the unknown game")]
    UnknownGame,
    /// A statistic precondition failed.
    #[display("statistic {name:?} skipped the sample: {source}")]
    Statistic { name: String, source: StatisticError },
    /// A distribution-typed statistic produced no values to summarize.
    #[display("statistic {name:?} produced an empty distribution")]
    EmptyDistribution { name: String },
}

/// A configured set of statistic computers producing one row per sample.
///
/// Built once per batch from the catalog; the resulting extractor is
/// immutable and `Send + Sync`, so a worker pool can share it by reference.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    computers: Vec<NamedComputer>,
    min_count: usize,
}

#[derive(Debug, Clone)]
struct NamedComputer {
    name: String,
    computer: BoxedSpatialStatistic,
    is_profile: bool,
}

impl FeatureExtractor {
    /// Resolves `names` against the catalog for one data type.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if a name is unknown or lacks a parameter record for
    /// `data_type`.
    pub fn new(
        catalog: &StatisticCatalog,
        data_type: DataType,
        names: &[String],
        seed: u64,
        min_count: usize,
    ) -> Result<Self, ConfigError> {
        let mut computers = Vec::with_capacity(names.len());
        for name in names {
            let params = catalog.resolve(name, data_type)?;
            computers.push(NamedComputer {
                name: name.clone(),
                computer: params.build(seed),
                is_profile: params.is_profile(),
            });
        }
        Ok(Self {
            computers,
            min_count,
        })
    }

    /// Computes the feature row for one sample.
    ///
    /// Exclusion order: extinction first, then the game label, then the
    /// statistics in catalog order.
    ///
    /// # Errors
    ///
    /// [`SampleSkip`] describing why the sample is excluded.
    pub fn extract(
        &self,
        sample: &PointSample,
        payoff: &PayoffMatrix,
    ) -> Result<FeatureRow, SampleSkip> {
        for cell_type in [CellType::Sensitive, CellType::Resistant] {
            let count = sample.count_of(cell_type);
            if count < self.min_count {
                return Err(SampleSkip::Extinct {
                    cell_type,
                    count,
                    min_count: self.min_count,
                });
            }
        }
        let game = payoff.game();
        if game == GameLabel::Unknown {
            return Err(SampleSkip::UnknownGame);
        }

        let mut features = BTreeMap::new();
        for entry in &self.computers {
            let value =
                entry.computer
                    .compute(sample)
                    .map_err(|source| SampleSkip::Statistic {
                        name: entry.name.clone(),
                        source,
                    })?;
            match value {
                StatisticValue::Scalar(v) => {
                    features.insert(entry.name.clone(), v);
                }
                StatisticValue::Profile(values) | StatisticValue::Distribution(values) => {
                    let summary = DistributionSummary::new(&values).ok_or_else(|| {
                        SampleSkip::EmptyDistribution {
                            name: entry.name.clone(),
                        }
                    })?;
                    features.insert(format!("{}_mean", entry.name), summary.mean);
                    features.insert(format!("{}_std", entry.name), summary.std_dev);
                    features.insert(format!("{}_skew", entry.name), summary.skew);
                    if entry.is_profile {
                        features.insert(format!("{}_0", entry.name), values[0]);
                    }
                }
            }
        }

        Ok(FeatureRow {
            source_id: sample.source_id().to_string(),
            sample_id: sample.sample_id().to_string(),
            game,
            features,
        })
    }

    /// Names of the configured statistics, in extraction order.
    pub fn statistic_names(&self) -> impl Iterator<Item = &str> {
        self.computers.iter().map(|entry| entry.name.as_str())
    }
}
