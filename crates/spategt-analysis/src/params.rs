//! The statistic catalog: which statistics exist and which geometric
//! parameters they take per data source.
//!
//! Simulated lattices and experimental images differ in physical scale by
//! roughly an order of magnitude, so every statistic carries one parameter
//! record per [`DataType`]. The catalog is an explicit table validated
//! before any sample work starts; a missing `(statistic, data type)` entry
//! is a configuration error that aborts the run, never a runtime fallback.
//!
//! The whole table serializes to JSON so the physical-scale assumptions can
//! be versioned and edited outside the binary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use spategt_core::{CellType, DataType};
use spategt_metrics::{
    BoxedSpatialStatistic, CrossPairCorrelation, CrossRipleysK, NearestNeighborDistance,
    NeighborhoodComposition, ProportionSensitive, SubsampleFraction, SubsampleMode,
};

/// Typed parameter record for one statistic computer.
///
/// Heterogeneous across statistics, homogeneous within one: every data-type
/// record of a given catalog entry uses the same variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "statistic", rename_all = "snake_case")]
pub enum StatisticParams {
    NearestNeighbor {
        from: CellType,
        to: CellType,
    },
    PairCorrelation {
        from: CellType,
        to: CellType,
        max_radius: f32,
        annulus_step: f32,
        annulus_width: f32,
    },
    RipleysK {
        from: CellType,
        to: CellType,
        max_radius: f32,
        step: f32,
    },
    Neighborhood {
        center: CellType,
        radius: f32,
    },
    Subsample {
        window_len: f32,
        num_windows: usize,
        mode: SubsampleMode,
    },
    Proportion,
}

impl StatisticParams {
    /// Instantiates the computer this record parameterizes. `seed` only
    /// affects computers that draw random numbers.
    #[must_use]
    pub fn build(&self, seed: u64) -> BoxedSpatialStatistic {
        match *self {
            StatisticParams::NearestNeighbor { from, to } => {
                Box::new(NearestNeighborDistance { from, to })
            }
            StatisticParams::PairCorrelation {
                from,
                to,
                max_radius,
                annulus_step,
                annulus_width,
            } => Box::new(CrossPairCorrelation {
                from,
                to,
                max_radius,
                annulus_step,
                annulus_width,
            }),
            StatisticParams::RipleysK {
                from,
                to,
                max_radius,
                step,
            } => Box::new(CrossRipleysK {
                from,
                to,
                max_radius,
                step,
            }),
            StatisticParams::Neighborhood { center, radius } => {
                Box::new(NeighborhoodComposition { center, radius })
            }
            StatisticParams::Subsample {
                window_len,
                num_windows,
                mode,
            } => Box::new(SubsampleFraction {
                window_len,
                num_windows,
                mode,
                seed,
            }),
            StatisticParams::Proportion => Box::new(ProportionSensitive),
        }
    }

    /// Whether the computer's output is a fixed-length radius profile.
    #[must_use]
    pub fn is_profile(&self) -> bool {
        matches!(
            self,
            StatisticParams::PairCorrelation { .. } | StatisticParams::RipleysK { .. }
        )
    }
}

/// One named catalog entry with its per-data-type parameter records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticSpec {
    pub name: String,
    pub params: BTreeMap<DataType, StatisticParams>,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("unknown statistic {name:?}")]
    UnknownStatistic { name: String },
    #[display("statistic {name:?} has no parameters for {data_type}")]
    MissingParams { name: String, data_type: DataType },
}

/// The ordered statistic table driving feature extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticCatalog {
    pub statistics: Vec<StatisticSpec>,
}

impl StatisticCatalog {
    /// The built-in table.
    ///
    /// Radii, steps, and window sizes encode the scale gap between lattice
    /// units (`in_silico`) and image units (`in_vitro`/`in_vivo`); entry
    /// name suffixes (`_Sensitive`/`_Resistant`) name the centered or
    /// source population.
    #[must_use]
    pub fn builtin() -> Self {
        let cross = |from: CellType| (from, from.opposite());
        let nn = |from: CellType| {
            let (from, to) = cross(from);
            same_for_all(StatisticParams::NearestNeighbor { from, to })
        };
        let cpcf = |from: CellType| {
            let (from, to) = cross(from);
            scaled(
                |(max_radius, annulus_step, annulus_width)| StatisticParams::PairCorrelation {
                    from,
                    to,
                    max_radius,
                    annulus_step,
                    annulus_width,
                },
                [(5.0, 1.0, 3.0), (50.0, 10.0, 30.0), (50.0, 10.0, 30.0)],
            )
        };
        let cross_k = |from: CellType| {
            let (from, to) = cross(from);
            scaled(
                |(max_radius, step)| StatisticParams::RipleysK {
                    from,
                    to,
                    max_radius,
                    step,
                },
                [(6.0, 1.0), (60.0, 10.0), (60.0, 10.0)],
            )
        };
        let nc = |center: CellType| {
            scaled(
                |radius| StatisticParams::Neighborhood { center, radius },
                [3.0, 30.0, 30.0],
            )
        };
        let sfp = scaled(
            |window_len| StatisticParams::Subsample {
                window_len,
                num_windows: 1000,
                mode: SubsampleMode::ObservedTotal,
            },
            [5.0, 50.0, 70.0],
        );

        let entries = [
            ("Proportion_Sensitive", same_for_all(StatisticParams::Proportion)),
            ("NC_Sensitive", nc(CellType::Sensitive)),
            ("NC_Resistant", nc(CellType::Resistant)),
            ("SFP", sfp),
            ("NN_Sensitive", nn(CellType::Sensitive)),
            ("NN_Resistant", nn(CellType::Resistant)),
            ("CPCF_Sensitive", cpcf(CellType::Sensitive)),
            ("CPCF_Resistant", cpcf(CellType::Resistant)),
            ("Cross_Ripleys_k_Sensitive", cross_k(CellType::Sensitive)),
            ("Cross_Ripleys_k_Resistant", cross_k(CellType::Resistant)),
        ];
        Self {
            statistics: entries
                .into_iter()
                .map(|(name, params)| StatisticSpec {
                    name: name.to_string(),
                    params,
                })
                .collect(),
        }
    }

    /// Names of all entries, in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.statistics.iter().map(|s| s.name.as_str())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StatisticSpec> {
        self.statistics.iter().find(|s| s.name == name)
    }

    /// Checks that every entry has a parameter record for `data_type`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingParams`] on the first entry without a record.
    /// Run this before batch work so a hole in the table aborts the run up
    /// front instead of mid-batch.
    pub fn validate(&self, data_type: DataType) -> Result<(), ConfigError> {
        for spec in &self.statistics {
            if !spec.params.contains_key(&data_type) {
                return Err(ConfigError::MissingParams {
                    name: spec.name.clone(),
                    data_type,
                });
            }
        }
        Ok(())
    }

    /// Looks up the parameter record for one entry and data type.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownStatistic`] or [`ConfigError::MissingParams`].
    pub fn resolve(
        &self,
        name: &str,
        data_type: DataType,
    ) -> Result<&StatisticParams, ConfigError> {
        let spec = self.get(name).ok_or_else(|| ConfigError::UnknownStatistic {
            name: name.to_string(),
        })?;
        spec.params
            .get(&data_type)
            .ok_or_else(|| ConfigError::MissingParams {
                name: name.to_string(),
                data_type,
            })
    }
}

/// The same record for every data type (scale-free statistics).
fn same_for_all(params: StatisticParams) -> BTreeMap<DataType, StatisticParams> {
    DataType::ALL
        .into_iter()
        .map(|dt| (dt, params.clone()))
        .collect()
}

/// One record per data type, built from per-scale values in
/// [`DataType::ALL`] order.
fn scaled<T, F>(make: F, values: [T; 3]) -> BTreeMap<DataType, StatisticParams>
where
    F: Fn(T) -> StatisticParams,
{
    DataType::ALL
        .into_iter()
        .zip(values)
        .map(|(dt, v)| (dt, make(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid_for_every_data_type() {
        let catalog = StatisticCatalog::builtin();
        for data_type in DataType::ALL {
            catalog.validate(data_type).unwrap();
        }
    }

    #[test]
    fn test_builtin_scale_gap() {
        let catalog = StatisticCatalog::builtin();
        let silico = catalog.resolve("NC_Sensitive", DataType::InSilico).unwrap();
        let vitro = catalog.resolve("NC_Sensitive", DataType::InVitro).unwrap();
        assert_eq!(
            *silico,
            StatisticParams::Neighborhood {
                center: CellType::Sensitive,
                radius: 3.0
            }
        );
        assert_eq!(
            *vitro,
            StatisticParams::Neighborhood {
                center: CellType::Sensitive,
                radius: 30.0
            }
        );
    }

    #[test]
    fn test_unknown_statistic() {
        let catalog = StatisticCatalog::builtin();
        let err = catalog.resolve("Typo", DataType::InSilico).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownStatistic {
                name: "Typo".to_string()
            }
        );
    }

    #[test]
    fn test_missing_params_fails_validation() {
        let mut catalog = StatisticCatalog::builtin();
        catalog.statistics[0].params.remove(&DataType::InVivo);
        assert!(catalog.validate(DataType::InSilico).is_ok());
        let err = catalog.validate(DataType::InVivo).unwrap_err();
        assert!(matches!(err, ConfigError::MissingParams { .. }));
    }

    #[test]
    fn test_catalog_json_round_trip() {
        let catalog = StatisticCatalog::builtin();
        let json = serde_json::to_string_pretty(&catalog).unwrap();
        let parsed: StatisticCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, catalog);
    }

    #[test]
    fn test_params_build_matching_computer() {
        let catalog = StatisticCatalog::builtin();
        let params = catalog.resolve("SFP", DataType::InSilico).unwrap();
        // Builds without panicking and is cloneable through the trait seam.
        let computer = params.build(7);
        let _ = computer.clone();
    }
}
