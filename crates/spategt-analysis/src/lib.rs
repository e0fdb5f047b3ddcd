//! Statistic catalog and feature extraction.
//!
//! Sits between the statistic computers and the batch driver: the
//! [`params::StatisticCatalog`] says which statistics exist and which
//! geometric parameters apply per data source, and the
//! [`extract::FeatureExtractor`] turns one sample plus its payoff matrix
//! into a flat feature row (or a typed skip reason).
//!
//! # Examples
//!
//! ```
//! use spategt_analysis::{extract::FeatureExtractor, params::StatisticCatalog};
//! use spategt_core::DataType;
//!
//! let catalog = StatisticCatalog::builtin();
//! catalog.validate(DataType::InSilico)?;
//!
//! let names = vec!["Proportion_Sensitive".to_string()];
//! let extractor = FeatureExtractor::new(&catalog, DataType::InSilico, &names, 42, 100)?;
//! assert_eq!(extractor.statistic_names().count(), 1);
//! # Ok::<(), spategt_analysis::params::ConfigError>(())
//! ```

pub mod extract;
pub mod params;
