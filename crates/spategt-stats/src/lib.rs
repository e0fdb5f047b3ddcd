//! Distribution aggregation for spatial-statistic outputs.
//!
//! Distribution-typed statistics produce one value per point, pair, or
//! subsample window; this crate reduces them into forms usable downstream:
//!
//! - [`summary`]: fixed-length summary statistics (mean, standard deviation,
//!   skewness) used as machine-learning feature columns
//! - [`histogram`]: fixed-range normalized histograms used to compare the
//!   same statistic across samples and games
//!
//! # Examples
//!
//! ## Summarizing a distribution
//!
//! ```
//! use spategt_stats::summary::DistributionSummary;
//!
//! let values = [0.2, 0.4, 0.4, 0.6];
//! let summary = DistributionSummary::new(&values).unwrap();
//! assert!((summary.mean - 0.4).abs() < 1e-6);
//! ```
//!
//! ## Binning a distribution
//!
//! ```
//! use spategt_stats::histogram::Histogram;
//!
//! let histogram = Histogram::new(&[0.05, 0.15, 0.17, 0.95], 0.0, 1.0, 0.1);
//! assert_eq!(histogram.bins.len(), 10);
//! assert_eq!(histogram.bins[1].count, 2);
//! ```

pub mod histogram;
pub mod summary;
