//! Statistical utilities for decision-time series.
//!
//! This crate provides the small set of numeric tools the rest of the
//! workspace needs to summarize and smooth per-player series:
//!
//! - **Descriptive statistics**: mean, median, min, max, variance, standard deviation
//! - **Percentiles**: linear-interpolation percentiles over a dataset
//! - **Outlier suppression**: the interquartile-range (IQR) rule
//! - **Moving averages**: centered windows truncated at the series boundaries
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile computation
//! - [`outliers`]: IQR-based outlier masks
//! - [`moving_average`]: Centered moving average
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use turnwatch_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Computing percentiles
//!
//! ```
//! use turnwatch_stats::percentiles::compute_percentile;
//!
//! let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
//! assert_eq!(compute_percentile(&sorted, 50.0), 3.0);
//! assert_eq!(compute_percentile(&sorted, 75.0), 4.0);
//! ```
//!
//! ## Suppressing outliers
//!
//! ```
//! use turnwatch_stats::outliers::OutlierRule;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 100.0];
//! let mask = OutlierRule::default().keep_mask(&values);
//! assert_eq!(mask, [true, true, true, true, false]);
//! ```
//!
//! ## Smoothing a series
//!
//! ```
//! use turnwatch_stats::moving_average::centered_moving_average;
//!
//! let smoothed = centered_moving_average(&[10.0, 20.0, 30.0], 3);
//! assert_eq!(smoothed, [15.0, 20.0, 25.0]);
//! ```

pub mod descriptive;
pub mod moving_average;
pub mod outliers;
pub mod percentiles;
