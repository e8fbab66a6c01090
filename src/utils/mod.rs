//! Utility functions shared by the metrics.

pub mod stats;

pub use stats::{mean, pearson_correlation, std_dev, variance};
