//! # hydrotools
//!
//! Evaluation metrics for hydrologic models.
//!
//! Provides contingency-table skill scores for event detection
//! (probability of detection, threat score, equitable threat score, ...)
//! and continuous efficiency statistics for paired observed/simulated
//! series (mean error, Nash-Sutcliffe efficiency and its persistence and
//! extrapolation variants, Kling-Gupta efficiency). Degenerate inputs
//! produce NaN rather than errors; malformed inputs (wrong dimensionality,
//! mismatched lengths, missing table labels) are reported as
//! [`MetricsError`].
//!
//! Supporting modules convert between hydrologic units and validate
//! Social Vulnerability Index query parameters.
//!
//! ```
//! use hydrotools::prelude::*;
//!
//! let y_true = [1.0, 2.0, 3.0, 4.0];
//! let y_pred = [4.0, 3.0, 2.0, 1.0];
//! let nse = nash_sutcliffe_efficiency(&y_true, &y_pred, &EfficiencyConfig::default()).unwrap();
//! assert_eq!(nse, -3.0);
//! ```

pub mod error;
pub mod location;
pub mod metrics;
pub mod units;
pub mod utils;
pub mod validation;

pub use error::{MetricsError, Result};

pub mod prelude {
    pub use crate::error::{MetricsError, Result};
    pub use crate::metrics::{
        base_chance, coefficient_of_extrapolation, coefficient_of_persistence,
        compute_contingency_table, equitable_threat_score, frequency_bias, kling_gupta_efficiency,
        mean_error, mean_error_skill_score, nash_sutcliffe_efficiency, percent_correct,
        probability_of_detection, probability_of_false_alarm, probability_of_false_detection,
        threat_score, CategoricalScores, ContingencyKeys, ContingencyTable, EfficiencyConfig,
        EfficiencyMetrics, KgeScaling,
    };
    pub use crate::units::{UnitHandler, UnitRegistry};
    pub use crate::validation::ArrayLike;
}
