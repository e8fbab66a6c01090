//! Model evaluation metrics.
//!
//! For a description of common verification metrics, see the EUMETRAIN
//! verification course: <http://www.eumetrain.org/data/4/451/english/courses/msgcrs/index.htm>

pub mod categorical;
pub mod contingency;
pub mod continuous;

pub use categorical::{
    base_chance, equitable_threat_score, frequency_bias, percent_correct,
    probability_of_detection, probability_of_false_alarm, probability_of_false_detection,
    threat_score, CategoricalScores,
};
pub use contingency::{compute_contingency_table, ContingencyKeys, ContingencyTable, CountMapping};
pub use continuous::{
    coefficient_of_extrapolation, coefficient_of_persistence, kling_gupta_components,
    kling_gupta_efficiency, mean_absolute_error, mean_error, mean_error_skill_score,
    mean_squared_error, nash_sutcliffe_efficiency, root_mean_squared_error, EfficiencyConfig,
    EfficiencyMetrics, KgeComponents, KgeScaling,
};

/// Log target used for numeric degeneracy warnings.
pub const LOG_TARGET: &str = "hydrotools::metrics";

/// IEEE-754 division that warns when the denominator is zero.
///
/// The quotient is returned unchanged: `0/0` is NaN, `x/0` is infinite.
/// NaN operands propagate without a warning.
pub(crate) fn divide(numerator: f64, denominator: f64, metric: &str) -> f64 {
    if denominator == 0.0 {
        log::warn!(
            target: LOG_TARGET,
            "{metric}: division by zero ({numerator} / {denominator})"
        );
    }
    numerator / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divide_follows_ieee_semantics() {
        assert_eq!(divide(1.0, 4.0, "test"), 0.25);
        assert!(divide(0.0, 0.0, "test").is_nan());
        assert_eq!(divide(1.0, 0.0, "test"), f64::INFINITY);
        assert_eq!(divide(-1.0, 0.0, "test"), f64::NEG_INFINITY);
        assert!(divide(f64::NAN, 2.0, "test").is_nan());
    }
}
