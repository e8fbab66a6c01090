//! Continuous error and efficiency metrics for paired series.
//!
//! Every function takes the observed (`y_true`) and simulated (`y_pred`)
//! series as [`ArrayLike`] inputs. The Nash-Sutcliffe family is built on a
//! single primitive, [`mean_error_skill_score`], which compares the error of
//! the simulation against that of a reference baseline.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::divide;
use crate::error::Result;
use crate::utils::stats;
use crate::validation::{
    paired_vectors, raise_for_inconsistent_shapes, raise_for_non_vector, ArrayLike,
};

/// Options shared by the Nash-Sutcliffe family of efficiency scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EfficiencyConfig {
    /// Apply the natural logarithm to both series before scoring.
    pub log: bool,
    /// Exponent applied to each absolute error.
    pub power: f64,
    /// Rescale the score to (0, 1] following Nossent & Bauwens (2012).
    pub normalized: bool,
}

impl Default for EfficiencyConfig {
    fn default() -> Self {
        Self {
            log: false,
            power: 2.0,
            normalized: false,
        }
    }
}

impl EfficiencyConfig {
    /// Score log-transformed series.
    pub fn with_log(mut self) -> Self {
        self.log = true;
        self
    }

    /// Set the error exponent.
    pub fn with_power(mut self, power: f64) -> Self {
        self.power = power;
        self
    }

    /// Return the normalized score 1 / (1 + ratio).
    pub fn normalized(mut self) -> Self {
        self.normalized = true;
        self
    }
}

/// Scaling factors that emphasise individual Kling-Gupta components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KgeScaling {
    /// Linear correlation scaling.
    pub r: f64,
    /// Relative variability scaling.
    pub a: f64,
    /// Relative mean scaling.
    pub b: f64,
}

impl Default for KgeScaling {
    fn default() -> Self {
        Self {
            r: 1.0,
            a: 1.0,
            b: 1.0,
        }
    }
}

impl KgeScaling {
    /// Create explicit scaling factors.
    pub fn new(r: f64, a: f64, b: f64) -> Self {
        Self { r, a, b }
    }
}

/// Components of the Kling-Gupta efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KgeComponents {
    /// Pearson correlation between simulation and observation.
    pub r: f64,
    /// Ratio of standard deviations, simulated over observed.
    pub alpha: f64,
    /// Ratio of means, simulated over observed.
    pub beta: f64,
}

/// Compute the mean error between two series.
///
/// ME = (1/n) Σ |y_pred - y_true|^power
///
/// With `root` set the square root of the mean is returned. The root is a
/// square root for every `power`; `power = 2.0` with `root` is the RMSE.
///
/// # Errors
///
/// Returns a shape error if either input is not one-dimensional or the
/// lengths differ.
pub fn mean_error<A, B>(y_true: &A, y_pred: &B, power: f64, root: bool) -> Result<f64>
where
    A: ArrayLike<f64> + ?Sized,
    B: ArrayLike<f64> + ?Sized,
{
    let (y_true, y_pred) = paired_vectors(y_true, y_pred)?;
    let me = mean_error_values(&y_true, &y_pred, power);
    if root {
        return Ok(me.sqrt());
    }
    Ok(me)
}

/// Mean absolute error.
pub fn mean_absolute_error<A, B>(y_true: &A, y_pred: &B) -> Result<f64>
where
    A: ArrayLike<f64> + ?Sized,
    B: ArrayLike<f64> + ?Sized,
{
    mean_error(y_true, y_pred, 1.0, false)
}

/// Mean squared error.
pub fn mean_squared_error<A, B>(y_true: &A, y_pred: &B) -> Result<f64>
where
    A: ArrayLike<f64> + ?Sized,
    B: ArrayLike<f64> + ?Sized,
{
    mean_error(y_true, y_pred, 2.0, false)
}

/// Root mean squared error.
pub fn root_mean_squared_error<A, B>(y_true: &A, y_pred: &B) -> Result<f64>
where
    A: ArrayLike<f64> + ?Sized,
    B: ArrayLike<f64> + ?Sized,
{
    mean_error(y_true, y_pred, 2.0, true)
}

/// Compute a generic mean-error skill score of `y_pred` relative to `y_base`.
///
/// score = 1 - ME(y_true, y_pred) / ME(y_true, y_base)
///
/// When `normalized`, returns 1 / (1 + ratio) instead, which maps the score
/// onto (0, 1] (Nossent & Bauwens, 2012).
///
/// # Errors
///
/// Returns a shape error if any input is not one-dimensional or the
/// lengths differ.
pub fn mean_error_skill_score<A, B, C>(
    y_true: &A,
    y_pred: &B,
    y_base: &C,
    power: f64,
    normalized: bool,
) -> Result<f64>
where
    A: ArrayLike<f64> + ?Sized,
    B: ArrayLike<f64> + ?Sized,
    C: ArrayLike<f64> + ?Sized,
{
    let (y_true, y_pred) = paired_vectors(y_true, y_pred)?;
    raise_for_non_vector(y_base)?;
    raise_for_inconsistent_shapes(&y_true[..], y_base)?;
    let y_base = y_base.values();
    Ok(skill_score_values(
        &y_true, &y_pred, &y_base, power, normalized,
    ))
}

/// Compute the Nash-Sutcliffe model efficiency coefficient (NSE).
///
/// The baseline is the mean of the observations, so the default
/// configuration is the mean squared error skill score, equivalent to the
/// coefficient of determination of the simulation.
///
/// # Reference
/// Nash, J. E., & Sutcliffe, J. V. (1970). River flow forecasting through
/// conceptual models part I: A discussion of principles. Journal of
/// Hydrology, 10(3), 282-290.
pub fn nash_sutcliffe_efficiency<A, B>(
    y_true: &A,
    y_pred: &B,
    config: &EfficiencyConfig,
) -> Result<f64>
where
    A: ArrayLike<f64> + ?Sized,
    B: ArrayLike<f64> + ?Sized,
{
    let (y_true, y_pred) = transformed_pair(y_true, y_pred, config.log)?;

    let y_base = vec![stats::mean(&y_true); y_true.len()];
    Ok(skill_score_values(
        &y_true,
        &y_pred,
        &y_base,
        config.power,
        config.normalized,
    ))
}

/// Compute the coefficient of persistence.
///
/// The baseline is the observation `lag` steps earlier. Observations are
/// shifted circularly, so the first `lag` samples would compare against
/// wrapped values; they are excluded from all three series.
pub fn coefficient_of_persistence<A, B>(
    y_true: &A,
    y_pred: &B,
    lag: usize,
    config: &EfficiencyConfig,
) -> Result<f64>
where
    A: ArrayLike<f64> + ?Sized,
    B: ArrayLike<f64> + ?Sized,
{
    let (y_true, y_pred) = transformed_pair(y_true, y_pred, config.log)?;

    let start = lag.min(y_true.len());
    let y_base = &y_true[..y_true.len() - start];
    Ok(skill_score_values(
        &y_true[start..],
        &y_pred[start..],
        y_base,
        config.power,
        config.normalized,
    ))
}

/// Compute the coefficient of extrapolation.
///
/// The baseline at step `i` extends the observation by the most recent
/// observed change: `y_true[i] + (y_true[i-1] - y_true[i-2])`. Only steps
/// from index 2 onward are scored.
pub fn coefficient_of_extrapolation<A, B>(
    y_true: &A,
    y_pred: &B,
    config: &EfficiencyConfig,
) -> Result<f64>
where
    A: ArrayLike<f64> + ?Sized,
    B: ArrayLike<f64> + ?Sized,
{
    let (y_true, y_pred) = transformed_pair(y_true, y_pred, config.log)?;

    let start = 2.min(y_true.len());
    let y_base: Vec<f64> = (start..y_true.len())
        .map(|i| y_true[i] + (y_true[i - 1] - y_true[i - 2]))
        .collect();
    Ok(skill_score_values(
        &y_true[start..],
        &y_pred[start..],
        &y_base,
        config.power,
        config.normalized,
    ))
}

/// Compute the correlation, variability ratio and mean ratio used by the
/// Kling-Gupta efficiency.
pub fn kling_gupta_components<A, B>(y_true: &A, y_pred: &B) -> Result<KgeComponents>
where
    A: ArrayLike<f64> + ?Sized,
    B: ArrayLike<f64> + ?Sized,
{
    let (y_true, y_pred) = paired_vectors(y_true, y_pred)?;
    Ok(KgeComponents {
        r: stats::pearson_correlation(&y_pred, &y_true),
        alpha: divide(
            stats::std_dev(&y_pred),
            stats::std_dev(&y_true),
            "kling_gupta_efficiency",
        ),
        beta: divide(
            stats::mean(&y_pred),
            stats::mean(&y_true),
            "kling_gupta_efficiency",
        ),
    })
}

/// Compute the Kling-Gupta model efficiency coefficient (KGE).
///
/// KGE = 1 - sqrt((s_r(r - 1))² + (s_a(α - 1))² + (s_b(β - 1))²)
///
/// # Reference
/// Gupta, H. V., Kling, H., Yilmaz, K. K., & Martinez, G. F. (2009).
/// Decomposition of the mean squared error and NSE performance criteria:
/// Implications for improving hydrological modelling. Journal of Hydrology,
/// 377(1-2), 80-91. <https://doi.org/10.1016/j.jhydrol.2009.08.003>
pub fn kling_gupta_efficiency<A, B>(y_true: &A, y_pred: &B, scaling: &KgeScaling) -> Result<f64>
where
    A: ArrayLike<f64> + ?Sized,
    B: ArrayLike<f64> + ?Sized,
{
    let KgeComponents { r, alpha, beta } = kling_gupta_components(y_true, y_pred)?;

    let distance = ((scaling.r * (r - 1.0)).powi(2)
        + (scaling.a * (alpha - 1.0)).powi(2)
        + (scaling.b * (beta - 1.0)).powi(2))
    .sqrt();

    Ok(1.0 - distance)
}

/// Summary of continuous error and efficiency metrics for one series pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Nash-Sutcliffe efficiency
    pub nse: f64,
    /// Normalized Nash-Sutcliffe efficiency
    pub nnse: f64,
    /// Kling-Gupta efficiency
    pub kge: f64,
}

impl EfficiencyMetrics {
    /// Compute all metrics with default options.
    pub fn compute<A, B>(y_true: &A, y_pred: &B) -> Result<Self>
    where
        A: ArrayLike<f64> + ?Sized,
        B: ArrayLike<f64> + ?Sized,
    {
        let (y_true, y_pred) = paired_vectors(y_true, y_pred)?;
        let y_true: &[f64] = &y_true;
        let y_pred: &[f64] = &y_pred;

        let mse = mean_error_values(y_true, y_pred, 2.0);
        let config = EfficiencyConfig::default();

        Ok(Self {
            mae: mean_error_values(y_true, y_pred, 1.0),
            mse,
            rmse: mse.sqrt(),
            nse: nash_sutcliffe_efficiency(y_true, y_pred, &config)?,
            nnse: nash_sutcliffe_efficiency(y_true, y_pred, &config.normalized())?,
            kge: kling_gupta_efficiency(y_true, y_pred, &KgeScaling::default())?,
        })
    }
}

/// Validate a pair and optionally log-transform both series.
fn transformed_pair<'a, A, B>(
    y_true: &'a A,
    y_pred: &'a B,
    log: bool,
) -> Result<(Cow<'a, [f64]>, Cow<'a, [f64]>)>
where
    A: ArrayLike<f64> + ?Sized,
    B: ArrayLike<f64> + ?Sized,
{
    let (y_true, y_pred) = paired_vectors(y_true, y_pred)?;
    if !log {
        return Ok((y_true, y_pred));
    }
    Ok((Cow::Owned(natural_log(&y_true)), Cow::Owned(natural_log(&y_pred))))
}

fn natural_log(values: &[f64]) -> Vec<f64> {
    values.iter().map(|x| x.ln()).collect()
}

/// Mean error over aligned slices; NaN for empty input.
fn mean_error_values(y_true: &[f64], y_pred: &[f64], power: f64) -> f64 {
    let total: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (p - t).abs().powf(power))
        .sum();
    divide(total, y_true.len() as f64, "mean_error")
}

fn skill_score_values(
    y_true: &[f64],
    y_pred: &[f64],
    y_base: &[f64],
    power: f64,
    normalized: bool,
) -> f64 {
    let numerator = mean_error_values(y_true, y_pred, power);
    let denominator = mean_error_values(y_true, y_base, power);
    let ratio = divide(numerator, denominator, "mean_error_skill_score");

    if normalized {
        return 1.0 / (1.0 + ratio);
    }
    1.0 - ratio
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetricsError;
    use approx::assert_relative_eq;
    use ndarray::arr2;

    const Y_TRUE: [f64; 4] = [1.0, 2.0, 3.0, 4.0];
    const Y_PRED: [f64; 4] = [4.0, 3.0, 2.0, 1.0];

    fn exp(values: &[f64]) -> Vec<f64> {
        values.iter().map(|x| x.exp()).collect()
    }

    #[test]
    fn mean_error_defaults_to_absolute() {
        assert_eq!(mean_error(&Y_TRUE, &Y_PRED, 1.0, false).unwrap(), 2.0);
        assert_eq!(mean_absolute_error(&Y_TRUE, &Y_PRED).unwrap(), 2.0);
    }

    #[test]
    fn mean_squared_error_known_values() {
        assert_eq!(mean_squared_error(&Y_TRUE, &Y_PRED).unwrap(), 5.0);
        assert_eq!(root_mean_squared_error(&Y_TRUE, &Y_PRED).unwrap(), 5.0_f64.sqrt());
        assert_eq!(mean_error(&Y_TRUE, &Y_PRED, 2.0, true).unwrap(), 5.0_f64.sqrt());
    }

    #[test]
    fn mean_error_root_is_always_square_root() {
        // |errors|^3 = 27, 1, 1, 27 -> mean 14
        let me = mean_error(&Y_TRUE, &Y_PRED, 3.0, true).unwrap();
        assert_relative_eq!(me, 14.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn mean_error_of_empty_series_is_nan() {
        let empty: Vec<f64> = Vec::new();
        assert!(mean_error(&empty, &empty, 1.0, false).unwrap().is_nan());
    }

    #[test]
    fn mean_error_skill_score_against_mean_baseline() {
        let base = [2.5; 4];
        let score = mean_error_skill_score(&Y_TRUE, &Y_PRED, &base, 2.0, false).unwrap();
        assert_eq!(score, -3.0);

        let normalized = mean_error_skill_score(&Y_TRUE, &Y_PRED, &base, 2.0, true).unwrap();
        assert_eq!(normalized, 0.2);
    }

    #[test]
    fn mean_error_skill_score_rejects_short_baseline() {
        let result = mean_error_skill_score(&Y_TRUE, &Y_PRED, &[2.5; 3], 2.0, false);
        assert!(matches!(result, Err(MetricsError::ShapeMismatch { .. })));
    }

    #[test]
    fn nash_sutcliffe_efficiency_known_values() {
        let config = EfficiencyConfig::default();
        assert_eq!(
            nash_sutcliffe_efficiency(&Y_TRUE, &Y_PRED, &config).unwrap(),
            -3.0
        );
        assert_eq!(
            nash_sutcliffe_efficiency(&Y_TRUE, &Y_PRED, &config.normalized()).unwrap(),
            0.2
        );
    }

    #[test]
    fn nash_sutcliffe_efficiency_log_round_trip() {
        let (t, p) = (exp(&Y_TRUE), exp(&Y_PRED));

        let nse = nash_sutcliffe_efficiency(&t, &p, &EfficiencyConfig::default().with_log()).unwrap();
        assert_relative_eq!(nse, -3.0, epsilon = 1e-12);

        let nnse = nash_sutcliffe_efficiency(
            &t,
            &p,
            &EfficiencyConfig::default().with_log().normalized(),
        )
        .unwrap();
        assert_relative_eq!(nnse, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn nash_sutcliffe_efficiency_perfect_simulation() {
        let nse = nash_sutcliffe_efficiency(&Y_TRUE, &Y_TRUE, &EfficiencyConfig::default()).unwrap();
        assert_eq!(nse, 1.0);
    }

    #[test]
    fn nash_sutcliffe_efficiency_constant_observations_is_not_finite() {
        let obs = [3.0; 4];
        let nse = nash_sutcliffe_efficiency(&obs, &Y_PRED, &EfficiencyConfig::default()).unwrap();
        assert!(!nse.is_finite());
    }

    #[test]
    fn nash_sutcliffe_efficiency_validates_inputs() {
        let table = arr2(&[[1.0, 2.0], [3.0, 4.0]]);
        let result = nash_sutcliffe_efficiency(&table, &Y_PRED, &EfficiencyConfig::default());
        assert_eq!(result, Err(MetricsError::Shape { shape: vec![2, 2] }));

        let result = nash_sutcliffe_efficiency(&Y_TRUE, &[1.0, 2.0], &EfficiencyConfig::default());
        assert!(matches!(result, Err(MetricsError::ShapeMismatch { .. })));
    }

    #[test]
    fn coefficient_of_persistence_known_values() {
        // lag 1: scored indices 1..4
        // pred errors: 1, 1, 3 -> squared mean 11/3
        // base errors: 1, 1, 1 -> squared mean 1
        let cp = coefficient_of_persistence(&Y_TRUE, &Y_PRED, 1, &EfficiencyConfig::default())
            .unwrap();
        assert_relative_eq!(cp, 1.0 - 11.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn coefficient_of_persistence_two_step_lag() {
        // lag 2: scored indices 2..4
        // pred errors: 1, 3 -> squared mean 5
        // base errors: 2, 2 -> squared mean 4
        let cp = coefficient_of_persistence(&Y_TRUE, &Y_PRED, 2, &EfficiencyConfig::default())
            .unwrap();
        assert_relative_eq!(cp, 1.0 - 5.0 / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn coefficient_of_persistence_log_normalized() {
        let (t, p) = (exp(&Y_TRUE), exp(&Y_PRED));
        let config = EfficiencyConfig::default().with_log().normalized();
        let cp = coefficient_of_persistence(&t, &p, 2, &config).unwrap();
        assert_relative_eq!(cp, 1.0 / (1.0 + 5.0 / 4.0), epsilon = 1e-12);

        let raw = coefficient_of_persistence(
            &Y_TRUE,
            &Y_PRED,
            2,
            &EfficiencyConfig::default().normalized(),
        )
        .unwrap();
        assert_relative_eq!(cp, raw, epsilon = 1e-12);
    }

    #[test]
    fn coefficient_of_persistence_skilful_simulation() {
        let obs = [1.0, 3.0, 2.0, 5.0, 4.0];
        let sim = [1.1, 2.9, 2.2, 4.8, 4.1];
        let cp =
            coefficient_of_persistence(&obs, &sim, 1, &EfficiencyConfig::default()).unwrap();
        assert!(cp > 0.9);
    }

    #[test]
    fn coefficient_of_persistence_lag_beyond_length_is_nan() {
        let cp = coefficient_of_persistence(&Y_TRUE, &Y_PRED, 10, &EfficiencyConfig::default())
            .unwrap();
        assert!(cp.is_nan());
    }

    #[test]
    fn coefficient_of_extrapolation_known_values() {
        // scored indices 2..5 with baseline y[i] + y[i-1] - y[i-2]
        let obs = [1.0, 2.0, 4.0, 7.0, 11.0];
        let sim = [1.0, 2.0, 5.0, 7.0, 10.0];
        // base: 4 + 2 - 1 = 5, 7 + 4 - 2 = 9, 11 + 7 - 4 = 14
        // pred errors: 1, 0, 1 -> 2/3; base errors: 1, 2, 3 -> 14/3
        let ce = coefficient_of_extrapolation(&obs, &sim, &EfficiencyConfig::default()).unwrap();
        assert_relative_eq!(ce, 1.0 - 2.0 / 14.0, epsilon = 1e-12);
    }

    #[test]
    fn coefficient_of_extrapolation_log_normalized() {
        let obs = exp(&[1.0, 2.0, 4.0, 7.0, 11.0]);
        let sim = exp(&[1.0, 2.0, 5.0, 7.0, 10.0]);
        let config = EfficiencyConfig::default().with_log().normalized();
        let ce = coefficient_of_extrapolation(&obs, &sim, &config).unwrap();
        // ratio 2/14 -> 1 / (1 + 1/7)
        assert_relative_eq!(ce, 7.0 / 8.0, epsilon = 1e-12);
    }

    #[test]
    fn coefficient_of_extrapolation_short_series_is_nan() {
        let ce = coefficient_of_extrapolation(&[1.0, 2.0], &[1.0, 2.0], &EfficiencyConfig::default())
            .unwrap();
        assert!(ce.is_nan());
    }

    #[test]
    fn kling_gupta_efficiency_identical_series() {
        let kge = kling_gupta_efficiency(&Y_TRUE, &Y_TRUE, &KgeScaling::default()).unwrap();
        assert_eq!(kge, 1.0);
    }

    #[test]
    fn kling_gupta_efficiency_inverted_series() {
        // r = -1, alpha = 1, beta = 1 -> 1 - 2
        let kge = kling_gupta_efficiency(&Y_TRUE, &Y_PRED, &KgeScaling::default()).unwrap();
        assert_relative_eq!(kge, -1.0, epsilon = 1e-12);

        let scaled = kling_gupta_efficiency(&Y_TRUE, &Y_PRED, &KgeScaling::new(0.5, 1.0, 1.0))
            .unwrap();
        assert_relative_eq!(scaled, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn kling_gupta_efficiency_identical_series_at_extreme_magnitudes() {
        for series in [[1e-100, 2e-100, 3e-100, 5e-100], [1e80, 2e80, 3e80, 5e80]] {
            let kge = kling_gupta_efficiency(&series, &series, &KgeScaling::default()).unwrap();
            assert_eq!(kge, 1.0);
        }
    }

    #[test]
    fn kling_gupta_components_constant_observations() {
        let c = kling_gupta_components(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(c.alpha, f64::INFINITY);
        assert_eq!(c.beta, 1.0);
    }

    #[test]
    fn kling_gupta_components_known_values() {
        let sim = [2.0, 4.0, 6.0, 8.0];
        let c = kling_gupta_components(&Y_TRUE, &sim).unwrap();
        assert_relative_eq!(c.r, 1.0, epsilon = 1e-12);
        assert_relative_eq!(c.alpha, 2.0, epsilon = 1e-12);
        assert_relative_eq!(c.beta, 2.0, epsilon = 1e-12);

        let kge = kling_gupta_efficiency(&Y_TRUE, &sim, &KgeScaling::default()).unwrap();
        assert_relative_eq!(kge, 1.0 - 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn efficiency_metrics_summary() {
        let metrics = EfficiencyMetrics::compute(&Y_TRUE, &Y_PRED).unwrap();
        assert_eq!(metrics.mae, 2.0);
        assert_eq!(metrics.mse, 5.0);
        assert_eq!(metrics.rmse, 5.0_f64.sqrt());
        assert_eq!(metrics.nse, -3.0);
        assert_eq!(metrics.nnse, 0.2);
        assert_relative_eq!(metrics.kge, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn efficiency_config_deserializes_with_defaults() {
        let config: EfficiencyConfig = serde_json::from_str(r#"{"log": true}"#).unwrap();
        assert!(config.log);
        assert_eq!(config.power, 2.0);
        assert!(!config.normalized);
    }
}
