//! Skill scores derived from a 2x2 contingency table.
//!
//! With `a`, `b`, `c`, `d` the true positive, false positive, false negative
//! and true negative counts. Every ratio uses plain IEEE-754 division, so an
//! empty table yields NaN (with a logged warning) and NaN counts propagate.

use serde::{Deserialize, Serialize};

use super::contingency::ContingencyTable;
use super::divide;

/// Probability of detection (POD), also called hit rate.
///
/// POD = a / (a + c)
pub fn probability_of_detection(table: &ContingencyTable) -> f64 {
    let a = table.true_positive;
    let c = table.false_negative;
    divide(a, a + c, "probability_of_detection")
}

/// Probability of false detection (POFD), also called false alarm rate.
///
/// POFD = b / (b + d)
pub fn probability_of_false_detection(table: &ContingencyTable) -> f64 {
    let b = table.false_positive;
    let d = table.true_negative;
    divide(b, b + d, "probability_of_false_detection")
}

/// Probability of false alarm (POFA), also called false alarm ratio.
///
/// POFA = b / (a + b)
pub fn probability_of_false_alarm(table: &ContingencyTable) -> f64 {
    let a = table.true_positive;
    let b = table.false_positive;
    divide(b, b + a, "probability_of_false_alarm")
}

/// Threat score (TS), also called critical success index.
///
/// TS = a / (a + b + c)
pub fn threat_score(table: &ContingencyTable) -> f64 {
    let a = table.true_positive;
    let b = table.false_positive;
    let c = table.false_negative;
    divide(a, a + b + c, "threat_score")
}

/// Frequency bias (FBI).
///
/// FBI = (a + b) / (a + c)
pub fn frequency_bias(table: &ContingencyTable) -> f64 {
    let a = table.true_positive;
    let b = table.false_positive;
    let c = table.false_negative;
    divide(a + b, a + c, "frequency_bias")
}

/// Percent correct (PC).
///
/// PC = (a + d) / (a + b + c + d)
pub fn percent_correct(table: &ContingencyTable) -> f64 {
    let a = table.true_positive;
    let b = table.false_positive;
    let c = table.false_negative;
    let d = table.true_negative;
    divide(a + d, a + b + c + d, "percent_correct")
}

/// Number of hits expected by chance (a_r).
///
/// a_r = (a + b)(a + c) / (a + b + c + d)
pub fn base_chance(table: &ContingencyTable) -> f64 {
    let a = table.true_positive;
    let b = table.false_positive;
    let c = table.false_negative;
    let d = table.true_negative;
    divide((a + b) * (a + c), a + b + c + d, "base_chance")
}

/// Equitable threat score (ETS), also called Gilbert skill score.
///
/// ETS = (a - a_r) / (a + b + c - a_r)
pub fn equitable_threat_score(table: &ContingencyTable) -> f64 {
    let a_r = base_chance(table);
    let a = table.true_positive;
    let b = table.false_positive;
    let c = table.false_negative;
    divide(a - a_r, a + b + c - a_r, "equitable_threat_score")
}

/// All table-derived scores for one contingency table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoricalScores {
    /// Probability of detection
    pub probability_of_detection: f64,
    /// Probability of false detection
    pub probability_of_false_detection: f64,
    /// Probability of false alarm
    pub probability_of_false_alarm: f64,
    /// Threat score
    pub threat_score: f64,
    /// Frequency bias
    pub frequency_bias: f64,
    /// Percent correct
    pub percent_correct: f64,
    /// Hits expected by chance
    pub base_chance: f64,
    /// Equitable threat score
    pub equitable_threat_score: f64,
}

impl CategoricalScores {
    /// Compute every score from `table`.
    pub fn from_table(table: &ContingencyTable) -> Self {
        Self {
            probability_of_detection: probability_of_detection(table),
            probability_of_false_detection: probability_of_false_detection(table),
            probability_of_false_alarm: probability_of_false_alarm(table),
            threat_score: threat_score(table),
            frequency_bias: frequency_bias(table),
            percent_correct: percent_correct(table),
            base_chance: base_chance(table),
            equitable_threat_score: equitable_threat_score(table),
        }
    }
}

impl From<&ContingencyTable> for CategoricalScores {
    fn from(table: &ContingencyTable) -> Self {
        Self::from_table(table)
    }
}
