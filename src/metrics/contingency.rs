//! Contingency tables for categorical (event / no-event) verification.
//!
//! A [`ContingencyTable`] holds the four cells of a 2x2 cross-tabulation of
//! observed against simulated occurrences. Labeled mappings (as produced by
//! [`compute_contingency_table`] or built by hand) are converted into the
//! typed table at the boundary with [`ContingencyTable::from_mapping`].

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, Result};
use crate::validation::{paired_vectors, ArrayLike};

/// Labels for the four contingency-table cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContingencyKeys {
    /// Observed and simulated (hit).
    pub true_positive: String,
    /// Simulated but not observed (false alarm).
    pub false_positive: String,
    /// Observed but not simulated (miss).
    pub false_negative: String,
    /// Neither observed nor simulated (correct negative).
    pub true_negative: String,
}

impl Default for ContingencyKeys {
    fn default() -> Self {
        Self {
            true_positive: "true_positive".to_string(),
            false_positive: "false_positive".to_string(),
            false_negative: "false_negative".to_string(),
            true_negative: "true_negative".to_string(),
        }
    }
}

impl ContingencyKeys {
    /// Create a custom set of labels.
    pub fn new(
        true_positive: impl Into<String>,
        false_positive: impl Into<String>,
        false_negative: impl Into<String>,
        true_negative: impl Into<String>,
    ) -> Self {
        Self {
            true_positive: true_positive.into(),
            false_positive: false_positive.into(),
            false_negative: false_negative.into(),
            true_negative: true_negative.into(),
        }
    }

    /// Labels in (TP, FP, FN, TN) order.
    pub fn labels(&self) -> [&str; 4] {
        [
            self.true_positive.as_str(),
            self.false_positive.as_str(),
            self.false_negative.as_str(),
            self.true_negative.as_str(),
        ]
    }

    /// Ensure the four labels are distinct.
    pub fn validate(&self) -> Result<()> {
        let labels = self.labels();
        for (i, label) in labels.iter().enumerate() {
            if labels[i + 1..].contains(label) {
                return Err(MetricsError::InvalidParameter(format!(
                    "contingency table label '{label}' is used for more than one cell"
                )));
            }
        }
        Ok(())
    }
}

/// A mapping from labels to counts that a [`ContingencyTable`] can be read from.
pub trait CountMapping {
    /// Count stored under `key`, converted to `f64`.
    ///
    /// `None` when the key is absent. Present values that cannot be
    /// represented as `f64` yield `Some(NaN)`.
    fn count(&self, key: &str) -> Option<f64>;
}

impl<K, V, S> CountMapping for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: ToPrimitive,
    S: BuildHasher,
{
    fn count(&self, key: &str) -> Option<f64> {
        self.get(key).map(|v| v.to_f64().unwrap_or(f64::NAN))
    }
}

impl<K, V> CountMapping for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: ToPrimitive,
{
    fn count(&self, key: &str) -> Option<f64> {
        self.get(key).map(|v| v.to_f64().unwrap_or(f64::NAN))
    }
}

/// The four cells of a 2x2 contingency table.
///
/// Counts are stored as `f64` so that NaN entries can propagate through
/// the derived metrics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ContingencyTable {
    /// Hits (a).
    pub true_positive: f64,
    /// False alarms (b).
    pub false_positive: f64,
    /// Misses (c).
    pub false_negative: f64,
    /// Correct negatives (d).
    pub true_negative: f64,
}

impl ContingencyTable {
    /// Create a table from explicit counts.
    pub fn new(
        true_positive: f64,
        false_positive: f64,
        false_negative: f64,
        true_negative: f64,
    ) -> Self {
        Self {
            true_positive,
            false_positive,
            false_negative,
            true_negative,
        }
    }

    /// Cross-tabulate observed against simulated occurrences.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::Shape`] if either input is not one-dimensional
    /// and [`MetricsError::ShapeMismatch`] if their lengths differ.
    pub fn from_occurrences<O, S>(observed: &O, simulated: &S) -> Result<Self>
    where
        O: ArrayLike<bool> + ?Sized,
        S: ArrayLike<bool> + ?Sized,
    {
        let [a, b, c, d] = cross_tabulate(observed, simulated)?;
        Ok(Self::new(a as f64, b as f64, c as f64, d as f64))
    }

    /// Read a table from a labeled mapping.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::MissingKey`] naming the first label in
    /// (TP, FP, FN, TN) order that is absent from `mapping`.
    pub fn from_mapping<M>(mapping: &M, keys: &ContingencyKeys) -> Result<Self>
    where
        M: CountMapping + ?Sized,
    {
        let lookup = |key: &str| {
            mapping
                .count(key)
                .ok_or_else(|| MetricsError::MissingKey(key.to_string()))
        };
        Ok(Self {
            true_positive: lookup(&keys.true_positive)?,
            false_positive: lookup(&keys.false_positive)?,
            false_negative: lookup(&keys.false_negative)?,
            true_negative: lookup(&keys.true_negative)?,
        })
    }

    /// Write the table out as a labeled mapping.
    pub fn to_mapping(&self, keys: &ContingencyKeys) -> BTreeMap<String, f64> {
        BTreeMap::from([
            (keys.true_positive.clone(), self.true_positive),
            (keys.false_positive.clone(), self.false_positive),
            (keys.false_negative.clone(), self.false_negative),
            (keys.true_negative.clone(), self.true_negative),
        ])
    }

    /// Sum of all four cells.
    pub fn total(&self) -> f64 {
        self.true_positive + self.false_positive + self.false_negative + self.true_negative
    }
}

impl TryFrom<&BTreeMap<String, u64>> for ContingencyTable {
    type Error = MetricsError;

    /// Read a table stored under the default labels.
    fn try_from(mapping: &BTreeMap<String, u64>) -> Result<Self> {
        Self::from_mapping(mapping, &ContingencyKeys::default())
    }
}

/// Compute the components of a contingency table.
///
/// Every cell is always present in the output, with a count of zero when
/// the corresponding combination never occurs.
///
/// | observed | simulated | cell            |
/// |----------|-----------|-----------------|
/// | true     | true      | true positive   |
/// | false    | true      | false positive  |
/// | true     | false     | false negative  |
/// | false    | false     | true negative   |
///
/// # Errors
///
/// Returns [`MetricsError::Shape`] or [`MetricsError::ShapeMismatch`] for
/// malformed inputs, and [`MetricsError::InvalidParameter`] when two of the
/// requested labels coincide.
pub fn compute_contingency_table<O, S>(
    observed: &O,
    simulated: &S,
    keys: &ContingencyKeys,
) -> Result<BTreeMap<String, u64>>
where
    O: ArrayLike<bool> + ?Sized,
    S: ArrayLike<bool> + ?Sized,
{
    keys.validate()?;
    let counts = cross_tabulate(observed, simulated)?;
    Ok(keys
        .labels()
        .into_iter()
        .zip(counts)
        .map(|(label, count)| (label.to_string(), count))
        .collect())
}

/// Counts in (TP, FP, FN, TN) order.
fn cross_tabulate<O, S>(observed: &O, simulated: &S) -> Result<[u64; 4]>
where
    O: ArrayLike<bool> + ?Sized,
    S: ArrayLike<bool> + ?Sized,
{
    let (observed, simulated) = paired_vectors(observed, simulated)?;

    let mut counts = [0u64; 4];
    for (&obs, &sim) in observed.iter().zip(simulated.iter()) {
        let cell = match (obs, sim) {
            (true, true) => 0,
            (false, true) => 1,
            (true, false) => 2,
            (false, false) => 3,
        };
        counts[cell] += 1;
    }
    Ok(counts)
}
