//! Unit-of-measurement conversions for hydrologic quantities.
//!
//! A [`UnitRegistry`] is built explicitly and handed to a [`UnitHandler`];
//! there is no process-wide default registry. Unit expressions combine
//! registered symbols with `*`, `/` and integer exponents written as `^n`
//! or `**n`, for example `m^3/s`, `ft**3/s` or `mm/h`.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use ndarray::{Array, ArrayBase, Data, Dimension};

use crate::error::{MetricsError, Result};

/// Exponents of the base dimensions length, mass and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PhysicalDimension {
    /// Length exponent
    pub length: i32,
    /// Mass exponent
    pub mass: i32,
    /// Time exponent
    pub time: i32,
}

impl PhysicalDimension {
    pub const DIMENSIONLESS: Self = Self::new(0, 0, 0);
    pub const LENGTH: Self = Self::new(1, 0, 0);
    pub const MASS: Self = Self::new(0, 1, 0);
    pub const TIME: Self = Self::new(0, 0, 1);
    pub const AREA: Self = Self::new(2, 0, 0);
    pub const VOLUME: Self = Self::new(3, 0, 0);
    pub const FLOW: Self = Self::new(3, 0, -1);

    pub const fn new(length: i32, mass: i32, time: i32) -> Self {
        Self { length, mass, time }
    }

    fn powi(self, exponent: i32) -> Self {
        Self::new(
            self.length * exponent,
            self.mass * exponent,
            self.time * exponent,
        )
    }

    fn combine(self, other: Self) -> Self {
        Self::new(
            self.length + other.length,
            self.mass + other.mass,
            self.time + other.time,
        )
    }
}

impl fmt::Display for PhysicalDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[L^{} M^{} T^{}]", self.length, self.mass, self.time)
    }
}

/// A resolved unit: its scale relative to SI base units and its dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDefinition {
    /// Multiplier converting one of this unit into SI base units.
    pub factor: f64,
    /// Physical dimension.
    pub dimension: PhysicalDimension,
}

impl UnitDefinition {
    pub const fn new(factor: f64, dimension: PhysicalDimension) -> Self {
        Self { factor, dimension }
    }
}

const FOOT: f64 = 0.3048;
const US_GALLON: f64 = 3.785_411_784e-3;
const ACRE: f64 = 4_046.856_422_4;

/// Symbols known to a [`UnitRegistry::new`] registry.
const HYDROLOGIC_UNITS: &[(&str, f64, PhysicalDimension)] = &[
    // length
    ("m", 1.0, PhysicalDimension::LENGTH),
    ("meter", 1.0, PhysicalDimension::LENGTH),
    ("metre", 1.0, PhysicalDimension::LENGTH),
    ("km", 1_000.0, PhysicalDimension::LENGTH),
    ("cm", 0.01, PhysicalDimension::LENGTH),
    ("mm", 0.001, PhysicalDimension::LENGTH),
    ("ft", FOOT, PhysicalDimension::LENGTH),
    ("foot", FOOT, PhysicalDimension::LENGTH),
    ("feet", FOOT, PhysicalDimension::LENGTH),
    ("in", 0.0254, PhysicalDimension::LENGTH),
    ("inch", 0.0254, PhysicalDimension::LENGTH),
    ("yd", 0.9144, PhysicalDimension::LENGTH),
    ("mi", 1_609.344, PhysicalDimension::LENGTH),
    ("mile", 1_609.344, PhysicalDimension::LENGTH),
    // mass
    ("kg", 1.0, PhysicalDimension::MASS),
    ("g", 0.001, PhysicalDimension::MASS),
    ("lb", 0.453_592_37, PhysicalDimension::MASS),
    // time
    ("s", 1.0, PhysicalDimension::TIME),
    ("sec", 1.0, PhysicalDimension::TIME),
    ("second", 1.0, PhysicalDimension::TIME),
    ("min", 60.0, PhysicalDimension::TIME),
    ("minute", 60.0, PhysicalDimension::TIME),
    ("h", 3_600.0, PhysicalDimension::TIME),
    ("hr", 3_600.0, PhysicalDimension::TIME),
    ("hour", 3_600.0, PhysicalDimension::TIME),
    ("d", 86_400.0, PhysicalDimension::TIME),
    ("day", 86_400.0, PhysicalDimension::TIME),
    // area
    ("ha", 10_000.0, PhysicalDimension::AREA),
    ("hectare", 10_000.0, PhysicalDimension::AREA),
    ("acre", ACRE, PhysicalDimension::AREA),
    // volume
    ("L", 0.001, PhysicalDimension::VOLUME),
    ("l", 0.001, PhysicalDimension::VOLUME),
    ("liter", 0.001, PhysicalDimension::VOLUME),
    ("litre", 0.001, PhysicalDimension::VOLUME),
    ("gal", US_GALLON, PhysicalDimension::VOLUME),
    ("gallon", US_GALLON, PhysicalDimension::VOLUME),
    ("acre_foot", ACRE * FOOT, PhysicalDimension::VOLUME),
    ("af", ACRE * FOOT, PhysicalDimension::VOLUME),
    // flow
    ("cms", 1.0, PhysicalDimension::FLOW),
    ("cfs", FOOT * FOOT * FOOT, PhysicalDimension::FLOW),
    ("kcfs", 1_000.0 * FOOT * FOOT * FOOT, PhysicalDimension::FLOW),
    ("gpm", US_GALLON / 60.0, PhysicalDimension::FLOW),
    ("mgd", 1.0e6 * US_GALLON / 86_400.0, PhysicalDimension::FLOW),
];

/// Table of unit symbols.
///
/// Immutable once shared; wrap in an [`Arc`] to hand the same registry to
/// several handlers.
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    units: HashMap<String, UnitDefinition>,
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRegistry {
    /// Create a registry preloaded with common hydrologic units.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for &(symbol, factor, dimension) in HYDROLOGIC_UNITS {
            registry
                .units
                .insert(symbol.to_string(), UnitDefinition::new(factor, dimension));
        }
        registry
    }

    /// Create a registry with no units.
    pub fn empty() -> Self {
        Self {
            units: HashMap::new(),
        }
    }

    /// Register (or replace) a unit symbol.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InvalidParameter`] for symbols that the
    /// expression parser could not read back, and for non-finite or
    /// non-positive factors.
    pub fn define(
        &mut self,
        symbol: &str,
        factor: f64,
        dimension: PhysicalDimension,
    ) -> Result<()> {
        let readable = !symbol.is_empty()
            && symbol.chars().all(|c| c.is_alphabetic() || c == '_');
        if !readable {
            return Err(MetricsError::InvalidParameter(format!(
                "unit symbol '{symbol}' must be alphabetic"
            )));
        }
        if !factor.is_finite() || factor <= 0.0 {
            return Err(MetricsError::InvalidParameter(format!(
                "unit factor for '{symbol}' must be positive and finite, got {factor}"
            )));
        }
        self.units
            .insert(symbol.to_string(), UnitDefinition::new(factor, dimension));
        Ok(())
    }

    /// Look up a single symbol.
    pub fn get(&self, symbol: &str) -> Option<&UnitDefinition> {
        self.units.get(symbol)
    }

    /// Number of registered symbols.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the registry has no symbols.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Resolve a unit expression such as `ft^3/s`.
    ///
    /// `a/b*c` is read left to right as `(a/b)*c`. Numeric terms scale the
    /// result, so `1000*m^3` is a valid expression.
    pub fn parse(&self, expression: &str) -> Result<UnitDefinition> {
        let normalized = expression.replace("**", "^");
        let normalized = normalized.trim();
        if normalized.is_empty() {
            return Err(MetricsError::InvalidParameter(
                "empty unit expression".to_string(),
            ));
        }

        let mut factor = 1.0;
        let mut dimension = PhysicalDimension::DIMENSIONLESS;
        let mut sign = 1;
        let mut term = String::new();

        for c in normalized.chars().chain(std::iter::once('*')) {
            match c {
                '*' | '/' => {
                    let (term_factor, term_dimension) = self.parse_term(term.trim(), expression)?;
                    factor *= term_factor.powi(sign);
                    dimension = dimension.combine(term_dimension.powi(sign));
                    sign = if c == '/' { -1 } else { 1 };
                    term.clear();
                }
                _ => term.push(c),
            }
        }

        log::debug!("resolved unit '{expression}' to {factor} x SI {dimension}");
        Ok(UnitDefinition::new(factor, dimension))
    }

    fn parse_term(&self, term: &str, expression: &str) -> Result<(f64, PhysicalDimension)> {
        let malformed = || {
            MetricsError::InvalidParameter(format!("malformed unit expression '{expression}'"))
        };

        let (symbol, exponent) = match term.split_once('^') {
            Some((symbol, exponent)) => {
                let exponent: i32 = exponent.trim().parse().map_err(|_| malformed())?;
                (symbol.trim(), exponent)
            }
            None => (term, 1),
        };
        if symbol.is_empty() {
            return Err(malformed());
        }

        if let Ok(value) = symbol.parse::<f64>() {
            if !value.is_finite() || value <= 0.0 {
                return Err(MetricsError::InvalidParameter(format!(
                    "numeric factor in unit expression '{expression}' must be positive and finite, got {value}"
                )));
            }
            return Ok((value.powi(exponent), PhysicalDimension::DIMENSIONLESS));
        }

        let unit = self
            .get(symbol)
            .ok_or_else(|| MetricsError::UnknownUnit(symbol.to_string()))?;
        Ok((unit.factor.powi(exponent), unit.dimension.powi(exponent)))
    }
}

/// Converts values between units using an explicitly supplied registry.
#[derive(Debug, Clone)]
pub struct UnitHandler {
    registry: Arc<UnitRegistry>,
}

impl UnitHandler {
    /// Create a handler that resolves units with `registry`.
    pub fn new(registry: Arc<UnitRegistry>) -> Self {
        Self { registry }
    }

    /// Registry used by this handler.
    pub fn registry(&self) -> &UnitRegistry {
        &self.registry
    }

    /// Factor that converts a value in `from_units` into `to_units`.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::UnknownUnit`] for unregistered symbols and
    /// [`MetricsError::IncompatibleUnits`] when the dimensions differ.
    pub fn conversion_factor(&self, from_units: &str, to_units: &str) -> Result<f64> {
        let from = self.registry.parse(from_units)?;
        let to = self.registry.parse(to_units)?;
        if from.dimension != to.dimension {
            return Err(MetricsError::IncompatibleUnits {
                from: from_units.to_string(),
                to: to_units.to_string(),
            });
        }
        Ok(from.factor / to.factor)
    }

    /// Convert a series of values.
    pub fn convert_values(&self, values: &[f64], from_units: &str, to_units: &str) -> Result<Vec<f64>> {
        let factor = self.conversion_factor(from_units, to_units)?;
        Ok(values.iter().map(|v| v * factor).collect())
    }

    /// Convert an array of any shape; the result has the same shape.
    pub fn convert_array<S, D>(
        &self,
        values: &ArrayBase<S, D>,
        from_units: &str,
        to_units: &str,
    ) -> Result<Array<f64, D>>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        let factor = self.conversion_factor(from_units, to_units)?;
        Ok(values.mapv(|v| v * factor))
    }
}
