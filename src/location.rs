//! Validation of geographic query parameters for Social Vulnerability
//! Index (SVI) data.
//!
//! Locations are US states, the District of Columbia and the nation as a
//! whole, given by name or postal abbreviation in any letter case.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, Result};

/// (postal abbreviation, canonical name)
const LOCATIONS: &[(&str, &str)] = &[
    ("us", "united_states"),
    ("al", "alabama"),
    ("ak", "alaska"),
    ("az", "arizona"),
    ("ar", "arkansas"),
    ("ca", "california"),
    ("co", "colorado"),
    ("ct", "connecticut"),
    ("de", "delaware"),
    ("dc", "district_of_columbia"),
    ("fl", "florida"),
    ("ga", "georgia"),
    ("hi", "hawaii"),
    ("id", "idaho"),
    ("il", "illinois"),
    ("in", "indiana"),
    ("ia", "iowa"),
    ("ks", "kansas"),
    ("ky", "kentucky"),
    ("la", "louisiana"),
    ("me", "maine"),
    ("md", "maryland"),
    ("ma", "massachusetts"),
    ("mi", "michigan"),
    ("mn", "minnesota"),
    ("ms", "mississippi"),
    ("mo", "missouri"),
    ("mt", "montana"),
    ("ne", "nebraska"),
    ("nv", "nevada"),
    ("nh", "new_hampshire"),
    ("nj", "new_jersey"),
    ("nm", "new_mexico"),
    ("ny", "new_york"),
    ("nc", "north_carolina"),
    ("nd", "north_dakota"),
    ("oh", "ohio"),
    ("ok", "oklahoma"),
    ("or", "oregon"),
    ("pa", "pennsylvania"),
    ("ri", "rhode_island"),
    ("sc", "south_carolina"),
    ("sd", "south_dakota"),
    ("tn", "tennessee"),
    ("tx", "texas"),
    ("ut", "utah"),
    ("vt", "vermont"),
    ("va", "virginia"),
    ("wa", "washington"),
    ("wv", "west_virginia"),
    ("wi", "wisconsin"),
    ("wy", "wyoming"),
];

/// Resolve a location name or abbreviation to its canonical name.
///
/// Matching ignores case, and spaces are treated as underscores, so
/// `"NY"`, `"new york"` and `"New_York"` all resolve to `"new_york"`.
///
/// # Errors
///
/// Returns [`MetricsError::InvalidParameter`] listing every accepted value.
pub fn validate_location(location: &str) -> Result<&'static str> {
    let key = location.trim().to_lowercase().replace(' ', "_");
    LOCATIONS
        .iter()
        .find(|(abbreviation, name)| *abbreviation == key || *name == key)
        .map(|&(_, name)| name)
        .ok_or_else(|| {
            let mut valid: Vec<&str> = LOCATIONS
                .iter()
                .flat_map(|&(abbreviation, name)| [abbreviation, name])
                .collect();
            valid.sort_unstable();
            invalid("location", location, &valid)
        })
}

/// Spatial resolution of SVI records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeographicScale {
    CensusTract,
    County,
}

impl GeographicScale {
    pub const ALL: [Self; 2] = [Self::CensusTract, Self::County];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CensusTract => "census_tract",
            Self::County => "county",
        }
    }
}

/// Extent against which SVI rankings are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeographicContext {
    National,
    State,
}

impl GeographicContext {
    pub const ALL: [Self; 2] = [Self::National, Self::State];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::National => "national",
            Self::State => "state",
        }
    }
}

/// Published SVI release years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SviYear {
    #[serde(rename = "2000")]
    Y2000,
    #[serde(rename = "2010")]
    Y2010,
    #[serde(rename = "2014")]
    Y2014,
    #[serde(rename = "2016")]
    Y2016,
    #[serde(rename = "2018")]
    Y2018,
}

impl SviYear {
    pub const ALL: [Self; 5] = [
        Self::Y2000,
        Self::Y2010,
        Self::Y2014,
        Self::Y2016,
        Self::Y2018,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Y2000 => "2000",
            Self::Y2010 => "2010",
            Self::Y2014 => "2014",
            Self::Y2016 => "2016",
            Self::Y2018 => "2018",
        }
    }
}

impl TryFrom<u16> for SviYear {
    type Error = MetricsError;

    fn try_from(year: u16) -> Result<Self> {
        year.to_string().parse()
    }
}

macro_rules! impl_str_enum {
    ($ty:ty, $what:literal) => {
        impl FromStr for $ty {
            type Err = MetricsError;

            fn from_str(s: &str) -> Result<Self> {
                let trimmed = s.trim();
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.as_str() == trimmed)
                    .ok_or_else(|| {
                        let mut valid: Vec<&str> = <$ty>::ALL.iter().map(|v| v.as_str()).collect();
                        valid.sort_unstable();
                        invalid($what, s, &valid)
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_str_enum!(GeographicScale, "geographic scale");
impl_str_enum!(GeographicContext, "geographic context");
impl_str_enum!(SviYear, "year");

/// Validate a geographic scale string.
pub fn validate_geographic_scale(scale: &str) -> Result<GeographicScale> {
    scale.parse()
}

/// Validate a geographic context string.
pub fn validate_geographic_context(context: &str) -> Result<GeographicContext> {
    context.parse()
}

/// Validate a release year.
pub fn validate_year(year: &str) -> Result<SviYear> {
    year.parse()
}

fn invalid(what: &str, value: &str, valid: &[&str]) -> MetricsError {
    MetricsError::InvalidParameter(format!(
        "invalid {what}: {value}. Valid {what} values are {valid:?}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_accepts_names_and_abbreviations() {
        assert_eq!(validate_location("AL").unwrap(), "alabama");
        assert_eq!(validate_location("alabama").unwrap(), "alabama");
        assert_eq!(validate_location("Alabama").unwrap(), "alabama");
        assert_eq!(validate_location("new york").unwrap(), "new_york");
        assert_eq!(validate_location("US").unwrap(), "united_states");
    }

    #[test]
    fn invalid_location_lists_valid_values() {
        let err = validate_location("atlantis").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("invalid location: atlantis"));
        assert!(message.contains("\"wyoming\""));
        assert!(message.contains("\"tx\""));
    }

    #[test]
    fn geographic_scale_parses() {
        assert_eq!(
            validate_geographic_scale("census_tract").unwrap(),
            GeographicScale::CensusTract
        );
        assert_eq!(
            validate_geographic_scale("county").unwrap(),
            GeographicScale::County
        );
        assert!(matches!(
            validate_geographic_scale("zip_code"),
            Err(MetricsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn geographic_context_parses() {
        assert_eq!(
            validate_geographic_context("national").unwrap(),
            GeographicContext::National
        );
        assert_eq!(GeographicContext::State.to_string(), "state");
        assert!(validate_geographic_context("global").is_err());
    }

    #[test]
    fn year_parses_from_string_and_number() {
        assert_eq!(validate_year("2018").unwrap(), SviYear::Y2018);
        assert_eq!(SviYear::try_from(2014_u16).unwrap(), SviYear::Y2014);
        assert!(validate_year("2012").is_err());
        assert!(SviYear::try_from(1999_u16).is_err());
    }

    #[test]
    fn enums_serialize_as_their_string_values() {
        assert_eq!(
            serde_json::to_string(&GeographicScale::CensusTract).unwrap(),
            "\"census_tract\""
        );
        assert_eq!(serde_json::to_string(&SviYear::Y2010).unwrap(), "\"2010\"");
        let context: GeographicContext = serde_json::from_str("\"state\"").unwrap();
        assert_eq!(context, GeographicContext::State);
    }
}
