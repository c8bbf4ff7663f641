//! Rental duration options and the catalog they are chosen from.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use kosan_core::config::DurationOptionConfig;

/// How a duration's magnitude is interpreted when computing check-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "duration_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DurationType {
    /// `value` is a number of hours.
    Hourly,
    /// `value` is a number of hours (a multiple of 24 in practice).
    Daily,
    /// A fixed 30-day month; `value` is display-only.
    Monthly,
}

impl DurationType {
    /// Return the type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for DurationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DurationType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "monthly" => Ok(Self::Monthly),
            other => Err(CatalogError::UnknownType(other.to_string())),
        }
    }
}

/// A selectable rental duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationOption {
    /// Human-readable label, e.g. `"6 Jam"`.
    pub label: String,
    /// Hours for hourly/daily options; a sentinel (720) for monthly.
    pub value: u32,
    /// Interpretation of `value`.
    #[serde(rename = "type")]
    pub kind: DurationType,
    /// Price table lookup key, e.g. `"3_hours"`.
    pub key: String,
}

impl DurationOption {
    /// Create a new duration option.
    pub fn new(
        label: impl Into<String>,
        value: u32,
        kind: DurationType,
        key: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            value,
            kind,
            key: key.into(),
        }
    }
}

/// Errors raised while building a duration catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two options share the same price key.
    #[error("duplicate duration key: {0}")]
    DuplicateKey(String),
    /// An option has an empty price key.
    #[error("duration key must not be empty")]
    EmptyKey,
    /// An hour-based option has a zero magnitude.
    #[error("duration {0} must span at least one hour")]
    ZeroLength(String),
    /// The type string is not one of hourly/daily/monthly.
    #[error("unknown duration type: {0}")]
    UnknownType(String),
    /// The catalog has no options at all.
    #[error("duration catalog is empty")]
    Empty,
}

/// The ordered set of duration options offered to guests.
///
/// Keys are unique within a catalog; construction fails otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DurationCatalog {
    options: Vec<DurationOption>,
}

impl DurationCatalog {
    /// Build a catalog, validating key uniqueness and magnitudes.
    pub fn new(options: Vec<DurationOption>) -> Result<Self, CatalogError> {
        if options.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(options.len());
        for option in &options {
            if option.key.trim().is_empty() {
                return Err(CatalogError::EmptyKey);
            }
            if option.kind != DurationType::Monthly && option.value == 0 {
                return Err(CatalogError::ZeroLength(option.key.clone()));
            }
            if !seen.insert(option.key.as_str()) {
                return Err(CatalogError::DuplicateKey(option.key.clone()));
            }
        }

        Ok(Self { options })
    }

    /// Build a catalog from configuration entries.
    pub fn from_config(entries: &[DurationOptionConfig]) -> Result<Self, CatalogError> {
        let options = entries
            .iter()
            .map(|entry| {
                Ok(DurationOption::new(
                    entry.label.clone(),
                    entry.value,
                    entry.kind.parse()?,
                    entry.key.clone(),
                ))
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        Self::new(options)
    }

    /// Look up an option by its price key.
    pub fn get(&self, key: &str) -> Option<&DurationOption> {
        self.options.iter().find(|o| o.key == key)
    }

    /// Iterate over the options in display order.
    pub fn iter(&self) -> impl Iterator<Item = &DurationOption> {
        self.options.iter()
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Always `false` for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl Default for DurationCatalog {
    fn default() -> Self {
        Self {
            options: vec![
                DurationOption::new("1 Jam", 1, DurationType::Hourly, "1_hour"),
                DurationOption::new("3 Jam", 3, DurationType::Hourly, "3_hours"),
                DurationOption::new("6 Jam", 6, DurationType::Hourly, "6_hours"),
                DurationOption::new("12 Jam", 12, DurationType::Hourly, "12_hours"),
                DurationOption::new("Harian (24 Jam)", 24, DurationType::Daily, "daily"),
                DurationOption::new("Bulanan (30 Hari)", 720, DurationType::Monthly, "monthly"),
            ],
        }
    }
}
