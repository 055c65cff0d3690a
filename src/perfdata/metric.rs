use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use super::range::Range;
use super::uom::UnitOfMeasurement;
use crate::error::PluginError;

/// Characters that would break the `label=value;...` grammar.
const FORBIDDEN_LABEL_CHARS: [char; 7] = ['=', ';', '|', '\'', '"', '\n', '\r'];

/// Value used by plugins that could not determine a measurement.
const UNKNOWN_VALUE: &str = "U";

static VALUE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<number>[+-]?(?:\d+(?:\.\d+)?|\.\d+))(?P<unit>[A-Za-z%]*)$")
        .expect("Invalid regex")
});

/// Which validation rule a performance metric broke.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetricRule {
    #[error("label is empty")]
    EmptyLabel,

    #[error("label contains forbidden character {0:?}")]
    LabelCharacter(char),

    #[error("value is empty")]
    EmptyValue,

    #[error("value '{0}' is not a number")]
    InvalidValue(String),

    #[error("unit of measure '{0}' is not recognised")]
    UnknownUnit(String),

    #[error("unit of measure given both in the value and explicitly")]
    ConflictingUnit,

    #[error("{field} '{value}' is not a valid range")]
    InvalidRange { field: &'static str, value: String },

    #[error("{field} '{value}' is not a number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("min {min} is greater than max {max}")]
    MinExceedsMax { min: String, max: String },
}

/// One performance data metric.
///
/// Fields are kept as the caller supplied them; [`PerformanceData::validate`]
/// checks them against the grammar and the [`fmt::Display`] impl renders
/// them unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerformanceData {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_of_measurement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

impl PerformanceData {
    /// Creates a metric. `value` may carry its unit, e.g. `"42ms"`.
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            unit_of_measurement: None,
            warn: None,
            crit: None,
            min: None,
            max: None,
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit_of_measurement = Some(unit.into());
        self
    }

    #[must_use]
    pub fn with_warn(mut self, warn: impl Into<String>) -> Self {
        self.warn = Some(warn.into());
        self
    }

    #[must_use]
    pub fn with_crit(mut self, crit: impl Into<String>) -> Self {
        self.crit = Some(crit.into());
        self
    }

    #[must_use]
    pub fn with_min(mut self, min: impl Into<String>) -> Self {
        self.min = Some(min.into());
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: impl Into<String>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Checks the metric against the performance data grammar.
    ///
    /// # Errors
    /// Returns the first rule the metric breaks.
    pub fn validate(&self) -> Result<(), MetricRule> {
        self.validate_label()?;
        self.validate_value()?;

        for (field, range) in [("warn", &self.warn), ("crit", &self.crit)] {
            if let Some(text) = non_empty(range.as_deref()) {
                text.parse::<Range>()
                    .map_err(|_| MetricRule::InvalidRange {
                        field,
                        value: text.to_string(),
                    })?;
            }
        }

        let min = parse_bound("min", self.min.as_deref())?;
        let max = parse_bound("max", self.max.as_deref())?;
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(MetricRule::MinExceedsMax {
                    min: min.to_string(),
                    max: max.to_string(),
                });
            }
        }

        Ok(())
    }

    fn validate_label(&self) -> Result<(), MetricRule> {
        if self.label.trim().is_empty() {
            return Err(MetricRule::EmptyLabel);
        }
        match self.label.chars().find(|c| FORBIDDEN_LABEL_CHARS.contains(c)) {
            Some(c) => Err(MetricRule::LabelCharacter(c)),
            None => Ok(()),
        }
    }

    fn validate_value(&self) -> Result<(), MetricRule> {
        let value = self.value.trim();
        if value.is_empty() {
            return Err(MetricRule::EmptyValue);
        }

        let explicit_unit = non_empty(self.unit_of_measurement.as_deref());
        if let Some(unit) = explicit_unit {
            unit.parse::<UnitOfMeasurement>()
                .map_err(MetricRule::UnknownUnit)?;
        }

        if value == UNKNOWN_VALUE {
            return Ok(());
        }

        let caps = VALUE_PATTERN
            .captures(value)
            .ok_or_else(|| MetricRule::InvalidValue(value.to_string()))?;
        let suffix = caps.name("unit").map_or("", |m| m.as_str());
        if suffix.is_empty() {
            return Ok(());
        }
        if explicit_unit.is_some() {
            return Err(MetricRule::ConflictingUnit);
        }
        suffix
            .parse::<UnitOfMeasurement>()
            .map(|_| ())
            .map_err(MetricRule::UnknownUnit)
    }

    fn write_label(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.label.chars().any(char::is_whitespace) {
            write!(f, "'{}'", self.label)
        } else {
            f.write_str(&self.label)
        }
    }
}

impl fmt::Display for PerformanceData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_label(f)?;
        write!(
            f,
            "={}{};{};{};{};{}",
            self.value.trim(),
            self.unit_of_measurement.as_deref().unwrap_or("").trim(),
            self.warn.as_deref().unwrap_or("").trim(),
            self.crit.as_deref().unwrap_or("").trim(),
            self.min.as_deref().unwrap_or("").trim(),
            self.max.as_deref().unwrap_or("").trim(),
        )
    }
}

impl FromStr for PerformanceData {
    type Err = PluginError;

    /// Parses `label=value[UOM];[warn];[crit];[min];[max]`.
    ///
    /// The label may be single-quoted. The result is validated before it is
    /// returned.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (label, rest) = split_label(text).ok_or_else(|| PluginError::InvalidMetric {
            index: 0,
            label: text.to_string(),
            rule: MetricRule::EmptyValue,
        })?;

        let mut fields = rest.split(';').map(str::trim);
        let mut metric = Self::new(label, fields.next().unwrap_or_default());
        metric.warn = fields.next().and_then(|v| non_empty(Some(v))).map(String::from);
        metric.crit = fields.next().and_then(|v| non_empty(Some(v))).map(String::from);
        metric.min = fields.next().and_then(|v| non_empty(Some(v))).map(String::from);
        metric.max = fields.next().and_then(|v| non_empty(Some(v))).map(String::from);

        metric
            .validate()
            .map_err(|rule| PluginError::InvalidMetric {
                index: 0,
                label: metric.label.clone(),
                rule,
            })?;
        Ok(metric)
    }
}

/// Splits `label=rest`, honouring a single-quoted label.
fn split_label(text: &str) -> Option<(&str, &str)> {
    if let Some(quoted) = text.strip_prefix('\'') {
        let (label, rest) = quoted.split_once('\'')?;
        return Some((label, rest.strip_prefix('=')?));
    }
    text.split_once('=')
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_bound(field: &'static str, value: Option<&str>) -> Result<Option<f64>, MetricRule> {
    let Some(text) = non_empty(value) else {
        return Ok(None);
    };
    let invalid = || MetricRule::InvalidNumber {
        field,
        value: text.to_string(),
    };
    let caps = VALUE_PATTERN.captures(text).ok_or_else(invalid)?;
    if caps.name("unit").is_some_and(|m| !m.as_str().is_empty()) {
        return Err(invalid());
    }
    text.parse::<f64>().map(Some).map_err(|_| invalid())
}

#[cfg(test)]
#[path = "metric_tests.rs"]
mod tests;
