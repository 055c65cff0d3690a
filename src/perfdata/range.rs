//! Nagios threshold ranges (`[@][start:]end`).
//!
//! | Text     | Alerts when value is          |
//! |----------|-------------------------------|
//! | `10`     | `< 0` or `> 10`               |
//! | `10:`    | `< 10`                        |
//! | `~:10`   | `> 10`                        |
//! | `10:20`  | `< 10` or `> 20`              |
//! | `@10:20` | `>= 10` and `<= 20`           |

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::PluginError;

static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<inside>@)?(?:(?P<start>~|[+-]?(?:\d+(?:\.\d+)?|\.\d+))?(?P<colon>:))?(?P<end>[+-]?(?:\d+(?:\.\d+)?|\.\d+))?$",
    )
    .expect("Invalid regex")
});

/// A parsed threshold range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Lower bound, `f64::NEG_INFINITY` for `~`.
    pub start: f64,
    /// Upper bound, `f64::INFINITY` when omitted.
    pub end: f64,
    /// `@` prefix: alert when the value lies inside the range.
    pub alert_inside: bool,
}

impl Range {
    /// Returns true if `value` should raise an alert under this range.
    #[must_use]
    pub fn should_alert(&self, value: f64) -> bool {
        let inside = self.start <= value && value <= self.end;
        if self.alert_inside { inside } else { !inside }
    }
}

impl FromStr for Range {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PluginError::InvalidRange(s.to_string());
        let text = s.trim();
        if text.is_empty() || text == "@" {
            return Err(invalid());
        }

        let caps = RANGE_PATTERN.captures(text).ok_or_else(invalid)?;
        let has_colon = caps.name("colon").is_some();
        let start_text = caps.name("start").map(|m| m.as_str());
        let end_text = caps.name("end").map(|m| m.as_str());

        if !has_colon && end_text.is_none() {
            return Err(invalid());
        }

        let start = match start_text {
            Some("~") => f64::NEG_INFINITY,
            Some(n) => n.parse::<f64>().map_err(|_| invalid())?,
            None => 0.0,
        };
        let end = match end_text {
            Some(n) => n.parse::<f64>().map_err(|_| invalid())?,
            None => f64::INFINITY,
        };

        if start > end {
            return Err(invalid());
        }

        Ok(Self {
            start,
            end,
            alert_inside: caps.name("inside").is_some(),
        })
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alert_inside {
            f.write_str("@")?;
        }
        if self.start == 0.0 && self.end.is_finite() {
            return write!(f, "{}", self.end);
        }
        if self.start == f64::NEG_INFINITY {
            f.write_str("~:")?;
        } else {
            write!(f, "{}:", self.start)?;
        }
        if self.end.is_finite() {
            write!(f, "{}", self.end)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "range_tests.rs"]
mod tests;
