//! Share expiration specifications and the administrator bound.
//!
//! The wire form of an expiration is `"never"` or `"<magnitude><unit>"`,
//! e.g. `"2days"`. The UI selector historically carried a leading hyphen
//! on the unit (`"-days"`); that form is accepted on parse and normalized.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Time unit for share expiration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpirationUnit {
    /// Minutes.
    Minutes,
    /// Hours.
    Hours,
    /// Days.
    Days,
    /// Weeks.
    Weeks,
    /// Calendar months.
    Months,
    /// Calendar years.
    Years,
}

impl ExpirationUnit {
    /// All units, in the order the selector presents them.
    pub const ALL: [ExpirationUnit; 6] = [
        Self::Minutes,
        Self::Hours,
        Self::Days,
        Self::Weeks,
        Self::Months,
        Self::Years,
    ];

    /// Parse a unit name. A leading hyphen (the legacy selector value
    /// form, e.g. `"-days"`) is stripped.
    pub fn parse(value: &str) -> Option<Self> {
        match value.strip_prefix('-').unwrap_or(value) {
            "minutes" => Some(Self::Minutes),
            "hours" => Some(Self::Hours),
            "days" => Some(Self::Days),
            "weeks" => Some(Self::Weeks),
            "months" => Some(Self::Months),
            "years" => Some(Self::Years),
            _ => None,
        }
    }

    /// Canonical unit name as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
            Self::Years => "years",
        }
    }
}

impl fmt::Display for ExpirationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A requested share expiration: never, or a positive duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ExpirationSpec {
    /// The share never expires. Only valid under an unbounded policy.
    Never,
    /// The share expires after the given duration from creation.
    After {
        /// Positive number of units.
        magnitude: u32,
        /// Duration unit.
        unit: ExpirationUnit,
    },
}

impl ExpirationSpec {
    /// Create a duration expiration. The magnitude must be positive.
    pub fn after(magnitude: u32, unit: ExpirationUnit) -> Result<Self, AppError> {
        if magnitude == 0 {
            return Err(AppError::validation("Expiration magnitude must be positive"));
        }
        Ok(Self::After { magnitude, unit })
    }

    /// Whether this is the `never` sentinel.
    pub fn is_never(&self) -> bool {
        matches!(self, Self::Never)
    }

    /// Compute the absolute deadline from the given instant.
    ///
    /// Months and years use calendar arithmetic. Returns `None` for
    /// `Never` or when the deadline is not representable.
    pub fn deadline_from(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Never => None,
            Self::After { magnitude, unit } => {
                let n = i64::from(*magnitude);
                match unit {
                    ExpirationUnit::Minutes => Some(now + Duration::minutes(n)),
                    ExpirationUnit::Hours => Some(now + Duration::hours(n)),
                    ExpirationUnit::Days => Some(now + Duration::days(n)),
                    ExpirationUnit::Weeks => Some(now + Duration::weeks(n)),
                    ExpirationUnit::Months => now.checked_add_months(Months::new(*magnitude)),
                    ExpirationUnit::Years => {
                        now.checked_add_months(Months::new(magnitude.saturating_mul(12)))
                    }
                }
            }
        }
    }
}

impl fmt::Display for ExpirationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => write!(f, "never"),
            Self::After { magnitude, unit } => write!(f, "{magnitude}{unit}"),
        }
    }
}

impl FromStr for ExpirationSpec {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "never" {
            return Ok(Self::Never);
        }
        let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
        let magnitude: u32 = digits
            .parse()
            .map_err(|_| AppError::validation(format!("Invalid expiration '{s}'")))?;
        let unit = ExpirationUnit::parse(&s[digits.len()..])
            .ok_or_else(|| AppError::validation(format!("Unrecognized expiration unit in '{s}'")))?;
        Self::after(magnitude, unit)
    }
}

impl TryFrom<String> for ExpirationSpec {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ExpirationSpec> for String {
    fn from(spec: ExpirationSpec) -> String {
        spec.to_string()
    }
}

/// Administrator-configured maximum share lifetime.
///
/// A configured value of `0` hours means unbounded: shares may be set to
/// never expire. Any other value forbids `never` and caps the deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaxExpiration {
    /// No maximum; `never` is allowed.
    Unbounded,
    /// Shares must expire within this many hours.
    Hours(u32),
}

impl MaxExpiration {
    /// Return the bound in hours, or `None` when unbounded.
    pub fn as_hours(&self) -> Option<u32> {
        match self {
            Self::Unbounded => None,
            Self::Hours(h) => Some(*h),
        }
    }

    /// Whether the `never` sentinel is allowed under this bound.
    pub fn allows_never(&self) -> bool {
        matches!(self, Self::Unbounded)
    }

    /// Human-readable form of the bound, e.g. `72` hours -> `"3 days"`.
    pub fn humanized(&self) -> String {
        match self {
            Self::Unbounded => "unlimited".to_string(),
            Self::Hours(h) => humanize_hours(*h),
        }
    }
}

impl From<u32> for MaxExpiration {
    /// Convert configured hours to a bound. `0` means unbounded.
    fn from(value: u32) -> Self {
        if value == 0 {
            Self::Unbounded
        } else {
            Self::Hours(value)
        }
    }
}

/// Render a whole number of hours in the largest unit that divides it.
fn humanize_hours(hours: u32) -> String {
    let (n, word) = if hours % 8760 == 0 {
        (hours / 8760, "year")
    } else if hours % 720 == 0 {
        (hours / 720, "month")
    } else if hours % 168 == 0 {
        (hours / 168, "week")
    } else if hours % 24 == 0 {
        (hours / 24, "day")
    } else {
        (hours, "hour")
    };
    if n == 1 {
        format!("1 {word}")
    } else {
        format!("{n} {word}s")
    }
}
