//! Validated share link tokens.
//!
//! A share link is the short, human-typable token appended to the
//! application URL to reach a share. Uniqueness among active shares is
//! enforced by the backend, not here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Minimum share link length.
pub const LINK_MIN_LENGTH: usize = 3;
/// Maximum share link length.
pub const LINK_MAX_LENGTH: usize = 50;

/// A validated share link token.
///
/// Always 3-50 characters drawn from `[a-zA-Z0-9_-]`. Once a share is
/// created the link is immutable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ShareLink(String);

impl ShareLink {
    /// Create a share link, validating length and character set.
    pub fn new(value: impl Into<String>) -> Result<Self, AppError> {
        let value = value.into();
        Self::validate(&value)?;
        Ok(Self(value))
    }

    /// Validate a candidate link without constructing one.
    pub fn validate(value: &str) -> Result<(), AppError> {
        if value.len() < LINK_MIN_LENGTH {
            return Err(AppError::validation(format!(
                "Share link must be at least {LINK_MIN_LENGTH} characters"
            )));
        }
        if value.len() > LINK_MAX_LENGTH {
            return Err(AppError::validation(format!(
                "Share link must be at most {LINK_MAX_LENGTH} characters"
            )));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(AppError::validation(
                "Share link may only contain letters, digits, '-' and '_'",
            ));
        }
        Ok(())
    }

    /// Return the link as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the link and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ShareLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ShareLink {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ShareLink {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ShareLink> for String {
    fn from(link: ShareLink) -> String {
        link.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_allowed_characters() {
        assert!(ShareLink::new("myAwesomeShare").is_ok());
        assert!(ShareLink::new("a-b_c42").is_ok());
    }

    #[test]
    fn test_rejects_too_short_and_too_long() {
        assert!(ShareLink::new("ab").is_err());
        assert!(ShareLink::new("x".repeat(51)).is_err());
        assert!(ShareLink::new("x".repeat(50)).is_ok());
    }

    #[test]
    fn test_rejects_disallowed_characters() {
        assert!(ShareLink::new("has space").is_err());
        assert!(ShareLink::new("sla/sh").is_err());
        assert!(ShareLink::new("d.ot").is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let link = ShareLink::new("abc123").unwrap();
        let json = serde_json::to_string(&link).unwrap();
        assert_eq!(json, "\"abc123\"");
        let back: ShareLink = serde_json::from_str(&json).unwrap();
        assert_eq!(back, link);
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        let result: Result<ShareLink, _> = serde_json::from_str("\"a!\"");
        assert!(result.is_err());
    }
}
