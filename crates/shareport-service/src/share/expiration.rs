//! Expiration policy evaluation against the administrator bound.

use chrono::{DateTime, Duration, Utc};

use shareport_core::config::ShareOptions;
use shareport_core::error::AppError;
use shareport_core::result::AppResult;
use shareport_core::types::{ExpirationSpec, MaxExpiration};

/// Validates requested expirations against the configured maximum.
#[derive(Debug, Clone)]
pub struct ExpirationPolicy {
    /// The administrator-configured bound.
    max: MaxExpiration,
}

impl ExpirationPolicy {
    /// Creates a policy from the share options.
    pub fn new(options: &ShareOptions) -> Self {
        Self {
            max: MaxExpiration::from(options.max_expiration_in_hours),
        }
    }

    /// Creates a policy from an explicit bound.
    pub fn with_max(max: MaxExpiration) -> Self {
        Self { max }
    }

    /// The configured bound.
    pub fn max(&self) -> MaxExpiration {
        self.max
    }

    /// Evaluate a requested expiration against the bound at the current time.
    pub fn evaluate(&self, spec: &ExpirationSpec) -> AppResult<ExpirationSpec> {
        self.evaluate_at(spec, Utc::now())
    }

    /// Evaluate a requested expiration using an explicit "now".
    ///
    /// Violations are reported as policy errors naming the human-readable
    /// maximum, never silently clamped. On success the spec is returned
    /// unchanged for the wire.
    pub fn evaluate_at(&self, spec: &ExpirationSpec, now: DateTime<Utc>) -> AppResult<ExpirationSpec> {
        let Some(bound_hours) = self.max.as_hours() else {
            return Ok(*spec);
        };

        match spec {
            ExpirationSpec::Never => Err(self.violation()),
            ExpirationSpec::After { .. } => {
                let deadline = spec
                    .deadline_from(now)
                    .ok_or_else(|| AppError::validation("Expiration is out of range"))?;
                if deadline > now + Duration::hours(i64::from(bound_hours)) {
                    Err(self.violation())
                } else {
                    Ok(*spec)
                }
            }
        }
    }

    fn violation(&self) -> AppError {
        AppError::policy(format!(
            "Shares must expire within {}",
            self.max.humanized()
        ))
    }
}

/// Human-readable preview of a chosen expiration, as shown in the wizard.
pub fn expiration_preview(spec: &ExpirationSpec, now: DateTime<Utc>) -> String {
    match spec.deadline_from(now) {
        None => "This share will never expire.".to_string(),
        Some(deadline) => format!(
            "This share will expire on {}.",
            deadline.format("%Y-%m-%d %H:%M UTC")
        ),
    }
}
