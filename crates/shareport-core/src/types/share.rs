//! Share request and record models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail, ValidationError};

use crate::types::expiration::ExpirationSpec;
use crate::types::link::ShareLink;

/// Optional access restrictions on a share.
///
/// Absence of a field means "no restriction", not zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ShareSecurity {
    /// Password required to open the share.
    #[validate(length(min = 3, max = 30))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Maximum number of times the share may be viewed.
    #[validate(range(min = 1))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_views: Option<u32>,
}

impl ShareSecurity {
    /// Security block with no restrictions.
    pub fn none() -> Self {
        Self {
            password: None,
            max_views: None,
        }
    }

    /// Whether neither restriction is set.
    pub fn is_unrestricted(&self) -> bool {
        self.password.is_none() && self.max_views.is_none()
    }
}

/// A fully composed request to create a share.
///
/// Owned by the form composer until handed to the gateway; not mutated
/// after handoff. The composer never emits a request that fails its own
/// `validate()`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateShareRequest {
    /// The share link token.
    #[serde(rename = "id")]
    pub link: ShareLink,
    /// Display name of the share.
    #[validate(length(min = 3, max = 30))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description, unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Expiration, serialized as `"never"` or `"<n><unit>"`.
    pub expiration: ExpirationSpec,
    /// E-mail recipients in insertion order, not deduplicated.
    #[validate(custom(function = validate_recipients))]
    pub recipients: Vec<String>,
    /// Access restrictions.
    #[validate(nested)]
    pub security: ShareSecurity,
}

/// Validate every recipient as a plausible mailbox address.
fn validate_recipients(recipients: &[String]) -> Result<(), ValidationError> {
    for recipient in recipients {
        if !recipient.validate_email() {
            return Err(ValidationError::new("email"));
        }
    }
    Ok(())
}

/// A share as returned by the backend after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareRecord {
    /// The share link token.
    #[serde(rename = "id")]
    pub link: ShareLink,
    /// Display name.
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Absolute expiration time, `None` for never.
    pub expires_at: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl ShareRecord {
    /// The full URL at which this share can be reached.
    pub fn share_url(&self, app_url: &str) -> String {
        format!("{}/s/{}", app_url.trim_end_matches('/'), self.link)
    }
}
