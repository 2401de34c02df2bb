//! Share creation options.

use serde::{Deserialize, Serialize};

/// Administrator-controlled options that shape the share creation flow.
///
/// These flags gate which fields are presented and required. They are
/// supplied by configuration, never chosen by the end user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareOptions {
    /// Whether the current user is signed in. Unsigned users get a
    /// warning that their share cannot be managed later.
    #[serde(default)]
    pub is_user_signed_in: bool,
    /// Whether this is a reverse share. Reverse shares suppress the
    /// expiration prompt; expiration is handled by the inviting side.
    #[serde(default)]
    pub is_reverse_share: bool,
    /// Public application URL used to render share links.
    #[serde(default = "default_app_url")]
    pub app_url: String,
    /// Whether shares may be created without signing in.
    #[serde(default = "default_true")]
    pub allow_unauthenticated_shares: bool,
    /// Whether e-mail recipients may be attached to a share.
    #[serde(default = "default_true")]
    pub enable_email_recipients: bool,
    /// Maximum share lifetime in hours. `0` means unbounded, and only
    /// then may a share be configured to never expire.
    #[serde(default)]
    pub max_expiration_in_hours: u32,
    /// Whether to use the simplified flow (name and description only,
    /// link and expiration chosen automatically).
    #[serde(default)]
    pub simplified: bool,
}

impl Default for ShareOptions {
    fn default() -> Self {
        Self {
            is_user_signed_in: false,
            is_reverse_share: false,
            app_url: default_app_url(),
            allow_unauthenticated_shares: true,
            enable_email_recipients: true,
            max_expiration_in_hours: 0,
            simplified: false,
        }
    }
}

fn default_app_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_true() -> bool {
    true
}
