//! Domain value types: share links, expiration specs, and share models.

pub mod expiration;
pub mod link;
pub mod share;

pub use expiration::{ExpirationSpec, ExpirationUnit, MaxExpiration};
pub use link::ShareLink;
pub use share::{CreateShareRequest, ShareRecord, ShareSecurity};
