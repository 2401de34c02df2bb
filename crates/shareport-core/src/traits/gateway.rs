//! Share gateway trait for the backend collaborator.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::link::ShareLink;
use crate::types::share::{CreateShareRequest, ShareRecord};

/// Trait for the backend that owns share persistence.
///
/// The workflow consumes exactly two operations: a read-only availability
/// probe and the one-shot share submission. Transport failures must be
/// propagated as errors, never interpreted as "available" or "taken".
#[async_trait]
pub trait ShareGateway: Send + Sync + std::fmt::Debug + 'static {
    /// Check whether a share link is currently unused.
    async fn is_link_available(&self, link: &ShareLink) -> AppResult<bool>;

    /// Submit a fully composed create-share request.
    ///
    /// Called at most once per successful form submission. The request is
    /// never retried automatically on failure.
    async fn create_share(&self, request: &CreateShareRequest) -> AppResult<ShareRecord>;
}
