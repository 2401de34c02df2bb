//! Unique share link allocation with a bounded retry budget.

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, warn};

use shareport_core::error::AppError;
use shareport_core::result::AppResult;
use shareport_core::traits::ShareGateway;
use shareport_core::types::ShareLink;

use super::link::LinkGenerator;

/// Default number of generate-and-probe attempts before giving up.
pub const DEFAULT_RETRY_BUDGET: u32 = 10;

/// Allocates a share link that the backend reports as available.
///
/// Attempts are strictly sequential: each availability probe resolves
/// before the next candidate is generated, so two in-flight probes can
/// never both observe the same candidate as free.
#[derive(Debug, Clone)]
pub struct LinkAllocator {
    /// Backend gateway used for availability probes.
    gateway: Arc<dyn ShareGateway>,
    /// Candidate generator.
    generator: LinkGenerator,
    /// Maximum number of attempts.
    retry_budget: u32,
}

impl LinkAllocator {
    /// Creates an allocator with the default retry budget.
    pub fn new(gateway: Arc<dyn ShareGateway>) -> Self {
        Self::with_budget(gateway, DEFAULT_RETRY_BUDGET)
    }

    /// Creates an allocator with an explicit retry budget.
    pub fn with_budget(gateway: Arc<dyn ShareGateway>, retry_budget: u32) -> Self {
        Self {
            gateway,
            generator: LinkGenerator::new(),
            retry_budget,
        }
    }

    /// Allocate an available share link, or fail definitively.
    ///
    /// Returns the first candidate the backend reports as free. Probe
    /// transport errors abort the loop and propagate; they are never
    /// counted as "taken". When the budget is exhausted the error kind
    /// is [`shareport_core::error::ErrorKind::AllocationExhausted`].
    pub async fn allocate<R: Rng + Send>(&self, rng: &mut R) -> AppResult<ShareLink> {
        for attempt in 1..=self.retry_budget {
            let candidate = ShareLink::new(self.generator.generate(rng))?;
            if self.gateway.is_link_available(&candidate).await? {
                debug!(link = %candidate, attempt, "Allocated available share link");
                return Ok(candidate);
            }
            debug!(link = %candidate, attempt, "Candidate link taken, retrying");
        }

        warn!(
            budget = self.retry_budget,
            "Exhausted share link allocation budget"
        );
        Err(AppError::allocation_exhausted(format!(
            "No available share link after {} attempts",
            self.retry_budget
        )))
    }
}
