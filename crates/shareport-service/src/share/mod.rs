//! Share creation workflow components.

pub mod allocator;
pub mod expiration;
pub mod form;
pub mod link;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;

pub use allocator::{DEFAULT_RETRY_BUDGET, LinkAllocator};
pub use expiration::{ExpirationPolicy, expiration_preview};
pub use form::{CreateShareForm, FormValues};
pub use link::LinkGenerator;
pub use validate::{FieldValidator, FormField};
