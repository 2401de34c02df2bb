//! # shareport-service
//!
//! The share creation workflow: link candidate generation, bounded-retry
//! unique link allocation, expiration policy evaluation, and the form
//! composer that validates user input and hands a normalized request to
//! the backend gateway.

pub mod share;
