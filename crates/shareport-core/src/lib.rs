//! # shareport-core
//!
//! Core crate for Shareport. Contains the gateway boundary trait,
//! configuration schemas, domain value types (share links, expiration
//! specs), the share request/record models, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Shareport crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
