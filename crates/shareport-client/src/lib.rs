//! # shareport-client
//!
//! HTTP implementation of the [`ShareGateway`] boundary, backed by the
//! Shareport backend's REST API.
//!
//! [`ShareGateway`]: shareport_core::traits::ShareGateway

pub mod http;

pub use http::HttpShareGateway;
