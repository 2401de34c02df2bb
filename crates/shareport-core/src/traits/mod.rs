//! Boundary traits consumed by the share creation workflow.

pub mod gateway;

pub use gateway::ShareGateway;
