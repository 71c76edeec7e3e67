//! # API shared
//!
//! Wire types and utilities shared by testreg API crates: request/response
//! bodies, the health check, and nothing else. Domain types live in
//! `testreg-core`; handlers in `api-rest` map between the two.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
