//! Service plumbing shared by DegreeDash binaries: configuration loading,
//! tracing setup, request ids, health checks, and query helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
