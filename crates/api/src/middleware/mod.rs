//! HTTP middleware components.

pub mod logging;
pub mod rate_limit;

pub use rate_limit::{rate_limit_middleware, spawn_eviction_task, RateLimiterState};
