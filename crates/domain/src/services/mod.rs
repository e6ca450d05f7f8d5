//! Pure domain services.

pub mod analysis;
pub mod insights;
pub mod metrics;
