//! Route handlers.

pub mod charts;
pub mod dashboard;
pub mod export;
pub mod health;
pub mod insights;
