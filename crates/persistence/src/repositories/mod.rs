//! Repository implementations.

pub mod reports;

pub use reports::{DashboardSnapshot, ReportsRepository};
