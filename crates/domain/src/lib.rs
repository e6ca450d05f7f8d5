//! Domain layer for the campaign reports backend.
//!
//! This crate contains:
//! - Domain models (report aggregates, insights, principal)
//! - Pure business logic (metric derivation, trend analysis, insights)

pub mod models;
pub mod services;
