//! Shared utilities for the campaign reports backend.
//!
//! This crate provides common functionality used across the other crates:
//! - JWT validation (tokens are issued by the identity service, not here)
//! - Query parameter parsing and clamping helpers

pub mod jwt;
pub mod params;
