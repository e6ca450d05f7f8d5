//! Persistence layer for the campaign reports backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (raw aggregate row mappings)
//! - The reports repository with the grouped aggregation queries

pub mod db;
pub mod entities;
pub mod repositories;
