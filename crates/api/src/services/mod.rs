//! Application services.

pub mod assemble;
pub mod export;
