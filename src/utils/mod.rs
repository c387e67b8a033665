//! Utility modules for the pack pipeline.

pub mod files;
pub mod log;
