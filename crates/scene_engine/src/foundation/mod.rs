//! Foundation module - Core utilities and types
//!
//! - Math types and matrix helpers
//! - Logging setup

pub mod logging;
pub mod math;
