//! Configuration module
//!
//! Table defaults, export settings, preference storage and logging level.

pub mod config;
