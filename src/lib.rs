//! Floating version tags (`14`, `14.10`, ...) computed from concrete image tags

pub mod config;
pub mod logging;
pub mod tags;
