//! drawkit Settings Crate
//!
//! Handles the configuration consumed by the conversion engine and the
//! picture importer, and its persistence as JSON or TOML.

pub mod config;

pub use config::{Config, ConversionSettings, ImportSettings};
