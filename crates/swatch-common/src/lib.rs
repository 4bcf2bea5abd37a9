//! Common utilities for Swatch.
//!
//! This crate provides shared infrastructure used by every extraction stage:
//! - **Warning System** - deduplicated, colored terminal output for recoverable oddities
//! - **Configuration** - sampler selectors, truncation limits, and digest limits
//! - **Text Helpers** - character-bounded truncation

pub mod config;
pub mod text;
pub mod warning;

pub use config::{ConfigError, DEFAULT_SELECTORS, DigestLimits, ExtractConfig};
