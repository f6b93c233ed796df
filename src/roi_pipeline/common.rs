//! Common utilities module
//!
//! This module contains the error type and configuration shared across the ROI pipeline.

pub mod config;
pub mod error;

pub use config::{ParseConfig, ParseConfigBuilder};
pub use error::{ParseError, Result};
