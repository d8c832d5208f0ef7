//! Core types and traits for the crypto insight dashboard.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Sample, Bar, PriceSeries) and the supported asset table
//! - Fundamentals, news and on-chain records returned by collaborators
//! - Core traits for indicators and external data sources
//! - The error taxonomy shared by every analysis stage

pub mod error;
pub mod traits;
pub mod types;

pub use error::{DataError, ExportError, IndicatorError, InsightError, InsightResult};
pub use traits::*;
pub use types::*;
