#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation engine over canonical rent and income records.
//!
//! Every function is pure: it reads borrowed records and returns a fresh
//! series. Source records are never mutated.

pub mod aggregate;

use bcn_rent_dataset_models::Year;
use thiserror::Error;

/// Errors that can occur during aggregation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    /// A ratio denominator was zero or not finite.
    #[error("Arithmetic domain error: denominator {denominator} for year {year}")]
    ArithmeticDomain {
        /// Year whose denominator was rejected.
        year: Year,
        /// The rejected denominator.
        denominator: f64,
    },
}
