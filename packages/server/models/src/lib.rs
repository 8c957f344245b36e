#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the rent dashboard server.
//!
//! View bundles are returned as-is from `bcn_rent_view_models`; this crate
//! only holds the HTTP-specific envelope types.

use bcn_rent_dataset_models::Year;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Canonical rent records held in memory.
    pub rent_records: usize,
    /// Canonical income records held in memory.
    pub income_records: usize,
}

/// Query parameters for the map endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapQueryParams {
    /// Selected year. Defaults to the year selector's default.
    pub year: Option<Year>,
}

/// Query parameters for the trend endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendQueryParams {
    /// `"Barcelona"` or a canonical district name.
    pub district: Option<String>,
    /// `"month"` or `"square_meter"`.
    pub unit: Option<String>,
}

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable message.
    pub error: String,
}

impl ApiError {
    /// Creates an error body from anything printable.
    #[must_use]
    pub fn new(message: impl std::fmt::Display) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_params_are_optional() {
        let params: TrendQueryParams = serde_json::from_str("{}").unwrap();
        assert!(params.district.is_none());
        assert!(params.unit.is_none());
    }

    #[test]
    fn error_body_shape() {
        let json = serde_json::to_string(&ApiError::new("bad unit")).unwrap();
        assert_eq!(json, r#"{"error":"bad unit"}"#);
    }
}
