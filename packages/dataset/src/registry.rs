//! Compile-time registry of dataset definitions.
//!
//! The rent and income schemas and the district alias table are TOML files
//! in `sources/`, embedded via `include_str!`.

use bcn_rent_dataset_models::{DistrictAliasTable, IncomeSchema, RentSchema};
use serde::de::DeserializeOwned;

use crate::DatasetError;

const RENT_TOML: &str = include_str!("../sources/rent.toml");
const INCOME_TOML: &str = include_str!("../sources/income.toml");
const DISTRICTS_TOML: &str = include_str!("../sources/districts.toml");

fn parse<T: DeserializeOwned>(name: &'static str, content: &str) -> Result<T, DatasetError> {
    toml::de::from_str(content).map_err(|source| DatasetError::Registry { name, source })
}

/// Returns the rent source definition.
///
/// # Errors
///
/// Returns [`DatasetError::Registry`] if the embedded TOML is malformed.
pub fn rent_schema() -> Result<RentSchema, DatasetError> {
    parse("rent.toml", RENT_TOML)
}

/// Returns the income source definition.
///
/// # Errors
///
/// Returns [`DatasetError::Registry`] if the embedded TOML is malformed.
pub fn income_schema() -> Result<IncomeSchema, DatasetError> {
    parse("income.toml", INCOME_TOML)
}

/// Returns the raw-to-canonical district substitution table.
///
/// # Errors
///
/// Returns [`DatasetError::Registry`] if the embedded TOML is malformed.
pub fn district_aliases() -> Result<DistrictAliasTable, DatasetError> {
    parse("districts.toml", DISTRICTS_TOML)
}
