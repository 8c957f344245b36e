#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived series types produced by the aggregations.
//!
//! Series are ordered maps so iteration (and serialization) order is
//! stable for identical inputs. A key that had no matching rows is absent,
//! never zero-filled.

use std::collections::BTreeMap;

use bcn_rent_dataset_models::Year;
use bcn_rent_district_models::District;
use serde::{Deserialize, Serialize};

/// Year-indexed numeric series.
pub type YearSeries = BTreeMap<Year, f64>;

/// District-indexed numeric series.
pub type DistrictSeries = BTreeMap<District, f64>;

/// Share of the monthly income taken by monthly rent, per year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryShare {
    /// Rent as a percentage of monthly income.
    pub rent_percent: YearSeries,
    /// Income as a percentage of itself (100 for every year present).
    pub income_percent: YearSeries,
}

impl SalaryShare {
    /// Rent shares rendered with one decimal and a percent sign.
    #[must_use]
    pub fn rent_labels(&self) -> BTreeMap<Year, String> {
        self.rent_percent
            .iter()
            .map(|(year, value)| (*year, format!("{value:.1}%")))
            .collect()
    }
}
