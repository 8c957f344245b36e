#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical record types for the rent and income datasets.
//!
//! Also defines the TOML schema describing each raw source file (column
//! names, unit discriminator texts, year bounds, exclusions) and the
//! district alias table used to canonicalize raw district spellings.

use std::collections::BTreeMap;

use bcn_rent_district_models::District;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Calendar year of a record.
pub type Year = u16;

/// Divisor turning an annual income into a monthly one.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Which of the two source datasets a value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DatasetKind {
    /// District rent prices.
    Rent,
    /// District household income.
    Income,
}

/// Price unit of a rent record.
///
/// Resolved once from the raw discriminator text during canonicalization
/// so nothing downstream compares free-text unit strings.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
pub enum PriceUnit {
    /// Average rent in euros per month.
    #[default]
    #[serde(rename = "month")]
    #[strum(to_string = "month")]
    PerMonth,
    /// Average rent in euros per square meter.
    #[serde(rename = "square_meter")]
    #[strum(to_string = "square_meter")]
    PerSquareMeter,
}

impl PriceUnit {
    /// Human-readable label used in chart titles.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PerMonth => "Month",
            Self::PerSquareMeter => "Square Meter",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::PerMonth, Self::PerSquareMeter]
    }
}

/// A canonical rent price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentRecord {
    /// Canonical district.
    pub district: District,
    /// Observation year, always within the rent schema's year bounds.
    pub year: Year,
    /// Whether `price` is per month or per square meter.
    pub unit: PriceUnit,
    /// Average price in euros.
    pub price: f64,
}

/// A canonical gross household income observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeRecord {
    /// Canonical district.
    pub district: District,
    /// Observation year.
    pub year: Year,
    /// Gross annual income in euros.
    pub gross_annual_income: f64,
}

/// Rent source file definition, deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentSchema {
    /// Unique source identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// File name inside the data directory.
    pub file_name: String,
    /// First year kept at load time (inclusive).
    pub min_year: Year,
    /// Last year kept at load time (inclusive).
    pub max_year: Year,
    /// Raw column names.
    pub columns: RentColumns,
    /// Raw unit discriminator texts.
    pub units: UnitDiscriminators,
}

impl RentSchema {
    /// Returns `true` if `year` lies inside the closed load range.
    #[must_use]
    pub const fn keeps_year(&self, year: Year) -> bool {
        year >= self.min_year && year <= self.max_year
    }
}

/// Column names of the raw rent file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentColumns {
    /// District name column.
    pub district: String,
    /// Year column.
    pub year: String,
    /// Price column.
    pub price: String,
    /// Free-text column telling monthly and per-surface prices apart.
    pub unit: String,
}

impl RentColumns {
    /// Every column the canonicalizer reads.
    #[must_use]
    pub fn required(&self) -> [&str; 4] {
        [&self.district, &self.year, &self.price, &self.unit]
    }
}

/// Raw texts of the rent unit discriminator column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitDiscriminators {
    /// Text marking a monthly price.
    pub per_month: String,
    /// Text marking a per-square-meter price.
    pub per_square_meter: String,
}

impl UnitDiscriminators {
    /// Maps a raw discriminator text to its [`PriceUnit`].
    #[must_use]
    pub fn resolve(&self, raw: &str) -> Option<PriceUnit> {
        let raw = raw.trim();
        if raw == self.per_month {
            Some(PriceUnit::PerMonth)
        } else if raw == self.per_square_meter {
            Some(PriceUnit::PerSquareMeter)
        } else {
            None
        }
    }
}

/// Income source file definition, deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeSchema {
    /// Unique source identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// File name inside the data directory.
    pub file_name: String,
    /// Raw column names.
    pub columns: IncomeColumns,
    /// Districts whose income rows are removed after canonicalization.
    #[serde(default)]
    pub excluded_districts: Vec<District>,
}

/// Column names of the raw income file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeColumns {
    /// District name column.
    pub district: String,
    /// Year column.
    pub year: String,
    /// Gross annual income column.
    pub income: String,
}

impl IncomeColumns {
    /// Every column the canonicalizer reads.
    #[must_use]
    pub fn required(&self) -> [&str; 3] {
        [&self.district, &self.year, &self.income]
    }
}

/// Raw district spelling to canonical district substitution table,
/// deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistrictAliasTable {
    /// Raw spelling (trimmed, case-sensitive) to canonical district.
    pub aliases: BTreeMap<String, District>,
}

impl DistrictAliasTable {
    /// Looks up a raw spelling.
    #[must_use]
    pub fn lookup(&self, raw: &str) -> Option<District> {
        self.aliases.get(raw.trim()).copied()
    }
}
