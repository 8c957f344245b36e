#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loading and canonicalization of the rent and income datasets.
//!
//! Raw CSV files are read into a [`table::RawTable`], canonicalized against
//! the embedded TOML schemas (see [`registry`]) and held in an immutable
//! [`DataStore`] for the lifetime of the process. Any schema or district
//! integrity problem aborts loading; there is no partial store.

pub mod canonicalize;
pub mod paths;
pub mod registry;
pub mod table;

use std::io::Read;

use bcn_rent_dataset_models::{DatasetKind, IncomeRecord, RentRecord};

use crate::paths::DataPaths;
use crate::table::RawTable;

/// Errors that can occur while loading a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// A required column is missing from the header row.
    #[error("Schema error: {dataset} dataset has no '{column}' column")]
    Schema {
        /// Dataset being loaded.
        dataset: DatasetKind,
        /// Name of the missing column.
        column: String,
    },

    /// A district spelling is not in the alias table.
    #[error("Data integrity error: {dataset} row {row} has unmapped district '{raw}'")]
    UnmappedDistrict {
        /// Dataset being loaded.
        dataset: DatasetKind,
        /// One-based line number in the source file (header is line 1).
        row: usize,
        /// The raw district spelling.
        raw: String,
    },

    /// A cell could not be interpreted (bad number, negative amount,
    /// unknown unit text).
    #[error("Data integrity error: {dataset} row {row} has invalid {column} value '{value}'")]
    InvalidValue {
        /// Dataset being loaded.
        dataset: DatasetKind,
        /// One-based line number in the source file (header is line 1).
        row: usize,
        /// Column holding the bad value.
        column: String,
        /// The raw cell content.
        value: String,
    },

    /// An embedded schema definition failed to parse.
    #[error("Registry error: failed to parse '{name}': {source}")]
    Registry {
        /// Name of the embedded definition.
        name: &'static str,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Immutable in-memory store of canonical records.
///
/// Built once at startup and shared by reference with every query.
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    rent: Vec<RentRecord>,
    income: Vec<IncomeRecord>,
}

impl DataStore {
    /// Wraps already-canonical record sets.
    #[must_use]
    pub const fn new(rent: Vec<RentRecord>, income: Vec<IncomeRecord>) -> Self {
        Self { rent, income }
    }

    /// Loads and canonicalizes both datasets from disk.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if a file cannot be read, a required column
    /// is missing, or a row fails canonicalization.
    pub fn load(paths: &DataPaths) -> Result<Self, DatasetError> {
        log::info!("Loading rent data from {}", paths.rent_csv.display());
        let rent_table = RawTable::from_path(DatasetKind::Rent, &paths.rent_csv)?;

        log::info!("Loading income data from {}", paths.income_csv.display());
        let income_table = RawTable::from_path(DatasetKind::Income, &paths.income_csv)?;

        Self::from_tables(&rent_table, &income_table)
    }

    /// Loads and canonicalizes both datasets from arbitrary CSV readers.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] under the same conditions as [`Self::load`].
    pub fn from_readers(rent: impl Read, income: impl Read) -> Result<Self, DatasetError> {
        let rent_table = RawTable::from_reader(DatasetKind::Rent, rent)?;
        let income_table = RawTable::from_reader(DatasetKind::Income, income)?;
        Self::from_tables(&rent_table, &income_table)
    }

    fn from_tables(rent_table: &RawTable, income_table: &RawTable) -> Result<Self, DatasetError> {
        let aliases = registry::district_aliases()?;
        let rent = canonicalize::canonicalize_rent(rent_table, &registry::rent_schema()?, &aliases)?;
        let income =
            canonicalize::canonicalize_income(income_table, &registry::income_schema()?, &aliases)?;

        log::info!(
            "Data store ready: {} rent records, {} income records",
            rent.len(),
            income.len()
        );

        Ok(Self::new(rent, income))
    }

    /// Canonical rent records.
    #[must_use]
    pub fn rent(&self) -> &[RentRecord] {
        &self.rent
    }

    /// Canonical income records.
    #[must_use]
    pub fn income(&self) -> &[IncomeRecord] {
        &self.income
    }
}
