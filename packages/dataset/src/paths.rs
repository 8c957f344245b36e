//! Canonical file paths for the source CSV files.
//!
//! Defaults live in the project root's `data/` directory and can be
//! overridden with the `RENT_CSV` and `INCOME_CSV` environment variables.

use std::path::{Path, PathBuf};

use bcn_rent_dataset_models::{IncomeSchema, RentSchema};

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`.
#[must_use]
pub fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

/// Returns the `data/` directory path.
#[must_use]
pub fn data_dir() -> PathBuf {
    project_root().join("data")
}

/// Locations of the two source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    /// Rent price CSV.
    pub rent_csv: PathBuf,
    /// Household income CSV.
    pub income_csv: PathBuf,
}

impl DataPaths {
    /// Default locations inside [`data_dir`], named by each schema.
    #[must_use]
    pub fn defaults(rent: &RentSchema, income: &IncomeSchema) -> Self {
        let dir = data_dir();
        Self {
            rent_csv: dir.join(&rent.file_name),
            income_csv: dir.join(&income.file_name),
        }
    }

    /// Defaults, overridden by `RENT_CSV` / `INCOME_CSV` when set.
    #[must_use]
    pub fn from_env(rent: &RentSchema, income: &IncomeSchema) -> Self {
        let defaults = Self::defaults(rent, income);
        Self {
            rent_csv: std::env::var_os("RENT_CSV").map_or(defaults.rent_csv, PathBuf::from),
            income_csv: std::env::var_os("INCOME_CSV").map_or(defaults.income_csv, PathBuf::from),
        }
    }
}
