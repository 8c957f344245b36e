//! Raw CSV table reader.
//!
//! Reads a header row plus string cells, trimmed, with no type coercion.
//! Typing happens in [`crate::canonicalize`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use bcn_rent_dataset_models::DatasetKind;

use crate::DatasetError;

/// Cell spellings read as a missing value, besides the empty cell.
pub const MISSING_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A raw table: trimmed header names and trimmed string cells.
#[derive(Debug, Clone)]
pub struct RawTable {
    dataset: DatasetKind,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Opens and parses the CSV file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the file cannot be opened or parsed.
    pub fn from_path(dataset: DatasetKind, path: &Path) -> Result<Self, DatasetError> {
        let file = File::open(path)?;
        Self::from_reader(dataset, file)
    }

    /// Parses CSV content from `reader`. The first row is the header.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the content is not valid CSV.
    pub fn from_reader(dataset: DatasetKind, reader: impl Read) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_owned())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(|cell| cell.trim().to_owned()).collect());
        }

        log::debug!("[{dataset}] Parsed {} rows", rows.len());

        Ok(Self {
            dataset,
            headers,
            rows,
        })
    }

    /// Header names in file order.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows in file order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Returns the index of the column named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Schema`] if no header matches.
    pub fn column_index(&self, name: &str) -> Result<usize, DatasetError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DatasetError::Schema {
                dataset: self.dataset,
                column: name.to_string(),
            })
    }

    /// Returns `true` if every header has a non-missing cell in `row`.
    #[must_use]
    pub fn is_complete(&self, row: &[String]) -> bool {
        row.len() >= self.headers.len() && row.iter().all(|cell| !is_missing(cell))
    }
}

/// Returns the cell at `index`, or `""` for short rows.
#[must_use]
pub fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map_or("", String::as_str)
}

/// Returns `true` if `cell` is empty or one of [`MISSING_TOKENS`].
#[must_use]
pub fn is_missing(cell: &str) -> bool {
    cell.is_empty() || MISSING_TOKENS.contains(&cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_headers_and_cells() {
        let csv = " Year , District \n 2015 , Gracia \n";
        let table = RawTable::from_reader(DatasetKind::Rent, csv.as_bytes()).unwrap();
        assert_eq!(table.headers(), ["Year", "District"]);
        assert_eq!(table.rows()[0], ["2015", "Gracia"]);
    }

    #[test]
    fn missing_column_is_schema_error() {
        let table = RawTable::from_reader(DatasetKind::Income, "Any,Nom_Districte\n".as_bytes())
            .unwrap();
        assert_eq!(table.column_index("Nom_Districte").unwrap(), 1);
        let err = table.column_index("Import_Renda_Bruta").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Schema error: income dataset has no 'Import_Renda_Bruta' column"
        );
    }

    #[test]
    fn short_rows_are_incomplete() {
        let csv = "a,b,c\n1,2,3\n1,2\n1,,3\n";
        let table = RawTable::from_reader(DatasetKind::Income, csv.as_bytes()).unwrap();
        let complete: Vec<bool> = table.rows().iter().map(|r| table.is_complete(r)).collect();
        assert_eq!(complete, [true, false, false]);
        assert_eq!(cell(&table.rows()[1], 2), "");
    }

    #[test]
    fn missing_tokens_make_rows_incomplete() {
        let csv = "a,b\n1,NaN\nnull,2\nN/A,2\n1,2\n";
        let table = RawTable::from_reader(DatasetKind::Income, csv.as_bytes()).unwrap();
        let complete: Vec<bool> = table.rows().iter().map(|r| table.is_complete(r)).collect();
        assert_eq!(complete, [false, false, false, true]);
    }

    #[test]
    fn missing_cells() {
        for token in ["", "NaN", "nan", "NA", "<NA>", "NULL", "null", "None", "#N/A"] {
            assert!(is_missing(token), "{token:?}");
        }
        for value in ["0", "2015", "Gràcia", "Nan Barris"] {
            assert!(!is_missing(value), "{value:?}");
        }
    }
}
