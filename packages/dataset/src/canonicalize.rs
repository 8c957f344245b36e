//! Canonicalizes raw rent and income tables into typed records.
//!
//! Every district spelling is substituted through the
//! [`DistrictAliasTable`]; a spelling outside the table aborts the load
//! instead of being dropped. Rent rows are restricted to the schema's
//! closed year range and their unit text is resolved to a [`PriceUnit`]
//! tag. Income rows with any missing cell are discarded before typing, and
//! rows of excluded districts are removed afterwards. A cell is missing
//! when [`is_missing`] says so.

use bcn_rent_dataset_models::{
    DatasetKind, DistrictAliasTable, IncomeRecord, IncomeSchema, PriceUnit, RentRecord,
    RentSchema, Year,
};
use bcn_rent_district_models::District;

use crate::DatasetError;
use crate::table::{RawTable, cell, is_missing};

/// Canonicalizes the raw rent table.
///
/// Rows with a missing year count as outside the year range. Rows with a
/// missing price are skipped; they carry no observation.
///
/// # Errors
///
/// Returns [`DatasetError::Schema`] if a required column is missing,
/// [`DatasetError::UnmappedDistrict`] for an unknown district spelling, or
/// [`DatasetError::InvalidValue`] for an unparseable year or price, a
/// negative price, or an unknown unit text.
pub fn canonicalize_rent(
    table: &RawTable,
    schema: &RentSchema,
    aliases: &DistrictAliasTable,
) -> Result<Vec<RentRecord>, DatasetError> {
    let dataset = DatasetKind::Rent;
    let district_idx = table.column_index(&schema.columns.district)?;
    let year_idx = table.column_index(&schema.columns.year)?;
    let price_idx = table.column_index(&schema.columns.price)?;
    let unit_idx = table.column_index(&schema.columns.unit)?;

    let mut records = Vec::with_capacity(table.rows().len());
    let mut out_of_range = 0_usize;
    let mut without_price = 0_usize;

    for (i, row) in table.rows().iter().enumerate() {
        let line = i + 2;

        let year_raw = cell(row, year_idx);
        if is_missing(year_raw) {
            out_of_range += 1;
            continue;
        }
        let year = parse_year(year_raw)
            .ok_or_else(|| invalid(dataset, line, &schema.columns.year, year_raw))?;
        if !schema.keeps_year(year) {
            out_of_range += 1;
            continue;
        }

        let district = map_district(dataset, line, cell(row, district_idx), aliases)?;

        let unit_raw = cell(row, unit_idx);
        let unit: PriceUnit = schema
            .units
            .resolve(unit_raw)
            .ok_or_else(|| invalid(dataset, line, &schema.columns.unit, unit_raw))?;

        let price_raw = cell(row, price_idx);
        if is_missing(price_raw) {
            without_price += 1;
            continue;
        }
        let price = parse_amount(price_raw)
            .ok_or_else(|| invalid(dataset, line, &schema.columns.price, price_raw))?;

        records.push(RentRecord {
            district,
            year,
            unit,
            price,
        });
    }

    log::info!(
        "[{}] {} records kept, {out_of_range} outside {}-{}, {without_price} without price",
        schema.id,
        records.len(),
        schema.min_year,
        schema.max_year,
    );

    Ok(records)
}

/// Canonicalizes the raw income table.
///
/// # Errors
///
/// Returns [`DatasetError::Schema`] if a required column is missing,
/// [`DatasetError::UnmappedDistrict`] for an unknown district spelling, or
/// [`DatasetError::InvalidValue`] for an unparseable year or income, or a
/// negative income.
pub fn canonicalize_income(
    table: &RawTable,
    schema: &IncomeSchema,
    aliases: &DistrictAliasTable,
) -> Result<Vec<IncomeRecord>, DatasetError> {
    let dataset = DatasetKind::Income;
    let district_idx = table.column_index(&schema.columns.district)?;
    let year_idx = table.column_index(&schema.columns.year)?;
    let income_idx = table.column_index(&schema.columns.income)?;

    let mut records = Vec::with_capacity(table.rows().len());
    let mut incomplete = 0_usize;
    let mut excluded = 0_usize;

    for (i, row) in table.rows().iter().enumerate() {
        let line = i + 2;

        if !table.is_complete(row) {
            incomplete += 1;
            continue;
        }

        let year_raw = cell(row, year_idx);
        let year = parse_year(year_raw)
            .ok_or_else(|| invalid(dataset, line, &schema.columns.year, year_raw))?;

        let district = map_district(dataset, line, cell(row, district_idx), aliases)?;

        let income_raw = cell(row, income_idx);
        let gross_annual_income = parse_amount(income_raw)
            .ok_or_else(|| invalid(dataset, line, &schema.columns.income, income_raw))?;

        if schema.excluded_districts.contains(&district) {
            excluded += 1;
            continue;
        }

        records.push(IncomeRecord {
            district,
            year,
            gross_annual_income,
        });
    }

    log::info!(
        "[{}] {} records kept, {incomplete} incomplete, {excluded} in excluded districts",
        schema.id,
        records.len(),
    );

    Ok(records)
}

fn map_district(
    dataset: DatasetKind,
    line: usize,
    raw: &str,
    aliases: &DistrictAliasTable,
) -> Result<District, DatasetError> {
    aliases
        .lookup(raw)
        .ok_or_else(|| DatasetError::UnmappedDistrict {
            dataset,
            row: line,
            raw: raw.to_string(),
        })
}

fn invalid(dataset: DatasetKind, line: usize, column: &str, value: &str) -> DatasetError {
    DatasetError::InvalidValue {
        dataset,
        row: line,
        column: column.to_string(),
        value: value.to_string(),
    }
}

/// Parses an integer year, accepting float spellings like `"2016.0"`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_year(raw: &str) -> Option<Year> {
    if let Ok(year) = raw.parse::<Year>() {
        return Some(year);
    }
    let value = raw.parse::<f64>().ok()?;
    (value.fract() == 0.0 && value >= 0.0 && value <= f64::from(Year::MAX))
        .then_some(value as Year)
}

/// Parses a finite, non-negative euro amount.
fn parse_amount(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;

    fn rent_table(rows: &[&str]) -> RawTable {
        let csv = format!(
            "Year,Trimester,District,Neighbourhood,Average _rent,Price\n{}\n",
            rows.join("\n")
        );
        RawTable::from_reader(DatasetKind::Rent, csv.as_bytes()).unwrap()
    }

    fn income_table(rows: &[&str]) -> RawTable {
        let csv = format!(
            "Any,Codi_Districte,Nom_Districte,Import_Renda_Bruta\n{}\n",
            rows.join("\n")
        );
        RawTable::from_reader(DatasetKind::Income, csv.as_bytes()).unwrap()
    }

    fn rent(rows: &[&str]) -> Result<Vec<RentRecord>, DatasetError> {
        canonicalize_rent(
            &rent_table(rows),
            &registry::rent_schema().unwrap(),
            &registry::district_aliases().unwrap(),
        )
    }

    fn income(rows: &[&str]) -> Result<Vec<IncomeRecord>, DatasetError> {
        canonicalize_income(
            &income_table(rows),
            &registry::income_schema().unwrap(),
            &registry::district_aliases().unwrap(),
        )
    }

    #[test]
    fn rent_years_are_clamped_to_load_range() {
        let mut rows = Vec::new();
        for year in 2013..=2022 {
            rows.push(format!(
                "{year},1,Gracia,la Salut,average rent (euro/month),900"
            ));
        }
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();

        let records = rent(&rows).unwrap();
        let years: Vec<Year> = records.iter().map(|r| r.year).collect();
        assert_eq!(years, [2015, 2016, 2017, 2018, 2019, 2020]);
    }

    #[test]
    fn rent_names_and_units_are_canonical() {
        let records = rent(&[
            "2016,1,Sant Marti,el Clot,average rent (euro/month),820.5",
            "2016,1,Sant Martí,el Clot,average rent per surface (euro/m2),13.1",
        ])
        .unwrap();

        assert_eq!(records[0].district, District::SantMarti);
        assert_eq!(records[0].unit, PriceUnit::PerMonth);
        assert!((records[0].price - 820.5).abs() < f64::EPSILON);
        assert_eq!(records[1].district, District::SantMarti);
        assert_eq!(records[1].unit, PriceUnit::PerSquareMeter);
    }

    #[test]
    fn unmapped_rent_district_fails_fast() {
        let err = rent(&[
            "2015,1,Gracia,la Salut,average rent (euro/month),700",
            "2015,1,Badalona,Centre,average rent (euro/month),650",
        ])
        .unwrap_err();

        match err {
            DatasetError::UnmappedDistrict { dataset, row, raw } => {
                assert_eq!(dataset, DatasetKind::Rent);
                assert_eq!(row, 3);
                assert_eq!(raw, "Badalona");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unmapped_name_outside_year_range_is_ignored() {
        let records = rent(&["2012,1,Badalona,Centre,average rent (euro/month),650"]).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn unknown_unit_text_is_rejected() {
        let err = rent(&["2015,1,Gracia,la Salut,average price (euro/year),700"]).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidValue { ref column, .. } if column == "Average _rent"));
    }

    #[test]
    fn empty_price_rows_are_skipped() {
        let records = rent(&[
            "2015,1,Gracia,la Salut,average rent (euro/month),",
            "2015,1,Gracia,la Salut,average rent (euro/month),710",
        ])
        .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn missing_price_tokens_are_skipped() {
        let records = rent(&[
            "2015,1,Gracia,la Salut,average rent (euro/month),NaN",
            "2015,1,Gracia,la Salut,average rent (euro/month),NA",
            "2015,1,Gracia,la Salut,average rent (euro/month),710",
        ])
        .unwrap();
        assert_eq!(records.len(), 1);
        assert!((records[0].price - 710.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rent_rows_without_year_are_out_of_range() {
        let records = rent(&[
            ",1,Gracia,la Salut,average rent (euro/month),710",
            "NaN,1,Gracia,la Salut,average rent (euro/month),720",
            "2015,1,Gracia,la Salut,average rent (euro/month),730",
        ])
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].year, 2015);
    }

    #[test]
    fn negative_price_is_rejected() {
        let err = rent(&["2015,1,Gracia,la Salut,average rent (euro/month),-1"]).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidValue { .. }));
    }

    #[test]
    fn incomplete_income_rows_are_dropped() {
        let records = income(&[
            "2015,6,Gràcia,30000",
            "2015,6,Gràcia,",
            ",6,Gràcia,31000",
            "2015,,Gràcia,32000",
        ])
        .unwrap();
        assert_eq!(records.len(), 1);
        assert!((records[0].gross_annual_income - 30_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn income_rows_with_missing_tokens_are_dropped() {
        let records = income(&[
            "2015,6,Gràcia,NaN",
            "NaN,6,Gràcia,31000",
            "2015,6,null,32000",
            "2015,6,Gràcia,30000",
        ])
        .unwrap();
        assert_eq!(records.len(), 1);
        assert!((records[0].gross_annual_income - 30_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn income_year_is_coerced_to_integer() {
        let records = income(&["2016.0,10,Sant Martí,24000"]).unwrap();
        assert_eq!(records[0].year, 2016);

        let err = income(&["2016.5,10,Sant Martí,24000"]).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidValue { ref column, .. } if column == "Any"));
    }

    #[test]
    fn excluded_district_is_removed_from_income() {
        let records = income(&[
            "2015,2,L'Eixample,45000",
            "2015,2,Eixample,44000",
            "2015,7,Horta-Guinardo,26000",
        ])
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].district, District::HortaGuinardo);
    }

    #[test]
    fn unmapped_income_district_fails_fast() {
        let err = income(&["2015,99,Districte X,1000"]).unwrap_err();
        assert!(matches!(err, DatasetError::UnmappedDistrict { dataset: DatasetKind::Income, .. }));
    }

    #[test]
    fn every_record_district_is_canonical() {
        let records = rent(&[
            "2015,1,Gracia,x,average rent (euro/month),1",
            "2015,1,Sants-Montjuic,x,average rent (euro/month),1",
            "2015,1,Sarria-Sant Gervasi,x,average rent (euro/month),1",
            "2015,1,Horta-Guinardo,x,average rent (euro/month),1",
        ])
        .unwrap();
        for record in records {
            assert!(District::all().contains(&record.district));
            assert!(
                record
                    .district
                    .canonical_name()
                    .chars()
                    .any(|c| !c.is_ascii())
            );
        }
    }
}
