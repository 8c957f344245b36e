//! Grouped means and derived ratios.

use std::collections::BTreeMap;

use bcn_rent_analytics_models::{DistrictSeries, SalaryShare, YearSeries};
use bcn_rent_dataset_models::{IncomeRecord, MONTHS_PER_YEAR, RentRecord, Year};
use bcn_rent_district_models::District;

use crate::AnalyticsError;

/// A canonical record that can be grouped by year and district.
pub trait Observation {
    /// Observation year.
    fn year(&self) -> Year;
    /// Canonical district.
    fn district(&self) -> District;
}

impl Observation for RentRecord {
    fn year(&self) -> Year {
        self.year
    }

    fn district(&self) -> District {
        self.district
    }
}

impl Observation for IncomeRecord {
    fn year(&self) -> Year {
        self.year
    }

    fn district(&self) -> District {
        self.district
    }
}

/// Arithmetic mean of `value` per year.
///
/// Years without matching records are absent from the result.
pub fn mean_by_year<'a, R, I, F>(records: I, value: F) -> YearSeries
where
    R: Observation + 'a,
    I: IntoIterator<Item = &'a R>,
    F: Fn(&R) -> f64,
{
    grouped_mean(records, |r| r.year(), value)
}

/// Arithmetic mean of `value` per district, restricted to `year`.
///
/// Districts without a record in that year are absent from the result.
pub fn mean_by_district<'a, R, I, F>(records: I, value: F, year: Year) -> DistrictSeries
where
    R: Observation + 'a,
    I: IntoIterator<Item = &'a R>,
    F: Fn(&R) -> f64,
{
    grouped_mean(
        records.into_iter().filter(|r| r.year() == year),
        |r| r.district(),
        value,
    )
}

/// Groups `records` by `key` and averages `value` inside each group.
///
/// Each group's values are summed in ascending order so the mean does not
/// depend on input row order.
fn grouped_mean<'a, R, K, I, G, F>(records: I, key: G, value: F) -> BTreeMap<K, f64>
where
    R: 'a,
    K: Ord,
    I: IntoIterator<Item = &'a R>,
    G: Fn(&R) -> K,
    F: Fn(&R) -> f64,
{
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for record in records {
        groups.entry(key(record)).or_default().push(value(record));
    }

    groups
        .into_iter()
        .map(|(k, mut values)| {
            values.sort_by(f64::total_cmp);
            let sum: f64 = values.iter().sum();
            #[allow(clippy::cast_precision_loss)]
            let mean = sum / values.len() as f64;
            (k, mean)
        })
        .collect()
}

/// Monthly figure for a yearly mean income.
#[must_use]
pub fn monthly_income(yearly_mean_income: f64) -> f64 {
    yearly_mean_income / MONTHS_PER_YEAR
}

/// Mean monthly gross income per year.
pub fn monthly_income_by_year<'a, I>(records: I) -> YearSeries
where
    I: IntoIterator<Item = &'a IncomeRecord>,
{
    mean_by_year(records, |r| r.gross_annual_income)
        .into_iter()
        .map(|(year, mean)| (year, monthly_income(mean)))
        .collect()
}

/// Rent as a percentage of monthly income, for years present in both
/// series.
///
/// # Errors
///
/// Returns [`AnalyticsError::ArithmeticDomain`] if a shared year has a zero
/// or non-finite income.
pub fn rent_to_income_ratio(
    mean_rent_by_year: &YearSeries,
    monthly_income_by_year: &YearSeries,
) -> Result<YearSeries, AnalyticsError> {
    let ratio = mean_rent_by_year
        .iter()
        .filter_map(|(year, rent)| {
            monthly_income_by_year
                .get(year)
                .map(|income| percent_of(*year, *rent, *income))
        })
        .collect::<Result<YearSeries, _>>()?;

    if ratio.len() < mean_rent_by_year.len() {
        log::debug!(
            "Ratio skipped {} rent year(s) with no income",
            mean_rent_by_year.len() - ratio.len()
        );
    }

    Ok(ratio)
}

/// Rent and income shares of monthly income per year.
///
/// The income share is 100 for every income year; the rent share only
/// covers years present in both series.
///
/// # Errors
///
/// Returns [`AnalyticsError::ArithmeticDomain`] if an income year has a
/// zero or non-finite income.
pub fn salary_share(
    mean_rent_by_year: &YearSeries,
    monthly_income_by_year: &YearSeries,
) -> Result<SalaryShare, AnalyticsError> {
    let income_percent = monthly_income_by_year
        .iter()
        .map(|(year, income)| percent_of(*year, *income, *income))
        .collect::<Result<YearSeries, _>>()?;
    let rent_percent = rent_to_income_ratio(mean_rent_by_year, monthly_income_by_year)?;

    Ok(SalaryShare {
        rent_percent,
        income_percent,
    })
}

fn percent_of(year: Year, numerator: f64, denominator: f64) -> Result<(Year, f64), AnalyticsError> {
    if denominator == 0.0 || !denominator.is_finite() {
        return Err(AnalyticsError::ArithmeticDomain { year, denominator });
    }
    Ok((year, numerator / denominator * 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcn_rent_dataset_models::PriceUnit;

    fn rent(district: District, year: Year, price: f64) -> RentRecord {
        RentRecord {
            district,
            year,
            unit: PriceUnit::PerMonth,
            price,
        }
    }

    fn income(district: District, year: Year, gross_annual_income: f64) -> IncomeRecord {
        IncomeRecord {
            district,
            year,
            gross_annual_income,
        }
    }

    fn sample_rent() -> Vec<RentRecord> {
        vec![
            rent(District::Gracia, 2015, 800.0),
            rent(District::Gracia, 2015, 900.0),
            rent(District::SantMarti, 2015, 700.1),
            rent(District::SantMarti, 2016, 750.3),
            rent(District::LesCorts, 2016, 1_200.7),
            rent(District::Gracia, 2017, 910.9),
        ]
    }

    #[test]
    fn mean_by_year_groups_and_omits_missing_years() {
        let series = mean_by_year(&sample_rent(), |r| r.price);
        assert_eq!(series.keys().copied().collect::<Vec<_>>(), [2015, 2016, 2017]);
        assert!((series[&2015] - 800.033_333_333_333_3).abs() < 1e-9);
        assert!((series[&2016] - 975.5).abs() < 1e-9);
    }

    #[test]
    fn mean_by_district_filters_year_first() {
        let series = mean_by_district(&sample_rent(), |r| r.price, 2015);
        assert_eq!(series.len(), 2);
        assert!((series[&District::Gracia] - 850.0).abs() < 1e-9);
        assert!(!series.contains_key(&District::LesCorts));
    }

    #[test]
    fn means_are_order_independent() {
        let forward = sample_rent();
        let mut reversed = forward.clone();
        reversed.reverse();
        let mut rotated = forward.clone();
        rotated.rotate_left(2);

        let by_year = mean_by_year(&forward, |r| r.price);
        assert_eq!(by_year, mean_by_year(&reversed, |r| r.price));
        assert_eq!(by_year, mean_by_year(&rotated, |r| r.price));

        let by_district = mean_by_district(&forward, |r| r.price, 2015);
        assert_eq!(by_district, mean_by_district(&reversed, |r| r.price, 2015));
        assert_eq!(by_district, mean_by_district(&rotated, |r| r.price, 2015));
    }

    #[test]
    fn empty_input_yields_empty_series() {
        let none: Vec<RentRecord> = Vec::new();
        assert!(mean_by_year(&none, |r| r.price).is_empty());
        assert!(mean_by_district(&none, |r| r.price, 2018).is_empty());
    }

    #[test]
    fn monthly_income_is_a_twelfth() {
        for x in [0.0, 12.0, 30_000.0, 1.5] {
            assert!((monthly_income(x) - x / 12.0).abs() < f64::EPSILON);
        }
        assert!(monthly_income(0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn monthly_income_by_year_divides_the_mean() {
        let records = vec![
            income(District::Gracia, 2015, 24_000.0),
            income(District::SantMarti, 2015, 36_000.0),
        ];
        let series = monthly_income_by_year(&records);
        assert!((series[&2015] - 2_500.0).abs() < 1e-9);
    }

    #[test]
    fn ratio_uses_year_intersection() {
        let rent = YearSeries::from([(2015, 800.0), (2016, 850.0)]);
        let income = YearSeries::from([(2016, 1_700.0)]);
        let ratio = rent_to_income_ratio(&rent, &income).unwrap();
        assert_eq!(ratio, YearSeries::from([(2016, 50.0)]));
    }

    #[test]
    fn ratio_rejects_zero_income() {
        let rent = YearSeries::from([(2015, 800.0), (2016, 850.0)]);
        let income = YearSeries::from([(2015, 1_600.0), (2016, 0.0)]);
        assert_eq!(
            rent_to_income_ratio(&rent, &income),
            Err(AnalyticsError::ArithmeticDomain {
                year: 2016,
                denominator: 0.0
            })
        );
    }

    #[test]
    fn zero_income_outside_intersection_is_ignored() {
        let rent = YearSeries::from([(2015, 800.0)]);
        let income = YearSeries::from([(2015, 1_600.0), (2019, 0.0)]);
        assert_eq!(
            rent_to_income_ratio(&rent, &income).unwrap(),
            YearSeries::from([(2015, 50.0)])
        );
    }

    #[test]
    fn salary_share_pairs_rent_with_full_income() {
        let rent = YearSeries::from([(2015, 600.0), (2016, 700.0), (2020, 900.0)]);
        let income = YearSeries::from([(2015, 2_000.0), (2016, 2_000.0)]);
        let share = salary_share(&rent, &income).unwrap();
        assert_eq!(
            share.rent_percent,
            YearSeries::from([(2015, 30.0), (2016, 35.0)])
        );
        assert_eq!(
            share.income_percent,
            YearSeries::from([(2015, 100.0), (2016, 100.0)])
        );
    }

    #[test]
    fn salary_share_keeps_income_years_without_rent() {
        let rent = YearSeries::from([(2016, 700.0)]);
        let income = YearSeries::from([(2015, 2_000.0), (2016, 2_000.0), (2017, 2_100.0)]);
        let share = salary_share(&rent, &income).unwrap();
        assert_eq!(share.rent_percent, YearSeries::from([(2016, 35.0)]));
        assert_eq!(
            share.income_percent,
            YearSeries::from([(2015, 100.0), (2016, 100.0), (2017, 100.0)])
        );
    }

    #[test]
    fn salary_share_rejects_zero_income_year() {
        let rent = YearSeries::from([(2016, 700.0)]);
        let income = YearSeries::from([(2015, 0.0), (2016, 2_000.0)]);
        assert_eq!(
            salary_share(&rent, &income),
            Err(AnalyticsError::ArithmeticDomain {
                year: 2015,
                denominator: 0.0,
            })
        );
    }
}
