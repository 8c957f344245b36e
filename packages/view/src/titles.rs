//! Chart titles and axis labels.

use bcn_rent_dataset_models::{PriceUnit, Year};
use bcn_rent_district_models::DistrictFilter;

/// Key axis of every per-year series.
pub const YEAR_AXIS: &str = "Year";
/// Key axis of the per-district series.
pub const DISTRICT_AXIS: &str = "District";
/// Colour legend of the rent map.
pub const MAP_VALUE_LABEL: &str = "Rent in €";
/// Value axis of the gross income bar chart.
pub const GROSS_INCOME_AXIS: &str = "Amount (Euro)";
/// Value axis of the monthly income trend.
pub const INCOME_AXIS: &str = "Income €";
/// Value axis of the rent trend.
pub const RENT_AXIS: &str = "Rent Price €";
/// Value axis of the rent-to-income ratio.
pub const RATIO_AXIS: &str = "Percentage %";
/// Value axis of the salary-share chart.
pub const SALARY_SHARE_AXIS: &str = "Percentage (%)";

/// Title of the salary-share chart.
pub const SALARY_SHARE_TITLE: &str = "Rents Weight on Average Salary Through the Years";
/// Legend entry of the income bars.
pub const SALARY_SHARE_INCOME: &str = "Income";
/// Legend entry of the rent bars.
pub const SALARY_SHARE_RENT: &str = "Rent";

/// Title of the rent map for `year`.
#[must_use]
pub fn map_rent(year: Year) -> String {
    format!("Rent values distribution per Region in {year}")
}

/// Title of the gross income bar chart for `year`.
#[must_use]
pub fn map_income(year: Year) -> String {
    format!("Average Gross Income per District in {year}")
}

/// Title of the monthly income trend.
#[must_use]
pub fn trend_income(district: DistrictFilter) -> String {
    format!("Average Income per Month in {district}")
}

/// Title of the rent trend, naming the unit.
#[must_use]
pub fn trend_rent(district: DistrictFilter, unit: PriceUnit) -> String {
    format!("Average Rent Per {} in {district}", unit.label())
}

/// Title of the rent-to-income ratio trend.
#[must_use]
pub fn trend_ratio(district: DistrictFilter, unit: PriceUnit) -> String {
    format!("Percentage of Rent/Income in {district} Per {}", unit.label())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcn_rent_district_models::District;

    #[test]
    fn titles_embed_filter_values() {
        assert_eq!(map_rent(2018), "Rent values distribution per Region in 2018");
        assert_eq!(map_income(2016), "Average Gross Income per District in 2016");

        let gracia = DistrictFilter::District(District::Gracia);
        assert_eq!(trend_income(gracia), "Average Income per Month in Gràcia");
        assert_eq!(
            trend_rent(gracia, PriceUnit::PerSquareMeter),
            "Average Rent Per Square Meter in Gràcia"
        );
        assert_eq!(
            trend_ratio(DistrictFilter::AreaWide, PriceUnit::PerMonth),
            "Percentage of Rent/Income in Barcelona Per Month"
        );
    }
}
