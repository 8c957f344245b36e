//! Resolves a filter state into the exact series each chart needs.
//!
//! Resolution is a pure function of the filter state and the immutable
//! [`DataStore`]: identical inputs always produce identical views. Per-query
//! arithmetic failures never escape; they become an unavailable series.

use std::collections::BTreeMap;

use bcn_rent_analytics::AnalyticsError;
use bcn_rent_analytics::aggregate::{
    mean_by_district, mean_by_year, monthly_income_by_year, rent_to_income_ratio, salary_share,
};
use bcn_rent_dataset::DataStore;
use bcn_rent_dataset_models::{PriceUnit, RentRecord, Year};
use bcn_rent_view_models::{
    FilterState, MAP_COLOR_RANGE, MapFilter, MapView, ResolvedView, SalaryShareView,
    TitledSeries, TrendFilter, TrendView,
};

use crate::titles;

/// Resolves either group's filter state.
#[must_use]
pub fn resolve(store: &DataStore, state: &FilterState) -> ResolvedView {
    match state {
        FilterState::Map(filter) => ResolvedView::Map(resolve_map(store, *filter)),
        FilterState::Trend(filter) => ResolvedView::Trend(resolve_trend(store, *filter)),
    }
}

/// Map group: monthly rent and gross income per district for one year.
#[must_use]
pub fn resolve_map(store: &DataStore, filter: MapFilter) -> MapView {
    let year = filter.year();

    let monthly_rent = store
        .rent()
        .iter()
        .filter(|r| r.unit == PriceUnit::PerMonth);
    let rent = mean_by_district(monthly_rent, |r: &RentRecord| r.price, year);
    let income = mean_by_district(store.income(), |r| r.gross_annual_income, year);

    log::debug!(
        "Resolved map view for {year}: {} rent districts, {} income districts",
        rent.len(),
        income.len()
    );

    MapView {
        year,
        rent_by_district: series(
            titles::map_rent(year),
            titles::DISTRICT_AXIS,
            titles::MAP_VALUE_LABEL,
            rent,
        ),
        color_range: MAP_COLOR_RANGE,
        income_by_district: series(
            titles::map_income(year),
            titles::DISTRICT_AXIS,
            titles::GROSS_INCOME_AXIS,
            income,
        ),
    }
}

/// Trend group: income, rent, and rent-to-income ratio per year for one
/// district (or the whole area) and one price unit.
#[must_use]
pub fn resolve_trend(store: &DataStore, filter: TrendFilter) -> TrendView {
    let TrendFilter { district, unit } = filter;

    let income = monthly_income_by_year(
        store
            .income()
            .iter()
            .filter(|r| district.matches(r.district)),
    );
    let rent = mean_by_year(
        store
            .rent()
            .iter()
            .filter(|r| r.unit == unit && district.matches(r.district)),
        |r: &RentRecord| r.price,
    );

    let ratio = match rent_to_income_ratio(&rent, &income) {
        Ok(points) => series(
            titles::trend_ratio(district, unit),
            titles::YEAR_AXIS,
            titles::RATIO_AXIS,
            points,
        ),
        Err(e) => {
            log::warn!("Ratio unavailable for {district} ({unit}): {e}");
            unavailable(
                titles::trend_ratio(district, unit),
                titles::YEAR_AXIS,
                titles::RATIO_AXIS,
                &e,
            )
        }
    };

    log::debug!(
        "Resolved trend view for {district} ({unit}): {} income years, {} rent years, {} ratio years",
        income.len(),
        rent.len(),
        ratio.points.len()
    );

    TrendView {
        filter,
        income: series(
            titles::trend_income(district),
            titles::YEAR_AXIS,
            titles::INCOME_AXIS,
            income,
        ),
        rent: series(
            titles::trend_rent(district, unit),
            titles::YEAR_AXIS,
            titles::RENT_AXIS,
            rent,
        ),
        ratio,
    }
}

/// Area-wide monthly rent as a share of the average monthly income.
///
/// Independent of any filter state.
#[must_use]
pub fn resolve_salary_share(store: &DataStore) -> SalaryShareView {
    let income = monthly_income_by_year(store.income());
    let rent = mean_by_year(
        store
            .rent()
            .iter()
            .filter(|r| r.unit == PriceUnit::PerMonth),
        |r: &RentRecord| r.price,
    );

    match salary_share(&rent, &income) {
        Ok(share) => SalaryShareView {
            title: titles::SALARY_SHARE_TITLE.to_string(),
            rent_labels: share.rent_labels(),
            income: series(
                titles::SALARY_SHARE_INCOME.to_string(),
                titles::YEAR_AXIS,
                titles::SALARY_SHARE_AXIS,
                share.income_percent,
            ),
            rent: series(
                titles::SALARY_SHARE_RENT.to_string(),
                titles::YEAR_AXIS,
                titles::SALARY_SHARE_AXIS,
                share.rent_percent,
            ),
        },
        Err(e) => {
            log::warn!("Salary share unavailable: {e}");
            SalaryShareView {
                title: titles::SALARY_SHARE_TITLE.to_string(),
                rent_labels: BTreeMap::new(),
                income: unavailable(
                    titles::SALARY_SHARE_INCOME.to_string(),
                    titles::YEAR_AXIS,
                    titles::SALARY_SHARE_AXIS,
                    &e,
                ),
                rent: unavailable(
                    titles::SALARY_SHARE_RENT.to_string(),
                    titles::YEAR_AXIS,
                    titles::SALARY_SHARE_AXIS,
                    &e,
                ),
            }
        }
    }
}

fn series<K: Ord>(
    title: String,
    x_label: &str,
    y_label: &str,
    points: BTreeMap<K, f64>,
) -> TitledSeries<K> {
    TitledSeries {
        title,
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        points,
        unavailable: None,
    }
}

fn unavailable(
    title: String,
    x_label: &str,
    y_label: &str,
    error: &AnalyticsError,
) -> TitledSeries<Year> {
    TitledSeries {
        unavailable: Some(error.to_string()),
        ..series(title, x_label, y_label, BTreeMap::new())
    }
}
