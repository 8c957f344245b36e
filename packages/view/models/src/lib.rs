#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter state, control surface, and view bundle types.
//!
//! The dashboard has two independent filter groups. The *map* group is
//! driven by a single year; the *trend* group by a district and a price
//! unit. Each group resolves into its own view bundle of titled series.

use std::collections::BTreeMap;

use bcn_rent_dataset_models::{PriceUnit, Year};
use bcn_rent_district_models::{District, DistrictFilter};
use serde::{Deserialize, Serialize};

/// Years offered by the year selector.
pub const SELECTABLE_YEARS: [Year; 6] = [2015, 2016, 2017, 2018, 2019, 2020];

/// Year selected before any user action.
pub const DEFAULT_YEAR: Year = 2015;

/// Colour scale bounds of the rent map, in euros per month. Values outside
/// the range are passed through unclamped.
pub const MAP_COLOR_RANGE: (f64, f64) = (0.0, 1800.0);

/// Error returned when the year selector emits a year it does not offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnselectableYearError {
    /// The rejected year.
    pub year: Year,
}

impl std::fmt::Display for UnselectableYearError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "year {} is not selectable: expected {}-{}",
            self.year,
            SELECTABLE_YEARS[0],
            SELECTABLE_YEARS[SELECTABLE_YEARS.len() - 1]
        )
    }
}

impl std::error::Error for UnselectableYearError {}

/// Filter state of the map group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MapFilterRaw")]
pub struct MapFilter {
    year: Year,
}

#[derive(Deserialize)]
struct MapFilterRaw {
    year: Year,
}

impl TryFrom<MapFilterRaw> for MapFilter {
    type Error = UnselectableYearError;

    fn try_from(raw: MapFilterRaw) -> Result<Self, Self::Error> {
        Self::new(raw.year)
    }
}

impl MapFilter {
    /// Creates a map filter for `year`.
    ///
    /// # Errors
    ///
    /// Returns [`UnselectableYearError`] if `year` is not one of
    /// [`SELECTABLE_YEARS`].
    pub fn new(year: Year) -> Result<Self, UnselectableYearError> {
        if SELECTABLE_YEARS.contains(&year) {
            Ok(Self { year })
        } else {
            Err(UnselectableYearError { year })
        }
    }

    /// The selected year.
    #[must_use]
    pub const fn year(self) -> Year {
        self.year
    }
}

impl Default for MapFilter {
    fn default() -> Self {
        Self { year: DEFAULT_YEAR }
    }
}

/// Filter state of the trend group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendFilter {
    /// Selected district, or the whole area.
    pub district: DistrictFilter,
    /// Selected rent price unit.
    pub unit: PriceUnit,
}

/// Filter state of either group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "group", rename_all = "snake_case")]
pub enum FilterState {
    /// Year-driven map group.
    Map(MapFilter),
    /// District/unit-driven trend group.
    Trend(TrendFilter),
}

impl FilterState {
    /// Which group this state drives.
    #[must_use]
    pub const fn group(&self) -> FilterGroup {
        match self {
            Self::Map(_) => FilterGroup::Map,
            Self::Trend(_) => FilterGroup::Trend,
        }
    }
}

/// One of the two independent recompute groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterGroup {
    /// Map and income-by-district bar chart.
    Map,
    /// Income, rent, and ratio trend lines.
    Trend,
}

impl std::fmt::Display for FilterGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Map => write!(f, "map"),
            Self::Trend => write!(f, "trend"),
        }
    }
}

/// A value emitted by one of the selector controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "control", content = "value", rename_all = "snake_case")]
pub enum ControlEvent {
    /// Year selector changed.
    Year(Year),
    /// District selector changed.
    District(DistrictFilter),
    /// Unit selector changed.
    Unit(PriceUnit),
}

impl ControlEvent {
    /// The group watching this control.
    #[must_use]
    pub const fn group(&self) -> FilterGroup {
        match self {
            Self::Year(_) => FilterGroup::Map,
            Self::District(_) | Self::Unit(_) => FilterGroup::Trend,
        }
    }
}

/// A derived numeric series with its chart title and axis labels.
///
/// Built fresh for every query. An empty `points` map is a valid outcome
/// (the filter matched no rows). `unavailable` is set when the series could
/// not be computed; `points` is then empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitledSeries<K: Ord> {
    /// Chart title.
    pub title: String,
    /// Label of the key axis.
    pub x_label: String,
    /// Label of the value axis.
    pub y_label: String,
    /// Key to value.
    pub points: BTreeMap<K, f64>,
    /// Why the series has no data, when it failed to compute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unavailable: Option<String>,
}

impl<K: Ord> TitledSeries<K> {
    /// Returns `true` if there is nothing to plot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Outputs of the map group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    /// Year the view was computed for.
    pub year: Year,
    /// Monthly rent per district, for the choropleth.
    pub rent_by_district: TitledSeries<District>,
    /// Colour scale bounds of the choropleth.
    pub color_range: (f64, f64),
    /// Mean gross annual income per district, for the bar chart.
    pub income_by_district: TitledSeries<District>,
}

/// Outputs of the trend group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendView {
    /// Filter the view was computed for.
    pub filter: TrendFilter,
    /// Mean monthly income per year.
    pub income: TitledSeries<Year>,
    /// Mean rent per year in the selected unit.
    pub rent: TitledSeries<Year>,
    /// Rent as a percentage of monthly income per year.
    pub ratio: TitledSeries<Year>,
}

/// Area-wide rent weight on the average monthly salary, per year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryShareView {
    /// Chart title.
    pub title: String,
    /// Income share (100 for every year).
    pub income: TitledSeries<Year>,
    /// Rent share.
    pub rent: TitledSeries<Year>,
    /// Rent share bar labels, e.g. `"41.3%"`.
    pub rent_labels: BTreeMap<Year, String>,
}

/// A resolved view of either group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "group", rename_all = "snake_case")]
pub enum ResolvedView {
    /// Map group outputs.
    Map(MapView),
    /// Trend group outputs.
    Trend(TrendView),
}

/// One selectable value of a control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlOption<T> {
    /// Text shown to the user.
    pub label: String,
    /// Value emitted when selected.
    pub value: T,
}

/// The full control surface exposed to the UI boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Controls {
    /// Year selector options.
    pub years: Vec<ControlOption<Year>>,
    /// Default year.
    pub default_year: Year,
    /// District selector options, area-wide first.
    pub districts: Vec<ControlOption<DistrictFilter>>,
    /// Default district.
    pub default_district: DistrictFilter,
    /// Unit selector options.
    pub units: Vec<ControlOption<PriceUnit>>,
    /// Default unit.
    pub default_unit: PriceUnit,
}

/// Builds the control surface.
#[must_use]
pub fn controls() -> Controls {
    Controls {
        years: SELECTABLE_YEARS
            .iter()
            .map(|year| ControlOption {
                label: year.to_string(),
                value: *year,
            })
            .collect(),
        default_year: DEFAULT_YEAR,
        districts: DistrictFilter::all()
            .into_iter()
            .map(|district| ControlOption {
                label: district.name().to_string(),
                value: district,
            })
            .collect(),
        default_district: DistrictFilter::default(),
        units: PriceUnit::all()
            .iter()
            .map(|unit| ControlOption {
                label: unit.label().to_string(),
                value: *unit,
            })
            .collect(),
        default_unit: PriceUnit::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_filter_accepts_only_selectable_years() {
        for year in SELECTABLE_YEARS {
            assert_eq!(MapFilter::new(year).unwrap().year(), year);
        }
        assert_eq!(
            MapFilter::new(2014),
            Err(UnselectableYearError { year: 2014 })
        );
        assert!(MapFilter::new(2021).is_err());
    }

    #[test]
    fn map_filter_deserialization_validates() {
        let ok: MapFilter = serde_json::from_str(r#"{"year":2018}"#).unwrap();
        assert_eq!(ok.year(), 2018);
        assert!(serde_json::from_str::<MapFilter>(r#"{"year":1999}"#).is_err());
    }

    #[test]
    fn defaults_match_control_surface() {
        let controls = controls();
        assert_eq!(controls.years.len(), 6);
        assert_eq!(controls.default_year, 2015);
        assert_eq!(controls.districts.len(), 11);
        assert_eq!(controls.districts[0].label, "Barcelona");
        assert_eq!(controls.default_district, DistrictFilter::AreaWide);
        assert_eq!(controls.units.len(), 2);
        assert_eq!(controls.units[1].label, "Square Meter");
        assert_eq!(controls.default_unit, PriceUnit::PerMonth);

        assert_eq!(MapFilter::default().year(), controls.default_year);
        let trend = TrendFilter::default();
        assert_eq!(trend.district, controls.default_district);
        assert_eq!(trend.unit, controls.default_unit);
    }

    #[test]
    fn events_route_to_their_group() {
        assert_eq!(ControlEvent::Year(2016).group(), FilterGroup::Map);
        assert_eq!(
            ControlEvent::District(DistrictFilter::AreaWide).group(),
            FilterGroup::Trend
        );
        assert_eq!(
            ControlEvent::Unit(PriceUnit::PerSquareMeter).group(),
            FilterGroup::Trend
        );
    }

    #[test]
    fn events_serialize_as_tagged_values() {
        let json = serde_json::to_string(&ControlEvent::Unit(PriceUnit::PerSquareMeter)).unwrap();
        assert_eq!(json, r#"{"control":"unit","value":"square_meter"}"#);
        let event: ControlEvent =
            serde_json::from_str(r#"{"control":"district","value":"Gràcia"}"#).unwrap();
        assert_eq!(
            event,
            ControlEvent::District(DistrictFilter::District(District::Gracia))
        );
    }
}
