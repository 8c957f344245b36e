//! Binds selector events to view recomputation.
//!
//! The controller holds the current filter state and last resolved view of
//! each of the two groups. An event recomputes every output of the group
//! that watches its control, synchronously and from scratch, and leaves the
//! other group untouched. A rejected event changes nothing.

use bcn_rent_dataset::DataStore;
use bcn_rent_view_models::{
    ControlEvent, FilterGroup, FilterState, MapFilter, MapView, ResolvedView, TrendFilter,
    TrendView, UnselectableYearError,
};

use crate::resolver;

/// Reactive state of the two filter groups.
#[derive(Debug, Clone)]
pub struct DashboardController<'a> {
    store: &'a DataStore,
    map_filter: MapFilter,
    trend_filter: TrendFilter,
    map_view: MapView,
    trend_view: TrendView,
}

impl<'a> DashboardController<'a> {
    /// Resolves both groups at their default filter state.
    #[must_use]
    pub fn new(store: &'a DataStore) -> Self {
        let map_filter = MapFilter::default();
        let trend_filter = TrendFilter::default();
        Self {
            store,
            map_filter,
            trend_filter,
            map_view: resolver::resolve_map(store, map_filter),
            trend_view: resolver::resolve_trend(store, trend_filter),
        }
    }

    /// Applies a control event and recomputes the group watching it.
    ///
    /// Returns the recomputed group.
    ///
    /// # Errors
    ///
    /// Returns [`UnselectableYearError`] if the year selector emitted a year
    /// it does not offer. Both groups keep their previous state and output.
    pub fn handle(&mut self, event: ControlEvent) -> Result<FilterGroup, UnselectableYearError> {
        let state = match event {
            ControlEvent::Year(year) => FilterState::Map(MapFilter::new(year)?),
            ControlEvent::District(district) => FilterState::Trend(TrendFilter {
                district,
                ..self.trend_filter
            }),
            ControlEvent::Unit(unit) => FilterState::Trend(TrendFilter {
                unit,
                ..self.trend_filter
            }),
        };
        Ok(self.submit(state))
    }

    /// Replaces one group's full filter state and recomputes that group.
    pub fn submit(&mut self, state: FilterState) -> FilterGroup {
        log::debug!("Recomputing {} group for {state:?}", state.group());
        match resolver::resolve(self.store, &state) {
            ResolvedView::Map(view) => self.map_view = view,
            ResolvedView::Trend(view) => self.trend_view = view,
        }
        match state {
            FilterState::Map(filter) => self.map_filter = filter,
            FilterState::Trend(filter) => self.trend_filter = filter,
        }
        state.group()
    }

    /// Current map group filter.
    #[must_use]
    pub const fn map_filter(&self) -> MapFilter {
        self.map_filter
    }

    /// Current trend group filter.
    #[must_use]
    pub const fn trend_filter(&self) -> TrendFilter {
        self.trend_filter
    }

    /// Latest map group outputs.
    #[must_use]
    pub const fn map_view(&self) -> &MapView {
        &self.map_view
    }

    /// Latest trend group outputs.
    #[must_use]
    pub const fn trend_view(&self) -> &TrendView {
        &self.trend_view
    }

    /// Latest outputs of `group`.
    #[must_use]
    pub fn view(&self, group: FilterGroup) -> ResolvedView {
        match group {
            FilterGroup::Map => ResolvedView::Map(self.map_view.clone()),
            FilterGroup::Trend => ResolvedView::Trend(self.trend_view.clone()),
        }
    }
}
