//! HTTP handler functions for the rent dashboard API.

use actix_web::error::{InternalError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};
use bcn_rent_dataset_models::PriceUnit;
use bcn_rent_district_models::DistrictFilter;
use bcn_rent_server_models::{ApiError, ApiHealth, MapQueryParams, TrendQueryParams};
use bcn_rent_view::resolver;
use bcn_rent_view_models::{DEFAULT_YEAR, MapFilter, TrendFilter, controls as control_surface};

use crate::AppState;

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        rent_records: state.store.rent().len(),
        income_records: state.store.income().len(),
    })
}

/// `GET /api/controls`
///
/// Returns the selector options and defaults of both filter groups.
pub async fn controls() -> HttpResponse {
    HttpResponse::Ok().json(control_surface())
}

/// `GET /api/map`
///
/// Resolves the map group for `?year=`, defaulting to the first selectable
/// year.
pub async fn map(state: web::Data<AppState>, params: web::Query<MapQueryParams>) -> HttpResponse {
    let year = params.year.unwrap_or(DEFAULT_YEAR);
    match MapFilter::new(year) {
        Ok(filter) => HttpResponse::Ok().json(resolver::resolve_map(&state.store, filter)),
        Err(e) => {
            log::warn!("Rejected map query: {e}");
            HttpResponse::BadRequest().json(ApiError::new(e))
        }
    }
}

/// `GET /api/trend`
///
/// Resolves the trend group for `?district=` and `?unit=`. Missing values
/// take the selector defaults.
pub async fn trend(
    state: web::Data<AppState>,
    params: web::Query<TrendQueryParams>,
) -> HttpResponse {
    match parse_trend_filter(&params) {
        Ok(filter) => HttpResponse::Ok().json(resolver::resolve_trend(&state.store, filter)),
        Err(e) => {
            log::warn!("Rejected trend query: {}", e.error);
            HttpResponse::BadRequest().json(e)
        }
    }
}

/// `GET /api/salary-share`
///
/// Returns the area-wide rent weight on the average monthly salary.
pub async fn salary_share(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(resolver::resolve_salary_share(&state.store))
}

/// Turns a query string deserialization failure into a JSON 400.
pub fn query_error(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected query for {}: {err}", req.path());
    let response = HttpResponse::BadRequest().json(ApiError::new(&err));
    InternalError::from_response(err, response).into()
}

fn parse_trend_filter(params: &TrendQueryParams) -> Result<TrendFilter, ApiError> {
    let district = match params.district.as_deref() {
        Some(s) => s.parse::<DistrictFilter>().map_err(ApiError::new)?,
        None => DistrictFilter::default(),
    };

    let unit = match params.unit.as_deref() {
        Some(s) => s.parse::<PriceUnit>().map_err(|_| {
            ApiError::new(format!(
                "unknown unit '{s}': expected '{}' or '{}'",
                PriceUnit::PerMonth,
                PriceUnit::PerSquareMeter
            ))
        })?,
        None => PriceUnit::default(),
    };

    Ok(TrendFilter { district, unit })
}
