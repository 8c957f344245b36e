#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the Barcelona rent and income dashboard.
//!
//! The server is the rendering boundary: it loads both datasets once into
//! an immutable [`DataStore`], then answers each request by calling the
//! pure view resolver with the filter state carried in the query string.
//! No per-client state is kept.

mod handlers;
pub mod interactive;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use bcn_rent_dataset::paths::DataPaths;
use bcn_rent_dataset::{DataStore, DatasetError, registry};

/// Shared application state.
pub struct AppState {
    /// Canonical records, loaded once at startup.
    pub store: Arc<DataStore>,
}

/// Errors that abort server startup.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The datasets could not be loaded.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// The HTTP server failed to bind or run.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bind address and port, read from `BIND_ADDR` and `PORT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: String,
    /// Port to listen on.
    pub port: u16,
}

impl ServerConfig {
    /// Reads the configuration from the environment, falling back to
    /// `127.0.0.1:8080`.
    #[must_use]
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        Self { bind_addr, port }
    }
}

/// Source file locations, from the schemas and `RENT_CSV`/`INCOME_CSV`.
///
/// # Errors
///
/// Returns [`DatasetError::Registry`] if an embedded schema fails to parse.
pub fn data_paths() -> Result<DataPaths, DatasetError> {
    Ok(DataPaths::from_env(
        &registry::rent_schema()?,
        &registry::income_schema()?,
    ))
}

/// Loads both datasets from the configured paths.
///
/// # Errors
///
/// Returns [`DatasetError`] if either file is missing, lacks a required
/// column, or fails canonicalization.
pub fn load_store() -> Result<DataStore, DatasetError> {
    DataStore::load(&data_paths()?)
}

/// Registers the `/api` routes.
///
/// Query strings that fail to deserialize are answered with a JSON
/// [`bcn_rent_server_models::ApiError`] body.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(handlers::query_error));
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/controls", web::get().to(handlers::controls))
            .route("/map", web::get().to(handlers::map))
            .route("/trend", web::get().to(handlers::trend))
            .route("/salary-share", web::get().to(handlers::salary_share)),
    );
}

/// Starts the dashboard API server.
///
/// Loads the datasets, then serves until shutdown. The caller provides the
/// async runtime (e.g. via `#[actix_web::main]`) and the logger.
///
/// # Errors
///
/// Returns [`ServerError::Dataset`] if loading fails (nothing is served),
/// or [`ServerError::Io`] if the HTTP server fails to bind or run.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> Result<(), ServerError> {
    let store = load_store()?;
    let state = web::Data::new(AppState {
        store: Arc::new(store),
    });

    let ServerConfig { bind_addr, port } = ServerConfig::from_env();
    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await?;

    Ok(())
}
