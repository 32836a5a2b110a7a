#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the heat retrofit explorer.
//!
//! Serves the reference catalog and the impact and alignment model as a
//! stateless JSON API. Reference data is embedded in the binary, so the
//! server has nothing to connect to at startup. Session state lives with
//! the client and is advanced through `POST /api/state/reduce`.

mod handlers;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, ResponseError, http::StatusCode, middleware, web};
use heat_retrofit_reference::ReferenceData;

/// Bind address used when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
/// Port used when `PORT` is unset or unparseable.
pub const DEFAULT_PORT: u16 = 8080;

/// Shared application state.
pub struct AppState {
    /// Reference tables every handler reads from.
    pub reference: &'static ReferenceData,
}

/// Errors surfaced to API clients as JSON.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Unknown development '{0}'")]
    UnknownDevelopment(String),
    #[error("Unknown neighborhood '{0}'")]
    UnknownNta(String),
    #[error("Unknown package '{0}'")]
    UnknownPackage(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownDevelopment(_) | Self::UnknownNta(_) | Self::UnknownPackage(_) => {
                StatusCode::NOT_FOUND
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/developments", web::get().to(handlers::developments))
            .route("/developments/{id}", web::get().to(handlers::development))
            .route(
                "/developments/{id}/packages",
                web::get().to(handlers::development_packages),
            )
            .route("/retrofits", web::get().to(handlers::retrofits))
            .route("/packages", web::get().to(handlers::packages))
            .route("/climate/decades", web::get().to(handlers::decades))
            .route("/ntas/{code}", web::get().to(handlers::nta))
            .route("/impact", web::post().to(handlers::impact))
            .route("/state/reduce", web::post().to(handlers::reduce_state)),
    );
}

/// Starts the heat retrofit API server on `BIND_ADDR`:`PORT`.
///
/// This is a regular async function. The caller is responsible for
/// providing the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    run_server_on(bind_addr, port).await
}

/// Loads the embedded reference data and starts the Actix-Web HTTP server
/// on `bind_addr`:`port`.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server_on(bind_addr: String, port: u16) -> std::io::Result<()> {
    // The CLI installs its own logger before delegating here.
    if pretty_env_logger::try_init_custom_env("RUST_LOG").is_err() {
        log::debug!("Logger already initialized");
    }

    log::info!("Loading reference data...");
    let state = web::Data::new(AppState {
        reference: heat_retrofit_reference::reference(),
    });

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
    .await
}
