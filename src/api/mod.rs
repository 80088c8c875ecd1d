//! HTTP surface of the backend.
//!
//! Stateless handlers over the bank files, the solve service and the shared
//! scoring module. Responses use the `{success, data}` /
//! `{success: false, error}` envelope throughout.

pub mod exam;
pub mod questions;
pub mod routes;
pub mod solve;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, info};

use crate::config::Config;
use crate::error::{AppError, BankError, SolveError};
use crate::services::SolveService;

/// Shared handler state.
pub struct AppState {
    pub config: Config,
    pub solver: SolveService,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: Config) -> SharedState {
        let solver = SolveService::new(&config);
        Arc::new(AppState { config, solver })
    }
}

/// Handler-level error, rendered as the error envelope with a fitting
/// status code.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    App(AppError),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError::App(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::App(err) => match &err {
                AppError::Bank(BankError::Unavailable { .. })
                | AppError::Bank(BankError::FileUnreadable { .. }) => {
                    (StatusCode::NOT_FOUND, err.to_string())
                }
                AppError::Solve(SolveError::MissingInput) => {
                    (StatusCode::BAD_REQUEST, err.to_string())
                }
                _ => {
                    error!("istek işlenemedi: {}", err);
                    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
                }
            },
        };

        let body = Json(json!({
            "success": false,
            "error": message,
        }));
        (status, body).into_response()
    }
}

/// Binds and serves the backend until shutdown.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config);
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("StudyMate backend dinliyor: {}", bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
