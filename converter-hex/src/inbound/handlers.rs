//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use converter_types::{AppError, RateSource, SetAmountRequest, SetCurrencyRequest};

use crate::ConverterService;

/// Application state shared across handlers.
pub struct AppState<S: RateSource> {
    pub service: ConverterService<S>,
    pub popular: Vec<&'static str>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Current display state.
pub async fn display_state<S: RateSource>(
    State(state): State<Arc<AppState<S>>>,
) -> impl IntoResponse {
    Json(state.service.display_state())
}

/// Refresh rates and return the state once the fetch has settled.
///
/// A failed fetch is reported through the `error` field, not the status code.
#[tracing::instrument(skip(state))]
pub async fn refresh<S: RateSource>(State(state): State<Arc<AppState<S>>>) -> impl IntoResponse {
    if let Err(e) = state.service.request_rate_refresh().await {
        tracing::debug!(error = %e, "Refresh requested over HTTP failed");
    }
    Json(state.service.display_state())
}

#[tracing::instrument(skip_all, fields(amount = %req.amount))]
pub async fn set_amount<S: RateSource>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<SetAmountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let display = state.service.set_amount(&req.amount)?;
    Ok(Json(display))
}

#[tracing::instrument(skip_all, fields(currency = %req.currency))]
pub async fn set_from_currency<S: RateSource>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<SetCurrencyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let display = state.service.set_from_currency(&req.currency)?;
    Ok(Json(display))
}

#[tracing::instrument(skip_all, fields(currency = %req.currency))]
pub async fn set_to_currency<S: RateSource>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<SetCurrencyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let display = state.service.set_to_currency(&req.currency)?;
    Ok(Json(display))
}

/// List the active rate table.
pub async fn rates<S: RateSource>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<impl IntoResponse, ApiError> {
    let rates = state.service.rates()?;
    Ok(Json(rates))
}

/// Current amount converted into the popular currencies.
pub async fn popular<S: RateSource>(State(state): State<Arc<AppState<S>>>) -> impl IntoResponse {
    Json(state.service.popular_conversions(&state.popular))
}
