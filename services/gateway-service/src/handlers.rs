use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::models::{ErrorResponse, LoginRequest, PingResponse};
use crate::state::AppState;

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

/// Forwards the ping to the backend and wraps its plain-text reply.
pub async fn ping(State(state): State<AppState>) -> Response {
    let url = format!("{}/ping", state.backend_base_url);
    let response = match state.client.get(&url).send().await {
        Ok(response) => response,
        Err(err) => return backend_unreachable(err),
    };

    let status = relay_status(response.status());
    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => return backend_unreachable(err),
    };

    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "backend ping failed");
        return (
            status,
            Json(ErrorResponse {
                code: "backend_error",
                message: body,
            }),
        )
            .into_response();
    }

    (StatusCode::OK, Json(PingResponse { go_response: body })).into_response()
}

/// Forwards the login body to the backend and relays status, body, and
/// content type unchanged. The backend owns the meaning of the reply.
pub async fn login(State(state): State<AppState>, Json(payload): Json<LoginRequest>) -> Response {
    let url = format!("{}/login", state.backend_base_url);
    let response = match state.client.post(&url).json(&payload).send().await {
        Ok(response) => response,
        Err(err) => return backend_unreachable(err),
    };

    let status = relay_status(response.status());
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| header::HeaderValue::from_bytes(value.as_bytes()).ok());
    let body = match response.bytes().await {
        Ok(body) => body,
        Err(err) => return backend_unreachable(err),
    };

    tracing::info!(status = status.as_u16(), "login relayed");

    let mut relayed = (status, Body::from(body)).into_response();
    if let Some(content_type) = content_type {
        relayed
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
    }
    relayed
}

fn relay_status(status: reqwest::StatusCode) -> StatusCode {
    StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY)
}

fn backend_unreachable(err: reqwest::Error) -> Response {
    tracing::warn!(error = %err, "backend request failed");
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorResponse {
            code: "backend_unreachable",
            message: err.to_string(),
        }),
    )
        .into_response()
}
