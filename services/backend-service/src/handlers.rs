use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::models::{LoginRequest, LoginResponse};
use crate::state::AppState;

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

pub async fn ping() -> &'static str {
    "pong"
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    if payload.username == state.demo_username && payload.password == state.demo_password {
        tracing::info!(username = %payload.username, "login accepted");
        return (
            StatusCode::OK,
            Json(LoginResponse {
                message: "login success",
            }),
        )
            .into_response();
    }

    tracing::info!(username = %payload.username, "login rejected");
    // Plain text body, as a generic HTTP error reply rather than the JSON shape.
    (StatusCode::UNAUTHORIZED, "invalid credentials").into_response()
}
