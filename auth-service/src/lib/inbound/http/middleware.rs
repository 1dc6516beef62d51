use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::User;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserStore;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the resolved user into protected handlers
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Auth gate: every protected route passes through here.
///
/// Extracts the bearer token, validates it, and resolves the subject to a
/// user. Missing header, malformed header, invalid token, and vanished user
/// all produce the same 401 with a `WWW-Authenticate: Bearer` challenge;
/// the distinction lives only in the logs.
pub async fn authenticate<S: UserStore>(
    State(state): State<AppState<S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req).ok_or_else(|| {
        tracing::warn!("Missing or malformed Authorization header");
        unauthorized()
    })?;

    let user = state.auth_service.current_user(token).await.map_err(|e| {
        tracing::warn!(error = %e, "Bearer token rejected");
        unauthorized()
    })?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

fn unauthorized() -> Response {
    ApiError::Unauthorized("Could not validate credentials".to_string()).into_response()
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let auth_header = req.headers().get(http::header::AUTHORIZATION)?;
    let auth_str = auth_header.to_str().ok()?;
    auth_str.strip_prefix("Bearer ")
}
