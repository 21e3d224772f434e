use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Extension type carrying the resolved identity into protected handlers.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: String,
}

/// Middleware gating every protected route.
///
/// Extracts the bearer token, resolves it to a user, and stores the identity
/// in request extensions. Every failure — absent header, bad token, expired
/// token, deleted user — produces the same 401 with a `WWW-Authenticate:
/// Bearer` hint; only the log line distinguishes them.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = match extract_token_from_header(&req) {
        Ok(token) => token,
        Err(reason) => {
            tracing::warn!(reason, "Rejected request without usable bearer token");
            return Err(unauthorized());
        }
    };

    let user = match state.auth_service.resolve(token).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "Token resolution failed");
            return Err(unauthorized());
        }
    };

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        email: user.email.to_string(),
    });

    Ok(next.run(req).await)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(http::header::WWW_AUTHENTICATE, "Bearer")],
        Json(json!({
            "error": "Could not validate credentials"
        })),
    )
        .into_response()
}

fn extract_token_from_header(req: &Request) -> Result<&str, &'static str> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or("Missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Authorization header is not valid UTF-8")?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or("Authorization header is not a Bearer credential")?;

    Ok(token)
}
