//! Auth routes — login relay, token validation, logout.

use axum::extract::{FromRef, FromRequestParts, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use serde::Deserialize;

use crate::envelope::ApiResult;
use crate::services::auth::{self as auth_svc, AuthError};
use crate::services::backend::{AuthData, BackendError};
use crate::state::AppState;

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the `Authorization: Bearer` header.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: AuthData,
    pub token: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .map_err(|_| StatusCode::UNAUTHORIZED)?;
        let token = bearer.token().to_owned();

        let app_state = AppState::from_ref(state);
        let user = auth_svc::validate_token(&app_state, &token)
            .await
            .map_err(auth_error_to_status)?;

        Ok(Self { user, token })
    }
}

pub(crate) fn auth_error_to_status(err: AuthError) -> StatusCode {
    match err {
        AuthError::MissingToken | AuthError::Invalid(_) => StatusCode::UNAUTHORIZED,
        AuthError::Backend(_) => StatusCode::BAD_GATEWAY,
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct LoginBody {
    pub login: String,
    pub password: String,
}

/// `POST /api/login` — relay credentials to the backend and return its auth
/// data (token, profile). A successful login also primes the token cache.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginBody>) -> Response {
    match state.backend.login(&body.login, &body.password).await {
        Ok(user) => {
            auth_svc::remember(&state, &user.token, user.clone()).await;
            Json(ApiResult::ok(user)).into_response()
        }
        Err(BackendError::Rejected(msg)) => {
            (StatusCode::UNAUTHORIZED, Json(ApiResult::<AuthData>::error(msg))).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "login relay failed");
            (StatusCode::BAD_GATEWAY, Json(ApiResult::<AuthData>::error("backend unavailable"))).into_response()
        }
    }
}

/// `GET /api/me` — the user a valid token belongs to.
pub async fn me(auth: AuthUser) -> Json<ApiResult<AuthData>> {
    Json(ApiResult::ok(auth.user))
}

/// `POST /api/logout` — drop this token from the validation cache.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> Json<ApiResult<serde_json::Value>> {
    auth_svc::forget(&state, &auth.token).await;
    Json(ApiResult::ok(serde_json::json!({ "ok": true })))
}
