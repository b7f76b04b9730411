//! Token validation against the remote backend, with a short-lived cache.
//!
//! DESIGN
//! ======
//! The backend owns credentials; this service only relays `/login` and
//! probes `/validartoken`. Validated tokens are cached briefly so a burst of
//! builder calls doesn't re-probe the backend on every request. Cache
//! entries are keyed by the raw token and expire on read.

use time::{Duration, OffsetDateTime};

use crate::services::backend::{AuthData, BackendError};
use crate::state::AppState;

/// How long a validated token is trusted before re-probing the backend.
const TOKEN_CACHE_TTL: Duration = Duration::minutes(5);

/// A validated token: the user it belongs to and when the backend said so.
#[derive(Debug, Clone)]
pub struct CachedAuth {
    pub user: AuthData,
    pub validated_at: OffsetDateTime,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing or empty bearer token")]
    MissingToken,
    #[error("token rejected by backend: {0}")]
    Invalid(String),
    #[error(transparent)]
    Backend(BackendError),
}

/// Whether a cache entry is still inside its TTL at `now`.
#[must_use]
pub fn is_fresh(entry: &CachedAuth, now: OffsetDateTime) -> bool {
    now - entry.validated_at < TOKEN_CACHE_TTL
}

/// Validate a bearer token, consulting the cache before the backend.
///
/// # Errors
///
/// `MissingToken` for an empty token, `Invalid` when the backend rejects it,
/// `Backend` when the backend cannot be reached.
pub async fn validate_token(state: &AppState, token: &str) -> Result<AuthData, AuthError> {
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    if let Some(user) = cached(state, token).await {
        return Ok(user);
    }

    match state.backend.validar_token(token).await {
        Ok(user) => {
            remember(state, token, user.clone()).await;
            Ok(user)
        }
        Err(BackendError::Rejected(msg)) => Err(AuthError::Invalid(msg)),
        Err(e) => Err(AuthError::Backend(e)),
    }
}

/// Cache a validated token's user.
pub async fn remember(state: &AppState, token: &str, user: AuthData) {
    let mut cache = state.auth_cache.write().await;
    cache.insert(
        token.to_owned(),
        CachedAuth { user, validated_at: OffsetDateTime::now_utc() },
    );
}

/// Drop a token from the cache (logout).
pub async fn forget(state: &AppState, token: &str) {
    let mut cache = state.auth_cache.write().await;
    cache.remove(token);
}

async fn cached(state: &AppState, token: &str) -> Option<AuthData> {
    let now = OffsetDateTime::now_utc();
    let cache = state.auth_cache.read().await;
    cache
        .get(token)
        .filter(|entry| is_fresh(entry, now))
        .map(|entry| entry.user.clone())
}
