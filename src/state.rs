//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the remote backend client, the live builder sessions, and the
//! validated-token cache. Sessions are in-memory only: the backend is the
//! system of record for saved layouts and print runs, so nothing here needs
//! to outlive the process.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use layout::engine::LayoutEngine;

use crate::services::auth::CachedAuth;
use crate::services::backend::BackendClient;

// =============================================================================
// BUILDER SESSION
// =============================================================================

/// One live builder session: a configured canvas being positioned by a user.
pub struct BuilderSession {
    /// Session identifier handed to the client.
    pub id: Uuid,
    /// Login of the user who created the session; nobody else may touch it.
    pub owner: String,
    /// Raffle the print run will be issued against.
    pub bolao_id: i64,
    /// The positioner core for this session.
    pub engine: LayoutEngine,
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BackendClient>,
    /// Live builder sessions keyed by session id.
    pub sessions: Arc<RwLock<HashMap<Uuid, BuilderSession>>>,
    /// Validated tokens keyed by the raw token string.
    pub auth_cache: Arc<RwLock<HashMap<String, CachedAuth>>>,
}

impl AppState {
    #[must_use]
    pub fn new(backend: BackendClient) -> Self {
        Self {
            backend: Arc::new(backend),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            auth_cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
mod tests {
    use super::*;
    use layout::canvas::Orientation;

    #[tokio::test]
    async fn new_state_has_no_sessions() {
        let state = test_helpers::test_app_state();
        assert!(state.sessions.read().await.is_empty());
        assert!(state.auth_cache.read().await.is_empty());
    }

    #[tokio::test]
    async fn seeded_session_is_retrievable() {
        let state = test_helpers::test_app_state();
        let id = test_helpers::seed_session(&state, "ana", 2, Orientation::Portrait).await;
        let sessions = state.sessions.read().await;
        let session = sessions.get(&id).unwrap();
        assert_eq!(session.owner, "ana");
        assert_eq!(session.engine.config().element_count(), 4);
        assert!(session.engine.positions().is_empty());
    }
}
