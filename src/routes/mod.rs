//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the admin API under `/api`: auth relay, the open-raffle
//! listing, and the print-layout builder sessions. CORS stays wide open so
//! the console frontend can call the API straight from the browser, and
//! every request is traced.

pub mod auth;
pub mod builder;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        .route("/api/me", get(auth::me))
        .route("/api/sorteios", get(builder::list_sorteios))
        .route("/api/builder/sessions", post(builder::create_session))
        .route(
            "/api/builder/sessions/{id}",
            get(builder::get_session).delete(builder::delete_session),
        )
        .route("/api/builder/sessions/{id}/configure", post(builder::configure))
        .route("/api/builder/sessions/{id}/randomize", post(builder::randomize))
        .route("/api/builder/sessions/{id}/load", post(builder::load_saved))
        .route("/api/builder/sessions/{id}/drag", post(builder::drag))
        .route("/api/builder/sessions/{id}/print", post(builder::print))
        .route("/api/builder/sessions/{id}/print/test", post(builder::print_test))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
