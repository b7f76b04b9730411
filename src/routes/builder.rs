//! Builder routes — session lifecycle, drag events, and print submission.
//!
//! Handlers translate between the console's JSON shapes and the builder
//! service; the only business rule living here is how failures map onto
//! HTTP statuses and the uniform envelope.

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use layout::canvas::Orientation;

use crate::envelope::ApiResult;
use crate::routes::auth::AuthUser;
use crate::services::backend::{BackendError, Sorteio};
use crate::services::builder::{self as builder_svc, SessionError, SessionView};
use crate::state::AppState;

// =============================================================================
// WIRE SHAPES
// =============================================================================

#[derive(Deserialize)]
pub struct CreateSessionBody {
    /// Raffle the print run targets.
    #[serde(rename = "bolaoId")]
    pub bolao_id: i64,
    /// Printable positions per sheet (slider range 1–8).
    pub posicoes: u8,
    pub orientacao: Orientation,
}

#[derive(Deserialize)]
pub struct ConfigureBody {
    pub posicoes: u8,
    pub orientacao: Orientation,
}

#[derive(Deserialize)]
pub struct DragBody {
    pub element: usize,
    pub dx: f64,
    pub dy: f64,
}

#[derive(Serialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Serialize)]
pub struct ElementPosition {
    pub element: usize,
    pub x: f64,
    pub y: f64,
}

#[derive(Serialize)]
pub struct SessionResponse {
    #[serde(rename = "sessionId")]
    pub session_id: Uuid,
    #[serde(rename = "bolaoId")]
    pub bolao_id: i64,
    pub orientacao: Orientation,
    pub posicoes: u8,
    pub canvas: CanvasSize,
    pub positions: Vec<ElementPosition>,
}

#[derive(Serialize)]
pub struct LoadResponse {
    #[serde(flatten)]
    pub session: SessionResponse,
    /// Pairs the saved layout carried but could not be read.
    #[serde(rename = "skippedPairs")]
    pub skipped_pairs: usize,
}

fn to_response(view: SessionView) -> SessionResponse {
    SessionResponse {
        session_id: view.id,
        bolao_id: view.bolao_id,
        orientacao: view.config.orientation,
        posicoes: view.config.pairs,
        canvas: CanvasSize { width: view.config.width(), height: view.config.height() },
        positions: view
            .positions
            .into_iter()
            .map(|(element, p)| ElementPosition { element, x: p.x, y: p.y })
            .collect(),
    }
}

// =============================================================================
// ERROR MAPPING
// =============================================================================

fn session_error_response(err: &SessionError) -> Response {
    let status = match err {
        SessionError::NotFound(_) => StatusCode::NOT_FOUND,
        SessionError::Forbidden => StatusCode::FORBIDDEN,
        SessionError::InvalidPairs(_) | SessionError::UnknownElement(_) => StatusCode::BAD_REQUEST,
        SessionError::Incomplete(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    (status, Json(ApiResult::<Value>::error(err.to_string()))).into_response()
}

fn backend_error_response(err: &BackendError) -> Response {
    match err {
        BackendError::Rejected(msg) => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(ApiResult::<Value>::error(msg.clone()))).into_response()
        }
        _ => {
            tracing::error!(error = %err, "backend call failed");
            (StatusCode::BAD_GATEWAY, Json(ApiResult::<Value>::error("backend unavailable"))).into_response()
        }
    }
}

// =============================================================================
// SESSION HANDLERS
// =============================================================================

/// `POST /api/builder/sessions` — configure a new builder session. The
/// canvas starts empty; positions come from randomize, load, or drags.
pub async fn create_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateSessionBody>,
) -> Response {
    match builder_svc::create_session(&state, &auth.user.login, body.bolao_id, body.posicoes, body.orientacao).await {
        Ok(view) => (StatusCode::CREATED, Json(ApiResult::ok(to_response(view)))).into_response(),
        Err(e) => session_error_response(&e),
    }
}

/// `GET /api/builder/sessions/{id}` — configuration and current positions.
pub async fn get_session(State(state): State<AppState>, auth: AuthUser, Path(id): Path<Uuid>) -> Response {
    match builder_svc::snapshot(&state, id, &auth.user.login).await {
        Ok(view) => Json(ApiResult::ok(to_response(view))).into_response(),
        Err(e) => session_error_response(&e),
    }
}

/// `POST /api/builder/sessions/{id}/configure` — reconfigure the canvas,
/// discarding every recorded position.
pub async fn configure(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<ConfigureBody>,
) -> Response {
    match builder_svc::reconfigure(&state, id, &auth.user.login, body.posicoes, body.orientacao).await {
        Ok(view) => Json(ApiResult::ok(to_response(view))).into_response(),
        Err(e) => session_error_response(&e),
    }
}

/// `DELETE /api/builder/sessions/{id}` — discard the session.
pub async fn delete_session(State(state): State<AppState>, auth: AuthUser, Path(id): Path<Uuid>) -> Response {
    match builder_svc::remove_session(&state, id, &auth.user.login).await {
        Ok(()) => Json(ApiResult::ok(serde_json::json!({ "ok": true }))).into_response(),
        Err(e) => session_error_response(&e),
    }
}

// =============================================================================
// POSITIONING HANDLERS
// =============================================================================

/// `POST /api/builder/sessions/{id}/randomize` — place all elements at
/// random within the canvas.
pub async fn randomize(State(state): State<AppState>, auth: AuthUser, Path(id): Path<Uuid>) -> Response {
    match builder_svc::randomize(&state, id, &auth.user.login).await {
        Ok(view) => Json(ApiResult::ok(to_response(view))).into_response(),
        Err(e) => session_error_response(&e),
    }
}

/// `POST /api/builder/sessions/{id}/load` — fetch the saved layout for this
/// session's orientation and pair count and load it. Malformed pairs are
/// skipped and reported, not fatal.
pub async fn load_saved(State(state): State<AppState>, auth: AuthUser, Path(id): Path<Uuid>) -> Response {
    let (_, config) = match builder_svc::session_target(&state, id, &auth.user.login).await {
        Ok(target) => target,
        Err(e) => return session_error_response(&e),
    };

    let saved = match state
        .backend
        .buscar_layout(&auth.token, config.orientation, config.pairs)
        .await
    {
        Ok(Some(saved)) => saved,
        Ok(None) => {
            let message = "no saved layout for this orientation and quantity";
            return (StatusCode::NOT_FOUND, Json(ApiResult::<Value>::error(message))).into_response();
        }
        Err(e) => return backend_error_response(&e),
    };

    match builder_svc::load_saved(&state, id, &auth.user.login, &saved).await {
        Ok((view, skipped_pairs)) => {
            if skipped_pairs > 0 {
                tracing::warn!(session = %id, skipped_pairs, "saved layout loaded with unreadable pairs");
            }
            Json(ApiResult::ok(LoadResponse { session: to_response(view), skipped_pairs })).into_response()
        }
        Err(e) => session_error_response(&e),
    }
}

/// `POST /api/builder/sessions/{id}/drag` — accumulate one drag-end delta.
pub async fn drag(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(body): Json<DragBody>,
) -> Response {
    match builder_svc::apply_drag(&state, id, &auth.user.login, body.element, body.dx, body.dy).await {
        Ok(p) => Json(ApiResult::ok(ElementPosition { element: body.element, x: p.x, y: p.y })).into_response(),
        Err(e) => session_error_response(&e),
    }
}

// =============================================================================
// PRINT HANDLERS
// =============================================================================

/// `POST /api/builder/sessions/{id}/print` — serialize the session's
/// positions and submit the print run. An incomplete layout is rejected
/// before any network call.
pub async fn print(State(state): State<AppState>, auth: AuthUser, Path(id): Path<Uuid>) -> Response {
    let (bolao_id, payload) = match builder_svc::print_payload(&state, id, &auth.user.login).await {
        Ok(result) => result,
        Err(e) => return session_error_response(&e),
    };

    match state.backend.gerar_impressao(&auth.token, bolao_id, &payload).await {
        Ok(()) => Json(ApiResult::ok(serde_json::json!({ "pares": payload.len() }))).into_response(),
        Err(e) => backend_error_response(&e),
    }
}

/// `POST /api/builder/sessions/{id}/print/test` — test print; relays the
/// backend's PDF bytes on success.
pub async fn print_test(State(state): State<AppState>, auth: AuthUser, Path(id): Path<Uuid>) -> Response {
    let (bolao_id, payload) = match builder_svc::print_payload(&state, id, &auth.user.login).await {
        Ok(result) => result,
        Err(e) => return session_error_response(&e),
    };

    match state
        .backend
        .gerar_impressao_teste(&auth.token, bolao_id, &payload)
        .await
    {
        Ok(pdf) => ([(header::CONTENT_TYPE, "application/pdf")], pdf).into_response(),
        Err(e) => backend_error_response(&e),
    }
}

// =============================================================================
// RAFFLE LISTING
// =============================================================================

/// `GET /api/sorteios` — raffles currently open for sales.
pub async fn list_sorteios(State(state): State<AppState>, auth: AuthUser) -> Response {
    match state.backend.listar_sorteios(&auth.token).await {
        Ok(sorteios) => Json(ApiResult::<Vec<Sorteio>>::ok(sorteios)).into_response(),
        Err(e) => backend_error_response(&e),
    }
}
