//! Builder-session service — configure, position, and assemble print payloads.
//!
//! DESIGN
//! ======
//! A session is one canvas configuration plus the live position map for the
//! user working on it. All mutations go through the session's layout engine;
//! this module adds ownership checks and the pair-count bounds the
//! configuration UI enforces with a slider.

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;

use uuid::Uuid;

use layout::canvas::{CanvasConfig, Orientation, Point};
use layout::consts::{MAX_PAIRS, MIN_PAIRS};
use layout::doc::ElementIndex;
use layout::engine::LayoutEngine;
use layout::wire::{LayoutError, PrintPosition, SavedLayout};

use crate::state::{AppState, BuilderSession};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session not found: {0}")]
    NotFound(Uuid),
    #[error("session belongs to another user")]
    Forbidden,
    #[error("position count must be between 1 and 8, got {0}")]
    InvalidPairs(u8),
    #[error("element {0} is outside this session's canvas")]
    UnknownElement(usize),
    #[error(transparent)]
    Incomplete(#[from] LayoutError),
}

/// Snapshot of one session, handed to route handlers for response shaping.
#[derive(Debug, Clone)]
pub struct SessionView {
    pub id: Uuid,
    pub bolao_id: i64,
    pub config: CanvasConfig,
    /// Placed positions, ascending by element index.
    pub positions: Vec<(ElementIndex, Point)>,
}

fn view_of(session: &BuilderSession) -> SessionView {
    SessionView {
        id: session.id,
        bolao_id: session.bolao_id,
        config: session.engine.config(),
        positions: session.engine.positions().entries(),
    }
}

fn validate_pairs(pairs: u8) -> Result<(), SessionError> {
    if (MIN_PAIRS..=MAX_PAIRS).contains(&pairs) {
        Ok(())
    } else {
        Err(SessionError::InvalidPairs(pairs))
    }
}

fn check_owner(session: &BuilderSession, owner: &str) -> Result<(), SessionError> {
    if session.owner == owner {
        Ok(())
    } else {
        Err(SessionError::Forbidden)
    }
}

// =============================================================================
// LIFECYCLE
// =============================================================================

/// Create a session with a fixed canvas and an empty position map.
///
/// # Errors
///
/// Returns `InvalidPairs` when `pairs` is outside the slider range.
pub async fn create_session(
    state: &AppState,
    owner: &str,
    bolao_id: i64,
    pairs: u8,
    orientation: Orientation,
) -> Result<SessionView, SessionError> {
    validate_pairs(pairs)?;
    let session = BuilderSession {
        id: Uuid::new_v4(),
        owner: owner.to_owned(),
        bolao_id,
        engine: LayoutEngine::configure(pairs, orientation),
    };
    let view = view_of(&session);
    let mut sessions = state.sessions.write().await;
    sessions.insert(session.id, session);
    Ok(view)
}

/// Replace a session's configuration, discarding every recorded position.
pub async fn reconfigure(
    state: &AppState,
    id: Uuid,
    owner: &str,
    pairs: u8,
    orientation: Orientation,
) -> Result<SessionView, SessionError> {
    validate_pairs(pairs)?;
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
    check_owner(session, owner)?;
    session.engine.reconfigure(pairs, orientation);
    Ok(view_of(session))
}

/// Current configuration and positions.
pub async fn snapshot(state: &AppState, id: Uuid, owner: &str) -> Result<SessionView, SessionError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(SessionError::NotFound(id))?;
    check_owner(session, owner)?;
    Ok(view_of(session))
}

/// Discard a session.
pub async fn remove_session(state: &AppState, id: Uuid, owner: &str) -> Result<(), SessionError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get(&id).ok_or(SessionError::NotFound(id))?;
    check_owner(session, owner)?;
    sessions.remove(&id);
    Ok(())
}

// =============================================================================
// POSITIONING
// =============================================================================

/// Place all of a session's elements uniformly at random within its canvas.
pub async fn randomize(state: &AppState, id: Uuid, owner: &str) -> Result<SessionView, SessionError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
    check_owner(session, owner)?;
    session.engine.randomize();
    Ok(view_of(session))
}

/// Accumulate a drag-end delta onto one element, returning its new position.
///
/// # Errors
///
/// Returns `UnknownElement` for an index outside the configured canvas.
pub async fn apply_drag(
    state: &AppState,
    id: Uuid,
    owner: &str,
    element: ElementIndex,
    dx: f64,
    dy: f64,
) -> Result<Point, SessionError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
    check_owner(session, owner)?;
    if element >= session.engine.config().element_count() {
        return Err(SessionError::UnknownElement(element));
    }
    Ok(session.engine.apply_drag(element, dx, dy))
}

/// The raffle and canvas a session targets; used before remote calls that
/// must not hold the session lock.
pub async fn session_target(state: &AppState, id: Uuid, owner: &str) -> Result<(i64, CanvasConfig), SessionError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(SessionError::NotFound(id))?;
    check_owner(session, owner)?;
    Ok((session.bolao_id, session.engine.config()))
}

/// Replace a session's positions with a fetched saved layout. Malformed
/// pairs stay unplaced; the returned count reports how many were skipped.
pub async fn load_saved(
    state: &AppState,
    id: Uuid,
    owner: &str,
    saved: &SavedLayout,
) -> Result<(SessionView, usize), SessionError> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
    check_owner(session, owner)?;
    session.engine.load_saved(saved);
    let loaded_pairs = session.engine.positions().len() / 2;
    let skipped = (saved.quantidade as usize).saturating_sub(loaded_pairs);
    Ok((view_of(session), skipped))
}

/// Assemble the print payload for submission.
///
/// # Errors
///
/// Returns `Incomplete` when any element has no recorded position; the
/// caller must surface that as a rejection before any network call.
pub async fn print_payload(
    state: &AppState,
    id: Uuid,
    owner: &str,
) -> Result<(i64, Vec<PrintPosition>), SessionError> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(SessionError::NotFound(id))?;
    check_owner(session, owner)?;
    let payload = session.engine.serialize()?;
    Ok((session.bolao_id, payload))
}
