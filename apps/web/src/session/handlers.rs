//! Axum route handlers for rendering and moving between views.

use axum::{extract::State, response::Response, Form};
use serde::Deserialize;
use tracing::debug;

use crate::errors::AppError;
use crate::session::{CurrentSession, Transition, View};
use crate::state::AppState;
use crate::views::{current_page, redirect_home, respond};

#[derive(Debug, Deserialize)]
pub struct NavigateForm {
    pub view: View,
}

/// GET /
///
/// Full render of whatever the session is on; the login screen when logged out.
pub async fn handle_index(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Response, AppError> {
    let page = current_page(&state, &current.session).await?;
    respond(&state, &current, &page)
}

/// POST /navigate
pub async fn handle_navigate(
    State(state): State<AppState>,
    current: CurrentSession,
    Form(form): Form<NavigateForm>,
) -> Response {
    debug!("Navigating to {:?}", form.view);
    state
        .sessions
        .apply(current.id, Transition::Navigate(form.view))
        .await;
    redirect_home(&current)
}
