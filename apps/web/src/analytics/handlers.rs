//! Axum route handlers for the Analytics view: delete-by-id and CSV export.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tracing::info;

use crate::analytics::load_page;
use crate::errors::AppError;
use crate::session::{CurrentSession, View};
use crate::state::AppState;
use crate::storage::run_blocking;
use crate::views::pages::{LoginPage, Notice, Page};
use crate::views::respond;

pub const EXPORT_FILENAME: &str = "sales_data.csv";

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    pub record_id: String,
}

/// POST /analytics/delete
///
/// Ids are ordinal positions at render time. A stale id deletes whatever row
/// now sits at that position.
pub async fn handle_delete(
    State(state): State<AppState>,
    current: CurrentSession,
    Form(form): Form<DeleteForm>,
) -> Result<Response, AppError> {
    let Some(username) = state.sessions.enter_view(current.id, View::Analytics).await else {
        return respond(&state, &current, &Page::Login(LoginPage::default()));
    };

    let deleted = match form.record_id.trim().parse::<usize>() {
        Ok(index) => {
            let store = state.records.clone();
            run_blocking(move || store.delete_by_index(index))
                .await?
                .then_some(index)
        }
        Err(_) => None,
    };

    let notice = match deleted {
        Some(index) => {
            info!("User '{username}' deleted record {index}");
            Notice::success(format!("Record {index} deleted successfully!"))
        }
        None => Notice::error("Failed to delete record"),
    };

    let page = load_page(&state, username, Some(notice)).await?;
    respond(&state, &current, &Page::Analytics(page))
}

/// GET /analytics/export
pub async fn handle_export(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Response, AppError> {
    if !current.session.is_logged_in() {
        return respond(&state, &current, &Page::Login(LoginPage::default()));
    }

    let store = state.records.clone();
    let body = run_blocking(move || store.export_csv()).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        body,
    )
        .into_response())
}
