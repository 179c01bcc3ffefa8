//! Axum route handlers for login, registration, and logout.

use axum::{extract::State, response::Response, Form};
use serde::Deserialize;
use tracing::info;

use crate::auth::validation::RegistrationForm;
use crate::errors::AppError;
use crate::session::{CurrentSession, Transition};
use crate::state::AppState;
use crate::storage::run_blocking;
use crate::views::pages::{LoginPage, Notice, Page};
use crate::views::{redirect_home, respond};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    current: CurrentSession,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let store = state.credentials.clone();
    let (username, password) = (form.username.clone(), form.password);
    let verified = run_blocking(move || store.verify(&username, &password)).await?;

    if !verified {
        info!("Failed login for '{}'", form.username);
        let page = Page::Login(LoginPage {
            login_username: form.username,
            login_notice: Some(Notice::error("Invalid username or password")),
            ..LoginPage::default()
        });
        return respond(&state, &current, &page);
    }

    info!("User '{}' logged in", form.username);
    state
        .sessions
        .apply(
            current.id,
            Transition::Login {
                username: form.username,
            },
        )
        .await;
    Ok(redirect_home(&current))
}

/// POST /register
///
/// Never changes session state; a successful registration only enables a later login.
pub async fn handle_register(
    State(state): State<AppState>,
    current: CurrentSession,
    Form(form): Form<RegistrationForm>,
) -> Result<Response, AppError> {
    let notice = match form.validate() {
        Err(reason) => Notice::error(reason.to_string()),
        Ok(()) => {
            let store = state.credentials.clone();
            let (username, password) = (form.username.clone(), form.password.clone());
            if run_blocking(move || store.register(&username, &password)).await? {
                Notice::success("Account created! Please login.")
            } else {
                Notice::error("Username already exists")
            }
        }
    };

    let page = Page::Login(LoginPage {
        register_username: form.username,
        register_notice: Some(notice),
        ..LoginPage::default()
    });
    respond(&state, &current, &page)
}

/// POST /logout
pub async fn handle_logout(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Response {
    if let Some(username) = current.session.username() {
        info!("User '{username}' logged out");
    }
    state.sessions.apply(current.id, Transition::Logout).await;
    redirect_home(&current)
}
