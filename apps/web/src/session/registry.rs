use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue},
};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Session, Transition, View};
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "salesdesk_session";

/// In-memory sessions keyed by cookie id. Nothing here is persisted.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state for `id`; unknown ids start logged out.
    pub async fn get(&self, id: Uuid) -> Session {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .unwrap_or_default()
    }

    /// Applies `transition` to the stored state in one critical section and
    /// returns the result. Logged-out sessions are dropped from the map.
    pub async fn apply(&self, id: Uuid, transition: Transition) -> Session {
        let mut sessions = self.sessions.write().await;
        let current = sessions.remove(&id).unwrap_or_default();
        let next = current.apply(transition);
        if next.is_logged_in() {
            sessions.insert(id, next.clone());
        }
        next
    }

    /// Moves a logged-in caller onto `view` and returns its username.
    /// `None` when logged out.
    pub async fn enter_view(&self, id: Uuid, view: View) -> Option<String> {
        match self.apply(id, Transition::Navigate(view)).await {
            Session::LoggedIn { username, .. } => Some(username),
            Session::LoggedOut => None,
        }
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// The caller's session id and a snapshot of its state.
///
/// Requests without a valid cookie get a fresh id; handlers must attach
/// [`CurrentSession::cookie`] to their response so the browser keeps it.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub id: Uuid,
    pub session: Session,
}

impl CurrentSession {
    pub fn cookie(&self) -> (header::HeaderName, HeaderValue) {
        let value = format!("{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax", self.id);
        // A hyphenated UUID is always a valid header value.
        let value = HeaderValue::from_str(&value).unwrap_or(HeaderValue::from_static(""));
        (header::SET_COOKIE, value)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let id = session_id_from(&parts.headers).unwrap_or_else(Uuid::new_v4);
        let session = state.sessions.get(id).await;
        Ok(CurrentSession { id, session })
    }
}

fn session_id_from(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value).ok())
}
