//! Per-user login and navigation state.
//!
//! `Session` is an explicit state machine; every change goes through
//! [`Session::apply`]. Instances live in the [`SessionRegistry`], one per
//! browser cookie.

pub mod handlers;
pub mod registry;

use serde::{Deserialize, Serialize};

pub use registry::{CurrentSession, SessionRegistry};

/// A screen reachable while logged in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Home,
    Campaign,
    Pitch,
    Lead,
    Analytics,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn { username: String, view: View },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Successful credential check.
    Login { username: String },
    Logout,
    Navigate(View),
}

impl Session {
    /// Next state. Navigation while logged out is ignored; logging in again
    /// replaces the user and lands on the home view.
    pub fn apply(self, transition: Transition) -> Session {
        match (self, transition) {
            (_, Transition::Login { username }) => Session::LoggedIn {
                username,
                view: View::Home,
            },
            (_, Transition::Logout) => Session::LoggedOut,
            (Session::LoggedIn { username, .. }, Transition::Navigate(view)) => {
                Session::LoggedIn { username, view }
            }
            (Session::LoggedOut, Transition::Navigate(_)) => Session::LoggedOut,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Session::LoggedIn { username, .. } => Some(username),
            Session::LoggedOut => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::LoggedIn { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in(view: View) -> Session {
        Session::LoggedIn {
            username: "alice".to_string(),
            view,
        }
    }

    #[test]
    fn test_initial_state_is_logged_out() {
        assert_eq!(Session::default(), Session::LoggedOut);
        assert!(!Session::default().is_logged_in());
    }

    #[test]
    fn test_login_lands_on_home() {
        let next = Session::LoggedOut.apply(Transition::Login {
            username: "alice".to_string(),
        });
        assert_eq!(next, logged_in(View::Home));
        assert_eq!(next.username(), Some("alice"));
    }

    #[test]
    fn test_logout_from_any_view() {
        for view in [View::Home, View::Campaign, View::Pitch, View::Lead, View::Analytics] {
            assert_eq!(logged_in(view).apply(Transition::Logout), Session::LoggedOut);
        }
    }

    #[test]
    fn test_navigate_is_unconditional_when_logged_in() {
        let next = logged_in(View::Analytics).apply(Transition::Navigate(View::Lead));
        assert_eq!(next, logged_in(View::Lead));

        let same = logged_in(View::Pitch).apply(Transition::Navigate(View::Pitch));
        assert_eq!(same, logged_in(View::Pitch));
    }

    #[test]
    fn test_navigate_while_logged_out_is_ignored() {
        let next = Session::LoggedOut.apply(Transition::Navigate(View::Analytics));
        assert_eq!(next, Session::LoggedOut);
    }

    #[test]
    fn test_view_deserializes_from_lowercase_name() {
        let view: View = serde_json::from_str("\"analytics\"").unwrap();
        assert_eq!(view, View::Analytics);
        assert!(serde_json::from_str::<View>("\"settings\"").is_err());
    }
}
