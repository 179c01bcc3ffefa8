//! Server-rendered HTML views.
//!
//! Templates are compiled into the binary and rendered with auto-escaping,
//! so user and model text is shown literally.

pub mod pages;

use std::sync::Arc;

use axum::response::{Html, IntoResponse, Redirect, Response};
use minijinja::{Environment, Value};

use crate::analytics;
use crate::errors::AppError;
use crate::session::{CurrentSession, Session, View};
use crate::state::AppState;

use pages::{CampaignPage, HomePage, LeadPage, LoginPage, Page, PitchPage};

macro_rules! template {
    ($name:literal) => {
        (
            $name,
            include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/", $name)),
        )
    };
}

const TEMPLATES: [(&str, &str); 7] = [
    template!("base.html"),
    template!("login.html"),
    template!("home.html"),
    template!("campaign.html"),
    template!("pitch.html"),
    template!("lead.html"),
    template!("analytics.html"),
];

/// Compiled template set shared by all handlers.
#[derive(Clone)]
pub struct Views {
    env: Arc<Environment<'static>>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env: Arc::new(env) })
    }

    pub fn render(&self, page: &Page) -> Result<Html<String>, AppError> {
        let (name, context) = match page {
            Page::Login(p) => ("login.html", Value::from_serialize(p)),
            Page::Home(p) => ("home.html", Value::from_serialize(p)),
            Page::Campaign(p) => ("campaign.html", Value::from_serialize(p)),
            Page::Pitch(p) => ("pitch.html", Value::from_serialize(p)),
            Page::Lead(p) => ("lead.html", Value::from_serialize(p)),
            Page::Analytics(p) => ("analytics.html", Value::from_serialize(p)),
        };
        let html = self.env.get_template(name)?.render(context)?;
        Ok(Html(html))
    }
}

/// The screen for a session's current state, with freshly loaded data.
pub async fn current_page(state: &AppState, session: &Session) -> Result<Page, AppError> {
    let (username, view) = match session {
        Session::LoggedOut => return Ok(Page::Login(LoginPage::default())),
        Session::LoggedIn { username, view } => (username.clone(), *view),
    };

    let page = match view {
        View::Home => Page::Home(HomePage { username }),
        View::Campaign => Page::Campaign(CampaignPage::blank(username)),
        View::Pitch => Page::Pitch(PitchPage {
            username,
            ..PitchPage::default()
        }),
        View::Lead => Page::Lead(LeadPage {
            username,
            ..LeadPage::default()
        }),
        View::Analytics => Page::Analytics(analytics::load_page(state, username, None).await?),
    };
    Ok(page)
}

/// Renders `page` as the full response, refreshing the session cookie.
pub fn respond(
    state: &AppState,
    current: &CurrentSession,
    page: &Page,
) -> Result<Response, AppError> {
    let html = state.views.render(page)?;
    Ok(([current.cookie()], html).into_response())
}

/// 303 back to `/`, which re-renders whatever view the session is now on.
pub fn redirect_home(current: &CurrentSession) -> Response {
    ([current.cookie()], Redirect::to("/")).into_response()
}

#[cfg(test)]
mod tests {
    use super::pages::{AnalyticsPage, Notice};
    use super::*;
    use crate::analytics::summarize;
    use crate::models::record::{Record, RecordType};

    fn render(page: Page) -> String {
        Views::new().unwrap().render(&page).unwrap().0
    }

    #[test]
    fn test_all_templates_compile() {
        assert!(Views::new().is_ok());
    }

    #[test]
    fn test_login_page_shows_default_credentials_hint() {
        let html = render(Page::Login(LoginPage::default()));
        assert!(html.contains("admin / admin123"));
        assert!(html.contains("action=\"/login\""));
        assert!(html.contains("action=\"/register\""));
    }

    #[test]
    fn test_home_shows_username_and_navigation() {
        let html = render(Page::Home(HomePage {
            username: "alice".to_string(),
        }));
        assert!(html.contains("Logged in as: <strong>alice</strong>"));
        for view in ["campaign", "pitch", "lead", "analytics"] {
            assert!(html.contains(&format!("value=\"{view}\"")));
        }
        assert!(html.contains("action=\"/logout\""));
    }

    #[test]
    fn test_model_output_is_escaped() {
        let mut page = PitchPage {
            username: "alice".to_string(),
            ..PitchPage::default()
        };
        page.output = Some("<script>alert(1)</script>".to_string());
        page.notice = Some(Notice::success("Saved"));

        let html = render(Page::Pitch(page));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("Saved"));
    }

    #[test]
    fn test_campaign_page_selects_chosen_type() {
        let mut page = CampaignPage::blank("alice".to_string());
        page.campaign_type = crate::generation::prompts::CampaignType::Ads;
        let html = render(Page::Campaign(page));
        assert!(html.contains("<option value=\"Ads\" selected>"));
    }

    #[test]
    fn test_empty_analytics_says_no_data() {
        let html = render(Page::Analytics(AnalyticsPage {
            username: "alice".to_string(),
            summary: None,
            notice: None,
        }));
        assert!(html.contains("No data yet"));
        assert!(!html.contains("/analytics/export"));
    }

    #[test]
    fn test_analytics_lists_metrics_and_ids() {
        let records = vec![
            Record::new(RecordType::Campaign, "CRM Pro", "retailers", "copy"),
            Record::new(RecordType::Lead, "Lead", "CTO", "Score: 80"),
        ];
        let html = render(Page::Analytics(AnalyticsPage {
            username: "alice".to_string(),
            summary: summarize(records),
            notice: None,
        }));
        assert!(html.contains("Campaigns"));
        assert!(html.contains("<td>0</td>"));
        assert!(html.contains("<td>1</td>"));
        assert!(html.contains("/analytics/export"));
        assert!(html.contains("action=\"/analytics/delete\""));
    }
}
