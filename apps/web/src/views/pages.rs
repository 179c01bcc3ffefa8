//! Template contexts, one struct per screen.

use serde::Serialize;

use crate::analytics::AnalyticsSummary;
use crate::generation::prompts::CampaignType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// An inline status line shown inside a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoginPage {
    pub login_username: String,
    pub login_notice: Option<Notice>,
    pub register_username: String,
    pub register_notice: Option<Notice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CampaignPage {
    pub username: String,
    pub product: String,
    pub audience: String,
    pub campaign_type: CampaignType,
    pub campaign_types: [CampaignType; 3],
    pub output: Option<String>,
    pub notice: Option<Notice>,
}

impl CampaignPage {
    pub fn blank(username: String) -> Self {
        Self {
            username,
            product: String::new(),
            audience: String::new(),
            campaign_type: CampaignType::default(),
            campaign_types: CampaignType::ALL,
            output: None,
            notice: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PitchPage {
    pub username: String,
    pub product: String,
    pub customer: String,
    pub output: Option<String>,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LeadPage {
    pub username: String,
    pub info: String,
    pub output: Option<String>,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsPage {
    pub username: String,
    pub summary: Option<AnalyticsSummary>,
    pub notice: Option<Notice>,
}

/// Every renderable screen. Matched exhaustively when rendering.
#[derive(Debug, Clone)]
pub enum Page {
    Login(LoginPage),
    Home(HomePage),
    Campaign(CampaignPage),
    Pitch(PitchPage),
    Lead(LeadPage),
    Analytics(AnalyticsPage),
}
