//! Prompt composition for each artifact type.
//!
//! User text is embedded verbatim: no escaping, trimming, or truncation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Channel a campaign is written for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignType {
    #[default]
    Email,
    Social,
    Ads,
}

impl CampaignType {
    pub const ALL: [CampaignType; 3] = [CampaignType::Email, CampaignType::Social, CampaignType::Ads];

    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignType::Email => "Email",
            CampaignType::Social => "Social",
            CampaignType::Ads => "Ads",
        }
    }
}

impl fmt::Display for CampaignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn campaign_prompt(product: &str, audience: &str, campaign_type: CampaignType) -> String {
    format!("Create {campaign_type} campaign for {product} targeting {audience}")
}

pub fn pitch_prompt(product: &str, customer: &str) -> String {
    format!("Create a pitch for {product} to {customer}")
}

pub fn lead_prompt(info: &str) -> String {
    format!("Score this lead 1-100:\n{info}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_prompt() {
        assert_eq!(
            campaign_prompt("CRM Pro", "small retailers", CampaignType::Social),
            "Create Social campaign for CRM Pro targeting small retailers"
        );
    }

    #[test]
    fn test_pitch_prompt() {
        assert_eq!(
            pitch_prompt("CRM Pro", "Acme Corp"),
            "Create a pitch for CRM Pro to Acme Corp"
        );
    }

    #[test]
    fn test_lead_prompt_puts_info_on_next_line() {
        assert_eq!(
            lead_prompt("VP Sales at Initech\nbudget approved"),
            "Score this lead 1-100:\nVP Sales at Initech\nbudget approved"
        );
    }

    #[test]
    fn test_fields_are_embedded_verbatim() {
        let prompt = pitch_prompt("  {customer} ", "<b>\"x\"</b>");
        assert_eq!(prompt, "Create a pitch for   {customer}  to <b>\"x\"</b>");
    }

    #[test]
    fn test_empty_fields_still_compose() {
        assert_eq!(
            campaign_prompt("", "", CampaignType::Email),
            "Create Email campaign for  targeting "
        );
    }

    #[test]
    fn test_campaign_type_parses_from_form_value() {
        let parsed: CampaignType = serde_json::from_str("\"Ads\"").unwrap();
        assert_eq!(parsed, CampaignType::Ads);
        assert_eq!(CampaignType::default(), CampaignType::Email);
    }
}
