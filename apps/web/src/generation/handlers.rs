//! Axum route handlers for the Campaign, Pitch, and Lead views.
//!
//! Each action runs compose → generate → save synchronously and then renders
//! the full view with the output. A generation failure propagates as
//! `AppError::Generation` and nothing is saved.

use axum::{extract::State, response::Response, Form};
use serde::Deserialize;

use crate::errors::AppError;
use crate::generation::generator::{generate_and_save, GenerationRequest};
use crate::generation::prompts::CampaignType;
use crate::session::{CurrentSession, View};
use crate::state::AppState;
use crate::views::pages::{CampaignPage, LeadPage, LoginPage, Notice, Page, PitchPage};
use crate::views::respond;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CampaignForm {
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub audience: String,
    #[serde(default)]
    pub campaign_type: CampaignType,
}

#[derive(Debug, Deserialize)]
pub struct PitchForm {
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub customer: String,
}

#[derive(Debug, Deserialize)]
pub struct LeadForm {
    #[serde(default)]
    pub info: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /campaign
pub async fn handle_campaign(
    State(state): State<AppState>,
    current: CurrentSession,
    Form(form): Form<CampaignForm>,
) -> Result<Response, AppError> {
    let Some(username) = state.sessions.enter_view(current.id, View::Campaign).await else {
        return respond(&state, &current, &Page::Login(LoginPage::default()));
    };

    let record = generate_and_save(
        state.llm.as_ref(),
        &state.records,
        GenerationRequest::Campaign {
            product: form.product.clone(),
            audience: form.audience.clone(),
            campaign_type: form.campaign_type,
        },
    )
    .await?;

    let page = Page::Campaign(CampaignPage {
        product: form.product,
        audience: form.audience,
        campaign_type: form.campaign_type,
        output: Some(record.output),
        notice: Some(Notice::success("Saved")),
        ..CampaignPage::blank(username)
    });
    respond(&state, &current, &page)
}

/// POST /pitch
pub async fn handle_pitch(
    State(state): State<AppState>,
    current: CurrentSession,
    Form(form): Form<PitchForm>,
) -> Result<Response, AppError> {
    let Some(username) = state.sessions.enter_view(current.id, View::Pitch).await else {
        return respond(&state, &current, &Page::Login(LoginPage::default()));
    };

    let record = generate_and_save(
        state.llm.as_ref(),
        &state.records,
        GenerationRequest::Pitch {
            product: form.product.clone(),
            customer: form.customer.clone(),
        },
    )
    .await?;

    let page = Page::Pitch(PitchPage {
        username,
        product: form.product,
        customer: form.customer,
        output: Some(record.output),
        notice: Some(Notice::success("Saved")),
    });
    respond(&state, &current, &page)
}

/// POST /lead
pub async fn handle_lead(
    State(state): State<AppState>,
    current: CurrentSession,
    Form(form): Form<LeadForm>,
) -> Result<Response, AppError> {
    let Some(username) = state.sessions.enter_view(current.id, View::Lead).await else {
        return respond(&state, &current, &Page::Login(LoginPage::default()));
    };

    let record = generate_and_save(
        state.llm.as_ref(),
        &state.records,
        GenerationRequest::Lead {
            info: form.info.clone(),
        },
    )
    .await?;

    let page = Page::Lead(LeadPage {
        username,
        info: form.info,
        output: Some(record.output),
        notice: Some(Notice::success("Saved")),
    });
    respond(&state, &current, &page)
}
