//! Generation pipeline: compose prompt → completion call → append record.
//!
//! A failed completion aborts the action before anything is written.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{campaign_prompt, lead_prompt, pitch_prompt, CampaignType};
use crate::llm_client::TextGenerator;
use crate::models::record::{Record, RecordType};
use crate::storage::{run_blocking, RecordStore};

/// Value stored in the `input` column of lead records.
pub const LEAD_INPUT_LABEL: &str = "Lead";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// One generation action, carrying the user-supplied fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationRequest {
    Campaign {
        product: String,
        audience: String,
        campaign_type: CampaignType,
    },
    Pitch {
        product: String,
        customer: String,
    },
    Lead {
        info: String,
    },
}

impl GenerationRequest {
    pub fn record_type(&self) -> RecordType {
        match self {
            GenerationRequest::Campaign { .. } => RecordType::Campaign,
            GenerationRequest::Pitch { .. } => RecordType::Pitch,
            GenerationRequest::Lead { .. } => RecordType::Lead,
        }
    }

    pub fn prompt(&self) -> String {
        match self {
            GenerationRequest::Campaign {
                product,
                audience,
                campaign_type,
            } => campaign_prompt(product, audience, *campaign_type),
            GenerationRequest::Pitch { product, customer } => pitch_prompt(product, customer),
            GenerationRequest::Lead { info } => lead_prompt(info),
        }
    }

    /// The `(input, details)` columns for the stored record.
    fn record_fields(&self) -> (String, String) {
        match self {
            GenerationRequest::Campaign {
                product, audience, ..
            } => (product.clone(), audience.clone()),
            GenerationRequest::Pitch { product, customer } => (product.clone(), customer.clone()),
            GenerationRequest::Lead { info } => (LEAD_INPUT_LABEL.to_string(), info.clone()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs one generation action end to end and returns the saved record.
pub async fn generate_and_save(
    llm: &dyn TextGenerator,
    records: &RecordStore,
    request: GenerationRequest,
) -> Result<Record, AppError> {
    let record_type = request.record_type();
    let prompt = request.prompt();
    info!("Generating {record_type} ({} prompt chars)", prompt.len());

    let output = llm.generate(&prompt).await.map_err(|e| {
        warn!("{record_type} generation failed: {e}");
        AppError::Generation(e)
    })?;

    let (input, details) = request.record_fields();
    let record = Record::new(record_type, input, details, output);

    let store = records.clone();
    let to_save = record.clone();
    run_blocking(move || store.append(&to_save)).await?;

    Ok(record)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::{GenerationError, TextGenerator};

    /// Canned generator: echoes a fixed reply, or fails with an API error.
    pub struct StubGenerator {
        reply: Option<String>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl StubGenerator {
        pub fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                reply: None,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().ok_or(GenerationError::Api {
                status: 500,
                message: "stub failure".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::StubGenerator;
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> RecordStore {
        RecordStore::new(dir.path().join("sales_data.csv"))
    }

    #[tokio::test]
    async fn test_campaign_is_generated_and_saved() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let llm = StubGenerator::replying("Subject: Meet CRM Pro");

        let record = generate_and_save(
            &llm,
            &store,
            GenerationRequest::Campaign {
                product: "CRM Pro".to_string(),
                audience: "retailers".to_string(),
                campaign_type: CampaignType::Email,
            },
        )
        .await
        .unwrap();

        assert_eq!(record.record_type, RecordType::Campaign);
        assert_eq!(record.input, "CRM Pro");
        assert_eq!(record.details, "retailers");
        assert_eq!(record.output, "Subject: Meet CRM Pro");
        assert_eq!(store.load_all().unwrap(), vec![record]);
        assert_eq!(
            llm.prompts.lock().unwrap().as_slice(),
            ["Create Email campaign for CRM Pro targeting retailers"]
        );
    }

    #[tokio::test]
    async fn test_lead_record_uses_fixed_input_label() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let llm = StubGenerator::replying("Score: 72");

        let record = generate_and_save(
            &llm,
            &store,
            GenerationRequest::Lead {
                info: "Director at Globex".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(record.input, LEAD_INPUT_LABEL);
        assert_eq!(record.details, "Director at Globex");
    }

    #[tokio::test]
    async fn test_failed_generation_saves_nothing() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let llm = StubGenerator::failing();

        let result = generate_and_save(
            &llm,
            &store,
            GenerationRequest::Pitch {
                product: "CRM Pro".to_string(),
                customer: "Acme".to_string(),
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::Generation(_))));
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_request_maps_to_record_type_and_prompt() {
        let request = GenerationRequest::Pitch {
            product: "CRM Pro".to_string(),
            customer: "Acme".to_string(),
        };
        assert_eq!(request.record_type(), RecordType::Pitch);
        assert_eq!(request.prompt(), "Create a pitch for CRM Pro to Acme");
    }
}
