use std::time::Duration;

use serde_json::{json, Value};

use crate::errors::AppError;
use crate::lead_models::LeadPayload;

/// Client for the Sollit person-creation API.
#[derive(Clone)]
pub struct SollitClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl SollitClient {
    /// Creates a new `SollitClient`.
    ///
    /// # Arguments
    ///
    /// * `api_url` - Full URL of the Sollit person endpoint.
    /// * `api_key` - Bearer credential for the Sollit API.
    pub fn new(api_url: String, api_key: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::Transport(format!("Failed to create Sollit client: {}", e))
            })?;

        Ok(Self {
            client,
            api_url,
            api_key,
        })
    }

    /// Creates a person in Sollit from a normalized lead payload.
    ///
    /// The response body is parsed as JSON; an unparsable body degrades to an
    /// empty object rather than failing the call. A non-2xx status becomes a
    /// `SollitRejection` carrying that status and body; a failed network call
    /// becomes a `Transport` error. No retries.
    ///
    /// # Returns
    ///
    /// * `Result<Value, AppError>` - The Sollit response body.
    pub async fn create_person(&self, payload: &LeadPayload) -> Result<Value, AppError> {
        tracing::info!("Submitting lead to Sollit: {}", self.api_url);
        tracing::debug!("Payload to Sollit: {:?}", payload);

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Sollit request failed: {}", e)))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let data: Value = serde_json::from_str(&body).unwrap_or_else(|_| json!({}));

        if !status.is_success() {
            return Err(AppError::SollitRejection {
                status: status.as_u16(),
                details: data,
            });
        }

        tracing::info!("✓ Lead accepted by Sollit");
        Ok(data)
    }
}
