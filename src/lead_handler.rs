use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::errors::AppError;
use crate::handlers::AppState;
use crate::lead_models::{parse_lead_body, LeadCreatedResponse};
use crate::transform;

/// Webflow lead intake handler.
///
/// Flow:
/// 1. Require a configured Sollit credential.
/// 2. Parse the body (JSON object, or a JSON-encoded string carrying one).
/// 3. Strict mode only: reject submissions missing the contact fields.
/// 4. Normalize into the Sollit person payload.
/// 5. Forward to Sollit and wrap its response for the caller.
///
/// The body goes through [`parse_lead_body`] instead of the `Json` extractor
/// because the form builder sometimes double-encodes submissions.
pub async fn create_lead(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<LeadCreatedResponse>), AppError> {
    tracing::info!("Received lead submission ({} bytes)", body.len());

    let client = state.sollit.as_ref().ok_or(AppError::MissingConfig)?;

    let raw = parse_lead_body(&body)?;

    if state.config.require_contact_fields {
        let missing = transform::missing_required_fields(&raw);
        if !missing.is_empty() {
            return Err(AppError::Validation(missing));
        }
    }

    let payload = transform::normalize(&raw);
    tracing::debug!(
        "Normalized lead: product={}, request_type={}, business={}",
        payload.product_type,
        payload.request_type,
        payload.client_status_id.is_some()
    );

    let sollit_response = client.create_person(&payload).await?;

    Ok((
        StatusCode::OK,
        Json(LeadCreatedResponse {
            message: "Lead created successfully".to_string(),
            sollit_response,
        }),
    ))
}

/// CORS preflight for the lead route: 200 with no body.
pub async fn lead_preflight() -> StatusCode {
    StatusCode::OK
}

/// Fallback for any other method on the lead route.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
