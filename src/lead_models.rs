use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;

/// Raw lead submission from the Webflow form.
///
/// Every field is optional; absent values default during normalization
/// instead of erroring. `jaarlijks_verbruik` and the business flag accept
/// both string and number encodings, because the form builder is not
/// consistent about which one it sends.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawLeadInput {
    pub postcode: Option<String>,
    pub number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub mobile: Option<String>,

    /// Annual energy usage in kWh, string or number.
    pub jaarlijks_verbruik: Option<Value>,
    pub comments: Option<String>,

    /// 0/1 business-checkbox from the form. On the wire this arrives as
    /// `request_type`, which is NOT the request-type code sent to Sollit -
    /// that one is derived from the product tag. Kept apart here so the two
    /// can never be confused.
    #[serde(rename = "request_type")]
    pub business_flag: Option<Value>,
    pub company_name: Option<String>,

    /// "solar_panel" / "battery" / "charge_station".
    pub product_type: Option<String>,
    /// Housing-type tag, e.g. "vrijstaand" or "hoekwoning".
    pub type_woning: Option<String>,
    /// "1-fase" / "3-fase" / "weet-ik-niet".
    pub net_connection: Option<String>,
}

/// Parses an inbound request body into a `RawLeadInput`.
///
/// Accepts either a JSON object or a JSON string containing an encoded
/// object (some form integrations double-encode the body). Anything else is
/// an `InvalidBody` error.
pub fn parse_lead_body(body: &[u8]) -> Result<RawLeadInput, AppError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::InvalidBody(format!("not valid JSON: {}", e)))?;

    let value = match value {
        Value::String(inner) => serde_json::from_str(&inner)
            .map_err(|e| AppError::InvalidBody(format!("encoded body is not valid JSON: {}", e)))?,
        other => other,
    };

    if !value.is_object() {
        return Err(AppError::InvalidBody("body is not a JSON object".to_string()));
    }

    serde_json::from_value(value)
        .map_err(|e| AppError::InvalidBody(format!("unexpected field type: {}", e)))
}

/// Fixed-shape person payload sent to the Sollit API.
///
/// Wire names match what Sollit expects; `client_status_id` is omitted
/// entirely when unset (absent, not null).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeadPayload {
    /// Tells Sollit to accept the address without postcode verification.
    pub skip_postcode_check: bool,
    /// Tells Sollit not to deduplicate persons by address.
    pub match_person_on_address: bool,

    pub postcode: String,
    pub number: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub telephone: String,
    pub mobile: String,
    pub comments: String,
    pub jaarlijks_verbruik: f64,

    /// Normalized product tag, echoed three ways because the Sollit schema
    /// historically supports both scalar and collection representations.
    pub product_type: String,
    pub person_product_types: Vec<String>,
    pub person_product_types_string: String,

    /// Numeric product/request code for Sollit (4000/6920/4408, 0 unknown).
    pub request_type: i64,

    pub company_name: String,
    /// Business-status marker, set only when the form's business flag is 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_status_id: Option<u32>,

    pub extra_fields_key: String,
    /// Supplementary fields ("type-woning", "net-aansluiting"); only keys
    /// with non-empty formatted values are present.
    pub extra_fields: BTreeMap<String, String>,

    pub source_site: String,
    pub source_site_url: String,
}

/// Response sent back to the form on success.
#[derive(Debug, Serialize)]
pub struct LeadCreatedResponse {
    pub message: String,
    #[serde(rename = "sollitResponse")]
    pub sollit_response: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_object_body() {
        let body = r#"{"postcode": "1234AB", "first_name": "Jan", "request_type": 1}"#;
        let raw = parse_lead_body(body.as_bytes()).unwrap();
        assert_eq!(raw.postcode.as_deref(), Some("1234AB"));
        assert_eq!(raw.first_name.as_deref(), Some("Jan"));
        assert_eq!(raw.business_flag, Some(json!(1)));
    }

    #[test]
    fn test_parse_double_encoded_body() {
        let inner = r#"{"postcode":"1234AB","number":"10"}"#;
        let body = serde_json::to_string(inner).unwrap();
        let raw = parse_lead_body(body.as_bytes()).unwrap();
        assert_eq!(raw.postcode.as_deref(), Some("1234AB"));
        assert_eq!(raw.number.as_deref(), Some("10"));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse_lead_body(b"{not json"),
            Err(AppError::InvalidBody(_))
        ));
    }

    #[test]
    fn test_parse_encoded_garbage() {
        let body = serde_json::to_string("still not json").unwrap();
        assert!(matches!(
            parse_lead_body(body.as_bytes()),
            Err(AppError::InvalidBody(_))
        ));
    }

    #[test]
    fn test_parse_non_object() {
        assert!(matches!(
            parse_lead_body(b"[1, 2, 3]"),
            Err(AppError::InvalidBody(_))
        ));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let body = r#"{"postcode": "1234AB", "utm_source": "google"}"#;
        assert!(parse_lead_body(body.as_bytes()).is_ok());
    }

    #[test]
    fn test_client_status_id_omitted_when_unset() {
        let payload = crate::transform::normalize(&RawLeadInput::default());
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("client_status_id").is_none());
    }
}
