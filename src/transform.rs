//! Lead normalization: raw form input -> fixed Sollit person payload.
//!
//! Everything here is pure and total. Malformed or missing fields degrade to
//! defaults, never to errors; the output is fully determined by the input and
//! the two lookup tables below.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::lead_models::{LeadPayload, RawLeadInput};

/// Sollit client-status marker for business (non-consumer) submitters.
pub const BUSINESS_CLIENT_STATUS_ID: u32 = 212860;

/// Product tag assumed when the form does not send one.
pub const DEFAULT_PRODUCT_TYPE: &str = "solar_panel";

/// Namespace under which the extension bag travels to Sollit.
pub const EXTRA_FIELDS_KEY: &str = "webflow-extra";

/// Fixed source marker identifying these submissions downstream.
pub const SOURCE_SITE: &str = "Webflow formulier";

/// Formats a housing-type tag into its display label.
///
/// Known tags are matched case-insensitively after trimming; unknown
/// non-empty values pass through unchanged (original casing). Empty input
/// stays empty, which later drops the key from the extension bag.
pub fn format_housing_type(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    match value.trim().to_lowercase().as_str() {
        "vrijstaand" => "Vrijstaand".to_string(),
        "2-onder-1-kap" => "2-onder-1-kap".to_string(),
        "hoekwoning" => "Hoekwoning".to_string(),
        "appartement" => "Appartement".to_string(),
        _ => value.to_string(),
    }
}

/// Formats a grid-connection tag into its display label.
///
/// Same scheme as [`format_housing_type`]; "weet-ik-niet" maps to the label
/// "Onbekend".
pub fn format_grid_connection(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }
    match value.trim().to_lowercase().as_str() {
        "1-fase" => "1-fase".to_string(),
        "3-fase" => "3-fase".to_string(),
        "weet-ik-niet" => "Onbekend".to_string(),
        _ => value.to_string(),
    }
}

/// Coerces a loosely-typed JSON value to a number.
///
/// Accepts JSON numbers, numeric strings (trimmed) and booleans (the form
/// occasionally sends the business checkbox as true/false). Anything else,
/// including absent values and non-finite parses like "nan", yields `None`
/// so callers pick their own default.
pub fn coerce_number(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Maps a normalized product tag to the Sollit request-type code.
///
/// Unrecognized tags map to 0. Independent of the form's business flag,
/// which only ever drives `client_status_id`.
pub fn product_request_code(product_type: &str) -> i64 {
    match product_type {
        "solar_panel" => 4000,
        "battery" => 6920,
        "charge_station" => 4408,
        _ => 0,
    }
}

/// Builds the Sollit person payload from a raw form submission.
pub fn normalize(raw: &RawLeadInput) -> LeadPayload {
    let product_type = raw
        .product_type
        .as_deref()
        .filter(|tag| !tag.is_empty())
        .unwrap_or(DEFAULT_PRODUCT_TYPE)
        .to_string();

    let formatted_type_woning = raw
        .type_woning
        .as_deref()
        .map(format_housing_type)
        .unwrap_or_default();
    let formatted_net_connection = raw
        .net_connection
        .as_deref()
        .map(format_grid_connection)
        .unwrap_or_default();

    let mut extra_fields = BTreeMap::new();
    if !formatted_type_woning.is_empty() {
        extra_fields.insert("type-woning".to_string(), formatted_type_woning);
    }
    if !formatted_net_connection.is_empty() {
        extra_fields.insert("net-aansluiting".to_string(), formatted_net_connection);
    }

    // Business checkbox only ever sets the client-status marker; it is left
    // absent (not zero) for consumer submissions.
    let client_status_id = match coerce_number(raw.business_flag.as_ref()) {
        Some(flag) if flag == 1.0 => Some(BUSINESS_CLIENT_STATUS_ID),
        _ => None,
    };

    LeadPayload {
        skip_postcode_check: true,
        match_person_on_address: false,

        postcode: raw.postcode.clone().unwrap_or_default(),
        number: raw.number.clone().unwrap_or_default(),
        first_name: raw.first_name.clone().unwrap_or_default(),
        last_name: raw.last_name.clone().unwrap_or_default(),
        email: raw.email.clone().unwrap_or_default(),
        telephone: raw.telephone.clone().unwrap_or_default(),
        mobile: raw.mobile.clone().unwrap_or_default(),
        comments: raw.comments.clone().unwrap_or_default(),
        jaarlijks_verbruik: coerce_number(raw.jaarlijks_verbruik.as_ref()).unwrap_or(0.0),

        person_product_types: vec![product_type.clone()],
        person_product_types_string: product_type.clone(),
        request_type: product_request_code(&product_type),
        product_type,

        company_name: raw.company_name.clone().unwrap_or_default(),
        client_status_id,

        extra_fields_key: EXTRA_FIELDS_KEY.to_string(),
        extra_fields,

        source_site: SOURCE_SITE.to_string(),
        source_site_url: String::new(),
    }
}

/// Names the required contact fields missing from a submission.
///
/// Only consulted in strict mode; lenient mode defaults these to empty
/// strings like every other field.
pub fn missing_required_fields(raw: &RawLeadInput) -> Vec<&'static str> {
    let mut missing = Vec::new();
    for (name, value) in [
        ("postcode", &raw.postcode),
        ("number", &raw.number),
        ("first_name", &raw.first_name),
        ("last_name", &raw.last_name),
    ] {
        if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
            missing.push(name);
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(patch: Value) -> RawLeadInput {
        serde_json::from_value(patch).unwrap()
    }

    #[test]
    fn test_housing_type_known_any_casing() {
        assert_eq!(format_housing_type("VRIJSTAAND"), "Vrijstaand");
        assert_eq!(format_housing_type("  hoekwoning "), "Hoekwoning");
        assert_eq!(format_housing_type("2-Onder-1-Kap"), "2-onder-1-kap");
        assert_eq!(format_housing_type("Appartement"), "Appartement");
    }

    #[test]
    fn test_housing_type_unknown_passes_through() {
        assert_eq!(format_housing_type("loft"), "loft");
        assert_eq!(format_housing_type("Tiny House"), "Tiny House");
    }

    #[test]
    fn test_housing_type_empty() {
        assert_eq!(format_housing_type(""), "");
    }

    #[test]
    fn test_grid_connection_labels() {
        assert_eq!(format_grid_connection("1-fase"), "1-fase");
        assert_eq!(format_grid_connection("3-FASE"), "3-fase");
        assert_eq!(format_grid_connection("weet-ik-niet"), "Onbekend");
        assert_eq!(format_grid_connection("2-fase"), "2-fase");
    }

    #[test]
    fn test_extension_bag_omits_empty_keys() {
        let payload = normalize(&RawLeadInput::default());
        assert!(payload.extra_fields.is_empty());

        let payload = normalize(&raw(json!({"type_woning": "vrijstaand"})));
        assert_eq!(
            payload.extra_fields.get("type-woning").map(String::as_str),
            Some("Vrijstaand")
        );
        assert!(!payload.extra_fields.contains_key("net-aansluiting"));
    }

    #[test]
    fn test_extension_bag_both_keys() {
        let payload = normalize(&raw(json!({
            "type_woning": "hoekwoning",
            "net_connection": "weet-ik-niet"
        })));
        assert_eq!(payload.extra_fields.len(), 2);
        assert_eq!(payload.extra_fields["type-woning"], "Hoekwoning");
        assert_eq!(payload.extra_fields["net-aansluiting"], "Onbekend");
    }

    #[test]
    fn test_product_type_defaults_to_solar_panel() {
        let payload = normalize(&RawLeadInput::default());
        assert_eq!(payload.product_type, "solar_panel");
        assert_eq!(payload.person_product_types, vec!["solar_panel"]);
        assert_eq!(payload.person_product_types_string, "solar_panel");
        assert_eq!(payload.request_type, 4000);
    }

    #[test]
    fn test_product_type_empty_string_defaults() {
        let payload = normalize(&raw(json!({"product_type": ""})));
        assert_eq!(payload.product_type, "solar_panel");
    }

    #[test]
    fn test_request_code_per_product() {
        assert_eq!(product_request_code("solar_panel"), 4000);
        assert_eq!(product_request_code("battery"), 6920);
        assert_eq!(product_request_code("charge_station"), 4408);
        assert_eq!(product_request_code("heat_pump"), 0);
    }

    #[test]
    fn test_business_flag_sets_client_status() {
        let payload = normalize(&raw(json!({"request_type": 1})));
        assert_eq!(payload.client_status_id, Some(BUSINESS_CLIENT_STATUS_ID));

        let payload = normalize(&raw(json!({"request_type": "1"})));
        assert_eq!(payload.client_status_id, Some(BUSINESS_CLIENT_STATUS_ID));
    }

    #[test]
    fn test_business_flag_unset_otherwise() {
        assert_eq!(normalize(&raw(json!({"request_type": 0}))).client_status_id, None);
        assert_eq!(normalize(&raw(json!({"request_type": "2"}))).client_status_id, None);
        assert_eq!(normalize(&RawLeadInput::default()).client_status_id, None);
    }

    #[test]
    fn test_usage_coercion() {
        assert_eq!(normalize(&raw(json!({"jaarlijks_verbruik": 3500}))).jaarlijks_verbruik, 3500.0);
        assert_eq!(
            normalize(&raw(json!({"jaarlijks_verbruik": " 4200 "}))).jaarlijks_verbruik,
            4200.0
        );
        assert_eq!(normalize(&raw(json!({"jaarlijks_verbruik": "abc"}))).jaarlijks_verbruik, 0.0);
        assert_eq!(normalize(&raw(json!({"jaarlijks_verbruik": "nan"}))).jaarlijks_verbruik, 0.0);
        assert_eq!(normalize(&RawLeadInput::default()).jaarlijks_verbruik, 0.0);
    }

    #[test]
    fn test_routing_metadata_constants() {
        let payload = normalize(&RawLeadInput::default());
        assert!(payload.skip_postcode_check);
        assert!(!payload.match_person_on_address);
        assert_eq!(payload.extra_fields_key, "webflow-extra");
        assert_eq!(payload.source_site, "Webflow formulier");
        assert_eq!(payload.source_site_url, "");
    }

    #[test]
    fn test_missing_required_fields() {
        let missing = missing_required_fields(&raw(json!({"postcode": "1234AB"})));
        assert_eq!(missing, vec!["number", "first_name", "last_name"]);

        let missing = missing_required_fields(&raw(json!({
            "postcode": "1234AB",
            "number": "10",
            "first_name": "Jan",
            "last_name": "Jansen"
        })));
        assert!(missing.is_empty());

        // Whitespace-only counts as missing.
        let missing = missing_required_fields(&raw(json!({"postcode": "  "})));
        assert!(missing.contains(&"postcode"));
    }
}
