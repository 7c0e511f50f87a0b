//! Custom Test Assertions
//!
//! Assertion helpers for JSON bodies returned by the API, giving more
//! meaningful failure messages than indexing into `serde_json::Value`.

use serde_json::Value;

use domain_fund::Fund;

/// Asserts that an error body carries at least one message for `field`
///
/// # Panics
///
/// Panics if the body is not an object or the field has no messages
pub fn assert_field_error(body: &Value, field: &str) {
    let messages = body
        .get(field)
        .and_then(Value::as_array)
        .unwrap_or_else(|| panic!("Expected errors for '{}' in {}", field, body));

    assert!(
        !messages.is_empty(),
        "Expected at least one message for '{}' in {}",
        field,
        body
    );
}

/// Asserts that an error body reports exactly `message` for `field`
pub fn assert_field_message(body: &Value, field: &str, message: &str) {
    assert_field_error(body, field);
    let found = body[field]
        .as_array()
        .map(|messages| messages.iter().any(|m| m == message))
        .unwrap_or(false);

    assert!(found, "Expected '{}' for '{}' in {}", message, field, body);
}

/// Asserts that a JSON record matches a fund field by field
pub fn assert_fund_json(body: &Value, fund: &Fund) {
    assert_eq!(body["fund_id"], fund.fund_id.as_str(), "fund_id mismatch in {}", body);
    assert_eq!(body["fund_name"], fund.fund_name.as_str(), "fund_name mismatch in {}", body);
    assert_eq!(
        body["fund_manager_name"],
        fund.fund_manager_name.as_str(),
        "fund_manager_name mismatch in {}",
        body
    );
    assert_eq!(
        body["fund_description"],
        fund.fund_description.as_str(),
        "fund_description mismatch in {}",
        body
    );
    assert_eq!(body["fund_nav"], fund.fund_nav.to_string(), "fund_nav mismatch in {}", body);
    assert_eq!(
        body["date_of_creation"],
        fund.date_of_creation.format("%Y-%m-%d").to_string(),
        "date_of_creation mismatch in {}",
        body
    );
    assert_eq!(
        body["fund_performance"],
        fund.fund_performance.to_string(),
        "fund_performance mismatch in {}",
        body
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::fixtures::FundFixtures;

    #[test]
    fn test_field_message_found() {
        let body = json!({"fund_nav": ["Ensure this value is greater than or equal to 0.00."]});
        assert_field_message(&body, "fund_nav", "Ensure this value is greater than or equal to 0.00.");
    }

    #[test]
    #[should_panic(expected = "Expected errors for 'fund_id'")]
    fn test_missing_field_panics() {
        assert_field_error(&json!({"fund_nav": ["bad"]}), "fund_id");
    }

    #[test]
    fn test_fund_json_matches_serialization() {
        let fund = FundFixtures::tech_fund();
        let body = serde_json::to_value(&fund).unwrap();
        assert_fund_json(&body, &fund);
    }
}
