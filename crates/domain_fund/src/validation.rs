//! Fund validation rules
//!
//! This module turns an untyped JSON candidate into a [`ValidFund`],
//! reporting every invalid field in a single pass.
//!
//! # Validation Rules
//!
//! ## Text fields
//! - `fund_id` (max 50 characters), `fund_name` and `fund_manager_name`
//!   (max 255 characters), `fund_description` (unbounded)
//! - Surrounding whitespace is trimmed; blank values are rejected
//! - Over-long values are rejected, never truncated
//!
//! ## Decimal fields
//! - `fund_nav`: at most 20 digits, 2 decimal places, `>= 0.00`
//! - `fund_performance`: at most 7 digits, 2 decimal places,
//!   between `-100.00` and `1000.00` inclusive
//! - Precision is checked on the value as written, using exact
//!   fixed-point arithmetic
//!
//! ## Dates
//! - `date_of_creation` must be an ISO 8601 calendar date (`YYYY-MM-DD`)

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::fund::{
    Fund, FundId, FUND_ID_MAX_LENGTH, FUND_MANAGER_NAME_MAX_LENGTH, FUND_NAME_MAX_LENGTH,
};

/// Field names as they appear in requests and error maps
pub mod fields {
    pub const FUND_ID: &str = "fund_id";
    pub const FUND_NAME: &str = "fund_name";
    pub const FUND_MANAGER_NAME: &str = "fund_manager_name";
    pub const FUND_DESCRIPTION: &str = "fund_description";
    pub const FUND_NAV: &str = "fund_nav";
    pub const DATE_OF_CREATION: &str = "date_of_creation";
    pub const FUND_PERFORMANCE: &str = "fund_performance";
    /// Key for errors that concern the payload as a whole
    pub const NON_FIELD_ERRORS: &str = "non_field_errors";
}

const REQUIRED: &str = "This field is required.";
const NULL: &str = "This field may not be null.";
const BLANK: &str = "This field may not be blank.";
const INVALID_STRING: &str = "Not a valid string.";
const NULL_CHARACTERS: &str = "Null characters are not allowed.";
const INVALID_NUMBER: &str = "A valid number is required.";
const NUMBER_TOO_LONG: &str = "String value too large.";
const INVALID_DATE: &str = "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";
const DATETIME_NOT_DATE: &str = "Expected a date but got a datetime.";

/// Naive datetime layouts recognised as "a datetime, not a date"
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Message reported when an update payload names a different fund
pub const FUND_ID_MISMATCH: &str = "Fund ID does not match the fund being updated.";

/// Message reported when a fund with the same identifier already exists
pub const FUND_ID_TAKEN: &str = "fund with this Fund ID already exists.";

/// Longest numeric string accepted before parsing is attempted
const MAX_NUMBER_STRING_LENGTH: usize = 1000;

/// Per-field validation messages
///
/// Serializes as `{"field": ["message", ...]}` with fields in
/// lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Creates an empty error set
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an error set with one message for one field
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Creates an error set for a payload-level problem
    pub fn non_field(message: impl Into<String>) -> Self {
        Self::single(fields::NON_FIELD_ERRORS, message)
    }

    /// Adds a message for a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Records the outcome of checking one field, returning the value on success
    pub fn capture<T>(&mut self, field: &str, outcome: Result<T, Vec<String>>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(messages) => {
                self.0.entry(field.to_string()).or_default().extend(messages);
                None
            }
        }
    }

    /// Returns true when no field has errors
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with errors
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the field has at least one message
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages recorded for a field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Names of the fields with errors
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Consumes the error set, returning the underlying map
    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Precision and range constraints for a fixed-point field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalRule {
    /// Maximum number of significant digits
    pub max_digits: u32,
    /// Maximum (and stored) number of fractional digits
    pub decimal_places: u32,
    /// Inclusive lower bound
    pub min_value: Option<Decimal>,
    /// Inclusive upper bound
    pub max_value: Option<Decimal>,
}

impl DecimalRule {
    /// Rule for `fund_nav`
    pub fn fund_nav() -> Self {
        Self {
            max_digits: 20,
            decimal_places: 2,
            min_value: Some(dec!(0.00)),
            max_value: None,
        }
    }

    /// Rule for `fund_performance`
    pub fn fund_performance() -> Self {
        Self {
            max_digits: 7,
            decimal_places: 2,
            min_value: Some(dec!(-100.00)),
            max_value: Some(dec!(1000.00)),
        }
    }

    /// Digits allowed before the decimal point
    pub fn max_whole_digits(&self) -> u32 {
        self.max_digits - self.decimal_places
    }

    /// Parses a JSON string or number and checks it against the rule
    pub fn parse(&self, value: &Value) -> Result<Decimal, Vec<String>> {
        let text = match value {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return Err(vec![INVALID_NUMBER.to_string()]),
        };

        if text.len() > MAX_NUMBER_STRING_LENGTH {
            return Err(vec![NUMBER_TOO_LONG.to_string()]);
        }

        let parsed = match parse_decimal(&text) {
            Some(parsed) => parsed,
            // A well-formed numeral only fails to parse when it exceeds 28 digits.
            None if is_plain_numeral(&text) => return Err(vec![self.max_digits_message()]),
            None => return Err(vec![INVALID_NUMBER.to_string()]),
        };

        self.check(parsed).map_err(|message| vec![message])
    }

    /// Checks precision, then range, returning the value rescaled to
    /// `decimal_places`
    pub fn check(&self, value: Decimal) -> Result<Decimal, String> {
        let (total_digits, decimal_places) = digit_profile(&value);
        let whole_digits = total_digits.saturating_sub(decimal_places);

        if total_digits > self.max_digits {
            return Err(self.max_digits_message());
        }
        if decimal_places > self.decimal_places {
            return Err(format!(
                "Ensure that there are no more than {} decimal places.",
                self.decimal_places
            ));
        }
        if whole_digits > self.max_whole_digits() {
            return Err(format!(
                "Ensure that there are no more than {} digits before the decimal point.",
                self.max_whole_digits()
            ));
        }

        if let Some(min) = self.min_value {
            if value < min {
                return Err(format!("Ensure this value is greater than or equal to {}.", min));
            }
        }
        if let Some(max) = self.max_value {
            if value > max {
                return Err(format!("Ensure this value is less than or equal to {}.", max));
            }
        }

        let mut stored = value;
        stored.rescale(self.decimal_places);
        Ok(stored)
    }

    fn max_digits_message(&self) -> String {
        format!(
            "Ensure that there are no more than {} digits in total.",
            self.max_digits
        )
    }
}

/// A fund record that has passed every field check
///
/// Only [`FundValidator`] (or `TryFrom<Fund>`) produces values of this
/// type, so storage adapters never see unchecked data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidFund(Fund);

impl ValidFund {
    /// Identifier of the validated fund
    pub fn fund_id(&self) -> &FundId {
        &self.0.fund_id
    }

    /// Borrows the validated record
    pub fn as_fund(&self) -> &Fund {
        &self.0
    }

    /// Consumes the wrapper, returning the record
    pub fn into_inner(self) -> Fund {
        self.0
    }
}

impl TryFrom<Fund> for ValidFund {
    type Error = FieldErrors;

    fn try_from(fund: Fund) -> Result<Self, Self::Error> {
        let candidate = serde_json::to_value(&fund)
            .map_err(|e| FieldErrors::non_field(e.to_string()))?;
        FundValidator::validate(&candidate)
    }
}

/// Validator for fund candidates
///
/// # Examples
///
/// ```rust
/// use domain_fund::validation::FundValidator;
/// use serde_json::json;
///
/// let candidate = json!({
///     "fund_id": "FUND001",
///     "fund_name": "Test Fund",
///     "fund_manager_name": "John Doe",
///     "fund_description": "A test fund.",
///     "fund_nav": "-10.00",
///     "date_of_creation": "2023-01-01",
///     "fund_performance": "1500.00"
/// });
///
/// let errors = FundValidator::validate(&candidate).unwrap_err();
/// assert!(errors.contains("fund_nav"));
/// assert!(errors.contains("fund_performance"));
/// ```
pub struct FundValidator;

impl FundValidator {
    /// Validates a full fund candidate
    ///
    /// # Arguments
    ///
    /// * `candidate` - The request payload
    ///
    /// # Returns
    ///
    /// The validated fund, or every field error found
    pub fn validate(candidate: &Value) -> Result<ValidFund, FieldErrors> {
        let object = match candidate {
            Value::Object(object) => object,
            other => {
                return Err(FieldErrors::non_field(format!(
                    "Invalid data. Expected an object, but got {}.",
                    json_type_name(other)
                )))
            }
        };

        let mut errors = FieldErrors::new();

        let fund_id = errors.capture(
            fields::FUND_ID,
            required(object, fields::FUND_ID).and_then(|v| text_field(v, Some(FUND_ID_MAX_LENGTH))),
        );
        let fund_name = errors.capture(
            fields::FUND_NAME,
            required(object, fields::FUND_NAME)
                .and_then(|v| text_field(v, Some(FUND_NAME_MAX_LENGTH))),
        );
        let fund_manager_name = errors.capture(
            fields::FUND_MANAGER_NAME,
            required(object, fields::FUND_MANAGER_NAME)
                .and_then(|v| text_field(v, Some(FUND_MANAGER_NAME_MAX_LENGTH))),
        );
        let fund_description = errors.capture(
            fields::FUND_DESCRIPTION,
            required(object, fields::FUND_DESCRIPTION).and_then(|v| text_field(v, None)),
        );
        let fund_nav = errors.capture(
            fields::FUND_NAV,
            required(object, fields::FUND_NAV).and_then(|v| DecimalRule::fund_nav().parse(v)),
        );
        let date_of_creation = errors.capture(
            fields::DATE_OF_CREATION,
            required(object, fields::DATE_OF_CREATION).and_then(date_field),
        );
        let fund_performance = errors.capture(
            fields::FUND_PERFORMANCE,
            required(object, fields::FUND_PERFORMANCE)
                .and_then(|v| DecimalRule::fund_performance().parse(v)),
        );

        match (
            fund_id,
            fund_name,
            fund_manager_name,
            fund_description,
            fund_nav,
            date_of_creation,
            fund_performance,
        ) {
            (
                Some(fund_id),
                Some(fund_name),
                Some(fund_manager_name),
                Some(fund_description),
                Some(fund_nav),
                Some(date_of_creation),
                Some(fund_performance),
            ) => Ok(ValidFund(Fund {
                fund_id: FundId::new(fund_id),
                fund_name,
                fund_manager_name,
                fund_description,
                fund_nav,
                date_of_creation,
                fund_performance,
            })),
            _ => {
                debug!(invalid_fields = errors.len(), "Fund candidate rejected");
                Err(errors)
            }
        }
    }

    /// Validates a full replacement for the fund stored under `id`
    ///
    /// The payload must name the same fund; a different `fund_id` is
    /// reported alongside any other field errors.
    pub fn validate_replacement(id: &FundId, candidate: &Value) -> Result<ValidFund, FieldErrors> {
        match Self::validate(candidate) {
            Ok(valid) if valid.fund_id() == id => Ok(valid),
            Ok(_) => Err(FieldErrors::single(fields::FUND_ID, FUND_ID_MISMATCH)),
            Err(mut errors) => {
                let named = candidate
                    .get(fields::FUND_ID)
                    .and_then(|v| text_field(v, Some(FUND_ID_MAX_LENGTH)).ok());
                if let Some(named) = named {
                    if named != id.as_str() {
                        errors.add(fields::FUND_ID, FUND_ID_MISMATCH);
                    }
                }
                Err(errors)
            }
        }
    }
}

fn required<'a>(object: &'a Map<String, Value>, field: &str) -> Result<&'a Value, Vec<String>> {
    match object.get(field) {
        None => Err(vec![REQUIRED.to_string()]),
        Some(Value::Null) => Err(vec![NULL.to_string()]),
        Some(value) => Ok(value),
    }
}

fn text_field(value: &Value, max_length: Option<usize>) -> Result<String, Vec<String>> {
    let raw = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return Err(vec![INVALID_STRING.to_string()]),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(vec![BLANK.to_string()]);
    }

    let mut errors = Vec::new();
    if let Some(max) = max_length {
        if trimmed.chars().count() > max {
            errors.push(format!("Ensure this field has no more than {} characters.", max));
        }
    }
    if trimmed.contains('\0') {
        errors.push(NULL_CHARACTERS.to_string());
    }

    if errors.is_empty() {
        Ok(trimmed.to_string())
    } else {
        Err(errors)
    }
}

fn date_field(value: &Value) -> Result<NaiveDate, Vec<String>> {
    let Value::String(text) = value else {
        return Err(vec![INVALID_DATE.to_string()]);
    };
    let text = text.trim();

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date);
    }

    let is_datetime = DateTime::parse_from_rfc3339(text).is_ok()
        || DATETIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(text, format).is_ok());
    if is_datetime {
        return Err(vec![DATETIME_NOT_DATE.to_string()]);
    }

    Err(vec![INVALID_DATE.to_string()])
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text).ok().or_else(|| {
        if text.contains(|c: char| c == 'e' || c == 'E') {
            Decimal::from_scientific(text).ok()
        } else {
            None
        }
    })
}

fn is_plain_numeral(text: &str) -> bool {
    let body = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);

    body.chars().any(|c| c.is_ascii_digit())
        && body.chars().all(|c| c.is_ascii_digit() || c == '.')
        && body.chars().filter(|c| *c == '.').count() <= 1
}

/// Returns `(total_digits, decimal_places)` for a value as written.
///
/// Leading zeros of a pure fraction count toward both totals, so
/// `0.05` has two digits and two decimal places.
fn digit_profile(value: &Decimal) -> (u32, u32) {
    let scale = value.scale();
    let coefficient = value.mantissa().unsigned_abs();
    let digits = if coefficient == 0 { 1 } else { coefficient.ilog10() + 1 };

    if scale == 0 {
        (digits, 0)
    } else if digits > scale {
        (digits, scale)
    } else {
        (scale, scale)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate() -> Value {
        json!({
            "fund_id": "FUND001",
            "fund_name": "Test Fund",
            "fund_manager_name": "John Doe",
            "fund_description": "A test fund for unit testing.",
            "fund_nav": "100.00",
            "date_of_creation": "2023-01-01",
            "fund_performance": "10.00"
        })
    }

    #[test]
    fn test_valid_candidate() {
        let valid = FundValidator::validate(&candidate()).unwrap();
        assert_eq!(valid.fund_id().as_str(), "FUND001");
        assert_eq!(valid.as_fund().fund_nav, dec!(100.00));
    }

    #[test]
    fn test_digit_profile() {
        assert_eq!(digit_profile(&dec!(100.00)), (5, 2));
        assert_eq!(digit_profile(&dec!(0.00)), (2, 2));
        assert_eq!(digit_profile(&dec!(0.05)), (2, 2));
        assert_eq!(digit_profile(&dec!(1000)), (4, 0));
        assert_eq!(digit_profile(&dec!(-12.5)), (3, 1));
    }

    #[test]
    fn test_decimals_rescaled_to_two_places() {
        let mut payload = candidate();
        payload["fund_nav"] = json!("100");
        payload["fund_performance"] = json!(10.5);

        let fund = FundValidator::validate(&payload).unwrap().into_inner();
        assert_eq!(fund.fund_nav.to_string(), "100.00");
        assert_eq!(fund.fund_performance.to_string(), "10.50");
    }

    #[test]
    fn test_text_trimmed() {
        let mut payload = candidate();
        payload["fund_name"] = json!("  Padded Fund  ");

        let fund = FundValidator::validate(&payload).unwrap().into_inner();
        assert_eq!(fund.fund_name, "Padded Fund");
    }

    #[test]
    fn test_non_object_payload() {
        let errors = FundValidator::validate(&json!([1, 2])).unwrap_err();
        assert_eq!(
            errors.get(fields::NON_FIELD_ERRORS).unwrap(),
            ["Invalid data. Expected an object, but got array."]
        );
    }

    #[test]
    fn test_field_errors_display() {
        let mut errors = FieldErrors::new();
        errors.add("fund_nav", "bad");
        errors.add("fund_id", "missing");
        assert_eq!(errors.to_string(), "fund_id: missing; fund_nav: bad");
    }

    #[test]
    fn test_replacement_with_other_id() {
        let err = FundValidator::validate_replacement(&FundId::new("FUND002"), &candidate())
            .unwrap_err();
        assert_eq!(err.get(fields::FUND_ID).unwrap(), [FUND_ID_MISMATCH]);
    }

    #[test]
    fn test_replacement_mismatch_reported_with_other_errors() {
        let mut payload = candidate();
        payload["fund_nav"] = json!("-1.00");

        let err = FundValidator::validate_replacement(&FundId::new("FUND002"), &payload)
            .unwrap_err();
        assert!(err.contains(fields::FUND_ID));
        assert!(err.contains(fields::FUND_NAV));
    }
}
