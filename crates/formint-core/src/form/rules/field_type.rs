//! Keyword-based field type inference.

use crate::models::field::FieldType;

// Category keyword tables, checked in this fixed priority order.
const DATE_KEYWORDS: [&str; 3] = ["date", "birth", "expiry"];
const TEL_KEYWORDS: [&str; 3] = ["phone", "telephone", "mobile"];
const EMAIL_KEYWORDS: [&str; 1] = ["email"];
const NUMBER_KEYWORDS: [&str; 3] = ["number", "zip", "code"];
const RADIO_KEYWORDS: [&str; 3] = ["yes", "no", "check"];

/// Infer a field's input type from its label. First matching category wins.
pub fn infer_field_type(label: &str) -> FieldType {
    let label = label.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| label.contains(k));

    if contains_any(&DATE_KEYWORDS) {
        FieldType::Date
    } else if contains_any(&TEL_KEYWORDS) {
        FieldType::Tel
    } else if contains_any(&EMAIL_KEYWORDS) {
        FieldType::Email
    } else if contains_any(&NUMBER_KEYWORDS) {
        FieldType::Number
    } else if contains_any(&RADIO_KEYWORDS) {
        FieldType::Radio
    } else {
        FieldType::Text
    }
}
