//! Default rule messages and per-type applicability
//!
//! The editor consults these when attaching a rule: which kinds a field
//! type accepts, and the default threshold and message a fresh rule
//! carries. Messages stay user-editable afterwards.

use crate::schema::{FieldType, RuleKind, RuleValue, ValidationRule};

/// Rule kinds applicable to each field type. Select/radio/checkbox/date
/// validation is handled by the required toggle alone.
pub fn available_rule_kinds(field_type: FieldType) -> &'static [RuleKind] {
    match field_type {
        FieldType::Text => &[
            RuleKind::MinLength,
            RuleKind::MaxLength,
            RuleKind::Email,
            RuleKind::Password,
            RuleKind::Pattern,
        ],
        FieldType::Number => &[RuleKind::MinValue, RuleKind::MaxValue],
        FieldType::Textarea => &[RuleKind::MinLength, RuleKind::MaxLength],
        FieldType::Select | FieldType::Radio | FieldType::Checkbox | FieldType::Date => &[],
    }
}

/// Default message for a rule kind, phrased around the field label.
pub fn default_message(kind: RuleKind, label: &str) -> String {
    match kind {
        RuleKind::Required => format!("{} is required", label),
        RuleKind::MinLength => format!("{} must be at least 1 character long", label),
        RuleKind::MaxLength => format!("{} must not exceed 100 characters", label),
        RuleKind::MinValue => format!("{} must be at least 0", label),
        RuleKind::MaxValue => format!("{} must not exceed 100", label),
        RuleKind::Email => "Please enter a valid email address".to_string(),
        RuleKind::Password => "Password must meet security requirements".to_string(),
        RuleKind::Pattern => format!("{} format is invalid", label),
    }
}

/// A fresh rule with the editor's default threshold and message.
pub fn default_rule(kind: RuleKind, label: &str) -> ValidationRule {
    let threshold = match kind {
        RuleKind::MinLength => Some(RuleValue::Number(1.0)),
        RuleKind::MaxLength => Some(RuleValue::Number(100.0)),
        RuleKind::MinValue => Some(RuleValue::Number(0.0)),
        RuleKind::MaxValue => Some(RuleValue::Number(100.0)),
        RuleKind::Pattern => Some(RuleValue::Text(String::new())),
        RuleKind::Required | RuleKind::Email | RuleKind::Password => None,
    };
    ValidationRule::new(kind, threshold, default_message(kind, label))
}
