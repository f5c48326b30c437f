//! Field-level validation walk

use serde_json::Value;

use crate::schema::value::is_empty_value;
use crate::schema::{FieldType, FormField, RuleKind};

use super::rules::check_rule;

/// Validates a candidate value against a field definition.
///
/// Returns the first failing message, or None when the value is accepted.
/// A field produces at most one error per call.
pub fn validate_field(field: &FormField, value: &Value) -> Option<String> {
    if field.required && required_empty(field, value) {
        return Some(required_message(field));
    }

    // Empty values pass all non-required rules.
    if is_empty_value(value) {
        return None;
    }

    for rule in &field.rules {
        if rule.kind == RuleKind::Required {
            continue;
        }
        if let Some(message) = check_rule(rule, value) {
            return Some(message);
        }
    }

    None
}

/// Checkbox values must be arrays; a non-array counts as empty for the
/// required check.
fn required_empty(field: &FormField, value: &Value) -> bool {
    match field.field_type {
        FieldType::Checkbox => is_empty_value(value) || !value.is_array(),
        _ => is_empty_value(value),
    }
}

fn required_message(field: &FormField) -> String {
    match field.field_type {
        FieldType::Select | FieldType::Radio => {
            format!("Please select an option for {}", field.label)
        }
        FieldType::Checkbox => {
            format!("Please select at least one option for {}", field.label)
        }
        _ => format!("{} is required", field.label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{RuleValue, ValidationRule};
    use serde_json::json;

    fn text_field(label: &str) -> FormField {
        FormField::new(FieldType::Text).with_id("f1").with_label(label)
    }

    #[test]
    fn test_required_empty_returns_single_error() {
        let mut field = text_field("Name");
        field.set_required(true);
        assert_eq!(validate_field(&field, &Value::Null), Some("Name is required".into()));
        assert_eq!(validate_field(&field, &json!("  ")), Some("Name is required".into()));
    }

    #[test]
    fn test_required_select_prompts_for_selection() {
        let mut field = FormField::new(FieldType::Select).with_id("f1").with_label("Country");
        field.set_required(true);
        assert_eq!(
            validate_field(&field, &Value::Null),
            Some("Please select an option for Country".into())
        );
    }

    #[test]
    fn test_required_radio_prompts_for_selection() {
        let mut field = FormField::new(FieldType::Radio).with_id("f1").with_label("Plan");
        field.set_required(true);
        assert_eq!(
            validate_field(&field, &json!("")),
            Some("Please select an option for Plan".into())
        );
    }

    #[test]
    fn test_required_checkbox_wants_at_least_one() {
        let mut field = FormField::new(FieldType::Checkbox).with_id("f1").with_label("Toppings");
        field.set_required(true);
        let expected = Some("Please select at least one option for Toppings".into());
        assert_eq!(validate_field(&field, &json!([])), expected);
        // Non-array values count as empty for checkboxes.
        assert_eq!(validate_field(&field, &json!("pepperoni")), expected);
        assert_eq!(validate_field(&field, &json!(["pepperoni"])), None);
    }

    #[test]
    fn test_optional_empty_passes_all_rules() {
        let mut field = text_field("Email");
        field.add_rule(ValidationRule::new(
            RuleKind::MinLength,
            Some(RuleValue::Number(5.0)),
            "too short",
        ));
        field.add_rule(ValidationRule::new(RuleKind::Email, None, "bad email"));
        assert_eq!(validate_field(&field, &json!("")), None);
        assert_eq!(validate_field(&field, &Value::Null), None);
    }

    #[test]
    fn test_rules_walk_in_stored_order() {
        let mut field = text_field("Code");
        field.add_rule(ValidationRule::new(
            RuleKind::MinLength,
            Some(RuleValue::Number(4.0)),
            "first failure",
        ));
        field.add_rule(ValidationRule::new(
            RuleKind::Pattern,
            Some(RuleValue::Text("^[A-Z]+$".into())),
            "second failure",
        ));
        // Both rules fail; the first one in stored order wins.
        assert_eq!(validate_field(&field, &json!("ab")), Some("first failure".into()));
    }

    #[test]
    fn test_required_rule_in_list_is_skipped() {
        let mut field = text_field("Name");
        field.add_rule(ValidationRule::new(RuleKind::Required, None, "custom required"));
        // Field is not required via the toggle, value is non-empty.
        assert_eq!(validate_field(&field, &json!("x")), None);
    }

    #[test]
    fn test_inapplicable_rule_applies_literally() {
        // minLength attached to a number field: not checked for non-string
        // values, checked literally for strings.
        let mut field = FormField::new(FieldType::Number).with_id("f1").with_label("Qty");
        field.add_rule(ValidationRule::new(
            RuleKind::MinLength,
            Some(RuleValue::Number(3.0)),
            "too short",
        ));
        assert_eq!(validate_field(&field, &json!(7)), None);
        assert_eq!(validate_field(&field, &json!("42")), Some("too short".into()));
    }

    #[test]
    fn test_revalidation_is_idempotent() {
        let mut field = text_field("Name");
        field.set_required(true);
        field.add_rule(ValidationRule::new(
            RuleKind::MaxLength,
            Some(RuleValue::Number(3.0)),
            "too long",
        ));
        let value = json!("abcd");
        let first = validate_field(&field, &value);
        for _ in 0..100 {
            assert_eq!(validate_field(&field, &value), first);
        }
    }
}
