//! Derived value computation
//!
//! One derived field is computed at a time, from a snapshot of the value
//! map and the full field list. Parents resolve by id; a dangling
//! reference resolves to an absent value. If any parent is empty the
//! result is the empty string — derived fields never compute partial
//! results.

use chrono::{Datelike, NaiveDate, Utc};
use serde_json::Value;

use crate::observability::Logger;
use crate::schema::value::{coerce_number, coerce_string, is_empty_value, number_value};
use crate::schema::{DerivedKind, FormField, FormValueMap};

use super::formula::{evaluate_formula, ParentBinding};

static ABSENT: Value = Value::Null;

struct Parent<'a> {
    id: &'a str,
    value: &'a Value,
    definition: Option<&'a FormField>,
}

/// Computes a derived field's value.
///
/// Returns Null for a field that is not configured as derived. Always
/// returns a value; formula failures degrade to the empty string and are
/// logged for diagnostics only.
pub fn compute_derived(field: &FormField, values: &FormValueMap, all_fields: &[FormField]) -> Value {
    let config = match (&field.derived_config, field.is_derived) {
        (Some(config), true) => config,
        _ => return Value::Null,
    };

    let parents: Vec<Parent<'_>> = config
        .parent_field_ids
        .iter()
        .map(|id| Parent {
            id: id.as_str(),
            value: values.get(id).unwrap_or(&ABSENT),
            definition: all_fields.iter().find(|f| f.id == *id),
        })
        .collect();

    if parents.iter().any(|p| is_empty_value(p.value)) {
        return Value::String(String::new());
    }

    match config.kind {
        DerivedKind::Age => compute_age(&parents),
        DerivedKind::Sum => {
            let total: f64 = parents
                .iter()
                .map(|p| coerce_number(p.value).unwrap_or(0.0))
                .sum();
            number_value(total)
        }
        DerivedKind::Concat => {
            let joined = parents
                .iter()
                .map(|p| coerce_string(p.value))
                .filter(|s| !s.trim().is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            Value::String(joined)
        }
        DerivedKind::Custom => {
            let bindings: Vec<ParentBinding> = parents
                .iter()
                .map(|p| ParentBinding {
                    id: p.id.to_string(),
                    slug: p.definition.map(|f| crate::schema::slugify(&f.label)),
                    number: coerce_number(p.value).unwrap_or(0.0),
                })
                .collect();
            match evaluate_formula(&config.formula, &bindings) {
                Ok(result) => number_value(result),
                Err(reason) => {
                    Logger::warn(
                        "FORMULA_EVAL_FAILED",
                        &[("field", field.id.as_str()), ("reason", reason.as_str())],
                    );
                    Value::String(String::new())
                }
            }
        }
        DerivedKind::Unspecified => Value::String(String::new()),
    }
}

/// Age requires exactly one parsable date parent; any malformed
/// configuration yields 0.
fn compute_age(parents: &[Parent<'_>]) -> Value {
    if parents.len() != 1 {
        return Value::from(0);
    }
    match parse_date(&coerce_string(parents[0].value)) {
        Some(birth) => Value::from(age_on(birth, Utc::now().date_naive())),
        None => Value::from(0),
    }
}

/// Whole years elapsed from `birth` to `today`, decremented before the
/// anniversary, clamped at zero.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i64 {
    let mut years = i64::from(today.year()) - i64::from(birth.year());
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years.max(0)
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DerivedFieldConfig, FieldType};
    use serde_json::json;
    use std::collections::HashMap;

    fn number_field(id: &str, label: &str) -> FormField {
        FormField::new(FieldType::Number).with_id(id).with_label(label)
    }

    fn derived_field(config: DerivedFieldConfig) -> FormField {
        let mut field = FormField::new(FieldType::Text).with_id("derived");
        field.set_derived(Some(config));
        field
    }

    fn values(entries: &[(&str, Value)]) -> FormValueMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect::<HashMap<_, _>>()
    }

    #[test]
    fn test_non_derived_field_yields_null() {
        let field = number_field("a", "A");
        assert_eq!(compute_derived(&field, &HashMap::new(), &[]), Value::Null);
    }

    #[test]
    fn test_sum_adds_coerced_parents() {
        let fields = vec![number_field("a", "A"), number_field("b", "B")];
        let field = derived_field(DerivedFieldConfig::with_parents(
            DerivedKind::Sum,
            vec!["a".into(), "b".into()],
        ));
        let vals = values(&[("a", json!("3")), ("b", json!("4.5"))]);
        assert_eq!(compute_derived(&field, &vals, &fields), json!(7.5));
    }

    #[test]
    fn test_sum_short_circuits_on_empty_parent() {
        let fields = vec![number_field("a", "A"), number_field("b", "B"), number_field("c", "C")];
        let field = derived_field(DerivedFieldConfig::with_parents(
            DerivedKind::Sum,
            vec!["a".into(), "b".into(), "c".into()],
        ));
        // "c" has no entry at all.
        let vals = values(&[("a", json!("3")), ("b", json!("4.5"))]);
        assert_eq!(compute_derived(&field, &vals, &fields), json!(""));
    }

    #[test]
    fn test_sum_treats_unparsable_parent_as_zero() {
        let fields = vec![number_field("a", "A"), number_field("b", "B")];
        let field = derived_field(DerivedFieldConfig::with_parents(
            DerivedKind::Sum,
            vec!["a".into(), "b".into()],
        ));
        let vals = values(&[("a", json!("3")), ("b", json!("many"))]);
        assert_eq!(compute_derived(&field, &vals, &fields), json!(3));
    }

    #[test]
    fn test_concat_preserves_parent_order() {
        let fields = vec![
            number_field("first", "First"),
            number_field("last", "Last"),
        ];
        let field = derived_field(DerivedFieldConfig::with_parents(
            DerivedKind::Concat,
            vec!["last".into(), "first".into()],
        ));
        let vals = values(&[("first", json!("Ada")), ("last", json!("Lovelace"))]);
        assert_eq!(compute_derived(&field, &vals, &fields), json!("Lovelace Ada"));
    }

    #[test]
    fn test_dangling_parent_reference_is_treated_as_absent() {
        let fields = vec![number_field("a", "A")];
        let field = derived_field(DerivedFieldConfig::with_parents(
            DerivedKind::Sum,
            vec!["a".into(), "ghost".into()],
        ));
        let vals = values(&[("a", json!(1))]);
        assert_eq!(compute_derived(&field, &vals, &fields), json!(""));
    }

    #[test]
    fn test_age_on_anniversary_boundaries() {
        let birth = NaiveDate::from_ymd_opt(2000, 5, 15).unwrap();
        // Exactly on the anniversary.
        assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2025, 5, 15).unwrap()), 25);
        // One day before.
        assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2025, 5, 14).unwrap()), 24);
        // One day after.
        assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2025, 5, 16).unwrap()), 25);
    }

    #[test]
    fn test_age_clamps_future_dates_to_zero() {
        let birth = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()), 0);
    }

    #[test]
    fn test_age_with_multiple_parents_is_zero() {
        let fields = vec![number_field("a", "A"), number_field("b", "B")];
        let field = derived_field(DerivedFieldConfig::with_parents(
            DerivedKind::Age,
            vec!["a".into(), "b".into()],
        ));
        let vals = values(&[("a", json!("2000-01-01")), ("b", json!("2001-01-01"))]);
        assert_eq!(compute_derived(&field, &vals, &fields), json!(0));
    }

    #[test]
    fn test_age_with_unparsable_date_is_zero() {
        let fields = vec![number_field("a", "A")];
        let field = derived_field(DerivedFieldConfig::with_parents(
            DerivedKind::Age,
            vec!["a".into()],
        ));
        let vals = values(&[("a", json!("not a date"))]);
        assert_eq!(compute_derived(&field, &vals, &fields), json!(0));
    }

    #[test]
    fn test_custom_formula_uses_ids_and_label_slugs() {
        let fields = vec![
            number_field("field_a", "Base Pay"),
            number_field("field_b", "Bonus"),
        ];
        let field = derived_field(DerivedFieldConfig::custom(
            vec!["field_a".into(), "field_b".into()],
            "base_pay + bonus * 2",
        ));
        let vals = values(&[("field_a", json!(3)), ("field_b", json!(5))]);
        assert_eq!(compute_derived(&field, &vals, &fields), json!(13));
    }

    #[test]
    fn test_custom_formula_failure_degrades_to_empty() {
        let fields = vec![number_field("a", "A")];
        let field = derived_field(DerivedFieldConfig::custom(vec!["a".into()], "a +"));
        let vals = values(&[("a", json!(1))]);
        assert_eq!(compute_derived(&field, &vals, &fields), json!(""));
    }

    #[test]
    fn test_custom_formula_injection_is_inert() {
        let fields = vec![number_field("field_a", "A")];
        let field = derived_field(DerivedFieldConfig::custom(
            vec!["field_a".into()],
            "field_a; process.exit()",
        ));
        let vals = values(&[("field_a", json!(3))]);
        // The injected call is stripped to stray punctuation, which fails
        // arithmetic parsing; the result degrades to empty, nothing runs.
        assert_eq!(compute_derived(&field, &vals, &fields), json!(""));
    }

    #[test]
    fn test_unspecified_kind_yields_empty() {
        let fields = vec![number_field("a", "A")];
        let field = derived_field(DerivedFieldConfig::with_parents(
            DerivedKind::Unspecified,
            vec!["a".into()],
        ));
        let vals = values(&[("a", json!(1))]);
        assert_eq!(compute_derived(&field, &vals, &fields), json!(""));
    }
}
