//! Field-level type definitions
//!
//! Supported field types (closed set):
//! - text, textarea: free-form strings
//! - number: numeric input, validated after coercion
//! - select, radio: single choice from an option list
//! - checkbox: multiple choice, value is a string array
//! - date: calendar date as a string

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Supported field types. Fixed, closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Date,
}

impl FieldType {
    /// Returns the type name for labels and messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Date => "date",
        }
    }

    /// Whether values for this type come from an option list
    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio | FieldType::Checkbox)
    }
}

/// Validation rule kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    Required,
    MinLength,
    MaxLength,
    Email,
    Password,
    MinValue,
    MaxValue,
    Pattern,
}

/// Rule threshold: numeric for length/value bounds, textual for patterns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    Number(f64),
    Text(String),
}

impl RuleValue {
    /// Numeric view of the threshold; textual thresholds parse if they can
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RuleValue::Number(n) => Some(*n),
            RuleValue::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Textual view of the threshold
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RuleValue::Text(s) => Some(s),
            RuleValue::Number(_) => None,
        }
    }
}

/// A single validation rule attached to a field.
///
/// `message` is always user-editable; it is surfaced verbatim on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(rename = "type")]
    pub kind: RuleKind,
    #[serde(rename = "value", default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<RuleValue>,
    pub message: String,
}

impl ValidationRule {
    pub fn new(kind: RuleKind, threshold: Option<RuleValue>, message: impl Into<String>) -> Self {
        Self {
            kind,
            threshold,
            message: message.into(),
        }
    }
}

/// An option for select/radio/checkbox fields.
///
/// The stored value is a slug of the label: lowercased, whitespace runs
/// collapsed to single underscores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into().trim().to_string();
        let value = slugify(&label);
        Self { label, value }
    }
}

/// Label slug: lowercase, whitespace runs become single underscores.
pub fn slugify(label: &str) -> String {
    label
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Transform kinds for derived fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DerivedKind {
    /// Whole years between a single date parent and today
    Age,
    /// Numeric sum of all parents
    Sum,
    /// Space-joined string concatenation of all parents
    Concat,
    /// User-supplied arithmetic formula over parent values
    Custom,
    /// Out-of-set kind found in serialized data; evaluates to empty
    #[serde(other)]
    Unspecified,
}

/// Derived-field configuration.
///
/// `parent_field_ids` order matters for concat. `formula` is consulted only
/// when `kind` is `custom`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedFieldConfig {
    #[serde(rename = "parentFields")]
    pub parent_field_ids: Vec<String>,
    #[serde(rename = "type")]
    pub kind: DerivedKind,
    #[serde(default)]
    pub formula: String,
}

impl DerivedFieldConfig {
    pub fn new(kind: DerivedKind) -> Self {
        Self {
            parent_field_ids: Vec::new(),
            kind,
            formula: String::new(),
        }
    }

    pub fn with_parents(kind: DerivedKind, parent_field_ids: Vec<String>) -> Self {
        Self {
            parent_field_ids,
            kind,
            formula: String::new(),
        }
    }

    pub fn custom(parent_field_ids: Vec<String>, formula: impl Into<String>) -> Self {
        Self {
            parent_field_ids,
            kind: DerivedKind::Custom,
            formula: formula.into(),
        }
    }
}

impl Default for DerivedFieldConfig {
    fn default() -> Self {
        Self::new(DerivedKind::Custom)
    }
}

/// A single form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    /// Stable id, assigned at creation, never reused
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub required: bool,
    #[serde(rename = "defaultValue", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Ordered rule list; walked first-to-last at validation time
    #[serde(rename = "validation", default)]
    pub rules: Vec<ValidationRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    #[serde(rename = "isDerived", default)]
    pub is_derived: bool,
    #[serde(rename = "derivedConfig", default, skip_serializing_if = "Option::is_none")]
    pub derived_config: Option<DerivedFieldConfig>,
}

impl FormField {
    /// Creates a field with editor defaults: generated id, placeholder
    /// label, not required, no rules.
    pub fn new(field_type: FieldType) -> Self {
        Self {
            id: format!("field_{}", Uuid::new_v4().simple()),
            field_type,
            label: format!("New {} field", field_type.type_name()),
            required: false,
            default_value: None,
            rules: Vec::new(),
            options: if field_type.has_options() {
                Some(Vec::new())
            } else {
                None
            },
            is_derived: false,
            derived_config: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// Attaches a rule. At most one rule per kind; returns false if the
    /// kind is already attached.
    pub fn add_rule(&mut self, rule: ValidationRule) -> bool {
        if self.rules.iter().any(|r| r.kind == rule.kind) {
            return false;
        }
        self.rules.push(rule);
        true
    }

    /// Replaces the rule at `index`. Returns false if out of range.
    pub fn update_rule(&mut self, index: usize, rule: ValidationRule) -> bool {
        match self.rules.get_mut(index) {
            Some(slot) => {
                *slot = rule;
                true
            }
            None => false,
        }
    }

    /// Removes and returns the rule at `index`.
    pub fn remove_rule(&mut self, index: usize) -> Option<ValidationRule> {
        if index < self.rules.len() {
            Some(self.rules.remove(index))
        } else {
            None
        }
    }

    /// Toggles derivation. Passing a config marks the field derived;
    /// passing None clears both flag and config.
    pub fn set_derived(&mut self, config: Option<DerivedFieldConfig>) {
        self.is_derived = config.is_some();
        self.derived_config = config;
    }

    /// Appends an option built from `label`. Only meaningful for
    /// select/radio/checkbox fields; ignored elsewhere.
    pub fn add_option(&mut self, label: impl Into<String>) -> bool {
        if !self.field_type.has_options() {
            return false;
        }
        let option = SelectOption::new(label);
        if option.label.is_empty() {
            return false;
        }
        self.options.get_or_insert_with(Vec::new).push(option);
        true
    }

    /// Removes and returns the option at `index`.
    pub fn remove_option(&mut self, index: usize) -> Option<SelectOption> {
        match self.options.as_mut() {
            Some(options) if index < options.len() => Some(options.remove(index)),
            _ => None,
        }
    }
}
