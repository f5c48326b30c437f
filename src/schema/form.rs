//! Form schema container and editing operations
//!
//! Field order is display and evaluation order. Editing operations mirror
//! the host editor's actions: append, replace, delete, reorder-by-swap.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use super::types::FormField;

/// A complete form schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    pub id: String,
    pub name: String,
    /// Ordered field list; order = display and evaluation order
    #[serde(default)]
    pub fields: Vec<FormField>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl FormSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: format!("form_{}", Uuid::new_v4().simple()),
            name: name.into(),
            fields: Vec::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Looks up a field by id.
    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Appends a field.
    pub fn add_field(&mut self, field: FormField) {
        self.fields.push(field);
        self.touch();
    }

    /// Replaces the field at `index`. Returns false if out of range.
    pub fn update_field(&mut self, index: usize, field: FormField) -> bool {
        match self.fields.get_mut(index) {
            Some(slot) => {
                *slot = field;
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Removes and returns the field at `index`.
    pub fn delete_field(&mut self, index: usize) -> Option<FormField> {
        if index < self.fields.len() {
            let removed = self.fields.remove(index);
            self.touch();
            Some(removed)
        } else {
            None
        }
    }

    /// Swaps the fields at `a` and `b`. Returns false if either index is
    /// out of range.
    pub fn swap_fields(&mut self, a: usize, b: usize) -> bool {
        if a < self.fields.len() && b < self.fields.len() {
            self.fields.swap(a, b);
            self.touch();
            true
        } else {
            false
        }
    }

    /// Records an edit.
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    /// Validates the schema structure itself (not runtime values).
    ///
    /// Checks the editor-enforced invariants:
    /// - field ids are unique
    /// - option lists appear only on select/radio/checkbox fields
    /// - derived fields carry a config, non-derived fields do not
    /// - derived parents reference existing, non-derived fields
    pub fn validate_structure(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.id.as_str()) {
                return Err(format!("Duplicate field id '{}'", field.id));
            }
        }

        for field in &self.fields {
            if field.options.is_some() && !field.field_type.has_options() {
                return Err(format!(
                    "Field '{}' of type {} must not carry options",
                    field.id,
                    field.field_type.type_name()
                ));
            }

            if field.is_derived != field.derived_config.is_some() {
                return Err(format!(
                    "Field '{}' derived flag and config disagree",
                    field.id
                ));
            }

            if let Some(config) = &field.derived_config {
                for parent_id in &config.parent_field_ids {
                    match self.field(parent_id) {
                        None => {
                            return Err(format!(
                                "Field '{}' references missing parent '{}'",
                                field.id, parent_id
                            ));
                        }
                        Some(parent) if parent.is_derived => {
                            return Err(format!(
                                "Field '{}' references derived parent '{}'",
                                field.id, parent_id
                            ));
                        }
                        Some(_) => {}
                    }
                }
            }
        }

        Ok(())
    }
}
