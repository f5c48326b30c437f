//! Session state and the single-pass derivation cycle

use serde_json::Value;
use std::collections::BTreeMap;

use crate::derived::compute_derived;
use crate::schema::value::is_empty_value;
use crate::schema::{FormSchema, FormValueMap};
use crate::validator::validate_field;

/// A live filling session over one schema.
///
/// All mutation is serialized through `&mut self`; the engines themselves
/// are pure functions of the snapshot they receive.
pub struct FormSession {
    schema: FormSchema,
    values: FormValueMap,
}

impl FormSession {
    /// Starts a session: seeds default values, then derives once.
    pub fn new(schema: FormSchema) -> Self {
        let mut session = Self {
            schema,
            values: FormValueMap::new(),
        };
        session.seed_defaults();
        session.derive_pass();
        session
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn values(&self) -> &FormValueMap {
        &self.values
    }

    pub fn value(&self, field_id: &str) -> Option<&Value> {
        self.values.get(field_id)
    }

    /// Records a value and recomputes every derived field exactly once,
    /// in schema field order, against the live map.
    ///
    /// This is a single pass, not a fixed point: a derived field whose
    /// parent is itself derived sees the parent's value from the previous
    /// pass when it appears earlier in field order. Chained derivation is
    /// unsupported and lags one cycle by design.
    pub fn set_value(&mut self, field_id: impl Into<String>, value: Value) {
        self.values.insert(field_id.into(), value);
        self.derive_pass();
    }

    /// Validates every non-derived field. An empty map means the form is
    /// accepted.
    pub fn submit(&self) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        for field in &self.schema.fields {
            if field.is_derived {
                continue;
            }
            let value = self.values.get(&field.id).unwrap_or(&Value::Null);
            if let Some(message) = validate_field(field, value) {
                errors.insert(field.id.clone(), message);
            }
        }
        errors
    }

    /// Clears all values back to the schema defaults and re-derives.
    pub fn reset(&mut self) {
        self.values.clear();
        self.seed_defaults();
        self.derive_pass();
    }

    fn seed_defaults(&mut self) {
        for field in &self.schema.fields {
            if let Some(default) = &field.default_value {
                if !is_empty_value(default) {
                    self.values.insert(field.id.clone(), default.clone());
                }
            }
        }
    }

    fn derive_pass(&mut self) {
        for index in 0..self.schema.fields.len() {
            let field = &self.schema.fields[index];
            if !field.is_derived {
                continue;
            }
            let computed = compute_derived(field, &self.values, &self.schema.fields);
            self.values.insert(field.id.clone(), computed);
        }
    }
}
