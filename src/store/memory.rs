//! In-memory store for hosts and tests

use std::collections::HashMap;

use crate::schema::FormSchema;

use super::{checked_copy, sort_schemas, FormStore, StoreError, StoreResult};

/// Volatile store keyed by schema id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    forms: HashMap<String, FormSchema>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

impl FormStore for MemoryStore {
    fn list(&self) -> StoreResult<Vec<FormSchema>> {
        let mut schemas: Vec<FormSchema> = self.forms.values().cloned().collect();
        sort_schemas(&mut schemas);
        Ok(schemas)
    }

    fn load(&self, id: &str) -> StoreResult<FormSchema> {
        self.forms
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn save(&mut self, schema: &FormSchema) -> StoreResult<FormSchema> {
        let stored = checked_copy(schema)?;
        self.forms.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    fn delete(&mut self, id: &str) -> StoreResult<()> {
        self.forms
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
