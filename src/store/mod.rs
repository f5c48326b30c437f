//! Schema persistence
//!
//! Persistence sits behind an explicit repository interface injected into
//! the host; the engines never touch it. Two implementations: an
//! in-memory store for hosts and tests, and a directory of JSON files
//! (one file per schema).

mod errors;
mod file;
mod memory;

pub use errors::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::schema::FormSchema;

/// Repository interface for form schemas.
///
/// `save` upserts: schemas are user-edited documents, so saving an
/// existing id overwrites it and refreshes `updated_at`. The stored copy
/// is returned.
pub trait FormStore {
    /// All stored schemas, ordered by creation time then id.
    fn list(&self) -> StoreResult<Vec<FormSchema>>;

    /// Loads one schema by id.
    fn load(&self, id: &str) -> StoreResult<FormSchema>;

    /// Validates structure, then stores a copy with a refreshed
    /// `updated_at`.
    fn save(&mut self, schema: &FormSchema) -> StoreResult<FormSchema>;

    /// Removes a schema by id.
    fn delete(&mut self, id: &str) -> StoreResult<()>;
}

/// Shared save-time gate: structural invariants hold before anything is
/// written.
fn checked_copy(schema: &FormSchema) -> StoreResult<FormSchema> {
    schema
        .validate_structure()
        .map_err(StoreError::InvalidSchema)?;
    let mut copy = schema.clone();
    copy.updated_at = Some(chrono::Utc::now());
    Ok(copy)
}

/// Deterministic listing order.
fn sort_schemas(schemas: &mut [FormSchema]) {
    schemas.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
