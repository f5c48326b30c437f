//! Directory-backed JSON store
//!
//! One pretty-printed file per schema at `<dir>/<schema id>.json`. The
//! whole directory is read once at open into an in-memory registry;
//! reads serve from the registry, writes go through to disk.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::observability::Logger;
use crate::schema::FormSchema;

use super::{checked_copy, sort_schemas, FormStore, StoreError, StoreResult};

pub struct JsonFileStore {
    dir: PathBuf,
    forms: HashMap<String, FormSchema>,
}

impl JsonFileStore {
    /// Opens (and creates if needed) a store directory, loading every
    /// parseable schema file. Malformed files are skipped with a
    /// diagnostic rather than failing the open: a user's other forms
    /// stay reachable.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::Io {
            path: dir.display().to_string(),
            source: e,
        })?;

        let mut forms = HashMap::new();
        let entries = fs::read_dir(&dir).map_err(|e| StoreError::Io {
            path: dir.display().to_string(),
            source: e,
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| StoreError::Io {
                path: dir.display().to_string(),
                source: e,
            })?;
            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            match Self::read_schema_file(&path) {
                Ok(schema) => {
                    forms.insert(schema.id.clone(), schema);
                }
                Err(e) => {
                    let path_text = path.display().to_string();
                    let reason = e.to_string();
                    Logger::warn(
                        "FORM_FILE_SKIPPED",
                        &[("path", path_text.as_str()), ("reason", reason.as_str())],
                    );
                }
            }
        }

        Ok(Self { dir, forms })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    fn read_schema_file(path: &Path) -> StoreResult<FormSchema> {
        let content = fs::read_to_string(path).map_err(|e| StoreError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| StoreError::Malformed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn schema_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }
}

impl FormStore for JsonFileStore {
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
        let path = self.schema_path(&stored.id);
        let content = serde_json::to_string_pretty(&stored)?;
        fs::write(&path, content).map_err(|e| StoreError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        self.forms.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    fn delete(&mut self, id: &str) -> StoreResult<()> {
        if self.forms.remove(id).is_none() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        let path = self.schema_path(id);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| StoreError::Io {
                path: path.display().to_string(),
                source: e,
            })?;
        }
        Ok(())
    }
}
