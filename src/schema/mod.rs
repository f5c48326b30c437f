//! Form schema data model
//!
//! A schema is an ordered list of typed fields. Field order is display and
//! evaluation order. Fields carry ordered validation rules, option lists
//! (select/radio/checkbox only), and an optional derived-field
//! configuration.
//!
//! # Design Principles
//!
//! - Field ids are stable, unique within a schema, never reused
//! - Derived fields reference only non-derived parents (editor-enforced,
//!   engine-tolerated)
//! - Schemas round-trip through plain JSON

mod form;
mod types;
pub mod value;

pub use form::FormSchema;
pub use types::{
    slugify, DerivedFieldConfig, DerivedKind, FieldType, FormField, RuleKind, RuleValue,
    SelectOption, ValidationRule,
};
pub use value::FormValueMap;
