//! formcraft - A strict, deterministic form validation and derivation engine
//!
//! Form schemas are assembled from typed fields, fields carry ordered
//! validation rules, and derived fields recompute from their parents via a
//! fixed set of transforms or a restricted arithmetic formula.

pub mod derived;
pub mod observability;
pub mod schema;
pub mod session;
pub mod store;
pub mod validator;
