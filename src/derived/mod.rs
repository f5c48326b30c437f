//! Derived-field evaluation engine
//!
//! Computes a derived field's value from its parents: whole-year age from
//! a date, numeric sum, space-joined concatenation, or a user-supplied
//! arithmetic formula evaluated by a restricted four-operator evaluator.
//!
//! Every entry point returns a value for all inputs. Formula failures are
//! swallowed into the empty string and logged for diagnostics; nothing
//! here panics or propagates an error to the caller.

mod engine;
pub mod formula;

pub use engine::{age_on, compute_derived};
