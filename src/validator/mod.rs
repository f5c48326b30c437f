//! Field validation engine
//!
//! Given a field definition and a candidate value, produces either no
//! error or a single human-readable message. The taxonomy is entirely
//! message-based; nothing here returns a structured error code.
//!
//! Check order (first failure wins):
//! 1. required + empty value (exactly one required-family message)
//! 2. the field's rules in stored order, skipping `required`
//!
//! Empty values pass every non-required rule: only `required` catches
//! emptiness.

mod field;
mod messages;
mod rules;

pub use field::validate_field;
pub use messages::{available_rule_kinds, default_message, default_rule};
pub use rules::check_rule;
