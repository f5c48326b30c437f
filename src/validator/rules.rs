//! Per-kind rule checks
//!
//! Each check either passes silently or yields the rule's message. String
//! rules only inspect string values; numeric rules compare only when
//! coercion succeeds. A rule with a missing or unusable threshold passes.

use regex::Regex;
use serde_json::Value;

use crate::schema::value::{coerce_number, is_empty_value};
use crate::schema::{RuleKind, ValidationRule};

/// Punctuation accepted by the password special-character condition.
const PASSWORD_PUNCTUATION: &str = "!@#$%^&*(),.?\":{}|<>";

/// Fallback message for a pattern rule whose regex does not compile.
const INVALID_PATTERN_MESSAGE: &str = "Invalid pattern validation";

/// Applies a single rule to a value.
pub fn check_rule(rule: &ValidationRule, value: &Value) -> Option<String> {
    match rule.kind {
        RuleKind::Required => {
            if is_empty_value(value) {
                Some(rule.message.clone())
            } else {
                None
            }
        }
        RuleKind::MinLength => {
            let (s, threshold) = (value.as_str()?, number_threshold(rule)?);
            if (s.chars().count() as f64) < threshold {
                Some(rule.message.clone())
            } else {
                None
            }
        }
        RuleKind::MaxLength => {
            let (s, threshold) = (value.as_str()?, number_threshold(rule)?);
            if (s.chars().count() as f64) > threshold {
                Some(rule.message.clone())
            } else {
                None
            }
        }
        RuleKind::MinValue => {
            let (n, threshold) = (coerce_number(value)?, number_threshold(rule)?);
            if n < threshold {
                Some(rule.message.clone())
            } else {
                None
            }
        }
        RuleKind::MaxValue => {
            let (n, threshold) = (coerce_number(value)?, number_threshold(rule)?);
            if n > threshold {
                Some(rule.message.clone())
            } else {
                None
            }
        }
        RuleKind::Email => {
            let s = value.as_str()?;
            if email_shape(s) {
                None
            } else {
                Some(rule.message.clone())
            }
        }
        RuleKind::Password => check_password(value.as_str()?),
        RuleKind::Pattern => {
            let s = value.as_str()?;
            let pattern = rule.threshold.as_ref()?.as_text()?;
            if pattern.is_empty() {
                return None;
            }
            match Regex::new(pattern) {
                Ok(re) => {
                    if re.is_match(s) {
                        None
                    } else {
                        Some(rule.message.clone())
                    }
                }
                Err(_) => Some(INVALID_PATTERN_MESSAGE.to_string()),
            }
        }
    }
}

fn number_threshold(rule: &ValidationRule) -> Option<f64> {
    rule.threshold.as_ref()?.as_number()
}

/// Simple `local@domain.tld` shape, not full RFC validation.
fn email_shape(s: &str) -> bool {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .map(|re| re.is_match(s))
        .unwrap_or(false)
}

/// Collects every unmet password sub-condition into one combined message.
fn check_password(s: &str) -> Option<String> {
    let mut unmet = Vec::new();
    if s.chars().count() < 8 {
        unmet.push("at least 8 characters");
    }
    if !s.chars().any(|c| c.is_ascii_uppercase()) {
        unmet.push("one uppercase letter");
    }
    if !s.chars().any(|c| c.is_ascii_lowercase()) {
        unmet.push("one lowercase letter");
    }
    if !s.chars().any(|c| c.is_ascii_digit()) {
        unmet.push("one number");
    }
    if !s.chars().any(|c| PASSWORD_PUNCTUATION.contains(c)) {
        unmet.push("one special character");
    }

    if unmet.is_empty() {
        None
    } else {
        Some(format!("Password must contain {}", unmet.join(", ")))
    }
}
