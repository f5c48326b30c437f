//! Restricted arithmetic formula evaluation
//!
//! A formula references parent fields by id or by label slug. Evaluation
//! is a fixed pipeline:
//!
//! 1. substitute every whole-word parent reference with its numeric value
//! 2. strip every character outside digits, `+ - * / ( ) .`, whitespace
//! 3. tokenize and evaluate with a recursive-descent evaluator
//!
//! Step 2 is the sandbox: no identifier, call, or other syntax survives
//! into evaluation. There is deliberately no dynamic code execution here.

mod lexer;
mod parser;

pub use lexer::{tokenize, Token};
pub use parser::evaluate_tokens;

use regex::Regex;

/// A parent field's contribution to formula substitution: the id token,
/// the label slug token when a definition is known, and the
/// numeric-coerced value (coercion failure already collapsed to 0).
#[derive(Debug, Clone)]
pub struct ParentBinding {
    pub id: String,
    pub slug: Option<String>,
    pub number: f64,
}

/// Evaluates a formula against parent bindings.
///
/// Any failure — malformed expression, unmatched parenthesis, non-finite
/// result — is an Err with a diagnostic reason. The caller decides how to
/// degrade; nothing is thrown past this boundary.
pub fn evaluate_formula(formula: &str, parents: &[ParentBinding]) -> Result<f64, String> {
    if formula.trim().is_empty() {
        return Err("empty formula".to_string());
    }

    let substituted = substitute(formula, parents);
    let sanitized = sanitize(&substituted);
    let tokens = tokenize(&sanitized)?;
    let result = evaluate_tokens(&tokens)?;

    if result.is_finite() {
        Ok(result)
    } else {
        Err("non-finite result".to_string())
    }
}

/// Replaces whole-word occurrences of each parent's id and label slug
/// with its numeric value, in parent order.
fn substitute(formula: &str, parents: &[ParentBinding]) -> String {
    let mut processed = formula.to_string();
    for parent in parents {
        let replacement = format_number(parent.number);
        processed = replace_word(&processed, &parent.id, &replacement);
        if let Some(slug) = &parent.slug {
            processed = replace_word(&processed, slug, &replacement);
        }
    }
    processed
}

fn replace_word(text: &str, word: &str, replacement: &str) -> String {
    if word.is_empty() {
        return text.to_string();
    }
    match Regex::new(&format!(r"\b{}\b", regex::escape(word))) {
        Ok(re) => re.replace_all(text, replacement).into_owned(),
        Err(_) => text.to_string(),
    }
}

/// Keeps only digits, the four operators, parentheses, dots, whitespace.
fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || c.is_whitespace() || "+-*/().".contains(*c))
        .collect()
}

fn format_number(n: f64) -> String {
    // f64 Display already drops the trailing .0 on integral values.
    format!("{}", n)
}
