//! Expression tree evaluation
//!
//! Leaves resolve against the target first and fall back to their literal,
//! so the same node can mean the plain string `x` or the value of the
//! target's `x` property depending on the target shape. Everything above
//! the leaves combines outcomes under loose truthiness and coercive
//! comparison.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde_json::Value as JsonValue;

use crate::ast::{Expr, Literal};

/// Result of evaluating a node against a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluated<'a> {
    /// Outcome of a logical, comparison or presence node.
    Bool(bool),
    /// A leaf literal that did not resolve to a property.
    Literal(&'a Literal),
    /// A property value resolved from the target.
    Field(&'a JsonValue),
}

impl Evaluated<'_> {
    /// Loose truthiness: null, false, zero and the empty string are falsy,
    /// everything else (including `"0"` and empty containers) is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Evaluated::Bool(flag) => *flag,
            Evaluated::Literal(literal) => literal_truthy(literal),
            Evaluated::Field(value) => json_truthy(value),
        }
    }

    /// Owned JSON form of the outcome.
    pub fn to_value(&self) -> JsonValue {
        match self {
            Evaluated::Bool(flag) => JsonValue::Bool(*flag),
            Evaluated::Literal(literal) => literal_value(literal),
            Evaluated::Field(value) => (*value).clone(),
        }
    }
}

/// Evaluate an expression tree against an optional target.
pub fn eval<'a>(expr: &'a Expr, target: Option<&'a JsonValue>) -> Evaluated<'a> {
    match expr {
        Expr::Value(literal) => eval_value(literal, target),
        Expr::Exists(literal) => Evaluated::Bool(eval_exists(literal, target)),
        Expr::Not(child) => Evaluated::Bool(!eval(child, target).is_truthy()),
        Expr::And(left, right) => {
            Evaluated::Bool(eval(left, target).is_truthy() && eval(right, target).is_truthy())
        }
        Expr::Or(left, right) => {
            Evaluated::Bool(eval(left, target).is_truthy() || eval(right, target).is_truthy())
        }
        Expr::EqualTo(left, right) => {
            Evaluated::Bool(loose_eq(&eval(left, target), &eval(right, target)))
        }
        Expr::GreaterThan(left, right) => Evaluated::Bool(
            loose_cmp(&eval(left, target), &eval(right, target)) == Some(Ordering::Greater),
        ),
        Expr::LessThan(left, right) => Evaluated::Bool(
            loose_cmp(&eval(left, target), &eval(right, target)) == Some(Ordering::Less),
        ),
    }
}

/// Resolve a leaf against the target.
///
/// A dotted text literal walks nested properties; the walk either resolves
/// fully or falls back to the literal as written, never to a partial
/// value. Anything else resolves through a single own-property lookup
/// keyed by the literal's text form.
fn eval_value<'a>(literal: &'a Literal, target: Option<&'a JsonValue>) -> Evaluated<'a> {
    let Some(target) = target.filter(|value| json_truthy(value)) else {
        return Evaluated::Literal(literal);
    };

    if let Literal::Text(text) = literal {
        if text.contains('.') {
            let mut current = target;
            for segment in text.split('.') {
                match own_property(current, segment) {
                    Some(next) => current = next,
                    None => return Evaluated::Literal(literal),
                }
            }
            return Evaluated::Field(current);
        }
    }

    match own_property(target, &literal_key(literal)) {
        Some(value) => Evaluated::Field(value),
        None => Evaluated::Literal(literal),
    }
}

/// Presence test for the wildcard rewrite.
///
/// A dotted text literal keeps walking segments after a miss, descending
/// with whatever was present; the result is false once any segment along
/// the way is absent.
fn eval_exists(literal: &Literal, target: Option<&JsonValue>) -> bool {
    let Some(target) = target.filter(|value| json_truthy(value)) else {
        return false;
    };

    if let Literal::Text(text) = literal {
        if text.contains('.') {
            let mut current = target;
            let mut present = true;
            for segment in text.split('.') {
                match own_property(current, segment) {
                    Some(next) => current = next,
                    None => present = false,
                }
            }
            return present;
        }
    }

    own_property(target, &literal_key(literal)).is_some()
}

/// Direct own-property lookup: objects by key, arrays by decimal index,
/// scalars own nothing.
fn own_property<'a>(target: &'a JsonValue, key: &str) -> Option<&'a JsonValue> {
    match target {
        JsonValue::Object(map) => map.get(key),
        JsonValue::Array(items) => key.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    }
}

/// Normalized view of an evaluated operand for coercive comparison.
enum Scalar<'a> {
    Null,
    Bool(bool),
    Number(f64),
    Text(&'a str),
    Composite(&'a JsonValue),
}

fn scalar<'a>(outcome: &Evaluated<'a>) -> Scalar<'a> {
    match *outcome {
        Evaluated::Bool(flag) => Scalar::Bool(flag),
        Evaluated::Literal(Literal::Text(text)) => Scalar::Text(text.as_str()),
        Evaluated::Literal(Literal::Number(number)) => Scalar::Number(*number),
        Evaluated::Literal(Literal::Bool(flag)) => Scalar::Bool(*flag),
        Evaluated::Field(value) => match value {
            JsonValue::Null => Scalar::Null,
            JsonValue::Bool(flag) => Scalar::Bool(*flag),
            JsonValue::Number(number) => number.as_f64().map_or(Scalar::Null, Scalar::Number),
            JsonValue::String(text) => Scalar::Text(text.as_str()),
            composite => Scalar::Composite(composite),
        },
    }
}

/// Loose equality over evaluated operands.
///
/// Nulls equal only each other. Arrays and objects compare structurally
/// and never equal scalars. Two texts compare as strings. Every other
/// pairing coerces both sides to numbers, where booleans count as 0 and 1
/// and empty or blank text counts as 0; a side that does not coerce fails
/// the comparison.
pub fn loose_eq(left: &Evaluated, right: &Evaluated) -> bool {
    match (scalar(left), scalar(right)) {
        (Scalar::Null, Scalar::Null) => true,
        (Scalar::Null, _) | (_, Scalar::Null) => false,
        (Scalar::Composite(a), Scalar::Composite(b)) => a == b,
        (Scalar::Composite(_), _) | (_, Scalar::Composite(_)) => false,
        (Scalar::Text(a), Scalar::Text(b)) => a == b,
        (a, b) => match (numeric(&a), numeric(&b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
    }
}

/// Loose ordering over evaluated operands.
///
/// Two texts compare ordinally; anything else goes through the same
/// numeric coercion as equality, with null counting as 0. Operands that
/// do not coerce do not order.
pub fn loose_cmp(left: &Evaluated, right: &Evaluated) -> Option<Ordering> {
    match (scalar(left), scalar(right)) {
        (Scalar::Text(a), Scalar::Text(b)) => Some(a.cmp(b)),
        (a, b) => numeric(&a)?.partial_cmp(&numeric(&b)?),
    }
}

fn numeric(scalar: &Scalar) -> Option<f64> {
    match scalar {
        Scalar::Null => Some(0.0),
        Scalar::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Scalar::Number(number) => Some(*number),
        Scalar::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse().ok()
            }
        }
        Scalar::Composite(_) => None,
    }
}

fn json_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(flag) => *flag,
        JsonValue::Number(number) => number.as_f64().map_or(false, |n| n != 0.0),
        JsonValue::String(text) => !text.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

fn literal_truthy(literal: &Literal) -> bool {
    match literal {
        Literal::Text(text) => !text.is_empty(),
        Literal::Number(number) => *number != 0.0 && !number.is_nan(),
        Literal::Bool(flag) => *flag,
    }
}

/// Property-key form of a literal, the way a target object would name it.
fn literal_key(literal: &Literal) -> Cow<'_, str> {
    match literal {
        Literal::Text(text) => Cow::Borrowed(text.as_str()),
        Literal::Number(number) => Cow::Owned(format_number(*number)),
        Literal::Bool(true) => Cow::Borrowed("true"),
        Literal::Bool(false) => Cow::Borrowed("false"),
    }
}

fn literal_value(literal: &Literal) -> JsonValue {
    match literal {
        Literal::Text(text) => JsonValue::String(text.clone()),
        Literal::Number(number) => serde_json::Number::from_f64(*number)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Literal::Bool(flag) => JsonValue::Bool(*flag),
    }
}

fn format_number(number: f64) -> String {
    if number.is_finite() && number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}
