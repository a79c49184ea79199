//! Predicate facade owning the raw expression and its parsed tree

use once_cell::sync::OnceCell;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::ast::Expr;
use crate::error::Result;
use crate::evaluator::{self, Evaluated};
use crate::lexer;
use crate::parser;

/// A filter expression, parsed on first evaluation and reused afterwards.
///
/// ```
/// use prefix_predicate::Predicate;
/// use serde_json::json;
///
/// let adults = Predicate::new("&(age>18)(name=*)");
/// assert!(adults.matches(Some(&json!({"age": 21, "name": "Ada"}))).unwrap());
/// assert!(!adults.matches(Some(&json!({"age": 12, "name": "Ben"}))).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct Predicate {
    expression: String,
    tree: OnceCell<Expr>,
}

impl Predicate {
    /// Store the raw expression without parsing it.
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            tree: OnceCell::new(),
        }
    }

    /// The raw expression string.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Parse now instead of waiting for the first evaluation.
    pub fn compile(&self) -> Result<()> {
        self.tree().map(|_| ())
    }

    /// Evaluate against `target`, returning whatever the root node
    /// produces: a boolean for logical, comparison and presence roots, or
    /// an arbitrary value for a bare leaf.
    pub fn eval<'a>(&'a self, target: Option<&'a JsonValue>) -> Result<Evaluated<'a>> {
        Ok(evaluator::eval(self.tree()?, target))
    }

    /// Evaluate and coerce the outcome to a boolean.
    pub fn matches(&self, target: Option<&JsonValue>) -> Result<bool> {
        Ok(self.eval(target)?.is_truthy())
    }

    /// Evaluate against any serializable target.
    pub fn matches_object<T: Serialize>(&self, target: &T) -> Result<bool> {
        let value = serde_json::to_value(target)?;
        self.matches(Some(&value))
    }

    // Built at most once per instance; OnceCell keeps the one-time build
    // race-free under concurrent first use.
    fn tree(&self) -> Result<&Expr> {
        self.tree
            .get_or_try_init(|| Ok(parser::parse(lexer::tokenize(&self.expression)?)))
    }
}

impl std::str::FromStr for Predicate {
    type Err = crate::error::PredicateError;

    /// Build a predicate and parse it up front, rejecting bad syntax early.
    fn from_str(expression: &str) -> Result<Self> {
        let predicate = Predicate::new(expression);
        predicate.compile()?;
        Ok(predicate)
    }
}
