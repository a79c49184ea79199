//! Parsed expression cache with fast hashing
//!
//! For callers that evaluate raw expression strings repeatedly instead of
//! holding a [`Predicate`](crate::Predicate), repeated text parses once
//! and the tree is reused process-wide.

use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde_json::Value as JsonValue;

use crate::ast::Expr;
use crate::error::Result;
use crate::evaluator;
use crate::lexer;
use crate::parser;

/// Global expression cache keyed by raw expression text.
static EXPRESSION_CACHE: Lazy<RwLock<AHashMap<String, Expr>>> =
    Lazy::new(|| RwLock::new(AHashMap::with_capacity(1024)));

/// Get or parse an expression, reusing the cached tree for repeats.
#[inline]
pub fn get_or_parse(expression: &str) -> Result<Expr> {
    // Fast path: check read lock first
    {
        let cache = EXPRESSION_CACHE.read();
        if let Some(tree) = cache.get(expression) {
            return Ok(tree.clone());
        }
    }

    // Slow path: parse and cache
    let tree = parser::parse(lexer::tokenize(expression)?);

    {
        let mut cache = EXPRESSION_CACHE.write();
        cache.insert(expression.to_string(), tree.clone());
    }

    Ok(tree)
}

/// Check an expression against a target, using the cached tree.
///
/// An empty expression always passes, so optional filters need no special
/// casing at the call site.
#[inline]
pub fn check(expression: &str, target: Option<&JsonValue>) -> Result<bool> {
    if expression.is_empty() {
        return Ok(true);
    }

    let tree = get_or_parse(expression)?;
    Ok(evaluator::eval(&tree, target).is_truthy())
}

/// Clear the expression cache.
pub fn clear_cache() {
    EXPRESSION_CACHE.write().clear();
}

/// Number of cached expressions.
pub fn cache_size() -> usize {
    EXPRESSION_CACHE.read().len()
}
